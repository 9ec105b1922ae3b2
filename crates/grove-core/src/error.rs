//! Error types for core domain lookups.

use std::error::Error;
use std::fmt;

/// A coded value (region alias, layer code, utilization index) that is
/// not one of the recognised codes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CodeError {
    /// The code is not in the closed set for its kind.
    Unrecognized {
        /// What kind of code was being decoded (e.g. `"region"`).
        kind: &'static str,
        /// The offending text.
        code: String,
    },
}

impl fmt::Display for CodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unrecognized { kind, code } => {
                write!(f, "'{code}' is not a recognized {kind} code")
            }
        }
    }
}

impl Error for CodeError {}

/// Errors from offset-indexed coefficient access.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CoefficientError {
    /// The index lies outside `[index_from, index_from + len)`.
    IndexOutOfRange {
        /// The requested index.
        index: i32,
        /// Lowest valid index.
        from: i32,
        /// Highest valid index (inclusive).
        to: i32,
    },
}

impl fmt::Display for CoefficientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { index, from, to } => {
                write!(
                    f,
                    "coefficient index {index} is out of range; expecting a value from {from} to {to}"
                )
            }
        }
    }
}

impl Error for CoefficientError {}
