//! Error types for coefficient store access.

use std::error::Error;
use std::fmt;

use crate::key::Key;

/// Errors from building, addressing or reinterpreting a [`MatrixMap`](crate::MatrixMap).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatrixError {
    /// The dimension list is unusable (wrong count, an empty domain, or
    /// a cell count that overflows).
    InvalidDimensions {
        /// What was wrong.
        reason: String,
    },
    /// A call supplied the wrong number of key components.
    Arity {
        /// The store's dimensionality.
        expected: usize,
        /// Components supplied.
        found: usize,
    },
    /// A key component is not in its dimension's domain.
    UnknownKey {
        /// 0-based dimension index.
        dimension: usize,
        /// The offending key.
        key: Key,
    },
    /// A store was reinterpreted at the wrong dimensionality.
    ShapeMismatch {
        /// Arity of the requested view.
        expected: usize,
        /// Dimensionality of the store.
        found: usize,
    },
    /// A store's domain holds keys the requested view cannot represent.
    KeyType {
        /// 0-based dimension index.
        dimension: usize,
        /// The first key that did not convert.
        key: Key,
    },
}

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { reason } => write!(f, "invalid dimensions: {reason}"),
            Self::Arity { expected, found } => {
                write!(f, "expected {expected} key components, got {found}")
            }
            Self::UnknownKey { dimension, key } => {
                write!(f, "key {key} is not in the domain of dimension {dimension}")
            }
            Self::ShapeMismatch { expected, found } => write!(
                f,
                "cannot view a {found}-dimensional map as {expected}-dimensional"
            ),
            Self::KeyType { dimension, key } => write!(
                f,
                "key {key} in dimension {dimension} does not match the view's key type"
            ),
        }
    }
}

impl Error for MatrixError {}
