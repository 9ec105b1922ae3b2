//! Error types for fixed-width ingestion.

use std::error::Error;
use std::fmt;
use std::io;

/// Errors raised while reading a fixed-width resource.
///
/// Every variant tied to input text carries the 1-based line number it
/// was raised on. A parse stops at the first error; partial results are
/// never returned.
#[derive(Debug)]
pub enum ParseError {
    /// Reading the underlying stream failed.
    Io(io::Error),
    /// A line is too short to supply a declared field.
    MalformedLine {
        /// 1-based line number.
        line: usize,
        /// The field that could not be filled.
        field: String,
        /// Width the field declares, in characters.
        expected: usize,
        /// Characters actually available for it.
        found: usize,
    },
    /// A field's raw text could not be converted to its declared type.
    ValueParse {
        /// 1-based line number.
        line: usize,
        /// Field name.
        field: String,
        /// The raw text of the field.
        value: String,
        /// Why the conversion failed.
        reason: String,
    },
    /// A parsed value violates a domain rule (range, membership, flag).
    Validation {
        /// 1-based line number.
        line: usize,
        /// What was wrong.
        reason: String,
    },
    /// A record lacks a field its consumer asked for.
    MissingField {
        /// 1-based line number.
        line: usize,
        /// Field name.
        field: String,
    },
    /// A record field holds a different type than its consumer expected.
    WrongType {
        /// 1-based line number.
        line: usize,
        /// Field name.
        field: String,
        /// The type asked for.
        expected: &'static str,
        /// The type actually stored.
        found: &'static str,
    },
    /// A whole-resource check failed after every line was read, or a
    /// required resource is not available.
    Resource {
        /// What was wrong.
        reason: String,
    },
}

impl ParseError {
    /// Shorthand for [`ParseError::Validation`].
    pub fn validation(line: usize, reason: impl Into<String>) -> Self {
        Self::Validation {
            line,
            reason: reason.into(),
        }
    }

    /// Shorthand for [`ParseError::Resource`].
    pub fn resource(reason: impl Into<String>) -> Self {
        Self::Resource {
            reason: reason.into(),
        }
    }

    /// The 1-based line the error was raised on, if it is tied to one.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::MalformedLine { line, .. }
            | Self::ValueParse { line, .. }
            | Self::Validation { line, .. }
            | Self::MissingField { line, .. }
            | Self::WrongType { line, .. } => Some(*line),
            Self::Io(_) | Self::Resource { .. } => None,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::MalformedLine {
                line,
                field,
                expected,
                found,
            } => write!(
                f,
                "line {line}: field '{field}' needs {expected} characters but only {found} are present"
            ),
            Self::ValueParse {
                line,
                field,
                value,
                reason,
            } => write!(f, "line {line}: field '{field}' value '{value}': {reason}"),
            Self::Validation { line, reason } => write!(f, "line {line}: {reason}"),
            Self::MissingField { line, field } => {
                write!(f, "line {line}: record has no field '{field}'")
            }
            Self::WrongType {
                line,
                field,
                expected,
                found,
            } => write!(
                f,
                "line {line}: field '{field}' holds {found}, expected {expected}"
            ),
            Self::Resource { reason } => f.write_str(reason),
        }
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ParseError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_line_and_field() {
        let err = ParseError::ValueParse {
            line: 2,
            field: "part1".into(),
            value: "004x".into(),
            reason: "invalid digit found in string".into(),
        };
        assert_eq!(
            err.to_string(),
            "line 2: field 'part1' value '004x': invalid digit found in string"
        );
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn io_error_has_source() {
        let err: ParseError = io::Error::new(io::ErrorKind::UnexpectedEof, "eof").into();
        assert!(err.source().is_some());
        assert_eq!(err.line(), None);
    }
}
