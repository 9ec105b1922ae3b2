//! Typed field values and the parsers that produce them.

use std::fmt;
use std::sync::Arc;

use grove_core::{LayerType, Region};

/// A parsed field value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// A whole number.
    Int(i32),
    /// A floating-point number.
    Float(f32),
    /// A single character.
    Char(char),
    /// Text, stripped or raw depending on the parser.
    Str(String),
    /// A decoded region alias.
    Region(Region),
    /// A decoded layer code.
    Layer(LayerType),
    /// The ordered results of a multi-value segment.
    Multi(Vec<Value>),
    /// An optional field that was blank or absent.
    Missing,
}

impl Value {
    /// Name of the variant, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Char(_) => "character",
            Self::Str(_) => "string",
            Self::Region(_) => "region",
            Self::Layer(_) => "layer type",
            Self::Multi(_) => "multi-value",
            Self::Missing => "missing",
        }
    }

    /// The integer, if this is one.
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// The float, if this is one. Integers widen.
    pub fn as_float(&self) -> Option<f32> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f32),
            _ => None,
        }
    }

    /// The character, if this is one.
    pub fn as_char(&self) -> Option<char> {
        match self {
            Self::Char(c) => Some(*c),
            _ => None,
        }
    }

    /// The text, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The region, if this is one.
    pub fn as_region(&self) -> Option<Region> {
        match self {
            Self::Region(r) => Some(*r),
            _ => None,
        }
    }

    /// The layer kind, if this is one.
    pub fn as_layer(&self) -> Option<LayerType> {
        match self {
            Self::Layer(l) => Some(*l),
            _ => None,
        }
    }

    /// The repeated values, if this came from a multi-value segment.
    pub fn as_multi(&self) -> Option<&[Value]> {
        match self {
            Self::Multi(v) => Some(v),
            _ => None,
        }
    }

    /// Whether this is [`Value::Missing`].
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Char(c) => write!(f, "{c}"),
            Self::Str(s) => f.write_str(s),
            Self::Region(r) => write!(f, "{r}"),
            Self::Layer(l) => f.write_str(l.code()),
            Self::Multi(values) => {
                f.write_str("[")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{v}")?;
                }
                f.write_str("]")
            }
            Self::Missing => f.write_str("<missing>"),
        }
    }
}

/// A field's raw text could not be turned into a [`Value`].
///
/// The line parser adds the line number and field name when it lifts
/// this into a [`ParseError::ValueParse`](crate::ParseError::ValueParse).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueError {
    /// The raw text handed to the parser.
    pub value: String,
    /// Why it was rejected.
    pub reason: String,
}

impl ValueError {
    /// Create an error for `value`.
    pub fn new(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}': {}", self.value, self.reason)
    }
}

impl std::error::Error for ValueError {}

type ParseFn = dyn Fn(&str) -> Result<Value, ValueError> + Send + Sync;

/// Converts the raw text of one fixed-width field into a [`Value`].
///
/// Parsers are cheap to clone and compose: [`in_range`](Self::in_range),
/// [`one_of`](Self::one_of), [`validate`](Self::validate) and
/// [`map`](Self::map) wrap an existing parser and keep the raw text for
/// error reporting.
#[derive(Clone)]
pub struct ValueParser {
    parse: Arc<ParseFn>,
}

impl fmt::Debug for ValueParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueParser").finish_non_exhaustive()
    }
}

impl ValueParser {
    /// Wrap an arbitrary conversion.
    pub fn new<F>(parse: F) -> Self
    where
        F: Fn(&str) -> Result<Value, ValueError> + Send + Sync + 'static,
    {
        Self {
            parse: Arc::new(parse),
        }
    }

    /// Run the parser on a field's raw text.
    pub fn parse(&self, raw: &str) -> Result<Value, ValueError> {
        (self.parse)(raw)
    }

    /// Whitespace-trimmed decimal integer.
    pub fn integer() -> Self {
        Self::new(|raw| {
            let text = raw.trim();
            text.parse::<i32>()
                .map(Value::Int)
                .map_err(|e| ValueError::new(text, e.to_string()))
        })
    }

    /// Whitespace-trimmed decimal float.
    pub fn float() -> Self {
        Self::new(|raw| {
            let text = raw.trim();
            text.parse::<f32>()
                .map(Value::Float)
                .map_err(|e| ValueError::new(text, e.to_string()))
        })
    }

    /// The first character of the field, untrimmed.
    pub fn character() -> Self {
        Self::new(|raw| {
            raw.chars()
                .next()
                .map(Value::Char)
                .ok_or_else(|| ValueError::new(raw, "expected a character"))
        })
    }

    /// The field text exactly as it appears.
    pub fn string() -> Self {
        Self::new(|raw| Ok(Value::Str(raw.to_string())))
    }

    /// The field text with surrounding whitespace removed.
    pub fn stripped_string() -> Self {
        Self::new(|raw| Ok(Value::Str(raw.trim().to_string())))
    }

    /// A single-character region alias.
    pub fn region() -> Self {
        Self::new(|raw| {
            let text = raw.trim();
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Region::from_alias(c)
                    .map(Value::Region)
                    .map_err(|e| ValueError::new(text, e.to_string())),
                _ => Err(ValueError::new(text, "expected a single region character")),
            }
        })
    }

    /// A layer code (`P` or `V`).
    pub fn layer_type() -> Self {
        Self::new(|raw| {
            LayerType::from_code(raw)
                .map(Value::Layer)
                .map_err(|e| ValueError::new(raw.trim(), e.to_string()))
        })
    }

    /// Yield [`Value::Missing`] for blank text, otherwise defer to `self`.
    pub fn optional(self) -> Self {
        Self::new(move |raw| {
            if raw.trim().is_empty() {
                Ok(Value::Missing)
            } else {
                self.parse(raw)
            }
        })
    }

    /// Reject numeric values outside `[min, max]`.
    pub fn in_range(self, min: f64, max: f64) -> Self {
        self.validate(move |value| match value.as_float() {
            Some(v) if (f64::from(v) >= min) && (f64::from(v) <= max) => Ok(()),
            Some(v) => Err(format!(
                "{v} is out of range; expecting a value from {min} to {max}"
            )),
            None => Ok(()),
        })
    }

    /// Accept only the listed codes (compared after stripping).
    pub fn one_of(codes: &[&str]) -> Self {
        let codes: Vec<String> = codes.iter().map(|c| c.to_string()).collect();
        Self::new(move |raw| {
            let text = raw.trim();
            if codes.iter().any(|c| c == text) {
                Ok(Value::Str(text.to_string()))
            } else {
                Err(ValueError::new(
                    text,
                    format!("expected one of {}", codes.join(", ")),
                ))
            }
        })
    }

    /// Run an extra check on the parsed value.
    pub fn validate<F>(self, check: F) -> Self
    where
        F: Fn(&Value) -> Result<(), String> + Send + Sync + 'static,
    {
        Self::new(move |raw| {
            let value = self.parse(raw)?;
            check(&value).map_err(|reason| ValueError::new(raw.trim(), reason))?;
            Ok(value)
        })
    }

    /// Transform the parsed value.
    pub fn map<F>(self, f: F) -> Self
    where
        F: Fn(Value) -> Result<Value, String> + Send + Sync + 'static,
    {
        Self::new(move |raw| {
            let value = self.parse(raw)?;
            f(value).map_err(|reason| ValueError::new(raw.trim(), reason))
        })
    }

    /// Replace the failure reason with one built from the raw text.
    pub fn with_reason<F>(self, describe: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self::new(move |raw| {
            self.parse(raw)
                .map_err(|e| ValueError::new(e.value, describe(raw)))
        })
    }
}
