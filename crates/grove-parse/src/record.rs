//! One parsed line, as named values.

use indexmap::IndexMap;

use grove_core::{LayerType, Region};

use crate::error::ParseError;
use crate::value::Value;

/// The labelled values parsed from a single input line.
///
/// Fields appear in declaration order. Typed getters report a missing
/// field or a type mismatch as a [`ParseError`] carrying the record's
/// line number, so a fold can propagate them with `?`.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    line: usize,
    values: IndexMap<String, Value>,
}

impl Record {
    /// An empty record for `line`.
    pub fn new(line: usize) -> Self {
        Self {
            line,
            values: IndexMap::new(),
        }
    }

    /// 1-based line number this record was parsed from.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Store a value under `name`, replacing any previous one.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    /// The raw value under `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Whether `name` was parsed.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Field names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.values.keys().map(String::as_str)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The value under `name`, or [`ParseError::MissingField`].
    pub fn require(&self, name: &str) -> Result<&Value, ParseError> {
        self.values.get(name).ok_or_else(|| ParseError::MissingField {
            line: self.line,
            field: name.to_string(),
        })
    }

    /// An integer field.
    pub fn int(&self, name: &str) -> Result<i32, ParseError> {
        self.typed(name, "integer", Value::as_int)
    }

    /// An integer field that may have been left blank.
    pub fn optional_int(&self, name: &str) -> Result<Option<i32>, ParseError> {
        match self.values.get(name) {
            None | Some(Value::Missing) => Ok(None),
            Some(_) => self.int(name).map(Some),
        }
    }

    /// A float field.
    pub fn float(&self, name: &str) -> Result<f32, ParseError> {
        self.typed(name, "float", Value::as_float)
    }

    /// A float field that may have been left blank.
    pub fn optional_float(&self, name: &str) -> Result<Option<f32>, ParseError> {
        match self.values.get(name) {
            None | Some(Value::Missing) => Ok(None),
            Some(_) => self.float(name).map(Some),
        }
    }

    /// A single-character field.
    pub fn char(&self, name: &str) -> Result<char, ParseError> {
        self.typed(name, "character", Value::as_char)
    }

    /// A string field.
    pub fn str(&self, name: &str) -> Result<&str, ParseError> {
        let value = self.require(name)?;
        value.as_str().ok_or_else(|| self.wrong_type(name, "string", value))
    }

    /// A region field.
    pub fn region(&self, name: &str) -> Result<Region, ParseError> {
        self.typed(name, "region", Value::as_region)
    }

    /// A layer-type field.
    pub fn layer(&self, name: &str) -> Result<LayerType, ParseError> {
        self.typed(name, "layer type", Value::as_layer)
    }

    /// The values of a multi-value field.
    pub fn multi(&self, name: &str) -> Result<&[Value], ParseError> {
        let value = self.require(name)?;
        value
            .as_multi()
            .ok_or_else(|| self.wrong_type(name, "multi-value", value))
    }

    /// A multi-value field of numbers, as floats.
    pub fn floats(&self, name: &str) -> Result<Vec<f32>, ParseError> {
        self.multi(name)?
            .iter()
            .map(|v| {
                v.as_float()
                    .ok_or_else(|| self.wrong_type(name, "float", v))
            })
            .collect()
    }

    fn typed<T>(
        &self,
        name: &str,
        expected: &'static str,
        extract: impl Fn(&Value) -> Option<T>,
    ) -> Result<T, ParseError> {
        let value = self.require(name)?;
        extract(value).ok_or_else(|| self.wrong_type(name, expected, value))
    }

    fn wrong_type(&self, name: &str, expected: &'static str, found: &Value) -> ParseError {
        ParseError::WrongType {
            line: self.line,
            field: name.to_string(),
            expected,
            found: found.type_name(),
        }
    }
}
