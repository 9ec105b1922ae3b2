//! Generic keyed coefficient tables.
//!
//! A [`CoefficientParser`] is declared key column by key column, then a
//! packed run of coefficient columns. Each row becomes one
//! [`Coefficients`] vector stored under the tuple of its key values in
//! a [`MatrixMap`] whose dimensions are the key domains in declaration
//! order.
//!
//! ```text
//! AC C   1.0   2.0   3.5     species, region, coefficients
//! ```

use std::io::BufRead;

use tracing::debug;

use grove_core::{Coefficients, Region, UtilizationClass};
use grove_matrix::{Key, KeyRef, MatrixMap};
use grove_parse::{LineParser, ParseError, Record, Value, ValueParser};

use crate::at_line;
use crate::control::{ControlKey, ControlMap, ResourceParser};

/// Record field holding the packed coefficients.
pub const COEFFICIENTS_FIELD: &str = "coefficients";

/// Where a key column's legal values come from.
#[derive(Clone, Debug)]
enum Domain {
    /// A fixed list given at declaration.
    Fixed(Vec<Key>),
    /// The BEC zones in the control map.
    Becs,
    /// The genus aliases in the control map.
    Species,
}

#[derive(Clone, Debug)]
struct KeyColumn {
    name: String,
    domain: Domain,
}

/// Builder and parser for a table with one to three key columns.
#[derive(Clone, Debug)]
pub struct CoefficientParser {
    control_key: ControlKey,
    layout: LineParser,
    keys: Vec<KeyColumn>,
    n_coefficients: usize,
    index_from: i32,
}

impl CoefficientParser {
    /// A parser with no columns yet. Lines starting with three blanks
    /// end the table.
    pub fn new(control_key: ControlKey) -> Self {
        Self {
            control_key,
            layout: LineParser::new()
                .stop_line(|line| line.starts_with("   "))
                .ignore_line(|line| line.trim().is_empty()),
            keys: Vec::new(),
            n_coefficients: 0,
            index_from: 0,
        }
    }

    fn push_key(mut self, width: usize, name: &str, parser: ValueParser, domain: Domain) -> Self {
        self.layout = self.layout.value(width, name, parser);
        self.keys.push(KeyColumn {
            name: name.to_string(),
            domain,
        });
        self
    }

    /// A key column whose values must come from `domain`.
    pub fn key(
        self,
        width: usize,
        name: &str,
        parser: ValueParser,
        domain: impl IntoIterator<Item = Key>,
    ) -> Self {
        let domain = Domain::Fixed(domain.into_iter().collect());
        self.push_key(width, name, parser, domain)
    }

    /// A 4-character BEC zone column, checked against the loaded zones.
    pub fn bec_key(self) -> Self {
        self.push_key(4, "bec", ValueParser::stripped_string(), Domain::Becs)
    }

    /// A 2-character species column, checked against the loaded genera.
    pub fn species_key(self) -> Self {
        self.push_key(2, "sp0", ValueParser::stripped_string(), Domain::Species)
    }

    /// A 1-character region column.
    pub fn region_key(self) -> Self {
        let domain = Region::ALL.into_iter().map(Key::from);
        self.key(1, "region", ValueParser::region(), domain)
    }

    /// A 2-digit utilization class column; only the diameter bands
    /// (1 to 4) are legal.
    pub fn ucl_key(self) -> Self {
        let domain = UtilizationClass::UTIL_CLASSES.into_iter().map(Key::from);
        self.key(2, "ucl", ValueParser::integer(), domain)
    }

    /// Filler columns.
    pub fn space(mut self, width: usize) -> Self {
        self.layout = self.layout.space(width);
        self
    }

    /// `n` packed coefficient columns of `width` characters each.
    pub fn coefficients(mut self, n: usize, width: usize) -> Self {
        self.layout = self
            .layout
            .multi_value(n, width, COEFFICIENTS_FIELD, ValueParser::float());
        self.n_coefficients = n;
        self
    }

    /// Index of the first stored coefficient. Defaults to 0.
    pub fn index_from(mut self, index_from: i32) -> Self {
        self.index_from = index_from;
        self
    }

    /// Number of key columns declared so far.
    pub fn arity(&self) -> usize {
        self.keys.len()
    }

    fn resolve(&self, control: &ControlMap) -> Result<Vec<Vec<Key>>, ParseError> {
        self.keys
            .iter()
            .map(|column| {
                Ok(match &column.domain {
                    Domain::Fixed(keys) => keys.clone(),
                    Domain::Becs => control.becs()?.aliases().map(Key::from).collect(),
                    Domain::Species => control.genera()?.aliases().map(Key::from).collect(),
                })
            })
            .collect()
    }

    fn row_key(&self, record: &Record, map: &MatrixMap<Coefficients>) -> Result<Vec<Key>, ParseError> {
        let line = record.line();
        self.keys
            .iter()
            .zip(map.dimensions())
            .map(|(column, domain)| {
                let value = record.require(&column.name)?;
                let key = match value {
                    Value::Int(v) => Key::Int(*v),
                    Value::Char(c) => Key::Char(*c),
                    Value::Str(s) => Key::Str(s.clone()),
                    Value::Region(r) => Key::Region(*r),
                    other => {
                        return Err(ParseError::WrongType {
                            line,
                            field: column.name.clone(),
                            expected: "key",
                            found: other.type_name(),
                        })
                    }
                };
                if !domain.contains(&key) {
                    return Err(ParseError::validation(
                        line,
                        format!("{} is not a valid {}", key_text(&key), column.name),
                    ));
                }
                Ok(key)
            })
            .collect()
    }

    /// Parse `reader` with key domains taken from `control`.
    pub fn parse_table<R: BufRead>(
        &self,
        reader: R,
        control: &ControlMap,
    ) -> Result<MatrixMap<Coefficients>, ParseError> {
        let (n, from) = (self.n_coefficients, self.index_from);
        let map = MatrixMap::new(self.resolve(control)?, move |_| Coefficients::empty(n, from))
            .map_err(|e| ParseError::resource(format!("{}: {e}", self.control_key)))?;

        let map = self.layout.fold(reader, map, |mut map, record| {
            let keys = self.row_key(&record, &map)?;
            let refs: Vec<KeyRef<'_>> = keys.iter().map(KeyRef::from).collect();
            let values = record.floats(COEFFICIENTS_FIELD)?;
            map.put(&refs, Coefficients::new(values, from))
                .map_err(at_line(record.line()))?;
            Ok(map)
        })?;

        debug!(
            resource = %self.control_key,
            rows = map.populated_len(),
            cells = map.len(),
            "keyed coefficients parsed"
        );
        Ok(map)
    }
}

fn key_text(key: &Key) -> String {
    match key {
        Key::Str(s) => s.clone(),
        Key::Int(v) => v.to_string(),
        Key::Char(c) => c.to_string(),
        Key::Region(r) => r.alias().to_string(),
    }
}

impl ResourceParser for CoefficientParser {
    type Output = MatrixMap<Coefficients>;

    fn control_key(&self) -> ControlKey {
        self.control_key.clone()
    }

    fn parse<R: BufRead>(
        &self,
        reader: R,
        control: &ControlMap,
    ) -> Result<MatrixMap<Coefficients>, ParseError> {
        self.parse_table(reader, control)
    }
}
