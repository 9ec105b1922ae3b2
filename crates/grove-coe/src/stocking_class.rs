//! Stocking class factors.
//!
//! ```text
//! col  0     stocking class (one character)
//! col  2     region alias
//! col  4     layer code
//! cols 5-7   item group (unused)
//! cols 8-13  factor
//! cols 14-18 percent of area
//! ```
//!
//! A row with a blank class column is skipped and class `Z` ends the
//! table. Every other row must be complete. The result is keyed by every
//! class seen, in order of first appearance, and both regions; a table
//! with no rows gives a store with no classes.

use std::io::BufRead;

use indexmap::IndexMap;
use tracing::{debug, warn};

use grove_core::{LayerType, Region};
use grove_matrix::MatrixMap2;
use grove_parse::{LineParser, ParseError, ValueParser};

use crate::at_line;
use crate::control::{ControlKey, ControlMap, ResourceParser};

/// Factors keyed by stocking class and region.
pub type StockingClassFactors = MatrixMap2<char, Region, Option<StockingClassFactor>>;

/// One row of the table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StockingClassFactor {
    /// Stocking class code.
    pub stocking_class: char,
    /// Region the factor applies to.
    pub region: Region,
    /// Layer the factor applies to.
    pub layer: LayerType,
    /// Multiplicative factor.
    pub factor: f32,
    /// Percent of area.
    pub npct_area: i32,
}

/// Parser for stocking class factor tables.
#[derive(Clone, Debug)]
pub struct StockingClassFactorParser {
    layout: LineParser,
}

impl Default for StockingClassFactorParser {
    fn default() -> Self {
        Self::new()
    }
}

impl StockingClassFactorParser {
    /// A parser with the standard layout.
    pub fn new() -> Self {
        let layout = LineParser::new()
            .value(1, "stk", ValueParser::character())
            .space(1)
            .value(1, "region", ValueParser::region())
            .space(1)
            .value(1, "layer", ValueParser::layer_type())
            .integer(3, "itg")
            .floating(6, "factor")
            .integer(5, "npct")
            .ignore_line(|line| line.trim().is_empty())
            .ignore_segments(|segments| segments[0].trim().is_empty())
            .stop_segments(|segments| segments[0].eq_ignore_ascii_case("Z"));
        Self { layout }
    }

    /// Parse `reader` into a class × region store.
    pub fn parse_factors<R: BufRead>(&self, reader: R) -> Result<StockingClassFactors, ParseError> {
        let rows = self.layout.fold(reader, IndexMap::new(), |mut rows, record| {
            let stocking_class = record.char("stk")?;
            let region = record.region("region")?;
            let entry = StockingClassFactor {
                stocking_class,
                region,
                layer: record.layer("layer")?,
                factor: record.float("factor")?,
                npct_area: record.int("npct")?,
            };
            if let Some((earlier, _)) = rows.insert((stocking_class, region), (record.line(), entry)) {
                warn!(line = record.line(), earlier, %stocking_class, %region, "stocking class row replaced");
            }
            Ok(rows)
        })?;

        let mut classes: Vec<char> = Vec::new();
        for (class, _) in rows.keys() {
            if !classes.contains(class) {
                classes.push(*class);
            }
        }
        let mut store = MatrixMap2::new(classes, Region::ALL.to_vec(), |_| None)
            .map_err(|e| ParseError::resource(e.to_string()))?;
        for ((class, region), (line, entry)) in &rows {
            store.put(class, region, Some(*entry)).map_err(at_line(*line))?;
        }

        debug!(
            rows = rows.len(),
            classes = store.map().dimensions()[0].len(),
            "stocking class factors parsed"
        );
        Ok(store)
    }
}

impl ResourceParser for StockingClassFactorParser {
    type Output = StockingClassFactors;

    fn control_key(&self) -> ControlKey {
        ControlKey::StockingClassFactors
    }

    fn parse<R: BufRead>(&self, reader: R, _control: &ControlMap) -> Result<StockingClassFactors, ParseError> {
        self.parse_factors(reader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grove_matrix::MatrixKey;

    const TABLE: &str = "\
R I P  0 1.00   100
R C P  0 0.90    90
4 C P  0 0.75    70

Z
4 I P  0 0.50    50
";

    #[test]
    fn classes_in_order_of_appearance() {
        let store = StockingClassFactorParser::new()
            .parse_factors(TABLE.as_bytes())
            .unwrap();
        let classes: Vec<char> = store.map().dimensions()[0]
            .iter()
            .map(|k| char::from_key(k).unwrap())
            .collect();
        assert_eq!(classes, vec!['R', '4']);

        let r_coastal = store.get(&'R', &Region::Coastal).unwrap().unwrap();
        assert_eq!(r_coastal.factor, 0.9);
        assert_eq!(r_coastal.npct_area, 90);
    }

    #[test]
    fn rows_after_stop_class_are_dropped() {
        let store = StockingClassFactorParser::new()
            .parse_factors(TABLE.as_bytes())
            .unwrap();
        assert_eq!(*store.get(&'4', &Region::Interior).unwrap(), None);
        assert!(store.get(&'4', &Region::Coastal).unwrap().is_some());
    }

    #[test]
    fn blank_class_column_is_skipped() {
        let input = "  I P  0 1.00   100\nR I P  0 1.00   100\n";
        let store = StockingClassFactorParser::new()
            .parse_factors(input.as_bytes())
            .unwrap();
        assert_eq!(store.map().populated_len(), 1);
    }

    #[test]
    fn row_without_factor_is_rejected() {
        let input = "R C P  0 0.90    90\nR I P  0        100\n";
        let err = StockingClassFactorParser::new()
            .parse_factors(input.as_bytes())
            .unwrap_err();
        assert!(matches!(
            err,
            ParseError::ValueParse { line: 2, ref field, .. } if field == "factor"
        ));
    }

    #[test]
    fn layer_code_is_decoded() {
        let input = "R I V  0 0.40    20\n";
        let store = StockingClassFactorParser::new()
            .parse_factors(input.as_bytes())
            .unwrap();
        let entry = store.get(&'R', &Region::Interior).unwrap().unwrap();
        assert_eq!(entry.layer, LayerType::Veteran);

        let err = StockingClassFactorParser::new()
            .parse_factors("R I X  0 0.40    20\n".as_bytes())
            .unwrap_err();
        assert!(matches!(err, ParseError::ValueParse { line: 1, ref field, .. } if field == "layer"));
    }

    #[test]
    fn later_row_replaces_earlier() {
        let input = "R I P  0 1.00   100\nR I P  0 0.80    80\n";
        let store = StockingClassFactorParser::new()
            .parse_factors(input.as_bytes())
            .unwrap();
        assert_eq!(store.get(&'R', &Region::Interior).unwrap().unwrap().factor, 0.8);
        assert_eq!(store.map().populated_len(), 1);
    }

    #[test]
    fn empty_table_gives_empty_store() {
        let store = StockingClassFactorParser::new()
            .parse_factors("Z\n".as_bytes())
            .unwrap();
        assert!(store.map().is_empty());
        assert!(store.map().dimensions()[0].is_empty());
        assert_eq!(store.map().dimensions()[1].len(), 2);
    }
}
