//! Site curve numbers per species.
//!
//! ```text
//! cols 0-2   key, usually a genus alias (stripped)
//! cols 3-5   coastal site curve number
//! cols 6-8   interior site curve number
//! ```
//!
//! A line starting with `##` ends the table. Blank lines and lines
//! starting with `"# "` or two blanks are comments. Keys other than
//! genus aliases are allowed, but every loaded genus needs an entry.

use std::io::BufRead;

use indexmap::IndexMap;
use tracing::debug;

use grove_core::{GenusDefinitionMap, Region};
use grove_parse::{LineParser, ParseError};

use crate::control::{ControlKey, ControlMap, ResourceParser};

/// Most entries a table may hold.
pub const MAX_ENTRIES: usize = 200;

/// The site curve numbers for one key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SiteCurve {
    /// Curve used in the coastal region.
    pub coastal: i32,
    /// Curve used in the interior region.
    pub interior: i32,
}

impl SiteCurve {
    /// The curve for `region`.
    pub fn value(&self, region: Region) -> i32 {
        match region {
            Region::Coastal => self.coastal,
            Region::Interior => self.interior,
        }
    }
}

/// Parser for site curve tables.
#[derive(Clone, Debug)]
pub struct SiteCurveParser {
    layout: LineParser,
}

impl Default for SiteCurveParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SiteCurveParser {
    /// A parser with the standard layout.
    pub fn new() -> Self {
        let layout = LineParser::new()
            .stripped_string(3, "species")
            .integer(3, "coastal")
            .integer(3, "interior")
            .stop_line(|line| line.starts_with("##"))
            .ignore_line(|line| {
                line.trim().is_empty() || line.starts_with("# ") || line.starts_with("  ")
            });
        Self { layout }
    }

    /// Parse `reader`, then check every genus in `species` has an entry.
    ///
    /// A key repeated later in the file replaces the earlier entry.
    pub fn parse_curves<R: BufRead>(
        &self,
        reader: R,
        species: &GenusDefinitionMap,
    ) -> Result<IndexMap<String, SiteCurve>, ParseError> {
        let curves = self.layout.fold(reader, IndexMap::new(), |mut curves, record| {
            let key = record.str("species")?.to_string();
            let curve = SiteCurve {
                coastal: record.int("coastal")?,
                interior: record.int("interior")?,
            };
            curves.insert(key, curve);
            if curves.len() > MAX_ENTRIES {
                return Err(ParseError::validation(
                    record.line(),
                    format!("more than {MAX_ENTRIES} site curve entries"),
                ));
            }
            Ok(curves)
        })?;

        let missing: Vec<&str> = species.aliases().filter(|a| !curves.contains_key(*a)).collect();
        if !missing.is_empty() {
            return Err(ParseError::resource(format!(
                "missing expected entries for {}",
                missing.join(", ")
            )));
        }

        debug!(entries = curves.len(), "site curves parsed");
        Ok(curves)
    }
}

impl ResourceParser for SiteCurveParser {
    type Output = IndexMap<String, SiteCurve>;

    fn control_key(&self) -> ControlKey {
        ControlKey::SiteCurveNumbers
    }

    fn parse<R: BufRead>(
        &self,
        reader: R,
        control: &ControlMap,
    ) -> Result<IndexMap<String, SiteCurve>, ParseError> {
        self.parse_curves(reader, control.genera()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_species() -> GenusDefinitionMap {
        GenusDefinitionMap::from_ordered([("AC", "Cottonwood", None), ("B", "Balsam", None)])
    }

    #[test]
    fn parses_entries_and_extra_keys() {
        let input = "\
# site curves
AC   1  2
B    3  4
FD  11 12
";
        let curves = SiteCurveParser::new()
            .parse_curves(input.as_bytes(), &two_species())
            .unwrap();
        assert_eq!(curves.len(), 3);
        assert_eq!(curves["AC"], SiteCurve { coastal: 1, interior: 2 });
        assert_eq!(curves["B"].value(Region::Interior), 4);
        assert_eq!(curves["FD"].value(Region::Coastal), 11);
    }

    #[test]
    fn double_hash_ends_table() {
        let input = "AC   1  2\nB    3  4\n## end\nnot a curve line";
        let curves = SiteCurveParser::new()
            .parse_curves(input.as_bytes(), &two_species())
            .unwrap();
        assert_eq!(curves.len(), 2);
    }

    #[test]
    fn two_blank_prefix_is_a_comment() {
        let input = "AC   1  2\n  B  9  9\nB    3  4\n";
        let curves = SiteCurveParser::new()
            .parse_curves(input.as_bytes(), &two_species())
            .unwrap();
        assert_eq!(curves["B"].coastal, 3);
    }

    #[test]
    fn missing_species_fails() {
        let err = SiteCurveParser::new()
            .parse_curves("AC   1  2\n".as_bytes(), &two_species())
            .unwrap_err();
        assert_eq!(err.to_string(), "missing expected entries for B");
    }

    #[test]
    fn too_many_entries_fails() {
        let input: String = (0..=MAX_ENTRIES).map(|i| format!("{i:<3}  1  1\n")).collect();
        let err = SiteCurveParser::new()
            .parse_curves(input.as_bytes(), &two_species())
            .unwrap_err();
        assert_eq!(err.line(), Some(MAX_ENTRIES + 1));
    }
}
