//! BEC zone definition files.
//!
//! Layout: alias (4, stripped), space, region (1), space, name (rest).
//! A row whose region column is `Z` ends the table.

use std::io::BufRead;

use tracing::debug;

use grove_core::{BecDefinition, BecLookup};
use grove_parse::{LineParser, ParseError, ValueParser};

use crate::control::{ControlKey, ControlMap, ResourceParser};

/// Parser for BEC zone definitions.
#[derive(Clone, Debug)]
pub struct BecDefinitionParser {
    line_parser: LineParser,
}

impl Default for BecDefinitionParser {
    fn default() -> Self {
        Self::new()
    }
}

impl BecDefinitionParser {
    /// The standard layout.
    pub fn new() -> Self {
        let line_parser = LineParser::new()
            .stripped_string(4, "alias")
            .space(1)
            .value(
                1,
                "region",
                ValueParser::region().with_reason(|raw| format!("{raw} is not a valid region identifier")),
            )
            .space(1)
            .rest("name", ValueParser::stripped_string())
            .ignore_line(|line| line.trim().is_empty())
            .stop_segments(|segments| segments[2].eq_ignore_ascii_case("Z"));
        Self { line_parser }
    }

    /// Parse a definition file into a lookup in file order.
    pub fn parse_lookup<R: BufRead>(&self, reader: R) -> Result<BecLookup, ParseError> {
        let lookup = self.line_parser.fold(reader, BecLookup::new(), |mut acc, record| {
            let alias = record.str("alias")?;
            let region = record.region("region")?;
            let name = record.str("name")?;
            acc.insert(BecDefinition::new(alias, region, name));
            Ok(acc)
        })?;
        debug!(zones = lookup.len(), "BEC definitions parsed");
        Ok(lookup)
    }
}

impl ResourceParser for BecDefinitionParser {
    type Output = BecLookup;

    fn control_key(&self) -> ControlKey {
        ControlKey::BecDef
    }

    fn parse<R: BufRead>(&self, reader: R, _control: &ControlMap) -> Result<BecLookup, ParseError> {
        self.parse_lookup(reader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grove_core::Region;

    #[test]
    fn parses_until_z_row() {
        let input = "\
CWH  C Coastal Western Hemlock
IDF  I Interior Douglas Fir

ESSF I Engelmann Spruce -- Subalpine Fir
     Z
MH   C Mountain Hemlock
";
        let lookup = BecDefinitionParser::new().parse_lookup(input.as_bytes()).unwrap();
        assert_eq!(lookup.aliases().collect::<Vec<_>>(), vec!["CWH", "IDF", "ESSF"]);
        let essf = lookup.get("ESSF").unwrap();
        assert_eq!(essf.region, Region::Interior);
        assert_eq!(essf.name, "Engelmann Spruce -- Subalpine Fir");
    }

    #[test]
    fn bad_region_names_line() {
        let input = "CWH  C Coastal Western Hemlock\nIDF  X Interior Douglas Fir\n";
        let err = BecDefinitionParser::new().parse_lookup(input.as_bytes()).unwrap_err();
        match err {
            ParseError::ValueParse { line, field, reason, .. } => {
                assert_eq!(line, 2);
                assert_eq!(field, "region");
                assert_eq!(reason, "X is not a valid region identifier");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
