//! Genus (species group) definition files.
//!
//! Layout: alias (2, stripped), space, name (32, stripped), preference
//! (2, optional integer). A blank or zero preference keeps file order;
//! otherwise the preference is the species' 1-based canonical position.

use std::io::BufRead;

use tracing::debug;

use grove_core::GenusDefinitionMap;
use grove_parse::{LineParser, ParseError, ValueParser};

use crate::control::{ControlKey, ControlMap, ResourceParser};

/// Parser for genus definitions.
#[derive(Clone, Debug)]
pub struct GenusDefinitionParser {
    expected: usize,
    line_parser: LineParser,
}

impl Default for GenusDefinitionParser {
    fn default() -> Self {
        Self::new(Self::DEFAULT_NUM_SPECIES)
    }
}

struct Entry {
    alias: String,
    name: String,
    preference: Option<u32>,
}

impl GenusDefinitionParser {
    /// Number of species in a standard definition file.
    pub const DEFAULT_NUM_SPECIES: usize = 16;

    /// A parser expecting exactly `expected` definitions.
    pub fn new(expected: usize) -> Self {
        let line_parser = LineParser::new()
            .stripped_string(2, "alias")
            .space(1)
            .stripped_string(32, "name")
            .optional(2, "preference", ValueParser::integer())
            .ignore_line(|line| line.trim().is_empty());
        Self {
            expected,
            line_parser,
        }
    }

    /// Parse a definition file into a map in canonical order.
    pub fn parse_map<R: BufRead>(&self, reader: R) -> Result<GenusDefinitionMap, ParseError> {
        let expected = self.expected;
        let mut claimed: Vec<Option<String>> = vec![None; expected + 1];

        let entries = self.line_parser.fold(reader, Vec::new(), |mut acc: Vec<Entry>, record| {
            let line = record.line();
            let alias = record.str("alias")?.to_string();
            let preference = match record.optional_int("preference")? {
                None | Some(0) => None,
                Some(p) if p < 0 => {
                    return Err(ParseError::validation(
                        line,
                        format!("preference {p} is less than 0"),
                    ))
                }
                Some(p) if p as usize > expected => {
                    return Err(ParseError::validation(
                        line,
                        format!("preference {p} is larger than {expected}"),
                    ))
                }
                Some(p) => {
                    let slot = &mut claimed[p as usize];
                    if let Some(owner) = slot {
                        return Err(ParseError::validation(
                            line,
                            format!("preference {p} has already been set to {owner}"),
                        ));
                    }
                    *slot = Some(alias.clone());
                    Some(p as u32)
                }
            };
            acc.push(Entry {
                alias,
                name: record.str("name")?.to_string(),
                preference,
            });
            Ok(acc)
        })?;

        if entries.len() != expected {
            return Err(ParseError::resource(format!(
                "expected {expected} species definitions, found {}",
                entries.len()
            )));
        }

        let mut ordered: Vec<(usize, Entry)> = entries
            .into_iter()
            .enumerate()
            .map(|(i, e)| (e.preference.map_or(i + 1, |p| p as usize), e))
            .collect();
        ordered.sort_by_key(|(position, _)| *position);

        let map = GenusDefinitionMap::from_ordered(
            ordered
                .into_iter()
                .map(|(_, e)| (e.alias, e.name, e.preference)),
        );
        debug!(species = map.len(), "genus definitions parsed");
        Ok(map)
    }
}

impl ResourceParser for GenusDefinitionParser {
    type Output = GenusDefinitionMap;

    fn control_key(&self) -> ControlKey {
        ControlKey::GenusDef
    }

    fn parse<R: BufRead>(
        &self,
        reader: R,
        _control: &ControlMap,
    ) -> Result<GenusDefinitionMap, ParseError> {
        self.parse_map(reader)
    }
}
