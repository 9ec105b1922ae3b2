//! Zone × species coefficient tables.
//!
//! Each row carries one BEC zone, one coefficient index, an indicator
//! flag and one packed 8-column float per species in canonical order:
//!
//! ```text
//! cols 0-3   zone alias (padded)
//! cols 4-5   blank
//! col  6     coefficient index, 0 <= index < n_coefficients
//! cols 7-8   indicator, 0 or 1
//! cols 9-    one 8-character float per species
//! ```
//!
//! A row writes `coefficient[index]` of every (zone, species) cell it
//! touches. With indicator 1 the first species' value is a base and
//! every other species stores `base + own value`. What indicator 0
//! means differs between table generations; see [`IndicatorVariant`].

use std::io::BufRead;

use tracing::debug;

use grove_core::{BecLookup, Coefficients, GenusDefinitionMap};
use grove_matrix::MatrixMap2;
use grove_parse::{LineParser, ParseError, ValueParser};

use crate::at_line;
use crate::control::{ControlKey, ControlMap, ResourceParser};

/// Width of one packed species column.
pub const SPECIES_COLUMN_WIDTH: usize = 8;

/// Zone × species store of coefficient vectors.
pub type ZoneSpeciesCoefficients = MatrixMap2<String, String, Coefficients>;

/// How a row with indicator 0 is applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IndicatorVariant {
    /// Every species takes its own packed value.
    #[default]
    Independent,
    /// Only the first species is written; the rest keep what they had.
    FirstSpeciesOnly,
    /// Every species takes the first species' packed value.
    BroadcastFirst,
}

/// Parser for zone × species coefficient tables.
#[derive(Clone, Debug)]
pub struct BecZoneBySpeciesCoefficientParser {
    control_key: ControlKey,
    n_coefficients: usize,
    variant: IndicatorVariant,
}

impl BecZoneBySpeciesCoefficientParser {
    /// A parser for tables with `n_coefficients` indices per cell.
    pub fn new(control_key: ControlKey, n_coefficients: usize, variant: IndicatorVariant) -> Self {
        Self {
            control_key,
            n_coefficients,
            variant,
        }
    }

    /// Basal area yield: seven coefficients per cell.
    pub fn basal_area_yield() -> Self {
        Self::new(ControlKey::BasalAreaYield, 7, IndicatorVariant::Independent)
    }

    /// Quad-mean diameter yield: six coefficients per cell.
    pub fn quad_mean_diameter_yield() -> Self {
        Self::new(
            ControlKey::QuadMeanDiameterYield,
            6,
            IndicatorVariant::Independent,
        )
    }

    /// The same parser with a different indicator-0 rule.
    pub fn with_variant(mut self, variant: IndicatorVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Coefficients per cell.
    pub fn n_coefficients(&self) -> usize {
        self.n_coefficients
    }

    /// The indicator-0 rule in use.
    pub fn variant(&self) -> IndicatorVariant {
        self.variant
    }

    fn line_parser(&self, n_species: usize) -> LineParser {
        LineParser::new()
            .stripped_string(4, "zone")
            .space(2)
            .integer(1, "index")
            .integer(2, "indicator")
            .multi_value(
                n_species,
                SPECIES_COLUMN_WIDTH,
                "coefficients",
                ValueParser::float(),
            )
            .ignore_line(|line| line.chars().take(4).all(char::is_whitespace))
    }

    /// Parse a table against explicit zone and species domains.
    ///
    /// Rows are applied in file order, so a later row for the same
    /// (zone, species, index) overwrites an earlier one. Cells no row
    /// touches hold zeros.
    pub fn parse_table<R: BufRead>(
        &self,
        reader: R,
        becs: &BecLookup,
        species: &GenusDefinitionMap,
    ) -> Result<ZoneSpeciesCoefficients, ParseError> {
        let n = self.n_coefficients;
        let zones: Vec<String> = becs.aliases().map(str::to_string).collect();
        let aliases: Vec<String> = species.aliases().map(str::to_string).collect();
        let store = MatrixMap2::new(zones, aliases.clone(), move |_| Coefficients::empty(n, 0))
            .map_err(|e| ParseError::resource(e.to_string()))?;

        let variant = self.variant;
        let mut rows = 0usize;
        let store = self
            .line_parser(aliases.len())
            .fold(reader, store, |mut store, record| {
                let line = record.line();
                let index = record.int("index")?;
                let indicator = record.int("indicator")?;
                let zone = record.str("zone")?;
                let packed = record.floats("coefficients")?;

                if index < 0 || index as usize >= n {
                    return Err(ParseError::validation(
                        line,
                        format!(
                            "index value {index} is out of range; expecting a value from 0 to {}",
                            n.saturating_sub(1)
                        ),
                    ));
                }
                if !(0..=1).contains(&indicator) {
                    return Err(ParseError::validation(
                        line,
                        format!("indicator value {indicator} is out of range; expecting either 0 or 1"),
                    ));
                }
                if !becs.contains(zone) {
                    return Err(ParseError::validation(
                        line,
                        format!("BEC zone {zone} is not a recognized BEC zone"),
                    ));
                }

                let base = packed.first().copied().unwrap_or_default();
                for (i, (alias, own)) in aliases.iter().zip(&packed).enumerate() {
                    let value = match (indicator, variant) {
                        (1, _) if i == 0 => base,
                        (1, _) => base + own,
                        (_, IndicatorVariant::Independent) => *own,
                        (_, IndicatorVariant::BroadcastFirst) => base,
                        (_, IndicatorVariant::FirstSpeciesOnly) if i == 0 => base,
                        (_, IndicatorVariant::FirstSpeciesOnly) => break,
                    };
                    store
                        .get_mut(zone, alias)
                        .map_err(at_line(line))?
                        .set(index, value)
                        .map_err(|e| ParseError::validation(line, e.to_string()))?;
                }
                rows += 1;
                Ok(store)
            })?;

        debug!(
            resource = %self.control_key,
            rows,
            zones = becs.len(),
            species = species.len(),
            "zone by species coefficients parsed"
        );
        Ok(store)
    }
}

impl ResourceParser for BecZoneBySpeciesCoefficientParser {
    type Output = ZoneSpeciesCoefficients;

    fn control_key(&self) -> ControlKey {
        self.control_key.clone()
    }

    fn parse<R: BufRead>(
        &self,
        reader: R,
        control: &ControlMap,
    ) -> Result<ZoneSpeciesCoefficients, ParseError> {
        self.parse_table(reader, control.becs()?, control.genera()?)
    }
}
