//! Test fixtures shared by Grove crates.
//!
//! Definition file text and the parsed lookups it produces, a
//! [`ControlMap`] preloaded with both, a formatter for zone-by-species
//! coefficient rows, and small layers and polygons for bank tests.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use grove_coe::{ControlKey, ControlMap};
use grove_core::{BecDefinition, BecLookup, GenusDefinitionMap, Region};

pub use fixtures::{sample_layer, sample_polygon, sample_species, utilization_with_basal_area};
pub use grove_core::canonical_species;

/// Zones used by the fixtures, in file order.
pub const SAMPLE_BECS: [(&str, Region, &str); 14] = [
    ("AT", Region::Interior, "Alpine Tundra"),
    ("BG", Region::Interior, "Bunchgrass"),
    ("BWBS", Region::Interior, "Boreal White and Black Spruce"),
    ("CDF", Region::Coastal, "Coastal Douglas Fir"),
    ("CWH", Region::Coastal, "Coastal Western Hemlock"),
    ("ESSF", Region::Interior, "Engelmann Spruce -- Subalpine Fir"),
    ("ICH", Region::Interior, "Interior Cedar-Hemlock"),
    ("IDF", Region::Interior, "Interior Douglas Fir"),
    ("MH", Region::Coastal, "Mountain Hemlock"),
    ("MS", Region::Interior, "Montane Spruce"),
    ("PP", Region::Interior, "Ponderosa Pine"),
    ("SBPS", Region::Interior, "Sub-Boreal Pine-Spruce"),
    ("SBS", Region::Interior, "Sub-Boreal Spruce"),
    ("SWB", Region::Interior, "Spruce-Willow-Birch"),
];

pub fn sample_becs() -> BecLookup {
    SAMPLE_BECS
        .iter()
        .map(|&(alias, region, name)| BecDefinition::new(alias, region, name))
        .collect()
}

/// [`SAMPLE_BECS`] as a definition file, ending with a `Z` row.
pub fn bec_definition_text() -> String {
    let mut text: String = SAMPLE_BECS
        .iter()
        .map(|(alias, region, name)| format!("{alias:<4} {} {name}\n", region.alias()))
        .collect();
    text.push_str("     Z\n");
    text
}

/// The canonical species as a definition file, preferences blank.
pub fn genus_definition_text() -> String {
    canonical_species()
        .iter()
        .map(|def| format!("{:<2} {:<32}\n", def.alias, def.name))
        .collect()
}

/// A control map holding [`sample_becs`] and [`canonical_species`].
pub fn control_map() -> ControlMap {
    control_map_with(sample_becs(), canonical_species())
}

pub fn control_map_with(becs: BecLookup, genera: GenusDefinitionMap) -> ControlMap {
    let mut control = ControlMap::new();
    control.insert(ControlKey::BecDef, becs);
    control.insert(ControlKey::GenusDef, genera);
    control
}

/// One zone-by-species coefficient row: zone (4), 2 blanks, index (1),
/// indicator (2), then one 8-wide float per value.
pub fn zone_by_species_row(zone: &str, index: i32, indicator: i32, values: &[f32]) -> String {
    let mut row = format!("{zone:<4}  {index}{indicator:>2}");
    for v in values {
        row.push_str(&format!("{v:>8.4}"));
    }
    row
}
