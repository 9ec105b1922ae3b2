//! Benchmark inputs for the Grove toolkit.
//!
//! - [`zone_by_species_table`]: a full zone × index coefficient file
//! - [`utilization_map`]: a populated ucl × species × zone store
//! - [`full_polygon`]: a polygon with every canonical species in both layers

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::fmt::Write;

use grove_bank::{Layer, Polygon, Site, Species, UtilizationHolder};
use grove_core::{BecLookup, GenusDefinitionMap, LayerType, UtilizationClass};
use grove_matrix::{Key, MatrixError, MatrixMap};

/// One row per (zone, coefficient index), every species column filled.
///
/// Values depend only on the row and column, so repeated calls give the
/// same text.
pub fn zone_by_species_table(becs: &BecLookup, n_species: usize, n_coefficients: usize) -> String {
    let mut text = String::new();
    for (z, zone) in becs.aliases().enumerate() {
        for index in 0..n_coefficients {
            let _ = write!(text, "{zone:<4}  {index}{:>2}", (z + index) % 2);
            for sp in 0..n_species {
                let value = ((z * 31 + index * 7 + sp) % 997) as f32 / 8.0;
                let _ = write!(text, "{value:>8.3}");
            }
            text.push('\n');
        }
    }
    text
}

/// A store keyed by diameter band, species and zone with every cell set.
pub fn utilization_map(
    species: &GenusDefinitionMap,
    becs: &BecLookup,
) -> Result<MatrixMap<f32>, MatrixError> {
    let ucl: Vec<Key> = UtilizationClass::UTIL_CLASSES.into_iter().map(Key::from).collect();
    let sp: Vec<Key> = species.aliases().map(Key::from).collect();
    let zones: Vec<Key> = becs.aliases().map(Key::from).collect();
    let mut map = MatrixMap::new(vec![ucl, sp, zones], |_| 0.0f32)?;
    let mut n = 0u32;
    map.set_all_with(|_| {
        n += 1;
        n as f32
    });
    Ok(map)
}

fn full_layer(layer_type: LayerType, species: &GenusDefinitionMap) -> Layer {
    let share = 100.0 / species.len().max(1) as f32;
    let species = species
        .iter()
        .map(|def| {
            let mut utilization = UtilizationHolder::new();
            for class in UtilizationClass::ALL {
                utilization.basal_area[class.index()] = def.index as f32;
                utilization.trees_per_hectare[class.index()] = 100.0 * def.index as f32;
            }
            let sp = Species {
                genus: def.alias.clone(),
                genus_index: def.index,
                percent_genus: share,
                site: Some(Site::default()),
                sp64_distribution: Vec::new(),
                utilization,
            };
            (def.alias.clone(), sp)
        })
        .collect();
    Layer {
        layer_type,
        polygon_id: "bench".into(),
        species,
        utilization: UtilizationHolder::new(),
    }
}

/// A polygon whose primary and veteran layers both hold every species.
pub fn full_polygon(species: &GenusDefinitionMap) -> Polygon {
    Polygon {
        id: "bench".into(),
        bec_zone: "IDF".into(),
        percent_available: 100.0,
        primary: full_layer(LayerType::Primary, species),
        veteran: Some(full_layer(LayerType::Veteran, species)),
    }
}
