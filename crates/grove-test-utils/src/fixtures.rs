//! Layer and polygon fixtures.

use grove_bank::{Layer, Polygon, Site, Species, UtilizationHolder};
use grove_core::{LayerType, UtilizationClass};

/// A utilization holder whose only set values are the all-class and
/// 7.5cm+ basal areas.
pub fn utilization_with_basal_area(basal_area: f32) -> UtilizationHolder {
    let mut holder = UtilizationHolder::new();
    holder.basal_area[UtilizationClass::All.index()] = basal_area;
    holder.basal_area[UtilizationClass::U75To125.index()] = basal_area;
    holder.lorey_height[UtilizationClass::All.index()] = 20.0;
    holder
}

pub fn sample_species(alias: &str, genus_index: usize, basal_area: f32) -> Species {
    Species::builder()
        .genus(alias)
        .genus_index(genus_index)
        .percent_genus(50.0)
        .site(Site {
            age_total: 60.0,
            dominant_height: 22.0,
            site_index: 18.5,
            years_to_breast_height: 6.0,
            years_at_breast_height: 54.0,
        })
        .add_sp64(alias, 100.0)
        .utilization(utilization_with_basal_area(basal_area))
        .build()
        .expect("fixture species is complete")
}

/// A layer with one species per `(alias, genus index, basal area)`.
pub fn sample_layer(layer_type: LayerType, species: &[(&str, usize, f32)]) -> Layer {
    let total: f32 = species.iter().map(|(_, _, ba)| ba).sum();
    species
        .iter()
        .fold(
            Layer::builder()
                .layer_type(layer_type)
                .polygon_id("01002 S000001 00     1970")
                .utilization(utilization_with_basal_area(total)),
            |builder, &(alias, index, ba)| builder.add_species(sample_species(alias, index, ba)),
        )
        .build()
        .expect("fixture layer is complete")
}

/// An IDF polygon with a two-species primary layer and a one-species
/// veteran layer.
pub fn sample_polygon() -> Polygon {
    Polygon::builder()
        .id("01002 S000001 00     1970")
        .bec_zone("IDF")
        .percent_available(90.0)
        .primary(sample_layer(
            LayerType::Primary,
            &[("PL", 12, 20.0), ("F", 7, 10.0)],
        ))
        .veteran(sample_layer(LayerType::Veteran, &[("F", 7, 2.5)]))
        .build()
        .expect("fixture polygon is complete")
}
