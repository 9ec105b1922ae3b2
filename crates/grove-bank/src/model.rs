//! Polygon, layer and species state as read from inventory input.

use indexmap::IndexMap;

use grove_core::{Coefficients, LayerType, UtilizationClass, MISSING_FLOAT};

/// Site measurements of a species' leading stand component.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Site {
    /// Total age, years.
    pub age_total: f32,
    /// Dominant height, metres.
    pub dominant_height: f32,
    /// Site index, metres at 50 years breast-height age.
    pub site_index: f32,
    /// Years from germination to breast height.
    pub years_to_breast_height: f32,
    /// Years since breast height.
    pub years_at_breast_height: f32,
}

impl Default for Site {
    fn default() -> Self {
        Self {
            age_total: MISSING_FLOAT,
            dominant_height: MISSING_FLOAT,
            site_index: MISSING_FLOAT,
            years_to_breast_height: MISSING_FLOAT,
            years_at_breast_height: MISSING_FLOAT,
        }
    }
}

/// Share of a genus made up by one detailed (sp64) species.
#[derive(Clone, Debug, PartialEq)]
pub struct Sp64Distribution {
    /// Detailed species code.
    pub alias: String,
    /// Percent of the genus.
    pub percentage: f32,
}

impl Sp64Distribution {
    /// A distribution entry.
    pub fn new(alias: impl Into<String>, percentage: f32) -> Self {
        Self {
            alias: alias.into(),
            percentage,
        }
    }
}

/// Per utilization class measurements.
///
/// Every series except Lorey height is indexed by
/// [`UtilizationClass::index`] (-1 to 4). Lorey height only has the
/// small (-1) and all (0) classes.
#[derive(Clone, Debug, PartialEq)]
pub struct UtilizationHolder {
    /// Basal area, m²/ha.
    pub basal_area: Coefficients,
    /// Trees per hectare.
    pub trees_per_hectare: Coefficients,
    /// Quadratic mean diameter, cm.
    pub quad_mean_diameter: Coefficients,
    /// Whole-stem volume, m³/ha.
    pub whole_stem_volume: Coefficients,
    /// Close-utilization volume, m³/ha.
    pub close_utilization_volume: Coefficients,
    /// Close-utilization volume net of decay.
    pub cu_volume_net_of_decay: Coefficients,
    /// Close-utilization volume net of decay and waste.
    pub cu_volume_net_of_decay_and_waste: Coefficients,
    /// Lorey height, metres.
    pub lorey_height: Coefficients,
}

impl UtilizationHolder {
    /// A holder with every value set to [`MISSING_FLOAT`].
    pub fn new() -> Self {
        let series = || Coefficients::missing(UtilizationClass::ALL.len(), UtilizationClass::Small.index());
        Self {
            basal_area: series(),
            trees_per_hectare: series(),
            quad_mean_diameter: series(),
            whole_stem_volume: series(),
            close_utilization_volume: series(),
            cu_volume_net_of_decay: series(),
            cu_volume_net_of_decay_and_waste: series(),
            lorey_height: Coefficients::missing(2, UtilizationClass::Small.index()),
        }
    }

    /// Basal area of the ALL class, if it has been set.
    pub fn total_basal_area(&self) -> Option<f32> {
        self.basal_area
            .get(UtilizationClass::All.index())
            .ok()
            .filter(|ba| *ba != MISSING_FLOAT)
    }
}

impl Default for UtilizationHolder {
    fn default() -> Self {
        Self::new()
    }
}

/// One genus within a layer.
#[derive(Clone, Debug, PartialEq)]
pub struct Species {
    /// Genus alias.
    pub genus: String,
    /// 1-based position of the genus in the canonical order.
    pub genus_index: usize,
    /// Percent of the layer's forested land.
    pub percent_genus: f32,
    /// Site measurements, for species that have them.
    pub site: Option<Site>,
    /// Detailed species breakdown.
    pub sp64_distribution: Vec<Sp64Distribution>,
    /// Measurements by utilization class.
    pub utilization: UtilizationHolder,
}

/// One layer of a polygon.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    /// Primary or veteran.
    pub layer_type: LayerType,
    /// Identifier of the owning polygon.
    pub polygon_id: String,
    /// Species keyed by genus alias, in input order.
    pub species: IndexMap<String, Species>,
    /// Layer totals by utilization class.
    pub utilization: UtilizationHolder,
}

impl Layer {
    /// The species with genus `alias`.
    pub fn get(&self, alias: &str) -> Option<&Species> {
        self.species.get(alias)
    }

    /// Mutable access to the species with genus `alias`.
    pub fn get_mut(&mut self, alias: &str) -> Option<&mut Species> {
        self.species.get_mut(alias)
    }

    /// Species in input order.
    pub fn iter(&self) -> impl Iterator<Item = &Species> + '_ {
        self.species.values()
    }
}

/// A polygon with its primary and optional veteran layer.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    /// Polygon identifier.
    pub id: String,
    /// BEC zone alias.
    pub bec_zone: String,
    /// Percent of the polygon available for growth.
    pub percent_available: f32,
    /// The primary layer.
    pub primary: Layer,
    /// The veteran layer, if the polygon has one.
    pub veteran: Option<Layer>,
}

impl Polygon {
    /// The layer of kind `layer_type`, if present.
    pub fn layer(&self, layer_type: LayerType) -> Option<&Layer> {
        match layer_type {
            LayerType::Primary => Some(&self.primary),
            LayerType::Veteran => self.veteran.as_ref(),
        }
    }
}
