//! Columnar working copy of one layer.
//!
//! A [`Bank`] flattens a [`Layer`] into parallel arrays indexed by
//! species position. Position 0 holds the layer totals; positions
//! `1..=n_species` hold the species sorted by genus index.
//!
//! ```text
//! position   0        1        2       ...
//! genera     ""       "B"      "PL"
//! basal_area [6 ucl]  [6 ucl]  [6 ucl]
//! ```
//!
//! Per utilization class arrays hold six values ordered as
//! [`UtilizationClass::ALL`]; Lorey height holds the small and all
//! classes only.

use grove_core::{Coefficients, LayerType, UtilizationClass, MISSING_FLOAT};

use crate::model::{Layer, Site, Sp64Distribution, Species, UtilizationHolder};

/// Values per utilization class array.
pub const UTILIZATION_SLOTS: usize = 6;

/// Values per Lorey height array.
pub const LOREY_HEIGHT_SLOTS: usize = 2;

/// Per utilization class values for one position.
pub type UtilizationArray = [f32; UTILIZATION_SLOTS];

/// Small and all-class Lorey height for one position.
pub type LoreyHeightArray = [f32; LOREY_HEIGHT_SLOTS];

/// What [`Bank::copy_with`] carries over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CopyMode {
    /// Every value.
    CopyAll,
    /// Species identity only; every numeric value is reset to
    /// [`MISSING_FLOAT`].
    StructureOnly,
}

/// Array position of a utilization class.
pub fn util_slot(class: UtilizationClass) -> usize {
    (class.index() - UtilizationClass::Small.index()) as usize
}

fn util_array(series: &Coefficients) -> UtilizationArray {
    UtilizationClass::ALL.map(|class| series.get(class.index()).unwrap_or(MISSING_FLOAT))
}

fn lorey_array(series: &Coefficients) -> LoreyHeightArray {
    [UtilizationClass::Small, UtilizationClass::All]
        .map(|class| series.get(class.index()).unwrap_or(MISSING_FLOAT))
}

/// The mutable working state of one layer.
#[derive(Clone, Debug, PartialEq)]
pub struct Bank {
    /// Kind of the source layer.
    pub layer_type: LayerType,
    /// Identifier of the source polygon.
    pub polygon_id: String,
    /// Genus alias per position; empty at position 0.
    pub genera: Vec<String>,
    /// Genus index per position; 0 at position 0.
    pub genus_indices: Vec<usize>,
    /// Percent of forested land per position.
    pub percentages: Vec<f32>,
    /// Detailed species breakdown per position.
    pub sp64_distributions: Vec<Vec<Sp64Distribution>>,
    /// Total age per position.
    pub age_totals: Vec<f32>,
    /// Dominant height per position.
    pub dominant_heights: Vec<f32>,
    /// Site index per position.
    pub site_indices: Vec<f32>,
    /// Years to breast height per position.
    pub years_to_breast_height: Vec<f32>,
    /// Years at breast height per position.
    pub years_at_breast_height: Vec<f32>,
    /// Basal area by utilization class.
    pub basal_areas: Vec<UtilizationArray>,
    /// Trees per hectare by utilization class.
    pub trees_per_hectare: Vec<UtilizationArray>,
    /// Quadratic mean diameter by utilization class.
    pub quad_mean_diameters: Vec<UtilizationArray>,
    /// Whole-stem volume by utilization class.
    pub whole_stem_volumes: Vec<UtilizationArray>,
    /// Close-utilization volume by utilization class.
    pub close_utilization_volumes: Vec<UtilizationArray>,
    /// Close-utilization volume net of decay by utilization class.
    pub cu_volumes_net_of_decay: Vec<UtilizationArray>,
    /// Close-utilization volume net of decay and waste by utilization class.
    pub cu_volumes_net_of_decay_and_waste: Vec<UtilizationArray>,
    /// Lorey height, small and all classes.
    pub lorey_heights: Vec<LoreyHeightArray>,
}

impl Bank {
    /// A bank for `n_species` species with every value missing.
    fn empty(layer_type: LayerType, polygon_id: String, n_species: usize) -> Self {
        let n = n_species + 1;
        let util = vec![[MISSING_FLOAT; UTILIZATION_SLOTS]; n];
        Self {
            layer_type,
            polygon_id,
            genera: vec![String::new(); n],
            genus_indices: vec![0; n],
            percentages: vec![MISSING_FLOAT; n],
            sp64_distributions: vec![Vec::new(); n],
            age_totals: vec![MISSING_FLOAT; n],
            dominant_heights: vec![MISSING_FLOAT; n],
            site_indices: vec![MISSING_FLOAT; n],
            years_to_breast_height: vec![MISSING_FLOAT; n],
            years_at_breast_height: vec![MISSING_FLOAT; n],
            basal_areas: util.clone(),
            trees_per_hectare: util.clone(),
            quad_mean_diameters: util.clone(),
            whole_stem_volumes: util.clone(),
            close_utilization_volumes: util.clone(),
            cu_volumes_net_of_decay: util.clone(),
            cu_volumes_net_of_decay_and_waste: util,
            lorey_heights: vec![[MISSING_FLOAT; LOREY_HEIGHT_SLOTS]; n],
        }
    }

    /// Flatten `layer`, keeping the species `filter` accepts.
    ///
    /// Every value is copied; the bank shares nothing with `layer`.
    pub fn from_layer<F>(layer: &Layer, filter: F) -> Self
    where
        F: Fn(&Species) -> bool,
    {
        let mut species: Vec<&Species> = layer.iter().filter(|s| filter(s)).collect();
        species.sort_by_key(|s| s.genus_index);

        let mut bank = Self::empty(layer.layer_type, layer.polygon_id.clone(), species.len());
        bank.fill_utilization(0, &layer.utilization);
        for (i, sp) in species.into_iter().enumerate() {
            let pos = i + 1;
            bank.genera[pos] = sp.genus.clone();
            bank.genus_indices[pos] = sp.genus_index;
            bank.percentages[pos] = sp.percent_genus;
            bank.sp64_distributions[pos] = sp.sp64_distribution.clone();
            if let Some(site) = &sp.site {
                bank.fill_site(pos, site);
            }
            bank.fill_utilization(pos, &sp.utilization);
        }
        bank
    }

    fn fill_site(&mut self, pos: usize, site: &Site) {
        self.age_totals[pos] = site.age_total;
        self.dominant_heights[pos] = site.dominant_height;
        self.site_indices[pos] = site.site_index;
        self.years_to_breast_height[pos] = site.years_to_breast_height;
        self.years_at_breast_height[pos] = site.years_at_breast_height;
    }

    fn fill_utilization(&mut self, pos: usize, holder: &UtilizationHolder) {
        self.basal_areas[pos] = util_array(&holder.basal_area);
        self.trees_per_hectare[pos] = util_array(&holder.trees_per_hectare);
        self.quad_mean_diameters[pos] = util_array(&holder.quad_mean_diameter);
        self.whole_stem_volumes[pos] = util_array(&holder.whole_stem_volume);
        self.close_utilization_volumes[pos] = util_array(&holder.close_utilization_volume);
        self.cu_volumes_net_of_decay[pos] = util_array(&holder.cu_volume_net_of_decay);
        self.cu_volumes_net_of_decay_and_waste[pos] =
            util_array(&holder.cu_volume_net_of_decay_and_waste);
        self.lorey_heights[pos] = lorey_array(&holder.lorey_height);
    }

    /// A deep copy, either complete or structure only.
    pub fn copy_with(&self, mode: CopyMode) -> Self {
        match mode {
            CopyMode::CopyAll => self.clone(),
            CopyMode::StructureOnly => {
                let mut copy = Self::empty(self.layer_type, self.polygon_id.clone(), self.n_species());
                copy.genera.clone_from(&self.genera);
                copy.genus_indices.clone_from(&self.genus_indices);
                copy.sp64_distributions.clone_from(&self.sp64_distributions);
                copy
            }
        }
    }

    /// Number of species (positions `1..=n_species`).
    pub fn n_species(&self) -> usize {
        self.genera.len() - 1
    }

    /// Position of the species with genus `alias`.
    pub fn position(&self, alias: &str) -> Option<usize> {
        self.genera
            .iter()
            .skip(1)
            .position(|g| g == alias)
            .map(|i| i + 1)
    }

    /// Basal area of `class` at `pos`.
    pub fn basal_area(&self, pos: usize, class: UtilizationClass) -> Option<f32> {
        self.basal_areas.get(pos).map(|row| row[util_slot(class)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn species(alias: &str, index: usize, ba: f32) -> Species {
        let mut utilization = UtilizationHolder::new();
        utilization.basal_area[UtilizationClass::All.index()] = ba;
        Species::builder()
            .genus(alias)
            .genus_index(index)
            .percent_genus(50.0)
            .utilization(utilization)
            .build()
            .unwrap()
    }

    fn layer() -> Layer {
        let mut totals = UtilizationHolder::new();
        totals.basal_area[UtilizationClass::All.index()] = 30.0;
        Layer::builder()
            .layer_type(LayerType::Primary)
            .polygon_id("P1")
            .add_species(species("S", 15, 10.0))
            .add_species(species("B", 3, 20.0))
            .utilization(totals)
            .build()
            .unwrap()
    }

    #[test]
    fn species_sorted_by_genus_index() {
        let bank = Bank::from_layer(&layer(), |_| true);
        assert_eq!(bank.n_species(), 2);
        assert_eq!(bank.genera, vec!["", "B", "S"]);
        assert_eq!(bank.position("S"), Some(2));
        assert_eq!(bank.basal_area(0, UtilizationClass::All), Some(30.0));
        assert_eq!(bank.basal_area(1, UtilizationClass::All), Some(20.0));
        assert_eq!(bank.basal_area(1, UtilizationClass::Small), Some(MISSING_FLOAT));
    }

    #[test]
    fn filter_drops_species() {
        let bank = Bank::from_layer(&layer(), |s| s.genus != "B");
        assert_eq!(bank.genera, vec!["", "S"]);
        assert_eq!(bank.position("B"), None);
    }

    #[test]
    fn missing_site_stays_missing() {
        let bank = Bank::from_layer(&layer(), |_| true);
        assert!(bank.site_indices.iter().all(|v| *v == MISSING_FLOAT));
    }

    #[test]
    fn structure_only_copy_resets_numbers() {
        let bank = Bank::from_layer(&layer(), |_| true);
        let copy = bank.copy_with(CopyMode::StructureOnly);
        assert_eq!(copy.genera, bank.genera);
        assert_eq!(copy.genus_indices, bank.genus_indices);
        assert!(copy.percentages.iter().all(|v| *v == MISSING_FLOAT));
        assert!(copy
            .basal_areas
            .iter()
            .flatten()
            .all(|v| *v == MISSING_FLOAT));
        assert_eq!(bank.copy_with(CopyMode::CopyAll), bank);
    }

    #[test]
    fn util_slots_follow_class_order() {
        assert_eq!(util_slot(UtilizationClass::Small), 0);
        assert_eq!(util_slot(UtilizationClass::All), 1);
        assert_eq!(util_slot(UtilizationClass::Over225), 5);
    }
}
