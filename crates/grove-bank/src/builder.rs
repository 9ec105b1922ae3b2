//! Staged construction of [`Species`], [`Layer`] and [`Polygon`].
//!
//! Builders accept fields in any order. `build()` checks required
//! fields once and reports every missing one together.

use indexmap::IndexMap;

use grove_core::LayerType;

use crate::error::BuildError;
use crate::model::{Layer, Polygon, Site, Sp64Distribution, Species, UtilizationHolder};

/// Collects the names of unset required fields.
struct Missing {
    entity: &'static str,
    fields: Vec<&'static str>,
}

impl Missing {
    fn new(entity: &'static str) -> Self {
        Self {
            entity,
            fields: Vec::new(),
        }
    }

    fn check<T>(&mut self, name: &'static str, value: &Option<T>) {
        if value.is_none() {
            self.fields.push(name);
        }
    }

    fn into_error(self) -> BuildError {
        BuildError::MissingFields {
            entity: self.entity,
            fields: self.fields,
        }
    }
}

// ── Species ─────────────────────────────────────────────────────

/// Builder for [`Species`].
///
/// Required fields: `genus`, `genus_index`, `percent_genus`.
#[derive(Clone, Debug, Default)]
pub struct SpeciesBuilder {
    genus: Option<String>,
    genus_index: Option<usize>,
    percent_genus: Option<f32>,
    site: Option<Site>,
    sp64_distribution: Vec<Sp64Distribution>,
    utilization: Option<UtilizationHolder>,
}

impl Species {
    /// Start building a species.
    pub fn builder() -> SpeciesBuilder {
        SpeciesBuilder::default()
    }
}

impl SpeciesBuilder {
    /// Set the genus alias.
    pub fn genus(mut self, alias: impl Into<String>) -> Self {
        self.genus = Some(alias.into());
        self
    }

    /// Set the 1-based canonical genus index.
    pub fn genus_index(mut self, index: usize) -> Self {
        self.genus_index = Some(index);
        self
    }

    /// Set the percent of forested land.
    pub fn percent_genus(mut self, percent: f32) -> Self {
        self.percent_genus = Some(percent);
        self
    }

    /// Set the site measurements.
    pub fn site(mut self, site: Site) -> Self {
        self.site = Some(site);
        self
    }

    /// Append a detailed species share.
    pub fn add_sp64(mut self, alias: impl Into<String>, percentage: f32) -> Self {
        self.sp64_distribution.push(Sp64Distribution::new(alias, percentage));
        self
    }

    /// Set the utilization measurements (default: all missing).
    pub fn utilization(mut self, utilization: UtilizationHolder) -> Self {
        self.utilization = Some(utilization);
        self
    }

    /// Finish the species.
    pub fn build(self) -> Result<Species, BuildError> {
        match (self.genus, self.genus_index, self.percent_genus) {
            (Some(genus), Some(genus_index), Some(percent_genus)) => Ok(Species {
                genus,
                genus_index,
                percent_genus,
                site: self.site,
                sp64_distribution: self.sp64_distribution,
                utilization: self.utilization.unwrap_or_default(),
            }),
            (genus, genus_index, percent_genus) => {
                let mut missing = Missing::new("species");
                missing.check("genus", &genus);
                missing.check("genus_index", &genus_index);
                missing.check("percent_genus", &percent_genus);
                Err(missing.into_error())
            }
        }
    }
}

// ── Layer ───────────────────────────────────────────────────────

/// Builder for [`Layer`].
///
/// Required fields: `layer_type`, `polygon_id`.
#[derive(Clone, Debug, Default)]
pub struct LayerBuilder {
    layer_type: Option<LayerType>,
    polygon_id: Option<String>,
    species: IndexMap<String, Species>,
    utilization: Option<UtilizationHolder>,
}

impl Layer {
    /// Start building a layer.
    pub fn builder() -> LayerBuilder {
        LayerBuilder::default()
    }
}

impl LayerBuilder {
    /// Set the layer kind.
    pub fn layer_type(mut self, layer_type: LayerType) -> Self {
        self.layer_type = Some(layer_type);
        self
    }

    /// Set the owning polygon's identifier.
    pub fn polygon_id(mut self, id: impl Into<String>) -> Self {
        self.polygon_id = Some(id.into());
        self
    }

    /// Add a species; one with the same genus replaces the earlier entry
    /// in place.
    pub fn add_species(mut self, species: Species) -> Self {
        self.species.insert(species.genus.clone(), species);
        self
    }

    /// Set the layer totals (default: all missing).
    pub fn utilization(mut self, utilization: UtilizationHolder) -> Self {
        self.utilization = Some(utilization);
        self
    }

    /// Finish the layer.
    pub fn build(self) -> Result<Layer, BuildError> {
        match (self.layer_type, self.polygon_id) {
            (Some(layer_type), Some(polygon_id)) => Ok(Layer {
                layer_type,
                polygon_id,
                species: self.species,
                utilization: self.utilization.unwrap_or_default(),
            }),
            (layer_type, polygon_id) => {
                let mut missing = Missing::new("layer");
                missing.check("layer_type", &layer_type);
                missing.check("polygon_id", &polygon_id);
                Err(missing.into_error())
            }
        }
    }
}

// ── Polygon ─────────────────────────────────────────────────────

/// Builder for [`Polygon`].
///
/// Required fields: `id`, `bec_zone`, `primary`.
#[derive(Clone, Debug, Default)]
pub struct PolygonBuilder {
    id: Option<String>,
    bec_zone: Option<String>,
    percent_available: Option<f32>,
    primary: Option<Layer>,
    veteran: Option<Layer>,
}

impl Polygon {
    /// Start building a polygon.
    pub fn builder() -> PolygonBuilder {
        PolygonBuilder::default()
    }
}

impl PolygonBuilder {
    /// Default percent available when none is given.
    pub const DEFAULT_PERCENT_AVAILABLE: f32 = 100.0;

    /// Set the polygon identifier.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the BEC zone alias.
    pub fn bec_zone(mut self, alias: impl Into<String>) -> Self {
        self.bec_zone = Some(alias.into());
        self
    }

    /// Set the percent available (default: 100).
    pub fn percent_available(mut self, percent: f32) -> Self {
        self.percent_available = Some(percent);
        self
    }

    /// Set the primary layer.
    pub fn primary(mut self, layer: Layer) -> Self {
        self.primary = Some(layer);
        self
    }

    /// Set the veteran layer.
    pub fn veteran(mut self, layer: Layer) -> Self {
        self.veteran = Some(layer);
        self
    }

    /// Finish the polygon.
    ///
    /// Besides missing fields, fails with [`BuildError::LayerMismatch`]
    /// if a layer's own type does not match the role it was given.
    pub fn build(self) -> Result<Polygon, BuildError> {
        let (id, bec_zone, primary) = match (self.id, self.bec_zone, self.primary) {
            (Some(id), Some(bec_zone), Some(primary)) => (id, bec_zone, primary),
            (id, bec_zone, primary) => {
                let mut missing = Missing::new("polygon");
                missing.check("id", &id);
                missing.check("bec_zone", &bec_zone);
                missing.check("primary", &primary);
                return Err(missing.into_error());
            }
        };
        for (expected, layer) in [
            (LayerType::Primary, Some(&primary)),
            (LayerType::Veteran, self.veteran.as_ref()),
        ] {
            if let Some(layer) = layer.filter(|l| l.layer_type != expected) {
                return Err(BuildError::LayerMismatch {
                    expected,
                    found: layer.layer_type,
                });
            }
        }
        Ok(Polygon {
            id,
            bec_zone,
            percent_available: self
                .percent_available
                .unwrap_or(Self::DEFAULT_PERCENT_AVAILABLE),
            primary,
            veteran: self.veteran,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn species(alias: &str, index: usize) -> Species {
        Species::builder()
            .genus(alias)
            .genus_index(index)
            .percent_genus(50.0)
            .build()
            .unwrap()
    }

    #[test]
    fn species_reports_all_missing_fields() {
        let err = Species::builder().percent_genus(10.0).build().unwrap_err();
        assert_eq!(
            err,
            BuildError::MissingFields {
                entity: "species",
                fields: vec!["genus", "genus_index"],
            }
        );
        assert_eq!(
            err.to_string(),
            "species is missing required fields: genus, genus_index"
        );
    }

    #[test]
    fn species_defaults() {
        let sp = Species::builder()
            .genus("PL")
            .genus_index(12)
            .percent_genus(60.0)
            .add_sp64("PLI", 100.0)
            .build()
            .unwrap();
        assert_eq!(sp.site, None);
        assert_eq!(sp.sp64_distribution, vec![Sp64Distribution::new("PLI", 100.0)]);
        assert_eq!(sp.utilization, UtilizationHolder::new());
    }

    #[test]
    fn layer_keeps_species_order_and_replaces_duplicates() {
        let layer = Layer::builder()
            .layer_type(LayerType::Primary)
            .polygon_id("P1")
            .add_species(species("S", 15))
            .add_species(species("B", 3))
            .add_species(species("S", 15))
            .build()
            .unwrap();
        let order: Vec<&str> = layer.iter().map(|s| s.genus.as_str()).collect();
        assert_eq!(order, vec!["S", "B"]);
    }

    #[test]
    fn polygon_requires_primary() {
        let err = Polygon::builder().id("P1").bec_zone("IDF").build().unwrap_err();
        assert_eq!(
            err,
            BuildError::MissingFields {
                entity: "polygon",
                fields: vec!["primary"],
            }
        );
    }

    #[test]
    fn polygon_rejects_swapped_layers() {
        let veteran = Layer::builder()
            .layer_type(LayerType::Veteran)
            .polygon_id("P1")
            .build()
            .unwrap();
        let err = Polygon::builder()
            .id("P1")
            .bec_zone("IDF")
            .primary(veteran)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            BuildError::LayerMismatch {
                expected: LayerType::Primary,
                found: LayerType::Veteran
            }
        );
    }

    #[test]
    fn polygon_defaults_percent_available() {
        let primary = Layer::builder()
            .layer_type(LayerType::Primary)
            .polygon_id("P1")
            .build()
            .unwrap();
        let polygon = Polygon::builder()
            .id("P1")
            .bec_zone("IDF")
            .primary(primary)
            .build()
            .unwrap();
        assert_eq!(polygon.percent_available, 100.0);
        assert!(polygon.layer(LayerType::Veteran).is_none());
    }
}
