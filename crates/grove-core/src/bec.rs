//! Biogeoclimatic (BEC) zone definitions.

use indexmap::IndexMap;

use crate::region::Region;

/// One BEC zone: its short alias, the region it belongs to, and a
/// descriptive name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BecDefinition {
    /// Short code, at most four characters (e.g. `"CWH"`).
    pub alias: String,
    /// Region the zone belongs to.
    pub region: Region,
    /// Descriptive name.
    pub name: String,
}

impl BecDefinition {
    /// Create a definition.
    pub fn new(alias: impl Into<String>, region: Region, name: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            region,
            name: name.into(),
        }
    }
}

/// The known BEC zones, keyed by alias, in definition order.
///
/// Insertion order is the order zones were read, which is the order
/// coefficient stores enumerate their zone dimension in.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BecLookup {
    zones: IndexMap<String, BecDefinition>,
}

impl BecLookup {
    /// An empty lookup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a zone. A replaced zone keeps its original position.
    pub fn insert(&mut self, definition: BecDefinition) -> Option<BecDefinition> {
        self.zones.insert(definition.alias.clone(), definition)
    }

    /// Look a zone up by alias.
    pub fn get(&self, alias: &str) -> Option<&BecDefinition> {
        self.zones.get(alias)
    }

    /// Whether `alias` is a known zone.
    pub fn contains(&self, alias: &str) -> bool {
        self.zones.contains_key(alias)
    }

    /// Zone aliases in definition order.
    pub fn aliases(&self) -> impl Iterator<Item = &str> + '_ {
        self.zones.keys().map(String::as_str)
    }

    /// Zones belonging to `region`, in definition order.
    pub fn by_region(&self, region: Region) -> impl Iterator<Item = &BecDefinition> + '_ {
        self.zones.values().filter(move |d| d.region == region)
    }

    /// All zones in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &BecDefinition> + '_ {
        self.zones.values()
    }

    /// Number of zones.
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// Whether no zones are defined.
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

impl FromIterator<BecDefinition> for BecLookup {
    fn from_iter<I: IntoIterator<Item = BecDefinition>>(iter: I) -> Self {
        let mut lookup = Self::new();
        for definition in iter {
            lookup.insert(definition);
        }
        lookup
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BecLookup {
        [
            BecDefinition::new("CWH", Region::Coastal, "Coastal Western Hemlock"),
            BecDefinition::new("IDF", Region::Interior, "Interior Douglas Fir"),
            BecDefinition::new("CDF", Region::Coastal, "Coastal Dougfir"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn aliases_keep_definition_order() {
        let lookup = sample();
        assert_eq!(lookup.aliases().collect::<Vec<_>>(), vec!["CWH", "IDF", "CDF"]);
    }

    #[test]
    fn by_region_filters() {
        let lookup = sample();
        let coastal: Vec<&str> = lookup
            .by_region(Region::Coastal)
            .map(|d| d.alias.as_str())
            .collect();
        assert_eq!(coastal, vec!["CWH", "CDF"]);
    }

    #[test]
    fn replacing_keeps_position() {
        let mut lookup = sample();
        let old = lookup.insert(BecDefinition::new("IDF", Region::Interior, "renamed"));
        assert!(old.is_some());
        assert_eq!(lookup.aliases().nth(1), Some("IDF"));
        assert_eq!(lookup.get("IDF").map(|d| d.name.as_str()), Some("renamed"));
    }
}
