//! Genus (species group) definitions and the canonical species order.

use indexmap::IndexMap;

/// One species group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenusDefinition {
    /// Short code, at most two characters (e.g. `"PL"`).
    pub alias: String,
    /// 1-based position in the canonical order.
    pub index: usize,
    /// Descriptive name.
    pub name: String,
    /// Explicit ordering preference, if the definition file gave one.
    pub preference: Option<u32>,
}

/// The known species groups, keyed by alias, in canonical order.
///
/// Each definition's [`index`](GenusDefinition::index) equals its
/// 1-based position in this map; [`from_ordered`](Self::from_ordered)
/// enforces that.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GenusDefinitionMap {
    genera: IndexMap<String, GenusDefinition>,
}

impl GenusDefinitionMap {
    /// Build a map from `(alias, name, preference)` triples already in
    /// canonical order, assigning 1-based indices.
    pub fn from_ordered<I, A, N>(entries: I) -> Self
    where
        I: IntoIterator<Item = (A, N, Option<u32>)>,
        A: Into<String>,
        N: Into<String>,
    {
        let mut genera = IndexMap::new();
        for (alias, name, preference) in entries {
            let alias = alias.into();
            let definition = GenusDefinition {
                alias: alias.clone(),
                index: genera.len() + 1,
                name: name.into(),
                preference,
            };
            genera.insert(alias, definition);
        }
        Self { genera }
    }

    /// Look a species up by alias.
    pub fn get(&self, alias: &str) -> Option<&GenusDefinition> {
        self.genera.get(alias)
    }

    /// Look a species up by its 1-based index.
    pub fn by_index(&self, index: usize) -> Option<&GenusDefinition> {
        index
            .checked_sub(1)
            .and_then(|i| self.genera.get_index(i))
            .map(|(_, d)| d)
    }

    /// The 1-based index of `alias`.
    pub fn index_of(&self, alias: &str) -> Option<usize> {
        self.genera.get_index_of(alias).map(|i| i + 1)
    }

    /// Whether `alias` is a known species.
    pub fn contains(&self, alias: &str) -> bool {
        self.genera.contains_key(alias)
    }

    /// Species aliases in canonical order.
    pub fn aliases(&self) -> impl Iterator<Item = &str> + '_ {
        self.genera.keys().map(String::as_str)
    }

    /// All definitions in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &GenusDefinition> + '_ {
        self.genera.values()
    }

    /// Number of species.
    pub fn len(&self) -> usize {
        self.genera.len()
    }

    /// Whether no species are defined.
    pub fn is_empty(&self) -> bool {
        self.genera.is_empty()
    }
}

const CANONICAL: [(&str, &str); 16] = [
    ("AC", "Cottonwood"),
    ("AT", "Aspen"),
    ("B", "Balsam"),
    ("C", "Cedar (X yellow)"),
    ("D", "Alder"),
    ("E", "Birch"),
    ("F", "Douglas Fir"),
    ("H", "Hemlock"),
    ("L", "Larch"),
    ("MB", "Maple"),
    ("PA", "White-bark pine"),
    ("PL", "Lodgepole Pine"),
    ("PW", "White pine"),
    ("PY", "Yellow pine"),
    ("S", "Spruce"),
    ("Y", "Yellow cedar"),
];

/// The sixteen standard species groups in their canonical order.
///
/// Packed per-species columns in coefficient tables follow this order.
/// Components that need it take it as an argument.
pub fn canonical_species() -> GenusDefinitionMap {
    GenusDefinitionMap::from_ordered(CANONICAL.iter().map(|&(alias, name)| (alias, name, None)))
}
