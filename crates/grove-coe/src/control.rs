//! Typed registry of parsed resources.

use std::any::{type_name, Any};
use std::fmt;
use std::io::BufRead;

use indexmap::IndexMap;
use tracing::info;

use grove_core::{BecLookup, GenusDefinitionMap};
use grove_parse::ParseError;

/// Names a parsed resource in a [`ControlMap`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ControlKey {
    /// BEC zone definitions.
    BecDef,
    /// Genus (species group) definitions.
    GenusDef,
    /// Site curve numbers per species and region.
    SiteCurveNumbers,
    /// Stocking class factors.
    StockingClassFactors,
    /// Basal area yield coefficients, zone × species.
    BasalAreaYield,
    /// Quad-mean diameter yield coefficients, zone × species.
    QuadMeanDiameterYield,
    /// Any other coefficient table, by name.
    Coefficients(String),
}

impl fmt::Display for ControlKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BecDef => f.write_str("BEC_DEF"),
            Self::GenusDef => f.write_str("SP0_DEF"),
            Self::SiteCurveNumbers => f.write_str("SITE_CURVE_NUMBERS"),
            Self::StockingClassFactors => f.write_str("STOCKING_CLASS_FACTORS"),
            Self::BasalAreaYield => f.write_str("BA_YIELD"),
            Self::QuadMeanDiameterYield => f.write_str("DQ_YIELD"),
            Self::Coefficients(name) => write!(f, "COE[{name}]"),
        }
    }
}

/// Parsed resources keyed by [`ControlKey`], in insertion order.
///
/// Values are stored type-erased and recovered with a checked downcast,
/// so a consumer asking for the wrong type gets an error rather than a
/// reinterpretation.
#[derive(Default)]
pub struct ControlMap {
    entries: IndexMap<ControlKey, Box<dyn Any + Send + Sync>>,
}

impl fmt::Debug for ControlMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.entries.keys()).finish()
    }
}

impl ControlMap {
    /// An empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key`, replacing any previous entry.
    pub fn insert<T: Any + Send + Sync>(&mut self, key: ControlKey, value: T) {
        self.entries.insert(key, Box::new(value));
    }

    /// The entry under `key`, if present and of type `T`.
    pub fn get<T: Any>(&self, key: &ControlKey) -> Option<&T> {
        self.entries.get(key).and_then(|v| v.downcast_ref::<T>())
    }

    /// The entry under `key`, or [`ParseError::Resource`] naming what is
    /// missing or mistyped.
    pub fn expect<T: Any>(&self, key: &ControlKey) -> Result<&T, ParseError> {
        let entry = self
            .entries
            .get(key)
            .ok_or_else(|| ParseError::resource(format!("control map has no entry for {key}")))?;
        entry.downcast_ref::<T>().ok_or_else(|| {
            ParseError::resource(format!(
                "control map entry {key} is not a {}",
                type_name::<T>()
            ))
        })
    }

    /// Whether `key` has an entry.
    pub fn contains(&self, key: &ControlKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &ControlKey> + '_ {
        self.entries.keys()
    }

    /// Known BEC zones.
    pub fn becs(&self) -> Result<&BecLookup, ParseError> {
        self.expect(&ControlKey::BecDef)
    }

    /// Known species, in canonical order.
    pub fn genera(&self) -> Result<&GenusDefinitionMap, ParseError> {
        self.expect(&ControlKey::GenusDef)
    }
}

/// A parser for one kind of resource file.
pub trait ResourceParser {
    /// What a successful parse produces.
    type Output: Any + Send + Sync;

    /// Where the result is stored in a [`ControlMap`].
    fn control_key(&self) -> ControlKey;

    /// Parse `reader`, consulting `control` for previously loaded resources.
    fn parse<R: BufRead>(&self, reader: R, control: &ControlMap) -> Result<Self::Output, ParseError>;

    /// Parse `reader` and store the result under [`control_key`](Self::control_key).
    ///
    /// `control` is untouched if the parse fails.
    fn parse_into<R: BufRead>(&self, reader: R, control: &mut ControlMap) -> Result<(), ParseError> {
        let output = self.parse(reader, control)?;
        let key = self.control_key();
        info!(resource = %key, "resource loaded");
        control.insert(key, output);
        Ok(())
    }
}
