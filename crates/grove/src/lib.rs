//! Grove: infrastructure for forest growth-and-yield models.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Grove sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use grove::prelude::*;
//!
//! // Definitions first: coefficient tables are validated against them.
//! let mut control = ControlMap::new();
//! BecDefinitionParser::new()
//!     .parse_into("IDF  I Interior Douglas Fir\n".as_bytes(), &mut control)
//!     .unwrap();
//! control.insert(ControlKey::GenusDef, canonical_species());
//!
//! // One row: zone IDF, index 0, indicator 0, 16 species columns.
//! let mut row = String::from("IDF   0 0");
//! for i in 0..16 {
//!     row.push_str(&format!("{:>8.1}", i as f32));
//! }
//! BecZoneBySpeciesCoefficientParser::basal_area_yield()
//!     .parse_into(row.as_bytes(), &mut control)
//!     .unwrap();
//!
//! let table = control
//!     .expect::<ZoneSpeciesCoefficients>(&ControlKey::BasalAreaYield)
//!     .unwrap();
//! assert_eq!(table.get("IDF", "PL").unwrap().get(0).unwrap(), 11.0);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `grove-core` | Regions, layer kinds, utilization classes, `Coefficients`, definitions |
//! | [`parse`] | `grove-parse` | Fixed-width line declarations, values, records |
//! | [`matrix`] | `grove-matrix` | N-dimensional keyed store and typed views |
//! | [`coe`] | `grove-coe` | Definition and coefficient table parsers, `ControlMap` |
//! | [`bank`] | `grove-bank` | Layer model, builders, processing-state banks |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core domain types (`grove-core`).
pub use grove_core as types;

/// Fixed-width ingestion (`grove-parse`).
///
/// Declare a layout with [`parse::LineParser`], then stream
/// [`parse::Record`]s or fold them into a result.
pub use grove_parse as parse;

/// Keyed coefficient stores (`grove-matrix`).
///
/// [`matrix::MatrixMap`] for any arity, [`matrix::MatrixMap1`] to
/// [`matrix::MatrixMap3`] for typed access.
pub use grove_matrix as matrix;

/// Resource parsers and the control map (`grove-coe`).
pub use grove_coe as coe;

/// Layer model and processing-state banks (`grove-bank`).
pub use grove_bank as bank;

/// Common imports for typical Grove usage.
///
/// ```rust
/// use grove::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use grove_core::{
        canonical_species, BecDefinition, BecLookup, Coefficients, GenusDefinition,
        GenusDefinitionMap, LayerType, Region, UtilizationClass, MISSING_FLOAT, MISSING_INT,
    };

    // Ingestion
    pub use grove_parse::{LineParser, ParseError, Record, Value, ValueParser};

    // Stores
    pub use grove_matrix::{Key, KeyRef, MatrixError, MatrixMap, MatrixMap1, MatrixMap2, MatrixMap3};

    // Resource parsers
    pub use grove_coe::{
        BecDefinitionParser, BecZoneBySpeciesCoefficientParser, CoefficientParser, ControlKey,
        ControlMap, GenusDefinitionParser, IndicatorVariant, ResourceParser, SiteCurveParser,
        StockingClassFactorParser, ZoneSpeciesCoefficients,
    };

    // Banks
    pub use grove_bank::{
        Bank, BankConfig, BankError, Layer, Polygon, ProcessingState, SlotState, Species,
    };
}
