//! Coefficient table and definition file parsers for Grove.
//!
//! Every parser here is a [`LineParser`](grove_parse::LineParser)
//! declaration plus a fold that writes records into a typed result,
//! usually a [`MatrixMap`](grove_matrix::MatrixMap) keyed by zone,
//! species, region or utilization class.
//!
//! Parsers that validate against known zones or species read them from
//! a [`ControlMap`] filled by earlier parses (BEC definitions first,
//! then genus definitions, then the coefficient tables).
//!
//! | Parser | Result | Control key |
//! |--------|--------|-------------|
//! | [`BecDefinitionParser`] | [`BecLookup`](grove_core::BecLookup) | `BecDef` |
//! | [`GenusDefinitionParser`] | [`GenusDefinitionMap`](grove_core::GenusDefinitionMap) | `GenusDef` |
//! | [`BecZoneBySpeciesCoefficientParser`] | zone × species [`Coefficients`](grove_core::Coefficients) | `BasalAreaYield`, `QuadMeanDiameterYield` |
//! | [`CoefficientParser`] | 1–3 key coefficient store | `Coefficients(name)` |
//! | [`SiteCurveParser`] | species → [`SiteCurve`] | `SiteCurveNumbers` |
//! | [`StockingClassFactorParser`] | class × region → [`StockingClassFactor`] | `StockingClassFactors` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bec_definition;
pub mod bec_zone_by_species;
pub mod coefficient;
pub mod control;
pub mod genus_definition;
pub mod site_curve;
pub mod stocking_class;

pub use bec_definition::BecDefinitionParser;
pub use bec_zone_by_species::{
    BecZoneBySpeciesCoefficientParser, IndicatorVariant, ZoneSpeciesCoefficients,
};
pub use coefficient::CoefficientParser;
pub use control::{ControlKey, ControlMap, ResourceParser};
pub use genus_definition::GenusDefinitionParser;
pub use site_curve::{SiteCurve, SiteCurveParser};
pub use stocking_class::{StockingClassFactor, StockingClassFactorParser, StockingClassFactors};

use grove_matrix::MatrixError;
use grove_parse::ParseError;

/// Lift a store error raised while writing a row into a line error.
pub(crate) fn at_line(line: usize) -> impl FnOnce(MatrixError) -> ParseError {
    move |e| ParseError::validation(line, e.to_string())
}
