//! Core domain types for the Grove growth-and-yield toolkit.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by every other Grove crate: regions, layer
//! kinds, utilization classes, the offset-indexed [`Coefficients`]
//! vector, and the BEC zone and genus definitions that coefficient
//! tables are keyed by.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bec;
pub mod coefficients;
pub mod error;
pub mod genus;
pub mod region;
pub mod utilization;

pub use bec::{BecDefinition, BecLookup};
pub use coefficients::Coefficients;
pub use error::{CodeError, CoefficientError};
pub use genus::{canonical_species, GenusDefinition, GenusDefinitionMap};
pub use region::{LayerType, Region};
pub use utilization::UtilizationClass;

/// Marker for a floating-point value that has not been computed yet.
pub const MISSING_FLOAT: f32 = -9.0;

/// Marker for an integer value that has not been computed yet.
pub const MISSING_INT: i32 = -9;
