//! Layer model and per-instance processing-state banks for Grove.
//!
//! A growth run holds several independent copies of a polygon's layer
//! state: the state as loaded, the projection being tried, a spare to
//! fall back on. This crate provides the layer model those copies are
//! built from and the manager that owns them.
//!
//! # Architecture
//!
//! ```text
//! ProcessingState (manager)
//! ├── BankConfig (max instances × layer kinds)
//! ├── slots: one Option<Bank> per (instance, layer)
//! │   └── Bank: columnar arrays, position 0 = layer totals
//! └── active: Option<Bank> (the working copy the engine mutates)
//! ```
//!
//! Slot `(instance, layer)` lives at
//! `instance * layers_per_instance + position of layer`. Banks move
//! between slots and the working copy only by deep copy, so no two
//! slots ever share storage.
//!
//! # Slot lifecycle
//!
//! `Empty → Loaded`, after which loads, copies and transfers replace
//! the bank wholesale. There is no teardown.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bank;
pub mod builder;
pub mod config;
pub mod error;
pub mod model;
pub mod state;

pub use bank::{Bank, CopyMode};
pub use builder::{LayerBuilder, PolygonBuilder, SpeciesBuilder};
pub use config::BankConfig;
pub use error::{BankError, BuildError, ConfigError};
pub use model::{Layer, Polygon, Site, Sp64Distribution, Species, UtilizationHolder};
pub use state::{ProcessingState, SlotState, MIN_BASAL_AREA};
