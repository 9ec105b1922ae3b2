//! N-dimensional keyed coefficient store for Grove lookup tables.
//!
//! Coefficient tables are sparse lookups indexed by combinations of
//! categorical keys: zone × species, species × region × utilization
//! class, and so on. [`MatrixMap`] stores any such table with one to
//! three key dimensions behind a single interface; the typed views
//! [`MatrixMap1`], [`MatrixMap2`] and [`MatrixMap3`] add per-arity
//! convenience on top.
//!
//! # Layout
//!
//! Every dimension is a finite, insertion-ordered key domain. Cells are
//! stored densely in mixed-radix order with the first dimension varying
//! slowest, so [`MatrixMap::each_key`] and every other enumeration
//! visit tuples outer-to-inner in domain insertion order. Every cell is
//! filled from the default function when the map is built; a separate
//! populated flag distinguishes "never set" from "set to a value equal
//! to the default".
//!
//! # Views
//!
//! A view wraps a `MatrixMap` (owned, `&` or `&mut`) after checking
//! that its dimensionality and key types match. Nothing is copied.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod key;
pub mod map;
pub mod view;

pub use error::MatrixError;
pub use key::{AsKey, Key, KeyRef, MatrixKey};
pub use map::MatrixMap;
pub use view::{MatrixMap1, MatrixMap2, MatrixMap3};
