//! Bank, builder and configuration errors.

use std::error::Error;
use std::fmt;

use grove_core::LayerType;

/// Errors raised by [`ProcessingState`](crate::ProcessingState) operations.
///
/// All of them indicate caller misuse. The state is unchanged when one
/// is returned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BankError {
    /// The layer kind has no slot in this configuration.
    UnsupportedLayerType {
        /// The rejected layer kind.
        layer: LayerType,
    },
    /// The instance number is past the configured maximum.
    IndexOutOfRange {
        /// The rejected instance number.
        instance: usize,
        /// Highest legal instance number.
        max: usize,
    },
    /// A read or copy addressed a slot that was never loaded.
    EmptySlot {
        /// Instance of the empty slot.
        instance: usize,
        /// Layer kind of the empty slot.
        layer: LayerType,
    },
    /// A bank of one layer kind was offered to a slot of another.
    LayerMismatch {
        /// Layer kind of the addressed slot.
        slot: LayerType,
        /// Layer kind of the offered state.
        found: LayerType,
    },
    /// No polygon has been set, so there is no working copy.
    NoActiveState,
}

impl fmt::Display for BankError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedLayerType { layer } => {
                write!(f, "layer type {layer} has no bank slot")
            }
            Self::IndexOutOfRange { instance, max } => {
                write!(f, "instance {instance} is out of range; expecting 0 to {max}")
            }
            Self::EmptySlot { instance, layer } => {
                write!(f, "bank slot ({instance}, {layer}) is empty")
            }
            Self::LayerMismatch { slot, found } => {
                write!(f, "a {found} layer cannot be stored in a {slot} slot")
            }
            Self::NoActiveState => write!(f, "no polygon is being processed"),
        }
    }
}

impl Error for BankError {}

/// A builder was finalized without all required fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BuildError {
    /// Every required field that was never set.
    MissingFields {
        /// What was being built.
        entity: &'static str,
        /// Names of the missing fields, in declaration order.
        fields: Vec<&'static str>,
    },
    /// A layer was given for the wrong role in a polygon.
    LayerMismatch {
        /// The role being filled.
        expected: LayerType,
        /// The layer's own type.
        found: LayerType,
    },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFields { entity, fields } => {
                write!(f, "{entity} is missing required fields: {}", fields.join(", "))
            }
            Self::LayerMismatch { expected, found } => {
                write!(f, "expected a {expected} layer, got a {found} layer")
            }
        }
    }
}

impl Error for BuildError {}

/// Errors from [`BankConfig::validate`](crate::BankConfig::validate).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `max_instances` was zero.
    NoInstances,
    /// The layer list was empty.
    NoLayers,
    /// A layer kind appeared more than once.
    DuplicateLayer {
        /// The repeated kind.
        layer: LayerType,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoInstances => write!(f, "at least one instance is required"),
            Self::NoLayers => write!(f, "at least one layer type is required"),
            Self::DuplicateLayer { layer } => {
                write!(f, "layer type {layer} is listed more than once")
            }
        }
    }
}

impl Error for ConfigError {}
