//! Slot array and active working copy for one simulation run.

use tracing::debug;

use grove_core::LayerType;

use crate::bank::Bank;
use crate::config::BankConfig;
use crate::error::{BankError, ConfigError};
use crate::model::{Layer, Polygon, Species};

/// Smallest all-class basal area a species needs to enter a bank
/// through [`ProcessingState::set_polygon`].
pub const MIN_BASAL_AREA: f32 = 0.001;

/// Whether a slot holds a bank.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotState {
    /// Never written.
    Empty,
    /// Holds a bank.
    Loaded,
}

/// Owns one bank slot per (instance, layer) pair plus the active
/// working copy the growth engine mutates.
///
/// Every transfer between slots, or between a slot and the working
/// copy, is a deep copy. Each operation checks all of its addresses
/// before it writes anything, so a failing call changes nothing.
#[derive(Clone, Debug)]
pub struct ProcessingState {
    config: BankConfig,
    slots: Vec<Option<Bank>>,
    active: Option<Bank>,
}

impl ProcessingState {
    /// An empty state shaped by `config`.
    pub fn new(config: BankConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let slots = vec![None; config.capacity()];
        Ok(Self {
            config,
            slots,
            active: None,
        })
    }

    /// The configuration in use.
    pub fn config(&self) -> &BankConfig {
        &self.config
    }

    /// Total number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Slot number of `(instance, layer)`.
    pub fn slot_index(&self, instance: usize, layer: LayerType) -> Result<usize, BankError> {
        let position = self
            .config
            .layers
            .iter()
            .position(|l| *l == layer)
            .ok_or(BankError::UnsupportedLayerType { layer })?;
        if instance >= self.config.max_instances {
            return Err(BankError::IndexOutOfRange {
                instance,
                max: self.config.max_instances - 1,
            });
        }
        Ok(instance * self.config.layers_per_instance() + position)
    }

    /// Whether `(instance, layer)` holds a bank.
    pub fn slot_state(&self, instance: usize, layer: LayerType) -> Result<SlotState, BankError> {
        let slot = self.slot_index(instance, layer)?;
        Ok(match self.slots[slot] {
            Some(_) => SlotState::Loaded,
            None => SlotState::Empty,
        })
    }

    fn loaded(&self, instance: usize, layer: LayerType) -> Result<usize, BankError> {
        let slot = self.slot_index(instance, layer)?;
        match self.slots[slot] {
            Some(_) => Ok(slot),
            None => Err(BankError::EmptySlot { instance, layer }),
        }
    }

    // ── Loading ─────────────────────────────────────────────────

    /// Flatten `source` into slot `(instance, layer)`, replacing what
    /// was there. All species are kept. `source` must be of kind `layer`.
    pub fn load(&mut self, instance: usize, layer: LayerType, source: &Layer) -> Result<(), BankError> {
        let slot = self.slot_index(instance, layer)?;
        check_layer(layer, source.layer_type)?;
        self.slots[slot] = Some(Bank::from_layer(source, |_| true));
        debug!(instance, layer = %layer, slot, polygon = %source.polygon_id, "bank loaded");
        Ok(())
    }

    /// Start processing `polygon`.
    ///
    /// The primary layer goes to instance 0 and becomes the active
    /// working copy; the veteran layer, if any, goes to instance 0 as
    /// well. Species whose all-class basal area is set and below
    /// [`MIN_BASAL_AREA`] are left out.
    pub fn set_polygon(&mut self, polygon: &Polygon) -> Result<(), BankError> {
        let primary_slot = self.slot_index(0, LayerType::Primary)?;
        let veteran_slot = match &polygon.veteran {
            Some(_) => Some(self.slot_index(0, LayerType::Veteran)?),
            None => None,
        };

        let primary = Bank::from_layer(&polygon.primary, has_min_basal_area);
        self.active = Some(primary.clone());
        self.slots[primary_slot] = Some(primary);
        if let (Some(slot), Some(veteran)) = (veteran_slot, &polygon.veteran) {
            self.slots[slot] = Some(Bank::from_layer(veteran, has_min_basal_area));
        }
        debug!(
            polygon = %polygon.id,
            bec_zone = %polygon.bec_zone,
            veteran = polygon.veteran.is_some(),
            "polygon set"
        );
        Ok(())
    }

    // ── Copying ─────────────────────────────────────────────────

    /// Save a deep copy of the active working copy into `(instance, layer)`.
    pub fn copy_into(&mut self, instance: usize, layer: LayerType) -> Result<(), BankError> {
        let slot = self.slot_index(instance, layer)?;
        let active = self.active.as_ref().ok_or(BankError::NoActiveState)?;
        check_layer(layer, active.layer_type)?;
        self.slots[slot] = Some(active.clone());
        debug!(instance, layer = %layer, slot, "active state stored");
        Ok(())
    }

    /// Replace the active working copy with a deep copy of `(instance, layer)`.
    pub fn restore(&mut self, instance: usize, layer: LayerType) -> Result<(), BankError> {
        let slot = self.loaded(instance, layer)?;
        self.active = self.slots[slot].clone();
        debug!(instance, layer = %layer, slot, "active state restored");
        Ok(())
    }

    /// Deep-copy slot `(from, layer)` into `(to, layer)`. The source is
    /// unchanged.
    pub fn transfer(&mut self, from: usize, to: usize, layer: LayerType) -> Result<(), BankError> {
        let source = self.loaded(from, layer)?;
        let target = self.slot_index(to, layer)?;
        if source != target {
            self.slots[target] = self.slots[source].clone();
        }
        debug!(from, to, layer = %layer, "bank transferred");
        Ok(())
    }

    // ── Access ──────────────────────────────────────────────────

    /// The bank in `(instance, layer)`.
    pub fn get(&self, instance: usize, layer: LayerType) -> Result<&Bank, BankError> {
        let slot = self.slot_index(instance, layer)?;
        self.slots[slot]
            .as_ref()
            .ok_or(BankError::EmptySlot { instance, layer })
    }

    /// Mutable access to the bank in `(instance, layer)`.
    pub fn get_mut(&mut self, instance: usize, layer: LayerType) -> Result<&mut Bank, BankError> {
        let slot = self.slot_index(instance, layer)?;
        self.slots[slot]
            .as_mut()
            .ok_or(BankError::EmptySlot { instance, layer })
    }

    /// The active working copy.
    pub fn active(&self) -> Result<&Bank, BankError> {
        self.active.as_ref().ok_or(BankError::NoActiveState)
    }

    /// Mutable access to the active working copy.
    pub fn active_mut(&mut self) -> Result<&mut Bank, BankError> {
        self.active.as_mut().ok_or(BankError::NoActiveState)
    }
}

fn check_layer(slot: LayerType, found: LayerType) -> Result<(), BankError> {
    if slot == found {
        Ok(())
    } else {
        Err(BankError::LayerMismatch { slot, found })
    }
}

fn has_min_basal_area(species: &Species) -> bool {
    species
        .utilization
        .total_basal_area()
        .is_none_or(|ba| ba >= MIN_BASAL_AREA)
}
