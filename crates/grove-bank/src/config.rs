//! Bank manager configuration.

use smallvec::SmallVec;

use grove_core::LayerType;

use crate::error::ConfigError;

/// Shape of a [`ProcessingState`](crate::ProcessingState)'s slot array.
///
/// There is one slot per (instance, layer) pair; slot numbers are
/// `instance * layers_per_instance() + position of layer in layers`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BankConfig {
    /// How many simulation instances are tracked at once.
    ///
    /// Default: 3 (the loaded state, the projection under test and a
    /// spare).
    pub max_instances: usize,

    /// Layer kinds that get a slot in every instance, in slot order.
    ///
    /// Default: `[Primary, Veteran]`.
    pub layers: SmallVec<[LayerType; 2]>,
}

impl BankConfig {
    /// Default number of instances.
    pub const DEFAULT_MAX_INSTANCES: usize = 3;

    /// A config with the default instance count and layer list.
    pub fn new() -> Self {
        Self {
            max_instances: Self::DEFAULT_MAX_INSTANCES,
            layers: SmallVec::from_slice(&LayerType::ALL),
        }
    }

    /// A config tracking `max_instances` instances.
    pub fn with_instances(max_instances: usize) -> Self {
        Self {
            max_instances,
            ..Self::new()
        }
    }

    /// Number of slots per instance.
    pub fn layers_per_instance(&self) -> usize {
        self.layers.len()
    }

    /// Total number of slots.
    pub fn capacity(&self) -> usize {
        self.max_instances * self.layers_per_instance()
    }

    /// Check the config describes at least one slot and no layer twice.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_instances == 0 {
            return Err(ConfigError::NoInstances);
        }
        if self.layers.is_empty() {
            return Err(ConfigError::NoLayers);
        }
        for (i, layer) in self.layers.iter().enumerate() {
            if self.layers[..i].contains(layer) {
                return Err(ConfigError::DuplicateLayer { layer: *layer });
            }
        }
        Ok(())
    }
}

impl Default for BankConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn default_has_six_slots() {
        let config = BankConfig::new();
        assert_eq!(config.layers_per_instance(), 2);
        assert_eq!(config.capacity(), 6);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn rejects_degenerate_shapes() {
        assert_eq!(
            BankConfig::with_instances(0).validate(),
            Err(ConfigError::NoInstances)
        );

        let mut config = BankConfig::new();
        config.layers.clear();
        assert_eq!(config.validate(), Err(ConfigError::NoLayers));

        config.layers = smallvec![LayerType::Veteran, LayerType::Primary, LayerType::Veteran];
        assert_eq!(
            config.validate(),
            Err(ConfigError::DuplicateLayer {
                layer: LayerType::Veteran
            })
        );
    }
}
