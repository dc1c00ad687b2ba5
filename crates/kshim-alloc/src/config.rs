//! Allocator configuration.

use kshim_core::ShimConfig;

use crate::error::ConfigError;

/// Configuration for a [`NodeSlab`](crate::NodeSlab).
///
/// Validated at construction; immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllocConfig {
    /// Maximum number of simultaneously live nodes. Allocation beyond this
    /// returns `None`, standing in for memory exhaustion.
    ///
    /// Default: 1_048_576.
    pub max_nodes: usize,

    /// Feature toggles. `list_hardened` / `debug_list` turn on neighbour
    /// validation in the list operations.
    pub shim: ShimConfig,
}

impl AllocConfig {
    /// Default live-node budget.
    pub const DEFAULT_MAX_NODES: usize = 1 << 20;

    /// Config with the given node budget and default features.
    pub fn with_max_nodes(max_nodes: usize) -> Self {
        Self {
            max_nodes,
            shim: ShimConfig::default(),
        }
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_nodes == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        // The top generation is reserved, but indices may use the full range.
        if self.max_nodes > u32::MAX as usize {
            return Err(ConfigError::CapacityTooLarge {
                configured: self.max_nodes,
            });
        }
        Ok(())
    }
}

impl Default for AllocConfig {
    fn default() -> Self {
        Self::with_max_nodes(Self::DEFAULT_MAX_NODES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(AllocConfig::default().validate(), Ok(()));
    }

    #[test]
    fn zero_capacity_rejected() {
        assert_eq!(
            AllocConfig::with_max_nodes(0).validate(),
            Err(ConfigError::ZeroCapacity)
        );
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn oversized_capacity_rejected() {
        let configured = u32::MAX as usize + 1;
        assert_eq!(
            AllocConfig::with_max_nodes(configured).validate(),
            Err(ConfigError::CapacityTooLarge { configured })
        );
    }
}
