//! Feature toggles for the hosted structure.
//!
//! The kernel selects these with `CONFIG_*` symbols at build time. Here they
//! are ordinary values handed to whatever is being constructed, so two
//! differently configured instances can coexist in one process.

/// Build-time features the hosted structure branches on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Feature {
    /// Multi-index entries (`CONFIG_XARRAY_MULTI`).
    XarrayMulti,
    /// Shrink tables for small systems (`CONFIG_BASE_SMALL`).
    BaseSmall,
    /// Cheap list-corruption checks (`CONFIG_LIST_HARDENED`).
    ListHardened,
    /// Full list-corruption checks (`CONFIG_DEBUG_LIST`).
    DebugList,
}

/// Feature configuration handed to shim components at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShimConfig {
    /// Enable multi-index entries. Default: `true`.
    pub xarray_multi: bool,
    /// Use reduced table sizes. Default: `false`.
    pub base_small: bool,
    /// Validate list neighbours on deletion. Default: `false`.
    pub list_hardened: bool,
    /// Validate list neighbours and poison deleted anchors. Default: `false`.
    pub debug_list: bool,
}

impl ShimConfig {
    /// Whether `feature` is switched on (`IS_ENABLED`).
    pub fn is_enabled(&self, feature: Feature) -> bool {
        match feature {
            Feature::XarrayMulti => self.xarray_multi,
            Feature::BaseSmall => self.base_small,
            Feature::ListHardened => self.list_hardened,
            Feature::DebugList => self.debug_list,
        }
    }

    /// Whether list deletions should validate their neighbours.
    pub fn checks_lists(&self) -> bool {
        self.list_hardened || self.debug_list
    }
}

impl Default for ShimConfig {
    fn default() -> Self {
        Self {
            xarray_multi: true,
            base_small: false,
            list_hardened: false,
            debug_list: false,
        }
    }
}
