//! Static effect configuration.
//!
//! An [`EffectConfig`] names the effect and selects which versioned catalog
//! revision and factory preset table an instance uses. It is built in a
//! `const` context, so it can live in a `static`.
//!
//! # Example
//!
//! ```
//! use flanger_core::config::EffectConfig;
//! use flanger_core::revisions::{CatalogRevision, PresetTable};
//!
//! pub static CONFIG: EffectConfig = EffectConfig::new("Flanger")
//!     .with_vendor("Example Audio")
//!     .with_version("1.2.0")
//!     .with_catalog(CatalogRevision::DepthBeforeDelay)
//!     .with_presets(PresetTable::Subtle);
//!
//! assert_eq!(CONFIG.initial_preset, 0);
//! ```

use crate::revisions::{CatalogRevision, PresetTable};

/// Effect metadata plus the versioned data it is built from.
#[derive(Debug, Clone)]
pub struct EffectConfig {
    /// Effect name shown by the host.
    pub name: &'static str,

    /// Vendor/company name.
    pub vendor: &'static str,

    /// Version string.
    pub version: &'static str,

    /// Parameter ordering.
    pub catalog: CatalogRevision,

    /// Factory preset table.
    pub presets: PresetTable,

    /// Number of modulation LFOs the engine is built with.
    pub lfo_count: usize,

    /// Factory preset applied at construction; negative starts from the
    /// catalog defaults with no current preset.
    pub initial_preset: i32,
}

impl EffectConfig {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            vendor: "Unknown Vendor",
            version: "1.0.0",
            catalog: CatalogRevision::DelayBeforeDepth,
            presets: PresetTable::Intense,
            lfo_count: 1,
            initial_preset: 0,
        }
    }

    pub const fn with_vendor(mut self, vendor: &'static str) -> Self {
        self.vendor = vendor;
        self
    }

    pub const fn with_version(mut self, version: &'static str) -> Self {
        self.version = version;
        self
    }

    /// Select the catalog revision.
    pub const fn with_catalog(mut self, catalog: CatalogRevision) -> Self {
        self.catalog = catalog;
        self
    }

    /// Select the factory preset table.
    pub const fn with_presets(mut self, presets: PresetTable) -> Self {
        self.presets = presets;
        self
    }

    pub const fn with_lfo_count(mut self, lfo_count: usize) -> Self {
        self.lfo_count = lfo_count;
        self
    }

    /// Set the preset applied at construction (`-1` for none).
    pub const fn with_initial_preset(mut self, number: i32) -> Self {
        self.initial_preset = number;
        self
    }
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self::new("Flanger")
    }
}
