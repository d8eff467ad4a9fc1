//! # Flanger
//!
//! Parameter layer for a modulated-delay audio effect.
//!
//! ## Architecture
//!
//! ```text
//! Host shell / UI controls (control context)
//!        ↓
//! ParameterHost ── PresetBank, EditorBinding, ValueFormatter
//!        ↓
//! ParameterStore (atomic slots)
//!        ↓
//! ParameterReader (render context) → audio engine
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use flanger::prelude::*;
//!
//! static CONFIG: EffectConfig = EffectConfig::new("Flanger")
//!     .with_vendor("Example Audio")
//!     .with_catalog(CatalogRevision::DelayBeforeDepth)
//!     .with_presets(PresetTable::Intense);
//!
//! let mut host = ParameterHost::new(&CONFIG).unwrap();
//! let engine = host.engine_config();
//! assert_eq!(engine.max_delay_ms, 10.0);
//!
//! // Render context
//! let reader = host.reader();
//! let addresses = host.engine_addresses().unwrap();
//! let block = BlockParameters::read(&reader, &addresses);
//! assert_eq!(block.rate_hz, 1.68);
//!
//! // Host recalls "Wavy"
//! host.apply_factory_preset(2).unwrap();
//! assert_eq!(reader.read(addresses.rate), 5.1);
//! ```

// Re-export sub-crates
pub use flanger_core as core;
pub use flanger_utils as utils;

/// Prelude module for convenient imports.
///
/// ```rust
/// use flanger::prelude::*;
/// ```
pub mod prelude {
    pub use flanger_core::{
        // Catalog and definitions
        ids, CatalogRevision, ParameterCatalog, ParameterDefinition, ParameterKind,
        ParameterUnit, BooleanStyle, UnitSeparator, ValueRange,
        // Storage and render access
        BlockParameters, EngineAddresses, EngineConfig, ParameterReader, ParameterSource,
        ParameterStore,
        // Presets
        NoEditor, PresetBank, PresetDefinition, PresetIndicator, PresetListener, PresetTable,
        // Formatting
        ValueFormatter,
        // Editor binding
        BoundControl, ControlChange, ControlHandle, EditorBinding, SyncState,
        // Host surface and configuration
        EffectConfig, FullState, ParameterHost, RestoreSummary,
        // Error types
        ParameterError, ParameterResult,
        // Scalar types
        ParameterAddress, ParameterValue, NO_PRESET,
    };
}
