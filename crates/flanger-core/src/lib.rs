//! # flanger-core
//!
//! Real-time parameter layer for a modulated-delay (flanger/chorus) effect.
//!
//! The audio engine reads parameter values on a real-time thread while the UI
//! and host change them on a control thread. This crate keeps both sides
//! consistent without ever blocking the render thread: values live in a
//! fixed array of atomic slots and the render path only performs relaxed
//! loads.
//!
//! ## Components
//!
//! - [`ParameterCatalog`] - immutable, address-ordered parameter definitions
//! - [`ParameterStore`] - one atomic value slot per address
//! - [`PresetBank`] - factory presets applied as complete bundles
//! - [`ValueFormatter`] - pure `(address, value) -> text` formatting and parsing
//! - [`EditorBinding`] - controls to store mediation with divergence tracking
//! - [`ParameterHost`] - host-facing surface (presets, automation, session state)
//!
//! ## Data flow
//!
//! ```text
//! UI controls -> EditorBinding -> ParameterStore -> ParameterReader -> audio engine
//! Host        -> PresetBank    -> ParameterStore -> EditorBinding (refresh) -> ValueFormatter
//! ```
//!
//! ## Example
//!
//! ```
//! use flanger_core::{EffectConfig, ParameterHost};
//!
//! let mut host = ParameterHost::new(&EffectConfig::new("Flanger")).unwrap();
//! let reader = host.reader(); // moved to the render thread
//!
//! host.apply_factory_preset(2).unwrap();
//! let rate = host.catalog().address_of("rate").unwrap();
//! assert_eq!(reader.read(rate), 5.1);
//! ```

pub mod catalog;
pub mod config;
pub mod editor;
pub mod engine;
pub mod error;
pub mod host;
pub mod parameter_format;
pub mod parameter_info;
pub mod parameter_range;
pub mod parameter_store;
pub mod preset;
pub mod revisions;
pub mod types;

// Re-exports for convenience
pub use catalog::ParameterCatalog;
pub use config::EffectConfig;
pub use editor::{BoundControl, ControlChange, EditorBinding, SyncState};
pub use engine::{BlockParameters, EngineAddresses, EngineConfig, ParameterReader, ParameterSource};
pub use error::{ParameterError, ParameterResult};
pub use host::{FullState, ParameterHost, RestoreSummary, STATE_VERSION};
pub use parameter_format::{FormatRule, ValueFormatter};
pub use parameter_info::{BooleanStyle, ParameterDefinition, ParameterKind, ParameterUnit, UnitSeparator};
pub use parameter_range::ValueRange;
pub use parameter_store::{ParameterBundle, ParameterStore};
pub use preset::{NoEditor, PresetBank, PresetDefinition, PresetIndicator, PresetListener};
pub use revisions::{ids, CatalogRevision, FactoryPreset, PresetTable, MAX_DELAY_MS};
pub use types::{ControlHandle, ParameterAddress, ParameterValue, NO_PRESET};
