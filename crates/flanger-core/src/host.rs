//! Host-facing parameter surface.
//!
//! [`ParameterHost`] owns everything one effect instance needs on the control
//! side: catalog, store, preset bank, formatter, preset indicator and an
//! optional editor. Host shells call into it for parameter listing, factory
//! presets, automation and session persistence; the render context only ever
//! sees the [`ParameterReader`] returned by [`ParameterHost::reader`].
//!
//! # State format
//!
//! Full state is keyed by parameter identifier, never by address, so a
//! session saved with one catalog ordering restores correctly into another.
//! [`ParameterHost::save_state`] wraps it in a versioned JSON object:
//!
//! ```text
//! {"version":1,"parameters":{"delay":8.3,"depth":100.0,...}}
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::ParameterCatalog;
use crate::config::EffectConfig;
use crate::editor::{ControlChange, EditorBinding};
use crate::engine::{EngineAddresses, EngineConfig, ParameterReader};
use crate::error::{ParameterError, ParameterResult};
use crate::parameter_format::ValueFormatter;
use crate::parameter_info::ParameterDefinition;
use crate::parameter_store::ParameterStore;
use crate::preset::{NoEditor, PresetBank, PresetDefinition, PresetIndicator};
use crate::types::{ControlHandle, ParameterAddress, ParameterValue};

/// Current format version written by [`ParameterHost::save_state`].
pub const STATE_VERSION: u32 = 1;

/// Session state: identifier to plain value.
pub type FullState = BTreeMap<String, ParameterValue>;

/// What a state restore did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreSummary {
    /// Entries written to the store.
    pub applied: usize,
    /// Keys with no matching identifier in the catalog.
    pub ignored: Vec<String>,
    /// Catalog identifiers absent from the state; they kept their value.
    pub missing: Vec<&'static str>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StateBlob {
    version: u32,
    parameters: FullState,
}

/// Control-context owner of one effect instance's parameters.
pub struct ParameterHost {
    config: EffectConfig,
    catalog: Arc<ParameterCatalog>,
    store: Arc<ParameterStore>,
    bank: PresetBank,
    formatter: ValueFormatter,
    indicator: Arc<PresetIndicator>,
    editor: Option<EditorBinding>,
}

impl ParameterHost {
    /// Build the parameter layer described by `config` and apply its initial
    /// factory preset.
    pub fn new(config: &EffectConfig) -> ParameterResult<Self> {
        let catalog = Arc::new(config.catalog.catalog()?);
        let bank = PresetBank::from_table(catalog.clone(), config.presets)?;
        let store = Arc::new(ParameterStore::new(catalog.clone()));
        let formatter = ValueFormatter::new(&catalog);

        let mut host = Self {
            config: config.clone(),
            catalog,
            store,
            bank,
            formatter,
            indicator: Arc::new(PresetIndicator::new()),
            editor: None,
        };
        host.apply_factory_preset(config.initial_preset)?;

        log::info!(
            "{} {} ({}): {} parameters, {} factory presets",
            config.name,
            config.version,
            config.vendor,
            host.catalog.len(),
            host.bank.len()
        );
        Ok(host)
    }

    pub fn config(&self) -> &EffectConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Arc<ParameterCatalog> {
        &self.catalog
    }

    pub fn store(&self) -> &Arc<ParameterStore> {
        &self.store
    }

    pub fn formatter(&self) -> &ValueFormatter {
        &self.formatter
    }

    pub fn indicator(&self) -> &Arc<PresetIndicator> {
        &self.indicator
    }

    // =========================================================================
    // Parameters
    // =========================================================================

    /// Definitions in address order, for host automation UI.
    pub fn list_parameters(&self) -> &[ParameterDefinition] {
        self.catalog.all_definitions()
    }

    /// Current value at `address`.
    pub fn value(&self, address: ParameterAddress) -> ParameterResult<ParameterValue> {
        self.store.try_read(address)
    }

    /// Display text for `value` at `address` (host value-string callback).
    pub fn format_value(
        &self,
        address: ParameterAddress,
        value: ParameterValue,
    ) -> ParameterResult<String> {
        self.formatter.format(address, value)
    }

    /// Normalized value for host automation.
    pub fn get_normalized(&self, address: ParameterAddress) -> ParameterResult<ParameterValue> {
        self.store.get_normalized(address)
    }

    /// Apply a normalized automation value. Attached controls follow; this
    /// is not a user edit.
    pub fn set_normalized(
        &mut self,
        address: ParameterAddress,
        normalized: ParameterValue,
    ) -> ParameterResult<ParameterValue> {
        let value = self.store.set_normalized(address, normalized)?;
        if let Some(editor) = self.editor.as_mut() {
            editor.refresh_from_store(address)?;
        }
        Ok(value)
    }

    // =========================================================================
    // Factory presets
    // =========================================================================

    /// `(number, name)` of every factory preset.
    pub fn list_factory_presets(&self) -> Vec<(usize, &str)> {
        self.bank
            .factory_presets()
            .iter()
            .enumerate()
            .map(|(number, preset)| (number, preset.name.as_str()))
            .collect()
    }

    pub fn factory_preset(&self, number: usize) -> Option<&PresetDefinition> {
        self.bank.get(number)
    }

    /// Apply factory preset `number`; negative numbers are a no-op.
    pub fn apply_factory_preset(&mut self, number: i32) -> ParameterResult<()> {
        let applied = match self.editor.as_mut() {
            Some(editor) => self.bank.apply(number, &self.store, editor)?,
            None => self.bank.apply(number, &self.store, &mut NoEditor)?,
        };
        if applied.is_some() {
            if let Ok(index) = usize::try_from(number) {
                self.indicator.set(index);
            }
        }
        Ok(())
    }

    /// Factory preset the store currently reproduces, if any.
    pub fn current_preset(&self) -> Option<usize> {
        self.indicator.current()
    }

    /// Current preset number as hosts report it, `-1` for none.
    pub fn current_preset_number(&self) -> i32 {
        self.indicator.raw()
    }

    /// Return every parameter to its catalog default.
    ///
    /// Afterwards no factory preset is current. Attached controls are
    /// refreshed; divergence state is left alone.
    pub fn reset_to_defaults(&mut self) {
        self.store.reset_to_defaults();
        self.indicator.clear();
        if let Some(editor) = self.editor.as_mut() {
            editor.refresh_all();
        }
        log::info!("reset {} parameters to defaults", self.catalog.len());
    }

    // =========================================================================
    // Session state
    // =========================================================================

    /// Every current value keyed by identifier.
    pub fn get_full_state(&self) -> FullState {
        self.catalog
            .all_definitions()
            .iter()
            .map(|definition| {
                (
                    definition.identifier.to_string(),
                    self.store.read(definition.address),
                )
            })
            .collect()
    }

    /// Restore values by identifier.
    ///
    /// Unknown keys are ignored; identifiers not in `state` keep their
    /// current value. Values are clamped like any write. The restore is not
    /// a user edit, and afterwards no factory preset is current.
    pub fn set_full_state(&mut self, state: &FullState) -> RestoreSummary {
        let mut summary = RestoreSummary::default();

        for (key, &value) in state {
            match self.catalog.address_of(key) {
                Some(address) => {
                    if self.store.write(address, value).is_ok() {
                        summary.applied += 1;
                    }
                }
                None => {
                    log::warn!("ignoring unknown parameter '{}' in saved state", key);
                    summary.ignored.push(key.clone());
                }
            }
        }
        summary.missing = self
            .catalog
            .all_definitions()
            .iter()
            .filter(|definition| !state.contains_key(definition.identifier))
            .map(|definition| definition.identifier)
            .collect();

        self.indicator.clear();
        if let Some(editor) = self.editor.as_mut() {
            editor.refresh_all();
        }

        if summary.missing.is_empty() {
            log::info!("restored {} parameters", summary.applied);
        } else {
            log::info!(
                "restored {} parameters; kept current value for [{}]",
                summary.applied,
                summary.missing.join(", ")
            );
        }
        summary
    }

    /// Encode the full state as a versioned JSON blob.
    pub fn save_state(&self) -> ParameterResult<Vec<u8>> {
        let blob = StateBlob {
            version: STATE_VERSION,
            parameters: self.get_full_state(),
        };
        Ok(serde_json::to_vec(&blob)?)
    }

    /// Decode and restore a blob written by [`save_state`](Self::save_state).
    ///
    /// Nothing changes if the blob cannot be decoded.
    pub fn load_state(&mut self, data: &[u8]) -> ParameterResult<RestoreSummary> {
        let blob: StateBlob = serde_json::from_slice(data)?;
        if blob.version != STATE_VERSION {
            return Err(ParameterError::UnsupportedStateVersion(blob.version));
        }
        Ok(self.set_full_state(&blob.parameters))
    }

    // =========================================================================
    // Editor
    // =========================================================================

    /// Create an editor binding for this instance, replacing any previous one.
    ///
    /// While a factory preset is current the new binding measures divergence
    /// against that preset's values, so automation received before the editor
    /// opened does not count as an edit.
    pub fn attach_editor(&mut self) -> &mut EditorBinding {
        if self.editor.is_some() {
            log::debug!("replacing attached editor");
        }
        let mut editor = EditorBinding::new(
            self.store.clone(),
            self.formatter.clone(),
            self.indicator.clone(),
        );
        if let Some(preset) = self.indicator.current().and_then(|n| self.bank.get(n)) {
            editor.rebaseline(&preset.values);
        }
        self.editor.insert(editor)
    }

    /// Drop the editor binding, returning it.
    pub fn detach_editor(&mut self) -> Option<EditorBinding> {
        self.editor.take()
    }

    pub fn editor_mut(&mut self) -> Option<&mut EditorBinding> {
        self.editor.as_mut()
    }

    /// Forward a user edit to the editor. `None` without an editor.
    pub fn control_changed(
        &mut self,
        handle: ControlHandle,
        raw: ParameterValue,
    ) -> Option<ControlChange> {
        self.editor.as_mut()?.control_changed(handle, raw)
    }

    /// Forward typed text to the editor. `None` without an editor.
    pub fn text_entered(&mut self, handle: ControlHandle, text: &str) -> Option<ControlChange> {
        self.editor.as_mut()?.text_entered(handle, text)
    }

    // =========================================================================
    // Engine
    // =========================================================================

    /// Read-only handle for the render context.
    pub fn reader(&self) -> ParameterReader {
        ParameterReader::new(self.store.clone())
    }

    /// Values to construct the audio engine with.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::from_catalog(&self.catalog, self.config.lfo_count)
    }

    /// The engine's address table checked against this catalog.
    pub fn engine_addresses(&self) -> ParameterResult<EngineAddresses> {
        EngineAddresses::resolve(&self.catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::revisions::{ids, CatalogRevision, PresetTable};

    fn host() -> ParameterHost {
        ParameterHost::new(&EffectConfig::new("Test")).unwrap()
    }

    #[test]
    fn test_starts_on_first_preset() {
        let host = host();
        assert_eq!(host.current_preset(), Some(0));
        assert_eq!(host.store().snapshot(), vec![1.68, 8.3, 100.0, 50.0, 100.0, 0.0]);
    }

    #[test]
    fn test_no_initial_preset() {
        let config = EffectConfig::new("Test").with_initial_preset(-1);
        let host = ParameterHost::new(&config).unwrap();
        assert_eq!(host.current_preset(), None);
        assert_eq!(host.store().snapshot(), vec![0.64, 1.1, 50.0, 50.0, 50.0, 0.0]);
    }

    #[test]
    fn test_invalid_initial_preset() {
        let config = EffectConfig::new("Test").with_initial_preset(6);
        assert!(matches!(
            ParameterHost::new(&config),
            Err(ParameterError::InvalidPresetIndex { index: 6, count: 6 })
        ));
    }

    #[test]
    fn test_list_factory_presets() {
        let host = host();
        let presets = host.list_factory_presets();
        assert_eq!(presets.len(), 6);
        assert_eq!(presets[0], (0, "Cadet"));
        assert_eq!(presets[5], (5, "Disturbed"));
    }

    #[test]
    fn test_apply_factory_preset() {
        let mut host = host();
        host.apply_factory_preset(3).unwrap();
        assert_eq!(host.current_preset(), Some(3));

        host.apply_factory_preset(-1).unwrap();
        assert_eq!(host.current_preset(), Some(3));

        assert!(host.apply_factory_preset(9).is_err());
        assert_eq!(host.current_preset(), Some(3));
    }

    #[test]
    fn test_full_state_keys_are_identifiers() {
        let host = host();
        let state = host.get_full_state();
        assert_eq!(state.len(), 6);
        assert_eq!(state["rate"], 1.68);
        assert_eq!(state["delay"], 8.3);
    }

    #[test]
    fn test_set_full_state_partial_and_unknown() {
        let mut host = host();
        let mut state = FullState::new();
        state.insert("depth".to_string(), 12.0);
        state.insert("feedback".to_string(), 0.3);

        let summary = host.set_full_state(&state);
        assert_eq!(summary.applied, 1);
        assert_eq!(summary.ignored, vec!["feedback".to_string()]);
        assert_eq!(summary.missing, vec!["rate", "delay", "dry", "wet", "odd90"]);
        assert_eq!(host.current_preset(), None);

        let depth = host.catalog().address_of(ids::DEPTH).unwrap();
        assert_eq!(host.value(depth).unwrap(), 12.0);
        let rate = host.catalog().address_of(ids::RATE).unwrap();
        assert_eq!(host.value(rate).unwrap(), 1.68);
    }

    #[test]
    fn test_save_load_round_trip() {
        let mut host = host();
        host.apply_factory_preset(4).unwrap();
        let blob = host.save_state().unwrap();

        let config = EffectConfig::new("Test")
            .with_catalog(CatalogRevision::DepthBeforeDelay)
            .with_presets(PresetTable::Subtle);
        let mut other = ParameterHost::new(&config).unwrap();
        let summary = other.load_state(&blob).unwrap();
        assert_eq!(summary.applied, 6);
        assert_eq!(other.get_full_state(), host.get_full_state());
    }

    #[test]
    fn test_load_state_rejects_bad_input() {
        let mut host = host();
        let before = host.get_full_state();

        assert!(matches!(
            host.load_state(b"not json"),
            Err(ParameterError::State(_))
        ));
        assert!(matches!(
            host.load_state(br#"{"version":7,"parameters":{"rate":2.0}}"#),
            Err(ParameterError::UnsupportedStateVersion(7))
        ));
        assert_eq!(host.get_full_state(), before);
        assert_eq!(host.current_preset(), Some(0));
    }

    #[test]
    fn test_normalized_automation() {
        let mut host = host();
        let wet = host.catalog().address_of(ids::WET).unwrap();
        assert_eq!(host.set_normalized(wet, 0.5).unwrap(), 50.0);
        assert_eq!(host.get_normalized(wet).unwrap(), 0.5);
        assert_eq!(host.current_preset(), Some(0));
    }

    #[test]
    fn test_control_changed_without_editor() {
        let mut host = host();
        assert!(host.control_changed(ControlHandle(1), 2.0).is_none());
    }

    #[test]
    fn test_engine_boundary() {
        let host = host();
        let config = host.engine_config();
        assert_eq!(config.max_delay_ms, 10.0);
        assert_eq!(config.lfo_count, 1);

        let addresses = host.engine_addresses().unwrap();
        assert_eq!(host.reader().read(addresses.rate), 1.68);
    }

    #[test]
    fn test_format_value() {
        let host = host();
        assert_eq!(host.format_value(1, 8.3).unwrap(), "8.30 ms");
    }

    struct Knob;

    impl crate::editor::BoundControl for Knob {
        fn set_value(&mut self, _value: ParameterValue) {}

        fn set_label(&mut self, _text: &str) {}
    }

    #[test]
    fn test_editor_attached_after_automation_keeps_preset_baseline() {
        let mut host = host();
        let rate = host.catalog().address_of(ids::RATE).unwrap();
        host.set_normalized(rate, 1.0).unwrap();
        assert_eq!(host.value(rate).unwrap(), 8.0);

        host.attach_editor()
            .bind(ControlHandle(1), rate, Box::new(Knob))
            .unwrap();
        let change = host.control_changed(ControlHandle(1), 1.68).unwrap();
        assert_eq!(change.state, crate::editor::SyncState::Synced);
        assert!(!change.cleared_preset);
        assert_eq!(host.current_preset(), Some(0));

        let change = host.control_changed(ControlHandle(1), 3.0).unwrap();
        assert_eq!(change.state, crate::editor::SyncState::Diverged);
        assert!(change.cleared_preset);
        assert_eq!(host.current_preset(), None);
    }

    #[test]
    fn test_editor_attached_without_preset_uses_store() {
        let config = EffectConfig::new("Test").with_initial_preset(-1);
        let mut host = ParameterHost::new(&config).unwrap();
        let rate = host.catalog().address_of(ids::RATE).unwrap();

        host.attach_editor()
            .bind(ControlHandle(1), rate, Box::new(Knob))
            .unwrap();
        let change = host.control_changed(ControlHandle(1), 0.64).unwrap();
        assert_eq!(change.state, crate::editor::SyncState::Synced);
        assert!(!change.cleared_preset);
    }

    #[test]
    fn test_reset_to_defaults() {
        let mut host = host();
        host.attach_editor();
        host.reset_to_defaults();
        assert_eq!(host.store().snapshot(), vec![0.64, 1.1, 50.0, 50.0, 50.0, 0.0]);
        assert_eq!(host.current_preset(), None);
        assert_eq!(host.current_preset_number(), -1);
    }

    #[test]
    fn test_current_preset_number() {
        let mut host = host();
        assert_eq!(host.current_preset_number(), 0);
        host.apply_factory_preset(5).unwrap();
        assert_eq!(host.current_preset_number(), 5);

        let state = host.get_full_state();
        host.set_full_state(&state);
        assert_eq!(host.current_preset_number(), crate::types::NO_PRESET);
    }
}
