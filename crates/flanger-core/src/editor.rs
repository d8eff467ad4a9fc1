//! Mediation between interactive controls and the parameter store.
//!
//! An [`EditorBinding`] keeps an explicit one-to-many index from each address
//! to the controls that display it (several controls may share an address,
//! e.g. a primary knob and an alternate-layout knob). User edits go through
//! [`EditorBinding::control_changed`], which writes the store, keeps every
//! control for that address numerically identical, refreshes the labels and
//! tracks divergence from the last applied preset.
//!
//! # Divergence
//!
//! Each address starts [`SyncState::Synced`] against a baseline: the value
//! of the last applied preset, or the store value when the binding was
//! created with no preset known. The first user edit whose clamped value
//! differs from the baseline moves the address to [`SyncState::Diverged`].
//! Only a new preset application (or [`EditorBinding::rebaseline`]) moves it
//! back.
//!
//! The first divergence after a preset application clears the host-facing
//! [`PresetIndicator`]. Later edits in the same episode do not clear it
//! again.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{ParameterError, ParameterResult};
use crate::parameter_format::ValueFormatter;
use crate::parameter_store::{ParameterBundle, ParameterStore};
use crate::preset::{PresetDefinition, PresetIndicator, PresetListener};
use crate::types::{ControlHandle, ParameterAddress, ParameterValue};

/// An interactive control driven by the binding.
///
/// Ranged controls (knobs, sliders) and two-state controls (switches) both
/// implement this; a switch treats any value `>= 0.5` as on.
pub trait BoundControl: Send {
    /// Show `value` without reporting it back as a user edit.
    fn set_value(&mut self, value: ParameterValue);

    /// Show the formatted value text.
    fn set_label(&mut self, text: &str);
}

/// Divergence state of one address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// Value still matches the last applied preset.
    Synced,
    /// A user edit moved the value away from the last applied preset.
    Diverged,
}

/// Outcome of a user edit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlChange {
    pub address: ParameterAddress,
    /// Value actually stored, after clamping.
    pub value: ParameterValue,
    /// State of `address` after the edit.
    pub state: SyncState,
    /// Whether this edit cleared a factory preset from the indicator. Only
    /// the edit that opens a divergence episode can do so.
    pub cleared_preset: bool,
}

struct AddressBinding {
    controls: Vec<(ControlHandle, Box<dyn BoundControl>)>,
    baseline: ParameterValue,
    state: SyncState,
}

/// Binds controls to store addresses and tracks divergence.
pub struct EditorBinding {
    store: Arc<ParameterStore>,
    formatter: ValueFormatter,
    indicator: Arc<PresetIndicator>,
    bindings: Vec<AddressBinding>,
    handles: HashMap<ControlHandle, ParameterAddress>,
    diverged: bool,
    label: String,
}

impl EditorBinding {
    pub fn new(
        store: Arc<ParameterStore>,
        formatter: ValueFormatter,
        indicator: Arc<PresetIndicator>,
    ) -> Self {
        let bindings = (0..store.len() as ParameterAddress)
            .map(|address| AddressBinding {
                controls: Vec::new(),
                baseline: store.read(address),
                state: SyncState::Synced,
            })
            .collect();
        Self {
            store,
            formatter,
            indicator,
            bindings,
            handles: HashMap::new(),
            diverged: false,
            label: String::with_capacity(32),
        }
    }

    /// Register `control` under `handle` for `address`.
    ///
    /// The control immediately receives the current value and label.
    /// Divergence state and baseline are not touched.
    pub fn bind(
        &mut self,
        handle: ControlHandle,
        address: ParameterAddress,
        mut control: Box<dyn BoundControl>,
    ) -> ParameterResult<()> {
        self.store.catalog().definition_for(address)?;
        if self.handles.contains_key(&handle) {
            return Err(ParameterError::DuplicateControl(handle));
        }

        let value = self.store.read(address);
        self.label.clear();
        // Writing into a String cannot fail
        let _ = self.formatter.rule(address)?.write(&mut self.label, value);
        control.set_value(value);
        control.set_label(&self.label);

        self.bindings[address as usize].controls.push((handle, control));
        self.handles.insert(handle, address);
        log::debug!("bound control {} to address {}", handle, address);
        Ok(())
    }

    /// Reset every address to `Synced` against `values` and close the
    /// divergence episode.
    ///
    /// Addresses missing from `values` take the current store value.
    pub fn rebaseline(&mut self, values: &ParameterBundle) {
        for (address, binding) in self.bindings.iter_mut().enumerate() {
            let address = address as ParameterAddress;
            binding.baseline = match values.get(&address) {
                Some(&value) => value,
                None => self.store.read(address),
            };
            binding.state = SyncState::Synced;
        }
        self.diverged = false;
    }

    /// Remove a control; returns it if it was bound.
    pub fn unbind(&mut self, handle: ControlHandle) -> Option<Box<dyn BoundControl>> {
        let address = self.handles.remove(&handle)?;
        let controls = &mut self.bindings[address as usize].controls;
        let position = controls.iter().position(|(h, _)| *h == handle)?;
        Some(controls.remove(position).1)
    }

    /// Address a control is bound to.
    pub fn address_of(&self, handle: ControlHandle) -> Option<ParameterAddress> {
        self.handles.get(&handle).copied()
    }

    /// Handles bound to `address`, in binding order.
    pub fn controls_for(&self, address: ParameterAddress) -> Vec<ControlHandle> {
        self.bindings
            .get(address as usize)
            .map(|binding| binding.controls.iter().map(|(h, _)| *h).collect())
            .unwrap_or_default()
    }

    /// Divergence state of `address`.
    pub fn state(&self, address: ParameterAddress) -> Option<SyncState> {
        self.bindings.get(address as usize).map(|binding| binding.state)
    }

    /// Whether any address diverged since the last preset application.
    pub fn is_diverged(&self) -> bool {
        self.diverged
    }

    /// Handle a user-originated value change from `handle`.
    ///
    /// Returns `None` (and does nothing) for a handle that is not bound,
    /// which is normal while the UI is still being built.
    pub fn control_changed(
        &mut self,
        handle: ControlHandle,
        raw: ParameterValue,
    ) -> Option<ControlChange> {
        let address = *self.handles.get(&handle)?;
        let value = self.store.write(address, raw).ok()?;

        self.label.clear();
        let _ = self.formatter.rule(address).ok()?.write(&mut self.label, value);

        let binding = &mut self.bindings[address as usize];
        for (bound, control) in binding.controls.iter_mut() {
            // The source control already shows `raw`; correct it only if clamped
            if *bound != handle || value != raw {
                control.set_value(value);
            }
            control.set_label(&self.label);
        }

        let mut cleared_preset = false;
        if binding.state == SyncState::Synced && value != binding.baseline {
            binding.state = SyncState::Diverged;
            if !self.diverged {
                self.diverged = true;
                cleared_preset = self.indicator.clear_if_factory();
                if cleared_preset {
                    log::debug!(
                        "address {} diverged from preset; current preset cleared",
                        address
                    );
                }
            }
        }

        Some(ControlChange {
            address,
            value,
            state: binding.state,
            cleared_preset,
        })
    }

    /// Parse typed text for the control's address and apply it as an edit.
    ///
    /// Unparsable text is ignored.
    pub fn text_entered(&mut self, handle: ControlHandle, text: &str) -> Option<ControlChange> {
        let address = *self.handles.get(&handle)?;
        let value = self.formatter.parse(address, text)?;
        self.control_changed(handle, value)
    }

    /// Push the store's value for `address` to its controls and label.
    ///
    /// Not a user edit: divergence state is left untouched.
    pub fn refresh_from_store(&mut self, address: ParameterAddress) -> ParameterResult<()> {
        let rule = *self.formatter.rule(address)?;
        let binding = &mut self.bindings[address as usize];
        if binding.controls.is_empty() {
            return Ok(());
        }

        let value = self.store.read(address);
        self.label.clear();
        let _ = rule.write(&mut self.label, value);
        for (_, control) in binding.controls.iter_mut() {
            control.set_value(value);
            control.set_label(&self.label);
        }
        Ok(())
    }

    /// Refresh every address.
    pub fn refresh_all(&mut self) {
        for address in 0..self.bindings.len() as ParameterAddress {
            // Addresses come from the binding table, which matches the catalog
            let _ = self.refresh_from_store(address);
        }
    }
}

impl PresetListener for EditorBinding {
    fn preset_applied(&mut self, number: usize, preset: &PresetDefinition) {
        self.rebaseline(&preset.values);
        self.refresh_all();
        log::debug!("editor synced to preset {} '{}'", number, preset.name);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::preset::PresetBank;
    use crate::revisions::{ids, CatalogRevision, PresetTable};

    #[derive(Debug, Default)]
    struct Shown {
        values: Vec<f64>,
        labels: Vec<String>,
    }

    struct Recording(Arc<Mutex<Shown>>);

    impl BoundControl for Recording {
        fn set_value(&mut self, value: f64) {
            self.0.lock().unwrap().values.push(value);
        }

        fn set_label(&mut self, text: &str) {
            self.0.lock().unwrap().labels.push(text.to_string());
        }
    }

    fn recording_control() -> (Box<dyn BoundControl>, Arc<Mutex<Shown>>) {
        let shown = Arc::new(Mutex::new(Shown::default()));
        (Box::new(Recording(shown.clone())), shown)
    }

    struct Fixture {
        bank: PresetBank,
        store: Arc<ParameterStore>,
        indicator: Arc<PresetIndicator>,
        editor: EditorBinding,
    }

    fn fixture() -> Fixture {
        let catalog = Arc::new(CatalogRevision::DelayBeforeDepth.catalog().unwrap());
        let bank = PresetBank::from_table(catalog.clone(), PresetTable::Intense).unwrap();
        let store = Arc::new(ParameterStore::new(catalog.clone()));
        let indicator = Arc::new(PresetIndicator::new());
        let editor = EditorBinding::new(
            store.clone(),
            ValueFormatter::new(&catalog),
            indicator.clone(),
        );
        Fixture {
            bank,
            store,
            indicator,
            editor,
        }
    }

    fn apply(f: &mut Fixture, number: usize) {
        f.bank.apply(number as i32, &f.store, &mut f.editor).unwrap();
        f.indicator.set(number);
    }

    #[test]
    fn test_bind_pushes_current_value() {
        let mut f = fixture();
        let (knob, shown) = recording_control();
        f.editor.bind(ControlHandle(1), 0, knob).unwrap();
        let shown = shown.lock().unwrap();
        assert_eq!(shown.values, vec![0.64]);
        assert_eq!(shown.labels, vec!["0.64 Hz".to_string()]);
    }

    #[test]
    fn test_bind_errors() {
        let mut f = fixture();
        let (knob, _) = recording_control();
        assert!(matches!(
            f.editor.bind(ControlHandle(1), 6, knob),
            Err(ParameterError::InvalidAddress { address: 6, .. })
        ));

        let (first, _) = recording_control();
        let (second, _) = recording_control();
        f.editor.bind(ControlHandle(2), 0, first).unwrap();
        assert!(matches!(
            f.editor.bind(ControlHandle(2), 1, second),
            Err(ParameterError::DuplicateControl(ControlHandle(2)))
        ));
    }

    #[test]
    fn test_unbound_handle_is_noop() {
        let mut f = fixture();
        let before = f.store.snapshot();
        assert!(f.editor.control_changed(ControlHandle(99), 3.0).is_none());
        assert_eq!(f.store.snapshot(), before);
    }

    #[test]
    fn test_paired_controls_stay_identical() {
        let mut f = fixture();
        let (primary, primary_shown) = recording_control();
        let (alternate, alternate_shown) = recording_control();
        f.editor.bind(ControlHandle(1), 0, primary).unwrap();
        f.editor.bind(ControlHandle(2), 0, alternate).unwrap();
        assert_eq!(f.editor.controls_for(0), vec![ControlHandle(1), ControlHandle(2)]);

        f.editor.control_changed(ControlHandle(1), 2.5).unwrap();

        let primary = primary_shown.lock().unwrap();
        let alternate = alternate_shown.lock().unwrap();
        // Source control is not echoed an unclamped value
        assert_eq!(primary.values, vec![0.64]);
        assert_eq!(alternate.values, vec![0.64, 2.5]);
        assert_eq!(primary.labels.last().unwrap(), "2.50 Hz");
        assert_eq!(alternate.labels.last().unwrap(), "2.50 Hz");
    }

    #[test]
    fn test_clamped_edit_corrects_source() {
        let mut f = fixture();
        let (knob, shown) = recording_control();
        f.editor.bind(ControlHandle(1), 0, knob).unwrap();

        let change = f.editor.control_changed(ControlHandle(1), 12.0).unwrap();
        assert_eq!(change.value, 8.0);
        assert_eq!(shown.lock().unwrap().values.last(), Some(&8.0));
        assert_eq!(f.store.read(0), 8.0);
    }

    #[test]
    fn test_divergence_clears_preset_once() {
        let mut f = fixture();
        let (rate, _) = recording_control();
        let (depth, _) = recording_control();
        f.editor.bind(ControlHandle(1), 0, rate).unwrap();
        f.editor.bind(ControlHandle(2), 2, depth).unwrap();
        apply(&mut f, 0);
        assert_eq!(f.indicator.current(), Some(0));

        let first = f.editor.control_changed(ControlHandle(1), 3.0).unwrap();
        assert_eq!(first.state, SyncState::Diverged);
        assert!(first.cleared_preset);
        assert_eq!(f.indicator.current(), None);

        // The host re-announces the preset number; the same episode must not clear it again
        f.indicator.set(0);
        let second = f.editor.control_changed(ControlHandle(2), 10.0).unwrap();
        assert_eq!(second.state, SyncState::Diverged);
        assert!(!second.cleared_preset);
        assert_eq!(f.indicator.current(), Some(0));
    }

    #[test]
    fn test_edit_to_preset_value_stays_synced() {
        let mut f = fixture();
        let (rate, _) = recording_control();
        f.editor.bind(ControlHandle(1), 0, rate).unwrap();
        apply(&mut f, 0);

        let change = f.editor.control_changed(ControlHandle(1), 1.68).unwrap();
        assert_eq!(change.state, SyncState::Synced);
        assert!(!change.cleared_preset);
        assert_eq!(f.indicator.current(), Some(0));
    }

    #[test]
    fn test_preset_apply_resets_episode() {
        let mut f = fixture();
        let (rate, shown) = recording_control();
        f.editor.bind(ControlHandle(1), 0, rate).unwrap();
        apply(&mut f, 0);
        f.editor.control_changed(ControlHandle(1), 3.0).unwrap();
        assert!(f.editor.is_diverged());

        apply(&mut f, 2);
        assert!(!f.editor.is_diverged());
        assert_eq!(f.editor.state(0), Some(SyncState::Synced));
        assert_eq!(shown.lock().unwrap().labels.last().unwrap(), "5.10 Hz");

        let change = f.editor.control_changed(ControlHandle(1), 1.0).unwrap();
        assert!(change.cleared_preset);
    }

    #[test]
    fn test_refresh_does_not_diverge() {
        let mut f = fixture();
        let (rate, shown) = recording_control();
        f.editor.bind(ControlHandle(1), 0, rate).unwrap();
        apply(&mut f, 0);

        f.store.write(0, 7.0).unwrap();
        f.editor.refresh_from_store(0).unwrap();
        f.editor.refresh_from_store(0).unwrap();
        assert_eq!(f.editor.state(0), Some(SyncState::Synced));
        assert_eq!(f.indicator.current(), Some(0));

        let shown = shown.lock().unwrap();
        let n = shown.labels.len();
        assert_eq!(shown.labels[n - 1], shown.labels[n - 2]);
        assert_eq!(shown.labels[n - 1], "7.00 Hz");
    }

    #[test]
    fn test_text_entry() {
        let mut f = fixture();
        let (odd90, shown) = recording_control();
        let address = f.store.catalog().address_of(ids::ODD90).unwrap();
        f.editor.bind(ControlHandle(7), address, odd90).unwrap();

        let change = f.editor.text_entered(ControlHandle(7), "on").unwrap();
        assert_eq!(change.value, 1.0);
        assert_eq!(shown.lock().unwrap().labels.last().unwrap(), "On");
        assert!(f.editor.text_entered(ControlHandle(7), "sideways").is_none());
        assert_eq!(f.store.read(address), 1.0);
    }

    #[test]
    fn test_unbind() {
        let mut f = fixture();
        let (knob, _) = recording_control();
        f.editor.bind(ControlHandle(1), 0, knob).unwrap();
        assert!(f.editor.unbind(ControlHandle(1)).is_some());
        assert!(f.editor.controls_for(0).is_empty());
        assert!(f.editor.control_changed(ControlHandle(1), 2.0).is_none());
    }

    #[test]
    fn test_rebaseline_to_preset_values() {
        let f = fixture();
        let cadet = f.bank.get(0).unwrap().values.clone();
        f.store.apply_bundle(&cadet).unwrap();
        f.indicator.set(0);
        // Automation moved the rate before the editor existed
        f.store.write(0, 8.0).unwrap();

        let mut editor = EditorBinding::new(
            f.store.clone(),
            ValueFormatter::new(f.store.catalog()),
            f.indicator.clone(),
        );
        editor.rebaseline(&cadet);
        let (knob, _) = recording_control();
        editor.bind(ControlHandle(1), 0, knob).unwrap();

        let change = editor.control_changed(ControlHandle(1), 1.68).unwrap();
        assert_eq!(change.state, SyncState::Synced);
        assert!(!change.cleared_preset);
        assert_eq!(f.indicator.current(), Some(0));
    }

    #[test]
    fn test_bind_keeps_baseline() {
        let mut f = fixture();
        apply(&mut f, 0);
        f.store.write(0, 5.0).unwrap();

        let (knob, _) = recording_control();
        f.editor.bind(ControlHandle(1), 0, knob).unwrap();
        let change = f.editor.control_changed(ControlHandle(1), 1.68).unwrap();
        assert_eq!(change.state, SyncState::Synced);
    }

    #[test]
    fn test_no_clear_reported_when_indicator_already_empty() {
        let mut f = fixture();
        let (rate, _) = recording_control();
        f.editor.bind(ControlHandle(1), 0, rate).unwrap();
        apply(&mut f, 0);
        f.indicator.clear();

        let change = f.editor.control_changed(ControlHandle(1), 3.0).unwrap();
        assert_eq!(change.state, SyncState::Diverged);
        assert!(!change.cleared_preset);
        assert!(f.editor.is_diverged());
    }
}
