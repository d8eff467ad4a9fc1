//! Factory presets and the host-facing "current preset" indicator.
//!
//! A [`PresetBank`] holds complete, in-range value bundles built once from a
//! preset table. Applying a preset writes the whole bundle to the
//! [`ParameterStore`] and then notifies a [`PresetListener`] (normally the
//! editor binding) so it can re-baseline its divergence tracking.

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

use crate::catalog::ParameterCatalog;
use crate::error::{ParameterError, ParameterResult};
use crate::parameter_store::{ParameterBundle, ParameterStore};
use crate::revisions::{FactoryPreset, PresetTable};
use crate::types::NO_PRESET;

/// A named, complete assignment of values to every catalog address.
#[derive(Debug, Clone, PartialEq)]
pub struct PresetDefinition {
    pub name: String,
    pub values: ParameterBundle,
}

/// Receives a notification after a preset bundle has been written.
pub trait PresetListener {
    /// Called once per successful apply, after every store write.
    fn preset_applied(&mut self, number: usize, preset: &PresetDefinition);
}

/// Listener for instances without an attached editor.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoEditor;

impl PresetListener for NoEditor {
    fn preset_applied(&mut self, _number: usize, _preset: &PresetDefinition) {}
}

/// Host-visible current preset number; `-1` means user state.
#[derive(Debug)]
pub struct PresetIndicator(AtomicI32);

impl PresetIndicator {
    pub fn new() -> Self {
        Self(AtomicI32::new(NO_PRESET))
    }

    pub fn set(&self, number: usize) {
        let number = i32::try_from(number).unwrap_or(NO_PRESET);
        self.0.store(number, Ordering::Release);
    }

    pub fn clear(&self) {
        self.0.store(NO_PRESET, Ordering::Release);
    }

    /// Current factory preset, if any.
    pub fn current(&self) -> Option<usize> {
        usize::try_from(self.0.load(Ordering::Acquire)).ok()
    }

    /// Raw host value (`-1` for none).
    pub fn raw(&self) -> i32 {
        self.0.load(Ordering::Acquire)
    }

    /// Clear the indicator if it names a factory preset.
    ///
    /// Returns `true` if a factory preset was cleared.
    pub fn clear_if_factory(&self) -> bool {
        self.0.swap(NO_PRESET, Ordering::AcqRel) >= 0
    }
}

impl Default for PresetIndicator {
    fn default() -> Self {
        Self::new()
    }
}

/// Ordered factory presets; the index is the host preset number.
#[derive(Debug, Clone)]
pub struct PresetBank {
    catalog: Arc<ParameterCatalog>,
    presets: Vec<PresetDefinition>,
}

impl PresetBank {
    /// Build a bank from address-keyed presets.
    ///
    /// Every preset must cover every catalog address. Values outside a
    /// parameter's range are clamped here, once, with a warning.
    pub fn new(
        catalog: Arc<ParameterCatalog>,
        presets: Vec<PresetDefinition>,
    ) -> ParameterResult<Self> {
        let mut checked = Vec::with_capacity(presets.len());
        for mut preset in presets {
            if let Some((&address, _)) = preset
                .values
                .range(catalog.len() as u32..)
                .next()
            {
                return Err(ParameterError::InvalidAddress {
                    address,
                    count: catalog.len(),
                });
            }

            for definition in catalog.all_definitions() {
                let Some(value) = preset.values.get_mut(&definition.address) else {
                    return Err(ParameterError::IncompletePreset {
                        address: definition.address,
                        identifier: definition.identifier,
                    });
                };
                let clamped = definition.clamp(*value);
                if clamped != *value {
                    log::warn!(
                        "preset '{}': {} = {} is outside [{}, {}], stored as {}",
                        preset.name,
                        definition.identifier,
                        value,
                        definition.range.min,
                        definition.range.max,
                        clamped
                    );
                    *value = clamped;
                }
            }
            checked.push(preset);
        }

        log::debug!("preset bank built with {} presets", checked.len());
        Ok(Self {
            catalog,
            presets: checked,
        })
    }

    /// Build a bank from one of the identifier-keyed factory tables.
    pub fn from_table(catalog: Arc<ParameterCatalog>, table: PresetTable) -> ParameterResult<Self> {
        let presets = table
            .presets()
            .iter()
            .map(|preset| resolve(&catalog, preset))
            .collect::<ParameterResult<Vec<_>>>()?;
        Self::new(catalog, presets)
    }

    pub fn catalog(&self) -> &Arc<ParameterCatalog> {
        &self.catalog
    }

    /// All presets in host order.
    pub fn factory_presets(&self) -> &[PresetDefinition] {
        &self.presets
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    pub fn get(&self, number: usize) -> Option<&PresetDefinition> {
        self.presets.get(number)
    }

    /// Write preset `number` to `store` and notify `listener`.
    ///
    /// A negative number means "user state" and is a no-op returning
    /// `Ok(None)`. Numbers past the end fail with `InvalidPresetIndex`
    /// without touching the store.
    pub fn apply(
        &self,
        number: i32,
        store: &ParameterStore,
        listener: &mut dyn PresetListener,
    ) -> ParameterResult<Option<&PresetDefinition>> {
        let Ok(index) = usize::try_from(number) else {
            return Ok(None);
        };
        let preset = self
            .presets
            .get(index)
            .ok_or(ParameterError::InvalidPresetIndex {
                index: number,
                count: self.presets.len(),
            })?;

        store.apply_bundle(&preset.values)?;
        log::info!("applied factory preset {} '{}'", index, preset.name);
        listener.preset_applied(index, preset);
        Ok(Some(preset))
    }
}

fn resolve(catalog: &ParameterCatalog, preset: &FactoryPreset) -> ParameterResult<PresetDefinition> {
    let values = preset
        .values()
        .iter()
        .map(|&(identifier, value)| {
            catalog
                .address_of(identifier)
                .map(|address| (address, value))
                .ok_or_else(|| ParameterError::UnknownIdentifier(identifier.to_string()))
        })
        .collect::<ParameterResult<ParameterBundle>>()?;
    Ok(PresetDefinition {
        name: preset.name.to_string(),
        values,
    })
}
