//! Lock-free parameter storage shared by the control and render contexts.
//!
//! The [`ParameterStore`] owns one atomic slot per catalog address. The slot
//! array is allocated and filled with defaults when the store is created and
//! never resized, so [`ParameterStore::read`] is a single bounds check plus a
//! relaxed atomic load: no locks, no reference counting, no allocation.
//!
//! # Thread Safety
//!
//! - Render context: calls only [`read`](ParameterStore::read).
//! - Control context: calls [`write`](ParameterStore::write),
//!   [`apply_bundle`](ParameterStore::apply_bundle) and the host automation
//!   helpers.
//!
//! Each slot stores the `f64` bit pattern in an `AtomicU64`, so a reader can
//! never observe a torn value. Writes to different addresses are independent;
//! a reader may see a bundle half-applied, which every consumer tolerates.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::catalog::ParameterCatalog;
use crate::error::{ParameterError, ParameterResult};
use crate::parameter_info::ParameterDefinition;
use crate::types::{ParameterAddress, ParameterValue};

/// A complete assignment of values by address, as applied by presets.
pub type ParameterBundle = BTreeMap<ParameterAddress, ParameterValue>;

/// One atomic value slot per catalog address.
#[derive(Debug)]
pub struct ParameterStore {
    catalog: Arc<ParameterCatalog>,
    slots: Box<[AtomicU64]>,
}

impl ParameterStore {
    /// Create a store with every address set to its default.
    pub fn new(catalog: Arc<ParameterCatalog>) -> Self {
        let slots = catalog
            .all_definitions()
            .iter()
            .map(|definition| AtomicU64::new(definition.default.to_bits()))
            .collect();
        Self { catalog, slots }
    }

    /// The catalog this store was built from.
    pub fn catalog(&self) -> &Arc<ParameterCatalog> {
        &self.catalog
    }

    /// Number of slots (equals the catalog size).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Current value at `address`.
    ///
    /// Safe to call from the render thread. Never fails: an address outside
    /// the catalog reads as `0.0`.
    #[inline]
    pub fn read(&self, address: ParameterAddress) -> ParameterValue {
        match self.slots.get(address as usize) {
            Some(slot) => f64::from_bits(slot.load(Ordering::Relaxed)),
            None => 0.0,
        }
    }

    /// Current value at `address`, validating the address.
    pub fn try_read(&self, address: ParameterAddress) -> ParameterResult<ParameterValue> {
        let slot = self.slot(address)?;
        Ok(f64::from_bits(slot.load(Ordering::Relaxed)))
    }

    /// Clamp `raw` into the address's range and store it.
    ///
    /// Returns the value actually stored so callers can detect clamping.
    pub fn write(
        &self,
        address: ParameterAddress,
        raw: ParameterValue,
    ) -> ParameterResult<ParameterValue> {
        let definition = self.catalog.definition_for(address)?;
        Ok(self.store(definition, raw))
    }

    /// Write every entry of `bundle`.
    ///
    /// The bundle is validated first: an address outside the catalog fails
    /// with `InvalidAddress` and a missing catalog address fails with
    /// `IncompletePreset`. Nothing is written unless the whole bundle is valid.
    pub fn apply_bundle(&self, bundle: &ParameterBundle) -> ParameterResult<()> {
        if let Some((&address, _)) = bundle.range(self.slots.len() as ParameterAddress..).next() {
            return Err(ParameterError::InvalidAddress {
                address,
                count: self.slots.len(),
            });
        }
        if let Some(missing) = self
            .catalog
            .all_definitions()
            .iter()
            .find(|definition| !bundle.contains_key(&definition.address))
        {
            return Err(ParameterError::IncompletePreset {
                address: missing.address,
                identifier: missing.identifier,
            });
        }

        for definition in self.catalog.all_definitions() {
            self.store(definition, bundle[&definition.address]);
        }
        Ok(())
    }

    /// Copy of every current value in address order.
    pub fn snapshot(&self) -> Vec<ParameterValue> {
        (0..self.slots.len() as ParameterAddress)
            .map(|address| self.read(address))
            .collect()
    }

    /// Return every address to its catalog default.
    pub fn reset_to_defaults(&self) {
        for definition in self.catalog.all_definitions() {
            self.store(definition, definition.default);
        }
    }

    /// Current value as normalized (0.0-1.0), for host automation.
    pub fn get_normalized(&self, address: ParameterAddress) -> ParameterResult<ParameterValue> {
        let definition = self.catalog.definition_for(address)?;
        Ok(definition.range.normalize(self.read(address)))
    }

    /// Set from a normalized (0.0-1.0) host value; returns the stored plain value.
    pub fn set_normalized(
        &self,
        address: ParameterAddress,
        normalized: ParameterValue,
    ) -> ParameterResult<ParameterValue> {
        let definition = self.catalog.definition_for(address)?;
        let plain = if normalized.is_nan() {
            definition.default
        } else {
            definition.range.denormalize(normalized)
        };
        Ok(self.store(definition, plain))
    }

    #[inline]
    fn store(&self, definition: &ParameterDefinition, raw: ParameterValue) -> ParameterValue {
        let value = definition.clamp(raw);
        self.slots[definition.address as usize].store(value.to_bits(), Ordering::Relaxed);
        value
    }

    fn slot(&self, address: ParameterAddress) -> ParameterResult<&AtomicU64> {
        self.slots
            .get(address as usize)
            .ok_or(ParameterError::InvalidAddress {
                address,
                count: self.slots.len(),
            })
    }
}
