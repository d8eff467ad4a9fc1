//! Boundary with the external audio engine.
//!
//! The engine is constructed from an [`EngineConfig`] and, on every render
//! block, reads parameter values through a [`ParameterReader`]. Its compiled
//! address table is checked against the catalog with
//! [`EngineAddresses::resolve`] so the two numberings cannot drift apart.

use std::sync::Arc;

use crate::catalog::ParameterCatalog;
use crate::error::{ParameterError, ParameterResult};
use crate::parameter_store::ParameterStore;
use crate::revisions::{ids, MAX_DELAY_MS};
use crate::types::{ParameterAddress, ParameterValue};

/// Values the engine is constructed with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Upper bound of the delay line, in milliseconds.
    pub max_delay_ms: f64,
    /// Number of modulation LFOs.
    pub lfo_count: usize,
}

impl EngineConfig {
    /// Derive the delay bound from the catalog's `delay` definition.
    ///
    /// Falls back to [`MAX_DELAY_MS`] for a catalog without a delay parameter.
    pub fn from_catalog(catalog: &ParameterCatalog, lfo_count: usize) -> Self {
        let max_delay_ms = catalog
            .definition_by_identifier(ids::DELAY)
            .map(|definition| definition.range.max)
            .unwrap_or(MAX_DELAY_MS);
        Self {
            max_delay_ms,
            lfo_count,
        }
    }
}

/// Anything that can answer "current value of parameter X" on the render path.
pub trait ParameterSource: Send + Sync {
    /// Must not block, allocate or fail.
    fn read(&self, address: ParameterAddress) -> ParameterValue;
}

impl ParameterSource for ParameterStore {
    #[inline]
    fn read(&self, address: ParameterAddress) -> ParameterValue {
        ParameterStore::read(self, address)
    }
}

/// Read-only store handle handed to the render context.
///
/// Cloning bumps a reference count, so clone before the render thread starts,
/// not inside it.
#[derive(Debug, Clone)]
pub struct ParameterReader {
    store: Arc<ParameterStore>,
}

impl ParameterReader {
    pub fn new(store: Arc<ParameterStore>) -> Self {
        Self { store }
    }

    /// One relaxed atomic load. Out-of-range addresses read as `0.0`.
    #[inline]
    pub fn read(&self, address: ParameterAddress) -> ParameterValue {
        self.store.read(address)
    }

    /// Number of addresses.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

impl ParameterSource for ParameterReader {
    #[inline]
    fn read(&self, address: ParameterAddress) -> ParameterValue {
        ParameterReader::read(self, address)
    }
}

/// The engine's fixed address table, resolved against a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineAddresses {
    pub rate: ParameterAddress,
    pub delay: ParameterAddress,
    pub depth: ParameterAddress,
    pub dry: ParameterAddress,
    pub wet: ParameterAddress,
    pub odd90: ParameterAddress,
}

impl EngineAddresses {
    pub fn resolve(catalog: &ParameterCatalog) -> ParameterResult<Self> {
        let lookup = |identifier: &str| {
            catalog
                .address_of(identifier)
                .ok_or_else(|| ParameterError::UnknownIdentifier(identifier.to_string()))
        };
        Ok(Self {
            rate: lookup(ids::RATE)?,
            delay: lookup(ids::DELAY)?,
            depth: lookup(ids::DEPTH)?,
            dry: lookup(ids::DRY)?,
            wet: lookup(ids::WET)?,
            odd90: lookup(ids::ODD90)?,
        })
    }
}

/// Engine-facing view of one render block's parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockParameters {
    pub rate_hz: f64,
    pub delay_ms: f64,
    pub depth: f64,
    pub dry: f64,
    pub wet: f64,
    pub odd90: bool,
}

impl BlockParameters {
    /// Read every engine parameter once. Percentages are scaled to `0.0..=1.0`.
    #[inline]
    pub fn read<S: ParameterSource + ?Sized>(source: &S, addresses: &EngineAddresses) -> Self {
        Self {
            rate_hz: source.read(addresses.rate),
            delay_ms: source.read(addresses.delay),
            depth: source.read(addresses.depth) / 100.0,
            dry: source.read(addresses.dry) / 100.0,
            wet: source.read(addresses.wet) / 100.0,
            odd90: source.read(addresses.odd90) >= 0.5,
        }
    }
}
