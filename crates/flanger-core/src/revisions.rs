//! Versioned catalog and factory preset data for the flanger.
//!
//! Two parameter orderings and two factory preset tables exist for the same
//! effect. Neither is treated as authoritative: an [`EffectConfig`] picks one
//! of each. Preset tables are keyed by identifier, so any table can be paired
//! with any catalog revision.
//!
//! [`EffectConfig`]: crate::config::EffectConfig

use crate::catalog::ParameterCatalog;
use crate::error::ParameterResult;
use crate::parameter_info::{ParameterDefinition, ParameterUnit};
use crate::types::{ParameterAddress, ParameterValue};

/// Upper bound of the delay parameter, in milliseconds.
pub const MAX_DELAY_MS: f64 = 10.0;

/// Stable parameter identifiers.
pub mod ids {
    pub const RATE: &str = "rate";
    pub const DELAY: &str = "delay";
    pub const DEPTH: &str = "depth";
    pub const DRY: &str = "dry";
    pub const WET: &str = "wet";
    pub const ODD90: &str = "odd90";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Rate,
    Delay,
    Depth,
    Dry,
    Wet,
    Odd90,
}

impl Slot {
    const fn definition(self, address: ParameterAddress) -> ParameterDefinition {
        match self {
            // LFO frequency
            Slot::Rate => ParameterDefinition::continuous(
                address,
                ids::RATE,
                "Rate",
                0.01,
                8.0,
                ParameterUnit::Hertz,
            )
            .with_default(0.64),
            // Nominal delay; the LFO swings the tap around it by `depth`
            Slot::Delay => ParameterDefinition::continuous(
                address,
                ids::DELAY,
                "Delay",
                0.01,
                MAX_DELAY_MS,
                ParameterUnit::Milliseconds,
            )
            .with_default(1.1),
            Slot::Depth => ParameterDefinition::percentage(address, ids::DEPTH, "Depth").with_default(50.0),
            Slot::Dry => ParameterDefinition::percentage(address, ids::DRY, "Dry").with_default(50.0),
            Slot::Wet => ParameterDefinition::percentage(address, ids::WET, "Wet").with_default(50.0),
            // Odd channels run 90° out of phase with even ones
            Slot::Odd90 => ParameterDefinition::boolean(address, ids::ODD90, "Odd 90°"),
        }
    }
}

/// Parameter ordering of a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogRevision {
    /// `rate, delay, depth, dry, wet, odd90`
    DelayBeforeDepth,
    /// `rate, depth, delay, dry, wet, odd90`
    DepthBeforeDelay,
}

impl CatalogRevision {
    const fn order(self) -> [Slot; 6] {
        match self {
            CatalogRevision::DelayBeforeDepth => {
                [Slot::Rate, Slot::Delay, Slot::Depth, Slot::Dry, Slot::Wet, Slot::Odd90]
            }
            CatalogRevision::DepthBeforeDelay => {
                [Slot::Rate, Slot::Depth, Slot::Delay, Slot::Dry, Slot::Wet, Slot::Odd90]
            }
        }
    }

    /// Identifiers in address order.
    pub fn identifiers(self) -> Vec<&'static str> {
        self.order()
            .iter()
            .enumerate()
            .map(|(address, slot)| slot.definition(address as ParameterAddress).identifier)
            .collect()
    }

    /// Build the catalog for this revision.
    pub fn catalog(self) -> ParameterResult<ParameterCatalog> {
        let definitions = self
            .order()
            .iter()
            .enumerate()
            .map(|(address, slot)| slot.definition(address as ParameterAddress))
            .collect();
        ParameterCatalog::new(definitions)
    }
}

/// One authored factory preset, keyed by identifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactoryPreset {
    pub name: &'static str,
    values: [(&'static str, ParameterValue); 6],
}

impl FactoryPreset {
    const fn new(
        name: &'static str,
        rate: ParameterValue,
        delay: ParameterValue,
        depth: ParameterValue,
        dry: ParameterValue,
        wet: ParameterValue,
        odd90: ParameterValue,
    ) -> Self {
        Self {
            name,
            values: [
                (ids::RATE, rate),
                (ids::DELAY, delay),
                (ids::DEPTH, depth),
                (ids::DRY, dry),
                (ids::WET, wet),
                (ids::ODD90, odd90),
            ],
        }
    }

    /// `(identifier, value)` pairs as authored.
    pub fn values(&self) -> &[(&'static str, ParameterValue)] {
        &self.values
    }
}

static INTENSE: [FactoryPreset; 6] = [
    FactoryPreset::new("Cadet", 1.68, 8.3, 100.0, 50.0, 100.0, 0.0),
    FactoryPreset::new("Wide Cadet", 1.68, 8.3, 100.0, 50.0, 100.0, 1.0),
    FactoryPreset::new("Wavy", 5.1, 8.3, 100.0, 50.0, 100.0, 0.0),
    FactoryPreset::new("Wavy Pong", 5.1, 8.3, 100.0, 50.0, 100.0, 1.0),
    FactoryPreset::new("Shimmer", 10.0, 1.75, 1.4, 50.0, 100.0, 1.0),
    FactoryPreset::new("Disturbed", 5.0, 50.0, 100.0, 50.0, 100.0, 1.0),
];

static SUBTLE: [FactoryPreset; 6] = [
    FactoryPreset::new("Cadet", 0.64, 1.1, 50.0, 50.0, 50.0, 0.0),
    FactoryPreset::new("Wide Cadet", 0.64, 1.1, 50.0, 50.0, 50.0, 1.0),
    FactoryPreset::new("Wavy", 3.0, 3.2, 14.0, 50.0, 50.0, 0.0),
    FactoryPreset::new("Wavy Pong", 0.4, 1.2, 100.0, 0.0, 100.0, 1.0),
    FactoryPreset::new("Shimmer", 11.0, 1.75, 5.0, 50.0, 100.0, 1.0),
    FactoryPreset::new("Disturbed", 3.0, 6.0, 180.0, 50.0, 100.0, 1.0),
];

/// Factory preset table.
///
/// Both tables carry a few values beyond the catalog ranges (Shimmer's rate,
/// Disturbed's delay or depth); the preset bank clamps them when it is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresetTable {
    /// Full depth and wet mix, long delays.
    Intense,
    /// Half mixes and short delays.
    Subtle,
}

impl PresetTable {
    pub fn presets(self) -> &'static [FactoryPreset] {
        match self {
            PresetTable::Intense => &INTENSE,
            PresetTable::Subtle => &SUBTLE,
        }
    }
}
