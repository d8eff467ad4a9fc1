//! Parameter metadata types.
//!
//! This module provides the immutable description of one parameter:
//! - [`ParameterDefinition`] - identity, range, unit and display configuration
//! - [`ParameterKind`] - continuous, percentage or boolean semantics
//! - [`ParameterUnit`] - unit used for the display suffix
//! - [`UnitSeparator`] / [`BooleanStyle`] - per-entry display policy

use serde::{Deserialize, Serialize};

use flanger_utils::fnv1a_32;

use crate::parameter_range::ValueRange;
use crate::types::{ParameterAddress, ParameterValue};

/// How a parameter's value space behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterKind {
    /// Free range in natural units, shown with two decimals.
    Continuous,
    /// Fixed `[0, 100]`, shown as a whole number.
    Percentage,
    /// `0` or `1`, driven by a two-state control.
    Boolean,
}

impl ParameterKind {
    /// Decimal places used when formatting values of this kind.
    pub const fn precision(self) -> usize {
        match self {
            ParameterKind::Continuous => 2,
            ParameterKind::Percentage | ParameterKind::Boolean => 0,
        }
    }

    /// Number of discrete steps. 0 = continuous, 1 = toggle.
    pub const fn step_count(self) -> i32 {
        match self {
            ParameterKind::Boolean => 1,
            ParameterKind::Continuous | ParameterKind::Percentage => 0,
        }
    }
}

/// Unit of a parameter's plain value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterUnit {
    None,
    Hertz,
    Milliseconds,
    Percent,
}

impl ParameterUnit {
    /// Suffix symbol shown after formatted values.
    pub const fn symbol(self) -> &'static str {
        match self {
            ParameterUnit::None => "",
            ParameterUnit::Hertz => "Hz",
            ParameterUnit::Milliseconds => "ms",
            ParameterUnit::Percent => "%",
        }
    }

    /// Separator conventionally used with this unit: a space for time and
    /// frequency ("1.68 Hz"), nothing for percentages ("37%").
    pub const fn default_separator(self) -> UnitSeparator {
        match self {
            ParameterUnit::Hertz | ParameterUnit::Milliseconds => UnitSeparator::Space,
            ParameterUnit::None | ParameterUnit::Percent => UnitSeparator::None,
        }
    }
}

/// Text placed between a formatted number and its unit symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSeparator {
    Space,
    None,
}

impl UnitSeparator {
    pub const fn as_str(self) -> &'static str {
        match self {
            UnitSeparator::Space => " ",
            UnitSeparator::None => "",
        }
    }
}

/// How boolean parameters are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BooleanStyle {
    /// "On" / "Off".
    OnOff,
    /// "1" / "0".
    Numeric,
}

/// Metadata describing a single parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterDefinition {
    /// Zero-based storage index.
    pub address: ParameterAddress,
    /// Stable machine name, used as the persistence key.
    pub identifier: &'static str,
    /// Human label.
    pub display_name: &'static str,
    pub kind: ParameterKind,
    /// Valid closed interval in plain units.
    pub range: ValueRange,
    pub unit: ParameterUnit,
    /// Initial store value; also replaces `NaN` writes.
    pub default: ParameterValue,
    pub unit_separator: UnitSeparator,
    pub boolean_style: BooleanStyle,
}

impl ParameterDefinition {
    /// Create a continuous parameter over `[min, max]` in `unit`.
    ///
    /// The default starts at `min`; the separator follows the unit convention.
    pub const fn continuous(
        address: ParameterAddress,
        identifier: &'static str,
        display_name: &'static str,
        min: f64,
        max: f64,
        unit: ParameterUnit,
    ) -> Self {
        Self {
            address,
            identifier,
            display_name,
            kind: ParameterKind::Continuous,
            range: ValueRange::new(min, max),
            unit,
            default: min,
            unit_separator: unit.default_separator(),
            boolean_style: BooleanStyle::OnOff,
        }
    }

    /// Create a percentage parameter over the fixed range `[0, 100]`.
    pub const fn percentage(
        address: ParameterAddress,
        identifier: &'static str,
        display_name: &'static str,
    ) -> Self {
        Self {
            address,
            identifier,
            display_name,
            kind: ParameterKind::Percentage,
            range: ValueRange::PERCENT,
            unit: ParameterUnit::Percent,
            default: 0.0,
            unit_separator: UnitSeparator::None,
            boolean_style: BooleanStyle::OnOff,
        }
    }

    /// Create a boolean parameter (`0` or `1`).
    pub const fn boolean(
        address: ParameterAddress,
        identifier: &'static str,
        display_name: &'static str,
    ) -> Self {
        Self {
            address,
            identifier,
            display_name,
            kind: ParameterKind::Boolean,
            range: ValueRange::TOGGLE,
            unit: ParameterUnit::None,
            default: 0.0,
            unit_separator: UnitSeparator::None,
            boolean_style: BooleanStyle::OnOff,
        }
    }

    /// Set the default value.
    pub const fn with_default(mut self, default: ParameterValue) -> Self {
        self.default = default;
        self
    }

    /// Override the unit separator.
    pub const fn with_unit_separator(mut self, separator: UnitSeparator) -> Self {
        self.unit_separator = separator;
        self
    }

    /// Set the boolean rendering style.
    pub const fn with_boolean_style(mut self, style: BooleanStyle) -> Self {
        self.boolean_style = style;
        self
    }

    /// Move the definition to another address (used when a catalog revision
    /// orders the same parameters differently).
    pub const fn at_address(mut self, address: ParameterAddress) -> Self {
        self.address = address;
        self
    }

    /// Stable numeric id for host automation, derived from the identifier so
    /// it survives catalog reordering.
    pub const fn host_id(&self) -> u32 {
        fnv1a_32(self.identifier)
    }

    /// Number of discrete steps. 0 = continuous, 1 = toggle.
    pub const fn step_count(&self) -> i32 {
        self.kind.step_count()
    }

    /// Bring a raw value into this parameter's value space.
    ///
    /// Clamps to the range, snaps booleans to `0`/`1` and replaces `NaN` with
    /// the default. Never fails.
    #[inline]
    pub fn clamp(&self, raw: ParameterValue) -> ParameterValue {
        if raw.is_nan() {
            return self.default;
        }
        // Adding zero turns -0.0 into 0.0
        let value = self.range.clamp(raw) + 0.0;
        match self.kind {
            ParameterKind::Boolean => {
                if value >= 0.5 {
                    1.0
                } else {
                    0.0
                }
            }
            ParameterKind::Continuous | ParameterKind::Percentage => value,
        }
    }
}
