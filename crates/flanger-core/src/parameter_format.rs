//! Parameter value formatting and parsing.
//!
//! [`ValueFormatter`] is a table of [`FormatRule`]s, one per catalog address,
//! computed when the formatter is built. Formatting is a pure function of
//! `(address, value)`: no callbacks and no hidden state, so the same formatter
//! can be shared between UI labels and diagnostic logging on any thread.
//!
//! # Example
//!
//! ```
//! use flanger_core::revisions::CatalogRevision;
//! use flanger_core::ValueFormatter;
//!
//! let catalog = CatalogRevision::DelayBeforeDepth.catalog().unwrap();
//! let formatter = ValueFormatter::new(&catalog);
//!
//! assert_eq!(formatter.format(0, 1.678).unwrap(), "1.68 Hz"); // rate
//! assert_eq!(formatter.format(2, 37.4).unwrap(), "37%");      // depth
//! assert_eq!(formatter.format(5, 1.0).unwrap(), "On");        // odd90
//! assert_eq!(formatter.parse(1, "8.3 ms"), Some(8.3));        // delay
//! ```

use std::fmt;
use std::sync::Arc;

use crate::catalog::ParameterCatalog;
use crate::error::{ParameterError, ParameterResult};
use crate::parameter_info::{BooleanStyle, ParameterDefinition, ParameterKind};
use crate::types::{ParameterAddress, ParameterValue};

/// Display rule for a single address.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormatRule {
    /// Fixed-precision number with an optional unit suffix (e.g. "1.68 Hz", "37%").
    Number {
        /// Number of decimal places.
        precision: usize,
        /// Text between the number and the unit symbol.
        separator: &'static str,
        /// Unit symbol, empty for unitless values.
        symbol: &'static str,
    },

    /// Two-state value.
    ///
    /// Display: "On"/"Off" or "1"/"0".
    Toggle {
        style: BooleanStyle,
    },
}

impl FormatRule {
    /// Rule implied by a definition's kind, unit and display configuration.
    pub fn for_definition(definition: &ParameterDefinition) -> Self {
        match definition.kind {
            ParameterKind::Boolean => FormatRule::Toggle {
                style: definition.boolean_style,
            },
            ParameterKind::Continuous | ParameterKind::Percentage => FormatRule::Number {
                precision: definition.kind.precision(),
                separator: definition.unit_separator.as_str(),
                symbol: definition.unit.symbol(),
            },
        }
    }

    /// Write the display text for `value` without allocating.
    pub fn write<W: fmt::Write>(&self, out: &mut W, value: ParameterValue) -> fmt::Result {
        match *self {
            FormatRule::Number {
                precision,
                separator,
                symbol,
            } => {
                write!(out, "{:.*}", precision, value)?;
                if !symbol.is_empty() {
                    out.write_str(separator)?;
                    out.write_str(symbol)?;
                }
                Ok(())
            }
            FormatRule::Toggle { style } => {
                let on = value >= 0.5;
                out.write_str(match (style, on) {
                    (BooleanStyle::OnOff, true) => "On",
                    (BooleanStyle::OnOff, false) => "Off",
                    (BooleanStyle::Numeric, true) => "1",
                    (BooleanStyle::Numeric, false) => "0",
                })
            }
        }
    }

    /// Display text for `value`.
    pub fn format(&self, value: ParameterValue) -> String {
        let mut text = String::new();
        // Writing into a String cannot fail
        let _ = self.write(&mut text, value);
        text
    }

    /// Parse user input back into a plain value.
    ///
    /// Accepts the formatted output with or without the unit suffix. The
    /// result is not clamped; that happens when it is written to the store.
    pub fn parse(&self, text: &str) -> Option<ParameterValue> {
        let text = text.trim();

        match *self {
            FormatRule::Number { symbol, .. } => {
                let number = if symbol.is_empty() {
                    text
                } else {
                    strip_suffix_ignore_case(text, symbol).unwrap_or(text).trim_end()
                };
                number.parse::<f64>().ok().filter(|v| v.is_finite())
            }
            FormatRule::Toggle { .. } => {
                let lower = text.to_ascii_lowercase();
                match lower.as_str() {
                    "on" | "true" | "yes" => Some(1.0),
                    "off" | "false" | "no" => Some(0.0),
                    _ => {
                        let v: f64 = lower.parse().ok().filter(|v: &f64| v.is_finite())?;
                        Some(if v >= 0.5 { 1.0 } else { 0.0 })
                    }
                }
            }
        }
    }
}

fn strip_suffix_ignore_case<'a>(text: &'a str, suffix: &str) -> Option<&'a str> {
    let split = text.len().checked_sub(suffix.len())?;
    if !text.is_char_boundary(split) {
        return None;
    }
    let (head, tail) = text.split_at(split);
    tail.eq_ignore_ascii_case(suffix).then_some(head)
}

/// Per-address format rules for a catalog.
///
/// Cheap to clone; clones share the rule table.
#[derive(Debug, Clone)]
pub struct ValueFormatter {
    rules: Arc<[FormatRule]>,
}

impl ValueFormatter {
    pub fn new(catalog: &ParameterCatalog) -> Self {
        let rules = catalog
            .all_definitions()
            .iter()
            .map(FormatRule::for_definition)
            .collect();
        Self { rules }
    }

    /// Rule for `address`.
    pub fn rule(&self, address: ParameterAddress) -> ParameterResult<&FormatRule> {
        self.rules
            .get(address as usize)
            .ok_or(ParameterError::InvalidAddress {
                address,
                count: self.rules.len(),
            })
    }

    /// Display text for `value` at `address`.
    pub fn format(&self, address: ParameterAddress, value: ParameterValue) -> ParameterResult<String> {
        Ok(self.rule(address)?.format(value))
    }

    /// Parse user input for `address`. `None` for unknown addresses or
    /// unparsable text.
    pub fn parse(&self, address: ParameterAddress, text: &str) -> Option<ParameterValue> {
        self.rule(address).ok()?.parse(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameter_info::{ParameterUnit, UnitSeparator};

    fn catalog() -> ParameterCatalog {
        ParameterCatalog::new(vec![
            ParameterDefinition::continuous(0, "rate", "Rate", 0.01, 8.0, ParameterUnit::Hertz),
            ParameterDefinition::continuous(1, "delay", "Delay", 0.01, 10.0, ParameterUnit::Milliseconds)
                .with_unit_separator(UnitSeparator::None),
            ParameterDefinition::percentage(2, "depth", "Depth"),
            ParameterDefinition::boolean(3, "odd90", "Odd 90°"),
            ParameterDefinition::boolean(4, "mono", "Mono").with_boolean_style(BooleanStyle::Numeric),
        ])
        .unwrap()
    }

    #[test]
    fn test_format_by_kind() {
        let formatter = ValueFormatter::new(&catalog());
        assert_eq!(formatter.format(0, 1.678).unwrap(), "1.68 Hz");
        assert_eq!(formatter.format(1, 8.3).unwrap(), "8.30ms");
        assert_eq!(formatter.format(2, 37.4).unwrap(), "37%");
        assert_eq!(formatter.format(2, 100.0).unwrap(), "100%");
        assert_eq!(formatter.format(3, 1.0).unwrap(), "On");
        assert_eq!(formatter.format(3, 0.0).unwrap(), "Off");
        assert_eq!(formatter.format(4, 1.0).unwrap(), "1");
        assert_eq!(formatter.format(4, 0.0).unwrap(), "0");
    }

    #[test]
    fn test_format_is_pure() {
        let formatter = ValueFormatter::new(&catalog());
        let first = formatter.format(0, 5.1).unwrap();
        let shared = formatter.clone();
        assert_eq!(shared.format(0, 5.1).unwrap(), first);
    }

    #[test]
    fn test_format_invalid_address() {
        let formatter = ValueFormatter::new(&catalog());
        assert!(matches!(
            formatter.format(9, 1.0),
            Err(ParameterError::InvalidAddress { address: 9, count: 5 })
        ));
    }

    #[test]
    fn test_write_into_buffer() {
        let formatter = ValueFormatter::new(&catalog());
        let mut label = String::with_capacity(16);
        formatter.rule(0).unwrap().write(&mut label, 0.64).unwrap();
        assert_eq!(label, "0.64 Hz");
    }

    #[test]
    fn test_parse_numbers() {
        let formatter = ValueFormatter::new(&catalog());
        assert_eq!(formatter.parse(0, "1.68 Hz"), Some(1.68));
        assert_eq!(formatter.parse(0, "1.68hz"), Some(1.68));
        assert_eq!(formatter.parse(0, " 3 "), Some(3.0));
        assert_eq!(formatter.parse(1, "8.30ms"), Some(8.3));
        assert_eq!(formatter.parse(2, "37%"), Some(37.0));
        assert_eq!(formatter.parse(2, "120"), Some(120.0));
        assert_eq!(formatter.parse(2, "lots"), None);
        assert_eq!(formatter.parse(2, "NaN"), None);
        assert_eq!(formatter.parse(9, "1"), None);
    }

    #[test]
    fn test_parse_toggles() {
        let formatter = ValueFormatter::new(&catalog());
        assert_eq!(formatter.parse(3, "On"), Some(1.0));
        assert_eq!(formatter.parse(3, "off"), Some(0.0));
        assert_eq!(formatter.parse(3, "YES"), Some(1.0));
        assert_eq!(formatter.parse(3, "false"), Some(0.0));
        assert_eq!(formatter.parse(4, "1"), Some(1.0));
        assert_eq!(formatter.parse(4, "0.2"), Some(0.0));
        assert_eq!(formatter.parse(4, "maybe"), None);
    }
}
