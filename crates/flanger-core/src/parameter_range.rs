//! Closed value ranges and normalization.
//!
//! Every parameter lives inside a [`ValueRange`]. The store clamps into it on
//! each write, and host automation, which works in normalized values
//! (0.0 to 1.0), goes through [`ValueRange::normalize`] and
//! [`ValueRange::denormalize`].
//!
//! # Example
//!
//! ```
//! use flanger_core::parameter_range::ValueRange;
//!
//! let rate = ValueRange::new(0.01, 8.0);
//! assert_eq!(rate.clamp(12.0), 8.0);
//! assert_eq!(rate.denormalize(1.0), 8.0);
//!
//! let depth = ValueRange::PERCENT;
//! assert_eq!(depth.normalize(50.0), 0.5);
//! ```

use serde::{Deserialize, Serialize};

/// Closed interval `[min, max]` in plain units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    /// Fixed range of percentage parameters.
    pub const PERCENT: ValueRange = ValueRange::new(0.0, 100.0);

    /// Fixed range of boolean parameters.
    pub const TOGGLE: ValueRange = ValueRange::new(0.0, 1.0);

    /// Create a new range. Validity (`min < max`, both finite) is checked when
    /// the owning catalog is built.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether the range is usable: finite endpoints with `min < max`.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min < self.max
    }

    /// Clamp a plain value into the range.
    ///
    /// `NaN` passes through unchanged; callers that need a substitute handle
    /// it themselves.
    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Whether `value` lies inside the range (inclusive).
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Width of the range.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Convert a plain value to normalized (0.0-1.0), clamping first.
    pub fn normalize(&self, plain: f64) -> f64 {
        if self.span().abs() < f64::EPSILON {
            return 0.5;
        }
        ((plain - self.min) / self.span()).clamp(0.0, 1.0)
    }

    /// Convert a normalized value (0.0-1.0) to plain, clamping first.
    pub fn denormalize(&self, normalized: f64) -> f64 {
        let normalized = normalized.clamp(0.0, 1.0);
        self.min + normalized * self.span()
    }
}
