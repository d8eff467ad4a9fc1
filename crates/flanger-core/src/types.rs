//! Common types used throughout the parameter layer.

use std::fmt;

/// Parameter address.
///
/// Zero-based and contiguous within a catalog; doubles as the index into the
/// store's value array.
pub type ParameterAddress = u32;

/// Plain parameter value in the parameter's natural unit (Hz, ms, %, 0/1).
pub type ParameterValue = f64;

/// Host preset number meaning "user state, not a factory preset".
pub const NO_PRESET: i32 = -1;

/// Opaque handle identifying one interactive control in the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ControlHandle(pub u32);

impl fmt::Display for ControlHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
