//! Error types for the parameter layer.
//!
//! Out-of-range values are deliberately absent: they are clamped, never
//! reported. The render path has no error type at all.

use thiserror::Error;

use crate::types::{ControlHandle, ParameterAddress};

/// Errors raised by control-context operations.
#[derive(Debug, Error)]
pub enum ParameterError {
    /// Address outside `0..count`.
    #[error("parameter address {address} is outside the catalog (0..{count})")]
    InvalidAddress {
        address: ParameterAddress,
        count: usize,
    },

    /// Host asked for a factory preset that does not exist.
    #[error("factory preset {index} does not exist ({count} presets)")]
    InvalidPresetIndex { index: i32, count: usize },

    /// A preset or bundle does not cover every catalog address.
    #[error("preset has no value for parameter '{identifier}' (address {address})")]
    IncompletePreset {
        address: ParameterAddress,
        identifier: &'static str,
    },

    /// No parameter with this identifier in the catalog.
    #[error("unknown parameter identifier '{0}'")]
    UnknownIdentifier(String),

    /// The catalog definition table is malformed.
    #[error("invalid parameter catalog: {0}")]
    InvalidCatalog(String),

    /// The control handle is already bound to an address.
    #[error("control {0} is already bound")]
    DuplicateControl(ControlHandle),

    /// Full-state blob could not be encoded or decoded.
    #[error("state error: {0}")]
    State(#[from] serde_json::Error),

    /// Full-state blob was written by an unknown format version.
    #[error("unsupported state version {0}")]
    UnsupportedStateVersion(u32),
}

/// Result type for parameter layer operations.
pub type ParameterResult<T> = Result<T, ParameterError>;
