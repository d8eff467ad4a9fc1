//! The fixed, ordered set of parameter definitions for an effect.
//!
//! A [`ParameterCatalog`] is built once from a literal table and never
//! changes. Construction validates the table: addresses must be exactly
//! `0..N` with no gaps or duplicates, identifiers must be unique (including
//! their host ids), and every range and default must be usable.

use flanger_utils::find_collision;

use crate::error::{ParameterError, ParameterResult};
use crate::parameter_info::ParameterDefinition;
use crate::types::ParameterAddress;

/// Immutable, address-ordered parameter definitions.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterCatalog {
    definitions: Vec<ParameterDefinition>,
}

impl ParameterCatalog {
    /// Build a catalog from a definition table.
    ///
    /// The table may be given in any order; the catalog is stored in address
    /// order.
    pub fn new(mut definitions: Vec<ParameterDefinition>) -> ParameterResult<Self> {
        if definitions.is_empty() {
            return Err(ParameterError::InvalidCatalog(
                "catalog has no parameters".to_string(),
            ));
        }

        definitions.sort_by_key(|definition| definition.address);
        for (index, definition) in definitions.iter().enumerate() {
            if definition.address as usize != index {
                return Err(ParameterError::InvalidCatalog(format!(
                    "expected address {} but found {} ('{}'); addresses must be 0..{} without gaps or duplicates",
                    index,
                    definition.address,
                    definition.identifier,
                    definitions.len()
                )));
            }
            if !definition.range.is_valid() {
                return Err(ParameterError::InvalidCatalog(format!(
                    "'{}' has an unusable range [{}, {}]",
                    definition.identifier, definition.range.min, definition.range.max
                )));
            }
            if !definition.range.contains(definition.default) {
                return Err(ParameterError::InvalidCatalog(format!(
                    "'{}' default {} lies outside [{}, {}]",
                    definition.identifier,
                    definition.default,
                    definition.range.min,
                    definition.range.max
                )));
            }
        }

        let identifiers: Vec<&str> = definitions.iter().map(|d| d.identifier).collect();
        if let Some((a, b)) = find_collision(&identifiers) {
            return Err(ParameterError::InvalidCatalog(format!(
                "identifiers '{}' and '{}' map to the same host id",
                identifiers[a], identifiers[b]
            )));
        }

        log::debug!(
            "parameter catalog built: [{}]",
            identifiers.join(", ")
        );

        Ok(Self { definitions })
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Always false for a constructed catalog; present for API completeness.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Definition at `address`, or `InvalidAddress`.
    pub fn definition_for(&self, address: ParameterAddress) -> ParameterResult<&ParameterDefinition> {
        self.definitions
            .get(address as usize)
            .ok_or(ParameterError::InvalidAddress {
                address,
                count: self.definitions.len(),
            })
    }

    /// All definitions in address order.
    pub fn all_definitions(&self) -> &[ParameterDefinition] {
        &self.definitions
    }

    /// Iterate every address in order.
    pub fn addresses(&self) -> impl Iterator<Item = ParameterAddress> + '_ {
        self.definitions.iter().map(|definition| definition.address)
    }

    /// Address of the parameter with `identifier`.
    pub fn address_of(&self, identifier: &str) -> Option<ParameterAddress> {
        self.definition_by_identifier(identifier)
            .map(|definition| definition.address)
    }

    /// Definition of the parameter with `identifier`.
    pub fn definition_by_identifier(&self, identifier: &str) -> Option<&ParameterDefinition> {
        self.definitions
            .iter()
            .find(|definition| definition.identifier == identifier)
    }
}
