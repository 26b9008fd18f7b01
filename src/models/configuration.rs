//! # Assembled Configuration
//!
//! Immutable snapshot produced by the assembler. The host cache layer consumes
//! it as-is; this crate never persists or caches it.

use super::{Definition, DefinitionMapping, Lock, ModeMapping, StoreRecord};
use crate::constants::CacheMode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    pub site_identifier: String,
    pub stores: BTreeMap<String, StoreRecord>,
    pub mode_mappings: Vec<ModeMapping>,
    pub definitions: BTreeMap<String, Definition>,
    pub definition_mappings: Vec<DefinitionMapping>,
    pub locks: BTreeMap<String, Lock>,
}

impl Configuration {
    /// Stores mapped to a definition, highest priority first
    ///
    /// Empty when the definition is only covered by its mode's default mapping.
    pub fn mappings_for(&self, definition: &str) -> Vec<&str> {
        let mut mappings: Vec<&DefinitionMapping> = self
            .definition_mappings
            .iter()
            .filter(|m| m.definition == definition)
            .collect();
        mappings.sort_by(|a, b| b.sort.cmp(&a.sort));
        mappings.iter().map(|m| m.store.as_str()).collect()
    }

    pub fn mode_mapping(&self, mode: CacheMode) -> Option<&ModeMapping> {
        self.mode_mappings.iter().find(|m| m.mode == mode)
    }

    /// The lock marked as default, if any
    pub fn default_lock(&self) -> Option<&Lock> {
        self.locks.values().find(|lock| lock.is_default)
    }
}
