//! Fully-specified store records.

use super::capabilities::{ModeSet, StoreFeatures};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A validated, instantiated store ready to be handed to the host cache layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreRecord {
    pub name: String,
    pub plugin_type: String,
    pub backing_class: String,
    pub configuration: Map<String, Value>,
    pub features: StoreFeatures,
    pub supported_modes: ModeSet,
    pub is_default: bool,
    pub mappings_only: bool,
    pub lock_name: String,
}
