//! Mode and definition mappings.
//!
//! A higher `sort` means a higher priority for the consuming cache layer.
//! Mode mappings always sit at -1 so anything derived from rules outranks them.

use crate::constants::CacheMode;
use serde::{Deserialize, Serialize};

/// Default binding of a whole mode to a store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeMapping {
    pub mode: CacheMode,
    pub store: String,
    pub sort: i64,
}

/// Binding of a single definition to a store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionMapping {
    /// Unique across the whole result set, strictly increasing in emission order
    pub id: usize,
    pub store: String,
    pub definition: String,
    pub sort: i64,
}
