//! Built-in store plugins.
//!
//! Backends that need nothing beyond the local process: a directory-backed
//! `file` store, a per-user `session` store and the in-process `static`
//! request store. The standard default stores are built from these.

use super::plugin_registry::{PluginError, StoreHandle, StorePlugin};
use crate::constants::CacheMode;
use crate::models::{ModeSet, StoreFeatures};
use serde_json::{Map, Value};
use std::path::PathBuf;
use tracing::debug;

/// Handle for stores that live entirely in memory
#[derive(Debug, Clone, Copy)]
pub struct InProcessHandle;

impl StoreHandle for InProcessHandle {
    fn is_ready(&self) -> bool {
        true
    }
}

/// Handle for a directory-backed store
#[derive(Debug, Clone)]
pub struct FileStoreHandle {
    /// `None` when the host's default cache directory is used
    pub directory: Option<PathBuf>,
}

impl StoreHandle for FileStoreHandle {
    fn is_ready(&self) -> bool {
        self.directory.as_ref().map_or(true, |dir| dir.is_dir())
    }
}

/// Directory-backed store
///
/// The optional `path` setting names the cache directory. It is created when
/// missing; the store is ready once the directory exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileStorePlugin;

impl StorePlugin for FileStorePlugin {
    fn type_name(&self) -> &str {
        "file"
    }

    fn supported_features(&self, _configuration: &Map<String, Value>) -> StoreFeatures {
        StoreFeatures::NATIVE_TTL | StoreFeatures::SEARCHABLE | StoreFeatures::DEREFERENCES_OBJECTS
    }

    fn supported_modes(&self, _configuration: &Map<String, Value>) -> ModeSet {
        ModeSet::from_modes(&[CacheMode::Application, CacheMode::Session])
    }

    fn instantiate(
        &self,
        store_name: &str,
        configuration: &Map<String, Value>,
    ) -> Result<Box<dyn StoreHandle>, PluginError> {
        let directory = match configuration.get("path") {
            None => None,
            Some(Value::String(path)) if !path.is_empty() => Some(PathBuf::from(path)),
            Some(other) => {
                return Err(PluginError::InvalidConfiguration(format!(
                    "'path' must be a non-empty string, got {other}"
                )))
            }
        };

        if let Some(dir) = &directory {
            std::fs::create_dir_all(dir)
                .map_err(|e| PluginError::Unavailable(format!("{}: {e}", dir.display())))?;
            debug!(store = store_name, directory = %dir.display(), "File store directory ready");
        }

        Ok(Box::new(FileStoreHandle { directory }))
    }
}

/// Per-user session store
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionStorePlugin;

impl StorePlugin for SessionStorePlugin {
    fn type_name(&self) -> &str {
        "session"
    }

    fn supported_features(&self, _configuration: &Map<String, Value>) -> StoreFeatures {
        StoreFeatures::DATA_GUARANTEE
            | StoreFeatures::NATIVE_TTL
            | StoreFeatures::SEARCHABLE
            | StoreFeatures::DEREFERENCES_OBJECTS
    }

    fn supported_modes(&self, _configuration: &Map<String, Value>) -> ModeSet {
        ModeSet::from(CacheMode::Session)
    }

    fn instantiate(
        &self,
        _store_name: &str,
        _configuration: &Map<String, Value>,
    ) -> Result<Box<dyn StoreHandle>, PluginError> {
        Ok(Box::new(InProcessHandle))
    }
}

/// In-process store scoped to a single request
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticStorePlugin;

impl StorePlugin for StaticStorePlugin {
    fn type_name(&self) -> &str {
        "static"
    }

    fn supported_features(&self, _configuration: &Map<String, Value>) -> StoreFeatures {
        StoreFeatures::DATA_GUARANTEE
            | StoreFeatures::MULTIPLE_IDENTIFIERS
            | StoreFeatures::SEARCHABLE
            | StoreFeatures::DEREFERENCES_OBJECTS
    }

    fn supported_modes(&self, _configuration: &Map<String, Value>) -> ModeSet {
        ModeSet::from(CacheMode::Request)
    }

    fn instantiate(
        &self,
        _store_name: &str,
        _configuration: &Map<String, Value>,
    ) -> Result<Box<dyn StoreHandle>, PluginError> {
        Ok(Box::new(InProcessHandle))
    }
}
