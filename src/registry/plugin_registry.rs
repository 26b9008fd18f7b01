//! # Store Plugin Registry
//!
//! Registry populated at startup with the store plugins the host has
//! installed. Resolution only reads from it.

use crate::constants::stores::BACKING_CLASS_PREFIX;
use crate::error::{ResolutionError, Result};
use crate::logging::log_registry_operation;
use crate::models::{ModeSet, StoreFeatures};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Failure reported by a plugin while instantiating a store
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PluginError {
    #[error("invalid store configuration: {0}")]
    InvalidConfiguration(String),

    #[error("store backend unavailable: {0}")]
    Unavailable(String),
}

/// Instantiated store, as returned by a plugin
pub trait StoreHandle: fmt::Debug {
    /// Whether the store can serve requests with its configuration
    fn is_ready(&self) -> bool;
}

/// A store implementation installed in the host
///
/// `instantiate` may open the resource the store wraps (a directory, a
/// connection); it is called once per declared store on every resolution.
pub trait StorePlugin: Send + Sync + fmt::Debug {
    /// Name used in store declarations
    fn type_name(&self) -> &str;

    /// Identifier of the backing implementation handed to the host
    fn backing_class(&self) -> String {
        format!("{BACKING_CLASS_PREFIX}{}", self.type_name())
    }

    fn supported_features(&self, configuration: &Map<String, Value>) -> StoreFeatures;

    fn supported_modes(&self, configuration: &Map<String, Value>) -> ModeSet;

    fn instantiate(
        &self,
        store_name: &str,
        configuration: &Map<String, Value>,
    ) -> std::result::Result<Box<dyn StoreHandle>, PluginError>;
}

/// Registry of store plugins keyed by type name
#[derive(Debug, Clone, Default)]
pub struct StorePluginRegistry {
    plugins: HashMap<String, Arc<dyn StorePlugin>>,
}

impl StorePluginRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the file, session and static plugins
    pub fn with_builtin_plugins() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(super::builtin::FileStorePlugin));
        registry.register(Arc::new(super::builtin::SessionStorePlugin));
        registry.register(Arc::new(super::builtin::StaticStorePlugin));
        registry
    }

    /// Register a plugin, replacing any plugin with the same type name
    pub fn register(&mut self, plugin: Arc<dyn StorePlugin>) -> Option<Arc<dyn StorePlugin>> {
        let type_name = plugin.type_name().to_string();
        let replaced = self.plugins.insert(type_name.clone(), plugin);

        log_registry_operation(
            "register_plugin",
            &type_name,
            if replaced.is_some() { "replaced" } else { "registered" },
        );

        replaced
    }

    /// Builder-style registration
    pub fn with_plugin(mut self, plugin: Arc<dyn StorePlugin>) -> Self {
        self.register(plugin);
        self
    }

    pub fn contains(&self, store_type: &str) -> bool {
        self.plugins.contains_key(store_type)
    }

    /// Look up the plugin for a store's declared type
    pub fn resolve(&self, store_name: &str, store_type: &str) -> Result<Arc<dyn StorePlugin>> {
        match self.plugins.get(store_type) {
            Some(plugin) => {
                debug!(store = store_name, store_type = store_type, "Resolved store plugin");
                Ok(Arc::clone(plugin))
            }
            None => Err(ResolutionError::unknown_store_type(store_name, store_type)),
        }
    }

    /// Registered type names, sorted
    pub fn plugin_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.plugins.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}
