//! # Host Collaborators
//!
//! Interfaces the resolver consumes from the host application, with simple
//! implementations for hosts that already hold the data in memory.
//!
//! - [`DefinitionRegistry`]: known cache definitions
//! - [`DefaultStoreProvider`]: the mandatory default stores
//! - [`SiteIdentifierProvider`]: identifier stamped on every configuration
//!
//! Store plugins are supplied through the
//! [`StorePluginRegistry`](crate::registry::StorePluginRegistry).

use crate::constants::stores::DEFAULT_STORE_LOCK;
use crate::constants::CacheMode;
use crate::error::Result;
use crate::models::{Definition, StoreRecord};
use crate::registry::{StorePlugin, StorePluginRegistry};
use serde_json::Map;
use std::collections::BTreeMap;

/// Source of cache definition metadata
pub trait DefinitionRegistry {
    fn locate_definitions(&self) -> BTreeMap<String, Definition>;
}

/// Source of the reserved default stores
pub trait DefaultStoreProvider {
    fn default_stores(&self) -> Result<BTreeMap<String, StoreRecord>>;
}

pub trait SiteIdentifierProvider {
    fn site_identifier(&self) -> String;
}

/// Definitions held in memory
#[derive(Debug, Clone, Default)]
pub struct StaticDefinitionRegistry {
    definitions: BTreeMap<String, Definition>,
}

impl StaticDefinitionRegistry {
    pub fn new(definitions: impl IntoIterator<Item = Definition>) -> Self {
        Self {
            definitions: definitions
                .into_iter()
                .map(|d| (d.name.clone(), d))
                .collect(),
        }
    }

    pub fn with_definition(mut self, definition: Definition) -> Self {
        self.definitions.insert(definition.name.clone(), definition);
        self
    }
}

impl DefinitionRegistry for StaticDefinitionRegistry {
    fn locate_definitions(&self) -> BTreeMap<String, Definition> {
        self.definitions.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticSiteIdentifier(pub String);

impl StaticSiteIdentifier {
    pub fn new<S: Into<String>>(identifier: S) -> Self {
        Self(identifier.into())
    }
}

impl SiteIdentifierProvider for StaticSiteIdentifier {
    fn site_identifier(&self) -> String {
        self.0.clone()
    }
}

/// Default stores backed by the built-in plugins
///
/// `default_application` uses `file`, `default_session` uses `session` and
/// `default_request` uses `static`, each with an empty configuration.
#[derive(Debug, Clone)]
pub struct StandardDefaultStores {
    plugins: StorePluginRegistry,
}

impl Default for StandardDefaultStores {
    fn default() -> Self {
        Self {
            plugins: StorePluginRegistry::with_builtin_plugins(),
        }
    }
}

impl StandardDefaultStores {
    pub fn new() -> Self {
        Self::default()
    }

    fn plugin_type(mode: CacheMode) -> &'static str {
        match mode {
            CacheMode::Application => "file",
            CacheMode::Session => "session",
            CacheMode::Request => "static",
        }
    }

    fn record(name: &str, plugin: &dyn StorePlugin) -> StoreRecord {
        let configuration = Map::new();
        StoreRecord {
            name: name.to_string(),
            plugin_type: plugin.type_name().to_string(),
            backing_class: plugin.backing_class(),
            features: plugin.supported_features(&configuration),
            supported_modes: plugin.supported_modes(&configuration),
            configuration,
            is_default: true,
            mappings_only: false,
            lock_name: DEFAULT_STORE_LOCK.to_string(),
        }
    }
}

impl DefaultStoreProvider for StandardDefaultStores {
    fn default_stores(&self) -> Result<BTreeMap<String, StoreRecord>> {
        CacheMode::ALL
            .into_iter()
            .map(|mode| {
                let name = mode.default_store();
                let plugin = self.plugins.resolve(name, Self::plugin_type(mode))?;
                Ok((name.to_string(), Self::record(name, plugin.as_ref())))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_default_stores() {
        let stores = StandardDefaultStores::new().default_stores().unwrap();

        assert_eq!(
            stores.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["default_application", "default_request", "default_session"]
        );
        for (mode, plugin) in [
            (CacheMode::Application, "file"),
            (CacheMode::Session, "session"),
            (CacheMode::Request, "static"),
        ] {
            let record = &stores[mode.default_store()];
            assert!(record.is_default);
            assert!(!record.mappings_only);
            assert_eq!(record.plugin_type, plugin);
            assert_eq!(record.backing_class, format!("cachestore_{plugin}"));
            assert!(record.supported_modes.supports(mode));
        }
    }

    #[test]
    fn test_static_definition_registry() {
        let registry = StaticDefinitionRegistry::new([
            Definition::new("core/a", CacheMode::Application),
            Definition::new("core/b", CacheMode::Request),
        ])
        .with_definition(Definition::new("core/a", CacheMode::Session));

        let definitions = registry.locate_definitions();
        assert_eq!(definitions.len(), 2);
        assert_eq!(definitions["core/a"].mode, "session");
    }

    #[test]
    fn test_static_site_identifier() {
        assert_eq!(StaticSiteIdentifier::new("abc123").site_identifier(), "abc123");
    }
}
