//! Store Registry Builder
//!
//! Turns declared stores into fully-specified, instantiated store records and
//! merges in the mandatory default stores.

use crate::constants::source::{STORE_CONFIG_KEY, STORE_TYPE_KEY};
use crate::constants::stores::DEFAULT_STORE_LOCK;
use crate::error::{ResolutionError, Result};
use crate::host::DefaultStoreProvider;
use crate::models::StoreRecord;
use crate::registry::StorePluginRegistry;
use crate::rules::StoreDecl;
use std::collections::BTreeMap;
use tracing::{debug, info};

pub struct StoreRegistryBuilder<'a> {
    plugins: &'a StorePluginRegistry,
    defaults: &'a dyn DefaultStoreProvider,
}

impl<'a> StoreRegistryBuilder<'a> {
    pub fn new(plugins: &'a StorePluginRegistry, defaults: &'a dyn DefaultStoreProvider) -> Self {
        Self { plugins, defaults }
    }

    /// Validate, instantiate and readiness-check every declared store
    ///
    /// Default stores are merged last and always replace a declared store
    /// using one of the reserved names.
    pub fn build_stores(
        &self,
        declared: &BTreeMap<String, StoreDecl>,
    ) -> Result<BTreeMap<String, StoreRecord>> {
        let mut stores = BTreeMap::new();

        for (name, decl) in declared {
            let record = self.build_store(name, decl)?;
            stores.insert(name.clone(), record);
        }

        for (name, record) in self.defaults.default_stores()? {
            if stores.contains_key(&name) {
                debug!(store = %name, "Declared store shadowed by default store");
            }
            stores.insert(name, record);
        }

        info!(
            declared = declared.len(),
            total = stores.len(),
            "Store registry built"
        );

        Ok(stores)
    }

    fn build_store(&self, name: &str, decl: &StoreDecl) -> Result<StoreRecord> {
        let store_type = decl
            .store_type
            .as_deref()
            .ok_or_else(|| ResolutionError::invalid_store_decl(name, STORE_TYPE_KEY))?;
        let configuration = decl
            .config
            .as_ref()
            .ok_or_else(|| ResolutionError::invalid_store_decl(name, STORE_CONFIG_KEY))?;

        let plugin = self.plugins.resolve(name, store_type)?;

        let record = StoreRecord {
            name: name.to_string(),
            plugin_type: store_type.to_string(),
            backing_class: plugin.backing_class(),
            configuration: configuration.clone(),
            features: plugin.supported_features(configuration),
            supported_modes: plugin.supported_modes(configuration),
            is_default: false,
            mappings_only: false,
            lock_name: DEFAULT_STORE_LOCK.to_string(),
        };

        let handle = plugin
            .instantiate(name, configuration)
            .map_err(|e| ResolutionError::store_not_ready(name, store_type, e))?;
        if !handle.is_ready() {
            return Err(ResolutionError::store_not_ready(
                name,
                store_type,
                "plugin reported the store is not ready",
            ));
        }

        debug!(
            store = name,
            store_type = store_type,
            features = record.features.bits(),
            modes = record.supported_modes.bits(),
            "Store instantiated"
        );

        Ok(record)
    }
}
