//! # Configuration Assembler
//!
//! Composes the rule source loader, store registry builder, mode mapping and
//! lock generators, and the definition resolver into one [`Configuration`].
//!
//! Hosts depend on the [`ConfigProvider`] trait and inject an implementation;
//! [`RuleConfigProvider`] is the rule-file backed one.

use super::definition_resolver::resolve_definitions;
use super::locks::default_locks;
use super::mode_mapping::default_mode_mappings;
use super::store_builder::StoreRegistryBuilder;
use crate::error::{ResolutionError, Result};
use crate::host::{
    DefaultStoreProvider, DefinitionRegistry, SiteIdentifierProvider, StandardDefaultStores,
};
use crate::logging::log_resolution_operation;
use crate::models::Configuration;
use crate::registry::StorePluginRegistry;
use crate::rules::RuleSourceLoader;
use std::fmt;
use tracing::{info, warn};

/// Something that can produce a cache configuration for the host
pub trait ConfigProvider {
    /// Build a fresh configuration
    fn load(&mut self) -> Result<Configuration>;

    /// Non-fatal problems found during the most recent `load`
    fn inclusion_errors(&self) -> &[ResolutionError];
}

/// Configuration provider driven by a rule source
pub struct RuleConfigProvider {
    loader: RuleSourceLoader,
    plugins: StorePluginRegistry,
    definitions: Box<dyn DefinitionRegistry>,
    site: Box<dyn SiteIdentifierProvider>,
    defaults: Box<dyn DefaultStoreProvider>,
    inclusion_errors: Vec<ResolutionError>,
}

impl fmt::Debug for RuleConfigProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleConfigProvider")
            .field("loader", &self.loader)
            .field("plugins", &self.plugins.plugin_types())
            .field("inclusion_errors", &self.inclusion_errors)
            .finish()
    }
}

impl RuleConfigProvider {
    /// Create a provider using the standard default stores
    pub fn new<D, S>(
        loader: RuleSourceLoader,
        plugins: StorePluginRegistry,
        definitions: D,
        site: S,
    ) -> Self
    where
        D: DefinitionRegistry + 'static,
        S: SiteIdentifierProvider + 'static,
    {
        Self {
            loader,
            plugins,
            definitions: Box::new(definitions),
            site: Box::new(site),
            defaults: Box::new(StandardDefaultStores::new()),
            inclusion_errors: Vec::new(),
        }
    }

    /// Replace the default store provider
    pub fn with_default_stores<P: DefaultStoreProvider + 'static>(mut self, defaults: P) -> Self {
        self.defaults = Box::new(defaults);
        self
    }

    /// Run the whole pipeline once
    ///
    /// Any error aborts assembly; no partial configuration is returned.
    pub fn assemble(&mut self) -> Result<Configuration> {
        self.inclusion_errors.clear();

        let raw = self.loader.load_raw_config()?;

        let stores = StoreRegistryBuilder::new(&self.plugins, &*self.defaults)
            .build_stores(&raw.stores)?;
        let mode_mappings = default_mode_mappings();
        let definitions = self.definitions.locate_definitions();
        let resolution = resolve_definitions(&raw.rules, &definitions);
        let locks = default_locks();

        for mapping in &resolution.mappings {
            if !stores.contains_key(&mapping.store) {
                warn!(
                    definition = %mapping.definition,
                    store = %mapping.store,
                    "Rule maps definition to an undeclared store"
                );
            }
        }

        self.inclusion_errors = resolution.inclusion_errors;

        let configuration = Configuration {
            site_identifier: self.site.site_identifier(),
            stores,
            mode_mappings,
            definitions,
            definition_mappings: resolution.mappings,
            locks,
        };

        info!(
            stores = configuration.stores.len(),
            definitions = configuration.definitions.len(),
            definition_mappings = configuration.definition_mappings.len(),
            inclusion_errors = self.inclusion_errors.len(),
            "Cache configuration assembled"
        );
        log_resolution_operation("assemble", "RuleConfigProvider", "assembled", None);

        Ok(configuration)
    }
}

impl ConfigProvider for RuleConfigProvider {
    fn load(&mut self) -> Result<Configuration> {
        self.assemble()
    }

    fn inclusion_errors(&self) -> &[ResolutionError] {
        &self.inclusion_errors
    }
}
