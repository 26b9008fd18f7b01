//! Shared fixtures for rule resolution integration tests

#![allow(dead_code)]

pub mod strategies;

use cache_rules::config::ResolverSettings;
use cache_rules::host::{StaticDefinitionRegistry, StaticSiteIdentifier};
use cache_rules::models::{Definition, ModeSet, StoreFeatures};
use cache_rules::registry::builtin::InProcessHandle;
use cache_rules::registry::{PluginError, StoreHandle, StorePlugin, StorePluginRegistry};
use cache_rules::resolver::{DiagnosticSlot, FallbackController, RuleConfigProvider};
use cache_rules::rules::{RuleSource, RuleSourceLoader};
use cache_rules::CacheMode;
use serde_json::{Map, Value};
use std::sync::Arc;

pub const SITE_ID: &str = "test-site";

/// Stand-in for an external key-value store plugin
#[derive(Debug)]
pub struct RedisLikePlugin;

impl StorePlugin for RedisLikePlugin {
    fn type_name(&self) -> &str {
        "redis"
    }

    fn supported_features(&self, _configuration: &Map<String, Value>) -> StoreFeatures {
        StoreFeatures::NATIVE_TTL | StoreFeatures::DEREFERENCES_OBJECTS
    }

    fn supported_modes(&self, _configuration: &Map<String, Value>) -> ModeSet {
        ModeSet::from_modes(&[CacheMode::Application, CacheMode::Session])
    }

    fn instantiate(
        &self,
        _store_name: &str,
        configuration: &Map<String, Value>,
    ) -> Result<Box<dyn StoreHandle>, PluginError> {
        match configuration.get("server") {
            Some(Value::String(_)) => Ok(Box::new(InProcessHandle)),
            _ => Err(PluginError::InvalidConfiguration(
                "server must be a string".to_string(),
            )),
        }
    }
}

pub fn plugins() -> StorePluginRegistry {
    StorePluginRegistry::with_builtin_plugins().with_plugin(Arc::new(RedisLikePlugin))
}

pub fn provider_for(source: RuleSource, definitions: Vec<Definition>) -> RuleConfigProvider {
    RuleConfigProvider::new(
        RuleSourceLoader::new(source, ResolverSettings::default()),
        plugins(),
        StaticDefinitionRegistry::new(definitions),
        StaticSiteIdentifier::new(SITE_ID),
    )
}

pub fn inline_provider(rules: Value, definitions: Vec<Definition>) -> RuleConfigProvider {
    provider_for(RuleSource::inline(rules), definitions)
}

/// Controller wired to a private diagnostic slot
pub fn controller_for(provider: RuleConfigProvider) -> (FallbackController, Arc<DiagnosticSlot>) {
    let slot = Arc::new(DiagnosticSlot::new());
    let controller = FallbackController::with_diagnostics(provider, Arc::clone(&slot));
    (controller, slot)
}
