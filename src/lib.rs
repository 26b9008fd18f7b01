#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

//! # Cache Rules Core
//!
//! Rule-driven resolution of cache definitions to backing stores.
//!
//! ## Overview
//!
//! A host cache layer knows a set of cache *definitions* (named usage sites,
//! each in the application, session or request mode) and a set of installed
//! store plugins. This crate reads a declarative rule file, instantiates the
//! stores it declares, and maps every definition to an ordered list of stores
//! through first-match-wins rules. Every mode always keeps a default store
//! mapping, and any failure degrades to the host's native configuration
//! instead of breaking the cache.
//!
//! ## Module Organization
//!
//! - [`rules`] - Rule file model and the rule source loader
//! - [`registry`] - Store plugin registry and built-in plugins
//! - [`host`] - Interfaces consumed from the host application
//! - [`resolver`] - Store building, definition resolution, assembly and fallback
//! - [`models`] - Store records, mappings, locks and the final configuration
//! - [`config`] - Resolver settings
//! - [`error`] - Structured error handling
//! - [`logging`] - Structured logging setup
//!
//! ## Quick Start
//!
//! ```rust
//! use cache_rules::config::ResolverSettings;
//! use cache_rules::host::{StaticDefinitionRegistry, StaticSiteIdentifier};
//! use cache_rules::models::Definition;
//! use cache_rules::registry::StorePluginRegistry;
//! use cache_rules::resolver::{FallbackController, RuleConfigProvider};
//! use cache_rules::rules::{RuleSource, RuleSourceLoader};
//! use cache_rules::CacheMode;
//! use serde_json::json;
//!
//! let rules = json!({
//!     "stores": {"static1": {"type": "static", "config": {}}},
//!     "rules": {"request": [{"stores": ["static1"]}]}
//! });
//!
//! let provider = RuleConfigProvider::new(
//!     RuleSourceLoader::new(RuleSource::inline(rules), ResolverSettings::default()),
//!     StorePluginRegistry::with_builtin_plugins(),
//!     StaticDefinitionRegistry::new([Definition::new("core/request_data", CacheMode::Request)]),
//!     StaticSiteIdentifier::new("site-1"),
//! );
//!
//! let mut controller = FallbackController::new(provider);
//! let outcome = controller.resolve_with_fallback();
//! let config = outcome.configuration().expect("rules resolve");
//! assert_eq!(config.mappings_for("core/request_data"), vec!["static1"]);
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod host;
pub mod logging;
pub mod models;
pub mod registry;
pub mod resolver;
pub mod rules;

pub use constants::CacheMode;
pub use error::{ResolutionError, Result};
pub use models::{
    Configuration, Definition, DefinitionMapping, Lock, ModeMapping, ModeSet, StoreFeatures,
    StoreRecord,
};
pub use resolver::{ConfigProvider, FallbackController, ResolutionOutcome, RuleConfigProvider};
