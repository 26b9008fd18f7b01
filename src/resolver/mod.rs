//! # Resolution Pipeline
//!
//! ```text
//! FallbackController
//!   └── ConfigProvider::load (RuleConfigProvider::assemble)
//!         ├── RuleSourceLoader::load_raw_config
//!         ├── StoreRegistryBuilder::build_stores
//!         ├── default_mode_mappings
//!         ├── resolve_definitions
//!         └── default_locks
//! ```
//!
//! Every entity is rebuilt on each call; nothing is cached between runs.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cache_rules::config::ResolverSettings;
//! use cache_rules::host::{StaticDefinitionRegistry, StaticSiteIdentifier};
//! use cache_rules::registry::StorePluginRegistry;
//! use cache_rules::resolver::{FallbackController, ResolutionOutcome, RuleConfigProvider};
//! use cache_rules::rules::{RuleSource, RuleSourceLoader};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = ResolverSettings::from_env()?;
//! let provider = RuleConfigProvider::new(
//!     RuleSourceLoader::new(RuleSource::default_location(), settings),
//!     StorePluginRegistry::with_builtin_plugins(),
//!     StaticDefinitionRegistry::default(),
//!     StaticSiteIdentifier::new("site-1"),
//! );
//!
//! let mut controller = FallbackController::new(provider);
//! match controller.resolve_with_fallback() {
//!     ResolutionOutcome::Resolved(config) => println!("{} stores", config.stores.len()),
//!     ResolutionOutcome::UseNativeConfiguration => {
//!         eprintln!("falling back: {:?}", controller.last_resolution_error());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod assembler;
pub mod definition_resolver;
pub mod diagnostics;
pub mod fallback;
pub mod locks;
pub mod mode_mapping;
pub mod store_builder;

pub use assembler::{ConfigProvider, RuleConfigProvider};
pub use definition_resolver::{resolve_definitions, DefinitionResolution};
pub use diagnostics::{DiagnosticRecord, DiagnosticSlot};
pub use fallback::{FallbackController, ResolutionOutcome};
pub use locks::default_locks;
pub use mode_mapping::default_mode_mappings;
pub use store_builder::StoreRegistryBuilder;
