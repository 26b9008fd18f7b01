//! # Registry Infrastructure
//!
//! Explicit registry of store plugins, keyed by type name.
//!
//! ## Overview
//!
//! A store declaration names its plugin by type (`"file"`, `"redis"`, ...).
//! The registry maps that name to a registered [`StorePlugin`], which reports
//! its capabilities and instantiates store handles. Lookups of unregistered
//! types fail with [`ResolutionError::UnknownStoreType`].
//!
//! ## Architecture
//!
//! ```text
//! Registry Infrastructure
//! ├── StorePluginRegistry   (type name -> plugin lookup)
//! ├── StorePlugin           (capabilities + instantiation, host supplied)
//! └── builtin               (file, session, static plugins)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use cache_rules::registry::StorePluginRegistry;
//!
//! let registry = StorePluginRegistry::with_builtin_plugins();
//! assert!(registry.contains("file"));
//! assert!(!registry.contains("nosuchstore"));
//! ```
//!
//! [`ResolutionError::UnknownStoreType`]: crate::error::ResolutionError::UnknownStoreType

pub mod builtin;
pub mod plugin_registry;

// Re-export main types for easy access
pub use builtin::{FileStorePlugin, SessionStorePlugin, StaticStorePlugin};
pub use plugin_registry::{PluginError, StoreHandle, StorePlugin, StorePluginRegistry};
