//! # Configuration Models
//!
//! Records produced by the resolution pipeline and consumed by the host cache
//! layer: store records, mode and definition mappings, locks, and the final
//! [`Configuration`] snapshot.

pub mod capabilities;
pub mod configuration;
pub mod definition;
pub mod lock;
pub mod mapping;
pub mod store;

// Re-export core models for easy access
pub use capabilities::{ModeSet, StoreFeatures};
pub use configuration::Configuration;
pub use definition::Definition;
pub use lock::Lock;
pub use mapping::{DefinitionMapping, ModeMapping};
pub use store::StoreRecord;
