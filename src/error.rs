//! # Resolution Errors
//!
//! Error taxonomy for rule loading, store building and definition resolution.
//!
//! Every variant is recoverable at the [`FallbackController`] boundary: no
//! component below it catches or suppresses errors. `UnsupportedMode` is the
//! one exception to fail-the-whole-assembly, since it only affects a single
//! definition and is collected as an inclusion error.
//!
//! [`FallbackController`]: crate::resolver::FallbackController

use std::path::Path;
use thiserror::Error;

/// Errors produced while resolving a cache configuration from a rule source
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolutionError {
    /// Both an in-memory override and a path override were supplied
    #[error("Conflicting rule sources: an in-memory override and a path override ('{path}') are both set")]
    ConflictingSource { path: String },

    /// The rule source exists but does not have the expected structure
    #[error("Malformed rule source '{source_name}': {reason}")]
    MalformedSource { source_name: String, reason: String },

    /// The rule file could not be found
    #[error("Rule source not found at '{path}'")]
    MissingSource { path: String },

    /// A store declaration is missing a required key
    #[error("Invalid declaration for store '{store}': missing required key '{missing_key}'")]
    InvalidStoreDecl { store: String, missing_key: String },

    /// The declared plugin type is not registered
    #[error("Store '{store}' references unknown store type '{store_type}'")]
    UnknownStoreType { store: String, store_type: String },

    /// The plugin could not be instantiated or reported not ready
    #[error("Store '{store}' of type '{store_type}' is not ready: {reason}")]
    StoreNotReady {
        store: String,
        store_type: String,
        reason: String,
    },

    /// A definition declared a mode outside application/session/request
    #[error("Definition '{definition}' has unsupported cache mode '{mode}'")]
    UnsupportedMode { definition: String, mode: String },

    /// Resolver settings could not be loaded
    #[error("Invalid resolver settings: {reason}")]
    Settings { reason: String },
}

impl ResolutionError {
    /// Create a conflicting source error
    pub fn conflicting_source<P: AsRef<Path>>(path: P) -> Self {
        Self::ConflictingSource {
            path: path.as_ref().display().to_string(),
        }
    }

    /// Create a malformed source error
    pub fn malformed_source<S: Into<String>, R: std::fmt::Display>(source_name: S, reason: R) -> Self {
        Self::MalformedSource {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a missing source error
    pub fn missing_source<P: AsRef<Path>>(path: P) -> Self {
        Self::MissingSource {
            path: path.as_ref().display().to_string(),
        }
    }

    /// Create an invalid store declaration error
    pub fn invalid_store_decl<S: Into<String>, K: Into<String>>(store: S, missing_key: K) -> Self {
        Self::InvalidStoreDecl {
            store: store.into(),
            missing_key: missing_key.into(),
        }
    }

    /// Create an unknown store type error
    pub fn unknown_store_type<S: Into<String>, T: Into<String>>(store: S, store_type: T) -> Self {
        Self::UnknownStoreType {
            store: store.into(),
            store_type: store_type.into(),
        }
    }

    /// Create a store not ready error
    pub fn store_not_ready<S: Into<String>, T: Into<String>, R: std::fmt::Display>(
        store: S,
        store_type: T,
        reason: R,
    ) -> Self {
        Self::StoreNotReady {
            store: store.into(),
            store_type: store_type.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an unsupported mode error
    pub fn unsupported_mode<D: Into<String>, M: Into<String>>(definition: D, mode: M) -> Self {
        Self::UnsupportedMode {
            definition: definition.into(),
            mode: mode.into(),
        }
    }

    /// Create a settings error
    pub fn settings<R: std::fmt::Display>(reason: R) -> Self {
        Self::Settings {
            reason: reason.to_string(),
        }
    }

    /// Stable short code for diagnostics output
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ConflictingSource { .. } => "conflicting_source",
            Self::MalformedSource { .. } => "malformed_source",
            Self::MissingSource { .. } => "missing_source",
            Self::InvalidStoreDecl { .. } => "invalid_store_decl",
            Self::UnknownStoreType { .. } => "unknown_store_type",
            Self::StoreNotReady { .. } => "store_not_ready",
            Self::UnsupportedMode { .. } => "unsupported_mode",
            Self::Settings { .. } => "settings",
        }
    }
}

pub type Result<T> = std::result::Result<T, ResolutionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_context() {
        let err = ResolutionError::unknown_store_type("redis1", "nosuchstore");
        assert_eq!(
            err.to_string(),
            "Store 'redis1' references unknown store type 'nosuchstore'"
        );

        let err = ResolutionError::invalid_store_decl("file1", "config");
        assert!(err.to_string().contains("missing required key 'config'"));
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            ResolutionError::conflicting_source("/tmp/rules.json").kind(),
            "conflicting_source"
        );
        assert_eq!(
            ResolutionError::missing_source("rules.json").kind(),
            "missing_source"
        );
        assert_eq!(
            ResolutionError::unsupported_mode("core/foo", "galaxy").kind(),
            "unsupported_mode"
        );
    }
}
