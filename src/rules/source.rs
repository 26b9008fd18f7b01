//! Rule Source Loader
//!
//! Obtains the raw rule configuration from exactly one source: an in-memory
//! override, a path override, or the default rule file from settings.
//! Local, synchronous reads only; the rule source is never written.

use super::RawConfig;
use crate::config::ResolverSettings;
use crate::constants::source::{RULES_KEY, STORES_KEY};
use crate::error::{ResolutionError, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name reported in errors for an in-memory override
const INLINE_SOURCE_NAME: &str = "<in-memory override>";

/// Where the rules come from
///
/// Setting both overrides is a configuration mistake reported as
/// [`ResolutionError::ConflictingSource`] when the source is loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSource {
    pub inline: Option<Value>,
    pub path: Option<PathBuf>,
}

impl RuleSource {
    /// Use the default rule file from settings
    pub fn default_location() -> Self {
        Self::default()
    }

    pub fn inline(value: Value) -> Self {
        Self {
            inline: Some(value),
            path: None,
        }
    }

    pub fn path<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            inline: None,
            path: Some(path.into()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RuleSourceLoader {
    source: RuleSource,
    settings: ResolverSettings,
}

impl RuleSourceLoader {
    pub fn new(source: RuleSource, settings: ResolverSettings) -> Self {
        Self { source, settings }
    }

    pub fn source(&self) -> &RuleSource {
        &self.source
    }

    /// Load and parse the rule source
    pub fn load_raw_config(&self) -> Result<RawConfig> {
        match (&self.source.inline, &self.source.path) {
            (Some(_), Some(path)) => Err(ResolutionError::conflicting_source(path)),
            (Some(inline), None) => {
                debug!("Loading rules from in-memory override");
                Self::parse(INLINE_SOURCE_NAME, inline.clone())
            }
            (None, path) => {
                let path = path
                    .clone()
                    .unwrap_or_else(|| self.settings.default_rule_path.clone());
                debug!(path = %path.display(), "Loading rules from file");
                let content = self.read_rule_file_safely(&path)?;
                let value: Value = serde_json::from_str(&content).map_err(|e| {
                    ResolutionError::malformed_source(path.display().to_string(), e)
                })?;
                Self::parse(path.display().to_string(), value)
            }
        }
    }

    /// Read the rule file with a size limit and regular-file check
    fn read_rule_file_safely(&self, path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(ResolutionError::missing_source(path));
        }

        let source_name = path.display().to_string();
        let metadata = std::fs::metadata(path)
            .map_err(|e| ResolutionError::malformed_source(&source_name, e))?;

        if !metadata.is_file() {
            return Err(ResolutionError::malformed_source(
                source_name,
                "rule source must be a regular file",
            ));
        }

        let limit = self.settings.max_rule_file_bytes;
        if metadata.len() > limit {
            return Err(ResolutionError::malformed_source(
                source_name,
                format!(
                    "rule file too large ({} bytes > {} byte limit)",
                    metadata.len(),
                    limit
                ),
            ));
        }

        std::fs::read_to_string(path).map_err(|e| ResolutionError::malformed_source(source_name, e))
    }

    /// Check the top-level structure and deserialize
    fn parse<S: Into<String>>(source_name: S, value: Value) -> Result<RawConfig> {
        let source_name = source_name.into();

        let Some(object) = value.as_object() else {
            return Err(ResolutionError::malformed_source(
                source_name,
                "rule source must be an object",
            ));
        };

        for key in [STORES_KEY, RULES_KEY] {
            if !object.contains_key(key) {
                return Err(ResolutionError::malformed_source(
                    source_name,
                    format!("missing required key '{key}'"),
                ));
            }
        }

        serde_json::from_value(value).map_err(|e| ResolutionError::malformed_source(source_name, e))
    }
}
