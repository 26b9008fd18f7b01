//! Cache definitions supplied by the host's definition registry.

use crate::constants::CacheMode;
use crate::error::{ResolutionError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A named cache usage site with a declared mode
///
/// The mode is kept as the raw string the host declared. It is only parsed
/// when the definition is resolved, so a single bad definition cannot stop the
/// others from being mapped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    pub name: String,
    pub mode: String,
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

impl Definition {
    pub fn new<N: Into<String>>(name: N, mode: CacheMode) -> Self {
        Self::with_raw_mode(name, mode.as_str())
    }

    /// Build a definition whose mode has not been validated
    pub fn with_raw_mode<N: Into<String>, M: Into<String>>(name: N, mode: M) -> Self {
        Self {
            name: name.into(),
            mode: mode.into(),
            attributes: Map::new(),
        }
    }

    pub fn with_attribute<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn cache_mode(&self) -> Result<CacheMode> {
        self.mode
            .parse()
            .map_err(|_| ResolutionError::unsupported_mode(&self.name, &self.mode))
    }

    /// Strict equality check of a declared attribute against a rule value
    ///
    /// `mode` is always available as an attribute: when it is not declared
    /// explicitly, the definition's own mode string is compared instead.
    pub fn attribute_matches(&self, key: &str, expected: &Value) -> bool {
        match self.attributes.get(key) {
            Some(actual) => actual == expected,
            None if key == "mode" => expected.as_str() == Some(self.mode.as_str()),
            None => false,
        }
    }
}
