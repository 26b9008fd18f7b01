//! # Resolver Settings
//!
//! Settings for the resolver itself, as opposed to the rule file it reads.
//! Values are layered: built-in defaults first, then `CACHE_RULES_*`
//! environment variables.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cache_rules::config::ResolverSettings;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = ResolverSettings::from_env()?;
//! println!("Default rule file: {}", settings.default_rule_path.display());
//! # Ok(())
//! # }
//! ```
//!
//! | Variable                          | Setting               |
//! |-----------------------------------|-----------------------|
//! | `CACHE_RULES_DEFAULT_RULE_PATH`   | `default_rule_path`   |
//! | `CACHE_RULES_MAX_RULE_FILE_BYTES` | `max_rule_file_bytes` |
//! | `CACHE_RULES_ENVIRONMENT`         | `environment`         |

use crate::constants::source::{DEFAULT_RULE_PATH, MAX_RULE_FILE_BYTES};
use crate::error::{ResolutionError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::debug;

pub const ENV_PREFIX: &str = "CACHE_RULES";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolverSettings {
    /// Rule file read when no override is supplied
    pub default_rule_path: PathBuf,
    /// Upper bound on the rule file size
    pub max_rule_file_bytes: u64,
    /// Deployment environment; `production` logs at info, anything else at debug
    pub environment: String,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            default_rule_path: PathBuf::from(DEFAULT_RULE_PATH),
            max_rule_file_bytes: MAX_RULE_FILE_BYTES,
            environment: "development".to_string(),
        }
    }
}

impl ResolverSettings {
    /// Load settings from the process environment
    pub fn from_env() -> Result<Self> {
        Self::build(::config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
    }

    /// Load settings from an explicit variable map instead of the process environment
    ///
    /// Keys use the same `CACHE_RULES_*` names as [`from_env`](Self::from_env).
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self> {
        Self::build(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .source(Some(vars)),
        )
    }

    fn build(environment: ::config::Environment) -> Result<Self> {
        let defaults = Self::default();

        let settings: Self = ::config::Config::builder()
            .set_default(
                "default_rule_path",
                defaults.default_rule_path.display().to_string(),
            )
            .and_then(|b| b.set_default("max_rule_file_bytes", defaults.max_rule_file_bytes))
            .and_then(|b| b.set_default("environment", defaults.environment))
            .map_err(ResolutionError::settings)?
            .add_source(environment)
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(ResolutionError::settings)?;

        if settings.max_rule_file_bytes == 0 {
            return Err(ResolutionError::settings(
                "max_rule_file_bytes must be greater than zero",
            ));
        }

        debug!(
            default_rule_path = %settings.default_rule_path.display(),
            max_rule_file_bytes = settings.max_rule_file_bytes,
            environment = %settings.environment,
            "Resolver settings loaded"
        );

        Ok(settings)
    }
}
