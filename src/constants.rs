//! # System Constants
//!
//! Reserved store names, lock identifiers and the cache mode enum shared by
//! every resolution component.
//!
//! These values must stay in lockstep with the host cache layer, which reads
//! the assembled configuration verbatim.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reserved default store names
pub mod stores {
    pub const DEFAULT_APPLICATION: &str = "default_application";
    pub const DEFAULT_SESSION: &str = "default_session";
    pub const DEFAULT_REQUEST: &str = "default_request";

    /// Lock name attached to every declared store record
    pub const DEFAULT_STORE_LOCK: &str = "default_file_lock";

    /// Prefix of the backing implementation identifier for a plugin type
    pub const BACKING_CLASS_PREFIX: &str = "cachestore_";
}

/// Static lock table values
pub mod locks {
    pub const DEFAULT_LOCK_NAME: &str = "cachelock_file_default";
    pub const DEFAULT_LOCK_TYPE: &str = "cachelock_file";
    pub const DEFAULT_LOCK_DIRECTORY: &str = "filelocks";
}

/// Sort priorities used in generated mappings
pub mod sort {
    /// Mode-level default mappings sort below anything produced from rules
    pub const MODE_DEFAULT_SORT: i64 = -1;
}

/// Rule source keys
pub mod source {
    pub const STORES_KEY: &str = "stores";
    pub const RULES_KEY: &str = "rules";
    pub const STORE_TYPE_KEY: &str = "type";
    pub const STORE_CONFIG_KEY: &str = "config";

    /// Condition key matched against the definition's own name
    pub const NAME_CONDITION: &str = "name";

    pub const DEFAULT_RULE_PATH: &str = "config/cache-rules.json";
    pub const MAX_RULE_FILE_BYTES: u64 = 10 * 1024 * 1024;
}

/// Cache scope a definition lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheMode {
    Application,
    Session,
    Request,
}

impl CacheMode {
    pub const ALL: [CacheMode; 3] = [Self::Application, Self::Session, Self::Request];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Application => "application",
            Self::Session => "session",
            Self::Request => "request",
        }
    }

    /// Bit value of this mode in a [`ModeSet`](crate::models::ModeSet)
    pub fn bit(&self) -> u32 {
        match self {
            Self::Application => 1,
            Self::Session => 2,
            Self::Request => 4,
        }
    }

    /// Reserved default store backing this mode
    pub fn default_store(&self) -> &'static str {
        match self {
            Self::Application => stores::DEFAULT_APPLICATION,
            Self::Session => stores::DEFAULT_SESSION,
            Self::Request => stores::DEFAULT_REQUEST,
        }
    }
}

impl fmt::Display for CacheMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CacheMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "application" => Ok(Self::Application),
            "session" => Ok(Self::Session),
            "request" => Ok(Self::Request),
            other => Err(format!("unknown cache mode '{other}'")),
        }
    }
}
