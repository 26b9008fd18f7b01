use serde::{Deserialize, Serialize};

/// Lock implementation available to stores
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lock {
    pub name: String,
    #[serde(rename = "type")]
    pub lock_type: String,
    pub directory: String,
    pub is_default: bool,
}
