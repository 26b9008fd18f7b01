//! # Rule Model
//!
//! Raw, unvalidated content of a rule source: store declarations and the
//! ordered rule-set for each cache mode.
//!
//! ```json
//! {
//!   "stores": {
//!     "redis1": { "type": "redis", "config": { "server": "127.0.0.1" } }
//!   },
//!   "rules": {
//!     "application": [
//!       { "conditions": { "name": "core/stats" }, "stores": ["redis1"] },
//!       { "stores": ["file1"] }
//!     ],
//!     "session": [],
//!     "request": []
//!   }
//! }
//! ```

pub mod source;

use crate::constants::source::NAME_CONDITION;
use crate::constants::CacheMode;
use crate::models::Definition;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub use source::{RuleSource, RuleSourceLoader};

/// Accept a JSON object, or `[]` as an empty object
///
/// Rule files exported by some hosts encode every empty map as `[]`. Any
/// other non-object value is rejected.
fn object_or_empty_array<E: de::Error>(value: Value, field: &str) -> Result<Map<String, Value>, E> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Array(items) if items.is_empty() => Ok(Map::new()),
        other => Err(E::custom(format!(
            "{field} must be an object, got {}",
            json_type(&other)
        ))),
    }
}

/// Records (store declarations, rules) must be objects; positional arrays are rejected
fn record_object<E: de::Error>(value: Value, field: &str) -> Result<Value, E> {
    match value {
        Value::Object(_) => Ok(value),
        other => Err(E::custom(format!(
            "{field} must be an object, got {}",
            json_type(&other)
        ))),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn deserialize_store_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, StoreDecl>, D::Error>
where
    D: Deserializer<'de>,
{
    let map = object_or_empty_array::<D::Error>(Value::deserialize(deserializer)?, "stores")?;

    map.into_iter()
        .map(|(name, decl)| {
            let decl = record_object::<D::Error>(decl, &format!("store '{name}'"))?;
            serde_json::from_value::<StoreDecl>(decl)
                .map(|decl| (name.clone(), decl))
                .map_err(|e| <D::Error as de::Error>::custom(format!("store '{name}': {e}")))
        })
        .collect()
}

fn deserialize_store_config<'de, D>(deserializer: D) -> Result<Option<Map<String, Value>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        value => object_or_empty_array(value, "config").map(Some),
    }
}

fn deserialize_rule_sets<'de, D>(deserializer: D) -> Result<RuleSets, D::Error>
where
    D: Deserializer<'de>,
{
    let map = object_or_empty_array::<D::Error>(Value::deserialize(deserializer)?, "rules")?;
    serde_json::from_value(Value::Object(map)).map_err(de::Error::custom)
}

fn deserialize_rule_list<'de, D>(deserializer: D) -> Result<Vec<Rule>, D::Error>
where
    D: Deserializer<'de>,
{
    Vec::<Value>::deserialize(deserializer)?
        .into_iter()
        .enumerate()
        .map(|(index, rule)| {
            let rule = record_object::<D::Error>(rule, &format!("rule {index}"))?;
            serde_json::from_value::<Rule>(rule)
                .map_err(|e| <D::Error as de::Error>::custom(format!("rule {index}: {e}")))
        })
        .collect()
}

fn deserialize_conditions<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    object_or_empty_array(Value::deserialize(deserializer)?, "conditions")
}

/// Parsed rule source, immutable once loaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawConfig {
    #[serde(deserialize_with = "deserialize_store_map")]
    pub stores: BTreeMap<String, StoreDecl>,
    #[serde(deserialize_with = "deserialize_rule_sets")]
    pub rules: RuleSets,
}

/// User-declared store, validated by the store registry builder
///
/// Both keys are optional here so that a missing one surfaces as an invalid
/// store declaration rather than a malformed source.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StoreDecl {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub store_type: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_store_config",
        skip_serializing_if = "Option::is_none"
    )]
    pub config: Option<Map<String, Value>>,
}

impl StoreDecl {
    pub fn new<T: Into<String>>(store_type: T, config: Map<String, Value>) -> Self {
        Self {
            store_type: Some(store_type.into()),
            config: Some(config),
        }
    }
}

/// Ordered rules for each mode; a missing mode is an empty rule-set
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RuleSets {
    #[serde(default, deserialize_with = "deserialize_rule_list")]
    pub application: Vec<Rule>,
    #[serde(default, deserialize_with = "deserialize_rule_list")]
    pub session: Vec<Rule>,
    #[serde(default, deserialize_with = "deserialize_rule_list")]
    pub request: Vec<Rule>,
}

impl RuleSets {
    pub fn for_mode(&self, mode: CacheMode) -> &[Rule] {
        match mode {
            CacheMode::Application => &self.application,
            CacheMode::Session => &self.session,
            CacheMode::Request => &self.request,
        }
    }
}

/// Conditional store selection
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Rule {
    /// Empty means unconditional
    #[serde(
        default,
        deserialize_with = "deserialize_conditions",
        skip_serializing_if = "Map::is_empty"
    )]
    pub conditions: Map<String, Value>,
    /// Highest priority first
    pub stores: Vec<String>,
}

impl Rule {
    pub fn unconditional<S: Into<String>>(stores: impl IntoIterator<Item = S>) -> Self {
        Self {
            conditions: Map::new(),
            stores: stores.into_iter().map(Into::into).collect(),
        }
    }

    pub fn with_condition<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.conditions.insert(key.into(), value.into());
        self
    }

    pub fn is_unconditional(&self) -> bool {
        self.conditions.is_empty()
    }

    /// True when every condition holds for the definition
    ///
    /// A condition holds if the definition declares the attribute with a
    /// strictly equal value, or if the key is `name` and the value is the
    /// definition's own name.
    pub fn matches(&self, definition: &Definition) -> bool {
        self.conditions.iter().all(|(key, expected)| {
            definition.attribute_matches(key, expected)
                || (key == NAME_CONDITION && expected.as_str() == Some(definition.name.as_str()))
        })
    }
}
