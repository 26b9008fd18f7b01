use cache_rules::models::Definition;
use cache_rules::CacheMode;
use proptest::prelude::*;
use proptest::strategy::Just;
use serde_json::{json, Value};

/// Strategy for generating cache modes
pub fn cache_mode_strategy() -> impl Strategy<Value = CacheMode> {
    prop_oneof![
        Just(CacheMode::Application),
        Just(CacheMode::Session),
        Just(CacheMode::Request),
    ]
}

/// Strategy for generating definition names in component/area form
pub fn definition_name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,15}/[a-z][a-z0-9_]{0,15}"
}

/// Strategy for generating definitions with an optional region attribute
pub fn definition_strategy() -> impl Strategy<Value = Definition> {
    (
        definition_name_strategy(),
        cache_mode_strategy(),
        prop::option::of(prop_oneof![Just("au"), Just("eu"), Just("us")]),
    )
        .prop_map(|(name, mode, region)| {
            let definition = Definition::new(name, mode);
            match region {
                Some(region) => definition.with_attribute("region", region),
                None => definition,
            }
        })
}

pub fn definitions_strategy() -> impl Strategy<Value = Vec<Definition>> {
    prop::collection::vec(definition_strategy(), 0..12)
}

/// Strategy for generating one rule over the built-in default stores
pub fn rule_strategy() -> impl Strategy<Value = Value> {
    let stores = prop::sample::subsequence(
        vec!["default_application", "default_session", "default_request"],
        1..=3,
    );
    let conditions = prop_oneof![
        Just(json!({})),
        Just(json!({"region": "au"})),
        Just(json!({"region": "eu"})),
        Just(json!({"region": "au", "mode": "application"})),
    ];

    (conditions, stores).prop_map(|(conditions, stores)| {
        json!({"conditions": conditions, "stores": stores})
    })
}

/// Strategy for generating a well-formed rule document
pub fn rule_document_strategy() -> impl Strategy<Value = Value> {
    (
        prop::collection::vec(rule_strategy(), 0..4),
        prop::collection::vec(rule_strategy(), 0..4),
        prop::collection::vec(rule_strategy(), 0..4),
    )
        .prop_map(|(application, session, request)| {
            json!({
                "stores": {"static1": {"type": "static", "config": {}}},
                "rules": {
                    "application": application,
                    "session": session,
                    "request": request,
                }
            })
        })
}

/// Strategy for generating documents missing a required top-level key
pub fn incomplete_document_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(json!({})),
        Just(json!({"stores": {}})),
        Just(json!({"rules": {}})),
        Just(json!([])),
        Just(json!("rules")),
        Just(json!({"store": {}, "rule": {}})),
    ]
}
