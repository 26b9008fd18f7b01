//! End-to-end rule resolution through the public API

mod common;

use cache_rules::constants::locks::DEFAULT_LOCK_NAME;
use cache_rules::models::{Definition, DefinitionMapping};
use cache_rules::resolver::ConfigProvider;
use cache_rules::rules::RuleSource;
use cache_rules::{CacheMode, ResolutionError};
use common::*;
use serde_json::json;
use std::io::Write;
use tempfile::NamedTempFile;

fn redis_rules() -> serde_json::Value {
    json!({
        "stores": {
            "redis1": {"type": "redis", "config": {"server": "127.0.0.1:6379"}}
        },
        "rules": {
            "application": [
                {"conditions": {"mode": "application"}, "stores": ["redis1"]}
            ]
        }
    })
}

#[test]
fn test_single_store_rule_maps_application_definition() {
    let mut provider = inline_provider(
        redis_rules(),
        vec![Definition::new("stats_cache", CacheMode::Application)],
    );

    let config = provider.load().unwrap();

    assert_eq!(
        config.definition_mappings,
        vec![DefinitionMapping {
            id: 0,
            store: "redis1".to_string(),
            definition: "stats_cache".to_string(),
            sort: 1,
        }]
    );
    assert_eq!(config.mode_mappings.len(), 3);
    for mode in CacheMode::ALL {
        let mapping = config.mode_mapping(mode).unwrap();
        assert_eq!(mapping.store, mode.default_store());
        assert_eq!(mapping.sort, -1);
    }

    let redis = &config.stores["redis1"];
    assert_eq!(redis.plugin_type, "redis");
    assert_eq!(redis.backing_class, "cachestore_redis");
    assert!(!redis.is_default);
    assert!(!redis.mappings_only);
    assert!(redis.supported_modes.supports(CacheMode::Application));
}

#[test]
fn test_conflicting_source_overrides_fail() {
    let source = RuleSource {
        inline: Some(redis_rules()),
        path: Some("/tmp/cache-rules.json".into()),
    };
    let mut provider = provider_for(source, vec![]);

    assert!(matches!(
        provider.load(),
        Err(ResolutionError::ConflictingSource { .. })
    ));
}

#[test]
fn test_unknown_store_type_aborts_assembly() {
    let mut provider = inline_provider(
        json!({
            "stores": {"x": {"type": "nosuchstore", "config": {}}},
            "rules": {}
        }),
        vec![Definition::new("core/x", CacheMode::Application)],
    );

    assert_eq!(
        provider.load(),
        Err(ResolutionError::unknown_store_type("x", "nosuchstore"))
    );
}

#[test]
fn test_all_conditions_must_hold() {
    let mut provider = inline_provider(
        json!({
            "stores": {},
            "rules": {
                "application": [
                    {"conditions": {"name": "stats_cache", "region": "au"}, "stores": ["default_session"]},
                    {"conditions": {"region": "eu"}, "stores": ["default_application"]}
                ]
            }
        }),
        vec![Definition::new("stats_cache", CacheMode::Application).with_attribute("region", "eu")],
    );

    let config = provider.load().unwrap();
    assert_eq!(config.mappings_for("stats_cache"), vec!["default_application"]);
}

#[test]
fn test_unmatched_definition_falls_back_to_mode_default() {
    let mut provider = inline_provider(
        json!({
            "stores": {},
            "rules": {
                "application": [
                    {"conditions": {"name": "stats_cache", "region": "au"}, "stores": ["default_session"]}
                ]
            }
        }),
        vec![Definition::new("stats_cache", CacheMode::Application).with_attribute("region", "eu")],
    );

    let config = provider.load().unwrap();
    assert!(config.definition_mappings.is_empty());
    assert_eq!(
        config.mode_mapping(CacheMode::Application).map(|m| m.store.as_str()),
        Some("default_application")
    );
}

#[test]
fn test_rule_order_is_significant() {
    let mut provider = inline_provider(
        json!({
            "stores": {"static1": {"type": "static", "config": {}}},
            "rules": {
                "request": [
                    {"stores": ["static1"]},
                    {"conditions": {"name": "core/req"}, "stores": ["default_request"]}
                ]
            }
        }),
        vec![Definition::new("core/req", CacheMode::Request)],
    );

    let config = provider.load().unwrap();
    assert_eq!(config.mappings_for("core/req"), vec!["static1"]);
}

#[test]
fn test_multi_store_rule_sorts_first_store_highest() {
    let mut provider = inline_provider(
        json!({
            "stores": {"redis1": {"type": "redis", "config": {"server": "cache:6379"}}},
            "rules": {
                "session": [{"stores": ["redis1", "default_session", "default_application"]}]
            }
        }),
        vec![Definition::new("core/session", CacheMode::Session)],
    );

    let config = provider.load().unwrap();
    let sorts: Vec<(&str, i64)> = config
        .definition_mappings
        .iter()
        .map(|m| (m.store.as_str(), m.sort))
        .collect();
    assert_eq!(
        sorts,
        vec![
            ("redis1", 3),
            ("default_session", 2),
            ("default_application", 1)
        ]
    );
    assert_eq!(
        config.mappings_for("core/session"),
        vec!["redis1", "default_session", "default_application"]
    );
}

#[test]
fn test_empty_rule_set_produces_no_mappings_for_any_mode() {
    let definitions = vec![
        Definition::new("core/app", CacheMode::Application),
        Definition::new("core/session", CacheMode::Session),
        Definition::new("core/request", CacheMode::Request),
    ];
    let mut provider = inline_provider(
        json!({"stores": {}, "rules": {"application": [], "session": [], "request": []}}),
        definitions,
    );

    let config = provider.load().unwrap();
    assert!(config.definition_mappings.is_empty());
    assert_eq!(config.definitions.len(), 3);
    assert_eq!(config.mode_mappings.len(), 3);
}

#[test]
fn test_default_stores_always_present() {
    let mut provider = inline_provider(json!({"stores": [], "rules": {}}), vec![]);

    let config = provider.load().unwrap();
    for mode in CacheMode::ALL {
        let store = &config.stores[mode.default_store()];
        assert!(store.is_default);
        assert!(store.supported_modes.supports(mode));
    }
    assert_eq!(config.site_identifier, SITE_ID);
}

#[test]
fn test_declared_default_name_is_replaced_by_default_store() {
    let mut provider = inline_provider(
        json!({
            "stores": {"default_request": {"type": "redis", "config": {"server": "cache:6379"}}},
            "rules": {}
        }),
        vec![],
    );

    let config = provider.load().unwrap();
    let store = &config.stores["default_request"];
    assert!(store.is_default);
    assert_eq!(store.plugin_type, "static");
}

#[test]
fn test_store_missing_config_is_invalid() {
    let mut provider = inline_provider(
        json!({"stores": {"redis1": {"type": "redis"}}, "rules": {}}),
        vec![],
    );

    assert_eq!(
        provider.load(),
        Err(ResolutionError::invalid_store_decl("redis1", "config"))
    );
}

#[test]
fn test_store_rejecting_configuration_is_not_ready() {
    let mut provider = inline_provider(
        json!({"stores": {"redis1": {"type": "redis", "config": {}}}, "rules": {}}),
        vec![],
    );

    assert!(matches!(
        provider.load(),
        Err(ResolutionError::StoreNotReady { ref store, .. }) if store == "redis1"
    ));
}

#[test]
fn test_unsupported_definition_mode_is_excluded() {
    let mut provider = inline_provider(
        json!({"stores": {}, "rules": {"application": [{"stores": ["default_application"]}]}}),
        vec![
            Definition::with_raw_mode("core/odd", "galaxy"),
            Definition::new("core/app", CacheMode::Application),
        ],
    );

    let config = provider.load().unwrap();
    assert_eq!(config.mappings_for("core/app"), vec!["default_application"]);
    assert!(config.mappings_for("core/odd").is_empty());
    assert_eq!(
        provider.inclusion_errors(),
        &[ResolutionError::unsupported_mode("core/odd", "galaxy")]
    );
}

#[test]
fn test_default_lock_is_present() {
    let mut provider = inline_provider(json!({"stores": {}, "rules": {}}), vec![]);

    let config = provider.load().unwrap();
    let lock = config.default_lock().unwrap();
    assert_eq!(lock.name, DEFAULT_LOCK_NAME);
    assert_eq!(config.locks.len(), 1);
}

#[test]
fn test_repeated_loads_are_identical() {
    let definitions = vec![
        Definition::new("core/b", CacheMode::Application).with_attribute("region", "au"),
        Definition::new("core/a", CacheMode::Application),
        Definition::new("core/c", CacheMode::Request),
    ];
    let mut provider = inline_provider(
        json!({
            "stores": {"redis1": {"type": "redis", "config": {"server": "cache:6379"}}},
            "rules": {
                "application": [
                    {"conditions": {"region": "au"}, "stores": ["redis1", "default_application"]},
                    {"stores": ["default_application"]}
                ],
                "request": [{"stores": ["default_request"]}]
            }
        }),
        definitions,
    );

    let first = provider.load().unwrap();
    let second = provider.load().unwrap();
    assert_eq!(first, second);

    let ids: Vec<usize> = first.definition_mappings.iter().map(|m| m.id).collect();
    assert_eq!(ids, (0..first.definition_mappings.len()).collect::<Vec<_>>());
}

#[test]
fn test_rules_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", redis_rules()).unwrap();

    let mut provider = provider_for(
        RuleSource::path(file.path()),
        vec![Definition::new("stats_cache", CacheMode::Application)],
    );

    let config = provider.load().unwrap();
    assert_eq!(config.mappings_for("stats_cache"), vec!["redis1"]);
}

#[test]
fn test_missing_rule_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let mut provider = provider_for(RuleSource::path(&path), vec![]);

    assert_eq!(provider.load(), Err(ResolutionError::missing_source(&path)));
}

#[test]
fn test_invalid_json_file_is_malformed() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{{\"stores\": ").unwrap();

    let mut provider = provider_for(RuleSource::path(file.path()), vec![]);

    assert!(matches!(
        provider.load(),
        Err(ResolutionError::MalformedSource { .. })
    ));
}

#[test]
fn test_empty_array_store_config_resolves() {
    let mut provider = inline_provider(
        json!({
            "stores": {"static1": {"type": "static", "config": []}},
            "rules": {"request": [{"conditions": [], "stores": ["static1"]}]}
        }),
        vec![Definition::new("core/req", CacheMode::Request)],
    );

    let config = provider.load().unwrap();
    assert!(config.stores["static1"].configuration.is_empty());
    assert_eq!(config.mappings_for("core/req"), vec!["static1"]);
}

#[test]
fn test_positional_rules_are_malformed() {
    let mut provider = inline_provider(
        json!({"stores": {}, "rules": [[{"stores": ["default_request"]}]]}),
        vec![],
    );

    assert!(matches!(
        provider.load(),
        Err(ResolutionError::MalformedSource { .. })
    ));
}
