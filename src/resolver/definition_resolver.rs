//! # Definition Resolver
//!
//! Maps each known definition to the stores of the first rule that matches it.
//!
//! ## Resolution Flow
//!
//! ```text
//! Definition ──► mode ──► rule-set ──► first rule whose
//!                 │           │        conditions all hold
//!          unsupported      empty              │
//!                 │           │          no match │ match
//!                 ▼           ▼                ▼  ▼
//!         inclusion error   skip (mode default)   one mapping per store
//! ```
//!
//! ## Sort Order
//!
//! For a rule listing `n` stores, the first store gets `sort = n` and the last
//! `sort = 1`. The consuming cache layer treats a higher sort as a higher
//! priority, so earlier-listed stores win. Mode defaults sit at -1.

use crate::error::ResolutionError;
use crate::models::{Definition, DefinitionMapping};
use crate::rules::{Rule, RuleSets};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Mappings produced for a set of definitions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefinitionResolution {
    pub mappings: Vec<DefinitionMapping>,
    /// Definitions skipped because they could not be resolved at all
    pub inclusion_errors: Vec<ResolutionError>,
}

/// Resolve every definition against the rule-set for its mode
///
/// Definitions are visited in name order, so mapping ids are stable between
/// runs with the same input.
pub fn resolve_definitions(
    rules: &RuleSets,
    definitions: &BTreeMap<String, Definition>,
) -> DefinitionResolution {
    let mut resolution = DefinitionResolution::default();

    for definition in definitions.values() {
        let mode = match definition.cache_mode() {
            Ok(mode) => mode,
            Err(e) => {
                warn!(definition = %definition.name, mode = %definition.mode, "Skipping definition with unsupported mode");
                resolution.inclusion_errors.push(e);
                continue;
            }
        };

        let rule_set = rules.for_mode(mode);
        if rule_set.is_empty() {
            continue;
        }

        let Some(rule) = first_match(rule_set, definition) else {
            debug!(definition = %definition.name, mode = %mode, "No rule matched, using mode default");
            continue;
        };

        let store_count = rule.stores.len() as i64;
        for (position, store) in rule.stores.iter().enumerate() {
            resolution.mappings.push(DefinitionMapping {
                id: resolution.mappings.len(),
                store: store.clone(),
                definition: definition.name.clone(),
                sort: store_count - position as i64,
            });
        }

        debug!(
            definition = %definition.name,
            mode = %mode,
            stores = ?rule.stores,
            "Definition mapped"
        );
    }

    resolution
}

/// First rule, in declaration order, whose conditions all hold
fn first_match<'r>(rules: &'r [Rule], definition: &Definition) -> Option<&'r Rule> {
    rules.iter().find(|rule| rule.matches(definition))
}
