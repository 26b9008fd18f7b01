use crate::constants::locks::{DEFAULT_LOCK_DIRECTORY, DEFAULT_LOCK_NAME, DEFAULT_LOCK_TYPE};
use crate::models::Lock;
use std::collections::BTreeMap;

/// Static lock table: a single default file lock
// TODO: read lock declarations from the rule source once the host exposes lock plugins
pub fn default_locks() -> BTreeMap<String, Lock> {
    let lock = Lock {
        name: DEFAULT_LOCK_NAME.to_string(),
        lock_type: DEFAULT_LOCK_TYPE.to_string(),
        directory: DEFAULT_LOCK_DIRECTORY.to_string(),
        is_default: true,
    };

    BTreeMap::from([(lock.name.clone(), lock)])
}
