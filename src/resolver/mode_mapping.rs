use crate::constants::sort::MODE_DEFAULT_SORT;
use crate::constants::CacheMode;
use crate::models::ModeMapping;

/// Safety-net mapping of each mode to its reserved default store
///
/// Always three entries at the lowest sort, so rule-derived mappings win.
pub fn default_mode_mappings() -> Vec<ModeMapping> {
    CacheMode::ALL
        .into_iter()
        .map(|mode| ModeMapping {
            mode,
            store: mode.default_store().to_string(),
            sort: MODE_DEFAULT_SORT,
        })
        .collect()
}
