//! Ignore edges between items, indexed per target.

use std::collections::{BTreeMap, BTreeSet};

use crate::types::config::{Connection, Item, CONNECTION_KIND_IGNORE};
use crate::types::state::ItemsStateAndParams;

/// For each item id, the set of source ids whose defaults and queued params
/// must not reach it. Ignore edges never suppress global params.
pub type IgnoreIndex = BTreeMap<String, BTreeSet<String>>;

/// Build the ignore index from the config's connections.
///
/// Every item gets an entry, empty when nothing points at it. Connections
/// whose endpoints do not both name a config item are skipped.
pub fn build_ignore_index(
    items: &[Item],
    connections: &[Connection],
    items_state_and_params: &ItemsStateAndParams,
    is_legacy: bool,
) -> IgnoreIndex {
    // Only the static kind exists today. A data-dependent kind would decide
    // here from the stored values, which legacy documents never carry.
    let _ = (items_state_and_params, is_legacy);

    let known: BTreeSet<&str> = items.iter().map(|item| item.id.as_str()).collect();
    let mut index: IgnoreIndex = items
        .iter()
        .map(|item| (item.id.clone(), BTreeSet::new()))
        .collect();

    for connection in connections {
        match connection.kind.as_str() {
            CONNECTION_KIND_IGNORE => {}
            _ => continue,
        }
        if !known.contains(connection.from.as_str()) || !known.contains(connection.to.as_str()) {
            continue;
        }
        if let Some(ignored) = index.get_mut(&connection.to) {
            ignored.insert(connection.from.clone());
        }
    }

    index
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
