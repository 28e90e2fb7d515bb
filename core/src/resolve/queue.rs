//! The propagation queue: which items currently emit params, in what order.

use crate::resolve::actions::extract_plain_params;
use crate::types::config::Item;
use crate::types::params::ItemParams;
use crate::types::state::ItemsStateAndParams;

/// One emission: a source item and the plain params it currently stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueEntry {
    pub id: String,
    pub namespace: String,
    pub params: ItemParams,
}

/// Derive the queue from the snapshot: one entry per item with stored
/// params, in item declaration order. Folding the queue in this order is
/// what lets a later interaction override an earlier one inside a
/// namespace. Action-prefixed keys ride a separate channel and are left
/// out of the entries.
pub fn build_queue(items: &[Item], items_state_and_params: &ItemsStateAndParams) -> Vec<QueueEntry> {
    let mut queue = Vec::new();
    for item in items {
        let Some(stored) = items_state_and_params.params_of(&item.id) else {
            continue;
        };
        queue.push(QueueEntry {
            id: item.id.clone(),
            namespace: item.namespace.clone(),
            params: extract_plain_params(stored),
        });
    }
    queue
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::params::ParamValue;
    use crate::types::state::ItemStateAndParams;

    fn params(entries: &[(&str, &str)]) -> ItemParams {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), ParamValue::from(*v)))
            .collect()
    }

    fn snapshot_with(entries: &[(&str, &[(&str, &str)])]) -> ItemsStateAndParams {
        let mut snapshot = ItemsStateAndParams::current();
        for (id, stored) in entries {
            snapshot.insert(*id, ItemStateAndParams::with_params(params(stored)));
        }
        snapshot
    }

    #[test]
    fn entries_follow_declaration_order() {
        let items = vec![
            Item::new("late", "control"),
            Item::new("early", "control"),
        ];
        let snapshot = snapshot_with(&[("early", &[("a", "1")]), ("late", &[("a", "2")])]);

        let queue = build_queue(&items, &snapshot);
        let ids: Vec<&str> = queue.iter().map(|entry| entry.id.as_str()).collect();
        assert_eq!(ids, vec!["late", "early"]);
    }

    #[test]
    fn items_without_stored_params_are_skipped() {
        let items = vec![Item::new("a", "control"), Item::new("b", "control")];
        let snapshot = snapshot_with(&[("a", &[("x", "1")])]);

        let queue = build_queue(&items, &snapshot);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].id, "a");
    }

    #[test]
    fn stored_ids_outside_the_config_are_dropped() {
        let items = vec![Item::new("a", "control")];
        let snapshot = snapshot_with(&[("a", &[("x", "1")]), ("ghost", &[("x", "9")])]);

        let queue = build_queue(&items, &snapshot);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].id, "a");
    }

    #[test]
    fn entries_carry_namespace_and_plain_params() {
        let items = vec![Item::new("a", "control").with_namespace("finance")];
        let snapshot = snapshot_with(&[("a", &[("x", "1"), ("_ap_y", "2")])]);

        let queue = build_queue(&items, &snapshot);
        assert_eq!(queue[0].namespace, "finance");
        assert_eq!(queue[0].params, params(&[("x", "1")]));
    }

    #[test]
    fn state_only_entries_do_not_emit() {
        let items = vec![Item::new("a", "control")];
        let mut snapshot = ItemsStateAndParams::current();
        let mut state = crate::types::state::ItemState::new();
        state.insert("collapsed".to_string(), serde_json::json!(true));
        snapshot.insert("a", ItemStateAndParams::with_state(state));

        assert!(build_queue(&items, &snapshot).is_empty());
    }
}
