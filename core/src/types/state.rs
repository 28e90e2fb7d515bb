//! The persisted snapshot: per-item state and params plus a version marker.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::params::ItemParams;

/// Reserved key of the meta entry inside a persisted snapshot. Never a valid
/// item id.
pub const META_KEY: &str = "__meta__";

/// Snapshot schema version this engine writes.
pub const CURRENT_VERSION: u32 = 2;

/// Schema version assumed for snapshots without a meta entry.
pub const LEGACY_VERSION: u32 = 1;

/// Opaque per-item UI state. Stored and returned, never interpreted.
pub type ItemState = BTreeMap<String, Value>;

/// Stored state and params of a single item. Either half may be absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ItemStateAndParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<ItemState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<ItemParams>,
}

impl ItemStateAndParams {
    pub fn with_params(params: ItemParams) -> Self {
        ItemStateAndParams {
            state: None,
            params: Some(params),
        }
    }

    pub fn with_state(state: ItemState) -> Self {
        ItemStateAndParams {
            state: Some(state),
            params: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_none() && self.params.is_none()
    }
}

/// Version marker stored under [`META_KEY`]. Fields other than `version` are
/// carried through untouched so newer hosts can stash their own markers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Meta {
    pub version: u32,
    #[serde(flatten, default)]
    pub extra: BTreeMap<String, Value>,
}

impl Meta {
    pub fn new(version: u32) -> Self {
        Meta {
            version,
            extra: BTreeMap::new(),
        }
    }

    pub fn current() -> Self {
        Meta::new(CURRENT_VERSION)
    }
}

/// The snapshot a host persists between renders: one entry per item id plus
/// an optional reserved meta entry recording the schema version.
///
/// Snapshots written before the meta entry existed deserialize with no meta
/// and resolve under legacy (version 1) semantics. An entirely empty
/// snapshot is legacy too.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ItemsStateAndParams {
    #[serde(rename = "__meta__", default, skip_serializing_if = "Option::is_none")]
    meta: Option<Meta>,
    #[serde(flatten)]
    items: BTreeMap<String, ItemStateAndParams>,
}

impl ItemsStateAndParams {
    pub fn new() -> Self {
        ItemsStateAndParams {
            meta: None,
            items: BTreeMap::new(),
        }
    }

    /// Fresh snapshot already stamped with the current schema version.
    pub fn current() -> Self {
        ItemsStateAndParams {
            meta: Some(Meta::current()),
            items: BTreeMap::new(),
        }
    }

    pub fn meta(&self) -> Option<&Meta> {
        self.meta.as_ref()
    }

    pub fn set_meta(&mut self, meta: Meta) {
        self.meta = Some(meta);
    }

    /// Schema version governing resolution. Snapshots without a meta entry
    /// report [`LEGACY_VERSION`].
    pub fn version(&self) -> u32 {
        self.meta
            .as_ref()
            .map(|meta| meta.version)
            .unwrap_or(LEGACY_VERSION)
    }

    pub fn is_legacy(&self) -> bool {
        self.version() == LEGACY_VERSION
    }

    pub fn get(&self, id: &str) -> Option<&ItemStateAndParams> {
        self.items.get(id)
    }

    /// Stored params of `id`, when the entry exists and has any.
    pub fn params_of(&self, id: &str) -> Option<&ItemParams> {
        self.items.get(id).and_then(|entry| entry.params.as_ref())
    }

    /// Stored state of `id`, when the entry exists and has any.
    pub fn state_of(&self, id: &str) -> Option<&ItemState> {
        self.items.get(id).and_then(|entry| entry.state.as_ref())
    }

    /// Insert or replace the entry for `id`. The id must not be [`META_KEY`];
    /// the meta entry is managed through [`set_meta`](Self::set_meta).
    pub fn insert(&mut self, id: impl Into<String>, entry: ItemStateAndParams) {
        self.items.insert(id.into(), entry);
    }

    pub fn remove(&mut self, id: &str) -> Option<ItemStateAndParams> {
        self.items.remove(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ItemStateAndParams)> {
        self.items.iter().map(|(id, entry)| (id.as_str(), entry))
    }

    /// Number of item entries. The meta entry does not count.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the snapshot holds neither item entries nor a meta entry.
    pub fn is_empty(&self) -> bool {
        self.meta.is_none() && self.items.is_empty()
    }
}
