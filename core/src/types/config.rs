//! Dashboard configuration: items, alias tables, and connections.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::params::ItemParams;

/// Namespace assigned to items that do not declare one.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Connection kind whose edges suppress parameter flow between items.
pub const CONNECTION_KIND_IGNORE: &str = "ignore";

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn is_default_namespace(namespace: &str) -> bool {
    namespace == DEFAULT_NAMESPACE
}

/// One widget on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    pub id: String,
    /// Plugin type key. Selects the prerender middleware, nothing else.
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(
        default = "default_namespace",
        skip_serializing_if = "is_default_namespace"
    )]
    pub namespace: String,
    /// Declared default parameter values, visible to every item in the same
    /// namespace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<ItemParams>,
    /// Opaque widget payload, carried through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Item {
    pub fn new(id: impl Into<String>, item_type: impl Into<String>) -> Self {
        Item {
            id: id.into(),
            item_type: item_type.into(),
            namespace: default_namespace(),
            defaults: None,
            data: None,
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_defaults(mut self, defaults: ItemParams) -> Self {
        self.defaults = Some(defaults);
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

/// Alias groups for one namespace: canonical parameter name to the alternate
/// names that mean the same thing.
///
/// A name belongs to at most one group in practice. If a config lists it in
/// several, the group with the lexicographically smallest canonical name
/// wins, so lookups stay deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct AliasTable {
    groups: BTreeMap<String, Vec<String>>,
}

impl AliasTable {
    pub fn new() -> Self {
        AliasTable {
            groups: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, canonical: impl Into<String>, aliases: Vec<String>) {
        self.groups.insert(canonical.into(), aliases);
    }

    /// Canonical form of `name`: the group key when `name` is a canonical
    /// name or one of its aliases, `None` when no group mentions it.
    pub fn canonical_of(&self, name: &str) -> Option<&str> {
        for (canonical, aliases) in &self.groups {
            if canonical == name || aliases.iter().any(|alias| alias == name) {
                return Some(canonical);
            }
        }
        None
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Alias tables keyed by namespace.
pub type Aliases = BTreeMap<String, AliasTable>;

/// A directed edge between two items. Only the `ignore` kind carries meaning
/// here; other kinds belong to layout and rendering layers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Connection {
    pub from: String,
    pub to: String,
    pub kind: String,
}

impl Connection {
    pub fn ignore(from: impl Into<String>, to: impl Into<String>) -> Self {
        Connection {
            from: from.into(),
            to: to.into(),
            kind: CONNECTION_KIND_IGNORE.to_string(),
        }
    }

    pub fn is_ignore(&self) -> bool {
        self.kind == CONNECTION_KIND_IGNORE
    }
}

/// The dashboard configuration a host passes into every resolution call.
/// Item order is declaration order and is significant.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub aliases: Aliases,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub connections: Vec<Connection>,
}

impl Config {
    pub fn new(items: Vec<Item>) -> Self {
        Config {
            items,
            aliases: Aliases::new(),
            connections: Vec::new(),
        }
    }

    pub fn with_aliases(mut self, aliases: Aliases) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn with_connections(mut self, connections: Vec<Connection>) -> Self {
        self.connections = connections;
        self
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.item(id).is_some()
    }
}
