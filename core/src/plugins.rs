//! Widget plugins and the registry a host wires them into.
//!
//! A plugin owns one item type and may rewrite items of that type before
//! resolution, typically to fill defaults or migrate an old payload shape.
//! Registration is an explicit call on a registry the host owns; there is
//! no process-wide plugin state.

use std::collections::BTreeMap;

use crate::types::config::Item;

/// A widget plugin as the resolution engine sees it.
pub trait ItemPlugin {
    /// The `type` value of the items this plugin owns.
    fn item_type(&self) -> &str;

    /// Rewrite an item before resolution. Identity unless overridden.
    fn prerender(&self, item: Item) -> Item {
        item
    }
}

/// Plugin lookup keyed by item type.
pub struct PluginRegistry {
    by_type: BTreeMap<String, Box<dyn ItemPlugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        PluginRegistry {
            by_type: BTreeMap::new(),
        }
    }

    /// Register a plugin, replacing any earlier plugin for the same type.
    pub fn register(&mut self, plugin: Box<dyn ItemPlugin>) {
        self.by_type.insert(plugin.item_type().to_string(), plugin);
    }

    pub fn get(&self, item_type: &str) -> Option<&dyn ItemPlugin> {
        self.by_type.get(item_type).map(|plugin| plugin.as_ref())
    }

    pub fn len(&self) -> usize {
        self.by_type.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        PluginRegistry::new()
    }
}

/// Run every item through its plugin's prerender step, in declaration
/// order. Items whose type has no registered plugin pass through unchanged.
pub fn prerender_items(items: &[Item], registry: &PluginRegistry) -> Vec<Item> {
    items
        .iter()
        .map(|item| match registry.get(&item.item_type) {
            Some(plugin) => plugin.prerender(item.clone()),
            None => item.clone(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
