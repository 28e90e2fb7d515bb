//! Per-item parameter and state resolution.
//!
//! One call merges four parameter sources into a fresh result for every
//! item: dashboard default globals, same-namespace item defaults, the
//! caller's globals, and the persisted snapshot. Later sources override
//! earlier ones key by key. Inside the defaults tier the earliest-declared
//! provider wins; inside the snapshot tier the latest queue entry wins.
//! Everything here is a pure function of its arguments.

use std::collections::{BTreeMap, BTreeSet};

use crate::plugins::{prerender_items, PluginRegistry};
use crate::resolve::actions::extract_action_params;
use crate::resolve::aliases::resolve_aliases;
use crate::resolve::ignores::build_ignore_index;
use crate::resolve::queue::build_queue;
use crate::types::config::Config;
use crate::types::params::{GlobalParams, ItemParams};
use crate::types::state::{ItemState, ItemStateAndParams, ItemsStateAndParams};

/// Inputs of one resolution call. Optional sources default to empty.
#[derive(Clone, Copy)]
pub struct ResolveArgs<'a> {
    pub default_global_params: Option<&'a GlobalParams>,
    pub global_params: Option<&'a GlobalParams>,
    pub config: &'a Config,
    pub items_state_and_params: &'a ItemsStateAndParams,
    pub plugins: Option<&'a PluginRegistry>,
}

impl<'a> ResolveArgs<'a> {
    pub fn new(config: &'a Config, items_state_and_params: &'a ItemsStateAndParams) -> Self {
        ResolveArgs {
            default_global_params: None,
            global_params: None,
            config,
            items_state_and_params,
            plugins: None,
        }
    }

    pub fn with_default_global_params(mut self, params: &'a GlobalParams) -> Self {
        self.default_global_params = Some(params);
        self
    }

    pub fn with_global_params(mut self, params: &'a GlobalParams) -> Self {
        self.global_params = Some(params);
        self
    }

    pub fn with_plugins(mut self, plugins: &'a PluginRegistry) -> Self {
        self.plugins = Some(plugins);
        self
    }
}

fn overlay(acc: &mut ItemParams, src: ItemParams) {
    for (key, value) in src {
        acc.insert(key, value);
    }
}

/// Resolve the effective params of every config item.
pub fn resolve_items_params(args: &ResolveArgs) -> BTreeMap<String, ItemParams> {
    let empty = GlobalParams::new();
    let default_globals = args.default_global_params.unwrap_or(&empty);
    let globals = args.global_params.unwrap_or(&empty);
    let config = args.config;
    let snapshot = args.items_state_and_params;
    let aliases = &config.aliases;

    let action_params = resolve_items_action_params(config, snapshot, false);

    let empty_registry = PluginRegistry::new();
    let registry = args.plugins.unwrap_or(&empty_registry);
    let items = prerender_items(&config.items, registry);

    let is_legacy = snapshot.is_legacy();
    let queue = if is_legacy {
        Vec::new()
    } else {
        build_queue(&items, snapshot)
    };
    let ignore_index = build_ignore_index(&items, &config.connections, snapshot, is_legacy);
    let no_ignores = BTreeSet::new();

    // Default providers, grouped per namespace in declaration order.
    let mut providers_by_namespace: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (position, item) in items.iter().enumerate() {
        if item.defaults.is_some() {
            providers_by_namespace
                .entry(item.namespace.as_str())
                .or_default()
                .push(position);
        }
    }

    let mut resolved: BTreeMap<String, ItemParams> = BTreeMap::new();
    for item in &items {
        let namespace = item.namespace.as_str();
        let ignores = ignore_index.get(&item.id).unwrap_or(&no_ignores);

        // Action overrides staged by every other item, folded in declaration
        // order so later items win collisions.
        let mut cross_actions = ItemParams::new();
        for source in &config.items {
            if source.id == item.id {
                continue;
            }
            if let Some(actions) = action_params.get(&source.id) {
                for (key, value) in actions {
                    cross_actions.insert(key.clone(), value.clone());
                }
            }
        }

        let mut params = resolve_aliases(aliases, namespace, default_globals, None);

        // Defaults tier. First writer per key wins, so the earliest-declared
        // surviving provider supplies the value.
        let mut defaults_tier = ItemParams::new();
        if let Some(providers) = providers_by_namespace.get(namespace) {
            for &position in providers {
                let provider = &items[position];
                if ignores.contains(provider.id.as_str()) {
                    continue;
                }
                let Some(defaults) = provider.defaults.as_ref() else {
                    continue;
                };
                for (key, value) in resolve_aliases(aliases, namespace, defaults, None) {
                    defaults_tier.entry(key).or_insert(value);
                }
            }
        }
        overlay(&mut params, defaults_tier);

        overlay(&mut params, resolve_aliases(aliases, namespace, globals, None));

        if is_legacy {
            // Version 1 documents predate aliases, the queue, and action
            // params. Their stored params apply verbatim.
            if let Some(stored) = snapshot.params_of(&item.id) {
                for (key, value) in stored {
                    params.insert(key.clone(), value.clone());
                }
            }
        } else {
            for entry in &queue {
                if entry.namespace != namespace || ignores.contains(entry.id.as_str()) {
                    continue;
                }
                let contribution =
                    resolve_aliases(aliases, namespace, &entry.params, Some(&cross_actions));
                overlay(&mut params, contribution);
            }
        }

        resolved.insert(item.id.clone(), params);
    }

    resolved
}

/// Stored UI state of every config item. Items without stored state get an
/// empty map.
pub fn resolve_items_state(
    config: &Config,
    items_state_and_params: &ItemsStateAndParams,
) -> BTreeMap<String, ItemState> {
    let mut states = BTreeMap::new();
    for item in &config.items {
        let state = items_state_and_params
            .state_of(&item.id)
            .cloned()
            .unwrap_or_default();
        states.insert(item.id.clone(), state);
    }
    states
}

/// Action params currently staged by every config item, possibly empty.
/// With `keep_prefix` the keys stay in stored form.
pub fn resolve_items_action_params(
    config: &Config,
    items_state_and_params: &ItemsStateAndParams,
    keep_prefix: bool,
) -> BTreeMap<String, ItemParams> {
    let mut out = BTreeMap::new();
    for item in &config.items {
        let actions = match items_state_and_params.params_of(&item.id) {
            Some(stored) => extract_action_params(stored, keep_prefix),
            None => ItemParams::new(),
        };
        out.insert(item.id.clone(), actions);
    }
    out
}

/// Resolve the snapshot a host persists: resolved params with each item's
/// own staged action params reattached under their prefixed keys, stored
/// state carried through, and the meta entry kept for current-version
/// documents. Entries whose id no longer names a config item are dropped.
pub fn resolve_items_state_and_params(args: &ResolveArgs) -> ItemsStateAndParams {
    let params = resolve_items_params(args);
    let states = resolve_items_state(args.config, args.items_state_and_params);
    let action_params = resolve_items_action_params(args.config, args.items_state_and_params, true);

    let mut ids: BTreeSet<&str> = params.keys().map(String::as_str).collect();
    ids.extend(states.keys().map(String::as_str));

    let mut result = ItemsStateAndParams::new();
    for id in ids {
        let mut entry = ItemStateAndParams::default();
        if let Some(item_params) = params.get(id) {
            entry.params = Some(item_params.clone());
        }
        if let Some(state) = states.get(id) {
            entry.state = Some(state.clone());
        }
        if let Some(staged) = action_params.get(id) {
            if !staged.is_empty() {
                let merged = entry.params.get_or_insert_with(ItemParams::new);
                for (key, value) in staged {
                    merged.insert(key.clone(), value.clone());
                }
            }
        }
        result.insert(id, entry);
    }

    if !args.items_state_and_params.is_legacy() {
        if let Some(meta) = args.items_state_and_params.meta() {
            result.set_meta(meta.clone());
        }
    }

    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
