//! The action-param naming convention and its codec.
//!
//! Widgets stage cross-item overrides by storing params whose keys carry a
//! reserved prefix. The prefix exists only in persisted documents; inside
//! the engine a parameter is its bare name plus an `is_action` tag, and the
//! prefix is attached or stripped at the boundary by the functions here.

use crate::types::params::{ItemParams, ParamValue};
use crate::types::state::ItemStateAndParams;

/// Reserved key prefix marking a stored param as an action override.
pub const ACTION_PARAM_PREFIX: &str = "_ap_";

/// A stored key/value pair split into its internal form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedParam {
    pub name: String,
    pub value: ParamValue,
    pub is_action: bool,
}

impl TaggedParam {
    /// Split a stored pair, stripping the action prefix when present.
    pub fn from_stored(key: &str, value: &ParamValue) -> Self {
        match key.strip_prefix(ACTION_PARAM_PREFIX) {
            Some(name) => TaggedParam {
                name: name.to_string(),
                value: value.clone(),
                is_action: true,
            },
            None => TaggedParam {
                name: key.to_string(),
                value: value.clone(),
                is_action: false,
            },
        }
    }

    /// The key this pair is stored under.
    pub fn stored_key(&self) -> String {
        if self.is_action {
            format!("{}{}", ACTION_PARAM_PREFIX, self.name)
        } else {
            self.name.clone()
        }
    }
}

/// Entries whose stored key carries the action prefix. With `keep_prefix`
/// the returned keys stay in stored form, otherwise they are bare names.
pub fn extract_action_params(params: &ItemParams, keep_prefix: bool) -> ItemParams {
    let mut out = ItemParams::new();
    for (key, value) in params {
        let tagged = TaggedParam::from_stored(key, value);
        if !tagged.is_action {
            continue;
        }
        let key = if keep_prefix {
            tagged.stored_key()
        } else {
            tagged.name
        };
        out.insert(key, tagged.value);
    }
    out
}

/// Entries whose stored key does not carry the action prefix.
pub fn extract_plain_params(params: &ItemParams) -> ItemParams {
    let mut out = ItemParams::new();
    for (key, value) in params {
        let tagged = TaggedParam::from_stored(key, value);
        if tagged.is_action {
            continue;
        }
        out.insert(tagged.name, tagged.value);
    }
    out
}

/// Stage every entry as an action override by prefixing its key.
pub fn to_action_params(params: &ItemParams) -> ItemParams {
    params
        .iter()
        .map(|(key, value)| (format!("{}{}", ACTION_PARAM_PREFIX, key), value.clone()))
        .collect()
}

/// True when either half of the stored entry holds a prefixed key.
pub fn has_action_params(entry: &ItemStateAndParams) -> bool {
    let in_params = entry
        .params
        .as_ref()
        .map_or(false, |params| params.keys().any(|k| k.starts_with(ACTION_PARAM_PREFIX)));
    let in_state = entry
        .state
        .as_ref()
        .map_or(false, |state| state.keys().any(|k| k.starts_with(ACTION_PARAM_PREFIX)));
    in_params || in_state
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
