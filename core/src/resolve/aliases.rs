//! Alias-aware parameter rewriting.

use crate::types::config::Aliases;
use crate::types::params::ItemParams;

/// Rewrite `params` keys to their canonical form per the namespace's alias
/// table, then overlay `action_params` verbatim.
///
/// Keys outside every alias group pass through unchanged, as does everything
/// when the namespace has no table. When several input keys collapse onto one
/// canonical key, the key sorted last wins. Action params are applied after
/// the alias pass, win key collisions, and are never rewritten themselves.
pub fn resolve_aliases(
    aliases: &Aliases,
    namespace: &str,
    params: &ItemParams,
    action_params: Option<&ItemParams>,
) -> ItemParams {
    let table = aliases.get(namespace);

    let mut resolved = ItemParams::new();
    for (key, value) in params {
        let canonical = table
            .and_then(|table| table.canonical_of(key))
            .unwrap_or(key.as_str());
        resolved.insert(canonical.to_string(), value.clone());
    }

    if let Some(actions) = action_params {
        for (key, value) in actions {
            resolved.insert(key.clone(), value.clone());
        }
    }

    resolved
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::config::AliasTable;
    use crate::types::params::ParamValue;

    fn params(entries: &[(&str, &str)]) -> ItemParams {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), ParamValue::from(*v)))
            .collect()
    }

    fn aliases_for(namespace: &str, canonical: &str, alias_names: &[&str]) -> Aliases {
        let mut table = AliasTable::new();
        table.insert(canonical, alias_names.iter().map(|a| a.to_string()).collect());
        let mut aliases = Aliases::new();
        aliases.insert(namespace.to_string(), table);
        aliases
    }

    #[test]
    fn passes_through_without_tables() {
        let input = params(&[("scale", "daily")]);
        let out = resolve_aliases(&Aliases::new(), "default", &input, None);
        assert_eq!(out, input);
    }

    #[test]
    fn collapses_alias_to_canonical() {
        let aliases = aliases_for("default", "status", &["state", "phase"]);
        let out = resolve_aliases(&aliases, "default", &params(&[("state", "open")]), None);
        assert_eq!(out, params(&[("status", "open")]));
    }

    #[test]
    fn canonical_key_is_untouched() {
        let aliases = aliases_for("default", "status", &["state"]);
        let out = resolve_aliases(&aliases, "default", &params(&[("status", "open")]), None);
        assert_eq!(out, params(&[("status", "open")]));
    }

    #[test]
    fn table_of_other_namespace_does_not_apply() {
        let aliases = aliases_for("finance", "status", &["state"]);
        let out = resolve_aliases(&aliases, "default", &params(&[("state", "open")]), None);
        assert_eq!(out, params(&[("state", "open")]));
    }

    #[test]
    fn colliding_keys_resolve_to_last_sorted() {
        // "color" (alias) sorts before "colour" (canonical), so the
        // canonical entry is written second and wins.
        let aliases = aliases_for("default", "colour", &["color"]);
        let input = params(&[("color", "red"), ("colour", "blue")]);
        let out = resolve_aliases(&aliases, "default", &input, None);
        assert_eq!(out, params(&[("colour", "blue")]));
    }

    #[test]
    fn action_params_overlay_wins() {
        let aliases = aliases_for("default", "status", &["state"]);
        let actions = params(&[("status", "forced")]);
        let out = resolve_aliases(
            &aliases,
            "default",
            &params(&[("state", "open")]),
            Some(&actions),
        );
        assert_eq!(out, params(&[("status", "forced")]));
    }

    #[test]
    fn action_keys_are_not_rewritten() {
        // The overlay happens after the alias pass, so an action key that
        // happens to be an alias name stays as written.
        let aliases = aliases_for("default", "status", &["state"]);
        let actions = params(&[("state", "forced")]);
        let out = resolve_aliases(&aliases, "default", &ItemParams::new(), Some(&actions));
        assert_eq!(out, params(&[("state", "forced")]));
    }

    #[test]
    fn empty_input_with_actions_yields_actions() {
        let actions = params(&[("status", "x")]);
        let out = resolve_aliases(&Aliases::new(), "default", &ItemParams::new(), Some(&actions));
        assert_eq!(out, actions);
    }

    #[test]
    fn empty_everything_yields_empty() {
        let out = resolve_aliases(&Aliases::new(), "default", &ItemParams::new(), None);
        assert!(out.is_empty());
    }
}
