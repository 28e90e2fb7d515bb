//! Gridboard CLI. The file-driven front end for the resolution engine.
//!
//! # Usage
//!
//! ```text
//! gridboard resolve params --config board.json --state snapshot.json
//! gridboard resolve snapshot --config board.yaml --global region=emea
//! gridboard actions --state snapshot.json --keep-prefix
//! ```

mod args;

use std::collections::BTreeMap;
use std::path::Path;
use std::process;

use gridboard_core::resolve::{
    extract_action_params, resolve_items_params, resolve_items_state_and_params, ResolveArgs,
};
use gridboard_core::types::{Config, GlobalParams, ItemParams, ItemsStateAndParams};

use args::{parse_args, usage, Command};

fn main() {
    let argv: Vec<String> = std::env::args().collect();
    let arg_refs: Vec<&str> = argv[1..].iter().map(|s| s.as_str()).collect();

    let cmd = match parse_args(&arg_refs) {
        Ok(cmd) => cmd,
        Err(e) => {
            eprintln!("gridboard: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run(cmd) {
        eprintln!("gridboard: {}", e);
        process::exit(1);
    }
}

fn run(cmd: Command) -> Result<(), String> {
    match cmd {
        Command::Help => {
            println!("{}", usage());
            Ok(())
        }
        Command::ResolveParams {
            config,
            state,
            globals,
            default_globals,
        } => {
            let config = load_config(Path::new(&config))?;
            let snapshot = load_snapshot(state.as_deref())?;
            let resolved = resolve_items_params(&resolve_args(
                &config,
                &snapshot,
                &globals,
                &default_globals,
            ));
            print_json(&resolved)
        }
        Command::ResolveSnapshot {
            config,
            state,
            globals,
            default_globals,
        } => {
            let config = load_config(Path::new(&config))?;
            let snapshot = load_snapshot(state.as_deref())?;
            let resolved = resolve_items_state_and_params(&resolve_args(
                &config,
                &snapshot,
                &globals,
                &default_globals,
            ));
            print_json(&resolved)
        }
        Command::Actions { state, keep_prefix } => {
            let snapshot = load_snapshot(Some(&state))?;
            let mut extracted: BTreeMap<&str, ItemParams> = BTreeMap::new();
            for (id, entry) in snapshot.iter() {
                let stored = match entry.params.as_ref() {
                    Some(stored) => stored,
                    None => continue,
                };
                let actions = extract_action_params(stored, keep_prefix);
                if !actions.is_empty() {
                    extracted.insert(id, actions);
                }
            }
            print_json(&extracted)
        }
    }
}

fn resolve_args<'a>(
    config: &'a Config,
    snapshot: &'a ItemsStateAndParams,
    globals: &'a GlobalParams,
    default_globals: &'a GlobalParams,
) -> ResolveArgs<'a> {
    ResolveArgs::new(config, snapshot)
        .with_global_params(globals)
        .with_default_global_params(default_globals)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("cannot serialize output: {}", e))?;
    println!("{}", json);
    Ok(())
}

// ---------------------------------------------------------------------------
// File loading
// ---------------------------------------------------------------------------

/// Read a config document, JSON or YAML by extension.
fn load_config(path: &Path) -> Result<Config, String> {
    let content = read_file(path)?;
    if is_yaml(path) {
        serde_yaml::from_str(&content)
            .map_err(|e| format!("cannot parse {}: {}", path.display(), e))
    } else {
        serde_json::from_str(&content)
            .map_err(|e| format!("cannot parse {}: {}", path.display(), e))
    }
}

/// Read a snapshot document. No path means a first render: an empty
/// snapshot.
fn load_snapshot(path: Option<&str>) -> Result<ItemsStateAndParams, String> {
    let path = match path {
        Some(path) => Path::new(path),
        None => return Ok(ItemsStateAndParams::new()),
    };
    let content = read_file(path)?;
    if is_yaml(path) {
        serde_yaml::from_str(&content)
            .map_err(|e| format!("cannot parse {}: {}", path.display(), e))
    } else {
        serde_json::from_str(&content)
            .map_err(|e| format!("cannot parse {}: {}", path.display(), e))
    }
}

fn read_file(path: &Path) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| format!("cannot read {}: {}", path.display(), e))
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    )
}
