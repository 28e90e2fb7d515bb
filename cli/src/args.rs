//! Command-line argument parsing.

use gridboard_core::types::{GlobalParams, ParamValue};

/// A parsed invocation of the `gridboard` binary.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    ResolveParams {
        config: String,
        state: Option<String>,
        globals: GlobalParams,
        default_globals: GlobalParams,
    },
    ResolveSnapshot {
        config: String,
        state: Option<String>,
        globals: GlobalParams,
        default_globals: GlobalParams,
    },
    Actions {
        state: String,
        keep_prefix: bool,
    },
    Help,
}

/// Parse CLI arguments into a typed Command.
///
/// Arguments are expected WITHOUT the program name (i.e., `args` should be
/// `["resolve", "params", ...]`, not `["gridboard", "resolve", ...]`).
pub fn parse_args(args: &[&str]) -> Result<Command, String> {
    if args.is_empty() {
        return Err("No command specified. Run 'gridboard help' for usage.".into());
    }

    match args[0] {
        "resolve" => parse_resolve(args),
        "actions" => parse_actions(args),
        "help" => Ok(Command::Help),
        _ => Err(format!("Unknown command: '{}'", args[0])),
    }
}

pub fn usage() -> &'static str {
    "\
gridboard resolves dashboard item parameters and state.

Usage:
  gridboard resolve params --config <file> [--state <file>]
                           [--global k=v]... [--default-global k=v]...
  gridboard resolve snapshot --config <file> [--state <file>]
                             [--global k=v]... [--default-global k=v]...
  gridboard actions --state <file> [--keep-prefix]
  gridboard help

Config and state files may be .json, .yaml, or .yml; the format follows
the file extension. Omitting --state resolves a first render. A comma in
a k=v value makes a list value."
}

// ---------------------------------------------------------------------------
// Sub-parsers
// ---------------------------------------------------------------------------

/// `gridboard resolve <params|snapshot> --config <file> [--state <file>]
/// [--global k=v]... [--default-global k=v]...`
fn parse_resolve(args: &[&str]) -> Result<Command, String> {
    if args.len() < 2 {
        return Err("Usage: gridboard resolve <params|snapshot> --config <file>".into());
    }
    let target = args[1];
    let mut config = None;
    let mut state = None;
    let mut globals = GlobalParams::new();
    let mut default_globals = GlobalParams::new();

    let rest = &args[2..];
    let mut i = 0;
    while i < rest.len() {
        match rest[i] {
            "--config" => {
                i += 1;
                config = Some(take_arg(rest, i, "--config")?);
            }
            "--state" => {
                i += 1;
                state = Some(take_arg(rest, i, "--state")?);
            }
            "--global" => {
                i += 1;
                let (key, value) = parse_assignment(&take_arg(rest, i, "--global")?)?;
                globals.insert(key, value);
            }
            "--default-global" => {
                i += 1;
                let (key, value) = parse_assignment(&take_arg(rest, i, "--default-global")?)?;
                default_globals.insert(key, value);
            }
            other => return Err(format!("Unknown flag for resolve: '{}'", other)),
        }
        i += 1;
    }

    let config = match config {
        Some(config) => config,
        None => return Err("resolve requires --config <file>".into()),
    };

    match target {
        "params" => Ok(Command::ResolveParams {
            config,
            state,
            globals,
            default_globals,
        }),
        "snapshot" => Ok(Command::ResolveSnapshot {
            config,
            state,
            globals,
            default_globals,
        }),
        _ => Err(format!("Unknown resolve target: '{}'", target)),
    }
}

/// `gridboard actions --state <file> [--keep-prefix]`
fn parse_actions(args: &[&str]) -> Result<Command, String> {
    let mut state = None;
    let mut keep_prefix = false;

    let rest = &args[1..];
    let mut i = 0;
    while i < rest.len() {
        match rest[i] {
            "--state" => {
                i += 1;
                state = Some(take_arg(rest, i, "--state")?);
            }
            "--keep-prefix" => keep_prefix = true,
            other => return Err(format!("Unknown flag for actions: '{}'", other)),
        }
        i += 1;
    }

    match state {
        Some(state) => Ok(Command::Actions { state, keep_prefix }),
        None => Err("Usage: gridboard actions --state <file> [--keep-prefix]".into()),
    }
}

/// Split `key=value`. A comma in the value side makes a list value.
fn parse_assignment(raw: &str) -> Result<(String, ParamValue), String> {
    let (key, value) = match raw.split_once('=') {
        Some(parts) => parts,
        None => return Err(format!("expected key=value, got '{}'", raw)),
    };
    if key.is_empty() {
        return Err(format!("expected key=value, got '{}'", raw));
    }
    let value = if value.contains(',') {
        ParamValue::from(value.split(',').map(str::to_string).collect::<Vec<_>>())
    } else {
        ParamValue::from(value)
    };
    Ok((key.to_string(), value))
}

fn take_arg(args: &[&str], index: usize, flag: &str) -> Result<String, String> {
    if index >= args.len() {
        return Err(format!("{} requires a value", flag));
    }
    Ok(args[index].into())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn params(entries: &[(&str, &str)]) -> GlobalParams {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), ParamValue::from(*v)))
            .collect()
    }

    #[test]
    fn empty_args() {
        assert!(parse_args(&[]).is_err());
    }

    #[test]
    fn unknown_command() {
        assert!(parse_args(&["bogus"]).is_err());
    }

    #[test]
    fn help() {
        assert_eq!(parse_args(&["help"]).unwrap(), Command::Help);
    }

    #[test]
    fn resolve_params_minimal() {
        let cmd = parse_args(&["resolve", "params", "--config", "board.json"]).unwrap();
        assert_eq!(
            cmd,
            Command::ResolveParams {
                config: "board.json".into(),
                state: None,
                globals: GlobalParams::new(),
                default_globals: GlobalParams::new(),
            }
        );
    }

    #[test]
    fn resolve_snapshot_with_everything() {
        let cmd = parse_args(&[
            "resolve",
            "snapshot",
            "--config",
            "board.yaml",
            "--state",
            "snapshot.json",
            "--global",
            "region=emea",
            "--default-global",
            "scale=daily",
        ])
        .unwrap();
        assert_eq!(
            cmd,
            Command::ResolveSnapshot {
                config: "board.yaml".into(),
                state: Some("snapshot.json".into()),
                globals: params(&[("region", "emea")]),
                default_globals: params(&[("scale", "daily")]),
            }
        );
    }

    #[test]
    fn repeated_globals_accumulate() {
        let cmd = parse_args(&[
            "resolve",
            "params",
            "--config",
            "b.json",
            "--global",
            "a=1",
            "--global",
            "b=2",
        ])
        .unwrap();
        match cmd {
            Command::ResolveParams { globals, .. } => {
                assert_eq!(globals, params(&[("a", "1"), ("b", "2")]));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn comma_value_becomes_list() {
        let (key, value) = parse_assignment("regions=emea,apac").unwrap();
        assert_eq!(key, "regions");
        assert_eq!(value, ParamValue::from(vec!["emea", "apac"]));
    }

    #[test]
    fn plain_value_stays_scalar() {
        let (_, value) = parse_assignment("region=emea").unwrap();
        assert_eq!(value, ParamValue::from("emea"));
    }

    #[test]
    fn assignment_without_equals_fails() {
        assert!(parse_assignment("region").is_err());
        assert!(parse_assignment("=x").is_err());
    }

    #[test]
    fn resolve_requires_config() {
        assert!(parse_args(&["resolve", "params"]).is_err());
        assert!(parse_args(&["resolve", "params", "--state", "s.json"]).is_err());
    }

    #[test]
    fn resolve_unknown_target() {
        assert!(parse_args(&["resolve", "everything", "--config", "b.json"]).is_err());
    }

    #[test]
    fn flag_missing_value() {
        assert!(parse_args(&["resolve", "params", "--config"]).is_err());
        assert!(parse_args(&["actions", "--state"]).is_err());
    }

    #[test]
    fn actions_with_flags() {
        let cmd = parse_args(&["actions", "--state", "s.json", "--keep-prefix"]).unwrap();
        assert_eq!(
            cmd,
            Command::Actions {
                state: "s.json".into(),
                keep_prefix: true,
            }
        );
    }

    #[test]
    fn actions_requires_state() {
        assert!(parse_args(&["actions"]).is_err());
        assert!(parse_args(&["actions", "--keep-prefix"]).is_err());
    }
}
