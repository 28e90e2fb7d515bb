//! Deterministic resolution of dashboard item parameters and state.
//!
//! A dashboard config declares items, their namespaces, alias tables, and
//! ignore connections. Hosts persist a snapshot of per-item state and
//! params between renders. Each call here merges the config, the snapshot,
//! and the caller's global parameter sets into a fresh result for every
//! item, honoring namespace boundaries, alias collapsing, ignore edges,
//! and the stored-parameter propagation queue. No I/O happens anywhere in
//! this crate; callers own all inputs and every call returns new values.
//!
//! # Modules
//!
//! - [`plugins`] - Widget plugins and the registry a host wires them into
//! - [`resolve`] - The resolution pipeline and its engine
//! - [`types`] - Config, parameter, and snapshot types

pub mod plugins;
pub mod resolve;
pub mod types;
