//! The resolution pipeline: alias rewriting, the action-param codec,
//! ignore edges, the propagation queue, and the per-item engine on top.

pub mod actions;
pub mod aliases;
pub mod engine;
pub mod ignores;
pub mod queue;

pub use actions::{
    extract_action_params, extract_plain_params, has_action_params, to_action_params,
    TaggedParam, ACTION_PARAM_PREFIX,
};
pub use aliases::resolve_aliases;
pub use engine::{
    resolve_items_action_params, resolve_items_params, resolve_items_state,
    resolve_items_state_and_params, ResolveArgs,
};
pub use ignores::{build_ignore_index, IgnoreIndex};
pub use queue::{build_queue, QueueEntry};
