pub mod config;
pub mod params;
pub mod state;

pub use config::{
    AliasTable, Aliases, Config, Connection, Item, CONNECTION_KIND_IGNORE, DEFAULT_NAMESPACE,
};
pub use params::{GlobalParams, ItemParams, ParamValue};
pub use state::{
    ItemState, ItemStateAndParams, ItemsStateAndParams, Meta, CURRENT_VERSION, LEGACY_VERSION,
    META_KEY,
};
