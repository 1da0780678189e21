//! Resolver configuration (`rsrc.toml`).
//!
//! Every field is optional; a missing file yields the built-in defaults.

pub mod parser;
pub mod schema;
pub mod store;

pub use parser::{parse_config, parse_config_str, to_toml};
pub use schema::{ResolverConfig, StoreConfig};
pub use store::{CONFIG_ENV_VAR, ConfigStore};
