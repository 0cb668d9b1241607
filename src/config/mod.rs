//! Configuration module for the funnel compiler.
//!
//! Loads funnel definitions from JSON or TOML and validates them into a
//! [`FunnelSpec`](crate::funnel::FunnelSpec).

mod settings;

pub use settings::{load_funnel_config, ConfigError, FunnelConfig};
