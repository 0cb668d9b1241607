//! # Funneler
//!
//! Compiles ordered page-path funnels into a single nested legacy BigQuery
//! query over Google Analytics session exports.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │            Funnel config (JSON / TOML)                   │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [config]
//! ┌─────────────────────────────────────────────────────────┐
//! │                    FunnelSpec                            │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [funnel::stage]  one per pattern
//! ┌─────────────────────────────────────────────────────────┐
//! │           Stage views (per-session aggregates)           │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [funnel::assembler]
//! ┌─────────────────────────────────────────────────────────┐
//! │      Join chain + per-stage COUNT / SUM aggregation      │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [sql]
//! ┌─────────────────────────────────────────────────────────┐
//! │                    SQL text                              │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod compile;
pub mod config;
pub mod funnel;
pub mod output;
pub mod sql;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::compile::{
        compile_funnel, compile_to_file, CompileError, CompileOptions, CompileOutput,
    };
    pub use crate::config::{load_funnel_config, ConfigError, FunnelConfig};
    pub use crate::funnel::{FunnelError, FunnelSpec, LabelCollision, StageFilter};
    pub use crate::sql::{Layout, Query};
}

pub use compile::{compile_funnel, CompileOptions};
pub use funnel::FunnelSpec;
