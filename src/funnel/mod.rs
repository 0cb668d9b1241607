//! Funnel compilation core.
//!
//! A funnel is an ordered list of page-path patterns. Compilation turns it into
//! one query that reports, per stage, how many single-visit sessions reached
//! the stage and how many left the site there:
//!
//! - [`spec`] - the validated input ([`FunnelSpec`])
//! - [`label`] - output column labels derived from patterns
//! - [`stage`] - one aggregation subquery per stage
//! - [`assembler`] - the join chain and final aggregation

pub mod assembler;
pub mod error;
pub mod label;
pub mod spec;
pub mod stage;

pub use assembler::{ColumnList, FunnelAssembler, StageAlias};
pub use error::{FunnelError, FunnelResult};
pub use label::{
    find_empty_labels, find_label_collisions, sanitize_pattern, stage_labels, LabelCollision,
};
pub use spec::{FunnelSpec, StageFilter};
pub use stage::StageQueryBuilder;
