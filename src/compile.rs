//! End-to-end compilation from a funnel definition to SQL.
//!
//! ```text
//! config file → FunnelConfig → FunnelSpec → stage views → join chain → SQL
//! ```
//!
//! # Example
//!
//! ```
//! use funneler::compile::{compile_funnel, CompileOptions};
//! use funneler::funnel::FunnelSpec;
//!
//! let spec = FunnelSpec::new(
//!     "[1234567.ga_sessions_]",
//!     "'2016-01-01'",
//!     "'2016-01-31'",
//!     vec!["'/home'".to_string(), "'/cart'".to_string()],
//! )?;
//!
//! let output = compile_funnel(&spec, CompileOptions::default())?;
//! assert!(output.sql.contains("FULL OUTER JOIN EACH"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::path::Path;

use log::{debug, warn};

use crate::config::{load_funnel_config, ConfigError};
use crate::funnel::{
    find_empty_labels, find_label_collisions, FunnelAssembler, FunnelError, FunnelSpec,
    LabelCollision,
};
use crate::output::{write_query, OutputError};
use crate::sql::{Layout, Query};

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur during compilation.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid funnel: {0}")]
    Funnel(#[from] FunnelError),

    #[error(transparent)]
    Output(#[from] OutputError),
}

pub type CompileResult<T> = Result<T, CompileError>;

// ============================================================================
// Options
// ============================================================================

/// Options for compilation.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompileOptions {
    /// How the SQL text is laid out. Compact keeps the whole query on one line.
    pub layout: Layout,
}

impl CompileOptions {
    /// Set the output layout.
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }
}

// ============================================================================
// Result Types
// ============================================================================

/// Result of compiling a funnel to SQL.
#[derive(Debug, Clone)]
pub struct CompileOutput {
    /// The generated SQL string.
    pub sql: String,

    /// The SQL query AST (for further manipulation if needed).
    pub query: Query,

    /// Output column label per stage, in funnel order.
    pub labels: Vec<String>,

    /// Output columns claimed by more than one stage. Compilation still
    /// succeeds; the resulting query has ambiguous column names.
    pub collisions: Vec<LabelCollision>,

    /// Stages whose label is empty; their output columns have no name.
    pub empty_labels: Vec<usize>,
}

// ============================================================================
// Compilation
// ============================================================================

/// Compile a funnel to its aggregation query.
pub fn compile_funnel(spec: &FunnelSpec, options: CompileOptions) -> CompileResult<CompileOutput> {
    debug!("compiling funnel with {} stages", spec.stage_count());

    let assembler = FunnelAssembler::new(spec);
    let labels = assembler.labels().to_vec();

    let collisions = find_label_collisions(&labels);
    for collision in &collisions {
        warn!("label collision: {}", collision);
    }

    let empty_labels = find_empty_labels(&labels);
    for stage in &empty_labels {
        warn!(
            "stage {} pattern {} has an empty label; its output columns are unnamed",
            stage,
            spec.stage_patterns()[*stage]
        );
    }

    let query = assembler.assemble()?;
    let sql = query.to_sql(options.layout);

    Ok(CompileOutput {
        sql,
        query,
        labels,
        collisions,
        empty_labels,
    })
}

/// Load a configuration file and compile the funnel it describes.
pub fn compile_config_file(path: &Path, options: CompileOptions) -> CompileResult<CompileOutput> {
    let spec = load_funnel_config(path)?.into_spec()?;
    compile_funnel(&spec, options)
}

/// Compile a configuration file and write the query to `out_path`.
///
/// Nothing is written when compilation fails.
pub fn compile_to_file(
    config_path: &Path,
    out_path: &Path,
    options: CompileOptions,
) -> CompileResult<CompileOutput> {
    let output = compile_config_file(config_path, options)?;
    write_query(out_path, &output.sql)?;
    Ok(output)
}
