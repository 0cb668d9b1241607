//! The validated funnel definition every compilation starts from.

use super::error::{FunnelError, FunnelResult};

/// Per-stage filter predicate: `<column> = <value>`.
///
/// Both operands are trusted SQL fragments; `value` carries its own quoting
/// (e.g. `'mobile'` or `23`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageFilter {
    pub column: String,
    pub value: String,
}

impl StageFilter {
    pub fn new(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }
}

/// An ordered funnel over a date-sharded session table family.
///
/// Always holds at least one stage pattern; [`FunnelSpec::new`] rejects an
/// empty list so nothing downstream has to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunnelSpec {
    table: String,
    start_date: String,
    end_date: String,
    stage_patterns: Vec<String>,
    segment: Option<String>,
    filter: Option<StageFilter>,
}

impl FunnelSpec {
    /// Create a funnel with no segmentation and no filter.
    ///
    /// # Errors
    ///
    /// Returns [`FunnelError::EmptyFunnel`] if `stage_patterns` is empty.
    pub fn new(
        table: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
        stage_patterns: Vec<String>,
    ) -> FunnelResult<Self> {
        if stage_patterns.is_empty() {
            return Err(FunnelError::EmptyFunnel);
        }
        Ok(Self {
            table: table.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
            stage_patterns,
            segment: None,
            filter: None,
        })
    }

    /// Break every stage and the final counts down by `column`.
    pub fn with_segment(mut self, column: impl Into<String>) -> Self {
        self.segment = Some(column.into());
        self
    }

    /// Restrict every stage view to rows where `filter` holds.
    pub fn with_filter(mut self, filter: StageFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn start_date(&self) -> &str {
        &self.start_date
    }

    pub fn end_date(&self) -> &str {
        &self.end_date
    }

    /// Stage patterns in funnel order.
    pub fn stage_patterns(&self) -> &[String] {
        &self.stage_patterns
    }

    pub fn stage_count(&self) -> usize {
        self.stage_patterns.len()
    }

    pub fn segment(&self) -> Option<&str> {
        self.segment.as_deref()
    }

    pub fn filter(&self) -> Option<&StageFilter> {
        self.filter.as_ref()
    }
}
