//! Per-stage session aggregation ("stage view").
//!
//! One stage view reduces the raw hit-level export to one row per session
//! that touched the stage's pattern:
//!
//! ```text
//! SELECT fullVisitorId, visitId[, <segment>],
//!        MIN(hits.hitNumber) AS firstHit, MAX(IF(hits.isExit, 1, 0)) AS exit
//! FROM TABLE_DATE_RANGE(<table>, TIMESTAMP(<start>), TIMESTAMP(<end>))
//! WHERE REGEXP_MATCH(hits.page.pagePath, <pattern>) AND totals.visits = 1
//!       [AND <filter column> = <filter value>]
//! GROUP BY fullVisitorId, visitId[, <segment>]
//! ```

use log::debug;

use super::spec::FunnelSpec;
use crate::sql::{
    col, func, lit_int, max, min, raw_sql, Expr, ExprExt, Query, SelectExpr, TableRef,
};

/// Session key, first half.
pub const FULL_VISITOR_ID: &str = "fullVisitorId";
/// Session key, second half.
pub const VISIT_ID: &str = "visitId";
/// Earliest matching hit ordinal within the session.
pub const FIRST_HIT: &str = "firstHit";
/// 1 if a matching hit was the session's last hit, else 0.
pub const EXIT: &str = "exit";

const HIT_NUMBER: &str = "hits.hitNumber";
const HIT_IS_EXIT: &str = "hits.isExit";
const PAGE_PATH: &str = "hits.page.pagePath";
const SESSION_VISITS: &str = "totals.visits";

/// Builds stage views for one funnel.
#[derive(Debug, Clone, Copy)]
pub struct StageQueryBuilder<'a> {
    spec: &'a FunnelSpec,
}

impl<'a> StageQueryBuilder<'a> {
    pub fn new(spec: &'a FunnelSpec) -> Self {
        Self { spec }
    }

    /// Stage view for the pattern at funnel position `stage`.
    pub fn build(&self, stage: usize, pattern: &str) -> Query {
        debug!("building stage view {} for pattern {}", stage, pattern);

        let mut select: Vec<SelectExpr> =
            self.grouping_columns().into_iter().map(Into::into).collect();
        select.push(min(col(HIT_NUMBER)).alias(FIRST_HIT));
        select.push(max(func("IF", vec![col(HIT_IS_EXIT), lit_int(1), lit_int(0)])).alias(EXIT));

        let mut query = Query::new()
            .select(select)
            .from(TableRef::new(self.date_range()))
            .filter(func("REGEXP_MATCH", vec![col(PAGE_PATH), raw_sql(pattern)]))
            .filter(col(SESSION_VISITS).eq(lit_int(1)));

        if let Some(filter) = self.spec.filter() {
            query = query.filter(col(&filter.column).eq(raw_sql(&filter.value)));
        }

        query.group_by(self.grouping_columns())
    }

    /// `fullVisitorId, visitId` plus the segment column when segmenting.
    fn grouping_columns(&self) -> Vec<Expr> {
        let mut columns = vec![col(FULL_VISITOR_ID), col(VISIT_ID)];
        if let Some(segment) = self.spec.segment() {
            columns.push(col(segment));
        }
        columns
    }

    /// Range scan over the daily shards between the funnel's dates.
    fn date_range(&self) -> Expr {
        func(
            "TABLE_DATE_RANGE",
            vec![
                raw_sql(self.spec.table()),
                func("TIMESTAMP", vec![raw_sql(self.spec.start_date())]),
                func("TIMESTAMP", vec![raw_sql(self.spec.end_date())]),
            ],
        )
    }
}
