//! Folds stage views into one join chain and aggregates it.
//!
//! For patterns `p0, p1, p2` the chain looks like:
//!
//! ```text
//! SELECT <counts per stage>
//! FROM (
//!   SELECT <s0..s2 columns>
//!   FROM (
//!     SELECT <s0..s1 columns>
//!     FROM (<stage view p0>) s0
//!     FULL OUTER JOIN EACH (<stage view p1>) s1 ON <session key>
//!   ) s01
//!   FULL OUTER JOIN EACH (<stage view p2>) s2 ON <session key>
//! ) s012
//! ```
//!
//! The accumulated side keeps growing its alias (`s0`, `s01`, `s012`, ...)
//! while each new stage view is aliased `s<i>`. Session-key columns keep their
//! `s0` qualifier through every level, so joins always match on
//! `s0.fullVisitorId` / `s0.visitId`.

use std::fmt;

use log::debug;

use super::error::{FunnelError, FunnelResult};
use super::label::{exits_label, stage_labels};
use super::spec::FunnelSpec;
use super::stage::{StageQueryBuilder, EXIT, FIRST_HIT, FULL_VISITOR_ID, VISIT_ID};
use crate::sql::{
    col, count, sum, table_col, Expr, ExprExt, OrderByExpr, Query, SelectExpr, TableRef,
};

/// Alias of one side of a join in the chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StageAlias(String);

impl StageAlias {
    /// Alias of stage 0, and the root of every accumulated alias.
    pub fn first() -> Self {
        Self::stage(0)
    }

    /// Alias of the stage view for stage `index`.
    pub fn stage(index: usize) -> Self {
        Self(format!("s{index}"))
    }

    /// Accumulated alias after joining stage `counter`: the digits of
    /// `counter` appended to the current alias.
    pub fn extended(&self, counter: usize) -> Self {
        Self(format!("{}{}", self.0, counter))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StageAlias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Projection of the join chain. Only ever grows at the end.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnList(Vec<Expr>);

impl ColumnList {
    /// `s0.fullVisitorId, s0.visitId` plus `s0.<segment>` when segmenting.
    pub fn session_key(segment: Option<&str>) -> Self {
        let root = StageAlias::first();
        let mut columns = vec![
            table_col(root.as_str(), FULL_VISITOR_ID),
            table_col(root.as_str(), VISIT_ID),
        ];
        if let Some(segment) = segment {
            columns.push(table_col(root.as_str(), segment));
        }
        Self(columns)
    }

    /// This list followed by `<alias>.firstHit, <alias>.exit`.
    pub fn with_stage(mut self, alias: &StageAlias) -> Self {
        self.0.push(table_col(alias.as_str(), FIRST_HIT));
        self.0.push(table_col(alias.as_str(), EXIT));
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Expr] {
        &self.0
    }
}

/// Fold state between stages.
#[derive(Debug, Clone)]
struct ChainState {
    subquery: Query,
    alias: StageAlias,
    columns: ColumnList,
    /// Index of the next stage to join.
    counter: usize,
}

/// Assembles the complete funnel query for one [`FunnelSpec`].
#[derive(Debug, Clone)]
pub struct FunnelAssembler<'a> {
    spec: &'a FunnelSpec,
    stages: StageQueryBuilder<'a>,
    labels: Vec<String>,
}

impl<'a> FunnelAssembler<'a> {
    pub fn new(spec: &'a FunnelSpec) -> Self {
        Self {
            spec,
            stages: StageQueryBuilder::new(spec),
            labels: stage_labels(spec.stage_patterns()),
        }
    }

    /// Output column labels, one per stage in funnel order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Build the final aggregation query.
    pub fn assemble(&self) -> FunnelResult<Query> {
        let (first, rest) = self
            .spec
            .stage_patterns()
            .split_first()
            .ok_or(FunnelError::EmptyFunnel)?;

        let chain = rest
            .iter()
            .fold(self.seed(first), |state, pattern| self.join_stage(state, pattern));

        Ok(self.aggregate(chain))
    }

    /// Stage 0 on its own; nothing is joined yet.
    fn seed(&self, pattern: &str) -> ChainState {
        let alias = StageAlias::first();
        let columns = ColumnList::session_key(self.spec.segment()).with_stage(&alias);
        ChainState {
            subquery: self.stages.build(0, pattern),
            alias,
            columns,
            counter: 1,
        }
    }

    /// Join the next stage view onto the accumulated chain.
    fn join_stage(&self, state: ChainState, pattern: &str) -> ChainState {
        let ChainState {
            subquery,
            alias,
            columns,
            counter,
        } = state;

        let stage_alias = StageAlias::stage(counter);
        let columns = columns.with_stage(&stage_alias);
        debug!(
            "joining stage {} as {} onto {} ({} columns)",
            counter,
            stage_alias,
            alias,
            columns.len()
        );

        let joined = Query::new()
            .select(columns.as_slice().to_vec())
            .from(TableRef::subquery(subquery).with_alias(alias.as_str()))
            .full_join_each(
                TableRef::subquery(self.stages.build(counter, pattern))
                    .with_alias(stage_alias.as_str()),
                session_key_match(&StageAlias::first(), &stage_alias),
            );

        ChainState {
            subquery: joined,
            alias: alias.extended(counter),
            columns,
            counter: counter + 1,
        }
    }

    /// Count arrivals and exits per stage over the finished chain.
    fn aggregate(&self, chain: ChainState) -> Query {
        let root = StageAlias::first();
        let mut select: Vec<SelectExpr> = Vec::with_capacity(self.labels.len() * 2 + 1);

        if let Some(segment) = self.spec.segment() {
            select.push(table_col(root.as_str(), segment).into());
        }
        for (index, label) in self.labels.iter().enumerate() {
            let stage = StageAlias::stage(index);
            select.push(count(table_col(stage.as_str(), FIRST_HIT)).alias(label));
            select.push(sum(table_col(stage.as_str(), EXIT)).alias(&exits_label(label)));
        }

        let query = Query::new()
            .select(select)
            .from(TableRef::subquery(chain.subquery).with_alias(chain.alias.as_str()));

        match (self.spec.segment(), self.labels.last()) {
            (Some(segment), Some(last)) => query
                .group_by(vec![table_col(root.as_str(), segment)])
                .order_by(vec![OrderByExpr::desc(col(last))]),
            _ => query,
        }
    }
}

/// `<left>.fullVisitorId = <right>.fullVisitorId AND <left>.visitId = <right>.visitId`
fn session_key_match(left: &StageAlias, right: &StageAlias) -> Expr {
    table_col(left.as_str(), FULL_VISITOR_ID)
        .eq(table_col(right.as_str(), FULL_VISITOR_ID))
        .and(table_col(left.as_str(), VISIT_ID).eq(table_col(right.as_str(), VISIT_ID)))
}
