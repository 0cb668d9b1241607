//! Column labels for the final aggregation.
//!
//! Each stage contributes two output columns, `<label>` (sessions reaching the
//! stage) and `<label>_exits` (sessions leaving there). Labels come from the
//! stage's pattern literal with the characters that are illegal in a legacy
//! BigQuery alias rewritten.

use std::collections::HashMap;
use std::fmt;

/// Suffix of the per-stage exit-count column.
pub const EXITS_SUFFIX: &str = "_exits";

/// Turn a pattern literal into an alias-safe label.
///
/// `-`, `/` and `|` become `_`; single quotes and parentheses are dropped.
/// Not injective: `'/a-b'` and `'/a/b'` both become `_a_b`.
pub fn sanitize_pattern(pattern: &str) -> String {
    pattern
        .chars()
        .filter_map(|c| match c {
            '-' | '/' | '|' => Some('_'),
            '\'' | '(' | ')' => None,
            other => Some(other),
        })
        .collect()
}

/// Labels for every stage, index-aligned with `patterns`.
pub fn stage_labels(patterns: &[String]) -> Vec<String> {
    patterns.iter().map(|p| sanitize_pattern(p)).collect()
}

/// Name of the exit-count column for a stage label.
pub fn exits_label(label: &str) -> String {
    format!("{label}{EXITS_SUFFIX}")
}

/// An output column name claimed by more than one stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelCollision {
    /// The duplicated output column name.
    pub column: String,
    /// Stage indices producing it, ascending.
    pub stages: Vec<usize>,
}

impl fmt::Display for LabelCollision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stages: Vec<String> = self.stages.iter().map(|s| s.to_string()).collect();
        write!(
            f,
            "output column `{}` is produced by stages {}",
            self.column,
            stages.join(", ")
        )
    }
}

/// Find output columns that two or more stages would both name.
///
/// Checks both the count and the `_exits` columns, so `'/a_exits'` colliding
/// with the exit column of `'/a'` is caught too. Collisions are reported in
/// the order their column first appears in the final SELECT list.
pub fn find_label_collisions(labels: &[String]) -> Vec<LabelCollision> {
    let mut order: Vec<String> = Vec::new();
    let mut owners: HashMap<String, Vec<usize>> = HashMap::new();

    for (stage, label) in labels.iter().enumerate() {
        for column in [label.clone(), exits_label(label)] {
            let entry = owners.entry(column.clone()).or_insert_with(|| {
                order.push(column.clone());
                Vec::new()
            });
            if !entry.contains(&stage) {
                entry.push(stage);
            }
        }
    }

    order
        .into_iter()
        .filter_map(|column| {
            let stages = owners.remove(&column)?;
            (stages.len() > 1).then_some(LabelCollision { column, stages })
        })
        .collect()
}

/// Stages whose label sanitizes to nothing, such as the pattern `''`.
///
/// Such a stage renders `COUNT(...) AS ,` in the final SELECT list.
pub fn find_empty_labels(labels: &[String]) -> Vec<usize> {
    labels
        .iter()
        .enumerate()
        .filter(|(_, label)| label.is_empty())
        .map(|(stage, _)| stage)
        .collect()
}
