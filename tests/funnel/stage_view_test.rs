//! Tests for per-stage aggregation subqueries.

use funneler::funnel::{FunnelSpec, StageFilter, StageQueryBuilder};

fn spec() -> FunnelSpec {
    FunnelSpec::new(
        "[ds.ga_sessions_]",
        "'2016-01-01'",
        "'2016-01-31'",
        vec!["'/home'".into(), "'/cart'".into()],
    )
    .unwrap()
}

#[test]
fn test_stage_view_reads_date_range() {
    let spec = spec();
    let sql = StageQueryBuilder::new(&spec).build(0, "'/home'").to_string();
    assert!(sql.contains(
        "FROM TABLE_DATE_RANGE([ds.ga_sessions_], TIMESTAMP('2016-01-01'), TIMESTAMP('2016-01-31'))"
    ));
}

#[test]
fn test_stage_view_is_single_visit_only() {
    let spec = spec();
    let sql = StageQueryBuilder::new(&spec).build(1, "'/cart'").to_string();
    assert!(sql.contains("REGEXP_MATCH(hits.page.pagePath, '/cart') AND totals.visits = 1"));
}

#[test]
fn test_stage_view_projects_first_hit_and_exit() {
    let spec = spec();
    let sql = StageQueryBuilder::new(&spec).build(0, "'/home'").to_string();
    assert!(sql.contains("MIN(hits.hitNumber) AS firstHit"));
    assert!(sql.contains("MAX(IF(hits.isExit, 1, 0)) AS exit"));
}

#[test]
fn test_segment_added_to_select_and_group_by() {
    let spec = spec().with_segment("device.deviceCategory");
    let sql = StageQueryBuilder::new(&spec).build(0, "'/home'").to_string();
    assert!(sql.starts_with("SELECT fullVisitorId, visitId, device.deviceCategory, MIN("));
    assert!(sql.ends_with("GROUP BY fullVisitorId, visitId, device.deviceCategory"));
}

#[test]
fn test_without_segment_groups_by_session_only() {
    let spec = spec();
    let sql = StageQueryBuilder::new(&spec).build(0, "'/home'").to_string();
    assert!(sql.ends_with("GROUP BY fullVisitorId, visitId"));
}

#[test]
fn test_filter_applies_to_every_stage() {
    let spec = spec().with_filter(StageFilter::new("geoNetwork.country", "'Canada'"));
    let builder = StageQueryBuilder::new(&spec);
    for (i, pattern) in spec.stage_patterns().iter().enumerate() {
        let sql = builder.build(i, pattern).to_string();
        assert!(
            sql.contains("AND totals.visits = 1 AND geoNetwork.country = 'Canada'"),
            "stage {} missing filter: {}",
            i,
            sql
        );
    }
}

#[test]
fn test_pattern_emitted_verbatim() {
    let spec = spec();
    let sql = StageQueryBuilder::new(&spec)
        .build(0, "r'^/shop/(shoes|bags)$'")
        .to_string();
    assert!(sql.contains("REGEXP_MATCH(hits.page.pagePath, r'^/shop/(shoes|bags)$')"));
}
