//! Tests for output column labels.

use funneler::funnel::{find_label_collisions, sanitize_pattern, stage_labels};

#[test]
fn test_labels_follow_pattern_order() {
    let patterns: Vec<String> = vec!["'/cart'".into(), "'/home'".into(), "'/thanks'".into()];
    assert_eq!(stage_labels(&patterns), vec!["_cart", "_home", "_thanks"]);
}

#[test]
fn test_sanitize_rules() {
    assert_eq!(sanitize_pattern("'/a-b/c|d'"), "_a_b_c_d");
    assert_eq!(sanitize_pattern("'(x)'"), "x");
    assert_eq!(sanitize_pattern(""), "");
}

#[test]
fn test_colliding_stage_labels_detected() {
    let labels = stage_labels(&["'/a-b'".into(), "'/home'".into(), "'/a/b'".into()]);
    let collisions = find_label_collisions(&labels);

    assert_eq!(collisions.len(), 2);
    assert_eq!(collisions[0].column, "_a_b");
    assert_eq!(collisions[0].stages, vec![0, 2]);
    assert_eq!(collisions[1].column, "_a_b_exits");
    assert_eq!(collisions[1].stages, vec![0, 2]);
}

#[test]
fn test_exit_column_collision_detected() {
    let labels = stage_labels(&["'/a'".into(), "'/a_exits'".into()]);
    let collisions = find_label_collisions(&labels);

    assert_eq!(collisions.len(), 1);
    assert_eq!(collisions[0].column, "_a_exits");
    assert_eq!(collisions[0].stages, vec![0, 1]);
    assert_eq!(
        collisions[0].to_string(),
        "output column `_a_exits` is produced by stages 0, 1"
    );
}

#[test]
fn test_repeated_pattern_is_a_collision() {
    let labels = stage_labels(&["'/home'".into(), "'/home'".into()]);
    assert_eq!(find_label_collisions(&labels).len(), 2);
}
