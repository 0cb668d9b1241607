//! Tests for output naming and writing.

use chrono::NaiveDate;
use funneler::output::{output_file_name, write_query, OutputError};

#[test]
fn test_output_file_name_uses_weekday_and_ddmmyy() {
    let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
    assert_eq!(output_file_name(date), "Mon_191026_query.txt");

    let date = NaiveDate::from_ymd_opt(2016, 1, 5).unwrap();
    assert_eq!(output_file_name(date), "Tue_050116_query.txt");
}

#[test]
fn test_write_query_replaces_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");

    write_query(&path, "SELECT old").unwrap();
    write_query(&path, "SELECT 1").unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "SELECT 1");
}

#[test]
fn test_write_query_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.txt");

    let err = write_query(&path, "SELECT 1").unwrap_err();
    let OutputError::Write { path: failed, .. } = &err;
    assert_eq!(failed, &path);
    assert!(err.to_string().contains("out.txt"));
}
