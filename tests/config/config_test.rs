//! Tests for loading and validating funnel configuration files.

use std::fs;

use funneler::config::{load_funnel_config, ConfigError, FunnelConfig};
use funneler::funnel::FunnelError;

const LEGACY_JSON: &str = r#"{
    "table": "[1234567.ga_sessions_]",
    "start": "'2016-01-01'",
    "end": "'2016-01-31'",
    "regex_list": ["'/home'", "'/cart'", "'/checkout'"],
    "segmode": "True",
    "segment": "device.deviceCategory",
    "filtermode": "False",
    "filtercol": "geoNetwork.country",
    "filterval": "'Canada'"
}"#;

#[test]
fn test_legacy_json_round_trip_into_spec() {
    let spec = FunnelConfig::from_json_str(LEGACY_JSON)
        .unwrap()
        .into_spec()
        .unwrap();

    assert_eq!(spec.table(), "[1234567.ga_sessions_]");
    assert_eq!(spec.start_date(), "'2016-01-01'");
    assert_eq!(spec.end_date(), "'2016-01-31'");
    assert_eq!(spec.stage_count(), 3);
    assert_eq!(spec.segment(), Some("device.deviceCategory"));
    // filtermode "False": filter fields present but ignored
    assert!(spec.filter().is_none());
}

#[test]
fn test_lowercase_true_is_not_enabled() {
    let source = LEGACY_JSON
        .replace("\"segmode\": \"True\"", "\"segmode\": \"true\"")
        .replace("\"filtermode\": \"False\"", "\"filtermode\": \"TRUE\"");
    let spec = FunnelConfig::from_json_str(&source)
        .unwrap()
        .into_spec()
        .unwrap();

    assert!(spec.segment().is_none());
    assert!(spec.filter().is_none());
}

#[test]
fn test_filter_enabled() {
    let source = LEGACY_JSON.replace("\"filtermode\": \"False\"", "\"filtermode\": \"True\"");
    let spec = FunnelConfig::from_json_str(&source)
        .unwrap()
        .into_spec()
        .unwrap();

    let filter = spec.filter().unwrap();
    assert_eq!(filter.column, "geoNetwork.country");
    assert_eq!(filter.value, "'Canada'");
}

#[test]
fn test_enabled_segment_without_column_fails() {
    let source = r#"{
        "table": "t", "start": "'a'", "end": "'b'",
        "regex_list": ["'/x'"],
        "segmode": "True"
    }"#;
    let err = FunnelConfig::from_json_str(source)
        .unwrap()
        .into_spec()
        .unwrap_err();

    assert!(matches!(
        err,
        ConfigError::MissingField {
            field: "segment",
            ..
        }
    ));
}

#[test]
fn test_enabled_filter_without_value_fails() {
    let source = r#"{
        "table": "t", "start": "'a'", "end": "'b'",
        "regex_list": ["'/x'"],
        "filtermode": true,
        "filtercol": "geoNetwork.country"
    }"#;
    let err = FunnelConfig::from_json_str(source)
        .unwrap()
        .into_spec()
        .unwrap_err();

    assert!(matches!(
        err,
        ConfigError::MissingField {
            field: "filterval",
            ..
        }
    ));
}

#[test]
fn test_empty_regex_list_is_invalid() {
    let source = r#"{"table": "t", "start": "'a'", "end": "'b'", "regex_list": []}"#;
    let err = FunnelConfig::from_json_str(source)
        .unwrap()
        .into_spec()
        .unwrap_err();

    assert!(matches!(err, ConfigError::Funnel(FunnelError::EmptyFunnel)));
    assert!(err.to_string().contains("at least one stage pattern"));
}

#[test]
fn test_missing_required_field_is_parse_error() {
    let source = r#"{"table": "t", "start": "'a'", "regex_list": ["'/x'"]}"#;
    let err = FunnelConfig::from_json_str(source).unwrap_err();
    assert!(matches!(err, ConfigError::JsonError(_)));
    assert!(err.to_string().contains("end"));
}

#[test]
fn test_load_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("funnel.json");
    fs::write(&path, LEGACY_JSON).unwrap();

    let config = load_funnel_config(&path).unwrap();
    assert_eq!(config.regex_list.len(), 3);
    assert!(config.segmode);
}

#[test]
fn test_load_toml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("funnel.toml");
    fs::write(
        &path,
        r#"
table = "[1234567.ga_sessions_]"
start = "'2016-01-01'"
end = "'2016-01-31'"
regex_list = ["'/home'", "'/cart'"]
segmode = true
segment = "device.deviceCategory"
filtermode = "True"
filtercol = "totals.newVisits"
filterval = "1"
"#,
    )
    .unwrap();

    let spec = load_funnel_config(&path).unwrap().into_spec().unwrap();
    assert_eq!(spec.stage_count(), 2);
    assert_eq!(spec.segment(), Some("device.deviceCategory"));
    assert_eq!(spec.filter().unwrap().value, "1");
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.json");
    assert!(matches!(
        load_funnel_config(&path),
        Err(ConfigError::FileNotFound(p)) if p == path
    ));
}
