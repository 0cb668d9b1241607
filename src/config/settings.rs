//! Funnel configuration files.
//!
//! The legacy JSON format:
//! ```json
//! {
//!     "table": "[1234567.ga_sessions_]",
//!     "start": "'2016-01-01'",
//!     "end": "'2016-01-31'",
//!     "regex_list": ["'/home'", "'/cart'", "'/checkout'"],
//!     "segmode": "True",
//!     "segment": "device.deviceCategory",
//!     "filtermode": "False",
//!     "filtercol": "",
//!     "filterval": ""
//! }
//! ```
//!
//! Values are SQL fragments and keep their own quoting, so `filterval` is
//! `"'Canada'"` for a string column but `"23"` for an integer one.
//!
//! The same fields can be written as TOML (`*.toml`), where the mode flags may
//! be native booleans:
//! ```toml
//! table = "[1234567.ga_sessions_]"
//! start = "'2016-01-01'"
//! end = "'2016-01-31'"
//! regex_list = ["'/home'", "'/cart'"]
//! segmode = true
//! segment = "device.deviceCategory"
//! ```

use log::info;
use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::{Path, PathBuf};

use crate::funnel::{FunnelError, FunnelSpec, StageFilter};

/// Error type for funnel configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse JSON config: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to parse TOML config: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Missing required field `{field}`: {reason}")]
    MissingField {
        field: &'static str,
        reason: &'static str,
    },

    #[error("Invalid funnel: {0}")]
    Funnel(#[from] FunnelError),
}

/// Raw funnel configuration, field names as they appear on disk.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct FunnelConfig {
    /// Table family, e.g. `[1234567.ga_sessions_]`.
    pub table: String,

    /// Range start, a SQL date literal.
    pub start: String,

    /// Range end, a SQL date literal.
    pub end: String,

    /// Stage patterns in funnel order.
    pub regex_list: Vec<String>,

    /// Break results down by `segment`.
    #[serde(default, deserialize_with = "legacy_flag")]
    pub segmode: bool,

    #[serde(default)]
    pub segment: Option<String>,

    /// Apply `filtercol = filterval` to every stage.
    #[serde(default, deserialize_with = "legacy_flag")]
    pub filtermode: bool,

    #[serde(default)]
    pub filtercol: Option<String>,

    #[serde(default)]
    pub filterval: Option<String>,
}

/// Mode flag: a boolean, or a string that counts as set only when it is
/// exactly `"True"`. `"true"`, `"1"` and `"yes"` all read as off.
fn legacy_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Text(s) => s == "True",
    })
}

/// A field that must be present and non-blank when its mode is on.
fn required(
    value: &Option<String>,
    field: &'static str,
    reason: &'static str,
) -> Result<String, ConfigError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ConfigError::MissingField { field, reason }),
    }
}

impl FunnelConfig {
    /// Parse the legacy JSON format.
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Parse the TOML format.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Validate and convert into a [`FunnelSpec`].
    ///
    /// Segment and filter fields are ignored while their mode is off.
    pub fn into_spec(self) -> Result<FunnelSpec, ConfigError> {
        let mut spec = FunnelSpec::new(self.table, self.start, self.end, self.regex_list)?;

        if self.segmode {
            let segment = required(
                &self.segment,
                "segment",
                "required when segmode is enabled",
            )?;
            spec = spec.with_segment(segment);
        }

        if self.filtermode {
            let column = required(
                &self.filtercol,
                "filtercol",
                "required when filtermode is enabled",
            )?;
            let value = required(
                &self.filterval,
                "filterval",
                "required when filtermode is enabled",
            )?;
            spec = spec.with_filter(StageFilter::new(column, value));
        }

        Ok(spec)
    }

    /// Log the effective configuration.
    pub fn log_summary(&self) {
        info!("Filtermode: {}", self.filtermode);
        info!("Filter Column: {}", self.filtercol.as_deref().unwrap_or(""));
        info!("Filter Value: {}", self.filterval.as_deref().unwrap_or(""));
        info!("Segmode: {}", self.segmode);
        info!("Segment: {}", self.segment.as_deref().unwrap_or(""));
        info!("Stages: {}", self.regex_list.len());
    }
}

/// Load a funnel configuration file.
///
/// `*.toml` files are parsed as TOML; anything else as JSON.
pub fn load_funnel_config(path: &Path) -> Result<FunnelConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)?;
    let config = match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => FunnelConfig::from_toml_str(&content)?,
        _ => FunnelConfig::from_json_str(&content)?,
    };

    config.log_summary();
    Ok(config)
}
