//! Writing compiled queries to disk.
//!
//! Output files are named after the day they were produced,
//! `<weekday>_<ddmmyy>_query.txt` (e.g. `Mon_191026_query.txt`), in the
//! current directory.

use chrono::{Local, NaiveDate};
use std::fs;
use std::path::{Path, PathBuf};

/// Error type for query output.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("Failed to write query to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// File name for a query produced on `date`.
pub fn output_file_name(date: NaiveDate) -> String {
    format!("{}_query.txt", date.format("%a_%d%m%y"))
}

/// Output path for a query produced today (local time).
pub fn default_output_path() -> PathBuf {
    PathBuf::from(output_file_name(Local::now().date_naive()))
}

/// Write the full query text, replacing any existing file.
pub fn write_query(path: &Path, sql: &str) -> Result<(), OutputError> {
    fs::write(path, sql).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })
}
