//! Funneler CLI - compile a funnel definition to SQL
//!
//! Usage:
//!   funneler <config.json>
//!
//! The query is written to `<weekday>_<ddmmyy>_query.txt` in the current
//! directory. Set `RUST_LOG=debug` to trace each stage as it is joined.

use clap::Parser;
use funneler::compile::{compile_to_file, CompileOptions};
use funneler::output::default_output_path;
use log::info;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "funneler")]
#[command(about = "Funneler - compile page-path funnels to a single BigQuery query")]
#[command(version)]
struct Cli {
    /// Path to the funnel configuration (.json, or .toml)
    config: PathBuf,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let out_path = default_output_path();
    if let Err(e) = compile_to_file(&cli.config, &out_path, CompileOptions::default()) {
        eprintln!("Compilation error: {}", e);
        return ExitCode::FAILURE;
    }

    info!("Query is in {}", out_path.display());
    ExitCode::SUCCESS
}
