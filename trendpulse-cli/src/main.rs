//! TrendPulse — single-shot signal-rate job.
//!
//! Reads a YAML run config and a CSV price file, computes the fraction of bars
//! closing above their rolling mean, and writes a JSON metrics artifact plus
//! an audit log. Exit code 0 on success, 1 on any handled failure.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use trendpulse_runner::{run_job, RunPaths};

#[derive(Parser)]
#[command(
    name = "trendpulse",
    about = "TrendPulse — rolling-mean trend signal rate over a price file"
)]
struct Cli {
    /// CSV price file with a header row and a `close` column.
    #[arg(long)]
    input: PathBuf,

    /// YAML run config with `seed`, `window` and optional `version`.
    #[arg(long)]
    config: PathBuf,

    /// Destination of the JSON metrics (or error) artifact.
    #[arg(long)]
    output: PathBuf,

    /// Audit log destination; appended to if it exists.
    #[arg(long)]
    log_file: PathBuf,
}

fn main() -> ExitCode {
    let started = Instant::now();
    let cli = Cli::parse();

    let paths = RunPaths {
        input: cli.input,
        config: cli.config,
        output: cli.output,
        log_file: cli.log_file,
    };

    ExitCode::from(run_job(&paths, started).exit_code())
}
