//! TrendPulse fixture generator — writes a synthetic minute-bar CSV that the
//! job accepts as `--input`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::Parser;
use trendpulse_runner::{write_fixture, FixtureSpec};

#[derive(Parser)]
#[command(
    name = "trendpulse-fixture",
    about = "Generate a seeded synthetic price file"
)]
struct Cli {
    /// Number of rows to generate.
    #[arg(long, default_value_t = 10_000)]
    rows: usize,

    /// Seed for every random column.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Level the close random walk starts from.
    #[arg(long, default_value_t = 50_000.0)]
    start_price: f64,

    /// Timestamp of the first row (YYYY-MM-DD HH:MM:SS). Defaults to now.
    #[arg(long)]
    anchor: Option<String>,

    /// Output CSV path.
    #[arg(long, default_value = "data.csv")]
    output: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let anchor = match cli.anchor.as_deref() {
        Some(s) => NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
            .with_context(|| format!("invalid --anchor '{s}', expected YYYY-MM-DD HH:MM:SS"))?,
        None => chrono::Local::now().naive_local(),
    };

    let spec = FixtureSpec {
        rows: cli.rows,
        seed: cli.seed,
        start_price: cli.start_price,
        anchor,
    };

    let written = write_fixture(&cli.output, &spec)?;
    println!("Wrote {written} rows to {}", cli.output.display());
    Ok(())
}
