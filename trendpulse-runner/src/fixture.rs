//! Synthetic price fixture generation.
//!
//! Produces a minute-bar table with the columns the job expects to see in
//! production (`timestamp, open, high, low, close, volume_btc, volume_usd`).
//! Close follows a Gaussian random walk around a start price; the other
//! columns are noise around it. Each column draws from its own stream of the
//! seed scope, so output is fully determined by `(seed, rows, start_price,
//! anchor)`.

use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{Duration, NaiveDateTime};
use rand::rngs::StdRng;
use rand::Rng;
use serde::Serialize;
use trendpulse_core::SeedScope;

/// Timestamp layout written to the `timestamp` column.
pub const FIXTURE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Parameters of a synthetic fixture.
#[derive(Debug, Clone)]
pub struct FixtureSpec {
    pub rows: usize,
    pub seed: u64,
    pub start_price: f64,
    /// Timestamp of the first row; each later row is one minute earlier.
    pub anchor: NaiveDateTime,
}

/// One generated row, in output column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixtureRow {
    pub timestamp: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume_btc: f64,
    pub volume_usd: f64,
}

/// Standard normal draw via Box–Muller.
fn standard_normal(rng: &mut StdRng) -> f64 {
    let u1: f64 = rng.gen_range(f64::EPSILON..1.0);
    let u2: f64 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}

/// Generate the fixture rows in memory.
pub fn generate_rows(spec: &FixtureSpec) -> Vec<FixtureRow> {
    let scope = SeedScope::new(spec.seed);
    let mut walk = scope.rng_for("close");
    let mut open_noise = scope.rng_for("open");
    let mut spread = scope.rng_for("spread");
    let mut volume = scope.rng_for("volume");

    let mut level = 0.0;
    (0..spec.rows)
        .map(|i| {
            level += standard_normal(&mut walk);
            let close = spec.start_price + level;
            let timestamp = spec.anchor - Duration::minutes(i as i64);
            FixtureRow {
                timestamp: timestamp.format(FIXTURE_TIMESTAMP_FORMAT).to_string(),
                open: close + standard_normal(&mut open_noise),
                high: close + spread.gen_range(0.0..10.0),
                low: close - spread.gen_range(0.0..10.0),
                close,
                volume_btc: volume.gen_range(0.1..10.0),
                volume_usd: volume.gen_range(1_000.0..100_000.0),
            }
        })
        .collect()
}

/// Generate a fixture and write it as CSV with a header row.
pub fn write_fixture(path: &Path, spec: &FixtureSpec) -> Result<usize> {
    if spec.rows == 0 {
        bail!("fixture must have at least one row");
    }
    if !spec.start_price.is_finite() {
        bail!("start price must be finite, got {}", spec.start_price);
    }

    let rows = generate_rows(spec);
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create fixture at {}", path.display()))?;
    for row in &rows {
        wtr.serialize(row)
            .context("failed to serialize fixture row")?;
    }
    wtr.flush()
        .with_context(|| format!("failed to flush fixture to {}", path.display()))?;
    Ok(rows.len())
}
