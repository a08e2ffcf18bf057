//! The two shapes of the run artifact.

use serde::{Deserialize, Serialize};
use trendpulse_core::SignalSummary;

use crate::config::RunConfig;

/// Name of the single metric this job reports.
pub const SIGNAL_RATE_METRIC: &str = "signal_rate";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Success,
    Error,
}

/// Artifact of a completed run. Field order is the on-disk key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessMetrics {
    pub version: String,
    pub rows_processed: usize,
    pub metric: String,
    /// Signal rate rounded to four decimals.
    pub value: f64,
    pub latency_ms: u64,
    pub seed: u64,
    pub status: RunStatus,
}

impl SuccessMetrics {
    pub fn new(config: &RunConfig, summary: &SignalSummary, latency_ms: u64) -> Self {
        Self {
            version: config.version.clone(),
            rows_processed: summary.rows_processed,
            metric: SIGNAL_RATE_METRIC.to_string(),
            value: round_rate(summary.signal_rate),
            latency_ms,
            seed: config.seed,
            status: RunStatus::Success,
        }
    }
}

/// Artifact of a failed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMetrics {
    pub version: String,
    pub status: RunStatus,
    pub error_message: String,
}

impl ErrorMetrics {
    pub fn new(version: &str, message: &str) -> Self {
        Self {
            version: version.to_string(),
            status: RunStatus::Error,
            error_message: message.to_string(),
        }
    }
}

/// Either artifact shape, as read back from disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RunMetrics {
    Success(SuccessMetrics),
    Error(ErrorMetrics),
}

impl RunMetrics {
    pub fn status(&self) -> RunStatus {
        match self {
            RunMetrics::Success(m) => m.status,
            RunMetrics::Error(m) => m.status,
        }
    }

    pub fn version(&self) -> &str {
        match self {
            RunMetrics::Success(m) => &m.version,
            RunMetrics::Error(m) => &m.version,
        }
    }
}

/// Round a rate to four decimal places.
pub fn round_rate(rate: f64) -> f64 {
    (rate * 10_000.0).round() / 10_000.0
}
