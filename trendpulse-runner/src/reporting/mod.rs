//! Result reporting: the run artifact and its stdout mirror.

mod artifact;
mod metrics;

use std::io::Write;
use std::path::Path;

use tracing::error;

pub use artifact::{to_pretty_json, write_artifact, ReportError};
pub use metrics::{
    round_rate, ErrorMetrics, RunMetrics, RunStatus, SuccessMetrics, SIGNAL_RATE_METRIC,
};

/// Persist success metrics to `output`, then echo the same JSON to stdout.
///
/// Nothing is printed unless the artifact was written. A failed echo (for
/// example a closed pipe) is an I/O error like a failed write.
pub fn report_success(metrics: &SuccessMetrics, output: &Path) -> Result<(), ReportError> {
    report_success_to(metrics, output, &mut std::io::stdout().lock())
}

fn report_success_to<W: Write>(
    metrics: &SuccessMetrics,
    output: &Path,
    echo: &mut W,
) -> Result<(), ReportError> {
    let json = to_pretty_json(metrics)?;
    write_artifact(output, &json)?;
    writeln!(echo, "{json}")?;
    echo.flush()?;
    Ok(())
}

/// Log `message` at error level and persist the error artifact to `output`.
///
/// The logged line and the artifact's `error_message` are the same string.
pub fn report_error(
    message: &str,
    version: &str,
    output: &Path,
) -> Result<ErrorMetrics, ReportError> {
    error!("{message}");
    let metrics = ErrorMetrics::new(version, message);
    let json = to_pretty_json(&metrics)?;
    write_artifact(output, &json)?;
    Ok(metrics)
}
