//! TrendPulse Runner — the signal-rate batch job around `trendpulse-core`.
//!
//! This crate provides:
//! - Run config loading and validation (YAML)
//! - Input dataset loading and validation (CSV)
//! - The run controller with its single error-handling policy
//! - Metrics/error artifacts and the audit log
//! - Synthetic fixture generation for local runs and tests

pub mod config;
pub mod data_loader;
pub mod fixture;
pub mod logging;
pub mod reporting;
pub mod runner;

pub use config::{load_config, ConfigError, RunConfig, UNKNOWN_VERSION};
pub use data_loader::{load_dataset, LoadError};
pub use fixture::{generate_rows, write_fixture, FixtureRow, FixtureSpec};
pub use logging::AuditLog;
pub use reporting::{
    report_error, report_success, ErrorMetrics, ReportError, RunMetrics, RunStatus,
    SuccessMetrics,
};
pub use runner::{
    run_job, ErrorKind, RunController, RunError, RunOutcome, RunPaths, RunStage, EXIT_FAILURE,
    EXIT_SUCCESS,
};
