//! Run controller: the one place that sequences the stages and owns the
//! error policy.
//!
//! ```text
//! Start → ConfigLoaded → DataLoaded → SignalsComputed → Reported
//!   └──────────┴─────────────┴──────────────┴──────→ Errored
//! ```
//!
//! Every stage returns a typed error. The first one is converted into a
//! `RunError`, logged, written as the error artifact, and ends the run; later
//! stages are never attempted.

use std::fmt;
use std::path::PathBuf;
use std::time::Instant;

use thiserror::Error;
use tracing::{debug, info};
use trendpulse_core::{SignalEngine, SignalError};

use crate::config::{load_config, ConfigError, RunConfig, UNKNOWN_VERSION};
use crate::data_loader::{load_dataset, LoadError};
use crate::logging::AuditLog;
use crate::reporting::{report_error, report_success, ErrorMetrics, ReportError, SuccessMetrics};

/// Exit code of a successful run.
pub const EXIT_SUCCESS: u8 = 0;
/// Exit code of any handled failure.
pub const EXIT_FAILURE: u8 = 1;

/// Filesystem locations for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPaths {
    pub input: PathBuf,
    pub config: PathBuf,
    pub output: PathBuf,
    pub log_file: PathBuf,
}

/// Category of a run failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ConfigUnreadable,
    ConfigInvalid,
    InputMissing,
    InputMalformed,
    InputEmpty,
    InputSchemaInvalid,
    ProcessingError,
    OutputWriteError,
    LogUnavailable,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Any failure that ends a run. `Display` is the artifact's `error_message`.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Data(#[from] LoadError),

    #[error("Processing error: {0}")]
    Processing(#[from] SignalError),

    #[error("Failed to write output: {0}")]
    Output(#[from] ReportError),

    #[error("Failed to open log file: {0}")]
    LogUnavailable(#[source] std::io::Error),
}

impl RunError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RunError::Config(e) if e.is_unreadable() => ErrorKind::ConfigUnreadable,
            RunError::Config(_) => ErrorKind::ConfigInvalid,
            RunError::Data(LoadError::Missing) => ErrorKind::InputMissing,
            RunError::Data(LoadError::Empty) => ErrorKind::InputEmpty,
            RunError::Data(LoadError::MissingClose) => ErrorKind::InputSchemaInvalid,
            RunError::Data(_) => ErrorKind::InputMalformed,
            RunError::Processing(_) => ErrorKind::ProcessingError,
            RunError::Output(_) => ErrorKind::OutputWriteError,
            RunError::LogUnavailable(_) => ErrorKind::LogUnavailable,
        }
    }
}

/// Controller state. Advances strictly forward; `Reported` and `Errored` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    Start,
    ConfigLoaded,
    DataLoaded,
    SignalsComputed,
    Reported,
    Errored,
}

impl RunStage {
    pub fn is_terminal(self) -> bool {
        matches!(self, RunStage::Reported | RunStage::Errored)
    }
}

/// How a run ended.
#[derive(Debug)]
pub enum RunOutcome {
    Succeeded(SuccessMetrics),
    Failed {
        error: RunError,
        /// `None` when the error artifact itself could not be written.
        artifact: Option<ErrorMetrics>,
    },
}

impl RunOutcome {
    pub fn exit_code(&self) -> u8 {
        match self {
            RunOutcome::Succeeded(_) => EXIT_SUCCESS,
            RunOutcome::Failed { .. } => EXIT_FAILURE,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Succeeded(_))
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            RunOutcome::Succeeded(_) => None,
            RunOutcome::Failed { error, .. } => Some(error.kind()),
        }
    }
}

/// Drives one run from config to artifact.
#[derive(Debug)]
pub struct RunController<'a> {
    paths: &'a RunPaths,
    started: Instant,
    stage: RunStage,
}

impl<'a> RunController<'a> {
    /// `started` is the process start; latency is measured from it.
    pub fn new(paths: &'a RunPaths, started: Instant) -> Self {
        Self {
            paths,
            started,
            stage: RunStage::Start,
        }
    }

    pub fn stage(&self) -> RunStage {
        self.stage
    }

    pub fn execute(mut self) -> RunOutcome {
        info!("Job started");

        let config = match load_config(&self.paths.config) {
            Ok(config) => config,
            Err(e) => {
                let version = e.version().to_string();
                return self.fail(e.into(), &version);
            }
        };
        info!(
            "Config loaded: seed={}, window={}, version={}",
            config.seed, config.window, config.version
        );
        self.advance(RunStage::ConfigLoaded);

        let series = match load_dataset(&self.paths.input) {
            Ok(series) => series,
            Err(e) => return self.fail(e.into(), &config.version),
        };
        info!("Data loaded: {} rows", series.len());
        self.advance(RunStage::DataLoaded);

        let computed = SignalEngine::new(config.window).and_then(|engine| engine.compute(&series));
        let summary = match computed {
            Ok(summary) => summary,
            Err(e) => return self.fail(e.into(), &config.version),
        };
        info!(
            "Metrics: signal_rate={:.4}, rows_processed={}",
            summary.signal_rate, summary.rows_processed
        );
        self.advance(RunStage::SignalsComputed);

        let metrics = SuccessMetrics::new(&config, &summary, self.latency_ms());
        self.finish(metrics, &config)
    }

    fn finish(mut self, metrics: SuccessMetrics, config: &RunConfig) -> RunOutcome {
        match report_success(&metrics, &self.paths.output) {
            Ok(()) => {
                info!("Job completed successfully in {}ms", metrics.latency_ms);
                self.advance(RunStage::Reported);
                RunOutcome::Succeeded(metrics)
            }
            Err(e) => self.fail(e.into(), &config.version),
        }
    }

    fn fail(mut self, error: RunError, version: &str) -> RunOutcome {
        self.advance(RunStage::Errored);
        let artifact = match report_error(&error.to_string(), version, &self.paths.output) {
            Ok(artifact) => Some(artifact),
            Err(write_err) => {
                eprintln!(
                    "failed to write error artifact to {}: {write_err}",
                    self.paths.output.display()
                );
                None
            }
        };
        RunOutcome::Failed { error, artifact }
    }

    fn advance(&mut self, next: RunStage) {
        debug_assert!(!self.stage.is_terminal(), "run already ended in {:?}", self.stage);
        debug!(from = ?self.stage, to = ?next, "stage transition");
        self.stage = next;
    }

    /// Whole milliseconds since process start, truncated.
    fn latency_ms(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// Run the job: open the audit log, then drive the controller under it.
///
/// If the log cannot be opened the run still produces an error artifact; the
/// reason goes to stderr since there is nowhere else to record it.
pub fn run_job(paths: &RunPaths, started: Instant) -> RunOutcome {
    let log = match AuditLog::open(&paths.log_file) {
        Ok(log) => log,
        Err(e) => {
            let error = RunError::LogUnavailable(e);
            let message = error.to_string();
            eprintln!("{message}");
            let artifact = report_error(&message, UNKNOWN_VERSION, &paths.output).ok();
            return RunOutcome::Failed { error, artifact };
        }
    };

    let _guard = log.install();
    RunController::new(paths, started).execute()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kinds_map_from_stage_errors() {
        let cases: Vec<(RunError, ErrorKind, &str)> = vec![
            (
                ConfigError::NotAMapping.into(),
                ErrorKind::ConfigUnreadable,
                "Missing or invalid config file",
            ),
            (
                ConfigError::Invalid {
                    version: "v1".into(),
                }
                .into(),
                ErrorKind::ConfigInvalid,
                "Invalid config structure",
            ),
            (LoadError::Missing.into(), ErrorKind::InputMissing, "Missing input file"),
            (LoadError::NoColumns.into(), ErrorKind::InputMalformed, "Invalid CSV format"),
            (LoadError::Empty.into(), ErrorKind::InputEmpty, "Empty input file"),
            (
                LoadError::MissingClose.into(),
                ErrorKind::InputSchemaInvalid,
                "Missing required 'close' column",
            ),
            (
                SignalError::NoDefinedMean.into(),
                ErrorKind::ProcessingError,
                "Processing error: no position has a defined rolling mean",
            ),
        ];

        for (error, kind, message) in cases {
            assert_eq!(error.kind(), kind);
            assert_eq!(error.to_string(), message);
        }
    }

    #[test]
    fn output_and_log_errors_embed_cause() {
        let io = || std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");

        let output: RunError = ReportError::Io(io()).into();
        assert_eq!(output.kind(), ErrorKind::OutputWriteError);
        assert_eq!(output.to_string(), "Failed to write output: denied");

        let log = RunError::LogUnavailable(io());
        assert_eq!(log.kind(), ErrorKind::LogUnavailable);
        assert_eq!(log.to_string(), "Failed to open log file: denied");
    }

    #[test]
    fn kind_display_is_the_kind_name() {
        assert_eq!(ErrorKind::InputSchemaInvalid.to_string(), "InputSchemaInvalid");
    }

    #[test]
    fn terminal_stages() {
        assert!(RunStage::Reported.is_terminal());
        assert!(RunStage::Errored.is_terminal());
        assert!(!RunStage::Start.is_terminal());
        assert!(!RunStage::SignalsComputed.is_terminal());
    }

    #[test]
    fn controller_starts_in_start_stage() {
        let paths = RunPaths {
            input: "in.csv".into(),
            config: "config.yaml".into(),
            output: "out.json".into(),
            log_file: "run.log".into(),
        };
        assert_eq!(RunController::new(&paths, Instant::now()).stage(), RunStage::Start);
    }
}
