//! Audit log: one `timestamp - LEVEL - message` line per event, appended to
//! the run's log file.
//!
//! The subscriber is installed as the thread's default only for the lifetime
//! of the returned guard, so the log file is closed when the run ends and
//! separate runs in one process never share a destination.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing::subscriber::DefaultGuard;
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the default `info` threshold.
pub const LOG_FILTER_ENV: &str = "TRENDPULSE_LOG";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats events as `2024-01-02 15:04:05 - INFO - message`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuditLineFormat;

impl<S, N> FormatEvent<S, N> for AuditLineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let now = chrono::Local::now().format(TIMESTAMP_FORMAT);
        write!(writer, "{now} - {} - ", event.metadata().level())?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// An opened audit log destination.
#[derive(Debug)]
pub struct AuditLog {
    file: File,
}

impl AuditLog {
    /// Open (or create) `path` for appending.
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file })
    }

    /// Route this thread's `tracing` events into the log until the guard drops.
    pub fn install(self) -> DefaultGuard {
        let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
            .unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .event_format(AuditLineFormat)
                    .with_ansi(false)
                    .with_writer(Mutex::new(self.file)),
            )
            .set_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::{debug, error, info};

    #[test]
    fn lines_carry_timestamp_level_and_message() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.log");

        {
            let _guard = AuditLog::open(&path).unwrap().install();
            info!("Job started");
            debug!("not at info");
            error!("Empty input file");
        }

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(" - INFO - Job started"), "{}", lines[0]);
        assert!(lines[1].ends_with(" - ERROR - Empty input file"), "{}", lines[1]);

        let stamp = lines[0].split(" - ").next().unwrap();
        assert!(chrono::NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).is_ok());
    }

    #[test]
    fn reopening_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.log");

        for message in ["first", "second"] {
            let _guard = AuditLog::open(&path).unwrap().install();
            info!("{message}");
        }

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.lines().last().unwrap().ends_with("second"));
    }

    #[test]
    fn events_after_guard_drop_are_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.log");

        {
            let _guard = AuditLog::open(&path).unwrap().install();
            info!("inside");
        }
        info!("outside");

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("inside"));
        assert!(!text.contains("outside"));
    }

    #[test]
    fn unopenable_destination_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AuditLog::open(&dir.path().join("no-such-dir").join("run.log")).is_err());
    }
}
