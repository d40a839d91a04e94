use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::domain::DomainError;

const LOG_TARGET: &str = env!("CARGO_CRATE_NAME");

/// Default filter directive for a level, scoped to this crate.
fn directive(level: &str) -> String {
    format!("{}={}", LOG_TARGET, level)
}

/// Initialize logging: warnings on stderr and, optionally, a daily rotated
/// JSON log file at `level`.
///
/// `RUST_LOG` overrides the console filter. Returns a guard that must be kept
/// alive for the duration of the process so the file writer gets flushed.
pub fn init_logging(
    logs_dir: &Path,
    level: &str,
    file_logging: bool,
) -> Result<Option<WorkerGuard>, DomainError> {
    // stdout belongs to command output
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .with_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive("warn"))),
        );

    if file_logging {
        fs::create_dir_all(logs_dir)?;

        let file_appender = RollingFileAppender::new(Rotation::DAILY, logs_dir, "itinerary.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .json()
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(EnvFilter::new(directive(level)));

        if tracing_subscriber::registry()
            .with(console_layer)
            .with(file_layer)
            .try_init()
            .is_ok()
        {
            tracing::debug!(logs_dir = ?logs_dir, level = level, "Logging initialized with file output");
        }

        Ok(Some(guard))
    } else {
        let _ = tracing_subscriber::registry().with(console_layer).try_init();
        Ok(None)
    }
}
