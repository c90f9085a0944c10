//! Tracing setup: a per-run log file plus an optional stderr mirror.
//!
//! The log file is truncated on every run and receives INFO and above.
//! Stderr stays silent unless `RUST_LOG` is set, since handled failures are
//! already printed to stdout. `--verbose` raises the workspace crates to debug.

use std::fs::{self, File};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Timestamp layout of log file lines, e.g. `10/16/2026 02:05:09 PM`.
pub const LOG_TIME_FORMAT: &str = "%m/%d/%Y %I:%M:%S %p";

const VERBOSE_DIRECTIVES: &str = "warn,mlfetch=debug,mlfetch_cli=debug,mlfetch_core=debug,mlfetch_registry=debug";

/// Local wall-clock timer for log lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format(LOG_TIME_FORMAT))
    }
}

/// Create (or truncate) the log file, creating missing parent directories.
pub fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    File::create(path)
}

fn stderr_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    match rust_log {
        _ if verbose => EnvFilter::new(VERBOSE_DIRECTIVES),
        Some(directives) => EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new("off")),
        None => EnvFilter::new("off"),
    }
}

/// Install the global subscriber.
///
/// Fails only when the log file cannot be opened.
pub fn init(log_file: &Path, verbose: bool) -> std::io::Result<()> {
    let file = open_log_file(log_file)?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false) // No ANSI colors in files
                .with_timer(LocalTimer)
                .with_target(false)
                .with_filter(LevelFilter::INFO),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .compact()
                .with_filter(stderr_filter(
                    verbose,
                    std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref(),
                )),
        )
        .try_init()
        .ok(); // Ignore error if already initialized

    Ok(())
}
