use std::path::PathBuf;
use std::sync::OnceLock;

use tracing::debug;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{runtime_dir, LogLevel, UserConfig};

static INIT: OnceLock<()> = OnceLock::new();

const LOG_PREFIX: &str = "battmon";
const MAX_LOG_FILES: usize = 7;
/// Target of the probe crate, whose command timings log at trace.
const PROBE_TARGET: &str = "battmon_platform";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// Rolling file in the runtime dir. Used by the TUI, which owns the screen.
    File,
    Stderr,
}

pub struct LogGuard {
    _guard: Option<WorkerGuard>,
}

/// Install the global subscriber once. `--log-level` beats the config file;
/// `RUST_LOG` adds to both.
pub fn init(config: &UserConfig, mode: LogMode, cli_override: Option<LogLevel>) -> LogGuard {
    let mut guard = None;

    INIT.get_or_init(|| {
        let level = cli_override.unwrap_or(config.log_level);
        if level == LogLevel::Off && config.probe_log_level.is_none() {
            return;
        }

        let filter = build_env_filter(level, config.probe_log_level);
        guard = match mode {
            LogMode::File => init_file_logging(filter),
            LogMode::Stderr => {
                init_stderr_logging(filter);
                None
            }
        };

        debug!(
            level = level.as_str(),
            probe_level = config.probe_log_level.map(|l| l.as_str()),
            ?mode,
            "Logging initialized"
        );
    });

    LogGuard { _guard: guard }
}

fn level_directive(target: Option<&str>, level: LogLevel) -> Option<Directive> {
    let text = match target {
        Some(target) => format!("{}={}", target, level.as_str()),
        None => level.as_str().to_string(),
    };
    text.parse().ok()
}

fn build_env_filter(level: LogLevel, probe_level: Option<LogLevel>) -> EnvFilter {
    let mut builder = EnvFilter::builder();
    if let Some(directive) = level_directive(None, level) {
        builder = builder.with_default_directive(directive);
    }
    let mut filter = builder.from_env_lossy();

    if let Some(directive) = probe_level.and_then(|l| level_directive(Some(PROBE_TARGET), l)) {
        filter = filter.add_directive(directive);
    }
    filter
}

fn init_file_logging(filter: EnvFilter) -> Option<WorkerGuard> {
    let log_dir = log_dir();

    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("Warning: Failed to create log directory {:?}: {}", log_dir, e);
        return None;
    }

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_PREFIX)
        .filename_suffix("log")
        .max_log_files(MAX_LOG_FILES)
        .build(&log_dir)
        .ok()?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_timer(UtcTime::rfc_3339())
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();

    Some(guard)
}

fn init_stderr_logging(filter: EnvFilter) {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_timer(UtcTime::rfc_3339())
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .init();
}

pub fn log_dir() -> PathBuf {
    runtime_dir()
}
