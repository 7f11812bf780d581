//! Structured logging setup using tracing
//!
//! Every enabled event goes to standard error. Events emitted with the
//! [`CONSOLE`] target are also written, message only, to standard output.
//! File logging in JSON with rotation is optional.

use crate::config::LoggingConfig;
use crate::domain::{GdbExportError, Result};
use std::io::IsTerminal;
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::{filter_fn, LevelFilter};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Target for messages that go to both standard error and standard output
pub const CONSOLE: &str = "gdbexport::console";

/// Guard that must be kept alive for the duration of the program
/// to ensure logs are flushed properly
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

impl LoggingGuard {
    fn new(file_guard: Option<WorkerGuard>) -> Self {
        Self {
            _file_guard: file_guard,
        }
    }
}

/// Initialize the logging system
///
/// The threshold is fixed for the life of the process. `RUST_LOG`, when set,
/// replaces the threshold for the standard error and file layers.
///
/// # Arguments
///
/// * `log_level_str` - Level name or number 0 (off) to 5 (trace)
/// * `config` - Logging configuration
///
/// # Errors
///
/// Returns a configuration error for an invalid level, an unusable log
/// directory, or if logging was already initialized.
///
/// # Example
///
/// ```no_run
/// use gdbexport::logging::init_logging;
/// use gdbexport::config::LoggingConfig;
///
/// let _guard = init_logging("info", &LoggingConfig::default()).expect("logging");
/// tracing::info!(target: gdbexport::logging::CONSOLE, "shown on stdout and stderr");
/// ```
pub fn init_logging(log_level_str: &str, config: &LoggingConfig) -> Result<LoggingGuard> {
    let threshold = parse_log_level(log_level_str)?;

    let mut layers = Vec::new();

    let ansi = std::io::stderr().is_terminal();
    layers.push(diagnostic_layer(std::io::stderr, ansi, threshold).boxed());

    layers.push(console_layer(std::io::stdout, threshold).boxed());

    let file_guard = if config.local_enabled {
        let rotation = match config.local_rotation.as_str() {
            "hourly" => Rotation::HOURLY,
            "never" => Rotation::NEVER,
            _ => Rotation::DAILY,
        };

        std::fs::create_dir_all(&config.local_path).map_err(|e| {
            GdbExportError::Configuration(format!(
                "Failed to create log directory {}: {}",
                config.local_path, e
            ))
        })?;

        let file_appender = RollingFileAppender::new(rotation, &config.local_path, "gdbexport.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let file_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_writer(non_blocking)
            .with_filter(env_filter(threshold));

        layers.push(file_layer.boxed());
        Some(guard)
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|e| GdbExportError::Configuration(format!("Failed to initialize logging: {e}")))?;

    tracing::debug!(
        threshold = %threshold,
        local_enabled = config.local_enabled,
        local_path = %config.local_path,
        "Logging initialized"
    );

    Ok(LoggingGuard::new(file_guard))
}

/// Full-format layer; colour only when writing to a terminal
fn diagnostic_layer<S, W>(
    writer: W,
    ansi: bool,
    threshold: LevelFilter,
) -> impl Layer<S> + Send + Sync + 'static
where
    S: Subscriber + for<'span> LookupSpan<'span>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_target(false)
        .with_ansi(ansi)
        .with_filter(env_filter(threshold))
}

/// Message-only layer for [`CONSOLE`] events at or above the threshold
fn console_layer<S, W>(writer: W, threshold: LevelFilter) -> impl Layer<S> + Send + Sync + 'static
where
    S: Subscriber + for<'span> LookupSpan<'span>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .without_time()
        .with_level(false)
        .with_target(false)
        .with_ansi(false)
        .with_filter(filter_fn(move |meta| {
            meta.target() == CONSOLE && threshold >= *meta.level()
        }))
}

/// `RUST_LOG` if set, otherwise the threshold for this crate
fn env_filter(threshold: LevelFilter) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("gdbexport={threshold}")))
}

/// Parse a verbosity threshold
///
/// Accepts a level name or a number: 0 off, 1 error, 2 warn, 3 info,
/// 4 debug, 5 trace.
///
/// # Errors
///
/// Returns a configuration error for anything else.
pub fn parse_log_level(level_str: &str) -> Result<LevelFilter> {
    match level_str.trim().to_lowercase().as_str() {
        "off" | "0" => Ok(LevelFilter::OFF),
        "error" | "1" => Ok(LevelFilter::ERROR),
        "warn" | "2" => Ok(LevelFilter::WARN),
        "info" | "3" => Ok(LevelFilter::INFO),
        "debug" | "4" => Ok(LevelFilter::DEBUG),
        "trace" | "5" => Ok(LevelFilter::TRACE),
        _ => Err(GdbExportError::Configuration(format!(
            "Invalid log level: {}. Must be one of: trace, debug, info, warn, error, off or 0-5",
            level_str
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::capture::CapturedLogs;
    use test_case::test_case;

    #[test_case("trace", LevelFilter::TRACE)]
    #[test_case("Debug", LevelFilter::DEBUG)]
    #[test_case("INFO", LevelFilter::INFO)]
    #[test_case("warn", LevelFilter::WARN)]
    #[test_case("error", LevelFilter::ERROR)]
    #[test_case("off", LevelFilter::OFF)]
    #[test_case("0", LevelFilter::OFF)]
    #[test_case("1", LevelFilter::ERROR)]
    #[test_case("3", LevelFilter::INFO)]
    #[test_case("5", LevelFilter::TRACE)]
    fn test_parse_log_level_valid(input: &str, expected: LevelFilter) {
        assert_eq!(parse_log_level(input).unwrap(), expected);
    }

    #[test_case("invalid")]
    #[test_case("")]
    #[test_case("6")]
    fn test_parse_log_level_invalid(input: &str) {
        assert!(parse_log_level(input).is_err());
    }

    #[test]
    fn test_console_layer_keeps_only_console_target() {
        let logs = CapturedLogs::default();
        let subscriber =
            tracing_subscriber::registry().with(console_layer(logs.clone(), LevelFilter::INFO));

        tracing::subscriber::with_default(subscriber, || {
            tracing::error!(target: CONSOLE, "Error, tabname [T.GONE] will not be exported");
            tracing::info!(target: CONSOLE, "OK, xml written to gdbexp.xml");
            tracing::error!("catalog listing failed");
            tracing::debug!(target: CONSOLE, "resolving T.TAB1");
        });

        let out = logs.contents();
        assert_eq!(logs.count("tabname [T.GONE]"), 1);
        assert!(out.contains("OK, xml written to gdbexp.xml"));
        assert!(!out.contains("catalog listing failed"));
        assert!(!out.contains("resolving T.TAB1"));
        assert!(!out.contains("ERROR"));
    }

    #[test]
    fn test_console_layer_off_threshold_is_silent() {
        let logs = CapturedLogs::default();
        let subscriber =
            tracing_subscriber::registry().with(console_layer(logs.clone(), LevelFilter::OFF));

        tracing::subscriber::with_default(subscriber, || {
            tracing::error!(target: CONSOLE, "Error");
        });

        assert!(logs.contents().is_empty());
    }

    #[test]
    fn test_diagnostic_layer_without_ansi_writes_plain_text() {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::registry().with(diagnostic_layer(
            logs.clone(),
            false,
            LevelFilter::INFO,
        ));

        tracing::subscriber::with_default(subscriber, || {
            tracing::error!(target: CONSOLE, "Error");
            tracing::error!(error = "db.toml not found", "Error occurred");
        });

        let out = logs.contents();
        assert!(out.contains("ERROR"));
        assert!(out.contains("db.toml not found"));
        assert!(!out.contains('\u{1b}'));
    }

    #[test]
    fn test_logging_guard_creation() {
        let guard = LoggingGuard::new(None);
        drop(guard);
    }
}
