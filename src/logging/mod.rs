//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - A single verbosity threshold fixed at startup
//! - User-facing messages mirrored to standard output (the [`CONSOLE`] target)
//! - Optional JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use gdbexport::logging::{init_logging, CONSOLE};
//! use gdbexport::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(target: CONSOLE, "Exporting schema");
//! tracing::debug!(count = 2, "Resolved feature classes");
//! ```

pub mod structured;

#[cfg(test)]
pub(crate) mod capture;

// Re-export commonly used items
pub use structured::{init_logging, parse_log_level, LoggingGuard, CONSOLE};

/// Log the start of an export
///
/// # Example
///
/// ```no_run
/// use gdbexport::log_export_start;
/// use gdbexport::domain::ExportMode;
///
/// log_export_start!(ExportMode::SchemaOnly, 2, "gdbexp.xml");
/// ```
#[macro_export]
macro_rules! log_export_start {
    ($mode:expr, $count:expr, $output:expr) => {
        tracing::info!(
            mode = %$mode,
            feature_classes = $count,
            output = %$output,
            "Starting export"
        );
    };
}

/// Log the completion of an export
///
/// # Example
///
/// ```no_run
/// use gdbexport::log_export_complete;
/// use std::time::Duration;
///
/// log_export_complete!(2, Duration::from_millis(120));
/// ```
#[macro_export]
macro_rules! log_export_complete {
    ($count:expr, $duration:expr) => {
        tracing::info!(
            feature_classes = $count,
            duration_ms = $duration.as_millis() as u64,
            "Export completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use gdbexport::log_error_with_context;
/// use gdbexport::domain::{EngineError, GdbExportError};
///
/// let error = GdbExportError::Connection(EngineError::ConnectionFailed("db.toml not found".to_string()));
/// log_error_with_context!(&error, "Export failed");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
