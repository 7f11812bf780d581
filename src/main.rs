// gdbexport - Export geodatabase feature classes to an XML workspace document
// Copyright (c) 2025 gdbexport Contributors
// Licensed under the GNU General Public License v3.0 or later

use anyhow::Context;
use gdbexport::cli::commands::export;
use gdbexport::cli::Cli;
use gdbexport::config::{load_config_or_default, GdbExportConfig, LoggingConfig};
use gdbexport::domain::{ExitStatus, Result};
use gdbexport::logging::{init_logging, CONSOLE};
use std::process;

fn main() {
    // Load environment variables from .env file if present
    // This is optional - if .env doesn't exist, it's silently ignored
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse_args() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            let code = if e.use_stderr() {
                ExitStatus::Failure.code()
            } else {
                ExitStatus::Success.code()
            };
            process::exit(code);
        }
    };

    let config = load_config_or_default(cli.config.as_deref());

    let (log_level, logging_config) = match &config {
        Ok(config) => (
            cli.log_level
                .clone()
                .unwrap_or_else(|| config.application.log_level.clone()),
            config.logging.clone(),
        ),
        Err(_) => (
            cli.log_level.clone().unwrap_or_else(|| "info".to_string()),
            LoggingConfig::default(),
        ),
    };

    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(ExitStatus::Unknown.code());
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "gdbexport - export geodatabase feature classes to XML"
    );

    let status = match execute_command(&cli, config) {
        Ok(status) => status,
        Err(e) => {
            tracing::error!(target: CONSOLE, "Error");
            gdbexport::log_error_with_context!(format!("{e:#}"), "Startup failed");
            ExitStatus::Failure
        }
    };

    tracing::info!(exit_code = status.code(), "Program done.");

    // process::exit skips destructors; flush file logs first
    drop(guard);
    process::exit(status.code());
}

/// Execute the export with the loaded configuration
fn execute_command(cli: &Cli, config: Result<GdbExportConfig>) -> anyhow::Result<ExitStatus> {
    let config = config.context("Failed to load configuration")?;
    Ok(export::execute(cli, &config))
}
