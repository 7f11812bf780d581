//! Export command implementation
//!
//! Turns parsed arguments and configuration into an [`ExportRequest`], wires
//! the engine, the license coordinator and the orchestrator together, and
//! runs the export inside the license-guarded boundary.

use crate::adapters::engine::create_engine;
use crate::cli::{usage, Cli, USAGE_EXAMPLE};
use crate::config::GdbExportConfig;
use crate::core::export::{run_with_license, ExportOrchestrator};
use crate::core::license::{LicenseCoordinator, LicensePolicy};
use crate::domain::{ExitStatus, ExportRequest, ExportRequestBuilder, GdbExportError, Result};
use crate::logging::CONSOLE;

/// Build the export request from the command line
///
/// # Errors
///
/// Returns [`GdbExportError::Configuration`] when usage was requested, when
/// `-c` or `-t` is missing, or when the name list is invalid.
pub fn build_request(cli: &Cli, config: &GdbExportConfig) -> Result<ExportRequest> {
    if cli.wants_usage() {
        return Err(GdbExportError::Configuration(format!(
            "Wrong args, {USAGE_EXAMPLE}"
        )));
    }

    let mut builder = ExportRequestBuilder::new()
        .include_data(cli.data)
        .include_metadata(cli.metadata)
        .output_path(
            cli.file
                .clone()
                .unwrap_or_else(|| config.export.default_output.clone().into()),
        );
    if let Some(connection) = &cli.connection {
        builder = builder.connection_descriptor(connection.clone());
    }
    if let Some(tables) = &cli.tables {
        builder = builder.names_csv(tables);
    }

    let request = builder.build()?;
    tracing::info!(
        connection = %request.connection_descriptor(),
        tables = ?request.requested_names(),
        include_data = request.include_data(),
        include_metadata = request.include_metadata(),
        output = %request.output_path().display(),
        "Parameters"
    );
    Ok(request)
}

/// Execute the export command
pub fn execute(cli: &Cli, config: &GdbExportConfig) -> ExitStatus {
    let request = match build_request(cli, config) {
        Ok(request) => request,
        Err(e) => {
            if cli.wants_usage() {
                print!("{}", usage());
            }
            tracing::error!(target: CONSOLE, "Error");
            crate::log_error_with_context!(e, "Invalid arguments");
            return ExitStatus::Failure;
        }
    };

    let (license_manager, engine) = create_engine(config);
    let mut coordinator =
        LicenseCoordinator::new(license_manager, LicensePolicy::from(&config.license));
    let orchestrator = ExportOrchestrator::new(engine);

    run_with_license(&mut coordinator, &orchestrator, &request)
}
