//! Export orchestrator - main workflow of an export run
//!
//! Stages run strictly in order and nothing is retried:
//!
//! 1. Open the source workspace
//! 2. Resolve the requested feature classes
//! 3. Create a scratch workspace
//! 4. Generate the name mapping and refuse it if it has conflicts
//! 5. Export schema, or schema and data
//!
//! The first failing stage ends the run with its own [`GdbExportError`]
//! variant.

use crate::adapters::engine::{ExportOptions, GeodatabaseEngine};
use crate::core::export::resolver::CatalogResolver;
use crate::core::export::summary::ExportSummary;
use crate::domain::{ExportMode, ExportRequest, GdbExportError, Result};
use crate::logging::CONSOLE;
use crate::{log_export_complete, log_export_start};
use std::sync::Arc;
use std::time::Instant;

/// Export orchestrator
pub struct ExportOrchestrator {
    engine: Arc<dyn GeodatabaseEngine>,
}

impl ExportOrchestrator {
    /// Create an orchestrator over a geodatabase engine
    pub fn new(engine: Arc<dyn GeodatabaseEngine>) -> Self {
        Self { engine }
    }

    /// Execute one export run
    ///
    /// # Errors
    ///
    /// - [`GdbExportError::Connection`] if the source workspace cannot be opened
    /// - [`GdbExportError::NameResolution`] if any requested name is missing
    /// - [`GdbExportError::MappingConflict`] if destination names collide;
    ///   the transfer service is not called
    /// - [`GdbExportError::Transfer`] if the transfer call fails
    /// - [`GdbExportError::Engine`] for catalog and scratch workspace faults
    pub fn run(&self, request: &ExportRequest) -> Result<ExportSummary> {
        let start_time = Instant::now();
        tracing::info!("Export started");

        tracing::info!(descriptor = %request.connection_descriptor(), "Opening the source geodatabase");
        let workspace = self
            .engine
            .open_workspace(request.connection_descriptor())
            .map_err(GdbExportError::Connection)?;
        tracing::debug!(workspace = workspace.id(), location = %workspace.location(), "Workspace opened");

        let entries =
            CatalogResolver::new(self.engine.as_ref()).resolve(&workspace, request.requested_names())?;

        tracing::info!("Creating a scratch workspace");
        let scratch = self.engine.create_scratch_workspace()?;
        tracing::debug!(scratch = %scratch, "Scratch workspace created");

        tracing::info!("Generating the name mapping");
        let mapping = self.engine.generate_name_mapping(&entries, &scratch)?;
        if mapping.has_conflicts() {
            for conflict in mapping.conflicts() {
                tracing::error!(conflict = %conflict, "Name mapping conflict");
            }
            return Err(GdbExportError::MappingConflict {
                conflicts: mapping.conflicts().to_vec(),
            });
        }

        let output = request.output_path();
        let mode = request.mode();
        log_export_start!(mode, mapping.len(), output.display());

        let transfer = match mode {
            ExportMode::SchemaOnly => {
                tracing::info!(
                    output = %output.display(),
                    metadata = request.include_metadata(),
                    "Exporting schema"
                );
                self.engine.export_schema(
                    &mapping,
                    output,
                    ExportOptions::schema(request.include_metadata()),
                )
            }
            ExportMode::SchemaAndData => {
                tracing::info!(
                    output = %output.display(),
                    metadata = request.include_metadata(),
                    "Exporting schema and data"
                );
                self.engine.export_schema_and_data(
                    &mapping,
                    output,
                    ExportOptions::schema_and_data(request.include_metadata()),
                )
            }
        };
        transfer.map_err(GdbExportError::Transfer)?;

        tracing::info!(target: CONSOLE, "OK, xml written to {}", output.display());

        let duration = start_time.elapsed();
        log_export_complete!(mapping.len(), duration);

        let feature_classes = mapping
            .datasets()
            .iter()
            .map(|d| d.target_name.clone())
            .collect();
        Ok(ExportSummary::new(mode, output.to_path_buf(), feature_classes).with_duration(duration))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::fake::{EngineCall, FakeEngine};
    use crate::domain::ExportRequestBuilder;

    fn request(names: &str, include_data: bool) -> ExportRequest {
        ExportRequestBuilder::new()
            .connection_descriptor("prod.toml")
            .names_csv(names)
            .include_data(include_data)
            .include_metadata(true)
            .output_path("out.xml")
            .build()
            .unwrap()
    }

    #[test]
    fn test_schema_only_dispatch() {
        let engine = Arc::new(FakeEngine::with_catalog(["T.TAB1", "T.TAB2"]));
        let orchestrator = ExportOrchestrator::new(engine.clone());

        let summary = orchestrator.run(&request("T.TAB1,T.TAB2", false)).unwrap();

        assert_eq!(summary.mode, ExportMode::SchemaOnly);
        assert_eq!(summary.exported_count(), 2);
        let calls = engine.calls();
        assert_eq!(
            calls.last(),
            Some(&EngineCall::ExportSchema {
                output: "out.xml".into(),
                options: ExportOptions::schema(true),
            })
        );
        assert_eq!(engine.transfer_calls(), 1);
    }

    #[test]
    fn test_schema_and_data_dispatch() {
        let engine = Arc::new(FakeEngine::with_catalog(["T.TAB1"]));
        let orchestrator = ExportOrchestrator::new(engine.clone());

        orchestrator.run(&request("T.TAB1", true)).unwrap();

        let calls = engine.calls();
        assert!(matches!(
            calls.last(),
            Some(EngineCall::ExportSchemaAndData { options, .. })
                if options.binary_geometry && !options.compressed && options.include_metadata
        ));
        assert_eq!(engine.transfer_calls(), 1);
    }

    #[test]
    fn test_stage_order() {
        let engine = Arc::new(FakeEngine::with_catalog(["T.TAB1"]));
        ExportOrchestrator::new(engine.clone())
            .run(&request("T.TAB1", false))
            .unwrap();

        let calls = engine.calls();
        assert_eq!(calls[0], EngineCall::OpenWorkspace("prod.toml".to_string()));
        assert_eq!(calls[1], EngineCall::ListFeatureClassNames);
        assert_eq!(calls[2], EngineCall::CreateScratchWorkspace);
        assert_eq!(
            calls[3],
            EngineCall::GenerateNameMapping(vec!["T.TAB1".to_string()])
        );
        assert!(calls[4].is_transfer());
    }

    #[test]
    fn test_connection_fault() {
        let engine = Arc::new(FakeEngine::with_catalog(["T.TAB1"]).failing_open());
        let result = ExportOrchestrator::new(engine.clone()).run(&request("T.TAB1", false));

        assert!(matches!(result, Err(GdbExportError::Connection(_))));
        assert_eq!(engine.calls().len(), 1);
    }

    #[test]
    fn test_missing_name_stops_before_scratch() {
        let engine = Arc::new(FakeEngine::with_catalog(["T.TAB1"]));
        let result = ExportOrchestrator::new(engine.clone()).run(&request("T.TAB1,T.MISSING", false));

        assert!(matches!(result, Err(GdbExportError::NameResolution { .. })));
        assert!(!engine.calls().contains(&EngineCall::CreateScratchWorkspace));
        assert_eq!(engine.transfer_calls(), 0);
    }

    #[test]
    fn test_conflict_never_reaches_transfer() {
        let engine = Arc::new(FakeEngine::with_catalog(["T.TAB1"]).with_conflicts());
        let result = ExportOrchestrator::new(engine.clone()).run(&request("T.TAB1", true));

        assert!(matches!(result, Err(GdbExportError::MappingConflict { .. })));
        assert_eq!(engine.transfer_calls(), 0);
    }

    #[test]
    fn test_transfer_fault_is_propagated() {
        let engine = Arc::new(FakeEngine::with_catalog(["T.TAB1"]).failing_transfer());
        let result = ExportOrchestrator::new(engine.clone()).run(&request("T.TAB1", false));

        assert!(matches!(result, Err(GdbExportError::Transfer(_))));
        assert_eq!(engine.transfer_calls(), 1);
    }
}
