//! Local catalog engine
//!
//! Serves the catalog declared in a connection descriptor file and writes
//! XML workspace documents itself.

use crate::adapters::engine::{EngineResult, ExportOptions, GeodatabaseEngine};
use crate::adapters::local::descriptor::{load_descriptor, ConnectionDescriptor, FeatureClassDef};
use crate::adapters::local::xml::{write_workspace_document, DatasetExport};
use crate::domain::{
    CatalogEntry, DatasetHandle, EngineError, MappedDataset, NameMapping, WorkspaceHandle,
    WorkspaceName,
};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct EngineState {
    next_workspace_id: u64,
    workspaces: HashMap<u64, ConnectionDescriptor>,
    scratch: HashSet<WorkspaceName>,
}

/// File-backed geodatabase engine
#[derive(Debug, Default)]
pub struct LocalCatalogEngine {
    state: Mutex<EngineState>,
}

impl LocalCatalogEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, EngineState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Collect the definitions behind a mapping, in mapping order
    fn export_datasets<'a>(
        state: &'a EngineState,
        mapping: &'a NameMapping,
    ) -> EngineResult<Vec<DatasetExport<'a>>> {
        mapping
            .datasets()
            .iter()
            .map(|mapped| {
                let definition = lookup(state, mapped.source.handle()).ok_or_else(|| {
                    EngineError::TransferFailed(format!(
                        "dataset {} is not served by any open workspace",
                        mapped.source.name()
                    ))
                })?;
                Ok(DatasetExport {
                    definition,
                    target_name: &mapped.target_name,
                })
            })
            .collect()
    }

    fn export(
        &self,
        mapping: &NameMapping,
        output: &Path,
        options: ExportOptions,
        with_data: bool,
    ) -> EngineResult<()> {
        if mapping.has_conflicts() {
            return Err(EngineError::TransferFailed(
                "refusing to export a name mapping with conflicts".to_string(),
            ));
        }
        if options.compressed {
            return Err(EngineError::TransferFailed(
                "compressed documents are not supported by the local engine".to_string(),
            ));
        }

        let state = self.state();
        let datasets = Self::export_datasets(&state, mapping)?;
        write_workspace_document(output, &datasets, options, with_data)?;

        tracing::debug!(
            output = %output.display(),
            datasets = datasets.len(),
            with_data,
            "Workspace document written"
        );
        Ok(())
    }
}

fn lookup(state: &EngineState, handle: DatasetHandle) -> Option<&FeatureClassDef> {
    state
        .workspaces
        .get(&handle.workspace())
        .and_then(|descriptor| descriptor.feature_classes.get(handle.index()))
}

/// Destination name in a local scratch workspace: owner qualifier dropped,
/// upper-cased
pub fn destination_name(source: &str) -> String {
    source
        .rsplit('.')
        .next()
        .unwrap_or(source)
        .trim()
        .to_uppercase()
}

impl GeodatabaseEngine for LocalCatalogEngine {
    fn open_workspace(&self, descriptor: &str) -> EngineResult<WorkspaceHandle> {
        let parsed = load_descriptor(descriptor)?;

        tracing::debug!(
            server = %parsed.connection.server,
            instance = ?parsed.connection.instance,
            version = %parsed.connection.version,
            feature_classes = parsed.feature_classes.len(),
            "Connection descriptor loaded"
        );

        let mut state = self.state();
        state.next_workspace_id += 1;
        let id = state.next_workspace_id;
        state.workspaces.insert(id, parsed);

        Ok(WorkspaceHandle::new(id, descriptor))
    }

    fn list_feature_class_names(
        &self,
        workspace: &WorkspaceHandle,
    ) -> EngineResult<Vec<CatalogEntry>> {
        let state = self.state();
        let descriptor = state
            .workspaces
            .get(&workspace.id())
            .ok_or(EngineError::UnknownWorkspace(workspace.id()))?;

        Ok(descriptor
            .feature_classes
            .iter()
            .enumerate()
            .map(|(index, fc)| {
                CatalogEntry::new(DatasetHandle::new(workspace.id(), index), fc.name.clone())
            })
            .collect())
    }

    fn create_scratch_workspace(&self) -> EngineResult<WorkspaceName> {
        let name = WorkspaceName::new(format!("scratch-{}", uuid::Uuid::new_v4()));
        self.state().scratch.insert(name.clone());
        Ok(name)
    }

    fn generate_name_mapping(
        &self,
        entries: &[CatalogEntry],
        target: &WorkspaceName,
    ) -> EngineResult<NameMapping> {
        if !self.state().scratch.contains(target) {
            return Err(EngineError::MappingFailed(format!(
                "unknown scratch workspace: {target}"
            )));
        }

        let mut by_target: BTreeMap<String, Vec<&str>> = BTreeMap::new();
        let datasets: Vec<MappedDataset> = entries
            .iter()
            .map(|entry| {
                let target_name = destination_name(entry.name());
                by_target
                    .entry(target_name.clone())
                    .or_default()
                    .push(entry.name());
                MappedDataset {
                    source: entry.clone(),
                    target_name,
                }
            })
            .collect();

        let conflicts = by_target
            .into_iter()
            .filter(|(_, sources)| sources.len() > 1)
            .map(|(target_name, sources)| format!("{target_name} <- {}", sources.join(", ")))
            .collect();

        Ok(NameMapping::new(target.clone(), datasets, conflicts))
    }

    fn export_schema(
        &self,
        mapping: &NameMapping,
        output: &Path,
        options: ExportOptions,
    ) -> EngineResult<()> {
        self.export(mapping, output, options, false)
    }

    fn export_schema_and_data(
        &self,
        mapping: &NameMapping,
        output: &Path,
        options: ExportOptions,
    ) -> EngineResult<()> {
        self.export(mapping, output, options, true)
    }
}
