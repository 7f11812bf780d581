//! Recording engine doubles
//!
//! In-memory implementations of [`GeodatabaseEngine`] and [`LicenseManager`]
//! with failure injection and call recording. Used by the workflow tests and
//! by anyone embedding gdbexport who needs to exercise the workflow without a
//! geodatabase.

use crate::adapters::engine::{EngineResult, ExportOptions, GeodatabaseEngine, LicenseManager};
use crate::domain::{
    CatalogEntry, DatasetHandle, EngineError, LicenseStatus, MappedDataset, NameMapping,
    ProductCode, WorkspaceHandle, WorkspaceName,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// One recorded engine call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    OpenWorkspace(String),
    ListFeatureClassNames,
    CreateScratchWorkspace,
    GenerateNameMapping(Vec<String>),
    ExportSchema {
        output: PathBuf,
        options: ExportOptions,
    },
    ExportSchemaAndData {
        output: PathBuf,
        options: ExportOptions,
    },
}

impl EngineCall {
    /// Whether this call reached the transfer service
    pub fn is_transfer(&self) -> bool {
        matches!(
            self,
            EngineCall::ExportSchema { .. } | EngineCall::ExportSchemaAndData { .. }
        )
    }
}

/// Geodatabase engine double serving a fixed catalog
#[derive(Debug, Default)]
pub struct FakeEngine {
    catalog: Vec<String>,
    fail_open: bool,
    force_conflict: bool,
    fail_transfer: bool,
    calls: Mutex<Vec<EngineCall>>,
}

impl FakeEngine {
    /// Engine whose catalog lists the given feature classes, in order
    pub fn with_catalog<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            catalog: names.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Make `open_workspace` fail with a connection fault
    pub fn failing_open(mut self) -> Self {
        self.fail_open = true;
        self
    }

    /// Make every generated mapping report a conflict
    pub fn with_conflicts(mut self) -> Self {
        self.force_conflict = true;
        self
    }

    /// Make both transfer calls fail
    pub fn failing_transfer(mut self) -> Self {
        self.fail_transfer = true;
        self
    }

    /// All calls in the order they were made
    pub fn calls(&self) -> Vec<EngineCall> {
        self.lock_calls().clone()
    }

    /// Number of calls that reached the transfer service
    pub fn transfer_calls(&self) -> usize {
        self.lock_calls().iter().filter(|c| c.is_transfer()).count()
    }

    fn lock_calls(&self) -> std::sync::MutexGuard<'_, Vec<EngineCall>> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, call: EngineCall) {
        self.lock_calls().push(call);
    }
}

impl GeodatabaseEngine for FakeEngine {
    fn open_workspace(&self, descriptor: &str) -> EngineResult<WorkspaceHandle> {
        self.record(EngineCall::OpenWorkspace(descriptor.to_string()));
        if self.fail_open {
            return Err(EngineError::ConnectionFailed(format!(
                "server unreachable for {descriptor}"
            )));
        }
        Ok(WorkspaceHandle::new(1, descriptor))
    }

    fn list_feature_class_names(
        &self,
        workspace: &WorkspaceHandle,
    ) -> EngineResult<Vec<CatalogEntry>> {
        self.record(EngineCall::ListFeatureClassNames);
        Ok(self
            .catalog
            .iter()
            .enumerate()
            .map(|(index, name)| {
                CatalogEntry::new(DatasetHandle::new(workspace.id(), index), name.clone())
            })
            .collect())
    }

    fn create_scratch_workspace(&self) -> EngineResult<WorkspaceName> {
        self.record(EngineCall::CreateScratchWorkspace);
        Ok(WorkspaceName::new("scratch-test"))
    }

    fn generate_name_mapping(
        &self,
        entries: &[CatalogEntry],
        target: &WorkspaceName,
    ) -> EngineResult<NameMapping> {
        self.record(EngineCall::GenerateNameMapping(
            entries.iter().map(|e| e.name().to_string()).collect(),
        ));

        let datasets = entries
            .iter()
            .map(|entry| MappedDataset {
                source: entry.clone(),
                target_name: entry.name().to_uppercase(),
            })
            .collect();
        let conflicts = if self.force_conflict {
            vec!["injected conflict".to_string()]
        } else {
            Vec::new()
        };

        Ok(NameMapping::new(target.clone(), datasets, conflicts))
    }

    fn export_schema(
        &self,
        _mapping: &NameMapping,
        output: &Path,
        options: ExportOptions,
    ) -> EngineResult<()> {
        self.record(EngineCall::ExportSchema {
            output: output.to_path_buf(),
            options,
        });
        if self.fail_transfer {
            return Err(EngineError::TransferFailed("injected transfer fault".to_string()));
        }
        Ok(())
    }

    fn export_schema_and_data(
        &self,
        _mapping: &NameMapping,
        output: &Path,
        options: ExportOptions,
    ) -> EngineResult<()> {
        self.record(EngineCall::ExportSchemaAndData {
            output: output.to_path_buf(),
            options,
        });
        if self.fail_transfer {
            return Err(EngineError::TransferFailed("injected transfer fault".to_string()));
        }
        Ok(())
    }
}

/// License manager double
///
/// Every product is checked out unless refused; the initialized product can
/// be overridden to simulate an engine that grants something else.
#[derive(Debug, Default)]
pub struct FakeLicenseManager {
    statuses: HashMap<ProductCode, LicenseStatus>,
    reported_product: Option<Option<ProductCode>>,
    fail: bool,
    initialized: Mutex<Option<ProductCode>>,
    initialize_calls: Mutex<Vec<ProductCode>>,
    shutdown_calls: AtomicUsize,
}

impl FakeLicenseManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `NotLicensed` for a product
    pub fn refusing(mut self, product: ProductCode) -> Self {
        self.statuses.insert(product, LicenseStatus::NotLicensed);
        self
    }

    /// Report a specific status for a product
    pub fn with_status(mut self, product: ProductCode, status: LicenseStatus) -> Self {
        self.statuses.insert(product, status);
        self
    }

    /// Always report this as the initialized product
    pub fn reporting_initialized(mut self, product: Option<ProductCode>) -> Self {
        self.reported_product = Some(product);
        self
    }

    /// Make `initialize` raise an error
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Products passed to `initialize`, in call order
    pub fn initialize_calls(&self) -> Vec<ProductCode> {
        self.initialize_calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Number of `shutdown` calls
    pub fn shutdown_calls(&self) -> usize {
        self.shutdown_calls.load(Ordering::SeqCst)
    }
}

impl LicenseManager for FakeLicenseManager {
    fn initialize(&self, product: ProductCode) -> EngineResult<LicenseStatus> {
        self.initialize_calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(product);

        if self.fail {
            return Err(EngineError::LicenseFailed(
                "license server not responding".to_string(),
            ));
        }

        let status = self
            .statuses
            .get(&product)
            .copied()
            .unwrap_or(LicenseStatus::CheckedOut);
        if status.is_accepted() {
            *self
                .initialized
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(product);
        }
        Ok(status)
    }

    fn initialized_product(&self) -> Option<ProductCode> {
        match self.reported_product {
            Some(reported) => reported,
            None => *self
                .initialized
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        }
    }

    fn shutdown(&self) {
        self.shutdown_calls.fetch_add(1, Ordering::SeqCst);
    }
}
