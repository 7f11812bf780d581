//! Geodatabase engine capability traits
//!
//! This module defines the interface every engine backend must implement to
//! work with gdbexport. The workflow only ever talks to these traits.

use crate::domain::{
    CatalogEntry, EngineError, LicenseStatus, NameMapping, ProductCode, WorkspaceHandle,
    WorkspaceName,
};
use std::path::Path;

/// Result type for engine calls
pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// Flags passed to the transfer calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    /// Compress the output document
    pub compressed: bool,
    /// Encode geometry as binary rather than as structured XML
    pub binary_geometry: bool,
    /// Include dataset metadata
    pub include_metadata: bool,
}

impl ExportOptions {
    /// Options for a schema-only export
    pub fn schema(include_metadata: bool) -> Self {
        Self {
            compressed: false,
            binary_geometry: false,
            include_metadata,
        }
    }

    /// Options for a schema and data export
    pub fn schema_and_data(include_metadata: bool) -> Self {
        Self {
            compressed: false,
            binary_geometry: true,
            include_metadata,
        }
    }
}

/// License manager of a geodatabase engine
pub trait LicenseManager: Send + Sync {
    /// Attempt to initialize the engine with a product code
    ///
    /// # Errors
    ///
    /// Returns an error only when the call itself fails; a refused license is
    /// reported through the returned status.
    fn initialize(&self, product: ProductCode) -> EngineResult<LicenseStatus>;

    /// Product code the engine is currently initialized with
    fn initialized_product(&self) -> Option<ProductCode>;

    /// Release the license. Must not fail.
    fn shutdown(&self);
}

/// Connection, catalog and transfer capabilities of a geodatabase engine
pub trait GeodatabaseEngine: Send + Sync {
    /// Open the source workspace named by a connection descriptor
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ConnectionFailed`] for a bad descriptor, an
    /// unreachable server or rejected credentials.
    fn open_workspace(&self, descriptor: &str) -> EngineResult<WorkspaceHandle>;

    /// List the feature classes in an open workspace's catalog
    fn list_feature_class_names(&self, workspace: &WorkspaceHandle)
        -> EngineResult<Vec<CatalogEntry>>;

    /// Create a transient scratch workspace and return its identity
    fn create_scratch_workspace(&self) -> EngineResult<WorkspaceName>;

    /// Map entries to destination names in the scratch workspace
    ///
    /// Collisions are reported through [`NameMapping::conflicts`], not as an
    /// error.
    fn generate_name_mapping(
        &self,
        entries: &[CatalogEntry],
        target: &WorkspaceName,
    ) -> EngineResult<NameMapping>;

    /// Write an XML workspace document with dataset schemas only
    fn export_schema(
        &self,
        mapping: &NameMapping,
        output: &Path,
        options: ExportOptions,
    ) -> EngineResult<()>;

    /// Write an XML workspace document with schemas and rows
    fn export_schema_and_data(
        &self,
        mapping: &NameMapping,
        output: &Path,
        options: ExportOptions,
    ) -> EngineResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_options_modes() {
        let schema = ExportOptions::schema(true);
        assert!(!schema.compressed);
        assert!(!schema.binary_geometry);
        assert!(schema.include_metadata);

        let data = ExportOptions::schema_and_data(false);
        assert!(!data.compressed);
        assert!(data.binary_geometry);
        assert!(!data.include_metadata);
    }
}
