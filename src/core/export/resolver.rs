//! Catalog resolver - matches requested names against a workspace catalog

use crate::adapters::engine::GeodatabaseEngine;
use crate::domain::{CatalogEntry, GdbExportError, Result, WorkspaceHandle};
use crate::logging::CONSOLE;

/// Resolves requested feature-class names against an open workspace
pub struct CatalogResolver<'a> {
    engine: &'a dyn GeodatabaseEngine,
}

impl<'a> CatalogResolver<'a> {
    pub fn new(engine: &'a dyn GeodatabaseEngine) -> Self {
        Self { engine }
    }

    /// Resolve every requested name, in request order
    ///
    /// The catalog is enumerated once. Matching is case-insensitive and the
    /// first catalog entry that matches wins. Every missing name is logged
    /// before the run fails, so one run reports all of them.
    ///
    /// # Errors
    ///
    /// Returns [`GdbExportError::NameResolution`] if any name has no match,
    /// or [`GdbExportError::Engine`] if the catalog cannot be listed.
    pub fn resolve(
        &self,
        workspace: &WorkspaceHandle,
        requested: &[String],
    ) -> Result<Vec<CatalogEntry>> {
        tracing::info!(count = requested.len(), "Getting feature class list");
        let catalog = self.engine.list_feature_class_names(workspace)?;
        tracing::debug!(catalog_size = catalog.len(), "Catalog enumerated");

        let mut resolved = Vec::with_capacity(requested.len());
        let mut missing = Vec::new();

        for name in requested {
            tracing::debug!(name = %name, "Resolving feature class");
            match catalog.iter().find(|entry| entry.matches(name)) {
                Some(entry) => {
                    tracing::info!(name = %entry.name(), "Adding feature class");
                    resolved.push(entry.clone());
                }
                None => {
                    tracing::error!(target: CONSOLE, "Error, tabname [{}] will not be exported", name);
                    missing.push(name.clone());
                }
            }
        }

        if !missing.is_empty() {
            return Err(GdbExportError::NameResolution { missing });
        }

        Ok(resolved)
    }
}
