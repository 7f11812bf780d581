//! Geodatabase engine abstraction layer
//!
//! This module provides a trait-based abstraction over the external
//! geodatabase engine, plus the factory that builds the configured backend.

pub mod traits;

pub use traits::{EngineResult, ExportOptions, GeodatabaseEngine, LicenseManager};

use crate::adapters::local::{LocalCatalogEngine, LocalLicenseManager};
use crate::config::GdbExportConfig;
use std::sync::Arc;

/// License manager and engine built from the same configuration
pub type EngineParts = (Arc<dyn LicenseManager>, Arc<dyn GeodatabaseEngine>);

/// Create the license manager and geodatabase engine
///
/// The local catalog engine is the only backend shipped with gdbexport.
pub fn create_engine(config: &GdbExportConfig) -> EngineParts {
    tracing::info!(
        available_products = ?config.license.available_products,
        "Creating local catalog engine"
    );
    let license = LocalLicenseManager::new(config.license.available_products.clone());
    let engine = LocalCatalogEngine::new();

    (
        Arc::new(license) as Arc<dyn LicenseManager>,
        Arc::new(engine) as Arc<dyn GeodatabaseEngine>,
    )
}
