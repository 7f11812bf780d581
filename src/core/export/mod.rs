//! Export workflow
//!
//! This module provides the export logic for gdbexport, including:
//! - Catalog name resolution
//! - Export orchestration
//! - The license-guarded run boundary
//! - Summary and reporting

pub mod orchestrator;
pub mod resolver;
pub mod session;
pub mod summary;

pub use orchestrator::ExportOrchestrator;
pub use resolver::CatalogResolver;
pub use session::run_with_license;
pub use summary::ExportSummary;
