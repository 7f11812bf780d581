//! Core business logic for gdbexport.
//!
//! # Modules
//!
//! - [`license`] - License acquisition with product-code fallback
//! - [`export`] - Name resolution, export orchestration and the run boundary
//!
//! # Export Workflow
//!
//! 1. **Acquire**: initialize the engine with the primary product code, or
//!    the fallback if the primary is refused
//! 2. **Open**: connect to the source geodatabase
//! 3. **Resolve**: match every requested feature class in the catalog
//! 4. **Map**: generate destination names against a scratch workspace and
//!    stop on any conflict
//! 5. **Export**: write the XML workspace document, schema only or with data
//! 6. **Release**: shut the license down, whatever happened before
//!
//! # Example
//!
//! ```rust
//! use gdbexport::adapters::fake::{FakeEngine, FakeLicenseManager};
//! use gdbexport::core::export::{run_with_license, ExportOrchestrator};
//! use gdbexport::core::license::{LicenseCoordinator, LicensePolicy};
//! use gdbexport::domain::{ExitStatus, ExportRequestBuilder};
//! use std::sync::Arc;
//!
//! let request = ExportRequestBuilder::new()
//!     .connection_descriptor("prod.toml")
//!     .names_csv("T.TAB1,T.TAB2")
//!     .build()
//!     .unwrap();
//!
//! let mut coordinator =
//!     LicenseCoordinator::new(Arc::new(FakeLicenseManager::new()), LicensePolicy::default());
//! let orchestrator =
//!     ExportOrchestrator::new(Arc::new(FakeEngine::with_catalog(["T.TAB1", "T.TAB2"])));
//!
//! let status = run_with_license(&mut coordinator, &orchestrator, &request);
//! assert_eq!(status, ExitStatus::Success);
//! ```

pub mod export;
pub mod license;
