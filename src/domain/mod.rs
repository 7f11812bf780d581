//! Domain models and types for gdbexport.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **The export request** ([`ExportRequest`], built via [`ExportRequestBuilder`])
//! - **Catalog types** ([`CatalogEntry`], [`NameMapping`], opaque handles)
//! - **License types** ([`ProductCode`], [`LicenseStatus`], [`LicenseState`], [`LicenseGrant`])
//! - **Error types** ([`GdbExportError`], [`EngineError`])
//! - **Result type alias** ([`Result`]) and [`ExitStatus`]
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, GdbExportError>`]:
//!
//! ```rust
//! use gdbexport::domain::{ExportRequestBuilder, Result};
//!
//! fn example() -> Result<()> {
//!     let request = ExportRequestBuilder::new()
//!         .connection_descriptor("prod.toml")
//!         .names_csv("T.TAB1")
//!         .build()?;
//!     assert!(!request.include_data());
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod errors;
pub mod license;
pub mod request;
pub mod result;

// Re-export commonly used types for convenience
pub use catalog::{
    CatalogEntry, DatasetHandle, MappedDataset, NameMapping, WorkspaceHandle, WorkspaceName,
};
pub use errors::{EngineError, GdbExportError};
pub use license::{LicenseGrant, LicenseState, LicenseStatus, ProductCode};
pub use request::{ExportMode, ExportRequest, ExportRequestBuilder, DEFAULT_OUTPUT};
pub use result::{ExitStatus, Result};
