//! External system integrations for gdbexport.
//!
//! - [`engine`] - Geodatabase engine capability traits and factory
//! - [`local`] - File-backed local catalog engine
//! - [`fake`] - Recording engine doubles for tests
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate the external
//! geodatabase engine and enable testing with recording doubles:
//!
//! ```rust
//! use gdbexport::adapters::engine::GeodatabaseEngine;
//! use gdbexport::adapters::fake::FakeEngine;
//!
//! let engine = FakeEngine::with_catalog(["T.TAB1", "T.TAB2"]);
//! let workspace = engine.open_workspace("prod.toml").unwrap();
//! let catalog = engine.list_feature_class_names(&workspace).unwrap();
//! assert_eq!(catalog.len(), 2);
//! ```

pub mod engine;
pub mod fake;
pub mod local;
