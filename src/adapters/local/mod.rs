//! Local catalog engine
//!
//! A file-backed implementation of the engine traits: the connection
//! descriptor is a TOML file declaring the source catalog, and exports are
//! written as XML workspace documents with `quick-xml`.

pub mod descriptor;
pub mod engine;
pub mod license;
pub mod xml;

pub use descriptor::{load_descriptor, ConnectionDescriptor, FeatureClassDef, FieldDef};
pub use engine::LocalCatalogEngine;
pub use license::LocalLicenseManager;
