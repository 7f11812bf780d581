//! Export request
//!
//! An [`ExportRequest`] is built once from validated input and never changes.

use crate::domain::errors::GdbExportError;
use crate::domain::Result;
use std::path::{Path, PathBuf};

/// Default output document name
pub const DEFAULT_OUTPUT: &str = "gdbexp.xml";

/// Which transfer call a run dispatches to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportMode {
    /// Dataset structure only
    SchemaOnly,
    /// Dataset structure and rows
    SchemaAndData,
}

impl ExportMode {
    pub fn from_include_data(include_data: bool) -> Self {
        if include_data {
            ExportMode::SchemaAndData
        } else {
            ExportMode::SchemaOnly
        }
    }
}

impl std::fmt::Display for ExportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportMode::SchemaOnly => write!(f, "schema"),
            ExportMode::SchemaAndData => write!(f, "schema+data"),
        }
    }
}

/// Parameters of one export run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    connection_descriptor: String,
    requested_names: Vec<String>,
    include_data: bool,
    include_metadata: bool,
    output_path: PathBuf,
}

impl ExportRequest {
    /// Connection descriptor of the source database
    pub fn connection_descriptor(&self) -> &str {
        &self.connection_descriptor
    }

    /// Feature-class names in request order
    pub fn requested_names(&self) -> &[String] {
        &self.requested_names
    }

    pub fn include_data(&self) -> bool {
        self.include_data
    }

    pub fn include_metadata(&self) -> bool {
        self.include_metadata
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn mode(&self) -> ExportMode {
        ExportMode::from_include_data(self.include_data)
    }
}

/// Builder for [`ExportRequest`]
///
/// # Examples
///
/// ```
/// use gdbexport::domain::ExportRequestBuilder;
///
/// let request = ExportRequestBuilder::new()
///     .connection_descriptor("conn/prod.toml")
///     .names_csv("T.TAB1,T.TAB2")
///     .include_metadata(true)
///     .build()
///     .unwrap();
/// assert_eq!(request.requested_names(), ["T.TAB1", "T.TAB2"]);
/// assert_eq!(request.output_path().to_str(), Some("gdbexp.xml"));
/// ```
#[derive(Debug, Default)]
pub struct ExportRequestBuilder {
    connection_descriptor: Option<String>,
    requested_names: Vec<String>,
    include_data: bool,
    include_metadata: bool,
    output_path: Option<PathBuf>,
}

impl ExportRequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connection_descriptor(mut self, descriptor: impl Into<String>) -> Self {
        self.connection_descriptor = Some(descriptor.into());
        self
    }

    /// Adds names from a comma-separated list
    pub fn names_csv(mut self, names: &str) -> Self {
        self.requested_names
            .extend(names.split(',').map(|name| name.trim().to_string()));
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.requested_names.push(name.into().trim().to_string());
        self
    }

    pub fn include_data(mut self, include_data: bool) -> Self {
        self.include_data = include_data;
        self
    }

    pub fn include_metadata(mut self, include_metadata: bool) -> Self {
        self.include_metadata = include_metadata;
        self
    }

    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    /// Validates and builds the request
    ///
    /// # Errors
    ///
    /// Returns [`GdbExportError::Configuration`] when the descriptor is
    /// missing, no names were given, or any name is empty.
    pub fn build(self) -> Result<ExportRequest> {
        let connection_descriptor = self
            .connection_descriptor
            .filter(|d| !d.trim().is_empty())
            .ok_or_else(|| {
                GdbExportError::Configuration("connection descriptor is required".to_string())
            })?;

        if self.requested_names.is_empty() {
            return Err(GdbExportError::Configuration(
                "at least one feature class name is required".to_string(),
            ));
        }
        if self.requested_names.iter().any(|n| n.is_empty()) {
            return Err(GdbExportError::Configuration(
                "feature class names must not be empty".to_string(),
            ));
        }

        let output_path = self
            .output_path
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

        Ok(ExportRequest {
            connection_descriptor,
            requested_names: self.requested_names,
            include_data: self.include_data,
            include_metadata: self.include_metadata,
            output_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_trims_names() {
        let request = ExportRequestBuilder::new()
            .connection_descriptor("db.toml")
            .names_csv(" T.TAB1 , T.TAB2")
            .build()
            .unwrap();
        assert_eq!(request.requested_names(), ["T.TAB1", "T.TAB2"]);
        assert_eq!(request.mode(), ExportMode::SchemaOnly);
    }

    #[test]
    fn test_builder_requires_descriptor() {
        let result = ExportRequestBuilder::new().names_csv("T.TAB1").build();
        assert!(matches!(result, Err(GdbExportError::Configuration(_))));
    }

    #[test]
    fn test_builder_rejects_empty_names() {
        let result = ExportRequestBuilder::new()
            .connection_descriptor("db.toml")
            .names_csv("T.TAB1,,T.TAB2")
            .build();
        assert!(result.is_err());

        let result = ExportRequestBuilder::new()
            .connection_descriptor("db.toml")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_data_mode_and_output_path() {
        let request = ExportRequestBuilder::new()
            .connection_descriptor("db.toml")
            .name("T.TAB1")
            .include_data(true)
            .output_path("out/full.xml")
            .build()
            .unwrap();
        assert_eq!(request.mode(), ExportMode::SchemaAndData);
        assert_eq!(request.output_path(), Path::new("out/full.xml"));
    }
}
