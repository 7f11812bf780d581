//! Domain error types
//!
//! This module defines the error hierarchy for gdbexport. Every stage of the
//! export workflow maps its failure onto one [`GdbExportError`] variant, and
//! engine faults are carried as [`EngineError`] without exposing any
//! backend-specific types.

use thiserror::Error;

/// Main gdbexport error type
///
/// This is the single aggregate error returned by the export workflow.
/// Nothing is retried or recovered locally; every variant surfaces to the
/// top-level boundary which maps it to a failure exit status.
#[derive(Debug, Error)]
pub enum GdbExportError {
    /// Missing or invalid command-line or configuration input
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// License acquisition raised an error
    #[error("License error: {0}")]
    License(String),

    /// The source connection could not be opened
    #[error("Connection error: {0}")]
    Connection(#[source] EngineError),

    /// One or more requested feature classes are absent from the catalog
    #[error(
        "Can't find all feature classes in geodatabase, missing: {}",
        .missing.join(", ")
    )]
    NameResolution {
        /// Requested names that had no catalog match, in request order
        missing: Vec<String>,
    },

    /// The generated name mapping has collisions
    #[error("Name mapping has conflicts: {}", .conflicts.join("; "))]
    MappingConflict {
        /// Human-readable description of each collision
        conflicts: Vec<String>,
    },

    /// The transfer service failed to write the XML workspace document
    #[error("Transfer error: {0}")]
    Transfer(#[source] EngineError),

    /// Any other engine fault (catalog scan, scratch workspace, mapping)
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Local I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Geodatabase engine errors
///
/// Errors raised by an engine backend. Backends translate their own failures
/// into these variants.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Bad connection descriptor, unreachable server or rejected credentials
    #[error("Failed to open workspace: {0}")]
    ConnectionFailed(String),

    /// A handle that the engine never issued
    #[error("Unknown workspace handle: {0}")]
    UnknownWorkspace(u64),

    /// Catalog enumeration failed
    #[error("Failed to enumerate catalog: {0}")]
    CatalogFailed(String),

    /// Scratch workspace could not be created
    #[error("Failed to create scratch workspace: {0}")]
    ScratchWorkspaceFailed(String),

    /// Name mapping could not be generated at all
    #[error("Failed to generate name mapping: {0}")]
    MappingFailed(String),

    /// Export call failed (I/O, data fault, capability mismatch)
    #[error("Export failed: {0}")]
    TransferFailed(String),

    /// License initialization raised instead of returning a status
    #[error("License initialization failed: {0}")]
    LicenseFailed(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for GdbExportError {
    fn from(err: std::io::Error) -> Self {
        GdbExportError::Io(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for GdbExportError {
    fn from(err: toml::de::Error) -> Self {
        GdbExportError::Configuration(format!("TOML parse error: {err}"))
    }
}
