// gdbexport - Export geodatabase feature classes to an XML workspace document
// Copyright (c) 2025 gdbexport Contributors
// Licensed under the GNU General Public License v3.0 or later

//! # gdbexport - Geodatabase to XML Workspace Document
//!
//! gdbexport exports one or more feature classes from a geodatabase into a
//! portable XML workspace document, schema only or schema and data.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Licensing** the geodatabase engine with product-code fallback
//! - **Resolving** requested feature-class names against the live catalog
//! - **Mapping** resolved feature classes to destination names and refusing
//!   conflicting mappings
//! - **Exporting** the XML workspace document through the engine's transfer
//!   service
//!
//! ## Architecture
//!
//! gdbexport follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (license coordination, export workflow)
//! - [`adapters`] - Geodatabase engine traits, the local catalog engine and
//!   test doubles
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gdbexport::adapters::engine::create_engine;
//! use gdbexport::config::load_config_or_default;
//! use gdbexport::core::export::{run_with_license, ExportOrchestrator};
//! use gdbexport::core::license::{LicenseCoordinator, LicensePolicy};
//! use gdbexport::domain::ExportRequestBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config_or_default(None)?;
//!
//!     let request = ExportRequestBuilder::new()
//!         .connection_descriptor("db.toml")
//!         .names_csv("T.TAB1,T.TAB2")
//!         .include_metadata(true)
//!         .build()?;
//!
//!     let (license_manager, engine) = create_engine(&config);
//!     let mut coordinator =
//!         LicenseCoordinator::new(license_manager, LicensePolicy::from(&config.license));
//!     let orchestrator = ExportOrchestrator::new(engine);
//!
//!     let status = run_with_license(&mut coordinator, &orchestrator, &request);
//!     std::process::exit(status.code());
//! }
//! ```
//!
//! ## Error Handling
//!
//! gdbexport uses the [`domain::GdbExportError`] type for all errors. Each
//! workflow stage fails with its own variant and nothing is retried:
//!
//! ```rust
//! use gdbexport::domain::{ExportRequestBuilder, GdbExportError};
//!
//! let result = ExportRequestBuilder::new().connection_descriptor("db.toml").build();
//! assert!(matches!(result, Err(GdbExportError::Configuration(_))));
//! ```
//!
//! ## Logging
//!
//! gdbexport uses structured logging with the `tracing` crate. Events sent to
//! the [`logging::CONSOLE`] target also appear on standard output:
//!
//! ```rust,no_run
//! use gdbexport::logging::CONSOLE;
//!
//! tracing::info!(count = 2, "Resolved feature classes");
//! tracing::info!(target: CONSOLE, "OK, xml written to {}", "gdbexp.xml");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
