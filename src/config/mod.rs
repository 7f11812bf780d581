//! Configuration management for gdbexport.
//!
//! gdbexport runs without any configuration file: every setting has a
//! built-in default. A TOML file can adjust the license policy,
//! the default output path and logging.
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "debug"
//!
//! [license]
//! primary_product = "editor"
//! fallback_product = "server"
//!
//! [export]
//! default_output = "exports/gdbexp.xml"
//!
//! [logging]
//! local_enabled = true
//! local_path = "/var/log/gdbexport"
//! ```
//!
//! # Environment Variables
//!
//! Use `${VAR_NAME}` syntax for substitution, and `GDBEXPORT_<SECTION>_<KEY>`
//! to override single values:
//!
//! ```bash
//! export GDBEXPORT_LICENSE_PRIMARY_PRODUCT=server
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default, DEFAULT_CONFIG_FILE};
pub use schema::{ApplicationConfig, ExportConfig, GdbExportConfig, LicenseConfig, LoggingConfig};
pub use secret::{secret_string, SecretString, SecretValue};
