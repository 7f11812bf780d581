//! Configuration schema types
//!
//! This module defines the configuration structure for gdbexport. Every
//! section is optional in the TOML file; missing values take the built-in
//! defaults.

use crate::domain::{ProductCode, DEFAULT_OUTPUT};
use crate::logging::parse_log_level;
use serde::{Deserialize, Serialize};

/// Main gdbexport configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GdbExportConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// License acquisition settings
    #[serde(default)]
    pub license: LicenseConfig,

    /// Export defaults
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GdbExportConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.license.validate()?;
        self.export.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Verbosity threshold: a level name (trace, debug, info, warn, error,
    /// off) or a number from 0 (off) to 5 (trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        parse_log_level(&self.log_level)
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// License acquisition configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LicenseConfig {
    /// Product code tried first
    #[serde(default = "default_primary_product")]
    pub primary_product: ProductCode,

    /// Product code tried once if the primary is refused
    #[serde(default = "default_fallback_product")]
    pub fallback_product: ProductCode,

    /// Product codes the local catalog engine will grant
    #[serde(default = "default_available_products")]
    pub available_products: Vec<ProductCode>,
}

impl LicenseConfig {
    fn validate(&self) -> Result<(), String> {
        if self.primary_product == self.fallback_product {
            return Err(format!(
                "license.fallback_product must differ from license.primary_product ('{}')",
                self.primary_product
            ));
        }

        if self.available_products.is_empty() {
            return Err("license.available_products cannot be empty".to_string());
        }

        Ok(())
    }
}

impl Default for LicenseConfig {
    fn default() -> Self {
        Self {
            primary_product: default_primary_product(),
            fallback_product: default_fallback_product(),
            available_products: default_available_products(),
        }
    }
}

/// Export defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Output document path used when `-f` is not given
    #[serde(default = "default_output")]
    pub default_output: String,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.default_output.trim().is_empty() {
            return Err("export.default_output cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            default_output: default_output(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable JSON file logging in addition to the console streams
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when file logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_primary_product() -> ProductCode {
    ProductCode::Editor
}

fn default_fallback_product() -> ProductCode {
    ProductCode::Server
}

fn default_available_products() -> Vec<ProductCode> {
    ProductCode::ALL.to_vec()
}

fn default_output() -> String {
    DEFAULT_OUTPUT.to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
