//! Integration tests for configuration loading and validation
//!
//! Note: Tests that modify environment variables hold ENV_MUTEX to avoid
//! interference between tests.

use gdbexport::config::{load_config, load_config_or_default};
use gdbexport::domain::{GdbExportError, ProductCode};
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("GDBEXPORT_APPLICATION_LOG_LEVEL");
    std::env::remove_var("GDBEXPORT_LICENSE_PRIMARY_PRODUCT");
    std::env::remove_var("GDBEXPORT_LICENSE_FALLBACK_PRODUCT");
    std::env::remove_var("GDBEXPORT_LICENSE_AVAILABLE_PRODUCTS");
    std::env::remove_var("GDBEXPORT_EXPORT_DEFAULT_OUTPUT");
    std::env::remove_var("GDBEXPORT_LOGGING_LOCAL_ENABLED");
    std::env::remove_var("GDBEXPORT_LOGGING_LOCAL_PATH");
    std::env::remove_var("TEST_EXPORT_DIR");
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[application]
log_level = "debug"

[license]
primary_product = "server"
fallback_product = "arcinfo"
available_products = ["server", "info"]

[export]
default_output = "exports/gdbexp.xml"

[logging]
local_enabled = true
local_path = "/var/log/gdbexport"
local_rotation = "hourly"
"#,
    );

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.license.primary_product, ProductCode::Server);
    assert_eq!(config.license.fallback_product, ProductCode::Info);
    assert_eq!(
        config.license.available_products,
        vec![ProductCode::Server, ProductCode::Info]
    );
    assert_eq!(config.export.default_output, "exports/gdbexp.xml");
    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_minimal_config_uses_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config("");
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "info");
    assert_eq!(config.license.primary_product, ProductCode::Editor);
    assert_eq!(config.license.fallback_product, ProductCode::Server);
    assert_eq!(config.export.default_output, "gdbexp.xml");
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("TEST_EXPORT_DIR", "/data/exports");

    let file = write_config("[export]\ndefault_output = \"${TEST_EXPORT_DIR}/out.xml\"\n");
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.export.default_output, "/data/exports/out.xml");
    cleanup_env_vars();
}

#[test]
fn test_missing_env_var_is_an_error() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config("[export]\ndefault_output = \"${TEST_EXPORT_DIR}/out.xml\"\n");
    let result = load_config(file.path());

    assert!(matches!(result, Err(GdbExportError::Configuration(msg)) if msg.contains("TEST_EXPORT_DIR")));
}

#[test]
fn test_env_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("GDBEXPORT_APPLICATION_LOG_LEVEL", "trace");
    std::env::set_var("GDBEXPORT_LICENSE_PRIMARY_PRODUCT", "engine");
    std::env::set_var("GDBEXPORT_LICENSE_AVAILABLE_PRODUCTS", "engine, server");
    std::env::set_var("GDBEXPORT_EXPORT_DEFAULT_OUTPUT", "override.xml");

    let file = write_config("[application]\nlog_level = \"warn\"\n");
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "trace");
    assert_eq!(config.license.primary_product, ProductCode::Engine);
    assert_eq!(
        config.license.available_products,
        vec![ProductCode::Engine, ProductCode::Server]
    );
    assert_eq!(config.export.default_output, "override.xml");
    cleanup_env_vars();
}

#[test]
fn test_invalid_env_product_is_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("GDBEXPORT_LICENSE_FALLBACK_PRODUCT", "platinum");

    let file = write_config("");
    let result = load_config(file.path());

    assert!(matches!(result, Err(GdbExportError::Configuration(_))));
    cleanup_env_vars();
}

#[test]
fn test_validation_rejects_same_primary_and_fallback() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config("[license]\nprimary_product = \"editor\"\nfallback_product = \"editor\"\n");
    let result = load_config(file.path());

    assert!(matches!(result, Err(GdbExportError::Configuration(msg)) if msg.contains("fallback_product")));
}

#[test]
fn test_invalid_toml_is_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config("[license\nprimary_product = ");
    assert!(load_config(file.path()).is_err());
}

#[test]
fn test_explicit_missing_path_is_an_error() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let result = load_config_or_default(Some(std::path::Path::new("/nonexistent/gdbexport.toml")));
    assert!(matches!(result, Err(GdbExportError::Configuration(_))));
}
