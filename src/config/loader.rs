//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::GdbExportConfig;
use crate::domain::errors::GdbExportError;
use crate::domain::result::Result;
use crate::domain::ProductCode;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Configuration file looked up when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "gdbexport.toml";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into GdbExportConfig
/// 4. Applies environment variable overrides (GDBEXPORT_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read, a referenced environment
/// variable is unset, parsing fails, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use gdbexport::config::loader::load_config;
///
/// let config = load_config("gdbexport.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<GdbExportConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(GdbExportError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        GdbExportError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let config: GdbExportConfig = toml::from_str(&contents)
        .map_err(|e| GdbExportError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    finish(config)
}

/// Loads the configuration for a command-line run
///
/// An explicit path must exist. Without one, [`DEFAULT_CONFIG_FILE`] is read
/// if present and built-in defaults are used otherwise.
///
/// # Errors
///
/// Same as [`load_config`].
pub fn load_config_or_default(path: Option<&Path>) -> Result<GdbExportConfig> {
    match path {
        Some(path) => load_config(path),
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => load_config(DEFAULT_CONFIG_FILE),
        None => {
            tracing::debug!("No configuration file, using defaults");
            finish(GdbExportConfig::default())
        }
    }
}

fn finish(mut config: GdbExportConfig) -> Result<GdbExportConfig> {
    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        GdbExportError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("environment variable pattern is valid")
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
pub(crate) fn substitute_env_vars(input: &str) -> Result<String> {
    let re = env_var_pattern();
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&cap[0], &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(GdbExportError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn parse_product(var: &str, value: &str) -> Result<ProductCode> {
    value
        .parse()
        .map_err(|e| GdbExportError::Configuration(format!("{var}: {e}")))
}

/// Applies environment variable overrides using the GDBEXPORT_* prefix
///
/// Environment variables follow the pattern GDBEXPORT_<SECTION>_<KEY>, for
/// example GDBEXPORT_LICENSE_PRIMARY_PRODUCT.
fn apply_env_overrides(config: &mut GdbExportConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("GDBEXPORT_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // License overrides
    if let Ok(val) = std::env::var("GDBEXPORT_LICENSE_PRIMARY_PRODUCT") {
        config.license.primary_product = parse_product("GDBEXPORT_LICENSE_PRIMARY_PRODUCT", &val)?;
    }
    if let Ok(val) = std::env::var("GDBEXPORT_LICENSE_FALLBACK_PRODUCT") {
        config.license.fallback_product =
            parse_product("GDBEXPORT_LICENSE_FALLBACK_PRODUCT", &val)?;
    }
    if let Ok(val) = std::env::var("GDBEXPORT_LICENSE_AVAILABLE_PRODUCTS") {
        config.license.available_products = val
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .map(|s| parse_product("GDBEXPORT_LICENSE_AVAILABLE_PRODUCTS", s))
            .collect::<Result<Vec<_>>>()?;
    }

    // Export overrides
    if let Ok(val) = std::env::var("GDBEXPORT_EXPORT_DEFAULT_OUTPUT") {
        config.export.default_output = val;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("GDBEXPORT_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("GDBEXPORT_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("GDBEXPORT_TEST_SERVER", "gis-db01");
        let input = "server = \"${GDBEXPORT_TEST_SERVER}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result.trim(), "server = \"gis-db01\"");
        std::env::remove_var("GDBEXPORT_TEST_SERVER");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        let input = "password = \"${GDBEXPORT_TEST_DEFINITELY_UNSET}\"";
        let result = substitute_env_vars(input);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("GDBEXPORT_TEST_DEFINITELY_UNSET"));
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        let input = "# password = \"${GDBEXPORT_TEST_DEFINITELY_UNSET}\"";
        let result = substitute_env_vars(input).unwrap();
        assert!(result.contains("${GDBEXPORT_TEST_DEFINITELY_UNSET}"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("/nonexistent/gdbexport.toml");
        assert!(matches!(result, Err(GdbExportError::Configuration(_))));
    }
}
