//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters, and
//! providing clear error messages for misconfiguration.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::AppConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Load and validate configuration from a TOML file.
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
    let path = Path::new(path);

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: AppConfig =
        toml::from_str(&content).with_context(|| "Failed to parse config.toml")?;

    validate_config(&config)?;

    info!(
        name = %config.app.name,
        data_dir = %config.storage.data_dir,
        "Configuration loaded successfully"
    );

    Ok(config)
}

/// Validate all configuration parameters.
fn validate_config(config: &AppConfig) -> Result<()> {
    anyhow::ensure!(
        !config.app.name.trim().is_empty(),
        "app.name must not be empty"
    );
    anyhow::ensure!(
        LOG_LEVELS.contains(&config.app.log_level.as_str()),
        "app.log_level must be one of {LOG_LEVELS:?}, got {}",
        config.app.log_level
    );
    anyhow::ensure!(
        !config.storage.data_dir.trim().is_empty(),
        "storage.data_dir must not be empty"
    );
    anyhow::ensure!(
        !config.export.output_dir.trim().is_empty(),
        "export.output_dir must not be empty"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_nonexistent_file() {
        let result = load_config("nonexistent.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_with_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [app]
            name = "silverage"

            [storage]
            "#,
        )
        .unwrap();
        assert_eq!(config.app.log_level, "info");
        assert_eq!(config.storage.data_dir, "data");
        assert_eq!(config.export.output_dir, "exports");
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        let config: AppConfig = toml::from_str(
            r#"
            [app]
            name = "silverage"
            log_level = "loud"

            [storage]
            "#,
        )
        .unwrap();
        assert!(validate_config(&config).is_err());
    }
}
