//! Configuration Module - TOML-based Settings
//!
//! Loads and validates configuration from `config.toml`. Storage
//! location and export destination are externalized here - nothing is
//! hardcoded in the domain layer.

pub mod loader;

use serde::Deserialize;

/// Top-level configuration, loaded from `config.toml` at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Application identity and logging.
    pub app: AppSection,
    /// Storage backend settings.
    pub storage: StorageConfig,
    /// CSV export settings.
    #[serde(default)]
    pub export: ExportConfig,
}

/// Application identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppSection {
    /// Human-readable instance name.
    pub name: String,
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory for the file-per-key entries.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

/// CSV export configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Directory export files are written into.
    #[serde(default = "default_export_dir")]
    pub output_dir: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_export_dir(),
        }
    }
}

// Default value functions for serde

fn default_log_level() -> String {
    "info".to_string()
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_export_dir() -> String {
    "exports".to_string()
}
