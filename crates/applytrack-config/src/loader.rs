//! Configuration loading utilities

use crate::Config;
use applytrack_common::AppError;
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};
use validator::Validate;

/// Environment variable naming an explicit configuration file
pub const CONFIG_PATH_ENV: &str = "APPLYTRACK_CONFIG_PATH";

/// Configuration files probed, in order, when no explicit path is given
pub const DEFAULT_CONFIG_FILES: [&str; 2] = ["applytrack.yaml", "applytrack.yml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {message}")]
    EnvParseError { var: String, message: String },
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::config_with_source("failed to load configuration", err)
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        debug!("Loading configuration from {}", path.display());

        let content = std::fs::read_to_string(path)?;
        let mut config = Self::parse_yaml(&content)?;

        Self::apply_env_overrides(&mut config)?;
        config.validate()?;

        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load configuration from `APPLYTRACK_CONFIG_PATH`, a default file in the
    /// working directory, or built-in defaults, then apply env overrides
    pub fn load() -> Result<Config, ConfigError> {
        if let Ok(config_path) = env::var(CONFIG_PATH_ENV) {
            return Self::load_config(config_path);
        }

        if let Some(path) = DEFAULT_CONFIG_FILES.iter().find(|p| Path::new(p).exists()) {
            return Self::load_config(path);
        }

        debug!("No configuration file found, using defaults");
        let mut config = Config::default();
        Self::apply_env_overrides(&mut config)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from YAML text without overrides or validation
    pub fn parse_yaml(content: &str) -> Result<Config, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Apply environment variable overrides to configuration
    pub fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        Self::apply_overrides_from(config, |name| env::var(name).ok())
    }

    /// Apply overrides read through `lookup`, which maps a variable name to its value
    pub fn apply_overrides_from<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(mode) = lookup("APPLYTRACK_I18N_MODE") {
            config.i18n.mode = mode.parse().map_err(|message| ConfigError::EnvParseError {
                var: "APPLYTRACK_I18N_MODE".to_string(),
                message,
            })?;
        }

        if let Some(cookie) = lookup("APPLYTRACK_PREFERENCE_COOKIE") {
            config.i18n.preference_cookie = cookie;
        }

        if let Some(file) = lookup("APPLYTRACK_PREFERENCE_FILE") {
            config.i18n.preference_file = Some(file).filter(|f| !f.is_empty());
        }

        if let Some(level) = lookup("APPLYTRACK_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(format) = lookup("APPLYTRACK_LOG_FORMAT") {
            config.logging.format = serde_yaml::from_str(&format.to_ascii_lowercase()).map_err(
                |e: serde_yaml::Error| ConfigError::EnvParseError {
                    var: "APPLYTRACK_LOG_FORMAT".to_string(),
                    message: e.to_string(),
                },
            )?;
        }

        if let Some(file) = lookup("APPLYTRACK_LOG_FILE") {
            config.logging.file = Some(file).filter(|f| !f.is_empty());
        }

        Ok(())
    }
}
