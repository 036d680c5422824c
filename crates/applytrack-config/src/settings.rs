//! Application configuration structures

use applytrack_common::{FailurePolicy, LogFormat, LoggingConfig};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Config {
    /// Translation engine configuration
    #[validate]
    pub i18n: I18nSettings,

    /// Logging configuration
    #[validate]
    pub logging: LoggingSettings,
}

/// Translation engine configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct I18nSettings {
    /// Failure policy for missing keys and parameters
    pub mode: FailurePolicy,

    /// Name of the cookie carrying the persisted locale preference
    #[validate(length(min = 1, max = 64, message = "Preference cookie name must be 1-64 characters"))]
    #[validate(regex(path = "crate::validation::COOKIE_NAME_REGEX", message = "Preference cookie name must be a valid cookie token"))]
    pub preference_cookie: String,

    /// File holding the persisted preference for client-side sessions
    #[validate(custom(function = "crate::validation::validate_file_path", message = "Invalid preference file path"))]
    pub preference_file: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log filter directives (e.g. "info" or "info,applytrack_i18n=debug")
    #[validate(custom(function = "crate::validation::validate_log_level", message = "Log level must be one of: trace, debug, info, warn, error, off"))]
    pub level: String,

    /// Output format
    pub format: LogFormat,

    /// Optional log file path
    #[validate(custom(function = "crate::validation::validate_file_path", message = "Invalid log file path"))]
    pub file: Option<String>,

    /// Whether to log span open/close events
    pub include_spans: bool,
}

impl Default for I18nSettings {
    fn default() -> Self {
        Self {
            mode: FailurePolicy::for_build(),
            preference_cookie: "applytrack_locale".to_string(),
            preference_file: None,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            file: None,
            include_spans: false,
        }
    }
}

impl LoggingSettings {
    /// Convert into the logging bootstrap configuration
    pub fn to_logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.level.clone(),
            format: self.format,
            file_path: self.file.clone(),
            include_spans: self.include_spans,
            include_targets: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.i18n.preference_cookie, "applytrack_locale");
        assert_eq!(config.i18n.mode, FailurePolicy::for_build());
    }

    #[test]
    fn test_invalid_cookie_name_is_rejected() {
        let mut config = Config::default();
        config.i18n.preference_cookie = "bad cookie;".to_string();
        assert!(config.validate().is_err());

        config.i18n.preference_cookie = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_log_level_is_rejected() {
        let mut config = Config::default();
        config.logging.level = "chatty".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_logging_conversion() {
        let settings = LoggingSettings {
            level: "debug".to_string(),
            format: LogFormat::Json,
            file: Some("/tmp/applytrack.log".to_string()),
            include_spans: true,
        };
        let config = settings.to_logging_config();
        assert_eq!(config.level, "debug");
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.file_path.as_deref(), Some("/tmp/applytrack.log"));
        assert!(config.include_spans);
    }
}
