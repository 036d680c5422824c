//! Error types for internationalization operations

use applytrack_common::AppError;
use thiserror::Error;

/// Errors that can occur during internationalization operations
#[derive(Error, Debug)]
pub enum I18nError {
    /// Failed to parse a language identifier
    #[error("Invalid language identifier: {0}")]
    InvalidLanguageId(String),

    /// The key resolves in neither the requested nor the default dictionary
    #[error("Missing translation key '{key}' for locale {locale}")]
    MissingKey {
        /// Dotted key that was looked up
        key: String,
        /// Locale code of the translator
        locale: String,
    },

    /// The template references a placeholder the caller did not supply
    #[error("Missing interpolation parameter '{name}' for key '{key}'")]
    MissingParameter {
        /// Placeholder without a value
        name: String,
        /// Key whose template contains it
        key: String,
    },

    /// A dictionary document is not a tree of string leaves
    #[error("Invalid dictionary for locale {locale}: {reason}")]
    InvalidDictionary {
        /// Locale code of the dictionary
        locale: String,
        /// What was wrong with it
        reason: String,
    },

    /// A registered locale has no dictionary
    #[error("No dictionary registered for locale {locale}")]
    MissingDictionary {
        /// Locale code lacking a dictionary
        locale: String,
    },

    /// Reading or writing the persisted locale preference failed
    #[error("Locale preference error: {0}")]
    Preference(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON error occurred
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for i18n operations
pub type I18nResult<T> = Result<T, I18nError>;

impl From<I18nError> for AppError {
    fn from(err: I18nError) -> Self {
        let locale = match &err {
            I18nError::MissingKey { locale, .. } | I18nError::InvalidDictionary { locale, .. } => {
                Some(locale.clone())
            }
            _ => None,
        };

        match locale {
            Some(locale) => Self::localization_with_locale(err.to_string(), locale),
            None => Self::localization_with_source("translation failure", err),
        }
    }
}
