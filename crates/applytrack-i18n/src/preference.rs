//! Persisted locale preference storage

use crate::error::{I18nError, I18nResult};
use crate::Locale;
use applytrack_config::I18nSettings;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Storage for the user's chosen locale.
///
/// `load` returns the raw stored value; callers validate it, so a stale or
/// hand-edited preference never breaks detection.
#[cfg_attr(test, mockall::automock)]
pub trait PreferenceStore: Send + Sync {
    /// Read the stored preference, if any
    fn load(&self) -> I18nResult<Option<String>>;

    /// Persist `locale` as the preference
    fn save(&self, locale: Locale) -> I18nResult<()>;
}

#[derive(Debug, Serialize, Deserialize)]
struct PreferenceFile {
    locale: String,
}

/// Preference kept in a small JSON file
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    /// Store backed by the JSON file at `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Store at the configured `preference_file`, if one is set
    pub fn from_settings(settings: &I18nSettings) -> Option<Self> {
        settings.preference_file.as_ref().map(Self::new)
    }

    /// Location of the preference file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load(&self) -> I18nResult<Option<String>> {
        if !self.path.exists() {
            debug!("No locale preference at {}", self.path.display());
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path).map_err(|e| {
            I18nError::Preference(format!("failed to read {}: {}", self.path.display(), e))
        })?;
        let file: PreferenceFile = serde_json::from_str(&content).map_err(|e| {
            I18nError::Preference(format!("failed to parse {}: {}", self.path.display(), e))
        })?;

        Ok(Some(file.locale))
    }

    fn save(&self, locale: Locale) -> I18nResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&PreferenceFile {
            locale: locale.code().to_string(),
        })?;
        fs::write(&self.path, content).map_err(|e| {
            I18nError::Preference(format!("failed to write {}: {}", self.path.display(), e))
        })?;

        info!("Saved locale preference {} to {}", locale, self.path.display());
        Ok(())
    }
}

/// In-process preference, for tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    value: Mutex<Option<String>>,
}

impl MemoryPreferenceStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a raw stored value
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Mutex::new(Some(value.into())),
        }
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self) -> I18nResult<Option<String>> {
        Ok(self.value.lock().clone())
    }

    fn save(&self, locale: Locale) -> I18nResult<()> {
        *self.value.lock() = Some(locale.code().to_string());
        Ok(())
    }
}
