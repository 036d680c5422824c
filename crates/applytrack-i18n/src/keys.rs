//! Compile-time translation keys
//!
//! `TranslationKey` is generated by `build.rs` from `locales/en.json`: one
//! variant per leaf of the default dictionary. Adding a leaf there adds a
//! variant; removing one breaks every call site that still names it.

use crate::error::I18nError;
use std::fmt;
use std::str::FromStr;

include!(concat!(env!("OUT_DIR"), "/keys.rs"));

impl TranslationKey {
    /// Look up a key by its dot-path
    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL
            .binary_search_by(|key| key.as_str().cmp(path))
            .ok()
            .map(|index| Self::ALL[index])
    }
}

impl fmt::Display for TranslationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for TranslationKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for TranslationKey {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_path(s).ok_or_else(|| I18nError::MissingKey {
            key: s.to_string(),
            locale: crate::Locale::DEFAULT.code().to_string(),
        })
    }
}
