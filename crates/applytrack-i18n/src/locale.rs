//! Locale management and utilities

use crate::error::I18nError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use unic_langid::LanguageIdentifier;

/// Supported locales.
///
/// This is the single authoritative registry: every variant has a dictionary
/// under `locales/<code>.json`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English, the default locale and source of the key space
    #[default]
    En,
    /// German
    De,
    /// Spanish
    Es,
    /// French
    Fr,
}

impl Locale {
    /// The default locale. Never changes at runtime.
    pub const DEFAULT: Self = Self::En;

    /// Number of supported locales.
    pub const COUNT: usize = 4;

    /// Every supported locale, default first.
    pub const ALL: [Self; Self::COUNT] = [Self::En, Self::De, Self::Es, Self::Fr];

    /// Position of this locale in [`Locale::ALL`]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Short language code, also the dictionary file stem
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::De => "de",
            Self::Es => "es",
            Self::Fr => "fr",
        }
    }

    /// Get the display name for this locale, in its own language
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::De => "Deutsch",
            Self::Es => "Español",
            Self::Fr => "Français",
        }
    }

    /// Whether this is the default locale
    pub const fn is_default(self) -> bool {
        matches!(self, Self::En)
    }

    /// Parse a short code exactly (`"de"`), case-insensitively
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|locale| locale.code().eq_ignore_ascii_case(code.trim()))
    }

    /// Parse a language tag such as `de-AT`, `fr_FR` or `EN`, matching on the
    /// primary language subtag. Returns `None` for malformed or unsupported tags.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let langid: LanguageIdentifier = tag.trim().parse().ok()?;
        Self::from_code(langid.language.as_str())
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| I18nError::InvalidLanguageId(s.to_string()))
    }
}
