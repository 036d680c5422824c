//! The dictionary store: one immutable dictionary per registered locale

use crate::dictionary::Dictionary;
use crate::error::{I18nError, I18nResult};
use crate::Locale;
use once_cell::sync::Lazy;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Dictionaries compiled into the binary, validated by `build.rs`
const EMBEDDED: [(Locale, &str); Locale::COUNT] = [
    (Locale::En, include_str!("../locales/en.json")),
    (Locale::De, include_str!("../locales/de.json")),
    (Locale::Es, include_str!("../locales/es.json")),
    (Locale::Fr, include_str!("../locales/fr.json")),
];

static BUILTIN: Lazy<Arc<DictionaryStore>> = Lazy::new(|| {
    Arc::new(
        DictionaryStore::load_embedded()
            .expect("embedded dictionaries are validated by build.rs"),
    )
});

/// Owns exactly one dictionary for every supported locale
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryStore {
    /// Indexed by [`Locale::index`]
    dictionaries: Vec<Dictionary>,
}

impl DictionaryStore {
    /// Build a store from one dictionary per locale.
    ///
    /// Fails with [`I18nError::MissingDictionary`] if any supported locale is
    /// left without a dictionary. A later dictionary for the same locale
    /// replaces an earlier one.
    pub fn new(dictionaries: impl IntoIterator<Item = Dictionary>) -> I18nResult<Self> {
        let mut slots: [Option<Dictionary>; Locale::COUNT] = std::array::from_fn(|_| None);

        for dictionary in dictionaries {
            let locale = dictionary.locale();
            if slots[locale.index()].replace(dictionary).is_some() {
                warn!("Dictionary for locale {} registered twice, keeping the last", locale);
            }
        }

        let dictionaries = Locale::ALL
            .into_iter()
            .map(|locale| {
                slots[locale.index()]
                    .take()
                    .ok_or_else(|| I18nError::MissingDictionary {
                        locale: locale.code().to_string(),
                    })
            })
            .collect::<I18nResult<Vec<_>>>()?;

        Ok(Self { dictionaries })
    }

    /// The process-wide store built from the embedded dictionaries.
    ///
    /// Parsed once on first use and shared afterwards.
    pub fn builtin() -> Arc<Self> {
        Arc::clone(&BUILTIN)
    }

    /// Parse the embedded dictionaries into a fresh store
    pub fn load_embedded() -> I18nResult<Self> {
        let dictionaries = EMBEDDED
            .into_iter()
            .map(|(locale, json)| Dictionary::from_json_str(locale, json))
            .collect::<I18nResult<Vec<_>>>()?;

        let store = Self::new(dictionaries)?;
        info!(
            "Loaded {} embedded dictionaries ({} keys in default locale {})",
            Locale::COUNT,
            store.default_dictionary().len(),
            Locale::DEFAULT
        );
        Ok(store)
    }

    /// Load `<code>.json` for every supported locale from `dir`
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> I18nResult<Self> {
        let dir = dir.as_ref();
        let mut dictionaries = Vec::with_capacity(Locale::COUNT);

        for locale in Locale::ALL {
            let path = dir.join(format!("{}.json", locale.code()));
            debug!("Loading dictionary file: {}", path.display());

            if !path.exists() {
                warn!("Dictionary file does not exist: {}", path.display());
                return Err(I18nError::MissingDictionary {
                    locale: locale.code().to_string(),
                });
            }

            let content = fs::read_to_string(&path)?;
            dictionaries.push(Dictionary::from_json_str(locale, &content)?);
        }

        info!("Loaded {} dictionaries from {}", Locale::COUNT, dir.display());
        Self::new(dictionaries)
    }

    /// The default locale, whose dictionary defines the key space
    pub const fn default_locale(&self) -> Locale {
        Locale::DEFAULT
    }

    /// Dictionary of `locale`
    pub fn dictionary(&self, locale: Locale) -> &Dictionary {
        &self.dictionaries[locale.index()]
    }

    /// Dictionary of the default locale
    pub fn default_dictionary(&self) -> &Dictionary {
        self.dictionary(Locale::DEFAULT)
    }

    /// Iterate over every dictionary, default first
    pub fn iter(&self) -> impl Iterator<Item = &Dictionary> {
        self.dictionaries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_requires_every_locale() {
        let err = DictionaryStore::new([Dictionary::empty(Locale::En), Dictionary::empty(Locale::De)])
            .unwrap_err();
        match err {
            I18nError::MissingDictionary { locale } => assert_eq!(locale, "es"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_new_indexes_by_locale() {
        let store = DictionaryStore::new(Locale::ALL.into_iter().rev().map(Dictionary::empty)).unwrap();
        for locale in Locale::ALL {
            assert_eq!(store.dictionary(locale).locale(), locale);
        }
        assert_eq!(store.default_dictionary().locale(), Locale::En);
        assert_eq!(store.iter().count(), Locale::COUNT);
    }

    #[test]
    fn test_builtin_is_shared() {
        let first = DictionaryStore::builtin();
        let second = DictionaryStore::builtin();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.default_dictionary().resolve("nav.home"), Some("Home"));
    }

    #[test]
    fn test_load_dir() {
        let dir = tempfile::tempdir().unwrap();
        for locale in Locale::ALL {
            let json = format!(r#"{{ "nav": {{ "home": "home-{}" }} }}"#, locale.code());
            std::fs::write(dir.path().join(format!("{}.json", locale.code())), json).unwrap();
        }

        let store = DictionaryStore::load_dir(dir.path()).unwrap();
        assert_eq!(store.dictionary(Locale::Fr).resolve("nav.home"), Some("home-fr"));
    }

    #[test]
    fn test_load_dir_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("en.json"), "{}").unwrap();

        let err = DictionaryStore::load_dir(dir.path()).unwrap_err();
        assert!(matches!(err, I18nError::MissingDictionary { locale } if locale == "de"));
    }
}
