//! Translator factory and the default-locale fallback chain

use crate::error::{I18nError, I18nResult};
use crate::interpolate::interpolate;
use crate::keys::TranslationKey;
use crate::params::Params;
use crate::store::DictionaryStore;
use crate::Locale;
use applytrack_common::FailurePolicy;
use applytrack_config::I18nSettings;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Where a translation came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Found in the translator's own locale
    Target,
    /// Absent from the target locale, found in the default locale
    DefaultFallback,
    /// Found nowhere; the key itself is returned
    KeyEcho,
}

/// A resolved and interpolated translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    /// Rendered text
    pub text: String,
    /// Where the template was found
    pub origin: Origin,
}

/// Creates translators that share one dictionary store and failure policy
#[derive(Debug, Clone)]
pub struct TranslatorFactory {
    store: Arc<DictionaryStore>,
    policy: FailurePolicy,
}

impl TranslatorFactory {
    /// Factory over `store` applying `policy` to every translator
    pub fn new(store: Arc<DictionaryStore>, policy: FailurePolicy) -> Self {
        Self { store, policy }
    }

    /// Factory over the embedded dictionaries with the build's default policy
    pub fn builtin() -> Self {
        Self::new(DictionaryStore::builtin(), FailurePolicy::for_build())
    }

    /// Factory over the embedded dictionaries using configured settings
    pub fn from_settings(settings: &I18nSettings) -> Self {
        Self::new(DictionaryStore::builtin(), settings.mode)
    }

    /// Produce a translator bound to `locale`
    pub fn for_locale(&self, locale: Locale) -> Translator {
        Translator {
            locale,
            store: Arc::clone(&self.store),
            policy: self.policy,
        }
    }

    /// Failure policy handed to translators
    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Shared dictionary store
    pub fn store(&self) -> &Arc<DictionaryStore> {
        &self.store
    }
}

/// Translation function closed over one locale.
///
/// Cheap to clone; holds no per-call state.
#[derive(Debug, Clone)]
pub struct Translator {
    locale: Locale,
    store: Arc<DictionaryStore>,
    policy: FailurePolicy,
}

impl Translator {
    /// Target locale
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Failure policy in effect
    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Resolve `key` through the fallback chain and interpolate `params`
    pub fn resolve(&self, key: &str, params: Option<&Params>) -> I18nResult<Translation> {
        let Some((template, origin)) = self.lookup(key)? else {
            return Ok(Translation {
                text: key.to_string(),
                origin: Origin::KeyEcho,
            });
        };

        let text = interpolate(template, params).finish(key, self.policy)?;
        Ok(Translation { text, origin })
    }

    /// Find the template for `key`, target locale first, then the default.
    ///
    /// `Ok(None)` means the key is unknown and the policy is lenient.
    fn lookup(&self, key: &str) -> I18nResult<Option<(&str, Origin)>> {
        if let Some(template) = self.store.dictionary(self.locale).resolve(key) {
            return Ok(Some((template, Origin::Target)));
        }

        let default = self.store.default_locale();
        if self.locale != default {
            if let Some(template) = self.store.default_dictionary().resolve(key) {
                if self.policy.is_strict() {
                    warn!(key = %key, locale = %self.locale, "Translation missing, falling back to {}", default);
                } else {
                    debug!(key = %key, locale = %self.locale, "Translation missing, falling back to {}", default);
                }
                return Ok(Some((template, Origin::DefaultFallback)));
            }
        }

        if self.policy.is_strict() {
            return Err(I18nError::MissingKey {
                key: key.to_string(),
                locale: self.locale.code().to_string(),
            });
        }

        error!(key = %key, locale = %self.locale, "Unknown translation key");
        Ok(None)
    }

    /// Translate an untyped key
    pub fn translate(&self, key: &str, params: Option<&Params>) -> I18nResult<String> {
        self.resolve(key, params).map(|translation| translation.text)
    }

    /// Translate a typed key without parameters.
    ///
    /// # Panics
    ///
    /// Under [`FailurePolicy::Strict`] when the key cannot be resolved or a
    /// placeholder has no value. Never panics under the lenient policy.
    pub fn t(&self, key: TranslationKey) -> String {
        self.render(key, None)
    }

    /// Translate a typed key with parameters.
    ///
    /// # Panics
    ///
    /// Same conditions as [`Translator::t`].
    pub fn t_with(&self, key: TranslationKey, params: &Params) -> String {
        self.render(key, Some(params))
    }

    fn render(&self, key: TranslationKey, params: Option<&Params>) -> String {
        match self.translate(key.as_str(), params) {
            Ok(text) => text,
            Err(e) => panic!("translation failed for locale {}: {}", self.locale, e),
        }
    }

    /// Whether `key` resolves in this locale or the default locale
    pub fn has(&self, key: &str) -> bool {
        self.store.dictionary(self.locale).contains(key)
            || self.store.default_dictionary().contains(key)
    }
}
