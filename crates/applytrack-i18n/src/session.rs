//! Client-side locale session

use crate::detect::{ClientSignals, Detection, LocaleDetector, LocaleSource};
use crate::error::I18nResult;
use crate::preference::PreferenceStore;
use crate::scope::LocaleScope;
use crate::translator::TranslatorFactory;
use crate::Locale;
use std::sync::Arc;
use tracing::{info, warn};

/// Locale state of one client session.
///
/// The preference is read once when the session starts. Switching locale
/// persists the choice and rebinds the scope.
pub struct ClientSession {
    factory: TranslatorFactory,
    preferences: Arc<dyn PreferenceStore>,
    detection: Detection,
    scope: LocaleScope,
}

impl std::fmt::Debug for ClientSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientSession")
            .field("detection", &self.detection)
            .field("policy", &self.factory.policy())
            .finish_non_exhaustive()
    }
}

impl ClientSession {
    /// Start a session from the stored preference and the given platform
    /// languages. An unreadable preference is logged and ignored.
    pub fn start(
        factory: TranslatorFactory,
        preferences: Arc<dyn PreferenceStore>,
        platform_languages: Vec<String>,
    ) -> Self {
        let stored_preference = load_preference(preferences.as_ref());
        let signals = ClientSignals {
            override_tag: None,
            stored_preference,
            platform_languages,
        };
        Self::with_signals(factory, preferences, &signals)
    }

    /// Start a session using the operating system's language
    pub fn start_with_platform(factory: TranslatorFactory, preferences: Arc<dyn PreferenceStore>) -> Self {
        let signals = ClientSignals::from_platform(load_preference(preferences.as_ref()));
        Self::with_signals(factory, preferences, &signals)
    }

    /// Start a session from fully specified signals
    pub fn with_signals(
        factory: TranslatorFactory,
        preferences: Arc<dyn PreferenceStore>,
        signals: &ClientSignals,
    ) -> Self {
        let detection = LocaleDetector::default().detect_client(signals);
        info!(locale = %detection.locale, source = %detection.source, "Client session started");
        let scope = LocaleScope::from_detection(&factory, &detection);

        Self {
            factory,
            preferences,
            detection,
            scope,
        }
    }

    /// Locale currently in effect
    pub fn locale(&self) -> Locale {
        self.scope.locale()
    }

    /// How the current locale was chosen
    pub fn detection(&self) -> Detection {
        self.detection
    }

    /// Scope for the current locale
    pub fn scope(&self) -> &LocaleScope {
        &self.scope
    }

    /// Persist `locale` and rebind the session scope to it.
    ///
    /// On a persistence failure the session keeps its current locale.
    pub fn switch_locale(&mut self, locale: Locale) -> I18nResult<&LocaleScope> {
        self.preferences.save(locale)?;

        self.detection = Detection {
            locale,
            source: LocaleSource::Override,
        };
        self.scope = self.factory.for_locale(locale).into();
        info!(locale = %locale, "Switched session locale");
        Ok(&self.scope)
    }
}

fn load_preference(preferences: &dyn PreferenceStore) -> Option<String> {
    preferences.load().unwrap_or_else(|e| {
        warn!("Ignoring unreadable locale preference: {}", e);
        None
    })
}
