//! Request-scoped locale context
//!
//! A [`LocaleScope`] binds a locale and its translator to the current task.
//! Code that renders text calls [`current_scope`] instead of threading the
//! translator through every signature.

use crate::detect::Detection;
use crate::keys::TranslationKey;
use crate::params::Params;
use crate::store::DictionaryStore;
use crate::translator::{Translator, TranslatorFactory};
use crate::Locale;
use applytrack_common::FailurePolicy;
use once_cell::sync::Lazy;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, warn};

tokio::task_local! {
    static CURRENT_SCOPE: LocaleScope;
}

static UNSCOPED: Lazy<LocaleScope> = Lazy::new(|| {
    LocaleScope::new(
        TranslatorFactory::new(DictionaryStore::builtin(), FailurePolicy::Lenient)
            .for_locale(Locale::DEFAULT),
    )
});

static UNSCOPED_WARNED: AtomicBool = AtomicBool::new(false);

/// The active locale and its translator
#[derive(Debug, Clone)]
pub struct LocaleScope {
    locale: Locale,
    translator: Translator,
}

impl LocaleScope {
    /// Scope for the translator's locale
    pub fn new(translator: Translator) -> Self {
        Self {
            locale: translator.locale(),
            translator,
        }
    }

    /// Scope for the locale picked by detection
    pub fn from_detection(factory: &TranslatorFactory, detection: &Detection) -> Self {
        Self::new(factory.for_locale(detection.locale))
    }

    /// Active locale
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Translator bound to the active locale
    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    /// Shorthand for [`Translator::t`]
    pub fn t(&self, key: TranslationKey) -> String {
        self.translator.t(key)
    }

    /// Shorthand for [`Translator::t_with`]
    pub fn t_with(&self, key: TranslationKey, params: &Params) -> String {
        self.translator.t_with(key, params)
    }

    /// Run `future` with this scope active.
    ///
    /// The binding belongs to the task polling `future`; concurrent tasks
    /// each see their own scope.
    pub async fn run<F: Future>(self, future: F) -> F::Output {
        CURRENT_SCOPE.scope(self, future).await
    }

    /// Run `f` synchronously with this scope active
    pub fn run_sync<R>(self, f: impl FnOnce() -> R) -> R {
        CURRENT_SCOPE.sync_scope(self, f)
    }
}

impl From<Translator> for LocaleScope {
    fn from(translator: Translator) -> Self {
        Self::new(translator)
    }
}

/// The scope bound by the innermost [`LocaleScope::run`].
///
/// Outside any scope this degrades to a lenient default-locale scope. Every
/// such call is logged: as a warning in debug builds, otherwise as a warning
/// once and at debug level afterwards.
pub fn current_scope() -> LocaleScope {
    CURRENT_SCOPE.try_with(LocaleScope::clone).unwrap_or_else(|_| {
        let first = !UNSCOPED_WARNED.swap(true, Ordering::Relaxed);
        if first || FailurePolicy::for_build().is_strict() {
            warn!(
                "Translation requested outside a locale scope, using lenient {} translator",
                Locale::DEFAULT
            );
        } else {
            debug!(
                "Translation requested outside a locale scope, using lenient {} translator",
                Locale::DEFAULT
            );
        }
        UNSCOPED.clone()
    })
}

/// Whether a scope is bound to the current task
pub fn in_scope() -> bool {
    CURRENT_SCOPE.try_with(|_| ()).is_ok()
}

/// Translate `key` with the current scope
pub fn t(key: TranslationKey) -> String {
    current_scope().t(key)
}

/// Translate `key` with parameters using the current scope
pub fn t_with(key: TranslationKey, params: &Params) -> String {
    current_scope().t_with(key, params)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope(locale: Locale) -> LocaleScope {
        TranslatorFactory::new(DictionaryStore::builtin(), FailurePolicy::Strict)
            .for_locale(locale)
            .into()
    }

    #[test]
    fn test_run_sync_binds_scope() {
        assert!(!in_scope());
        let text = scope(Locale::De).run_sync(|| {
            assert!(in_scope());
            assert_eq!(current_scope().locale(), Locale::De);
            t(TranslationKey::NavHome)
        });
        assert_eq!(text, "Startseite");
        assert!(!in_scope());
    }

    #[test]
    fn test_nested_scope_shadows_outer() {
        scope(Locale::De).run_sync(|| {
            scope(Locale::Fr).run_sync(|| assert_eq!(current_scope().locale(), Locale::Fr));
            assert_eq!(current_scope().locale(), Locale::De);
        });
    }

    #[test]
    fn test_unscoped_degrades_to_lenient_default() {
        let fallback = current_scope();
        assert_eq!(fallback.locale(), Locale::DEFAULT);
        assert_eq!(fallback.translator().policy(), FailurePolicy::Lenient);
        assert_eq!(t(TranslationKey::NavHome), "Home");
    }

    #[tokio::test]
    async fn test_run_binds_scope_across_await() {
        let text = scope(Locale::Es)
            .run(async {
                tokio::task::yield_now().await;
                t(TranslationKey::NavHome)
            })
            .await;
        assert_eq!(text, scope(Locale::Es).t(TranslationKey::NavHome));
    }
}
