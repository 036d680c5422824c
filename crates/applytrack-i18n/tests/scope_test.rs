//! Locale scopes across concurrent tasks

use applytrack_i18n::scope::{self, in_scope};
use applytrack_i18n::{
    current_scope, DictionaryStore, FailurePolicy, Locale, LocaleDetector, LocaleScope,
    RequestSignals, TranslationKey, TranslatorFactory,
};
use std::time::Duration;
use tracing_test::traced_test;

fn factory() -> TranslatorFactory {
    TranslatorFactory::new(DictionaryStore::builtin(), FailurePolicy::Strict)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_scopes_do_not_leak() {
    let factory = factory();
    let mut handles = Vec::new();

    for round in 0..8_u64 {
        for locale in Locale::ALL {
            let scope = LocaleScope::new(factory.for_locale(locale));
            let expected = factory.for_locale(locale).t(TranslationKey::NavHome);
            handles.push(tokio::spawn(scope.run(async move {
                tokio::time::sleep(Duration::from_millis(round % 3)).await;
                tokio::task::yield_now().await;
                assert_eq!(current_scope().locale(), locale);
                assert_eq!(scope::t(TranslationKey::NavHome), expected);
            })));
        }
    }

    for handle in handles {
        handle.await.unwrap();
    }
}

#[tokio::test]
async fn test_request_detection_to_scope() {
    let factory = factory();
    let detector = LocaleDetector::new("applytrack_locale");

    let requests = [
        (Some("fr"), None, Some("de"), Locale::Fr),
        (None, Some("applytrack_locale=es"), Some("de"), Locale::Es),
        (None, None, Some("de-AT,en;q=0.5"), Locale::De),
        (None, None, None, Locale::En),
    ];

    for (override_tag, cookie_header, accept_language, expected) in requests {
        let detection = detector.detect_request(&RequestSignals {
            override_tag,
            cookie_header,
            accept_language,
        });
        let locale = LocaleScope::from_detection(&factory, &detection)
            .run(async { current_scope().locale() })
            .await;
        assert_eq!(locale, expected);
    }
}

#[tokio::test]
async fn test_scope_ends_with_future() {
    LocaleScope::new(factory().for_locale(Locale::De))
        .run(async { assert!(in_scope()) })
        .await;
    assert!(!in_scope());
}

#[test]
#[traced_test]
fn test_missing_scope_degrades_to_default() {
    assert!(!in_scope());
    let scope = current_scope();
    assert_eq!(scope.locale(), Locale::DEFAULT);
    assert_eq!(scope.translator().policy(), FailurePolicy::Lenient);
    assert_eq!(scope::t(TranslationKey::NavHome), "Home");

    // Each unscoped lookup is reported, not just the first
    logs_assert(|lines: &[&str]| {
        let reports = lines
            .iter()
            .filter(|line| line.contains("outside a locale scope"))
            .count();
        match reports {
            2 => Ok(()),
            n => Err(format!("expected two unscoped reports, found {n}")),
        }
    });
}

#[test]
#[traced_test]
fn test_bound_scope_is_not_reported() {
    LocaleScope::new(factory().for_locale(Locale::Fr)).run_sync(|| {
        assert_eq!(current_scope().locale(), Locale::Fr);
    });
    assert!(!logs_contain("outside a locale scope"));
}
