//! End-to-end translation scenarios against small in-memory dictionaries

use applytrack_i18n::{
    params, Dictionary, DictionaryStore, FailurePolicy, I18nError, Locale, Origin, Translator,
    TranslatorFactory,
};
use std::sync::Arc;
use tracing_test::traced_test;

fn store_with(en: &str, de: &str) -> Arc<DictionaryStore> {
    let en = Dictionary::from_json_str(Locale::En, en).unwrap();
    let de = Dictionary::from_json_str(Locale::De, de).unwrap();
    Arc::new(
        DictionaryStore::new([
            en,
            de,
            Dictionary::empty(Locale::Es),
            Dictionary::empty(Locale::Fr),
        ])
        .unwrap(),
    )
}

fn translator(policy: FailurePolicy, locale: Locale, en: &str, de: &str) -> Translator {
    TranslatorFactory::new(store_with(en, de), policy).for_locale(locale)
}

#[test]
fn test_default_locale_lookup() {
    let t = translator(FailurePolicy::Strict, Locale::En, r#"{"nav":{"home":"Home"}}"#, "{}");
    assert_eq!(t.translate("nav.home", None).unwrap(), "Home");
}

#[test]
fn test_interpolation() {
    let t = translator(FailurePolicy::Strict, Locale::En, r#"{"greet":"Hello, {name}!"}"#, "{}");
    let params = params! { "name" => "Ada" };
    assert_eq!(t.translate("greet", Some(&params)).unwrap(), "Hello, Ada!");
}

#[test]
#[traced_test]
fn test_missing_parameter_lenient() {
    let t = translator(FailurePolicy::Lenient, Locale::En, r#"{"hi":"Hi {first} {last}"}"#, "{}");
    let params = params! { "first" => "Ada" };
    assert_eq!(t.translate("hi", Some(&params)).unwrap(), "Hi Ada {last}");
    assert!(logs_contain("Missing interpolation parameter"));
    assert!(logs_contain("parameter=last"));
    assert!(!logs_contain("parameter=first"));
}

#[test]
fn test_missing_parameter_strict_names_parameter_and_key() {
    let t = translator(FailurePolicy::Strict, Locale::En, r#"{"hi":"Hi {first} {last}"}"#, "{}");
    let params = params! { "first" => "Ada" };
    match t.translate("hi", Some(&params)).unwrap_err() {
        I18nError::MissingParameter { name, key } => {
            assert_eq!(name, "last");
            assert_eq!(key, "hi");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
#[traced_test]
fn test_fallback_to_default_locale() {
    for policy in [FailurePolicy::Lenient, FailurePolicy::Strict] {
        let t = translator(policy, Locale::De, r#"{"nav":{"home":"Home"}}"#, r#"{"nav":{}}"#);
        let translation = t.resolve("nav.home", None).unwrap();
        assert_eq!(translation.text, "Home");
        assert_eq!(translation.origin, Origin::DefaultFallback);
    }
    // Only the strict translator raises the fallback to a warning
    logs_assert(|lines: &[&str]| {
        let warnings = lines
            .iter()
            .filter(|line| line.contains("WARN") && line.contains("falling back to en"))
            .count();
        match warnings {
            1 => Ok(()),
            n => Err(format!("expected one fallback warning, found {n}")),
        }
    });
}

#[test]
#[traced_test]
fn test_target_hit_logs_nothing() {
    let t = translator(
        FailurePolicy::Strict,
        Locale::De,
        r#"{"nav":{"home":"Home"}}"#,
        r#"{"nav":{"home":"Startseite"}}"#,
    );
    assert_eq!(t.translate("nav.home", None).unwrap(), "Startseite");
    assert!(!logs_contain("falling back"));
}

#[test]
#[traced_test]
fn test_unknown_key_lenient_returns_key() {
    let t = translator(FailurePolicy::Lenient, Locale::De, r#"{"nav":{"home":"Home"}}"#, "{}");
    assert_eq!(t.translate("does.not.exist", None).unwrap(), "does.not.exist");
    assert!(logs_contain("ERROR"));
    assert!(logs_contain("Unknown translation key"));
    assert!(logs_contain("key=does.not.exist"));
}

#[test]
fn test_unknown_key_strict_fails() {
    let t = translator(FailurePolicy::Strict, Locale::De, r#"{"nav":{"home":"Home"}}"#, "{}");
    let err = t.translate("does.not.exist", None).unwrap_err();
    assert!(err.to_string().contains("does.not.exist"));
    assert!(err.to_string().contains("de"));
}

#[test]
fn test_escaping() {
    let t = translator(FailurePolicy::Strict, Locale::En, r#"{"hi":"Hi {name}"}"#, "{}");
    let params = params! { "name" => "<script>" };
    let text = t.translate("hi", Some(&params)).unwrap();
    assert!(text.contains("&lt;script&gt;"));
    assert!(!text.contains("<script>"));
}

#[test]
fn test_translators_share_one_store() {
    let factory = TranslatorFactory::new(
        store_with(r#"{"a":"A"}"#, r#"{"a":"Ä"}"#),
        FailurePolicy::Strict,
    );
    let en = factory.for_locale(Locale::En);
    let de = factory.for_locale(Locale::De);
    assert_eq!(en.translate("a", None).unwrap(), "A");
    assert_eq!(de.translate("a", None).unwrap(), "Ä");
    assert_eq!(Arc::strong_count(factory.store()), 3);
}
