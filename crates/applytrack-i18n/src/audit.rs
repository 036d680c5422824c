//! Structural audit of dictionaries against the default locale

use crate::dictionary::Dictionary;
use crate::interpolate::placeholders;
use crate::store::DictionaryStore;
use crate::Locale;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

/// A key whose placeholders differ from the default template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaceholderMismatch {
    /// Dotted key whose placeholders differ
    pub key: String,
    /// Placeholder names in the reference template
    pub expected: Vec<String>,
    /// Placeholder names in the audited template
    pub found: Vec<String>,
}

/// Drift of one locale relative to the default
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocaleAudit {
    /// Audited locale
    pub locale: Locale,
    /// Keys of the default dictionary this locale lacks
    pub missing: Vec<String>,
    /// Keys this locale defines that the default lacks
    pub extra: Vec<String>,
    /// Keys whose placeholder sets differ from the reference
    pub placeholder_mismatches: Vec<PlaceholderMismatch>,
    /// Share of default keys present in this locale
    pub coverage_percent: f64,
}

impl LocaleAudit {
    /// No missing, extra or mismatched keys
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty() && self.placeholder_mismatches.is_empty()
    }
}

/// Audit of every non-default locale
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditReport {
    /// Locale every other dictionary is compared against
    pub default_locale: Locale,
    /// Number of keys in the reference dictionary
    pub total_keys: usize,
    /// One entry per non-default locale
    pub locales: Vec<LocaleAudit>,
}

impl AuditReport {
    /// Every audited locale is clean
    pub fn is_clean(&self) -> bool {
        self.locales.iter().all(LocaleAudit::is_clean)
    }

    /// Audit entry for `locale`, if it was audited
    pub fn locale(&self, locale: Locale) -> Option<&LocaleAudit> {
        self.locales.iter().find(|audit| audit.locale == locale)
    }
}

fn placeholder_set(template: &str) -> BTreeSet<String> {
    placeholders(template).into_iter().map(str::to_string).collect()
}

/// Compare `target` against `reference`
pub fn audit_dictionary(reference: &Dictionary, target: &Dictionary) -> LocaleAudit {
    let reference_entries: BTreeMap<String, &str> = reference.entries().into_iter().collect();
    let target_entries: BTreeMap<String, &str> = target.entries().into_iter().collect();

    let mut missing = Vec::new();
    let mut placeholder_mismatches = Vec::new();

    for (key, expected_template) in &reference_entries {
        match target_entries.get(key) {
            None => missing.push(key.clone()),
            Some(found_template) => {
                let expected = placeholder_set(expected_template);
                let found = placeholder_set(found_template);
                if expected != found {
                    placeholder_mismatches.push(PlaceholderMismatch {
                        key: key.clone(),
                        expected: expected.into_iter().collect(),
                        found: found.into_iter().collect(),
                    });
                }
            }
        }
    }

    let extra: Vec<String> = target_entries
        .keys()
        .filter(|key| !reference_entries.contains_key(*key))
        .cloned()
        .collect();

    let total = reference_entries.len();
    let coverage_percent = if total == 0 {
        100.0
    } else {
        (total - missing.len()) as f64 / total as f64 * 100.0
    };

    LocaleAudit {
        locale: target.locale(),
        missing,
        extra,
        placeholder_mismatches,
        coverage_percent,
    }
}

/// Audit every non-default dictionary of `store`
pub fn audit_store(store: &DictionaryStore) -> AuditReport {
    let reference = store.default_dictionary();

    let locales: Vec<LocaleAudit> = store
        .iter()
        .filter(|dictionary| dictionary.locale() != store.default_locale())
        .map(|dictionary| {
            let audit = audit_dictionary(reference, dictionary);
            if audit.is_clean() {
                debug!(locale = %audit.locale, "Locale audit clean");
            } else {
                warn!(
                    locale = %audit.locale,
                    missing = audit.missing.len(),
                    extra = audit.extra.len(),
                    mismatches = audit.placeholder_mismatches.len(),
                    "Locale drifted from {}",
                    store.default_locale()
                );
            }
            audit
        })
        .collect();

    AuditReport {
        default_locale: store.default_locale(),
        total_keys: reference.len(),
        locales,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use applytrack_common::test_utils::dictionary_fixtures::{drifted_json, reference_json};

    #[test]
    fn test_identical_dictionaries_are_clean() {
        let reference = Dictionary::from_json_str(Locale::En, reference_json()).unwrap();
        let copy = Dictionary::from_json_str(Locale::Fr, reference_json()).unwrap();
        let audit = audit_dictionary(&reference, &copy);
        assert!(audit.is_clean());
        assert!((audit.coverage_percent - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_drift_is_reported() {
        let reference = Dictionary::from_json_str(Locale::En, reference_json()).unwrap();
        let drifted = Dictionary::from_json_str(Locale::De, drifted_json()).unwrap();
        let audit = audit_dictionary(&reference, &drifted);

        assert_eq!(audit.locale, Locale::De);
        assert_eq!(audit.missing, vec!["nav.home"]);
        assert_eq!(audit.extra, vec!["nav.archive"]);
        assert_eq!(audit.placeholder_mismatches.len(), 1);

        let mismatch = &audit.placeholder_mismatches[0];
        assert_eq!(mismatch.key, "auth.login.welcome");
        assert_eq!(mismatch.expected, vec!["name"]);
        assert_eq!(mismatch.found, vec!["user"]);
        assert!(audit.coverage_percent < 100.0);
        assert!(!audit.is_clean());
    }

    #[test]
    fn test_empty_reference_is_fully_covered() {
        let audit = audit_dictionary(&Dictionary::empty(Locale::En), &Dictionary::empty(Locale::Es));
        assert!(audit.is_clean());
        assert!((audit.coverage_percent - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_builtin_store_report_shape() {
        let report = audit_store(&DictionaryStore::builtin());
        assert_eq!(report.default_locale, Locale::En);
        assert_eq!(report.locales.len(), Locale::COUNT - 1);
        assert!(report.locale(Locale::En).is_none());
        assert!(report.locale(Locale::De).is_some());
    }
}
