//! Plain-text rendering of audit results and key listings

use applytrack_common::truncate_string;
use applytrack_i18n::{AuditReport, Dictionary, DictionaryStore, Locale};
use std::fmt::Write as _;

/// Render an audit report, one section per locale
pub fn render_audit(report: &AuditReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Reference locale: {} ({} keys)",
        report.default_locale, report.total_keys
    );

    for audit in &report.locales {
        let status = if audit.is_clean() { "ok" } else { "DRIFT" };
        let _ = writeln!(
            out,
            "\n[{}] {} - {:.1}% coverage",
            audit.locale, status, audit.coverage_percent
        );

        for key in &audit.missing {
            let _ = writeln!(out, "  missing   {key}");
        }
        for key in &audit.extra {
            let _ = writeln!(out, "  extra     {key}");
        }
        for mismatch in &audit.placeholder_mismatches {
            let _ = writeln!(
                out,
                "  mismatch  {} expected {{{}}} found {{{}}}",
                mismatch.key,
                mismatch.expected.join(", "),
                mismatch.found.join(", ")
            );
        }
    }

    let verdict = if report.is_clean() {
        "All locales match the reference."
    } else {
        "Dictionaries drifted from the reference."
    };
    let _ = writeln!(out, "\n{verdict}");
    out
}

/// Render every key of `dictionary` with its template cut to `width` characters
pub fn render_keys(dictionary: &Dictionary, width: usize) -> String {
    let entries = dictionary.entries();
    let key_width = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0);

    let mut out = String::new();
    for (key, template) in entries {
        let _ = writeln!(out, "{key:<key_width$}  {}", truncate_string(template, width));
    }
    out
}

/// Render the supported locales with their native names and key counts
pub fn render_locales(store: &DictionaryStore) -> String {
    let name_width = Locale::ALL
        .iter()
        .map(|locale| locale.display_name().chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for locale in Locale::ALL {
        let marker = if locale.is_default() { "  (default)" } else { "" };
        let _ = writeln!(
            out,
            "{:<4}{:<name_width$}  {:>4} keys{marker}",
            locale.code(),
            locale.display_name(),
            store.dictionary(locale).len(),
        );
    }
    out
}
