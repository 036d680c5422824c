//! Test utilities and shared test helpers for applytrack.
//!
//! Available to other crates through the `testing` feature.

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        // Another harness may already have installed a subscriber.
        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "tempfile")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Dictionary fixtures shaped like the real locale files.
pub mod dictionary_fixtures {
    /// A small default-locale dictionary.
    pub fn reference_json() -> &'static str {
        r#"{
  "nav": { "home": "Home", "jobs": "Jobs" },
  "auth": { "login": { "title": "Sign in", "welcome": "Welcome back, {name}!" } },
  "greeting": "Hello, {name}!"
}"#
    }

    /// A translation of [`reference_json`] missing `nav.home` and carrying one extra key.
    pub fn drifted_json() -> &'static str {
        r#"{
  "nav": { "jobs": "Stellen", "archive": "Archiv" },
  "auth": { "login": { "title": "Anmelden", "welcome": "Willkommen zurück, {user}!" } },
  "greeting": "Hallo, {name}!"
}"#
    }
}

/// Property-based testing utilities using proptest.
#[cfg(feature = "proptest")]
pub mod property_testing {
    use proptest::strategy::Strategy;

    /// Strategy for placeholder identifiers.
    pub fn identifier_strategy() -> impl Strategy<Value = String> {
        r"[a-zA-Z_][a-zA-Z0-9_]{0,11}"
    }

    /// Strategy for template text that never contains braces.
    pub fn plain_text_strategy() -> impl Strategy<Value = String> {
        r"[^{}]{0,40}"
    }

    /// Strategy for parameter values that may contain markup.
    pub fn hostile_value_strategy() -> impl Strategy<Value = String> {
        r#"[a-z<>&"' /]{0,24}"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_multiple_calls() {
        init_test_logging();
        init_test_logging();
        init_test_logging();
    }

    #[test]
    fn test_fixtures_are_valid_json() {
        let reference: serde_json::Value =
            serde_json::from_str(dictionary_fixtures::reference_json()).unwrap();
        let drifted: serde_json::Value =
            serde_json::from_str(dictionary_fixtures::drifted_json()).unwrap();
        assert!(reference.is_object());
        assert!(drifted.is_object());
    }

    #[cfg(feature = "proptest")]
    mod property_tests {
        use super::super::property_testing;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_property_identifier_is_word(id in property_testing::identifier_strategy()) {
                prop_assert!(!id.is_empty());
                prop_assert!(id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
            }

            #[test]
            fn test_property_plain_text_has_no_braces(text in property_testing::plain_text_strategy()) {
                prop_assert!(!text.contains('{') && !text.contains('}'), "plain text contained a brace: {:?}", text);
            }
        }
    }
}
