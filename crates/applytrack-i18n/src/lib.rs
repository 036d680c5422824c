//! # applytrack I18n
//!
//! Translation engine for applytrack.
//!
//! Dictionaries are nested JSON trees under `locales/`, one per supported
//! locale. The build script derives [`TranslationKey`] from the default
//! dictionary, so a typo in a key is a compile error. At runtime a
//! [`Translator`] resolves dot-path keys, falls back to the default locale
//! and fills `{name}` placeholders with HTML-escaped values. Missing keys and
//! parameters are either fatal or logged depending on the [`FailurePolicy`].
//!
//! ```
//! use applytrack_i18n::{params, FailurePolicy, Locale, TranslationKey, TranslatorFactory};
//! use applytrack_i18n::DictionaryStore;
//!
//! let factory = TranslatorFactory::new(DictionaryStore::builtin(), FailurePolicy::Strict);
//! let t = factory.for_locale(Locale::De);
//! assert_eq!(t.t(TranslationKey::NavHome), "Startseite");
//! assert_eq!(
//!     t.t_with(TranslationKey::DashboardWelcome, &params! { "name" => "<Ada>" }),
//!     "Willkommen zurück, &lt;Ada&gt;!"
//! );
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod audit;
pub mod detect;
pub mod dictionary;
pub mod error;
pub mod interpolate;
pub mod keys;
pub mod locale;
pub mod params;
pub mod preference;
pub mod scope;
pub mod session;
pub mod store;
pub mod translator;

pub use applytrack_common::FailurePolicy;
pub use audit::{audit_store, AuditReport, LocaleAudit, PlaceholderMismatch};
pub use detect::{
    cookie_value, parse_accept_language, ClientSignals, Detection, LocaleDetector, LocaleSource,
    RequestSignals,
};
pub use dictionary::{Dictionary, Node};
pub use error::{I18nError, I18nResult};
pub use interpolate::{interpolate, placeholders, Interpolated};
pub use keys::TranslationKey;
pub use locale::Locale;
pub use params::{ParamValue, Params};
pub use preference::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};
pub use scope::{current_scope, LocaleScope};
pub use session::ClientSession;
pub use store::DictionaryStore;
pub use translator::{Origin, Translation, Translator, TranslatorFactory};
