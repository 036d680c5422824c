//! Active locale detection
//!
//! Every entry point funnels into one precedence chain:
//! explicit override, persisted preference, environment signal, default.
//! Unusable values are skipped; detection itself never fails.

use crate::Locale;
use applytrack_config::I18nSettings;
use std::cmp::Ordering;
use std::fmt;
use tracing::debug;

/// Signal that selected the active locale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocaleSource {
    /// Explicitly requested, e.g. a query parameter or a CLI flag
    Override,
    /// Previously saved preference (cookie or preference store)
    Persisted,
    /// Accept-Language header or platform language
    Environment,
    /// Nothing usable was supplied
    Default,
}

impl fmt::Display for LocaleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Override => "override",
            Self::Persisted => "persisted",
            Self::Environment => "environment",
            Self::Default => "default",
        };
        f.write_str(name)
    }
}

/// Result of running the detection chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detection {
    /// Selected locale
    pub locale: Locale,
    /// Signal it came from
    pub source: LocaleSource,
}

impl Detection {
    /// Detection when no signal was usable
    pub const fn default_locale() -> Self {
        Self {
            locale: Locale::DEFAULT,
            source: LocaleSource::Default,
        }
    }
}

/// Run the precedence chain over already extracted signals.
///
/// `environment` is tried in order; the first supported tag wins.
pub fn detect<S: AsRef<str>>(
    override_tag: Option<&str>,
    persisted: Option<&str>,
    environment: &[S],
) -> Detection {
    let candidates = override_tag
        .map(|tag| (tag, LocaleSource::Override))
        .into_iter()
        .chain(persisted.map(|tag| (tag, LocaleSource::Persisted)))
        .chain(
            environment
                .iter()
                .map(|tag| (tag.as_ref(), LocaleSource::Environment)),
        );

    for (tag, source) in candidates {
        match Locale::from_tag(tag) {
            Some(locale) => return Detection { locale, source },
            None => debug!(tag = %tag, source = %source, "Skipping unsupported locale signal"),
        }
    }

    Detection::default_locale()
}

/// Language tags of an `Accept-Language` header in preference order.
///
/// Entries are ordered by descending `q`; ties keep header order. `q=0`
/// entries and the `*` wildcard are dropped, as are malformed weights.
pub fn parse_accept_language(header: &str) -> Vec<&str> {
    let mut weighted: Vec<(&str, f32)> = header
        .split(',')
        .filter_map(|part| {
            let mut pieces = part.split(';');
            let tag = pieces.next()?.trim();
            if tag.is_empty() || tag == "*" {
                return None;
            }

            let mut quality = 1.0_f32;
            for param in pieces {
                let Some((name, value)) = param.split_once('=') else {
                    continue;
                };
                if name.trim().eq_ignore_ascii_case("q") {
                    quality = value.trim().parse().ok().filter(|q| (0.0_f32..=1.0).contains(q))?;
                }
            }

            (quality > 0.0).then_some((tag, quality))
        })
        .collect();

    // sort_by is stable, so equal weights keep header order
    weighted.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    weighted.into_iter().map(|(tag, _)| tag).collect()
}

/// Value of cookie `name` in a `Cookie` header
pub fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key.trim() == name).then(|| value.trim().trim_matches('"'))
    })
}

/// Signals available while handling a server request
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestSignals<'a> {
    /// Explicit locale, e.g. from a `?lang=` query parameter
    pub override_tag: Option<&'a str>,
    /// Raw `Cookie` header
    pub cookie_header: Option<&'a str>,
    /// Raw `Accept-Language` header
    pub accept_language: Option<&'a str>,
}

/// Signals available to a client-side session
#[derive(Debug, Clone, Default)]
pub struct ClientSignals {
    /// Explicit locale requested for this session
    pub override_tag: Option<String>,
    /// Raw value from the preference store
    pub stored_preference: Option<String>,
    /// Platform languages in preference order
    pub platform_languages: Vec<String>,
}

impl ClientSignals {
    /// Collect signals from the operating system, with an optional stored
    /// preference
    pub fn from_platform(stored_preference: Option<String>) -> Self {
        let platform_languages: Vec<String> = sys_locale::get_locale().into_iter().collect();
        debug!("Platform languages: {:?}", platform_languages);
        Self {
            override_tag: None,
            stored_preference,
            platform_languages,
        }
    }
}

/// Applies the detection chain to server requests and client sessions
#[derive(Debug, Clone)]
pub struct LocaleDetector {
    cookie_name: String,
}

impl Default for LocaleDetector {
    fn default() -> Self {
        Self::from_settings(&I18nSettings::default())
    }
}

impl LocaleDetector {
    /// Detector reading the persisted preference from cookie `cookie_name`
    pub fn new(cookie_name: impl Into<String>) -> Self {
        Self {
            cookie_name: cookie_name.into(),
        }
    }

    /// Detector using the configured preference cookie
    pub fn from_settings(settings: &I18nSettings) -> Self {
        Self::new(settings.preference_cookie.clone())
    }

    /// Name of the cookie holding the persisted preference
    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Detect the locale for a server request
    pub fn detect_request(&self, signals: &RequestSignals<'_>) -> Detection {
        let persisted = signals
            .cookie_header
            .and_then(|header| cookie_value(header, &self.cookie_name));
        let environment = signals
            .accept_language
            .map(parse_accept_language)
            .unwrap_or_default();

        let detection = detect(signals.override_tag, persisted, &environment);
        debug!(locale = %detection.locale, source = %detection.source, "Detected request locale");
        detection
    }

    /// Detect the locale for a client session
    pub fn detect_client(&self, signals: &ClientSignals) -> Detection {
        let detection = detect(
            signals.override_tag.as_deref(),
            signals.stored_preference.as_deref(),
            &signals.platform_languages,
        );
        debug!(locale = %detection.locale, source = %detection.source, "Detected client locale");
        detection
    }
}
