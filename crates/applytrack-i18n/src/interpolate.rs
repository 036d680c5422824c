//! Placeholder interpolation with HTML escaping

use crate::error::{I18nError, I18nResult};
use crate::params::Params;
use applytrack_common::{escape_html, FailurePolicy};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::warn;

static PLACEHOLDER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([A-Za-z0-9_]+)\}").expect("placeholder pattern is valid"));

/// Placeholder names in order of first appearance, without duplicates
pub fn placeholders(template: &str) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for capture in PLACEHOLDER_REGEX.captures_iter(template) {
        if let Some(name) = capture.get(1).map(|m| m.as_str()) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }
    names
}

/// Outcome of filling a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpolated {
    /// Template with every supplied placeholder replaced
    pub text: String,
    /// Placeholders that received a value
    pub satisfied: Vec<String>,
    /// Placeholders left in the text literally
    pub missing: Vec<String>,
}

impl Interpolated {
    /// Whether every placeholder received a value
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Apply the failure policy to missing parameters of `key`.
    ///
    /// Strict rejects the first missing name; lenient logs each one and keeps
    /// the partially filled text.
    pub fn finish(self, key: &str, policy: FailurePolicy) -> I18nResult<String> {
        match self.missing.first() {
            None => Ok(self.text),
            Some(name) if policy.is_strict() => Err(I18nError::MissingParameter {
                name: name.clone(),
                key: key.to_string(),
            }),
            Some(_) => {
                for name in &self.missing {
                    warn!(key = %key, parameter = %name, "Missing interpolation parameter");
                }
                Ok(self.text)
            }
        }
    }
}

/// Substitute `{name}` placeholders in `template` with escaped values.
///
/// Extra parameters are ignored. Without placeholders the template is
/// returned unchanged.
pub fn interpolate(template: &str, params: Option<&Params>) -> Interpolated {
    let names = placeholders(template);
    if names.is_empty() {
        return Interpolated {
            text: template.to_string(),
            satisfied: Vec::new(),
            missing: Vec::new(),
        };
    }

    let (satisfied, missing): (Vec<&str>, Vec<&str>) = names
        .into_iter()
        .partition(|name| params.is_some_and(|params| params.contains(name)));

    let text = match params {
        Some(params) if !satisfied.is_empty() => PLACEHOLDER_REGEX
            .replace_all(template, |caps: &Captures<'_>| match params.get(&caps[1]) {
                Some(value) => escape_html(&value.to_string()).into_owned(),
                None => caps[0].to_string(),
            })
            .into_owned(),
        _ => template.to_string(),
    };

    Interpolated {
        text,
        satisfied: satisfied.into_iter().map(str::to_string).collect(),
        missing: missing.into_iter().map(str::to_string).collect(),
    }
}
