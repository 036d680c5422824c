//! Immutable dictionary trees and dot-path key resolution

use crate::error::{I18nError, I18nResult};
use crate::Locale;
use serde_json::Value;
use std::collections::BTreeMap;

/// Separator between key segments
pub const KEY_SEPARATOR: char = '.';

/// A node of a dictionary tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A translated template
    Leaf(String),
    /// A named group of child nodes
    Group(BTreeMap<String, Node>),
}

impl Node {
    fn from_json(value: &Value, path: &str, locale: Locale) -> I18nResult<Self> {
        match value {
            Value::String(template) => Ok(Self::Leaf(template.clone())),
            Value::Object(map) => {
                let mut children = BTreeMap::new();
                for (segment, child) in map {
                    if segment.is_empty() || segment.contains(KEY_SEPARATOR) {
                        return Err(I18nError::InvalidDictionary {
                            locale: locale.code().to_string(),
                            reason: format!("invalid key segment '{segment}' under '{path}'"),
                        });
                    }
                    let child_path = join(path, segment);
                    children.insert(segment.clone(), Self::from_json(child, &child_path, locale)?);
                }
                Ok(Self::Group(children))
            }
            _ => Err(I18nError::InvalidDictionary {
                locale: locale.code().to_string(),
                reason: format!("'{path}' must be a string or a group"),
            }),
        }
    }

    fn collect_leaves<'a>(&'a self, prefix: &str, out: &mut Vec<(String, &'a str)>) {
        match self {
            Self::Leaf(template) => out.push((prefix.to_string(), template.as_str())),
            Self::Group(children) => {
                for (segment, child) in children {
                    child.collect_leaves(&join(prefix, segment), out);
                }
            }
        }
    }
}

fn join(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{prefix}{KEY_SEPARATOR}{segment}")
    }
}

/// The translation tree of one locale
///
/// Dictionaries are built once and never mutated; consumers only get shared
/// references to their contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dictionary {
    locale: Locale,
    root: BTreeMap<String, Node>,
}

impl Dictionary {
    /// Create a dictionary with no entries
    pub const fn empty(locale: Locale) -> Self {
        Self {
            locale,
            root: BTreeMap::new(),
        }
    }

    /// Parse a dictionary from a JSON document whose leaves are all strings
    pub fn from_json_str(locale: Locale, json: &str) -> I18nResult<Self> {
        let value: Value = serde_json::from_str(json).map_err(|e| I18nError::InvalidDictionary {
            locale: locale.code().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_json_value(locale, &value)
    }

    /// Build a dictionary from an already parsed JSON value
    pub fn from_json_value(locale: Locale, value: &Value) -> I18nResult<Self> {
        match Node::from_json(value, "", locale)? {
            Node::Group(root) => Ok(Self { locale, root }),
            Node::Leaf(_) => Err(I18nError::InvalidDictionary {
                locale: locale.code().to_string(),
                reason: "top level must be a group".to_string(),
            }),
        }
    }

    /// Locale this dictionary translates
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// Resolve a dot-path key to its template.
    ///
    /// Returns `None` when a segment is absent, when a leaf is reached before
    /// the path is consumed, or when the path ends on a group.
    pub fn resolve(&self, key: &str) -> Option<&str> {
        let mut segments = key.split(KEY_SEPARATOR);
        let mut node = self.root.get(segments.next()?)?;

        for segment in segments {
            match node {
                Node::Group(children) => node = children.get(segment)?,
                Node::Leaf(_) => return None,
            }
        }

        match node {
            Node::Leaf(template) => Some(template.as_str()),
            Node::Group(_) => None,
        }
    }

    /// Whether `key` resolves to a template
    pub fn contains(&self, key: &str) -> bool {
        self.resolve(key).is_some()
    }

    /// Every leaf as `(dot-path, template)`, sorted by path
    pub fn entries(&self) -> Vec<(String, &str)> {
        let mut out = Vec::new();
        for (segment, node) in &self.root {
            node.collect_leaves(segment, &mut out);
        }
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }

    /// Every leaf dot-path, sorted
    pub fn keys(&self) -> Vec<String> {
        self.entries().into_iter().map(|(key, _)| key).collect()
    }

    /// Number of leaves
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    /// Whether the dictionary has no leaves
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dictionary {
        Dictionary::from_json_str(
            Locale::En,
            r#"{
                "nav": { "home": "Home", "jobs": "Jobs" },
                "auth": { "login": { "title": "Sign in" } },
                "greeting": "Hello, {name}!"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_resolve_leaf() {
        let dict = sample();
        assert_eq!(dict.resolve("nav.home"), Some("Home"));
        assert_eq!(dict.resolve("auth.login.title"), Some("Sign in"));
        assert_eq!(dict.resolve("greeting"), Some("Hello, {name}!"));
    }

    #[test]
    fn test_resolve_group_is_not_found() {
        let dict = sample();
        assert_eq!(dict.resolve("nav"), None);
        assert_eq!(dict.resolve("auth.login"), None);
    }

    #[test]
    fn test_resolve_through_leaf_is_not_found() {
        let dict = sample();
        assert_eq!(dict.resolve("nav.home.extra"), None);
        assert_eq!(dict.resolve("greeting.more"), None);
    }

    #[test]
    fn test_resolve_absent_or_malformed_keys() {
        let dict = sample();
        assert_eq!(dict.resolve("does.not.exist"), None);
        assert_eq!(dict.resolve(""), None);
        assert_eq!(dict.resolve("nav."), None);
        assert_eq!(dict.resolve(".nav.home"), None);
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let dict = sample();
        let first = dict.resolve("nav.jobs");
        for _ in 0..10 {
            assert_eq!(dict.resolve("nav.jobs"), first);
        }
    }

    #[test]
    fn test_keys_are_sorted_leaf_paths() {
        let dict = sample();
        assert_eq!(
            dict.keys(),
            vec!["auth.login.title", "greeting", "nav.home", "nav.jobs"]
        );
        assert_eq!(dict.len(), 4);
        assert!(!dict.is_empty());
        assert!(Dictionary::empty(Locale::De).is_empty());
    }

    #[test]
    fn test_non_string_leaves_are_rejected() {
        let err = Dictionary::from_json_str(Locale::De, r#"{ "nav": { "count": 3 } }"#).unwrap_err();
        match err {
            I18nError::InvalidDictionary { locale, reason } => {
                assert_eq!(locale, "de");
                assert!(reason.contains("nav.count"), "reason: {reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(Dictionary::from_json_str(Locale::De, r#"{ "list": ["a"] }"#).is_err());
        assert!(Dictionary::from_json_str(Locale::De, r#"{ "gone": null }"#).is_err());
        assert!(Dictionary::from_json_str(Locale::De, r#""just a string""#).is_err());
    }

    #[test]
    fn test_dotted_segments_are_rejected() {
        let err = Dictionary::from_json_str(Locale::En, r#"{ "nav.home": "Home" }"#).unwrap_err();
        assert!(matches!(err, I18nError::InvalidDictionary { .. }));
    }

    #[test]
    fn test_invalid_json_is_rejected() {
        assert!(Dictionary::from_json_str(Locale::En, "{ nav: }").is_err());
    }
}
