//! Build script for applytrack-i18n
//!
//! Validates every dictionary under `locales/` at compile time and generates
//! the `TranslationKey` enum from the shape of the default dictionary:
//! - every locale file must be a JSON object tree with string leaves
//! - no locale may define a key the default dictionary lacks
//! - every key must map to a unique Rust identifier
//!
//! Missing translations and placeholder mismatches only warn here; the
//! runtime falls back to the default locale and the test suite rejects them.

use std::collections::{BTreeMap, BTreeSet};
use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use serde_json::Value;

const DEFAULT_LOCALE: &str = "en";

/// Flatten a dictionary tree into dot-path keys and their templates
fn flatten(
    value: &Value,
    prefix: &str,
    out: &mut BTreeMap<String, String>,
) -> Result<(), String> {
    let Value::Object(map) = value else {
        return Err(format!("'{prefix}' must be a group"));
    };

    for (segment, child) in map {
        if segment.is_empty()
            || !segment
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(format!("Invalid key segment '{segment}' under '{prefix}'"));
        }

        let path = if prefix.is_empty() {
            segment.clone()
        } else {
            format!("{prefix}.{segment}")
        };

        match child {
            Value::String(template) => {
                out.insert(path, template.clone());
            }
            Value::Object(_) => flatten(child, &path, out)?,
            other => {
                return Err(format!(
                    "'{path}' must be a string or a group, found {}",
                    json_kind(other)
                ))
            }
        }
    }

    Ok(())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a group",
    }
}

/// Extract `{name}` placeholder names from a template
fn placeholders(template: &str) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        let name_len = after
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(after.len());
        if name_len > 0 && after[name_len..].starts_with('}') {
            names.insert(after[..name_len].to_string());
        }
        rest = after;
    }

    names
}

/// Map a dot-path key to a CamelCase enum variant name
fn variant_name(path: &str) -> String {
    let mut name: String = path
        .split(|c: char| c == '.' || c == '_' || c == '-')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let mut chars = segment.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_ascii_uppercase().to_string() + chars.as_str()
            })
        })
        .collect();

    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, 'K');
    }
    name
}

/// Validate and flatten a single locale file
fn load_locale_file(path: &Path) -> Result<BTreeMap<String, String>, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    let value: Value = serde_json::from_str(&content)
        .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))?;

    let mut entries = BTreeMap::new();
    flatten(&value, "", &mut entries).map_err(|e| format!("{}: {}", path.display(), e))?;
    Ok(entries)
}

/// Find all locale files, keyed by locale code
fn find_locale_files(locales_dir: &Path) -> Result<BTreeMap<String, PathBuf>, String> {
    if !locales_dir.exists() {
        return Err(format!(
            "Locales directory not found: {}",
            locales_dir.display()
        ));
    }

    let mut locale_files = BTreeMap::new();

    for entry in fs::read_dir(locales_dir)
        .map_err(|e| format!("Failed to read locales directory: {e}"))?
    {
        let entry = entry.map_err(|e| format!("Failed to read directory entry: {e}"))?;
        let path = entry.path();

        if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
            let code = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .ok_or_else(|| format!("Invalid locale file name: {}", path.display()))?;
            locale_files.insert(code.to_string(), path.clone());
        }
    }

    if !locale_files.contains_key(DEFAULT_LOCALE) {
        return Err(format!("Default locale file {DEFAULT_LOCALE}.json not found"));
    }

    Ok(locale_files)
}

/// Render the generated key enum
fn render_keys(reference: &BTreeMap<String, String>) -> Result<String, String> {
    let mut seen: BTreeMap<String, &str> = BTreeMap::new();
    for path in reference.keys() {
        let variant = variant_name(path);
        if let Some(previous) = seen.insert(variant.clone(), path) {
            return Err(format!(
                "Keys '{previous}' and '{path}' both map to variant {variant}"
            ));
        }
    }

    let mut out = String::new();
    let _ = writeln!(out, "// @generated by build.rs from locales/{DEFAULT_LOCALE}.json");
    out.push('\n');
    out.push_str("/// A translation key derived from the default dictionary.\n");
    out.push_str("#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]\n");
    out.push_str("pub enum TranslationKey {\n");
    for (path, template) in reference {
        let _ = writeln!(out, "    /// `{path}`: {template:?}");
        let _ = writeln!(out, "    {},", variant_name(path));
    }
    out.push_str("}\n\nimpl TranslationKey {\n");
    out.push_str("    /// Every key, sorted by dot-path.\n");
    out.push_str("    pub const ALL: &'static [Self] = &[\n");
    for path in reference.keys() {
        let _ = writeln!(out, "        Self::{},", variant_name(path));
    }
    out.push_str("    ];\n\n");
    out.push_str("    /// Dot-path form of the key.\n");
    out.push_str("    pub const fn as_str(self) -> &'static str {\n        match self {\n");
    for path in reference.keys() {
        let _ = writeln!(out, "            Self::{} => {:?},", variant_name(path), path);
    }
    out.push_str("        }\n    }\n}\n");

    Ok(out)
}

/// Main validation and generation function
fn generate() -> Result<(), String> {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").map_err(|_| "CARGO_MANIFEST_DIR not set")?;
    let out_dir = env::var("OUT_DIR").map_err(|_| "OUT_DIR not set")?;
    let locales_dir = Path::new(&manifest_dir).join("locales");

    println!("cargo:rerun-if-changed=locales");
    println!("cargo:rerun-if-changed=build.rs");

    let locale_files = find_locale_files(&locales_dir)?;
    let mut dictionaries = BTreeMap::new();
    let mut errors = Vec::new();

    for (code, path) in &locale_files {
        println!("cargo:rerun-if-changed={}", path.display());
        match load_locale_file(path) {
            Ok(entries) => {
                dictionaries.insert(code.clone(), entries);
            }
            Err(e) => errors.push(e),
        }
    }

    if !errors.is_empty() {
        return Err(format!("Validation errors:\n{}", errors.join("\n")));
    }

    let reference = &dictionaries[DEFAULT_LOCALE];

    for (code, entries) in &dictionaries {
        if code == DEFAULT_LOCALE {
            continue;
        }

        for key in entries.keys().filter(|key| !reference.contains_key(*key)) {
            errors.push(format!("{code}: Extra key '{key}' not present in {DEFAULT_LOCALE}"));
        }

        for (key, template) in reference {
            match entries.get(key) {
                None => println!("cargo:warning={code}: missing translation for '{key}'"),
                Some(translated) if placeholders(translated) != placeholders(template) => {
                    println!(
                        "cargo:warning={code}: placeholder mismatch for '{key}': expected {:?}, found {:?}",
                        placeholders(template),
                        placeholders(translated)
                    );
                }
                Some(_) => {}
            }
        }
    }

    if !errors.is_empty() {
        return Err(format!("Consistency errors:\n{}", errors.join("\n")));
    }

    let generated = render_keys(reference)?;
    fs::write(Path::new(&out_dir).join("keys.rs"), generated)
        .map_err(|e| format!("Failed to write generated keys: {e}"))?;

    Ok(())
}

fn main() {
    if let Err(e) = generate() {
        eprintln!("Locale validation failed:\n{e}");
        process::exit(1);
    }
}
