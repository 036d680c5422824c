//! Validation utilities and regex patterns

use regex::Regex;
use std::sync::LazyLock;
use validator::ValidationError;

/// Regex pattern for cookie names (RFC 6265 token subset)
pub static COOKIE_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_\-.]+$").expect("Invalid cookie name regex pattern")
});

const LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Validate a log filter: comma separated `level` or `target=level` directives
pub fn validate_log_level(filter: &str) -> Result<(), ValidationError> {
    if filter.trim().is_empty() {
        return Err(ValidationError::new("empty_log_level"));
    }

    for directive in filter.split(',').map(str::trim) {
        let level = directive.rsplit('=').next().unwrap_or(directive);
        if !LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
            return Err(ValidationError::new("invalid_log_level"));
        }
    }

    Ok(())
}

/// Validate file path (basic check for valid path characters)
pub fn validate_file_path(path: &str) -> Result<(), ValidationError> {
    if path.is_empty() {
        return Err(ValidationError::new("empty_file_path"));
    }

    // Colon is allowed for Windows drive letters
    let invalid_chars = ['<', '>', '"', '|', '?', '*'];
    if path.chars().any(|c| invalid_chars.contains(&c)) {
        return Err(ValidationError::new("invalid_file_path_characters"));
    }

    Ok(())
}
