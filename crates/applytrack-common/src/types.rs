//! Common type definitions shared across the workspace.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How translation defects (missing keys, missing parameters) are handled.
///
/// The policy is chosen once at startup and injected into every translator,
/// so both branches can be exercised deterministically in tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Defects abort the lookup with a descriptive error.
    Strict,
    /// Defects are logged and a visible fallback string is returned.
    #[default]
    Lenient,
}

impl FailurePolicy {
    /// Policy matching the current build profile: strict with debug
    /// assertions, lenient otherwise.
    pub const fn for_build() -> Self {
        if cfg!(debug_assertions) {
            Self::Strict
        } else {
            Self::Lenient
        }
    }

    /// Whether defects are fatal under this policy.
    pub const fn is_strict(self) -> bool {
        matches!(self, Self::Strict)
    }

    /// Lowercase name as used in configuration files.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Lenient => "lenient",
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" | "development" | "dev" => Ok(Self::Strict),
            "lenient" | "production" | "prod" => Ok(Self::Lenient),
            other => Err(format!("unknown failure policy '{other}'")),
        }
    }
}
