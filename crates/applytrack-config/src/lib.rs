//! # applytrack Config
//!
//! Type-safe configuration management for applytrack.
//!
//! This crate provides the configuration schema, defaults, YAML loading with
//! environment variable overrides, and validation.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod loader;
pub mod settings;
pub mod validation;

pub use loader::{ConfigError, ConfigLoader};
pub use settings::{Config, I18nSettings, LoggingSettings};
