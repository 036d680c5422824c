//! `i18n-audit`: inspect and verify applytrack translation dictionaries.

mod report;

use anyhow::{anyhow, Context, Result};
use applytrack_common::{init_logging, AppError};
use applytrack_config::{Config, ConfigLoader};
use applytrack_i18n::{
    audit_store, DictionaryStore, FailurePolicy, Locale, LocaleDetector, Params, RequestSignals,
    TranslatorFactory,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "i18n-audit", version, about = "Audit and query applytrack translations")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Path to a YAML config file (defaults to APPLYTRACK_CONFIG_PATH or ./applytrack.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, overriding the configured level
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Read dictionaries from this directory instead of the embedded ones
    #[arg(long, global = true)]
    locales_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Compare every locale against the default dictionary
    Audit {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Translate one key
    Translate {
        /// Dot-path key, e.g. `dashboard.welcome`
        key: String,

        /// Target locale tag
        #[arg(short, long, default_value = "en")]
        locale: String,

        /// Interpolation parameter as `name=value`, repeatable
        #[arg(short, long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,

        /// Failure policy, overriding the configured mode
        #[arg(long)]
        mode: Option<String>,
    },
    /// List every key with its default template
    Keys {
        /// Truncate templates to this many characters
        #[arg(long, default_value_t = 60)]
        width: usize,
    },
    /// List supported locales
    Locales,
    /// Run locale detection over request signals
    Detect {
        /// Explicit locale override
        #[arg(long = "override")]
        override_tag: Option<String>,

        /// Raw Cookie header
        #[arg(long)]
        cookie: Option<String>,

        /// Raw Accept-Language header
        #[arg(long)]
        accept_language: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .filter(|(name, _)| !name.is_empty())
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected name=value, got '{raw}'"))
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => ConfigLoader::load_config(path)
            .map_err(AppError::from)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => ConfigLoader::load().map_err(AppError::from)?,
    };

    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    Ok(config)
}

fn load_store(locales_dir: Option<&PathBuf>) -> Result<Arc<DictionaryStore>> {
    match locales_dir {
        Some(dir) => {
            let store = DictionaryStore::load_dir(dir)
                .map_err(AppError::from)
                .with_context(|| format!("failed to load dictionaries from {}", dir.display()))?;
            Ok(Arc::new(store))
        }
        None => Ok(DictionaryStore::builtin()),
    }
}

/// Execute the command; `Ok(false)` means the dictionaries drifted
fn run(cli: Cli, config: &Config) -> Result<bool> {
    let store = load_store(cli.locales_dir.as_ref())?;

    match cli.command {
        Command::Audit { format } => {
            let report = audit_store(&store);
            match format {
                OutputFormat::Text => print!("{}", report::render_audit(&report)),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            }
            info!(clean = report.is_clean(), "Audit finished");
            Ok(report.is_clean())
        }
        Command::Translate {
            key,
            locale,
            params,
            mode,
        } => {
            let locale: Locale = locale.parse().map_err(AppError::from)?;
            let policy = match mode {
                Some(mode) => mode.parse::<FailurePolicy>().map_err(|e| anyhow!(e))?,
                None => config.i18n.mode,
            };
            let params: Params = params.into_iter().collect();
            debug!(%locale, %policy, "Translating {}", key);

            let translation = TranslatorFactory::new(store, policy)
                .for_locale(locale)
                .resolve(&key, Some(&params))
                .map_err(AppError::from)?;
            println!("{}", translation.text);
            info!(origin = ?translation.origin, "Translated {}", key);
            Ok(true)
        }
        Command::Keys { width } => {
            print!("{}", report::render_keys(store.default_dictionary(), width));
            Ok(true)
        }
        Command::Locales => {
            print!("{}", report::render_locales(&store));
            Ok(true)
        }
        Command::Detect {
            override_tag,
            cookie,
            accept_language,
        } => {
            let detection = LocaleDetector::from_settings(&config.i18n).detect_request(&RequestSignals {
                override_tag: override_tag.as_deref(),
                cookie_header: cookie.as_deref(),
                accept_language: accept_language.as_deref(),
            });
            println!("{} ({})", detection.locale, detection.source);
            Ok(true)
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_logging(&config.logging.to_logging_config())?;

    if run(cli, &config)? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_param() {
        assert_eq!(
            parse_param("name=Ada Lovelace").unwrap(),
            ("name".to_string(), "Ada Lovelace".to_string())
        );
        assert_eq!(parse_param("expr=a=b").unwrap().1, "a=b");
        assert!(parse_param("novalue").is_err());
        assert!(parse_param("=x").is_err());
    }

    #[test]
    fn test_translate_arguments() {
        let cli = Cli::parse_from([
            "i18n-audit",
            "translate",
            "dashboard.welcome",
            "--locale",
            "de-AT",
            "-p",
            "name=Ada",
        ]);
        match cli.command {
            Command::Translate { key, locale, params, mode } => {
                assert_eq!(key, "dashboard.welcome");
                assert_eq!(locale, "de-AT");
                assert_eq!(params, vec![("name".to_string(), "Ada".to_string())]);
                assert!(mode.is_none());
            }
            _ => panic!("expected translate"),
        }
    }

    #[test]
    fn test_run_audit_on_embedded_store() {
        let cli = Cli::parse_from(["i18n-audit", "audit"]);
        assert!(run(cli, &Config::default()).unwrap());
    }

    #[test]
    fn test_run_audit_reports_drift() {
        let dir = tempfile::tempdir().unwrap();
        for locale in Locale::ALL {
            let json = if locale == Locale::Fr {
                r#"{ "nav": { "home": "Accueil", "extra": "En trop" } }"#
            } else {
                r#"{ "nav": { "home": "Home" } }"#
            };
            std::fs::write(dir.path().join(format!("{}.json", locale.code())), json).unwrap();
        }

        let dir_arg = dir.path().to_string_lossy().to_string();
        let cli = Cli::parse_from(["i18n-audit", "--locales-dir", dir_arg.as_str(), "audit"]);
        assert!(!run(cli, &Config::default()).unwrap());
    }

    #[test]
    fn test_run_locales() {
        let cli = Cli::parse_from(["i18n-audit", "locales"]);
        assert!(matches!(cli.command, Command::Locales));
        assert!(run(cli, &Config::default()).unwrap());
    }

    #[test]
    fn test_run_translate_rejects_unknown_locale() {
        let cli = Cli::parse_from(["i18n-audit", "translate", "nav.home", "--locale", "xx"]);
        assert!(run(cli, &Config::default()).is_err());
    }

    #[test]
    fn test_run_translate_strict_missing_key_fails() {
        let cli = Cli::parse_from(["i18n-audit", "translate", "nav.nowhere", "--mode", "strict"]);
        assert!(run(cli, &Config::default()).is_err());
    }
}
