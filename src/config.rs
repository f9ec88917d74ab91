//! Configuration file for xcstrings-tool.
//!
//! A config file supplies defaults for the `audit` and `export` commands so
//! CI jobs don't have to repeat them. Every field is optional; flags given
//! on the command line always win.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::is_locale_identifier;
use crate::gate;
use crate::report::OutputFormat;

/// Config file names searched for in the current directory.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["xcstrings-tool.yaml", ".xcstrings-tool.yaml"];

/// Target language used when neither the flag nor the config names one.
pub const DEFAULT_TARGET_LANGUAGE: &str = "es-MX";

/// Default cap on keys listed per section in console output.
pub const DEFAULT_CONSOLE_LIMIT: usize = 20;

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Language to audit (e.g. "de", "es-MX")
    #[serde(default)]
    pub target_language: Option<String>,
    /// Minimum completion percentage for `audit` to pass
    #[serde(default)]
    pub threshold: Option<f64>,
    /// Report formats: console, json, csv, markdown
    #[serde(default)]
    pub formats: Vec<String>,
    /// Directory report files are written to
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    /// Maximum keys listed per section in console output
    #[serde(default)]
    pub console_limit: Option<usize>,
}

impl Config {
    /// Parse a config from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Returns the target language (defaults to "es-MX").
    pub fn target_language(&self) -> &str {
        self.target_language
            .as_deref()
            .unwrap_or(DEFAULT_TARGET_LANGUAGE)
    }

    /// Returns the output directory (defaults to the current directory).
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Returns the configured formats (defaults to console only).
    pub fn formats(&self) -> anyhow::Result<Vec<OutputFormat>> {
        if self.formats.is_empty() {
            return Ok(vec![OutputFormat::Console]);
        }
        self.formats
            .iter()
            .map(|f| f.parse::<OutputFormat>().map_err(anyhow::Error::msg))
            .collect()
    }

    /// Returns the console listing limit (defaults to 20).
    pub fn console_limit(&self) -> usize {
        self.console_limit.unwrap_or(DEFAULT_CONSOLE_LIMIT)
    }
}

/// Find a config file in `dir`, if one exists.
pub fn discover(dir: &Path) -> Option<PathBuf> {
    DEFAULT_CONFIG_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Load the config at `path`, or the one discovered in the current
/// directory, or the defaults.
pub fn load(path: Option<&Path>) -> anyhow::Result<(Config, Option<PathBuf>)> {
    let path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => discover(Path::new(".")),
    };

    match path {
        Some(p) => {
            let config = Config::parse_file(&p)?;
            validate(&config).with_context(|| format!("invalid config {}", p.display()))?;
            Ok((config, Some(p)))
        }
        None => Ok((Config::default(), None)),
    }
}

/// Validate a config for correctness.
pub fn validate(config: &Config) -> anyhow::Result<()> {
    if let Some(language) = &config.target_language {
        if !is_locale_identifier(language) {
            anyhow::bail!("invalid target_language {:?}", language);
        }
    }

    if let Some(threshold) = config.threshold {
        gate::validate_threshold(threshold)?;
    }

    config.formats()?;

    if config.console_limit == Some(0) {
        anyhow::bail!("console_limit must be at least 1");
    }

    Ok(())
}

/// Default config written by `init`.
pub const TEMPLATE: &str = include_str!("templates/xcstrings-tool.yaml");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let yaml = r#"
target_language: "de"
threshold: 95
formats:
  - json
  - markdown
output_dir: "reports"
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.target_language(), "de");
        assert_eq!(config.threshold, Some(95.0));
        assert_eq!(
            config.formats().unwrap(),
            vec![OutputFormat::Json, OutputFormat::Markdown]
        );
        assert_eq!(config.output_dir(), PathBuf::from("reports"));
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.target_language(), DEFAULT_TARGET_LANGUAGE);
        assert_eq!(config.formats().unwrap(), vec![OutputFormat::Console]);
        assert_eq!(config.output_dir(), PathBuf::from("."));
        assert_eq!(config.console_limit(), DEFAULT_CONSOLE_LIMIT);
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = Config {
            threshold: Some(120.0),
            ..Default::default()
        };
        assert!(validate(&config).is_err());

        let config = Config {
            formats: vec!["xml".to_string()],
            ..Default::default()
        };
        assert!(validate(&config).is_err());

        let config = Config {
            target_language: Some("Spanish (Mexico)".to_string()),
            ..Default::default()
        };
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_template_is_valid() {
        let config: Config = serde_yaml::from_str(TEMPLATE).unwrap();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_discover() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover(dir.path()).is_none());

        std::fs::write(dir.path().join(".xcstrings-tool.yaml"), "threshold: 50\n").unwrap();
        let found = discover(dir.path()).unwrap();
        assert!(found.ends_with(".xcstrings-tool.yaml"));
    }
}
