//! Configuration management for Runlint.
//!
//! Handles loading rule levels and report defaults from TOML files. The
//! command line overrides anything set here.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::report::ReportFormat;
use crate::validator::RuleSet;

/// Application configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Per-rule levels
    pub rules: RuleSet,

    /// Report defaults
    pub report: ReportConfig,
}

/// Report defaults, overridable from the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Output format
    pub format: ReportFormat,

    /// Treat warning-severity violations as failures
    pub fail_on_warnings: bool,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Looks for config in:
    /// 1. `.runlint.toml` or `runlint.toml` in the current directory
    /// 2. `~/.config/runlint/config.toml`
    /// 3. Falls back to defaults
    pub fn load() -> anyhow::Result<Self> {
        if let Some(path) = Self::config_path() {
            return Self::load_from_file(&path);
        }
        Ok(Self::default())
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("cannot read config {}: {e}", path.display()))?;
        let config = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("invalid config {}: {e}", path.display()))?;
        Ok(config)
    }

    /// The config file the default lookup would use, if one exists.
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        for name in [".runlint.toml", "runlint.toml"] {
            let local = PathBuf::from(name);
            if local.exists() {
                return Some(local);
            }
        }
        if let Some(config_dir) = dirs::config_dir() {
            let global = config_dir.join("runlint").join("config.toml");
            if global.exists() {
                return Some(global);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::RuleLevel;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.report.format, ReportFormat::Text);
        assert!(!config.report.fail_on_warnings);
        assert_eq!(config.rules.missing_title, RuleLevel::Error);
    }

    #[test]
    fn test_config_deserialization() {
        let config: Config = toml::from_str(
            r#"
[rules]
step-index-gap = "warn"
empty-step-name = "off"

[report]
format = "json"
fail_on_warnings = true
"#,
        )
        .unwrap();
        assert_eq!(config.rules.step_index_gap, RuleLevel::Warn);
        assert_eq!(config.rules.empty_step_name, RuleLevel::Off);
        assert_eq!(config.report.format, ReportFormat::Json);
        assert!(config.report.fail_on_warnings);
    }

    #[test]
    fn test_config_serialization_round_trips() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_load_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("runlint.toml");
        std::fs::write(&path, "[rules]\nno-steps = \"warn\"\n").unwrap();
        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.rules.no_steps, RuleLevel::Warn);
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        assert!(Config::load_from_file(Path::new("/no/such/runlint.toml")).is_err());
    }
}
