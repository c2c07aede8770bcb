//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/chronos/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/chronos/` (~/.config/chronos/)
//! - Data: `$XDG_DATA_HOME/chronos/` (~/.local/share/chronos/)
//! - State/Logs: `$XDG_STATE_HOME/chronos/` (~/.local/state/chronos/)

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Subjects offered when the config file does not list any.
pub const DEFAULT_SUBJECTS: [&str; 9] = [
    "國文", "英文", "數學", "社會", "自然", "藝術", "體育", "科技", "綜合活動",
];

/// Upper bound for the inactivity threshold and check interval (one day).
pub const MAX_INACTIVITY_SECS: u64 = 86_400;

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_DATA_HOME or ~/.local/share
fn xdg_data_home() -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/share"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Subject catalogue
    #[serde(default)]
    pub session: SessionConfig,

    /// Inactivity warning timing
    #[serde(default)]
    pub inactivity: InactivityConfig,

    /// Report export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Subject selection
#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    /// Subjects the observer can pick from
    #[serde(default = "default_subjects")]
    pub subjects: Vec<String>,

    /// Subject preselected at startup (defaults to the first entry)
    pub default_subject: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            subjects: default_subjects(),
            default_subject: None,
        }
    }
}

impl SessionConfig {
    /// Index into `subjects` of the preselected subject.
    pub fn default_subject_index(&self) -> usize {
        self.default_subject
            .as_ref()
            .and_then(|wanted| self.subjects.iter().position(|s| s == wanted))
            .unwrap_or(0)
    }
}

fn default_subjects() -> Vec<String> {
    DEFAULT_SUBJECTS.iter().map(|s| s.to_string()).collect()
}

/// Inactivity warning configuration
#[derive(Debug, Deserialize, Clone)]
pub struct InactivityConfig {
    /// Seconds without a logged event before the warning is raised
    #[serde(default = "default_threshold_secs")]
    pub threshold_secs: u64,

    /// How often the warning condition is evaluated
    #[serde(default = "default_check_interval_secs")]
    pub check_interval_secs: u64,
}

impl Default for InactivityConfig {
    fn default() -> Self {
        Self {
            threshold_secs: default_threshold_secs(),
            check_interval_secs: default_check_interval_secs(),
        }
    }
}

fn default_threshold_secs() -> u64 {
    300
}

fn default_check_interval_secs() -> u64 {
    10
}

/// Report export configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ExportConfig {
    /// Directory reports are saved into
    pub directory: Option<PathBuf>,
}

impl ExportConfig {
    /// Configured directory, else the user's Downloads folder, else
    /// `$XDG_DATA_HOME/chronos/reports`.
    pub fn resolved_directory(&self) -> PathBuf {
        self.directory
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| Config::data_dir().join("reports"))
    }
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of log files to keep
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    5
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Validate configuration, returning error message if invalid
    pub fn validate(&self) -> Result<()> {
        if self.session.subjects.is_empty() {
            return Err(Error::Config(
                "session.subjects must list at least one subject".to_string(),
            ));
        }
        if let Some(default) = &self.session.default_subject {
            if !self.session.subjects.contains(default) {
                return Err(Error::Config(format!(
                    "session.default_subject {:?} is not in session.subjects",
                    default
                )));
            }
        }
        if self.inactivity.threshold_secs == 0 {
            return Err(Error::Config(
                "inactivity.threshold_secs must be greater than 0".to_string(),
            ));
        }
        if self.inactivity.check_interval_secs == 0 {
            return Err(Error::Config(
                "inactivity.check_interval_secs must be greater than 0".to_string(),
            ));
        }
        for (key, value) in [
            ("threshold_secs", self.inactivity.threshold_secs),
            ("check_interval_secs", self.inactivity.check_interval_secs),
        ] {
            if value > MAX_INACTIVITY_SECS {
                return Err(Error::Config(format!(
                    "inactivity.{} must be at most {} (got {})",
                    key, MAX_INACTIVITY_SECS, value
                )));
            }
        }
        Ok(())
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/chronos/config.toml` (~/.config/chronos/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("chronos").join("config.toml")
    }

    /// Returns the data directory path
    ///
    /// `$XDG_DATA_HOME/chronos/` (~/.local/share/chronos/)
    pub fn data_dir() -> PathBuf {
        xdg_data_home().join("chronos")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/chronos/` (~/.local/state/chronos/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("chronos")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.session.subjects.len(), 9);
        assert_eq!(config.session.default_subject_index(), 0);
        assert_eq!(config.inactivity.threshold_secs, 300);
        assert_eq!(config.inactivity.check_interval_secs, 10);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[session]
subjects = ["數學", "自然"]
default_subject = "自然"

[inactivity]
threshold_secs = 120

[export]
directory = "/tmp/reports"

[logging]
level = "debug"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.session.subjects, vec!["數學", "自然"]);
        assert_eq!(config.session.default_subject_index(), 1);
        assert_eq!(config.inactivity.threshold_secs, 120);
        assert_eq!(config.inactivity.check_interval_secs, 10);
        assert_eq!(
            config.export.resolved_directory(),
            PathBuf::from("/tmp/reports")
        );
        assert_eq!(config.logging.level, "debug");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_empty_subjects() {
        let config: Config = toml::from_str("[session]\nsubjects = []\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_unknown_default_subject() {
        let toml = r#"
[session]
subjects = ["數學"]
default_subject = "音樂"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_validation_rejects_zero_intervals() {
        let config: Config = toml::from_str("[inactivity]\ncheck_interval_secs = 0\n").unwrap();
        assert!(config.validate().is_err());

        let config: Config = toml::from_str("[inactivity]\nthreshold_secs = 0\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_oversized_intervals() {
        let config: Config =
            toml::from_str("[inactivity]\nthreshold_secs = 10000000000000000\n").unwrap();
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("threshold_secs"), "unexpected error: {err}");

        let config: Config =
            toml::from_str("[inactivity]\ncheck_interval_secs = 9000000000000000\n").unwrap();
        assert!(config.validate().is_err());

        let config: Config = toml::from_str("[inactivity]\nthreshold_secs = 86400\n").unwrap();
        assert!(config.validate().is_ok());
    }
}
