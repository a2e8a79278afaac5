use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable that points at an alternative settings file
pub const CONFIG_ENV: &str = "CHAINLINK_HOOKS_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid JSON in hook config: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Config directory not found")]
    DirectoryNotFound,

    #[error("Invalid config value: {0}")]
    InvalidValue(String),

    #[error("{} already exists (use --force to overwrite)", .0.display())]
    AlreadyExists(PathBuf),
}

/// User-level settings for the hook binary
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct HookSettings {
    #[serde(default)]
    pub tracker: TrackerSettings,
    #[serde(default)]
    pub audit: AuditSettings,
}

/// How to ask the tracker whether an item is being worked
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct TrackerSettings {
    pub program: String,
    pub status_args: Vec<String>,
    pub timeout_seconds: u64,
    pub active_marker: String,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            program: "chainlink".to_string(),
            status_args: vec!["session".to_string(), "status".to_string()],
            timeout_seconds: 3,
            active_marker: "Working on: #".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct AuditSettings {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl HookSettings {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        let home = std::env::var("HOME").map_err(|_| ConfigError::DirectoryNotFound)?;
        Ok(PathBuf::from(home).join(".config").join("chainlink-hooks"))
    }

    /// Get the config file path, honoring `CHAINLINK_HOOKS_CONFIG`
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            if !path.is_empty() {
                return Ok(PathBuf::from(path));
            }
        }
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load settings from the default location
    ///
    /// A missing file yields the defaults; a present but broken file is an error.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load settings from a specific file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let settings: HookSettings = toml::from_str(&contents)?;

        settings.validate()?;

        Ok(settings)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "using default hook settings");
            Self::default()
        })
    }

    /// Path of the audit log: explicit setting or `<config_dir>/audit.log`
    pub fn audit_log_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.audit.path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::config_dir()?.join("audit.log")),
        }
    }

    /// Validate configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        if self.tracker.program.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "tracker.program must not be empty".to_string(),
            ));
        }

        if self.tracker.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue(
                "tracker.timeout_seconds must be greater than 0".to_string(),
            ));
        }

        if self.tracker.active_marker.is_empty() {
            return Err(ConfigError::InvalidValue(
                "tracker.active_marker must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
