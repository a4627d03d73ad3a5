//! Configuration loading and validation for ruleclaw.
//!
//! Loads configuration from `~/.ruleclaw/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default per-turn responder step budget.
pub const DEFAULT_STEP_LIMIT: u32 = 6;

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// The root configuration structure.
///
/// Maps directly to `~/.ruleclaw/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Agent loop settings
    #[serde(default)]
    pub agent: AgentSettings,

    /// Interactive terminal settings
    #[serde(default)]
    pub cli: CliSettings,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSettings {
    /// Maximum responder steps per user turn
    #[serde(default = "default_step_limit")]
    pub step_limit: u32,

    /// Append a notice when a turn stops on the step limit with tool calls pending
    #[serde(default = "default_true")]
    pub step_limit_notice: bool,
}

fn default_step_limit() -> u32 {
    DEFAULT_STEP_LIMIT
}
fn default_true() -> bool {
    true
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            step_limit: default_step_limit(),
            step_limit_notice: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliSettings {
    #[serde(default = "default_prompt")]
    pub prompt: String,

    #[serde(default = "default_true")]
    pub show_banner: bool,
}

fn default_prompt() -> String {
    "You: ".into()
}

impl Default for CliSettings {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            show_banner: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// One of error, warn, info, debug, trace
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "warn".into()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.ruleclaw/config.toml).
    ///
    /// Environment overrides (highest priority):
    /// - `RULECLAW_STEP_LIMIT`
    /// - `RULECLAW_LOG`
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_env(&Self::config_path(), |key| std::env::var(key).ok())
    }

    /// Load from `path`, then apply overrides resolved through `env`.
    pub fn load_with_env(
        path: &Path,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::load_from(path)?;

        if let Some(raw) = env("RULECLAW_STEP_LIMIT") {
            config.agent.step_limit = raw.trim().parse().map_err(|_| {
                ConfigError::ValidationError(format!("RULECLAW_STEP_LIMIT must be a positive integer, got '{raw}'"))
            })?;
        }

        if let Some(level) = env("RULECLAW_LOG") {
            config.logging.level = level.trim().to_lowercase();
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".ruleclaw")
    }

    /// Path of the default config file.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.agent.step_limit == 0 {
            return Err(ConfigError::ValidationError(
                "agent.step_limit must be at least 1".into(),
            ));
        }

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "logging.level must be one of {}, got '{}'",
                LOG_LEVELS.join(", "),
                self.logging.level
            )));
        }

        Ok(())
    }

    /// Render this configuration as TOML.
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        Self::default().to_toml()
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
