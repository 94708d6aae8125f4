//! Configuration loading, validation, and management for benchhand.
//!
//! Loads configuration from `~/.benchhand/config.toml` with environment
//! variable overrides. Validates all settings at startup; a bad config is
//! fatal before the session starts, never mid-session.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.benchhand/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// API key for the completion service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Base URL of the OpenAI-compatible endpoint
    #[serde(default = "default_base_url")]
    pub api_base_url: String,

    /// Model identifier sent with every completion request
    #[serde(default = "default_model")]
    pub model: String,

    /// Skip the interactive confirmation gate before running tools
    #[serde(default)]
    pub auto_confirm: bool,

    /// Workspace root; tools, memory, and the run log live under it.
    /// Defaults to `~/.benchhand/workspace` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_dir: Option<PathBuf>,

    /// Sliding-window cap on retained transcript turns
    #[serde(default = "default_history_max_turns")]
    pub history_max_turns: usize,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".into()
}
fn default_model() -> String {
    "gpt-4o".into()
}
fn default_history_max_turns() -> usize {
    40
}

/// Redact a secret for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("api_base_url", &self.api_base_url)
            .field("model", &self.model)
            .field("auto_confirm", &self.auto_confirm)
            .field("workspace_dir", &self.workspace_dir)
            .field("history_max_turns", &self.history_max_turns)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.benchhand/config.toml).
    ///
    /// Environment variables override file values:
    /// - `BENCHHAND_API_KEY` (falling back to `OPENAI_API_KEY`)
    /// - `BENCHHAND_MODEL`
    /// - `BENCHHAND_BASE_URL`
    /// - `BENCHHAND_AUTO_CONFIRM`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        if config.api_key.is_none() {
            config.api_key = std::env::var("BENCHHAND_API_KEY")
                .ok()
                .or_else(|| std::env::var("OPENAI_API_KEY").ok());
        }

        if let Ok(model) = std::env::var("BENCHHAND_MODEL") {
            config.model = model;
        }

        if let Ok(url) = std::env::var("BENCHHAND_BASE_URL") {
            config.api_base_url = url;
        }

        if let Ok(flag) = std::env::var("BENCHHAND_AUTO_CONFIRM") {
            config.auto_confirm = flag == "1" || flag.eq_ignore_ascii_case("true");
        }

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
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
        dirs_home().join(".benchhand")
    }

    /// Effective workspace root (configured, or ~/.benchhand/workspace).
    pub fn workspace_root(&self) -> PathBuf {
        self.workspace_dir
            .clone()
            .unwrap_or_else(|| Self::config_dir().join("workspace"))
    }

    /// Directory holding tool artifacts and their declarations.
    pub fn tools_dir(&self) -> PathBuf {
        self.workspace_root().join("tools")
    }

    /// Directory holding advisory memory snippets.
    pub fn memory_dir(&self) -> PathBuf {
        self.workspace_root().join("memory")
    }

    /// Path of the append-only run log.
    pub fn runlog_path(&self) -> PathBuf {
        self.workspace_root().join("runlog.jsonl")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "model must not be empty".into(),
            ));
        }

        if self.history_max_turns == 0 {
            return Err(ConfigError::ValidationError(
                "history_max_turns must be at least 1".into(),
            ));
        }

        Ok(())
    }

    /// Check if an API key is available (from config or environment).
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Generate a default config TOML string (for the `onboard` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: default_base_url(),
            model: default_model(),
            auto_confirm: false,
            workspace_dir: None,
            history_max_turns: default_history_max_turns(),
        }
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
