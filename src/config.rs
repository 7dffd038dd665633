use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_SIGN_IN_DELAY_MS,
};
use crate::reply::Tone;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable not set. Export it or add it to a .env file.")]
    MissingApiKey(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    /// Desktop notification settings
    #[serde(default)]
    pub notifications: NotificationConfig,
}

/// Generative Language API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    #[serde(default = "default_model")]
    pub model: String,
    /// API root, without the `/models/...` suffix
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Name of the environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub keybinding_mode: KeybindingMode,
    #[serde(default)]
    pub theme: ThemeVariant,
    /// Tone selected when the composer opens
    #[serde(default)]
    pub default_tone: Tone,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum KeybindingMode {
    #[default]
    Vim,
    Arrows,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeVariant {
    #[default]
    Dark,
    #[serde(rename = "high-contrast")]
    HighContrast,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Simulated latency of the mock sign-in
    #[serde(default = "default_sign_in_delay_ms")]
    pub sign_in_delay_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            sign_in_delay_ms: default_sign_in_delay_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Notify when a reply finishes generating
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Include the start of the reply in the notification
    #[serde(default = "default_true")]
    pub show_preview: bool,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            show_preview: true,
        }
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

fn default_sign_in_delay_ms() -> u64 {
    DEFAULT_SIGN_IN_DELAY_MS
}

fn default_true() -> bool {
    true
}

impl Config {
    pub fn config_dir() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("quickreply");
        Ok(dir)
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load the config file, falling back to defaults when it does not exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn ensure_dirs(&self) -> Result<()> {
        fs::create_dir_all(Self::config_dir()?)?;
        Ok(())
    }

    /// Read the API key from the environment
    pub fn api_key(&self) -> Result<String, ConfigError> {
        self.api_key_from(|name| std::env::var(name).ok())
    }

    fn api_key_from(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<String, ConfigError> {
        let name = &self.ai.api_key_env;
        lookup(name)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ConfigError::MissingApiKey(name.clone()))
    }
}
