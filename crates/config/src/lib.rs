//! Configuration loading, validation, and management for Parley.
//!
//! Loads configuration from `~/.parley/config.toml` (or an explicit path)
//! with environment variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.parley/config.toml`.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// DeepL translation API
    #[serde(default)]
    pub deepl: DeepLConfig,

    /// Ollama inference endpoint
    #[serde(default)]
    pub ollama: OllamaConfig,

    /// Approved vocabulary and conversation memory
    #[serde(default)]
    pub tutor: TutorConfig,
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("gateway", &self.gateway)
            .field("deepl", &self.deepl)
            .field("ollama", &self.ollama)
            .field("tutor", &self.tutor)
            .finish()
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    /// Allow cross-origin requests (the page may be served by a dev server)
    #[serde(default = "default_true")]
    pub cors_permissive: bool,

    /// Request body limit in bytes
    #[serde(default = "default_body_limit")]
    pub body_limit: usize,
}

fn default_port() -> u16 {
    3001
}
fn default_host() -> String {
    "127.0.0.1".into()
}
fn default_body_limit() -> usize {
    64 * 1024
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            cors_permissive: true,
            body_limit: default_body_limit(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct DeepLConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_deepl_url")]
    pub api_url: String,

    #[serde(default = "default_deepl_timeout")]
    pub timeout_secs: u64,
}

fn default_deepl_url() -> String {
    "https://api-free.deepl.com/v2/translate".into()
}
fn default_deepl_timeout() -> u64 {
    10
}

impl Default for DeepLConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: default_deepl_url(),
            timeout_secs: default_deepl_timeout(),
        }
    }
}

impl std::fmt::Debug for DeepLConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeepLConfig")
            .field("api_key", &redact(&self.api_key))
            .field("api_url", &self.api_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    #[serde(default = "default_ollama_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_ollama_timeout")]
    pub timeout_secs: u64,

    /// Maximum tokens to generate
    #[serde(default = "default_num_predict")]
    pub num_predict: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_top_p")]
    pub top_p: f32,

    /// Context window size in tokens
    #[serde(default = "default_num_ctx")]
    pub num_ctx: u32,
}

fn default_ollama_url() -> String {
    "http://localhost:11434".into()
}
fn default_model() -> String {
    "qwen3:1.7b".into()
}
fn default_ollama_timeout() -> u64 {
    120
}
fn default_num_predict() -> u32 {
    512
}
fn default_temperature() -> f32 {
    0.3
}
fn default_top_p() -> f32 {
    0.9
}
fn default_num_ctx() -> u32 {
    8192
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: default_ollama_url(),
            model: default_model(),
            timeout_secs: default_ollama_timeout(),
            num_predict: default_num_predict(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            num_ctx: default_num_ctx(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TutorConfig {
    /// JSON file of shape `{"words": [...]}`
    #[serde(default = "default_vocabulary_path")]
    pub vocabulary_path: PathBuf,

    /// Entries kept in the rolling conversation history
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,

    /// Trailing history entries quoted in each prompt
    #[serde(default = "default_history_window")]
    pub history_window: usize,
}

fn default_vocabulary_path() -> PathBuf {
    PathBuf::from("data/approvedWords.json")
}
fn default_history_capacity() -> usize {
    12
}
fn default_history_window() -> usize {
    6
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            vocabulary_path: default_vocabulary_path(),
            history_capacity: default_history_capacity(),
            history_window: default_history_window(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `path`, then apply environment overrides:
    /// - `DEEPL_API_KEY`
    /// - `PARLEY_OLLAMA_URL`
    /// - `PARLEY_MODEL`
    /// - `PARLEY_PORT`
    pub fn load_with_overrides(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load_from(path)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
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

    /// Apply overrides from an environment lookup (injectable for tests).
    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(key) = var("DEEPL_API_KEY").filter(|k| !k.trim().is_empty()) {
            self.deepl.api_key = Some(key);
        }

        if let Some(url) = var("PARLEY_OLLAMA_URL") {
            self.ollama.base_url = url;
        }

        if let Some(model) = var("PARLEY_MODEL") {
            self.ollama.model = model;
        }

        if let Some(port) = var("PARLEY_PORT") {
            self.gateway.port = port.parse().map_err(|_| {
                ConfigError::ValidationError(format!("PARLEY_PORT is not a valid port: {port}"))
            })?;
        }

        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".parley")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=2.0).contains(&self.ollama.temperature) {
            return Err(ConfigError::ValidationError(
                "ollama.temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if self.ollama.top_p <= 0.0 || self.ollama.top_p > 1.0 {
            return Err(ConfigError::ValidationError(
                "ollama.top_p must be in (0.0, 1.0]".into(),
            ));
        }

        if self.deepl.timeout_secs == 0 || self.ollama.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "timeouts must be greater than zero".into(),
            ));
        }

        if self.tutor.history_capacity < 2 {
            return Err(ConfigError::ValidationError(
                "tutor.history_capacity must hold at least one exchange (2)".into(),
            ));
        }

        if self.tutor.history_window > self.tutor.history_capacity {
            return Err(ConfigError::ValidationError(
                "tutor.history_window must not exceed tutor.history_capacity".into(),
            ));
        }

        Ok(())
    }

    /// Check if a DeepL key is available (from config or environment).
    pub fn has_deepl_key(&self) -> bool {
        self.deepl.api_key.is_some()
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
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
