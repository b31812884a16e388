//! Configuration management

use crate::error::{Result, TierSearchError};
use crate::search::{AcceptanceHeuristic, ModelBindings};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable holding the API credential
pub const API_KEY_ENV: &str = "PERPLEXITY_API_KEY";

/// Default upper bound on output tokens per completion
pub const DEFAULT_MAX_TOKENS: u32 = 4000;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Completion service configuration
    #[serde(default)]
    pub service: ServiceConfig,

    /// Weak-answer thresholds used when deciding to escalate
    #[serde(default)]
    pub acceptance: AcceptanceHeuristic,
}

/// Hosted completion service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the completion API
    #[serde(default = "default_url")]
    pub url: String,

    /// API key, required before serving
    #[serde(default = "default_api_key")]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Output token cap per completion
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Model used at each complexity tier
    #[serde(default)]
    pub models: ModelBindings,
}

impl ServiceConfig {
    /// The API key, or a configuration error if none is set
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                TierSearchError::Config(format!(
                    "{} is not set (export it or add service.api_key to the config file)",
                    API_KEY_ENV
                ))
            })
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            api_key: default_api_key(),
            timeout_secs: default_timeout(),
            max_tokens: default_max_tokens(),
            models: ModelBindings::default(),
        }
    }
}

fn default_url() -> String {
    std::env::var("TIERSEARCH_API_URL").unwrap_or_else(|_| "https://api.perplexity.ai".to_string())
}

fn default_api_key() -> Option<String> {
    std::env::var(API_KEY_ENV).ok()
}

fn default_timeout() -> u64 {
    std::env::var("TIERSEARCH_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(120)
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

impl Config {
    /// Load config from default path, falling back to defaults if absent
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Config::default())
        }
    }

    /// Load config from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TierSearchError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(crate::CONFIG_DIR_NAME)
            .join("config.yml")
    }
}
