use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path of the itinerary JSON file. Relative paths resolve against the
    /// working directory.
    pub itinerary_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            itinerary_file: PathBuf::from("itinerary.json"),
        }
    }
}

/// AI advisor configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    /// Explicit API key. Takes precedence over environment variables.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Chat model name.
    pub model: String,
    /// Base URL of the OpenAI-compatible API.
    pub base_url: String,
    /// Token limit for itinerary generation.
    pub itinerary_max_tokens: u32,
    /// Token limit for budget tips.
    pub budget_tips_max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Send a small test request at startup to check the key.
    pub validate_on_startup: bool,
    /// Never contact the API; always use the offline templates.
    pub offline: bool,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gpt-3.5-turbo".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            itinerary_max_tokens: 1500,
            budget_tips_max_tokens: 1000,
            temperature: 0.7,
            timeout_secs: 60,
            validate_on_startup: true,
            offline: false,
        }
    }
}

impl AdvisorConfig {
    /// Environment variables searched for an API key, in order.
    pub const API_KEY_ENV_VARS: [&'static str; 4] =
        ["OPENAI_API_KEY", "api_key", "OPENAI_API", "OPENAI_KEY"];
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    pub level: String,
    /// Enable file logging with rotation.
    pub file_logging: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_logging: true,
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub advisor: AdvisorConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Create a new AppConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }
}
