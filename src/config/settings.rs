//! User settings for FinanzCLI
//!
//! Manages the backend URL, the offline fallback policy and the AI
//! completion settings. API keys are read from the environment and never
//! written to the settings file.

use std::fmt;
use std::str::FromStr;

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::paths::FinanzPaths;
use crate::error::FinanzError;
use crate::storage::file_io::write_json_atomic;

/// Environment variable that overrides the configured backend URL
pub const API_URL_ENV: &str = "FINANZ_API_URL";

/// Environment variable checked before `AiSettings::api_key_env`
pub const AI_KEY_ENV: &str = "FINANZ_OPENAI_API_KEY";

/// What to do when the backend cannot be reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FallbackMode {
    /// Surface every error
    Off,
    /// Substitute mock records for list lookups (categories, currencies,
    /// payment methods)
    #[default]
    ReadOnly,
    /// Read-only fallback plus simulated writes for payment methods and
    /// transactions
    Simulate,
}

impl FallbackMode {
    /// Whether read-type calls may be answered with mock data
    pub fn allows_mock_reads(&self) -> bool {
        !matches!(self, Self::Off)
    }

    /// Whether writes may be answered with simulated records
    pub fn is_simulated(&self) -> bool {
        matches!(self, Self::Simulate)
    }
}

impl fmt::Display for FallbackMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Off => write!(f, "off"),
            Self::ReadOnly => write!(f, "read_only"),
            Self::Simulate => write!(f, "simulate"),
        }
    }
}

impl FromStr for FallbackMode {
    type Err = FinanzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "off" | "none" => Ok(Self::Off),
            "read_only" | "readonly" | "mock" => Ok(Self::ReadOnly),
            "simulate" | "simulated" => Ok(Self::Simulate),
            other => Err(FinanzError::Validation(format!(
                "Unknown fallback mode '{}'. Use off, read-only or simulate",
                other
            ))),
        }
    }
}

/// Settings for the hosted completion API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiSettings {
    /// Base URL of the OpenAI-compatible API
    #[serde(default = "default_ai_base_url")]
    pub base_url: String,

    /// Chat completion model
    #[serde(default = "default_ai_model")]
    pub model: String,

    /// Speech-to-text model
    #[serde(default = "default_transcription_model")]
    pub transcription_model: String,

    /// Fixed language passed to the speech-to-text call
    #[serde(default = "default_transcription_language")]
    pub transcription_language: String,

    /// Detail level for image inputs ("low", "high", "auto")
    #[serde(default = "default_image_detail")]
    pub image_detail: String,

    /// Completion token limit for image requests
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature for text requests
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Name of the environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_ai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_ai_model() -> String {
    "gpt-4o".to_string()
}

fn default_transcription_model() -> String {
    "whisper-1".to_string()
}

fn default_transcription_language() -> String {
    "es".to_string()
}

fn default_image_detail() -> String {
    "low".to_string()
}

fn default_max_tokens() -> u32 {
    2048
}

fn default_temperature() -> f32 {
    1.0
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            base_url: default_ai_base_url(),
            model: default_ai_model(),
            transcription_model: default_transcription_model(),
            transcription_language: default_transcription_language(),
            image_detail: default_image_detail(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            api_key_env: default_api_key_env(),
        }
    }
}

impl AiSettings {
    /// Resolve the API key from the environment
    pub fn api_key(&self) -> Option<String> {
        [AI_KEY_ENV, self.api_key_env.as_str()]
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .map(|key| key.trim().to_string())
            .find(|key| !key.is_empty())
    }
}

/// User settings for FinanzCLI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Base URL of the FinanzApp backend
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Offline fallback policy
    #[serde(default)]
    pub fallback: FallbackMode,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,

    /// AI completion settings
    #[serde(default)]
    pub ai: AiSettings,

    /// Default currency symbol for display
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_api_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_currency() -> String {
    "$".to_string()
}

/// Date pattern used when the configured one is unusable
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

/// Whether chrono understands every specifier in `format`
pub fn is_valid_date_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            api_url: default_api_url(),
            fallback: FallbackMode::default(),
            request_timeout_secs: default_timeout(),
            ai: AiSettings::default(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &FinanzPaths) -> Result<Self, FinanzError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| FinanzError::Io(format!("Failed to read settings file: {}", e)))?;

            let mut settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                FinanzError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            if !is_valid_date_format(&settings.date_format) {
                warn!(
                    date_format = %settings.date_format,
                    "invalid date format in settings, using the default"
                );
                settings.date_format = default_date_format();
            }

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FinanzPaths) -> Result<(), FinanzError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }

    /// The backend URL after applying the `FINANZ_API_URL` override
    pub fn effective_api_url(&self) -> String {
        std::env::var(API_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| self.api_url.clone())
            .trim_end_matches('/')
            .to_string()
    }
}
