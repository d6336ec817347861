//! Configuration from environment variables (and `.env`), with defaults.

use std::env;
use std::str::FromStr;

use async_openai::config::OpenAIConfig;
use serde::Serialize;

use crate::core::api_key;
use crate::core::selection::{self, FileSelectionStore, ModelSource};

pub const DEFAULT_BASE_URL: &str = "https://api.aimlapi.com/v1";
pub const DEFAULT_MODEL: &str = "mistralai/Mistral-7B-Instruct-v0.2";
/// Word budget for the message context sent upstream.
pub const DEFAULT_CONTEXT_WORD_LIMIT: usize = 4096;
pub const DEFAULT_MAX_CONVERSATIONS: u32 = 100;

/// Fixed sampling configuration sent with every completion request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SamplingParams {
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub repetition_penalty: f32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            max_tokens: 100,
            temperature: 0.7,
            top_p: 0.9,
            top_k: 50,
            repetition_penalty: 1.1,
        }
    }
}

/// Settings that do not require credentials.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub base_url: String,
    pub sampling: SamplingParams,
    pub context_word_limit: usize,
    /// Maximum stored chat sessions; 0 keeps everything.
    pub max_conversations: u32,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub openai_config: OpenAIConfig,
    pub settings: Settings,
    pub model_id: String,
    pub model_source: ModelSource,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("AIML_API_KEY is not set (export it, add it to .env, or run `aiml-chat config set-api-key`)")]
    MissingApiKey,
    #[error("invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(var).filter(|v| !v.trim().is_empty()) {
        None => Ok(default),
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { var, value: v }),
    }
}

impl Settings {
    /// Build settings from a variable lookup (the process environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = SamplingParams::default();
        let base_url = lookup("AIML_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Ok(Self {
            base_url,
            sampling: SamplingParams {
                max_tokens: parse_var(&lookup, "AIML_MAX_TOKENS", defaults.max_tokens)?,
                temperature: parse_var(&lookup, "AIML_TEMPERATURE", defaults.temperature)?,
                ..defaults
            },
            context_word_limit: parse_var(
                &lookup,
                "AIML_CONTEXT_WORD_LIMIT",
                DEFAULT_CONTEXT_WORD_LIMIT,
            )?,
            max_conversations: parse_var(
                &lookup,
                "AIML_MAX_CONVERSATIONS",
                DEFAULT_MAX_CONVERSATIONS,
            )?,
        })
    }
}

/// Load settings from the environment.
pub fn settings() -> Result<Settings, ConfigError> {
    Settings::from_lookup(|k| env::var(k).ok())
}

/// Load the full configuration. Returns an error if no API key is available.
pub fn load() -> Result<Config, ConfigError> {
    let settings = settings()?;
    let api_key = env::var("AIML_API_KEY")
        .ok()
        .filter(|k| !k.trim().is_empty())
        .or_else(api_key::load_api_key)
        .ok_or(ConfigError::MissingApiKey)?;

    let (model_id, model_source) = selection::resolve_model(&FileSelectionStore::default());

    let openai_config = OpenAIConfig::new()
        .with_api_base(settings.base_url.clone())
        .with_api_key(api_key);

    Ok(Config {
        openai_config,
        settings,
        model_id,
        model_source,
    })
}
