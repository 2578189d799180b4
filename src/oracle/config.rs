use crate::foundation::error::{AtlasError, AtlasResult};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const CHAT_PATH: &str = "/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Live oracle configuration, sourced from the environment.
#[derive(Debug, Clone)]
pub struct OracleConfig {
    /// Bearer token (`OPENAI_API_KEY`).
    pub api_key: String,
    /// API root (`OPENAI_BASE_URL`).
    pub base_url: String,
    /// Chat model name (`OPENAI_MODEL`).
    pub model: String,
    /// Sampling temperature (`OPENAI_TEMPERATURE`); provider default when unset.
    pub temperature: Option<f32>,
    /// Whole-request timeout (`OPENAI_TIMEOUT_SECS`).
    pub timeout: Duration,
}

impl OracleConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> AtlasResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AtlasResult<Self> {
        let api_key = lookup("OPENAI_API_KEY")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AtlasError::validation("OPENAI_API_KEY is not set"))?;

        let base_url = lookup("OPENAI_BASE_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let model = lookup("OPENAI_MODEL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let temperature = lookup("OPENAI_TEMPERATURE")
            .and_then(|v| v.trim().parse::<f32>().ok())
            .filter(|v| v.is_finite() && *v >= 0.0);

        let timeout = lookup("OPENAI_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|v| *v > 0)
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        Ok(Self {
            api_key,
            base_url,
            model,
            temperature,
            timeout,
        })
    }

    /// Full chat-completions endpoint URL.
    pub fn chat_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), CHAT_PATH)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/oracle/config.rs"]
mod tests;
