use crate::foundation::error::{AtlasError, AtlasResult};
use crate::oracle::Oracle;
use crate::oracle::config::OracleConfig;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

/// Oracle backed by an OpenAI-compatible chat-completions endpoint.
///
/// Each query is a single blocking POST carrying one user message. Failures are reported, never
/// retried.
pub struct OpenAiOracle {
    http: Client,
    config: OracleConfig,
}

impl OpenAiOracle {
    /// Build the HTTP client for `config`.
    pub fn new(config: OracleConfig) -> AtlasResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AtlasError::oracle(format!("build http client: {e}")))?;
        Ok(Self { http, config })
    }

    /// Build from environment variables (see [`OracleConfig::from_env`]).
    pub fn from_env() -> AtlasResult<Self> {
        Self::new(OracleConfig::from_env()?)
    }

    fn request_body<'a>(&'a self, prompt: &str) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt.to_string(),
            }],
            temperature: self.config.temperature,
        }
    }
}

impl Oracle for OpenAiOracle {
    #[tracing::instrument(skip(self, prompt), fields(model = %self.config.model))]
    fn query(&self, prompt: &str) -> AtlasResult<String> {
        let response = self
            .http
            .post(self.config.chat_url())
            .bearer_auth(&self.config.api_key)
            .json(&self.request_body(prompt))
            .send()
            .map_err(|e| AtlasError::oracle(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status, response.json::<ApiErrorResponse>().ok()));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .map_err(|e| AtlasError::oracle(format!("decode completion: {e}")))?;
        let text = completion_text(completion)?;
        tracing::debug!(bytes = text.len(), "oracle replied");
        Ok(text)
    }
}

fn status_error(status: StatusCode, body: Option<ApiErrorResponse>) -> AtlasError {
    match body {
        Some(body) => AtlasError::oracle(format!(
            "HTTP {status}: {} (type: {})",
            body.error.message,
            body.error.error_type.as_deref().unwrap_or("unknown")
        )),
        None => AtlasError::oracle(format!("HTTP {status}")),
    }
}

fn completion_text(completion: ChatCompletionResponse) -> AtlasResult<String> {
    completion
        .choices
        .into_iter()
        .find_map(|c| c.message.content)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or_else(|| AtlasError::oracle("empty completion"))
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
    #[serde(rename = "type")]
    error_type: Option<String>,
}

#[cfg(test)]
#[path = "../../tests/unit/oracle/openai.rs"]
mod tests;
