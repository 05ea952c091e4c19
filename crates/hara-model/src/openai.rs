//! OpenAI-compatible chat-completions adapter.
//!
//! Works against api.openai.com or any endpoint speaking the same protocol
//! (local gateways, proxies); the base URL is configurable for that reason.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ModelError;
use crate::generator::{ChatMessage, ExpectedFormat, TextGenerator};

pub const OPENAI_AUTH_ENV_VAR: &str = "OPENAI_API_KEY";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Connection settings for an OpenAI-compatible endpoint.
#[derive(Clone, Debug)]
pub struct OpenAiConfig {
    pub model: String,
    pub base_url: String,
    pub api_key: String,
    /// Sampling temperature; assessments use a deterministic-ish default.
    pub temperature: f64,
}

impl OpenAiConfig {
    /// Config for the given model, taking the key from `OPENAI_API_KEY`.
    pub fn from_env(model: impl Into<String>) -> Result<Self, ModelError> {
        let api_key = std::env::var(OPENAI_AUTH_ENV_VAR).map_err(|_| {
            ModelError::MissingApiKey {
                env_var: OPENAI_AUTH_ENV_VAR,
            }
        })?;
        Ok(Self {
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            temperature: 0.2,
        })
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: String,
}

/// Reqwest-backed generator for OpenAI-compatible endpoints.
pub struct OpenAiGenerator {
    config: OpenAiConfig,
    client: reqwest::Client,
}

impl OpenAiGenerator {
    pub fn new(config: OpenAiConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn transport_error(&self, source: reqwest::Error) -> ModelError {
        ModelError::Transport {
            model: self.config.model.clone(),
            source,
        }
    }
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    async fn generate(
        &self,
        messages: &[ChatMessage],
        format: ExpectedFormat,
    ) -> Result<String, ModelError> {
        let request = CompletionRequest {
            model: &self.config.model,
            messages,
            temperature: self.config.temperature,
            response_format: match format {
                ExpectedFormat::Json => Some(ResponseFormat {
                    kind: "json_object",
                }),
                ExpectedFormat::Text => None,
            },
        };

        debug!(model = %self.config.model, messages = messages.len(), "requesting completion");
        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ModelError::Provider {
                model: self.config.model.clone(),
                status: status.as_u16(),
                message,
            });
        }

        let completion: CompletionResponse =
            response.json().await.map_err(|e| self.transport_error(e))?;
        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ModelError::EmptyResponse {
                model: self.config.model.clone(),
            })?;
        Ok(choice.message.content)
    }

    fn model_id(&self) -> &str {
        &self.config.model
    }
}
