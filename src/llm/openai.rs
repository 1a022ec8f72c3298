//! OpenAI-compatible chat-completions backend.

use crate::llm::client::{GenerationClient, GenerationRequest};
use crate::types::GenerationError;
use crate::utils::LlmConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Client for any OpenAI-compatible `/chat/completions` endpoint.
///
/// The credential carried by a [`GenerationRequest`] takes precedence over
/// the key this client was constructed with; if neither is present the call
/// fails before any network I/O.
pub struct OpenAiClient {
    http: reqwest::Client,
    api_base: String,
    model: String,
    default_key: Option<String>,
}

impl OpenAiClient {
    /// Create a client for the given endpoint and model.
    pub fn new(
        api_base: impl Into<String>,
        model: impl Into<String>,
        default_key: Option<String>,
    ) -> Self {
        let api_base = api_base.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            api_base,
            model: model.into(),
            default_key: default_key.filter(|k| !k.trim().is_empty()),
        }
    }

    /// Create a client from configuration.
    pub fn from_config(config: &LlmConfig) -> Self {
        Self::new(&config.api_base, &config.model, config.api_key.clone())
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<serde_json::Value>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[async_trait]
impl GenerationClient for OpenAiClient {
    async fn generate(&self, request: GenerationRequest)
        -> Result<String, GenerationError> {
        let key = request
            .credential
            .as_deref()
            .or(self.default_key.as_deref())
            .ok_or_else(|| {
                GenerationError::Auth("no API credential configured".to_string())
            })?;

        let response_format = request.schema.as_ref().map(|schema| {
            json!({
                "type": "json_schema",
                "json_schema": {
                    "name": "structured_output",
                    "strict": true,
                    "schema": schema,
                },
            })
        });

        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            response_format,
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.api_base))
            .bearer_auth(key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                GenerationError::Transport(format!("chat completion request failed: {e}"))
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(GenerationError::Auth(format!(
                "provider rejected the API credential ({status})"
            )));
        }
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(GenerationError::Transport(format!(
                "provider returned {status}: {detail}"
            )));
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            GenerationError::Transport(format!("malformed completion response: {e}"))
        })?;

        // A missing content field is an empty (not erroneous) completion.
        Ok(parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default())
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
