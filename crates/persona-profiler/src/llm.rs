//! Client for an OpenAI-compatible chat-completions endpoint.

use std::time::Duration;

use persona_core::AppConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::ProfilerError;
use crate::prompt::SYSTEM_PROMPT;

/// Output budget requested for every persona generation.
pub const MAX_OUTPUT_TOKENS: u32 = 2000;
/// Low sampling temperature; consistency matters more than variety here.
pub const TEMPERATURE: f32 = 0.3;

/// Longest error-body excerpt kept in [`ProfilerError::Service`].
const ERROR_BODY_CHARS: usize = 300;

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

/// Chat-completions client holding the endpoint, credential and model.
pub struct GenerationClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl std::fmt::Debug for GenerationClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationClient")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"[redacted]")
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl GenerationClient {
    /// Creates a client posting to `<base_url>/chat/completions`.
    ///
    /// # Errors
    ///
    /// Returns [`ProfilerError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        base_url: &str,
        api_key: &str,
        model: &str,
        timeout_secs: u64,
    ) -> Result<Self, ProfilerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            api_key: api_key.to_owned(),
            model: model.to_owned(),
        })
    }

    /// Builds a client from `config`, or `None` when no API key is set.
    ///
    /// # Errors
    ///
    /// See [`GenerationClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Option<Self>, ProfilerError> {
        config
            .llm_api_key
            .as_deref()
            .map(|key| {
                Self::new(
                    &config.llm_base_url,
                    key,
                    &config.llm_model,
                    config.llm_timeout_secs,
                )
            })
            .transpose()
    }

    /// Sends `prompt` with the persona system message and returns the
    /// assistant's raw reply text.
    ///
    /// # Errors
    ///
    /// - [`ProfilerError::Http`] on network failure, timeout or an
    ///   undecodable response envelope.
    /// - [`ProfilerError::Service`] on any non-2xx status.
    /// - [`ProfilerError::MalformedReply`] if the envelope has no message
    ///   content.
    pub async fn complete(&self, prompt: &str) -> Result<String, ProfilerError> {
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: MAX_OUTPUT_TOKENS,
            temperature: TEMPERATURE,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ProfilerError::Service {
                status: status.as_u16(),
                body: text.chars().take(ERROR_BODY_CHARS).collect(),
            });
        }

        let reply: ChatResponse = response.json().await?;
        reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| ProfilerError::MalformedReply("reply has no message content".into()))
    }
}
