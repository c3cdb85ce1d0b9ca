//! LLM client: the single point of entry for all generative API calls in Blogforge.
//!
//! ARCHITECTURAL RULE: No other module may call the chat-completions API directly.
//! All generation goes through `TextGenerator`, implemented here by `LlmClient`.
//!
//! Model choice is NOT made here: callers pass a `ModelAttempt` per call so the
//! fallback order lives in one place (`generation::invoker`).
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Model {model} did not answer within {secs}s")]
    Timeout { model: String, secs: u64 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// One entry of the ordered model fallback list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelAttempt {
    pub model_name: String,
    pub max_output_tokens: u32,
}

impl ModelAttempt {
    pub fn new(model_name: impl Into<String>, max_output_tokens: u32) -> Self {
        Self {
            model_name: model_name.into(),
            max_output_tokens,
        }
    }
}

/// Why the model stopped producing tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinishReason {
    Stop,
    /// Hit `max_tokens`. The content is cut off mid-document.
    Length,
    Other(String),
}

impl FinishReason {
    fn from_api(raw: Option<&str>) -> Self {
        match raw {
            Some("stop") | None => FinishReason::Stop,
            Some("length") => FinishReason::Length,
            Some(other) => FinishReason::Other(other.to_string()),
        }
    }
}

/// Text returned by a single generation call.
#[derive(Debug, Clone)]
pub struct Completion {
    pub model: String,
    pub content: String,
    pub finish_reason: FinishReason,
}

impl Completion {
    pub fn is_truncated(&self) -> bool {
        self.finish_reason == FinishReason::Length
    }
}

/// The generative text seam. Carried in `AppState` as `Arc<dyn TextGenerator>`
/// so tests can swap in a stub without touching handlers.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(
        &self,
        attempt: &ModelAttempt,
        system: &str,
        user: &str,
    ) -> Result<Completion, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    response_format: ResponseFormat,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Chat-completions client. No retries: the model fallback list is the only
/// retry-equivalent in the system.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    base_url: String,
    api_key: String,
    temperature: f32,
}

impl LlmClient {
    pub fn new(
        api_key: String,
        base_url: impl Into<String>,
        temperature: f32,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            temperature,
        })
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn complete(
        &self,
        attempt: &ModelAttempt,
        system: &str,
        user: &str,
    ) -> Result<Completion, LlmError> {
        let request_body = ChatRequest {
            model: &attempt.model_name,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: self.temperature,
            response_format: ResponseFormat {
                kind: "json_object",
            },
            max_tokens: attempt.max_output_tokens,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let chat: ChatResponse = serde_json::from_str(&body)?;

        if let Some(usage) = &chat.usage {
            debug!(
                "LLM call succeeded: model={}, prompt_tokens={}, completion_tokens={}",
                attempt.model_name, usage.prompt_tokens, usage.completion_tokens
            );
        }

        let choice = chat.choices.into_iter().next().ok_or(LlmError::EmptyContent)?;
        let content = choice
            .message
            .content
            .filter(|c| !c.trim().is_empty())
            .ok_or(LlmError::EmptyContent)?;

        Ok(Completion {
            model: attempt.model_name.clone(),
            content,
            finish_reason: FinishReason::from_api(choice.finish_reason.as_deref()),
        })
    }
}
