//! Humanizer API client.
//!
//! Request: `{ text, model: "undetectable", words: true, costs: false, language: "English" }`
//! Response: `{ output }`. Anything other than a 2xx with an `output` string is an error;
//! the caller (`humanize::invoker`) turns every error into a no-op.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HumanizerError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Humanizer returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Humanizer did not answer within {secs}s")]
    Timeout { secs: u64 },

    #[error("Humanizer response had no output text")]
    EmptyOutput,
}

/// The rewriting seam. Carried in `AppState` as `Option<Arc<dyn Rewriter>>`;
/// `None` means no humanizer key is configured.
#[async_trait]
pub trait Rewriter: Send + Sync {
    async fn rewrite(&self, text: &str) -> Result<String, HumanizerError>;
}

#[derive(Debug, Serialize)]
struct HumanizeRequest<'a> {
    text: &'a str,
    model: &'static str,
    words: bool,
    costs: bool,
    language: &'static str,
}

#[derive(Debug, Deserialize)]
struct HumanizeResponse {
    output: Option<String>,
}

#[derive(Clone)]
pub struct HumanizerClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl HumanizerClient {
    pub fn new(
        api_key: String,
        api_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, HumanizerError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_url: api_url.into(),
            api_key,
        })
    }
}

#[async_trait]
impl Rewriter for HumanizerClient {
    async fn rewrite(&self, text: &str) -> Result<String, HumanizerError> {
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&HumanizeRequest {
                text,
                model: "undetectable",
                words: true,
                costs: false,
                language: "English",
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HumanizerError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let parsed: HumanizeResponse = response.json().await?;
        parsed
            .output
            .filter(|o| !o.trim().is_empty())
            .ok_or(HumanizerError::EmptyOutput)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> HumanizerClient {
        HumanizerClient::new(
            "hk-test".into(),
            format!("{}/submit", server.uri()),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_rewrite_sends_expected_body_and_returns_output() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("authorization", "Bearer hk-test"))
            .and(body_partial_json(serde_json::json!({
                "text": "Original words.",
                "model": "undetectable",
                "words": true,
                "costs": false,
                "language": "English"
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "output": "Rewritten words." })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let out = client_for(&server).rewrite("Original words.").await.unwrap();
        assert_eq!(out, "Rewritten words.");
    }

    #[tokio::test]
    async fn test_non_2xx_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(402).set_body_string("out of credits"))
            .mount(&server)
            .await;

        let err = client_for(&server).rewrite("text").await.unwrap_err();
        assert!(matches!(err, HumanizerError::Status { status: 402, .. }));
    }

    #[tokio::test]
    async fn test_missing_output_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let err = client_for(&server).rewrite("text").await.unwrap_err();
        assert!(matches!(err, HumanizerError::EmptyOutput));
    }
}
