//! Multi-model fallback for the generative API.
//!
//! Attempts run strictly in order, each under its own timeout. The first
//! complete answer wins. A truncated answer from the primary (first) model is
//! also accepted: richer cut-off content beats a complete answer from a weaker
//! model. Truncation from any later model moves on to the next attempt.

use std::time::Duration;

use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::prompts::PromptPair;
use crate::llm_client::{Completion, LlmError, ModelAttempt, TextGenerator};

pub async fn generate_with_fallback(
    generator: &dyn TextGenerator,
    prompt: &PromptPair,
    attempts: &[ModelAttempt],
    timeout: Duration,
) -> Result<Completion, AppError> {
    let mut last_error: Option<String> = None;

    for (index, attempt) in attempts.iter().enumerate() {
        let is_primary = index == 0;

        let result = tokio::time::timeout(
            timeout,
            generator.complete(attempt, &prompt.system, &prompt.user),
        )
        .await
        .unwrap_or_else(|_| {
            Err(LlmError::Timeout {
                model: attempt.model_name.clone(),
                secs: timeout.as_secs(),
            })
        });

        match result {
            Ok(completion) => {
                let truncated = completion.is_truncated();
                info!(
                    model = %attempt.model_name,
                    attempt = index + 1,
                    truncated,
                    chars = completion.content.len(),
                    "Generation attempt finished"
                );

                if !truncated {
                    return Ok(completion);
                }
                if is_primary {
                    // Surfaced in logs only; the HTTP response does not flag it.
                    warn!(
                        model = %attempt.model_name,
                        "Primary model hit its token ceiling, keeping truncated output"
                    );
                    return Ok(completion);
                }
                last_error = Some(format!(
                    "model {} truncated its output at {} tokens",
                    attempt.model_name, attempt.max_output_tokens
                ));
            }
            Err(e) => {
                warn!(
                    model = %attempt.model_name,
                    attempt = index + 1,
                    "Generation attempt failed: {e}"
                );
                last_error = Some(e.to_string());
            }
        }
    }

    Err(AppError::GenerationExhausted(
        last_error.unwrap_or_else(|| "no model attempts configured".to_string()),
    ))
}
