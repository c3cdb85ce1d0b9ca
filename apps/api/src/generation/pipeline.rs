//! Content pipeline: orchestrates one generation request end to end.
//!
//! Flow: credential check → build_prompt → generate_with_fallback →
//!       parse_content → (optional) humanize_content → GeneratedDocument.
//!
//! Every external call is awaited in sequence. Generation and parse errors
//! abort the request; humanizer errors never do.

use std::time::Duration;

use tracing::{info, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::invoker::generate_with_fallback;
use crate::generation::parser::parse_content;
use crate::generation::prompts::build_prompt;
use crate::generation::request::GenerationRequest;
use crate::humanize::{humanize_content, HumanizeReport};
use crate::models::ContentTree;
use crate::state::AppState;

/// The parsed (and possibly rewritten) document handed to the renderer.
#[derive(Debug, Clone)]
pub struct GeneratedDocument {
    pub tree: ContentTree,
    pub model: String,
    /// The primary model ran out of tokens and its cut-off output was kept.
    pub truncated: bool,
    /// `None` when humanization was not requested or no humanizer is configured.
    pub humanize: Option<HumanizeReport>,
}

pub async fn run_pipeline(
    state: &AppState,
    request: GenerationRequest,
    humanize: bool,
) -> Result<GeneratedDocument, AppError> {
    let span = tracing::info_span!(
        "pipeline",
        request_id = %Uuid::new_v4(),
        variant = request.schema_variant.as_str(),
    );
    run(state, request, humanize).instrument(span).await
}

async fn run(
    state: &AppState,
    request: GenerationRequest,
    humanize: bool,
) -> Result<GeneratedDocument, AppError> {
    // Fail fast before any network call.
    let generator = state.generator.as_deref().ok_or_else(|| {
        AppError::UpstreamConfig("OPENAI_API_KEY is not configured".to_string())
    })?;

    info!(
        "Generating {} words on {:?}",
        request.target_word_count, request.topic
    );

    let prompt = build_prompt(&request);
    let completion = generate_with_fallback(
        generator,
        &prompt,
        &state.config.model_attempts,
        Duration::from_secs(state.config.generation_timeout_secs),
    )
    .await?;

    let mut tree = parse_content(&completion.content, request.schema_variant)?;

    let report = match (humanize, state.rewriter.as_deref()) {
        (false, _) => None,
        (true, None) => {
            info!("HUMANIZER_API_KEY not configured, skipping humanize stage");
            None
        }
        (true, Some(rewriter)) => {
            let report = humanize_content(
                &mut tree,
                rewriter,
                Duration::from_secs(state.config.humanizer_timeout_secs),
            )
            .await;
            info!(
                batches = report.batches_sent,
                exact = report.exact,
                proportional = report.proportional,
                degraded = report.degraded,
                "Humanize stage finished"
            );
            Some(report)
        }
    };

    Ok(GeneratedDocument {
        truncated: completion.is_truncated(),
        model: completion.model,
        tree,
        humanize: report,
    })
}
