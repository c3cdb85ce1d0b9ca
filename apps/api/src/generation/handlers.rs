//! Axum route handlers for the Generation API.
//!
//! Every route takes `{ userInput, wordCount? }` and answers with a file
//! download. Failures answer with a JSON error body, never partial HTML.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use chrono::Utc;
use tracing::info;

use crate::errors::AppError;
use crate::generation::pipeline::run_pipeline;
use crate::generation::request::{GenerateBody, GenerationRequest};
use crate::models::SchemaVariant;
use crate::render::{bundle_zip, render_html};
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DownloadFormat {
    Html,
    Zip,
}

/// POST /api/generate-blog
pub async fn handle_generate_blog(
    State(state): State<AppState>,
    body: Result<Json<GenerateBody>, JsonRejection>,
) -> Result<Response, AppError> {
    generate_download(&state, body, SchemaVariant::Blog, false, DownloadFormat::Html).await
}

/// POST /api/generate-blog-humanized
pub async fn handle_generate_blog_humanized(
    State(state): State<AppState>,
    body: Result<Json<GenerateBody>, JsonRejection>,
) -> Result<Response, AppError> {
    generate_download(&state, body, SchemaVariant::Blog, true, DownloadFormat::Html).await
}

/// POST /api/generate-page
pub async fn handle_generate_page(
    State(state): State<AppState>,
    body: Result<Json<GenerateBody>, JsonRejection>,
) -> Result<Response, AppError> {
    generate_download(&state, body, SchemaVariant::Landing, false, DownloadFormat::Html).await
}

/// POST /api/generate-page-humanized
pub async fn handle_generate_page_humanized(
    State(state): State<AppState>,
    body: Result<Json<GenerateBody>, JsonRejection>,
) -> Result<Response, AppError> {
    generate_download(&state, body, SchemaVariant::Landing, true, DownloadFormat::Html).await
}

/// POST /api/generate-page-bundle
///
/// Humanized landing page as a ZIP of `index.html` + `content.json`.
pub async fn handle_generate_page_bundle(
    State(state): State<AppState>,
    body: Result<Json<GenerateBody>, JsonRejection>,
) -> Result<Response, AppError> {
    generate_download(&state, body, SchemaVariant::Landing, true, DownloadFormat::Zip).await
}

async fn generate_download(
    state: &AppState,
    body: Result<Json<GenerateBody>, JsonRejection>,
    variant: SchemaVariant,
    humanize: bool,
    format: DownloadFormat,
) -> Result<Response, AppError> {
    let Json(body) =
        body.map_err(|e| AppError::Validation(format!("Invalid request body: {}", e.body_text())))?;
    let request = GenerationRequest::validate(body, variant)?;

    let document = run_pipeline(state, request, humanize).await?;
    info!(
        model = %document.model,
        truncated = document.truncated,
        humanized = document.humanize.is_some(),
        "Rendering {:?}",
        document.tree.title()
    );
    let html = render_html(&document.tree);

    let prefix = match document.tree.variant() {
        SchemaVariant::Blog => "blog",
        SchemaVariant::Landing => "page",
    };
    let stamp = Utc::now().timestamp_millis();

    let (content_type, filename, bytes) = match format {
        DownloadFormat::Html => (
            "text/html; charset=utf-8",
            format!("{prefix}-{stamp}.html"),
            Bytes::from(html),
        ),
        DownloadFormat::Zip => (
            "application/zip",
            format!("{prefix}-{stamp}.zip"),
            Bytes::from(bundle_zip(&html, &document.tree)?),
        ),
    };

    Ok((
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}
