use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Humanizer failures never show up here: they degrade to the original text
/// inside the humanize stage.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or out-of-range user input. Raised before any network call.
    #[error("{0}")]
    Validation(String),

    /// A credential the request needs is not configured.
    #[error("Upstream not configured: {0}")]
    UpstreamConfig(String),

    /// Every model attempt failed, or none produced acceptable output.
    #[error("Generation failed: {0}")]
    GenerationExhausted(String),

    /// No JSON object could be extracted from the model output.
    /// `excerpt` is for the logs only and never leaves the process.
    #[error("Could not parse model output: {reason}")]
    Parse { reason: String, excerpt: String },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::UpstreamConfig(msg) => {
                tracing::error!("Upstream configuration error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "Service is not configured",
                        "message": msg,
                    }),
                )
            }
            AppError::GenerationExhausted(msg) => {
                tracing::error!("Generation exhausted: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "Failed to generate content",
                        "message": msg,
                    }),
                )
            }
            AppError::Parse { reason, excerpt } => {
                tracing::error!(excerpt = %excerpt, "Model output parse error: {reason}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "Failed to generate content",
                        "message": format!("The model returned malformed content: {reason}"),
                    }),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "Internal server error",
                        "message": "An internal server error occurred",
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
