use std::sync::Arc;

use crate::config::Config;
use crate::humanize::Rewriter;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds no per-request data: every pipeline run owns its own values.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// `None` when no generative API key is configured. Generation routes answer 500.
    pub generator: Option<Arc<dyn TextGenerator>>,
    /// `None` when no humanizer key is configured. The humanize stage is skipped.
    pub rewriter: Option<Arc<dyn Rewriter>>,
}
