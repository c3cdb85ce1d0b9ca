mod config;
mod errors;
mod generation;
mod humanize;
mod llm_client;
mod models;
mod render;
mod routes;
mod state;

#[cfg(test)]
mod testing;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::humanize::{HumanizerClient, Rewriter};
use crate::llm_client::{LlmClient, TextGenerator};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(env_filter(&config.rust_log)?)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Blogforge API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize generative API client
    let generator: Option<Arc<dyn TextGenerator>> = match &config.openai_api_key {
        Some(key) => {
            let client = LlmClient::new(
                key.clone(),
                config.openai_base_url.clone(),
                config.generation_temperature,
                Duration::from_secs(config.generation_timeout_secs),
            )?;
            let models: Vec<&str> = config
                .model_attempts
                .iter()
                .map(|a| a.model_name.as_str())
                .collect();
            info!("LLM client initialized (models in order: {})", models.join(" → "));
            Some(Arc::new(client))
        }
        None => {
            warn!("OPENAI_API_KEY not set: generation routes will answer 500");
            None
        }
    };

    // Initialize humanizer client
    let rewriter: Option<Arc<dyn Rewriter>> = match &config.humanizer_api_key {
        Some(key) => {
            let client = HumanizerClient::new(
                key.clone(),
                config.humanizer_api_url.clone(),
                Duration::from_secs(config.humanizer_timeout_secs),
            )?;
            info!(
                "Humanizer client initialized (timeout {}s)",
                config.humanizer_timeout_secs
            );
            Some(Arc::new(client))
        }
        None => {
            info!("HUMANIZER_API_KEY not set: humanize stage disabled");
            None
        }
    };

    // Build app state
    let state = AppState {
        config: config.clone(),
        generator,
        rewriter,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the front-end domain is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn env_filter(directives: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directives)
        .with_context(|| format!("RUST_LOG is not a valid log filter: {directives}"))
}
