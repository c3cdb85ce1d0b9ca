use anyhow::{bail, Context, Result};

use crate::llm_client::ModelAttempt;

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_GENERATION_MODELS: &str = "gpt-4o:16000,gpt-4o-mini:16000";
const DEFAULT_LOG_FILTER: &str = "blogforge=info,tower_http=info";
const DEFAULT_HUMANIZER_URL: &str = "https://humanize.undetectable.ai/submit";

/// Humanizer calls are bounded to this window regardless of what the env asks for.
const HUMANIZER_TIMEOUT_RANGE: (u64, u64) = (60, 180);

/// Application configuration loaded from environment variables.
/// Fails at startup on malformed values. Missing API keys are not fatal:
/// generation answers 500 without a key, humanization becomes a no-op.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    /// Ordered fallback list. The first entry is the primary model.
    pub model_attempts: Vec<ModelAttempt>,
    pub generation_timeout_secs: u64,
    pub generation_temperature: f32,
    pub humanizer_api_key: Option<String>,
    pub humanizer_api_url: String,
    pub humanizer_timeout_secs: u64,
    pub port: u16,
    /// `EnvFilter` directives, straight from `RUST_LOG` or a crate-scoped default.
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let models = std::env::var("GENERATION_MODELS")
            .unwrap_or_else(|_| DEFAULT_GENERATION_MODELS.to_string());

        Ok(Config {
            openai_api_key: optional_env("OPENAI_API_KEY"),
            openai_base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string()),
            model_attempts: parse_model_attempts(&models)?,
            generation_timeout_secs: parse_env_or("GENERATION_TIMEOUT_SECS", 120)?,
            generation_temperature: parse_env_or("GENERATION_TEMPERATURE", 0.7)?,
            humanizer_api_key: optional_env("HUMANIZER_API_KEY"),
            humanizer_api_url: std::env::var("HUMANIZER_API_URL")
                .unwrap_or_else(|_| DEFAULT_HUMANIZER_URL.to_string()),
            humanizer_timeout_secs: clamp_humanizer_timeout(parse_env_or(
                "HUMANIZER_TIMEOUT_SECS",
                120,
            )?),
            port: parse_env_or("PORT", 8080).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string()),
        })
    }
}

/// Treats unset and blank variables alike.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env_or<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}

/// Parses `name:max_tokens,name:max_tokens` into an ordered attempt list.
pub fn parse_model_attempts(raw: &str) -> Result<Vec<ModelAttempt>> {
    let mut attempts = Vec::new();

    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (name, tokens) = entry
            .rsplit_once(':')
            .with_context(|| format!("Model entry '{entry}' must look like name:max_tokens"))?;
        let max_output_tokens = tokens
            .trim()
            .parse::<u32>()
            .with_context(|| format!("Model entry '{entry}' has an invalid token limit"))?;
        if name.trim().is_empty() || max_output_tokens == 0 {
            bail!("Model entry '{entry}' needs a name and a positive token limit");
        }
        attempts.push(ModelAttempt::new(name.trim(), max_output_tokens));
    }

    if attempts.is_empty() {
        bail!("GENERATION_MODELS must name at least one model");
    }
    Ok(attempts)
}

fn clamp_humanizer_timeout(secs: u64) -> u64 {
    secs.clamp(HUMANIZER_TIMEOUT_RANGE.0, HUMANIZER_TIMEOUT_RANGE.1)
}
