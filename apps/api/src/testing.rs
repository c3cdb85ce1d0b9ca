//! Deterministic stand-ins for the two external APIs.
//!
//! Both stubs count their calls so tests can assert that nothing went out.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::config::Config;
use crate::humanize::client::{HumanizerError, Rewriter};
use crate::llm_client::{Completion, FinishReason, LlmError, ModelAttempt, TextGenerator};
use crate::state::AppState;

/// A small but complete landing page, as the model would return it.
pub const MINIMAL_LANDING_JSON: &str = r#"{
  "meta": {"title": "Small Business SEO", "description": "Get found locally.", "keywords": "seo, local"},
  "banner": {"heading": "Be found first", "subheading": "SEO for small teams"},
  "intro": {
    "heading": "Why search matters",
    "paragraph_1": "Most customers look you up online before they ever call or visit your shop.",
    "paragraph_2": "A tidy listing and clear pages help them choose you over the shop next door."
  },
  "services": {"heading": "What we do", "services_list": [
    {"title": "Local listings", "description": "We claim and tidy your map listings so details stay correct."},
    {"title": "On-page fixes", "description": "We rewrite titles and headings so pages match what people search."}
  ]},
  "stats": [{"value": "Weekly", "label": "Reports", "description": "Plain-language progress notes every week."}],
  "benefits": [{"title": "No jargon", "description": "You always know what changed and why it matters."}],
  "faq": [{"question": "How long does it take?", "answer": "Most owners see movement within a few months."}],
  "testimonials": [{"name": "Dana", "role": "Cafe owner", "quote": "We finally show up when people search for coffee nearby."}],
  "cta": {"heading": "Start today", "text": "Book a short call and we will review your current listing together."}
}"#;

/// A small blog post with one section.
pub const MINIMAL_BLOG_JSON: &str = r#"{
  "meta": {"title": "Local SEO Basics", "description": "A starter guide.", "keywords": "seo"},
  "banner": {"heading": "Local SEO Basics", "subheading": "Start here"},
  "sections": [{"id": "listings", "title": "Claim your listings", "subsections": [
    {"type": "paragraph", "content": "Your map listing is often the first thing a nearby customer sees."},
    {"type": "list", "items": ["Check hours", "Add photos"]}
  ]}],
  "faq": [{"question": "Is it free?", "answer": "Claiming a listing costs nothing."}],
  "conclusion": "Start with the listing, then work through your pages one at a time."
}"#;

pub fn test_config() -> Config {
    Config {
        openai_api_key: Some("sk-test".into()),
        openai_base_url: "http://localhost:0".into(),
        model_attempts: vec![
            ModelAttempt::new("primary", 16000),
            ModelAttempt::new("fallback", 16000),
        ],
        generation_timeout_secs: 120,
        generation_temperature: 0.7,
        humanizer_api_key: None,
        humanizer_api_url: "http://localhost:0".into(),
        humanizer_timeout_secs: 120,
        port: 0,
        rust_log: "info".into(),
    }
}

pub fn app_state(
    generator: Option<Arc<dyn TextGenerator>>,
    rewriter: Option<Arc<dyn Rewriter>>,
) -> AppState {
    AppState {
        config: test_config(),
        generator,
        rewriter,
    }
}

type Scripted = Result<(String, FinishReason), LlmError>;

/// Replays scripted completions in order. Runs out → `EmptyContent`.
#[derive(Clone, Default)]
pub struct StubGenerator {
    script: Arc<Mutex<VecDeque<Scripted>>>,
    calls: Arc<Mutex<Vec<String>>>,
    first_call_delay: Option<Duration>,
}

impl StubGenerator {
    pub fn new(script: Vec<Scripted>) -> Self {
        Self {
            script: Arc::new(Mutex::new(script.into())),
            ..Default::default()
        }
    }

    pub fn stop(content: &str) -> Scripted {
        Ok((content.to_string(), FinishReason::Stop))
    }

    pub fn truncated(content: &str) -> Scripted {
        Ok((content.to_string(), FinishReason::Length))
    }

    pub fn api_error(status: u16) -> Scripted {
        Err(LlmError::Api {
            status,
            message: format!("stub failure {status}"),
        })
    }

    pub fn with_delay_on_first(mut self, delay: Duration) -> Self {
        self.first_call_delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn models_called(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn complete(
        &self,
        attempt: &ModelAttempt,
        _system: &str,
        _user: &str,
    ) -> Result<Completion, LlmError> {
        let (next, is_first) = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(attempt.model_name.clone());
            let next = self.script.lock().unwrap().pop_front();
            (next, calls.len() == 1)
        };

        if is_first {
            if let Some(delay) = self.first_call_delay {
                tokio::time::sleep(delay).await;
            }
        }

        let (content, finish_reason) = next.unwrap_or(Err(LlmError::EmptyContent))?;
        Ok(Completion {
            model: attempt.model_name.clone(),
            content,
            finish_reason,
        })
    }
}

/// How `StubRewriter` answers.
#[derive(Clone)]
pub enum RewriteBehaviour {
    /// Returns the input unchanged.
    Echo,
    /// Returns the input with every `from` replaced by `to`.
    Replace(&'static str, &'static str),
    /// Always returns this fixed text.
    Fixed(String),
    /// Fails with the given HTTP status.
    Fail(u16),
    /// Never answers.
    Hang,
}

#[derive(Clone)]
pub struct StubRewriter {
    behaviour: RewriteBehaviour,
    inputs: Arc<Mutex<Vec<String>>>,
}

impl StubRewriter {
    pub fn new(behaviour: RewriteBehaviour) -> Self {
        Self {
            behaviour,
            inputs: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn call_count(&self) -> usize {
        self.inputs.lock().unwrap().len()
    }

    pub fn inputs(&self) -> Vec<String> {
        self.inputs.lock().unwrap().clone()
    }
}

#[async_trait]
impl Rewriter for StubRewriter {
    async fn rewrite(&self, text: &str) -> Result<String, HumanizerError> {
        self.inputs.lock().unwrap().push(text.to_string());
        match &self.behaviour {
            RewriteBehaviour::Echo => Ok(text.to_string()),
            RewriteBehaviour::Replace(from, to) => Ok(text.replace(from, to)),
            RewriteBehaviour::Fixed(out) => Ok(out.clone()),
            RewriteBehaviour::Fail(status) => Err(HumanizerError::Status {
                status: *status,
                body: "stub failure".into(),
            }),
            RewriteBehaviour::Hang => {
                std::future::pending::<()>().await;
                Err(HumanizerError::EmptyOutput)
            }
        }
    }
}
