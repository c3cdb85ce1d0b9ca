//! Inbound request body and its validation into a `GenerationRequest`.
//!
//! Validation runs before any network call: a rejected request never reaches
//! the generative API.

use serde::Deserialize;

use crate::errors::AppError;
use crate::models::SchemaVariant;

pub const MIN_WORD_COUNT: u32 = 500;
pub const MAX_WORD_COUNT: u32 = 4000;
pub const DEFAULT_WORD_COUNT: u32 = 3000;

/// Raw POST body as sent by the front-end: `{ userInput, wordCount? }`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateBody {
    #[serde(default)]
    pub user_input: Option<String>,
    #[serde(default)]
    pub word_count: Option<i64>,
}

/// A validated request. Only constructed through `GenerationRequest::validate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub topic: String,
    pub target_word_count: u32,
    pub schema_variant: SchemaVariant,
}

impl GenerationRequest {
    pub fn validate(body: GenerateBody, schema_variant: SchemaVariant) -> Result<Self, AppError> {
        let topic = body
            .user_input
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Validation("Content input is required".to_string()))?
            .to_string();

        let target_word_count = match body.word_count {
            None => DEFAULT_WORD_COUNT,
            Some(n) if (MIN_WORD_COUNT as i64..=MAX_WORD_COUNT as i64).contains(&n) => n as u32,
            Some(n) => {
                return Err(AppError::Validation(format!(
                    "Word count must be between {MIN_WORD_COUNT} and {MAX_WORD_COUNT} (got {n})"
                )))
            }
        };

        Ok(Self {
            topic,
            target_word_count,
            schema_variant,
        })
    }

    /// Rough section count so that each section lands near 300-400 words.
    pub fn section_count(&self) -> u32 {
        (self.target_word_count / 350).clamp(3, 10)
    }

    /// Paragraphs per section, aiming at ~120 words per paragraph.
    pub fn paragraphs_per_section(&self) -> u32 {
        let per_section = self.target_word_count / self.section_count();
        (per_section / 120).clamp(2, 5)
    }
}
