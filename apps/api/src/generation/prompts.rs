//! Prompt construction for each schema variant.
//!
//! Pure functions of the validated request: no I/O, cannot fail.
//! Reuses cross-cutting fragments from llm_client::prompts.

use crate::generation::request::GenerationRequest;
use crate::llm_client::prompts::{FACTUAL_INSTRUCTION, JSON_ONLY_SYSTEM, RELEVANCE_INSTRUCTION};
use crate::models::SchemaVariant;

/// System instruction plus user prompt, ready for one chat-completions call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

/// System prompt persona shared by both variants.
const WRITER_PERSONA: &str = "You are a senior marketing copywriter who writes clear, \
    specific, reader-first web content for small and mid-sized businesses.";

/// Blog prompt template.
/// Replace: {relevance_instruction}, {factual_instruction}, {topic},
///          {word_count}, {section_count}, {paragraph_count}
pub const BLOG_PROMPT_TEMPLATE: &str = r#"{relevance_instruction}

{factual_instruction}

TOPIC: {topic}

Write a long-form blog post of about {word_count} words on the topic above.
Use exactly {section_count} sections. Each section holds {paragraph_count} paragraphs
of 80-150 words, and may add one list and one short example.

Return a JSON object with this EXACT schema (no extra keys):
{
  "meta": {
    "title": "SEO title under 60 characters",
    "description": "Meta description under 155 characters",
    "keywords": "comma, separated, keywords"
  },
  "banner": {
    "heading": "Page headline",
    "subheading": "One sentence supporting the headline"
  },
  "sections": [
    {
      "id": "kebab-case-anchor",
      "title": "Section title",
      "subsections": [
        {"type": "heading", "content": "Optional in-section heading"},
        {"type": "subheading", "content": "Optional subheading"},
        {"type": "paragraph", "content": "Body paragraph"},
        {"type": "list", "items": ["item one", "item two"]},
        {"type": "example", "content": "A short, concrete illustration"}
      ]
    }
  ],
  "faq": [
    {"question": "A question readers ask", "answer": "A direct answer in 2-4 sentences"}
  ],
  "conclusion": "Closing paragraph with a clear next step"
}

HARD RULES:
1. Output the JSON object only. No prose before or after it.
2. Every "type" must be one of: paragraph, heading, subheading, list, example
3. Provide 4-6 FAQ entries
4. Do NOT repeat the same sentence or idea across sections"#;

/// Landing page prompt template.
/// Replace: {relevance_instruction}, {factual_instruction}, {topic}, {word_count}
pub const LANDING_PROMPT_TEMPLATE: &str = r#"{relevance_instruction}

{factual_instruction}

TOPIC: {topic}

Write the copy for a marketing landing page of about {word_count} words on the topic above.

Return a JSON object with this EXACT schema (no extra keys):
{
  "meta": {
    "title": "SEO title under 60 characters",
    "description": "Meta description under 155 characters",
    "keywords": "comma, separated, keywords"
  },
  "banner": {"heading": "Headline", "subheading": "Supporting line"},
  "intro": {
    "heading": "Intro heading",
    "paragraph_1": "Opening paragraph of 80-150 words",
    "paragraph_2": "Second paragraph of 80-150 words"
  },
  "services": {
    "heading": "Services heading",
    "services_list": [
      {"title": "Service name", "description": "Two to four sentences"}
    ]
  },
  "stats": [
    {"value": "Qualitative figure, e.g. 'Same-day'", "label": "Short label", "description": "One sentence"}
  ],
  "benefits": [
    {"title": "Benefit", "description": "Two sentences"}
  ],
  "faq": [
    {"question": "Question", "answer": "Direct answer in 2-4 sentences"}
  ],
  "testimonials": [
    {"name": "Generic first name", "role": "Customer type", "quote": "Plausible, modest quote"}
  ],
  "cta": {"heading": "Call to action", "text": "One or two sentences"}
}

HARD RULES:
1. Output the JSON object only. No prose before or after it.
2. Provide 4-6 services, 3-4 stats, 4-6 benefits, 5-6 FAQ entries and 3 testimonials
3. Stats values must be qualitative, never invented numbers or percentages"#;

/// Builds the (system, user) prompt pair for a validated request.
pub fn build_prompt(request: &GenerationRequest) -> PromptPair {
    let system = format!("{WRITER_PERSONA} {JSON_ONLY_SYSTEM}");

    let user = match request.schema_variant {
        SchemaVariant::Blog => BLOG_PROMPT_TEMPLATE
            .replace("{section_count}", &request.section_count().to_string())
            .replace(
                "{paragraph_count}",
                &request.paragraphs_per_section().to_string(),
            ),
        SchemaVariant::Landing => LANDING_PROMPT_TEMPLATE.to_string(),
    };

    // Topic goes in last so user text containing a placeholder is never expanded.
    let user = user
        .replace("{relevance_instruction}", RELEVANCE_INSTRUCTION)
        .replace("{factual_instruction}", FACTUAL_INSTRUCTION)
        .replace("{word_count}", &request.target_word_count.to_string())
        .replace("{topic}", &request.topic);

    PromptPair { system, user }
}
