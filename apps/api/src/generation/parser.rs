//! Extracts the JSON object from raw model output and parses it into a `ContentTree`.
//!
//! Lenient by policy: the shape is only checked as far as serde defaults allow.
//! Missing optional fields render as empty rather than failing the request.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::AppError;
use crate::models::{BlogContent, ContentTree, LandingContent, SchemaVariant};

/// How much raw output is kept for the logs when parsing fails.
const EXCERPT_CHARS: usize = 1000;

static FENCED_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```(?:json|JSON)?[ \t]*\r?\n(.*?)```").expect("valid regex"));

/// Returns the body of the first fenced code block, or the whole text trimmed.
///
/// A fence only opens at a line break, so backticks inside a JSON string
/// value (which cannot hold a raw newline) never count as one.
pub fn extract_json(raw: &str) -> &str {
    FENCED_BLOCK
        .captures(raw)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .unwrap_or_else(|| raw.trim())
}

fn parse_as(json: &str, variant: SchemaVariant) -> serde_json::Result<ContentTree> {
    match variant {
        SchemaVariant::Blog => serde_json::from_str::<BlogContent>(json).map(ContentTree::Blog),
        SchemaVariant::Landing => {
            serde_json::from_str::<LandingContent>(json).map(ContentTree::Landing)
        }
    }
}

pub fn parse_content(raw: &str, variant: SchemaVariant) -> Result<ContentTree, AppError> {
    let candidate = extract_json(raw);

    let parsed = parse_as(candidate, variant).or_else(|fenced_err| {
        let whole = raw.trim();
        if whole == candidate {
            return Err(fenced_err);
        }
        // Fenced capture was not the document; try the full text before giving up.
        parse_as(whole, variant).map_err(|_| fenced_err)
    });

    parsed.map_err(|e| AppError::Parse {
        reason: e.to_string(),
        excerpt: raw.chars().take(EXCERPT_CHARS).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_with_json_fence() {
        let input = "Here you go:\n```json\n{\"key\": \"value\"}\n```\nThanks!";
        assert_eq!(extract_json(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_extract_json_with_bare_fence() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(extract_json(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_extract_json_without_fence() {
        let input = "  {\"key\": \"value\"}\n";
        assert_eq!(extract_json(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_parse_blog_from_fenced_output() {
        let raw = "```json\n{\"meta\": {\"title\": \"Local SEO\"}, \"sections\": []}\n```";
        let tree = parse_content(raw, SchemaVariant::Blog).unwrap();
        assert_eq!(tree.variant(), SchemaVariant::Blog);
        assert_eq!(tree.title(), "Local SEO");
    }

    #[test]
    fn test_parse_landing_tolerates_missing_sections() {
        let tree = parse_content(r#"{"meta": {"title": "Acme"}}"#, SchemaVariant::Landing).unwrap();
        match tree {
            ContentTree::Landing(page) => {
                assert!(page.services.services_list.is_empty());
                assert_eq!(page.intro.paragraph_1, "");
            }
            other => panic!("expected landing, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_error_keeps_bounded_excerpt() {
        let raw = format!("Sorry, I cannot help with that. {}", "x".repeat(5000));
        let err = parse_content(&raw, SchemaVariant::Blog).unwrap_err();
        match err {
            AppError::Parse { excerpt, .. } => {
                assert_eq!(excerpt.chars().count(), EXCERPT_CHARS);
                assert!(excerpt.starts_with("Sorry, I cannot help"));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_inline_backticks_in_a_value_are_not_a_fence() {
        let raw = r#"{"meta": {"title": "Run ```cargo fmt``` before every commit"}}"#;
        assert_eq!(extract_json(raw), raw);
        let tree = parse_content(raw, SchemaVariant::Landing).unwrap();
        assert_eq!(tree.title(), "Run ```cargo fmt``` before every commit");
    }

    #[test]
    fn test_escaped_newlines_around_backticks_stay_one_document() {
        let raw = "{\"meta\": {\"title\": \"Snippet\"}, \"conclusion\": \"Example:\\n```\\nls -la\\n```\"}";
        let tree = parse_content(raw, SchemaVariant::Blog).unwrap();
        assert_eq!(tree.title(), "Snippet");
    }

    #[test]
    fn test_fence_and_whole_text_both_invalid_is_parse_error() {
        let raw = "Here is a draft:\n```\nnot json\n```\nHope it helps.";
        assert!(matches!(
            parse_content(raw, SchemaVariant::Blog),
            Err(AppError::Parse { .. })
        ));
    }

    #[test]
    fn test_truncated_json_is_a_parse_error() {
        let raw = r#"{"meta": {"title": "Cut off"#;
        assert!(matches!(
            parse_content(raw, SchemaVariant::Landing),
            Err(AppError::Parse { .. })
        ));
    }
}
