// Shared prompt constants and prompt-building utilities.
// Each schema variant defines its own prompt in generation/prompts.rs.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with a single valid JSON object only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Forbids invented numbers, quotes and claims.
pub const FACTUAL_INSTRUCTION: &str = "\
    CRITICAL: Do NOT fabricate statistics, percentages, study results, awards, \
    client names or quotations attributed to real people. \
    When a number is needed, describe it qualitatively instead of inventing one. \
    Never claim certifications, rankings or guarantees that were not provided.";

/// Keeps every section on the requested topic.
pub const RELEVANCE_INSTRUCTION: &str = "\
    CRITICAL: Every heading, paragraph, list item and answer must be directly about \
    the requested topic. Do NOT drift into adjacent subjects, generic filler, \
    or unrelated advice. If a section cannot be made relevant, keep it short.";
