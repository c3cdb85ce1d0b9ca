// Content generation: validate → prompt → multi-model call → parse → (humanize).
// All generative API calls go through llm_client::TextGenerator.

pub mod handlers;
pub mod invoker;
pub mod parser;
pub mod pipeline;
pub mod prompts;
pub mod request;
