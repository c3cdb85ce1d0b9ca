// Humanize stage: flatten → one rewrite call per group → redistribute → write back.
// Optional: without a humanizer key the whole stage is skipped.
// Failures never leave this module; a failed group keeps its original text.

pub mod client;
pub mod flatten;
pub mod invoker;
pub mod pass;
pub mod redistribute;

pub use client::{HumanizerClient, Rewriter};
pub use pass::{humanize_content, HumanizeReport};
