//! One humanizer call per batch. Never fails: any error or timeout hands back
//! the original joined text and marks the batch as not rewritten.

use std::time::Duration;

use tracing::warn;

use crate::humanize::client::{HumanizerError, Rewriter};
use crate::humanize::flatten::RewritableField;
use crate::humanize::redistribute::{join_batch, SplitMode};

/// The fields of one group, sent together as a single rewrite request.
#[derive(Debug, Clone)]
pub struct HumanizeBatch<P> {
    pub group: String,
    pub fields: Vec<RewritableField<P>>,
    pub split: SplitMode,
}

impl<P> HumanizeBatch<P> {
    pub fn originals(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.original_text.as_str()).collect()
    }

    pub fn joined(&self) -> String {
        join_batch(&self.originals(), self.split)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Humanized {
    /// Rewritten blob, or the original joined text when `rewritten` is false.
    pub text: String,
    pub rewritten: bool,
}

pub async fn humanize_batch<P>(
    rewriter: &dyn Rewriter,
    batch: &HumanizeBatch<P>,
    timeout: Duration,
) -> Humanized {
    let joined = batch.joined();

    let result = tokio::time::timeout(timeout, rewriter.rewrite(&joined))
        .await
        .unwrap_or(Err(HumanizerError::Timeout {
            secs: timeout.as_secs(),
        }));

    match result {
        Ok(text) => Humanized {
            text,
            rewritten: true,
        },
        Err(e) => {
            warn!(
                group = %batch.group,
                fields = batch.fields.len(),
                "Humanizer failed, keeping original text: {e}"
            );
            Humanized {
                text: joined,
                rewritten: false,
            }
        }
    }
}
