//! Runs every rewrite group of a tree through the humanizer, one after another.
//!
//! Groups are never sent concurrently. A failed group leaves its fields
//! byte-identical and the pass moves on to the next group.

use std::time::Duration;

use serde::Serialize;
use tracing::info;

use crate::humanize::client::Rewriter;
use crate::humanize::flatten::{flatten, Rewritable};
use crate::humanize::invoker::{humanize_batch, HumanizeBatch};
use crate::humanize::redistribute::{redistribute, RedistributionPath};
use crate::models::ContentTree;

/// What happened across all groups of one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HumanizeReport {
    pub batches_sent: usize,
    pub exact: usize,
    pub proportional: usize,
    pub degraded: usize,
    pub fields_rewritten: usize,
}

pub async fn humanize_content(
    tree: &mut ContentTree,
    rewriter: &dyn Rewriter,
    timeout: Duration,
) -> HumanizeReport {
    match tree {
        ContentTree::Blog(blog) => humanize_tree(blog, rewriter, timeout).await,
        ContentTree::Landing(page) => humanize_tree(page, rewriter, timeout).await,
    }
}

pub async fn humanize_tree<T: Rewritable>(
    tree: &mut T,
    rewriter: &dyn Rewriter,
    timeout: Duration,
) -> HumanizeReport {
    let mut report = HumanizeReport::default();

    for group in tree.rewrite_groups() {
        let fields = flatten(tree, &group);
        if fields.is_empty() {
            continue;
        }

        let batch = HumanizeBatch {
            group: group.name,
            fields,
            split: group.split,
        };
        report.batches_sent += 1;

        let humanized = humanize_batch(rewriter, &batch, timeout).await;
        if !humanized.rewritten {
            report.degraded += 1;
            info!(
                group = %batch.group,
                fields = batch.fields.len(),
                path = "degraded",
                "Humanize batch done"
            );
            continue;
        }

        let result = redistribute(&batch.originals(), &humanized.text, batch.split);
        match result.path {
            RedistributionPath::Exact => report.exact += 1,
            RedistributionPath::Proportional => report.proportional += 1,
        }
        info!(
            group = %batch.group,
            fields = batch.fields.len(),
            path = result.path.as_str(),
            "Humanize batch done"
        );

        for (field, text) in batch.fields.iter().zip(result.texts) {
            if let Some(slot) = tree.field_mut(field.path) {
                *slot = text;
                report.fields_rewritten += 1;
            }
        }
    }

    report
}
