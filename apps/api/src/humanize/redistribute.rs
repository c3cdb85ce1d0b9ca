//! Splits a rewritten blob back into the field slots it came from.
//!
//! Fast path: split on the batch separator (or on blank lines) and, when the
//! piece count matches the field count, assign pieces 1:1 in order.
//!
//! Fallback: the humanizer merged or split paragraphs, so the blob is walked
//! as one string and each field takes a slice proportional to its share of the
//! original character count. Every cut except the last snaps to the nearest
//! sentence end (`.`, `!` or `?` followed by whitespace) within
//! `SNAP_WINDOW` characters; the last field takes whatever remains.
//!
//! All lengths are counted in `char`s, never bytes.

use once_cell::sync::Lazy;
use regex::Regex;

/// Marker placed between fields of one batch. Unlikely in natural prose.
pub const BATCH_SEPARATOR: &str = "[[[SPLIT]]]";

/// How far (in chars) a proportional cut may move to land on a sentence end.
pub const SNAP_WINDOW: usize = 100;

static PARAGRAPH_GAP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{2,}").expect("valid regex"));
static SENTENCE_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]\s").expect("valid regex"));

/// How the fields of one batch are joined and split again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitMode {
    /// Fields joined with `BATCH_SEPARATOR` on its own line.
    Separator,
    /// Fields joined as paragraphs; split on `\n\n+`.
    ParagraphGap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedistributionPath {
    Exact,
    Proportional,
}

impl RedistributionPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            RedistributionPath::Exact => "exact",
            RedistributionPath::Proportional => "proportional",
        }
    }
}

/// One replacement per original field, in the original order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redistribution {
    pub texts: Vec<String>,
    pub path: RedistributionPath,
}

pub fn join_batch(texts: &[&str], mode: SplitMode) -> String {
    match mode {
        SplitMode::Separator => texts.join(&format!("\n\n{BATCH_SEPARATOR}\n\n")),
        SplitMode::ParagraphGap => texts.join("\n\n"),
    }
}

pub fn redistribute(originals: &[&str], rewritten: &str, mode: SplitMode) -> Redistribution {
    let pieces = split_pieces(rewritten, mode);

    if pieces.len() == originals.len() {
        return Redistribution {
            texts: originals
                .iter()
                .zip(pieces)
                .map(|(original, piece)| keep_or_replace(original, piece))
                .collect(),
            path: RedistributionPath::Exact,
        };
    }

    let blob = match mode {
        SplitMode::Separator => rewritten.replace(BATCH_SEPARATOR, " "),
        SplitMode::ParagraphGap => rewritten.to_string(),
    };
    let blob = blob.trim();
    let lengths: Vec<usize> = originals.iter().map(|o| o.chars().count()).collect();

    Redistribution {
        texts: originals
            .iter()
            .zip(proportional_chunks(&lengths, blob))
            .map(|(original, chunk)| keep_or_replace(original, chunk))
            .collect(),
        path: RedistributionPath::Proportional,
    }
}

fn split_pieces(rewritten: &str, mode: SplitMode) -> Vec<&str> {
    let trimmed = rewritten.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    match mode {
        SplitMode::Separator => trimmed.split(BATCH_SEPARATOR).collect(),
        SplitMode::ParagraphGap => PARAGRAPH_GAP.split(trimmed).collect(),
    }
}

/// An empty chunk never blanks a field.
fn keep_or_replace(original: &str, chunk: &str) -> String {
    let chunk = chunk.trim();
    if chunk.is_empty() {
        original.to_string()
    } else {
        chunk.to_string()
    }
}

/// Cuts `blob` into `lengths.len()` contiguous slices sized by share of the
/// total original length. The slices concatenate back to exactly `blob`.
pub fn proportional_chunks<'a>(lengths: &[usize], blob: &'a str) -> Vec<&'a str> {
    let count = lengths.len();
    if count == 0 {
        return Vec::new();
    }

    // Byte offset of every char boundary, including the end of the string.
    let offsets: Vec<usize> = blob
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(blob.len()))
        .collect();
    let total_chars = offsets.len() - 1;

    let total_original: usize = lengths.iter().sum();
    let share = |len: usize| -> f64 {
        if total_original == 0 {
            1.0 / count as f64
        } else {
            len as f64 / total_original as f64
        }
    };

    // Char positions just past a sentence terminator and its whitespace.
    let sentence_cuts: Vec<usize> = SENTENCE_END
        .find_iter(blob)
        .filter_map(|m| offsets.binary_search(&m.end()).ok())
        .collect();

    let mut chunks = Vec::with_capacity(count);
    let mut cursor = 0usize;

    for (index, &len) in lengths.iter().enumerate() {
        if index + 1 == count {
            chunks.push(&blob[offsets[cursor]..]);
            break;
        }

        let step = (share(len) * total_chars as f64).round() as usize;
        let target = (cursor + step).min(total_chars);
        let cut = nearest_sentence_cut(&sentence_cuts, cursor, target).unwrap_or(target);

        chunks.push(&blob[offsets[cursor]..offsets[cut]]);
        cursor = cut;
    }

    chunks
}

/// Closest sentence cut to `target` that lies within the snap window and
/// strictly after `cursor`. Ties go to the earlier cut.
fn nearest_sentence_cut(cuts: &[usize], cursor: usize, target: usize) -> Option<usize> {
    let low = target.saturating_sub(SNAP_WINDOW);
    let high = target + SNAP_WINDOW;

    cuts.iter()
        .copied()
        .filter(|&c| c > cursor && c >= low && c <= high)
        .min_by_key(|&c| c.abs_diff(target))
}
