//! Sub-section analysis: chunk a section's text and select the best chunk.
//!
//! Chunking is positional, not semantic: blank-line paragraph breaks first,
//! a single-line re-join fallback second, and a truncated slice of the
//! section's own text as the degraded last resort. Selection embeds every
//! chunk and keeps the single highest-scoring one per section — a
//! deliberate simplification trading completeness for a compact
//! reader-facing summary.

use regex::Regex;
use std::sync::LazyLock;

use crate::embedding::{EmbeddingError, EmbeddingProvider};
use crate::ranking::similarity::cosine_similarities;
use crate::types::{RankedSection, SubsectionResult};

/// Sections analyzed per run when the caller does not override the limit.
pub const DEFAULT_MAX_SECTIONS: usize = 20;

/// Chunks shorter than this many characters carry too little meaning.
const MIN_CHUNK_CHARS: usize = 50;

/// Length caps for the degraded (no chunks) and regular refined text.
const DEGRADED_TEXT_CHARS: usize = 500;
const REFINED_TEXT_CHARS: usize = 1000;

const TRUNCATION_MARKER: &str = "...";

static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("paragraph pattern compiles"));

/// Splits section text into paragraph-sized chunks.
///
/// Splits on blank-line paragraph breaks and keeps chunks of at least 50
/// characters. When that yields nothing, contiguous non-empty lines are
/// re-joined into chunks and filtered the same way. An empty result means
/// the caller should fall back to the section's own text.
#[must_use]
pub fn chunk_text(text: &str) -> Vec<String> {
    let mut chunks: Vec<String> = PARAGRAPH_BREAK
        .split(text.trim())
        .map(str::trim)
        .filter(|chunk| chunk.chars().count() >= MIN_CHUNK_CHARS)
        .map(ToString::to_string)
        .collect();

    if chunks.is_empty() {
        let mut current: Vec<&str> = Vec::new();
        for raw_line in text.lines() {
            let line = raw_line.trim();
            if !line.is_empty() {
                current.push(line);
            } else if !current.is_empty() {
                push_if_long(&mut chunks, current.join(" "));
                current.clear();
            }
        }
        if !current.is_empty() {
            push_if_long(&mut chunks, current.join(" "));
        }
    }

    chunks
}

/// Selects the single best-matching chunk within each analyzed section.
///
/// Analyzes the top `max_sections` ranked sections, in the same relative
/// order as the input ranking, and produces exactly one result per section.
/// Sections with no usable chunks yield their own text truncated to 500
/// characters with no chunk score — a degraded result, not an error.
pub async fn analyze_subsections(
    provider: &dyn EmbeddingProvider,
    ranked: &[RankedSection],
    query: &[f32],
    max_sections: usize,
) -> Result<Vec<SubsectionResult>, EmbeddingError> {
    let mut results = Vec::new();

    for entry in ranked.iter().take(max_sections) {
        let chunks = chunk_text(&entry.section.content);

        if chunks.is_empty() {
            tracing::debug!(
                document = %entry.section.document,
                heading = %entry.section.heading,
                "no usable chunks, falling back to truncated section text"
            );
            results.push(SubsectionResult {
                document: entry.section.document.clone(),
                page: entry.section.page,
                refined_text: truncate_chars(&entry.section.content, DEGRADED_TEXT_CHARS),
                chunk_score: None,
            });
            continue;
        }

        let vectors = provider.embed_batch(&chunks).await?;
        if vectors.len() != chunks.len() {
            return Err(EmbeddingError::BatchShape {
                expected: chunks.len(),
                actual: vectors.len(),
            });
        }
        let scores = cosine_similarities(query, &vectors);

        // First chunk wins exact ties.
        let (best_index, best_score) = scores
            .iter()
            .copied()
            .enumerate()
            .fold((0usize, f32::NEG_INFINITY), |best, (index, score)| {
                if score > best.1 { (index, score) } else { best }
            });

        results.push(SubsectionResult {
            document: entry.section.document.clone(),
            page: entry.section.page,
            refined_text: truncate_chars(&chunks[best_index], REFINED_TEXT_CHARS),
            chunk_score: Some(best_score),
        });
    }

    Ok(results)
}

fn push_if_long(chunks: &mut Vec<String>, chunk: String) {
    if chunk.chars().count() >= MIN_CHUNK_CHARS {
        chunks.push(chunk);
    }
}

/// Truncates to at most `max_chars` characters, appending the marker when
/// anything was cut. Always splits on a character boundary.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}{}", &text[..byte_index], TRUNCATION_MARKER),
        None => text.to_string(),
    }
}
