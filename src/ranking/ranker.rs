//! Section ranking: batch embedding, scoring, and dense rank assignment.

use crate::embedding::{EmbeddingError, EmbeddingProvider};
use crate::ranking::similarity::cosine_similarities;
use crate::types::{RankedSection, Section};

/// Orders sections by relevance to the query vector.
///
/// Embeds every section's content in one batched call (heading text is not
/// separately weighted), scores with cosine similarity, sorts descending by
/// score with a stable sort — exactly equal scores keep the sections'
/// discovery order — and assigns dense 1-indexed importance ranks.
///
/// Sections are composed into [`RankedSection`] values rather than mutated;
/// the input slice is left untouched. Empty input yields empty output.
pub async fn rank_sections(
    provider: &dyn EmbeddingProvider,
    sections: &[Section],
    query: &[f32],
) -> Result<Vec<RankedSection>, EmbeddingError> {
    if sections.is_empty() {
        return Ok(Vec::new());
    }

    let texts: Vec<String> = sections
        .iter()
        .map(|section| section.content.clone())
        .collect();
    let vectors = provider.embed_batch(&texts).await?;
    if vectors.len() != texts.len() {
        return Err(EmbeddingError::BatchShape {
            expected: texts.len(),
            actual: vectors.len(),
        });
    }

    let scores = cosine_similarities(query, &vectors);

    // Stable sort on (discovery index, score): equal scores keep ascending
    // discovery order.
    let mut order: Vec<(usize, f32)> = scores.into_iter().enumerate().collect();
    order.sort_by(|a, b| b.1.total_cmp(&a.1));

    let ranked = order
        .into_iter()
        .enumerate()
        .map(|(position, (index, relevance_score))| RankedSection {
            section: sections[index].clone(),
            relevance_score,
            importance_rank: position + 1,
        })
        .collect::<Vec<_>>();

    tracing::debug!(sections = ranked.len(), "section ranking complete");
    Ok(ranked)
}
