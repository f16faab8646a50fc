//! Cosine similarity scoring between a query vector and candidate vectors.
//!
//! The scorer is a pure function over its inputs and is shared verbatim by
//! section-level and chunk-level ranking; it never special-cases
//! granularity.

/// Cosine similarity between two vectors, clamped to `[-1, 1]`.
///
/// Anything that would be non-finite — a zero-norm vector, a dimension
/// mismatch — coerces to `0.0` rather than propagating as NaN.
#[must_use]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    let value = dot / (norm_a * norm_b);
    if value.is_finite() {
        value.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// One similarity score per content vector, in input order.
#[must_use]
pub fn cosine_similarities(query: &[f32], contents: &[Vec<f32>]) -> Vec<f32> {
    contents
        .iter()
        .map(|content| cosine_similarity(query, content))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parallel_vectors_score_one() {
        let score = cosine_similarity(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]);
        assert!((score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn opposite_vectors_score_negative_one() {
        let score = cosine_similarity(&[1.0, 0.0], &[-3.0, 0.0]);
        assert!((score + 1.0).abs() < 1e-6);
    }

    #[test]
    fn orthogonal_vectors_score_zero() {
        let score = cosine_similarity(&[1.0, 0.0], &[0.0, 5.0]);
        assert!(score.abs() < 1e-6);
    }

    #[test]
    fn zero_norm_vector_scores_zero_not_nan() {
        let score = cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]);
        assert_eq!(score, 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    #[test]
    fn dimension_mismatch_scores_zero() {
        assert_eq!(cosine_similarity(&[1.0, 2.0], &[1.0]), 0.0);
    }

    #[test]
    fn batch_preserves_input_order() {
        let query = vec![1.0, 0.0];
        let contents = vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![-1.0, 0.0]];
        let scores = cosine_similarities(&query, &contents);
        assert_eq!(scores.len(), 3);
        assert!(scores[0] > scores[1]);
        assert!(scores[1] > scores[2]);
    }
}
