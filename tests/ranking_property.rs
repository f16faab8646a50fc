#[macro_use]
extern crate proptest;

use proptest::prelude::{Strategy, prop};

use ranksmith::embedding::{EmbeddingProvider, MockEmbeddingProvider};
use ranksmith::ranking::{cosine_similarity, rank_sections};
use ranksmith::types::{HeadingLevel, PageIndex, Section};

fn block_on<F: std::future::Future<Output = ()>>(fut: F) {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    rt.block_on(fut);
}

/// Finite f32 components in a range embeddings realistically occupy.
fn vector_strategy(len: usize) -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(-10.0f32..10.0, len)
}

/// Section contents: non-empty printable text of varying length.
fn content_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop::string::string_regex("[a-z][a-z ]{10,120}").unwrap(),
        1..12,
    )
}

fn section(index: usize, content: &str) -> Section {
    Section {
        document: "doc.pdf".to_string(),
        heading: format!("Heading {index}"),
        page: PageIndex::from_zero_based(index),
        level: HeadingLevel::H1,
        content: content.to_string(),
    }
}

proptest! {
    #[test]
    fn prop_cosine_is_bounded_and_finite(
        a in vector_strategy(16),
        b in vector_strategy(16),
    ) {
        let score = cosine_similarity(&a, &b);
        prop_assert!(score.is_finite());
        prop_assert!((-1.0..=1.0).contains(&score));
    }

    #[test]
    fn prop_zero_norm_vector_scores_zero(b in vector_strategy(16)) {
        let zeros = vec![0.0f32; 16];
        prop_assert_eq!(cosine_similarity(&zeros, &b), 0.0);
        prop_assert_eq!(cosine_similarity(&b, &zeros), 0.0);
    }

    #[test]
    fn prop_length_mismatch_scores_zero(
        a in vector_strategy(16),
        b in vector_strategy(24),
    ) {
        prop_assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn prop_ranks_are_a_dense_permutation(contents in content_strategy()) {
        block_on(async {
            let provider = MockEmbeddingProvider::new();
            let sections: Vec<Section> = contents
                .iter()
                .enumerate()
                .map(|(i, content)| section(i, content))
                .collect();
            let query = provider.embed("what matters most").await.unwrap();

            let ranked = rank_sections(&provider, &sections, &query).await.unwrap();

            assert_eq!(ranked.len(), sections.len());
            let mut ranks: Vec<usize> =
                ranked.iter().map(|entry| entry.importance_rank).collect();
            ranks.sort_unstable();
            let expected: Vec<usize> = (1..=sections.len()).collect();
            assert_eq!(ranks, expected);
        });
    }

    #[test]
    fn prop_scores_are_non_increasing_by_rank(contents in content_strategy()) {
        block_on(async {
            let provider = MockEmbeddingProvider::new();
            let sections: Vec<Section> = contents
                .iter()
                .enumerate()
                .map(|(i, content)| section(i, content))
                .collect();
            let query = provider.embed("what matters most").await.unwrap();

            let ranked = rank_sections(&provider, &sections, &query).await.unwrap();

            for pair in ranked.windows(2) {
                assert!(pair[0].relevance_score >= pair[1].relevance_score);
                assert!(pair[0].importance_rank < pair[1].importance_rank);
            }
        });
    }

    #[test]
    fn prop_ranking_is_deterministic(contents in content_strategy()) {
        block_on(async {
            let provider = MockEmbeddingProvider::new();
            let sections: Vec<Section> = contents
                .iter()
                .enumerate()
                .map(|(i, content)| section(i, content))
                .collect();
            let query = provider.embed("what matters most").await.unwrap();

            let first = rank_sections(&provider, &sections, &query).await.unwrap();
            let second = rank_sections(&provider, &sections, &query).await.unwrap();
            assert_eq!(first, second);
        });
    }
}
