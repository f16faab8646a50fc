//! Hierarchical relevance ranking.
//!
//! Two stages share one scorer:
//!
//! * [`similarity`] — cosine similarity between a query vector and
//!   candidate vectors.
//! * [`ranker`] — stage 1: order whole sections by relevance and assign
//!   importance ranks.
//! * [`subsection`] — stage 2: chunk the top sections and select the single
//!   best-matching passage in each.

pub mod ranker;
pub mod similarity;
pub mod subsection;

pub use ranker::rank_sections;
pub use similarity::{cosine_similarities, cosine_similarity};
pub use subsection::{DEFAULT_MAX_SECTIONS, analyze_subsections, chunk_text};
