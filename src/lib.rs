//! # ranksmith
//!
//! Persona-driven document intelligence: segment a collection of outlined
//! documents into sections, then rank sections and their sub-chunks by
//! embedding similarity against a persona + job-to-be-done query.
//!
//! ```text
//!  DocumentInput ──▶ segmenter ──▶ Sections
//!                                    │
//!  persona + job ──▶ query embed ────┤
//!                                    ▼
//!                                 ranking ──▶ RankedSections
//!                                    │
//!                                    ▼
//!                               subsection ──▶ SubsectionResults
//!                                    │
//!                                    ▼
//!                                 output ──▶ AnalysisOutput (JSON)
//! ```
//!
//! The entry point is [`pipeline::RelevanceService`], constructed through
//! its builder with an [`embedding::EmbeddingProvider`] implementation.
//! [`embedding::MockEmbeddingProvider`] gives deterministic vectors for
//! tests and offline runs.
//!
//! ## Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use ranksmith::embedding::MockEmbeddingProvider;
//! use ranksmith::pipeline::{AnalysisRequest, RelevanceService};
//! use ranksmith::types::{
//!     DocumentInput, DocumentOutline, HeadingLevel, OutlineEntry, PageIndex, PageLayout,
//!     TextBlock,
//! };
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let service = RelevanceService::builder()
//!     .with_embedding_provider(Arc::new(MockEmbeddingProvider::new()))
//!     .build();
//!
//! let page = PageLayout::new(vec![
//!     TextBlock::new("Market Overview", 72.0, 86.0),
//!     TextBlock::new("Revenue grew across all regions this quarter.", 100.0, 114.0),
//! ]);
//! let document = DocumentInput::new("report.pdf", vec![page]).with_outline(DocumentOutline {
//!     title: "Quarterly Report".to_string(),
//!     outline: vec![OutlineEntry::new(
//!         HeadingLevel::H1,
//!         "Market Overview",
//!         PageIndex::from_one_based(1),
//!     )],
//! });
//!
//! let request = AnalysisRequest::new(
//!     "financial analyst",
//!     "assess regional revenue trends",
//!     vec![document],
//! );
//! let response = service.analyze_collection(request).await.unwrap();
//! assert_eq!(response.output.extracted_sections.len(), 1);
//! # }
//! ```

pub mod embedding;
pub mod output;
pub mod pipeline;
pub mod ranking;
pub mod segmenter;
pub mod types;

pub use embedding::{EmbeddingError, EmbeddingProvider, MockEmbeddingProvider, ModelInfo};
pub use output::AnalysisOutput;
pub use pipeline::{
    AnalysisRequest, AnalysisResponse, PipelineError, RelevanceService, RunTelemetry,
};
