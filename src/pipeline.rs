//! Pipeline orchestration: segment → embed → rank → refine → format.
//!
//! [`RelevanceService`] wires the stages together around one injected
//! [`EmbeddingProvider`], the pipeline's only long-lived shared resource.
//! Stages run strictly in sequence and each fully consumes its input before
//! the next begins. Input defects (a document that yields no sections, a
//! heading that cannot be placed) are recovered locally; embedding failures
//! are hard errors for the run, since no meaningful fallback exists.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use thiserror::Error;
use tracing::instrument;

use crate::embedding::{EmbeddingError, EmbeddingProvider, compose_query, resolved_job, resolved_persona};
use crate::output::AnalysisOutput;
use crate::ranking::{DEFAULT_MAX_SECTIONS, analyze_subsections, rank_sections};
use crate::segmenter::segment_document;
use crate::types::{DocumentInput, Section};

/// Ranked sections included in the output record by default.
pub const DEFAULT_MAX_OUTPUT_SECTIONS: usize = 50;

/// Errors that abort an analysis run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The embedding collaborator failed; the run cannot proceed.
    #[error(transparent)]
    Embedding(#[from] EmbeddingError),
}

/// One analysis request: the reader intent plus the document collection.
#[derive(Clone, Debug)]
pub struct AnalysisRequest {
    pub persona: String,
    pub job_to_be_done: String,
    pub documents: Vec<DocumentInput>,
}

impl AnalysisRequest {
    pub fn new(
        persona: impl Into<String>,
        job_to_be_done: impl Into<String>,
        documents: Vec<DocumentInput>,
    ) -> Self {
        Self {
            persona: persona.into(),
            job_to_be_done: job_to_be_done.into(),
            documents,
        }
    }
}

/// Observability summary of one analysis run.
#[derive(Clone, Debug, Serialize)]
pub struct RunTelemetry {
    /// Name of the embedding provider that served the run.
    pub embedder: String,
    pub duration_ms: u64,
    pub document_count: usize,
    pub section_count: usize,
    pub subsection_count: usize,
    /// Outline headings that produced no section.
    pub dropped_headings: usize,
    /// Documents segmented without an outline (heuristic path).
    pub degraded_documents: usize,
    /// Documents that contributed zero sections.
    pub empty_documents: usize,
}

/// The output record plus run telemetry.
#[derive(Clone, Debug)]
pub struct AnalysisResponse {
    pub output: AnalysisOutput,
    pub telemetry: RunTelemetry,
}

/// Ranks a document collection against a persona + job-to-be-done query.
///
/// Construct via [`builder`](Self::builder), injecting the embedding
/// provider so tests can substitute a deterministic stub:
///
/// ```rust
/// use std::sync::Arc;
/// use ranksmith::embedding::MockEmbeddingProvider;
/// use ranksmith::pipeline::RelevanceService;
///
/// let service = RelevanceService::builder()
///     .with_embedding_provider(Arc::new(MockEmbeddingProvider::new()))
///     .max_subsections(10)
///     .build();
/// ```
pub struct RelevanceService {
    provider: Arc<dyn EmbeddingProvider>,
    max_subsections: usize,
    max_output_sections: usize,
}

impl RelevanceService {
    /// Create a new builder for constructing a `RelevanceService`.
    pub fn builder() -> RelevanceServiceBuilder {
        RelevanceServiceBuilder::default()
    }

    /// Runs the full pipeline over one document collection.
    ///
    /// A document that yields no sections contributes nothing but never
    /// aborts the batch. A collection that yields no sections at all
    /// produces an output record with empty lists rather than an error.
    #[instrument(
        skip(self, request),
        fields(documents = request.documents.len()),
        err
    )]
    pub async fn analyze_collection(
        &self,
        request: AnalysisRequest,
    ) -> Result<AnalysisResponse, PipelineError> {
        let started = Instant::now();

        let persona = resolved_persona(&request.persona).to_string();
        let job = resolved_job(&request.job_to_be_done).to_string();
        let input_documents: Vec<String> = request
            .documents
            .iter()
            .map(|document| document.name.clone())
            .collect();

        // Stage 1: segment every document into sections.
        let mut sections: Vec<Section> = Vec::new();
        let mut dropped_headings = 0;
        let mut degraded_documents = 0;
        let mut empty_documents = 0;
        for document in &request.documents {
            let outcome = segment_document(document);
            dropped_headings += outcome.dropped_headings;
            if outcome.degraded {
                degraded_documents += 1;
            }
            if outcome.sections.is_empty() {
                empty_documents += 1;
                tracing::warn!(document = %document.name, "document produced no sections");
            } else {
                tracing::debug!(
                    document = %document.name,
                    sections = outcome.sections.len(),
                    "document segmented"
                );
            }
            sections.extend(outcome.sections);
        }

        let model_info = self.provider.model_info();

        if sections.is_empty() {
            tracing::warn!("no sections extracted from the collection, emitting empty output");
            let output = AnalysisOutput::from_results(
                &persona,
                &job,
                input_documents,
                model_info,
                &[],
                &[],
                self.max_output_sections,
            );
            let telemetry = self.telemetry(
                started,
                request.documents.len(),
                0,
                0,
                dropped_headings,
                degraded_documents,
                empty_documents,
            );
            return Ok(AnalysisResponse { output, telemetry });
        }

        // Stage 2: one query vector for the whole run.
        let query_text = compose_query(&request.persona, &request.job_to_be_done);
        let query = self.provider.embed(&query_text).await?;

        // Stage 3: hierarchical ranking.
        let ranked = rank_sections(self.provider.as_ref(), &sections, &query).await?;
        let subsections =
            analyze_subsections(self.provider.as_ref(), &ranked, &query, self.max_subsections)
                .await?;

        // Stage 4: project into the external output shape.
        let output = AnalysisOutput::from_results(
            &persona,
            &job,
            input_documents,
            model_info,
            &ranked,
            &subsections,
            self.max_output_sections,
        );
        let telemetry = self.telemetry(
            started,
            request.documents.len(),
            ranked.len(),
            subsections.len(),
            dropped_headings,
            degraded_documents,
            empty_documents,
        );
        tracing::debug!(
            sections = telemetry.section_count,
            subsections = telemetry.subsection_count,
            duration_ms = telemetry.duration_ms,
            "collection analysis complete"
        );

        Ok(AnalysisResponse { output, telemetry })
    }

    #[allow(clippy::too_many_arguments)]
    fn telemetry(
        &self,
        started: Instant,
        document_count: usize,
        section_count: usize,
        subsection_count: usize,
        dropped_headings: usize,
        degraded_documents: usize,
        empty_documents: usize,
    ) -> RunTelemetry {
        RunTelemetry {
            embedder: self.provider.name().to_string(),
            duration_ms: started.elapsed().as_millis() as u64,
            document_count,
            section_count,
            subsection_count,
            dropped_headings,
            degraded_documents,
            empty_documents,
        }
    }
}

/// Builder for constructing [`RelevanceService`] instances.
#[derive(Default)]
pub struct RelevanceServiceBuilder {
    provider: Option<Arc<dyn EmbeddingProvider>>,
    max_subsections: Option<usize>,
    max_output_sections: Option<usize>,
}

impl RelevanceServiceBuilder {
    /// Set the embedding provider to use.
    ///
    /// This is required before calling [`build()`](Self::build).
    #[must_use]
    pub fn with_embedding_provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Cap on ranked sections analyzed for sub-sections.
    ///
    /// Defaults to [`DEFAULT_MAX_SECTIONS`].
    #[must_use]
    pub fn max_subsections(mut self, limit: usize) -> Self {
        self.max_subsections = Some(limit);
        self
    }

    /// Cap on ranked sections included in the output record.
    ///
    /// Defaults to [`DEFAULT_MAX_OUTPUT_SECTIONS`].
    #[must_use]
    pub fn max_output_sections(mut self, limit: usize) -> Self {
        self.max_output_sections = Some(limit);
        self
    }

    /// Build the [`RelevanceService`].
    ///
    /// # Panics
    ///
    /// Panics if [`with_embedding_provider()`](Self::with_embedding_provider)
    /// was not called.
    pub fn build(self) -> RelevanceService {
        RelevanceService {
            provider: self
                .provider
                .expect("RelevanceServiceBuilder requires an embedding provider"),
            max_subsections: self.max_subsections.unwrap_or(DEFAULT_MAX_SECTIONS),
            max_output_sections: self.max_output_sections.unwrap_or(DEFAULT_MAX_OUTPUT_SECTIONS),
        }
    }

    /// Build the [`RelevanceService`], returning `None` if no provider was
    /// set.
    pub fn try_build(self) -> Option<RelevanceService> {
        Some(RelevanceService {
            provider: self.provider?,
            max_subsections: self.max_subsections.unwrap_or(DEFAULT_MAX_SECTIONS),
            max_output_sections: self.max_output_sections.unwrap_or(DEFAULT_MAX_OUTPUT_SECTIONS),
        })
    }
}
