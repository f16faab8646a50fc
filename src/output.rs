//! External output shape for analysis runs.
//!
//! Projects ranked sections and sub-section results into the record an
//! external writer persists. Even a fully failed run can produce a
//! schema-valid record via [`AnalysisOutput::minimal`], so downstream
//! consumers never see a missing or malformed output object.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::embedding::ModelInfo;
use crate::types::{RankedSection, SubsectionResult};

/// Run-level metadata attached to every output record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    pub input_documents: Vec<String>,
    pub persona: String,
    pub job_to_be_done: String,
    /// RFC 3339 timestamp taken when the record was built.
    pub processing_timestamp: String,
    pub model_info: ModelInfo,
    /// Present only when the run failed and the record is the minimal
    /// fallback shape.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One ranked section as it appears in the output record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExtractedSection {
    pub document: String,
    /// One-based, reader-facing page number.
    pub page_number: usize,
    pub section_title: String,
    pub importance_rank: usize,
}

/// One sub-section analysis entry in the output record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubsectionEntry {
    pub document: String,
    pub page_number: usize,
    pub refined_text: String,
}

/// The complete output record for one analysis run.
///
/// `extracted_sections` is ordered by ascending importance rank;
/// `subsection_analysis` follows the ranking order of the sections it was
/// derived from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOutput {
    pub metadata: RunMetadata,
    pub extracted_sections: Vec<ExtractedSection>,
    pub subsection_analysis: Vec<SubsectionEntry>,
}

impl AnalysisOutput {
    /// Builds the output record from ranking results.
    ///
    /// `ranked` must already be in ascending rank order (as produced by the
    /// section ranker); at most `max_sections` entries are emitted.
    pub fn from_results(
        persona: impl Into<String>,
        job_to_be_done: impl Into<String>,
        input_documents: Vec<String>,
        model_info: ModelInfo,
        ranked: &[RankedSection],
        subsections: &[SubsectionResult],
        max_sections: usize,
    ) -> Self {
        let extracted_sections = ranked
            .iter()
            .take(max_sections)
            .map(|entry| ExtractedSection {
                document: entry.section.document.clone(),
                page_number: entry.section.page.one_based(),
                section_title: entry.section.heading.clone(),
                importance_rank: entry.importance_rank,
            })
            .collect();

        let subsection_analysis = subsections
            .iter()
            .map(|result| SubsectionEntry {
                document: result.document.clone(),
                page_number: result.page.one_based(),
                refined_text: result.refined_text.clone(),
            })
            .collect();

        Self {
            metadata: RunMetadata {
                input_documents,
                persona: persona.into(),
                job_to_be_done: job_to_be_done.into(),
                processing_timestamp: Utc::now().to_rfc3339(),
                model_info,
                error: None,
            },
            extracted_sections,
            subsection_analysis,
        }
    }

    /// Builds the minimal, schema-valid record for a failed run: empty
    /// section lists plus an error note in the metadata.
    pub fn minimal(
        persona: impl Into<String>,
        job_to_be_done: impl Into<String>,
        input_documents: Vec<String>,
        model_info: ModelInfo,
        error: impl Into<String>,
    ) -> Self {
        Self {
            metadata: RunMetadata {
                input_documents,
                persona: persona.into(),
                job_to_be_done: job_to_be_done.into(),
                processing_timestamp: Utc::now().to_rfc3339(),
                model_info,
                error: Some(error.into()),
            },
            extracted_sections: Vec::new(),
            subsection_analysis: Vec::new(),
        }
    }

    /// Serializes the record as pretty-printed JSON for the external
    /// writer.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{HeadingLevel, PageIndex, Section};

    fn model_info() -> ModelInfo {
        ModelInfo {
            embedding_dimension: 384,
            max_input_length: 256,
            model_identifier: "mock-embedder".to_string(),
        }
    }

    fn ranked(heading: &str, page: usize, rank: usize, score: f32) -> RankedSection {
        RankedSection {
            section: Section {
                document: "doc.pdf".to_string(),
                heading: heading.to_string(),
                page: PageIndex::from_zero_based(page),
                level: HeadingLevel::H1,
                content: "content".to_string(),
            },
            relevance_score: score,
            importance_rank: rank,
        }
    }

    #[test]
    fn output_preserves_rank_order_and_one_based_pages() {
        let sections = vec![
            ranked("First", 0, 1, 0.9),
            ranked("Second", 2, 2, 0.5),
            ranked("Third", 4, 3, 0.1),
        ];
        let output = AnalysisOutput::from_results(
            "analyst",
            "find things",
            vec!["doc.pdf".to_string()],
            model_info(),
            &sections,
            &[],
            50,
        );

        assert_eq!(output.extracted_sections.len(), 3);
        assert_eq!(output.extracted_sections[0].importance_rank, 1);
        assert_eq!(output.extracted_sections[0].page_number, 1);
        assert_eq!(output.extracted_sections[1].page_number, 3);
        assert_eq!(output.extracted_sections[2].page_number, 5);
    }

    #[test]
    fn output_caps_section_count() {
        let sections: Vec<RankedSection> = (0..10)
            .map(|i| ranked(&format!("Heading {i}"), 0, i + 1, 1.0 - i as f32 * 0.05))
            .collect();
        let output = AnalysisOutput::from_results(
            "analyst",
            "find things",
            vec![],
            model_info(),
            &sections,
            &[],
            4,
        );
        assert_eq!(output.extracted_sections.len(), 4);
    }

    #[test]
    fn successful_output_omits_error_field() {
        let output =
            AnalysisOutput::from_results("p", "j", vec![], model_info(), &[], &[], 50);
        let json = serde_json::to_value(&output).unwrap();
        assert!(json["metadata"].get("error").is_none());
    }

    #[test]
    fn minimal_output_is_schema_valid_with_error_note() {
        let output = AnalysisOutput::minimal(
            "document analyst",
            "extract relevant information",
            vec!["broken.pdf".to_string()],
            model_info(),
            "embedding provider unavailable",
        );
        let json = serde_json::to_value(&output).unwrap();

        assert_eq!(json["extracted_sections"].as_array().unwrap().len(), 0);
        assert_eq!(json["subsection_analysis"].as_array().unwrap().len(), 0);
        assert_eq!(
            json["metadata"]["error"],
            "embedding provider unavailable"
        );
        assert_eq!(json["metadata"]["persona"], "document analyst");
        assert!(json["metadata"]["processing_timestamp"].is_string());
        assert_eq!(json["metadata"]["model_info"]["embedding_dimension"], 384);
    }

    #[test]
    fn record_round_trips_through_json() {
        let output = AnalysisOutput::from_results(
            "p",
            "j",
            vec!["a.pdf".to_string()],
            model_info(),
            &[ranked("Heading", 1, 1, 0.7)],
            &[],
            50,
        );
        let json = output.to_json_pretty().unwrap();
        let parsed: AnalysisOutput = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, output);
    }
}
