//! End-to-end pipeline runs against the deterministic mock embedder.

use std::sync::Arc;

use ranksmith::embedding::MockEmbeddingProvider;
use ranksmith::pipeline::{AnalysisRequest, RelevanceService};
use ranksmith::types::{
    DocumentInput, DocumentOutline, HeadingLevel, OutlineEntry, PageIndex, PageLayout, TextBlock,
};

fn make_service() -> RelevanceService {
    RelevanceService::builder()
        .with_embedding_provider(Arc::new(MockEmbeddingProvider::new()))
        .build()
}

fn block(text: &str, y_top: f32) -> TextBlock {
    TextBlock::new(text, y_top, y_top + 14.0)
}

/// Five-page market report with two outline headings: "Market Overview" on
/// page 1 and "Investment Opportunities" on page 3.
fn market_report() -> DocumentInput {
    let pages = vec![
        PageLayout::new(vec![
            block("Market Overview", 72.0),
            block("Global markets recovered steadily through the quarter.", 100.0),
            block("Consumer spending rose in every tracked region.", 130.0),
        ]),
        PageLayout::new(vec![block(
            "Sector breakdowns show technology leading the recovery.",
            72.0,
        )]),
        PageLayout::new(vec![
            block("Bond yields stabilized after the rate decision.", 72.0),
            block("Investment Opportunities", 110.0),
            block("Emerging markets offer attractive entry points.", 140.0),
        ]),
        PageLayout::new(vec![block(
            "Infrastructure funds remain undervalued relative to peers.",
            72.0,
        )]),
        PageLayout::new(vec![block(
            "Currency hedged positions reduce downside exposure.",
            72.0,
        )]),
    ];
    DocumentInput::new("market_report.pdf", pages).with_outline(DocumentOutline {
        title: "Quarterly Market Report".to_string(),
        outline: vec![
            OutlineEntry::new(HeadingLevel::H1, "Market Overview", PageIndex::from_one_based(1)),
            OutlineEntry::new(
                HeadingLevel::H2,
                "Investment Opportunities",
                PageIndex::from_one_based(3),
            ),
        ],
    })
}

#[tokio::test]
async fn outline_document_yields_one_section_per_heading() {
    let service = make_service();
    let request = AnalysisRequest::new(
        "investment analyst",
        "identify growth opportunities",
        vec![market_report()],
    );

    let response = service.analyze_collection(request).await.unwrap();
    let sections = &response.output.extracted_sections;

    assert_eq!(sections.len(), 2);
    let mut titles: Vec<&str> = sections.iter().map(|s| s.section_title.as_str()).collect();
    titles.sort_unstable();
    assert_eq!(titles, vec!["Investment Opportunities", "Market Overview"]);

    // Page numbers in the output are one-based.
    for section in sections {
        match section.section_title.as_str() {
            "Market Overview" => assert_eq!(section.page_number, 1),
            "Investment Opportunities" => assert_eq!(section.page_number, 3),
            other => panic!("unexpected section {other}"),
        }
    }

    // Ranks are dense and 1-indexed.
    let mut ranks: Vec<usize> = sections.iter().map(|s| s.importance_rank).collect();
    ranks.sort_unstable();
    assert_eq!(ranks, vec![1, 2]);

    // Each ranked section has a sub-section entry, in ranking order.
    assert_eq!(response.output.subsection_analysis.len(), 2);
    assert_eq!(
        response.output.subsection_analysis[0].document,
        "market_report.pdf"
    );
    for entry in &response.output.subsection_analysis {
        assert!(!entry.refined_text.is_empty());
    }
}

#[tokio::test]
async fn reruns_over_identical_input_are_identical() {
    let service = make_service();
    let request = AnalysisRequest::new(
        "investment analyst",
        "identify growth opportunities",
        vec![market_report()],
    );

    let first = service.analyze_collection(request.clone()).await.unwrap();
    let second = service.analyze_collection(request).await.unwrap();

    assert_eq!(
        first.output.extracted_sections,
        second.output.extracted_sections
    );
    assert_eq!(
        first.output.subsection_analysis,
        second.output.subsection_analysis
    );
}

#[tokio::test]
async fn empty_request_produces_schema_valid_empty_output() {
    let service = make_service();
    let request = AnalysisRequest::new("analyst", "find things", vec![]);

    let response = service.analyze_collection(request).await.unwrap();

    assert!(response.output.extracted_sections.is_empty());
    assert!(response.output.subsection_analysis.is_empty());
    assert!(response.output.metadata.error.is_none());
    assert_eq!(response.telemetry.document_count, 0);
    assert_eq!(response.telemetry.section_count, 0);

    // The record still serializes to the full schema.
    let json: serde_json::Value =
        serde_json::from_str(&response.output.to_json_pretty().unwrap()).unwrap();
    assert!(json["metadata"]["processing_timestamp"].is_string());
    assert!(json["extracted_sections"].is_array());
    assert!(json["subsection_analysis"].is_array());
}

#[tokio::test]
async fn document_without_outline_takes_the_heuristic_path() {
    let pages = vec![PageLayout::new(vec![
        block("PACKING ESSENTIALS", 72.0),
        block(
            "Bring layered clothing for cool evenings, sturdy shoes for long walks, \
             and a reusable water bottle so day trips never get cut short.",
            100.0,
        ),
    ])];
    let document = DocumentInput::new("travel_guide.pdf", pages);

    let service = make_service();
    let request = AnalysisRequest::new("travel planner", "plan a week-long trip", vec![document]);

    let response = service.analyze_collection(request).await.unwrap();

    assert_eq!(response.output.extracted_sections.len(), 1);
    assert_eq!(
        response.output.extracted_sections[0].section_title,
        "PACKING ESSENTIALS"
    );
    assert_eq!(response.telemetry.degraded_documents, 1);
}

#[tokio::test]
async fn broken_document_does_not_poison_the_batch() {
    // Outline points at a page the document does not have.
    let broken = DocumentInput::new(
        "broken.pdf",
        vec![PageLayout::new(vec![block("Some body text here.", 72.0)])],
    )
    .with_outline(DocumentOutline {
        title: "Broken".to_string(),
        outline: vec![OutlineEntry::new(
            HeadingLevel::H1,
            "Phantom Heading",
            PageIndex::from_one_based(99),
        )],
    });

    let service = make_service();
    let request = AnalysisRequest::new(
        "investment analyst",
        "identify growth opportunities",
        vec![broken, market_report()],
    );

    let response = service.analyze_collection(request).await.unwrap();

    // The healthy document still produced both of its sections.
    assert_eq!(response.output.extracted_sections.len(), 2);
    assert!(response
        .output
        .extracted_sections
        .iter()
        .all(|s| s.document == "market_report.pdf"));
    assert_eq!(response.telemetry.empty_documents, 1);
    assert_eq!(response.telemetry.dropped_headings, 1);
}

#[tokio::test]
async fn telemetry_reflects_the_run() {
    let service = make_service();
    let request = AnalysisRequest::new(
        "investment analyst",
        "identify growth opportunities",
        vec![market_report()],
    );

    let response = service.analyze_collection(request).await.unwrap();
    let telemetry = &response.telemetry;

    assert_eq!(telemetry.embedder, "mock");
    assert_eq!(telemetry.document_count, 1);
    assert_eq!(telemetry.section_count, 2);
    assert_eq!(telemetry.subsection_count, 2);
    assert_eq!(telemetry.dropped_headings, 0);
    assert_eq!(telemetry.degraded_documents, 0);
    assert_eq!(telemetry.empty_documents, 0);
}

#[tokio::test]
async fn output_section_cap_is_honored() {
    let service = RelevanceService::builder()
        .with_embedding_provider(Arc::new(MockEmbeddingProvider::new()))
        .max_output_sections(1)
        .build();
    let request = AnalysisRequest::new(
        "investment analyst",
        "identify growth opportunities",
        vec![market_report()],
    );

    let response = service.analyze_collection(request).await.unwrap();

    assert_eq!(response.output.extracted_sections.len(), 1);
    assert_eq!(response.output.extracted_sections[0].importance_rank, 1);
    // The ranking itself still covered both sections.
    assert_eq!(response.telemetry.section_count, 2);
}

#[tokio::test]
async fn blank_persona_and_job_fall_back_to_defaults_in_metadata() {
    let service = make_service();
    let request = AnalysisRequest::new("  ", "", vec![market_report()]);

    let response = service.analyze_collection(request).await.unwrap();

    assert_eq!(response.output.metadata.persona, "document analyst");
    assert_eq!(
        response.output.metadata.job_to_be_done,
        "extract relevant information from documents"
    );
}
