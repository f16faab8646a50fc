//! Degraded segmentation for documents without an outline.
//!
//! When no outline exists there are no heading positions to resolve
//! against, so this path guesses probable headings from line shape (length,
//! casing, punctuation, topic keywords) and attributes the following lines
//! to them. It trades boundary precision for coverage and is exercised only
//! when outline data is absent; if even the line heuristic finds nothing,
//! it falls back to harvesting substantial paragraphs directly.

use crate::types::{HeadingLevel, PageIndex, PageLayout, Section};

/// Keywords that suggest a line is a topical heading.
const TOPIC_KEYWORDS: &[&str] = &[
    "guide",
    "activities",
    "tips",
    "cuisine",
    "history",
    "culture",
    "restaurants",
    "hotels",
    "cities",
    "coastal",
    "adventures",
    "packing",
    "nightlife",
    "entertainment",
    "overview",
    "introduction",
];

/// Headings guessed from line shape must fall in this character range.
const MIN_HEADING_CHARS: usize = 11;
const MAX_HEADING_CHARS: usize = 99;

/// Paragraph-harvest fallback: per-page cap and minimum paragraph size.
const MAX_PARAGRAPHS_PER_PAGE: usize = 5;
const MIN_PARAGRAPH_CHARS: usize = 101;

/// Segments a document with no outline into coarse-grained sections.
///
/// Every produced section is `H1`; boundary precision is best-effort.
pub fn segment_without_outline(document_name: &str, pages: &[PageLayout]) -> Vec<Section> {
    let mut sections = Vec::new();

    for (page_index, page) in pages.iter().enumerate() {
        let page_text = page.block_texts().collect::<Vec<_>>().join("\n");
        if page_text.trim().is_empty() {
            continue;
        }

        let page = PageIndex::from_zero_based(page_index);
        let mut current_heading: Option<String> = None;
        let mut current_content: Vec<String> = Vec::new();

        for raw_line in page_text.lines() {
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }
            if looks_like_heading(line) {
                flush_section(
                    &mut sections,
                    document_name,
                    page,
                    current_heading.take(),
                    &mut current_content,
                );
                current_heading = Some(line.to_string());
            } else if current_heading.is_some() {
                current_content.push(line.to_string());
            }
        }
        flush_section(
            &mut sections,
            document_name,
            page,
            current_heading.take(),
            &mut current_content,
        );
    }

    if sections.is_empty() {
        tracing::debug!(
            document = document_name,
            "line heuristic found no sections, harvesting paragraphs"
        );
        sections = harvest_paragraphs(document_name, pages);
    }

    sections
}

/// Line-shape heading test: short-ish, and either fully uppercase, ending
/// in `:` or `.`, or carrying a topic keyword.
fn looks_like_heading(line: &str) -> bool {
    let chars = line.chars().count();
    if chars < MIN_HEADING_CHARS || chars > MAX_HEADING_CHARS {
        return false;
    }
    let lowered = line.to_lowercase();
    is_all_uppercase(line)
        || line.ends_with(':')
        || line.ends_with('.')
        || TOPIC_KEYWORDS.iter().any(|keyword| lowered.contains(keyword))
}

/// `true` when the line has at least one letter and no lowercase letters.
fn is_all_uppercase(line: &str) -> bool {
    line.chars().any(|c| c.is_alphabetic()) && !line.chars().any(|c| c.is_lowercase())
}

fn flush_section(
    sections: &mut Vec<Section>,
    document_name: &str,
    page: PageIndex,
    heading: Option<String>,
    content: &mut Vec<String>,
) {
    if let Some(heading) = heading {
        if !content.is_empty() {
            sections.push(Section {
                document: document_name.to_string(),
                heading,
                page,
                level: HeadingLevel::H1,
                content: content.join("\n"),
            });
        }
    }
    content.clear();
}

/// Fallback of the fallback: take up to five paragraphs per page, keep the
/// substantial ones, and title each by its first sentence.
fn harvest_paragraphs(document_name: &str, pages: &[PageLayout]) -> Vec<Section> {
    let mut sections = Vec::new();

    for (page_index, page) in pages.iter().enumerate() {
        let page_text = page.block_texts().collect::<Vec<_>>().join("\n\n");
        if page_text.trim().is_empty() {
            continue;
        }

        let paragraphs = page_text
            .split("\n\n")
            .map(str::trim)
            .filter(|paragraph| !paragraph.is_empty())
            .take(MAX_PARAGRAPHS_PER_PAGE);

        for (index, paragraph) in paragraphs.enumerate() {
            if paragraph.chars().count() < MIN_PARAGRAPH_CHARS {
                continue;
            }
            let first_sentence = paragraph.split('.').next().unwrap_or(paragraph).trim();
            let heading = if !first_sentence.is_empty() && first_sentence.chars().count() < 100 {
                first_sentence.to_string()
            } else {
                format!("Section {}", index + 1)
            };
            sections.push(Section {
                document: document_name.to_string(),
                heading,
                page: PageIndex::from_zero_based(page_index),
                level: HeadingLevel::H1,
                content: paragraph.to_string(),
            });
        }
    }

    sections
}
