//! Boundary resolution: outline headings + positioned blocks → sections.
//!
//! The resolver walks the outline in document reading order and computes the
//! text span each heading owns. Headings that fail validation or cannot be
//! located on their page are skipped rather than guessed at, and sections
//! whose resolved text is empty are dropped; a problem confined to one page
//! costs that page's contribution, never the whole document.
//!
//! Heading lookup keeps a per-page search cursor that advances past each
//! resolved heading. A heading string that recurs earlier on the page (a
//! table-of-contents line, a running header) therefore cannot re-anchor the
//! search behind the previous heading.

use crate::segmenter::validator::is_valid_heading;
use crate::types::{OutlineEntry, PageLayout, Section};

/// Separator used when concatenating block and page texts.
///
/// A blank line, so the sub-section chunker's paragraph split operates
/// directly on resolver output.
const BLOCK_SEPARATOR: &str = "\n\n";

/// Vertical extent of a located heading on its page.
#[derive(Clone, Copy, Debug)]
struct HeadingSpan {
    top: f32,
    bottom: f32,
}

/// Computes the text span owned by each heading in `outline`.
///
/// The outline must already be in document reading order (ascending page,
/// then outline index); the resolver trusts the caller's order and never
/// sorts. Blocks within each [`PageLayout`] must be pre-sorted by vertical
/// position.
///
/// For heading *i*, the owned span starts below the heading's own block and
/// ends at the next heading's top when that heading sits on the same page,
/// or at the page bottom otherwise. Pages strictly between two headings
/// belong entirely to the earlier heading, and the next heading's page
/// contributes its text above that heading's top. The final heading takes
/// all remaining pages.
pub fn resolve_sections(
    document_name: &str,
    outline: &[OutlineEntry],
    pages: &[PageLayout],
) -> Vec<Section> {
    let mut sections = Vec::new();
    // Search cursor: the page it applies to and the vertical position the
    // next same-page lookup must start at.
    let mut cursor_page: Option<usize> = None;
    let mut cursor_y = f32::NEG_INFINITY;

    for (index, entry) in outline.iter().enumerate() {
        if !is_valid_heading(&entry.text) {
            tracing::debug!(heading = %entry.text, "heading rejected by validator");
            continue;
        }

        let page_index = entry.page.zero_based();
        let Some(page) = pages.get(page_index) else {
            tracing::warn!(
                heading = %entry.text,
                page = %entry.page,
                "heading refers to a page outside the document"
            );
            continue;
        };

        let cursor = if cursor_page == Some(page_index) {
            cursor_y
        } else {
            f32::NEG_INFINITY
        };
        let Some(span) = locate_heading(page, &entry.text, cursor) else {
            tracing::debug!(
                heading = %entry.text,
                page = %entry.page,
                "heading not locatable on its page, skipping"
            );
            continue;
        };
        cursor_page = Some(page_index);
        cursor_y = span.bottom;

        let next = outline.get(index + 1);
        let mut parts: Vec<String> = Vec::new();

        // Current page: from below the heading to the end boundary.
        let end_y = match next {
            Some(following) if following.page.zero_based() == page_index => {
                locate_heading(page, &following.text, span.bottom)
                    .map_or(f32::INFINITY, |next_span| next_span.top)
            }
            _ => f32::INFINITY,
        };
        push_nonempty(&mut parts, text_in_range(page, span.bottom, end_y));

        match next {
            Some(following) => {
                let next_page_index = following.page.zero_based();
                // Whole pages strictly between the two headings.
                for between in pages
                    .iter()
                    .take(next_page_index.min(pages.len()))
                    .skip(page_index + 1)
                {
                    push_nonempty(&mut parts, full_page_text(between));
                }
                // Text above the next heading on its own page.
                if next_page_index > page_index {
                    if let Some(tail_page) = pages.get(next_page_index) {
                        if let Some(next_span) =
                            locate_heading(tail_page, &following.text, f32::NEG_INFINITY)
                        {
                            push_nonempty(
                                &mut parts,
                                text_in_range(tail_page, f32::NEG_INFINITY, next_span.top),
                            );
                        }
                    }
                }
            }
            None => {
                // Last heading: everything to the document end.
                for remaining in pages.iter().skip(page_index + 1) {
                    push_nonempty(&mut parts, full_page_text(remaining));
                }
            }
        }

        let content = parts.join(BLOCK_SEPARATOR);
        if content.trim().is_empty() {
            tracing::debug!(heading = %entry.text, "section resolved to empty text, dropped");
            continue;
        }

        sections.push(Section {
            document: document_name.to_string(),
            heading: entry.text.clone(),
            page: entry.page,
            level: entry.level.clone(),
            content,
        });
    }

    sections
}

/// Finds the first block at or after `cursor` whose text contains the
/// heading (case-insensitive). Blocks are pre-sorted vertically, so the
/// first match in scan order is also the topmost.
fn locate_heading(page: &PageLayout, heading: &str, cursor: f32) -> Option<HeadingSpan> {
    let needle = heading.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    page.blocks
        .iter()
        .filter(|block| block.y_top >= cursor)
        .find(|block| block.text.to_lowercase().contains(&needle))
        .map(|block| HeadingSpan {
            top: block.y_top,
            bottom: block.y_bottom,
        })
}

/// Concatenates the trimmed text of all blocks overlapping the open
/// vertical interval `(start_y, end_y)`.
///
/// A block whose top lies at or after `end_y` is excluded, as is a block
/// ending at or above `start_y` — in particular the heading's own block
/// when `start_y` is the heading bottom.
fn text_in_range(page: &PageLayout, start_y: f32, end_y: f32) -> String {
    let mut parts = Vec::new();
    for block in &page.blocks {
        if block.y_bottom > start_y && block.y_top < end_y {
            let trimmed = block.text.trim();
            if !trimmed.is_empty() {
                parts.push(trimmed);
            }
        }
    }
    parts.join(BLOCK_SEPARATOR)
}

fn full_page_text(page: &PageLayout) -> String {
    text_in_range(page, f32::NEG_INFINITY, f32::INFINITY)
}

fn push_nonempty(parts: &mut Vec<String>, text: String) {
    if !text.trim().is_empty() {
        parts.push(text);
    }
}
