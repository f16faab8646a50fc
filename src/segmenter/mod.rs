//! Document segmentation: headings + page layout → bounded sections.
//!
//! The segmenter provides three capabilities:
//!
//! * [`validator`] — filters candidate heading strings (boilerplate and
//!   noise rejection).
//! * [`boundary`] — resolves the text span owned by each outline heading.
//! * [`heuristic`] — best-effort segmentation when no outline exists.
//!
//! [`segment_document`] dispatches between the precise boundary path and
//! the degraded heuristic path depending on whether the document carries an
//! outline.

pub mod boundary;
pub mod heuristic;
pub mod validator;

pub use boundary::resolve_sections;
pub use heuristic::segment_without_outline;
pub use validator::is_valid_heading;

use crate::types::{DocumentInput, Section};

/// Result of segmenting one document.
#[derive(Clone, Debug, Default)]
pub struct SegmentOutcome {
    /// Sections in discovery order.
    pub sections: Vec<Section>,
    /// Outline headings that produced no section (failed validation,
    /// unlocatable, or resolved to empty text). Always 0 on the heuristic
    /// path, which has no outline to drop from.
    pub dropped_headings: usize,
    /// `true` when the document had no outline and the heuristic path ran.
    pub degraded: bool,
}

/// Segments one document, preferring the outline-guided boundary resolver
/// and falling back to the heuristic path when no outline is available.
pub fn segment_document(document: &DocumentInput) -> SegmentOutcome {
    match &document.outline {
        Some(outline) if !outline.outline.is_empty() => {
            let sections = resolve_sections(&document.name, &outline.outline, &document.pages);
            let dropped_headings = outline.outline.len().saturating_sub(sections.len());
            SegmentOutcome {
                sections,
                dropped_headings,
                degraded: false,
            }
        }
        _ => {
            tracing::debug!(
                document = %document.name,
                "no outline available, using heuristic segmentation"
            );
            SegmentOutcome {
                sections: segment_without_outline(&document.name, &document.pages),
                dropped_headings: 0,
                degraded: true,
            }
        }
    }
}
