//! Core domain types for the ranksmith pipeline.
//!
//! This module defines the types that cross the system's boundaries: the
//! outline and page-layout records consumed from upstream collaborators, and
//! the section/ranking values produced by the pipeline stages.
//!
//! # Key Types
//!
//! - [`PageIndex`]: single page-numbering convention for the whole crate
//! - [`HeadingLevel`]: outline depth with a string round-trip encoding
//! - [`DocumentInput`]: one document (name + optional outline + page layout)
//! - [`Section`]: heading-bounded text, immutable once built
//! - [`RankedSection`]: a [`Section`] composed with its score and rank
//! - [`SubsectionResult`]: the best sub-passage selected within a section

use serde::{Deserialize, Serialize};
use std::fmt;

/// Zero-based page position within a document.
///
/// Upstream collaborators disagree on page numbering (outline sources are
/// typically zero-based, reader-facing output is one-based). `PageIndex`
/// fixes the convention once at the boundary: construct with
/// [`from_zero_based`](Self::from_zero_based) or
/// [`from_one_based`](Self::from_one_based), and convert back out with
/// [`one_based`](Self::one_based) only when formatting output.
///
/// # Examples
///
/// ```rust
/// use ranksmith::types::PageIndex;
///
/// let page = PageIndex::from_one_based(3);
/// assert_eq!(page.zero_based(), 2);
/// assert_eq!(page.one_based(), 3);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageIndex(usize);

impl PageIndex {
    /// Wraps a zero-based page position.
    #[must_use]
    pub fn from_zero_based(index: usize) -> Self {
        Self(index)
    }

    /// Converts a one-based page number into the internal convention.
    ///
    /// A page number of `0` (invalid in one-based counting) clamps to the
    /// first page rather than wrapping.
    #[must_use]
    pub fn from_one_based(page_number: usize) -> Self {
        Self(page_number.saturating_sub(1))
    }

    /// The zero-based position, used for indexing into page sequences.
    #[must_use]
    pub fn zero_based(self) -> usize {
        self.0
    }

    /// The one-based page number, used in reader-facing output.
    #[must_use]
    pub fn one_based(self) -> usize {
        self.0 + 1
    }
}

impl fmt::Display for PageIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page {}", self.one_based())
    }
}

/// Outline depth of a heading.
///
/// Supports the common `H1`..`H6` levels plus a forward-compatible
/// [`Other`](Self::Other) variant for outline sources that emit unusual
/// level labels. The [`encode`](Self::encode)/[`decode`](Self::decode) pair
/// round-trips through the plain string form used by outline records.
///
/// # Examples
///
/// ```rust
/// use ranksmith::types::HeadingLevel;
///
/// assert_eq!(HeadingLevel::decode("H2"), HeadingLevel::H2);
/// assert_eq!(HeadingLevel::H2.encode(), "H2");
///
/// // Unknown labels survive the round-trip
/// let odd = HeadingLevel::decode("chapter");
/// assert_eq!(odd.encode(), "chapter");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    /// Any level label not covered by `H1`..`H6`.
    Other(String),
}

impl HeadingLevel {
    /// Encode a level into its persisted string form.
    #[must_use]
    pub fn encode(&self) -> String {
        match self {
            Self::H1 => "H1".to_string(),
            Self::H2 => "H2".to_string(),
            Self::H3 => "H3".to_string(),
            Self::H4 => "H4".to_string(),
            Self::H5 => "H5".to_string(),
            Self::H6 => "H6".to_string(),
            Self::Other(label) => label.clone(),
        }
    }

    /// Decode a persisted string form back into a level.
    ///
    /// Unrecognized labels become [`Other`](Self::Other) so outline sources
    /// with exotic level names still parse.
    #[must_use]
    pub fn decode(s: &str) -> Self {
        match s {
            "H1" => Self::H1,
            "H2" => Self::H2,
            "H3" => Self::H3,
            "H4" => Self::H4,
            "H5" => Self::H5,
            "H6" => Self::H6,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.encode())
    }
}

impl From<String> for HeadingLevel {
    fn from(s: String) -> Self {
        Self::decode(&s)
    }
}

impl From<HeadingLevel> for String {
    fn from(level: HeadingLevel) -> Self {
        level.encode()
    }
}

impl From<&str> for HeadingLevel {
    fn from(s: &str) -> Self {
        Self::decode(s)
    }
}

/// One detected heading in a document outline.
///
/// Produced upstream (outline detection) and consumed in document reading
/// order by the boundary resolver; the resolver trusts the caller's order
/// and never re-sorts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutlineEntry {
    pub level: HeadingLevel,
    pub text: String,
    pub page: PageIndex,
}

impl OutlineEntry {
    pub fn new(level: impl Into<HeadingLevel>, text: impl Into<String>, page: PageIndex) -> Self {
        Self {
            level: level.into(),
            text: text.into(),
            page,
        }
    }
}

/// The outline record supplied by the upstream outline source.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentOutline {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub outline: Vec<OutlineEntry>,
}

/// One positioned text block on a page.
///
/// The atomic unit the boundary resolver consumes. Blocks arrive from the
/// layout collaborator already sorted by vertical position; concatenation
/// order depends on it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    pub text: String,
    pub y_top: f32,
    pub y_bottom: f32,
}

impl TextBlock {
    pub fn new(text: impl Into<String>, y_top: f32, y_bottom: f32) -> Self {
        Self {
            text: text.into(),
            y_top,
            y_bottom,
        }
    }
}

/// The ordered text blocks of a single page.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    pub blocks: Vec<TextBlock>,
}

impl PageLayout {
    pub fn new(blocks: Vec<TextBlock>) -> Self {
        Self { blocks }
    }

    /// Returns `true` when the page carries no text blocks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Iterates over the block texts in layout order.
    pub fn block_texts(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().map(|block| block.text.as_str())
    }
}

/// One document handed to the pipeline: a name, the pages' layout, and an
/// optional outline. Documents without an outline are segmented by the
/// degraded heuristic path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DocumentInput {
    pub name: String,
    #[serde(default)]
    pub outline: Option<DocumentOutline>,
    #[serde(default)]
    pub pages: Vec<PageLayout>,
}

impl DocumentInput {
    pub fn new(name: impl Into<String>, pages: Vec<PageLayout>) -> Self {
        Self {
            name: name.into(),
            outline: None,
            pages,
        }
    }

    /// Attach the outline record for this document.
    #[must_use]
    pub fn with_outline(mut self, outline: DocumentOutline) -> Self {
        self.outline = Some(outline);
        self
    }
}

/// The text content owned by one heading, bounded by the next heading or
/// the document end.
///
/// Immutable once built: ranking composes a [`RankedSection`] around it
/// instead of mutating the section in place, and the content is never
/// re-sliced after assignment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub document: String,
    pub heading: String,
    pub page: PageIndex,
    pub level: HeadingLevel,
    pub content: String,
}

/// A [`Section`] composed with its relevance score and importance rank.
///
/// `importance_rank` is 1-indexed and dense; ties in `relevance_score`
/// keep the sections' original discovery order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RankedSection {
    pub section: Section,
    pub relevance_score: f32,
    pub importance_rank: usize,
}

/// The single best sub-passage selected within one analyzed section.
///
/// `chunk_score` is `None` when the section yielded no usable chunks and
/// the refined text is the truncated section content (degraded result).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubsectionResult {
    pub document: String,
    pub page: PageIndex,
    pub refined_text: String,
    pub chunk_score: Option<f32>,
}
