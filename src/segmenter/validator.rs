//! Heading validation: boilerplate and noise rejection.
//!
//! Outline detectors routinely surface figure captions, publisher
//! boilerplate, and contact lines as heading candidates. The validator is a
//! pure predicate applied before boundary resolution so those candidates
//! never become sections.

use regex::Regex;
use std::sync::LazyLock;

/// Case-insensitive substrings that mark boilerplate rather than real
/// headings.
const NEGATIVE_KEYWORDS: &[&str] = &[
    "figure",
    "table",
    "university",
    "department",
    "institute",
    "inc.",
    "llc",
    "copyright",
    "issn",
    "editor",
    "author",
    "reviewed by",
    "letter from",
    "in this issue",
    "continued",
    "www.",
];

/// Longest plausible heading, in characters.
const MAX_HEADING_CHARS: usize = 200;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+").expect("email pattern compiles"));

/// Returns `true` when `text` is a plausible section heading.
///
/// Rejects empty or whitespace-only text, text over 200 characters, text
/// containing any boilerplate marker (case-insensitive), and text carrying
/// an email address. Deterministic and side-effect free.
///
/// # Examples
///
/// ```rust
/// use ranksmith::segmenter::is_valid_heading;
///
/// assert!(is_valid_heading("Market Overview"));
/// assert!(!is_valid_heading("Figure 3: quarterly revenue"));
/// assert!(!is_valid_heading("   "));
/// ```
#[must_use]
pub fn is_valid_heading(text: &str) -> bool {
    let lowered = text.to_lowercase();
    if lowered.trim().is_empty() || lowered.chars().count() > MAX_HEADING_CHARS {
        return false;
    }
    if NEGATIVE_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
    {
        return false;
    }
    if EMAIL_PATTERN.is_match(&lowered) {
        return false;
    }
    true
}
