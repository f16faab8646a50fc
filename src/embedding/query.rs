//! Query composition: persona + job-to-be-done → one embeddable sentence.

/// Persona used when the caller supplies none.
pub const DEFAULT_PERSONA: &str = "document analyst";

/// Job-to-be-done used when the caller supplies none.
pub const DEFAULT_JOB: &str = "extract relevant information from documents";

/// The persona that will actually be embedded: the input, trimmed, or the
/// default when the input is blank.
#[must_use]
pub fn resolved_persona(persona: &str) -> &str {
    non_blank_or(persona, DEFAULT_PERSONA)
}

/// The job-to-be-done that will actually be embedded.
#[must_use]
pub fn resolved_job(job: &str) -> &str {
    non_blank_or(job, DEFAULT_JOB)
}

/// Merges persona and job-to-be-done into a single natural-language query
/// sentence for embedding.
///
/// Pure and total: blank inputs fall back to the defaults, so the result is
/// always a grammatically valid sentence.
///
/// # Examples
///
/// ```rust
/// use ranksmith::embedding::compose_query;
///
/// let query = compose_query("investment analyst", "analyze market trends");
/// assert_eq!(
///     query,
///     "As a investment analyst, my primary objective is to analyze market trends."
/// );
/// ```
#[must_use]
pub fn compose_query(persona: &str, job: &str) -> String {
    format!(
        "As a {}, my primary objective is to {}.",
        resolved_persona(persona),
        resolved_job(job)
    )
}

fn non_blank_or<'a>(value: &'a str, default: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() { default } else { trimmed }
}
