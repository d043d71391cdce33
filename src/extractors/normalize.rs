//! Field normalizers
//!
//! Small pure helpers that turn raw landmark text into typed values.
//! Shared by the index, post and comment extractors.

use crate::error::FormatError;

/// Suffixes stripped from discussion-link text, longest first
const COMMENT_COUNT_SUFFIXES: [&str; 2] = [" comments", " comment"];

/// Discussion-link text shown when a post has no comments yet
const NO_COMMENTS_PLACEHOLDER: &str = "View details";

/// Parse an integer rendered with thousands separators, e.g. "2,181"
pub fn parse_noisy_int(text: &str) -> Result<u64, FormatError> {
    let digits = text.replace(',', "");
    digits
        .trim()
        .parse::<u64>()
        .map_err(|e| FormatError::new(text, e))
}

/// Strip newlines and surrounding whitespace from a display name
pub fn clean_display_name(text: &str) -> String {
    text.replace('\n', "").trim().to_string()
}

/// Unwrap a handle rendered as "(@name)"
pub fn extract_handle(text: &str) -> String {
    let trimmed = text.trim();
    let trimmed = trimmed.strip_prefix('(').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix(')').unwrap_or(trimmed);
    trimmed.to_string()
}

/// Turn discussion-link text ("9 comments", "View details") into a count
pub fn normalize_comment_count(text: &str) -> Result<u64, FormatError> {
    let mut count = text.to_string();
    for suffix in COMMENT_COUNT_SUFFIXES {
        count = count.replace(suffix, "");
    }
    let count = count.replace(',', "");
    let count = count.trim();

    if count == NO_COMMENTS_PLACEHOLDER {
        return Ok(0);
    }

    count
        .parse::<u64>()
        .map_err(|e| FormatError::new(text, e))
}
