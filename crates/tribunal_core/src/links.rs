//! Video link validation

use regex::Regex;

/// Whether the value looks like an absolute http(s) URL with no embedded
/// whitespace. Scheme matching is case-insensitive.
pub fn is_video_link(value: &str) -> bool {
    Regex::new(r"(?i)^https?://\S+$")
        .map(|re| re.is_match(value))
        .unwrap_or(false)
}

/// Trim a form field and treat an empty result as "not provided".
pub fn normalized_link(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
