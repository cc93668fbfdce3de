//! Excerpt truncation.

use serde_yaml::Value;

/// Marker appended to truncated excerpts.
const ELLIPSIS: &str = "...";

/// Truncate a front-matter description to `length` characters.
///
/// Non-string values yield an empty string.
pub fn truncate_text(value: Option<&Value>, length: usize) -> String {
    match value {
        Some(Value::String(text)) => truncate(text, length),
        _ => String::new(),
    }
}

/// Truncate text longer than `length` characters.
///
/// The result keeps the first `length - 3` characters followed by `...`, so
/// it is exactly `length` characters long. Shorter text is returned as is.
pub fn truncate(text: &str, length: usize) -> String {
    if text.chars().count() <= length {
        return text.to_owned();
    }
    let keep = length.saturating_sub(ELLIPSIS.len());
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}
