// src/utils.rs
use chrono::{SecondsFormat, Utc};

pub const ELLIPSIS: &str = "...";

/// Keep the first `max_chars` characters and append "..." when the text is longer.
/// Counts Unicode scalar values, so accented letters never get split.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}{}", &text[..byte_index], ELLIPSIS),
        None => text.to_string(),
    }
}

/// Current UTC time as RFC 3339 with milliseconds, e.g. `2026-07-01T08:30:00.123Z`.
pub fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Shorten upstream error bodies before they reach the logs.
pub fn log_excerpt(body: &str) -> String {
    truncate_with_ellipsis(body.trim(), 500)
}
