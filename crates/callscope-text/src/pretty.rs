#![forbid(unsafe_code)]

//! Best-effort JSON pretty printing for captured bodies.

use serde_json::Value;

/// Re-indent `value` with two spaces if it parses as JSON.
///
/// Key order is preserved. Text that does not parse is returned unchanged,
/// and empty input gives an empty string.
#[must_use]
pub fn try_format_json(value: &str) -> String {
    if value.trim().is_empty() {
        return String::new();
    }
    match serde_json::from_str::<Value>(value) {
        Ok(parsed) => serde_json::to_string_pretty(&parsed).unwrap_or_else(|_| value.to_string()),
        Err(_) => value.to_string(),
    }
}
