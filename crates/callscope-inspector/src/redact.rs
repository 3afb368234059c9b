#![forbid(unsafe_code)]

//! Masking of sensitive header values.
//!
//! Header blocks are `Name: value` lines. A line whose name is in the
//! configured key list (ASCII case-insensitive) keeps its name and gets
//! [`REDACTED`] as its value; every other line is left alone.

use crate::call::ApiCall;

/// Replacement for a masked header value.
pub const REDACTED: &str = "[REDACTED]";

/// Header names masked when nothing else is configured.
pub const DEFAULT_REDACTED_HEADERS: [&str; 3] = ["authorization", "cookie", "x-api-key"];

fn is_sensitive(name: &str, keys: &[String]) -> bool {
    let name = name.trim();
    keys.iter().any(|key| key.trim().eq_ignore_ascii_case(name))
}

/// Mask the values of headers named in `keys`.
///
/// Line endings (`\n` or `\r\n`) and lines without a colon are kept as is.
#[must_use]
pub fn redact_headers(block: &str, keys: &[String]) -> String {
    if keys.is_empty() {
        return block.to_string();
    }
    let mut out = String::with_capacity(block.len());
    for line in block.split_inclusive('\n') {
        let text = line.trim_end_matches(['\r', '\n']);
        let ending = &line[text.len()..];
        match text.split_once(':') {
            Some((name, _)) if is_sensitive(name, keys) => {
                out.push_str(name);
                out.push_str(": ");
                out.push_str(REDACTED);
            }
            _ => out.push_str(text),
        }
        out.push_str(ending);
    }
    out
}

/// `call` with both header blocks masked.
#[must_use]
pub fn redact_call(mut call: ApiCall, keys: &[String]) -> ApiCall {
    for headers in [&mut call.request_headers, &mut call.response_headers] {
        if let Some(block) = headers {
            *block = redact_headers(block, keys);
        }
    }
    call
}
