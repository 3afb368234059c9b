#![forbid(unsafe_code)]

//! Copy-out formats for a call.

use std::fmt::Write as _;

use chrono::{DateTime, SecondsFormat};

use crate::call::ApiCall;
use crate::redact::redact_headers;

/// A `curl` invocation reproducing the request.
///
/// One `-H` per non-blank header line, with headers named in `redact`
/// masked; the body goes in single quotes with embedded quotes
/// backslash-escaped.
#[must_use]
pub fn curl_command(call: &ApiCall, redact: &[String]) -> String {
    let mut out = format!("curl -X {} \\\n  \"{}\"", call.method, call.url);

    if let Some(headers) = &call.request_headers {
        let headers = redact_headers(headers, redact);
        for header in headers.lines().filter(|h| !h.trim().is_empty()) {
            let _ = write!(out, " \\\n  -H \"{header}\"");
        }
    }

    if let Some(body) = &call.request_body {
        let _ = write!(out, " \\\n  -d '{}'", body.replace('\'', "\\'"));
    }

    out
}

fn timestamp_text(call: &ApiCall) -> String {
    if call.timestamp_ms == 0 {
        return "-".to_string();
    }
    DateTime::from_timestamp_millis(call.timestamp_ms)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_else(|| call.timestamp_ms.to_string())
}

/// Plain-text dump of every field, with headers named in `redact` masked.
#[must_use]
pub fn raw_dump(call: &ApiCall, redact: &[String]) -> String {
    let request_headers = call.request_headers.as_deref().map(|h| redact_headers(h, redact));
    let response_headers = call.response_headers.as_deref().map(|h| redact_headers(h, redact));

    let mut out = String::from("=== API CALL RAW DATA ===\n\n");
    let _ = writeln!(out, "METHOD: {}", call.method);
    let _ = writeln!(out, "URL: {}", call.url);
    let _ = writeln!(out, "STATUS: {}", call.status);
    let _ = writeln!(out, "DURATION: {}ms", call.duration_ms);
    let _ = write!(out, "TIMESTAMP: {}\n\n", timestamp_text(call));

    for (title, value) in [
        ("REQUEST HEADERS", &request_headers),
        ("REQUEST BODY", &call.request_body),
        ("RESPONSE HEADERS", &response_headers),
        ("RESPONSE BODY", &call.response_body),
        ("ERROR", &call.error),
    ] {
        if let Some(value) = value {
            let _ = write!(out, "{title}:\n{value}\n\n");
        }
    }

    out.push_str("=== END RAW DATA ===");
    out
}
