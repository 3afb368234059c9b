#![forbid(unsafe_code)]

//! Captured API calls.
//!
//! An [`ApiCall`] is one request/response pair as logged by the inspector.
//! Header blocks are kept as newline-separated `Name: value` text; when a
//! call is loaded from JSON, headers may also be given as an object and are
//! flattened in key order. Bodies may be strings or arbitrary JSON values.

use std::fmt;

use chrono::DateTime;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One captured request/response pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCall {
    /// Identifier assigned by the capturing side, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// HTTP method, e.g. `GET`.
    #[serde(default)]
    pub method: String,
    /// Request URL.
    #[serde(default)]
    pub url: String,
    /// HTTP status code; 0 while pending or unknown.
    #[serde(default, deserialize_with = "status_code")]
    pub status: u16,
    /// Round-trip time in milliseconds.
    #[serde(default, rename = "duration")]
    pub duration_ms: u64,
    /// Capture time, milliseconds since the Unix epoch; 0 when unknown.
    #[serde(default, rename = "timestamp")]
    pub timestamp_ms: i64,
    /// Request headers, one `Name: value` per line.
    #[serde(default, deserialize_with = "header_block")]
    pub request_headers: Option<String>,
    /// Request body.
    #[serde(default, deserialize_with = "body_text")]
    pub request_body: Option<String>,
    /// Response headers, one `Name: value` per line.
    #[serde(default, deserialize_with = "header_block")]
    pub response_headers: Option<String>,
    /// Response body.
    #[serde(default, deserialize_with = "body_text")]
    pub response_body: Option<String>,
    /// Transport or application error message.
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiCall {
    /// Create a call with method and URL; everything else empty.
    #[must_use]
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            ..Self::default()
        }
    }

    /// Set the status code.
    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Set the duration in milliseconds.
    #[must_use]
    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Set the capture time in epoch milliseconds.
    #[must_use]
    pub fn with_timestamp_ms(mut self, timestamp_ms: i64) -> Self {
        self.timestamp_ms = timestamp_ms;
        self
    }

    /// Set the request header block.
    #[must_use]
    pub fn with_request_headers(mut self, headers: impl Into<String>) -> Self {
        self.request_headers = Some(headers.into());
        self
    }

    /// Set the request body.
    #[must_use]
    pub fn with_request_body(mut self, body: impl Into<String>) -> Self {
        self.request_body = Some(body.into());
        self
    }

    /// Set the response header block.
    #[must_use]
    pub fn with_response_headers(mut self, headers: impl Into<String>) -> Self {
        self.response_headers = Some(headers.into());
        self
    }

    /// Set the response body.
    #[must_use]
    pub fn with_response_body(mut self, body: impl Into<String>) -> Self {
        self.response_body = Some(body.into());
        self
    }

    /// Set the error message.
    #[must_use]
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Classification of the status code.
    #[must_use]
    pub fn status_class(&self) -> StatusClass {
        StatusClass::from_status(self.status)
    }

    /// Capture time as wall-clock text (`HH:MM:SS`, UTC), if known.
    #[must_use]
    pub fn clock_text(&self) -> Option<String> {
        if self.timestamp_ms == 0 {
            return None;
        }
        DateTime::from_timestamp_millis(self.timestamp_ms)
            .map(|dt| dt.format("%H:%M:%S").to_string())
    }
}

/// The searchable fields of a call, in aggregation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    /// HTTP method.
    Method,
    /// Request URL.
    Url,
    /// Status code; absent while pending.
    Status,
    /// Duration in milliseconds; absent when zero.
    Duration,
    /// Local `HH:MM:SS` capture time; absent when unset.
    Timestamp,
    /// Request header block.
    RequestHeaders,
    /// Request body, pretty-printed when JSON.
    RequestBody,
    /// Response header block.
    ResponseHeaders,
    /// Response body, pretty-printed when JSON.
    ResponseBody,
    /// Error message.
    Error,
}

impl Field {
    /// Every field, in the fixed order used for aggregation and display.
    pub const ALL: [Field; 10] = [
        Field::Method,
        Field::Url,
        Field::Status,
        Field::Duration,
        Field::Timestamp,
        Field::RequestHeaders,
        Field::RequestBody,
        Field::ResponseHeaders,
        Field::ResponseBody,
        Field::Error,
    ];

    /// Position in [`Field::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Method => "Method",
            Self::Url => "URL",
            Self::Status => "Status",
            Self::Duration => "Duration",
            Self::Timestamp => "Timestamp",
            Self::RequestHeaders => "Request Headers",
            Self::RequestBody => "Request Body",
            Self::ResponseHeaders => "Response Headers",
            Self::ResponseBody => "Response Body",
            Self::Error => "Error",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Coarse class of an HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusClass {
    /// No status yet (0) or outside 100..=599.
    Pending,
    /// 1xx
    Informational,
    /// 2xx
    Success,
    /// 3xx
    Redirect,
    /// 4xx
    ClientError,
    /// 5xx
    ServerError,
}

impl StatusClass {
    /// Classify a status code.
    #[must_use]
    pub const fn from_status(status: u16) -> Self {
        match status {
            100..=199 => Self::Informational,
            200..=299 => Self::Success,
            300..=399 => Self::Redirect,
            400..=499 => Self::ClientError,
            500..=599 => Self::ServerError,
            _ => Self::Pending,
        }
    }

    /// Whether this is a 4xx or 5xx class.
    #[must_use]
    pub const fn is_error(self) -> bool {
        matches!(self, Self::ClientError | Self::ServerError)
    }
}

// ============================================================================
// Deserialization helpers
// ============================================================================

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawHeaders {
    Text(String),
    Map(Map<String, Value>),
}

fn header_block<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawHeaders>::deserialize(deserializer)?;
    Ok(raw.map(|raw| match raw {
        RawHeaders::Text(text) => text,
        RawHeaders::Map(map) => map
            .iter()
            .map(|(name, value)| format!("{name}: {}", value_text(value)))
            .collect::<Vec<_>>()
            .join("\n"),
    }))
}

fn body_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.map(|value| value_text(&value)))
}

fn status_code<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u16>::deserialize(deserializer)?.unwrap_or(0))
}
