#![forbid(unsafe_code)]

//! Inspector settings.
//!
//! Defaults can be overridden through environment variables:
//!
//! | variable                 | meaning                                  |
//! |--------------------------|------------------------------------------|
//! | `CALLSCOPE_LOG_CAPACITY` | max calls kept in a [`CallLog`](crate::CallLog) |
//! | `CALLSCOPE_CLASSIFIER`   | `pattern` or `scan`                      |
//! | `CALLSCOPE_PRETTY_JSON`  | `0`/`false`/`off` to keep bodies verbatim |
//! | `CALLSCOPE_REDACT_HEADERS` | comma-separated header names to mask; empty masks none |
//!
//! Unparseable values are ignored and the default is kept.

use std::env;

use callscope_text::ClassifierKind;

use crate::call_log::DEFAULT_LOG_CAPACITY;
use crate::redact::DEFAULT_REDACTED_HEADERS;

pub const ENV_LOG_CAPACITY: &str = "CALLSCOPE_LOG_CAPACITY";
pub const ENV_CLASSIFIER: &str = "CALLSCOPE_CLASSIFIER";
pub const ENV_PRETTY_JSON: &str = "CALLSCOPE_PRETTY_JSON";
pub const ENV_REDACT_HEADERS: &str = "CALLSCOPE_REDACT_HEADERS";

/// Settings shared by the call log and detail sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectorConfig {
    /// Maximum number of calls kept in the log.
    pub log_capacity: usize,
    /// JSON classifier used for body colouring.
    pub classifier: ClassifierKind,
    /// Re-indent JSON bodies before searching and display.
    pub pretty_json: bool,
    /// Lowercase header names whose values are masked in details and exports.
    pub redact_headers: Vec<String>,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            log_capacity: DEFAULT_LOG_CAPACITY,
            classifier: ClassifierKind::default(),
            pretty_json: true,
            redact_headers: DEFAULT_REDACTED_HEADERS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

impl InspectorConfig {
    /// Defaults overridden by the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(val) = lookup(ENV_LOG_CAPACITY)
            && let Ok(n) = val.trim().parse::<usize>()
            && n > 0
        {
            config.log_capacity = n;
        }
        if let Some(val) = lookup(ENV_CLASSIFIER)
            && let Ok(kind) = val.parse()
        {
            config.classifier = kind;
        }
        if let Some(val) = lookup(ENV_PRETTY_JSON)
            && let Some(flag) = parse_flag(&val)
        {
            config.pretty_json = flag;
        }
        if let Some(val) = lookup(ENV_REDACT_HEADERS) {
            config.redact_headers = parse_header_list(&val);
        }
        config
    }
}

/// Split a comma-separated header list, dropping blanks.
#[must_use]
pub fn parse_header_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|name| name.trim().to_ascii_lowercase())
        .filter(|name| !name.is_empty())
        .collect()
}

/// Parse a boolean-ish environment value.
#[must_use]
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
