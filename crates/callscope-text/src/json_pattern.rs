#![forbid(unsafe_code)]

//! Regex-driven JSON token classifier.
//!
//! Patterns run in a fixed priority order over the whole text. Each match
//! claims its bytes; a later pattern's match is dropped if it touches bytes
//! that are already claimed. That is what keeps a `,` or `:` inside a string
//! value from being coloured as punctuation.

use std::sync::LazyLock;

use regex::Regex;

use crate::json::{JsonClassifier, JsonToken, JsonTokenClass};

/// A quoted JSON string with backslash escapes.
const STRING: &str = r#""(?:[^"\\]|\\.)*""#;

/// `(class, pattern)` in priority order. When a pattern has a capture group,
/// group 1 is the token; otherwise the whole match is.
static PATTERNS: LazyLock<Vec<(JsonTokenClass, Regex)>> = LazyLock::new(|| {
    let key = format!(r"({STRING})\s*:");
    [
        (JsonTokenClass::Key, key.as_str()),
        (JsonTokenClass::StringValue, STRING),
        (JsonTokenClass::Boolean, r"\b(?:true|false)\b"),
        (JsonTokenClass::Null, r"\bnull\b"),
        (JsonTokenClass::Number, r"-?\d+(?:\.\d+)?(?:[eE][+-]?\d+)?"),
        (JsonTokenClass::Brace, r"[{}]"),
        (JsonTokenClass::Bracket, r"[\[\]]"),
        (JsonTokenClass::Comma, r","),
        (JsonTokenClass::Colon, r":"),
    ]
    .into_iter()
    .map(|(class, pattern)| {
        let re = Regex::new(pattern).expect("built-in JSON token pattern is valid");
        (class, re)
    })
    .collect()
});

/// Classifies JSON text with regular expressions.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternClassifier;

impl PatternClassifier {
    /// Create a classifier. Patterns are compiled once per process.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl JsonClassifier for PatternClassifier {
    fn classify(&self, text: &str) -> Vec<JsonToken> {
        #[cfg(feature = "tracing")]
        let _span = tracing::trace_span!("classify_json", classifier = "pattern", len = text.len())
            .entered();

        let mut claimed = vec![false; text.len()];
        let mut tokens = Vec::new();

        for (class, re) in PATTERNS.iter() {
            for caps in re.captures_iter(text) {
                let Some(m) = caps.get(1).or_else(|| caps.get(0)) else {
                    continue;
                };
                let range = m.range();
                if range.is_empty() || claimed[range.clone()].iter().any(|&c| c) {
                    continue;
                }
                claimed[range.clone()].fill(true);
                tokens.push(JsonToken::new(*class, range));
            }
        }

        tokens.sort_by_key(|t| t.range.start);
        tokens
    }
}
