#![forbid(unsafe_code)]

//! Cosmetic JSON token classification.
//!
//! Nothing here parses or validates JSON. A [`JsonClassifier`] tags byte
//! ranges of a text blob with a [`JsonTokenClass`] so a renderer can colour
//! them; malformed input is simply under- or over-matched.
//!
//! Two classifiers are provided and are interchangeable:
//! - [`PatternClassifier`](crate::json_pattern::PatternClassifier): regex driven.
//! - [`ScanClassifier`](crate::json_scan::ScanClassifier): single-pass scanner.
//!
//! # Example
//! ```
//! use callscope_text::json::{ClassifierKind, JsonTokenClass, is_json_content};
//!
//! let body = r#"{"ok": true}"#;
//! assert!(is_json_content(body));
//!
//! let tokens = ClassifierKind::Pattern.classifier().classify(body);
//! assert_eq!(tokens[1].class, JsonTokenClass::Key);
//! assert_eq!(tokens[1].text(body), "\"ok\"");
//! ```

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use crate::json_pattern::PatternClassifier;
use crate::json_scan::ScanClassifier;

/// Whether `content` looks like a JSON object or array.
///
/// The trimmed text must start with `{` and end with `}`, or start with `[`
/// and end with `]`.
#[must_use]
pub fn is_json_content(content: &str) -> bool {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return false;
    }
    (trimmed.starts_with('{') && trimmed.ends_with('}'))
        || (trimmed.starts_with('[') && trimmed.ends_with(']'))
}

/// Styling class of a JSON token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonTokenClass {
    /// Object key, quotes included.
    Key,
    /// String value, quotes included.
    StringValue,
    /// `true` or `false`.
    Boolean,
    /// Numeric literal.
    Number,
    /// `null`.
    Null,
    /// `{` or `}`.
    Brace,
    /// `[` or `]`.
    Bracket,
    /// `,`.
    Comma,
    /// `:`.
    Colon,
}

impl JsonTokenClass {
    /// Short lowercase name, handy for logs and test output.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Key => "key",
            Self::StringValue => "string",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::Null => "null",
            Self::Brace => "brace",
            Self::Bracket => "bracket",
            Self::Comma => "comma",
            Self::Colon => "colon",
        }
    }
}

/// A classified byte range.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JsonToken {
    /// Token class.
    pub class: JsonTokenClass,
    /// Byte range in the classified text.
    pub range: Range<usize>,
}

impl JsonToken {
    /// Create a token.
    #[must_use]
    pub fn new(class: JsonTokenClass, range: Range<usize>) -> Self {
        Self { class, range }
    }

    /// Extract the token text from the source.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.range.clone()]
    }
}

/// Capability to tag a text blob with JSON token classes.
///
/// Implementations return tokens sorted by start offset with no two tokens
/// overlapping. Bytes that fit no class (whitespace, junk) are left out.
pub trait JsonClassifier: fmt::Debug + Send + Sync {
    /// Classify `text`.
    fn classify(&self, text: &str) -> Vec<JsonToken>;
}

/// Which classifier implementation to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassifierKind {
    /// Regular-expression patterns.
    #[default]
    Pattern,
    /// Character scanner.
    Scan,
}

impl ClassifierKind {
    /// Instantiate the classifier.
    #[must_use]
    pub fn classifier(self) -> Box<dyn JsonClassifier> {
        match self {
            Self::Pattern => Box::new(PatternClassifier::new()),
            Self::Scan => Box::new(ScanClassifier::new()),
        }
    }

    /// Stable name as accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pattern => "pattern",
            Self::Scan => "scan",
        }
    }
}

impl fmt::Display for ClassifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown classifier name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseClassifierKindError(pub String);

impl fmt::Display for ParseClassifierKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown classifier '{}' (expected 'pattern' or 'scan')",
            self.0
        )
    }
}

impl std::error::Error for ParseClassifierKindError {}

impl FromStr for ClassifierKind {
    type Err = ParseClassifierKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pattern" | "regex" => Ok(Self::Pattern),
            "scan" | "scanner" => Ok(Self::Scan),
            _ => Err(ParseClassifierKindError(s.to_string())),
        }
    }
}
