#![forbid(unsafe_code)]

//! Text primitives for callscope.
//!
//! This crate provides the pure, render-agnostic pieces of call inspection:
//! - [`find_matches`] / [`count_matches`] - case-insensitive, non-overlapping search
//! - [`HighlightSpan`] - a match range flagged current or not
//! - [`JsonClassifier`] - cosmetic JSON token classes for syntax colouring
//! - [`try_format_json`] - best-effort pretty printing
//! - [`truncate_text`] - cell-width aware one-line previews
//!
//! # Example
//! ```
//! use callscope_text::{build_highlights, count_matches, is_json_content};
//!
//! let body = r#"{"name": "Jane", "email": "jane@example.com"}"#;
//! assert!(is_json_content(body));
//! assert_eq!(count_matches(body, "JANE"), 2);
//!
//! let spans = build_highlights(body, "jane", 1);
//! assert!(!spans[0].is_current);
//! assert!(spans[1].is_current);
//! ```

pub mod highlight;
pub mod json;
pub mod json_pattern;
pub mod json_scan;
pub mod pretty;
pub mod search;
pub mod truncate;

pub use highlight::{
    HighlightSpan, SegmentKind, build_highlights, build_highlights_from, segments,
    spans_from_matches,
};
pub use json::{
    ClassifierKind, JsonClassifier, JsonToken, JsonTokenClass, ParseClassifierKindError,
    is_json_content,
};
pub use json_pattern::PatternClassifier;
pub use json_scan::ScanClassifier;
pub use pretty::try_format_json;
pub use search::{SearchResult, contains_ignore_case, count_matches, find_matches};
pub use truncate::{
    DEFAULT_PREVIEW_WIDTH, ELLIPSIS, display_width, truncate_text, truncate_to_width,
};
