#![forbid(unsafe_code)]

//! Highlight spans for search matches.
//!
//! A [`HighlightSpan`] marks one match in a piece of text and says whether it
//! is the match the cursor is on. Ordinals count matches in scan order; the
//! plain builder starts counting at zero for every text, while
//! [`build_highlights_from`] continues from a running ordinal so one global
//! cursor can be shared by several texts rendered one after another.
//!
//! # Example
//! ```
//! use callscope_text::highlight::build_highlights;
//!
//! let spans = build_highlights("ab AB ab", "ab", 1);
//! assert_eq!(spans.len(), 3);
//! assert!(spans[1].is_current);
//! assert_eq!(spans[1].start, 3);
//! ```

use std::ops::Range;

use crate::search::{SearchResult, find_matches};

/// A highlighted byte range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HighlightSpan {
    /// Start byte offset.
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
    /// Whether this span belongs to the match under the cursor.
    pub is_current: bool,
}

impl HighlightSpan {
    /// Create a span.
    #[must_use]
    pub const fn new(start: usize, end: usize, is_current: bool) -> Self {
        Self {
            start,
            end,
            is_current,
        }
    }

    /// Byte range of the span.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Extract the highlighted text from the source.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.range()]
    }
}

/// Build highlight spans for every match of `query` in `text`.
///
/// The match with ordinal `current_match_index` (0-based, counted within this
/// text) is flagged as current. An empty query yields no spans.
#[must_use]
pub fn build_highlights(text: &str, query: &str, current_match_index: usize) -> Vec<HighlightSpan> {
    build_highlights_from(text, query, current_match_index, 0)
}

/// Like [`build_highlights`], but the first match in `text` has ordinal
/// `first_ordinal`.
///
/// Feed the running total of matches seen in earlier texts as
/// `first_ordinal` to interpret `current_match_index` globally.
#[must_use]
pub fn build_highlights_from(
    text: &str,
    query: &str,
    current_match_index: usize,
    first_ordinal: usize,
) -> Vec<HighlightSpan> {
    spans_from_matches(&find_matches(text, query), current_match_index, first_ordinal)
}

/// Turn precomputed matches into spans, numbering from `first_ordinal`.
#[must_use]
pub fn spans_from_matches(
    matches: &[SearchResult],
    current_match_index: usize,
    first_ordinal: usize,
) -> Vec<HighlightSpan> {
    matches
        .iter()
        .enumerate()
        .map(|(i, m)| {
            HighlightSpan::new(
                m.range.start,
                m.range.end,
                first_ordinal + i == current_match_index,
            )
        })
        .collect()
}

/// How a run of text should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Not part of any match.
    Plain,
    /// Part of a match other than the current one.
    Match,
    /// Part of the current match.
    Current,
}

/// Split `text` into consecutive runs according to `spans`.
///
/// Spans must be sorted and non-overlapping; spans out of bounds or not on
/// char boundaries are ignored. Empty runs are never produced.
#[must_use]
pub fn segments<'a>(text: &'a str, spans: &[HighlightSpan]) -> Vec<(&'a str, SegmentKind)> {
    let mut out = Vec::with_capacity(spans.len() * 2 + 1);
    let mut cursor = 0;
    for span in spans {
        if span.start < cursor
            || span.end > text.len()
            || span.start >= span.end
            || !text.is_char_boundary(span.start)
            || !text.is_char_boundary(span.end)
        {
            continue;
        }
        if span.start > cursor {
            out.push((&text[cursor..span.start], SegmentKind::Plain));
        }
        let kind = if span.is_current {
            SegmentKind::Current
        } else {
            SegmentKind::Match
        };
        out.push((&text[span.range()], kind));
        cursor = span.end;
    }
    if cursor < text.len() {
        out.push((&text[cursor..], SegmentKind::Plain));
    }
    out
}
