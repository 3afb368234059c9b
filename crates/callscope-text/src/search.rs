#![forbid(unsafe_code)]

//! Case-insensitive substring search over captured call text.
//!
//! All searches return non-overlapping matches from left to right: after a
//! match the scan resumes at the match end, so `"aaa"` contains a single
//! `"aa"`. Ranges are byte offsets into the *original* text and always sit on
//! char boundaries, even when lowercasing changes the byte length of a char.
//!
//! # Example
//! ```
//! use callscope_text::search::{count_matches, find_matches};
//!
//! let results = find_matches("GET /users HTTP/1.1 users", "USERS");
//! assert_eq!(results.len(), 2);
//! assert_eq!(results[0].range, 5..10);
//! assert_eq!(count_matches("abab", "ab"), 2);
//! ```

use std::ops::Range;

/// A single search match with its byte range in the source text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchResult {
    /// Byte offset range of the match in the source string.
    pub range: Range<usize>,
}

impl SearchResult {
    /// Create a new search result.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { range: start..end }
    }

    /// Start byte offset.
    #[must_use]
    pub fn start(&self) -> usize {
        self.range.start
    }

    /// End byte offset (exclusive).
    #[must_use]
    pub fn end(&self) -> usize {
        self.range.end
    }

    /// Extract the matched text from the source.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.range.clone()]
    }
}

/// Count case-insensitive, non-overlapping occurrences of `needle`.
///
/// Returns 0 when either side is empty.
#[must_use]
pub fn count_matches(haystack: &str, needle: &str) -> usize {
    find_matches(haystack, needle).len()
}

/// Whether `haystack` contains `needle`, ignoring case.
///
/// An empty needle is contained in everything.
#[must_use]
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    if haystack.is_ascii() && needle.is_ascii() {
        return haystack
            .to_ascii_lowercase()
            .contains(&needle.to_ascii_lowercase());
    }
    fold_case(haystack).contains(&fold_case(needle))
}

/// Find all case-insensitive, non-overlapping matches of `needle`.
///
/// ASCII inputs take a fast path that lowers both sides in place; anything
/// else is lowered char by char with a byte map back to the original text.
#[must_use]
pub fn find_matches(haystack: &str, needle: &str) -> Vec<SearchResult> {
    if needle.is_empty() || haystack.is_empty() {
        return Vec::new();
    }

    #[cfg(feature = "tracing")]
    let _span = tracing::trace_span!(
        "find_matches",
        haystack_len = haystack.len(),
        needle_len = needle.len()
    )
    .entered();

    if haystack.is_ascii() && needle.is_ascii() {
        search_ascii_case_insensitive(haystack, needle)
    } else {
        search_unicode_case_insensitive(haystack, needle)
    }
}

/// ASCII lowering keeps byte offsets, so lowered positions index the
/// original text directly.
fn search_ascii_case_insensitive(haystack: &str, needle: &str) -> Vec<SearchResult> {
    let needle = needle.to_ascii_lowercase();
    haystack
        .to_ascii_lowercase()
        .match_indices(needle.as_str())
        .map(|(pos, _)| SearchResult::new(pos, pos + needle.len()))
        .collect()
}

/// Lowercase a string char by char (no context-sensitive rules).
fn fold_case(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// Lowered copy of `text` plus, for every lowered byte, the byte range of the
/// original char it came from.
struct Folded {
    text: String,
    start_map: Vec<usize>,
    end_map: Vec<usize>,
}

impl Folded {
    fn new(source: &str) -> Self {
        let mut text = String::with_capacity(source.len());
        let mut start_map = Vec::with_capacity(source.len());
        let mut end_map = Vec::with_capacity(source.len());
        for (orig_start, ch) in source.char_indices() {
            let orig_end = orig_start + ch.len_utf8();
            let before = text.len();
            text.extend(ch.to_lowercase());
            for _ in before..text.len() {
                start_map.push(orig_start);
                end_map.push(orig_end);
            }
        }
        Self {
            text,
            start_map,
            end_map,
        }
    }
}

fn search_unicode_case_insensitive(haystack: &str, needle: &str) -> Vec<SearchResult> {
    let needle_folded = fold_case(needle);
    if needle_folded.is_empty() {
        return Vec::new();
    }
    let folded = Folded::new(haystack);

    let mut results = Vec::new();
    let mut start = 0;
    while start < folded.text.len() {
        let Some(pos) = folded.text[start..].find(&needle_folded) else {
            break;
        };
        let norm_start = start + pos;
        let norm_end = norm_start + needle_folded.len();

        let orig_start = folded.start_map[norm_start];
        let orig_end = folded.end_map[norm_end - 1];
        results.push(SearchResult::new(orig_start, orig_end));

        // A match can end inside the expansion of one original char; skip the
        // rest of that expansion so original ranges never overlap.
        start = norm_end;
        while start < folded.text.len() && folded.start_map[start] < orig_end {
            start += 1;
        }
    }
    results
}
