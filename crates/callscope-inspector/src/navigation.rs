#![forbid(unsafe_code)]

//! Match cursor for one open detail view.
//!
//! [`SearchState`] is the only mutable search state there is: a query, how
//! many matches it has in the current record, and which one the cursor is
//! on. Whoever owns the detail view owns the state; dropping the view drops
//! it.
//!
//! ```text
//!             set_query (total > 0)
//!   NoMatches ---------------------> HasMatches(0)
//!       ^                              |    ^
//!       |  set_query / recompute       |    | next: (i + 1) % total
//!       +------ (total == 0) ----------+    | previous: (i + total - 1) % total
//!                                      +----+
//! ```

use std::fmt;

/// Where the cursor is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchCursor {
    /// Nothing to navigate.
    NoMatches,
    /// On match `index` (0-based) of `total`.
    HasMatches { index: usize, total: usize },
}

/// Query, match count and cursor of a detail view.
///
/// Invariant: `current_match_index < total_matches` whenever
/// `total_matches > 0`, and `current_match_index == 0` otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    query: String,
    total_matches: usize,
    current_match_index: usize,
}

impl SearchState {
    /// Empty state: no query, no matches.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current query text.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Number of matches of the query in the current record.
    #[must_use]
    pub fn total_matches(&self) -> usize {
        self.total_matches
    }

    /// Whether there is anything to navigate.
    #[must_use]
    pub fn has_matches(&self) -> bool {
        self.total_matches > 0
    }

    /// 0-based index of the current match, if any.
    #[must_use]
    pub fn current_match_index(&self) -> Option<usize> {
        self.has_matches().then_some(self.current_match_index)
    }

    /// Cursor as a state value.
    #[must_use]
    pub fn cursor(&self) -> MatchCursor {
        if self.has_matches() {
            MatchCursor::HasMatches {
                index: self.current_match_index,
                total: self.total_matches,
            }
        } else {
            MatchCursor::NoMatches
        }
    }

    /// Install `query` with `total` matches.
    ///
    /// A changed query puts the cursor on the first match; re-setting the
    /// same query keeps the cursor and only clamps it.
    pub fn set_query(&mut self, query: &str, total: usize) {
        if self.query != query {
            self.query = query.to_string();
            self.current_match_index = 0;
        }
        self.recompute(total);
    }

    /// The record changed under the same query: take the new total and clamp
    /// the cursor into range.
    pub fn recompute(&mut self, total: usize) {
        self.total_matches = total;
        self.current_match_index = if total == 0 {
            0
        } else {
            self.current_match_index.min(total - 1)
        };
    }

    /// Move to the next match, wrapping to the first. No-op without matches.
    pub fn next(&mut self) {
        if self.total_matches > 0 {
            self.current_match_index = (self.current_match_index + 1) % self.total_matches;
        }
    }

    /// Move to the previous match, wrapping to the last. No-op without
    /// matches.
    pub fn previous(&mut self) {
        if self.total_matches > 0 {
            self.current_match_index =
                (self.current_match_index + self.total_matches - 1) % self.total_matches;
        }
    }

    /// Move `steps` matches forward in one jump, wrapping like repeated
    /// [`next`](Self::next) calls.
    pub fn advance(&mut self, steps: usize) {
        if self.total_matches > 0 {
            let steps = steps % self.total_matches;
            self.current_match_index = (self.current_match_index + steps) % self.total_matches;
        }
    }

    /// Move `steps` matches back in one jump, wrapping like repeated
    /// [`previous`](Self::previous) calls.
    pub fn retreat(&mut self, steps: usize) {
        if self.total_matches > 0 {
            let steps = steps % self.total_matches;
            self.current_match_index =
                (self.current_match_index + self.total_matches - steps) % self.total_matches;
        }
    }

    /// Drop the query and every match.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// `(current_1_based, total)` when there are matches.
    #[must_use]
    pub fn search_info(&self) -> Option<(usize, usize)> {
        self.current_match_index().map(|i| (i + 1, self.total_matches))
    }

    /// `"{current} of {total} matches"` or `"No matches"`.
    #[must_use]
    pub fn status_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SearchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.search_info() {
            Some((current, total)) => write!(f, "{current} of {total} matches"),
            None => f.write_str("No matches"),
        }
    }
}
