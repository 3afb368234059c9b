#![forbid(unsafe_code)]

//! Detail view of one call: query, matches and cursor.
//!
//! The query is searched once over the record's [`Aggregate`]; that search
//! defines the total and the ordinal of every match. Matches are then
//! projected onto each field's byte range, so a span's ordinal is always the
//! global one and the current match is highlighted in whichever field holds
//! it. A match straddling a separator is clipped to its in-field parts; a
//! match lying entirely in a separator counts but draws nothing.
//!
//! # Example
//! ```
//! use callscope_inspector::{ApiCall, DetailSession, Field, InspectorConfig};
//!
//! let call = ApiCall::new("GET", "https://api.example.com/users")
//!     .with_response_body(r#"{"users": [{"name": "user one"}]}"#);
//! let mut session = DetailSession::open(call, &InspectorConfig::default());
//!
//! session.set_query("user");
//! assert_eq!(session.status_text(), "1 of 3 matches");
//! session.next();
//! assert_eq!(session.current_field(), Some(Field::ResponseBody));
//! ```

use std::ops::Range;

use callscope_text::{
    HighlightSpan, JsonClassifier, JsonToken, SearchResult, find_matches, is_json_content,
};

use crate::call::{ApiCall, Field};
use crate::config::InspectorConfig;
use crate::navigation::{MatchCursor, SearchState};
use crate::record::{Aggregate, SearchableRecord};
use crate::redact::redact_call;

/// One present field as the detail view draws it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    /// Which field.
    pub field: Field,
    /// Field text.
    pub text: String,
    /// Highlight spans, byte offsets into [`FieldView::text`].
    pub spans: Vec<HighlightSpan>,
    /// Whether the text looks like JSON.
    pub is_json: bool,
}

impl FieldView {
    /// Whether any span in this field is the current match.
    #[must_use]
    pub fn has_current(&self) -> bool {
        self.spans.iter().any(|s| s.is_current)
    }
}

/// A call opened for inspection.
#[derive(Debug)]
pub struct DetailSession {
    call: ApiCall,
    pretty_json: bool,
    redact: Vec<String>,
    classifier: Box<dyn JsonClassifier>,
    record: SearchableRecord,
    aggregate: Aggregate,
    matches: Vec<SearchResult>,
    state: SearchState,
}

impl DetailSession {
    /// Open `call` with an empty query.
    ///
    /// Headers named in `config.redact_headers` are masked before anything
    /// is indexed, so their values can be neither seen nor searched.
    #[must_use]
    pub fn open(call: ApiCall, config: &InspectorConfig) -> Self {
        let call = redact_call(call, &config.redact_headers);
        let record = SearchableRecord::from_call(&call, config.pretty_json);
        let aggregate = record.aggregate();
        Self {
            call,
            pretty_json: config.pretty_json,
            redact: config.redact_headers.clone(),
            classifier: config.classifier.classifier(),
            record,
            aggregate,
            matches: Vec::new(),
            state: SearchState::new(),
        }
    }

    /// The inspected call, headers already masked.
    #[must_use]
    pub fn call(&self) -> &ApiCall {
        &self.call
    }

    /// Whether JSON bodies are re-indented.
    #[must_use]
    pub fn pretty_json(&self) -> bool {
        self.pretty_json
    }

    /// The searchable text of the call.
    #[must_use]
    pub fn record(&self) -> &SearchableRecord {
        &self.record
    }

    /// Search state (query, total, cursor).
    #[must_use]
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Current cursor.
    #[must_use]
    pub fn cursor(&self) -> MatchCursor {
        self.state.cursor()
    }

    /// Replace the query and recount. A new query starts at the first match.
    pub fn set_query(&mut self, query: &str) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "detail_search",
            query_len = query.len(),
            text_len = self.aggregate.text.len()
        )
        .entered();

        self.matches = find_matches(&self.aggregate.text, query);
        self.state.set_query(query, self.matches.len());

        #[cfg(feature = "tracing")]
        tracing::debug!(total = self.matches.len(), "query matched");
    }

    /// Drop the query.
    pub fn clear_query(&mut self) {
        self.matches.clear();
        self.state.clear();
    }

    /// Move to the next match (wraps).
    pub fn next(&mut self) {
        self.state.next();
        #[cfg(feature = "tracing")]
        tracing::trace!(cursor = ?self.state.cursor(), "next match");
    }

    /// Move to the previous match (wraps).
    pub fn previous(&mut self) {
        self.state.previous();
        #[cfg(feature = "tracing")]
        tracing::trace!(cursor = ?self.state.cursor(), "previous match");
    }

    /// Move `steps` matches forward in one jump (wraps).
    pub fn advance(&mut self, steps: usize) {
        self.state.advance(steps);
        #[cfg(feature = "tracing")]
        tracing::trace!(steps, cursor = ?self.state.cursor(), "advance");
    }

    /// Move `steps` matches back in one jump (wraps).
    pub fn retreat(&mut self, steps: usize) {
        self.state.retreat(steps);
        #[cfg(feature = "tracing")]
        tracing::trace!(steps, cursor = ?self.state.cursor(), "retreat");
    }

    /// Swap in an updated version of the call, keeping the query.
    ///
    /// The total is recounted and the cursor clamped into the new range.
    pub fn replace_call(&mut self, call: ApiCall) {
        let call = redact_call(call, &self.redact);
        self.record = SearchableRecord::from_call(&call, self.pretty_json);
        self.aggregate = self.record.aggregate();
        self.call = call;
        self.matches = find_matches(&self.aggregate.text, self.state.query());
        self.state.recompute(self.matches.len());

        #[cfg(feature = "tracing")]
        tracing::debug!(total = self.matches.len(), "call replaced");
    }

    /// `"{current} of {total} matches"` or `"No matches"`.
    #[must_use]
    pub fn status_text(&self) -> String {
        self.state.status_text()
    }

    /// Every present field with its highlight spans.
    #[must_use]
    pub fn field_views(&self) -> Vec<FieldView> {
        let current = self.state.current_match_index();
        self.aggregate
            .ranges
            .iter()
            .map(|(field, range)| {
                let text = self.aggregate.text[range.clone()].to_string();
                let spans = project(&self.matches, range, current);
                let is_json = is_json_content(&text);
                FieldView {
                    field: *field,
                    text,
                    spans,
                    is_json,
                }
            })
            .collect()
    }

    /// The field holding (the start of) the current match.
    #[must_use]
    pub fn current_field(&self) -> Option<Field> {
        let index = self.state.current_match_index()?;
        let m = self.matches.get(index)?;
        self.aggregate
            .ranges
            .iter()
            .find(|(_, r)| r.start < m.range.end && m.range.start < r.end)
            .map(|(f, _)| *f)
    }

    /// JSON tokens for a view, empty when the text is not JSON.
    #[must_use]
    pub fn json_tokens(&self, view: &FieldView) -> Vec<JsonToken> {
        if view.is_json {
            self.classifier.classify(&view.text)
        } else {
            Vec::new()
        }
    }
}

/// Clip aggregate matches to `field`, rebasing offsets to the field start.
fn project(
    matches: &[SearchResult],
    field: &Range<usize>,
    current: Option<usize>,
) -> Vec<HighlightSpan> {
    // Matches are sorted and disjoint, so skip to the first that can overlap.
    let first = matches.partition_point(|m| m.range.end <= field.start);
    matches[first..]
        .iter()
        .enumerate()
        .take_while(|(_, m)| m.range.start < field.end)
        .map(|(i, m)| {
            let start = m.range.start.max(field.start) - field.start;
            let end = m.range.end.min(field.end) - field.start;
            HighlightSpan::new(start, end, current == Some(first + i))
        })
        .filter(|span| span.start < span.end)
        .collect()
}
