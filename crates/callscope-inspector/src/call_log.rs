#![forbid(unsafe_code)]

//! The list of captured calls.
//!
//! [`CallLog`] keeps calls newest first and evicts the oldest once full.
//! Listing goes through [`filter_calls`] (free-text) and [`StatusFilter`];
//! [`CallStats`] summarises a log.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use callscope_text::contains_ignore_case;

use crate::call::{ApiCall, StatusClass};

/// Calls kept when no capacity is configured.
pub const DEFAULT_LOG_CAPACITY: usize = 500;

/// Bounded, newest-first call list.
#[derive(Debug, Clone)]
pub struct CallLog {
    calls: VecDeque<ApiCall>,
    capacity: usize,
}

impl Default for CallLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_LOG_CAPACITY)
    }
}

impl CallLog {
    /// Empty log holding at most `capacity` calls (at least one).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            calls: VecDeque::with_capacity(capacity.min(DEFAULT_LOG_CAPACITY)),
            capacity,
        }
    }

    /// Add a call at the front, evicting the oldest when full.
    pub fn record(&mut self, call: ApiCall) {
        self.calls.push_front(call);
        if self.calls.len() > self.capacity
            && let Some(_evicted) = self.calls.pop_back()
        {
            #[cfg(feature = "tracing")]
            tracing::trace!(url = %_evicted.url, "evicted oldest call");
        }
    }

    /// Add calls in capture order; the last one ends up first.
    pub fn extend<I: IntoIterator<Item = ApiCall>>(&mut self, calls: I) {
        for call in calls {
            self.record(call);
        }
    }

    /// Number of calls held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.calls.len()
    }

    /// Whether the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Maximum number of calls held.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Call at `index` (0 = newest).
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ApiCall> {
        self.calls.get(index)
    }

    /// Newest-first iterator.
    pub fn iter(&self) -> impl Iterator<Item = &ApiCall> + '_ {
        self.calls.iter()
    }

    /// Drop every call.
    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Calls passing both the text query and the status filter.
    #[must_use]
    pub fn filtered(&self, query: &str, status: StatusFilter) -> Vec<&ApiCall> {
        self.calls
            .iter()
            .filter(|call| status.accepts(call) && call_matches(call, query))
            .collect()
    }

    /// Totals over the whole log.
    #[must_use]
    pub fn stats(&self) -> CallStats {
        CallStats::from_calls(self.calls.iter())
    }
}

/// Whether `call` contains `query` (case-insensitive) in its URL, headers or
/// bodies. An empty query matches everything.
#[must_use]
pub fn call_matches(call: &ApiCall, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    contains_ignore_case(&call.url, query)
        || [
            &call.request_headers,
            &call.request_body,
            &call.response_headers,
            &call.response_body,
        ]
        .into_iter()
        .flatten()
        .any(|text| contains_ignore_case(text, query))
}

/// Calls from `calls` matching `query`, in their original order.
#[must_use]
pub fn filter_calls<'a, I>(calls: I, query: &str) -> Vec<&'a ApiCall>
where
    I: IntoIterator<Item = &'a ApiCall>,
{
    calls
        .into_iter()
        .filter(|call| call_matches(call, query))
        .collect()
}

/// Status-based list filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// Everything.
    #[default]
    All,
    /// 2xx responses.
    Success,
    /// 4xx/5xx responses and failed calls.
    Errors,
    /// No status and no error yet.
    Pending,
}

impl StatusFilter {
    /// Whether `call` passes the filter.
    #[must_use]
    pub fn accepts(self, call: &ApiCall) -> bool {
        let class = call.status_class();
        match self {
            Self::All => true,
            Self::Success => class == StatusClass::Success,
            Self::Errors => class.is_error() || call.error.is_some(),
            Self::Pending => call.status == 0 && call.error.is_none(),
        }
    }

    /// Stable name as accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Success => "success",
            Self::Errors => "errors",
            Self::Pending => "pending",
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown status filter name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStatusFilterError(pub String);

impl fmt::Display for ParseStatusFilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown status filter '{}' (expected all, success, errors or pending)",
            self.0
        )
    }
}

impl std::error::Error for ParseStatusFilterError {}

impl FromStr for StatusFilter {
    type Err = ParseStatusFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "success" | "ok" => Ok(Self::Success),
            "errors" | "error" => Ok(Self::Errors),
            "pending" => Ok(Self::Pending),
            _ => Err(ParseStatusFilterError(s.to_string())),
        }
    }
}

/// Call counts for the list header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallStats {
    /// All calls.
    pub total: usize,
    /// 2xx calls.
    pub success: usize,
    /// Every call that is not 2xx.
    pub errors: usize,
}

impl CallStats {
    /// Count `calls`.
    #[must_use]
    pub fn from_calls<'a, I>(calls: I) -> Self
    where
        I: IntoIterator<Item = &'a ApiCall>,
    {
        let mut stats = Self::default();
        for call in calls {
            stats.total += 1;
            if call.status_class() == StatusClass::Success {
                stats.success += 1;
            }
        }
        stats.errors = stats.total - stats.success;
        stats
    }
}

impl fmt::Display for CallStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} total, {} success, {} errors",
            self.total, self.success, self.errors
        )
    }
}
