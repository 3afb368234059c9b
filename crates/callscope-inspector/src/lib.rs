#![forbid(unsafe_code)]

//! Call inspection model for callscope.
//!
//! - [`ApiCall`] - one captured request/response pair
//! - [`SearchableRecord`] - the searchable text of a call, field by field
//! - [`SearchState`] - query, match count and wrap-around cursor
//! - [`DetailSession`] - a call opened for search and navigation
//! - [`CallLog`] - bounded newest-first call list with filtering and stats
//! - [`detail_sections`], [`curl_command`], [`raw_dump`] - display and export
//! - [`redact_headers`] - masking of sensitive header values
//!
//! # Example
//! ```
//! use callscope_inspector::{ApiCall, CallLog, DetailSession, InspectorConfig, StatusFilter};
//!
//! let config = InspectorConfig::default();
//! let mut log = CallLog::with_capacity(config.log_capacity);
//! log.record(ApiCall::new("GET", "https://api.example.com/users").with_status(200));
//! log.record(ApiCall::new("GET", "https://api.example.com/404").with_status(404));
//!
//! assert_eq!(log.filtered("", StatusFilter::Errors).len(), 1);
//!
//! let call = log.get(1).cloned().unwrap_or_default();
//! let mut session = DetailSession::open(call, &config);
//! session.set_query("api");
//! assert_eq!(session.status_text(), "1 of 1 matches");
//! ```

pub mod call;
pub mod call_log;
pub mod config;
pub mod export;
pub mod load;
pub mod navigation;
pub mod record;
pub mod redact;
pub mod sections;
pub mod session;

pub use call::{ApiCall, Field, StatusClass};
pub use call_log::{
    CallLog, CallStats, DEFAULT_LOG_CAPACITY, ParseStatusFilterError, StatusFilter, call_matches,
    filter_calls,
};
pub use config::InspectorConfig;
pub use export::{curl_command, raw_dump};
pub use load::{LoadError, load_calls, parse_calls};
pub use navigation::{MatchCursor, SearchState};
pub use record::{Aggregate, SearchableRecord};
pub use redact::{DEFAULT_REDACTED_HEADERS, REDACTED, redact_call, redact_headers};
pub use sections::{DetailSection, SectionKind, detail_sections, section_matches};
pub use session::{DetailSession, FieldView};
