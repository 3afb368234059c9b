#![forbid(unsafe_code)]

//! Grouping of a call into titled detail sections.

use std::fmt;

use callscope_text::{contains_ignore_case, try_format_json};

use crate::call::{ApiCall, Field};

/// Which section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    /// Method, URL, status, duration and timestamp.
    Basic,
    /// Request headers and body.
    Request,
    /// Response headers and body.
    Response,
    /// Error message.
    Error,
}

impl SectionKind {
    /// The section a field is shown under.
    #[must_use]
    pub const fn of(field: Field) -> Self {
        match field {
            Field::Method | Field::Url | Field::Status | Field::Duration | Field::Timestamp => {
                Self::Basic
            }
            Field::RequestHeaders | Field::RequestBody => Self::Request,
            Field::ResponseHeaders | Field::ResponseBody => Self::Response,
            Field::Error => Self::Error,
        }
    }

    /// Section heading.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Basic => "Basic Information",
            Self::Request => "Request",
            Self::Response => "Response",
            Self::Error => "Error",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// A titled block of `Label: value` rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailSection {
    /// Which section this is.
    pub kind: SectionKind,
    /// The `Label: value` rows.
    pub content: String,
}

impl DetailSection {
    /// Whether the section text contains `query` (case-insensitive).
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        section_matches(self, query)
    }

    /// Whether the section is shown while `query` is active: always without
    /// a query, otherwise only when it matches.
    #[must_use]
    pub fn is_visible(&self, query: &str) -> bool {
        query.is_empty() || self.matches(query)
    }
}

/// Whether `section` contains `query`. An empty query never matches.
#[must_use]
pub fn section_matches(section: &DetailSection, query: &str) -> bool {
    !query.is_empty() && contains_ignore_case(&section.content, query)
}

fn row(out: &mut String, label: &str, value: &str) {
    out.push_str(label);
    out.push_str(": ");
    out.push_str(value);
    out.push_str("\n\n");
}

/// Build the sections of `call` that have content.
///
/// Basic is present when method, URL, status, duration or timestamp is set;
/// Request and Response when either their headers or body is; Error when an
/// error message is.
#[must_use]
pub fn detail_sections(call: &ApiCall, pretty_json: bool) -> Vec<DetailSection> {
    let body = |text: &str| {
        if pretty_json {
            try_format_json(text)
        } else {
            text.to_string()
        }
    };
    let mut sections = Vec::with_capacity(4);

    if !call.method.is_empty()
        || !call.url.is_empty()
        || call.status > 0
        || call.duration_ms > 0
        || call.timestamp_ms != 0
    {
        let mut content = String::new();
        row(&mut content, "Method", &call.method);
        row(&mut content, "URL", &call.url);
        row(&mut content, "Status", &call.status.to_string());
        row(&mut content, "Duration", &format!("{}ms", call.duration_ms));
        row(
            &mut content,
            "Timestamp",
            call.clock_text().as_deref().unwrap_or("-"),
        );
        sections.push(DetailSection {
            kind: SectionKind::Basic,
            content,
        });
    }

    for (kind, headers, payload) in [
        (SectionKind::Request, &call.request_headers, &call.request_body),
        (SectionKind::Response, &call.response_headers, &call.response_body),
    ] {
        if headers.is_none() && payload.is_none() {
            continue;
        }
        let mut content = String::new();
        if let Some(headers) = headers {
            row(&mut content, "Headers", headers);
        }
        if let Some(payload) = payload {
            row(&mut content, "Body", &body(payload));
        }
        sections.push(DetailSection { kind, content });
    }

    if let Some(error) = &call.error {
        let mut content = String::new();
        row(&mut content, "Error", error);
        sections.push(DetailSection {
            kind: SectionKind::Error,
            content,
        });
    }

    sections
}
