#![forbid(unsafe_code)]

//! Searchable text of one call.
//!
//! A [`SearchableRecord`] holds the text of every searchable [`Field`] of a
//! call, or nothing for fields that are absent. The [`Aggregate`] joins the
//! present fields in [`Field::ALL`] order, each followed by one space, and
//! remembers where each field landed so matches found in the joined text can
//! be mapped back onto fields.

use std::ops::Range;

use callscope_text::try_format_json;

use crate::call::{ApiCall, Field};

/// Separator appended after every field in the aggregate.
pub const FIELD_SEPARATOR: &str = " ";

/// Per-field text of one call. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchableRecord {
    fields: [Option<String>; Field::ALL.len()],
}

impl SearchableRecord {
    /// Build a record from explicit field values.
    #[must_use]
    pub fn from_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = (Field, S)>,
        S: Into<String>,
    {
        let mut record = Self::default();
        for (field, text) in fields {
            record.fields[field.index()] = Some(text.into());
        }
        record
    }

    /// Extract the searchable text of `call`.
    ///
    /// Status and duration are present only when non-zero, the timestamp as
    /// wall-clock text only when known. With `pretty_json`, bodies that parse
    /// as JSON are re-indented so the searched text is what gets displayed.
    #[must_use]
    pub fn from_call(call: &ApiCall, pretty_json: bool) -> Self {
        let body = |text: &Option<String>| {
            text.as_deref().map(|t| {
                if pretty_json {
                    try_format_json(t)
                } else {
                    t.to_string()
                }
            })
        };

        let mut record = Self::default();
        record.fields[Field::Method.index()] = Some(call.method.clone());
        record.fields[Field::Url.index()] = Some(call.url.clone());
        record.fields[Field::Status.index()] = (call.status > 0).then(|| call.status.to_string());
        record.fields[Field::Duration.index()] =
            (call.duration_ms > 0).then(|| call.duration_ms.to_string());
        record.fields[Field::Timestamp.index()] = call.clock_text();
        record.fields[Field::RequestHeaders.index()] = call.request_headers.clone();
        record.fields[Field::RequestBody.index()] = body(&call.request_body);
        record.fields[Field::ResponseHeaders.index()] = call.response_headers.clone();
        record.fields[Field::ResponseBody.index()] = body(&call.response_body);
        record.fields[Field::Error.index()] = call.error.clone();
        record
    }

    /// Text of `field`, if present.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.fields[field.index()].as_deref()
    }

    /// Present fields in aggregation order.
    pub fn present(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        Field::ALL
            .iter()
            .filter_map(|&field| self.get(field).map(|text| (field, text)))
    }

    /// Join the present fields into one searchable text.
    #[must_use]
    pub fn aggregate(&self) -> Aggregate {
        let mut text = String::new();
        let mut ranges = Vec::new();
        for (field, value) in self.present() {
            let start = text.len();
            text.push_str(value);
            ranges.push((field, start..text.len()));
            text.push_str(FIELD_SEPARATOR);
        }
        Aggregate { text, ranges }
    }
}

/// Separator-joined text of a record plus each field's byte range in it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregate {
    /// Joined text.
    pub text: String,
    /// `(field, range)` for every present field, in order.
    pub ranges: Vec<(Field, Range<usize>)>,
}

impl Aggregate {
    /// Byte range of `field` in [`Aggregate::text`], if present.
    #[must_use]
    pub fn range_of(&self, field: Field) -> Option<Range<usize>> {
        self.ranges
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, r)| r.clone())
    }

    /// The field containing byte `offset`, if it is not on a separator.
    #[must_use]
    pub fn field_at(&self, offset: usize) -> Option<Field> {
        self.ranges
            .iter()
            .find(|(_, r)| r.contains(&offset))
            .map(|(f, _)| *f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ApiCall {
        ApiCall::new("GET", "https://api.example.com/users")
            .with_status(200)
            .with_duration_ms(120)
            .with_response_body(r#"{"users":[]}"#)
    }

    #[test]
    fn absent_status_and_duration_are_skipped() {
        let record = SearchableRecord::from_call(&ApiCall::new("GET", "/x"), false);
        assert_eq!(record.get(Field::Status), None);
        assert_eq!(record.get(Field::Duration), None);
        assert_eq!(record.get(Field::Timestamp), None);
        assert_eq!(record.aggregate().text, "GET /x ");
    }

    #[test]
    fn aggregate_joins_in_field_order() {
        let record = SearchableRecord::from_call(&sample(), false);
        let agg = record.aggregate();
        assert_eq!(
            agg.text,
            r#"GET https://api.example.com/users 200 120 {"users":[]} "#
        );
        let url = agg.range_of(Field::Url).unwrap();
        assert_eq!(&agg.text[url], "https://api.example.com/users");
        assert_eq!(agg.field_at(0), Some(Field::Method));
        assert_eq!(agg.field_at(3), None);
    }

    #[test]
    fn pretty_bodies_are_reindented() {
        let record = SearchableRecord::from_call(&sample(), true);
        assert_eq!(
            record.get(Field::ResponseBody),
            Some("{\n  \"users\": []\n}")
        );
    }

    #[test]
    fn from_fields_sets_only_given_fields() {
        let record =
            SearchableRecord::from_fields([(Field::Error, "timeout"), (Field::Method, "POST")]);
        let present: Vec<Field> = record.present().map(|(f, _)| f).collect();
        assert_eq!(present, vec![Field::Method, Field::Error]);
    }
}
