#![forbid(unsafe_code)]

//! Tracing integration tests.
//!
//! Spans enabled:
//!   cargo test -p callscope-inspector --features tracing --test tracing_tests
//!
//! Zero-overhead verification (no feature):
//!   cargo test -p callscope-inspector --test tracing_tests -- zero_overhead

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use callscope_inspector::{ApiCall, DetailSession, InspectorConfig};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

// ============================================================================
// Test Infrastructure
// ============================================================================

/// A captured span or event with its fields and parent span name.
#[derive(Debug, Clone)]
#[allow(dead_code)]
struct Captured {
    name: String,
    fields: HashMap<String, String>,
    parent_name: Option<String>,
}

/// A tracing Layer that records spans and events.
struct Capture {
    spans: Arc<Mutex<Vec<Captured>>>,
    events: Arc<Mutex<Vec<Captured>>>,
}

/// Handle to read what was captured.
struct CaptureHandle {
    spans: Arc<Mutex<Vec<Captured>>>,
    events: Arc<Mutex<Vec<Captured>>>,
}

impl CaptureHandle {
    fn spans(&self) -> Vec<Captured> {
        self.spans.lock().unwrap().clone()
    }

    #[allow(dead_code)]
    fn events(&self) -> Vec<Captured> {
        self.events.lock().unwrap().clone()
    }
}

/// Visitor that extracts fields.
struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for Capture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        attrs.record(&mut visitor);

        let parent_name = ctx
            .current_span()
            .id()
            .and_then(|id| ctx.span(id))
            .map(|span_ref| span_ref.name().to_string());

        self.spans.lock().unwrap().push(Captured {
            name: attrs.metadata().name().to_string(),
            fields: visitor.0.into_iter().collect(),
            parent_name,
        });
    }

    fn on_event(&self, event: &tracing::Event<'_>, ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);

        let parent_name = ctx
            .lookup_current()
            .map(|span_ref| span_ref.name().to_string());

        self.events.lock().unwrap().push(Captured {
            name: event.metadata().name().to_string(),
            fields: visitor.0.into_iter().collect(),
            parent_name,
        });
    }
}

/// Set up a subscriber with capture and run a closure.
fn with_capture<F>(f: F) -> CaptureHandle
where
    F: FnOnce(),
{
    let spans = Arc::new(Mutex::new(Vec::new()));
    let events = Arc::new(Mutex::new(Vec::new()));
    let layer = Capture {
        spans: spans.clone(),
        events: events.clone(),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    CaptureHandle { spans, events }
}

fn sample_call() -> ApiCall {
    ApiCall::new("GET", "https://api.example.com/users")
        .with_status(200)
        .with_response_body(r#"{"users": [{"name": "user one"}]}"#)
}

// ============================================================================
// Tests
// ============================================================================

#[test]
#[cfg(feature = "tracing")]
fn search_span_records_query_length() {
    let handle = with_capture(|| {
        let mut session = DetailSession::open(sample_call(), &InspectorConfig::default());
        session.set_query("user");
    });

    let spans = handle.spans();
    let search = spans
        .iter()
        .find(|s| s.name == "detail_search")
        .expect("detail_search span");
    assert_eq!(search.fields.get("query_len").map(String::as_str), Some("4"));
    assert!(search.fields.contains_key("text_len"));
}

#[test]
#[cfg(feature = "tracing")]
fn total_is_reported_inside_search_span() {
    let handle = with_capture(|| {
        let mut session = DetailSession::open(sample_call(), &InspectorConfig::default());
        session.set_query("user");
    });

    let events = handle.events();
    let reported = events
        .iter()
        .find(|e| e.fields.contains_key("total"))
        .expect("total event");
    assert_eq!(reported.fields.get("total").map(String::as_str), Some("3"));
    assert_eq!(reported.parent_name.as_deref(), Some("detail_search"));
}

#[test]
#[cfg(feature = "tracing")]
fn json_classification_is_spanned() {
    let handle = with_capture(|| {
        let session = DetailSession::open(sample_call(), &InspectorConfig::default());
        for view in session.field_views() {
            let _ = session.json_tokens(&view);
        }
    });

    let spans = handle.spans();
    let classify: Vec<&Captured> = spans.iter().filter(|s| s.name == "classify_json").collect();
    assert_eq!(classify.len(), 1);
    assert_eq!(
        classify[0].fields.get("classifier").map(String::as_str),
        Some("pattern")
    );
}

#[test]
#[cfg(not(feature = "tracing"))]
fn zero_overhead_without_feature() {
    let handle = with_capture(|| {
        let mut session = DetailSession::open(sample_call(), &InspectorConfig::default());
        session.set_query("user");
        session.next();
        for view in session.field_views() {
            let _ = session.json_tokens(&view);
        }
    });

    assert!(handle.spans().is_empty());
    assert!(handle.events().is_empty());
}
