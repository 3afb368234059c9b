#![forbid(unsafe_code)]

//! Text rendering of the call list and the detail view.
//!
//! Output is a plain `String`. With colour on, styling is emitted as ANSI
//! sequences through `crossterm`; with colour off, other matches are wrapped
//! in `[...]` and the current match in `>>...<<` so the cursor stays visible.

use std::fmt::Write as _;
use std::ops::Range;

use crossterm::style::{Attribute, Attributes, Color, ContentStyle};

use callscope_inspector::{
    ApiCall, CallStats, DetailSession, FieldView, SectionKind, StatusClass, StatusFilter,
    detail_sections,
};
use callscope_text::{JsonToken, JsonTokenClass, SegmentKind, truncate_text};

const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb { r, g, b }
}

const GREY: Color = rgb(0x66, 0x66, 0x66);
const MATCH_BG: Color = rgb(0xff, 0xeb, 0x3b);
const CURRENT_BG: Color = rgb(0xff, 0x57, 0x22);

fn style(fg: Option<Color>, bg: Option<Color>, bold: bool) -> ContentStyle {
    let attributes = if bold {
        Attributes::from(Attribute::Bold)
    } else {
        Attributes::default()
    };
    ContentStyle {
        foreground_color: fg,
        background_color: bg,
        underline_color: None,
        attributes,
    }
}

/// Colour for a status code.
#[must_use]
pub fn status_color(status: u16) -> Color {
    match StatusClass::from_status(status) {
        StatusClass::Success => rgb(0x4c, 0xaf, 0x50),
        StatusClass::Redirect => rgb(0xff, 0x98, 0x00),
        StatusClass::ClientError => rgb(0xf4, 0x43, 0x36),
        StatusClass::ServerError => rgb(0x9c, 0x27, 0xb0),
        StatusClass::Pending | StatusClass::Informational => GREY,
    }
}

/// Colour for an HTTP method.
#[must_use]
pub fn method_color(method: &str) -> Color {
    match method.to_ascii_uppercase().as_str() {
        "GET" => rgb(0x4c, 0xaf, 0x50),
        "POST" => rgb(0x21, 0x96, 0xf3),
        "PUT" => rgb(0xff, 0x98, 0x00),
        "DELETE" => rgb(0xf4, 0x43, 0x36),
        "PATCH" => rgb(0x9c, 0x27, 0xb0),
        _ => GREY,
    }
}

/// `(colour, bold)` of a JSON token class.
#[must_use]
pub fn json_style(class: JsonTokenClass) -> (Color, bool) {
    match class {
        JsonTokenClass::Key => (rgb(0xff, 0xd7, 0x00), true),
        JsonTokenClass::StringValue => (rgb(0x00, 0xff, 0x7f), false),
        JsonTokenClass::Boolean => (rgb(0xff, 0xa5, 0x00), true),
        JsonTokenClass::Number => (rgb(0x00, 0xbf, 0xff), false),
        JsonTokenClass::Null => (rgb(0xff, 0x69, 0xb4), true),
        JsonTokenClass::Brace | JsonTokenClass::Bracket => (rgb(0x93, 0x70, 0xdb), true),
        JsonTokenClass::Comma => (rgb(0xff, 0x14, 0x93), true),
        JsonTokenClass::Colon => (rgb(0x00, 0xce, 0xd1), true),
    }
}

/// Write `text` in `style`, or verbatim when colour is off.
fn paint(out: &mut String, text: &str, style: ContentStyle, color: bool) {
    if color {
        let _ = write!(out, "{}", style.apply(text));
    } else {
        out.push_str(text);
    }
}

/// A run of field text with one highlight kind and at most one token class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    /// Byte range in the field text.
    pub range: Range<usize>,
    pub kind: SegmentKind,
    /// Token class when the run sits inside a JSON token.
    pub class: Option<JsonTokenClass>,
}

/// Cut `view.text` wherever a span or token starts or ends.
///
/// Spans and tokens are each sorted and disjoint, so one forward cursor per
/// list is enough.
#[must_use]
pub fn runs(view: &FieldView, tokens: &[JsonToken]) -> Vec<Run> {
    let len = view.text.len();
    let mut cuts: Vec<usize> = Vec::with_capacity(2 * (view.spans.len() + tokens.len()) + 2);
    cuts.extend([0, len]);
    for span in &view.spans {
        cuts.extend([span.start.min(len), span.end.min(len)]);
    }
    for token in tokens {
        cuts.extend([token.range.start.min(len), token.range.end.min(len)]);
    }
    cuts.sort_unstable();
    cuts.dedup();

    let mut next_span = 0;
    let mut next_token = 0;
    let mut out = Vec::with_capacity(cuts.len().saturating_sub(1));
    for w in cuts.windows(2) {
        let range = w[0]..w[1];
        while next_span < view.spans.len() && view.spans[next_span].end <= range.start {
            next_span += 1;
        }
        while next_token < tokens.len() && tokens[next_token].range.end <= range.start {
            next_token += 1;
        }
        let kind = match view.spans.get(next_span) {
            Some(s) if s.start <= range.start => {
                if s.is_current {
                    SegmentKind::Current
                } else {
                    SegmentKind::Match
                }
            }
            _ => SegmentKind::Plain,
        };
        let class = tokens
            .get(next_token)
            .filter(|t| t.range.start <= range.start)
            .map(|t| t.class);
        out.push(Run { range, kind, class });
    }
    out
}

/// Render one field's text with highlights and JSON colouring.
#[must_use]
pub fn render_field(view: &FieldView, tokens: &[JsonToken], color: bool) -> String {
    let mut out = String::with_capacity(view.text.len() + 16);
    for run in runs(view, tokens) {
        let text = &view.text[run.range.clone()];
        match (run.kind, color) {
            (SegmentKind::Plain, _) => {
                let st = match run.class {
                    Some(class) => {
                        let (fg, bold) = json_style(class);
                        style(Some(fg), None, bold)
                    }
                    None => ContentStyle::default(),
                };
                paint(&mut out, text, st, color);
            }
            (SegmentKind::Match, true) => {
                paint(&mut out, text, style(Some(Color::Black), Some(MATCH_BG), false), true);
            }
            (SegmentKind::Current, true) => {
                paint(&mut out, text, style(Some(Color::White), Some(CURRENT_BG), true), true);
            }
            (SegmentKind::Match, false) => {
                let _ = write!(out, "[{text}]");
            }
            (SegmentKind::Current, false) => {
                let _ = write!(out, ">>{text}<<");
            }
        }
    }
    out
}

/// Render a detail session: header, search status, then each section with
/// its fields. With a query active, sections that do not contain it are left
/// out.
#[must_use]
pub fn render_detail(session: &DetailSession, color: bool) -> String {
    let call = session.call();
    let mut out = String::new();

    paint(&mut out, &call.method, style(Some(method_color(&call.method)), None, true), color);
    out.push(' ');
    out.push_str(&call.url);
    out.push('\n');

    let state = session.state();
    if !state.query().is_empty() {
        let _ = writeln!(out, "Search \"{}\": {}", state.query(), session.status_text());
    }

    let views = session.field_views();
    for section in detail_sections(call, session.pretty_json()) {
        let fields: Vec<&FieldView> = views
            .iter()
            .filter(|v| SectionKind::of(v.field) == section.kind)
            .collect();
        // a separator-straddling match can highlight text the rows don't show
        if !section.is_visible(state.query()) && fields.iter().all(|v| v.spans.is_empty()) {
            continue;
        }

        out.push('\n');
        paint(&mut out, &format!("== {} ==", section.kind), style(None, None, true), color);
        out.push('\n');
        for view in fields {
            paint(&mut out, view.field.label(), style(None, None, true), color);
            if view.has_current() {
                out.push_str(" *");
            }
            out.push('\n');
            let tokens = if color {
                session.json_tokens(view)
            } else {
                Vec::new()
            };
            out.push_str(&render_field(view, &tokens, color));
            out.push('\n');
        }
    }
    out
}

fn list_row(out: &mut String, number: usize, call: &ApiCall, width: usize, color: bool) {
    let _ = write!(out, "{number:>3}  ");
    paint(
        out,
        &format!("{:<7}", call.method),
        style(Some(method_color(&call.method)), None, true),
        color,
    );
    let status = if call.status == 0 {
        "---".to_string()
    } else {
        call.status.to_string()
    };
    paint(out, &format!("{status:>3}"), style(Some(status_color(call.status)), None, false), color);
    let _ = write!(out, " {:>6}  ", format!("{}ms", call.duration_ms));
    if let Some(clock) = call.clock_text() {
        let _ = write!(out, "{clock}  ");
    }
    out.push_str(&truncate_text(&call.url, width));
    if let Some(error) = &call.error {
        out.push_str("  ");
        paint(out, error, style(Some(status_color(500)), None, false), color);
    }
    out.push('\n');
}

/// Render the call list with its stats header.
#[must_use]
pub fn render_list(
    calls: &[&ApiCall],
    stats: CallStats,
    query: &str,
    filter: StatusFilter,
    width: usize,
    color: bool,
) -> String {
    let mut out = String::new();
    let _ = write!(out, "{stats}");
    if filter != StatusFilter::All {
        let _ = write!(out, " (showing {filter})");
    }
    out.push('\n');

    if calls.is_empty() {
        let msg = if query.is_empty() && filter == StatusFilter::All {
            "No API calls yet."
        } else {
            "No API calls match your search."
        };
        paint(&mut out, msg, style(Some(GREY), None, false), color);
        out.push('\n');
        return out;
    }

    for (i, call) in calls.iter().enumerate() {
        list_row(&mut out, i + 1, call, width, color);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use callscope_inspector::{Field, InspectorConfig};
    use callscope_text::HighlightSpan;
    use std::time::{Duration, Instant};

    fn view(text: &str, spans: Vec<HighlightSpan>) -> FieldView {
        FieldView {
            field: Field::Url,
            text: text.to_string(),
            spans,
            is_json: false,
        }
    }

    #[test]
    fn plain_markers_without_color() {
        let v = view(
            "a user and a user",
            vec![HighlightSpan::new(2, 6, false), HighlightSpan::new(13, 17, true)],
        );
        assert_eq!(render_field(&v, &[], false), "a [user] and a >>user<<");
    }

    #[test]
    fn runs_split_on_tokens_and_spans() {
        let v = view("{\"ab\":1}", vec![HighlightSpan::new(2, 3, true)]);
        let tokens = [
            JsonToken::new(JsonTokenClass::Brace, 0..1),
            JsonToken::new(JsonTokenClass::Key, 1..5),
        ];
        let found = runs(&v, &tokens);
        let ranges: Vec<Range<usize>> = found.iter().map(|r| r.range.clone()).collect();
        assert_eq!(ranges, vec![0..1, 1..2, 2..3, 3..5, 5..8]);
        assert_eq!(found[2].kind, SegmentKind::Current);
        assert_eq!(found[2].class, Some(JsonTokenClass::Key));
        assert_eq!(found[4].class, None);
    }

    #[test]
    fn large_json_body_runs_stay_linear() {
        let items: Vec<String> = (0..32_000).map(|i| format!("{{\"k\":{i}}}")).collect();
        let call = ApiCall::new("GET", "/big").with_response_body(format!("[{}]", items.join(",")));
        let config = InspectorConfig {
            pretty_json: false,
            ..InspectorConfig::default()
        };
        let mut session = DetailSession::open(call, &config);
        session.set_query("k");
        let body = session
            .field_views()
            .into_iter()
            .find(|v| v.field == Field::ResponseBody)
            .unwrap();
        let tokens = session.json_tokens(&body);
        assert_eq!(body.spans.len(), 32_000);

        let start = Instant::now();
        let found = runs(&body, &tokens);
        let elapsed = start.elapsed();

        let highlighted = found.iter().filter(|r| r.kind != SegmentKind::Plain).count();
        let current = found.iter().filter(|r| r.kind == SegmentKind::Current).count();
        assert_eq!(highlighted, 32_000);
        assert_eq!(current, 1);
        assert_eq!(found.last().map(|r| r.range.end), Some(body.text.len()));
        assert!(elapsed < Duration::from_secs(2), "runs took {elapsed:?}");
    }

    #[test]
    fn colored_output_contains_escape_codes() {
        let v = view("user", vec![HighlightSpan::new(0, 4, true)]);
        let out = render_field(&v, &[], true);
        assert!(out.contains('\u{1b}'));
        assert!(out.contains("user"));
    }

    #[test]
    fn detail_marks_current_field() {
        let call =
            ApiCall::new("GET", "https://api.example.com/users").with_error("user not found");
        let mut session = DetailSession::open(call, &InspectorConfig::default());
        session.set_query("user");
        session.next();
        let out = render_detail(&session, false);
        assert!(out.starts_with("GET https://api.example.com/users\n"));
        assert!(out.contains("Search \"user\": 2 of 2 matches"));
        assert!(out.contains("Error *\n>>user<< not found"));
        assert!(out.contains("https://api.example.com/[user]s"));
    }

    #[test]
    fn detail_hides_sections_without_the_query() {
        let call = ApiCall::new("GET", "https://api.example.com/users")
            .with_response_body("plain")
            .with_error("connection refused");
        let mut session = DetailSession::open(call, &InspectorConfig::default());

        let out = render_detail(&session, false);
        assert!(out.contains("\n== Basic Information ==\nMethod\nGET\nURL\n"));
        assert!(out.contains("\n== Response ==\nResponse Body\nplain\n"));
        assert!(out.contains("\n== Error ==\n"));

        session.set_query("REFUSED");
        let out = render_detail(&session, false);
        assert!(!out.contains("== Basic Information =="));
        assert!(!out.contains("== Response =="));
        assert!(out.contains("== Error ==\nError *\nconnection >>refused<<\n"));
    }

    #[test]
    fn detail_masks_sensitive_headers() {
        let call = ApiCall::new("GET", "/me").with_request_headers("Authorization: Bearer s3cret");
        let session = DetailSession::open(call, &InspectorConfig::default());
        let out = render_detail(&session, false);
        assert!(out.contains("== Request ==\nRequest Headers\nAuthorization: [REDACTED]\n"));
        assert!(!out.contains("s3cret"));
    }

    #[test]
    fn empty_list_messages() {
        let stats = CallStats::default();
        let out = render_list(&[], stats, "", StatusFilter::All, 80, false);
        assert_eq!(out, "0 total, 0 success, 0 errors\nNo API calls yet.\n");
        let out = render_list(&[], stats, "x", StatusFilter::All, 80, false);
        assert!(out.ends_with("No API calls match your search.\n"));
    }

    #[test]
    fn list_rows_truncate_urls() {
        let call = ApiCall::new("GET", "https://api.example.com/a/very/long/path")
            .with_status(200)
            .with_duration_ms(5);
        let stats = CallStats::from_calls([&call]);
        let out = render_list(&[&call], stats, "", StatusFilter::Success, 12, false);
        assert_eq!(
            out,
            "1 total, 1 success, 0 errors (showing success)\n  1  GET    200    5ms  https://a...\n"
        );
    }
}
