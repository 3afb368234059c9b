#![forbid(unsafe_code)]

//! Property tests for the match cursor and detail session.
//!
//! Run with: cargo test -p callscope-inspector --test proptest_navigation_invariants

use callscope_inspector::{ApiCall, DetailSession, Field, InspectorConfig, MatchCursor, SearchState};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Step {
    Next,
    Previous,
    Recompute(usize),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        Just(Step::Next),
        Just(Step::Previous),
        (0usize..12).prop_map(Step::Recompute),
    ]
}

fn call() -> impl Strategy<Value = ApiCall> {
    (
        prop_oneof![Just("GET"), Just("POST"), Just("DELETE")],
        "https://api\\.example\\.com/[a-z]{1,8}",
        prop_oneof![Just(0u16), Just(200u16), Just(404u16), Just(500u16)],
        0u64..2000,
        proptest::option::of("[A-Za-z\\-]{1,8}: [a-z0-9 ]{0,12}"),
        proptest::option::of("\\{\"[a-z]{1,5}\": \"[a-zA-Z0-9 ]{0,16}\"\\}"),
        proptest::option::of("[a-zA-Zäσ ]{0,24}"),
    )
        .prop_map(|(method, url, status, duration, headers, body, error)| {
            let mut call = ApiCall::new(method, url)
                .with_status(status)
                .with_duration_ms(duration);
            call.request_headers = headers;
            call.response_body = body;
            call.error = error;
            call
        })
}

fn current_spans(session: &DetailSession) -> Vec<Field> {
    session
        .field_views()
        .iter()
        .flat_map(|v| v.spans.iter().filter(|s| s.is_current).map(move |_| v.field))
        .collect()
}

proptest! {
    #[test]
    fn jumps_match_repeated_steps(total in 0usize..12, start in 0usize..12, n in 0usize..40) {
        let mut stepped = SearchState::new();
        stepped.set_query("q", total);
        stepped.advance(start);
        let mut jumped = stepped.clone();

        for _ in 0..n {
            stepped.next();
        }
        jumped.advance(n);
        prop_assert_eq!(&stepped, &jumped);

        for _ in 0..n {
            stepped.previous();
        }
        jumped.retreat(n);
        prop_assert_eq!(&stepped, &jumped);
    }

    #[test]
    fn cursor_stays_in_range(
        total in 0usize..12,
        steps in proptest::collection::vec(step(), 0..40),
    ) {
        let mut state = SearchState::new();
        state.set_query("q", total);
        for s in steps {
            match s {
                Step::Next => state.next(),
                Step::Previous => state.previous(),
                Step::Recompute(n) => state.recompute(n),
            }
            match state.cursor() {
                MatchCursor::NoMatches => prop_assert_eq!(state.total_matches(), 0),
                MatchCursor::HasMatches { index, total } => {
                    prop_assert!(total > 0);
                    prop_assert!(index < total);
                }
            }
        }
    }

    #[test]
    fn next_then_previous_is_identity(total in 1usize..20, start in 0usize..20) {
        let mut state = SearchState::new();
        state.set_query("q", total);
        for _ in 0..start {
            state.next();
        }
        let before = state.current_match_index();
        state.next();
        state.previous();
        prop_assert_eq!(state.current_match_index(), before);
    }

    #[test]
    fn full_cycle_returns_to_start(total in 1usize..20) {
        let mut state = SearchState::new();
        state.set_query("q", total);
        for _ in 0..total {
            state.next();
        }
        prop_assert_eq!(state.current_match_index(), Some(0));
        state.previous();
        prop_assert_eq!(state.current_match_index(), Some(total - 1));
    }

    #[test]
    fn exactly_one_current_span_per_index(call in call(), query in "[a-z0-9]{1,2}") {
        let mut session = DetailSession::open(call, &InspectorConfig::default());
        session.set_query(&query);
        let total = session.state().total_matches();
        if total == 0 {
            prop_assert!(current_spans(&session).is_empty());
        }
        for _ in 0..total {
            let flagged = current_spans(&session);
            prop_assert_eq!(flagged.len(), 1);
            prop_assert_eq!(Some(flagged[0]), session.current_field());
            session.next();
        }
    }

    #[test]
    fn spans_lie_inside_field_text(call in call(), query in "[a-zA-Zä ]{1,3}") {
        let mut session = DetailSession::open(call, &InspectorConfig::default());
        session.set_query(&query);
        for view in session.field_views() {
            for span in &view.spans {
                prop_assert!(span.start < span.end);
                prop_assert!(span.end <= view.text.len());
                prop_assert!(view.text.is_char_boundary(span.start));
                prop_assert!(view.text.is_char_boundary(span.end));
            }
        }
    }

    #[test]
    fn replacing_call_keeps_cursor_in_range(a in call(), b in call(), hops in 0usize..10) {
        let mut session = DetailSession::open(a, &InspectorConfig::default());
        session.set_query("e");
        for _ in 0..hops {
            session.next();
        }
        session.replace_call(b);
        if let Some(index) = session.state().current_match_index() {
            prop_assert!(index < session.state().total_matches());
        }
        prop_assert_eq!(session.state().query(), "e");
    }
}
