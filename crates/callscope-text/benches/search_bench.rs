//! Benchmarks for match finding and JSON classification.
//!
//! Run with: cargo bench -p callscope-text

use callscope_text::{ClassifierKind, build_highlights, count_matches};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

// =============================================================================
// Test Data
// =============================================================================

/// A JSON response body of roughly `users` records.
fn users_body(users: usize) -> String {
    let mut out = String::from("[\n");
    for i in 0..users {
        if i > 0 {
            out.push_str(",\n");
        }
        out.push_str(&format!(
            "  {{\n    \"id\": {i},\n    \"name\": \"User {i}\",\n    \"email\": \"user{i}@example.com\",\n    \"active\": {}\n  }}",
            i % 2 == 0
        ));
    }
    out.push_str("\n]");
    out
}

/// Same body with non-ASCII names, forcing the Unicode path.
fn unicode_body(users: usize) -> String {
    users_body(users).replace("User", "Ünïcødé")
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("count_matches");
    for users in [10, 100, 1000] {
        let ascii = users_body(users);
        group.throughput(Throughput::Bytes(ascii.len() as u64));
        group.bench_with_input(BenchmarkId::new("ascii", users), &ascii, |b, text| {
            b.iter(|| count_matches(black_box(text), black_box("EXAMPLE")))
        });

        let unicode = unicode_body(users);
        group.throughput(Throughput::Bytes(unicode.len() as u64));
        group.bench_with_input(BenchmarkId::new("unicode", users), &unicode, |b, text| {
            b.iter(|| count_matches(black_box(text), black_box("ünï")))
        });
    }
    group.finish();
}

fn bench_highlights(c: &mut Criterion) {
    let body = users_body(500);
    c.bench_function("build_highlights/500_users", |b| {
        b.iter(|| build_highlights(black_box(&body), black_box("user"), black_box(250)))
    });
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify_json");
    let body = users_body(200);
    group.throughput(Throughput::Bytes(body.len() as u64));
    for kind in [ClassifierKind::Pattern, ClassifierKind::Scan] {
        let classifier = kind.classifier();
        group.bench_with_input(BenchmarkId::from_parameter(kind), &body, |b, text| {
            b.iter(|| classifier.classify(black_box(text)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_count, bench_highlights, bench_classify);
criterion_main!(benches);
