//! Benchmark – `jaxon::Recognizer` against the pull tokenizer, the value
//! builder and `serde_json`.
#![allow(missing_docs)]

use std::{fmt::Write, time::Duration};

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use jaxon::{ParserOptions, Recognizer, Tokens};

/// A deterministic document of roughly `records` objects in an array, mixing
/// every token kind.
fn make_json_payload(records: usize) -> String {
    let mut s = String::from("[");
    for i in 0..records {
        if i > 0 {
            s.push_str(", ");
        }
        write!(
            s,
            r#"{{"id": {i}, "score": {}.25, "name": "user {i}", "tags": ["a", "b\"c"], "active": {}, "parent": null}}"#,
            i * 3,
            i % 2 == 0
        )
        .unwrap();
    }
    s.push(']');
    s
}

fn count_pushed(payload: &str) -> usize {
    let mut produced = 0usize;
    let ok = Recognizer::new(payload, |_| produced += 1).parse();
    assert!(ok);
    produced
}

fn count_pulled(payload: &str) -> usize {
    Tokens::with_options(payload, ParserOptions::default())
        .map(|t| t.unwrap())
        .count()
}

fn bench_recognizer(c: &mut Criterion) {
    let mut group = c.benchmark_group("recognizer");

    for &records in &[10usize, 1_000, 10_000] {
        let payload = make_json_payload(records);
        group.throughput(Throughput::Bytes(payload.len() as u64));

        group.bench_with_input(BenchmarkId::new("push", records), &payload, |b, p| {
            b.iter(|| black_box(count_pushed(black_box(p))));
        });
        group.bench_with_input(BenchmarkId::new("pull", records), &payload, |b, p| {
            b.iter(|| black_box(count_pulled(black_box(p))));
        });
        group.bench_with_input(BenchmarkId::new("value", records), &payload, |b, p| {
            b.iter(|| black_box(jaxon::from_str(black_box(p)).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("serde_json", records), &payload, |b, p| {
            b.iter(|| black_box(serde_json::from_str::<serde_json::Value>(black_box(p)).unwrap()));
        });
    }

    group.finish();
}

fn criterion() -> Criterion {
    let c = Criterion::default();
    if cfg!(feature = "bench-fast") {
        c.warm_up_time(Duration::from_millis(10))
            .measurement_time(Duration::from_millis(100))
            .sample_size(10)
    } else {
        c.warm_up_time(Duration::from_secs(3))
            .measurement_time(Duration::from_secs(5))
    }
}

criterion_group! { name = benches; config = criterion(); targets = bench_recognizer }
criterion_main!(benches);
