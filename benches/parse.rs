//! Extractor benchmarks.
//!
//! Measures per-line recognition throughput for each event kind and for
//! lines that match nothing (the common case in a real log stream).

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fraglog::LogExtractor;

// ---------------------------------------------------------------------------
// Benchmark: one line per event kind
// ---------------------------------------------------------------------------

fn bench_parse_per_kind(c: &mut Criterion) {
    let extractor = LogExtractor::new();

    let lines = [
        ("join", r#""Gordon<3><STEAM_0:0:123456><>" connected, address "192.168.1.42:27005""#),
        ("leave", r#""Gordon<3><STEAM_0:0:123456><>" disconnected"#),
        ("kill", r#""Gordon<3><STEAM_0:0:1><>" killed "Barney<5><STEAM_0:0:2><>" with "crowbar""#),
        ("suicide", r#""Gordon<3><STEAM_0:0:1><>" committed suicide with "world""#),
        ("rename", r#""Gordon<3><STEAM_0:0:1><>" changed name to "The One Free Man""#),
        ("map", r#"L 08/06/2026 - 21:00:00: Started map "crossfire" (CRC "1842790779")"#),
        ("miss", r#"Server cvar "mp_timelimit" = "30""#),
    ];

    let mut group = c.benchmark_group("parse_line");
    for (kind, line) in lines {
        group.bench_with_input(BenchmarkId::new("kind", kind), &line, |b, line| {
            b.iter(|| black_box(extractor.parse(black_box(line))));
        });
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark: construction cost (all patterns compiled once)
// ---------------------------------------------------------------------------

fn bench_extractor_construction(c: &mut Criterion) {
    c.bench_function("extractor_new", |b| {
        b.iter(|| black_box(LogExtractor::new()));
    });
}

criterion_group!(benches, bench_parse_per_kind, bench_extractor_construction);
criterion_main!(benches);
