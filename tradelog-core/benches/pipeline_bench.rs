//! Criterion benchmarks for the conversion hot paths.
//!
//! Benchmarks:
//! 1. Line splitting (quoted export rows)
//! 2. Full analysis (split → pair → aggregate → roll up) at several sizes

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use tradelog_core::data::{split_line, ColumnMap};
use tradelog_core::{analyze, ConvertOptions};

// ── Helpers ──────────────────────────────────────────────────────────

fn make_export(trades: usize) -> String {
    let mut text = String::from(
        "\"Trade #\",\"Type\",\"Signal\",\"Date/Time\",\"Price USDT\",\"Net P&L USDT\",\"Net P&L %\"",
    );
    for i in 0..trades {
        let num = i + 1;
        let year = 2018 + (i % 7);
        let side = if i % 3 == 0 { "short" } else { "long" };
        let pnl = ((i as f64) * 0.7).sin() * 250.0;
        text.push_str(&format!(
            "\n\"{num}\",\"Exit {side}\",\"ATR\",\"{year}-06-01 08:00\",\"1,050.25\",\"{pnl:.2}\",\"{:.2}\"",
            pnl / 100.0
        ));
        text.push_str(&format!(
            "\n\"{num}\",\"Entry {side}\",\"EMA\",\"{year}-05-01 08:00\",\"1,000.00\",\"{pnl:.2}\",\"{:.2}\"",
            pnl / 100.0
        ));
    }
    text
}

fn bench_split_line(c: &mut Criterion) {
    let line = "\"42\",\"Exit long\",\"ATR TP\",\"2024-01-02 08:00\",\"21,950.50\",\"812.25\",\"8.12\"";
    c.bench_function("split_line", |b| b.iter(|| split_line(black_box(line))));
}

fn bench_analyze(c: &mut Criterion) {
    let opts = ConvertOptions {
        columns: ColumnMap::english(),
        ..ConvertOptions::default()
    };
    let mut group = c.benchmark_group("analyze");
    for trades in [100usize, 1_000, 10_000] {
        let text = make_export(trades);
        group.bench_with_input(BenchmarkId::from_parameter(trades), &text, |b, text| {
            b.iter(|| analyze(black_box(text), &opts).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_split_line, bench_analyze);
criterion_main!(benches);
