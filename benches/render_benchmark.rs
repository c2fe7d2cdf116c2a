#![allow(clippy::expect_used, clippy::unwrap_used, missing_docs)]
//! Benchmark for histogram view render and reset.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use trueno_histogram::prelude::*;

fn render_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    for bins in [10usize, 50, 200] {
        let mut doc = Document::with_elements();
        let labels = Bins::new((0..bins).map(|i| format!("{i}"))).unwrap();
        let mut view =
            HistogramView::new(&mut doc, RasterEngine::new(), labels, 800, 600, "bench").unwrap();

        // Bell-curve-like counts using a deterministic formula
        let counts: Vec<f64> = (0..bins)
            .map(|i| {
                let x = i as f64 / bins as f64;
                ((x - 0.5) * 6.0).powi(2).mul_add(-1.0, 9.0).max(0.0) * 10.0
            })
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(bins), &bins, |b, _| {
            b.iter(|| view.render(black_box(&counts)).unwrap());
        });
    }

    group.finish();
}

fn reset_benchmark(c: &mut Criterion) {
    let mut doc = Document::with_elements();
    let mut view =
        HistogramView::new(&mut doc, RasterEngine::new(), Bins::risk_levels(), 800, 600, "bench")
            .unwrap();

    c.bench_function("reset", |b| b.iter(|| view.reset().unwrap()));
}

criterion_group!(benches, render_benchmark, reset_benchmark);
criterion_main!(benches);
