#![allow(clippy::expect_used, clippy::unwrap_used, missing_docs)]
//! Benchmarks for chart building, serialization and regression fitting.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use trueno_vega::prelude::*;

fn sample_table(size: usize) -> Table {
    let x: Vec<f64> = (0..size).map(|i| i as f64 / size as f64 * 10.0).collect();
    // Deterministic noise around a line
    let y: Vec<f64> = x
        .iter()
        .enumerate()
        .map(|(i, &v)| 2.0 * v + 1.0 + ((i * 7919) % 13) as f64 / 13.0 - 0.5)
        .collect();
    let group: Vec<&str> = (0..size).map(|i| ["a", "b", "c"][i % 3]).collect();
    Table::new()
        .with_column("x", x)
        .unwrap()
        .with_column("y", y)
        .unwrap()
        .with_column("group", group)
        .unwrap()
}

fn bar_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("bar_to_json");

    for size in [100, 1_000, 10_000] {
        let table = sample_table(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let chart = CategoricalPlot::new()
                    .data(black_box(table.clone()))
                    .x("group")
                    .y("y")
                    .build(PlotKind::Bar)
                    .unwrap();
                chart.to_vega_lite(&PlotConfig::default())
            });
        });
    }

    group.finish();
}

fn regplot_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("regplot");
    group.sample_size(20);

    for size in [100, 1_000] {
        let table = sample_table(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                RegPlot::new()
                    .data(black_box(table.clone()))
                    .x("x")
                    .y("y")
                    .hue("group")
                    .n_boot(100)
                    .build()
                    .unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bar_benchmark, regplot_benchmark);
criterion_main!(benches);
