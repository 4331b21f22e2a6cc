// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Serialization strategy microbenchmarks.
//!
//! Compares the three strategies at several row counts, both into memory
//! and through a real file.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use matwrite_core::formatter::flat;
use matwrite_core::{MatrixGenerator, RowFormat, Strategy};
use std::time::Duration;
use tempfile::TempDir;

/// Row counts to benchmark.
const ROW_COUNTS: &[usize] = &[100, 1_000, 10_000];

const COLS: usize = 5;

fn row_format() -> RowFormat {
    RowFormat::uniform("%10.4f", COLS, " ").expect("Invalid row format")
}

/// Benchmark rendering into memory.
fn bench_render(c: &mut Criterion) {
    let format = row_format();
    let mut group = c.benchmark_group("render");
    group.measurement_time(Duration::from_secs(5));

    for &rows in ROW_COUNTS {
        let matrix = MatrixGenerator::with_seed(rows as u64).generate(rows, COLS);
        group.throughput(Throughput::Elements((rows * COLS) as u64));

        for strategy in Strategy::ALL {
            group.bench_with_input(BenchmarkId::new(strategy.name(), rows), &matrix, |b, m| {
                b.iter(|| black_box(strategy.render(black_box(m), &format).expect("Render failed")));
            });
        }
    }

    group.finish();
}

/// Benchmark the full write to disk, as the suite times it.
fn bench_write_file(c: &mut Criterion) {
    let format = row_format();
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("test.txt");
    let mut group = c.benchmark_group("write_file");
    group.measurement_time(Duration::from_secs(5));

    for &rows in ROW_COUNTS {
        let matrix = MatrixGenerator::with_seed(rows as u64).generate(rows, COLS);
        group.throughput(Throughput::Elements((rows * COLS) as u64));

        for strategy in Strategy::ALL {
            group.bench_with_input(BenchmarkId::new(strategy.name(), rows), &matrix, |b, m| {
                b.iter(|| strategy.write_file(black_box(m), &format, &path).expect("Write failed"));
            });
        }
    }

    group.finish();
}

/// Benchmark composite template construction alone.
fn bench_composite_template(c: &mut Criterion) {
    let format = row_format();
    let mut group = c.benchmark_group("composite_template");

    for &rows in ROW_COUNTS {
        group.bench_with_input(BenchmarkId::from_parameter(rows), &rows, |b, &rows| {
            b.iter(|| black_box(flat::composite(format.as_str(), rows).expect("Parse failed")));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_render, bench_write_file, bench_composite_template);

criterion_main!(benches);
