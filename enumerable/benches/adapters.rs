//! Adapter Pipeline Benchmarks
//!
//! Measures the per-element cost of lazy pipelines against their plain
//! `std` equivalents, and the throughput of the combinatorial generators.
//!
//! # Key Metrics
//!
//! - Stateless chain overhead vs `std`: Target < 1.2x
//! - Windowing cost: dominated by the per-window snapshot
//! - Generators: O(1) amortized per tuple, independent of pool size

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use enumerable::{Enumerable, RArray, Value};

// =============================================================================
// Stateless Chains
// =============================================================================

fn bench_stateless_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("stateless_chain");

    group.bench_function("lazy_map_select_take", |b| {
        b.iter(|| {
            (0_i64..)
                .lazy()
                .map(|x| x * 3)
                .select(|x| x % 2 == 0)
                .first_n(black_box(1_000))
        })
    });

    group.bench_function("std_map_filter_take", |b| {
        b.iter(|| {
            (0_i64..)
                .map(|x| x * 3)
                .filter(|x| x % 2 == 0)
                .take(black_box(1_000))
                .collect::<Vec<_>>()
        })
    });

    group.finish();
}

// =============================================================================
// Windowing
// =============================================================================

fn bench_windowing(c: &mut Criterion) {
    let mut group = c.benchmark_group("windowing");

    for size in [2_i64, 8, 32] {
        group.bench_with_input(BenchmarkId::new("each_cons", size), &size, |b, &n| {
            b.iter(|| (0..10_000).lazy().each_cons(n).map(|l| l.count()))
        });
        group.bench_with_input(BenchmarkId::new("each_slice", size), &size, |b, &n| {
            b.iter(|| (0..10_000).lazy().each_slice(n).map(|l| l.count()))
        });
    }

    group.bench_function("chunk_values", |b| {
        let values: Vec<Value> = (0..10_000).map(|i| Value::Int(i / 7)).collect();
        b.iter(|| {
            values
                .iter()
                .lazy()
                .chunk(|v| v.as_int())
                .count()
        })
    });

    group.finish();
}

// =============================================================================
// Combinatorics
// =============================================================================

fn bench_generators(c: &mut Criterion) {
    let mut group = c.benchmark_group("generators");
    let pool: RArray<i64> = (0..10).collect();

    group.bench_function("combination_10_4", |b| {
        b.iter(|| black_box(&pool).combination(4).count())
    });

    group.bench_function("permutation_10_4", |b| {
        b.iter(|| black_box(&pool).permutation(4).count())
    });

    group.bench_function("repeated_permutation_10_3", |b| {
        b.iter(|| black_box(&pool).repeated_permutation(3).count())
    });

    group.bench_function("product_10x10x10", |b| {
        b.iter(|| {
            black_box(&pool)
                .product([pool.clone(), pool.clone()])
                .count()
        })
    });

    group.finish();
}

// =============================================================================
// Sorting
// =============================================================================

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort");
    let ints: RArray<i64> = (0..5_000).map(|i| (i * 7_919) % 5_003).collect();
    let values: RArray<Value> = ints.iter().map(|&i| Value::Int(i)).collect();

    group.bench_function("ints", |b| b.iter(|| black_box(&ints).sort()));
    group.bench_function("values", |b| b.iter(|| black_box(&values).sort()));

    group.finish();
}

criterion_group!(
    benches,
    bench_stateless_chain,
    bench_windowing,
    bench_generators,
    bench_sort
);
criterion_main!(benches);
