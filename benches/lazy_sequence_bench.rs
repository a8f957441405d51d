//! Benchmark for LazySequence vs eager iterator pipelines.
//!
//! Measures the cost of first-time realization, memoized re-traversal, and
//! contended traversal from several threads.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use lazyseq::LazySequence;
use std::hint::black_box;
use std::thread;

// =============================================================================
// First Traversal Benchmark
// =============================================================================

fn benchmark_first_traversal(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("first_traversal");

    for size in [100_u32, 1000, 10000] {
        // Builds and forces a fresh chain every iteration
        group.bench_with_input(
            BenchmarkId::new("LazySequence", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let sequence = LazySequence::of(0..black_box(size));
                    black_box(sequence.aggregate(0_u64, |total, n| total + u64::from(*n)))
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("Iterator", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| black_box((0..black_box(size)).map(u64::from).sum::<u64>()));
            },
        );
    }

    group.finish();
}

// =============================================================================
// Memoized Traversal Benchmark
// =============================================================================

fn benchmark_memoized_traversal(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("memoized_traversal");

    for size in [100_u32, 1000, 10000] {
        let sequence = LazySequence::of(0..size);
        let _ = sequence.to_list();
        let vector: Vec<u32> = (0..size).collect();

        group.bench_with_input(
            BenchmarkId::new("LazySequence", size),
            &size,
            |bencher, _| {
                bencher.iter(|| {
                    black_box(sequence.aggregate(0_u64, |total, n| total + u64::from(*n)))
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |bencher, _| {
            bencher.iter(|| black_box(vector.iter().map(|n| u64::from(*n)).sum::<u64>()));
        });
    }

    group.finish();
}

// =============================================================================
// filter/transform Benchmark
// =============================================================================

fn benchmark_filter_transform(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("filter_transform");

    for size in [100_u32, 1000, 10000] {
        group.bench_with_input(
            BenchmarkId::new("LazySequence", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let derived = LazySequence::of(0..black_box(size))
                        .filter(|n| n % 2 == 0)
                        .transform(|n| n / 2);
                    black_box(derived.to_list())
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("Iterator", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    black_box(
                        (0..black_box(size))
                            .filter(|n| n % 2 == 0)
                            .map(|n| n / 2)
                            .collect::<Vec<u32>>(),
                    )
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// to_set Benchmark
// =============================================================================

fn benchmark_to_set(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("to_set");

    for size in [100_u32, 1000, 10000] {
        let ascending = LazySequence::of(0..size);
        let descending = LazySequence::of((0..size).rev());
        let _ = ascending.to_list();
        let _ = descending.to_list();

        group.bench_with_input(
            BenchmarkId::new("ascending", size),
            &size,
            |bencher, _| {
                bencher.iter(|| black_box(ascending.to_set(|left: &u32, right: &u32| left.cmp(right))));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("descending", size),
            &size,
            |bencher, _| {
                bencher.iter(|| {
                    black_box(descending.to_set(|left: &u32, right: &u32| left.cmp(right)))
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// Contended Traversal Benchmark
// =============================================================================

fn benchmark_contended_traversal(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("contended_traversal");
    group.sample_size(20);

    for thread_count in [1, 4, 16] {
        group.bench_with_input(
            BenchmarkId::new("LazySequence", thread_count),
            &thread_count,
            |bencher, &thread_count| {
                bencher.iter(|| {
                    let sequence = LazySequence::of(0..10_000_u32);
                    let handles: Vec<_> = (0..thread_count)
                        .map(|_| {
                            let s = sequence.clone();
                            thread::spawn(move || s.find_first(|n| *n == 9_999))
                        })
                        .collect();
                    for handle in handles {
                        let _ = black_box(handle.join());
                    }
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_first_traversal,
    benchmark_memoized_traversal,
    benchmark_filter_transform,
    benchmark_to_set,
    benchmark_contended_traversal
);

criterion_main!(benches);
