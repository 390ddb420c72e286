//! Benchmarks for settling task sets and building aggregate errors.

use std::future::ready;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use settle_core::prelude::*;

fn outcome(i: u64) -> Result<u64, String> {
    if i % 4 == 0 {
        Err(format!("task-{i} failed"))
    } else {
        Ok(i)
    }
}

fn bench_settle_ready(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("settle_ready");
    for size in [10u64, 100, 1_000, 10_000] {
        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.to_async(&rt).iter(|| async move {
                let result = settle((0..size).map(|i| ready(outcome(i)))).await;
                black_box(result.len())
            });
        });
    }
    group.finish();
}

fn bench_settle_yielding(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("settle_yielding");
    for size in [10u64, 100, 1_000] {
        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.to_async(&rt).iter(|| async move {
                let tasks = (0..size).map(|i| async move {
                    tokio::task::yield_now().await;
                    outcome(i)
                });
                black_box(settle(tasks).await.len())
            });
        });
    }
    group.finish();
}

fn bench_settle_spawned(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("settle_spawned");
    for size in [10u64, 100, 1_000] {
        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.to_async(&rt).iter(|| async move {
                let result = settle_spawned((0..size).map(|i| ready(outcome(i)))).await;
                black_box(result.len())
            });
        });
    }
    group.finish();
}

fn bench_aggregate_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate_construction");
    for size in [1usize, 10, 100, 1_000] {
        let errors: Vec<String> = (0..size).map(|i| format!("failure {i}\nsecond line")).collect();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &errors, |b, errors| {
            b.iter(|| {
                let err = AggregateError::new("failures occurred", errors.iter().cloned());
                black_box(err.message().len())
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_settle_ready,
    bench_settle_yielding,
    bench_settle_spawned,
    bench_aggregate_construction,
);
criterion_main!(benches);
