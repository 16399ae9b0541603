//! Philox Generation Benchmarks
//!
//! Measures the cost of the pieces random kernels sit on:
//! - Raw block generation and skip-ahead
//! - Word-at-a-time streaming
//! - Sequential versus sharded fills

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use philox_core::config::FillConfig;
use philox_core::distributions::{StandardNormalF32, UniformF32};
use philox_core::fill::fill_random_with;
use philox_core::{PhiloxEngine, PhiloxStream};

/// Benchmark single block generation and skipping
fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("philox/engine");
    group.throughput(Throughput::Elements(4));

    group.bench_function("next_block", |b| {
        let mut engine = PhiloxEngine::new(42, 0);
        b.iter(|| black_box(engine.next_block()));
    });

    group.bench_function("skip_ahead", |b| {
        let mut engine = PhiloxEngine::new(42, 0);
        b.iter(|| engine.skip_ahead(black_box(0x1_0000_0001)));
    });

    group.finish();
}

/// Benchmark buffered word access
fn bench_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("philox/stream");
    group.throughput(Throughput::Elements(1));

    group.bench_function("next_word", |b| {
        let mut stream = PhiloxStream::new(42, 0);
        b.iter(|| black_box(stream.next_word()));
    });

    group.bench_function("next_f64", |b| {
        let mut stream = PhiloxStream::new(42, 0);
        b.iter(|| black_box(stream.next_f64()));
    });

    group.finish();
}

/// Benchmark fills across sizes, sequential and sharded
fn bench_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("philox/fill");

    for size in [1_024usize, 65_536, 1_048_576] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("uniform_sequential", size), &size, |b, &size| {
            let mut engine = PhiloxEngine::new(7, 0);
            let mut out = vec![0.0f32; size];
            let config = FillConfig::sequential();
            b.iter(|| {
                fill_random_with(&mut engine, &UniformF32, &mut out, &config).unwrap();
                black_box(&out);
            });
        });

        group.bench_with_input(BenchmarkId::new("uniform_sharded", size), &size, |b, &size| {
            let mut engine = PhiloxEngine::new(7, 0);
            let mut out = vec![0.0f32; size];
            let config = FillConfig::default();
            b.iter(|| {
                fill_random_with(&mut engine, &UniformF32, &mut out, &config).unwrap();
                black_box(&out);
            });
        });

        group.bench_with_input(BenchmarkId::new("normal_sharded", size), &size, |b, &size| {
            let mut engine = PhiloxEngine::new(7, 0);
            let mut out = vec![0.0f32; size];
            let config = FillConfig::default();
            b.iter(|| {
                fill_random_with(&mut engine, &StandardNormalF32, &mut out, &config).unwrap();
                black_box(&out);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_engine, bench_stream, bench_fill);
criterion_main!(benches);
