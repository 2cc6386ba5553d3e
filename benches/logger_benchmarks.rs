//! Criterion benchmarks for rust_logger_core

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rust_logger_core::prelude::*;

// ============================================================================
// Logger Creation Benchmarks
// ============================================================================

fn bench_logger_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("logger_creation");
    group.throughput(Throughput::Elements(1));

    group.bench_function("new_sync", |b| {
        b.iter(|| {
            let logger = Logger::new();
            black_box(logger)
        });
    });

    group.bench_function("registry_lookup", |b| {
        let registry = LoggerRegistry::new();
        registry.get_logger("bench");
        b.iter(|| black_box(registry.get_logger(black_box("bench"))));
    });

    group.finish();
}

// ============================================================================
// Logging Performance Benchmarks
// ============================================================================

fn bench_sync_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("sync_logging");
    group.throughput(Throughput::Elements(1));

    let logger = Logger::new();
    logger.set_level(Level::ALL).unwrap();
    logger.add_handler(handler_fn(|record: &Record| {
        black_box(record);
    }));

    group.bench_function("debug", |b| {
        b.iter(|| {
            logger.debug(black_box("Debug message"));
        });
    });

    group.bench_function("info", |b| {
        b.iter(|| {
            logger.info(black_box("Info message"));
        });
    });

    let ctx = logger.bind([("request_id", "abc-123"), ("user", "bench")]);
    group.bench_function("context_info", |b| {
        b.iter(|| {
            ctx.info(black_box("Info message"));
        });
    });

    group.finish();
}

fn bench_async_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("async_logging");
    group.throughput(Throughput::Elements(1));

    let logger = Logger::builder().level(Level::ALL).async_mode(true).build();
    logger.add_handler(handler_fn(|record: &Record| {
        black_box(record);
    }));

    group.bench_function("info", |b| {
        b.iter(|| {
            logger.info(black_box("Info message"));
        });
    });

    group.finish();
    logger.close();
}

// ============================================================================
// Fan-out Benchmarks
// ============================================================================

fn bench_fan_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("fan_out");
    group.throughput(Throughput::Elements(1));

    for handlers in [1usize, 4, 16] {
        let logger = Logger::new();
        for _ in 0..handlers {
            logger.add_handler(handler_fn(|record: &Record| {
                black_box(record);
            }));
        }

        group.bench_function(format!("handlers_{}", handlers), |b| {
            b.iter(|| {
                logger.info(black_box("Fan-out message"));
            });
        });
    }

    group.finish();
}

// ============================================================================
// Filtering Benchmarks
// ============================================================================

fn bench_level_filtering(c: &mut Criterion) {
    let mut group = c.benchmark_group("level_filtering");
    group.throughput(Throughput::Elements(1));

    let logger = Logger::new();
    logger.set_level(Level::WARNING).unwrap();

    group.bench_function("below_threshold", |b| {
        b.iter(|| {
            logger.debug(black_box("Filtered message"));
        });
    });

    group.bench_function("sentinel_rejected", |b| {
        b.iter(|| {
            let _ = black_box(logger.log(Level::OFF, black_box("Rejected")));
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_logger_creation,
    bench_sync_logging,
    bench_async_logging,
    bench_fan_out,
    bench_level_filtering,
);
criterion_main!(benches);
