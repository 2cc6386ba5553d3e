//! Stress tests for concurrent use of the logger core
//!
//! These tests verify:
//! - One registry instance per name under concurrent lookup
//! - No lost or duplicated records under concurrent emission
//! - Per-handler FIFO order for each emitting thread
//! - Handlers added while other threads emit never see partial history twice

use rust_logger_core::prelude::*;
use std::collections::HashMap;
use std::sync::{Arc, Barrier};
use std::thread;

const THREADS: usize = 8;
const PER_THREAD: usize = 200;

/// Records from each thread must arrive in the order that thread logged them
fn assert_per_thread_order(records: &[Record]) {
    let mut last_seen: HashMap<String, i64> = HashMap::new();
    for record in records {
        let thread = record.field("thread").map(ToString::to_string).unwrap();
        let index = record.field("i").and_then(FieldValue::as_i64).unwrap();
        let previous = last_seen.insert(thread.clone(), index);
        if let Some(previous) = previous {
            assert!(
                index > previous,
                "thread {} delivered {} after {}",
                thread,
                index,
                previous
            );
        }
    }
}

fn hammer(logger: &Logger) {
    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let ctx = logger.bind([("thread", t as i64)]);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..PER_THREAD {
                    ctx.with_field("i", i as i64).info("tick");
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }
}

#[test]
fn test_concurrent_get_logger_single_instance() {
    let registry = Arc::new(LoggerRegistry::new());
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let registry = Arc::clone(&registry);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                registry.get_logger("contended")
            })
        })
        .collect();

    let loggers: Vec<Logger> = handles
        .into_iter()
        .map(|h| h.join().expect("Thread panicked"))
        .collect();

    assert_eq!(registry.len(), 1);
    for logger in &loggers {
        assert!(Logger::ptr_eq(logger, &loggers[0]));
    }
}

#[test]
fn test_concurrent_sync_emission() {
    let logger = Logger::named("stress.sync");
    let memory = MemoryHandler::new();
    logger.add_handler(memory.clone());

    hammer(&logger);

    let records = memory.records();
    assert_eq!(records.len(), THREADS * PER_THREAD);
    assert_per_thread_order(&records);

    let sequences: Vec<u64> = records.iter().map(Record::sequence).collect();
    let expected: Vec<u64> = (0..(THREADS * PER_THREAD) as u64).collect();
    assert_eq!(sequences, expected);
}

#[test]
fn test_concurrent_async_emission() {
    let logger = Logger::builder().name("stress.async").async_mode(true).build();
    let a = MemoryHandler::new();
    let b = MemoryHandler::new();
    logger.add_handler(a.clone());
    logger.add_handler(b.clone());

    hammer(&logger);
    logger.close();

    for memory in [&a, &b] {
        let records = memory.records();
        assert_eq!(records.len(), THREADS * PER_THREAD);
        assert_per_thread_order(&records);
        assert!(records.windows(2).all(|w| w[0].sequence() < w[1].sequence()));
    }
    assert_eq!(logger.metrics().emitted(), (THREADS * PER_THREAD) as u64);
}

#[test]
fn test_handler_added_during_emission() {
    for async_mode in [false, true] {
        let logger = Logger::builder().async_mode(async_mode).build();
        let early = MemoryHandler::new();
        let late = MemoryHandler::new();
        logger.add_handler(early.clone());

        let emitter = {
            let logger = logger.clone();
            thread::spawn(move || {
                for i in 0..1000 {
                    logger.info(format!("{}", i));
                }
            })
        };
        logger.add_handler(late.clone());
        emitter.join().expect("Thread panicked");
        logger.close();

        let early_records = early.records();
        let late_records = late.records();
        assert_eq!(early_records.len(), 1000);

        // The late handler sees a gap-free suffix of the early handler's stream.
        let offset = early_records.len() - late_records.len();
        for (late, early) in late_records.iter().zip(&early_records[offset..]) {
            assert_eq!(late.sequence(), early.sequence());
        }
    }
}

#[test]
fn test_close_while_emitting() {
    let logger = Logger::builder().async_mode(true).build();
    let memory = MemoryHandler::new();
    logger.add_handler(memory.clone());

    let emitter = {
        let logger = logger.clone();
        thread::spawn(move || {
            for i in 0..5000 {
                logger.info(format!("{}", i));
            }
        })
    };
    logger.close();
    emitter.join().expect("Thread panicked");

    let metrics = logger.metrics();
    assert!(logger.is_closed());
    assert_eq!(metrics.emitted() + metrics.dropped_after_close(), 5000);
    assert_eq!(memory.len() as u64, metrics.emitted());
}
