//! In-memory handler

use crate::core::{Handler, Record, Result};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// Buffers records in memory.
///
/// Clones share one buffer, so a test can keep a clone after handing the
/// handler to a logger. With a capacity set, the oldest records are evicted
/// once the buffer is full.
#[derive(Debug, Clone, Default)]
pub struct MemoryHandler {
    records: Arc<Mutex<VecDeque<Record>>>,
    capacity: Option<usize>,
}

impl MemoryHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `capacity` records (minimum 1)
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Arc::new(Mutex::new(VecDeque::with_capacity(capacity.max(1)))),
            capacity: Some(capacity.max(1)),
        }
    }

    /// Snapshot of the buffered records, oldest first
    pub fn records(&self) -> Vec<Record> {
        self.records.lock().iter().cloned().collect()
    }

    pub fn messages(&self) -> Vec<String> {
        self.records
            .lock()
            .iter()
            .map(|record| record.message().to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl Handler for MemoryHandler {
    fn handle(&mut self, record: &Record) -> Result<()> {
        let mut records = self.records.lock();
        if let Some(capacity) = self.capacity {
            while records.len() >= capacity {
                records.pop_front();
            }
        }
        records.push_back(record.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
