//! In-memory sink for asserting on what an executor logged.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde_json::{Map, Value};

use crate::{LogLevel, LogSink};

#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
    pub context: Map<String, Value>,
}

/// A [`LogSink`] that keeps every record in memory.
///
/// ```rust
/// use std::sync::Arc;
/// use silent_core::{fault, Fault, SilentTry, testing::MemorySink};
///
/// let sink = Arc::new(MemorySink::new());
/// let value = SilentTry::new()
///     .with_sink(sink.clone())
///     .exec(|_| -> Result<i32, Fault> { Err(fault!("boom")) }, -1);
///
/// assert_eq!(value, -1);
/// assert_eq!(sink.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<LogRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.lock().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.lock().iter().map(|r| r.message.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<LogRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LogSink for MemorySink {
    fn log(&self, level: LogLevel, message: &str, context: &Map<String, Value>) {
        self.lock().push(LogRecord {
            level,
            message: message.to_string(),
            context: context.clone(),
        });
    }
}
