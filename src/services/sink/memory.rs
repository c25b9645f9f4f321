//! In-memory device log for callers that do not need a file on disk.

use super::DeviceLogSink;
use crate::models::LogRecord;
use std::io;

#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    records: Vec<LogRecord>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing history.
    #[must_use]
    pub fn with_records(records: Vec<LogRecord>) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl DeviceLogSink for MemorySink {
    fn append(&mut self, record: &LogRecord) -> io::Result<()> {
        self.records.push(record.clone());
        Ok(())
    }

    fn records(&self) -> io::Result<Vec<LogRecord>> {
        Ok(self.records.clone())
    }
}
