//! Device log sinks: the append-only store of every accepted device.

use crate::models::LogRecord;
use std::io;
use std::path::PathBuf;

/// Append-only store for accepted devices.
///
/// Rows are never edited or removed once appended.
pub trait DeviceLogSink {
    /// Durably append one row.
    fn append(&mut self, record: &LogRecord) -> io::Result<()>;

    /// Read back every row ever appended, oldest first.
    fn records(&self) -> io::Result<Vec<LogRecord>>;
}

/// Side effect run after every successful append.
pub trait AppendHook {
    /// Returns the path of the backup written, if any. Failures are logged by
    /// the hook and never reported to the caller.
    fn after_append(&mut self) -> Option<PathBuf>;
}

/// Hook that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoBackup;

impl AppendHook for NoBackup {
    fn after_append(&mut self) -> Option<PathBuf> {
        None
    }
}

pub mod csv_file;
pub mod memory;
