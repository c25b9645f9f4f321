//! Test doubles and helpers shared by the integration tests

#![allow(dead_code)]

use devlabel::models::LogRecord;
use devlabel::services::print::LabelPrinter;
use devlabel::services::sink::memory::MemorySink;
use devlabel::services::sink::{AppendHook, DeviceLogSink, NoBackup};
use devlabel::Session;
use std::io;
use std::path::PathBuf;

/// A print request captured by [`RecordingPrinter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrintCall {
    AccessPoint {
        label: String,
        mac: String,
        serial: String,
    },
    Switch {
        label: String,
        serial: String,
    },
}

/// Printer double that records every request and answers with `succeed`.
#[derive(Debug, Clone)]
pub struct RecordingPrinter {
    pub calls: Vec<PrintCall>,
    pub succeed: bool,
}

impl RecordingPrinter {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            succeed: true,
        }
    }

    pub fn failing() -> Self {
        Self {
            calls: Vec::new(),
            succeed: false,
        }
    }
}

impl LabelPrinter for RecordingPrinter {
    fn print_access_point(&mut self, label: &str, mac: &str, serial: &str) -> bool {
        self.calls.push(PrintCall::AccessPoint {
            label: label.to_string(),
            mac: mac.to_string(),
            serial: serial.to_string(),
        });
        self.succeed
    }

    fn print_switch(&mut self, label: &str, serial: &str) -> bool {
        self.calls.push(PrintCall::Switch {
            label: label.to_string(),
            serial: serial.to_string(),
        });
        self.succeed
    }
}

/// Sink whose appends always fail.
#[derive(Debug, Default)]
pub struct FailingSink {
    pub history: Vec<LogRecord>,
}

impl DeviceLogSink for FailingSink {
    fn append(&mut self, _record: &LogRecord) -> io::Result<()> {
        Err(io::Error::other("disk full"))
    }

    fn records(&self) -> io::Result<Vec<LogRecord>> {
        Ok(self.history.clone())
    }
}

/// Hook counting how often it ran.
#[derive(Debug, Default)]
pub struct CountingHook {
    pub calls: usize,
}

impl AppendHook for CountingHook {
    fn after_append(&mut self) -> Option<PathBuf> {
        self.calls += 1;
        None
    }
}

pub fn record(serial: &str, mac: &str) -> LogRecord {
    LogRecord {
        timestamp: "2024-05-01 09:30:00".to_string(),
        site: "Lab1".to_string(),
        label: "AP-01".to_string(),
        serial: serial.to_string(),
        mac: mac.to_string(),
    }
}

/// Session over an in-memory log with the given history.
pub fn memory_session(
    history: Vec<LogRecord>,
) -> Session<MemorySink, NoBackup, RecordingPrinter> {
    Session::open(
        MemorySink::with_records(history),
        NoBackup,
        RecordingPrinter::new(),
    )
    .expect("open in-memory session")
}
