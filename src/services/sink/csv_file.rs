//! CSV-file device log.

use super::DeviceLogSink;
use crate::models::{LOG_HEADER, LogRecord};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

/// Device log persisted as a UTF-8 CSV file with a mandatory header row.
#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    /// Open the log at `path`, creating it with a header row when missing.
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();

        if !path.exists() {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent)?;
            }
            let mut writer = WriterBuilder::new().from_path(&path)?;
            writer.write_record(LOG_HEADER)?;
            writer.flush()?;
            log::info!("Created device log: {}", path.display());
        }

        Ok(Self { path })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DeviceLogSink for CsvSink {
    fn append(&mut self, record: &LogRecord) -> io::Result<()> {
        let file = OpenOptions::new().append(true).open(&self.path)?;
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        writer.serialize(record)?;
        writer.flush()?;
        log::info!("Logged device: {} - {}", record.label, record.serial);
        Ok(())
    }

    fn records(&self) -> io::Result<Vec<LogRecord>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)?;

        let mut records = Vec::new();
        for row in reader.deserialize::<LogRecord>() {
            records.push(row?);
        }
        Ok(records)
    }
}
