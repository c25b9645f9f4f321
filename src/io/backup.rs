//! Timestamped backup copies of the device log
//!
//! Every successful append to the device log is followed by a verbatim copy
//! of the whole log file into the backup directory. Backups are write-only:
//! nothing in this crate reads them back.

use crate::services::sink::AppendHook;
use chrono::{Local, NaiveDateTime};
use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind, Result, Write};
use std::path::{Path, PathBuf};

const BACKUP_PREFIX: &str = "device_log_backup_";
const BACKUP_STAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Backup file name for a copy taken at `at`.
#[must_use]
pub fn backup_file_name(at: NaiveDateTime) -> String {
    format!("{BACKUP_PREFIX}{}.csv", at.format(BACKUP_STAMP_FORMAT))
}

/// Copy `source` verbatim into `backup_dir`, named after `at`.
///
/// Existing backups are never overwritten. A second copy within the same
/// second gets a `_1`, `_2`, ... suffix.
pub fn write_backup(source: &Path, backup_dir: &Path, at: NaiveDateTime) -> Result<PathBuf> {
    let mut input = File::open(source)?;
    fs::create_dir_all(backup_dir)?;

    let stamp = at.format(BACKUP_STAMP_FORMAT).to_string();
    let mut suffix = 0u32;
    loop {
        let target = if suffix == 0 {
            backup_dir.join(backup_file_name(at))
        } else {
            backup_dir.join(format!("{BACKUP_PREFIX}{stamp}_{suffix}.csv"))
        };

        match OpenOptions::new().write(true).create_new(true).open(&target) {
            Ok(mut output) => {
                io::copy(&mut input, &mut output)?;
                output.flush()?;
                return Ok(target);
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => suffix += 1,
            Err(e) => return Err(e),
        }
    }
}

/// Append hook that snapshots the log file after each write.
#[derive(Debug, Clone)]
pub struct FileBackup {
    source: PathBuf,
    backup_dir: PathBuf,
}

impl FileBackup {
    pub fn new(source: impl Into<PathBuf>, backup_dir: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            backup_dir: backup_dir.into(),
        }
    }

    #[must_use]
    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }
}

impl AppendHook for FileBackup {
    fn after_append(&mut self) -> Option<PathBuf> {
        match write_backup(&self.source, &self.backup_dir, Local::now().naive_local()) {
            Ok(path) => {
                log::info!("Created backup: {}", path.display());
                Some(path)
            }
            Err(e) => {
                log::error!("Backup failed: {e}");
                None
            }
        }
    }
}
