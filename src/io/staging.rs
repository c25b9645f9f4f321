//! Single-entry CSV files read by the label templates at print time

use std::fs;
use std::io::Result;
use std::path::{Path, PathBuf};

pub const AP_STAGING_FILE: &str = "print.csv";
pub const SWITCH_STAGING_FILE: &str = "switch_print.csv";

/// Overwrite `print.csv` with the access point about to be printed.
pub fn stage_access_point(dir: &Path, label: &str, serial: &str, mac: &str) -> Result<PathBuf> {
    write_single_row(
        &dir.join(AP_STAGING_FILE),
        &["AP Label", "Serial Number", "MAC"],
        &[label, serial, mac],
    )
}

/// Overwrite `switch_print.csv` with the switch about to be printed.
pub fn stage_switch(dir: &Path, label: &str, serial: &str) -> Result<PathBuf> {
    write_single_row(
        &dir.join(SWITCH_STAGING_FILE),
        &["Switch Label", "Serial Number"],
        &[label, serial],
    )
}

fn write_single_row(path: &Path, header: &[&str], row: &[&str]) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(header)?;
    writer.write_record(row)?;
    writer.flush()?;
    Ok(path.to_path_buf())
}
