//! Session export: the current batch written to a per-site CSV file

use crate::models::LabeledEntry;
use crate::{Error, Result};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize)]
struct ExportRecord<'a> {
    #[serde(rename = "Timestamp")]
    timestamp: &'a str,
    #[serde(rename = "Site")]
    site: &'a str,
    #[serde(rename = "Device Label")]
    label: &'a str,
    #[serde(rename = "Serial Number")]
    serial: &'a str,
    #[serde(rename = "MAC Address")]
    mac: &'a str,
}

/// File name used for a site's export, with path separators and other
/// characters Windows rejects replaced by `_`.
#[must_use]
pub fn export_file_name(site: &str) -> String {
    let stem: String = site
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("{stem}.csv")
}

/// Write `entries` to `<export_dir>/<site>.csv`, overwriting any previous
/// export for that site.
///
/// Every row carries the export time `at` and the export `site`, not the
/// values captured when the device was scanned.
pub fn export_session(
    entries: &[LabeledEntry],
    site: &str,
    export_dir: &Path,
    at: NaiveDateTime,
) -> Result<PathBuf> {
    if site.trim().is_empty() {
        return Err(Error::InvalidInput("Please select a site first".to_string()));
    }

    fs::create_dir_all(export_dir)?;
    let path = export_dir.join(export_file_name(site));
    let timestamp = at.format(crate::TIMESTAMP_FORMAT).to_string();
    let site = site.trim();

    let mut writer = csv::Writer::from_path(&path)?;
    if entries.is_empty() {
        writer.write_record([
            "Timestamp",
            "Site",
            "Device Label",
            "Serial Number",
            "MAC Address",
        ])?;
    }
    for entry in entries {
        writer.serialize(ExportRecord {
            timestamp: &timestamp,
            site,
            label: &entry.label,
            serial: &entry.serial,
            mac: &entry.mac,
        })?;
    }
    writer.flush()?;

    log::info!("Exported {} entries to {}", entries.len(), path.display());
    Ok(path)
}
