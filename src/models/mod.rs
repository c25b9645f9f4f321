//! Data models for scans, labeled entries, log rows and sites

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw scan as typed (or scanned) by the technician.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanInput {
    pub site: String,
    pub serial: String,
    pub mac: String,
}

impl ScanInput {
    pub fn new(site: impl Into<String>, serial: impl Into<String>, mac: impl Into<String>) -> Self {
        Self {
            site: site.into(),
            serial: serial.into(),
            mac: mac.into(),
        }
    }
}

/// Device family derived from the serial number prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceCategory {
    AccessPoint,
    Switch,
    Invalid,
}

impl fmt::Display for DeviceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeviceCategory::AccessPoint => "access point",
            DeviceCategory::Switch => "switch",
            DeviceCategory::Invalid => "invalid",
        };
        f.write_str(name)
    }
}

/// An accepted scan with its generated label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledEntry {
    pub label: String,
    pub serial: String,
    pub mac: String,
    pub category: DeviceCategory,
    pub site: String,
    pub timestamp: NaiveDateTime,
}

impl LabeledEntry {
    /// Row written to the device log for this entry.
    #[must_use]
    pub fn to_log_record(&self) -> LogRecord {
        LogRecord {
            timestamp: self.timestamp.format(crate::TIMESTAMP_FORMAT).to_string(),
            site: self.site.clone(),
            label: self.label.clone(),
            serial: self.serial.clone(),
            mac: self.mac.clone(),
        }
    }
}

impl fmt::Display for LabeledEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.category {
            DeviceCategory::AccessPoint => write!(
                f,
                "{} - Serial Number: {} - MAC: {}",
                self.label, self.serial, self.mac
            ),
            _ => write!(f, "{} - Serial Number: {}", self.label, self.serial),
        }
    }
}

/// One row of the durable device log.
///
/// Column names are part of the on-disk format and must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    #[serde(rename = "Site")]
    pub site: String,
    #[serde(rename = "AP Label")]
    pub label: String,
    #[serde(rename = "Serial Number")]
    pub serial: String,
    #[serde(rename = "MAC Address", default)]
    pub mac: String,
}

/// Header row of the device log.
pub const LOG_HEADER: [&str; 5] = ["Timestamp", "Site", "AP Label", "Serial Number", "MAC Address"];

/// A deployment site technicians can log devices against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    pub name: String,
}

impl Site {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
