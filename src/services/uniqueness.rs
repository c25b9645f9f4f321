//! Duplicate detection against the full device log history

use crate::models::LogRecord;
use std::collections::HashSet;

/// Index of every serial number and non-empty MAC address already logged.
///
/// Built once from the device log and kept current as entries are appended,
/// so a scan does not have to re-read the log file.
#[derive(Debug, Default, Clone)]
pub struct DeviceIndex {
    serials: HashSet<String>,
    macs: HashSet<String>,
}

impl DeviceIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index from existing log rows.
    #[must_use]
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a LogRecord>,
    {
        let mut index = Self::new();
        for record in records {
            index.insert(&record.serial, &record.mac);
        }
        index
    }

    /// Record a newly logged device.
    pub fn insert(&mut self, serial: &str, mac: &str) {
        if let Some(key) = normalize(serial) {
            self.serials.insert(key);
        }
        if let Some(key) = normalize(mac) {
            self.macs.insert(key);
        }
    }

    /// True when the serial, or a non-empty MAC, was logged before.
    ///
    /// Two devices without a MAC never collide on the MAC column.
    #[must_use]
    pub fn is_duplicate(&self, serial: &str, mac: &str) -> bool {
        let serial_seen = normalize(serial).is_some_and(|key| self.serials.contains(&key));
        let mac_seen = normalize(mac).is_some_and(|key| self.macs.contains(&key));
        serial_seen || mac_seen
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.serials.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.serials.is_empty()
    }
}

fn normalize(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_ascii_uppercase())
    }
}
