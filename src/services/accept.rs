//! Scan acceptance: validation, duplicate check, logging, labeling and print
//! dispatch for a single scanned device.

use crate::io::export::export_session;
use crate::models::{DeviceCategory, LabeledEntry, ScanInput};
use crate::services::classify::classify;
use crate::services::counter::Counters;
use crate::services::ledger::BatchLedger;
use crate::services::print::{self, LabelPrinter};
use crate::services::sink::{AppendHook, DeviceLogSink};
use crate::services::uniqueness::DeviceIndex;
use chrono::{Local, NaiveDateTime};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Why a scan was not accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    MissingSite,
    MissingSerial,
    MissingMacForAccessPoint,
    InvalidSerial,
    DuplicateDevice,
    /// The device log could not be written; nothing was recorded.
    PersistenceFailure(String),
}

impl Rejection {
    /// Whether the front end should clear the serial and MAC inputs.
    #[must_use]
    pub fn clears_input(&self) -> bool {
        matches!(self, Rejection::InvalidSerial | Rejection::DuplicateDevice)
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::MissingSite => f.write_str("Please select a site"),
            Rejection::MissingSerial => f.write_str("Serial number is required"),
            Rejection::MissingMacForAccessPoint => f.write_str("MAC address is required for APs"),
            Rejection::InvalidSerial => f.write_str("Invalid serial number"),
            Rejection::DuplicateDevice => f.write_str("Device has already been scanned"),
            Rejection::PersistenceFailure(msg) => write!(f, "Failed to log device: {msg}"),
        }
    }
}

impl std::error::Error for Rejection {}

/// A scan that made it into the device log.
#[derive(Debug, Clone)]
pub struct Accepted {
    pub entry: LabeledEntry,
    /// Backup copy written after the log append, if any.
    pub backup: Option<PathBuf>,
    /// Whether the print request was handed off.
    pub printed: bool,
}

impl Accepted {
    /// Status line for the user.
    #[must_use]
    pub fn status(&self) -> String {
        if self.printed {
            format!("{}: label printed successfully", self.entry.label)
        } else {
            format!(
                "{}: logged, but label printing failed (see log)",
                self.entry.label
            )
        }
    }
}

/// Run the acceptance gates for `input` without touching any state.
///
/// Gates run in order and the first failure wins: site, serial, category
/// (access points need a MAC, invalid serials are rejected), then duplicates
/// against everything already logged. On success the returned entry carries
/// the label the current counters assign.
pub fn evaluate(
    input: &ScanInput,
    counters: &Counters,
    index: &DeviceIndex,
    now: NaiveDateTime,
) -> Result<LabeledEntry, Rejection> {
    let site = input.site.trim();
    let serial = input.serial.trim();
    let mac = input.mac.trim();

    if site.is_empty() {
        return Err(Rejection::MissingSite);
    }
    if serial.is_empty() {
        return Err(Rejection::MissingSerial);
    }

    let category = classify(serial);
    match category {
        DeviceCategory::AccessPoint if mac.is_empty() => {
            return Err(Rejection::MissingMacForAccessPoint);
        }
        DeviceCategory::Invalid => return Err(Rejection::InvalidSerial),
        DeviceCategory::AccessPoint | DeviceCategory::Switch => {}
    }

    if index.is_duplicate(serial, mac) {
        return Err(Rejection::DuplicateDevice);
    }

    let label = counters
        .label_for(category)
        .ok_or(Rejection::InvalidSerial)?;

    Ok(LabeledEntry {
        label,
        serial: serial.to_string(),
        mac: mac.to_string(),
        category,
        site: site.to_string(),
        timestamp: now,
    })
}

/// One labeling session: the batch ledger and counters, the duplicate index
/// over the durable log, and the collaborators each accepted scan flows
/// through.
pub struct Session<S, H, P> {
    ledger: BatchLedger,
    index: DeviceIndex,
    sink: S,
    hook: H,
    printer: P,
    unexported: bool,
}

impl<S, H, P> Session<S, H, P>
where
    S: DeviceLogSink,
    H: AppendHook,
    P: LabelPrinter,
{
    /// Start a session over an existing device log.
    pub fn open(sink: S, hook: H, printer: P) -> io::Result<Self> {
        let history = sink.records()?;
        let index = DeviceIndex::from_records(&history);
        log::debug!("Loaded {} logged devices", history.len());

        Ok(Self {
            ledger: BatchLedger::new(),
            index,
            sink,
            hook,
            printer,
            unexported: false,
        })
    }

    #[must_use]
    pub fn ledger(&self) -> &BatchLedger {
        &self.ledger
    }

    #[must_use]
    pub fn counters(&self) -> &Counters {
        self.ledger.counters()
    }

    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    #[must_use]
    pub fn hook(&self) -> &H {
        &self.hook
    }

    #[must_use]
    pub fn printer(&self) -> &P {
        &self.printer
    }

    /// True when the batch changed since the last export.
    #[must_use]
    pub fn has_unexported(&self) -> bool {
        self.unexported && !self.ledger.is_empty()
    }

    /// True when the serial or non-empty MAC is already in the device log.
    #[must_use]
    pub fn is_logged(&self, serial: &str, mac: &str) -> bool {
        self.index.is_duplicate(serial, mac)
    }

    /// Accept a scan at the current local time.
    pub fn accept(&mut self, input: &ScanInput) -> Result<Accepted, Rejection> {
        self.accept_at(input, Local::now().naive_local())
    }

    /// Accept a scan stamped with `now`.
    ///
    /// A rejection leaves the ledger, counters and log untouched. Once the log
    /// append succeeds the scan is accepted; backup and print failures are
    /// logged and reported on the result only.
    pub fn accept_at(
        &mut self,
        input: &ScanInput,
        now: NaiveDateTime,
    ) -> Result<Accepted, Rejection> {
        let entry = evaluate(input, self.ledger.counters(), &self.index, now)
            .inspect_err(|r| log::warn!("Rejected scan {:?}: {r}", input.serial.trim()))?;

        if let Err(e) = self.sink.append(&entry.to_log_record()) {
            log::error!("Failed to log device {}: {e}", entry.serial);
            return Err(Rejection::PersistenceFailure(e.to_string()));
        }

        self.index.insert(&entry.serial, &entry.mac);
        self.ledger.push(entry.clone());
        self.unexported = true;

        let backup = self.hook.after_append();

        let printed = match entry.category {
            DeviceCategory::AccessPoint => {
                self.printer
                    .print_access_point(&entry.label, &entry.mac, &entry.serial)
            }
            _ => self.printer.print_switch(&entry.label, &entry.serial),
        };
        if !printed {
            log::error!("Label print failed for {} ({})", entry.label, entry.serial);
        }

        Ok(Accepted {
            entry,
            backup,
            printed,
        })
    }

    /// Drop the last batch entry and roll back its counter. The device log
    /// row stays.
    pub fn remove_last(&mut self) -> Option<LabeledEntry> {
        let removed = self.ledger.remove_last();
        match &removed {
            Some(entry) => {
                log::info!("Removed last entry: {} - {}", entry.label, entry.serial);
                self.unexported = true;
            }
            None => log::info!("No entries to remove"),
        }
        removed
    }

    /// Empty the batch and reset the counters.
    pub fn clear(&mut self) {
        log::info!("Cleared {} batch entries", self.ledger.len());
        self.ledger.clear();
        self.unexported = false;
    }

    /// Export the batch to `<export_dir>/<site>.csv`.
    pub fn export(&mut self, site: &str, export_dir: &Path) -> crate::Result<PathBuf> {
        let path = export_session(
            self.ledger.entries(),
            site,
            export_dir,
            Local::now().naive_local(),
        )?;
        self.unexported = false;
        Ok(path)
    }

    /// Print the fixed test label.
    pub fn test_print(&mut self) -> bool {
        print::test_print(&mut self.printer)
    }
}
