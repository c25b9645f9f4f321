//! Output formatting for CLI

use crate::models::{LabeledEntry, Site};
use crate::services::accept::{Accepted, Rejection};

/// Batch listing, one entry per line in acceptance order.
#[must_use]
pub fn format_batch(entries: &[LabeledEntry]) -> String {
    if entries.is_empty() {
        return "No entries in this batch.".to_string();
    }

    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| format!("{:>3}. {entry}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Numbered site list, marking the selected site.
#[must_use]
pub fn format_sites(sites: &[Site], selected: Option<&str>) -> String {
    sites
        .iter()
        .enumerate()
        .map(|(i, site)| {
            let marker = if selected == Some(site.name.as_str()) {
                '*'
            } else {
                ' '
            };
            format!("{marker}{:>3}. {}", i + 1, site.name)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Status line for a scan outcome.
#[must_use]
pub fn format_outcome(outcome: &Result<Accepted, Rejection>) -> String {
    match outcome {
        Ok(accepted) => format!("{}  [{}]", accepted.status(), accepted.entry),
        Err(rejection) => format!("Rejected: {rejection}"),
    }
}

pub fn session_help() -> &'static str {
    "\
Scan a serial number and press Enter. Access points (FP...) ask for the MAC
next; you can also type `SERIAL MAC` on one line.

COMMANDS:
    :site <NAME|N>   Switch to another site
    :list            Show the current batch
    :undo            Remove the last entry (the device log keeps its row)
    :clear           Clear the batch and reset label counters
    :export          Write the batch to the site's CSV file
    :test            Print a test label
    :help            Show this help
    :quit            Leave the session"
}
