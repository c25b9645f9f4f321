//! Device Label Library
//!
//! Records provisioned network devices (access points and switches) into an
//! append-only CSV log, rejects devices that were already scanned, keeps the
//! per-session label counters and hands each accepted device to an external
//! label printer.

pub mod cli;
pub mod config;
pub mod io;
pub mod models;
pub mod services;

pub use config::AppConfig;
pub use models::{DeviceCategory, LabeledEntry, LogRecord, ScanInput, Site};
pub use services::accept::{Accepted, Rejection, Session};

use std::result;

/// Custom error type for the library
#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
    InvalidInput(String),
    Config(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::Csv(e) => write!(f, "CSV error: {e}"),
            Error::Json(e) => write!(f, "JSON error: {e}"),
            Error::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            Error::Config(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Csv(e) => Some(e),
            Error::Json(e) => Some(e),
            Error::InvalidInput(_) | Error::Config(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

pub type Result<T> = result::Result<T, Error>;

/// Timestamp layout used in the device log and session exports.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
