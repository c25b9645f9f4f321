//! Core services: classification, counters, duplicate detection, the batch
//! ledger, acceptance, device log sinks and label printing

pub mod accept;
pub mod classify;
pub mod counter;
pub mod ledger;
pub mod print;
pub mod sink;
pub mod uniqueness;
