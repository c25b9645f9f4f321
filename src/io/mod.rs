//! File I/O: log backups, session exports, print staging files and the sites list

pub mod backup;
pub mod export;
pub mod sites;
pub mod staging;
