//! Command-line front end: argument parsing, session line commands and output

pub mod args;
pub mod output;
pub mod session;
