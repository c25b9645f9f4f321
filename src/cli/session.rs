//! Line commands understood by an interactive labeling session

use crate::models::DeviceCategory;
use crate::services::classify::classify;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// A scanned serial, optionally followed by its MAC on the same line.
    Scan { serial: String, mac: Option<String> },
    Site(String),
    Undo,
    Clear,
    Export,
    List,
    TestPrint,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

/// Interpret one input line. Lines starting with `:` are commands; anything
/// else is a scan.
#[must_use]
pub fn parse_line(line: &str) -> SessionCommand {
    let line = line.trim();
    if line.is_empty() {
        return SessionCommand::Empty;
    }

    if let Some(command) = line.strip_prefix(':') {
        let (name, arg) = match command.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (command, ""),
        };
        return match name.to_ascii_lowercase().as_str() {
            "site" if !arg.is_empty() => SessionCommand::Site(arg.to_string()),
            "undo" | "remove" => SessionCommand::Undo,
            "clear" => SessionCommand::Clear,
            "export" => SessionCommand::Export,
            "list" | "ls" => SessionCommand::List,
            "test" | "test-print" => SessionCommand::TestPrint,
            "help" | "h" | "?" => SessionCommand::Help,
            "quit" | "q" | "exit" => SessionCommand::Quit,
            _ => SessionCommand::Unknown(line.to_string()),
        };
    }

    let mut parts = line.split_whitespace();
    let serial = parts.next().unwrap_or_default().to_string();
    let mac = parts.next().map(str::to_string);
    SessionCommand::Scan { serial, mac }
}

/// Access points need a MAC; prompt for one when the scan line had none.
#[must_use]
pub fn needs_mac_prompt(serial: &str, mac: Option<&str>) -> bool {
    classify(serial) == DeviceCategory::AccessPoint && mac.is_none_or(|m| m.trim().is_empty())
}

/// Interpret a yes/no confirmation answer. Anything but yes is no.
#[must_use]
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
