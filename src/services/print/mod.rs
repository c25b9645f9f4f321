//! Label print dispatch

use std::path::PathBuf;

pub mod ptouch;

pub use ptouch::PtouchPrinter;

/// Sends label print requests to an external tool.
///
/// `true` means the request was handed off successfully, not that a label
/// came out of the printer. Implementations log their own failures.
pub trait LabelPrinter {
    fn print_access_point(&mut self, label: &str, mac: &str, serial: &str) -> bool;

    fn print_switch(&mut self, label: &str, serial: &str) -> bool;
}

impl<T: LabelPrinter + ?Sized> LabelPrinter for Box<T> {
    fn print_access_point(&mut self, label: &str, mac: &str, serial: &str) -> bool {
        (**self).print_access_point(label, mac, serial)
    }

    fn print_switch(&mut self, label: &str, serial: &str) -> bool {
        (**self).print_switch(label, serial)
    }
}

/// Printer that accepts every request without doing anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPrinter;

impl LabelPrinter for NullPrinter {
    fn print_access_point(&mut self, label: &str, _mac: &str, _serial: &str) -> bool {
        log::debug!("Printing disabled, skipped label {label}");
        true
    }

    fn print_switch(&mut self, label: &str, _serial: &str) -> bool {
        log::debug!("Printing disabled, skipped label {label}");
        true
    }
}

pub const TEST_LABEL: &str = "TEST-AP";
pub const TEST_MAC: &str = "00:11:22:33:44:55";
pub const TEST_SERIAL: &str = "TEST123";

/// Print a fixed access point label to check the printer setup.
pub fn test_print(printer: &mut dyn LabelPrinter) -> bool {
    printer.print_access_point(TEST_LABEL, TEST_MAC, TEST_SERIAL)
}

/// Where the printer setup points and whether those files exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrinterDiagnostics {
    pub executable: Option<PathBuf>,
    pub executable_exists: bool,
    pub ap_template: PathBuf,
    pub ap_template_exists: bool,
    pub switch_template: PathBuf,
    pub switch_template_exists: bool,
}

impl std::fmt::Display for PrinterDiagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.executable {
            Some(path) => writeln!(f, "P-touch Editor path: {}", path.display())?,
            None => writeln!(f, "P-touch Editor path: (none configured)")?,
        }
        writeln!(f, "Path exists: {}", self.executable_exists)?;
        writeln!(f, "AP template path: {}", self.ap_template.display())?;
        writeln!(f, "AP template exists: {}", self.ap_template_exists)?;
        writeln!(f, "Switch template path: {}", self.switch_template.display())?;
        write!(f, "Switch template exists: {}", self.switch_template_exists)
    }
}
