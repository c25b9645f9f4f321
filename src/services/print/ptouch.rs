//! Brother P-touch Editor command-line dispatch.

use super::{LabelPrinter, PrinterDiagnostics};
use crate::config::PrinterConfig;
use crate::io::staging;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(25);
const DRAIN_GRACE: Duration = Duration::from_millis(500);

/// Prints labels by running the P-touch Editor executable once per label.
#[derive(Debug, Clone)]
pub struct PtouchPrinter {
    executable: Option<PathBuf>,
    ap_template: PathBuf,
    switch_template: PathBuf,
    staging_dir: Option<PathBuf>,
    timeout: Duration,
}

/// Outcome of one printer process run.
#[derive(Debug)]
enum RunError {
    NotFound(PathBuf),
    Spawn(std::io::Error),
    Timeout(Duration),
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunError::NotFound(path) => {
                write!(f, "Brother P-touch Editor not found at {}", path.display())
            }
            RunError::Spawn(e) => write!(f, "failed to run printer: {e}"),
            RunError::Timeout(t) => write!(f, "printer did not finish within {}s", t.as_secs()),
        }
    }
}

impl PtouchPrinter {
    #[must_use]
    pub fn from_config(config: &PrinterConfig) -> Self {
        let executable = config.resolve_executable();
        match &executable {
            Some(path) => log::info!("Using printer executable: {}", path.display()),
            None => log::warn!("No printer executable configured"),
        }

        Self {
            executable,
            ap_template: config.ap_template.clone(),
            switch_template: config.switch_template.clone(),
            staging_dir: config.staging_dir.clone(),
            timeout: config.timeout(),
        }
    }

    #[must_use]
    pub fn executable(&self) -> Option<&Path> {
        self.executable.as_deref()
    }

    #[must_use]
    pub fn diagnostics(&self) -> PrinterDiagnostics {
        PrinterDiagnostics {
            executable: self.executable.clone(),
            executable_exists: self.executable.as_deref().is_some_and(Path::exists),
            ap_template: self.ap_template.clone(),
            ap_template_exists: self.ap_template.exists(),
            switch_template: self.switch_template.clone(),
            switch_template_exists: self.switch_template.exists(),
        }
    }

    fn dispatch(&self, template: &Path, label: &str, mac: &str, serial: &str) -> bool {
        let args = print_arguments(template, label, mac, serial);
        match self.run(&args) {
            Ok(status) => status.success(),
            Err(e) => {
                log::error!("Print error: {e}");
                false
            }
        }
    }

    fn run(&self, args: &[String]) -> Result<ExitStatus, RunError> {
        let exe = match &self.executable {
            Some(path) if path.exists() => path,
            Some(path) => return Err(RunError::NotFound(path.clone())),
            None => return Err(RunError::NotFound(PathBuf::new())),
        };

        log::info!("Executing print command: {} {}", exe.display(), args.join(" "));

        let mut command = Command::new(exe);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        hide_console_window(&mut command);

        let mut child = command.spawn().map_err(RunError::Spawn)?;
        let stdout = child.stdout.take().map(drain);
        let stderr = child.stderr.take().map(drain);
        let start = Instant::now();

        let outcome = loop {
            match child.try_wait() {
                Ok(Some(status)) => break Ok(status),
                Ok(None) if start.elapsed() >= self.timeout => {
                    if let Err(e) = child.kill() {
                        log::warn!("Failed to kill printer process: {e}");
                    }
                    if let Err(e) = child.wait() {
                        log::warn!("Failed to reap printer process: {e}");
                    }
                    break Err(RunError::Timeout(self.timeout));
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(e) => break Err(RunError::Spawn(e)),
            }
        };

        if let Some(output) = collect(stdout, "stdout") {
            log::info!("Print output: {output}");
        }
        if let Some(output) = collect(stderr, "stderr") {
            log::error!("Print error: {output}");
        }
        outcome
    }
}

/// Read a child pipe to the end on its own thread.
fn drain<R: Read + Send + 'static>(mut pipe: R) -> Receiver<io::Result<String>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        let result = pipe
            .read_to_end(&mut buf)
            .map(|_| String::from_utf8_lossy(&buf).into_owned());
        let _ = tx.send(result);
    });
    rx
}

/// Wait up to `DRAIN_GRACE` for a drained pipe. A grandchild can hold the
/// pipe open after the child exits; its reader is then abandoned.
fn collect(reader: Option<Receiver<io::Result<String>>>, name: &str) -> Option<String> {
    match reader?.recv_timeout(DRAIN_GRACE) {
        Ok(Ok(text)) => {
            let text = text.trim();
            (!text.is_empty()).then(|| text.to_string())
        }
        Ok(Err(e)) => {
            log::warn!("Failed to read printer {name}: {e}");
            None
        }
        Err(_) => {
            log::warn!("Printer {name} still open after exit, output dropped");
            None
        }
    }
}

impl LabelPrinter for PtouchPrinter {
    fn print_access_point(&mut self, label: &str, mac: &str, serial: &str) -> bool {
        if let Some(dir) = &self.staging_dir
            && let Err(e) = staging::stage_access_point(dir, label, serial, mac)
        {
            log::error!("Failed to write print staging file: {e}");
        }
        log::info!("Attempting to print AP label: {label}");
        self.dispatch(&self.ap_template, label, mac, serial)
    }

    fn print_switch(&mut self, label: &str, serial: &str) -> bool {
        if let Some(dir) = &self.staging_dir
            && let Err(e) = staging::stage_switch(dir, label, serial)
        {
            log::error!("Failed to write print staging file: {e}");
        }
        log::info!("Attempting to print Switch label: {label}");
        self.dispatch(&self.switch_template, label, "", serial)
    }
}

/// Command-line arguments for one label: form feed, close when done, default
/// printer, template, variables, print.
#[must_use]
pub fn print_arguments(template: &Path, label: &str, mac: &str, serial: &str) -> Vec<String> {
    vec![
        "/ff".to_string(),
        "/c".to_string(),
        "/d".to_string(),
        template.to_string_lossy().into_owned(),
        "/v".to_string(),
        format!("ap_label={label}"),
        format!("mac={mac}"),
        format!("serial={serial}"),
        "/p".to_string(),
    ]
}

#[cfg(windows)]
fn hide_console_window(command: &mut Command) {
    use std::os::windows::process::CommandExt;
    use windows_sys::Win32::System::Threading::CREATE_NO_WINDOW;

    command.creation_flags(CREATE_NO_WINDOW);
}

#[cfg(not(windows))]
fn hide_console_window(_command: &mut Command) {}
