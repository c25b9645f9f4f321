//! Application configuration
//!
//! All paths are relative to the working directory unless absolute. A config
//! file only needs the keys it wants to change; everything else keeps its
//! default.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "DEVLABEL_CONFIG";

/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "devlabel.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log_path: PathBuf,
    pub backup_dir: PathBuf,
    pub export_dir: PathBuf,
    pub sites_path: PathBuf,
    /// Diagnostics log written by the binary.
    pub diagnostics_log: Option<PathBuf>,
    pub printer: PrinterConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from("device_log.csv"),
            backup_dir: PathBuf::from("backups"),
            export_dir: PathBuf::from("CSV"),
            sites_path: PathBuf::from("sites.json"),
            diagnostics_log: Some(PathBuf::from("label_printer.log")),
            printer: PrinterConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrinterConfig {
    /// Label editor executables, probed in order.
    pub executable_candidates: Vec<PathBuf>,
    pub ap_template: PathBuf,
    pub switch_template: PathBuf,
    pub timeout_secs: u64,
    /// Directory receiving `print.csv` / `switch_print.csv` before each print.
    pub staging_dir: Option<PathBuf>,
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            executable_candidates: vec![
                PathBuf::from(r"C:\Program Files (x86)\Brother\Ptedit54\ptedit54.exe"),
                PathBuf::from(r"C:\Program Files (x86)\Brother\P-touch Editor 5.4\PtCmd.exe"),
            ],
            ap_template: PathBuf::from("template.lbx"),
            switch_template: PathBuf::from("switch_template.lbx"),
            timeout_secs: 30,
            staging_dir: None,
        }
    }
}

impl PrinterConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    /// First candidate executable that exists, else the first candidate.
    #[must_use]
    pub fn resolve_executable(&self) -> Option<PathBuf> {
        self.executable_candidates
            .iter()
            .find(|p| p.exists())
            .or_else(|| self.executable_candidates.first())
            .cloned()
    }
}

impl AppConfig {
    /// Parse a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        serde_json::from_str(&raw)
            .map_err(|e| Error::Config(format!("cannot parse {}: {e}", path.display())))
    }

    /// Load configuration from, in order: `explicit`, the
    /// [`CONFIG_ENV_VAR`] variable, [`DEFAULT_CONFIG_FILE`] if it exists,
    /// or the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR)
            && !path.trim().is_empty()
        {
            return Self::from_file(Path::new(&path));
        }

        let default_path = Path::new(DEFAULT_CONFIG_FILE);
        if default_path.exists() {
            return Self::from_file(default_path);
        }

        Ok(Self::default())
    }
}
