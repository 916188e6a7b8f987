//! Input and output paths for a conversion.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::constants::{CSV_EXTENSION, TRACE_EXTENSION};

/// Paths of the trace being read and the CSV being written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TracePaths {
    pub trace: PathBuf,
    pub csv: PathBuf,
}

impl TracePaths {
    /// Derive `<root>.lft` and `<root>.csv` from a root given without extension.
    ///
    /// The extension is appended rather than substituted, so a root such as
    /// `run.1` maps to `run.1.lft`.
    pub fn from_root(root: &Path) -> Self {
        Self {
            trace: with_suffix(root, TRACE_EXTENSION),
            csv: with_suffix(root, CSV_EXTENSION),
        }
    }

    /// Replace the CSV output path.
    pub fn with_output(mut self, csv: PathBuf) -> Self {
        self.csv = csv;
        self
    }
}

fn with_suffix(root: &Path, extension: &str) -> PathBuf {
    let mut name = OsString::from(root.as_os_str());
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}
