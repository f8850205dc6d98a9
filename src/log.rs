//! Append-only text log of calculation results.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::LogError;
use crate::record::DeflectionResult;

/// Default location of the log, relative to the working directory.
pub const DEFAULT_LOG_PATH: &str = "deflection_results.txt";

/// Handle to a results log file holding one [`DeflectionResult`] per line.
///
/// The log is meant for a single sequential user: there is no locking and
/// the duplicate check reads the whole file on every append.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultLog {
    /// Location of the log file.
    path: PathBuf,
}

impl Default for ResultLog {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_PATH)
    }
}

impl ResultLog {
    /// Create a handle for the log at `path`. The file is not touched.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the log file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `result` unless an identical line is already present.
    ///
    /// Returns `true` when a line was written and `false` when the result was
    /// already logged. The file is created if needed.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::NonFinite`] for results that cannot be re-read,
    /// and [`LogError::Io`] when the file cannot be read or written.
    pub fn append_if_new(&self, result: &DeflectionResult) -> Result<bool, LogError> {
        let line = result.to_line()?;
        let existing = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => String::new(),
            Err(error) => return Err(self.io_error(error)),
        };

        let entry = format!("{line}\n");
        // An unterminated last line has no newline to match against.
        if existing.contains(&entry) || existing.lines().last() == Some(line.as_str()) {
            debug!(path = %self.path.display(), "result already logged");
            return Ok(false);
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|error| self.io_error(error))?;
        if !existing.is_empty() && !existing.ends_with('\n') {
            file.write_all(b"\n").map_err(|error| self.io_error(error))?;
        }
        file.write_all(entry.as_bytes())
            .map_err(|error| self.io_error(error))?;
        debug!(path = %self.path.display(), deflection = result.deflection, "result logged");
        Ok(true)
    }

    /// Read every result in the log, in file order.
    ///
    /// Blank lines are skipped; any other line that is not a valid record
    /// fails the whole load.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Missing`] when the file does not exist,
    /// [`LogError::Malformed`] for the first bad line and [`LogError::Io`]
    /// for other read failures.
    pub fn load_all(&self) -> Result<Vec<DeflectionResult>, LogError> {
        let contents = fs::read_to_string(&self.path).map_err(|error| {
            if error.kind() == io::ErrorKind::NotFound {
                LogError::Missing(self.path.clone())
            } else {
                self.io_error(error)
            }
        })?;

        contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                DeflectionResult::from_line(line)
                    .map_err(|source| LogError::Malformed { line: idx + 1, source })
            })
            .collect()
    }

    /// Attach the log path to an I/O failure.
    fn io_error(&self, source: io::Error) -> LogError {
        LogError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
