//! Rotating log file sink

use chrono::Local;
use parking_lot::Mutex;
use sinklog_core::{Error, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::diag;
use crate::rotation::{needs_rotation, unique_backup_path};

/// A single log file that rotates itself once it reaches a size threshold.
///
/// The logical path always names the current file; rotated content moves to
/// `<path>.bak<timestamp>.log`. The check-rotate-write sequence runs under
/// one lock, so a sink can be shared between threads.
pub struct FileSink {
    path: PathBuf,
    max_size: u64,
    state: Mutex<SinkState>,
}

struct SinkState {
    file: Option<File>,
    closed: bool,
}

impl FileSink {
    /// Open (or create) the file at `path` for appending. Existing content is kept.
    pub fn open(path: PathBuf, max_size: u64) -> Result<Self> {
        let file = open_append(&path).map_err(|e| Error::filesystem(&path, e))?;

        Ok(Self {
            path,
            max_size,
            state: Mutex::new(SinkState {
                file: Some(file),
                closed: false,
            }),
        })
    }

    /// Get the logical file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the sink currently holds a file handle
    pub fn is_open(&self) -> bool {
        self.state.lock().file.is_some()
    }

    /// Current size of the file behind the handle
    pub fn size(&self) -> Result<u64> {
        let state = self.state.lock();
        match &state.file {
            Some(file) => Ok(file.metadata()?.len()),
            None => Ok(fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)),
        }
    }

    /// Rotate if the file has reached the threshold. Returns whether a
    /// rotation happened.
    pub fn rotate_if_needed(&self) -> bool {
        let mut state = self.state.lock();
        if state.closed {
            return false;
        }
        self.rotate_locked(&mut state)
    }

    /// Rotate if needed, then append `line` and a newline.
    ///
    /// Failures are reported as diagnostics and never returned. Returns
    /// whether the line reached the file.
    pub fn write_line(&self, line: &str) -> bool {
        let mut state = self.state.lock();
        if state.closed {
            debug!("Dropping line for closed sink {}", self.path.display());
            return false;
        }

        if state.file.is_none() {
            match open_append(&self.path) {
                Ok(file) => state.file = Some(file),
                Err(e) => {
                    diag::report(format_args!(
                        "cannot reopen log file {}: {}",
                        self.path.display(),
                        e
                    ));
                    return false;
                }
            }
        }

        self.rotate_locked(&mut state);

        let Some(file) = state.file.as_mut() else {
            return false;
        };
        let result = file
            .write_all(line.as_bytes())
            .and_then(|_| file.write_all(b"\n"))
            .and_then(|_| file.flush());

        match result {
            Ok(()) => true,
            Err(e) => {
                diag::report(format_args!(
                    "write to {} failed: {}",
                    self.path.display(),
                    e
                ));
                false
            }
        }
    }

    /// Close the file handle. Calling this more than once is a no-op.
    pub fn close(&self) {
        let mut state = self.state.lock();
        if state.closed {
            return;
        }
        state.closed = true;
        if let Some(mut file) = state.file.take() {
            if let Err(e) = file.flush() {
                diag::report(format_args!(
                    "flush of {} failed on close: {}",
                    self.path.display(),
                    e
                ));
            }
        }
    }

    fn rotate_locked(&self, state: &mut SinkState) -> bool {
        let Some(file) = state.file.as_ref() else {
            return false;
        };

        let size = match file.metadata() {
            Ok(meta) => meta.len(),
            Err(e) => {
                diag::report(format_args!(
                    "stat of {} failed, skipping rotation: {}",
                    self.path.display(),
                    e
                ));
                return false;
            }
        };

        if !needs_rotation(size, self.max_size) {
            return false;
        }

        let backup = unique_backup_path(&self.path, Local::now());
        debug!(
            "Rotating log file {} -> {}",
            self.path.display(),
            backup.display()
        );

        // Close before renaming
        if let Some(mut file) = state.file.take() {
            let _ = file.flush();
        }

        if let Err(e) = fs::rename(&self.path, &backup) {
            diag::report(format_args!(
                "rotation of {} failed: {}",
                self.path.display(),
                e
            ));
            // Keep writing to the file we could not move
            state.file = open_append(&self.path).ok();
            return false;
        }

        match open_append(&self.path) {
            Ok(file) => state.file = Some(file),
            Err(e) => diag::report(format_args!(
                "cannot open fresh log file {} after rotation: {}",
                self.path.display(),
                e
            )),
        }

        true
    }
}

impl std::fmt::Debug for FileSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSink")
            .field("path", &self.path)
            .field("max_size", &self.max_size)
            .finish()
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}
