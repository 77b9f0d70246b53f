//! sinklog logs - leveled logging to the console or to rotating log files

mod caller;
mod diag;
mod engine;
mod macros;
mod reader;
mod rotation;
mod sink;

pub use caller::{CallSite, CallerInfo};
pub use engine::{format_line, LoggedPanic, Logger};
pub use reader::LogReader;
pub use rotation::{backup_path, needs_rotation, rotated_backups};
pub use sink::FileSink;

pub use sinklog_core::{
    error_log_name, parse_level, severity_name, Error, LoggerConfig, LoggerSettings,
    OutputMethod, Result, Severity,
};

use std::path::Path;

/// Ensure a log directory exists
pub fn ensure_log_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        std::fs::create_dir_all(dir).map_err(|e| Error::filesystem(dir, e))?;
    }
    Ok(())
}
