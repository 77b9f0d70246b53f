//! Constants and default values for sinklog

/// Default output method
pub const DEFAULT_METHOD: &str = "console";

/// Default severity threshold
pub const DEFAULT_LEVEL: &str = "info";

/// Default log directory (relative to the working directory)
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Default main log file name
pub const DEFAULT_LOG_FILE: &str = "app.log";

/// Default rotation threshold in bytes (10MB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Suffix inserted before the extension of the error-only log
pub const ERROR_LOG_SUFFIX: &str = "_err";

/// Marker between the logical path and the backup timestamp
pub const BACKUP_MARKER: &str = ".bak";

/// Extension appended to every rotated backup
pub const BACKUP_EXTENSION: &str = ".log";

/// chrono format of the backup timestamp (millisecond precision)
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S%3f";

/// chrono format of the timestamp inside a log line
pub const LINE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Exit status used by `Fatal`
pub const FATAL_EXIT_CODE: i32 = 1;

/// Config file names to search for (in priority order)
pub const CONFIG_FILES: &[&str] = &[
    "sinklog.toml",
    "sinklog.yaml",
    "sinklog.yml",
    "sinklog.json",
];

/// Derive the error-only log file name from the main log file name.
///
/// The suffix goes before the final extension: `app.log` becomes
/// `app_err.log`. A name without an extension gets the suffix appended
/// (`service` becomes `service_err`), and a leading dot does not count as
/// an extension separator (`.hidden` becomes `.hidden_err`).
pub fn error_log_name(file_name: &str) -> String {
    match file_name.rfind('.') {
        Some(idx) if idx > 0 => format!(
            "{}{}{}",
            &file_name[..idx],
            ERROR_LOG_SUFFIX,
            &file_name[idx..]
        ),
        _ => format!("{}{}", file_name, ERROR_LOG_SUFFIX),
    }
}
