//! Core types for sinklog

use serde::Serialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::constants::*;
use crate::error::{Error, Result};
use crate::level::{parse_level, Severity};

/// Where log lines go
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputMethod {
    /// Standard output
    Console,
    /// Main log file plus error-only log file
    File,
}

impl OutputMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputMethod::Console => "console",
            OutputMethod::File => "file",
        }
    }
}

impl FromStr for OutputMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "console" => Ok(OutputMethod::Console),
            "file" => Ok(OutputMethod::File),
            _ => Err(Error::InvalidMethod(s.to_string())),
        }
    }
}

impl std::fmt::Display for OutputMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Validated logger settings
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LoggerSettings {
    pub method: OutputMethod,
    pub threshold: Severity,
    /// Log directory (file mode only)
    pub directory: PathBuf,
    /// Main log file name (file mode only)
    pub file_name: String,
    /// Rotation threshold in bytes (file mode only)
    pub max_file_size: u64,
}

impl LoggerSettings {
    /// Validate the raw construction arguments.
    ///
    /// The method is checked before the level, so a bad method wins when
    /// both are wrong.
    pub fn new(
        method: &str,
        level: &str,
        directory: impl Into<PathBuf>,
        file_name: impl Into<String>,
        max_file_size: u64,
    ) -> Result<Self> {
        let method: OutputMethod = method.parse()?;
        let threshold = parse_level(level)?;
        let file_name = file_name.into();

        if method == OutputMethod::File && file_name.is_empty() {
            return Err(Error::config("file output requires a log file name"));
        }

        Ok(Self {
            method,
            threshold,
            directory: directory.into(),
            file_name,
            max_file_size,
        })
    }

    /// Console settings at the given threshold
    pub fn console(threshold: Severity) -> Self {
        Self {
            method: OutputMethod::Console,
            threshold,
            directory: PathBuf::new(),
            file_name: String::new(),
            max_file_size: 0,
        }
    }

    /// Path of the main log
    pub fn main_log_path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }

    /// Path of the error-only log
    pub fn error_log_path(&self) -> PathBuf {
        self.directory.join(error_log_name(&self.file_name))
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_method_from_str() {
        assert_eq!("console".parse::<OutputMethod>().unwrap(), OutputMethod::Console);
        assert_eq!("FILE".parse::<OutputMethod>().unwrap(), OutputMethod::File);
        assert!(matches!(
            "syslog".parse::<OutputMethod>(),
            Err(Error::InvalidMethod(m)) if m == "syslog"
        ));
    }

    #[test]
    fn test_settings_paths() {
        let settings = LoggerSettings::new("file", "info", "/var/log/svc", "service.log", 100).unwrap();
        assert_eq!(settings.main_log_path(), PathBuf::from("/var/log/svc/service.log"));
        assert_eq!(settings.error_log_path(), PathBuf::from("/var/log/svc/service_err.log"));
        assert_eq!(settings.threshold, Severity::Info);
    }

    #[test]
    fn test_settings_method_checked_first() {
        let err = LoggerSettings::new("syslog", "nope", "", "", 0).unwrap_err();
        assert!(matches!(err, Error::InvalidMethod(_)));

        let err = LoggerSettings::new("console", "nope", "", "", 0).unwrap_err();
        assert!(matches!(err, Error::InvalidLevel(_)));
    }

    #[test]
    fn test_settings_file_mode_requires_name() {
        let err = LoggerSettings::new("file", "info", "/tmp", "", 0).unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn test_console_settings() {
        let settings = LoggerSettings::console(Severity::Warn);
        assert_eq!(settings.method, OutputMethod::Console);
        assert_eq!(settings.threshold, Severity::Warn);
    }
}
