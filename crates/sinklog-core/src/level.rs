//! Severity levels and the name <-> severity registry

use serde::Serialize;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Ordered log severity.
///
/// A message is emitted iff its severity is at or above the configured
/// threshold. `Unknown` only ever shows up as a decoding sentinel; it is
/// never accepted from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Severity {
    Unknown = 0,
    Debug = 1,
    Trace = 2,
    Info = 3,
    Warn = 4,
    Error = 5,
    Panic = 6,
    Fatal = 7,
}

impl Severity {
    /// Every severity that may be configured or emitted, lowest first
    pub const ALL: [Severity; 7] = [
        Severity::Debug,
        Severity::Trace,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
        Severity::Panic,
        Severity::Fatal,
    ];

    /// Decode a raw severity value; anything out of range is `Unknown`
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => Severity::Debug,
            2 => Severity::Trace,
            3 => Severity::Info,
            4 => Severity::Warn,
            5 => Severity::Error,
            6 => Severity::Panic,
            7 => Severity::Fatal,
            _ => Severity::Unknown,
        }
    }

    /// Upper-case name as it appears in a log line
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Unknown => "UNKNOWN",
            Severity::Debug => "DEBUG",
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Panic => "PANIC",
            Severity::Fatal => "FATAL",
        }
    }

    /// Whether a line at this severity is duplicated into the error log
    pub fn is_error(&self) -> bool {
        *self >= Severity::Error
    }
}

/// Parse a level name, ignoring case.
///
/// Only the seven exact names are accepted; partial names and numbers fail
/// with [`Error::InvalidLevel`].
pub fn parse_level(name: &str) -> Result<Severity> {
    match name.to_lowercase().as_str() {
        "debug" => Ok(Severity::Debug),
        "trace" => Ok(Severity::Trace),
        "info" => Ok(Severity::Info),
        "warn" => Ok(Severity::Warn),
        "error" => Ok(Severity::Error),
        "panic" => Ok(Severity::Panic),
        "fatal" => Ok(Severity::Fatal),
        _ => Err(Error::InvalidLevel(name.to_string())),
    }
}

/// Display name of a severity; never fails
pub fn severity_name(severity: Severity) -> &'static str {
    severity.as_str()
}

impl FromStr for Severity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_level(s)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
