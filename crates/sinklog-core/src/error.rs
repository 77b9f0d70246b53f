//! Error types for sinklog

use std::path::PathBuf;

/// sinklog error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid output method: {0} (expected \"console\" or \"file\")")]
    InvalidMethod(String),

    #[error("Invalid log level: {0}")]
    InvalidLevel(String),

    #[error("Filesystem error at {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Caller attribution unavailable: {0}")]
    AttributionUnavailable(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Result type alias for sinklog
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::ConfigError(msg.into())
    }

    /// Attach the path that an I/O operation was working on
    pub fn filesystem<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Error::Filesystem {
            path: path.into(),
            source,
        }
    }

    /// Whether this error came from the filesystem
    pub fn is_filesystem(&self) -> bool {
        matches!(self, Error::Filesystem { .. } | Error::IoError(_))
    }
}
