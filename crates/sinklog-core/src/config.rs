//! Configuration file parsing for sinklog
//!
//! Supports multiple configuration file formats:
//! - TOML (.toml)
//! - YAML (.yaml, .yml)
//! - JSON (.json)

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::constants::*;
use crate::error::{Error, Result};
use crate::types::LoggerSettings;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(ConfigFormat::Toml),
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            "json" => Some(ConfigFormat::Json),
            _ => None,
        }
    }

    /// Detect format from file path
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

/// Logger configuration (sinklog.toml/yaml/json)
///
/// Values are kept as raw strings until [`LoggerConfig::into_settings`]
/// validates them, so a bad method or level surfaces as the same error
/// the programmatic constructor returns.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggerConfig {
    /// "console" or "file"
    pub method: String,
    /// Minimum severity name
    pub level: String,
    /// Log directory, relative paths resolve against the config file
    pub directory: String,
    /// Main log file name
    pub file_name: String,
    /// Rotation threshold in bytes
    pub max_file_size: u64,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            method: DEFAULT_METHOD.to_string(),
            level: DEFAULT_LEVEL.to_string(),
            directory: DEFAULT_LOG_DIR.to_string(),
            file_name: DEFAULT_LOG_FILE.to_string(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl LoggerConfig {
    /// Load config from file, automatically detecting format from extension
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }

        let format = ConfigFormat::from_path(path).ok_or_else(|| {
            Error::ConfigError(format!(
                "Unsupported config file extension: {}. Expected .toml, .yaml, .yml, or .json",
                path.display()
            ))
        })?;

        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, format)
    }

    /// Parse config content with specified format
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self> {
        match format {
            ConfigFormat::Toml => Ok(toml::from_str(content)?),
            ConfigFormat::Yaml => Ok(serde_yaml::from_str(content)?),
            ConfigFormat::Json => Ok(serde_json::from_str(content)?),
        }
    }

    /// Find and load the first known config file in a directory
    pub fn find_and_load(dir: &Path) -> Result<(Self, PathBuf)> {
        for name in CONFIG_FILES {
            let path = dir.join(name);
            if path.exists() {
                let config = Self::load(&path)?;
                return Ok((config, path));
            }
        }
        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    /// Validate into typed settings
    pub fn into_settings(self, base_dir: &Path) -> Result<LoggerSettings> {
        let directory = Path::new(&self.directory);
        let directory = if directory.is_absolute() {
            directory.to_path_buf()
        } else {
            base_dir.join(directory)
        };

        LoggerSettings::new(
            &self.method,
            &self.level,
            directory,
            self.file_name,
            self.max_file_size,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Severity;
    use crate::types::OutputMethod;
    use std::io::Write;
    use tempfile::{Builder, TempDir};

    #[test]
    fn test_config_format_detection() {
        assert_eq!(ConfigFormat::from_extension("toml"), Some(ConfigFormat::Toml));
        assert_eq!(ConfigFormat::from_extension("YML"), Some(ConfigFormat::Yaml));
        assert_eq!(ConfigFormat::from_extension("json"), Some(ConfigFormat::Json));
        assert_eq!(ConfigFormat::from_extension("ini"), None);
        assert_eq!(
            ConfigFormat::from_path(Path::new("/etc/sinklog.yaml")),
            Some(ConfigFormat::Yaml)
        );
    }

    #[test]
    fn test_config_parse_toml() {
        let toml = r#"
method = "file"
level = "WARN"
directory = "/var/log/svc"
file_name = "service.log"
max_file_size = 2048
"#;

        let config = LoggerConfig::parse(toml, ConfigFormat::Toml).unwrap();
        assert_eq!(config.method, "file");
        assert_eq!(config.max_file_size, 2048);

        let settings = config.into_settings(Path::new("/")).unwrap();
        assert_eq!(settings.method, OutputMethod::File);
        assert_eq!(settings.threshold, Severity::Warn);
        assert_eq!(settings.error_log_path(), PathBuf::from("/var/log/svc/service_err.log"));
    }

    #[test]
    fn test_config_parse_yaml() {
        let yaml = r#"
method: console
level: debug
"#;

        let config = LoggerConfig::parse(yaml, ConfigFormat::Yaml).unwrap();
        assert_eq!(config.level, "debug");
        assert_eq!(config.file_name, DEFAULT_LOG_FILE);
        assert_eq!(config.max_file_size, DEFAULT_MAX_FILE_SIZE);
    }

    #[test]
    fn test_config_parse_json() {
        let json = r#"{ "method": "file", "level": "error", "file_name": "svc.log" }"#;

        let config = LoggerConfig::parse(json, ConfigFormat::Json).unwrap();
        let settings = config.into_settings(Path::new("/srv/app")).unwrap();
        assert_eq!(settings.directory, PathBuf::from("/srv/app/logs"));
        assert_eq!(settings.main_log_path(), PathBuf::from("/srv/app/logs/svc.log"));
    }

    #[test]
    fn test_config_invalid_values() {
        let config = LoggerConfig {
            method: "syslog".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.into_settings(Path::new("/")),
            Err(Error::InvalidMethod(_))
        ));

        let config = LoggerConfig {
            level: "loud".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.into_settings(Path::new("/")),
            Err(Error::InvalidLevel(_))
        ));
    }

    #[test]
    fn test_config_load_from_file() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "level = \"trace\"").unwrap();

        let config = LoggerConfig::load(file.path()).unwrap();
        assert_eq!(config.level, "trace");
        assert_eq!(config.method, DEFAULT_METHOD);
    }

    #[test]
    fn test_config_unsupported_extension() {
        let file = Builder::new().suffix(".ini").tempfile().unwrap();
        assert!(matches!(
            LoggerConfig::load(file.path()),
            Err(Error::ConfigError(_))
        ));
    }

    #[test]
    fn test_config_not_found() {
        let result = LoggerConfig::load(Path::new("/nonexistent/sinklog.toml"));
        assert!(matches!(result, Err(Error::ConfigNotFound(_))));
    }

    #[test]
    fn test_find_and_load() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            LoggerConfig::find_and_load(dir.path()),
            Err(Error::ConfigNotFound(_))
        ));

        std::fs::write(dir.path().join("sinklog.json"), r#"{"level": "warn"}"#).unwrap();
        std::fs::write(dir.path().join("sinklog.toml"), "level = \"error\"\n").unwrap();

        let (config, path) = LoggerConfig::find_and_load(dir.path()).unwrap();
        assert_eq!(config.level, "error");
        assert_eq!(path, dir.path().join("sinklog.toml"));
    }

    #[test]
    fn test_config_bad_toml() {
        let result = LoggerConfig::parse("level = ", ConfigFormat::Toml);
        assert!(matches!(result, Err(Error::TomlError(_))));
    }
}
