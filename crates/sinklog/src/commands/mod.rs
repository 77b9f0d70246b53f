//! Command implementations

pub mod check;
pub mod emit;
pub mod tail;

use anyhow::{Context, Result};
use sinklog_core::{Error, LoggerConfig, LoggerSettings};
use std::path::{Path, PathBuf};

use crate::cli::GlobalOpts;

/// Load the config file (explicit or discovered), apply flag overrides, and
/// validate the result.
pub fn resolve_settings(opts: &GlobalOpts) -> Result<LoggerSettings> {
    let cwd = std::env::current_dir().context("cannot determine current directory")?;
    let (mut config, base_dir) = load_config(opts.config.as_deref(), &cwd)?;

    if let Some(method) = &opts.method {
        config.method = method.clone();
    }
    if let Some(level) = &opts.level {
        config.level = level.clone();
    }
    if let Some(dir) = &opts.dir {
        config.directory = dir.clone();
    }
    if let Some(file) = &opts.file {
        config.file_name = file.clone();
    }
    if let Some(max_size) = opts.max_size {
        config.max_file_size = max_size;
    }

    Ok(config.into_settings(&base_dir)?)
}

fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<(LoggerConfig, PathBuf)> {
    if let Some(path) = explicit {
        let path = cwd.join(path);
        let config = LoggerConfig::load(&path)?;
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_else(|| cwd.to_path_buf());
        tracing::debug!("Loaded config from {}", path.display());
        return Ok((config, base_dir));
    }

    match LoggerConfig::find_and_load(cwd) {
        Ok((config, path)) => {
            tracing::debug!("Loaded config from {}", path.display());
            Ok((config, cwd.to_path_buf()))
        }
        Err(Error::ConfigNotFound(_)) => Ok((LoggerConfig::default(), cwd.to_path_buf())),
        Err(e) => Err(e.into()),
    }
}
