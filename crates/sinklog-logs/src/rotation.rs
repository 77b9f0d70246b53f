//! Rotation policy and backup naming

use chrono::{DateTime, Local};
use sinklog_core::constants::{BACKUP_EXTENSION, BACKUP_MARKER, BACKUP_TIMESTAMP_FORMAT};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Whether a file of `size` bytes must be rotated before the next write.
///
/// The threshold is inclusive. An empty file is never rotated.
pub fn needs_rotation(size: u64, max_size: u64) -> bool {
    size > 0 && size >= max_size
}

/// Backup name for a logical path: `<path>.bak<YYYYMMDDHHMMSSmmm>.log`
pub fn backup_path(logical: &Path, now: DateTime<Local>) -> PathBuf {
    backup_with_counter(logical, &now.format(BACKUP_TIMESTAMP_FORMAT).to_string(), 0)
}

/// Backup name that does not collide with an existing file.
///
/// Two rotations inside one millisecond get a `_<n>` counter after the
/// timestamp.
pub(crate) fn unique_backup_path(logical: &Path, now: DateTime<Local>) -> PathBuf {
    let stamp = now.format(BACKUP_TIMESTAMP_FORMAT).to_string();
    let mut counter = 0;
    loop {
        let candidate = backup_with_counter(logical, &stamp, counter);
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

fn backup_with_counter(logical: &Path, stamp: &str, counter: u32) -> PathBuf {
    let mut name = OsString::from(logical.as_os_str());
    name.push(BACKUP_MARKER);
    name.push(stamp);
    if counter > 0 {
        name.push(format!("_{}", counter));
    }
    name.push(BACKUP_EXTENSION);
    PathBuf::from(name)
}

/// Existing backups of a logical path, oldest first
pub fn rotated_backups(logical: &Path) -> std::io::Result<Vec<PathBuf>> {
    let (Some(dir), Some(file_name)) = (logical.parent(), logical.file_name()) else {
        return Ok(vec![]);
    };
    let dir = if dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir
    };
    if !dir.exists() {
        return Ok(vec![]);
    }

    let prefix = format!("{}{}", file_name.to_string_lossy(), BACKUP_MARKER);
    let mut backups: Vec<((String, u32), PathBuf)> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let name = entry.file_name();
            let key = backup_order_key(&name.to_string_lossy(), &prefix)?;
            Some((key, entry.path()))
        })
        .collect();

    backups.sort();
    let backups = backups.into_iter().map(|(_, path)| path).collect();
    Ok(backups)
}

/// Sort key of a backup file name: its timestamp, then its collision counter
/// compared as a number so `_10` follows `_2`.
fn backup_order_key(name: &str, prefix: &str) -> Option<(String, u32)> {
    let stem = name.strip_prefix(prefix)?.strip_suffix(BACKUP_EXTENSION)?;
    match stem.split_once('_') {
        Some((stamp, counter)) => Some((stamp.to_string(), counter.parse().unwrap_or(0))),
        None => Some((stem.to_string(), 0)),
    }
}
