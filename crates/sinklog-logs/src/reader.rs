//! Log reader for tail and follow operations

use sinklog_core::{Error, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

use crate::rotation::rotated_backups;

/// How often a follower re-checks the file when no watch event arrives
const FOLLOW_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Bytes read per backward step when tailing
const TAIL_CHUNK_SIZE: u64 = 8192;

/// Reader over the logical path of a log file
pub struct LogReader {
    path: PathBuf,
}

impl LogReader {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Last `n` lines of the current file, oldest first
    pub fn tail(&self, n: usize) -> Result<Vec<String>> {
        last_lines(&self.path, n)
    }

    /// Last `n` lines of the log as a whole.
    ///
    /// When the current file holds fewer than `n` lines the rest come from
    /// the newest rotated backups, so a tail right after a rotation still
    /// shows history.
    pub fn tail_across_rotations(&self, n: usize) -> Result<Vec<String>> {
        let mut lines = self.tail(n)?;

        for backup in self.backups()?.iter().rev() {
            if lines.len() >= n {
                break;
            }
            let mut older = last_lines(backup, n - lines.len())?;
            older.append(&mut lines);
            lines = older;
        }

        Ok(lines)
    }

    /// Follow the log file (like tail -F).
    ///
    /// Yields lines appended to the logical path. When the file is rotated
    /// away the follower starts over on the fresh file. Must be called from
    /// within a tokio runtime; the watch loop runs on the blocking pool.
    pub fn follow(&self) -> Result<mpsc::Receiver<String>> {
        let path = self.path.clone();
        let (tx, rx) = mpsc::channel(100);

        tokio::task::spawn_blocking(move || {
            if let Err(e) = follow_file(&path, tx) {
                debug!("Follow ended: {}", e);
            }
        });

        Ok(rx)
    }

    /// Rotated backups of this log, oldest first
    pub fn backups(&self) -> Result<Vec<PathBuf>> {
        Ok(rotated_backups(&self.path)?)
    }

    /// Check if the log file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get file size
    pub fn size(&self) -> Result<u64> {
        if !self.path.exists() {
            return Ok(0);
        }
        Ok(std::fs::metadata(&self.path)?.len())
    }
}

/// Follow a file for new content, reopening it after rotation
fn follow_file(path: &Path, tx: mpsc::Sender<String>) -> Result<()> {
    use notify::{RecommendedWatcher, RecursiveMode, Watcher};
    use std::sync::mpsc as std_mpsc;

    let mut position = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);

    // Watch the directory: rotation renames the file out from under a file watch
    let watch_dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();

    let (watch_tx, watch_rx) = std_mpsc::channel();
    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<notify::Event>| {
            let _ = watch_tx.send(res);
        },
        notify::Config::default(),
    )
    .map_err(|e| Error::config(format!("Failed to create watcher: {}", e)))?;

    watcher
        .watch(&watch_dir, RecursiveMode::NonRecursive)
        .map_err(|e| Error::config(format!("Failed to watch {}: {}", watch_dir.display(), e)))?;

    while !tx.is_closed() {
        match watch_rx.recv_timeout(FOLLOW_POLL_INTERVAL) {
            Ok(Ok(_event)) => {}
            Ok(Err(e)) => {
                debug!("Watch error: {}", e);
                continue;
            }
            Err(std_mpsc::RecvTimeoutError::Timeout) => {}
            Err(std_mpsc::RecvTimeoutError::Disconnected) => break,
        }

        let len = match std::fs::metadata(path) {
            Ok(meta) => meta.len(),
            // Between rename and reopen
            Err(_) => continue,
        };

        if len < position {
            debug!("{} was rotated, following the new file", path.display());
            position = 0;
        }
        if len == position {
            continue;
        }

        let (lines, consumed) = match read_complete_lines(path, position) {
            Ok(read) => read,
            Err(e) => {
                debug!("Read of {} failed: {}", path.display(), e);
                continue;
            }
        };
        position += consumed;

        for line in lines {
            if tx.blocking_send(line).is_err() {
                return Ok(());
            }
        }
    }

    Ok(())
}

/// Last `n` lines of one file, read backward from the end.
///
/// Lines are split on raw bytes and each is decoded once, so multibyte
/// characters that straddle a chunk edge survive. A missing file has no
/// lines.
fn last_lines(path: &Path, n: usize) -> Result<Vec<String>> {
    if n == 0 {
        return Ok(vec![]);
    }
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(vec![]),
        Err(e) => return Err(e.into()),
    };
    let len = file.metadata()?.len();

    let mut lines = Vec::new();
    // Bytes of the line that starts before the chunks read so far
    let mut pending: Vec<u8> = Vec::new();
    let mut end = len;
    let mut at_file_end = true;

    while end > 0 && lines.len() < n {
        let start = end.saturating_sub(TAIL_CHUNK_SIZE);
        let mut chunk = vec![0u8; (end - start) as usize];
        file.seek(SeekFrom::Start(start))?;
        file.read_exact(&mut chunk)?;
        end = start;

        // The final newline terminates the last line, it does not open a new one
        if at_file_end {
            if chunk.last() == Some(&b'\n') {
                chunk.pop();
            }
            at_file_end = false;
        }

        chunk.append(&mut pending);
        let mut rest = chunk.as_slice();
        while lines.len() < n {
            let Some(idx) = rest.iter().rposition(|&b| b == b'\n') else {
                break;
            };
            lines.push(decode_line(&rest[idx + 1..]));
            rest = &rest[..idx];
        }
        pending = rest.to_vec();
    }

    if end == 0 && len > 0 && lines.len() < n {
        lines.push(decode_line(&pending));
    }

    lines.reverse();
    Ok(lines)
}

fn decode_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}

/// Read whole lines starting at `position`; a trailing partial line is left
/// for the next pass. Returns the lines and the number of bytes consumed.
fn read_complete_lines(path: &Path, position: u64) -> Result<(Vec<String>, u64)> {
    let mut file = File::open(path)?;
    file.seek(SeekFrom::Start(position))?;

    let mut reader = BufReader::new(file);
    let mut lines = Vec::new();
    let mut consumed = 0u64;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let read = reader.read_until(b'\n', &mut buf)?;
        if read == 0 || buf.last() != Some(&b'\n') {
            break;
        }
        consumed += read as u64;
        let line = String::from_utf8_lossy(&buf[..buf.len() - 1]).into_owned();
        lines.push(line);
    }

    Ok((lines, consumed))
}
