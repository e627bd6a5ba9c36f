//! Flat-file task store.
//!
//! The store is a single text file holding one serialized task per line, in
//! list order (see [`crate::task`] for the line format). It lives at
//! `data/workdone.txt` under the working directory unless configured
//! otherwise.
//!
//! Every write goes straight to disk; there is no buffering across commands.
//! Any I/O failure surfaces as [`Error::StorageUnavailable`], after which the
//! session calls [`Storage::heal`] to recreate the file from memory.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::task::Task;

/// Default directory of the store, relative to the base directory
pub const DATA_DIR: &str = "data";

/// Default file name of the store
pub const DATA_FILE: &str = "workdone.txt";

/// Storage manager for the task file
#[derive(Debug, Clone)]
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Storage at the default location under `base_dir`
    pub fn in_dir(base_dir: &Path) -> Self {
        Self::new(base_dir.join(DATA_DIR).join(DATA_FILE))
    }

    /// Path to the task file
    pub fn path(&self) -> &Path {
        &self.path
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Read every task from the file, in file order.
    ///
    /// A missing file (or directory) is created empty. Lines that cannot be
    /// decoded are dropped and the file is rewritten without them, so the
    /// file and the returned list agree line for line.
    pub fn load(&self) -> Result<Vec<Task>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "task file missing, creating");
            self.create()?;
            return Ok(Vec::new());
        }

        let content = fs::read(&self.path).map_err(|err| self.unavailable(err))?;
        let mut tasks = Vec::new();
        let mut skipped = 0usize;
        for raw in split_lines(&content) {
            let decoded = std::str::from_utf8(raw).map_err(|_| Error::CorruptRecord {
                line: String::from_utf8_lossy(raw).into_owned(),
                reason: "not valid UTF-8".to_string(),
            });
            let line = match decoded {
                Ok(line) if line.trim().is_empty() => {
                    skipped += 1;
                    continue;
                }
                Ok(line) => line,
                Err(err) => {
                    warn!(path = %self.path.display(), error = %err, "skipping unreadable task");
                    skipped += 1;
                    continue;
                }
            };
            match Task::from_file_line(line) {
                Ok(task) => tasks.push(task),
                Err(err) => {
                    warn!(path = %self.path.display(), error = %err, "skipping unreadable task");
                    skipped += 1;
                }
            }
        }

        if skipped > 0 {
            self.rewrite_all(&tasks)?;
        }
        debug!(path = %self.path.display(), count = tasks.len(), "loaded tasks");
        Ok(tasks)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Append one task line to the end of the file
    pub fn append(&self, task: &Task) -> Result<()> {
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|err| self.unavailable(err))?;
        file.write_all(task.to_file_line().as_bytes())
            .and_then(|_| file.sync_all())
            .map_err(|err| self.unavailable(err))?;
        debug!(path = %self.path.display(), task = %task, "appended task");
        Ok(())
    }

    /// Rewrite the file without the line at `index` (0-based)
    pub fn remove_at(&self, index: usize) -> Result<()> {
        let content = fs::read(&self.path).map_err(|err| self.unavailable(err))?;
        let lines = split_lines(&content);
        if index >= lines.len() {
            return Err(self.unavailable(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("task file has no line {}", index + 1),
            )));
        }

        let mut data = Vec::with_capacity(content.len());
        for (position, line) in lines.iter().enumerate() {
            if position != index {
                data.extend_from_slice(line);
                data.push(b'\n');
            }
        }
        self.write_atomic(&data)?;
        debug!(path = %self.path.display(), index, "removed task line");
        Ok(())
    }

    /// Replace the whole file with `tasks`, in order
    pub fn rewrite_all(&self, tasks: &[Task]) -> Result<()> {
        fs::metadata(&self.path).map_err(|err| self.unavailable(err))?;
        self.write_atomic(serialize(tasks).as_bytes())?;
        debug!(path = %self.path.display(), count = tasks.len(), "rewrote task file");
        Ok(())
    }

    /// Replace the directory and file with the in-memory tasks.
    ///
    /// Called after a [`Error::StorageUnavailable`] so the next command runs
    /// against a file that matches the list again.
    pub fn heal(&self, tasks: &[Task]) -> Result<()> {
        warn!(path = %self.path.display(), "task file unavailable, recreating");
        match fs::remove_file(&self.path) {
            Err(err) if err.kind() != io::ErrorKind::NotFound => {
                warn!(path = %self.path.display(), error = %err, "could not remove old task file");
            }
            _ => {}
        }
        self.create()?;
        self.write_atomic(serialize(tasks).as_bytes())
    }

    // =========================================================================
    // File I/O helpers
    // =========================================================================

    /// Create the parent directory and an empty file if either is missing
    fn create(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| self.unavailable(err))?;
        }
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|err| self.unavailable(err))?;
        Ok(())
    }

    /// Write data atomically using temp file + rename.
    ///
    /// The replacement keeps the permissions of the file it replaces.
    fn write_atomic(&self, data: &[u8]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut temp = NamedTempFile::new_in(dir).map_err(|err| self.unavailable(err))?;
        if let Ok(metadata) = fs::metadata(&self.path) {
            temp.as_file()
                .set_permissions(metadata.permissions())
                .map_err(|err| self.unavailable(err))?;
        }
        temp.write_all(data)
            .and_then(|_| temp.as_file().sync_all())
            .map_err(|err| self.unavailable(err))?;
        temp.persist(&self.path)
            .map_err(|err| self.unavailable(err.error))?;
        Ok(())
    }

    fn unavailable(&self, err: io::Error) -> Error {
        Error::storage(&self.path, err)
    }
}

fn serialize(tasks: &[Task]) -> String {
    tasks.iter().map(Task::to_file_line).collect()
}

/// Split raw file content into lines, dropping `\n` / `\r\n` terminators
fn split_lines(content: &[u8]) -> Vec<&[u8]> {
    let mut lines: Vec<&[u8]> = content
        .split(|byte| *byte == b'\n')
        .map(|line| line.strip_suffix(b"\r".as_slice()).unwrap_or(line))
        .collect();
    if lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines
}
