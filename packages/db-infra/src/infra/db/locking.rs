use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::error::DbInfraError;

/// A held bootstrap lock.
/// For SQLite file locks this owns the OS file handle; the in-memory guard is a no-op.
pub struct Guard {
    sqlite_file: Option<File>,
    sqlite_lock_path: Option<PathBuf>,
    released: bool,
}

impl Guard {
    fn sqlite(file: File, lock_path: PathBuf) -> Self {
        Self {
            sqlite_file: Some(file),
            sqlite_lock_path: Some(lock_path),
            released: false,
        }
    }

    fn in_memory() -> Self {
        Self {
            sqlite_file: None,
            sqlite_lock_path: None,
            released: false,
        }
    }

    pub async fn release(mut self) -> Result<(), DbInfraError> {
        if self.released {
            return Ok(());
        }

        if let Some(file) = self.sqlite_file.take() {
            let lock_path_display = self
                .sqlite_lock_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "unknown".to_string());

            match fs4::fs_std::FileExt::unlock(&file) {
                Ok(()) => {
                    debug!(lock_path = lock_path_display, "SQLite file lock released");
                }
                Err(e) => {
                    // File drop releases the OS lock regardless
                    debug!(
                        error = %e,
                        lock_path = lock_path_display,
                        "SQLite file unlock returned error (may be benign)"
                    );
                }
            }
        }

        self.released = true;
        Ok(())
    }
}

/// Bootstrap/migration lock acquisition.
#[async_trait]
pub trait BootstrapLock {
    /// Try to acquire the lock (non-blocking).
    /// Returns Some(Guard) if acquired, None if held by another process.
    async fn try_acquire(&mut self) -> Result<Option<Guard>, DbInfraError>;
}

/// OS-level exclusive lock on `<db>.migrate.lock`, shared by every process
/// pointing at the same database file.
pub struct SqliteFileLock {
    lock_path: PathBuf,
}

impl SqliteFileLock {
    pub fn new(lock_path: &Path) -> Self {
        Self {
            lock_path: lock_path.to_path_buf(),
        }
    }
}

#[async_trait]
impl BootstrapLock for SqliteFileLock {
    async fn try_acquire(&mut self) -> Result<Option<Guard>, DbInfraError> {
        use fs4::fs_std::FileExt;

        if let Some(parent) = self.lock_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    DbInfraError::config(format!(
                        "failed to create lock file parent directory: {e}"
                    ))
                })?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .truncate(true)
            .read(true)
            .write(true)
            .open(&self.lock_path)
            .map_err(|e| DbInfraError::config(format!("failed to open lock file: {e}")))?;

        match FileExt::try_lock_exclusive(&file) {
            Ok(true) => {
                debug!(lock_path = %self.lock_path.display(), "SQLite file lock acquired");
                Ok(Some(Guard::sqlite(file, self.lock_path.clone())))
            }
            Ok(false) => {
                debug!(lock_path = %self.lock_path.display(), "SQLite file lock contended");
                Ok(None)
            }
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => Ok(None),
            Err(e) => Err(DbInfraError::config(format!(
                "failed to acquire SQLite file lock: {e}"
            ))),
        }
    }
}

/// No-op lock for in-memory databases, which are private to one process.
pub struct InMemoryLock;

#[async_trait]
impl BootstrapLock for InMemoryLock {
    async fn try_acquire(&mut self) -> Result<Option<Guard>, DbInfraError> {
        Ok(Some(Guard::in_memory()))
    }
}
