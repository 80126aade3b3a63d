use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::DbInfraError;

/// Default SQLite file for the production profile.
pub const DEFAULT_DB_FILE: &str = "solitaire_scores.db";
/// Default SQLite file for the test profile.
pub const DEFAULT_TEST_DB_FILE: &str = "solitaire_scores_test.db";

/// Runtime environment for the database
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnv {
    Prod,
    Test,
}

/// Database kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    /// Durable SQLite database backed by a file
    SqliteFile,
    /// Ephemeral SQLite database; lives as long as its single pooled connection
    SqliteMemory,
}

/// Where the score store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbLocation {
    File(PathBuf),
    Memory,
}

impl DbLocation {
    /// Resolve the location for a profile from the environment.
    ///
    /// `SOLITAIRE_DB` names the production file and `SOLITAIRE_TEST_DB` the test
    /// file. The test file name must contain `_test`.
    pub fn from_env(env: RuntimeEnv, kind: DbKind) -> Result<Self, DbInfraError> {
        match kind {
            DbKind::SqliteMemory => Ok(DbLocation::Memory),
            DbKind::SqliteFile => Ok(DbLocation::File(PathBuf::from(sqlite_file_spec(env)?))),
        }
    }

    pub fn file(path: impl AsRef<Path>) -> Self {
        DbLocation::File(path.as_ref().to_path_buf())
    }

    pub fn kind(&self) -> DbKind {
        match self {
            DbLocation::File(_) => DbKind::SqliteFile,
            DbLocation::Memory => DbKind::SqliteMemory,
        }
    }

    /// Connection string understood by sea-orm/sqlx.
    pub fn conn_spec(&self) -> String {
        match self {
            // mode=rwc creates the file on first use
            DbLocation::File(path) => format!("sqlite://{}?mode=rwc", path.display()),
            DbLocation::Memory => "sqlite::memory:".to_string(),
        }
    }

    /// `<db>.migrate.lock` next to the database file.
    pub fn lock_path(&self) -> Option<PathBuf> {
        match self {
            DbLocation::File(path) => Some(path.with_extension("migrate.lock")),
            DbLocation::Memory => None,
        }
    }

    /// Pool bounds: an in-memory database must stay on a single connection.
    pub fn pool_bounds(&self) -> (u32, u32) {
        match self {
            DbLocation::File(_) => (1, 4),
            DbLocation::Memory => (1, 1),
        }
    }
}

/// Resolve the SQLite file path for a profile.
pub fn sqlite_file_spec(env: RuntimeEnv) -> Result<String, DbInfraError> {
    match env {
        RuntimeEnv::Prod => {
            Ok(env::var("SOLITAIRE_DB").unwrap_or_else(|_| DEFAULT_DB_FILE.to_string()))
        }
        RuntimeEnv::Test => {
            let file =
                env::var("SOLITAIRE_TEST_DB").unwrap_or_else(|_| DEFAULT_TEST_DB_FILE.to_string());
            validate_test_file(&file)?;
            Ok(file)
        }
    }
}

fn validate_test_file(file: &str) -> Result<(), DbInfraError> {
    let stem = Path::new(file)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    if !stem.contains("_test") {
        return Err(DbInfraError::config(format!(
            "Test profile requires a database file name containing '_test', but got: '{file}'"
        )));
    }
    Ok(())
}

/// Per-connection session settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbSettings {
    pub busy_timeout_ms: u64,
}

impl DbSettings {
    pub fn from_env() -> Self {
        let busy_timeout_ms = env::var("SOLITAIRE_DB_BUSY_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(5000);
        Self { busy_timeout_ms }
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

impl Default for DbSettings {
    fn default() -> Self {
        Self {
            busy_timeout_ms: 5000,
        }
    }
}

/// How long migration waits for the bootstrap lock.
pub fn migrate_lock_timeout_ms(env: RuntimeEnv) -> u64 {
    env::var("SOLITAIRE_MIGRATE_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(match env {
            RuntimeEnv::Test => 3000,
            RuntimeEnv::Prod => 900,
        })
}
