use std::time::{Duration, Instant};

use migration::{migrate, MigrationCommand, MigrationName, Migrator, MigratorTrait};
use rand::Rng;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};
use tracing::{error, info, trace, warn};

use crate::config::db::{migrate_lock_timeout_ms, DbKind, DbLocation, DbSettings, RuntimeEnv};
use crate::error::DbInfraError;
use crate::infra::db::locking::{BootstrapLock, Guard, InMemoryLock, SqliteFileLock};

const MIGRATION_BODY_TIMEOUT_MS: u64 = 120_000;

/// Pool options with session settings applied to every connection sqlx opens.
fn pool_options(
    location: &DbLocation,
    settings: &DbSettings,
    min: u32,
    max: u32,
) -> ConnectOptions {
    let busy_timeout = settings.busy_timeout();
    let mut opt = ConnectOptions::new(location.conn_spec());
    opt.min_connections(min)
        .max_connections(max)
        .acquire_timeout(Duration::from_secs(2))
        .sqlx_logging(false)
        .map_sqlx_sqlite_opts(move |o| o.busy_timeout(busy_timeout).foreign_keys(true));
    opt
}

/// Open the application pool for a location.
pub async fn connect_pool(
    location: &DbLocation,
    settings: &DbSettings,
) -> Result<DatabaseConnection, DbInfraError> {
    let (min, max) = location.pool_bounds();
    Database::connect(pool_options(location, settings, min, max))
        .await
        .map_err(|e| DbInfraError::config(format!("failed to connect to database: {e}")))
}

/// Open a single-connection pool used for migrations.
pub async fn build_admin_pool(
    location: &DbLocation,
    settings: &DbSettings,
) -> Result<DatabaseConnection, DbInfraError> {
    Database::connect(pool_options(location, settings, 1, 1))
        .await
        .map_err(|e| {
            DbInfraError::config(format!("failed to connect to database (admin pool): {e}"))
        })
}

async fn fast_path_schema_check(conn: &DatabaseConnection) -> Result<bool, DbInfraError> {
    let expected_count = Migrator::migrations().len();
    let expected_last = Migrator::migrations()
        .last()
        .map(|m| m.name().to_string())
        .unwrap_or_default();

    let (current_count, current_last) = match Migrator::get_applied_migrations(conn).await {
        Ok(migrations) => {
            let last = migrations.last().map(|m| m.name().to_string());
            (migrations.len(), last)
        }
        Err(DbErr::Exec(_)) => {
            trace!(fastpath = "miss", reason = "migration_table_missing");
            return Ok(false);
        }
        Err(e) => {
            return Err(DbInfraError::migration(format!(
                "failed to get applied migrations: {e}"
            )));
        }
    };

    let up_to_date = current_count == expected_count
        && !expected_last.is_empty()
        && current_last.as_deref() == Some(expected_last.as_str());

    trace!(
        fastpath = if up_to_date { "hit" } else { "miss" },
        current_count,
        expected_count,
        current_last = %current_last.as_deref().unwrap_or(""),
        expected_last = %expected_last
    );

    Ok(up_to_date)
}

/// Connect an admin pool and run a migration command under the bootstrap lock.
pub async fn orchestrate_migration(
    location: &DbLocation,
    env: RuntimeEnv,
    command: MigrationCommand,
) -> Result<(), DbInfraError> {
    let admin_pool = build_admin_pool(location, &DbSettings::from_env()).await?;
    orchestrate_migration_internal(&admin_pool, location, env, command).await
}

/// Run a migration command on an existing pool.
///
/// For in-memory databases the pool passed here must be the same one the
/// application keeps, otherwise the schema lands in a throwaway database.
pub async fn orchestrate_migration_internal(
    pool: &DatabaseConnection,
    location: &DbLocation,
    env: RuntimeEnv,
    command: MigrationCommand,
) -> Result<(), DbInfraError> {
    let db_kind = location.kind();
    info!(
        "migrate=start env={:?} db_kind={:?} conn={}",
        env,
        db_kind,
        location.conn_spec()
    );

    if matches!(command, MigrationCommand::Status) {
        migrate(pool, command)
            .await
            .map_err(|e| DbInfraError::migration(format!("migration execution failed: {e}")))?;
        info!("migrate=done");
        return Ok(());
    }

    let result = match location {
        DbLocation::Memory => migrate_with_lock(pool, InMemoryLock, env, db_kind, command).await,
        DbLocation::File(_) => {
            let lock_path = location.lock_path().ok_or_else(|| {
                DbInfraError::config("file database has no lock path".to_string())
            })?;
            let lock = SqliteFileLock::new(&lock_path);
            migrate_with_lock(pool, lock, env, db_kind, command).await
        }
    };

    if let Err(ref e) = result {
        let message = e.message();
        if message.contains("database is locked") || message.contains("SQLITE_BUSY") {
            error!("sqlite_busy op=migrate err={:?}", e);
        }
    }

    info!("migrate=done");
    result
}

async fn migrate_with_lock<L>(
    pool: &DatabaseConnection,
    mut lock: L,
    env: RuntimeEnv,
    db_kind: DbKind,
    command: MigrationCommand,
) -> Result<(), DbInfraError>
where
    L: BootstrapLock,
{
    let lock_acquire_ms = migrate_lock_timeout_ms(env);
    info!(
        acquire_ms = lock_acquire_ms,
        env = ?env,
        db_kind = ?db_kind,
        "migration timeouts configured"
    );

    let start = Instant::now();
    let mut attempts: u32 = 0;
    let guard = loop {
        attempts += 1;

        if matches!(command, MigrationCommand::Up) && fast_path_schema_check(pool).await? {
            info!("migrate=skipped up_to_date=true");
            return Ok(());
        }

        if let Some(acquired) = lock.try_acquire().await? {
            trace!(
                lock = "won",
                attempts,
                elapsed_ms = start.elapsed().as_millis()
            );
            break acquired;
        }

        let base_delay_ms = (5u64 << attempts.saturating_sub(1).min(5)).min(80);
        let jitter_ms = rand::rng().random_range(0..4u64);
        let delay_ms = base_delay_ms + jitter_ms;
        trace!(lock = "backoff", attempts, delay_ms);

        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        if start.elapsed() >= Duration::from_millis(lock_acquire_ms) {
            return Err(DbInfraError::migration(format!(
                "migration lock acquisition timeout after {:?} ({} attempts)",
                start.elapsed(),
                attempts
            )));
        }
    };

    let result = migrate_with_guard(pool, &guard, env, db_kind, command).await;

    if let Err(release_err) = guard.release().await {
        warn!(error = %release_err, "Failed to release migration guard");
    }

    result
}

async fn migrate_with_guard(
    pool: &DatabaseConnection,
    _guard: &Guard,
    env: RuntimeEnv,
    db_kind: DbKind,
    command: MigrationCommand,
) -> Result<(), DbInfraError> {
    let start = Instant::now();

    if matches!(db_kind, DbKind::SqliteFile) {
        setup_sqlite_file_prerequisites(pool).await?;
    }

    match tokio::time::timeout(
        Duration::from_millis(MIGRATION_BODY_TIMEOUT_MS),
        migrate(pool, command),
    )
    .await
    {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            return Err(DbInfraError::migration(format!(
                "migration execution failed: {e}"
            )))
        }
        Err(_) => {
            return Err(DbInfraError::migration(format!(
                "migration body execution timed out after {MIGRATION_BODY_TIMEOUT_MS}ms"
            )))
        }
    }

    info!(
        migrator = "ran",
        env = ?env,
        db_kind = ?db_kind,
        elapsed_ms = start.elapsed().as_millis()
    );

    let expected_count = Migrator::migrations().len();
    let applied_count = Migrator::get_applied_migrations(pool)
        .await
        .map(|m| m.len())
        .unwrap_or(0);
    info!(migrate = "counts", expected_count, applied_count);

    match command {
        MigrationCommand::Reset if applied_count != 0 => Err(DbInfraError::migration(format!(
            "Migration verification failed: reset should leave 0 migrations applied, but {applied_count} were found (env={env:?}, db_kind={db_kind:?})"
        ))),
        MigrationCommand::Up | MigrationCommand::Fresh | MigrationCommand::Refresh
            if applied_count != expected_count =>
        {
            Err(DbInfraError::migration(format!(
                "Migration verification failed: expected {expected_count} migrations, but {applied_count} were applied (env={env:?}, db_kind={db_kind:?})"
            )))
        }
        _ => Ok(()),
    }
}

async fn setup_sqlite_file_prerequisites(pool: &DatabaseConnection) -> Result<(), DbInfraError> {
    use sea_orm::DatabaseBackend;

    pool.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        "PRAGMA journal_mode = WAL;",
    ))
    .await
    .map_err(|e| DbInfraError::config(format!("failed to set journal_mode: {e}")))?;

    pool.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        "PRAGMA synchronous = NORMAL;",
    ))
    .await
    .map_err(|e| DbInfraError::config(format!("failed to set synchronous: {e}")))?;

    Ok(())
}
