use db_infra::{
    connect_pool, orchestrate_migration, orchestrate_migration_internal, DbLocation, DbSettings,
    RuntimeEnv,
};
use migration::MigrationCommand;
use sea_orm::DatabaseConnection;
use tracing::info;

use crate::error::AppError;

/// Open the score store and bring its schema up to date.
///
/// File databases migrate through a separate single-connection admin pool
/// under the bootstrap file lock. In-memory databases only exist on their
/// one connection, so they migrate on the application pool itself.
pub async fn bootstrap_db(
    location: &DbLocation,
    env: RuntimeEnv,
) -> Result<DatabaseConnection, AppError> {
    let settings = DbSettings::from_env();
    let pool = match location {
        DbLocation::File(path) => {
            orchestrate_migration(location, env, MigrationCommand::Up).await?;
            info!(path = %path.display(), "score store ready");
            connect_pool(location, &settings).await?
        }
        DbLocation::Memory => {
            let pool = connect_pool(location, &settings).await?;
            orchestrate_migration_internal(&pool, location, env, MigrationCommand::Up).await?;
            info!("in-memory score store ready");
            pool
        }
    };

    Ok(pool)
}
