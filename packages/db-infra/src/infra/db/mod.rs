pub mod core;
pub mod locking;

pub use self::core::{
    build_admin_pool, connect_pool, orchestrate_migration, orchestrate_migration_internal,
};
pub use self::locking::{BootstrapLock, Guard, InMemoryLock, SqliteFileLock};
