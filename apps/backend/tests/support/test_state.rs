use std::path::Path;
use std::sync::Arc;

use backend::infra::state::build_state;
use backend::state::app_state::AppState;
use backend::utils::clock::FixedClock;
use db_infra::{DbLocation, RuntimeEnv};

/// 2023-11-14T22:13:20Z
pub const EPOCH: i64 = 1_700_000_000;

/// Fresh migrated in-memory store with a system clock.
pub async fn memory_state() -> AppState {
    build_state()
        .with_env(RuntimeEnv::Test)
        .with_db(DbLocation::Memory)
        .build()
        .await
        .expect("in-memory state should build")
}

/// Fresh in-memory store whose clock the test controls.
pub async fn memory_state_at(clock: Arc<FixedClock>) -> AppState {
    build_state()
        .with_env(RuntimeEnv::Test)
        .with_db(DbLocation::Memory)
        .with_clock(clock)
        .build()
        .await
        .expect("in-memory state should build")
}

/// File-backed store at `path`, migrated on open.
pub async fn file_state(path: &Path) -> AppState {
    build_state()
        .with_env(RuntimeEnv::Test)
        .with_db(DbLocation::file(path))
        .build()
        .await
        .expect("file state should build")
}
