use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::utils::clock::{Clock, SystemClock};

/// Shared per-worker application state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Score store connection; absent when the app runs without storage.
    db: Option<DatabaseConnection>,
    clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, clock: Arc<dyn Clock>) -> Self {
        Self {
            db: Some(db),
            clock,
        }
    }

    pub fn new_without_db(clock: Arc<dyn Clock>) -> Self {
        Self { db: None, clock }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new_without_db(Arc::new(SystemClock))
    }
}
