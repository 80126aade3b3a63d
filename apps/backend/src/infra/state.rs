use std::sync::Arc;

use db_infra::{DbLocation, RuntimeEnv};

use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;
use crate::utils::clock::{Clock, SystemClock};

/// Assembles [`AppState`] for both `main` and tests.
pub struct StateBuilder {
    env: RuntimeEnv,
    db_location: Option<DbLocation>,
    clock: Arc<dyn Clock>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            env: RuntimeEnv::Prod,
            db_location: None,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_env(mut self, env: RuntimeEnv) -> Self {
        self.env = env;
        self
    }

    pub fn with_db(mut self, location: DbLocation) -> Self {
        self.db_location = Some(location);
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        match self.db_location {
            Some(location) => {
                let conn = bootstrap_db(&location, self.env).await?;
                Ok(AppState::new(conn, self.clock))
            }
            None => Ok(AppState::new_without_db(self.clock)),
        }
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
