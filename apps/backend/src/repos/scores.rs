//! Score ledger repository: domain types over the sea-orm adapter.

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection};

use crate::adapters::scores_sea as scores_adapter;
use crate::entities::scores;
use crate::errors::domain::DomainError;

/// A stored score record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Score {
    pub id: i64,
    pub player: Option<String>,
    pub seed: Option<String>,
    pub moves: i64,
    pub seconds: i64,
    pub won: bool,
    pub created_at: i64,
}

/// Fields for a new record; `created_at` comes from the caller's clock.
#[derive(Debug, Clone)]
pub struct ScoreData {
    pub player: Option<String>,
    pub seed: Option<String>,
    pub moves: i64,
    pub seconds: i64,
    pub won: bool,
    pub created_at: i64,
}

impl From<scores::Model> for Score {
    fn from(model: scores::Model) -> Self {
        Self {
            id: model.id,
            player: model.player,
            seed: model.seed,
            moves: model.moves,
            seconds: model.seconds,
            won: model.won,
            created_at: model.created_at,
        }
    }
}

impl From<ScoreData> for scores_adapter::ScoreCreate {
    fn from(data: ScoreData) -> Self {
        Self {
            player: data.player,
            seed: data.seed,
            moves: data.moves,
            seconds: data.seconds,
            won: data.won,
            created_at: data.created_at,
        }
    }
}

pub async fn create_score<C: ConnectionTrait>(
    conn: &C,
    data: ScoreData,
) -> Result<Score, DomainError> {
    let model = scores_adapter::create_score(conn, data.into()).await?;
    Ok(Score::from(model))
}

pub async fn top_scores<C: ConnectionTrait>(
    conn: &C,
    limit: u64,
) -> Result<Vec<Score>, DomainError> {
    let rows = scores_adapter::find_top(conn, limit).await?;
    Ok(rows.into_iter().map(Score::from).collect())
}

/// Storage seam for the ledger service.
#[async_trait]
pub trait ScoreRepo: Send + Sync {
    async fn record(&self, data: ScoreData) -> Result<Score, DomainError>;
    async fn top(&self, limit: u64) -> Result<Vec<Score>, DomainError>;
}

/// [`ScoreRepo`] over a sea-orm connection.
#[derive(Debug, Clone)]
pub struct SeaScoreRepo {
    conn: DatabaseConnection,
}

impl SeaScoreRepo {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl ScoreRepo for SeaScoreRepo {
    async fn record(&self, data: ScoreData) -> Result<Score, DomainError> {
        create_score(&self.conn, data).await
    }

    async fn top(&self, limit: u64) -> Result<Vec<Score>, DomainError> {
        top_scores(&self.conn, limit).await
    }
}
