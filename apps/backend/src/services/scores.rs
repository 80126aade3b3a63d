//! Score ledger service: append results, serve the leaderboard.

use std::sync::Arc;

use tracing::{debug, info};

use crate::errors::domain::DomainError;
use crate::logging::pii::Redacted;
use crate::repos::scores::{Score, ScoreData, ScoreRepo};
use crate::utils::clock::Clock;

pub const DEFAULT_LEADERBOARD_LIMIT: u64 = 10;
pub const MAX_LEADERBOARD_LIMIT: u64 = 100;

/// A client-reported game result. Counts are stored as reported.
#[derive(Debug, Clone)]
pub struct ScoreSubmission {
    pub player: Option<String>,
    pub seed: Option<String>,
    pub moves: i64,
    pub seconds: i64,
    pub won: bool,
}

/// Parse a raw `limit` parameter. Absent means the default page size.
pub fn resolve_limit(raw: Option<&str>) -> Result<u64, DomainError> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_LEADERBOARD_LIMIT);
    };
    match raw.trim().parse::<u64>() {
        Ok(n) if (1..=MAX_LEADERBOARD_LIMIT).contains(&n) => Ok(n),
        _ => Err(DomainError::validation(format!(
            "limit must be an integer between 1 and {MAX_LEADERBOARD_LIMIT}"
        ))),
    }
}

#[derive(Clone)]
pub struct ScoreService {
    repo: Arc<dyn ScoreRepo>,
    clock: Arc<dyn Clock>,
}

impl ScoreService {
    pub fn new(repo: Arc<dyn ScoreRepo>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    /// Append one record stamped with the service clock.
    pub async fn record(&self, submission: ScoreSubmission) -> Result<Score, DomainError> {
        let created_at = self.clock.now_unix();
        let player = submission.player.as_deref().unwrap_or("");

        let score = self
            .repo
            .record(ScoreData {
                player: submission.player.clone(),
                seed: submission.seed,
                moves: submission.moves,
                seconds: submission.seconds,
                won: submission.won,
                created_at,
            })
            .await?;

        info!(
            score_id = score.id,
            player = %Redacted(player),
            won = score.won,
            seconds = score.seconds,
            moves = score.moves,
            "score recorded"
        );
        Ok(score)
    }

    /// Best `limit` records in leaderboard order.
    pub async fn top_scores(&self, limit: u64) -> Result<Vec<Score>, DomainError> {
        let scores = self.repo.top(limit).await?;
        debug!(limit, returned = scores.len(), "leaderboard read");
        Ok(scores)
    }
}
