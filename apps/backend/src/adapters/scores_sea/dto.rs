//! DTOs for scores_sea adapter.

/// Row to append to the ledger.
#[derive(Debug, Clone)]
pub struct ScoreCreate {
    pub player: Option<String>,
    pub seed: Option<String>,
    pub moves: i64,
    pub seconds: i64,
    pub won: bool,
    pub created_at: i64,
}
