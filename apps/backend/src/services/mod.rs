pub mod games;
pub mod scores;

pub use scores::{resolve_limit, ScoreService, ScoreSubmission};
