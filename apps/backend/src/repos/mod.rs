pub mod scores;

pub use scores::{Score, ScoreData, ScoreRepo, SeaScoreRepo};
