//! Shared test helpers for the solitaire backend: one logging initialiser for
//! unit and integration tests, and assertions for problem+json responses.

pub mod logging;
pub mod problem_details;
