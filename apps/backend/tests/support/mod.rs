#![allow(dead_code)]

pub mod test_state;

pub use app_builder::create_test_app;
pub use test_state::{file_state, memory_state, memory_state_at};
