pub mod db;
pub mod state;

pub use db::bootstrap_db;
pub use state::{build_state, StateBuilder};
