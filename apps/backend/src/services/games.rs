//! New-game dealing.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::domain::{generate, NewGame};

/// Deal a fresh Klondike layout. Unseeded deals draw from OS entropy.
pub fn new_game(seed: Option<&str>) -> NewGame {
    let mut entropy = StdRng::from_os_rng();
    let game = generate(seed, &mut entropy);
    debug!(seeded = seed.is_some(), stock = game.state.stock.len(), "dealt new game");
    game
}
