//! Deck and deal generation. Pure: no I/O, entropy is injected.

pub mod cards;
pub mod deal;
pub mod deck;
pub mod seed;

pub use cards::{Card, Rank, Suit};
pub use deal::{deal_klondike, generate, Deal, Foundations, NewGame};
pub use deck::{full_deck, shuffle};
pub use seed::rng_for_seed;
