//! Canonical deck construction and shuffling.

use rand::Rng;

use super::cards::{Card, Rank, Suit};

pub const DECK_SIZE: usize = 52;

/// Suits S, H, D, C, each ace through king, all face-down.
///
/// Ids are assigned after shuffling, so cards here carry an empty id.
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for suit in Suit::ALL {
        for rank in Rank::all() {
            deck.push(Card::face_down(String::new(), suit, rank));
        }
    }
    deck
}

/// Unbiased Fisher-Yates shuffle.
pub fn shuffle<T, R>(items: &mut [T], rng: &mut R)
where
    R: Rng + ?Sized,
{
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// Give each card a positional id such as `S1-00`.
pub fn assign_ids(deck: &mut [Card]) {
    for (pos, card) in deck.iter_mut().enumerate() {
        card.id = format!("{}{}-{:02}", card.suit, card.rank.value(), pos);
    }
}
