//! Klondike opening layout.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::cards::{Card, Suit};
use super::deck::{assign_ids, full_deck, shuffle};
use super::seed::rng_for_seed;

pub const TABLEAU_COUNT: usize = 7;
/// Cards left for the stock after the tableaus take 1 + 2 + ... + 7.
pub const STOCK_SIZE: usize = 24;

/// One empty-at-deal pile per suit, keyed by suit symbol on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Foundations {
    #[serde(rename = "S")]
    pub spades: Vec<Card>,
    #[serde(rename = "H")]
    pub hearts: Vec<Card>,
    #[serde(rename = "D")]
    pub diamonds: Vec<Card>,
    #[serde(rename = "C")]
    pub clubs: Vec<Card>,
}

impl Foundations {
    pub fn pile(&self, suit: Suit) -> &[Card] {
        match suit {
            Suit::Spades => &self.spades,
            Suit::Hearts => &self.hearts,
            Suit::Diamonds => &self.diamonds,
            Suit::Clubs => &self.clubs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deal {
    pub stock: Vec<Card>,
    pub waste: Vec<Card>,
    pub foundations: Foundations,
    pub tableaus: Vec<Vec<Card>>,
}

impl Deal {
    /// Every card in the layout, pile by pile.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.stock
            .iter()
            .chain(self.waste.iter())
            .chain(Suit::ALL.into_iter().flat_map(|s| self.foundations.pile(s).iter()))
            .chain(self.tableaus.iter().flatten())
    }
}

/// Response shape of a new game: the seed echo and the layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGame {
    pub seed: Option<String>,
    pub state: Deal,
}

/// Lay out a shuffled deck: pile `i` takes the next `i + 1` cards with only
/// the last face-up; the rest become the face-down stock in order.
pub fn deal_klondike(deck: Vec<Card>) -> Deal {
    let mut cards = deck.into_iter();
    let mut tableaus = Vec::with_capacity(TABLEAU_COUNT);

    for pile_no in 0..TABLEAU_COUNT {
        let mut pile: Vec<Card> = cards.by_ref().take(pile_no + 1).collect();
        if let Some(top) = pile.last_mut() {
            top.face_up = true;
        }
        tableaus.push(pile);
    }

    let stock = cards
        .map(|mut c| {
            c.face_up = false;
            c
        })
        .collect();

    Deal {
        stock,
        waste: Vec::new(),
        foundations: Foundations::default(),
        tableaus,
    }
}

/// Deal a new game.
///
/// With a seed the shuffle is a pure function of the seed string; without
/// one it draws from `entropy`.
pub fn generate<R>(seed: Option<&str>, entropy: &mut R) -> NewGame
where
    R: Rng + ?Sized,
{
    let mut deck = full_deck();
    match seed {
        Some(s) => shuffle(&mut deck, &mut rng_for_seed(s)),
        None => shuffle(&mut deck, entropy),
    }
    assign_ids(&mut deck);

    NewGame {
        seed: seed.map(str::to_owned),
        state: deal_klondike(deck),
    }
}
