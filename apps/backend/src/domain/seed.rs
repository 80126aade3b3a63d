//! Seed string to RNG derivation.

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

const SHUFFLE_CONTEXT: &str = "solitaire-backend 2025-10 klondike deal shuffle";

/// Deterministic RNG for a seed string. Any string is accepted, including "".
pub fn rng_for_seed(seed: &str) -> ChaCha20Rng {
    ChaCha20Rng::from_seed(blake3::derive_key(SHUFFLE_CONTEXT, seed.as_bytes()))
}
