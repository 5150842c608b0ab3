//! Seedable randomness for drawing secrets.
//!
//! The engine never touches a global generator. Tests pass a fixed seed and
//! get the same sequence of secrets every run.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: Option<u64>,
}

impl GameRng {
    /// Create a deterministic generator from `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Create a generator seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            inner: ChaCha8Rng::from_entropy(),
            seed: None,
        }
    }

    /// The seed this generator was built from, if it was seeded explicitly.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Draw uniformly from the closed interval `low..=high`.
    pub fn gen_inclusive(&mut self, low: i32, high: i32) -> i32 {
        self.inner.gen_range(low..=high)
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
