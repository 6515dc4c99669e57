//! Injectable randomness for secret selection and template choice.
//!
//! Everything random in the game goes through [`RandomSource`] so a server can
//! run from a fixed seed and tests can script exact choices.

use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the two kinds of randomness the game needs.
pub trait RandomSource: Send + Sync {
    /// Uniform integer in `range`.
    fn number_in(&mut self, range: RangeInclusive<u32>) -> u32;

    /// Uniform index in `0..len`. `len` is never zero.
    fn pick_index(&mut self, len: usize) -> usize;
}

/// Pick one entry of a non-empty template set.
pub fn choose<'a, R: RandomSource + ?Sized>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items[rng.pick_index(items.len())]
}

/// Seedable RNG backing the server.
#[derive(Debug, Clone)]
pub struct GameRng {
    inner: StdRng,
}

impl GameRng {
    /// Deterministic generator: same seed, same secrets and hints.
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    /// Generator seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            inner: StdRng::from_os_rng(),
        }
    }

    /// Seeded when `seed` is given, entropy otherwise.
    pub fn new(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }
}

impl RandomSource for GameRng {
    fn number_in(&mut self, range: RangeInclusive<u32>) -> u32 {
        self.inner.random_range(range)
    }

    fn pick_index(&mut self, len: usize) -> usize {
        self.inner.random_range(0..len)
    }
}
