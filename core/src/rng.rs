//! Shuffle randomness.
//!
//! RULE: The engine never calls a platform RNG directly. All randomness
//! flows through a ShuffleRng, seeded from entropy in production and from a
//! fixed seed in tests, so shuffle-dependent behavior is reproducible.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

pub struct ShuffleRng {
    inner: Pcg64Mcg,
}

impl ShuffleRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// In-place Fisher–Yates. `gen_range` keeps the draw unbiased.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.inner.gen_range(0..=i);
            slice.swap(i, j);
        }
    }
}
