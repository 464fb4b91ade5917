//! The round's single source of randomness.
//!
//! Allegiances, stances, statement targets, ballots, tie-breaks and night
//! removals all draw from one `GameRng` owned by the round. Replaying a
//! seed replays the round; a scripted player gets its own stream through
//! `fork` so its choices leave the engine's sequence alone.
//!
//! ```
//! use rust_deduction::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//! let mut scripted = rng.fork();
//!
//! // Scripted choices draw from their own stream
//! assert_ne!(rng.gen_range_usize(0..1000), scripted.gen_range_usize(0..1000));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeded ChaCha8 stream plus the seed it started from.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Stream for `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Stream with a fresh seed; `seed()` still reports it for replay.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Seed to pass to `RoundConfig::with_seed` to replay this round.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Derive a child stream without drawing from this one.
    ///
    /// The n-th fork of a given seed is always the same stream.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self.seed.wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self {
            inner: ChaCha8Rng::seed_from_u64(fork_seed),
            seed: fork_seed,
            fork_counter: 0,
        }
    }

    /// Uniform draw from `range`.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// `true` with `probability`.
    pub fn gen_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability)
    }

    /// Uniform pick; `None` on an empty slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Index drawn in proportion to `weights`, which need not be
    /// normalised. Zero-weight slots are never returned.
    ///
    /// `None` when there is nothing with positive weight to pick.
    pub fn choose_weighted(&mut self, weights: &[f32]) -> Option<usize> {
        if weights.is_empty() {
            return None;
        }

        let total: f32 = weights.iter().sum();
        if total <= 0.0 {
            return None;
        }

        let mut threshold = self.inner.gen::<f32>() * total;

        for (i, &weight) in weights.iter().enumerate() {
            threshold -= weight;
            if threshold <= 0.0 && weight > 0.0 {
                return Some(i);
            }
        }

        // Rounding can leave a sliver of threshold; land on the last live slot.
        weights.iter().rposition(|&w| w > 0.0)
    }

    /// Pick `amount` distinct indices from `0..length`, uniformly without
    /// replacement.
    ///
    /// # Panics
    ///
    /// Panics if `amount > length`.
    pub fn sample_indices(&mut self, length: usize, amount: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.inner, length, amount).into_vec()
    }
}
