//! Deterministic shuffling.
//!
//! Deals must be reproducible: a saved session stores only the variant and
//! seed, and replays its move records on top of a fresh deal. `GameRng`
//! wraps ChaCha8 so the same seed produces the same deal on every platform.
//!
//! ```
//! use patience::core::GameRng;
//!
//! let mut a: Vec<u32> = (0..52).collect();
//! let mut b = a.clone();
//!
//! GameRng::new(42).shuffle(&mut a);
//! GameRng::new(42).shuffle(&mut b);
//! assert_eq!(a, b);
//! ```

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Seeded RNG used to shuffle the stock.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this RNG was created from.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }
}
