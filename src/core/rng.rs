//! Deterministic random stream with an invocation flag.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical sequence
//! - **Per-operation**: Board operations build a fresh stream from their
//!   stored seed before every query or mutation
//! - **Invocation tracking**: `invoked()` reports whether any value was drawn
//!   since the flag was last cleared, which marks chance transitions
//! - **Forkable**: Independent per-worker streams derived from one base seed
//!
//! ## Usage
//!
//! ```
//! use ccg_search::core::RandomStream;
//!
//! let mut stream = RandomStream::new(42);
//! stream.clear_invoked();
//! let _ = stream.gen_range_usize(0..6);
//! assert!(stream.invoked());
//!
//! // Same seed, same sequence
//! let mut a = RandomStream::new(7);
//! let mut b = RandomStream::new(7);
//! assert_eq!(a.next_u64(), b.next_u64());
//! ```

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Golden-ratio increment used to spread fork seeds apart.
const FORK_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Deterministic random stream.
///
/// Uses ChaCha8 for speed while keeping a reproducible sequence per seed.
/// Every value-producing method sets the invoked flag; `next_seed` is
/// bookkeeping and leaves it untouched.
#[derive(Clone, Debug)]
pub struct RandomStream {
    inner: ChaCha8Rng,
    seed: u64,
    invoked: bool,
    fork_counter: u64,
}

impl RandomStream {
    /// Create a new stream with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            invoked: false,
            fork_counter: 0,
        }
    }

    /// Whether a random value was drawn since the last `clear_invoked`.
    #[must_use]
    pub fn invoked(&self) -> bool {
        self.invoked
    }

    /// Reset the invoked flag.
    pub fn clear_invoked(&mut self) {
        self.invoked = false;
    }

    /// Advance the stream and return a seed for the next board operation.
    pub fn next_seed(&mut self) -> u64 {
        self.inner.next_u64()
    }

    /// Fork this stream to create an independent branch.
    ///
    /// Each fork produces a different but deterministic sequence.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self
            .seed
            .wrapping_add(self.fork_counter.wrapping_mul(FORK_STRIDE));
        Self::new(fork_seed)
    }

    /// Draw a raw 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.invoked = true;
        self.inner.next_u64()
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.invoked = true;
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        self.invoked = true;
        slice.shuffle(&mut self.inner);
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        self.invoked = true;
        slice.choose(&mut self.inner)
    }
}
