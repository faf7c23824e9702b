//! Injectable uniform randomness for tie-breaks and decoration picks

use rand::{Rng, SeedableRng, rngs::StdRng};

/// Uniform random choice among a known number of candidates
pub trait RandomSource {
    /// Pick an index in `0..len`; `len` is never zero
    fn choose_index(&mut self, len: usize) -> usize;

    /// Draw a fresh 64-bit seed
    fn next_seed(&mut self) -> u64;
}

/// Seeded random source for reproducible generation
#[derive(Clone, Debug)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    /// Create a deterministic random source
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn choose_index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.rng.random_range(0..len)
    }

    fn next_seed(&mut self) -> u64 {
        self.rng.random()
    }
}

/// Random source that always picks the first candidate
///
/// Useful for hosts and tests that want fully ordered tie-breaking.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstChoice;

impl RandomSource for FirstChoice {
    fn choose_index(&mut self, _len: usize) -> usize {
        0
    }

    fn next_seed(&mut self) -> u64 {
        0
    }
}

/// Pick one element uniformly from a slice
pub fn pick<'a, T>(random: &mut dyn RandomSource, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(random.choose_index(items.len()).min(items.len() - 1))
}
