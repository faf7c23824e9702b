//! Seeded continuous 2-D noise
//!
//! Generation only ever sees the [`NoiseSource`] trait, so tests can swap the
//! Perlin field for a constant or scripted stub.

use ::noise::{NoiseFn, Perlin};
use std::fmt;

/// Deterministic, smoothly varying 2-D noise in `[-1, 1]`
pub trait NoiseSource {
    /// Sample the field at `(x, y)`
    fn sample(&self, x: f64, y: f64) -> f64;

    /// Replace the field with a fresh one derived from `seed`
    ///
    /// Fields that carry no seed keep sampling as before.
    fn reseed(&mut self, _seed: u64) {}
}

/// Perlin gradient noise from a 32-bit seed
#[derive(Clone)]
pub struct PerlinNoise {
    perlin: Perlin,
    seed: u32,
}

impl PerlinNoise {
    /// Create a noise field for a seed
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
            seed,
        }
    }

    /// Derive the noise seed from a 64-bit generation seed
    pub fn from_generation_seed(seed: u64) -> Self {
        Self::new(fold_seed(seed))
    }

    /// Seed this field was built from
    pub const fn seed(&self) -> u32 {
        self.seed
    }
}

impl fmt::Debug for PerlinNoise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PerlinNoise").field("seed", &self.seed).finish()
    }
}

impl NoiseSource for PerlinNoise {
    fn sample(&self, x: f64, y: f64) -> f64 {
        self.perlin.get([x, y]).clamp(-1.0, 1.0)
    }

    fn reseed(&mut self, seed: u64) {
        *self = Self::from_generation_seed(seed);
    }
}

/// Noise that returns the same value everywhere
#[derive(Clone, Copy, Debug)]
pub struct ConstantNoise(pub f64);

impl NoiseSource for ConstantNoise {
    fn sample(&self, _x: f64, _y: f64) -> f64 {
        self.0
    }
}

/// Map a noise value from `[-1, 1]` to `[0, 1]`
pub fn normalize(value: f64) -> f64 {
    (value + 1.0) / 2.0
}

/// Sample a cell's noise at `scale` and normalize it to `[0, 1]`
///
/// Columns map to the x axis and rows to the y axis.
pub fn sample_cell(noise: &dyn NoiseSource, position: [usize; 2], scale: f64) -> f64 {
    let [row, col] = position;
    normalize(noise.sample(col as f64 / scale, row as f64 / scale))
}

// Fold both halves so seeds differing only in the high bits still diverge
const fn fold_seed(seed: u64) -> u32 {
    (seed ^ (seed >> 32)) as u32
}
