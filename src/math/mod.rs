//! Noise and randomness capabilities injected into generation

/// Seeded continuous 2-D noise sources
pub mod noise;
/// Uniform random sources for tie-breaking and decoration choice
pub mod random;
