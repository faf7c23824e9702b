//! Example pattern analysis: categories, adjacency rules and distribution statistics

/// Categories, alphabets and example patterns
pub mod patterns;
/// Adjacency rule and frequency extraction
pub mod rules;
/// Category distribution of generated grids
pub mod statistics;
