//! Spatial data structures for the solver
//!
//! This module contains spatial-related functionality including:
//! - Compass directions and neighbor iteration
//! - Domain grid state and its resolved form

/// Compass directions between adjacent cells
pub mod direction;
/// Domain grid and resolved grid
pub mod grid;

pub use grid::{DomainGrid, Position, ResolvedGrid};
