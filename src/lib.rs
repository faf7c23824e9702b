//! Wave function collapse terrain generation from a small example pattern
//!
//! The system derives adjacency rules between tile categories from an example
//! grid, fills an empty grid by minimum-entropy selection, collapse and
//! constraint propagation, restarting on contradiction, and overlays a
//! noise-driven decoration pass on the result.

#![forbid(unsafe_code)]

/// Core algorithm implementation including selection, collapse, propagation and decoration
pub mod algorithm;
/// Example pattern analysis and adjacency rule extraction
pub mod analysis;
/// Input/output operations, configuration and error handling
pub mod io;
/// Noise and randomness sources injected into generation
pub mod math;
/// Spatial grid management and neighbor iteration
pub mod spatial;

pub use algorithm::collapse::CollapseMode;
pub use algorithm::decoration::{DecorationConfig, DecorationLayer, decorate, decorate_with};
pub use algorithm::executor::{generate, generate_with};
pub use algorithm::session::{GeneratedMap, MapSession};
pub use analysis::patterns::{Category, ExamplePattern};
pub use io::configuration::GenerationConfig;
pub use io::error::{AlgorithmError, Result};
pub use spatial::grid::ResolvedGrid;
