/// Possibility sets over the category alphabet
pub mod bitset;
/// Collapse policies fixing a cell to one category
pub mod collapse;
/// Noise-driven decoration overlay
pub mod decoration;
/// Solver driver with contradiction restarts
pub mod executor;
/// Constraint propagation from resolved cells
pub mod propagation;
/// Minimum-entropy cell selection
pub mod selection;
/// Host-facing regenerate and mode switching
pub mod session;
