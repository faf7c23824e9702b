//! Minimum-entropy cell selection

use crate::math::random::RandomSource;
use crate::spatial::grid::{DomainGrid, Position};

/// Unresolved cells sharing the globally smallest possibility set
///
/// Resolved cells (one category) and contradicted cells (none) are never
/// candidates. Candidates are listed in row-major order.
pub fn lowest_entropy_candidates(grid: &DomainGrid) -> Vec<Position> {
    let mut min_entropy = usize::MAX;
    let mut candidates = Vec::new();

    for (position, domain) in grid.cells() {
        let entropy = domain.count();
        if entropy <= 1 {
            continue;
        }
        if entropy < min_entropy {
            min_entropy = entropy;
            candidates.clear();
            candidates.push(position);
        } else if entropy == min_entropy {
            candidates.push(position);
        }
    }

    candidates
}

/// Pick the next cell to collapse, uniformly among the lowest-entropy ties
///
/// Returns `None` when no unresolved cell remains.
pub fn select_lowest_entropy(grid: &DomainGrid, random: &mut dyn RandomSource) -> Option<Position> {
    let candidates = lowest_entropy_candidates(grid);
    if candidates.is_empty() {
        return None;
    }
    let index = random.choose_index(candidates.len());
    candidates
        .get(index)
        .or_else(|| candidates.last())
        .copied()
}
