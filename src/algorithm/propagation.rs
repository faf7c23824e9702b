//! Constraint propagation outward from resolved cells
//!
//! Propagation runs to a fixed point in a single call: narrowing a neighbor
//! down to one category turns it into a new source of constraints, which in
//! turn narrows its own neighbors, arbitrarily far across the grid.

use std::collections::HashSet;

use crate::algorithm::bitset::CategorySet;
use crate::analysis::rules::AdjacencyRules;
use crate::io::error::Result;
use crate::spatial::grid::{DomainGrid, Position};

/// Summary of one propagation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PropagationReport {
    /// Cells whose possibility set shrank
    pub narrowed: usize,
    /// Cells narrowed to nothing
    pub emptied: usize,
}

impl PropagationReport {
    /// Whether the pass left a contradiction behind
    pub const fn contradiction(&self) -> bool {
        self.emptied > 0
    }
}

/// Restrict neighbors of a resolved cell, cascading through the grid
///
/// Uses a depth-first stack seeded with `origin`. Each resolved cell is
/// propagated from at most once per pass. An unresolved neighbor is
/// intersected with the categories the resolved cell permits in that
/// direction; if it shrinks it is pushed so it can cascade once resolved.
/// Emptied cells are left in place for the caller's contradiction check.
///
/// # Errors
///
/// Returns `OutOfBounds` if `origin` lies outside the grid
pub fn propagate(
    origin: Position,
    grid: &mut DomainGrid,
    rules: &AdjacencyRules,
) -> Result<PropagationReport> {
    grid.domain(origin)?;

    let mut report = PropagationReport::default();
    let mut stack = vec![origin];
    let mut visited: HashSet<Position> = HashSet::new();

    while let Some(position) = stack.pop() {
        let Some(category) = grid.resolved_at(position) else {
            continue;
        };
        if !visited.insert(position) {
            continue;
        }

        let neighbors: Vec<_> = grid.neighbors(position).collect();
        for (direction, neighbor) in neighbors {
            let current = grid.domain(neighbor)?;
            if current.count() <= 1 {
                continue;
            }

            let narrowed = match rules.allowed(category, direction) {
                Some(allowed) => current.intersection(allowed),
                None => CategorySet::new(current.capacity()),
            };

            if narrowed.count() < current.count() {
                if narrowed.is_empty() {
                    report.emptied += 1;
                }
                report.narrowed += 1;
                grid.set_domain(neighbor, narrowed)?;
                stack.push(neighbor);
            }
        }
    }

    Ok(report)
}
