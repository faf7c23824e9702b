//! Solver state and its resolved form
//!
//! The domain grid keeps one possibility set per cell and is mutated in place
//! by collapse and propagation. Once every set holds a single category the
//! grid converts into a read-only resolved grid.

use ndarray::Array2;
use std::fmt;

use crate::algorithm::bitset::CategorySet;
use crate::analysis::patterns::{Category, CategoryAlphabet};
use crate::io::error::{Result, out_of_bounds};
use crate::spatial::direction::{Direction, neighbors};

/// Grid coordinate as (row, col)
pub type Position = [usize; 2];

/// Per-cell possibility sets for one generation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainGrid {
    domains: Array2<CategorySet>,
    category_count: usize,
}

impl DomainGrid {
    /// Create a grid where every cell may still be any category
    pub fn new(rows: usize, cols: usize, category_count: usize) -> Self {
        Self {
            domains: Array2::from_elem((rows, cols), CategorySet::all(category_count)),
            category_count,
        }
    }

    /// Get the number of rows in the grid
    pub fn rows(&self) -> usize {
        self.domains.nrows()
    }

    /// Get the number of columns in the grid
    pub fn cols(&self) -> usize {
        self.domains.ncols()
    }

    /// Grid dimensions (rows, cols)
    pub fn dimensions(&self) -> (usize, usize) {
        self.domains.dim()
    }

    /// Size of the category alphabet
    pub const fn category_count(&self) -> usize {
        self.category_count
    }

    /// Possibility set at a position
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the position lies outside the grid
    pub fn domain(&self, position: Position) -> Result<&CategorySet> {
        let dimensions = self.dimensions();
        self.domains
            .get(position)
            .ok_or_else(|| out_of_bounds(position, dimensions))
    }

    /// Replace the possibility set at a position
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the position lies outside the grid
    pub fn set_domain(&mut self, position: Position, domain: CategorySet) -> Result<()> {
        let dimensions = self.dimensions();
        let slot = self
            .domains
            .get_mut(position)
            .ok_or_else(|| out_of_bounds(position, dimensions))?;
        *slot = domain;
        Ok(())
    }

    /// Number of categories still possible at a position (0 when out of bounds)
    pub fn entropy(&self, position: Position) -> usize {
        self.domains.get(position).map_or(0, CategorySet::count)
    }

    /// Resolved category index at a position, if the cell is resolved
    pub fn resolved_at(&self, position: Position) -> Option<usize> {
        self.domains.get(position).and_then(CategorySet::resolved)
    }

    /// In-bounds compass neighbors of a position
    pub fn neighbors(&self, position: Position) -> impl Iterator<Item = (Direction, Position)> {
        neighbors(position, self.rows(), self.cols())
    }

    /// Iterate all cells with their positions in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (Position, &CategorySet)> {
        self.domains
            .indexed_iter()
            .map(|((row, col), domain)| ([row, col], domain))
    }

    /// Whether any cell has no remaining category
    pub fn has_contradiction(&self) -> bool {
        self.domains.iter().any(CategorySet::is_empty)
    }

    /// Whether every cell holds exactly one category
    pub fn is_fully_collapsed(&self) -> bool {
        self.domains.iter().all(|domain| domain.count() == 1)
    }

    /// Number of resolved cells
    pub fn resolved_count(&self) -> usize {
        self.domains.iter().filter(|domain| domain.count() == 1).count()
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.domains.len()
    }

    /// Whether the grid has no cells
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// Convert a fully collapsed grid into category labels
    ///
    /// Returns `None` while any cell is unresolved or in contradiction.
    pub fn to_resolved(&self, alphabet: &CategoryAlphabet) -> Option<ResolvedGrid> {
        let mut categories = Vec::with_capacity(self.len());
        for domain in &self.domains {
            categories.push(alphabet.get(domain.resolved()?)?);
        }
        Array2::from_shape_vec(self.dimensions(), categories)
            .ok()
            .map(ResolvedGrid::new)
    }
}

/// Fully collapsed grid with one category per cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedGrid {
    cells: Array2<Category>,
}

impl ResolvedGrid {
    /// Wrap an array of categories
    pub const fn new(cells: Array2<Category>) -> Self {
        Self { cells }
    }

    /// Get the number of rows in the grid
    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    /// Get the number of columns in the grid
    pub fn cols(&self) -> usize {
        self.cells.ncols()
    }

    /// Category at a position
    pub fn get(&self, position: Position) -> Option<Category> {
        self.cells.get(position).copied()
    }

    /// Iterate all cells with their positions in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (Position, Category)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), &category)| ([row, col], category))
    }

    /// In-bounds compass neighbors of a position
    pub fn neighbors(&self, position: Position) -> impl Iterator<Item = (Direction, Position)> {
        neighbors(position, self.rows(), self.cols())
    }
}

impl fmt::Display for ResolvedGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.rows() {
            for category in row {
                write!(f, "{category}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
