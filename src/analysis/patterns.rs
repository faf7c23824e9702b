//! Example patterns and the category alphabet they define

use crate::io::error::{Result, invalid_pattern};
use ndarray::Array2;
use std::collections::BTreeSet;
use std::fmt;

/// Opaque tile category label
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Category(char);

impl Category {
    /// Create a category from its label character
    pub const fn new(label: char) -> Self {
        Self(label)
    }

    /// Label character of this category
    pub const fn label(self) -> char {
        self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Grass terrain
pub const GRASS: Category = Category::new('G');
/// Sand terrain
pub const SAND: Category = Category::new('S');
/// Ice terrain
pub const ICE: Category = Category::new('I');

const G: Category = GRASS;
const S: Category = SAND;
const I: Category = ICE;

// Row arity is fixed by the array type, so the literal is always rectangular
const TERRAIN: [[Category; 6]; 7] = [
    [G, G, G, G, G, G],
    [G, S, S, S, S, G],
    [G, S, I, I, S, G],
    [G, S, I, I, S, G],
    [G, S, S, S, S, G],
    [S, S, S, G, G, G],
    [I, I, S, G, G, G],
];

/// Ordered set of categories a pattern uses
///
/// Categories are kept in label order so that the full possibility set,
/// and every tie-break that walks it, is reproducible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryAlphabet {
    categories: Vec<Category>,
}

impl CategoryAlphabet {
    /// Build an alphabet from any collection of categories, deduplicating
    pub fn new(categories: impl IntoIterator<Item = Category>) -> Self {
        let unique: BTreeSet<Category> = categories.into_iter().collect();
        Self {
            categories: unique.into_iter().collect(),
        }
    }

    /// Number of categories
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether the alphabet has no categories
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Bit index of a category
    pub fn index_of(&self, category: Category) -> Option<usize> {
        self.categories.binary_search(&category).ok()
    }

    /// Category at a bit index
    pub fn get(&self, index: usize) -> Option<Category> {
        self.categories.get(index).copied()
    }

    /// Categories in alphabet order
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }
}

/// Immutable, validated rectangular grid of example categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamplePattern {
    cells: Array2<Category>,
}

impl ExamplePattern {
    /// Build a pattern from rows of categories
    ///
    /// # Errors
    ///
    /// Returns `InvalidPattern` if the pattern has no rows, a row is empty,
    /// or rows differ in length
    pub fn from_rows(rows: &[Vec<Category>]) -> Result<Self> {
        let first = rows
            .first()
            .ok_or_else(|| invalid_pattern(&"pattern has no rows"))?;
        let width = first.len();
        if width == 0 {
            return Err(invalid_pattern(&"pattern rows are empty"));
        }

        for (index, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(invalid_pattern(&format!(
                    "row {index} has {} cells, expected {width}",
                    row.len()
                )));
            }
        }

        let flat: Vec<Category> = rows.iter().flatten().copied().collect();
        let cells = Array2::from_shape_vec((rows.len(), width), flat)
            .map_err(|e| invalid_pattern(&e))?;

        Ok(Self { cells })
    }

    /// Parse a pattern from text, one row per line and one label per character
    ///
    /// Whitespace inside a line and blank lines are ignored.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPattern` under the same conditions as [`Self::from_rows`]
    pub fn parse(text: &str) -> Result<Self> {
        let rows: Vec<Vec<Category>> = text
            .lines()
            .map(|line| {
                line.chars()
                    .filter(|c| !c.is_whitespace())
                    .map(Category::new)
                    .collect::<Vec<_>>()
            })
            .filter(|row| !row.is_empty())
            .collect();

        Self::from_rows(&rows)
    }

    /// The grass, sand and ice terrain pattern the generator ships with
    pub fn terrain() -> Self {
        Self {
            cells: Array2::from(TERRAIN.to_vec()),
        }
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cells.ncols()
    }

    /// Category at a row and column
    pub fn get(&self, position: [usize; 2]) -> Option<Category> {
        self.cells.get(position).copied()
    }

    /// Underlying category array
    pub const fn cells(&self) -> &Array2<Category> {
        &self.cells
    }

    /// Alphabet of every category present in the pattern
    pub fn alphabet(&self) -> CategoryAlphabet {
        CategoryAlphabet::new(self.cells.iter().copied())
    }
}

impl fmt::Display for ExamplePattern {
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
