//! Adjacency rule extraction from an example pattern
//!
//! Every pair of orthogonally adjacent example cells becomes a permitted
//! neighbor entry for both cells, so extracted rules are always symmetric:
//! if `b` may sit to the right of `a`, then `a` may sit to the left of `b`.

use std::collections::BTreeMap;

use crate::algorithm::bitset::CategorySet;
use crate::analysis::patterns::{Category, CategoryAlphabet, ExamplePattern};
use crate::spatial::direction::{Direction, neighbors};

/// Per-category, per-direction sets of permitted neighbor categories
///
/// A direction in which a category was never observed next to anything holds
/// an empty set and permits nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyRules {
    alphabet: CategoryAlphabet,
    permitted: Vec<[CategorySet; 4]>,
}

impl AdjacencyRules {
    /// Create rules over an alphabet with every direction empty
    pub fn empty(alphabet: CategoryAlphabet) -> Self {
        let count = alphabet.len();
        let blank: [CategorySet; 4] = std::array::from_fn(|_| CategorySet::new(count));
        Self {
            permitted: vec![blank; count],
            alphabet,
        }
    }

    /// Record that `neighbor` may appear in `direction` from `category`
    ///
    /// Categories outside the alphabet are ignored.
    pub fn permit(&mut self, category: Category, direction: Direction, neighbor: Category) {
        let (Some(from), Some(to)) = (
            self.alphabet.index_of(category),
            self.alphabet.index_of(neighbor),
        ) else {
            return;
        };
        if let Some(set) = self
            .permitted
            .get_mut(from)
            .and_then(|slots| slots.get_mut(direction.index()))
        {
            set.insert(to);
        }
    }

    /// Permitted neighbor set by category index
    ///
    /// Unknown indices yield `None`, which callers treat as nothing permitted.
    pub fn allowed(&self, category_index: usize, direction: Direction) -> Option<&CategorySet> {
        self.permitted
            .get(category_index)
            .and_then(|slots| slots.get(direction.index()))
    }

    /// Permitted neighbor categories for a category in a direction
    pub fn allowed_categories(&self, category: Category, direction: Direction) -> Vec<Category> {
        self.alphabet
            .index_of(category)
            .and_then(|index| self.allowed(index, direction))
            .map(|set| set.iter().filter_map(|i| self.alphabet.get(i)).collect())
            .unwrap_or_default()
    }

    /// Whether `neighbor` may appear in `direction` from `category`
    pub fn permits(&self, category_index: usize, direction: Direction, neighbor_index: usize) -> bool {
        self.allowed(category_index, direction)
            .is_some_and(|set| set.contains(neighbor_index))
    }

    /// Alphabet these rules range over
    pub const fn alphabet(&self) -> &CategoryAlphabet {
        &self.alphabet
    }
}

/// Number of occurrences of each category in the example
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frequencies {
    counts: BTreeMap<Category, usize>,
}

impl Frequencies {
    /// Occurrences of a category (0 if absent)
    pub fn count(&self, category: Category) -> usize {
        self.counts.get(&category).copied().unwrap_or(0)
    }

    /// Total number of counted cells
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Fraction of counted cells holding a category
    pub fn ratio(&self, category: Category) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.count(category) as f64 / total as f64
        }
    }

    /// Iterate (category, count) in label order
    pub fn iter(&self) -> impl Iterator<Item = (Category, usize)> + '_ {
        self.counts.iter().map(|(&category, &count)| (category, count))
    }

    fn record(&mut self, category: Category) {
        *self.counts.entry(category).or_insert(0) += 1;
    }
}

/// Derive adjacency rules and frequencies from an example pattern
///
/// Set semantics deduplicate repeated observations. A pattern made of a
/// single category yields self-only rules.
pub fn extract_rules(pattern: &ExamplePattern) -> (AdjacencyRules, Frequencies) {
    let mut rules = AdjacencyRules::empty(pattern.alphabet());
    let mut frequencies = Frequencies::default();
    let (rows, cols) = (pattern.rows(), pattern.cols());

    for ((row, col), &category) in pattern.cells().indexed_iter() {
        frequencies.record(category);

        for (direction, neighbor) in neighbors([row, col], rows, cols) {
            if let Some(neighbor_category) = pattern.get(neighbor) {
                rules.permit(category, direction, neighbor_category);
            }
        }
    }

    (rules, frequencies)
}
