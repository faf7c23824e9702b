use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset holding the categories a cell could still resolve to
///
/// Bit `i` stands for the `i`-th category of the alphabet, so iteration order
/// is alphabet order. Provides O(1) membership testing and cheap intersection.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CategorySet {
    bits: BitVec,
}

impl CategorySet {
    /// Create a set with no categories present
    pub fn new(category_count: usize) -> Self {
        Self {
            bits: bitvec![0; category_count],
        }
    }

    /// Create a set containing the whole alphabet
    pub fn all(category_count: usize) -> Self {
        Self {
            bits: bitvec![1; category_count],
        }
    }

    /// Create a set holding exactly one category
    pub fn single(category_count: usize, index: usize) -> Self {
        let mut set = Self::new(category_count);
        set.insert(index);
        set
    }

    /// Size of the alphabet this set ranges over
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// Insert a category index, ignoring indices outside the alphabet
    pub fn insert(&mut self, index: usize) {
        if index < self.bits.len() {
            self.bits.set(index, true);
        }
    }

    /// Test category membership
    pub fn contains(&self, index: usize) -> bool {
        self.bits.get(index).as_deref() == Some(&true)
    }

    /// Intersect this set with another in-place
    pub fn intersect_with(&mut self, other: &Self) {
        self.bits &= &other.bits;
    }

    /// Create a new set containing the intersection
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.intersect_with(other);
        result
    }

    /// Test if no categories remain
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Number of categories in the set (the cell's entropy)
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// The only member, if the set holds exactly one category
    pub fn resolved(&self) -> Option<usize> {
        if self.count() == 1 {
            self.bits.first_one()
        } else {
            None
        }
    }

    /// Iterate member indices in alphabet order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Extract all member indices as a vector
    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }
}

impl fmt::Display for CategorySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CategorySet({} of {}: {:?})", self.count(), self.capacity(), self.to_vec())
    }
}
