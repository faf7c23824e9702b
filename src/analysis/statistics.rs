//! Category distribution of generated grids against the example pattern

use std::collections::BTreeMap;
use std::fmt;

use crate::analysis::patterns::Category;
use crate::analysis::rules::Frequencies;
use crate::spatial::grid::ResolvedGrid;

/// Share of one category in the example and in a generated grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryShare {
    /// The category
    pub category: Category,
    /// Fraction of example cells
    pub example_ratio: f64,
    /// Fraction of generated cells
    pub generated_ratio: f64,
}

impl CategoryShare {
    /// Generated minus example ratio
    pub fn deviation(&self) -> f64 {
        self.generated_ratio - self.example_ratio
    }
}

/// Per-category comparison of a generated grid with its example
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionReport {
    shares: Vec<CategoryShare>,
}

impl DistributionReport {
    /// Compare a generated grid with the example frequencies
    ///
    /// Categories appearing in either side are listed, in label order.
    pub fn new(frequencies: &Frequencies, grid: &ResolvedGrid) -> Self {
        let mut generated: BTreeMap<Category, usize> = BTreeMap::new();
        let mut total = 0usize;
        for (_, category) in grid.cells() {
            *generated.entry(category).or_insert(0) += 1;
            total += 1;
        }

        let mut categories: Vec<Category> = frequencies.iter().map(|(c, _)| c).collect();
        categories.extend(generated.keys().copied());
        categories.sort_unstable();
        categories.dedup();

        let shares = categories
            .into_iter()
            .map(|category| CategoryShare {
                category,
                example_ratio: frequencies.ratio(category),
                generated_ratio: if total == 0 {
                    0.0
                } else {
                    generated.get(&category).copied().unwrap_or(0) as f64 / total as f64
                },
            })
            .collect();

        Self { shares }
    }

    /// Shares in label order
    pub fn shares(&self) -> &[CategoryShare] {
        &self.shares
    }

    /// Share for one category
    pub fn share(&self, category: Category) -> Option<&CategoryShare> {
        self.shares.iter().find(|share| share.category == category)
    }

    /// Sum of absolute deviations over all categories
    pub fn total_deviation(&self) -> f64 {
        self.shares.iter().map(|share| share.deviation().abs()).sum()
    }
}

impl fmt::Display for DistributionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "category  example  generated  deviation")?;
        for share in &self.shares {
            writeln!(
                f,
                "{:<8}  {:>7.3}  {:>9.3}  {:>+9.3}",
                share.category.to_string(),
                share.example_ratio,
                share.generated_ratio,
                share.deviation()
            )?;
        }
        Ok(())
    }
}
