//! Collapse policies that fix a cell to a single category
//!
//! Two interchangeable strategies are provided:
//! - [`NoiseBanded`] samples a noise field and maps it onto ordered bands,
//!   producing smooth, spatially coherent regions
//! - [`ContextSensitive`] scores each remaining category by how many resolved
//!   neighbors agree with it
//!
//! Policies only ever pick from the cell's current possibility set.

use clap::ValueEnum;
use std::fmt;

use crate::algorithm::bitset::CategorySet;
use crate::analysis::patterns::{Category, GRASS, ICE, SAND};
use crate::analysis::rules::AdjacencyRules;
use crate::io::configuration::BASE_NOISE_SCALE;
use crate::io::error::Result;
use crate::math::noise::{NoiseSource, sample_cell};
use crate::spatial::grid::{DomainGrid, Position};

/// Strategy choosing which remaining category a cell collapses to
pub trait CollapsePolicy {
    /// Pick a category index from the cell's possibility set
    ///
    /// Returns `None` only when the possibility set is empty.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the position lies outside the grid
    fn choose(
        &self,
        position: Position,
        grid: &DomainGrid,
        rules: &AdjacencyRules,
        noise: &dyn NoiseSource,
    ) -> Result<Option<usize>>;
}

/// Collapse a cell using a policy
///
/// Already resolved cells are left untouched, as are contradicted cells.
///
/// # Errors
///
/// Returns `OutOfBounds` if the position lies outside the grid
pub fn collapse_cell(
    policy: &dyn CollapsePolicy,
    position: Position,
    grid: &mut DomainGrid,
    rules: &AdjacencyRules,
    noise: &dyn NoiseSource,
) -> Result<()> {
    if grid.domain(position)?.count() <= 1 {
        return Ok(());
    }

    if let Some(choice) = policy.choose(position, grid, rules, noise)? {
        let count = grid.category_count();
        grid.set_domain(position, CategorySet::single(count, choice))?;
    }
    Ok(())
}

/// Noise-biased banding over a fixed category order
///
/// The normalized noise value is split into equal-width bands, one per listed
/// category, lowest band first. When the banded category is no longer
/// possible, the remaining category whose band centre is nearest wins.
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseBanded {
    bands: Vec<Category>,
    scale: f64,
}

impl NoiseBanded {
    /// Create a banded policy from low-to-high categories and a spatial scale
    pub const fn new(bands: Vec<Category>, scale: f64) -> Self {
        Self { bands, scale }
    }

    /// Grass, ice, sand banding at the default scale
    pub fn terrain() -> Self {
        Self::new(vec![GRASS, ICE, SAND], BASE_NOISE_SCALE)
    }

    /// Band index for a normalized value
    pub fn band_for(&self, value: f64) -> Option<usize> {
        let count = self.bands.len();
        if count == 0 {
            return None;
        }
        let band = (value.clamp(0.0, 1.0) * count as f64).floor() as usize;
        Some(band.min(count - 1))
    }

    fn band_centre(&self, band: usize) -> f64 {
        (band as f64 + 0.5) / self.bands.len() as f64
    }

    /// Category chosen for a normalized value among the remaining ones
    pub fn pick(&self, value: f64, domain: &CategorySet, rules: &AdjacencyRules) -> Option<usize> {
        let alphabet = rules.alphabet();

        if let Some(index) = self
            .band_for(value)
            .and_then(|band| self.bands.get(band))
            .and_then(|&category| alphabet.index_of(category))
            .filter(|&index| domain.contains(index))
        {
            return Some(index);
        }

        let nearest = self
            .bands
            .iter()
            .enumerate()
            .filter_map(|(band, &category)| {
                alphabet
                    .index_of(category)
                    .filter(|&index| domain.contains(index))
                    .map(|index| ((self.band_centre(band) - value).abs(), index))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, index)| index);

        nearest.or_else(|| domain.iter().next())
    }
}

impl CollapsePolicy for NoiseBanded {
    fn choose(
        &self,
        position: Position,
        grid: &DomainGrid,
        rules: &AdjacencyRules,
        noise: &dyn NoiseSource,
    ) -> Result<Option<usize>> {
        let domain = grid.domain(position)?;
        let value = sample_cell(noise, position, self.scale);
        Ok(self.pick(value, domain, rules))
    }
}

/// Neighbor-compatibility scoring
///
/// A category scores one point per resolved compass neighbor whose category
/// it permits in that direction. The highest score wins; ties go to the
/// earliest category in alphabet order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContextSensitive;

impl ContextSensitive {
    /// Compatibility score of a category at a position
    pub fn score(position: Position, category: usize, grid: &DomainGrid, rules: &AdjacencyRules) -> usize {
        grid.neighbors(position)
            .filter(|&(direction, neighbor)| {
                grid.resolved_at(neighbor)
                    .is_some_and(|resolved| rules.permits(category, direction, resolved))
            })
            .count()
    }
}

impl CollapsePolicy for ContextSensitive {
    fn choose(
        &self,
        position: Position,
        grid: &DomainGrid,
        rules: &AdjacencyRules,
        _noise: &dyn NoiseSource,
    ) -> Result<Option<usize>> {
        let domain = grid.domain(position)?;
        let mut best: Option<(usize, usize)> = None;

        for category in domain.iter() {
            let score = Self::score(position, category, grid, rules);
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((category, score));
            }
        }

        Ok(best.map(|(category, _)| category))
    }
}

/// Which collapse policy generation uses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum)]
pub enum CollapseMode {
    /// Noise-banded terrain regions
    #[default]
    Base,
    /// Neighbor-compatibility scoring
    #[value(name = "context")]
    ContextSensitive,
}

impl CollapseMode {
    /// Instantiate the policy for this mode with default parameters
    pub fn policy(self) -> Box<dyn CollapsePolicy> {
        match self {
            Self::Base => Box::new(NoiseBanded::terrain()),
            Self::ContextSensitive => Box::new(ContextSensitive),
        }
    }

    /// The other mode
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Base => Self::ContextSensitive,
            Self::ContextSensitive => Self::Base,
        }
    }
}

impl fmt::Display for CollapseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base => write!(f, "base"),
            Self::ContextSensitive => write!(f, "context-sensitive"),
        }
    }
}
