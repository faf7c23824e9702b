//! Noise-thresholded decoration overlay on top of a resolved grid

use std::collections::BTreeMap;

use crate::analysis::patterns::{Category, GRASS, ICE, SAND};
use crate::io::configuration::{
    DECORATION_NOISE_SCALE, GRASS_DECORATIONS, GRASS_DECORATION_THRESHOLD, ICE_DECORATIONS,
    ICE_DECORATION_THRESHOLD, SAND_DECORATIONS, SAND_DECORATION_THRESHOLD,
};
use crate::io::error::{Result, invalid_parameter};
use crate::math::noise::{NoiseSource, PerlinNoise, sample_cell};
use crate::math::random::{RandomSource, SeededRandom, pick};
use crate::spatial::grid::{Position, ResolvedGrid};

/// Identifier of a decoration sub-tile, as understood by the host renderer
pub type DecorationId = u32;

/// Decoration settings for one base category
#[derive(Debug, Clone, PartialEq)]
pub struct DecorationRule {
    /// Normalized noise must be strictly above this to decorate
    pub threshold: f64,
    /// Candidate decorations, picked uniformly
    pub decorations: Vec<DecorationId>,
}

/// Per-category decoration rules and the noise scale they sample at
#[derive(Debug, Clone, PartialEq)]
pub struct DecorationConfig {
    rules: BTreeMap<Category, DecorationRule>,
    scale: f64,
}

impl Default for DecorationConfig {
    fn default() -> Self {
        Self::terrain()
    }
}

impl DecorationConfig {
    /// Configuration with no decorated categories
    pub const fn new(scale: f64) -> Self {
        Self {
            rules: BTreeMap::new(),
            scale,
        }
    }

    /// Trees on grass, crystals on ice and shrubs on sand
    pub fn terrain() -> Self {
        let mut config = Self::new(DECORATION_NOISE_SCALE);
        config.rules.insert(
            GRASS,
            DecorationRule {
                threshold: GRASS_DECORATION_THRESHOLD,
                decorations: GRASS_DECORATIONS.to_vec(),
            },
        );
        config.rules.insert(
            ICE,
            DecorationRule {
                threshold: ICE_DECORATION_THRESHOLD,
                decorations: ICE_DECORATIONS.to_vec(),
            },
        );
        config.rules.insert(
            SAND,
            DecorationRule {
                threshold: SAND_DECORATION_THRESHOLD,
                decorations: SAND_DECORATIONS.to_vec(),
            },
        );
        config
    }

    /// Add or replace the rule for a category
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the threshold lies outside `[0, 1]`
    pub fn with_rule(
        mut self,
        category: Category,
        threshold: f64,
        decorations: Vec<DecorationId>,
    ) -> Result<Self> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(invalid_parameter(
                "threshold",
                &threshold,
                &"must lie within [0, 1]",
            ));
        }
        self.rules.insert(
            category,
            DecorationRule {
                threshold,
                decorations,
            },
        );
        Ok(self)
    }

    /// Rule for a category, if it is decorated at all
    pub fn rule(&self, category: Category) -> Option<&DecorationRule> {
        self.rules.get(&category)
    }

    /// Noise scale for decoration sampling
    pub const fn scale(&self) -> f64 {
        self.scale
    }
}

/// Sparse decoration placements keyed by position
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecorationLayer {
    placements: BTreeMap<Position, DecorationId>,
}

impl DecorationLayer {
    /// Decoration at a position, if any
    pub fn get(&self, position: Position) -> Option<DecorationId> {
        self.placements.get(&position).copied()
    }

    /// Number of decorated cells
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Whether nothing was decorated
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Iterate placements in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Position, DecorationId)> + '_ {
        self.placements.iter().map(|(&position, &id)| (position, id))
    }
}

/// Place decorations over a resolved grid with seeded noise and randomness
///
/// Uses the noise field [`crate::algorithm::executor::generate`] starts from
/// for `seed`, sampled at the decoration scale.
pub fn decorate(grid: &ResolvedGrid, config: &DecorationConfig, seed: u64) -> DecorationLayer {
    let noise = PerlinNoise::from_generation_seed(seed);
    let mut random = SeededRandom::new(seed);
    decorate_with(grid, config, &noise, &mut random)
}

/// Place decorations over a resolved grid with injected noise and randomness
///
/// A cell is decorated when its normalized noise is strictly greater than its
/// category's threshold. Categories without a rule, or with no candidate
/// decorations, are never decorated. The grid itself is not modified.
pub fn decorate_with(
    grid: &ResolvedGrid,
    config: &DecorationConfig,
    noise: &dyn NoiseSource,
    random: &mut dyn RandomSource,
) -> DecorationLayer {
    let mut layer = DecorationLayer::default();

    for (position, category) in grid.cells() {
        let Some(rule) = config.rule(category) else {
            continue;
        };
        let value = sample_cell(noise, position, config.scale);
        if value > rule.threshold
            && let Some(&decoration) = pick(random, &rule.decorations)
        {
            layer.placements.insert(position, decoration);
        }
    }

    layer
}
