//! Host-facing generation session with regenerate and mode switching

use tracing::info;

use crate::algorithm::collapse::CollapseMode;
use crate::algorithm::decoration::{DecorationConfig, DecorationLayer, decorate_with};
use crate::algorithm::executor::{StepReport, generate_from_rules};
use crate::analysis::patterns::ExamplePattern;
use crate::analysis::rules::{AdjacencyRules, Frequencies, extract_rules};
use crate::io::configuration::GenerationConfig;
use crate::io::error::Result;
use crate::math::noise::PerlinNoise;
use crate::math::random::{RandomSource, SeededRandom};
use crate::spatial::grid::ResolvedGrid;

/// A generated map ready for a renderer
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedMap {
    /// Seed the map was generated from
    pub seed: u64,
    /// Base categories
    pub grid: ResolvedGrid,
    /// Decorations overlaid on the base categories
    pub decorations: DecorationLayer,
    /// Attempts used to reach a collapsed grid
    pub attempts: usize,
}

/// Regenerable map state owned by a host
///
/// Rules are extracted once; every [`MapSession::regenerate`] draws a fresh
/// seed from the session's own seed stream, so a session started from the
/// same seed replays the same sequence of maps.
pub struct MapSession {
    pattern: ExamplePattern,
    rules: AdjacencyRules,
    frequencies: Frequencies,
    config: GenerationConfig,
    decorations: DecorationConfig,
    decorate: bool,
    seeds: SeededRandom,
    current: Option<GeneratedMap>,
}

impl MapSession {
    /// Create a session for a pattern
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the configuration is invalid
    pub fn new(pattern: ExamplePattern, config: GenerationConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        let (rules, frequencies) = extract_rules(&pattern);
        Ok(Self {
            pattern,
            rules,
            frequencies,
            config,
            decorations: DecorationConfig::terrain(),
            decorate: true,
            seeds: SeededRandom::new(seed),
            current: None,
        })
    }

    /// Replace the decoration rules
    #[must_use]
    pub fn with_decorations(mut self, decorations: DecorationConfig) -> Self {
        self.decorations = decorations;
        self
    }

    /// Enable or disable the decoration pass
    #[must_use]
    pub fn with_decorating(mut self, decorate: bool) -> Self {
        self.decorate = decorate;
        self
    }

    /// Generate a new map with a fresh seed
    ///
    /// # Errors
    ///
    /// Returns `GenerationFailed` if every attempt contradicted
    pub fn regenerate(&mut self) -> Result<&GeneratedMap> {
        self.regenerate_observed(&mut |_| {})
    }

    /// Generate a new map, reporting every solver step to `observer`
    ///
    /// # Errors
    ///
    /// Returns `GenerationFailed` if every attempt contradicted
    pub fn regenerate_observed(
        &mut self,
        observer: &mut dyn FnMut(&StepReport),
    ) -> Result<&GeneratedMap> {
        let seed = self.seeds.next_seed();
        let mut noise = PerlinNoise::from_generation_seed(seed);
        let mut random = SeededRandom::new(seed);
        let policy = self.config.mode.policy();

        let generation = generate_from_rules(
            &self.rules,
            &self.config,
            policy.as_ref(),
            &mut noise,
            &mut random,
            observer,
        )?;

        let decorations = if self.decorate {
            decorate_with(&generation.grid, &self.decorations, &noise, &mut random)
        } else {
            DecorationLayer::default()
        };

        info!(
            seed,
            attempts = generation.attempts,
            decorations = decorations.len(),
            "map regenerated"
        );

        Ok(self.current.insert(GeneratedMap {
            seed,
            grid: generation.grid,
            decorations,
            attempts: generation.attempts,
        }))
    }

    /// Switch the collapse mode used by later regenerations
    pub const fn set_mode(&mut self, mode: CollapseMode) {
        self.config.mode = mode;
    }

    /// Flip between base and context-sensitive collapse, returning the new mode
    pub const fn toggle_mode(&mut self) -> CollapseMode {
        self.config.mode = self.config.mode.toggled();
        self.config.mode
    }

    /// Collapse mode in effect
    pub const fn mode(&self) -> CollapseMode {
        self.config.mode
    }

    /// Most recently generated map
    pub const fn current(&self) -> Option<&GeneratedMap> {
        self.current.as_ref()
    }

    /// Example pattern the rules came from
    pub const fn pattern(&self) -> &ExamplePattern {
        &self.pattern
    }

    /// Extracted adjacency rules
    pub const fn rules(&self) -> &AdjacencyRules {
        &self.rules
    }

    /// Category counts of the example pattern
    pub const fn frequencies(&self) -> &Frequencies {
        &self.frequencies
    }

    /// Generation configuration
    pub const fn config(&self) -> &GenerationConfig {
        &self.config
    }
}
