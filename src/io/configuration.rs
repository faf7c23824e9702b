//! Generation constants and runtime configuration defaults

use crate::algorithm::collapse::CollapseMode;
use crate::analysis::patterns::Category;
use crate::io::error::{Result, invalid_parameter};

// Spatial scales divide grid coordinates before sampling noise
/// Noise scale used by the banded base collapse
pub const BASE_NOISE_SCALE: f64 = 10.0;
/// Noise scale used by the decoration pass
pub const DECORATION_NOISE_SCALE: f64 = 5.0;

/// Default map width in cells
pub const DEFAULT_WIDTH: usize = 20;
/// Default map height in cells
pub const DEFAULT_HEIGHT: usize = 15;

/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

// Contradictions restart from scratch, so this bounds total work
/// Default number of generation attempts before giving up
pub const DEFAULT_MAX_ATTEMPTS: usize = 100;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

/// Normalized noise a grass cell must exceed to be decorated
pub const GRASS_DECORATION_THRESHOLD: f64 = 0.6;
/// Normalized noise an ice cell must exceed to be decorated
pub const ICE_DECORATION_THRESHOLD: f64 = 0.65;
/// Normalized noise a sand cell must exceed to be decorated
pub const SAND_DECORATION_THRESHOLD: f64 = 0.7;

/// Decoration tiles placed on grass
pub const GRASS_DECORATIONS: [u32; 2] = [128, 110];
/// Decoration tiles placed on ice
pub const ICE_DECORATIONS: [u32; 4] = [105, 106, 122, 123];
/// Decoration tiles placed on sand
pub const SAND_DECORATIONS: [u32; 2] = [132, 128];

/// Base tile index for sand in the terrain tilesheet
pub const SAND_TILE: u32 = 18;
/// Base tile index for grass in the terrain tilesheet
pub const GRASS_TILE: u32 = 23;
/// Base tile index for ice in the terrain tilesheet
pub const ICE_TILE: u32 = 86;

// Progress and output settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
/// Default edge length of one cell in PNG previews
pub const DEFAULT_CELL_SIZE: u32 = 8;

/// Grid size, collapse mode and restart bound for one generation call
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerationConfig {
    /// Map width in cells
    pub width: usize,
    /// Map height in cells
    pub height: usize,
    /// Collapse policy selection
    pub mode: CollapseMode,
    /// Attempts allowed before reporting failure
    pub max_attempts: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            mode: CollapseMode::Base,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl GenerationConfig {
    /// Default configuration with the given dimensions
    pub fn with_size(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Check dimensions and the attempt bound
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if a dimension is zero or above
    /// [`MAX_GRID_DIMENSION`], or if no attempts are allowed
    pub fn validate(&self) -> Result<()> {
        for (parameter, value) in [("width", self.width), ("height", self.height)] {
            if value == 0 {
                return Err(invalid_parameter(parameter, &value, &"must be at least 1"));
            }
            if value > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must not exceed {MAX_GRID_DIMENSION}"),
                ));
            }
        }
        if self.max_attempts == 0 {
            return Err(invalid_parameter(
                "max_attempts",
                &self.max_attempts,
                &"must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Tilesheet index a renderer draws for a base category
pub const fn base_tile_index(category: Category) -> Option<u32> {
    match category.label() {
        'S' => Some(SAND_TILE),
        'G' => Some(GRASS_TILE),
        'I' => Some(ICE_TILE),
        _ => None,
    }
}
