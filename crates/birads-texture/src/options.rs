//! Texture extraction options

use crate::{NUM_DISTANCES, TextureError, TextureResult};

/// Default number of gray levels after quantization
pub const DEFAULT_LEVELS: u32 = 32;

/// Default co-occurrence distances, in pixels
pub const DEFAULT_DISTANCES: [u32; NUM_DISTANCES] = [1, 2, 4, 8, 16];

/// Options for texture feature extraction
///
/// The feature layout always uses five distances and the four canonical
/// angles (0, 45, 90 and 135 degrees); only the values are configurable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureOptions {
    /// Number of quantized gray levels (default: 32)
    /// Must be a power of two between 2 and 256
    pub levels: u32,

    /// Pixel distances of the five co-occurrence groups (default: 1, 2, 4, 8, 16)
    pub distances: [u32; NUM_DISTANCES],
}

impl Default for TextureOptions {
    fn default() -> Self {
        Self {
            levels: DEFAULT_LEVELS,
            distances: DEFAULT_DISTANCES,
        }
    }
}

impl TextureOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of gray levels
    pub fn with_levels(mut self, levels: u32) -> Self {
        self.levels = levels;
        self
    }

    /// Set the co-occurrence distances
    pub fn with_distances(mut self, distances: [u32; NUM_DISTANCES]) -> Self {
        self.distances = distances;
        self
    }

    /// Intensity step per quantized level
    pub fn level_step(&self) -> u32 {
        256 / self.levels
    }

    /// Validate options
    pub fn validate(&self) -> TextureResult<()> {
        if !(2..=256).contains(&self.levels) || !self.levels.is_power_of_two() {
            return Err(TextureError::InvalidParameter(format!(
                "levels must be a power of two in 2..=256, got {}",
                self.levels
            )));
        }
        if self.distances.contains(&0) {
            return Err(TextureError::InvalidParameter(
                "distances must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
