//! [`TerrainMap`]: the engine's own [`TerrainSurface`].

use strata_core::{BandThresholds, GridPos, TerrainBand, TerrainError, TerrainSurface};
use strata_noise::HeightField;

use crate::config::{ConfigError, TerrainConfig};

/// A row-major heightmap with cached range and band membership.
///
/// The range and band lists are recomputed on every successful
/// [`write_back`](TerrainSurface::write_back), so classification always
/// reflects the current heights.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainMap {
    width: u32,
    height: u32,
    heights: Vec<f32>,
    min: f32,
    max: f32,
    thresholds: BandThresholds,
    bands: [Vec<GridPos>; 4],
}

impl TerrainMap {
    /// Wrap an existing height buffer.
    ///
    /// # Errors
    ///
    /// [`ConfigError::EmptyTerrain`] for a zero dimension,
    /// [`ConfigError::InvalidThresholds`] for bad bands, and
    /// [`ConfigError::Graph`] when the buffer length or a height is
    /// unusable.
    pub fn from_heights(
        width: u32,
        height: u32,
        heights: Vec<f32>,
        thresholds: BandThresholds,
    ) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyTerrain { width, height });
        }
        thresholds
            .validate()
            .map_err(|reason| ConfigError::InvalidThresholds { reason })?;
        let expected = width as usize * height as usize;
        if heights.len() != expected {
            return Err(strata_core::GraphError::LengthMismatch {
                expected,
                got: heights.len(),
            }
            .into());
        }
        if let Some(index) = heights.iter().position(|h| !h.is_finite()) {
            return Err(strata_core::GraphError::NonFiniteHeight { index }.into());
        }
        let mut map = Self {
            width,
            height,
            heights,
            min: 0.0,
            max: 0.0,
            thresholds,
            bands: Default::default(),
        };
        map.reclassify();
        Ok(map)
    }

    /// Sample a fresh terrain from `config`.
    pub fn from_noise(config: &TerrainConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let field = HeightField::generate(config.width, config.height, &config.noise)?;
        Self::from_heights(
            config.width,
            config.height,
            field.into_heights(),
            config.thresholds,
        )
    }

    /// The band boundaries in use.
    pub fn thresholds(&self) -> BandThresholds {
        self.thresholds
    }

    /// Number of cells.
    pub fn cell_count(&self) -> usize {
        self.heights.len()
    }

    /// Height at `(x, z)`, or `None` off the board.
    pub fn get(&self, x: i32, z: i32) -> Option<f32> {
        let idx = GridPos::new(x, z).to_index(self.width, self.height)?;
        self.heights.get(idx).copied()
    }

    fn reclassify(&mut self) {
        let (min, max) = self
            .heights
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &h| {
                (lo.min(h), hi.max(h))
            });
        self.min = min;
        self.max = max;
        for cells in &mut self.bands {
            cells.clear();
        }
        for (i, &h) in self.heights.iter().enumerate() {
            let band = self.thresholds.classify(h, min, max);
            self.bands[band.index()].push(GridPos::from_index(i, self.width));
        }
    }
}

impl TerrainSurface for TerrainMap {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn min_height(&self) -> f32 {
        self.min
    }

    fn max_height(&self) -> f32 {
        self.max
    }

    fn heights(&self) -> &[f32] {
        &self.heights
    }

    fn classify(&self, height: f32) -> TerrainBand {
        self.thresholds.classify(height, self.min, self.max)
    }

    fn band_cells(&self, band: TerrainBand) -> &[GridPos] {
        &self.bands[band.index()]
    }

    fn write_back(&mut self, heights: &[f32]) -> Result<(), TerrainError> {
        if heights.len() != self.heights.len() {
            return Err(TerrainError::LengthMismatch {
                expected: self.heights.len(),
                got: heights.len(),
            });
        }
        if let Some(index) = heights.iter().position(|h| !h.is_finite()) {
            return Err(TerrainError::NonFiniteHeight { index });
        }
        self.heights.copy_from_slice(heights);
        self.reclassify();
        Ok(())
    }
}
