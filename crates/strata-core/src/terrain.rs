//! The [`TerrainSurface`] collaborator trait.
//!
//! The agent system never owns the terrain it sculpts. It reads the seed
//! heights and the band classification through this trait, and writes the
//! sculpted heights back through [`TerrainSurface::write_back`].

use crate::band::TerrainBand;
use crate::error::TerrainError;
use crate::id::GridPos;
use rand::{Rng, RngCore};

/// A heightmap-backed terrain surface.
///
/// Heights are stored row-major: the height of cell `(x, z)` is
/// `heights()[x + z * width()]`.
///
/// # Contract
///
/// - `heights().len() == width() * height()`.
/// - `min_height() <= max_height()` whenever the terrain is non-empty.
/// - `band_cells(b)` lists exactly the cells whose height classifies as `b`.
///
/// # Object safety
///
/// This trait is object-safe; agents see the terrain as `&dyn TerrainSurface`.
pub trait TerrainSurface {
    /// Number of cells along the `x` axis.
    fn width(&self) -> u32;

    /// Number of cells along the `z` axis.
    fn height(&self) -> u32;

    /// Lowest height on the terrain.
    fn min_height(&self) -> f32;

    /// Highest height on the terrain.
    fn max_height(&self) -> f32;

    /// Row-major height buffer.
    fn heights(&self) -> &[f32];

    /// Classify an arbitrary height against this terrain's range.
    fn classify(&self, height: f32) -> TerrainBand;

    /// Every cell currently classified as `band`, in row-major order.
    fn band_cells(&self, band: TerrainBand) -> &[GridPos];

    /// Replace the terrain heights with the sculpted result.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError`] if `heights` has the wrong length or holds a
    /// non-finite value. The terrain is left unmodified in that case.
    fn write_back(&mut self, heights: &[f32]) -> Result<(), TerrainError>;

    /// Band of the cell at `pos`, or `None` off the board.
    fn band_at(&self, pos: GridPos) -> Option<TerrainBand> {
        let idx = pos.to_index(self.width(), self.height())?;
        self.heights().get(idx).map(|&h| self.classify(h))
    }

    /// Whether the cell at `pos` lies in `band`. Off-board cells never do.
    fn is_band(&self, pos: GridPos, band: TerrainBand) -> bool {
        self.band_at(pos) == Some(band)
    }

    /// A uniformly random cell from `band`, or `None` if the band is empty.
    fn random_in_band(&self, band: TerrainBand, rng: &mut dyn RngCore) -> Option<GridPos> {
        let cells = self.band_cells(band);
        if cells.is_empty() {
            return None;
        }
        Some(cells[rng.random_range(0..cells.len())])
    }
}
