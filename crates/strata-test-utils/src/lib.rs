//! Test utilities and mock types for Strata development.
//!
//! Provides height-field fixtures, a [`MockTerrain`] implementation of
//! [`TerrainSurface`], graph and RNG shorthands, and scripted agents in
//! [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use strata_core::{BandThresholds, GridPos, TerrainBand, TerrainError, TerrainSurface};
use strata_graph::{Connectivity, Graph};

// ── Height fields ───────────────────────────────────────────

/// `w * h` cells at height `level`.
pub fn flat_heights(w: u32, h: u32, level: f32) -> Vec<f32> {
    vec![level; (w * h) as usize]
}

/// Height rises by `slope` per cell along `x`.
pub fn ramp_heights(w: u32, h: u32, slope: f32) -> Vec<f32> {
    (0..h)
        .flat_map(|_| (0..w).map(move |x| x as f32 * slope))
        .collect()
}

/// A cone peaking at `peak` in the centre and falling linearly to 0 at the
/// farthest corner.
pub fn cone_heights(w: u32, h: u32, peak: f32) -> Vec<f32> {
    let (cx, cz) = ((w as f32 - 1.0) * 0.5, (h as f32 - 1.0) * 0.5);
    let reach = (cx * cx + cz * cz).sqrt().max(f32::EPSILON);
    let mut out = Vec::with_capacity((w * h) as usize);
    for z in 0..h {
        for x in 0..w {
            let d = ((x as f32 - cx).powi(2) + (z as f32 - cz).powi(2)).sqrt();
            out.push(peak * (1.0 - d / reach));
        }
    }
    out
}

/// Deterministic pseudo-random bumps in `[0, amplitude)`.
pub fn bumpy_heights(w: u32, h: u32, amplitude: f32, seed: u64) -> Vec<f32> {
    use rand::Rng;
    let mut rng = test_rng(seed);
    (0..w * h)
        .map(|_| rng.random_range(0.0..amplitude))
        .collect()
}

// ── Graph and RNG shorthands ────────────────────────────────

/// An 8-connected graph over `heights`.
///
/// # Panics
///
/// Panics if `heights.len() != w * h`.
pub fn graph_from_heights(w: u32, h: u32, heights: &[f32]) -> Graph {
    let mut g = Graph::new(w, h, Connectivity::Eight).unwrap();
    g.set_heights(heights).unwrap();
    g
}

/// A flat 8-connected graph.
pub fn flat_graph(w: u32, h: u32) -> Graph {
    let mut g = Graph::new(w, h, Connectivity::Eight).unwrap();
    g.generate();
    g
}

/// A seeded ChaCha8 RNG.
pub fn test_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

// ── MockTerrain ─────────────────────────────────────────────

/// In-memory [`TerrainSurface`].
///
/// Bands are classified from the heights at construction with
/// [`BandThresholds::default`]; [`with_band`](Self::with_band) overrides a
/// band's cell list for scenario setup. `write_back` stores the heights
/// and counts calls but does not reclassify.
#[derive(Clone, Debug)]
pub struct MockTerrain {
    width: u32,
    height: u32,
    heights: Vec<f32>,
    min: f32,
    max: f32,
    thresholds: BandThresholds,
    bands: [Vec<GridPos>; 4],
    writes: usize,
}

impl MockTerrain {
    /// # Panics
    ///
    /// Panics if `heights.len() != w * h` or `heights` is empty.
    pub fn new(w: u32, h: u32, heights: Vec<f32>) -> Self {
        assert_eq!(heights.len(), (w * h) as usize, "height buffer size");
        assert!(!heights.is_empty(), "empty terrain");
        let min = heights.iter().cloned().fold(f32::INFINITY, f32::min);
        let max = heights.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        let thresholds = BandThresholds::default();
        let mut bands: [Vec<GridPos>; 4] = Default::default();
        for (i, &hgt) in heights.iter().enumerate() {
            let band = thresholds.classify(hgt, min, max);
            bands[band.index()].push(GridPos::from_index(i, w));
        }
        Self {
            width: w,
            height: h,
            heights,
            min,
            max,
            thresholds,
            bands,
            writes: 0,
        }
    }

    /// Replace the cells listed for `band`.
    pub fn with_band(mut self, band: TerrainBand, cells: Vec<GridPos>) -> Self {
        self.bands[band.index()] = cells;
        self
    }

    /// Number of successful `write_back` calls.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl TerrainSurface for MockTerrain {
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
        self.heights.copy_from_slice(heights);
        self.writes += 1;
        Ok(())
    }
}
