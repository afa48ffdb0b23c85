//! Terrain statistics and a randomized sampling harness.
//!
//! The statistics summarize a finished terrain in a few numbers. The
//! [`Sampler`] generates many random terrains, sculpts each with a
//! randomized agent system, and bins every result by
//! `(linearity, ocean coverage)` into a [`SurveyHistogram`], which shows
//! where in that space the generator tends to land.

use std::ops::Range;

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use strata_core::band::inverse_lerp;
use strata_core::{BandThresholds, TerrainBand, TerrainSurface};
use strata_noise::NoiseConfig;
use tracing::{debug, info};

use crate::config::{ConfigError, SystemConfig, TerrainConfig};
use crate::system::{AgentSystem, SystemError};
use crate::terrain::TerrainMap;

// ── Statistics ─────────────────────────────────────────────────

/// Mean height as a fraction of the terrain's range, in `[0, 1]`.
///
/// A flat terrain reports 0.
pub fn mean_elevation(terrain: &dyn TerrainSurface) -> f32 {
    let heights = terrain.heights();
    if heights.is_empty() {
        return 0.0;
    }
    let (lo, hi) = (terrain.min_height(), terrain.max_height());
    let sum: f64 = heights
        .iter()
        .map(|&h| f64::from(inverse_lerp(lo, hi, h)))
        .sum();
    (sum / heights.len() as f64) as f32
}

/// Fraction of cells in the ocean band.
pub fn ocean_coverage(terrain: &dyn TerrainSurface) -> f32 {
    band_fraction(terrain, TerrainBand::Ocean)
}

/// Fraction of cells in `band`.
pub fn band_fraction(terrain: &dyn TerrainSurface, band: TerrainBand) -> f32 {
    let cells = terrain.heights().len();
    if cells == 0 {
        return 0.0;
    }
    terrain.band_cells(band).len() as f32 / cells as f32
}

/// How well a straight line explains the height profile, averaged over
/// every row and every column.
///
/// Each row and column of at least two cells contributes the R² of a
/// least-squares line through `(index, height)`. A constant profile is
/// perfectly linear and scores 1. Returns 0 when no profile has two cells.
pub fn linearity(heights: &[f32], width: u32, height: u32) -> f32 {
    let (w, h) = (width as usize, height as usize);
    if heights.len() != w * h {
        return 0.0;
    }
    let mut total = 0.0f64;
    let mut lines = 0usize;
    if w >= 2 {
        for z in 0..h {
            total += r_squared((0..w).map(|x| heights[x + z * w]));
            lines += 1;
        }
    }
    if h >= 2 {
        for x in 0..w {
            total += r_squared((0..h).map(|z| heights[x + z * w]));
            lines += 1;
        }
    }
    if lines == 0 {
        0.0
    } else {
        (total / lines as f64) as f32
    }
}

/// R² of the least-squares fit of `ys` against their indices.
fn r_squared(ys: impl Iterator<Item = f32>) -> f64 {
    let (mut n, mut sx, mut sy, mut sxx, mut syy, mut sxy) = (0.0f64, 0.0, 0.0, 0.0, 0.0, 0.0);
    for (i, y) in ys.enumerate() {
        let (x, y) = (i as f64, f64::from(y));
        n += 1.0;
        sx += x;
        sy += y;
        sxx += x * x;
        syy += y * y;
        sxy += x * y;
    }
    let var_x = n * sxx - sx * sx;
    let var_y = n * syy - sy * sy;
    if var_y <= f64::EPSILON * syy.abs().max(1.0) {
        return 1.0;
    }
    if var_x <= 0.0 {
        return 0.0;
    }
    let cov = n * sxy - sx * sy;
    ((cov * cov) / (var_x * var_y)).clamp(0.0, 1.0)
}

/// Summary statistics for one terrain.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TerrainSurvey {
    /// See [`mean_elevation`].
    pub mean_elevation: f32,
    /// See [`ocean_coverage`].
    pub ocean_coverage: f32,
    /// See [`linearity`].
    pub linearity: f32,
    /// Fraction of cells per band, indexed by [`TerrainBand::index`].
    pub band_fractions: [f32; 4],
}

impl TerrainSurvey {
    /// Measure `terrain`.
    pub fn of(terrain: &dyn TerrainSurface) -> Self {
        let mut band_fractions = [0.0; 4];
        for band in TerrainBand::ALL {
            band_fractions[band.index()] = band_fraction(terrain, band);
        }
        Self {
            mean_elevation: mean_elevation(terrain),
            ocean_coverage: ocean_coverage(terrain),
            linearity: linearity(terrain.heights(), terrain.width(), terrain.height()),
            band_fractions,
        }
    }
}

// ── Histogram ──────────────────────────────────────────────────

/// A square 2D histogram over `(linearity, ocean coverage)`, both in
/// `[0, 1]`.
///
/// Bin `(l, c)` is stored at `l + c * bins`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyHistogram {
    bins: u32,
    counts: Vec<u32>,
    samples: u32,
}

impl SurveyHistogram {
    /// Largest accepted bins per axis.
    pub const MAX_BINS: u32 = 1024;

    /// An empty histogram with `bins` bins per axis, clamped to
    /// `1..=MAX_BINS`.
    pub fn new(bins: u32) -> Self {
        let bins = bins.clamp(1, Self::MAX_BINS);
        Self {
            bins,
            counts: vec![0; bins as usize * bins as usize],
            samples: 0,
        }
    }

    fn slot(&self, l: u32, c: u32) -> usize {
        l as usize + c as usize * self.bins as usize
    }

    /// Bins per axis.
    pub fn bins(&self) -> u32 {
        self.bins
    }

    /// Samples recorded.
    pub fn samples(&self) -> u32 {
        self.samples
    }

    /// Row-major bin counts.
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    fn bin(&self, value: f32) -> u32 {
        let v = if value.is_finite() { value.clamp(0.0, 1.0) } else { 0.0 };
        ((v * self.bins as f32) as u32).min(self.bins.saturating_sub(1))
    }

    /// Count one terrain. Values outside `[0, 1]` land in the edge bins.
    pub fn record(&mut self, linearity: f32, ocean_coverage: f32) {
        let slot = self.slot(self.bin(linearity), self.bin(ocean_coverage));
        if let Some(count) = self.counts.get_mut(slot) {
            *count += 1;
            self.samples += 1;
        }
    }

    /// Count at bin `(l, c)`, or `None` outside the grid.
    pub fn get(&self, l: u32, c: u32) -> Option<u32> {
        if l >= self.bins || c >= self.bins {
            return None;
        }
        self.counts.get(self.slot(l, c)).copied()
    }

    /// Largest bin count.
    pub fn max_count(&self) -> u32 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Counts scaled so the fullest bin is 1. All zeros when empty.
    pub fn normalized(&self) -> Vec<f32> {
        let max = self.max_count();
        if max == 0 {
            return vec![0.0; self.counts.len()];
        }
        self.counts
            .iter()
            .map(|&c| c as f32 / max as f32)
            .collect()
    }
}

// ── Sampler ────────────────────────────────────────────────────

/// Generates random terrains, sculpts them, and histograms the results.
///
/// Each run draws a size from `width` and `height`, a random
/// [`NoiseConfig`], and a fresh system seed. Every phase of `system` has
/// per-agent param randomization switched on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sampler {
    /// Terrains to generate. Default: 5.
    pub runs: u32,
    /// Width range, half-open. Default: 16..128.
    pub width: Range<u32>,
    /// Height range, half-open. Default: 16..128.
    pub height: Range<u32>,
    /// Bins per histogram axis, at most [`SurveyHistogram::MAX_BINS`].
    /// Default: 32.
    pub bins: u32,
    /// Band boundaries for every generated terrain.
    pub thresholds: BandThresholds,
    /// Phase template. Its seed is replaced per run.
    pub system: SystemConfig,
}

impl Default for Sampler {
    fn default() -> Self {
        Self {
            runs: 5,
            width: 16..128,
            height: 16..128,
            bins: 32,
            thresholds: BandThresholds::default(),
            system: SystemConfig::default(),
        }
    }
}

impl Sampler {
    /// Check the settings that [`run`](Self::run) cannot recover from.
    ///
    /// # Errors
    ///
    /// [`ConfigError::HistogramBins`] when `bins` is 0 or above
    /// [`SurveyHistogram::MAX_BINS`], or any [`SystemConfig::validate`]
    /// error from the phase template.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bins == 0 || self.bins > SurveyHistogram::MAX_BINS {
            return Err(ConfigError::HistogramBins {
                bins: self.bins,
                max: SurveyHistogram::MAX_BINS,
            });
        }
        self.system.validate()
    }

    /// Run every sample, drawing all randomness from `rng`.
    ///
    /// # Errors
    ///
    /// Fails on [`validate`](Self::validate), then propagates the first
    /// configuration or scheduler error. An empty size range is reported
    /// as [`ConfigError::EmptyTerrain`].
    pub fn run(&self, rng: &mut ChaCha8Rng) -> Result<SurveyHistogram, SystemError> {
        self.validate()?;
        let mut histogram = SurveyHistogram::new(self.bins);
        let mut system = self.system.clone();
        for phase in &mut system.phases {
            phase.randomize_params = true;
        }
        info!(runs = self.runs, bins = histogram.bins(), "survey started");
        for run in 0..self.runs {
            let survey = self.sample_once(&system, rng)?;
            debug!(
                run,
                linearity = survey.linearity,
                ocean = survey.ocean_coverage,
                "survey sample"
            );
            histogram.record(survey.linearity, survey.ocean_coverage);
        }
        info!(samples = histogram.samples(), peak = histogram.max_count(), "survey finished");
        Ok(histogram)
    }

    fn sample_once(
        &self,
        template: &SystemConfig,
        rng: &mut ChaCha8Rng,
    ) -> Result<TerrainSurvey, SystemError> {
        let width = draw(rng, &self.width);
        let height = draw(rng, &self.height);
        let terrain_config = TerrainConfig {
            width,
            height,
            noise: NoiseConfig::random(rng),
            thresholds: self.thresholds,
        };
        let mut terrain = TerrainMap::from_noise(&terrain_config)?;
        let mut system = AgentSystem::new(template.clone().with_seed(rng.random()))?;
        system.execute(&mut terrain)?;
        Ok(TerrainSurvey::of(&terrain))
    }
}

/// Uniform draw from `range`, or 0 for an empty range.
fn draw(rng: &mut ChaCha8Rng, range: &Range<u32>) -> u32 {
    if range.is_empty() {
        0
    } else {
        rng.random_range(range.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PhaseConfig;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use strata_agent::AgentKind;
    use strata_test_utils::{flat_heights, ramp_heights, MockTerrain};

    #[test]
    fn ramp_is_perfectly_linear() {
        let h = ramp_heights(8, 6, 0.5);
        assert!((linearity(&h, 8, 6) - 1.0).abs() < 1e-6);
        assert_eq!(linearity(&flat_heights(4, 4, 2.0), 4, 4), 1.0);
    }

    #[test]
    fn zigzag_is_not_linear() {
        let h: Vec<f32> = (0..16).map(|i| if i % 2 == 0 { 0.0 } else { 1.0 }).collect();
        assert!(linearity(&h, 16, 1) < 0.2);
        assert_eq!(linearity(&[1.0], 1, 1), 0.0);
        assert_eq!(linearity(&[1.0, 2.0], 3, 1), 0.0);
    }

    #[test]
    fn coverage_and_elevation_of_a_ramp() {
        let terrain = MockTerrain::new(10, 1, ramp_heights(10, 1, 1.0));
        // Fractions 0/9, 1/9, 2/9 fall below the 0.30 ocean threshold.
        assert!((ocean_coverage(&terrain) - 0.3).abs() < 1e-6);
        assert!((mean_elevation(&terrain) - 0.5).abs() < 1e-6);
        let s = TerrainSurvey::of(&terrain);
        assert!((s.band_fractions.iter().sum::<f32>() - 1.0).abs() < 1e-6);
        assert_eq!(s.ocean_coverage, s.band_fractions[TerrainBand::Ocean.index()]);
    }

    #[test]
    fn histogram_bins_and_normalizes() {
        let mut hist = SurveyHistogram::new(4);
        hist.record(0.0, 0.0);
        hist.record(0.1, 0.2);
        hist.record(1.0, 1.0);
        hist.record(f32::NAN, 7.0);
        assert_eq!(hist.samples(), 4);
        assert_eq!(hist.get(0, 0), Some(2));
        assert_eq!(hist.get(3, 3), Some(1));
        assert_eq!(hist.get(0, 3), Some(1));
        assert_eq!(hist.get(4, 0), None);
        assert_eq!(hist.max_count(), 2);
        let norm = hist.normalized();
        assert_eq!(norm[0], 1.0);
        assert_eq!(norm[15], 0.5);
        assert_eq!(SurveyHistogram::new(0).bins(), 1);
    }

    #[test]
    fn oversized_histogram_is_clamped() {
        let mut hist = SurveyHistogram::new(70_000);
        assert_eq!(hist.bins(), SurveyHistogram::MAX_BINS);
        let side = SurveyHistogram::MAX_BINS as usize;
        assert_eq!(hist.counts().len(), side * side);
        hist.record(1.0, 1.0);
        assert_eq!(hist.get(SurveyHistogram::MAX_BINS - 1, SurveyHistogram::MAX_BINS - 1), Some(1));
    }

    #[test]
    fn sampler_rejects_bad_bin_counts() {
        for bins in [0, SurveyHistogram::MAX_BINS + 1, 70_000] {
            let sampler = Sampler {
                bins,
                ..Sampler::default()
            };
            assert_eq!(
                sampler.validate(),
                Err(ConfigError::HistogramBins {
                    bins,
                    max: SurveyHistogram::MAX_BINS
                })
            );
            assert!(matches!(
                sampler.run(&mut ChaCha8Rng::seed_from_u64(1)),
                Err(SystemError::Config(ConfigError::HistogramBins { .. }))
            ));
        }
        assert!(Sampler::default().validate().is_ok());
    }

    #[test]
    fn sampler_is_deterministic_and_counts_every_run() {
        let sampler = Sampler {
            runs: 3,
            width: 12..20,
            height: 12..20,
            bins: 8,
            system: SystemConfig::default().with_phases(vec![
                PhaseConfig::of_kind(AgentKind::Plain, 3, 2),
                PhaseConfig::of_kind(AgentKind::Erosion, 4, 2),
                PhaseConfig::of_kind(AgentKind::River, 1, 1),
            ]),
            ..Sampler::default()
        };
        let a = sampler.run(&mut ChaCha8Rng::seed_from_u64(5)).unwrap();
        let b = sampler.run(&mut ChaCha8Rng::seed_from_u64(5)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.samples(), 3);
        assert_eq!(a.counts().iter().sum::<u32>(), 3);
    }

    #[test]
    fn empty_size_range_is_a_config_error() {
        let sampler = Sampler {
            runs: 1,
            width: 5..5,
            ..Sampler::default()
        };
        assert!(matches!(
            sampler.run(&mut ChaCha8Rng::seed_from_u64(1)),
            Err(SystemError::Config(ConfigError::EmptyTerrain { .. }))
        ));
    }

    proptest! {
        #[test]
        fn linearity_stays_in_unit_range(
            heights in proptest::collection::vec(-100.0f32..100.0, 24),
        ) {
            let l = linearity(&heights, 6, 4);
            prop_assert!((0.0..=1.0).contains(&l), "linearity {}", l);
        }
    }
}
