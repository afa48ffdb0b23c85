//! Multi-octave noise configuration.

use crate::error::NoiseError;
use crate::octave::Octave;
use crate::perlin::PerlinNoise;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Seed plus the octave stack summed into a height field.
///
/// An empty octave list is valid and produces a flat zero field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    /// Explicit generator seed. `None` uses the reference permutation.
    /// Default: `None`.
    pub seed: Option<u64>,
    /// Octaves summed per sample.
    /// Default: three octaves at frequencies 64, 32, 16 with halving
    /// amplitude.
    pub octaves: Vec<Octave>,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            seed: None,
            octaves: vec![
                Octave::new([0.0, 0.0], 1.0, 64.0),
                Octave::new([17.3, 41.9], 0.5, 32.0),
                Octave::new([-88.1, 5.7], 0.25, 16.0),
            ],
        }
    }
}

impl NoiseConfig {
    /// Range of octave counts drawn by [`random`](Self::random).
    pub const RANDOM_OCTAVES: std::ops::Range<usize> = 1..5;

    /// A seeded config with the default octaves.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Set the seed.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Replace the octave stack.
    pub fn with_octaves(mut self, octaves: Vec<Octave>) -> Self {
        self.octaves = octaves;
        self
    }

    /// Append one octave.
    pub fn push_octave(mut self, octave: Octave) -> Self {
        self.octaves.push(octave);
        self
    }

    /// Draw a random seed and 1 to 4 random octaves.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let count = rng.random_range(Self::RANDOM_OCTAVES);
        let seed = rng.random::<u64>();
        let octaves = (0..count).map(|_| Octave::random(rng)).collect();
        Self {
            seed: Some(seed),
            octaves,
        }
    }

    /// Check every octave parameter is finite.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::NonFiniteParameter`] for the first NaN or
    /// infinite parameter.
    pub fn validate(&self) -> Result<(), NoiseError> {
        for (octave, o) in self.octaves.iter().enumerate() {
            if let Some((name, value)) = o.fields().into_iter().find(|(_, v)| !v.is_finite()) {
                return Err(NoiseError::NonFiniteParameter {
                    octave,
                    name,
                    value,
                });
            }
        }
        Ok(())
    }

    /// The generator this config samples.
    pub fn generator(&self) -> PerlinNoise {
        self.seed.map_or_else(PerlinNoise::new, PerlinNoise::with_seed)
    }

    /// Sum of every octave at `(x, y)` using `noise`.
    pub fn sample(&self, noise: &PerlinNoise, x: f64, y: f64) -> f64 {
        self.octaves.iter().map(|o| o.sample(noise, x, y)).sum()
    }
}
