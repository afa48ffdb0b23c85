//! Per-octave sampling parameters.

use crate::perlin::PerlinNoise;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Range used when drawing random octave parameters.
pub const RANDOM_RANGE: f64 = 512.0;

/// One layer of a multi-octave height field.
///
/// A sample at `(x, y)` reads the generator at
/// `offset + (x, y) / frequency` and scales the `[0, 1]` result by
/// `amplitude`. Larger frequencies stretch features wider.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Octave {
    /// Position offset in noise space. Default: `[0, 0]`.
    pub offset: [f64; 2],
    /// Output multiplier. Default: 1.
    pub amplitude: f64,
    /// Coordinate divisor. Default: 32.
    pub frequency: f64,
}

impl Default for Octave {
    fn default() -> Self {
        Self {
            offset: [0.0, 0.0],
            amplitude: 1.0,
            frequency: 32.0,
        }
    }
}

impl Octave {
    /// Create an octave.
    pub fn new(offset: [f64; 2], amplitude: f64, frequency: f64) -> Self {
        Self {
            offset,
            amplitude,
            frequency,
        }
    }

    /// Draw offset, amplitude, and frequency uniformly from
    /// `[-RANDOM_RANGE, RANDOM_RANGE)`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut draw = || rng.random_range(-RANDOM_RANGE..RANDOM_RANGE);
        Self {
            offset: [draw(), draw()],
            amplitude: draw(),
            frequency: draw(),
        }
    }

    /// This octave's contribution at `(x, y)`. Exactly zero when the
    /// amplitude or frequency is zero.
    pub fn sample(&self, noise: &PerlinNoise, x: f64, y: f64) -> f64 {
        if self.frequency == 0.0 || self.amplitude == 0.0 {
            return 0.0;
        }
        noise.noise(
            self.offset[0] + x / self.frequency,
            self.offset[1] + y / self.frequency,
        ) * self.amplitude
    }

    pub(crate) fn fields(&self) -> [(&'static str, f64); 4] {
        [
            ("offset.x", self.offset[0]),
            ("offset.y", self.offset[1]),
            ("amplitude", self.amplitude),
            ("frequency", self.frequency),
        ]
    }
}
