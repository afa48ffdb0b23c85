//! Terrain band classification.
//!
//! A band is a named slice of the height range. Classification works on
//! the height's fraction between the terrain's minimum and maximum, so the
//! same thresholds apply to any amplitude of input noise.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Named height range, ordered from lowest to highest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TerrainBand {
    /// Below the ocean threshold.
    Ocean,
    /// Narrow strip just above the ocean.
    Beach,
    /// Mid-range lowland.
    Plain,
    /// Everything above the plain threshold.
    Mountain,
}

impl TerrainBand {
    /// All bands, lowest first.
    pub const ALL: [TerrainBand; 4] = [
        TerrainBand::Ocean,
        TerrainBand::Beach,
        TerrainBand::Plain,
        TerrainBand::Mountain,
    ];

    /// Dense index `0..4`, lowest first.
    pub fn index(self) -> usize {
        match self {
            TerrainBand::Ocean => 0,
            TerrainBand::Beach => 1,
            TerrainBand::Plain => 2,
            TerrainBand::Mountain => 3,
        }
    }
}

impl fmt::Display for TerrainBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TerrainBand::Ocean => "ocean",
            TerrainBand::Beach => "beach",
            TerrainBand::Plain => "plain",
            TerrainBand::Mountain => "mountain",
        };
        f.write_str(name)
    }
}

/// Upper bounds (as height fractions in `[0, 1]`) of the three lower bands.
///
/// A fraction `t` is classified as Ocean when `t < ocean`, Beach when
/// `t < beach`, Plain when `t < plain`, Mountain otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BandThresholds {
    /// Upper bound of the ocean band. Default: 0.30.
    pub ocean: f32,
    /// Upper bound of the beach band. Default: 0.36.
    pub beach: f32,
    /// Upper bound of the plain band. Default: 0.62.
    pub plain: f32,
}

impl Default for BandThresholds {
    fn default() -> Self {
        Self {
            ocean: 0.30,
            beach: 0.36,
            plain: 0.62,
        }
    }
}

impl BandThresholds {
    /// Check `0 <= ocean <= beach <= plain <= 1` and finiteness.
    pub fn validate(&self) -> Result<(), String> {
        let all = [self.ocean, self.beach, self.plain];
        if all.iter().any(|t| !t.is_finite()) {
            return Err(format!("band thresholds must be finite, got {all:?}"));
        }
        if !(0.0 <= self.ocean
            && self.ocean <= self.beach
            && self.beach <= self.plain
            && self.plain <= 1.0)
        {
            return Err(format!(
                "band thresholds must satisfy 0 <= ocean <= beach <= plain <= 1, got {all:?}"
            ));
        }
        Ok(())
    }

    /// Classify a height against the terrain range `[min, max]`.
    pub fn classify(&self, height: f32, min: f32, max: f32) -> TerrainBand {
        self.classify_fraction(inverse_lerp(min, max, height))
    }

    /// Classify a height fraction in `[0, 1]`.
    pub fn classify_fraction(&self, t: f32) -> TerrainBand {
        if t < self.ocean {
            TerrainBand::Ocean
        } else if t < self.beach {
            TerrainBand::Beach
        } else if t < self.plain {
            TerrainBand::Plain
        } else {
            TerrainBand::Mountain
        }
    }
}

/// Fraction of `value` between `a` and `b`, clamped to `[0, 1]`.
///
/// A degenerate range (`a == b`) yields 0.0.
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if a == b {
        return 0.0;
    }
    ((value - a) / (b - a)).clamp(0.0, 1.0)
}
