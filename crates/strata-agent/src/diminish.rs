//! Distance falloff curves for area-of-effect edits.

use serde::{Deserialize, Serialize};

/// Maps a normalised distance `t` in `[0, 1]` (0 at the centre, 1 at the
/// edge of the area of effect) to an edit weight in `[0, 1]`.
///
/// Every curve gives full weight at the centre.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiminishCurve {
    /// Same weight everywhere.
    Constant,
    /// `1 - t`.
    Linear,
    /// `1 - smoothstep(t)`: flat near the centre, soft at the edge.
    #[default]
    Smooth,
    /// `1 / (1 + 4t)`: sharp peak with a long tail.
    InverseDistance,
}

impl DiminishCurve {
    /// Weight at normalised distance `t` (clamped to `[0, 1]`).
    pub fn evaluate(self, t: f32) -> f32 {
        let t = if t.is_nan() { 1.0 } else { t.clamp(0.0, 1.0) };
        match self {
            DiminishCurve::Constant => 1.0,
            DiminishCurve::Linear => 1.0 - t,
            DiminishCurve::Smooth => 1.0 - t * t * (3.0 - 2.0 * t),
            DiminishCurve::InverseDistance => 1.0 / (1.0 + 4.0 * t),
        }
    }

    /// Weight at `distance` inside a radius of `radius`. A zero radius only
    /// weights the centre.
    pub fn at_distance(self, distance: f32, radius: f32) -> f32 {
        if radius <= 0.0 {
            return if distance <= 0.0 { self.evaluate(0.0) } else { 0.0 };
        }
        self.evaluate(distance / radius)
    }
}
