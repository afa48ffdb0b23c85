//! Row-major height fields sampled from a [`NoiseConfig`].

use crate::config::NoiseConfig;
use crate::error::NoiseError;

/// A sampled heightmap.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightField {
    width: u32,
    height: u32,
    heights: Vec<f32>,
    min: f32,
    max: f32,
}

impl HeightField {
    /// Sample `config` at every integer cell `(x, z)` of a
    /// `width * height` grid.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::EmptyField`] for a zero dimension, or the
    /// error from [`NoiseConfig::validate`].
    pub fn generate(width: u32, height: u32, config: &NoiseConfig) -> Result<Self, NoiseError> {
        if width == 0 || height == 0 {
            return Err(NoiseError::EmptyField { width, height });
        }
        config.validate()?;
        let noise = config.generator();
        let mut heights = Vec::with_capacity(width as usize * height as usize);
        for z in 0..height {
            for x in 0..width {
                heights.push(config.sample(&noise, x as f64, z as f64) as f32);
            }
        }
        Ok(Self::from_parts(width, height, heights))
    }

    fn from_parts(width: u32, height: u32, heights: Vec<f32>) -> Self {
        let (min, max) = heights
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &h| {
                (lo.min(h), hi.max(h))
            });
        Self {
            width,
            height,
            heights,
            min,
            max,
        }
    }

    /// Cells along `x`.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Cells along `z`.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Heights in row-major order.
    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    /// Consume into the height buffer.
    pub fn into_heights(self) -> Vec<f32> {
        self.heights
    }

    /// Lowest sample.
    pub fn min(&self) -> f32 {
        self.min
    }

    /// Highest sample.
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Sample at `(x, z)`, or `None` off the field.
    pub fn get(&self, x: u32, z: u32) -> Option<f32> {
        if x >= self.width || z >= self.height {
            return None;
        }
        self.heights
            .get(x as usize + z as usize * self.width as usize)
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::octave::Octave;

    #[test]
    fn same_config_same_field() {
        let cfg = NoiseConfig::seeded(99);
        let a = HeightField::generate(32, 24, &cfg).unwrap();
        let b = HeightField::generate(32, 24, &cfg).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.heights().len(), 32 * 24);
    }

    #[test]
    fn min_max_bracket_every_sample() {
        let f = HeightField::generate(20, 20, &NoiseConfig::seeded(4)).unwrap();
        assert!(f.min() <= f.max());
        assert!(f.heights().iter().all(|&h| f.min() <= h && h <= f.max()));
    }

    #[test]
    fn zero_dimension_is_rejected() {
        assert_eq!(
            HeightField::generate(0, 3, &NoiseConfig::default()),
            Err(NoiseError::EmptyField {
                width: 0,
                height: 3
            })
        );
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = NoiseConfig::default().with_octaves(vec![Octave::new([0.0, 0.0], f64::NAN, 1.0)]);
        assert!(HeightField::generate(2, 2, &cfg).is_err());
    }

    #[test]
    fn silent_octaves_give_flat_zero_field() {
        let cfg = NoiseConfig::default().with_octaves(vec![
            Octave::new([0.0, 0.0], 0.0, 10.0),
            Octave::new([0.0, 0.0], 10.0, 0.0),
        ]);
        let f = HeightField::generate(4, 4, &cfg).unwrap();
        assert!(f.heights().iter().all(|&h| h == 0.0));
        assert_eq!(f.get(3, 3), Some(0.0));
        assert_eq!(f.get(4, 0), None);
    }
}
