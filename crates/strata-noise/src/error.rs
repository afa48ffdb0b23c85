//! Error types for noise configuration.

use std::error::Error;
use std::fmt;

/// Invalid noise configuration.
#[derive(Clone, Debug, PartialEq)]
pub enum NoiseError {
    /// An octave parameter is NaN or infinite.
    NonFiniteParameter {
        /// Index of the octave.
        octave: usize,
        /// Which parameter.
        name: &'static str,
        /// The offending value.
        value: f64,
    },
    /// A height field was requested with a zero dimension.
    EmptyField {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
}

impl fmt::Display for NoiseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFiniteParameter {
                octave,
                name,
                value,
            } => write!(f, "octave {octave}: {name} must be finite, got {value}"),
            Self::EmptyField { width, height } => {
                write!(f, "height field must be non-empty, got {width}x{height}")
            }
        }
    }
}

impl Error for NoiseError {}
