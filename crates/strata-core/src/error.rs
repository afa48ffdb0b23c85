//! Error types shared across the Strata workspace.
//!
//! Only invalid construction input is an error. Runtime degeneracies
//! (off-board lookups, unreachable goals, empty queues, stuck agents)
//! degrade to `None`, empty results, or an agent termination reason.

use std::error::Error;
use std::fmt;

/// Errors from graph construction and bulk vertex updates.
#[derive(Clone, Debug, PartialEq)]
pub enum GraphError {
    /// Attempted to construct a graph with zero width or height.
    EmptyGraph,
    /// A dimension does not fit the `i32` grid coordinate range.
    DimensionTooLarge {
        /// Which dimension.
        name: &'static str,
        /// The requested value.
        value: u32,
        /// The largest accepted value.
        max: u32,
    },
    /// `width * height` does not fit the `u32` vertex id range.
    TooManyCells {
        /// Requested cell count.
        cells: u64,
        /// The largest accepted cell count.
        max: u64,
    },
    /// The vertex arena could not be reserved.
    AllocationFailed {
        /// Requested cell count.
        cells: usize,
    },
    /// A caller-supplied buffer does not have `width * height` entries.
    LengthMismatch {
        /// Expected number of entries.
        expected: usize,
        /// Number of entries supplied.
        got: usize,
    },
    /// A supplied height is NaN or infinite.
    NonFiniteHeight {
        /// Row-major index of the offending cell.
        index: usize,
    },
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGraph => write!(f, "graph must have at least one vertex"),
            Self::DimensionTooLarge { name, value, max } => {
                write!(f, "{name} = {value} exceeds maximum of {max}")
            }
            Self::TooManyCells { cells, max } => {
                write!(f, "{cells} cells exceeds maximum of {max}")
            }
            Self::AllocationFailed { cells } => {
                write!(f, "could not allocate {cells} vertices")
            }
            Self::LengthMismatch { expected, got } => {
                write!(f, "expected {expected} entries, got {got}")
            }
            Self::NonFiniteHeight { index } => {
                write!(f, "height at cell {index} is not finite")
            }
        }
    }
}

impl Error for GraphError {}

/// Errors from writing heights back to a terrain surface.
#[derive(Clone, Debug, PartialEq)]
pub enum TerrainError {
    /// The height buffer does not match the terrain's cell count.
    LengthMismatch {
        /// Expected number of heights.
        expected: usize,
        /// Number of heights supplied.
        got: usize,
    },
    /// A supplied height is NaN or infinite.
    NonFiniteHeight {
        /// Row-major index of the offending cell.
        index: usize,
    },
}

impl fmt::Display for TerrainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch { expected, got } => {
                write!(f, "terrain expects {expected} heights, got {got}")
            }
            Self::NonFiniteHeight { index } => {
                write!(f, "terrain height at cell {index} is not finite")
            }
        }
    }
}

impl Error for TerrainError {}
