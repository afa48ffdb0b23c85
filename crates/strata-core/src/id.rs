//! Strongly-typed grid identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a vertex within a [`Graph`]'s vertex arena.
///
/// The wrapped value is the row-major index `x + z * width`, so a
/// `VertexId` is only meaningful for the graph (or terrain) it was
/// derived from.
///
/// [`Graph`]: https://docs.rs/strata-graph
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VertexId(pub u32);

impl VertexId {
    /// The arena index as `usize`.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for VertexId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Integer cell coordinate on the terrain grid.
///
/// `x` runs along the width axis and `z` along the height axis. Signed so
/// that neighbourhood offsets can step off the board; bounds are checked
/// by the owner of the grid, never here.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct GridPos {
    /// Column (width axis).
    pub x: i32,
    /// Row (height axis).
    pub z: i32,
}

impl GridPos {
    /// Create a grid position.
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// This position shifted by `(dx, dz)`.
    pub const fn offset(self, dx: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            z: self.z + dz,
        }
    }

    /// Row-major index into a grid of the given width, or `None` if the
    /// position lies outside `[0, width) x [0, height)`.
    pub fn to_index(self, width: u32, height: u32) -> Option<usize> {
        if self.x < 0 || self.z < 0 || self.x >= width as i32 || self.z >= height as i32 {
            return None;
        }
        Some(self.x as usize + self.z as usize * width as usize)
    }

    /// Inverse of [`to_index`](Self::to_index).
    pub fn from_index(index: usize, width: u32) -> Self {
        let w = width.max(1) as usize;
        Self {
            x: (index % w) as i32,
            z: (index / w) as i32,
        }
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

impl From<(i32, i32)> for GridPos {
    fn from((x, z): (i32, i32)) -> Self {
        Self { x, z }
    }
}
