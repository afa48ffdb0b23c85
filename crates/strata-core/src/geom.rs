//! Minimal 3D point arithmetic for terrain vertices.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A point (or vector) in terrain space: `x`/`z` span the grid plane,
/// `y` is height.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Width axis.
    pub x: f32,
    /// Height (elevation).
    pub y: f32,
    /// Depth axis.
    pub z: f32,
}

impl Position {
    /// The world up direction.
    pub const UP: Position = Position {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };

    /// Create a position.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Dot product.
    pub fn dot(self, other: Position) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Euclidean length.
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Length of the projection onto the `x`/`z` plane.
    pub fn planar_length(self) -> f32 {
        (self.x * self.x + self.z * self.z).sqrt()
    }

    /// Unit vector in the same direction, or zero for a zero vector.
    pub fn normalized(self) -> Position {
        let len = self.length();
        if len > 0.0 {
            self * (1.0 / len)
        } else {
            Position::default()
        }
    }

    /// Euclidean distance between two points.
    pub fn distance(self, other: Position) -> f32 {
        (other - self).length()
    }

    /// L1 distance between two points.
    pub fn manhattan(self, other: Position) -> f32 {
        (other.x - self.x).abs() + (other.y - self.y).abs() + (other.z - self.z).abs()
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        Position::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Position {
    type Output = Position;

    fn mul(self, rhs: f32) -> Position {
        Position::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = Position::new(0.0, 0.0, 0.0);
        let b = Position::new(3.0, 4.0, 12.0);
        assert_eq!(a.distance(b), 13.0);
    }

    #[test]
    fn manhattan_sums_axes() {
        let a = Position::new(1.0, -2.0, 0.5);
        let b = Position::new(-1.0, 1.0, 2.5);
        assert_eq!(a.manhattan(b), 7.0);
    }

    #[test]
    fn normalized_zero_stays_zero() {
        assert_eq!(Position::default().normalized(), Position::default());
        let n = Position::new(0.0, 2.0, 0.0).normalized();
        assert_eq!(n, Position::UP);
    }
}
