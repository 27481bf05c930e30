//! Geometric value types shared across the workspace.
//!
//! Positions are plain 3-axis coordinates without identity; all comparisons
//! against emitted machine state use the shared [`MIN_DELTA`] epsilon so the
//! toolpath model and the postprocessors agree on what "the same point" means.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Sub;

/// Minimum axis delta considered a real movement.
///
/// Axis words whose change against the tracked machine position stays below
/// this value are suppressed in generated G-code, and two positions closer
/// than this are treated as coincident.
pub const MIN_DELTA: f64 = 1e-5;

/// A 3-D point in machine coordinates (millimeters).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// X-axis position
    pub x: f64,
    /// Y-axis position
    pub y: f64,
    /// Z-axis position
    pub z: f64,
}

impl Position {
    /// Create a position from its three coordinates.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        debug_assert!(
            x.is_finite() && y.is_finite() && z.is_finite(),
            "position coordinates must be finite: x={x}, y={y}, z={z}"
        );
        Self { x, y, z }
    }

    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Whether both positions lie within [`MIN_DELTA`] on every axis.
    pub fn is_coincident(&self, other: &Position) -> bool {
        (self.x - other.x).abs() <= MIN_DELTA
            && (self.y - other.y).abs() <= MIN_DELTA
            && (self.z - other.z).abs() <= MIN_DELTA
    }

    /// Copy of this position with a replaced Z coordinate.
    pub fn with_z(&self, z: f64) -> Self {
        Self { z, ..*self }
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        Position {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X{:.3} Y{:.3} Z{:.3}", self.x, self.y, self.z)
    }
}

/// Commanded rotary-axis orientation (degrees around A, B, C).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rotation {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Rotation {
    pub fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }
}

/// Axis-aligned bounding box of the workpiece.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    /// Corner with the smallest coordinates on every axis.
    pub min: Position,
    /// Corner with the largest coordinates on every axis.
    pub max: Position,
}

impl Bounds {
    pub fn new(min: Position, max: Position) -> Self {
        debug_assert!(
            min.x <= max.x && min.y <= max.y && min.z <= max.z,
            "bounds corners must be ordered: min={min}, max={max}"
        );
        Self { min, max }
    }
}
