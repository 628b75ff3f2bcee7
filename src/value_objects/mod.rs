//! Graph value objects
//!
//! Value objects are immutable types shared by every engine in this crate:
//! entity identifiers, 3D positions with the small amount of vector algebra
//! the layout engines need, and the straight-line curve attached to rendered
//! relations.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Globally unique, stable identifier of an entity
///
/// Identifiers are never reused; cloning a graph keeps the ids of its
/// entities, while placeholder entities always receive a fresh id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(Uuid);

impl EntityId {
    /// Create a fresh identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Position of an entity in 3D model space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position3D {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0, z: 0.0 };
    pub const X_AXIS: Self = Self { x: 1.0, y: 0.0, z: 0.0 };
    pub const Y_AXIS: Self = Self { x: 0.0, y: 1.0, z: 0.0 };

    /// Create a new position
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Get the distance to another position
    pub fn distance_to(&self, other: &Position3D) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Angle between the X axis and the XY projection of the vector from
    /// `self` to `other`, in radians
    pub fn planar_angle_to(&self, other: &Position3D) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }
}

impl Default for Position3D {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl std::ops::Add for Position3D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl std::ops::Sub for Position3D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl std::ops::Mul<f64> for Position3D {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

/// Rendered geometry of a relation: a straight segment between two positions
///
/// This is the only curve shape the graph layer synthesizes; everything more
/// elaborate belongs to the geometry kernel, which is outside this crate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    pub start: Position3D,
    pub end: Position3D,
}

impl Curve {
    /// Straight segment between two positions
    pub fn between(start: Position3D, end: Position3D) -> Self {
        Self { start, end }
    }

    /// Length of the segment
    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }
}
