//! Spatial positions inside the workcell
//!
//! Coordinates are millimetres in the cell frame. Positions are immutable
//! once constructed; a move replaces the robot's position rather than
//! editing it.

use core::fmt;

use glam::Vec3;

/// Labelled 3D coordinate
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialPosition {
    point: Vec3,
    label: String,
}

impl SpatialPosition {
    /// Create a labelled position
    pub fn new(x: f32, y: f32, z: f32, label: impl Into<String>) -> Self {
        Self {
            point: Vec3::new(x, y, z),
            label: label.into(),
        }
    }

    /// The origin, labelled "Home"
    pub fn home() -> Self {
        Self::new(0.0, 0.0, 0.0, "Home")
    }

    /// X coordinate (mm)
    pub fn x(&self) -> f32 {
        self.point.x
    }

    /// Y coordinate (mm)
    pub fn y(&self) -> f32 {
        self.point.y
    }

    /// Z coordinate (mm)
    pub fn z(&self) -> f32 {
        self.point.z
    }

    /// Coordinates as a vector
    pub fn point(&self) -> Vec3 {
        self.point
    }

    /// Display label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Euclidean distance to another position (mm)
    pub fn distance_to(&self, other: &SpatialPosition) -> f32 {
        self.point.distance(other.point)
    }
}

impl fmt::Display for SpatialPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {}, {})",
            self.label, self.point.x, self.point.y, self.point.z
        )
    }
}
