//! Axis-aligned boxes for collision queries against the world.

use cgmath::{Point3, Vector3};

/// An axis-aligned box given by its minimum and maximum corners.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoundingBox {
    /// Corner with the smallest coordinates.
    pub min: Point3<f32>,
    /// Corner with the largest coordinates.
    pub max: Point3<f32>,
}

impl BoundingBox {
    /// Creates a box from its two corners.
    pub fn new(min: Point3<f32>, max: Point3<f32>) -> Self {
        BoundingBox { min, max }
    }

    /// Creates a cube from its minimum corner and side length, as reported for octree leaves.
    pub fn from_cube(origin: Point3<f32>, size: f32) -> Self {
        BoundingBox {
            min: origin,
            max: origin + Vector3::new(size, size, size),
        }
    }

    /// Creates a box centered on `center` with the given extents, as used for physics bodies.
    pub fn from_center(center: Point3<f32>, size: Vector3<f32>) -> Self {
        let half = size / 2.0;
        BoundingBox {
            min: center - half,
            max: center + half,
        }
    }

    /// Returns `true` if the two boxes overlap with positive volume.
    ///
    /// Boxes that only share a face, edge or corner do not intersect, so a body
    /// resting on a block is not colliding with it.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        !(self.min.x >= other.max.x
            || self.max.x <= other.min.x
            || self.min.y >= other.max.y
            || self.max.y <= other.min.y
            || self.min.z >= other.max.z
            || self.max.z <= other.min.z)
    }
}
