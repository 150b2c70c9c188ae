//! # Block Side Module
//!
//! This module defines the six faces of a voxel block and picks the face a ray
//! struck from the offset between the hit cell and the cell before it.

use cgmath::Vector3;

/// Represents the six possible faces of a voxel block.
///
/// The order is: [FRONT, BACK, BOTTOM, TOP, LEFT, RIGHT]
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The front face (facing positive Z)
    FRONT = 0,

    /// The back face (facing negative Z)
    BACK = 1,

    /// The bottom face (facing negative Y)
    BOTTOM = 2,

    /// The top face (facing positive Y)
    TOP = 3,

    /// The left face (facing negative X)
    LEFT = 4,

    /// The right face (facing positive X)
    RIGHT = 5,
}

impl BlockSide {
    /// Determines the face whose outward normal best matches `offset`.
    ///
    /// The dominant axis of `offset` wins; ties resolve in x, y, z order.
    ///
    /// # Arguments
    /// * `offset` - A vector pointing from a block towards the neighbour a ray came from
    ///
    /// # Returns
    /// The matching face, or `None` for a zero vector.
    pub fn from_offset(offset: Vector3<f32>) -> Option<BlockSide> {
        let (ax, ay, az) = (offset.x.abs(), offset.y.abs(), offset.z.abs());
        if ax == 0.0 && ay == 0.0 && az == 0.0 {
            return None;
        }

        let side = if ax >= ay && ax >= az {
            if offset.x > 0.0 {
                BlockSide::RIGHT
            } else {
                BlockSide::LEFT
            }
        } else if ay >= az {
            if offset.y > 0.0 {
                BlockSide::TOP
            } else {
                BlockSide::BOTTOM
            }
        } else if offset.z > 0.0 {
            BlockSide::FRONT
        } else {
            BlockSide::BACK
        };
        Some(side)
    }
}
