//! # Octant Module
//!
//! The single source of truth for which child index covers which eighth of a box.
//! Reads, writes, generation and the tree-walk visitor all go through [`Octant`],
//! so a block written at one call site is always found at the same place by another.
//!
//! ```text
//!   .-------.
//!   | 0 | 1 | \      Top half, +y (seen from above, +z towards the viewer)
//!   |---+---|  \
//!   | 2 | 3 |   \
//!   '-------'    \
//!    \    .-------.
//!     \   | 4 | 5 |  Bottom half, -y
//!      \  |---+---|
//!       \ | 6 | 7 |
//!         '-------'
//! ```
//!
//! Index 0 is the `-x, +y, +z` corner. Bit 0 selects `+x`, bit 1 selects `-z`
//! and bit 2 selects `-y`.

use cgmath::{Point3, Vector3};

/// One of the eight equal sub-cubes of an octree node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Octant(u8);

impl Octant {
    /// The number of octants in a node.
    pub const COUNT: usize = 8;

    /// Wraps a raw child index.
    ///
    /// # Panics
    /// Panics if `index` is not in `0..8`.
    pub fn new(index: usize) -> Self {
        assert!(index < Self::COUNT, "octant index {index} out of range");
        Octant(index as u8)
    }

    /// Iterates all eight octants in index order.
    pub fn all() -> impl Iterator<Item = Octant> {
        (0..Self::COUNT as u8).map(Octant)
    }

    /// Returns the child slot index of this octant.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Chooses the octant of a box containing `point`.
    ///
    /// A coordinate exactly on the center plane belongs to the upper half.
    ///
    /// # Arguments
    /// * `point` - The point being located
    /// * `center` - The center of the box being subdivided
    pub fn containing(point: Point3<f32>, center: Point3<f32>) -> Self {
        let mut index = 0;
        if point.x >= center.x {
            index |= 1;
        }
        if point.z < center.z {
            index |= 2;
        }
        if point.y < center.y {
            index |= 4;
        }
        Octant(index)
    }

    /// Returns which half of the box this octant occupies on each axis.
    ///
    /// Each component is `0.0` for the lower half and `1.0` for the upper half,
    /// so `origin + unit_offset() * half_size` is the octant's minimum corner.
    pub fn unit_offset(self) -> Vector3<f32> {
        Vector3::new(
            if self.0 & 1 != 0 { 1.0 } else { 0.0 },
            if self.0 & 4 != 0 { 0.0 } else { 1.0 },
            if self.0 & 2 != 0 { 0.0 } else { 1.0 },
        )
    }

    /// Returns the minimum corner of this octant inside a parent box.
    ///
    /// # Arguments
    /// * `origin` - The minimum corner of the parent box
    /// * `half_size` - Half the side length of the parent box
    #[inline]
    pub fn child_origin(self, origin: Point3<f32>, half_size: f32) -> Point3<f32> {
        origin + self.unit_offset() * half_size
    }
}
