//! # World Module
//!
//! This module provides the `World` struct, which owns the octree root and
//! translates world-space points into octree descents.
//!
//! ## Addressing
//!
//! The world occupies the half-open cube `[0, world_size)³`. A *dimension* counts
//! subdivisions from the root, so a block at dimension `d` has side
//! `world_size / 2^d`. Locating a point keeps a running box (minimum corner and
//! side) and halves it once per level, picking the child with [`Octant::containing`].
//! Nothing about a path is cached between calls.
//!
//! ## Reads and Writes
//!
//! - Reads follow existing children only and stop at the first leaf, so a coarse
//!   leaf answers for every finer point inside it.
//! - Writes create missing nodes along the path, overwrite the reached node and
//!   then simplify from the root, keeping the tree canonical.
//! - Points outside the world read as empty and are never written.
//!
//! ## Performance Considerations
//!
//! - A read is O(depth of the leaf reached)
//! - A write is O(dimension) for the descent plus one simplify pass. Siblings of the
//!   written path are already canonical, so only the modified path collapses.

use cgmath::Point3;
use log::debug;

use crate::config::WorldConfig;
use crate::engine_state::voxels::block::{BlockValue, NO_VALUE};
use crate::engine_state::voxels::octree::{Octant, OctreeNode};

pub mod world_generation;
pub mod world_iteration;

/// The deepest subdivision the world addresses.
///
/// Past this depth a block is narrower than the `f32` spacing of its coordinates,
/// and block sizes head towards zero. Deeper requests are clamped to it.
pub const MAX_DIMENSION: u32 = 24;

/// A node found by a read, together with the depth it was found at.
#[derive(Clone, Copy, Debug)]
pub struct BlockLookup<'a> {
    /// The node covering the queried point.
    pub node: &'a OctreeNode,
    /// How many subdivisions below the root the node lives.
    pub dimension: u32,
}

/// The running box used while descending the octree towards a point.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Descent {
    /// Minimum corner of the current box.
    pub origin: Point3<f32>,
    /// Side length of the current box.
    pub size: f32,
}

impl Descent {
    /// Starts at the root box.
    pub fn new(world_size: f32) -> Self {
        Descent {
            origin: Point3::new(0.0, 0.0, 0.0),
            size: world_size,
        }
    }

    /// Halves the box towards `point` and returns the octant that was entered.
    pub fn step(&mut self, point: Point3<f32>) -> Octant {
        self.size /= 2.0;
        let center = Point3::new(
            self.origin.x + self.size,
            self.origin.y + self.size,
            self.origin.z + self.size,
        );
        let octant = Octant::containing(point, center);
        self.origin = octant.child_origin(self.origin, self.size);
        octant
    }
}

/// A bounded voxel world stored as a single octree.
///
/// # Examples
///
/// ```
/// use cgmath::Point3;
/// use voxel_octree::World;
///
/// let mut world = World::empty(10.0);
/// world.set_block_at(Point3::new(5.0, 5.0, 5.0), 4, 0xff0000);
/// assert_eq!(world.get_value_at(Point3::new(5.0, 5.0, 5.0)), 0xff0000);
/// ```
pub struct World {
    /// The root node, covering the whole world cube.
    root: OctreeNode,
    /// Settings the world was created with.
    config: WorldConfig,
    /// Generator used only by world generation, seeded once at creation.
    rng: fastrand::Rng,
}

impl World {
    /// Creates a world from `config` and populates it with the configured generation method.
    pub fn new(config: WorldConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        let mut world = World {
            root: OctreeNode::default(),
            config,
            rng,
        };
        world.regenerate();
        world
    }

    /// Creates a world of the given size with nothing in it.
    pub fn empty(world_size: f32) -> Self {
        World {
            root: OctreeNode::default(),
            config: WorldConfig {
                world_size,
                ..WorldConfig::default()
            },
            rng: fastrand::Rng::new(),
        }
    }

    /// Returns the root node.
    pub fn root(&self) -> &OctreeNode {
        &self.root
    }

    /// Returns the settings this world was created with.
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Returns the side length of the world cube.
    #[inline]
    pub fn world_size(&self) -> f32 {
        self.config.world_size
    }

    /// Returns the side length of a block `dimension` subdivisions below the root.
    ///
    /// `dimension` is clamped to [`MAX_DIMENSION`].
    pub fn size_at_dimension(&self, dimension: u32) -> f32 {
        self.config.world_size * 2f32.powi(-(dimension.min(MAX_DIMENSION) as i32))
    }

    /// Returns `true` if `point` lies inside `[0, world_size)³`.
    ///
    /// NaN coordinates are outside the world.
    pub fn contains(&self, point: Point3<f32>) -> bool {
        let size = self.config.world_size;
        (0.0..size).contains(&point.x)
            && (0.0..size).contains(&point.y)
            && (0.0..size).contains(&point.z)
    }

    /// Computes the octants visited from the root down to `dimension` when locating `point`.
    ///
    /// `dimension` is clamped to [`MAX_DIMENSION`].
    pub fn node_path(&self, point: Point3<f32>, dimension: u32) -> Vec<Octant> {
        let mut descent = Descent::new(self.config.world_size);
        (0..dimension.min(MAX_DIMENSION))
            .map(|_| descent.step(point))
            .collect()
    }

    /// Walks `dimension` levels towards `point`, creating missing nodes on the way.
    ///
    /// Created nodes are leaves carrying their parent's value, so the walk never
    /// changes what any point reads. The caller is responsible for bounds checks
    /// and for simplifying afterwards.
    pub fn descend_or_create(&mut self, point: Point3<f32>, dimension: u32) -> &mut OctreeNode {
        let path = self.node_path(point, dimension);
        let mut node = &mut self.root;
        for octant in path {
            node = node.child_or_insert(octant.index());
        }
        node
    }

    /// Finds the leaf covering `point`.
    ///
    /// # Returns
    /// The leaf and the dimension it lives at, or `None` if `point` is outside the
    /// world or falls into an empty child slot.
    pub fn get_block_at(&self, point: Point3<f32>) -> Option<BlockLookup<'_>> {
        if !self.contains(point) {
            return None;
        }

        let mut descent = Descent::new(self.config.world_size);
        let mut node = &self.root;
        let mut dimension = 0;
        while !node.is_leaf() {
            let octant = descent.step(point);
            node = node.child(octant.index())?;
            dimension += 1;
        }
        Some(BlockLookup { node, dimension })
    }

    /// Returns the block value at `point`, or `NO_VALUE` for empty or out-of-world points.
    pub fn get_value_at(&self, point: Point3<f32>) -> BlockValue {
        self.get_block_at(point)
            .map_or(NO_VALUE, |lookup| lookup.node.value())
    }

    /// Sets the block of side `size_at_dimension(dimension)` containing `point` to `value`.
    ///
    /// Points outside the world are ignored. The tree is simplified from the root
    /// afterwards, so writing a value equal to the surrounding region merges it back.
    ///
    /// # Arguments
    /// * `point` - Any point inside the block to write
    /// * `dimension` - The depth of the block to write
    /// * `value` - The new block value; `NO_VALUE` clears the block
    pub fn set_block_at(&mut self, point: Point3<f32>, dimension: u32, value: BlockValue) {
        if !self.contains(point) {
            return;
        }

        self.descend_or_create(point, dimension).set_value(value);
        self.root.simplify();
        debug!(
            "Set block at ({}, {}, {}) dimension {} to {:#08x}",
            point.x, point.y, point.z, dimension, value
        );
    }

    /// Replaces the whole tree.
    pub(crate) fn replace_root(&mut self, root: OctreeNode) {
        self.root = root;
    }
}
