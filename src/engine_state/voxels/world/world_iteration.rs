//! # World Iteration Module
//!
//! Walks the octree and reports every occupied leaf with its world-space box.
//! The walk computes each child's box with [`Octant::child_origin`], the same
//! mapping reads and writes use, so what a visitor is told matches what
//! [`World::get_value_at`] answers.
//!
//! Renderers implement [`BlockVisitor`] (or pass a closure) to draw leaves;
//! collision code uses [`World::collect_collision_boxes`] and [`World::intersects`].

use cgmath::Point3;

use super::World;
use crate::engine_state::voxels::block::{is_solid, to_rgb, BlockValue};
use crate::engine_state::voxels::bounding_box::BoundingBox;
use crate::engine_state::voxels::octree::OctreeNode;

/// Receives every occupied leaf of a world.
pub trait BlockVisitor {
    /// Called once per leaf with a non-zero value.
    ///
    /// # Arguments
    /// * `value` - The leaf's block value
    /// * `origin` - The minimum corner of the leaf's cube
    /// * `size` - The side length of the leaf's cube
    fn visit(&mut self, value: BlockValue, origin: Point3<f32>, size: f32);
}

impl<F> BlockVisitor for F
where
    F: FnMut(BlockValue, Point3<f32>, f32),
{
    fn visit(&mut self, value: BlockValue, origin: Point3<f32>, size: f32) {
        self(value, origin, size)
    }
}

/// Per-block data a renderer can upload as an instance buffer.
///
/// # Memory Layout
/// - Origin: [f32; 3] (12 bytes)
/// - Size: f32 (4 bytes)
/// - Color: [f32; 3] (12 bytes)
///
/// Total size: 28 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BlockInstance {
    /// Minimum corner of the block in world space
    pub origin: [f32; 3],
    /// Side length of the block
    pub size: f32,
    /// Normalized RGB color of the block
    pub color: [f32; 3],
}

impl World {
    /// Calls `visitor` for every occupied leaf in the world.
    pub fn visit_blocks<V: BlockVisitor>(&self, visitor: &mut V) {
        visit_node(&self.root, Point3::new(0.0, 0.0, 0.0), self.world_size(), visitor);
    }

    /// Collects one [`BlockInstance`] per occupied leaf.
    pub fn collect_instances(&self) -> Vec<BlockInstance> {
        let mut instances = Vec::new();
        self.visit_blocks(&mut |value: BlockValue, origin: Point3<f32>, size: f32| {
            instances.push(BlockInstance {
                origin: origin.into(),
                size,
                color: to_rgb(value),
            });
        });
        instances
    }

    /// Collects one box per occupied leaf, for registering static collision bodies.
    pub fn collect_collision_boxes(&self) -> Vec<BoundingBox> {
        let mut boxes = Vec::new();
        self.visit_blocks(&mut |_: BlockValue, origin: Point3<f32>, size: f32| {
            boxes.push(BoundingBox::from_cube(origin, size));
        });
        boxes
    }

    /// Returns `true` if any occupied leaf overlaps `bounds`.
    ///
    /// Subtrees whose cube misses `bounds` are skipped entirely.
    pub fn intersects(&self, bounds: &BoundingBox) -> bool {
        node_intersects(&self.root, Point3::new(0.0, 0.0, 0.0), self.world_size(), bounds)
    }
}

fn visit_node<V: BlockVisitor>(node: &OctreeNode, origin: Point3<f32>, size: f32, visitor: &mut V) {
    if node.is_leaf() {
        if is_solid(node.value()) {
            visitor.visit(node.value(), origin, size);
        }
        return;
    }

    let half = size / 2.0;
    for (octant, child) in node.children() {
        visit_node(child, octant.child_origin(origin, half), half, visitor);
    }
}

fn node_intersects(node: &OctreeNode, origin: Point3<f32>, size: f32, bounds: &BoundingBox) -> bool {
    if !BoundingBox::from_cube(origin, size).intersects(bounds) {
        return false;
    }
    if node.is_leaf() {
        return is_solid(node.value());
    }

    let half = size / 2.0;
    node.children()
        .any(|(octant, child)| node_intersects(child, octant.child_origin(origin, half), half, bounds))
}
