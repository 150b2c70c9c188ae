//! # World Generation Module
//!
//! Populates a fresh octree. The starter layout is fixed; the procedural methods
//! fill every cell at `generation_dimension` and then simplify once, so large
//! uniform regions come out as single leaves.
//!
//! All randomness comes from the world's own seeded generator.

use cgmath::Point3;
use log::info;
use noise::{NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

use super::World;
use crate::engine_state::voxels::block::{block_color::BlockColor, BlockValue, NO_VALUE};
use crate::engine_state::voxels::octree::{Octant, OctreeNode};

/// Probability that a cell stays empty in the random layout.
pub const RANDOM_SPARSENESS: f64 = 0.9;
/// Threshold above which Perlin noise is considered solid.
pub const PERLIN_POSITIVE_THRESHOLD: f64 = 0.2;
/// Threshold below which Perlin noise is considered solid.
pub const PERLIN_NEGATIVE_THRESHOLD: f64 = -0.2;
/// Scaling factor applied to world coordinates when sampling Perlin noise.
pub const PERLIN_SCALE_FACTOR: f64 = 0.35;

/// The method used to populate a new world.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMethod {
    /// The lower half of the world split into four colored quadrants.
    #[default]
    Starter,
    /// Nothing at all.
    Empty,
    /// Cells filled with random palette colors.
    Random,
    /// Cells filled where 3-D Perlin noise is far from zero.
    Perlin,
    /// A diagonal staircase of shrinking blocks.
    Fractal,
}

impl World {
    /// Discards the current tree and generates a new one with the configured method.
    pub fn regenerate(&mut self) {
        let method = self.config.generation;
        let dimension = self.config.generation_dimension;
        let world_size = self.config.world_size;
        let origin = Point3::new(0.0, 0.0, 0.0);

        let mut root = match method {
            GenerationMethod::Starter => starter_layout(),
            GenerationMethod::Empty => OctreeNode::default(),
            GenerationMethod::Random => {
                let rng = &mut self.rng;
                let mut cell_value = |_: Point3<f32>, _: f32| {
                    if rng.f64() < RANDOM_SPARSENESS {
                        NO_VALUE
                    } else {
                        BlockColor::get_random_color(rng).value()
                    }
                };
                build_cells(dimension, origin, world_size, &mut cell_value)
            }
            GenerationMethod::Perlin => {
                let perlin = Perlin::new(self.rng.u32(..));
                let rng = &mut self.rng;
                let mut cell_value = |cell_origin: Point3<f32>, size: f32| {
                    let sample = perlin.get(to_perlin_pos(cell_origin, size));
                    if (PERLIN_NEGATIVE_THRESHOLD..=PERLIN_POSITIVE_THRESHOLD).contains(&sample) {
                        NO_VALUE
                    } else {
                        BlockColor::get_random_color(rng).value()
                    }
                };
                build_cells(dimension, origin, world_size, &mut cell_value)
            }
            GenerationMethod::Fractal => {
                let mut root = OctreeNode::default();
                simple_fractal(&mut root, dimension, BlockColor::WHITE.value());
                root
            }
        };
        root.simplify();

        info!(
            "Generated {:?} world of size {} ({} nodes)",
            method,
            world_size,
            root.node_count()
        );
        self.replace_root(root);
    }
}

/// Four colored quadrants filling the lower half of the world.
fn starter_layout() -> OctreeNode {
    let mut root = OctreeNode::default();
    root.set_child(4, OctreeNode::new(BlockColor::GREEN.value()));
    root.set_child(5, OctreeNode::new(BlockColor::RED.value()));
    root.set_child(6, OctreeNode::new(BlockColor::BLUE.value()));
    root.set_child(7, OctreeNode::new(BlockColor::YELLOW.value()));
    root
}

/// Builds a complete tree of `dimension` levels whose leaves are chosen by `cell_value`.
///
/// `cell_value` receives each leaf's minimum corner and side length.
fn build_cells<F>(dimension: u32, origin: Point3<f32>, size: f32, cell_value: &mut F) -> OctreeNode
where
    F: FnMut(Point3<f32>, f32) -> BlockValue,
{
    if dimension == 0 {
        return OctreeNode::new(cell_value(origin, size));
    }

    let half = size / 2.0;
    let mut node = OctreeNode::default();
    for octant in Octant::all() {
        let child = build_cells(dimension - 1, octant.child_origin(origin, half), half, cell_value);
        node.set_child(octant.index(), child);
    }
    node
}

/// Places a block in one corner, leaves the opposite corner empty and recurses into it.
fn simple_fractal(node: &mut OctreeNode, depth: u32, value: BlockValue) {
    if depth == 0 {
        return;
    }

    let (solid, hollow) = if depth % 2 == 0 { (0, 7) } else { (7, 0) };
    node.set_child(solid, OctreeNode::new(value));
    node.set_child(hollow, OctreeNode::default());
    if let Some(child) = node.child_mut(hollow) {
        simple_fractal(child, depth - 1, value);
    }
}

/// Converts the center of a cell into scaled Perlin noise coordinates.
fn to_perlin_pos(origin: Point3<f32>, size: f32) -> [f64; 3] {
    let half = size as f64 / 2.0;
    [
        (origin.x as f64 + half) * PERLIN_SCALE_FACTOR,
        (origin.y as f64 + half) * PERLIN_SCALE_FACTOR,
        (origin.z as f64 + half) * PERLIN_SCALE_FACTOR,
    ]
}
