//! # Ray Cast Module
//!
//! Finds the first occupied block along a ray by marching it in fixed steps and
//! sampling the octree at every step.
//!
//! ## Algorithm
//!
//! The step is `ray_step_base * 2^-block_dimension`, so finer edit depths sample
//! more densely. Each sample descends the octree until it reaches a leaf; a solid
//! leaf is a hit. Samples outside the world are empty. The march gives up after
//! `ray_max_steps` samples, which bounds its cost but means distant geometry may
//! be missed.
//!
//! On a hit, both the hit sample and the last empty sample before it are snapped
//! down to the block grid of the requested dimension. Editing code places new
//! blocks at the previous position (in front of the surface) and removes blocks
//! at the hit position.

use cgmath::{InnerSpace, Point3, Vector3};
use log::trace;

use super::block::{block_side::BlockSide, is_solid};
use super::octree::OctreeNode;
use super::world::{World, MAX_DIMENSION};

/// A half-line through world space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    /// Where the ray starts.
    pub origin: Point3<f32>,
    /// Unit direction of travel.
    pub direction: Vector3<f32>,
}

impl Ray {
    /// Creates a ray, normalizing `direction`.
    ///
    /// # Panics
    /// Panics if `direction` is the zero vector.
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Self {
        assert!(direction.magnitude2() > 0.0, "ray direction must be non-zero");
        Ray {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Returns the point `distance` units along the ray.
    pub fn at(&self, distance: f32) -> Point3<f32> {
        self.origin + self.direction * distance
    }
}

/// The first occupied block found by [`World::ray_cast`].
///
/// The hit borrows the world; it is meant to be used and dropped within a frame.
#[derive(Copy, Clone, Debug)]
pub struct RayCastHit<'a> {
    /// The leaf that was struck.
    pub block: &'a OctreeNode,
    /// The depth at which the struck leaf lives.
    pub dimension: u32,
    /// The hit sample snapped down to the block grid.
    pub position: Point3<f32>,
    /// The last empty sample before the hit, snapped down to the block grid.
    pub previous_position: Point3<f32>,
}

impl RayCastHit<'_> {
    /// Returns the face of the hit block the ray entered through.
    ///
    /// `None` when the ray started inside the block it hit.
    pub fn hit_side(&self) -> Option<BlockSide> {
        BlockSide::from_offset(self.previous_position - self.position)
    }
}

/// Rounds `num` down to the nearest multiple of `multiple`.
pub fn floor_nearest_multiple(num: f32, multiple: f32) -> f32 {
    (num / multiple).floor() * multiple
}

fn snap_to_grid(point: Point3<f32>, block_size: f32) -> Point3<f32> {
    Point3::new(
        floor_nearest_multiple(point.x, block_size),
        floor_nearest_multiple(point.y, block_size),
        floor_nearest_multiple(point.z, block_size),
    )
}

impl World {
    /// Returns the distance between two samples of a ray cast at `block_dimension`.
    ///
    /// `block_dimension` is clamped to [`MAX_DIMENSION`].
    pub fn ray_step_size(&self, block_dimension: u32) -> f32 {
        self.config().ray_step_base * 2f32.powi(-(block_dimension.min(MAX_DIMENSION) as i32))
    }

    /// Marches `ray` through the world and returns the first occupied block.
    ///
    /// # Arguments
    /// * `ray` - The ray to march, usually from the camera along its view direction
    /// * `block_dimension` - The edit depth; sets the step size and the snapping grid.
    ///   Depths past [`MAX_DIMENSION`] are treated as `MAX_DIMENSION`.
    ///
    /// # Returns
    /// The hit, or `None` if no occupied block was sampled within the step budget.
    pub fn ray_cast(&self, ray: &Ray, block_dimension: u32) -> Option<RayCastHit<'_>> {
        let block_size = self.size_at_dimension(block_dimension);
        let step = ray.direction * self.ray_step_size(block_dimension);

        let mut position = ray.origin;
        let mut previous_position = position;
        for _ in 0..self.config().ray_max_steps {
            if let Some(lookup) = self.get_block_at(position) {
                if !lookup.node.is_leaf() || is_solid(lookup.node.value()) {
                    let hit = RayCastHit {
                        block: lookup.node,
                        dimension: lookup.dimension,
                        position: snap_to_grid(position, block_size),
                        previous_position: snap_to_grid(previous_position, block_size),
                    };
                    trace!(
                        "Ray hit block {:#08x} at {:?} (dimension {})",
                        hit.block.value(),
                        hit.position,
                        hit.dimension
                    );
                    return Some(hit);
                }
            }

            previous_position = position;
            position += step;
        }

        trace!("Ray from {:?} found nothing", ray.origin);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;
    use crate::engine_state::voxels::block::BlockValue;
    use crate::engine_state::voxels::world::world_generation::GenerationMethod;
    use crate::test_utils::assert_approx_eq;

    const RED: BlockValue = 0xff0000;

    /// A 2-unit world whose only occupied leaf is the unit cube at the origin.
    fn unit_cube_world_with_budget(ray_max_steps: u32) -> World {
        let mut world = World::new(WorldConfig {
            world_size: 2.0,
            generation: GenerationMethod::Empty,
            ray_max_steps,
            ..WorldConfig::default()
        });
        world.set_block_at(Point3::new(0.5, 0.5, 0.5), 1, RED);
        world
    }

    fn unit_cube_world() -> World {
        unit_cube_world_with_budget(WorldConfig::default().ray_max_steps)
    }

    #[test]
    fn floor_snaps_down_including_negatives() {
        assert_eq!(floor_nearest_multiple(1.3, 0.5), 1.0);
        assert_eq!(floor_nearest_multiple(-0.1, 0.5), -0.5);
        assert_eq!(floor_nearest_multiple(2.0, 0.5), 2.0);
    }

    #[test]
    fn step_size_halves_per_dimension() {
        let world = World::empty(10.0);
        assert_approx_eq(world.ray_step_size(0), 0.05);
        assert_approx_eq(world.ray_step_size(4), 0.003125);
        assert!(world.ray_step_size(u32::MAX) > 0.0);
    }

    #[test]
    fn ray_hits_cube_face() {
        let world = unit_cube_world();
        let ray = Ray::new(Point3::new(0.5, 0.5, -0.9876), Vector3::new(0.0, 0.0, 1.0));
        let hit = world.ray_cast(&ray, 1).unwrap();

        assert_eq!(hit.block.value(), RED);
        assert_eq!(hit.dimension, 1);
        assert_eq!(hit.position, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(hit.previous_position, Point3::new(0.0, 0.0, -1.0));
        assert_eq!(hit.hit_side(), Some(BlockSide::BACK));
    }

    #[test]
    fn ray_hits_from_above() {
        let world = unit_cube_world();
        let ray = Ray::new(Point3::new(0.25, 1.6, 0.75), Vector3::new(0.0, -1.0, 0.0));
        let hit = world.ray_cast(&ray, 1).unwrap();

        assert_eq!(hit.position, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(hit.previous_position, Point3::new(0.0, 1.0, 0.0));
        assert_eq!(hit.hit_side(), Some(BlockSide::TOP));
    }

    #[test]
    fn ray_pointing_away_finds_nothing() {
        let world = unit_cube_world();
        let ray = Ray::new(Point3::new(0.5, 0.5, -0.9876), Vector3::new(0.0, 0.0, -1.0));
        assert!(world.ray_cast(&ray, 1).is_none());
    }

    #[test]
    fn ray_starting_inside_a_block_hits_immediately() {
        let world = unit_cube_world();
        let ray = Ray::new(Point3::new(0.5, 0.5, 0.5), Vector3::new(1.0, 0.0, 0.0));
        let hit = world.ray_cast(&ray, 1).unwrap();
        assert_eq!(hit.position, hit.previous_position);
        assert_eq!(hit.hit_side(), None);
    }

    #[test]
    fn coarse_leaf_reports_its_own_dimension() {
        let world = unit_cube_world();
        let ray = Ray::new(Point3::new(0.3, 0.3, -0.4321), Vector3::new(0.0, 0.0, 1.0));
        let hit = world.ray_cast(&ray, 3).unwrap();
        // The leaf lives at dimension 1 but the hit snaps to the dimension 3 grid.
        assert_eq!(hit.dimension, 1);
        assert_eq!(hit.position, Point3::new(0.25, 0.25, 0.0));
        assert_eq!(hit.previous_position, Point3::new(0.25, 0.25, -0.25));
    }

    #[test]
    fn very_deep_cast_snaps_to_the_finest_grid() {
        let world = unit_cube_world();
        let ray = Ray::new(Point3::new(0.5, 0.5, 0.5), Vector3::new(0.0, 1.0, 0.0));
        let deep = world.ray_cast(&ray, 200).unwrap();
        let finest = world.ray_cast(&ray, MAX_DIMENSION).unwrap();

        assert_eq!(deep.position, Point3::new(0.5, 0.5, 0.5));
        assert_eq!(deep.position, finest.position);
        assert_eq!(deep.previous_position, finest.previous_position);
    }

    #[test]
    fn budget_limits_reach() {
        let world = unit_cube_world_with_budget(10);
        let ray = Ray::new(Point3::new(0.5, 0.5, -0.9876), Vector3::new(0.0, 0.0, 1.0));
        assert!(world.ray_cast(&ray, 1).is_none());
    }

    #[test]
    fn ray_direction_is_normalized() {
        let ray = Ray::new(Point3::new(1.0, 2.0, 3.0), Vector3::new(0.0, 0.0, 4.0));
        assert_eq!(ray.direction, Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(ray.at(2.0), Point3::new(1.0, 2.0, 5.0));
    }

    #[test]
    #[should_panic]
    fn zero_direction_is_rejected() {
        Ray::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 0.0));
    }
}
