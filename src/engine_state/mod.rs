//! # Engine State Module
//!
//! The editing session that drives the voxel core on behalf of the game loop.
//!
//! ## Key Components
//!
//! * `EngineState` - Owns the world and the player's editing state
//! * `PlayerAction` - One frame of editing input, already translated from raw keys and buttons
//! * `voxels` - The octree world, ray casting and generation
//!
//! ## Frame Flow
//!
//! Each frame the game loop translates input into a [`PlayerAction`], builds a
//! [`Ray`] from the camera and calls [`EngineState::apply_actions`]. Afterwards it
//! checks [`EngineState::take_world_changed`] to decide whether meshes and
//! collision bodies need rebuilding, and [`EngineState::highlight_box`] for the
//! outline around the block under the crosshair. Rendering, windowing and physics live
//! outside this crate.

use std::time::Duration;

use cgmath::Point3;
use log::{debug, info, warn};

use crate::config::WorldConfig;
use voxels::{
    block::{block_color::BlockColor, block_side::BlockSide, is_solid, BlockValue, NO_VALUE},
    bounding_box::BoundingBox,
    raycast::{Ray, RayCastHit},
    world::World,
};

pub mod voxels;

/// Repeat interval used when the configured one cannot be represented.
const DEFAULT_BLOCK_INTERVAL: Duration = Duration::from_millis(250);

/// What the camera ray pointed at when the target was last refreshed.
///
/// An owned copy of a [`RayCastHit`], so it can outlive the borrow of the world.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TargetedBlock {
    /// Value of the struck leaf
    pub value: BlockValue,
    /// Depth at which the struck leaf lives
    pub dimension: u32,
    /// Struck block, snapped to the edit grid
    pub position: Point3<f32>,
    /// Empty cell in front of the struck block, snapped to the edit grid
    pub previous_position: Point3<f32>,
    /// Face the ray entered through
    pub side: Option<BlockSide>,
}

impl From<&RayCastHit<'_>> for TargetedBlock {
    fn from(hit: &RayCastHit<'_>) -> Self {
        TargetedBlock {
            value: hit.block.value(),
            dimension: hit.dimension,
            position: hit.position,
            previous_position: hit.previous_position,
            side: hit.hit_side(),
        }
    }
}

/// Represents player actions derived from input for a single frame.
#[derive(Clone, Debug, Default)]
pub struct PlayerAction {
    /// Place button went down this frame
    pub start_placing: bool,
    /// Place button went up this frame
    pub stop_placing: bool,
    /// Break button went down this frame
    pub start_breaking: bool,
    /// Break button went up this frame
    pub stop_breaking: bool,
    /// Pick the color of the targeted block
    pub copy_block: bool,

    /// Edit one level finer
    pub shrink_block: bool,
    /// Edit one level coarser
    pub grow_block: bool,
    /// Switch to a palette color
    pub select_color: Option<BlockColor>,
    /// Throw the world away and generate a fresh one
    pub regenerate_world: bool,
}

/// The state of an editing session over one world.
///
/// # Examples
///
/// ```
/// use cgmath::{Point3, Vector3};
/// use voxel_octree::{EngineState, Ray, WorldConfig};
///
/// let mut engine_state = EngineState::new(WorldConfig::default());
/// let ray = Ray::new(Point3::new(5.0, 8.0, 5.0), Vector3::new(0.0, -1.0, 0.0));
///
/// // Stack a block on top of the starter floor.
/// assert!(engine_state.place_block(&ray));
/// assert!(engine_state.take_world_changed());
/// ```
pub struct EngineState {
    /// The voxel world being edited
    pub world: World,
    /// Current edit depth
    block_dimension: u32,
    /// Value written by place actions
    color: BlockValue,
    /// Whether the place button is held
    placing: bool,
    /// Whether the break button is held
    breaking: bool,
    /// Time since the last place or break
    time_since_last_edit: Duration,
    /// Minimum time between repeated edits while a button is held
    block_interval: Duration,
    /// Whether the world changed since the last call to `take_world_changed`
    world_changed: bool,
    /// The block under the crosshair as of the last refresh
    target: Option<TargetedBlock>,
}

impl EngineState {
    /// Creates a session over a freshly generated world.
    pub fn new(config: WorldConfig) -> Self {
        let block_dimension = config.default_block_dimension;
        let block_interval = Duration::try_from_secs_f32(config.block_interval_secs)
            .unwrap_or_else(|err| {
                warn!(
                    "Block interval {} rejected ({}), using {:?}",
                    config.block_interval_secs, err, DEFAULT_BLOCK_INTERVAL
                );
                DEFAULT_BLOCK_INTERVAL
            });
        let world = World::new(config);
        info!(
            "Editing session started at block dimension {} (block size {})",
            block_dimension,
            world.size_at_dimension(block_dimension)
        );

        Self {
            world,
            block_dimension,
            color: BlockColor::default().value(),
            placing: false,
            breaking: false,
            time_since_last_edit: Duration::ZERO,
            block_interval,
            world_changed: true,
            target: None,
        }
    }

    /// Returns the current edit depth.
    pub fn block_dimension(&self) -> u32 {
        self.block_dimension
    }

    /// Returns the side length of blocks at the current edit depth.
    pub fn block_size(&self) -> f32 {
        self.world.size_at_dimension(self.block_dimension)
    }

    /// Returns the delay between repeated edits while a button is held.
    pub fn block_interval(&self) -> Duration {
        self.block_interval
    }

    /// Returns the value placed by [`EngineState::place_block`].
    pub fn color(&self) -> BlockValue {
        self.color
    }

    /// Switches the placing color to a palette entry.
    pub fn set_color(&mut self, color: BlockColor) {
        self.color = color.value();
    }

    /// Places a block of the current color in front of the targeted surface.
    ///
    /// Nothing is placed when the ray hits nothing, when the struck leaf is finer
    /// than the current edit depth, or when the spot in front of it is outside the world.
    ///
    /// # Returns
    /// `true` if the world was modified.
    pub fn place_block(&mut self, ray: &Ray) -> bool {
        let Some(hit) = self.world.ray_cast(ray, self.block_dimension) else {
            return false;
        };
        if hit.dimension > self.block_dimension {
            return false;
        }

        let target = hit.previous_position;
        if !self.world.contains(target) {
            return false;
        }
        self.world.set_block_at(target, self.block_dimension, self.color);
        self.world_changed = true;
        debug!("Placed block {:#08x} at {:?}", self.color, target);
        true
    }

    /// Clears the targeted block at the current edit depth.
    ///
    /// # Returns
    /// `true` if the world was modified.
    pub fn break_block(&mut self, ray: &Ray) -> bool {
        let Some(hit) = self.world.ray_cast(ray, self.block_dimension) else {
            return false;
        };

        let target = hit.position;
        self.world.set_block_at(target, self.block_dimension, NO_VALUE);
        self.world_changed = true;
        debug!("Broke block at {:?}", target);
        true
    }

    /// Adopts the color of the targeted block.
    ///
    /// # Returns
    /// The copied value, or `None` if the ray hits nothing solid.
    pub fn copy_block(&mut self, ray: &Ray) -> Option<BlockValue> {
        let value = self.world.ray_cast(ray, self.block_dimension)?.block.value();
        if !is_solid(value) {
            return None;
        }
        self.color = value;
        match BlockColor::from_value(value) {
            Some(color) => debug!("Copied palette color {:?}", color),
            None => debug!("Copied block color {:#08x}", value),
        }
        Some(value)
    }

    /// Edits one level finer (smaller blocks), up to the configured maximum.
    pub fn shrink_block(&mut self) {
        let max = self.world.config().max_block_dimension;
        self.block_dimension = (self.block_dimension + 1).min(max);
        debug!("Block dimension is now {}", self.block_dimension);
    }

    /// Edits one level coarser (larger blocks), down to the configured minimum.
    pub fn grow_block(&mut self) {
        let min = self.world.config().min_block_dimension;
        self.block_dimension = self.block_dimension.saturating_sub(1).max(min);
        debug!("Block dimension is now {}", self.block_dimension);
    }

    /// Replaces the world with a freshly generated one.
    pub fn regenerate(&mut self) {
        self.world.regenerate();
        self.world_changed = true;
    }

    /// Casts `ray` and stores what it strikes as the current target.
    ///
    /// [`EngineState::apply_actions`] calls this after applying a frame's edits.
    pub fn refresh_target(&mut self, ray: &Ray) {
        self.target = self
            .world
            .ray_cast(ray, self.block_dimension)
            .map(|hit| TargetedBlock::from(&hit));
    }

    /// Returns the block under the crosshair as of the last refresh.
    pub fn target(&self) -> Option<&TargetedBlock> {
        self.target.as_ref()
    }

    /// Returns the box to highlight around the current target, if any.
    pub fn highlight_box(&self) -> Option<BoundingBox> {
        let target = self.target.as_ref()?;
        Some(BoundingBox::from_cube(target.position, self.block_size()))
    }

    /// Returns whether the world changed since the last call, and resets the flag.
    pub fn take_world_changed(&mut self) -> bool {
        std::mem::replace(&mut self.world_changed, false)
    }

    /// Applies one frame of player actions.
    ///
    /// Pressing place or break edits immediately; holding it repeats the edit
    /// every `block_interval_secs`.
    ///
    /// # Arguments
    /// * `actions` - The actions for this frame
    /// * `ray` - The camera ray used to target blocks
    /// * `dt` - The time elapsed since the last frame
    pub fn apply_actions(&mut self, actions: &PlayerAction, ray: &Ray, dt: Duration) {
        if actions.regenerate_world {
            self.regenerate();
        }
        if let Some(color) = actions.select_color {
            self.set_color(color);
        }
        if actions.shrink_block {
            self.shrink_block();
        }
        if actions.grow_block {
            self.grow_block();
        }
        if actions.copy_block {
            self.copy_block(ray);
        }

        self.time_since_last_edit += dt;

        if actions.start_breaking {
            self.break_block(ray);
            self.breaking = true;
            self.placing = false;
            self.time_since_last_edit = Duration::ZERO;
        } else if actions.start_placing {
            self.place_block(ray);
            self.placing = true;
            self.breaking = false;
            self.time_since_last_edit = Duration::ZERO;
        } else if self.time_since_last_edit >= self.block_interval {
            if self.placing {
                self.place_block(ray);
                self.time_since_last_edit = Duration::ZERO;
            } else if self.breaking {
                self.break_block(ray);
                self.time_since_last_edit = Duration::ZERO;
            }
        }

        if actions.stop_placing {
            self.placing = false;
        }
        if actions.stop_breaking {
            self.breaking = false;
        }

        self.refresh_target(ray);
    }
}
