#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Octree
//!
//! A bounded voxel world stored in a sparse, self-simplifying octree, with point
//! reads and writes at any subdivision depth and fixed-step ray casting.
//!
//! ## Key Modules
//!
//! * `config` - World and editing settings loaded from JSON
//! * `engine_state` - The editing session (place, break, copy, block size) and the voxel core
//!
//! ## Architecture
//!
//! The crate covers the data side of a block-building game:
//! * The octree and its canonical-form maintenance
//! * Point addressing and lazy subdivision
//! * Ray marching for block targeting
//! * Leaf walks that feed an external renderer or physics layer
//!
//! Windowing, rendering and physics are left to the caller.
//!
//! ## Usage
//!
//! ```rust
//! use cgmath::{Point3, Vector3};
//! use voxel_octree::{Ray, World};
//!
//! let mut world = World::empty(10.0);
//! world.set_block_at(Point3::new(5.0, 5.0, 5.0), 4, 0xff0000);
//!
//! let ray = Ray::new(Point3::new(5.3, 9.0, 5.3), Vector3::new(0.0, -1.0, 0.0));
//! let hit = world.ray_cast(&ray, 4).unwrap();
//! assert_eq!(hit.block.value(), 0xff0000);
//! ```
//!
//! ## Performance Considerations
//!
//! * Uniform regions collapse into single leaves, so memory follows detail, not volume
//! * Reads stop at the first leaf, so coarse regions answer fine queries in few steps
//! * Every write runs one simplify pass; bursts of writes are better batched between frames

use cgmath::{Point3, Vector3};
use log::{info, warn};

pub mod config;
pub mod engine_state;

#[cfg(test)]
pub(crate) mod test_utils;

pub use config::{ConfigError, WorldConfig};
pub use engine_state::voxels::block::{block_color::BlockColor, block_side::BlockSide, BlockValue, NO_VALUE};
pub use engine_state::voxels::bounding_box::BoundingBox;
pub use engine_state::voxels::octree::{Octant, OctreeNode};
pub use engine_state::voxels::raycast::{Ray, RayCastHit};
pub use engine_state::voxels::world::world_generation::GenerationMethod;
pub use engine_state::voxels::world::world_iteration::{BlockInstance, BlockVisitor};
pub use engine_state::voxels::world::{BlockLookup, World, MAX_DIMENSION};
pub use engine_state::{EngineState, PlayerAction, TargetedBlock};

/// Runs a short headless editing session and logs what happens.
///
/// The first command-line argument may name a JSON config file; an unreadable or
/// invalid file falls back to the defaults.
pub fn run() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let config = match std::env::args().nth(1) {
        Some(path) => match WorldConfig::load(&path) {
            Ok(config) => {
                info!("Loaded config from {}", path);
                config
            }
            Err(err) => {
                warn!("Using default config: {}", err);
                WorldConfig::default()
            }
        },
        None => WorldConfig::default(),
    };

    let center = config.world_size / 2.0;
    let mut engine_state = EngineState::new(config);
    let down = Ray::new(
        Point3::new(center + 0.1, engine_state.world.world_size() * 0.9, center + 0.1),
        Vector3::new(0.0, -1.0, 0.0),
    );

    engine_state.refresh_target(&down);
    if let Some(target) = engine_state.target() {
        info!(
            "Looking at block {:#08x} at {:?} through its {:?} face",
            target.value, target.position, target.side
        );
    }

    engine_state.set_color(BlockColor::RED);
    for _ in 0..3 {
        engine_state.place_block(&down);
    }
    engine_state.break_block(&down);

    info!(
        "World holds {} nodes and {} visible blocks",
        engine_state.world.root().node_count(),
        engine_state.world.collect_instances().len()
    );
}
