//! # Voxel Core
//!
//! This module contains the data structures and algorithms that represent and
//! query the voxel world.
//!
//! ## Architecture
//!
//! * **Block**: Packed color values, the color palette and block faces
//! * **Octree**: The self-simplifying node type and the octant mapping
//! * **World**: Point addressing, reads, writes, generation and tree walks
//! * **Raycast**: Fixed-step ray marching against the world
//!
//! ## Data Flow
//!
//! 1. The session issues a point write or a ray cast
//! 2. The world descends the octree, creating nodes for writes
//! 3. The octree simplifies itself back to canonical form
//! 4. Results (values, hits, leaf boxes) return to the caller for rendering or physics
//!
//! ## Thread Safety
//!
//! Everything here is single-threaded and synchronous. The world is owned by one
//! game-loop thread and mutated between frames, so no locking is involved.

pub mod block;
pub mod bounding_box;
pub mod octree;
pub mod raycast;
pub mod world;
