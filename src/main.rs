//! # Voxel Octree Demo Entry Point
//!
//! Runs a short headless editing session through the library's `run()` function.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=debug cargo run --release -- config.json
//! ```

fn main() {
    voxel_octree::run();
}
