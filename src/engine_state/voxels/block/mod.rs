//! # Block Module
//!
//! This module provides the block-related vocabulary shared by the octree, the world
//! and the editing session. A block is not stored as a struct: every octree leaf
//! carries a single packed `0xRRGGBB` integer, and this module owns the helpers
//! that give that integer its meaning.

pub mod block_color;
pub mod block_side;

/// The integer stored at every octree leaf.
///
/// `0` means "no block"; any other value is a packed `0xRRGGBB` color.
pub type BlockValue = u32;

/// The value of empty space. Should always equal 0.
pub const NO_VALUE: BlockValue = 0x000000;

/// Returns `true` if the value represents an occupied block.
#[inline]
pub fn is_solid(value: BlockValue) -> bool {
    value != NO_VALUE
}

/// Unpacks a block value into normalized `[r, g, b]` components.
///
/// # Arguments
/// * `value` - A packed `0xRRGGBB` color
///
/// # Returns
/// An array of three floats in `0.0..=1.0`, suitable for a shader uniform.
pub fn to_rgb(value: BlockValue) -> [f32; 3] {
    [
        ((value >> 16) & 0xff) as f32 / 255.0,
        ((value >> 8) & 0xff) as f32 / 255.0,
        (value & 0xff) as f32 / 255.0,
    ]
}

/// Packs 8-bit color channels into a block value.
///
/// Note that `from_rgb(0, 0, 0)` is [`NO_VALUE`], so pure black cannot be placed.
pub const fn from_rgb(r: u8, g: u8, b: u8) -> BlockValue {
    ((r as BlockValue) << 16) | ((g as BlockValue) << 8) | b as BlockValue
}
