//! # Block Color Module
//!
//! This module defines the palette of colors a player can build with.
//! It provides conversion between palette entries and packed block values, and
//! random palette selection for procedural generation.

use num_derive::FromPrimitive;

use super::{from_rgb, BlockValue};

/// Packed colors of each palette entry, indexed by `BlockColor as usize`.
pub static BLOCK_COLOR_TO_VALUE: [BlockValue; 5] = [
    from_rgb(0xee, 0xee, 0xee), // WHITE
    from_rgb(0xea, 0x46, 0x11), // RED
    from_rgb(0x25, 0xe1, 0x0e), // GREEN
    from_rgb(0x29, 0x6f, 0xff), // BLUE
    from_rgb(0xf9, 0xdd, 0x07), // YELLOW
];

/// Enumerates the colors available in the block palette.
///
/// The `FromPrimitive` derive allows conversion from the number keys the
/// game loop binds to palette slots.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
pub enum BlockColor {
    /// The default building color.
    WHITE,
    /// Red, used by the starter layout.
    RED,
    /// Green, used by the starter layout.
    GREEN,
    /// Blue, used by the starter layout.
    BLUE,
    /// Yellow, used by the starter layout.
    YELLOW,
}

impl Default for BlockColor {
    fn default() -> Self {
        BlockColor::WHITE
    }
}

impl BlockColor {
    /// The number of entries in the palette.
    pub const COUNT: u8 = 5;

    /// Returns the packed block value of this palette entry.
    pub fn value(self) -> BlockValue {
        BLOCK_COLOR_TO_VALUE[self as usize]
    }

    /// Converts a palette slot to a `BlockColor`.
    ///
    /// # Arguments
    /// * `slot` - The zero-based palette slot
    ///
    /// # Returns
    /// The palette entry, or `None` if the slot is past the end of the palette.
    pub fn from_slot(slot: u8) -> Option<Self> {
        num::FromPrimitive::from_u8(slot)
    }

    /// Looks up the palette entry whose packed value equals `value`, if any.
    pub fn from_value(value: BlockValue) -> Option<Self> {
        BLOCK_COLOR_TO_VALUE
            .iter()
            .position(|&v| v == value)
            .and_then(|slot| Self::from_slot(slot as u8))
    }

    /// Picks a random palette entry using the given generator.
    ///
    /// World generation passes its own seeded generator so that a seed
    /// reproduces the same world.
    pub fn get_random_color(rng: &mut fastrand::Rng) -> Self {
        Self::from_slot(rng.u8(0..Self::COUNT)).unwrap_or_default()
    }
}
