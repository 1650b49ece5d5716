//! Random right-angle rotation of tiles.
//!
//! Each tile independently draws one of four orientations with equal
//! probability. Rotations are clockwise; square tiles keep their dimensions.

use image::{RgbImage, imageops};
use rand::Rng;

/// A right-angle rotation applied to a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    /// 90 degrees clockwise (transpose, then mirror left to right).
    Rotate90,
    /// 180 degrees (mirror on both axes).
    Rotate180,
    /// 270 degrees clockwise (transpose, then mirror top to bottom).
    Rotate270,
    /// No rotation.
    Identity,
}

impl Rotation {
    /// All rotations, in draw order.
    pub const ALL: [Rotation; 4] = [
        Rotation::Rotate90,
        Rotation::Rotate180,
        Rotation::Rotate270,
        Rotation::Identity,
    ];

    /// Map a draw in `0..4` to a rotation. Values wrap modulo 4.
    pub fn from_index(index: u32) -> Self {
        Self::ALL[(index % 4) as usize]
    }

    /// Draw a rotation uniformly at random.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::from_index(rng.gen_range(0..4))
    }

    /// The rotation that undoes this one.
    pub fn inverse(self) -> Self {
        match self {
            Rotation::Rotate90 => Rotation::Rotate270,
            Rotation::Rotate270 => Rotation::Rotate90,
            other => other,
        }
    }

    /// Rotate `tile`, consuming it.
    pub fn apply(self, tile: RgbImage) -> RgbImage {
        match self {
            Rotation::Rotate90 => imageops::rotate90(&tile),
            Rotation::Rotate180 => imageops::rotate180(&tile),
            Rotation::Rotate270 => imageops::rotate270(&tile),
            Rotation::Identity => tile,
        }
    }
}
