//! 24-bit RGB colors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque RGB color stored as `0xRRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(u32);

impl Color {
    /// Create a color from a `0xRRGGBB` value; higher bits are dropped
    pub const fn from_hex(hex: u32) -> Self {
        Self(hex & 0x00ff_ffff)
    }

    /// The `0xRRGGBB` value
    pub const fn hex(self) -> u32 {
        self.0
    }

    /// Red, green, blue channels
    pub const fn rgb(self) -> [u8; 3] {
        [(self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8]
    }

    /// Build from red, green, blue channels
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Opaque RGBA8 pixel
    pub const fn to_rgba8(self) -> [u8; 4] {
        let [r, g, b] = self.rgb();
        [r, g, b, 0xff]
    }

    /// Channel-wise product, as a texture sample tinted by a material color
    pub fn modulate(self, other: Self) -> Self {
        let [r0, g0, b0] = self.rgb();
        let [r1, g1, b1] = other.rgb();
        let mul = |a: u8, b: u8| ((u16::from(a) * u16::from(b) + 127) / 255) as u8;
        Self::from_rgb(mul(r0, r1), mul(g0, g1), mul(b0, b1))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}
