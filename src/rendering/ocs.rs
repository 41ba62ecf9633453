//! Amiga OCS 12-bit color encoding.
//!
//! OCS color registers hold 4 bits per channel (`0x0RGB`). True colors are
//! quantized per channel with a fixed linear scale and rounding bias, the
//! same mapping graphics tools use when they export 4-bit palettes.

use std::fmt;

use slot_alloc::TrueColor;

/// 8-bit channel value of one 4-bit step (`0xFF / 0xF`).
pub const OCS_SCALE: u16 = 0xFF / 0xF;

/// Rounding bias added before dividing by [`OCS_SCALE`].
pub const OCS_ROUND: u16 = (OCS_SCALE - 1) / 2;

/// A 12-bit OCS color register value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OcsColor(u16);

impl OcsColor {
    pub const BLACK: Self = Self(0);

    /// Wrap a raw register value; bits above the low 12 are dropped.
    #[inline]
    pub const fn new(raw: u16) -> Self {
        Self(raw & 0x0FFF)
    }

    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Quantize a true color to 4 bits per channel. Alpha is ignored.
    pub fn from_true_color(color: TrueColor) -> Self {
        let q = |c: u8| (c as u16 + OCS_ROUND) / OCS_SCALE;
        Self((q(color.r) << 8) | (q(color.g) << 4) | q(color.b))
    }

    /// Expand back to 8 bits per channel (`0xA` becomes `0xAA`).
    pub fn to_true_color(self) -> TrueColor {
        let e = |shift: u16| (((self.0 >> shift) & 0xF) * OCS_SCALE) as u8;
        TrueColor::rgb(e(8), e(4), e(0))
    }

    /// The color shown by the extra-half-brite mode for this register:
    /// every channel at half intensity.
    #[inline]
    pub const fn half_brite(self) -> Self {
        Self((self.0 >> 1) & 0x0777)
    }

    /// The color duplicated into both halves of a longword, as written by a
    /// single `MOVE.L` to a pair of adjacent color registers.
    #[inline]
    pub const fn to_long_pair(self) -> u32 {
        ((self.0 as u32) << 16) | self.0 as u32
    }
}

impl From<TrueColor> for OcsColor {
    fn from(color: TrueColor) -> Self {
        Self::from_true_color(color)
    }
}

impl fmt::Display for OcsColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:03X}", self.0)
    }
}
