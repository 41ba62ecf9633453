//! True color values and palette lookup
//!
//! The allocator never inspects colors itself. It only forwards the true
//! color of a newly bound palette index into the [`ReprogramEvent`] so the
//! command emitter can quantize it for the target hardware.
//!
//! [`ReprogramEvent`]: crate::ReprogramEvent

use std::fmt;

use crate::PaletteIndex;

/// An 8-bit-per-channel color from a source image's color table.
///
/// Alpha is carried along because some reference palettes (sprites) use a
/// transparent entry; it defaults to fully opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrueColor {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
    /// Alpha channel (0 = transparent, 255 = opaque)
    pub a: u8,
}

impl TrueColor {
    /// Create an opaque color.
    ///
    /// # Example
    /// ```
    /// use slot_alloc::TrueColor;
    /// let red = TrueColor::rgb(255, 0, 0);
    /// assert_eq!(red.a, 255);
    /// ```
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from a packed `0xRRGGBB` value.
    #[inline]
    pub const fn from_rgb24(rgb: u32) -> Self {
        Self::rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    /// Pack the color channels as `0xRRGGBB`, dropping alpha.
    #[inline]
    pub const fn to_rgb24(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// The same color with alpha forced to opaque.
    #[inline]
    pub const fn opaque(self) -> Self {
        Self::rgb(self.r, self.g, self.b)
    }
}

impl Default for TrueColor {
    fn default() -> Self {
        Self::rgb(0, 0, 0)
    }
}

impl fmt::Display for TrueColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Lookup from palette index to true color.
///
/// Implemented for plain color tables (`[TrueColor]`, `Vec<TrueColor>`,
/// arrays) where the palette index is the position in the table.
pub trait ColorLookup {
    /// Returns the color bound to `index`, or `None` if the table has no
    /// such entry.
    fn true_color(&self, index: PaletteIndex) -> Option<TrueColor>;
}

impl ColorLookup for [TrueColor] {
    fn true_color(&self, index: PaletteIndex) -> Option<TrueColor> {
        self.get(index as usize).copied()
    }
}

impl ColorLookup for Vec<TrueColor> {
    fn true_color(&self, index: PaletteIndex) -> Option<TrueColor> {
        self.as_slice().true_color(index)
    }
}

impl<const N: usize> ColorLookup for [TrueColor; N] {
    fn true_color(&self, index: PaletteIndex) -> Option<TrueColor> {
        self.as_slice().true_color(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb24_packing() {
        let color = TrueColor::from_rgb24(0x12_34_56);
        assert_eq!(color, TrueColor::rgb(0x12, 0x34, 0x56));
        assert_eq!(color.to_rgb24(), 0x12_34_56);
    }

    #[test]
    fn test_display_is_hex() {
        assert_eq!(TrueColor::rgb(0, 0x55, 0xAA).to_string(), "#0055AA");
    }

    #[test]
    fn test_opaque_drops_transparency() {
        let clear = TrueColor::rgba(1, 2, 3, 0);
        assert_eq!(clear.opaque(), TrueColor::rgb(1, 2, 3));
    }

    #[test]
    fn test_lookup_out_of_range() {
        let table = vec![TrueColor::rgb(0, 0, 0), TrueColor::rgb(255, 255, 255)];
        assert_eq!(table.true_color(1), Some(TrueColor::rgb(255, 255, 255)));
        assert_eq!(table.true_color(2), None);

        let fixed = [TrueColor::rgb(9, 9, 9)];
        assert_eq!(fixed.true_color(0), Some(TrueColor::rgb(9, 9, 9)));
    }
}
