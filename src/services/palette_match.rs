use slot_alloc::{PaletteIndex, TrueColor};

use crate::error::ConvertError;
use crate::models::IndexedImage;

/// How reference colors are compared against the image palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Compare red, green and blue only
    Rgb,
    /// Compare alpha too (transparent sprite color)
    Rgba,
}

/// Mapping from image palette index to reference color number.
///
/// Graphics tools and PNG optimizers may reorder palette entries, so the
/// color number of each index is found by looking the reference colors up
/// in the image palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorMap {
    numbers: Vec<Option<u8>>,
}

impl ColorMap {
    /// Locate every reference color in `palette`.
    ///
    /// # Errors
    ///
    /// - [`ConvertError::PaletteNotUnique`] if a reference color is listed
    ///   twice
    /// - [`ConvertError::PaletteMismatch`] if a reference color is missing
    pub fn new(
        palette: &[TrueColor],
        reference: &[TrueColor],
        mode: MatchMode,
    ) -> Result<Self, ConvertError> {
        let same = |a: TrueColor, b: TrueColor| match mode {
            MatchMode::Rgb => a.opaque() == b.opaque(),
            MatchMode::Rgba => a == b,
        };

        for (i, &color) in reference.iter().enumerate() {
            if reference[..i].iter().any(|&other| same(other, color)) {
                return Err(ConvertError::PaletteNotUnique { color });
            }
        }

        let mut numbers = vec![None; palette.len()];
        for (number, &color) in reference.iter().enumerate() {
            let index = palette
                .iter()
                .position(|&entry| same(entry, color))
                .ok_or(ConvertError::PaletteMismatch { color })?;
            numbers[index] = Some(number as u8);
        }

        Ok(Self { numbers })
    }

    /// Color number of `index`, `None` if the entry matches no reference
    /// color.
    #[inline]
    pub fn number(&self, index: PaletteIndex) -> Option<u8> {
        self.numbers.get(index as usize).copied().flatten()
    }

    /// Translate one scanline to color numbers.
    pub fn map_row(&self, row: &[PaletteIndex], y: usize) -> Result<Vec<u8>, ConvertError> {
        row.iter()
            .enumerate()
            .map(|(x, &index)| {
                self.number(index)
                    .ok_or(ConvertError::IndexOutOfRange { x, y, index })
            })
            .collect()
    }
}

/// Check a fixed-palette image: exactly as many palette entries as
/// reference colors, each reference color present once.
pub fn match_reference_palette(
    image: &IndexedImage,
    reference: &[TrueColor],
    mode: MatchMode,
) -> Result<ColorMap, ConvertError> {
    image.require_palette_len(reference.len())?;
    ColorMap::new(image.palette(), reference, mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> Vec<TrueColor> {
        vec![
            TrueColor::rgb(0xAA, 0xAA, 0xAA),
            TrueColor::rgb(0x00, 0x55, 0xAA),
            TrueColor::rgb(0x55, 0x55, 0x55),
            TrueColor::rgb(0x00, 0x22, 0x55),
        ]
    }

    #[test]
    fn test_reordered_palette_maps_back() {
        let r = reference();
        let palette = vec![r[3], r[0], r[2], r[1]];

        let map = ColorMap::new(&palette, &r, MatchMode::Rgb).unwrap();
        assert_eq!(map.number(0), Some(3));
        assert_eq!(map.number(1), Some(0));
        assert_eq!(map.number(2), Some(2));
        assert_eq!(map.number(3), Some(1));
        assert_eq!(map.map_row(&[1, 3, 0], 0).unwrap(), vec![0, 1, 3]);
    }

    #[test]
    fn test_missing_reference_color() {
        let r = reference();
        let palette = vec![r[0], r[1], r[2], TrueColor::rgb(1, 2, 3)];

        let error = ColorMap::new(&palette, &r, MatchMode::Rgb).unwrap_err();
        assert!(matches!(
            error,
            ConvertError::PaletteMismatch { color } if color == r[3]
        ));
    }

    #[test]
    fn test_duplicate_reference_color() {
        let mut r = reference();
        r[3] = r[1];
        let error = ColorMap::new(&r, &r, MatchMode::Rgb).unwrap_err();
        assert!(matches!(error, ConvertError::PaletteNotUnique { .. }));
    }

    #[test]
    fn test_rgba_mode_checks_transparency() {
        let clear = TrueColor::rgba(0xAA, 0xAA, 0xAA, 0);
        let reference = vec![clear, TrueColor::rgb(255, 0, 0)];
        let opaque_palette = vec![TrueColor::rgb(0xAA, 0xAA, 0xAA), TrueColor::rgb(255, 0, 0)];

        assert!(ColorMap::new(&opaque_palette, &reference, MatchMode::Rgba).is_err());
        assert!(ColorMap::new(&opaque_palette, &reference, MatchMode::Rgb).is_ok());
    }

    #[test]
    fn test_index_outside_palette() {
        let r = reference();
        let map = ColorMap::new(&r, &r, MatchMode::Rgb).unwrap();
        let error = map.map_row(&[0, 1, 9], 4).unwrap_err();
        assert!(matches!(
            error,
            ConvertError::IndexOutOfRange { x: 2, y: 4, index: 9 }
        ));
    }

    #[test]
    fn test_palette_size_is_checked_first() {
        let r = reference();
        let image = IndexedImage::new(1, 1, vec![0], r[..3].to_vec());
        let error = match_reference_palette(&image, &r, MatchMode::Rgb).unwrap_err();
        assert!(matches!(
            error,
            ConvertError::PaletteSize {
                expected: 4,
                actual: 3
            }
        ));
    }
}
