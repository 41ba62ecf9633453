use std::io::Read;
use std::path::Path;

use slot_alloc::{PaletteIndex, TrueColor};

use crate::error::ConvertError;

/// A decoded palette-based image: one palette index per pixel plus the
/// color table those indices refer to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedImage {
    width: u32,
    height: u32,
    /// Row-major palette indices
    pixels: Vec<PaletteIndex>,
    palette: Vec<TrueColor>,
}

impl IndexedImage {
    pub fn new(width: u32, height: u32, pixels: Vec<PaletteIndex>, palette: Vec<TrueColor>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize,
            "pixel count must match {}x{}",
            width,
            height
        );
        Self {
            width,
            height,
            pixels,
            palette,
        }
    }

    /// Decode a PNG file.
    pub fn open(path: &Path) -> Result<Self, ConvertError> {
        let file = std::fs::File::open(path)?;
        Self::decode(std::io::BufReader::new(file))
    }

    /// Decode PNG data held in memory.
    pub fn from_png_bytes(bytes: &[u8]) -> Result<Self, ConvertError> {
        Self::decode(bytes)
    }

    /// Decode an indexed PNG of bit depth 1, 2, 4 or 8.
    ///
    /// Palette alpha comes from the `tRNS` chunk; entries it does not cover
    /// are opaque.
    fn decode<R: Read>(source: R) -> Result<Self, ConvertError> {
        let mut decoder = png::Decoder::new(source);
        decoder.set_transformations(png::Transformations::IDENTITY);
        let mut reader = decoder.read_info()?;

        let (palette, width, height) = {
            let info = reader.info();
            if info.color_type != png::ColorType::Indexed {
                return Err(ConvertError::NotIndexed);
            }
            let plte = info.palette.as_deref().ok_or(ConvertError::NotIndexed)?;
            let trns = info.trns.as_deref().unwrap_or(&[]);
            let palette: Vec<TrueColor> = plte
                .chunks_exact(3)
                .enumerate()
                .map(|(i, rgb)| {
                    let alpha = trns.get(i).copied().unwrap_or(255);
                    TrueColor::rgba(rgb[0], rgb[1], rgb[2], alpha)
                })
                .collect();
            (palette, info.width, info.height)
        };

        let mut buf = vec![0; reader.output_buffer_size()];
        let frame = reader.next_frame(&mut buf)?;
        let bits: usize = match frame.bit_depth {
            png::BitDepth::One => 1,
            png::BitDepth::Two => 2,
            png::BitDepth::Four => 4,
            png::BitDepth::Eight => 8,
            png::BitDepth::Sixteen => return Err(ConvertError::UnsupportedBitDepth(16)),
        };
        let mask = ((1u16 << bits) - 1) as u8;

        let w = width as usize;
        let mut pixels = Vec::with_capacity(w * height as usize);
        for line in buf[..frame.buffer_size()]
            .chunks(frame.line_size)
            .take(height as usize)
        {
            for x in 0..w {
                let bit = x * bits;
                let shift = 8 - bits - (bit % 8);
                pixels.push((line[bit / 8] >> shift) & mask);
            }
        }

        tracing::debug!(
            width,
            height,
            bits,
            colors = palette.len(),
            "Decoded indexed PNG"
        );

        Ok(Self::new(width, height, pixels, palette))
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn palette(&self) -> &[TrueColor] {
        &self.palette
    }

    #[inline]
    pub fn pixels(&self) -> &[PaletteIndex] {
        &self.pixels
    }

    /// Iterate scanlines top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[PaletteIndex]> {
        // chunks_exact panics on a zero chunk size
        self.pixels.chunks_exact(self.width.max(1) as usize)
    }

    /// Reject images whose size differs from the expected one.
    pub fn require_size(&self, width: u32, height: u32) -> Result<(), ConvertError> {
        if self.width != width || self.height != height {
            return Err(ConvertError::Dimensions {
                width: self.width,
                height: self.height,
                expected_width: width,
                expected_height: height,
            });
        }
        Ok(())
    }

    /// Reject images larger than the given bounds.
    pub fn require_max_size(&self, max_width: u32, max_height: u32) -> Result<(), ConvertError> {
        if self.width > max_width || self.height > max_height {
            return Err(ConvertError::TooLarge {
                width: self.width,
                height: self.height,
                max_width,
                max_height,
            });
        }
        Ok(())
    }

    /// Reject images whose palette does not have exactly `colors` entries.
    pub fn require_palette_len(&self, colors: usize) -> Result<(), ConvertError> {
        if self.palette.len() != colors {
            return Err(ConvertError::PaletteSize {
                expected: colors,
                actual: self.palette.len(),
            });
        }
        Ok(())
    }
}
