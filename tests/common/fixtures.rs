//! Test fixtures: indexed PNG images built in memory.

use std::path::{Path, PathBuf};

use planeconv::models::IndexedImage;
use slot_alloc::TrueColor;

/// Builder for 8-bit indexed PNG fixtures.
pub struct TestImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
    pub palette: Vec<TrueColor>,
}

impl TestImage {
    /// Image whose pixel indices come from `index(x, y)`.
    pub fn from_fn(
        width: u32,
        height: u32,
        palette: Vec<TrueColor>,
        index: impl Fn(u32, u32) -> u8,
    ) -> Self {
        let pixels = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| index(x, y))
            .collect();
        Self {
            width,
            height,
            pixels,
            palette,
        }
    }

    /// Encode as PNG; alpha goes into a `tRNS` chunk when any entry is not
    /// opaque.
    pub fn png_bytes(&self) -> Vec<u8> {
        let plte: Vec<u8> = self
            .palette
            .iter()
            .flat_map(|c| [c.r, c.g, c.b])
            .collect();
        let trns: Vec<u8> = self.palette.iter().map(|c| c.a).collect();

        let mut buf = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buf, self.width, self.height);
            encoder.set_color(png::ColorType::Indexed);
            encoder.set_depth(png::BitDepth::Eight);
            encoder.set_palette(plte);
            if trns.iter().any(|&a| a != 255) {
                encoder.set_trns(trns);
            }
            let mut writer = encoder.write_header().expect("PNG header");
            writer.write_image_data(&self.pixels).expect("PNG data");
        }
        buf
    }

    /// Write the PNG to `dir/name`, creating parent directories.
    pub fn write(&self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create fixture dir");
        }
        std::fs::write(&path, self.png_bytes()).expect("write fixture");
        path
    }

    /// Decode through the same path the converters use.
    pub fn decode(&self) -> IndexedImage {
        IndexedImage::from_png_bytes(&self.png_bytes()).expect("decode fixture")
    }
}

/// Eight colors whose OCS values are `$(2i)(i)(15-2i)`.
pub fn ramp_palette() -> Vec<TrueColor> {
    (0..8u8)
        .map(|i| TrueColor::rgb(i * 0x22, i * 0x11, 0xFF - i * 0x22))
        .collect()
}

/// The four sprite reference colors, transparent grey first.
pub fn sprite_palette() -> Vec<TrueColor> {
    vec![
        TrueColor::rgba(0xAA, 0xAA, 0xAA, 0),
        TrueColor::rgb(0xFF, 0x00, 0x00),
        TrueColor::rgb(0xFF, 0xDD, 0xDD),
        TrueColor::rgb(0xFF, 0xFF, 0xFF),
    ]
}
