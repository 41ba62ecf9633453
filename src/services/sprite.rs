//! Hardware sprite converters.
//!
//! Sprites are 16 pixels wide with two data words per line (`SPRxDATA`
//! holds color bit 0, `SPRxDATB` bit 1). Color 0 is transparent, so the
//! reference colors are matched on RGBA.

use std::path::{Path, PathBuf};

use super::converter::Converter;
use super::palette_match::{match_reference_palette, MatchMode};
use crate::error::ConvertError;
use crate::models::config::rgba_colors;
use crate::models::{IndexedImage, SheetConfig, SpriteConfig, VideoStandard};
use crate::rendering::asm::{bin16, directive, hex32, AsmSource};
use crate::rendering::bitplane::{pack_columns, WORD_PIXELS};

/// Mnemonic column width used by the sprite data files.
const SPRITE_SEP: &str = "   \t";
const BLOCK_SEP: &str = "  \t";

/// Single sprite, one `(DATA, DATB)` word pair per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerSprite {
    pub lines: Vec<(u16, u16)>,
}

impl AsmSource for PointerSprite {
    fn to_asm(&self) -> String {
        self.lines
            .iter()
            .map(|&(data, datb)| directive("dc.w", SPRITE_SEP, &[bin16(data), bin16(datb)]))
            .collect()
    }
}

pub struct PointerConverter {
    config: SpriteConfig,
}

impl PointerConverter {
    pub fn new(config: SpriteConfig) -> Result<Self, ConvertError> {
        config.validate()?;
        Ok(Self { config })
    }
}

impl Converter for PointerConverter {
    type Output = PointerSprite;

    fn convert(&self, image: &IndexedImage) -> Result<PointerSprite, ConvertError> {
        image.require_max_size(self.config.max_width, self.config.max_height)?;
        let map = match_reference_palette(image, &rgba_colors(&self.config.colors), MatchMode::Rgba)?;

        let mut lines = Vec::with_capacity(image.height() as usize);
        for (y, row) in image.rows().enumerate() {
            let numbers = map.map_row(row, y)?;
            let words = pack_columns(&numbers, 2);
            let (data, datb) = words.first().map_or((0, 0), |w| (w[0], w[1]));
            lines.push((data, datb));
        }

        tracing::info!(
            width = image.width(),
            lines = lines.len(),
            "Converted pointer sprite"
        );
        Ok(PointerSprite { lines })
    }
}

/// One animation frame: a line of attached sprites per row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteFrame {
    /// Source name written into the frame header comment
    pub name: String,
    /// `(DATA << 16) | DATB` per sprite, per row
    pub rows: Vec<Vec<u32>>,
    sprites: usize,
}

impl SpriteFrame {
    fn header(&self) -> String {
        format!("\t\tdcb.l{}{},0\t; {}\n", BLOCK_SEP, self.sprites, self.name)
    }
}

impl AsmSource for SpriteFrame {
    fn to_asm(&self) -> String {
        let mut code = self.header();
        for row in &self.rows {
            let longs: Vec<String> = row.iter().map(|&l| hex32(l)).collect();
            code.push_str(&directive("dc.l", SPRITE_SEP, &longs));
        }
        code
    }
}

/// All frames of both directions, terminated by an empty sprite line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteSheet {
    pub frames: Vec<SpriteFrame>,
    sprites: usize,
}

impl AsmSource for SpriteSheet {
    fn to_asm(&self) -> String {
        let mut code: String = self.frames.iter().map(AsmSource::to_asm).collect();
        code.push_str(&format!("\t\tdcb.l{}{},0\n", BLOCK_SEP, self.sprites));
        code
    }
}

/// Direction of a frame sequence, in sheet order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    West,
    East,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::West, Direction::East];

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::West => "west",
            Direction::East => "east",
        }
    }
}

pub struct SheetConverter {
    config: SheetConfig,
    standard: VideoStandard,
}

impl SheetConverter {
    pub fn new(config: SheetConfig, standard: VideoStandard) -> Result<Self, ConvertError> {
        config.validate()?;
        Ok(Self { config, standard })
    }

    fn sprites(&self) -> usize {
        self.config.width as usize / WORD_PIXELS
    }

    /// Relative path of a frame image, e.g. `ballwest/image000.png`.
    pub fn frame_path(&self, direction: Direction, frame: usize) -> PathBuf {
        let prefix = &self.config.standard(self.standard).prefix;
        PathBuf::from(format!("{}{}", prefix, direction.as_str()))
            .join(format!("image{:03}.png", frame))
    }

    /// Frame paths in sheet order: all west frames, then all east frames.
    pub fn frame_paths(&self) -> Vec<PathBuf> {
        let frames = self.config.standard(self.standard).frames;
        Direction::ALL
            .iter()
            .flat_map(|&direction| (0..frames).map(move |frame| (direction, frame)))
            .map(|(direction, frame)| self.frame_path(direction, frame))
            .collect()
    }

    /// Convert one frame; `name` goes into the header comment.
    pub fn convert_frame(&self, image: &IndexedImage, name: &str) -> Result<SpriteFrame, ConvertError> {
        let height = self.config.standard(self.standard).height;
        image.require_size(self.config.width, height)?;
        let map = match_reference_palette(image, &rgba_colors(&self.config.colors), MatchMode::Rgba)?;

        let mut rows = Vec::with_capacity(height as usize);
        for (y, row) in image.rows().enumerate() {
            let numbers = map.map_row(row, y)?;
            rows.push(
                pack_columns(&numbers, 2)
                    .iter()
                    .map(|w| ((w[0] as u32) << 16) | w[1] as u32)
                    .collect(),
            );
        }

        Ok(SpriteFrame {
            name: name.to_string(),
            rows,
            sprites: self.sprites(),
        })
    }

    /// Load and convert every frame below `base`.
    ///
    /// Frames are processed in sheet order; the first failing frame aborts
    /// the sheet and the error names its file.
    pub fn convert_all(&self, base: &Path) -> Result<SpriteSheet, ConvertError> {
        let paths = self.frame_paths();
        let mut frames = Vec::with_capacity(paths.len());

        for relative in paths {
            let path = base.join(&relative);
            let name = relative.to_string_lossy().replace('\\', "/");
            let frame = IndexedImage::open(&path)
                .and_then(|image| self.convert_frame(&image, &name))
                .map_err(|e| ConvertError::Frame {
                    path: path.clone(),
                    source: Box::new(e),
                })?;
            tracing::debug!(frame = %name, "Converted sprite frame");
            frames.push(frame);
        }

        tracing::info!(
            standard = ?self.standard,
            frames = frames.len(),
            sprites = self.sprites(),
            "Converted sprite sheet"
        );
        Ok(SpriteSheet {
            frames,
            sprites: self.sprites(),
        })
    }
}

impl Converter for SheetConverter {
    type Output = SpriteFrame;

    fn convert(&self, image: &IndexedImage) -> Result<SpriteFrame, ConvertError> {
        self.convert_frame(image, "frame")
    }
}
