use serde::Deserialize;
use std::path::Path;

use slot_alloc::{FillPolicy, PaletteIndex, TrueColor};

use crate::error::ConfigError;

/// Slots (color registers) available to the row converter.
pub const ROW_SLOTS: usize = 4;

/// Converter configuration loaded from a YAML file.
///
/// Every section and field is optional; missing values fall back to the
/// constants the display code was written against.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ConverterConfig {
    pub rows: RowsConfig,
    pub playfield: PlayfieldConfig,
    pub pointer: SpriteConfig,
    pub sheet: SheetConfig,
}

/// Adaptive-palette image with per-row color register writes.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RowsConfig {
    pub width: u32,
    pub height: u32,

    /// Longword position of each 16-pixel column within a row record
    pub column_order: Vec<usize>,

    /// Longword positions of the register value and register address
    pub command_order: [usize; 2],

    /// Address of the color register for slot 0
    pub register_base: u32,

    /// Address distance between the registers of consecutive slots
    pub register_stride: u32,

    /// Harmless register written on rows without a color change
    pub idle_register: u32,

    /// How never-used slots get their first color
    pub fill: FillMode,

    /// Palette index held by slot 0 before the first row
    pub background: Option<PaletteIndex>,

    /// Maximum number of slots the image may occupy
    pub ceiling: usize,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FillMode {
    /// First colors go into a header palette loaded before the image
    #[default]
    Preload,
    /// First colors are written by per-row register writes
    Reprogram,
}

impl From<FillMode> for FillPolicy {
    fn from(mode: FillMode) -> Self {
        match mode {
            FillMode::Preload => FillPolicy::Preload,
            FillMode::Reprogram => FillPolicy::Reprogram,
        }
    }
}

impl Default for RowsConfig {
    fn default() -> Self {
        Self {
            width: 320,
            height: 256,
            // record order is the MOVEM register list D1..D7/A0..A5, then M1..M9
            column_order: vec![
                13, 8, 14, 9, 15, 10, 16, 11, 17, 12, 18, // M1/A1 .. M6
                0, 1, 2, // D1/D2/D3
                3, 19, 4, 20, 5, 21, // D4/M7 .. D6/M9
            ],
            command_order: [6, 7], // D7/A0
            register_base: 0xDFF180,
            register_stride: 2 * 2,
            idle_register: 0xDFF116,
            fill: FillMode::Preload,
            background: None,
            ceiling: ROW_SLOTS,
        }
    }
}

impl RowsConfig {
    /// Longwords per row record.
    pub fn record_len(&self) -> usize {
        self.column_order.len() + self.command_order.len()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::Invalid {
            section: "rows",
            message,
        };

        if self.column_order.len() * 16 != self.width as usize {
            return Err(invalid(format!(
                "column_order covers {} columns but width {} needs {}",
                self.column_order.len(),
                self.width,
                self.width / 16
            )));
        }

        let mut positions: Vec<usize> = self
            .column_order
            .iter()
            .chain(self.command_order.iter())
            .copied()
            .collect();
        positions.sort_unstable();
        if positions.iter().enumerate().any(|(i, &p)| i != p) {
            return Err(invalid(format!(
                "column_order and command_order must cover 0..{} exactly once",
                self.record_len()
            )));
        }

        if self.ceiling == 0 || self.ceiling > ROW_SLOTS {
            return Err(invalid(format!(
                "ceiling {} outside 1..={}",
                self.ceiling, ROW_SLOTS
            )));
        }
        Ok(())
    }
}

/// Fixed-palette two-plane playfield image.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PlayfieldConfig {
    /// Data label written before the first row
    pub label: String,

    /// Image width in 16-pixel words
    pub words: usize,
    pub height: u32,

    /// OCS value of reference color 0; color 2 is its half-brite
    pub color0: u16,

    /// OCS value of reference color 1; color 3 is its half-brite
    pub color1: u16,

    /// First display line (comment only)
    pub display_vpos: u32,

    /// Horizontal position of the first plane data write (comment only)
    pub display_hpos: u32,

    /// Words per `dc.w` line
    pub block_words: usize,
}

impl Default for PlayfieldConfig {
    fn default() -> Self {
        Self {
            label: "MainImage".to_string(),
            words: 1 + 20 + 1,
            height: 280,
            color0: 0xAAA,
            color1: 0x05A,
            display_vpos: 0x1C,
            display_hpos: 0x38,
            block_words: 8 * 2,
        }
    }
}

impl PlayfieldConfig {
    pub fn width(&self) -> u32 {
        (self.words * 16) as u32
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.words == 0 || self.block_words < 2 || self.block_words % 2 != 0 {
            return Err(ConfigError::Invalid {
                section: "playfield",
                message: format!(
                    "words ({}) must be positive and block_words ({}) a positive even number",
                    self.words, self.block_words
                ),
            });
        }
        Ok(())
    }
}

/// Reference colors shared by the pointer and the ball sprites.
///
/// Color 0 is the transparent background; all four are matched on RGBA.
pub fn default_sprite_colors() -> Vec<[u8; 4]> {
    vec![
        [0xA * 0x11, 0xA * 0x11, 0xA * 0x11, 0],
        [0xF * 0x11, 0, 0, 255],
        [0xF * 0x11, 0xD * 0x11, 0xD * 0x11, 255],
        [0xF * 0x11, 0xF * 0x11, 0xF * 0x11, 255],
    ]
}

/// Single hardware sprite (mouse pointer).
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SpriteConfig {
    pub max_width: u32,
    pub max_height: u32,
    pub colors: Vec<[u8; 4]>,
}

impl Default for SpriteConfig {
    fn default() -> Self {
        Self {
            max_width: 16,
            max_height: 320 * 9 / 16,
            colors: default_sprite_colors(),
        }
    }
}

/// Animation frames made of several attached sprites.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SheetConfig {
    pub width: u32,
    pub pal: StandardConfig,
    pub ntsc: StandardConfig,
    pub colors: Vec<[u8; 4]>,
}

/// Frame geometry for one video standard.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct StandardConfig {
    /// File name prefix of the frame directories
    pub prefix: String,

    /// Frames per direction
    pub frames: usize,
    pub height: u32,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            width: 7 * 16,
            pal: StandardConfig {
                prefix: "ball".to_string(),
                frames: 6 * 2 * 2,
                height: 112,
            },
            ntsc: StandardConfig {
                prefix: "ntsc".to_string(),
                frames: 7 * 2 * 2,
                height: 93,
            },
            colors: default_sprite_colors(),
        }
    }
}

/// Video standard of a sprite sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VideoStandard {
    /// 50Hz, 6*2 colors per frame pair
    #[default]
    Pal,
    /// 60Hz, 7*2 colors per frame pair
    Ntsc,
}

impl SheetConfig {
    pub fn standard(&self, standard: VideoStandard) -> &StandardConfig {
        match standard {
            VideoStandard::Pal => &self.pal,
            VideoStandard::Ntsc => &self.ntsc,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.width % 16 != 0 {
            return Err(ConfigError::Invalid {
                section: "sheet",
                message: format!("width {} is not a multiple of 16", self.width),
            });
        }
        validate_colors("sheet", &self.colors)
    }
}

impl SpriteConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_width == 0 || self.max_width > 16 {
            return Err(ConfigError::Invalid {
                section: "pointer",
                message: format!("max_width {} outside 1..=16", self.max_width),
            });
        }
        validate_colors("pointer", &self.colors)
    }
}

fn validate_colors(section: &'static str, colors: &[[u8; 4]]) -> Result<(), ConfigError> {
    if colors.len() != 4 {
        return Err(ConfigError::Invalid {
            section,
            message: format!("expected 4 colors, got {}", colors.len()),
        });
    }
    Ok(())
}

/// Convert `[r, g, b, a]` config entries to colors.
pub fn rgba_colors(colors: &[[u8; 4]]) -> Vec<TrueColor> {
    colors
        .iter()
        .map(|&[r, g, b, a]| TrueColor::rgba(r, g, b, a))
        .collect()
}

impl ConverterConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `path`, or use defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            tracing::debug!("No config file, using defaults");
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&content)?;
        tracing::info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rows.validate()?;
        self.playfield.validate()?;
        self.pointer.validate()?;
        self.sheet.validate()
    }
}
