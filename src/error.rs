use std::path::PathBuf;

use slot_alloc::{AllocError, TrueColor};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("PNG decode error: {0}")]
    Decode(String),

    #[error("image has to be palette-based")]
    NotIndexed,

    #[error("Unsupported bit depth: {0}")]
    UnsupportedBitDepth(u8),

    #[error("image size has to be {expected_width}x{expected_height} (got {width}x{height})")]
    Dimensions {
        width: u32,
        height: u32,
        expected_width: u32,
        expected_height: u32,
    },

    #[error("image size has to be at most {max_width}x{max_height} (got {width}x{height})")]
    TooLarge {
        width: u32,
        height: u32,
        max_width: u32,
        max_height: u32,
    },

    #[error("image has to contain {expected} colors (got {actual})")]
    PaletteSize { expected: usize, actual: usize },

    #[error("image palette mismatch: {color} not found")]
    PaletteMismatch { color: TrueColor },

    #[error("palette is not unique: {color} is listed twice")]
    PaletteNotUnique { color: TrueColor },

    #[error("pixel [{x},{y}] uses index {index} outside the palette")]
    IndexOutOfRange { x: usize, y: usize, index: u8 },

    #[error(transparent)]
    Alloc(#[from] AllocError),

    #[error("{}: {source}", path.display())]
    Frame {
        path: PathBuf,
        source: Box<ConvertError>,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<png::DecodingError> for ConvertError {
    fn from(e: png::DecodingError) -> Self {
        ConvertError::Decode(e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid {section} config: {message}")]
    Invalid {
        section: &'static str,
        message: String,
    },
}

impl From<ConfigError> for ConvertError {
    fn from(e: ConfigError) -> Self {
        ConvertError::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slot_alloc::OverflowReason;

    #[test]
    fn test_dimensions_message() {
        let error = ConvertError::Dimensions {
            width: 100,
            height: 50,
            expected_width: 320,
            expected_height: 256,
        };
        assert_eq!(
            error.to_string(),
            "image size has to be 320x256 (got 100x50)"
        );
    }

    #[test]
    fn test_not_indexed_message() {
        assert_eq!(
            ConvertError::NotIndexed.to_string(),
            "image has to be palette-based"
        );
    }

    #[test]
    fn test_palette_mismatch_message() {
        let error = ConvertError::PaletteMismatch {
            color: TrueColor::rgb(0x00, 0x55, 0xAA),
        };
        assert_eq!(error.to_string(), "image palette mismatch: #0055AA not found");
    }

    #[test]
    fn test_alloc_error_is_transparent() {
        let alloc = AllocError::Overflow {
            row: 7,
            column: 33,
            index: 4,
            slots: vec![Some(0), Some(1), Some(2), Some(3)],
            reason: OverflowReason::AllSlotsLive,
        };
        let expected = alloc.to_string();
        let error: ConvertError = alloc.into();
        assert!(matches!(error, ConvertError::Alloc(_)));
        assert_eq!(error.to_string(), expected);
        assert!(expected.starts_with("too many colors at [33,7]"));
    }

    #[test]
    fn test_frame_error_names_file() {
        let error = ConvertError::Frame {
            path: PathBuf::from("ballwest/image003.png"),
            source: Box::new(ConvertError::NotIndexed),
        };
        assert_eq!(
            error.to_string(),
            "ballwest/image003.png: image has to be palette-based"
        );
    }

    #[test]
    fn test_config_error_into_convert_error() {
        let error = ConfigError::Invalid {
            section: "rows",
            message: "column_order covers 19 columns".to_string(),
        };
        let converted: ConvertError = error.into();
        assert_eq!(
            converted.to_string(),
            "Invalid configuration: Invalid rows config: column_order covers 19 columns"
        );
    }
}
