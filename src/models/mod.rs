pub mod config;
pub mod image;

pub use config::{
    ConverterConfig, FillMode, PlayfieldConfig, RowsConfig, SheetConfig, SpriteConfig,
    VideoStandard, ROW_SLOTS,
};
pub use image::IndexedImage;
