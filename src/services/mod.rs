pub mod converter;
pub mod palette_match;
pub mod playfield;
pub mod row_converter;
pub mod sprite;

pub use converter::Converter;
pub use palette_match::{match_reference_palette, ColorMap, MatchMode};
pub use playfield::{Playfield, PlayfieldConverter};
pub use row_converter::{RowConverter, RowProgram};
pub use sprite::{Direction, PointerConverter, PointerSprite, SheetConverter, SpriteFrame, SpriteSheet};
