use crate::error::ConvertError;
use crate::models::IndexedImage;
use crate::rendering::AsmSource;

/// Turns one decoded image into assembler data.
///
/// Conversions are all-or-nothing: an error means no part of the output is
/// usable.
pub trait Converter {
    type Output: AsmSource;

    fn convert(&self, image: &IndexedImage) -> Result<Self::Output, ConvertError>;
}
