//! Row decoding
//!
//! Reduces one scanline of palette-index pixels to its usage set.

mod usage;

pub use usage::{decode_row, RowUsage};
