//! slot-alloc: per-scanline color register allocation
//!
//! Display hardware with only a handful of color registers can still show
//! images with more colors if registers are rewritten between scanlines.
//! This crate decides, row by row, which palette index lives in which
//! register slot, when a slot can be reused silently and when it must be
//! reprogrammed, and when an image simply cannot be encoded.
//!
//! # Quick Start
//!
//! ```
//! use slot_alloc::{decode_row, SlotTable, TrueColor};
//!
//! let colors = vec![
//!     TrueColor::rgb(0, 0, 0),
//!     TrueColor::rgb(255, 0, 0),
//!     TrueColor::rgb(0, 0, 255),
//! ];
//! let mut table = SlotTable::with_background(4, 0).unwrap();
//!
//! // Row 0 introduces red: one register write.
//! let first = table.allocate_row(&decode_row(&[0, 0, 1, 1]), &colors).unwrap();
//! let event = first.reprogram.unwrap();
//! assert_eq!(event.slot, 1);
//! assert_eq!(event.color, TrueColor::rgb(255, 0, 0));
//!
//! // Row 1 reuses what is bound: no write.
//! let second = table.allocate_row(&decode_row(&[1, 0, 1, 0]), &colors).unwrap();
//! assert!(second.reprogram.is_none());
//! ```
//!
//! # Allocation Rules
//!
//! For every row:
//!
//! 1. Indices already bound keep their slot.
//! 2. No new index: nothing changes, no register write.
//! 3. One new index: it takes the lowest-indexed slot whose current color
//!    the row does not use, and the row gets one [`ReprogramEvent`].
//! 4. Otherwise the row overflows ([`AllocError::Overflow`]).
//!
//! Only one register can be rewritten per scanline, so there is never more
//! than one event per row. The allocator is greedy and never looks ahead;
//! an overflow ends the image.
//!
//! With [`FillPolicy::Preload`] empty slots are filled from a header palette
//! instead, which lets the first rows of an image introduce several colors
//! at once.

pub mod color;
pub mod error;
pub mod row;
pub mod table;


/// Key into an image's color table.
pub type PaletteIndex = u8;

pub use color::{ColorLookup, TrueColor};
pub use error::{AllocError, OverflowReason};
pub use row::{decode_row, RowUsage};
pub use table::{
    FillPolicy, ReprogramEvent, RowDecision, SlotAssignment, SlotBinding, SlotTable, MAX_SLOTS,
    MIN_SLOTS,
};
