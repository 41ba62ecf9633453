//! Error types for slot allocation
//!
//! Configuration mistakes (slot counts, ceilings, seed bindings) are
//! reported when the table is built. [`AllocError::Overflow`] and
//! [`AllocError::UnknownColor`] are raised by `allocate_row` and end the
//! conversion of the current image.

use std::fmt;

use crate::PaletteIndex;

/// Why a row could not be placed in the slot table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverflowReason {
    /// The row introduces more new colors than one register write can cover.
    TooManyNewColors {
        /// Number of colors in the row not bound to any slot
        new_colors: usize,
    },
    /// Every slot holds a color that the row itself still needs.
    AllSlotsLive,
    /// Free slots exist but the image may not occupy more registers.
    CeilingReached {
        /// The configured ceiling
        ceiling: usize,
    },
}

impl fmt::Display for OverflowReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverflowReason::TooManyNewColors { new_colors } => {
                write!(f, "{} new colors in one row", new_colors)
            }
            OverflowReason::AllSlotsLive => write!(f, "every slot is in use by this row"),
            OverflowReason::CeilingReached { ceiling } => {
                write!(f, "image already occupies {} slots", ceiling)
            }
        }
    }
}

/// Error type for slot table construction and row allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllocError {
    /// Slot count outside the supported range
    InvalidSlotCount {
        /// Requested slot count
        slots: usize,
    },
    /// Ceiling is zero, above the slot count, or below the seeded bindings
    InvalidCeiling {
        /// Requested ceiling
        ceiling: usize,
        /// Slot count of the table
        slots: usize,
    },
    /// The same palette index was seeded into two slots
    DuplicateBinding {
        /// The repeated index
        index: PaletteIndex,
        /// Second slot holding it
        slot: usize,
    },
    /// The row cannot be encoded under the slot budget
    Overflow {
        /// Row being allocated (0-based)
        row: usize,
        /// Column of the first pixel that could not be placed
        column: usize,
        /// Palette index of that pixel
        index: PaletteIndex,
        /// Slot contents at the point of failure
        slots: Vec<Option<PaletteIndex>>,
        /// What ran out
        reason: OverflowReason,
    },
    /// The color table has no entry for a newly bound index
    UnknownColor {
        /// Row being allocated (0-based)
        row: usize,
        /// Index missing from the color table
        index: PaletteIndex,
    },
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocError::InvalidSlotCount { slots } => {
                write!(
                    f,
                    "unsupported slot count {} (expected {}..={})",
                    slots,
                    crate::MIN_SLOTS,
                    crate::MAX_SLOTS
                )
            }
            AllocError::InvalidCeiling { ceiling, slots } => {
                write!(f, "invalid ceiling {} for {} slots", ceiling, slots)
            }
            AllocError::DuplicateBinding { index, slot } => {
                write!(f, "index {} is bound twice (again at slot {})", index, slot)
            }
            AllocError::Overflow {
                row,
                column,
                index,
                slots,
                reason,
            } => {
                write!(
                    f,
                    "too many colors at [{},{}]: index {} does not fit ({}); slots hold [{}]",
                    column,
                    row,
                    index,
                    reason,
                    format_slots(slots)
                )
            }
            AllocError::UnknownColor { row, index } => {
                write!(f, "row {}: index {} has no color table entry", row, index)
            }
        }
    }
}

impl std::error::Error for AllocError {}

fn format_slots(slots: &[Option<PaletteIndex>]) -> String {
    slots
        .iter()
        .map(|slot| match slot {
            Some(index) => index.to_string(),
            None => "-".to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_overflow_message_names_pixel_and_slots() {
        let error = AllocError::Overflow {
            row: 12,
            column: 40,
            index: 9,
            slots: vec![Some(0), Some(1), Some(2), None],
            reason: OverflowReason::TooManyNewColors { new_colors: 2 },
        };
        assert_eq!(
            error.to_string(),
            "too many colors at [40,12]: index 9 does not fit (2 new colors in one row); slots hold [0, 1, 2, -]"
        );
    }

    #[test]
    fn test_all_slots_live_message() {
        let error = AllocError::Overflow {
            row: 0,
            column: 3,
            index: 4,
            slots: vec![Some(0), Some(1), Some(2), Some(3)],
            reason: OverflowReason::AllSlotsLive,
        };
        assert!(error.to_string().contains("every slot is in use by this row"));
    }

    #[test]
    fn test_unknown_color_message() {
        let error = AllocError::UnknownColor { row: 3, index: 200 };
        assert_eq!(error.to_string(), "row 3: index 200 has no color table entry");
    }

    #[test]
    fn test_invalid_slot_count_message() {
        let error = AllocError::InvalidSlotCount { slots: 1 };
        assert_eq!(error.to_string(), "unsupported slot count 1 (expected 2..=8)");
    }
}
