//! Immutable per-row allocation records.

use crate::color::TrueColor;
use crate::PaletteIndex;

/// A palette index bound into a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotBinding {
    pub slot: usize,
    pub index: PaletteIndex,
}

/// Request to rewrite one color register before the row is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReprogramEvent {
    /// Slot (register position) being rewritten
    pub slot: usize,
    /// Palette index the slot holds from this row on
    pub index: PaletteIndex,
    /// Index the slot held before, `None` if it was empty
    pub previous: Option<PaletteIndex>,
    /// True color of `index`, looked up in the image's color table
    pub color: TrueColor,
}

/// Snapshot of the slot table after a row was allocated.
///
/// Every palette index used by the row resolves to a slot through
/// [`slot_of`](SlotAssignment::slot_of).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotAssignment {
    slots: Vec<Option<PaletteIndex>>,
}

impl SlotAssignment {
    pub(crate) fn new(slots: Vec<Option<PaletteIndex>>) -> Self {
        Self { slots }
    }

    /// Slot currently holding `index`.
    #[inline]
    pub fn slot_of(&self, index: PaletteIndex) -> Option<usize> {
        self.slots.iter().position(|&bound| bound == Some(index))
    }

    /// Palette index held by `slot`, `None` if empty or out of range.
    #[inline]
    pub fn index_at(&self, slot: usize) -> Option<PaletteIndex> {
        self.slots.get(slot).copied().flatten()
    }

    #[inline]
    pub fn slots(&self) -> &[Option<PaletteIndex>] {
        &self.slots
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Outcome of allocating one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowDecision {
    /// Row number (0-based, counted by the table)
    pub row: usize,
    /// Slot bindings valid for this row
    pub assignment: SlotAssignment,
    /// Register write required before this row, if any
    pub reprogram: Option<ReprogramEvent>,
    /// Empty slots filled from the header palette while allocating this row
    pub preloads: Vec<SlotBinding>,
}
