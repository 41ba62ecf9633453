//! Slot table state and per-row decision records
//!
//! [`SlotTable`] owns the mapping of register slots to palette indices and
//! is advanced one row at a time. Each call returns a [`RowDecision`] that
//! the caller can hand to a bit packer and a command emitter without
//! touching the table again.

mod decision;
mod slot_table;

pub use decision::{ReprogramEvent, RowDecision, SlotAssignment, SlotBinding};
pub use slot_table::{FillPolicy, SlotTable, MAX_SLOTS, MIN_SLOTS};
