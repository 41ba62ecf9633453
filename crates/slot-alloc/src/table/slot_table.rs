//! The row-spanning slot table and its greedy allocator.

use super::decision::{ReprogramEvent, RowDecision, SlotAssignment, SlotBinding};
use crate::color::{ColorLookup, TrueColor};
use crate::error::{AllocError, OverflowReason};
use crate::row::RowUsage;
use crate::PaletteIndex;

/// Smallest supported slot count.
pub const MIN_SLOTS: usize = 2;
/// Largest supported slot count (three bitplanes).
pub const MAX_SLOTS: usize = 8;

/// How empty slots get their first color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillPolicy {
    /// Empty slots are filled through a [`ReprogramEvent`] like any other
    /// reusable slot. A row may introduce at most one new color.
    #[default]
    Reprogram,

    /// Empty slots are filled from a header palette loaded before the image
    /// starts, at no per-row cost. Only rebinding an occupied slot counts as
    /// the row's single register write, so a row may introduce several new
    /// colors as long as all but one land in never-used slots.
    Preload,
}

/// Register slot table carried from row to row.
///
/// Each of the `S` slots is empty or bound to one palette index, and no index
/// is ever bound twice. [`allocate_row`](SlotTable::allocate_row) is the only
/// mutator; it is strictly greedy, one row at a time, with no lookahead.
///
/// # Tie-break
///
/// When several slots could take a new color, the lowest-indexed one wins.
/// Output is byte-exact only as long as this rule holds.
///
/// # Example
///
/// ```
/// use slot_alloc::{decode_row, SlotTable, TrueColor};
///
/// let colors = vec![TrueColor::rgb(0, 0, 0); 16];
/// let mut table = SlotTable::with_background(4, 0).unwrap();
///
/// let decision = table.allocate_row(&decode_row(&[0, 5, 5, 0]), &colors).unwrap();
/// let event = decision.reprogram.unwrap();
/// assert_eq!((event.slot, event.index), (1, 5));
/// assert_eq!(decision.assignment.slot_of(5), Some(1));
/// ```
#[derive(Debug, Clone)]
pub struct SlotTable {
    slots: Vec<Option<PaletteIndex>>,
    ceiling: usize,
    policy: FillPolicy,
    preloaded: Vec<SlotBinding>,
    row: usize,
}

impl SlotTable {
    /// Create a table with `slots` empty slots.
    pub fn new(slots: usize) -> Result<Self, AllocError> {
        Self::from_bindings(&vec![None; slots])
    }

    /// Create a table whose slot 0 permanently starts out holding the
    /// background index; the remaining slots are empty.
    pub fn with_background(slots: usize, background: PaletteIndex) -> Result<Self, AllocError> {
        let mut bindings = vec![None; slots];
        if let Some(first) = bindings.first_mut() {
            *first = Some(background);
        }
        Self::from_bindings(&bindings)
    }

    /// Create a table from explicit seed bindings, one entry per slot.
    ///
    /// # Errors
    ///
    /// - [`AllocError::InvalidSlotCount`] if the slot count is outside
    ///   `MIN_SLOTS..=MAX_SLOTS`
    /// - [`AllocError::DuplicateBinding`] if an index is seeded twice
    pub fn from_bindings(bindings: &[Option<PaletteIndex>]) -> Result<Self, AllocError> {
        let slots = bindings.len();
        if !(MIN_SLOTS..=MAX_SLOTS).contains(&slots) {
            return Err(AllocError::InvalidSlotCount { slots });
        }
        for (slot, binding) in bindings.iter().enumerate() {
            if let Some(index) = *binding {
                if bindings[..slot].contains(&Some(index)) {
                    return Err(AllocError::DuplicateBinding { index, slot });
                }
            }
        }

        Ok(Self {
            slots: bindings.to_vec(),
            ceiling: slots,
            policy: FillPolicy::default(),
            preloaded: Vec::new(),
            row: 0,
        })
    }

    /// Limit how many slots the image may occupy.
    ///
    /// Empty slots beyond the ceiling are never filled. Rebinding an occupied
    /// slot does not count against it.
    pub fn with_ceiling(mut self, ceiling: usize) -> Result<Self, AllocError> {
        if ceiling == 0 || ceiling > self.slots.len() || ceiling < self.occupied() {
            return Err(AllocError::InvalidCeiling {
                ceiling,
                slots: self.slots.len(),
            });
        }
        self.ceiling = ceiling;
        Ok(self)
    }

    /// Choose how empty slots get their first color.
    pub fn with_fill_policy(mut self, policy: FillPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Number of slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn slots(&self) -> &[Option<PaletteIndex>] {
        &self.slots
    }

    #[inline]
    pub fn ceiling(&self) -> usize {
        self.ceiling
    }

    #[inline]
    pub fn fill_policy(&self) -> FillPolicy {
        self.policy
    }

    /// Rows allocated so far; also the number of the next row.
    #[inline]
    pub fn rows_processed(&self) -> usize {
        self.row
    }

    /// Number of non-empty slots.
    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Bits needed per pixel to address every slot.
    pub fn bits_per_pixel(&self) -> u32 {
        self.slots.len().next_power_of_two().trailing_zeros()
    }

    pub fn slot_of(&self, index: PaletteIndex) -> Option<usize> {
        self.slots.iter().position(|&bound| bound == Some(index))
    }

    /// Header palette: first binding of every slot filled under
    /// [`FillPolicy::Preload`], in the order the slots were filled.
    pub fn preloaded(&self) -> &[SlotBinding] {
        &self.preloaded
    }

    /// Allocate slots for one row.
    ///
    /// Indices already bound keep their slot. A single new index takes the
    /// lowest-indexed reusable slot (one whose color the row does not use)
    /// and produces a [`ReprogramEvent`] carrying its true color. See
    /// [`FillPolicy`] for how empty slots are treated.
    ///
    /// On error the table is left untouched; the error is final for the
    /// image.
    ///
    /// # Errors
    ///
    /// - [`AllocError::Overflow`] if the row cannot be placed
    /// - [`AllocError::UnknownColor`] if a newly bound or preloaded index is
    ///   missing from `colors`
    pub fn allocate_row<C>(
        &mut self,
        usage: &RowUsage,
        colors: &C,
    ) -> Result<RowDecision, AllocError>
    where
        C: ColorLookup + ?Sized,
    {
        let unseen: Vec<(PaletteIndex, usize)> = usage
            .iter()
            .filter(|&(index, _)| self.slot_of(index).is_none())
            .collect();

        let mut next = self.slots.clone();
        let mut reprogram = None;
        let mut preloads = Vec::new();

        match self.policy {
            FillPolicy::Reprogram => {
                if unseen.len() > 1 {
                    let (index, column) = unseen[1];
                    let reason = OverflowReason::TooManyNewColors {
                        new_colors: unseen.len(),
                    };
                    return Err(self.overflow(&next, column, index, reason));
                }
                if let Some(&(index, column)) = unseen.first() {
                    let Some(slot) = self.reusable_slot(&next, usage, true) else {
                        let reason = self.exhausted_reason(&next);
                        return Err(self.overflow(&next, column, index, reason));
                    };
                    reprogram = Some(self.rebind(&mut next, slot, index, colors)?);
                }
            }
            FillPolicy::Preload => {
                for &(index, column) in &unseen {
                    if reprogram.is_none() {
                        if let Some(slot) = self.reusable_slot(&next, usage, false) {
                            reprogram = Some(self.rebind(&mut next, slot, index, colors)?);
                            continue;
                        }
                    }
                    let occupied = next.iter().filter(|slot| slot.is_some()).count();
                    match next.iter().position(Option::is_none) {
                        Some(slot) if occupied < self.ceiling => {
                            self.lookup(index, colors)?;
                            next[slot] = Some(index);
                            preloads.push(SlotBinding { slot, index });
                        }
                        _ => {
                            let budget_spent = reprogram.is_some()
                                && self.reusable_slot(&next, usage, false).is_some();
                            let reason = if budget_spent {
                                OverflowReason::TooManyNewColors {
                                    new_colors: unseen.len(),
                                }
                            } else {
                                self.exhausted_reason(&next)
                            };
                            return Err(self.overflow(&next, column, index, reason));
                        }
                    }
                }
            }
        }

        let row = self.row;
        self.slots = next;
        self.preloaded.extend_from_slice(&preloads);
        self.row += 1;

        Ok(RowDecision {
            row,
            assignment: SlotAssignment::new(self.slots.clone()),
            reprogram,
            preloads,
        })
    }

    /// Lowest slot whose color the row does not need. Empty slots qualify
    /// only when `include_empty` is set and the ceiling leaves room.
    fn reusable_slot(
        &self,
        slots: &[Option<PaletteIndex>],
        usage: &RowUsage,
        include_empty: bool,
    ) -> Option<usize> {
        let room = slots.iter().filter(|slot| slot.is_some()).count() < self.ceiling;
        slots.iter().position(|slot| match *slot {
            Some(index) => !usage.contains(index),
            None => include_empty && room,
        })
    }

    fn rebind<C>(
        &self,
        slots: &mut [Option<PaletteIndex>],
        slot: usize,
        index: PaletteIndex,
        colors: &C,
    ) -> Result<ReprogramEvent, AllocError>
    where
        C: ColorLookup + ?Sized,
    {
        let color = self.lookup(index, colors)?;
        let previous = slots[slot].replace(index);
        Ok(ReprogramEvent {
            slot,
            index,
            previous,
            color,
        })
    }

    fn lookup<C>(&self, index: PaletteIndex, colors: &C) -> Result<TrueColor, AllocError>
    where
        C: ColorLookup + ?Sized,
    {
        colors.true_color(index).ok_or(AllocError::UnknownColor {
            row: self.row,
            index,
        })
    }

    fn exhausted_reason(&self, slots: &[Option<PaletteIndex>]) -> OverflowReason {
        if slots.iter().any(Option::is_none) {
            OverflowReason::CeilingReached {
                ceiling: self.ceiling,
            }
        } else {
            OverflowReason::AllSlotsLive
        }
    }

    fn overflow(
        &self,
        slots: &[Option<PaletteIndex>],
        column: usize,
        index: PaletteIndex,
        reason: OverflowReason,
    ) -> AllocError {
        AllocError::Overflow {
            row: self.row,
            column,
            index,
            slots: slots.to_vec(),
            reason,
        }
    }
}
