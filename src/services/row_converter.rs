//! Adaptive-palette image converter.
//!
//! Encodes an image with more colors than registers by rewriting at most one
//! color register per scanline. Each row record carries the two bitplanes of
//! every 16-pixel column plus one register write (value and address) that the
//! display code performs before the row is shown.

use slot_alloc::{
    decode_row, AllocError, ColorLookup, PaletteIndex, ReprogramEvent, RowDecision,
    SlotAssignment, SlotTable, TrueColor,
};

use super::converter::Converter;
use crate::error::ConvertError;
use crate::models::{IndexedImage, RowsConfig, ROW_SLOTS};
use crate::rendering::asm::{directive, hex12, hex32, AsmSource};
use crate::rendering::bitplane::pack_long;
use crate::rendering::OcsColor;

/// Register write carried by one row record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterWrite {
    pub value: u32,
    pub address: u32,
}

/// Converted adaptive-palette image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowProgram {
    /// Initial register values, one per slot
    pub header: Vec<OcsColor>,
    /// One record of longwords per row
    pub rows: Vec<Vec<u32>>,
    /// Rows that rewrite a color register
    pub reprograms: usize,
}

impl AsmSource for RowProgram {
    fn to_asm(&self) -> String {
        let header: Vec<String> = self.header.iter().map(|c| hex12(c.raw())).collect();
        let mut code = directive("dc.w", "\t", &header);
        for record in &self.rows {
            let longs: Vec<String> = record.iter().map(|&l| hex32(l)).collect();
            code.push_str(&directive("dc.l", "\t", &longs));
        }
        code
    }
}

pub struct RowConverter {
    config: RowsConfig,
}

impl RowConverter {
    pub fn new(config: RowsConfig) -> Result<Self, ConvertError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Fresh slot table for one image.
    fn slot_table(&self) -> Result<SlotTable, ConvertError> {
        let table = match self.config.background {
            Some(background) => SlotTable::with_background(ROW_SLOTS, background)?,
            None => SlotTable::new(ROW_SLOTS)?,
        };
        Ok(table
            .with_ceiling(self.config.ceiling)?
            .with_fill_policy(self.config.fill.into()))
    }

    /// Register write for a row: the reprogrammed color, or a dummy write
    /// to the idle register so every row takes the same time.
    fn register_write(&self, event: Option<&ReprogramEvent>) -> RegisterWrite {
        match event {
            Some(event) => RegisterWrite {
                value: OcsColor::from(event.color).to_long_pair(),
                address: self.config.register_base
                    + event.slot as u32 * self.config.register_stride,
            },
            None => RegisterWrite {
                value: 0,
                address: self.config.idle_register,
            },
        }
    }

    /// Pack one row into its record.
    fn encode_row(&self, row: &[PaletteIndex], decision: &RowDecision) -> Vec<u32> {
        let slots = slot_numbers(row, &decision.assignment);
        let mut record = vec![0u32; self.config.record_len()];

        for (column, chunk) in slots.chunks(16).enumerate() {
            record[self.config.column_order[column]] = pack_long(chunk);
        }

        let write = self.register_write(decision.reprogram.as_ref());
        record[self.config.command_order[0]] = write.value;
        record[self.config.command_order[1]] = write.address;
        record
    }
}

impl Converter for RowConverter {
    type Output = RowProgram;

    fn convert(&self, image: &IndexedImage) -> Result<RowProgram, ConvertError> {
        image.require_size(self.config.width, self.config.height)?;

        let mut table = self.slot_table()?;
        let palette = image.palette();

        // Seeded slots and preloaded slots start with their first color;
        // slots first filled by a register write start black.
        let mut header = vec![OcsColor::BLACK; table.len()];
        for (slot, index) in table.slots().iter().enumerate() {
            if let Some(index) = *index {
                header[slot] = header_color(palette, index)?;
            }
        }

        let mut rows = Vec::with_capacity(image.height() as usize);
        let mut reprograms = 0;

        for row in image.rows() {
            let usage = decode_row(row);
            let decision = table.allocate_row(&usage, palette)?;

            if let Some(event) = &decision.reprogram {
                reprograms += 1;
                tracing::debug!(
                    row = decision.row,
                    slot = event.slot,
                    index = event.index,
                    previous = ?event.previous,
                    color = %OcsColor::from(event.color),
                    "Reprogram color register"
                );
            }
            rows.push(self.encode_row(row, &decision));
        }

        for binding in table.preloaded() {
            header[binding.slot] = header_color(palette, binding.index)?;
        }

        tracing::info!(
            rows = rows.len(),
            reprograms,
            slots = table.occupied(),
            header = %header.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(","),
            "Converted adaptive palette image"
        );

        Ok(RowProgram {
            header,
            rows,
            reprograms,
        })
    }
}

/// Register value of a slot's first color.
fn header_color(palette: &[TrueColor], index: PaletteIndex) -> Result<OcsColor, ConvertError> {
    let color = palette
        .true_color(index)
        .ok_or(AllocError::UnknownColor { row: 0, index })?;
    Ok(OcsColor::from(color))
}

/// Slot number of every pixel in a row.
///
/// Pixels whose index is not bound map to slot 0; a successful allocation
/// binds every index of the row, so this does not happen.
fn slot_numbers(row: &[PaletteIndex], assignment: &SlotAssignment) -> Vec<u8> {
    let mut lut = [0u8; 256];
    for (slot, index) in assignment.slots().iter().enumerate() {
        if let Some(index) = index {
            lut[*index as usize] = slot as u8;
        }
    }
    row.iter().map(|&index| lut[index as usize]).collect()
}
