//! Fixed-palette playfield converter.
//!
//! The display code streams the playfield with `MOVEM.L` loads, so word
//! columns are stored out of order: all even columns first, then the odd
//! ones. Each column contributes two words, plane 0 then plane 1.

use slot_alloc::TrueColor;

use super::converter::Converter;
use super::palette_match::{match_reference_palette, MatchMode};
use crate::error::ConvertError;
use crate::models::{IndexedImage, PlayfieldConfig};
use crate::rendering::asm::{directive, hex16, AsmSource};
use crate::rendering::bitplane::{pack_word, WORD_PIXELS};
use crate::rendering::OcsColor;

/// Pixels covered by one plane word on the display's horizontal scale.
const HPOS_PER_WORD: u32 = 8 / 2;

/// One scanline of plane words, in storage order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayfieldRow {
    pub vpos: u32,
    pub words: Vec<u16>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playfield {
    pub label: String,
    pub rows: Vec<PlayfieldRow>,
    hpos: u32,
    block_words: usize,
}

impl Playfield {
    /// Assembler source lines produced, including the label.
    pub fn line_count(&self) -> usize {
        self.to_asm().lines().count()
    }

    fn block_comment(&self, vpos: u32, hpos: u32, words: usize, first: bool) -> String {
        let mut line = if first {
            format!("\t;\t{:03}:\t        ", vpos)
        } else {
            "\t\t;   \t        ".to_string()
        };
        let labels: Vec<String> = (0..words as u32 * HPOS_PER_WORD)
            .step_by(8)
            .map(|offset| format!("${:02X}", hpos + offset))
            .collect();
        line.push_str(&labels.join("         "));
        line.push('\n');
        line
    }
}

impl AsmSource for Playfield {
    fn to_asm(&self) -> String {
        let mut code = format!("{}:\n", self.label);
        for row in &self.rows {
            let mut hpos = self.hpos;
            for (block, words) in row.words.chunks(self.block_words).enumerate() {
                code.push_str(&self.block_comment(row.vpos, hpos, words.len(), block == 0));
                let operands: Vec<String> = words.iter().map(|&w| hex16(w)).collect();
                code.push_str(&directive("dc.w", "\t", &operands));
                hpos += self.block_words as u32 * HPOS_PER_WORD;
            }
        }
        code
    }
}

pub struct PlayfieldConverter {
    config: PlayfieldConfig,
}

impl PlayfieldConverter {
    pub fn new(config: PlayfieldConfig) -> Result<Self, ConvertError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The four playfield colors: both base colors, then their half-brite
    /// versions.
    pub fn reference_colors(&self) -> Vec<TrueColor> {
        let color0 = OcsColor::new(self.config.color0);
        let color1 = OcsColor::new(self.config.color1);
        [color0, color1, color0.half_brite(), color1.half_brite()]
            .iter()
            .map(|c| c.to_true_color())
            .collect()
    }

    /// Source word column of each stored column: even columns, then odd.
    pub fn column_order(&self) -> Vec<usize> {
        let words = self.config.words;
        (0..words).step_by(2).chain((1..words).step_by(2)).collect()
    }
}

impl Converter for PlayfieldConverter {
    type Output = Playfield;

    fn convert(&self, image: &IndexedImage) -> Result<Playfield, ConvertError> {
        image.require_size(self.config.width(), self.config.height)?;

        let reference = self.reference_colors();
        let map = match_reference_palette(image, &reference, MatchMode::Rgb)?;
        let order = self.column_order();

        tracing::info!(
            c = %order.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(","),
            p = %join_colors(&reference),
            i = %join_colors(image.palette()),
            "Matching playfield palette"
        );

        let mut rows = Vec::with_capacity(image.height() as usize);
        for (y, row) in image.rows().enumerate() {
            let numbers = map.map_row(row, y)?;
            let mut words = Vec::with_capacity(order.len() * 2);
            for &column in &order {
                let start = column * WORD_PIXELS;
                words.extend(pack_word(&numbers[start..start + WORD_PIXELS], 2));
            }
            rows.push(PlayfieldRow {
                vpos: self.config.display_vpos + y as u32,
                words,
            });
        }

        let playfield = Playfield {
            label: self.config.label.clone(),
            rows,
            hpos: self.config.display_hpos,
            block_words: self.config.block_words,
        };
        tracing::info!(
            m = %(0..image.palette().len() as u8)
                .filter_map(|i| map.number(i).map(|n| format!("{i} -> {n}")))
                .collect::<Vec<_>>()
                .join(", "),
            l = playfield.line_count(),
            "Converted playfield"
        );
        Ok(playfield)
    }
}

fn join_colors(colors: &[TrueColor]) -> String {
    colors
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
