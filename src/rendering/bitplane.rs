//! Planar bit packing.
//!
//! Amiga bitplanes store one bit of a pixel's color number per plane, 16
//! pixels per word, leftmost pixel in the most significant bit.

/// Pixels per bitplane word.
pub const WORD_PIXELS: usize = 16;

/// Pack up to 16 color numbers into one word per plane.
///
/// Plane `p` receives bit `p` of every color number. Fewer than 16 pixels
/// are left-aligned and padded with color 0.
pub fn pack_word(colors: &[u8], planes: usize) -> Vec<u16> {
    debug_assert!(colors.len() <= WORD_PIXELS);
    (0..planes)
        .map(|plane| {
            (0..WORD_PIXELS).fold(0u16, |word, x| {
                let color = colors.get(x).copied().unwrap_or(0);
                (word << 1) | ((color >> plane) & 1) as u16
            })
        })
        .collect()
}

/// Pack a scanline of color numbers into 16-pixel columns.
///
/// Returns one entry per column, each holding `planes` words.
pub fn pack_columns(colors: &[u8], planes: usize) -> Vec<Vec<u16>> {
    colors
        .chunks(WORD_PIXELS)
        .map(|chunk| pack_word(chunk, planes))
        .collect()
}

/// Pack two planes of one column into a longword, plane 0 in the high word.
#[inline]
pub fn pack_long(colors: &[u8]) -> u32 {
    let words = pack_word(colors, 2);
    ((words[0] as u32) << 16) | words[1] as u32
}

/// Recover the 16 color numbers encoded in one word per plane.
pub fn unpack_word(words: &[u16]) -> [u8; WORD_PIXELS] {
    let mut colors = [0u8; WORD_PIXELS];
    for (plane, &word) in words.iter().enumerate() {
        for (x, color) in colors.iter_mut().enumerate() {
            let bit = (word >> (WORD_PIXELS - 1 - x)) & 1;
            *color |= (bit as u8) << plane;
        }
    }
    colors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_word_msb_first() {
        let mut colors = [0u8; 16];
        colors[0] = 1;
        colors[15] = 2;
        let words = pack_word(&colors, 2);
        assert_eq!(words, vec![0x8000, 0x0001]);
    }

    #[test]
    fn test_pack_word_pads_short_input() {
        let words = pack_word(&[3, 3, 3], 2);
        assert_eq!(words, vec![0xE000, 0xE000]);
    }

    #[test]
    fn test_pack_columns_splits_row() {
        let colors: Vec<u8> = (0..32).map(|x| if x < 16 { 1 } else { 2 }).collect();
        let columns = pack_columns(&colors, 2);
        assert_eq!(columns, vec![vec![0xFFFF, 0x0000], vec![0x0000, 0xFFFF]]);
    }

    #[test]
    fn test_pack_long() {
        let colors = [1, 2, 3, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        assert_eq!(pack_long(&colors), 0xA000_6000);
    }

    #[test]
    fn test_unpack_inverts_pack() {
        let colors: [u8; 16] = [0, 1, 2, 3, 4, 5, 6, 7, 7, 6, 5, 4, 3, 2, 1, 0];
        let words = pack_word(&colors, 3);
        assert_eq!(unpack_word(&words), colors);
    }
}
