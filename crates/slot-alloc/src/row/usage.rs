use crate::PaletteIndex;

/// The distinct palette indices used by one row.
///
/// Indices are kept in order of first appearance together with the column
/// of that first pixel. The order makes allocation deterministic when a row
/// introduces several new colors, and the column gives overflow errors a
/// pixel coordinate to point at.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowUsage {
    entries: Vec<(PaletteIndex, usize)>,
}

impl RowUsage {
    /// Returns `true` if `index` appears anywhere in the row.
    #[inline]
    pub fn contains(&self, index: PaletteIndex) -> bool {
        self.entries.iter().any(|&(used, _)| used == index)
    }

    /// Number of distinct indices in the row.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(index, first_column)` pairs in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = (PaletteIndex, usize)> + '_ {
        self.entries.iter().copied()
    }

    /// Column of the first pixel using `index`.
    pub fn first_column(&self, index: PaletteIndex) -> Option<usize> {
        self.entries
            .iter()
            .find(|&&(used, _)| used == index)
            .map(|&(_, column)| column)
    }
}

/// Collect the distinct palette indices of one scanline.
///
/// Any index value is accepted; range validation against the color table is
/// the image decoder's concern.
///
/// # Example
///
/// ```
/// use slot_alloc::decode_row;
///
/// let usage = decode_row(&[3, 3, 0, 3, 7]);
/// assert_eq!(usage.len(), 3);
/// assert_eq!(usage.first_column(7), Some(4));
/// ```
pub fn decode_row(row: &[PaletteIndex]) -> RowUsage {
    let mut seen = [false; 256];
    let mut entries = Vec::new();

    for (column, &index) in row.iter().enumerate() {
        let marked = &mut seen[index as usize];
        if !*marked {
            *marked = true;
            entries.push((index, column));
        }
    }

    RowUsage { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_row() {
        let usage = decode_row(&[]);
        assert!(usage.is_empty());
        assert!(!usage.contains(0));
    }

    #[test]
    fn test_first_appearance_order() {
        let usage = decode_row(&[5, 5, 1, 9, 1, 5, 0]);
        let order: Vec<_> = usage.iter().collect();
        assert_eq!(order, vec![(5, 0), (1, 2), (9, 3), (0, 6)]);
    }

    #[test]
    fn test_contains_and_first_column() {
        let usage = decode_row(&[2, 2, 2, 255]);
        assert!(usage.contains(2));
        assert!(usage.contains(255));
        assert!(!usage.contains(3));
        assert_eq!(usage.first_column(255), Some(3));
        assert_eq!(usage.first_column(3), None);
    }

    #[test]
    fn test_uniform_row_has_one_entry() {
        let usage = decode_row(&[4; 320]);
        assert_eq!(usage.len(), 1);
        assert_eq!(usage.first_column(4), Some(0));
    }
}
