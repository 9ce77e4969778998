//! Per-column fall offsets.

use katarain_core::GLYPH_SIZE;

/// Fall offset of every column, in glyph units.
///
/// The length is fixed when the table is built. Offsets are never negative.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnTable {
    offsets: Vec<f32>,
}

impl ColumnTable {
    /// One column per glyph that fits across `width`, each starting at offset 1.
    pub fn for_width(width: u32) -> Self {
        let columns = (width / GLYPH_SIZE) as usize;
        Self {
            offsets: vec![1.0; columns],
        }
    }

    /// Build a table from explicit offsets, clamping negatives to zero.
    pub fn from_offsets(offsets: impl IntoIterator<Item = f32>) -> Self {
        Self {
            offsets: offsets.into_iter().map(|o| o.max(0.0)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn offsets(&self) -> &[f32] {
        &self.offsets
    }

    pub(crate) fn offsets_mut(&mut self) -> &mut [f32] {
        &mut self.offsets
    }
}
