//! Logical viewport geometry.

/// Side of one glyph cell in logical units.
pub const GLYPH_SIZE: u32 = 16;

/// Logical width of one terminal column.
///
/// Katakana glyphs are full-width, so one glyph cell spans two columns.
pub const CELL_WIDTH: u32 = GLYPH_SIZE / 2;

/// Logical height of one terminal row.
pub const CELL_HEIGHT: u32 = GLYPH_SIZE;

/// Viewport dimensions in logical units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Viewport covering a terminal of `cols` × `rows` cells.
    pub fn from_cells(cols: u16, rows: u16) -> Self {
        Self {
            width: u32::from(cols) * CELL_WIDTH,
            height: u32::from(rows) * CELL_HEIGHT,
        }
    }

    /// Terminal columns covered by this viewport.
    pub fn cols(&self) -> u16 {
        (self.width / CELL_WIDTH).min(u32::from(u16::MAX)) as u16
    }

    /// Terminal rows covered by this viewport.
    pub fn rows(&self) -> u16 {
        (self.height / CELL_HEIGHT).min(u32::from(u16::MAX)) as u16
    }
}
