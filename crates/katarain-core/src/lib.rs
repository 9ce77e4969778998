//! Core types for the katarain falling-glyph effect.
//!
//! Everything here is plain data shared by the configuration layer, the
//! drawing surface and the application shell: the speed parameter, the
//! brightness filter, colours, the glyph block and the logical viewport.

mod color;
mod filter;
mod glyph;
mod speed;
mod viewport;

pub use color::{ParseColorError, Rgba};
pub use filter::{Brightness, HoverFilters};
pub use glyph::{GlyphBlock, GlyphBlockError, KATAKANA_COUNT, KATAKANA_START};
pub use speed::{DropSpeed, SpeedControls};
pub use viewport::{CELL_HEIGHT, CELL_WIDTH, GLYPH_SIZE, Viewport};

/// Everything the frame draw step needs besides the surface and the columns.
#[derive(Debug, Clone, PartialEq)]
pub struct RainStyle {
    /// Overlay painted over the whole surface every frame.
    pub trail: Rgba,
    /// Fill colour of the glyphs.
    pub glyph_color: Rgba,
    /// A column past the bottom edge restarts when a uniform draw exceeds this.
    pub restart_threshold: f64,
    /// Glyphs to pick from.
    pub glyphs: GlyphBlock,
}

impl Default for RainStyle {
    fn default() -> Self {
        Self {
            trail: Rgba::new(0, 0, 0, 0.05),
            glyph_color: Rgba::opaque(0, 255, 0),
            restart_threshold: 0.975,
            glyphs: GlyphBlock::katakana(),
        }
    }
}
