//! Immediate-mode paint abstraction.

use std::fmt;

use katarain_core::Rgba;

/// Font family of a [`Font`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FontFamily {
    #[default]
    Serif,
    SansSerif,
    Monospace,
}

impl FontFamily {
    fn name(self) -> &'static str {
        match self {
            FontFamily::Serif => "serif",
            FontFamily::SansSerif => "sans-serif",
            FontFamily::Monospace => "monospace",
        }
    }
}

/// Font used by [`PaintContext::fill_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Font {
    /// Size in logical units.
    pub size: u32,
    pub family: FontFamily,
}

impl Font {
    pub fn serif(size: u32) -> Self {
        Self {
            size,
            family: FontFamily::Serif,
        }
    }
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px {}", self.size, self.family.name())
    }
}

/// A 2D paint context bound to a drawing surface.
///
/// Coordinates are logical units with the origin at the top-left corner.
/// Text is positioned by its baseline, so a glyph painted at `y` occupies the
/// row of the surface that ends at `y`.
pub trait PaintContext {
    /// Surface width in logical units.
    fn width(&self) -> u32;

    /// Surface height in logical units.
    fn height(&self) -> u32;

    /// Set the surface dimensions. This discards everything painted so far.
    fn resize(&mut self, width: u32, height: u32);

    /// Colour used by subsequent fills.
    fn set_fill_style(&mut self, style: Rgba);

    /// Font used by subsequent text fills.
    fn set_font(&mut self, font: Font);

    /// Fill a rectangle with the current fill style.
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    /// Paint `text` with its baseline starting at (`x`, `y`).
    fn fill_text(&mut self, text: &str, x: f32, y: f32);
}
