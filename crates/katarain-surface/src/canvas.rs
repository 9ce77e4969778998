//! Terminal cell grid implementing [`PaintContext`].

use katarain_core::{Brightness, CELL_HEIGHT, CELL_WIDTH, Rgba, Viewport};
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::UnicodeWidthChar;

use crate::color::{blend, present};
use crate::paint::{Font, FontFamily, PaintContext};

/// One terminal cell of the surface.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Cell {
    /// Last glyph painted into this cell.
    pub glyph: Option<char>,
    /// Ink colour of the glyph, channels in `0.0..=255.0`.
    pub ink: [f32; 3],
}

/// Drawing surface backed by a grid of terminal cells.
///
/// Logical coordinates map onto the grid with [`CELL_WIDTH`] × [`CELL_HEIGHT`]
/// units per cell. Rectangles blend into the ink of the glyphs they cover;
/// the terminal background is left alone.
#[derive(Debug, Clone)]
pub struct CellSurface {
    width: u32,
    height: u32,
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
    fill: Rgba,
    font: Font,
}

impl CellSurface {
    pub fn new(viewport: Viewport) -> Self {
        let mut surface = Self {
            width: 0,
            height: 0,
            cols: 0,
            rows: 0,
            cells: Vec::new(),
            fill: Rgba::opaque(0, 0, 0),
            font: Font {
                size: 10,
                family: FontFamily::SansSerif,
            },
        };
        surface.resize(viewport.width, viewport.height);
        surface
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn font(&self) -> Font {
        self.font
    }

    /// Cell at terminal position (`col`, `row`).
    pub fn cell(&self, col: u16, row: u16) -> Option<&Cell> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.cells
            .get(usize::from(row) * usize::from(self.cols) + usize::from(col))
    }

    fn cell_mut(&mut self, col: u16, row: u16) -> Option<&mut Cell> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.cells
            .get_mut(usize::from(row) * usize::from(self.cols) + usize::from(col))
    }

    /// Render the surface into `area`, scaled by the brightness filter.
    pub fn render(&self, frame: &mut Frame, area: Rect, filter: Option<Brightness>) {
        let width = area.width.min(self.cols);
        let height = area.height.min(self.rows);

        let lines: Vec<Line> = (0..height)
            .map(|row| {
                let mut spans = Vec::with_capacity(usize::from(width));
                let mut col = 0;
                while col < width {
                    match self.visible_glyph(col, row, filter) {
                        Some((glyph, color)) => {
                            spans.push(Span::styled(glyph.to_string(), Style::new().fg(color)));
                            // Wide glyphs cover the next cell too
                            let glyph_width = glyph.width().unwrap_or(1).max(1) as u16;
                            col = col.saturating_add(glyph_width);
                        }
                        None => {
                            spans.push(Span::raw(" "));
                            col += 1;
                        }
                    }
                }
                Line::from(spans)
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), area);
    }

    fn visible_glyph(
        &self,
        col: u16,
        row: u16,
        filter: Option<Brightness>,
    ) -> Option<(char, ratatui::style::Color)> {
        let cell = self.cell(col, row)?;
        let glyph = cell.glyph?;
        present(cell.ink, filter).map(|color| (glyph, color))
    }
}

impl PaintContext for CellSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn resize(&mut self, width: u32, height: u32) {
        let viewport = Viewport::new(width, height);
        self.width = width;
        self.height = height;
        self.cols = viewport.cols();
        self.rows = viewport.rows();
        self.cells = vec![Cell::default(); usize::from(self.cols) * usize::from(self.rows)];
    }

    fn set_fill_style(&mut self, style: Rgba) {
        self.fill = style;
    }

    fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        // A cell is covered when its centre lies inside the rectangle.
        let span = |start: f32, len: f32, unit: u32, limit: u16| {
            let unit = unit as f32;
            let first = (start / unit - 0.5).ceil().max(0.0);
            let last = ((start + len) / unit - 0.5).ceil().clamp(0.0, f32::from(limit));
            (first as u16, last as u16)
        };
        let (first_col, end_col) = span(x, width, CELL_WIDTH, self.cols);
        let (first_row, end_row) = span(y, height, CELL_HEIGHT, self.rows);

        let fill = self.fill;
        for row in first_row..end_row {
            for col in first_col..end_col {
                if let Some(cell) = self.cell_mut(col, row) {
                    cell.ink = blend(cell.ink, fill);
                }
            }
        }
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        // Text sits on its baseline: y in (0, 16] lands on row 0
        let row = (y / CELL_HEIGHT as f32).ceil() as i64 - 1;
        let mut col = (x / CELL_WIDTH as f32).floor() as i64;
        if row < 0 || row >= i64::from(self.rows) {
            return;
        }

        let fill = self.fill;
        for glyph in text.chars() {
            if col >= 0 {
                let Some(cell) = self.cell_mut(col as u16, row as u16) else {
                    break;
                };
                cell.glyph = Some(glyph);
                cell.ink = blend(cell.ink, fill);
            }
            col += glyph.width().unwrap_or(1).max(1) as i64;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend, style::Color};

    #[test]
    fn test_grid_from_viewport() {
        let surface = CellSurface::new(Viewport::from_cells(40, 12));
        assert_eq!(surface.width(), 320);
        assert_eq!(surface.height(), 192);
        assert_eq!((surface.cols(), surface.rows()), (40, 12));
    }

    #[test]
    fn test_text_lands_on_baseline_row() {
        let mut surface = CellSurface::new(Viewport::from_cells(8, 4));
        surface.set_fill_style(Rgba::opaque(0, 255, 0));
        surface.fill_text("ア", 32.0, 16.0);
        surface.fill_text("イ", 0.0, 16.08);

        assert_eq!(surface.cell(4, 0).and_then(|c| c.glyph), Some('ア'));
        assert_eq!(surface.cell(0, 1).and_then(|c| c.glyph), Some('イ'));
        assert_eq!(surface.cell(4, 0).map(|c| c.ink), Some([0.0, 255.0, 0.0]));
    }

    #[test]
    fn test_text_off_surface_is_dropped() {
        let mut surface = CellSurface::new(Viewport::from_cells(4, 2));
        surface.fill_text("ア", 0.0, 0.0);
        surface.fill_text("ア", 0.0, 500.0);
        surface.fill_text("ア", 64.0, 16.0);
        surface.fill_text("ア", -16.0, 16.0);
        assert!(surface.cells.iter().all(|c| c.glyph.is_none()));
    }

    #[test]
    fn test_rect_fades_ink() {
        let mut surface = CellSurface::new(Viewport::from_cells(4, 2));
        surface.set_fill_style(Rgba::opaque(0, 255, 0));
        surface.fill_text("ア", 0.0, 16.0);
        surface.fill_text("イ", 0.0, 32.0);

        // Only the top row is covered
        surface.set_fill_style(Rgba::new(0, 0, 0, 0.5));
        surface.fill_rect(0.0, 0.0, 32.0, 16.0);

        assert_eq!(surface.cell(0, 0).map(|c| c.ink[1]), Some(127.5));
        assert_eq!(surface.cell(0, 1).map(|c| c.ink[1]), Some(255.0));
    }

    #[test]
    fn test_font_is_kept_across_resize() {
        let mut surface = CellSurface::new(Viewport::from_cells(4, 2));
        assert_eq!(surface.font().family, FontFamily::SansSerif);
        surface.set_font(Font::serif(16));
        surface.resize(64, 48);
        assert_eq!(surface.font(), Font::serif(16));
        assert_eq!(surface.font().to_string(), "16px serif");
    }

    #[test]
    fn test_resize_clears() {
        let mut surface = CellSurface::new(Viewport::from_cells(4, 2));
        surface.fill_text("ア", 0.0, 16.0);
        surface.resize(64, 48);
        assert_eq!((surface.cols(), surface.rows()), (8, 3));
        assert!(surface.cells.iter().all(|c| *c == Cell::default()));
    }

    #[test]
    fn test_render_wide_glyphs() {
        let mut surface = CellSurface::new(Viewport::from_cells(6, 2));
        surface.set_fill_style(Rgba::opaque(0, 255, 0));
        surface.fill_text("ア", 0.0, 16.0);
        surface.fill_text("イ", 32.0, 32.0);

        let mut terminal = Terminal::new(TestBackend::new(6, 2)).unwrap();
        terminal
            .draw(|frame| surface.render(frame, frame.area(), Some(Brightness::new(0.5))))
            .unwrap();

        let buffer = terminal.backend().buffer();
        assert_eq!(buffer[(0, 0)].symbol(), "ア");
        assert_eq!(buffer[(0, 0)].fg, Color::Rgb(0, 128, 0));
        assert_eq!(buffer[(2, 0)].symbol(), " ");
        assert_eq!(buffer[(4, 1)].symbol(), "イ");
        assert_eq!(buffer[(0, 1)].symbol(), " ");
    }

    #[test]
    fn test_render_hides_faded_glyphs() {
        let mut surface = CellSurface::new(Viewport::from_cells(2, 1));
        surface.set_fill_style(Rgba::opaque(0, 255, 0));
        surface.fill_text("ア", 0.0, 16.0);
        surface.set_fill_style(Rgba::new(0, 0, 0, 0.05));
        for _ in 0..100 {
            surface.fill_rect(0.0, 0.0, 16.0, 16.0);
        }

        let mut terminal = Terminal::new(TestBackend::new(2, 1)).unwrap();
        terminal
            .draw(|frame| surface.render(frame, frame.area(), None))
            .unwrap();
        assert_eq!(terminal.backend().buffer()[(0, 0)].symbol(), " ");
    }
}
