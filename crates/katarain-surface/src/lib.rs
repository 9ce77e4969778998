//! Falling-glyph drawing surface for katarain.
//!
//! This crate holds the animated rain component ([`RainSurface`]), the paint
//! abstraction it draws through ([`PaintContext`]), the terminal
//! implementation of that abstraction ([`CellSurface`]) and the explicit
//! frame loop that drives it ([`FrameLoop`]).

mod canvas;
mod color;
mod columns;
mod frame_loop;
mod paint;
mod rain;
mod state;

pub use canvas::{Cell, CellSurface};
pub use color::{FADE_CUTOFF, blend, present};
pub use columns::ColumnTable;
pub use frame_loop::{CancelToken, FrameLoop};
pub use paint::{Font, FontFamily, PaintContext};
pub use rain::draw_frame;
pub use state::RainSurface;
