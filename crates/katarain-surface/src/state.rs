//! Rain surface state management.

use crossterm::event::KeyCode;
use katarain_core::{Brightness, DropSpeed, HoverFilters, RainStyle, SpeedControls, Viewport};
use rand::Rng;

use crate::columns::ColumnTable;
use crate::frame_loop::CancelToken;
use crate::paint::PaintContext;
use crate::rain;

/// The animated rain component.
///
/// Owns the paint context while mounted, the column table derived from it,
/// the speed parameter and the brightness filter. Every handler is a no-op
/// while no context is mounted, except the keyboard handler: the speed
/// outlives individual mounts.
#[derive(Debug)]
pub struct RainSurface<P> {
    /// Paint context, present between mount and unmount.
    context: Option<P>,
    /// Fall offsets, derived from the context width on mount.
    columns: ColumnTable,
    /// Current speed parameter.
    speed: DropSpeed,
    /// Brightness filter set by the pointer handlers.
    filter: Option<Brightness>,
    style: RainStyle,
    controls: SpeedControls,
    hover: HoverFilters,
    /// Token handed to the frame loop of the current mount.
    token: Option<CancelToken>,
}

impl<P: PaintContext> Default for RainSurface<P> {
    fn default() -> Self {
        Self::new(RainStyle::default())
    }
}

impl<P: PaintContext> RainSurface<P> {
    /// Create an unmounted surface with default speed, controls and filters.
    pub fn new(style: RainStyle) -> Self {
        Self {
            context: None,
            columns: ColumnTable::default(),
            speed: DropSpeed::default(),
            filter: None,
            style,
            controls: SpeedControls::default(),
            hover: HoverFilters::default(),
            token: None,
        }
    }

    pub fn with_speed(mut self, speed: DropSpeed) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_controls(mut self, controls: SpeedControls) -> Self {
        self.controls = controls;
        self
    }

    pub fn with_hover_filters(mut self, hover: HoverFilters) -> Self {
        self.hover = hover;
        self
    }

    /// Install `context`, size it to `viewport` and derive the column table.
    ///
    /// Any previously mounted context is released first. The returned token
    /// is cancelled when this mount ends.
    pub fn mount(&mut self, mut context: P, viewport: Viewport) -> CancelToken {
        if self.unmount().is_some() {
            tracing::debug!("replacing mounted rain surface");
        }

        context.resize(viewport.width, viewport.height);
        self.columns = ColumnTable::for_width(context.width());
        self.context = Some(context);

        let token = CancelToken::new();
        self.token = Some(token.clone());

        tracing::info!(
            width = viewport.width,
            height = viewport.height,
            columns = self.columns.len(),
            "rain surface mounted"
        );
        token
    }

    /// Release the context and cancel the frame loop.
    ///
    /// Returns the context that was mounted, if any.
    pub fn unmount(&mut self) -> Option<P> {
        if let Some(token) = self.token.take() {
            token.cancel();
        }
        let context = self.context.take()?;
        self.columns = ColumnTable::default();
        tracing::info!("rain surface unmounted");
        Some(context)
    }

    pub fn is_mounted(&self) -> bool {
        self.context.is_some()
    }

    pub fn context(&self) -> Option<&P> {
        self.context.as_ref()
    }

    pub fn columns(&self) -> &ColumnTable {
        &self.columns
    }

    pub fn speed(&self) -> DropSpeed {
        self.speed
    }

    pub fn filter(&self) -> Option<Brightness> {
        self.filter
    }

    /// Run one frame. Returns `false` without painting when unmounted.
    pub fn draw_frame<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        let Some(context) = self.context.as_mut() else {
            return false;
        };
        rain::draw_frame(context, &mut self.columns, self.speed, &self.style, rng);
        true
    }

    /// Pointer entered the surface.
    pub fn on_pointer_enter(&mut self) {
        self.set_filter(self.hover.enter);
    }

    /// Pointer left the surface.
    pub fn on_pointer_leave(&mut self) {
        self.set_filter(self.hover.leave);
    }

    fn set_filter(&mut self, filter: Brightness) {
        if self.context.is_none() {
            return;
        }
        if self.filter != Some(filter) {
            tracing::debug!(%filter, "surface filter changed");
        }
        self.filter = Some(filter);
    }

    /// Adjust the speed for arrow keys. Returns whether the key was handled.
    pub fn on_key_down(&mut self, key: KeyCode) -> bool {
        let speed = match key {
            KeyCode::Up => self.speed.increased(self.controls.up_step),
            KeyCode::Down => self.speed.decreased(self.controls.down_step),
            _ => return false,
        };
        tracing::debug!(from = self.speed.value(), to = speed.value(), "speed changed");
        self.speed = speed;
        true
    }

    /// Resize the surface to `viewport`.
    ///
    /// This clears the surface but keeps the column table: after growing,
    /// the area right of the original columns stays blank.
    pub fn on_resize(&mut self, viewport: Viewport) {
        let Some(context) = self.context.as_mut() else {
            return;
        };
        context.resize(viewport.width, viewport.height);
        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            columns = self.columns.len(),
            "rain surface resized"
        );
    }
}

impl<P> Drop for RainSurface<P> {
    fn drop(&mut self) {
        if let Some(token) = self.token.take() {
            token.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::CellSurface;
    use crate::frame_loop::FrameLoop;
    use crate::paint::testing::RecordingContext;
    use rand::{SeedableRng, rngs::StdRng};
    use std::time::Instant;

    fn mounted(width: u32, height: u32) -> (RainSurface<RecordingContext>, CancelToken) {
        let mut surface = RainSurface::default();
        let token = surface.mount(RecordingContext::new(0, 0), Viewport::new(width, height));
        (surface, token)
    }

    #[test]
    fn test_mount_sizes_context_and_columns() {
        let (surface, token) = mounted(320, 240);
        assert!(surface.is_mounted());
        let ctx = surface.context().unwrap();
        assert_eq!((ctx.width, ctx.height), (320, 240));
        assert_eq!(ctx.resizes, 1);
        assert_eq!(surface.columns().len(), 20);
        assert!(surface.columns().offsets().iter().all(|&o| o == 1.0));
        assert!(!token.is_cancelled());
    }

    #[test]
    fn test_scenario_320_wide() {
        let (mut surface, _token) = mounted(320, 480);
        let mut rng = StdRng::seed_from_u64(9);

        assert!(surface.draw_frame(&mut rng));
        for offset in surface.columns().offsets() {
            assert!((offset - 1.0 - 1.005).abs() < 1e-5);
        }

        surface.on_pointer_enter();
        assert_eq!(surface.filter().unwrap().to_string(), "brightness(1.5)");
        surface.on_pointer_leave();
        assert_eq!(surface.filter().unwrap().to_string(), "brightness(0.5)");

        assert!(surface.on_key_down(KeyCode::Up));
        assert_eq!(surface.speed().value(), 1.5);
    }

    #[test]
    fn test_speed_never_negative() {
        let (mut surface, _token) = mounted(320, 480);
        for _ in 0..7 {
            surface.on_key_down(KeyCode::Down);
            assert!(surface.speed().value() >= 0.0);
        }
        assert_eq!(surface.speed().value(), 0.0);
        surface.on_key_down(KeyCode::Up);
        assert_eq!(surface.speed().value(), 1.0);
    }

    #[test]
    fn test_other_keys_are_ignored() {
        let (mut surface, _token) = mounted(320, 480);
        assert!(!surface.on_key_down(KeyCode::Left));
        assert!(!surface.on_key_down(KeyCode::Char('k')));
        assert_eq!(surface.speed(), DropSpeed::default());
    }

    #[test]
    fn test_no_paint_after_unmount() {
        let (mut surface, token) = mounted(320, 480);
        let now = Instant::now();
        let mut frames = FrameLoop::with_rate(60, token.clone(), now);
        let mut rng = StdRng::seed_from_u64(10);

        assert!(frames.poll(now));
        assert!(surface.draw_frame(&mut rng));
        let ctx = surface.unmount().unwrap();
        let painted = ctx.calls.len();
        assert!(!surface.is_mounted());

        assert!(token.is_cancelled());
        assert!(!frames.poll(now + frames.interval()));
        // A step that still fires finds no context.
        assert!(!surface.draw_frame(&mut rng));
        assert_eq!(ctx.calls.len(), painted);
        assert!(surface.columns().is_empty());
    }

    #[test]
    fn test_handlers_without_context_are_noops() {
        let mut surface: RainSurface<RecordingContext> = RainSurface::default();
        let mut rng = StdRng::seed_from_u64(11);
        assert!(!surface.is_mounted());
        assert!(!surface.draw_frame(&mut rng));
        surface.on_pointer_enter();
        assert_eq!(surface.filter(), None);
        surface.on_resize(Viewport::new(640, 480));
        assert!(surface.context().is_none());
        // Speed has its own lifecycle
        assert!(surface.on_key_down(KeyCode::Up));
        assert_eq!(surface.speed().value(), 1.5);
    }

    #[test]
    fn test_resize_keeps_column_table() {
        let (mut surface, _token) = mounted(320, 480);
        surface.on_resize(Viewport::new(640, 960));
        let ctx = surface.context().unwrap();
        assert_eq!((ctx.width, ctx.height), (640, 960));
        assert_eq!(ctx.resizes, 2);
        assert_eq!(surface.columns().len(), 20);
    }

    #[test]
    fn test_remount_recomputes_columns_and_keeps_speed() {
        let (mut surface, first) = mounted(320, 480);
        surface.on_key_down(KeyCode::Up);
        let second = surface.mount(RecordingContext::new(0, 0), Viewport::new(640, 480));

        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());
        assert_eq!(surface.columns().len(), 40);
        assert_eq!(surface.speed().value(), 1.5);
    }

    #[test]
    fn test_drop_cancels_token() {
        let (surface, token) = mounted(320, 480);
        drop(surface);
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_cell_surface_grows_blank_after_resize() {
        let mut surface = RainSurface::default();
        let _token = surface.mount(
            CellSurface::new(Viewport::default()),
            Viewport::from_cells(8, 4),
        );
        surface.on_resize(Viewport::from_cells(16, 4));
        let mut rng = StdRng::seed_from_u64(12);
        surface.draw_frame(&mut rng);

        let ctx = surface.context().unwrap();
        assert_eq!(surface.columns().len(), 4);
        assert!(ctx.cell(0, 0).and_then(|c| c.glyph).is_some());
        assert!(ctx.cell(6, 0).and_then(|c| c.glyph).is_some());
        assert!((8..16).all(|col| ctx.cell(col, 0).and_then(|c| c.glyph).is_none()));
    }
}
