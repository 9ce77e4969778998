mod logging;

use std::io::{Write, stdout};
use std::time::{Duration, Instant};

use crossterm::{
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent,
    },
    execute,
};
use katarain_config::Config;
use katarain_core::Viewport;
use katarain_surface::{CellSurface, FrameLoop, RainSurface};
use rand::{SeedableRng, rngs::StdRng};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::{Color, Stylize},
    text::{Line, Span},
    widgets::Clear,
};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let log_path = logging::init();

    let (config, config_path) = Config::load()?;
    tracing::info!(
        config = ?config_path,
        log = ?log_path,
        "starting katarain"
    );
    let app = App::new(&config)?;

    let terminal = ratatui::init();
    let result = execute!(stdout(), EnableMouseCapture, EnableFocusChange)
        .map_err(Into::into)
        .and_then(|()| app.run(terminal));
    release_pointer_events(&mut stdout());
    ratatui::restore();
    result
}

/// Turn mouse and focus reporting back off. Failures are logged, not raised,
/// so the terminal is still restored. Returns whether the commands went out.
fn release_pointer_events<W: Write>(out: &mut W) -> bool {
    match execute!(out, DisableMouseCapture, DisableFocusChange) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "failed to disable mouse capture");
            false
        }
    }
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// The rain component.
    surface: RainSurface<CellSurface>,
    /// Frames per second of the frame loop.
    frame_rate: u32,
    /// Highlight colour of the status line, the glyph colour.
    accent: Color,
    /// Show the status line?
    show_status: bool,
    /// Has the mouse been seen since focus was last lost?
    pointer_inside: bool,
    rng: StdRng,
}

impl App {
    /// Construct a new instance of [`App`] from the loaded configuration.
    pub fn new(config: &Config) -> color_eyre::Result<Self> {
        let style = config.rain_style()?;
        let accent = style.glyph_color.color();
        let surface = RainSurface::new(style)
            .with_speed(config.initial_speed())
            .with_controls(config.speed_controls())
            .with_hover_filters(config.hover_filters());

        Ok(Self {
            running: false,
            surface,
            frame_rate: config.rain.frame_rate,
            accent,
            show_status: config.display.show_status,
            pointer_inside: false,
            rng: StdRng::from_entropy(),
        })
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        let size = terminal.size()?;
        let viewport = Viewport::from_cells(size.width, size.height);
        let token = self.surface.mount(CellSurface::new(viewport), viewport);
        let mut frames = FrameLoop::with_rate(self.frame_rate, token, Instant::now());

        self.running = true;
        while self.running && self.surface.is_mounted() && !frames.is_cancelled() {
            if frames.poll(Instant::now()) {
                self.surface.draw_frame(&mut self.rng);
                terminal.draw(|frame| self.render(frame))?;
            }
            self.handle_crossterm_events(frames.time_until_next(Instant::now()))?;
        }

        self.surface.unmount();
        Ok(())
    }

    /// Renders the rain and the optional status line.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        if let Some(canvas) = self.surface.context() {
            canvas.render(frame, area, self.surface.filter());
        }

        if !self.show_status {
            return;
        }

        let chunks = Layout::vertical([
            Constraint::Fill(1),   // Rain
            Constraint::Length(1), // Status line
        ])
        .split(area);

        let color = self.accent;
        let filter = self
            .surface
            .filter()
            .map_or_else(|| "none".to_string(), |f| f.to_string());
        let status = Line::from(vec![
            "speed ".dark_gray(),
            Span::from(format!("{:.1}", self.surface.speed().value()))
                .bold()
                .fg(color),
            "  columns ".dark_gray(),
            Span::from(self.surface.columns().len().to_string())
                .bold()
                .fg(color),
            "  filter ".dark_gray(),
            Span::from(filter).bold().fg(color),
            "  ↑/↓".bold().fg(color),
            " speed  ".dark_gray(),
            "s".bold().fg(color),
            " status  ".dark_gray(),
            "q".bold().fg(color),
            " quit".dark_gray(),
        ])
        .centered();

        frame.render_widget(Clear, chunks[1]);
        frame.render_widget(status, chunks[1]);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits at most `timeout` so the next frame is not delayed.
    fn handle_crossterm_events(&mut self, timeout: Duration) -> color_eyre::Result<()> {
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                Event::FocusLost => self.on_focus_lost(),
                Event::Resize(cols, rows) => {
                    self.surface.on_resize(Viewport::from_cells(cols, rows))
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('s')) => self.toggle_status(),
            (_, code) => {
                self.surface.on_key_down(code);
            }
        }
    }

    /// Any mouse report means the pointer is over the surface.
    fn on_mouse_event(&mut self, _mouse: MouseEvent) {
        if !self.pointer_inside {
            self.pointer_inside = true;
            self.surface.on_pointer_enter();
        }
    }

    /// Losing focus is the closest terminal signal to the pointer leaving.
    fn on_focus_lost(&mut self) {
        self.pointer_inside = false;
        self.surface.on_pointer_leave();
    }

    fn toggle_status(&mut self) {
        self.show_status = !self.show_status;
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        tracing::info!(speed = self.surface.speed().value(), "quitting");
        self.running = false;
    }
}
