mod cli;
mod logging;

use std::io::stdout;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use clap::Parser;
use crossterm::{
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event,
        KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
};
use nexum_canvas::{
    CanvasView, FrameClock, Pixmap, SurfaceManager, CELL_HEIGHT, CELL_WIDTH, TERMINAL_PIXEL_RATIO,
    renderer_for,
};
use nexum_config::Config;
use nexum_core::{BackgroundStyle, Point, RenderOptions, Rgba, Scene, Viewport};
use ratatui::{
    layout::{Alignment, Constraint, Layout},
    style::{Style, Stylize},
    text::Line,
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use tracing::info;

use crate::cli::Cli;

/// Logical pixels scrolled per wheel notch.
const SCROLL_STEP: f32 = 40.0;
/// How long to wait for input when no frame is pending.
const IDLE_POLL: Duration = Duration::from_millis(250);

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    if let Some(path) = logging::init()? {
        info!(path = %path.display(), "logging enabled");
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };
    cli.apply(&mut config);
    let app = App::new(&config)?;

    let terminal = ratatui::init();
    restoring(|| run(app, terminal), ratatui::restore)
}

/// Run `body`, then `restore` whatever the outcome.
fn restoring<T>(
    body: impl FnOnce() -> color_eyre::Result<T>,
    restore: impl FnOnce(),
) -> color_eyre::Result<T> {
    let result = body();
    restore();
    result
}

/// Run the app with mouse and focus reporting enabled, turning them off again
/// even when the app fails.
fn run(app: App, terminal: DefaultTerminal) -> color_eyre::Result<()> {
    execute!(stdout(), EnableMouseCapture, EnableFocusChange)?;
    let result = app.run(terminal);
    let disabled = execute!(stdout(), DisableMouseCapture, DisableFocusChange);
    result.and(disabled.map_err(Into::into))
}

/// Maps a terminal of `columns x rows` cells onto the logical viewport the renderers see.
fn terminal_viewport(columns: u16, rows: u16) -> Viewport {
    Viewport::new(
        columns as f32 * CELL_WIDTH,
        rows as f32 * CELL_HEIGHT,
        TERMINAL_PIXEL_RATIO,
    )
}

/// Logical position of the center of a cell.
fn cell_center(column: u16, row: u16) -> Point {
    Point::new(
        (column as f32 + 0.5) * CELL_WIDTH,
        (row as f32 + 0.5) * CELL_HEIGHT,
    )
}

/// The main application: one page with its animated backdrop.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    scene: Scene,
    background: BackgroundStyle,
    /// Accent forced by config or flags; otherwise each scene brings its own.
    accent: Option<Rgba>,
    /// Options shared by every mount; the accent is filled in per scene.
    options: RenderOptions,
    clock: FrameClock,
    manager: SurfaceManager<Pixmap>,
    viewport: Viewport,
    scroll: f32,
    /// Seed captured at startup, advanced on every mount.
    seed: u64,
}

impl App {
    /// Construct a new instance of [`App`] from the resolved configuration.
    pub fn new(config: &Config) -> color_eyre::Result<Self> {
        let options = config.render_options()?;
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        Ok(Self {
            running: false,
            scene: config.scene,
            background: config.background_style(),
            accent: config.accent.as_ref().map(|_| options.accent),
            options,
            clock: FrameClock::new(config.frame_rate),
            manager: SurfaceManager::inert(),
            viewport: terminal_viewport(0, 0),
            scroll: 0.0,
            seed,
        })
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        let size = terminal.size()?;
        self.viewport = terminal_viewport(size.width, size.height);
        self.remount();

        self.running = true;
        while self.running {
            for handle in self.clock.poll(Instant::now()) {
                self.manager.run_frame(handle, &mut self.clock);
            }
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        self.manager.teardown(&mut self.clock);
        Ok(())
    }

    /// Tear down the current backdrop and mount a fresh one for the current scene.
    fn remount(&mut self) {
        self.manager.teardown(&mut self.clock);

        let options = RenderOptions {
            accent: self.accent.unwrap_or_else(|| self.scene.accent()),
            ..self.options
        };
        self.seed = self.seed.wrapping_add(1);
        let renderer = renderer_for(self.background, options, self.seed);
        let surface = Pixmap::new(
            ((self.viewport.width * TERMINAL_PIXEL_RATIO) as u32).max(1),
            ((self.viewport.height * TERMINAL_PIXEL_RATIO) as u32).max(1),
        );
        self.manager = SurfaceManager::mount(
            renderer,
            surface,
            self.viewport,
            options,
            &mut self.clock,
        );
        self.scroll = 0.0;
        info!(scene = %self.scene, background = %self.background, "mounted backdrop");
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        if let Some(pixmap) = self.manager.surface() {
            frame.render_widget(CanvasView::new(pixmap), area);
        }

        let color = self.accent.unwrap_or_else(|| self.scene.accent()).to_color();
        let chunks = Layout::vertical([
            Constraint::Fill(1),   // Top padding
            Constraint::Length(1), // Title
            Constraint::Length(1), // Spacing
            Constraint::Length(2), // Subtitle
            Constraint::Fill(1),   // Bottom padding
            Constraint::Length(1), // Help text
        ])
        .split(area);

        let title = Paragraph::new(self.scene.title())
            .style(Style::new().fg(color).bold())
            .alignment(Alignment::Center);
        frame.render_widget(title, chunks[1]);

        let subtitle = Paragraph::new(self.scene.subtitle())
            .style(Style::new().white())
            .alignment(Alignment::Center);
        frame.render_widget(subtitle, chunks[3]);

        let help = Line::from(vec![
            "q".bold().fg(color),
            " quit  ".dark_gray(),
            "s".bold().fg(color),
            format!(" scene ({})  ", self.scene).dark_gray(),
            "b".bold().fg(color),
            format!(" background ({})", self.background).dark_gray(),
        ])
        .centered();
        frame.render_widget(help, chunks[5]);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits no longer than the time until the next frame is due.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        let timeout = self
            .clock
            .time_until_due(Instant::now())
            .unwrap_or(IDLE_POLL);
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                Event::FocusLost => self.manager.pointer_leave(),
                Event::Resize(columns, rows) => {
                    self.viewport = terminal_viewport(columns, rows);
                    self.manager.resize(self.viewport, &mut self.clock);
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
            (_, KeyCode::Char('s')) => self.cycle_scene(),
            (_, KeyCode::Char('b')) => self.cycle_background(),
            _ => {}
        }
    }

    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                self.manager.pointer_move(cell_center(mouse.column, mouse.row));
            }
            MouseEventKind::ScrollDown => self.scroll_by(SCROLL_STEP),
            MouseEventKind::ScrollUp => self.scroll_by(-SCROLL_STEP),
            _ => {}
        }
    }

    fn scroll_by(&mut self, delta: f32) {
        self.scroll = (self.scroll + delta).max(0.0);
        self.manager.scroll(self.scroll);
    }

    /// Move to the next page and mount its backdrop.
    fn cycle_scene(&mut self) {
        self.scene = self.scene.next();
        self.background = self.scene.background();
        self.remount();
    }

    /// Swap the backdrop behind the current page.
    fn cycle_background(&mut self) {
        self.background = self.background.next();
        self.remount();
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
