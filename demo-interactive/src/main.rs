//! Interactive Fireworks Demo
//!
//! A terminal frontend for the fireworks simulation. Mouse input is captured and
//! forwarded to the world as pointer events, and every tick's draw commands are painted
//! onto a braille canvas at the configured refresh rate.
//!
//! # Usage
//!
//! ```bash
//! cargo run --package demo-interactive
//! RUST_LOG=fireworks_core=debug cargo run --package demo-interactive
//! ```
//!
//! # Controls
//!
//! - Left click - Launch a firework
//! - `c` - Clear all fireworks
//! - `q` / `Esc` - Quit
//!
//! Logs are written to `fireworks-interactive.log` in the system temp directory so they
//! don't tear the canvas.

use fireworks_core::{
    Color as FireColor, CommandBuffer, DrawCommand, FixedRate, PointerEvent, SpawnAnchor,
    TickReport, TickSource, World, WorldConfig,
};
use ratatui::crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEvent, MouseEventKind,
};
use ratatui::crossterm::execute;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::Line;
use ratatui::widgets::canvas::{Canvas, Painter, Shape};
use ratatui::widgets::{Block, Paragraph};
use ratatui::{DefaultTerminal, Frame};
use std::error::Error;
use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Simulation px covered by one terminal cell
const CELL_WIDTH_PX: f64 = 8.0;
const CELL_HEIGHT_PX: f64 = 16.0;
/// Braille dot pitch in px (2x4 dots per cell)
const DOT_PX: f64 = 4.0;

fn main() -> Result<(), Box<dyn Error>> {
    let log_path = std::env::temp_dir().join("fireworks-interactive.log");
    // Reported before the terminal switches to the alternate screen
    if let Err(err) = init_logging(&log_path) {
        eprintln!(
            "Logging disabled: cannot create {}: {err}",
            log_path.display()
        );
    }

    let mut terminal = ratatui::init();
    let result = run(&mut terminal);

    let _ = execute!(io::stdout(), DisableMouseCapture);
    ratatui::restore();
    result
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn run(terminal: &mut DefaultTerminal) -> Result<(), Box<dyn Error>> {
    execute!(io::stdout(), EnableMouseCapture)?;

    // Viewport is fixed from the terminal size at startup
    let size = terminal.size()?;
    let screen = Screen::new(Rect::new(0, 0, size.width, size.height));

    let config = WorldConfig {
        // Terminals without motion reporting only tell us where the click landed
        spawn_anchor: SpawnAnchor::Click,
        ..WorldConfig::with_viewport(screen.width_px(), screen.height_px())
    };
    let mut world = World::new(config)?;
    info!(
        "Interactive session on {}x{} cells ({:.0}x{:.0} px)",
        screen.canvas_inner.width,
        screen.canvas_inner.height,
        screen.width_px(),
        screen.height_px()
    );

    let mut clock = FixedRate::from_hz(world.config().refresh_rate_hz)?;
    let mut frame = CommandBuffer::new();
    let mut last_error: Option<String> = None;

    while clock.next_tick() {
        let report = world.tick(&mut frame);
        terminal.draw(|f| draw(f, &screen, &frame, &report, last_error.as_deref()))?;

        // Handle input until the next tick is due
        while event::poll(clock.until_next())? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char('c') => {
                        world.clear();
                        last_error = None;
                    }
                    _ => {}
                },
                Event::Mouse(mouse) => {
                    if let Some(pointer) = screen.pointer_event(mouse) {
                        if let Err(err) = world.handle_event(pointer) {
                            last_error = Some(err.to_string());
                        }
                    }
                }
                _ => {}
            }
        }
    }

    Ok(())
}

/// Fixed screen layout: a bordered canvas above a one-line status bar.
#[derive(Debug, Clone, Copy)]
struct Screen {
    canvas: Rect,
    canvas_inner: Rect,
    status: Rect,
}

impl Screen {
    fn new(area: Rect) -> Self {
        let [canvas, status] =
            Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(area);
        Self {
            canvas,
            canvas_inner: Block::bordered().inner(canvas),
            status,
        }
    }

    fn width_px(&self) -> f64 {
        f64::from(self.canvas_inner.width.max(1)) * CELL_WIDTH_PX
    }

    fn height_px(&self) -> f64 {
        f64::from(self.canvas_inner.height.max(1)) * CELL_HEIGHT_PX
    }

    /// Map a terminal mouse event to a pointer event in viewport px (cell centers).
    fn pointer_event(&self, mouse: MouseEvent) -> Option<PointerEvent> {
        let inner = self.canvas_inner;
        let inside = mouse.column >= inner.x
            && mouse.column < inner.x + inner.width
            && mouse.row >= inner.y
            && mouse.row < inner.y + inner.height;
        if !inside {
            return None;
        }

        let x = (f64::from(mouse.column - inner.x) + 0.5) * CELL_WIDTH_PX;
        let y = (f64::from(mouse.row - inner.y) + 0.5) * CELL_HEIGHT_PX;

        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => Some(PointerEvent::Move { x, y }),
            MouseEventKind::Down(MouseButton::Left) => Some(PointerEvent::Click { x, y }),
            _ => None,
        }
    }
}

fn draw(
    f: &mut Frame,
    screen: &Screen,
    commands: &CommandBuffer,
    report: &TickReport,
    last_error: Option<&str>,
) {
    let height = screen.height_px();
    let background = commands.background().unwrap_or(FireColor::BLACK);

    let canvas = Canvas::default()
        .block(Block::bordered().title(" fireworks "))
        .marker(Marker::Braille)
        .background_color(tui_color(background))
        .x_bounds([0.0, screen.width_px()])
        .y_bounds([0.0, height])
        .paint(|ctx| {
            ctx.draw(&DiscLayer {
                commands: commands.commands(),
                height,
            });
        });
    f.render_widget(canvas, screen.canvas);

    let mut status = format!(
        " tick {}  fireworks {}  particles {}  |  click: launch  c: clear  q: quit",
        report.tick, report.fireworks, report.particles
    );
    if let Some(err) = last_error {
        status.push_str("  |  ");
        status.push_str(err);
    }
    f.render_widget(
        Paragraph::new(Line::from(status)).style(Style::new().fg(Color::Gray)),
        screen.status,
    );
}

fn tui_color(color: FireColor) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

/// Paints one frame's disc commands. The simulation's y axis points down, the canvas's up.
struct DiscLayer<'a> {
    commands: &'a [DrawCommand],
    height: f64,
}

impl Shape for DiscLayer<'_> {
    fn draw(&self, painter: &mut Painter<'_, '_>) {
        for command in self.commands {
            if let DrawCommand::Disc {
                center,
                radius,
                color,
            } = *command
            {
                fill_disc(
                    painter,
                    center.x,
                    self.height - center.y,
                    radius,
                    tui_color(color),
                );
            }
        }
    }
}

/// Rasterize a filled disc at braille-dot resolution.
fn fill_disc(painter: &mut Painter<'_, '_>, cx: f64, cy: f64, radius: f64, color: Color) {
    if radius <= 0.0 {
        return;
    }

    let mut dy = -radius;
    while dy <= radius {
        let half_width = (radius * radius - dy * dy).max(0.0).sqrt();
        let mut dx = -half_width;
        while dx <= half_width {
            if let Some((x, y)) = painter.get_point(cx + dx, cy + dy) {
                painter.paint(x, y, color);
            }
            dx += DOT_PX;
        }
        dy += DOT_PX;
    }

    // Small discs can fall between dots; always light the center
    if let Some((x, y)) = painter.get_point(cx, cy) {
        painter.paint(x, y, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyModifiers;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_screen_layout() {
        let screen = Screen::new(Rect::new(0, 0, 80, 25));
        assert_eq!(screen.canvas, Rect::new(0, 0, 80, 24));
        assert_eq!(screen.canvas_inner, Rect::new(1, 1, 78, 22));
        assert_eq!(screen.status, Rect::new(0, 24, 80, 1));
        assert_eq!(screen.width_px(), 78.0 * CELL_WIDTH_PX);
        assert_eq!(screen.height_px(), 22.0 * CELL_HEIGHT_PX);
    }

    #[test]
    fn test_logging_reports_unwritable_path() {
        let path = std::env::temp_dir()
            .join("fireworks-missing-dir")
            .join("nested")
            .join("fireworks-interactive.log");
        assert!(init_logging(&path).is_err());
    }

    #[test]
    fn test_pointer_mapping() {
        let screen = Screen::new(Rect::new(0, 0, 80, 25));

        assert_eq!(
            screen.pointer_event(mouse(MouseEventKind::Moved, 1, 1)),
            Some(PointerEvent::Move { x: 4.0, y: 8.0 })
        );
        assert_eq!(
            screen.pointer_event(mouse(MouseEventKind::Down(MouseButton::Left), 11, 3)),
            Some(PointerEvent::Click { x: 84.0, y: 40.0 })
        );
        // Border, status bar and other buttons are ignored
        assert_eq!(screen.pointer_event(mouse(MouseEventKind::Moved, 0, 5)), None);
        assert_eq!(screen.pointer_event(mouse(MouseEventKind::Moved, 5, 24)), None);
        assert_eq!(
            screen.pointer_event(mouse(MouseEventKind::Down(MouseButton::Right), 5, 5)),
            None
        );
    }
}
