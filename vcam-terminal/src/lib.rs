/// Terminal backend for the virtual camera viewer
use crossterm::{
    cursor,
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute, queue,
    style::{self, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use log::{debug, info, trace};
use nalgebra::Point2;
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use vcam_core::{ActionSet, Backend, Color, RotationPolicy, ViewerConfig, Viewport};

pub mod keymap;
pub mod renderer;

pub use keymap::KeyState;
pub use renderer::LineRenderer;

/// Scale a point from viewport pixels to fractional cell coordinates.
///
/// Non-finite points have no cell and yield `None`.
pub fn pixels_to_cells(
    point: Point2<f32>,
    viewport: &Viewport,
    columns: usize,
    rows: usize,
) -> Option<(f64, f64)> {
    if !point.x.is_finite() || !point.y.is_finite() {
        return None;
    }
    let sx = columns as f64 / viewport.width as f64;
    let sy = rows as f64 / viewport.height as f64;
    Some((point.x as f64 * sx, point.y as f64 * sy))
}

/// Crossterm implementation of the frame loop's render/input collaborator.
///
/// Lines arrive in the virtual pixel space of the [`Viewport`] and are
/// scaled onto the terminal's cell grid.
pub struct TerminalBackend {
    renderer: LineRenderer,
    viewport: Viewport,
    policy: RotationPolicy,
    keys: KeyState,
    release_events: bool,
    active: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalBackend {
    /// Switch the terminal to raw mode on the alternate screen.
    ///
    /// The backend exists as soon as raw mode is on, so a failure in the
    /// remaining setup is undone by `Drop`.
    pub fn new(config: &ViewerConfig) -> io::Result<Self> {
        let (width, height) = terminal::size()?;

        terminal::enable_raw_mode()?;
        let mut backend = Self {
            renderer: LineRenderer::new(width as usize, height as usize),
            viewport: config.viewport(),
            policy: config.rotation_policy,
            keys: KeyState::new(false),
            release_events: false,
            active: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        };

        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        if terminal::supports_keyboard_enhancement().unwrap_or(false) {
            execute!(
                stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
            backend.release_events = true;
            backend.keys = KeyState::new(true);
        }
        info!(
            "terminal backend ready: {}x{} cells, key release events {}",
            width,
            height,
            if backend.release_events { "on" } else { "off" }
        );

        Ok(backend)
    }

    fn update_fps(&mut self) {
        self.frame_count += 1;
        let now = Instant::now();
        if (now - self.last_frame).as_secs() >= 1 {
            self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
            self.frame_count = 0;
            self.last_frame = now;
        }
    }

    fn restore_terminal(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        if self.release_events {
            execute!(stdout(), PopKeyboardEnhancementFlags)?;
        }
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;
        Ok(())
    }
}

impl Backend for TerminalBackend {
    fn poll_quit_signal(&mut self) -> io::Result<bool> {
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => self.keys.handle(key),
                Event::Resize(width, height) => {
                    debug!("terminal resized to {}x{}", width, height);
                    self.renderer.resize(width as usize, height as usize);
                }
                _ => {}
            }
        }
        Ok(self.keys.quit_requested())
    }

    fn pressed_actions(&mut self) -> io::Result<ActionSet> {
        Ok(self.keys.take_actions())
    }

    fn clear_frame(&mut self) -> io::Result<()> {
        self.renderer.clear();
        Ok(())
    }

    fn draw_line(&mut self, from: Point2<f32>, to: Point2<f32>, color: Color) -> io::Result<()> {
        let (columns, rows) = (self.renderer.width(), self.renderer.height());
        match (
            pixels_to_cells(from, &self.viewport, columns, rows),
            pixels_to_cells(to, &self.viewport, columns, rows),
        ) {
            (Some(a), Some(b)) => {
                let color = style::Color::Rgb {
                    r: color.r,
                    g: color.g,
                    b: color.b,
                };
                self.renderer.draw_line(a, b, color);
            }
            _ => trace!("skipping non-finite line {:?} -> {:?}", from, to),
        }
        Ok(())
    }

    fn present_frame(&mut self) -> io::Result<()> {
        self.update_fps();

        let mut stdout = stdout();
        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay, cut to one row
        let status: String = format!(
            "VCam | FPS: {:.1} | {} | WASD/Space/C=Move Arrows=Look E/Q=Roll +/-=Zoom R=Reset P=Quit",
            self.fps, self.policy
        )
        .chars()
        .take(self.renderer.width())
        .collect();
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(style::Color::Yellow),
            Print(status),
            ResetColor
        )?;

        stdout.flush()
    }

    fn teardown(&mut self) -> io::Result<()> {
        info!("restoring terminal");
        self.restore_terminal()
    }
}

impl Drop for TerminalBackend {
    fn drop(&mut self) {
        // Best effort when the loop never reached teardown, e.g. on panic
        let _ = self.restore_terminal();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: (f64, f64), b: (f64, f64)) -> bool {
        (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
    }

    #[test]
    fn test_pixels_to_cells_scales_to_grid() {
        let viewport = Viewport::default();
        let centre = pixels_to_cells(Point2::new(400.0, 300.0), &viewport, 80, 24).unwrap();
        assert!(close(centre, (40.0, 12.0)), "{:?}", centre);

        let origin = pixels_to_cells(Point2::new(0.0, 0.0), &viewport, 80, 24).unwrap();
        assert!(close(origin, (0.0, 0.0)));

        let corner = pixels_to_cells(Point2::new(800.0, 600.0), &viewport, 80, 24).unwrap();
        assert!(close(corner, (80.0, 24.0)), "{:?}", corner);
    }

    #[test]
    fn test_pixels_to_cells_keeps_offscreen_points() {
        let viewport = Viewport::default();
        // Clipping is the renderer's job
        let far = pixels_to_cells(Point2::new(-800.0, 1200.0), &viewport, 100, 30).unwrap();
        assert!(close(far, (-100.0, 60.0)), "{:?}", far);
    }

    #[test]
    fn test_pixels_to_cells_skips_non_finite() {
        let viewport = Viewport::default();
        assert_eq!(pixels_to_cells(Point2::new(f32::NAN, 1.0), &viewport, 80, 24), None);
        assert_eq!(pixels_to_cells(Point2::new(1.0, f32::INFINITY), &viewport, 80, 24), None);
        assert_eq!(
            pixels_to_cells(Point2::new(f32::NEG_INFINITY, f32::NAN), &viewport, 80, 24),
            None
        );
    }
}
