/// Example: Render one frame of the default scene as plain text
///
/// Usage: cargo run --example snapshot -- [columns] [rows]
///
/// Runs without raw mode or the alternate screen, so the output can be
/// piped or diffed.

use nalgebra::Point2;
use std::env;
use std::error::Error;
use std::io;
use vcam_core::{ActionSet, Backend, Color, FrameLoop, Scene, ViewerConfig};
use vcam_terminal::LineRenderer;

/// Draws into a character grid and never asks for input
struct Snapshot {
    renderer: LineRenderer,
    sx: f64,
    sy: f64,
}

impl Backend for Snapshot {
    fn poll_quit_signal(&mut self) -> io::Result<bool> {
        Ok(false)
    }

    fn pressed_actions(&mut self) -> io::Result<ActionSet> {
        Ok(ActionSet::new())
    }

    fn clear_frame(&mut self) -> io::Result<()> {
        self.renderer.clear();
        Ok(())
    }

    fn draw_line(&mut self, from: Point2<f32>, to: Point2<f32>, _color: Color) -> io::Result<()> {
        let a = (from.x as f64 * self.sx, from.y as f64 * self.sy);
        let b = (to.x as f64 * self.sx, to.y as f64 * self.sy);
        self.renderer
            .draw_line(a, b, crossterm::style::Color::White);
        Ok(())
    }

    fn present_frame(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().collect();
    let columns: usize = args.get(1).map(|s| s.parse()).transpose()?.unwrap_or(100);
    let rows: usize = args.get(2).map(|s| s.parse()).transpose()?.unwrap_or(40);

    let config = ViewerConfig::from_env()?;
    let mut backend = Snapshot {
        renderer: LineRenderer::new(columns, rows),
        sx: columns as f64 / config.width as f64,
        sy: rows as f64 / config.height as f64,
    };

    let mut viewer = FrameLoop::new(Scene::default_scene(), config);
    let stats = viewer.render_scene(&mut backend)?;

    print!("{}", backend.renderer.to_text());
    println!(
        "{} edges drawn, {} culled",
        stats.edges_drawn, stats.edges_culled
    );
    Ok(())
}
