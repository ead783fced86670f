/// Character-grid line rasterizer for terminal rendering
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;

/// tan(22.5°): below this slope a line reads as horizontal
const SHALLOW_SLOPE: f64 = 0.414_213_56;

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    glyph: char,
    color: Color,
}

/// Rasterizes 2D line segments into a grid of terminal cells
pub struct LineRenderer {
    width: usize,
    height: usize,
    cells: Vec<Option<Cell>>,
}

impl LineRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Change the grid size; the contents are cleared
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells = vec![None; width * height];
    }

    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Draw a segment given in (fractional) cell coordinates.
    ///
    /// The segment is clipped to the grid first, so arbitrarily long lines
    /// only cost the cells they cover on screen.
    pub fn draw_line(&mut self, from: (f64, f64), to: (f64, f64), color: Color) {
        if self.width == 0 || self.height == 0 {
            return;
        }

        let max = ((self.width - 1) as f64, (self.height - 1) as f64);
        let Some((a, b)) = clip_line(from, to, max) else {
            return;
        };

        let glyph = slope_glyph(to.0 - from.0, to.1 - from.1);
        let cell = Cell { glyph, color };

        // Bresenham over the clipped, in-bounds endpoints
        let (mut x0, mut y0) = (a.0.round() as i64, a.1.round() as i64);
        let (x1, y1) = (b.0.round() as i64, b.1.round() as i64);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x0, y0, cell);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    fn plot(&mut self, x: i64, y: i64, cell: Cell) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        self.cells[y as usize * self.width + x as usize] = Some(cell);
    }

    /// The glyph at a cell, if anything was drawn there
    pub fn glyph_at(&self, x: usize, y: usize) -> Option<char> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells[y * self.width + x].map(|cell| cell.glyph)
    }

    /// Number of cells covered by at least one line
    pub fn lit_cells(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Render the grid as plain text, one line per row
    pub fn to_text(&self) -> String {
        let mut text = String::with_capacity((self.width + 1) * self.height);
        for row in self.cells.chunks(self.width.max(1)) {
            text.extend(row.iter().map(|cell| cell.map_or(' ', |c| c.glyph)));
            text.push('\n');
        }
        text
    }

    /// Queue the whole grid, starting each row with an explicit cursor move
    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current: Option<Color> = None;

        for y in 0..self.height {
            writer.queue(cursor::MoveTo(0, y as u16))?;
            for x in 0..self.width {
                match self.cells[y * self.width + x] {
                    Some(cell) => {
                        if current != Some(cell.color) {
                            writer.queue(SetForegroundColor(cell.color))?;
                            current = Some(cell.color);
                        }
                        writer.queue(Print(cell.glyph))?;
                    }
                    None => {
                        writer.queue(Print(' '))?;
                    }
                }
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Liang–Barsky clip of a segment against `[0, max.0] x [0, max.1]`
fn clip_line(
    from: (f64, f64),
    to: (f64, f64),
    max: (f64, f64),
) -> Option<((f64, f64), (f64, f64))> {
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;

    let edges = [
        (-dx, from.0),
        (dx, max.0 - from.0),
        (-dy, from.1),
        (dy, max.1 - from.1),
    ];

    for (p, q) in edges {
        if p == 0.0 {
            // Parallel to this boundary and outside it
            if q < 0.0 {
                return None;
            }
            continue;
        }

        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    Some((
        (from.0 + t0 * dx, from.1 + t0 * dy),
        (from.0 + t1 * dx, from.1 + t1 * dy),
    ))
}

/// Pick a glyph that follows the direction of the line on screen
fn slope_glyph(dx: f64, dy: f64) -> char {
    let ax = dx.abs();
    let ay = dy.abs() * CELL_ASPECT;

    if ay <= ax * SHALLOW_SLOPE {
        '-'
    } else if ax <= ay * SHALLOW_SLOPE {
        '|'
    } else if (dx > 0.0) == (dy > 0.0) {
        // Screen Y grows downward
        '\\'
    } else {
        '/'
    }
}
