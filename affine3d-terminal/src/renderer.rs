//! ASCII line rasterizer for terminal rendering

use affine3d_core::{Axis, Frame, ScreenPoint, Segment};
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;

/// Terminal cells are about twice as tall as wide, so each row counts as two
/// virtual pixels when projecting.
const ROW_PIXELS: u32 = 2;

const EDGE_COLOR: Color = Color::White;

/// Character-buffer renderer for projected line segments.
pub struct LineRenderer {
    width: usize,
    height: usize,
    char_buffer: Vec<char>,
    color_buffer: Vec<Color>,
}

impl LineRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            char_buffer: vec![' '; size],
            color_buffer: vec![EDGE_COLOR; size],
        }
    }

    /// Viewport size to render the scene at, in virtual pixels.
    pub fn viewport(&self) -> (u32, u32) {
        (self.width as u32, self.height as u32 * ROW_PIXELS)
    }

    pub fn clear(&mut self) {
        self.char_buffer.fill(' ');
        self.color_buffer.fill(EDGE_COLOR);
    }

    pub fn char_at(&self, col: usize, row: usize) -> Option<char> {
        (col < self.width && row < self.height).then(|| self.char_buffer[row * self.width + col])
    }

    pub fn render_frame(&mut self, frame: &Frame) {
        for overlay in &frame.axes {
            let color = axis_color(overlay.axis);
            self.draw_segment(&overlay.segment, color);
            self.draw_label(overlay.segment.to, axis_label(overlay.axis), color);
        }
        for segment in &frame.edges {
            self.draw_segment(segment, EDGE_COLOR);
        }
    }

    /// Clips `segment` to the viewport and rasterizes it with Bresenham's
    /// algorithm.
    pub fn draw_segment(&mut self, segment: &Segment, color: Color) {
        let (vw, vh) = self.viewport();
        if vw == 0 || vh == 0 {
            return;
        }
        let clipped = clip(segment.from, segment.to, f64::from(vw - 1), f64::from(vh - 1));
        let Some((from, to)) = clipped else {
            return;
        };

        let glyph = slope_glyph(to.x - from.x, (to.y - from.y) / f64::from(ROW_PIXELS));

        let (mut x0, mut y0) = (from.x.round() as i64, from.y.round() as i64);
        let (x1, y1) = (to.x.round() as i64, to.y.round() as i64);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x0, y0 / i64::from(ROW_PIXELS), glyph, color);
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

    fn draw_label(&mut self, at: ScreenPoint, label: char, color: Color) {
        if !(at.x.is_finite() && at.y.is_finite()) {
            return;
        }
        let col = at.x.round() as i64 + 1;
        let row = (at.y / f64::from(ROW_PIXELS)).floor() as i64;
        self.plot(col, row, label, color);
    }

    fn plot(&mut self, col: i64, row: i64, c: char, color: Color) {
        if col < 0 || row < 0 || col >= self.width as i64 || row >= self.height as i64 {
            return;
        }
        let idx = row as usize * self.width + col as usize;
        self.char_buffer[idx] = c;
        self.color_buffer[idx] = color;
    }

    /// Writes the buffer starting at terminal row `top`.
    pub fn draw<W: Write>(&self, writer: &mut W, top: u16) -> std::io::Result<()> {
        let mut current = None;
        for y in 0..self.height {
            writer.queue(cursor::MoveTo(0, top + y as u16))?;
            for x in 0..self.width {
                let idx = y * self.width + x;
                let color = self.color_buffer[idx];
                if current != Some(color) {
                    writer.queue(SetForegroundColor(color))?;
                    current = Some(color);
                }
                writer.queue(Print(self.char_buffer[idx]))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

fn axis_color(axis: Axis) -> Color {
    match axis {
        Axis::X => Color::Red,
        Axis::Y => Color::Green,
        Axis::Z => Color::Blue,
    }
}

fn axis_label(axis: Axis) -> char {
    match axis {
        Axis::X => 'X',
        Axis::Y => 'Y',
        Axis::Z => 'Z',
    }
}

/// Picks a line character from the direction in cell units (Y down).
fn slope_glyph(dx: f64, dy: f64) -> char {
    let (ax, ay) = (dx.abs(), dy.abs());
    if ay * 2.0 < ax {
        '-'
    } else if ax * 2.0 < ay {
        '|'
    } else if (dx > 0.0) == (dy > 0.0) {
        '\\'
    } else {
        '/'
    }
}

/// Liang–Barsky clip of a segment to `[0, max_x] × [0, max_y]`. Returns
/// `None` when nothing is visible or an endpoint is not finite.
fn clip(
    from: ScreenPoint,
    to: ScreenPoint,
    max_x: f64,
    max_y: f64,
) -> Option<(ScreenPoint, ScreenPoint)> {
    if ![from.x, from.y, to.x, to.y].iter().all(|v| v.is_finite()) {
        return None;
    }
    let (dx, dy) = (to.x - from.x, to.y - from.y);
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);

    for (p, q) in [
        (-dx, from.x),
        (dx, max_x - from.x),
        (-dy, from.y),
        (dy, max_y - from.y),
    ] {
        if p == 0.0 {
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
        ScreenPoint::new(from.x + t0 * dx, from.y + t0 * dy),
        ScreenPoint::new(from.x + t1 * dx, from.y + t1 * dy),
    ))
}
