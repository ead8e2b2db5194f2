/// Character-buffer pixel surface for terminal rendering
use crossterm::{
    cursor,
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use sw3d_core::raster::{Color, PixelSurface};

const EDGE_GLYPH: char = '#';
const FILL_GLYPH: char = '*';
const PLAIN_GLYPH: char = '+';

fn glyph_for(color: Color) -> char {
    match color {
        Color::Blue => EDGE_GLYPH,
        Color::Green => FILL_GLYPH,
        Color::Red => PLAIN_GLYPH,
    }
}

/// Terminal canvas that collects rasterized pixels as characters
///
/// One cell per pixel; out-of-bounds plots are dropped. The buffer is
/// flushed to the terminal with queued crossterm commands.
pub struct TermCanvas {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl TermCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![' '; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = ' ';
        }
    }

    fn plot(&mut self, x: i32, y: i32, glyph: char) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }
        self.cells[y * self.width + x] = glyph;
    }

    /// Queue the whole buffer to a writer, coloring cells by glyph.
    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            writer.queue(cursor::MoveTo(0, y as u16))?;
            for x in 0..self.width {
                let c = self.cells[y * self.width + x];
                let color = match c {
                    EDGE_GLYPH => TermColor::Blue,
                    FILL_GLYPH => TermColor::Green,
                    PLAIN_GLYPH => TermColor::Red,
                    _ => TermColor::DarkGrey,
                };
                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl PixelSurface for TermCanvas {
    fn draw_point(&mut self, x: i32, y: i32, color: Color) {
        self.plot(x, y, glyph_for(color));
    }

    /// Baseline segment drawing: uniform parameter stepping with no
    /// error accumulation, for comparison against the raster line.
    fn draw_line(&mut self, p0: (i32, i32), p1: (i32, i32), color: Color) {
        let glyph = glyph_for(color);
        let dx = p1.0 - p0.0;
        let dy = p1.1 - p0.1;
        let steps = dx.abs().max(dy.abs());
        if steps == 0 {
            self.plot(p0.0, p0.1, glyph);
            return;
        }
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let x = p0.0 as f32 + dx as f32 * t;
            let y = p0.1 as f32 + dy as f32 * t;
            self.plot(x.round() as i32, y.round() as i32, glyph);
        }
    }
}
