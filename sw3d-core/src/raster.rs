/// Pixel-level rasterization: incremental line drawing and scanline fill
use serde::{Deserialize, Serialize};

use crate::geometry::Mesh;

/// Drawing color roles used by the rasterizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Plain baseline segments.
    Red,
    /// Scanline fill pixels.
    Green,
    /// Rasterized edge pixels.
    Blue,
}

/// Rasterization algorithm selection, cycled by the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawMode {
    /// Directed segments through the surface's own line primitive.
    #[default]
    Plain,
    /// Incremental line algorithm for the triangle edges.
    Bresenham,
    /// Incremental edges plus boundary-driven fill.
    Scanline,
}

impl DrawMode {
    /// Next mode in the Plain -> Bresenham -> Scanline cycle.
    pub fn next(self) -> Self {
        match self {
            DrawMode::Plain => DrawMode::Bresenham,
            DrawMode::Bresenham => DrawMode::Scanline,
            DrawMode::Scanline => DrawMode::Plain,
        }
    }
}

/// Output sink for rasterized pixels
///
/// The core only calls this; the display surface lifecycle belongs to
/// the front-end.
pub trait PixelSurface {
    fn draw_point(&mut self, x: i32, y: i32, color: Color);
    /// Draw a directed segment between two pixel coordinates with the
    /// surface's own primitive. Used by the plain baseline mode only.
    fn draw_line(&mut self, p0: (i32, i32), p1: (i32, i32), color: Color);
}

/// Mapping from normalized [-1, 1] coordinates to pixel coordinates
///
/// Same screen mapping as the projection front-ends use: x stretched
/// over the width, y flipped so that positive y points up.
#[derive(Debug, Clone, Copy)]
pub struct PixelMap {
    width: u32,
    height: u32,
}

impl PixelMap {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn to_pixel(&self, x: f32, y: f32) -> (i32, i32) {
        let px = (x + 1.0) * 0.5 * self.width as f32;
        let py = (1.0 - (y + 1.0) * 0.5) * self.height as f32;
        (px as i32, py as i32)
    }
}

/// Rasterize a line between two pixel coordinates with the incremental
/// (Bresenham) algorithm.
///
/// Steps with integer error accumulation and returns every pixel
/// touched, start and end included. The result is an 8-connected path
/// with no gaps.
pub fn raster_line(p0: (i32, i32), p1: (i32, i32)) -> Vec<(i32, i32)> {
    let (mut x0, mut y0) = p0;
    let (x1, y1) = p1;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut pixels = Vec::new();
    loop {
        pixels.push((x0, y0));
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 > dy {
            err += dy;
            x0 += sx;
        }
        if e2 < dx {
            err += dx;
            y0 += sy;
        }
    }
    pixels
}

/// Fill the interior rows of a pixel boundary.
///
/// Boundary pixels are grouped by their y coordinate; every row holding
/// at least two of them gets all x values strictly between the row's
/// minimum and maximum that are not boundary pixels themselves. Rows
/// touched by a single boundary pixel stay unfilled, which can leave
/// thin gaps near triangle apexes; that behavior is kept as is.
pub fn scanline_fill(boundary: &[(i32, i32)]) -> Vec<(i32, i32)> {
    if boundary.is_empty() {
        return Vec::new();
    }

    let mut sorted = boundary.to_vec();
    sorted.sort_by_key(|p| p.1);

    let mut filled = Vec::new();
    let mut i = 0;
    while i < sorted.len() {
        let y = sorted[i].1;
        let row: Vec<i32> = sorted
            .iter()
            .filter(|p| p.1 == y)
            .map(|p| p.0)
            .collect();
        if row.len() >= 2 {
            let mut min_x = row[0];
            let mut max_x = row[0];
            for &x in &row {
                min_x = min_x.min(x);
                max_x = max_x.max(x);
            }
            for x in min_x..max_x {
                if !row.contains(&x) {
                    filled.push((x, y));
                }
            }
        }
        i += row.len();
    }
    filled
}

/// Draw a projected mesh onto a pixel surface with the selected mode.
///
/// Triangle vertices are taken as normalized 2D coordinates and mapped
/// to pixels; each triangle contributes its three edges and, in
/// scanline mode, its boundary-driven fill.
pub fn draw_mesh<S: PixelSurface>(surface: &mut S, mesh: &Mesh, mode: DrawMode, map: &PixelMap) {
    for t in mesh.triangles() {
        let a = mesh.vertex(t.a).position;
        let b = mesh.vertex(t.b).position;
        let c = mesh.vertex(t.c).position;
        let pa = map.to_pixel(a.x, a.y);
        let pb = map.to_pixel(b.x, b.y);
        let pc = map.to_pixel(c.x, c.y);
        let edges = [(pa, pb), (pb, pc), (pc, pa)];

        match mode {
            DrawMode::Plain => {
                for (p, q) in edges {
                    surface.draw_line(p, q, Color::Red);
                }
            }
            DrawMode::Bresenham => {
                for (p, q) in edges {
                    for (x, y) in raster_line(p, q) {
                        surface.draw_point(x, y, Color::Blue);
                    }
                }
            }
            DrawMode::Scanline => {
                let mut boundary = Vec::new();
                for (p, q) in edges {
                    let pixels = raster_line(p, q);
                    for &(x, y) in &pixels {
                        surface.draw_point(x, y, Color::Blue);
                    }
                    boundary.extend(pixels);
                }
                for (x, y) in scanline_fill(&boundary) {
                    surface.draw_point(x, y, Color::Green);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn pixel_set(pixels: &[(i32, i32)]) -> HashSet<(i32, i32)> {
        pixels.iter().copied().collect()
    }

    #[test]
    fn test_raster_line_horizontal_exact() {
        let pixels = raster_line((0, 0), (5, 0));
        assert_eq!(pixels, vec![(0, 0), (1, 0), (2, 0), (3, 0), (4, 0), (5, 0)]);
    }

    #[test]
    fn test_raster_line_vertical_exact() {
        let pixels = raster_line((0, 0), (0, 5));
        assert_eq!(pixels, vec![(0, 0), (0, 1), (0, 2), (0, 3), (0, 4), (0, 5)]);
    }

    #[test]
    fn test_raster_line_single_pixel() {
        assert_eq!(raster_line((3, 7), (3, 7)), vec![(3, 7)]);
    }

    #[test]
    fn test_raster_line_direction_symmetric() {
        // Odd deltas on both axes, so the error term never ties against
        // dx or dy and both directions make the same step choices.
        let cases = [
            ((0, 0), (5, 3)),
            ((1, 1), (6, 4)),
            ((0, 0), (7, 7)),
            ((-3, -2), (2, 1)),
        ];
        for (p0, p1) in cases {
            let forward = pixel_set(&raster_line(p0, p1));
            let backward = pixel_set(&raster_line(p1, p0));
            assert_eq!(forward, backward, "pixel sets differ for {:?}->{:?}", p0, p1);
        }
    }

    #[test]
    fn test_raster_line_is_connected() {
        let pixels = raster_line((0, 0), (9, 4));
        for pair in pixels.windows(2) {
            let dx = (pair[1].0 - pair[0].0).abs();
            let dy = (pair[1].1 - pair[0].1).abs();
            assert!(dx <= 1 && dy <= 1);
            assert!(dx + dy > 0);
        }
        assert_eq!(pixels[0], (0, 0));
        assert_eq!(*pixels.last().unwrap(), (9, 4));
    }

    #[test]
    fn test_scanline_fill_triangle() {
        // Triangle (0,0) (4,0) (2,4): the base row is fully covered by
        // boundary pixels and the apex rows narrow to nothing.
        let mut boundary = raster_line((0, 0), (4, 0));
        boundary.extend(raster_line((4, 0), (2, 4)));
        boundary.extend(raster_line((2, 4), (0, 0)));

        let filled = pixel_set(&scanline_fill(&boundary));
        let expected = pixel_set(&[(2, 1), (3, 1), (2, 2)]);
        assert_eq!(filled, expected);
    }

    #[test]
    fn test_scanline_fill_skips_single_pixel_rows() {
        // One boundary pixel on its own row must not trigger a fill.
        let boundary = [(0, 0), (4, 0), (2, 1)];
        let filled = scanline_fill(&boundary);
        assert_eq!(pixel_set(&filled), pixel_set(&[(1, 0), (2, 0), (3, 0)]));
    }

    #[test]
    fn test_scanline_fill_empty_boundary() {
        assert!(scanline_fill(&[]).is_empty());
    }

    #[test]
    fn test_draw_mode_cycle() {
        let mut mode = DrawMode::Plain;
        mode = mode.next();
        assert_eq!(mode, DrawMode::Bresenham);
        mode = mode.next();
        assert_eq!(mode, DrawMode::Scanline);
        mode = mode.next();
        assert_eq!(mode, DrawMode::Plain);
    }

    #[test]
    fn test_pixel_map_corners() {
        let map = PixelMap::new(100, 50);
        assert_eq!(map.to_pixel(-1.0, 1.0), (0, 0));
        assert_eq!(map.to_pixel(0.0, 0.0), (50, 25));
        assert_eq!(map.to_pixel(1.0, -1.0), (100, 50));
    }

    struct Recorder {
        points: Vec<(i32, i32, Color)>,
        lines: Vec<((i32, i32), (i32, i32), Color)>,
    }

    impl Recorder {
        fn new() -> Self {
            Self {
                points: Vec::new(),
                lines: Vec::new(),
            }
        }
    }

    impl PixelSurface for Recorder {
        fn draw_point(&mut self, x: i32, y: i32, color: Color) {
            self.points.push((x, y, color));
        }

        fn draw_line(&mut self, p0: (i32, i32), p1: (i32, i32), color: Color) {
            self.lines.push((p0, p1, color));
        }
    }

    fn unit_triangle() -> Mesh {
        use crate::geometry::Vertex;
        let mut mesh = Mesh::new();
        let a = mesh.add_vertex(Vertex::new(-0.5, -0.5, 0.0));
        let b = mesh.add_vertex(Vertex::new(0.5, -0.5, 0.0));
        let c = mesh.add_vertex(Vertex::new(0.0, 0.5, 0.0));
        mesh.add_triangle(a, b, c).unwrap();
        mesh
    }

    #[test]
    fn test_draw_mesh_plain_uses_surface_lines() {
        let mut surface = Recorder::new();
        draw_mesh(
            &mut surface,
            &unit_triangle(),
            DrawMode::Plain,
            &PixelMap::new(20, 20),
        );
        assert_eq!(surface.lines.len(), 3);
        assert!(surface.points.is_empty());
        assert!(surface.lines.iter().all(|l| l.2 == Color::Red));
    }

    #[test]
    fn test_draw_mesh_scanline_adds_fill() {
        let mut surface = Recorder::new();
        draw_mesh(
            &mut surface,
            &unit_triangle(),
            DrawMode::Scanline,
            &PixelMap::new(20, 20),
        );
        assert!(surface.lines.is_empty());
        assert!(surface.points.iter().any(|p| p.2 == Color::Blue));
        assert!(surface.points.iter().any(|p| p.2 == Color::Green));
    }
}
