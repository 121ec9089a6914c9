// src/rasterizer/outline.rs

//! Collects a font outline into pixel-space segments.

use super::curves::{Line, Point, Quadratic, Segment};
use ttf_parser::OutlineBuilder;

/// Subdivision depth for cubic curves; 2^3 lines per cubic.
const CUBIC_SUBDIVISION_DEPTH: u32 = 3;

/// Receives outline commands in font units and stores scaled segments.
///
/// The y axis keeps the font's orientation (up is positive, the baseline is
/// y = 0). Cubics are flattened into lines, quadratics are kept exact.
pub struct GlyphBuilder {
    segments: Vec<Segment>,
    scale: f32,
    current: Point,
    start: Point,
    open: bool,
}

fn lerp(p0: Point, p1: Point, t: f32) -> Point {
    [p0[0] * (1.0 - t) + p1[0] * t, p0[1] * (1.0 - t) + p1[1] * t]
}

impl GlyphBuilder {
    /// `scale` converts font units to pixels (`size_px / units_per_em`).
    pub fn new(scale: f32) -> Self {
        Self {
            segments: Vec::with_capacity(32),
            scale,
            current: [0.0, 0.0],
            start: [0.0, 0.0],
            open: false,
        }
    }

    pub fn finish(mut self) -> Vec<Segment> {
        self.close_contour();
        self.segments
    }

    fn point(&self, x: f32, y: f32) -> Point {
        [x * self.scale, y * self.scale]
    }

    fn push_line(&mut self, p0: Point, p1: Point) {
        if p0 != p1 {
            self.segments.push(Segment::Line(Line { p0, p1 }));
        }
    }

    fn close_contour(&mut self) {
        if self.open {
            self.push_line(self.current, self.start);
            self.current = self.start;
            self.open = false;
        }
    }

    fn subdivide_cubic(&mut self, p0: Point, p1: Point, p2: Point, p3: Point, depth: u32) {
        if depth >= CUBIC_SUBDIVISION_DEPTH {
            self.push_line(p0, p3);
            return;
        }

        let p01 = lerp(p0, p1, 0.5);
        let p12 = lerp(p1, p2, 0.5);
        let p23 = lerp(p2, p3, 0.5);

        let p012 = lerp(p01, p12, 0.5);
        let p123 = lerp(p12, p23, 0.5);

        let p0123 = lerp(p012, p123, 0.5);

        self.subdivide_cubic(p0, p01, p012, p0123, depth + 1);
        self.subdivide_cubic(p0123, p123, p23, p3, depth + 1);
    }
}

impl OutlineBuilder for GlyphBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        // Contours are closed implicitly if the font omits the close command.
        self.close_contour();
        self.current = self.point(x, y);
        self.start = self.current;
        self.open = true;
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p1 = self.point(x, y);
        self.push_line(self.current, p1);
        self.current = p1;
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let p1 = self.point(x1, y1);
        let p2 = self.point(x, y);
        self.segments.push(Segment::Quad(Quadratic {
            p0: self.current,
            p1,
            p2,
        }));
        self.current = p2;
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let p1 = self.point(x1, y1);
        let p2 = self.point(x2, y2);
        let p3 = self.point(x, y);

        self.subdivide_cubic(self.current, p1, p2, p3, 0);
        self.current = p3;
    }

    fn close(&mut self) {
        self.close_contour();
    }
}
