// src/rasterizer/curves.rs

//! Outline segments in pixel units and their scanline crossings.

pub type Point = [f32; 2];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    pub p0: Point,
    pub p1: Point,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quadratic {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
}

impl Quadratic {
    fn eval(&self, t: f32) -> Point {
        let mt = 1.0 - t;
        [
            mt * mt * self.p0[0] + 2.0 * mt * t * self.p1[0] + t * t * self.p2[0],
            mt * mt * self.p0[1] + 2.0 * mt * t * self.p1[1] + t * t * self.p2[1],
        ]
    }

    /// De Casteljau split at `t`. Both halves share the exact split point.
    fn split(&self, t: f32) -> (Quadratic, Quadratic) {
        let lerp = |a: Point, b: Point| [a[0] + (b[0] - a[0]) * t, a[1] + (b[1] - a[1]) * t];
        let p01 = lerp(self.p0, self.p1);
        let p12 = lerp(self.p1, self.p2);
        let mid = lerp(p01, p12);
        (
            Quadratic { p0: self.p0, p1: p01, p2: mid },
            Quadratic { p0: mid, p1: p12, p2: self.p2 },
        )
    }

    /// Splits at the y extremum so every piece is monotonic in y.
    fn y_monotonic(&self) -> ([Quadratic; 2], usize) {
        let denom = self.p0[1] - 2.0 * self.p1[1] + self.p2[1];
        if denom != 0.0 {
            let t = (self.p0[1] - self.p1[1]) / denom;
            if t > 0.0 && t < 1.0 {
                let (a, b) = self.split(t);
                return ([a, b], 2);
            }
        }
        ([*self, *self], 1)
    }

    /// Crossing of a y-monotonic piece, using the same `[y_min, y_max)` rule
    /// as lines so shared endpoints are counted once.
    fn monotonic_crossing(&self, y: f32) -> Option<Crossing> {
        let (y0, y2) = (self.p0[1], self.p2[1]);
        if !((y0 <= y && y < y2) || (y2 <= y && y < y0)) {
            return None;
        }
        let a = y0 - 2.0 * self.p1[1] + y2;
        let b = 2.0 * (self.p1[1] - y0);
        let c = y0 - y;
        let t = if a.abs() < 1e-6 {
            -c / b
        } else {
            let sqrt_disc = (b * b - 4.0 * a * c).max(0.0).sqrt();
            let t1 = (-b - sqrt_disc) / (2.0 * a);
            let t2 = (-b + sqrt_disc) / (2.0 * a);
            // Exactly one root lies on the piece; rounding may push it just outside.
            let distance = |t: f32| (t.clamp(0.0, 1.0) - t).abs();
            if distance(t1) <= distance(t2) {
                t1
            } else {
                t2
            }
        };
        let t = if t.is_finite() {
            t.clamp(0.0, 1.0)
        } else {
            (y - y0) / (y2 - y0)
        };
        Some(Crossing {
            x: self.eval(t)[0],
            winding: if y2 > y0 { 1 } else { -1 },
        })
    }
}

/// A crossing of a horizontal scanline with an outline segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Crossing {
    pub x: f32,
    /// +1 where the outline goes up through the scanline, -1 where it goes down.
    pub winding: i32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Segment {
    Line(Line),
    Quad(Quadratic),
}

impl Segment {
    /// Pushes every crossing of this segment with the horizontal line at `y`.
    ///
    /// Intervals are half-open in y (`[y_min, y_max)`) so a scanline passing
    /// exactly through a shared vertex is counted once.
    pub fn crossings(&self, y: f32, out: &mut Vec<Crossing>) {
        match self {
            Segment::Line(l) => {
                if (l.p0[1] <= y && y < l.p1[1]) || (l.p1[1] <= y && y < l.p0[1]) {
                    let t = (y - l.p0[1]) / (l.p1[1] - l.p0[1]);
                    out.push(Crossing {
                        x: l.p0[0] + t * (l.p1[0] - l.p0[0]),
                        winding: if l.p0[1] < l.p1[1] { 1 } else { -1 },
                    });
                }
            }
            Segment::Quad(q) => {
                let (pieces, count) = q.y_monotonic();
                out.extend(pieces[..count].iter().filter_map(|p| p.monotonic_crossing(y)));
            }
        }
    }

    /// Axis-aligned bounds `(x_min, y_min, x_max, y_max)`.
    ///
    /// Uses the control polygon for quadratics, which always encloses the curve.
    pub fn bounds(&self) -> (f32, f32, f32, f32) {
        let points: &[Point] = match self {
            Segment::Line(l) => &[l.p0, l.p1],
            Segment::Quad(q) => &[q.p0, q.p1, q.p2],
        };
        points.iter().fold(
            (f32::INFINITY, f32::INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
            |(x0, y0, x1, y1), p| (x0.min(p[0]), y0.min(p[1]), x1.max(p[0]), y1.max(p[1])),
        )
    }
}
