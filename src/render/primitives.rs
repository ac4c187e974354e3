//! Primitive rasterization functions.
//!
//! Implements the two fill strategies the software surface needs: Wu
//! anti-aliased hairlines and scanline polygon filling with the nonzero
//! winding rule.

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;
use crate::geometry::Point;

/// How a filled region is colored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    /// A single color.
    Solid(Rgba),
    /// Two-stop linear gradient between `from` and `to`.
    ///
    /// Pixels before `from` take `start`, pixels past `to` take `end`.
    LinearGradient {
        /// Gradient start point.
        from: Point,
        /// Gradient end point.
        to: Point,
        /// Color at `from`.
        start: Rgba,
        /// Color at `to`.
        end: Rgba,
    },
}

impl Paint {
    /// Vertical gradient from `top` (color `start`) to `bottom` (color `end`).
    #[must_use]
    pub fn vertical_gradient(top: f64, bottom: f64, start: Rgba, end: Rgba) -> Self {
        Self::LinearGradient {
            from: Point::new(0.0, top),
            to: Point::new(0.0, bottom),
            start,
            end,
        }
    }

    /// The same paint with its geometry multiplied by `factor`.
    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        match self {
            Self::Solid(_) => self,
            Self::LinearGradient { from, to, start, end } => Self::LinearGradient {
                from: from.scaled(factor),
                to: to.scaled(factor),
                start,
                end,
            },
        }
    }

    /// Color at a point.
    #[must_use]
    pub fn color_at(&self, p: Point) -> Rgba {
        match *self {
            Self::Solid(color) => color,
            Self::LinearGradient { from, to, start, end } => {
                let dx = to.x - from.x;
                let dy = to.y - from.y;
                let len2 = dx * dx + dy * dy;
                if len2 <= f64::EPSILON {
                    return end;
                }
                let t = ((p.x - from.x) * dx + (p.y - from.y) * dy) / len2;
                start.lerp(end, t)
            }
        }
    }

    /// Whether the color is constant along each pixel row.
    fn is_row_constant(&self) -> bool {
        match self {
            Self::Solid(_) => true,
            Self::LinearGradient { from, to, .. } => (to.x - from.x).abs() <= f64::EPSILON,
        }
    }
}

// ============================================================================
// Line Drawing
// ============================================================================

/// Draw an anti-aliased hairline using Wu's algorithm.
///
/// # References
///
/// Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.
pub fn draw_line_aa(fb: &mut Framebuffer, x0: f64, y0: f64, x1: f64, y1: f64, color: Rgba) {
    if ![x0, y0, x1, y1].iter().all(|v| v.is_finite()) {
        return;
    }

    let steep = (y1 - y0).abs() > (x1 - x0).abs();
    let (x0, y0, x1, y1) = if steep { (y0, x0, y1, x1) } else { (x0, y0, x1, y1) };
    let (x0, y0, x1, y1) = if x0 > x1 { (x1, y1, x0, y0) } else { (x0, y0, x1, y1) };

    let dx = x1 - x0;
    let dy = y1 - y0;
    let gradient = if dx.abs() < f64::EPSILON { 1.0 } else { dy / dx };

    // Pixel centers sit at +0.5; shift so integer coordinates address them
    let (x0, y0, x1, y1) = (x0 - 0.5, y0 - 0.5, x1 - 0.5, y1 - 0.5);

    let mut put = |major: i64, minor: i64, intensity: f64| {
        let (x, y) = if steep { (minor, major) } else { (major, minor) };
        plot(fb, x, y, color, intensity);
    };

    // First endpoint
    let xend = x0.round();
    let yend = y0 + gradient * (xend - x0);
    let xgap = rfpart(x0 + 0.5);
    let xpxl1 = xend as i64;
    let ypxl1 = yend.floor() as i64;
    put(xpxl1, ypxl1, rfpart(yend) * xgap);
    put(xpxl1, ypxl1 + 1, fpart(yend) * xgap);

    let mut intery = yend + gradient;

    // Second endpoint
    let xend = x1.round();
    let yend = y1 + gradient * (xend - x1);
    let xgap = fpart(x1 + 0.5);
    let xpxl2 = xend as i64;
    let ypxl2 = yend.floor() as i64;
    put(xpxl2, ypxl2, rfpart(yend) * xgap);
    put(xpxl2, ypxl2 + 1, fpart(yend) * xgap);

    for major in (xpxl1 + 1)..xpxl2 {
        let ipart = intery.floor() as i64;
        put(major, ipart, rfpart(intery));
        put(major, ipart + 1, fpart(intery));
        intery += gradient;
    }
}

/// Plot a pixel with intensity (for anti-aliased drawing).
#[inline]
fn plot(fb: &mut Framebuffer, x: i64, y: i64, color: Rgba, intensity: f64) {
    if x >= 0 && y >= 0 && x < i64::from(fb.width()) && y < i64::from(fb.height()) {
        let alpha = (f64::from(color.a) * intensity.clamp(0.0, 1.0)).round() as u8;
        fb.blend_pixel(x as u32, y as u32, color.with_alpha(alpha));
    }
}

/// Fractional part of a float.
#[inline]
fn fpart(x: f64) -> f64 {
    x - x.floor()
}

/// Reverse fractional part.
#[inline]
fn rfpart(x: f64) -> f64 {
    1.0 - fpart(x)
}

// ============================================================================
// Polygon Filling
// ============================================================================

/// A non-horizontal polygon edge with its winding direction.
#[derive(Debug, Clone, Copy)]
struct Edge {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    winding: i32,
}

impl Edge {
    fn new(a: Point, b: Point) -> Option<Self> {
        if a.y == b.y {
            return None;
        }
        let winding = if b.y > a.y { 1 } else { -1 };
        let (top, bottom) = if a.y < b.y { (a, b) } else { (b, a) };
        Some(Self { x0: top.x, y0: top.y, x1: bottom.x, y1: bottom.y, winding })
    }

    fn x_at(&self, y: f64) -> f64 {
        self.x0 + (y - self.y0) * (self.x1 - self.x0) / (self.y1 - self.y0)
    }
}

/// Fill closed polygons with the nonzero winding rule.
///
/// Each polygon is implicitly closed. A pixel is painted when its center lies
/// inside; polygons containing non-finite coordinates are ignored.
pub fn fill_polygons(fb: &mut Framebuffer, polygons: &[Vec<Point>], paint: &Paint) {
    let mut edges = Vec::new();
    for polygon in polygons {
        if polygon.len() < 3 || !polygon.iter().all(|p| p.x.is_finite() && p.y.is_finite()) {
            continue;
        }
        for i in 0..polygon.len() {
            if let Some(edge) = Edge::new(polygon[i], polygon[(i + 1) % polygon.len()]) {
                edges.push(edge);
            }
        }
    }
    if edges.is_empty() {
        return;
    }

    let y_min = edges.iter().map(|e| e.y0).fold(f64::INFINITY, f64::min);
    let y_max = edges.iter().map(|e| e.y1).fold(f64::NEG_INFINITY, f64::max);
    let row_start = (y_min - 0.5).ceil().max(0.0) as u32;
    let row_end = ((y_max - 0.5).ceil().max(0.0) as u32).min(fb.height());

    let mut crossings: Vec<(f64, i32)> = Vec::new();
    for row in row_start..row_end {
        let sample_y = f64::from(row) + 0.5;
        crossings.clear();
        crossings.extend(
            edges
                .iter()
                .filter(|e| e.y0 <= sample_y && sample_y < e.y1)
                .map(|e| (e.x_at(sample_y), e.winding)),
        );
        crossings.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut winding = 0;
        let mut span_start = 0.0;
        for &(x, dir) in &crossings {
            let was_inside = winding != 0;
            winding += dir;
            let is_inside = winding != 0;
            if !was_inside && is_inside {
                span_start = x;
            } else if was_inside && !is_inside {
                paint_span(fb, row, span_start, x, paint);
            }
        }
    }
}

/// Paint the pixels whose centers fall in `[x_start, x_end)` on `row`.
fn paint_span(fb: &mut Framebuffer, row: u32, x_start: f64, x_end: f64, paint: &Paint) {
    let first = (x_start - 0.5).ceil().max(0.0);
    let last = (x_end - 0.5).ceil().min(f64::from(fb.width()));
    if first >= last {
        return;
    }
    let (first, last) = (first as u32, last as u32);
    let center_y = f64::from(row) + 0.5;

    if paint.is_row_constant() {
        let color = paint.color_at(Point::new(0.0, center_y));
        fb.blend_span(row, first, last, color);
    } else {
        for x in first..last {
            let color = paint.color_at(Point::new(f64::from(x) + 0.5, center_y));
            fb.blend_pixel(x, row, color);
        }
    }
}
