//! Geometric primitives for chart layout.
//!
//! All coordinates are logical pixels (before device-pixel-ratio scaling),
//! with y growing downward.

/// A 2D point with floating-point coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point {
    /// Origin point (0, 0).
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculate the distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Linear interpolation between two points.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    /// Scale both coordinates by `factor`.
    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

/// A rectangle defined by position and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X coordinate of the top-left corner.
    pub x: f64,
    /// Y coordinate of the top-left corner.
    pub y: f64,
    /// Width of the rectangle.
    pub width: f64,
    /// Height of the rectangle.
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Check if a point is inside the rectangle.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    /// Get the center point of the rectangle.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether the rectangle covers no area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Space reserved around the plot area for axis labels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Padding {
    /// Left inset (y-axis labels).
    pub left: f64,
    /// Right inset.
    pub right: f64,
    /// Top inset.
    pub top: f64,
    /// Bottom inset (x-axis labels).
    pub bottom: f64,
}

impl Padding {
    /// Create padding from explicit insets.
    #[must_use]
    pub const fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self { left, right, top, bottom }
    }

    /// Same inset on every side.
    #[must_use]
    pub const fn uniform(inset: f64) -> Self {
        Self::new(inset, inset, inset, inset)
    }

    /// The plot rectangle left inside a `width` x `height` area.
    ///
    /// Width and height are clamped at zero when padding exceeds the area.
    #[must_use]
    pub fn inner(&self, width: f64, height: f64) -> Rect {
        Rect::new(
            self.left,
            self.top,
            (width - self.left - self.right).max(0.0),
            (height - self.top - self.bottom).max(0.0),
        )
    }
}

/// One cubic Bézier piece of a path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    /// Start anchor.
    pub from: Point,
    /// First control point.
    pub ctrl1: Point,
    /// Second control point.
    pub ctrl2: Point,
    /// End anchor.
    pub to: Point,
}

impl CubicSegment {
    /// Evaluate the curve at parameter `t` in `[0, 1]`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point {
        let u = 1.0 - t;
        let b0 = u * u * u;
        let b1 = 3.0 * u * u * t;
        let b2 = 3.0 * u * t * t;
        let b3 = t * t * t;
        Point::new(
            b0 * self.from.x + b1 * self.ctrl1.x + b2 * self.ctrl2.x + b3 * self.to.x,
            b0 * self.from.y + b1 * self.ctrl1.y + b2 * self.ctrl2.y + b3 * self.to.y,
        )
    }

    /// Length of the control polygon, an upper bound on the arc length.
    #[must_use]
    pub fn hull_length(&self) -> f64 {
        self.from.distance(self.ctrl1) + self.ctrl1.distance(self.ctrl2) + self.ctrl2.distance(self.to)
    }
}

/// Build the smoothed curve through `points`.
///
/// Each segment puts both control points on the vertical midline between its
/// anchors: the first at the start anchor's height, the second at the end
/// anchor's. The curve is horizontal at every data point and passes exactly
/// through each of them. Fewer than two points yield no segments.
#[must_use]
pub fn smooth_curve(points: &[Point]) -> Vec<CubicSegment> {
    points
        .windows(2)
        .map(|pair| {
            let (from, to) = (pair[0], pair[1]);
            let mid_x = (from.x + to.x) / 2.0;
            CubicSegment {
                from,
                ctrl1: Point::new(mid_x, from.y),
                ctrl2: Point::new(mid_x, to.y),
                to,
            }
        })
        .collect()
}
