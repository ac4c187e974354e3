//! Scale functions for data-to-pixel mappings.
//!
//! [`LinearScale`] is the general continuous scale; [`ScaleMapping`] bundles
//! one horizontal and one vertical mapping for a chart's plot area and is
//! computed once per render.

use crate::geometry::{Padding, Rect};
use crate::surface::Viewport;

/// Trait for scale functions that map domain values to range values.
pub trait Scale<D, R> {
    /// Transform a domain value to a range value.
    fn scale(&self, value: D) -> R;

    /// Get the domain extent.
    fn domain(&self) -> (D, D);

    /// Get the range extent.
    fn range(&self) -> (R, R);
}

/// Linear scale for continuous-to-continuous mapping.
///
/// A zero-width (or non-finite) domain is never an error: it is widened to a
/// unit interval centered on its value, so a flat series maps to the middle
/// of the range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_min: f64,
    domain_max: f64,
    range_min: f64,
    range_max: f64,
}

impl LinearScale {
    /// Create a new linear scale.
    #[must_use]
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        let (domain_min, domain_max) = coerce_domain(domain.0, domain.1);
        Self {
            domain_min,
            domain_max,
            range_min: range.0,
            range_max: range.1,
        }
    }

    /// Create a scale from the extent of `data`, ignoring non-finite values.
    #[must_use]
    pub fn from_data(data: &[f64], range: (f64, f64)) -> Option<Self> {
        extent(data).map(|(min, max)| Self::new((min, max), range))
    }

    /// Invert the scale (range to domain).
    #[must_use]
    pub fn invert(&self, value: f64) -> f64 {
        let span = self.range_max - self.range_min;
        if span == 0.0 {
            return self.domain_min;
        }
        let t = (value - self.range_min) / span;
        self.domain_min + t * (self.domain_max - self.domain_min)
    }

    /// Width of the (coerced) domain.
    #[must_use]
    pub fn domain_span(&self) -> f64 {
        self.domain_max - self.domain_min
    }
}

impl Scale<f64, f64> for LinearScale {
    fn scale(&self, value: f64) -> f64 {
        let t = (value - self.domain_min) / (self.domain_max - self.domain_min);
        self.range_min + t * (self.range_max - self.range_min)
    }

    fn domain(&self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (f64, f64) {
        (self.range_min, self.range_max)
    }
}

/// Min and max of the finite values in `data`.
#[must_use]
pub fn extent(data: &[f64]) -> Option<(f64, f64)> {
    data.iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((min, max)) => Some((min.min(v), max.max(v))),
        })
}

/// Widen an empty domain to `[v - 0.5, v + 0.5]`.
fn coerce_domain(min: f64, max: f64) -> (f64, f64) {
    if !(min.is_finite() && max.is_finite()) {
        return (0.0, 1.0);
    }
    if max - min == 0.0 {
        (min - 0.5, min + 0.5)
    } else {
        (min, max)
    }
}

/// Domain-to-pixel mapping for one chart render.
///
/// X positions come from the item index, Y positions from the value. The
/// plot area is the viewport minus `padding`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleMapping {
    count: usize,
    plot: Rect,
    y: LinearScale,
}

impl ScaleMapping {
    /// Mapping over the min/max of `series` (non-finite values ignored).
    #[must_use]
    pub fn from_series(series: &[f64], viewport: &Viewport, padding: Padding) -> Self {
        let (min, max) = extent(series).unwrap_or((0.0, 0.0));
        Self::with_domain(series.len(), min, max, viewport, padding)
    }

    /// Mapping over an explicit `[min, max]` domain for `count` items.
    #[must_use]
    pub fn with_domain(count: usize, min: f64, max: f64, viewport: &Viewport, padding: Padding) -> Self {
        let plot = padding.inner(viewport.width, viewport.height);
        let y = LinearScale::new((min, max), (plot.bottom(), plot.y));
        Self { count, plot, y }
    }

    /// Lower end of the (coerced) domain.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.y.domain_min
    }

    /// Upper end of the (coerced) domain.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.y.domain_max
    }

    /// `max - min`; never zero.
    #[must_use]
    pub fn range(&self) -> f64 {
        self.y.domain_span()
    }

    /// The plot area inside the padding.
    #[must_use]
    pub fn plot(&self) -> Rect {
        self.plot
    }

    /// Plot area width.
    #[must_use]
    pub fn chart_width(&self) -> f64 {
        self.plot.width
    }

    /// Plot area height.
    #[must_use]
    pub fn chart_height(&self) -> f64 {
        self.plot.height
    }

    /// X of point `i` for line-style charts: first point on the left edge,
    /// last on the right edge.
    #[must_use]
    pub fn pixel_x(&self, i: usize) -> f64 {
        if self.count < 2 {
            return self.plot.x;
        }
        self.plot.x + i as f64 * self.plot.width / (self.count - 1) as f64
    }

    /// Width of one bar slot.
    #[must_use]
    pub fn slot_width(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.plot.width / self.count as f64
    }

    /// Left edge of bar slot `i`.
    #[must_use]
    pub fn slot_x(&self, i: usize) -> f64 {
        self.plot.x + i as f64 * self.slot_width()
    }

    /// Y of value `v`; larger values are higher up.
    #[must_use]
    pub fn pixel_y(&self, v: f64) -> f64 {
        self.y.scale(v)
    }

    /// Y of the zero baseline, or the bottom edge when zero is outside the
    /// domain.
    #[must_use]
    pub fn zero_y(&self) -> f64 {
        if self.min() <= 0.0 && 0.0 <= self.max() {
            self.pixel_y(0.0)
        } else {
            self.plot.bottom()
        }
    }
}
