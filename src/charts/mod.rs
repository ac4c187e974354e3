//! Chart renderers.
//!
//! Each renderer is a plain function over `&mut dyn Surface`: it prepares the
//! surface, derives a [`ScaleMapping`](crate::scale::ScaleMapping) from the
//! data, issues paint calls and returns. Nothing is cached between calls, so
//! re-invoking a renderer with new data is a full redraw.
//!
//! Insufficient data (fewer than two points for line charts, no bars, no
//! donut total) is not an error; the surface is left prepared and blank.

mod area;
mod bar;
mod donut;
mod sparkline;

pub use area::{render_area_chart, AREA_PADDING};
pub use bar::{render_bar_chart, BAR_PADDING};
pub use donut::{donut_sweeps, render_donut_chart, Segment, Sweep};
pub use sparkline::render_sparkline;

use crate::color::Rgba;
use crate::config::RenderConfig;
use crate::geometry::{smooth_curve, Point};
use crate::surface::Surface;

/// Gap between the plot area and axis label anchors.
pub(crate) const LABEL_GAP: f64 = 8.0;

/// Append a polyline through `points` to the current path, as midpoint-control
/// Béziers when `smooth` is set.
pub(crate) fn trace_line(surface: &mut dyn Surface, points: &[Point], smooth: bool) {
    let Some(first) = points.first() else {
        return;
    };
    surface.move_to(first.x, first.y);

    if smooth {
        for seg in smooth_curve(points) {
            surface.bezier_to(seg.ctrl1.x, seg.ctrl1.y, seg.ctrl2.x, seg.ctrl2.y, seg.to.x, seg.to.y);
        }
    } else {
        for p in &points[1..] {
            surface.line_to(p.x, p.y);
        }
    }
}

/// A chart description that can be rendered again whenever its data changes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "camelCase"))]
pub enum Chart {
    /// Axis-less trend line.
    Sparkline {
        /// Values in x order.
        series: Vec<f64>,
        /// Stroke color.
        color: Rgba,
        /// Logical height; defaults to 40.
        #[cfg_attr(feature = "serde", serde(default))]
        height: Option<f64>,
    },
    /// Signed bars around a shared zero line.
    Bar {
        /// Values in x order.
        series: Vec<f64>,
        /// X labels aligned with `series`.
        #[cfg_attr(feature = "serde", serde(default))]
        labels: Vec<String>,
        /// Render options.
        #[cfg_attr(feature = "serde", serde(default = "RenderConfig::bar"))]
        config: RenderConfig,
    },
    /// Smoothed line with gradient fill and gridlines.
    Area {
        /// Values in x order.
        series: Vec<f64>,
        /// X labels aligned with `series`.
        #[cfg_attr(feature = "serde", serde(default))]
        labels: Vec<String>,
        /// Render options.
        #[cfg_attr(feature = "serde", serde(default = "RenderConfig::area"))]
        config: RenderConfig,
    },
    /// Ring partitioned by segment value.
    Donut {
        /// Segments in draw order.
        segments: Vec<Segment>,
        /// Logical height; defaults to 180.
        #[cfg_attr(feature = "serde", serde(default))]
        height: Option<f64>,
    },
}

impl Chart {
    /// Redraw the chart onto `surface`.
    pub fn render(&self, surface: &mut dyn Surface) {
        match self {
            Self::Sparkline { series, color, height } => render_sparkline(surface, series, *color, *height),
            Self::Bar { series, labels, config } => render_bar_chart(surface, series, labels, config),
            Self::Area { series, labels, config } => render_area_chart(surface, series, labels, config),
            Self::Donut { segments, height } => render_donut_chart(surface, segments, *height),
        }
    }

    /// Short name of the chart kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Sparkline { .. } => "sparkline",
            Self::Bar { .. } => "bar",
            Self::Area { .. } => "area",
            Self::Donut { .. } => "donut",
        }
    }
}
