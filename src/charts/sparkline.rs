//! Sparkline: a bare trend stroke with no axes or labels.

use super::trace_line;
use crate::color::Rgba;
use crate::config::RenderConfig;
use crate::geometry::{Padding, Point};
use crate::scale::ScaleMapping;
use crate::surface::{prepare_surface, Surface};
use tracing::{debug, trace};

/// Top and bottom inset so the stroke is not clipped at the extremes.
const INSET: Padding = Padding::new(0.0, 0.0, 2.0, 2.0);

const STROKE_WIDTH: f64 = 1.5;

/// Draw `series` as a single straight-segment stroke filling the surface
/// width. `height` defaults to 40 logical pixels.
///
/// Fewer than two points leaves the surface blank.
pub fn render_sparkline(surface: &mut dyn Surface, series: &[f64], color: Rgba, height: Option<f64>) {
    let mut config = RenderConfig::sparkline().color(color);
    if let Some(height) = height {
        config = config.height(height);
    }

    let Some(viewport) = prepare_surface(surface, &config) else {
        debug!(height = config.height, "sparkline skipped: empty viewport");
        return;
    };
    if series.len() < 2 {
        debug!(len = series.len(), "sparkline skipped: fewer than two points");
        return;
    }

    let mapping = ScaleMapping::from_series(series, &viewport, INSET);
    let points: Vec<Point> = series
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_finite())
        .map(|(i, &v)| Point::new(mapping.pixel_x(i), mapping.pixel_y(v)))
        .collect();

    surface.begin_path();
    trace_line(surface, &points, false);
    surface.stroke(config.color, STROKE_WIDTH);

    trace!(points = points.len(), width = viewport.width, "sparkline rendered");
}
