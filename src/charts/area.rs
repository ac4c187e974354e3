//! Area chart: a smoothed line over a fading gradient fill, with labeled
//! horizontal gridlines and thinned x labels.

use super::{trace_line, LABEL_GAP};
use crate::color::palette;
use crate::config::RenderConfig;
use crate::format::axis_label;
use crate::geometry::{Padding, Point};
use crate::scale::{extent, ScaleMapping};
use crate::surface::{prepare_surface, Paint, Surface, TextAlign, TextBaseline, TextStyle};
use std::f64::consts::TAU;
use tracing::{debug, trace};

/// Room for y labels on the left and x labels at the bottom.
pub const AREA_PADDING: Padding = Padding::new(52.0, 12.0, 12.0, 28.0);

/// Horizontal gridline intervals (five lines).
const GRID_STEPS: usize = 4;

/// Target maximum number of x labels before thinning kicks in.
const MAX_X_LABELS: usize = 8;

/// Headroom applied to the data extent.
const FLOOR_FACTOR: f64 = 0.98;
const CEILING_FACTOR: f64 = 1.02;

const LINE_WIDTH: f64 = 2.0;
const GRID_WIDTH: f64 = 1.0;
const MARKER_RADIUS: f64 = 3.0;
const FILL_OPACITY: f64 = 0.3;

/// Draw `series` as a filled line chart.
///
/// The domain is `[min * 0.98, max * 1.02]`; a flat series is still drawn,
/// as a line at mid-height. Fewer than two points leaves the surface blank.
pub fn render_area_chart<S: AsRef<str>>(
    surface: &mut dyn Surface,
    series: &[f64],
    labels: &[S],
    config: &RenderConfig,
) {
    let Some(viewport) = prepare_surface(surface, config) else {
        debug!(height = config.height, "area chart skipped: empty viewport");
        return;
    };
    if series.len() < 2 {
        debug!(len = series.len(), "area chart skipped: fewer than two points");
        return;
    }
    let Some((lo, hi)) = extent(series) else {
        debug!(len = series.len(), "area chart skipped: no finite values");
        return;
    };

    let mapping = ScaleMapping::with_domain(
        series.len(),
        lo * FLOOR_FACTOR,
        hi * CEILING_FACTOR,
        &viewport,
        AREA_PADDING,
    );
    let plot = mapping.plot();

    // Gridlines first so the fill and line sit on top.
    let y_label = TextStyle::axis(TextAlign::Right, TextBaseline::Middle);
    for i in 0..=GRID_STEPS {
        let y = plot.y + plot.height * i as f64 / GRID_STEPS as f64;
        surface.begin_path();
        surface.move_to(plot.x, y);
        surface.line_to(plot.right(), y);
        surface.stroke(palette::GRID, GRID_WIDTH);

        let value = mapping.max() - mapping.range() / GRID_STEPS as f64 * i as f64;
        surface.fill_text(&axis_label(value, &config.y_prefix), plot.x - LABEL_GAP, y, &y_label);
    }

    let stride = (series.len() / MAX_X_LABELS).max(1);
    let last = series.len() - 1;
    let x_label = TextStyle::axis(TextAlign::Center, TextBaseline::Top);
    for (i, label) in labels.iter().enumerate().take(series.len()) {
        if i % stride == 0 || i == last {
            surface.fill_text(label.as_ref(), mapping.pixel_x(i), plot.bottom() + LABEL_GAP, &x_label);
        }
    }

    let points: Vec<Point> = series
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_finite())
        .map(|(i, &v)| Point::new(mapping.pixel_x(i), mapping.pixel_y(v)))
        .collect();
    let (Some(first), Some(end)) = (points.first().copied(), points.last().copied()) else {
        return;
    };

    surface.begin_path();
    trace_line(surface, &points, config.smoothing);
    surface.line_to(end.x, plot.bottom());
    surface.line_to(first.x, plot.bottom());
    surface.close_path();
    surface.fill(&Paint::vertical_gradient(
        plot.y,
        plot.bottom(),
        config.color.with_opacity(FILL_OPACITY),
        config.color.with_alpha(0),
    ));

    surface.begin_path();
    trace_line(surface, &points, config.smoothing);
    surface.stroke(config.color, LINE_WIDTH);

    if config.show_markers {
        for p in &points {
            surface.begin_path();
            surface.arc(p.x, p.y, MARKER_RADIUS, 0.0, TAU, false);
            surface.close_path();
            surface.fill(&Paint::Solid(config.color));
        }
    }

    trace!(
        points = points.len(),
        min = mapping.min(),
        max = mapping.max(),
        smoothing = config.smoothing,
        "area chart rendered"
    );
}
