//! Signed bar chart.
//!
//! Bars grow up from a shared zero line for non-negative values and down
//! for negative ones. When any value is negative the domain is `[-max, max]`
//! so the zero line sits at mid-height; otherwise it is `[0, max]`.

use super::LABEL_GAP;
use crate::config::RenderConfig;
use crate::format::axis_label;
use crate::geometry::{Padding, Rect};
use crate::scale::ScaleMapping;
use crate::surface::{prepare_surface, Paint, Surface, TextAlign, TextBaseline, TextStyle};
use std::f64::consts::{FRAC_PI_2, PI, TAU};
use tracing::{debug, trace};

/// Room for y labels on the left and x labels at the bottom.
pub const BAR_PADDING: Padding = Padding::new(48.0, 8.0, 12.0, 28.0);

/// Fraction of a slot covered by its bar; the rest is split on both sides.
const BAR_FILL: f64 = 0.7;

const CORNER_RADIUS: f64 = 4.0;

/// Draw `series` as bars with per-bar `labels` and three y labels.
///
/// An empty series leaves the surface blank.
pub fn render_bar_chart<S: AsRef<str>>(
    surface: &mut dyn Surface,
    series: &[f64],
    labels: &[S],
    config: &RenderConfig,
) {
    let Some(viewport) = prepare_surface(surface, config) else {
        debug!(height = config.height, "bar chart skipped: empty viewport");
        return;
    };
    if series.is_empty() {
        debug!("bar chart skipped: empty series");
        return;
    }

    let peak = series
        .iter()
        .map(|v| v.abs())
        .filter(|v| v.is_finite())
        .fold(0.0, f64::max);
    let max = if peak > 0.0 { peak } else { 1.0 };
    let has_neg = series.iter().any(|&v| v < 0.0);

    let mapping = ScaleMapping::with_domain(series.len(), if has_neg { -max } else { 0.0 }, max, &viewport, BAR_PADDING);
    let zero_y = mapping.zero_y();
    let span = if has_neg { mapping.chart_height() / 2.0 } else { mapping.chart_height() };
    let slot = mapping.slot_width();
    let bar_width = slot * BAR_FILL;
    let x_label = TextStyle::axis(TextAlign::Center, TextBaseline::Top);

    let mut painted = 0;
    for (i, &value) in series.iter().enumerate() {
        let height = if value.is_finite() { value.abs() / max * span } else { 0.0 };
        if height > 0.0 {
            let x = mapping.slot_x(i) + (slot - bar_width) / 2.0;
            let top = if value >= 0.0 { zero_y - height } else { zero_y };
            let color = if value >= 0.0 { config.pos_color } else { config.neg_color };

            surface.begin_path();
            bar_path(surface, Rect::new(x, top, bar_width, height), value >= 0.0);
            surface.fill(&Paint::Solid(color));
            painted += 1;
        }

        if let Some(label) = labels.get(i) {
            let center = mapping.slot_x(i) + slot / 2.0;
            surface.fill_text(label.as_ref(), center, mapping.plot().bottom() + LABEL_GAP, &x_label);
        }
    }

    let y_label = TextStyle::axis(TextAlign::Right, TextBaseline::Middle);
    let label_x = BAR_PADDING.left - LABEL_GAP;
    surface.fill_text(&axis_label(max, &config.y_prefix), label_x, mapping.plot().y, &y_label);
    surface.fill_text(&axis_label(0.0, &config.y_prefix), label_x, zero_y, &y_label);
    if has_neg {
        surface.fill_text(&axis_label(-max, &config.y_prefix), label_x, mapping.plot().bottom(), &y_label);
    }

    trace!(bars = series.len(), painted, max, has_neg, "bar chart rendered");
}

/// Bar outline with the two corners away from the baseline rounded.
fn bar_path(surface: &mut dyn Surface, rect: Rect, upward: bool) {
    let r = CORNER_RADIUS.min(rect.width / 2.0).min(rect.height).max(0.0);
    let (left, right, top, bottom) = (rect.x, rect.right(), rect.y, rect.bottom());

    if upward {
        surface.move_to(left, bottom);
        surface.arc(left + r, top + r, r, PI, PI + FRAC_PI_2, false);
        surface.arc(right - r, top + r, r, PI + FRAC_PI_2, TAU, false);
        surface.line_to(right, bottom);
    } else {
        surface.move_to(left, top);
        surface.line_to(right, top);
        surface.arc(right - r, bottom - r, r, 0.0, FRAC_PI_2, false);
        surface.arc(left + r, bottom - r, r, FRAC_PI_2, PI, false);
    }
    surface.close_path();
}
