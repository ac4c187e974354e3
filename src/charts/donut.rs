//! Donut chart: a ring split into arcs proportional to segment values.

use crate::color::Rgba;
use crate::config::RenderConfig;
use crate::surface::{prepare_surface, Paint, Surface};
use std::f64::consts::{FRAC_PI_2, TAU};
use tracing::{debug, trace};

/// Gap between the ring and the nearer surface edge.
const MARGIN: f64 = 8.0;

/// Inner radius as a fraction of the outer radius.
const HOLE_RATIO: f64 = 0.7;

/// One donut slice.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    /// Share of the ring; negative and NaN values count as zero.
    pub value: f64,
    /// Fill color.
    pub color: Rgba,
}

impl Segment {
    /// Create a segment.
    #[must_use]
    pub const fn new(value: f64, color: Rgba) -> Self {
        Self { value, color }
    }

    fn weight(&self) -> f64 {
        if self.value > 0.0 {
            self.value
        } else {
            0.0
        }
    }
}

/// Angular span assigned to a segment, in radians clockwise from 3 o'clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sweep {
    /// Start angle.
    pub start: f64,
    /// End angle; equal to `start` for zero-value segments.
    pub end: f64,
    /// Segment color.
    pub color: Rgba,
}

impl Sweep {
    /// Angle covered by the sweep.
    #[must_use]
    pub fn angle(&self) -> f64 {
        self.end - self.start
    }
}

/// Partition the full turn among `segments`, starting at 12 o'clock.
///
/// Sweeps follow input order and are contiguous; the last one ends exactly
/// one turn after the first starts. Returns nothing when the total is zero
/// or not finite.
#[must_use]
pub fn donut_sweeps(segments: &[Segment]) -> Vec<Sweep> {
    let total: f64 = segments.iter().map(Segment::weight).sum();
    if !(total > 0.0 && total.is_finite()) {
        return Vec::new();
    }

    let origin = -FRAC_PI_2;
    let mut cumulative = 0.0;
    segments
        .iter()
        .map(|segment| {
            let start = origin + cumulative / total * TAU;
            cumulative += segment.weight();
            let end = origin + cumulative / total * TAU;
            Sweep { start, end, color: segment.color }
        })
        .collect()
}

/// Draw `segments` as a ring centered on the surface. `height` defaults to
/// 180 logical pixels.
///
/// An empty set, a zero total or a ring with no room leaves the surface
/// blank.
pub fn render_donut_chart(surface: &mut dyn Surface, segments: &[Segment], height: Option<f64>) {
    let mut config = RenderConfig::donut();
    if let Some(height) = height {
        config = config.height(height);
    }

    let Some(viewport) = prepare_surface(surface, &config) else {
        debug!(height = config.height, "donut skipped: empty viewport");
        return;
    };

    let sweeps = donut_sweeps(segments);
    if sweeps.is_empty() {
        debug!(segments = segments.len(), "donut skipped: nothing to partition");
        return;
    }

    let outer = viewport.width.min(viewport.height) / 2.0 - MARGIN;
    if outer <= 0.0 {
        debug!(width = viewport.width, height = viewport.height, "donut skipped: no room for ring");
        return;
    }
    let inner = outer * HOLE_RATIO;
    let center = viewport.bounds().center();

    let mut painted = 0;
    for sweep in sweeps.iter().filter(|s| s.end > s.start) {
        surface.begin_path();
        surface.arc(center.x, center.y, outer, sweep.start, sweep.end, false);
        surface.arc(center.x, center.y, inner, sweep.end, sweep.start, true);
        surface.close_path();
        surface.fill(&Paint::Solid(sweep.color));
        painted += 1;
    }

    trace!(segments = segments.len(), painted, outer, "donut rendered");
}
