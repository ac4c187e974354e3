//! Path flattening and stroke outlining.
//!
//! Curves and arcs are turned into polylines in device pixels before they
//! reach the scanline filler. Strokes become a set of polygons (one quad per
//! segment plus round joins) that are filled together with the nonzero rule,
//! so overlapping pieces of a translucent stroke only blend once.

use crate::geometry::{CubicSegment, Point};
use std::f64::consts::TAU;

/// Maximum distance between a flattened arc chord and the true circle.
const ARC_TOLERANCE: f64 = 0.25;

/// Vertices used to approximate a round join.
const JOIN_SEGMENTS: usize = 12;

/// Flatten a cubic Bézier into points, excluding the start anchor.
///
/// The segment count grows with the control polygon length so long curves
/// stay smooth; the final point is always exactly `segment.to`.
#[must_use]
pub fn flatten_cubic(segment: &CubicSegment) -> Vec<Point> {
    let steps = ((segment.hull_length() / 4.0).ceil() as usize).clamp(8, 256);
    let mut points: Vec<Point> = (1..steps)
        .map(|i| segment.point_at(i as f64 / steps as f64))
        .collect();
    points.push(segment.to);
    points
}

/// Signed sweep of a canvas-style arc from `start` to `end`.
///
/// Clockwise (`anticlockwise == false`) sweeps are non-negative, anticlockwise
/// sweeps non-positive, and both are capped at one full turn.
#[must_use]
pub fn arc_sweep(start: f64, end: f64, anticlockwise: bool) -> f64 {
    let delta = end - start;
    if anticlockwise {
        if -delta >= TAU {
            -TAU
        } else {
            -(-delta).rem_euclid(TAU)
        }
    } else if delta >= TAU {
        TAU
    } else {
        delta.rem_euclid(TAU)
    }
}

/// Flatten an arc into points, including both endpoints.
#[must_use]
pub fn flatten_arc(center: Point, radius: f64, start: f64, end: f64, anticlockwise: bool) -> Vec<Point> {
    let sweep = arc_sweep(start, end, anticlockwise);
    let at = |angle: f64| Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin());

    if radius <= 0.0 || sweep == 0.0 {
        return vec![at(start)];
    }

    let max_step = if radius > ARC_TOLERANCE {
        2.0 * (1.0 - ARC_TOLERANCE / radius).acos()
    } else {
        TAU / 4.0
    };
    let steps = ((sweep.abs() / max_step).ceil() as usize).clamp(1, 1024);

    (0..=steps)
        .map(|i| at(start + sweep * i as f64 / steps as f64))
        .collect()
}

/// Twice the signed area of a closed polygon (positive = clockwise on screen).
fn signed_area2(points: &[Point]) -> f64 {
    let n = points.len();
    (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum()
}

/// Push `polygon` with a consistent orientation so nonzero winding unions it.
fn push_oriented(out: &mut Vec<Vec<Point>>, mut polygon: Vec<Point>) {
    if signed_area2(&polygon) < 0.0 {
        polygon.reverse();
    }
    out.push(polygon);
}

/// Build the polygons covering a stroked polyline.
///
/// Segment ends are butt caps; interior vertices (and every vertex of a closed
/// polyline) get round joins.
#[must_use]
pub fn stroke_outline(points: &[Point], width: f64, closed: bool) -> Vec<Vec<Point>> {
    let half = width / 2.0;
    let mut polygons = Vec::new();
    if half <= 0.0 || points.len() < 2 {
        return polygons;
    }

    let n = points.len();
    let segment_count = if closed { n } else { n - 1 };

    for i in 0..segment_count {
        let a = points[i];
        let b = points[(i + 1) % n];
        let len = a.distance(b);
        if len <= f64::EPSILON {
            continue;
        }
        let nx = -(b.y - a.y) / len * half;
        let ny = (b.x - a.x) / len * half;
        push_oriented(
            &mut polygons,
            vec![
                Point::new(a.x + nx, a.y + ny),
                Point::new(b.x + nx, b.y + ny),
                Point::new(b.x - nx, b.y - ny),
                Point::new(a.x - nx, a.y - ny),
            ],
        );
    }

    let joins = if closed { 0..n } else { 1..n - 1 };
    for i in joins {
        let c = points[i];
        let join: Vec<Point> = (0..JOIN_SEGMENTS)
            .map(|k| {
                let angle = TAU * k as f64 / JOIN_SEGMENTS as f64;
                Point::new(c.x + half * angle.cos(), c.y + half * angle.sin())
            })
            .collect();
        push_oriented(&mut polygons, join);
    }

    polygons
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_flatten_cubic_ends_on_anchor() {
        let segment = CubicSegment {
            from: Point::new(0.0, 0.0),
            ctrl1: Point::new(50.0, 0.0),
            ctrl2: Point::new(50.0, 100.0),
            to: Point::new(100.0, 100.0),
        };
        let points = flatten_cubic(&segment);

        assert!(points.len() >= 8);
        assert_eq!(*points.last().unwrap(), segment.to);
    }

    #[test]
    fn test_arc_sweep_clockwise() {
        assert_relative_eq!(arc_sweep(-FRAC_PI_2, FRAC_PI_2, false), PI);
        assert_relative_eq!(arc_sweep(0.0, TAU, false), TAU);
        assert_relative_eq!(arc_sweep(0.0, 3.0 * TAU, false), TAU);
        assert_relative_eq!(arc_sweep(1.0, 1.0, false), 0.0);
        // Wraps forward when end precedes start
        assert_relative_eq!(arc_sweep(PI, FRAC_PI_2, false), 1.5 * PI);
    }

    #[test]
    fn test_arc_sweep_anticlockwise() {
        assert_relative_eq!(arc_sweep(FRAC_PI_2, -FRAC_PI_2, true), -PI);
        assert_relative_eq!(arc_sweep(TAU, 0.0, true), -TAU);
        assert_relative_eq!(arc_sweep(0.0, FRAC_PI_2, true), -1.5 * PI);
        assert_relative_eq!(arc_sweep(1.0, 1.0, true), 0.0);
    }

    #[test]
    fn test_flatten_arc_endpoints_on_circle() {
        let center = Point::new(50.0, 50.0);
        let points = flatten_arc(center, 40.0, -FRAC_PI_2, FRAC_PI_2, false);

        let first = points[0];
        let last = *points.last().unwrap();
        assert_relative_eq!(first.x, 50.0, epsilon = 1e-9);
        assert_relative_eq!(first.y, 10.0, epsilon = 1e-9);
        assert_relative_eq!(last.y, 90.0, epsilon = 1e-9);
        for p in &points {
            assert_relative_eq!(p.distance(center), 40.0, epsilon = 1e-9);
            // Clockwise from the top passes through the right half
            assert!(p.x >= 50.0 - 1e-9);
        }
    }

    #[test]
    fn test_flatten_arc_zero_radius() {
        let points = flatten_arc(Point::new(1.0, 2.0), 0.0, 0.0, TAU, false);
        assert_eq!(points, vec![Point::new(1.0, 2.0)]);
    }

    #[test]
    fn test_stroke_outline_orientation() {
        let polygons = stroke_outline(
            &[Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)],
            2.0,
            false,
        );
        // Two segment quads and one interior join
        assert_eq!(polygons.len(), 3);
        for polygon in &polygons {
            assert!(signed_area2(polygon) >= 0.0);
        }
    }

    #[test]
    fn test_stroke_outline_degenerate() {
        assert!(stroke_outline(&[Point::new(0.0, 0.0)], 2.0, false).is_empty());
        assert!(stroke_outline(&[Point::ORIGIN, Point::new(1.0, 1.0)], 0.0, false).is_empty());
    }
}
