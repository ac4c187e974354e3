//! End-to-end chart scenarios on the raster and SVG surfaces.
//!
//! Run: cargo test --test chart_scenarios

#![allow(clippy::unwrap_used)]

use std::f64::consts::PI;

use trueno_dashcharts::prelude::*;
use trueno_dashcharts::surface::DrawCommand;

// ============================================================================
// Bar chart: [10, -5, 0]
// ============================================================================

/// 356 wide leaves a 300px plot, so slots are 100px starting at x = 48.
/// The plot spans y 12..192 and the zero line sits at 102.
#[test]
fn scenario_signed_bars() {
    let mut surface = RasterSurface::new(356.0, 220.0, 1.0).unwrap();
    render_bar_chart(&mut surface, &[10.0, -5.0, 0.0], &["Mon", "Tue", "Wed"], &RenderConfig::bar());
    let fb = surface.framebuffer();

    // first bar: full half height, upward from the zero line
    assert_eq!(fb.get_pixel(98, 20), Some(palette::EMERALD));
    assert_eq!(fb.get_pixel(98, 101), Some(palette::EMERALD));
    assert_eq!(fb.get_pixel(98, 103), Some(Rgba::TRANSPARENT));

    // second bar: half that, downward
    assert_eq!(fb.get_pixel(198, 102), Some(palette::RED));
    assert_eq!(fb.get_pixel(198, 140), Some(palette::RED));
    assert_eq!(fb.get_pixel(198, 100), Some(Rgba::TRANSPARENT));
    assert_eq!(fb.get_pixel(198, 150), Some(Rgba::TRANSPARENT));

    // third bar: nothing painted in its slot
    for y in 12..192 {
        assert_eq!(fb.get_pixel(298, y), Some(Rgba::TRANSPARENT));
    }

    // labels were issued even without a font
    assert_eq!(surface.unrendered_text(), 6);
}

#[test]
fn scenario_signed_bars_labels() {
    let mut surface = RecordingSurface::new(356.0, 220.0);
    render_bar_chart(&mut surface, &[10.0, -5.0, 0.0], &["Mon", "Tue", "Wed"], &RenderConfig::bar());

    let texts = surface.texts();
    assert_eq!(texts[2], ("Wed", Point::new(298.0, 200.0)));
    assert_eq!(texts[3].0, "10");
    assert_eq!(texts[4], ("0", Point::new(40.0, 102.0)));
    assert_eq!(texts[5], ("-10", Point::new(40.0, 192.0)));
}

// ============================================================================
// Area chart: [100, 100, 100, 100]
// ============================================================================

/// Plot spans y 12..232; the flat line lands on 122.
#[test]
fn scenario_flat_area() {
    let mut surface = RasterSurface::new(400.0, 260.0, 1.0).unwrap();
    render_area_chart(&mut surface, &[100.0; 4], &["Q1", "Q2", "Q3", "Q4"], &RenderConfig::area());
    let fb = surface.framebuffer();

    assert_eq!(fb.get_pixel(200, 121), Some(palette::BLUE));
    assert_eq!(fb.get_pixel(200, 122), Some(palette::BLUE));
    assert_eq!(fb.get_pixel(200, 100), Some(Rgba::TRANSPARENT));

    // gradient fill fades out towards the floor
    let near = fb.get_pixel(200, 130).unwrap();
    let far = fb.get_pixel(200, 220).unwrap();
    assert!(near.b > near.r && near.b > near.g);
    assert!(near.a > far.a);
    assert!(near.a <= 77);
}

// ============================================================================
// Donut chart: 50 / 50
// ============================================================================

#[test]
fn scenario_even_donut() {
    let segments = [Segment::new(50.0, palette::BLUE), Segment::new(50.0, palette::EMERALD)];

    let sweeps = donut_sweeps(&segments);
    assert!((sweeps[0].start + PI / 2.0).abs() < 1e-12);
    assert!((sweeps[0].end - PI / 2.0).abs() < 1e-12);
    assert!((sweeps[1].end - 3.0 * PI / 2.0).abs() < 1e-12);

    // center (100, 90), outer radius 82, inner 57.4
    let mut surface = RasterSurface::new(200.0, 180.0, 1.0).unwrap();
    render_donut_chart(&mut surface, &segments, None);
    let fb = surface.framebuffer();

    assert_eq!(fb.get_pixel(170, 90), Some(palette::BLUE));
    assert_eq!(fb.get_pixel(30, 90), Some(palette::EMERALD));
    assert_eq!(fb.get_pixel(100, 90), Some(Rgba::TRANSPARENT));
    assert_eq!(fb.get_pixel(195, 90), Some(Rgba::TRANSPARENT));
}

// ============================================================================
// Sparkline: [5]
// ============================================================================

#[test]
fn scenario_single_point_sparkline() {
    let mut surface = RasterSurface::new(100.0, 40.0, 2.0).unwrap();
    render_sparkline(&mut surface, &[5.0], palette::EMERALD, None);

    let fb = surface.framebuffer();
    assert_eq!((fb.width(), fb.height()), (200, 80));
    assert_eq!(fb.painted_pixel_count(), 0);
}

// ============================================================================
// Cross-backend behavior
// ============================================================================

#[test]
fn redraw_clears_previous_frame() {
    let mut surface = RasterSurface::new(200.0, 60.0, 1.0).unwrap();
    render_sparkline(&mut surface, &[1.0, 5.0, 2.0, 8.0], palette::BLUE, Some(60.0));
    assert!(surface.framebuffer().painted_pixel_count() > 0);

    render_sparkline(&mut surface, &[3.0], palette::BLUE, Some(60.0));
    assert_eq!(surface.framebuffer().painted_pixel_count(), 0);
}

#[test]
fn replay_matches_direct_render() {
    let series = [12.0, 18.0, 9.0, 22.0, 15.0];
    let config = RenderConfig::area().height(120.0).markers(true).device_pixel_ratio(2.0);

    let mut recording = RecordingSurface::new(240.0, 120.0);
    render_area_chart(&mut recording, &series, &[] as &[&str], &config);

    let mut replayed = RasterSurface::new(240.0, 120.0, 2.0).unwrap();
    prepare_surface(&mut replayed, &config);
    recording.replay(&mut replayed);

    let mut direct = RasterSurface::new(240.0, 120.0, 2.0).unwrap();
    render_area_chart(&mut direct, &series, &[] as &[&str], &config);

    assert!(replayed.framebuffer() == direct.framebuffer());
}

#[test]
fn svg_donut_markup() {
    let mut surface = SvgSurface::new(200.0, 180.0).with_device_pixel_ratio(2.0);
    let segments = [Segment::new(1.0, palette::BLUE), Segment::new(3.0, palette::RED)];
    render_donut_chart(&mut surface, &segments, None);

    let svg = surface.render();
    assert!(svg.contains(r#"width="400""#));
    assert!(svg.contains(r#"viewBox="0 0 200 180""#));
    assert_eq!(svg.matches("<path").count(), 2);
    assert!(svg.contains("rgb(59,130,246)"));
    assert!(svg.contains("rgb(239,68,68)"));
}

#[test]
fn svg_area_has_gradient() {
    let mut surface = SvgSurface::new(320.0, 200.0);
    render_area_chart(&mut surface, &[1.0, 4.0, 2.0], &["a", "b", "c"], &RenderConfig::area().height(200.0));

    let svg = surface.render();
    assert!(svg.contains("<linearGradient"));
    assert_eq!(svg.matches("<text").count(), 5 + 3);
}

#[test]
fn png_export_of_rendered_chart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bars.png");

    let mut surface = RasterSurface::new(160.0, 100.0, 1.0).unwrap();
    render_bar_chart(&mut surface, &[3.0, 1.0, 2.0], &[] as &[&str], &RenderConfig::bar().height(100.0));
    PngEncoder::write_to_file(surface.framebuffer(), &path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[1..4], b"PNG");
    assert!(PngEncoder::to_data_uri(surface.framebuffer()).unwrap().len() > 22);
}

#[test]
fn recording_of_blank_render_has_no_paint() {
    let mut surface = RecordingSurface::new(100.0, 100.0);
    render_donut_chart(&mut surface, &[Segment::new(0.0, palette::BLUE)], None);

    assert!(surface.is_blank());
    assert!(matches!(surface.commands().last(), Some(DrawCommand::Clear)));
}
