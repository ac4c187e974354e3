#![allow(clippy::expect_used, clippy::unwrap_used, missing_docs)]
//! Benchmark for chart rendering and output encoding.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use trueno_dashcharts::charts::{render_area_chart, render_bar_chart, render_donut_chart, render_sparkline, Segment};
use trueno_dashcharts::color::{palette, Rgba};
use trueno_dashcharts::config::RenderConfig;
use trueno_dashcharts::framebuffer::Framebuffer;
use trueno_dashcharts::output::PngEncoder;
use trueno_dashcharts::surface::{RasterSurface, SvgSurface};

fn series(n: usize) -> Vec<f64> {
    (0..n).map(|i| (i as f64 * 0.37).sin() * 100.0 + 20.0).collect()
}

fn area_chart_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("area_chart");

    for n in [12, 100, 1000] {
        let data = series(n);
        let mut surface = RasterSurface::new(800.0, 260.0, 2.0).expect("surface creation should succeed");
        let config = RenderConfig::area().markers(n <= 100);

        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| render_area_chart(&mut surface, black_box(&data), &[] as &[&str], &config));
        });
    }

    group.finish();
}

fn bar_chart_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("bar_chart");

    for n in [7, 31, 365] {
        let data = series(n);
        let labels: Vec<String> = (0..n).map(|i| format!("d{i}")).collect();
        let mut surface = RasterSurface::new(800.0, 220.0, 2.0).expect("surface creation should succeed");

        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| render_bar_chart(&mut surface, black_box(&data), &labels, &RenderConfig::bar()));
        });
    }

    group.finish();
}

fn small_charts_benchmark(c: &mut Criterion) {
    let data = series(48);
    let segments = [
        Segment::new(45.0, palette::BLUE),
        Segment::new(30.0, palette::EMERALD),
        Segment::new(25.0, palette::RED),
    ];

    let mut spark = RasterSurface::new(160.0, 40.0, 2.0).expect("surface creation should succeed");
    c.bench_function("sparkline_48", |b| {
        b.iter(|| render_sparkline(&mut spark, black_box(&data), palette::EMERALD, None));
    });

    let mut donut = RasterSurface::new(180.0, 180.0, 2.0).expect("surface creation should succeed");
    c.bench_function("donut_3", |b| {
        b.iter(|| render_donut_chart(&mut donut, black_box(&segments), None));
    });

    let mut svg = SvgSurface::new(800.0, 260.0);
    c.bench_function("area_svg_100", |b| {
        b.iter(|| {
            render_area_chart(&mut svg, black_box(&series(100)), &[] as &[&str], &RenderConfig::area());
            svg.render()
        });
    });
}

fn span_blend_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("blend_span");

    for width in [64u32, 512, 2048] {
        let mut fb = Framebuffer::new(width, 1).expect("framebuffer creation should succeed");
        let color = Rgba::new(59, 130, 246, 77);

        group.bench_with_input(BenchmarkId::from_parameter(width), &width, |b, &w| {
            b.iter(|| fb.blend_span(0, 0, black_box(w), color));
        });
    }

    group.finish();
}

fn png_encoder_benchmark(c: &mut Criterion) {
    let mut surface = RasterSurface::new(800.0, 260.0, 2.0).expect("surface creation should succeed");
    render_area_chart(&mut surface, &series(100), &[] as &[&str], &RenderConfig::area());

    c.bench_function("png_area_1600x520", |b| {
        b.iter(|| PngEncoder::to_bytes(black_box(surface.framebuffer())).expect("encoding should succeed"));
    });
}

criterion_group!(
    benches,
    area_chart_benchmark,
    bar_chart_benchmark,
    small_charts_benchmark,
    span_blend_benchmark,
    png_encoder_benchmark
);
criterion_main!(benches);
