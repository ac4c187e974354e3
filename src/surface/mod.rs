//! Drawing surfaces.
//!
//! [`Surface`] is the only thing the chart renderers talk to: a small set of
//! imperative path, fill, stroke and text operations in logical pixels. Three
//! backends ship with the crate:
//!
//! - [`RasterSurface`]: software rasterizer over a [`Framebuffer`](crate::framebuffer::Framebuffer)
//! - [`SvgSurface`]: vector output as SVG markup
//! - [`RecordingSurface`]: keeps the command list for inspection
//!
//! Every renderer starts with [`prepare_surface`], which sizes the backing
//! store for the device pixel ratio and clears it.

mod raster;
mod recording;
mod svg;

pub use raster::RasterSurface;
pub use recording::{DrawCommand, RecordingSurface};
pub use svg::SvgSurface;

use crate::color::Rgba;
use crate::config::RenderConfig;
use crate::geometry::Rect;
pub use crate::render::Paint;

/// Horizontal text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    /// Text starts at the anchor.
    #[default]
    Left,
    /// Text is centered on the anchor.
    Center,
    /// Text ends at the anchor.
    Right,
}

/// Vertical text placement relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextBaseline {
    /// Anchor is the top of the em box.
    Top,
    /// Anchor is the middle of the em box.
    Middle,
    /// Anchor is the alphabetic baseline.
    #[default]
    Alphabetic,
}

/// Font size, color and placement of a text run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in logical pixels.
    pub size: f64,
    /// Fill color.
    pub color: Rgba,
    /// Horizontal alignment.
    pub align: TextAlign,
    /// Vertical placement.
    pub baseline: TextBaseline,
}

impl TextStyle {
    /// 11px slate axis label with the given placement.
    #[must_use]
    pub const fn axis(align: TextAlign, baseline: TextBaseline) -> Self {
        Self {
            size: 11.0,
            color: crate::color::palette::SLATE,
            align,
            baseline,
        }
    }
}

/// A 2D drawing backend addressed in logical pixels.
///
/// Path operations build a current path which [`fill`](Surface::fill) and
/// [`stroke`](Surface::stroke) paint without consuming; [`begin_path`](Surface::begin_path)
/// discards it. Coordinates are multiplied by the scale set through
/// [`set_scale`](Surface::set_scale) before they reach the backing store.
pub trait Surface {
    /// Current logical (CSS-like) size.
    fn logical_size(&self) -> (f64, f64);

    /// Physical pixels per logical pixel of the host display.
    fn device_pixel_ratio(&self) -> f64 {
        1.0
    }

    /// Resize to `logical` units backed by a `pixels` buffer.
    fn resize(&mut self, logical: (f64, f64), pixels: (u32, u32));

    /// Replace the current transform with a uniform scale.
    fn set_scale(&mut self, scale: f64);

    /// Erase everything to transparent and discard the current path.
    fn clear(&mut self);

    /// Discard the current path.
    fn begin_path(&mut self);

    /// Start a new subpath at `(x, y)`.
    fn move_to(&mut self, x: f64, y: f64);

    /// Straight segment to `(x, y)`.
    fn line_to(&mut self, x: f64, y: f64);

    /// Cubic Bézier to `(x, y)` with control points `(c1x, c1y)`, `(c2x, c2y)`.
    fn bezier_to(&mut self, c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64);

    /// Circular arc around `(cx, cy)`, joined to the current point by a line.
    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64, anticlockwise: bool);

    /// Close the current subpath.
    fn close_path(&mut self);

    /// Fill the current path (nonzero winding).
    fn fill(&mut self, paint: &Paint);

    /// Stroke the current path.
    fn stroke(&mut self, color: Rgba, width: f64);

    /// Fill an axis-aligned rectangle, independent of the current path.
    fn fill_rect(&mut self, rect: Rect, color: Rgba);

    /// Draw a single line of text anchored at `(x, y)`.
    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle);
}

/// Logical drawing area produced by [`prepare_surface`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Logical width.
    pub width: f64,
    /// Logical height.
    pub height: f64,
    /// Device pixel ratio in effect.
    pub device_pixel_ratio: f64,
}

impl Viewport {
    /// The whole viewport as a rectangle at the origin.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// Sanitize a device pixel ratio: anything non-finite or non-positive is 1.
#[must_use]
pub fn effective_dpr(dpr: f64) -> f64 {
    if dpr.is_finite() && dpr > 0.0 {
        dpr
    } else {
        1.0
    }
}

/// Size the surface for the display density and clear it.
///
/// The backing store becomes `round(width * dpr) x round(height * dpr)`
/// physical pixels and the transform a uniform `dpr` scale, so all later
/// drawing happens in logical pixels. The width comes from `config.width`
/// or, if unset, the surface's current logical width; the height from
/// `config.height`.
///
/// Returns `None` (after clearing) when either logical dimension is not
/// positive; callers must then skip painting.
pub fn prepare_surface(surface: &mut dyn Surface, config: &RenderConfig) -> Option<Viewport> {
    let dpr = effective_dpr(config.device_pixel_ratio.unwrap_or_else(|| surface.device_pixel_ratio()));
    let width = config.width.unwrap_or_else(|| surface.logical_size().0);
    let height = config.height;

    let pixel_width = (width * dpr).round();
    let pixel_height = (height * dpr).round();
    let valid = width.is_finite()
        && height.is_finite()
        && width > 0.0
        && height > 0.0
        && pixel_width >= 1.0
        && pixel_height >= 1.0
        && pixel_width <= f64::from(u32::MAX)
        && pixel_height <= f64::from(u32::MAX);

    if !valid {
        surface.clear();
        return None;
    }

    surface.resize((width, height), (pixel_width as u32, pixel_height as u32));
    surface.set_scale(dpr);
    surface.clear();

    Some(Viewport {
        width,
        height,
        device_pixel_ratio: dpr,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_dpr() {
        assert_eq!(effective_dpr(2.0), 2.0);
        assert_eq!(effective_dpr(0.0), 1.0);
        assert_eq!(effective_dpr(-1.5), 1.0);
        assert_eq!(effective_dpr(f64::NAN), 1.0);
        assert_eq!(effective_dpr(f64::INFINITY), 1.0);
    }

    #[test]
    fn test_prepare_scales_backing_store() {
        let mut surface = RecordingSurface::new(300.0, 150.0).with_device_pixel_ratio(2.0);
        let viewport = prepare_surface(&mut surface, &RenderConfig::bar()).unwrap();

        assert_eq!(viewport.width, 300.0);
        assert_eq!(viewport.height, 220.0);
        assert_eq!(viewport.device_pixel_ratio, 2.0);
        assert_eq!(
            surface.commands(),
            &[
                DrawCommand::Resize { logical: (300.0, 220.0), pixels: (600, 440) },
                DrawCommand::SetScale(2.0),
                DrawCommand::Clear,
            ]
        );
    }

    #[test]
    fn test_prepare_config_overrides() {
        let mut surface = RecordingSurface::new(300.0, 150.0).with_device_pixel_ratio(3.0);
        let config = RenderConfig::default().width(100.5).height(40.0).device_pixel_ratio(1.5);
        let viewport = prepare_surface(&mut surface, &config).unwrap();

        assert_eq!(viewport.device_pixel_ratio, 1.5);
        assert_eq!(surface.commands()[0], DrawCommand::Resize { logical: (100.5, 40.0), pixels: (151, 60) });
    }

    #[test]
    fn test_prepare_invalid_dimensions_only_clears() {
        for config in [
            RenderConfig::default().width(0.0),
            RenderConfig::default().height(-10.0),
            RenderConfig::default().width(f64::NAN),
        ] {
            let mut surface = RecordingSurface::new(300.0, 150.0);
            assert!(prepare_surface(&mut surface, &config).is_none());
            assert_eq!(surface.commands(), &[DrawCommand::Clear]);
        }
    }

    #[test]
    fn test_prepare_is_idempotent() {
        let mut surface = RasterSurface::new(50.0, 20.0, 2.0).unwrap();
        let config = RenderConfig::sparkline();

        prepare_surface(&mut surface, &config);
        surface.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Rgba::BLACK);
        prepare_surface(&mut surface, &config);

        assert_eq!(surface.framebuffer().painted_pixel_count(), 0);
        assert_eq!(surface.framebuffer().width(), 100);
        assert_eq!(surface.framebuffer().height(), 80);
    }
}
