//! Software surface backed by a [`Framebuffer`].
//!
//! Paths are flattened into device-pixel polylines as they are built, so the
//! current transform only applies to the coordinates issued after it was set
//! (same as a browser canvas).

use super::{Paint, Surface, TextAlign, TextBaseline, TextStyle};
use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::geometry::{CubicSegment, Point, Rect};
use crate::render::{draw_line_aa, fill_polygons, flatten_arc, flatten_cubic, stroke_outline};
use fontdue::{Font, FontSettings};

/// Strokes at or below this device width are drawn as anti-aliased hairlines.
const HAIRLINE_WIDTH: f64 = 1.0;

#[derive(Debug, Clone, Default)]
struct Subpath {
    points: Vec<Point>,
    closed: bool,
}

/// Software rasterizing surface.
pub struct RasterSurface {
    framebuffer: Framebuffer,
    logical: (f64, f64),
    dpr: f64,
    scale: f64,
    subpaths: Vec<Subpath>,
    font: Option<Font>,
    unrendered_text: usize,
}

impl std::fmt::Debug for RasterSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterSurface")
            .field("framebuffer", &(self.framebuffer.width(), self.framebuffer.height()))
            .field("logical", &self.logical)
            .field("dpr", &self.dpr)
            .field("scale", &self.scale)
            .field("has_font", &self.font.is_some())
            .finish_non_exhaustive()
    }
}

impl RasterSurface {
    /// Create a surface of `width` x `height` logical pixels on a display
    /// with the given device pixel ratio.
    ///
    /// # Errors
    ///
    /// Returns an error if the physical size rounds to zero.
    pub fn new(width: f64, height: f64, device_pixel_ratio: f64) -> Result<Self> {
        let dpr = super::effective_dpr(device_pixel_ratio);
        let pixel_width = (width * dpr).round();
        let pixel_height = (height * dpr).round();
        if !(pixel_width >= 1.0 && pixel_height >= 1.0) {
            return Err(Error::InvalidDimensions {
                width: pixel_width.max(0.0) as u32,
                height: pixel_height.max(0.0) as u32,
            });
        }

        Ok(Self {
            framebuffer: Framebuffer::new(pixel_width as u32, pixel_height as u32)?,
            logical: (width, height),
            dpr,
            scale: 1.0,
            subpaths: Vec::new(),
            font: None,
            unrendered_text: 0,
        })
    }

    /// Use the given TrueType/OpenType font for text.
    ///
    /// Without a font, text calls are counted but draw nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the font data cannot be parsed.
    pub fn with_font(mut self, font_data: &[u8]) -> Result<Self> {
        let font = Font::from_bytes(font_data, FontSettings::default()).map_err(|e| Error::Font(e.to_string()))?;
        self.font = Some(font);
        Ok(self)
    }

    /// The backing framebuffer.
    #[must_use]
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Consume the surface, returning its framebuffer.
    #[must_use]
    pub fn into_framebuffer(self) -> Framebuffer {
        self.framebuffer
    }

    /// Number of text runs skipped because no font was loaded.
    #[must_use]
    pub fn unrendered_text(&self) -> usize {
        self.unrendered_text
    }

    fn device(&self, x: f64, y: f64) -> Point {
        Point::new(x * self.scale, y * self.scale)
    }

    fn current(&mut self) -> &mut Subpath {
        if self.subpaths.last().map_or(true, |s| s.closed) {
            let start = self
                .subpaths
                .last()
                .and_then(|s| s.points.first().copied());
            self.subpaths.push(Subpath {
                points: start.into_iter().collect(),
                closed: false,
            });
        }
        let last = self.subpaths.len() - 1;
        &mut self.subpaths[last]
    }

    fn draw_glyphs(&mut self, font: &Font, text: &str, x: f64, y: f64, style: &TextStyle) {
        let size = (style.size * self.scale) as f32;
        let advance: f32 = text.chars().map(|c| font.metrics(c, size).advance_width).sum();
        let origin_x = x * self.scale
            - match style.align {
                TextAlign::Left => 0.0,
                TextAlign::Center => f64::from(advance) / 2.0,
                TextAlign::Right => f64::from(advance),
            };
        let (ascent, descent) = font
            .horizontal_line_metrics(size)
            .map_or((f64::from(size) * 0.8, -f64::from(size) * 0.2), |m| {
                (f64::from(m.ascent), f64::from(m.descent))
            });
        let baseline = y * self.scale
            + match style.baseline {
                TextBaseline::Top => ascent,
                TextBaseline::Middle => (ascent + descent) / 2.0,
                TextBaseline::Alphabetic => 0.0,
            };

        let mut cursor = origin_x;
        for ch in text.chars() {
            let (metrics, coverage) = font.rasterize(ch, size);
            let left = (cursor + f64::from(metrics.xmin)).round() as i64;
            let top = (baseline - f64::from(metrics.ymin) - metrics.height as f64).round() as i64;

            for row in 0..metrics.height {
                for col in 0..metrics.width {
                    let cov = coverage[row * metrics.width + col];
                    let (px, py) = (left + col as i64, top + row as i64);
                    if cov == 0 || px < 0 || py < 0 {
                        continue;
                    }
                    let alpha = (u16::from(style.color.a) * u16::from(cov) / 255) as u8;
                    self.framebuffer.blend_pixel(px as u32, py as u32, style.color.with_alpha(alpha));
                }
            }
            cursor += f64::from(metrics.advance_width);
        }
    }
}

impl Surface for RasterSurface {
    fn logical_size(&self) -> (f64, f64) {
        self.logical
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.dpr
    }

    fn resize(&mut self, logical: (f64, f64), pixels: (u32, u32)) {
        self.logical = logical;
        if (self.framebuffer.width(), self.framebuffer.height()) != pixels {
            if let Ok(fb) = Framebuffer::new(pixels.0, pixels.1) {
                self.framebuffer = fb;
            }
        }
    }

    fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
    }

    fn clear(&mut self) {
        self.framebuffer.clear(Rgba::TRANSPARENT);
        self.subpaths.clear();
    }

    fn begin_path(&mut self) {
        self.subpaths.clear();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        let p = self.device(x, y);
        self.subpaths.push(Subpath {
            points: vec![p],
            closed: false,
        });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        let p = self.device(x, y);
        self.current().points.push(p);
    }

    fn bezier_to(&mut self, c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64) {
        let ctrl1 = self.device(c1x, c1y);
        let ctrl2 = self.device(c2x, c2y);
        let to = self.device(x, y);
        let subpath = self.current();
        let from = match subpath.points.last() {
            Some(&p) => p,
            None => {
                subpath.points.push(ctrl1);
                ctrl1
            }
        };
        subpath
            .points
            .extend(flatten_cubic(&CubicSegment { from, ctrl1, ctrl2, to }));
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64, anticlockwise: bool) {
        let center = self.device(cx, cy);
        let points = flatten_arc(center, radius * self.scale, start, end, anticlockwise);
        self.current().points.extend(points);
    }

    fn close_path(&mut self) {
        if let Some(subpath) = self.subpaths.last_mut() {
            subpath.closed = true;
        }
    }

    fn fill(&mut self, paint: &Paint) {
        let polygons: Vec<Vec<Point>> = self
            .subpaths
            .iter()
            .filter(|s| s.points.len() >= 3)
            .map(|s| s.points.clone())
            .collect();
        fill_polygons(&mut self.framebuffer, &polygons, &paint.scaled(self.scale));
    }

    fn stroke(&mut self, color: Rgba, width: f64) {
        let device_width = width * self.scale;
        if device_width <= HAIRLINE_WIDTH {
            for subpath in &self.subpaths {
                let pts = &subpath.points;
                let closing = if subpath.closed && pts.len() > 2 { pts.first().zip(pts.last()) } else { None };
                for pair in pts.windows(2) {
                    draw_line_aa(&mut self.framebuffer, pair[0].x, pair[0].y, pair[1].x, pair[1].y, color);
                }
                if let Some((first, last)) = closing {
                    draw_line_aa(&mut self.framebuffer, last.x, last.y, first.x, first.y, color);
                }
            }
            return;
        }

        let polygons: Vec<Vec<Point>> = self
            .subpaths
            .iter()
            .flat_map(|s| stroke_outline(&s.points, device_width, s.closed))
            .collect();
        fill_polygons(&mut self.framebuffer, &polygons, &Paint::Solid(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        let a = self.device(rect.x, rect.y);
        let b = self.device(rect.right(), rect.bottom());
        let quad = vec![a, Point::new(b.x, a.y), b, Point::new(a.x, b.y)];
        fill_polygons(&mut self.framebuffer, &[quad], &Paint::Solid(color));
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) {
        match self.font.take() {
            Some(font) => {
                self.draw_glyphs(&font, text, x, y, style);
                self.font = Some(font);
            }
            None => self.unrendered_text += 1,
        }
    }
}
