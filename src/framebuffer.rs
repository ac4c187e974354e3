//! Core framebuffer for pixel rendering.
//!
//! Provides a SIMD-aligned RGBA pixel buffer. Pixels are stored with
//! premultiplied alpha so "source over" compositing of a constant color across
//! a span is a single multiply-add, which is dispatched through trueno.

use crate::color::Rgba;
use crate::error::{Error, Result};
use trueno::{Backend, Vector};

/// Alignment for SIMD operations (64 bytes for AVX-512).
const SIMD_ALIGNMENT: usize = 64;

/// Spans shorter than this are blended with scalar code.
const SIMD_SPAN_THRESHOLD: usize = 16;

/// SIMD-aligned framebuffer with premultiplied RGBA pixels.
///
/// Public accessors ([`get_pixel`](Self::get_pixel),
/// [`set_pixel`](Self::set_pixel), [`to_compact_pixels`](Self::to_compact_pixels))
/// speak straight (non-premultiplied) alpha; only [`pixels`](Self::pixels)
/// exposes the raw premultiplied storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    /// Width in pixels.
    width: u32,
    /// Height in pixels.
    height: u32,
    /// Premultiplied RGBA pixels in row-major order.
    pixels: Vec<u8>,
    /// Stride in bytes (may include padding for alignment).
    stride: usize,
}

impl Framebuffer {
    /// Create a new, fully transparent framebuffer.
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use trueno_dashcharts::framebuffer::Framebuffer;
    ///
    /// let fb = Framebuffer::new(800, 600).unwrap();
    /// assert_eq!(fb.width(), 800);
    /// assert_eq!(fb.height(), 600);
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }

        let row_bytes = (width as usize) * 4;
        let stride = (row_bytes + SIMD_ALIGNMENT - 1) & !(SIMD_ALIGNMENT - 1);

        Ok(Self {
            width,
            height,
            pixels: vec![0; stride * (height as usize)],
            stride,
        })
    }

    /// Get the width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Get the height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Get the stride (row width in bytes, including any padding).
    #[must_use]
    pub const fn stride(&self) -> usize {
        self.stride
    }

    /// Raw premultiplied pixel storage, including stride padding.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Clear the framebuffer to a solid color.
    pub fn clear(&mut self, color: Rgba) {
        let pattern = premultiply(color);
        let row_bytes = (self.width as usize) * 4;

        for row in self.pixels.chunks_exact_mut(self.stride) {
            for chunk in row[..row_bytes].chunks_exact_mut(4) {
                chunk.copy_from_slice(&pattern);
            }
        }
    }

    /// Overwrite a rectangular region with a solid color (no blending).
    ///
    /// Coordinates are clamped to framebuffer bounds.
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgba) {
        let x1 = x.min(self.width);
        let y1 = y.min(self.height);
        let x2 = x.saturating_add(w).min(self.width);
        let y2 = y.saturating_add(h).min(self.height);

        if x1 >= x2 || y1 >= y2 {
            return;
        }

        let pattern = premultiply(color);
        for row_y in y1..y2 {
            let start = self.pixel_index(x1, row_y);
            let end = self.pixel_index(x2, row_y);
            for chunk in self.pixels[start..end].chunks_exact_mut(4) {
                chunk.copy_from_slice(&pattern);
            }
        }
    }

    /// Get the straight-alpha color at a pixel coordinate.
    ///
    /// Returns `None` if the coordinates are out of bounds.
    #[must_use]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let idx = self.pixel_index(x, y);
        Some(unpremultiply([
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]))
    }

    /// Set the color at a pixel coordinate (no blending).
    ///
    /// Does nothing if the coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if x >= self.width || y >= self.height {
            return;
        }

        let idx = self.pixel_index(x, y);
        self.pixels[idx..idx + 4].copy_from_slice(&premultiply(color));
    }

    /// Composite a color over the pixel at `(x, y)`.
    ///
    /// Uses premultiplied "source over": `out = src + dst * (1 - src_alpha)`.
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if x >= self.width || y >= self.height || color.a == 0 {
            return;
        }

        let idx = self.pixel_index(x, y);
        let src = premultiply(color);
        let inv_alpha = 1.0 - f32::from(color.a) / 255.0;

        for (dst, &s) in self.pixels[idx..idx + 4].iter_mut().zip(src.iter()) {
            *dst = (f32::from(s) + f32::from(*dst) * inv_alpha).round().min(255.0) as u8;
        }
    }

    /// Composite a color over the horizontal span `[x0, x1)` of row `y`.
    ///
    /// Wide spans go through trueno's vector multiply-add.
    pub fn blend_span(&mut self, y: u32, x0: u32, x1: u32, color: Rgba) {
        let x1 = x1.min(self.width);
        if y >= self.height || x0 >= x1 || color.a == 0 {
            return;
        }

        let count = (x1 - x0) as usize;
        if count < SIMD_SPAN_THRESHOLD {
            for x in x0..x1 {
                self.blend_pixel(x, y, color);
            }
            return;
        }

        let start = self.pixel_index(x0, y);
        let end = start + count * 4;
        let src = premultiply(color);
        let inv_alpha = 1.0 - f32::from(color.a) / 255.0;

        let dst_vec = Vector::from_vec(self.pixels[start..end].iter().map(|&b| f32::from(b)).collect());
        let src_vec = Vector::from_vec(src.iter().cycle().take(count * 4).map(|&b| f32::from(b)).collect());
        let keep_vec = Vector::from_vec(vec![inv_alpha; count * 4]);

        let blended = dst_vec.mul(&keep_vec).and_then(|kept| kept.add(&src_vec));
        match blended {
            Ok(result) => {
                for (dst, &v) in self.pixels[start..end].iter_mut().zip(result.as_slice()) {
                    *dst = v.round().clamp(0.0, 255.0) as u8;
                }
            }
            Err(_) => {
                for x in x0..x1 {
                    self.blend_pixel(x, y, color);
                }
            }
        }
    }

    /// Calculate the byte index for a pixel coordinate.
    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        (y as usize) * self.stride + (x as usize) * 4
    }

    /// Straight-alpha pixel data without stride padding.
    ///
    /// This is the layout PNG encoders expect.
    #[must_use]
    pub fn to_compact_pixels(&self) -> Vec<u8> {
        let row_bytes = (self.width as usize) * 4;
        let mut compact = Vec::with_capacity(row_bytes * (self.height as usize));

        for row in self.pixels.chunks_exact(self.stride) {
            for chunk in row[..row_bytes].chunks_exact(4) {
                compact.extend_from_slice(&unpremultiply([chunk[0], chunk[1], chunk[2], chunk[3]]).to_array());
            }
        }
        compact
    }

    /// Count pixels whose alpha is non-zero.
    #[must_use]
    pub fn painted_pixel_count(&self) -> usize {
        let row_bytes = (self.width as usize) * 4;
        self.pixels
            .chunks_exact(self.stride)
            .flat_map(|row| row[..row_bytes].chunks_exact(4))
            .filter(|px| px[3] != 0)
            .count()
    }

    /// Get the selected SIMD backend.
    #[must_use]
    pub fn backend() -> Backend {
        Backend::select_best()
    }
}

/// Convert a straight-alpha color to premultiplied bytes.
#[inline]
fn premultiply(color: Rgba) -> [u8; 4] {
    let a = u16::from(color.a);
    let mul = |c: u8| ((u16::from(c) * a + 127) / 255) as u8;
    [mul(color.r), mul(color.g), mul(color.b), color.a]
}

/// Convert premultiplied bytes back to a straight-alpha color.
#[inline]
fn unpremultiply(px: [u8; 4]) -> Rgba {
    let a = px[3];
    if a == 0 {
        return Rgba::TRANSPARENT;
    }
    if a == 255 {
        return Rgba::from_array(px);
    }
    let div = |c: u8| ((u16::from(c) * 255 + u16::from(a) / 2) / u16::from(a)).min(255) as u8;
    Rgba::new(div(px[0]), div(px[1]), div(px[2]), a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_framebuffer() {
        let fb = Framebuffer::new(100, 50).unwrap();
        assert_eq!(fb.width(), 100);
        assert_eq!(fb.height(), 50);
        assert!(fb.stride() >= 400);
        assert_eq!(fb.stride() % SIMD_ALIGNMENT, 0);
        assert_eq!(fb.painted_pixel_count(), 0);
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(Framebuffer::new(0, 100).is_err());
        assert!(Framebuffer::new(100, 0).is_err());
        assert!(Framebuffer::new(0, 0).is_err());
    }

    #[test]
    fn test_clear() {
        let mut fb = Framebuffer::new(10, 10).unwrap();
        fb.clear(Rgba::WHITE);
        assert_eq!(fb.get_pixel(9, 9), Some(Rgba::WHITE));

        fb.clear(Rgba::TRANSPARENT);
        assert_eq!(fb.painted_pixel_count(), 0);
    }

    #[test]
    fn test_fill_rect_clamped() {
        let mut fb = Framebuffer::new(100, 100).unwrap();
        fb.fill_rect(90, 90, u32::MAX, 20, Rgba::BLACK);

        assert_eq!(fb.get_pixel(95, 95), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(85, 95), Some(Rgba::TRANSPARENT));
        assert_eq!(fb.painted_pixel_count(), 100);
    }

    #[test]
    fn test_set_get_pixel() {
        let mut fb = Framebuffer::new(10, 10).unwrap();
        fb.set_pixel(5, 5, Rgba::rgb(10, 20, 30));
        assert_eq!(fb.get_pixel(5, 5), Some(Rgba::rgb(10, 20, 30)));
        assert_eq!(fb.get_pixel(100, 100), None);
    }

    #[test]
    fn test_blend_onto_transparent_keeps_hue() {
        let mut fb = Framebuffer::new(4, 4).unwrap();
        fb.blend_pixel(1, 1, Rgba::new(255, 0, 0, 128));

        let px = fb.get_pixel(1, 1).unwrap();
        assert_eq!(px.a, 128);
        assert_eq!(px.r, 255);
        assert_eq!(px.g, 0);
    }

    #[test]
    fn test_blend_pixel_over_white() {
        let mut fb = Framebuffer::new(10, 10).unwrap();
        fb.clear(Rgba::WHITE);
        fb.blend_pixel(5, 5, Rgba::new(255, 0, 0, 128));

        let result = fb.get_pixel(5, 5).unwrap();
        assert_eq!(result.a, 255);
        assert_eq!(result.r, 255);
        assert!(result.g > 120 && result.g < 135);
    }

    #[test]
    fn test_blend_span_matches_scalar() {
        let color = Rgba::new(59, 130, 246, 77);
        let mut simd = Framebuffer::new(64, 2).unwrap();
        let mut scalar = Framebuffer::new(64, 2).unwrap();
        simd.clear(Rgba::rgb(20, 40, 60));
        scalar.clear(Rgba::rgb(20, 40, 60));

        simd.blend_span(1, 0, 64, color);
        for x in 0..64 {
            scalar.blend_pixel(x, 1, color);
        }

        for x in 0..64 {
            let a = simd.get_pixel(x, 1).unwrap();
            let b = scalar.get_pixel(x, 1).unwrap();
            assert!(a.r.abs_diff(b.r) <= 1 && a.g.abs_diff(b.g) <= 1 && a.b.abs_diff(b.b) <= 1);
        }
        assert_eq!(simd.get_pixel(0, 0), Some(Rgba::rgb(20, 40, 60)));
    }

    #[test]
    fn test_blend_span_out_of_bounds() {
        let mut fb = Framebuffer::new(8, 8).unwrap();
        fb.blend_span(20, 0, 8, Rgba::BLACK);
        fb.blend_span(2, 6, 100, Rgba::BLACK);
        assert_eq!(fb.painted_pixel_count(), 2);
    }

    #[test]
    fn test_compact_pixels_unpremultiplied() {
        let mut fb = Framebuffer::new(3, 2).unwrap();
        fb.set_pixel(0, 0, Rgba::new(200, 100, 50, 255));
        let compact = fb.to_compact_pixels();

        assert_eq!(compact.len(), 3 * 2 * 4);
        assert_eq!(&compact[0..4], &[200, 100, 50, 255]);
        assert_eq!(&compact[4..8], &[0, 0, 0, 0]);
    }

    #[test]
    fn test_premultiply_round_trip_opaque() {
        let c = Rgba::rgb(17, 99, 250);
        assert_eq!(unpremultiply(premultiply(c)), c);
    }

    #[test]
    fn test_backend_selection() {
        let backend = Framebuffer::backend();
        println!("Selected backend: {backend:?}");
    }
}
