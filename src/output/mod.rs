//! Output encoders.
//!
//! Raster surfaces are exported through [`PngEncoder`]; vector output comes
//! straight from [`SvgSurface::render`](crate::surface::SvgSurface::render).

mod png_encoder;

pub use png_encoder::PngEncoder;
