//! # Trueno-Dashcharts
//!
//! Hand-painted dashboard charts over a minimal 2D drawing surface.
//!
//! Four renderers turn plain numeric series into drawings: a sparkline, a
//! signed bar chart, a smoothed area chart with a gradient fill, and a donut
//! chart. Every axis, gridline, label, curve and arc is computed here and
//! issued as path/fill/stroke/text calls on a [`Surface`](surface::Surface);
//! no charting library sits underneath.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use trueno_dashcharts::prelude::*;
//!
//! let mut surface = RasterSurface::new(320.0, 220.0, 2.0)?;
//! render_bar_chart(&mut surface, &[10.0, -5.0, 0.0], &["Mon", "Tue", "Wed"], &RenderConfig::bar());
//!
//! PngEncoder::write_to_file(surface.framebuffer(), "bars.png")?;
//! ```
//!
//! ## Surfaces
//!
//! - [`RasterSurface`](surface::RasterSurface): software rasterizer, SIMD span blending via trueno
//! - [`SvgSurface`](surface::SvgSurface): vector markup
//! - [`RecordingSurface`](surface::RecordingSurface): display list for inspection and replay
//!
//! Renderers are stateless: each call prepares the surface for the device
//! pixel ratio, clears it and redraws everything.
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for [`RenderConfig`](config::RenderConfig),
//!   [`Chart`](charts::Chart), [`Segment`](charts::Segment) and [`Rgba`](color::Rgba)
//!
//! ## References
//!
//! - Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics/visualization code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color type, hex parsing and the dashboard palette.
pub mod color;

/// Render configuration shared by the chart renderers.
pub mod config;

/// Core framebuffer for pixel rendering.
pub mod framebuffer;

/// Geometric primitives (points, rectangles, padding, curves).
pub mod geometry;

/// Scale functions for data-to-pixel mappings.
pub mod scale;

/// Axis label formatting.
pub mod format;

// ============================================================================
// Drawing Modules
// ============================================================================

/// Drawing surfaces and surface preparation.
pub mod surface;

/// Rasterization for the software surface.
pub mod render;

/// Output encoders (PNG).
pub mod output;

// ============================================================================
// Charts
// ============================================================================

/// Sparkline, bar, area and donut renderers.
pub mod charts;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for trueno-dashcharts operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust,ignore
/// use trueno_dashcharts::prelude::*;
/// ```
pub mod prelude {
    pub use crate::charts::{
        donut_sweeps, render_area_chart, render_bar_chart, render_donut_chart, render_sparkline, Chart,
        Segment, Sweep,
    };
    pub use crate::color::{palette, Rgba};
    pub use crate::config::RenderConfig;
    pub use crate::error::{Error, Result};
    pub use crate::framebuffer::Framebuffer;
    pub use crate::geometry::{Padding, Point, Rect};
    pub use crate::output::PngEncoder;
    pub use crate::scale::{LinearScale, Scale, ScaleMapping};
    pub use crate::surface::{
        prepare_surface, Paint, RasterSurface, RecordingSurface, Surface, SvgSurface, TextAlign,
        TextBaseline, TextStyle, Viewport,
    };
    pub use batuta_common::display::WithDimensions;
}

// ============================================================================
// Re-exports
// ============================================================================

/// Re-export trueno for direct access to SIMD operations.
pub use trueno;

// ============================================================================
// Tests
// ============================================================================
