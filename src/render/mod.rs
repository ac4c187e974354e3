//! Rasterization for the software surface.
//!
//! # Algorithms
//!
//! - **Wu's Anti-aliased Line**: hairline strokes with sub-pixel accuracy
//! - **Scanline fill**: nonzero-winding polygon fill sampled at pixel centers
//! - **Adaptive flattening**: Bézier curves and arcs reduced to polylines
//!
//! # References
//!
//! - Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.

mod path;
mod primitives;

pub use path::{arc_sweep, flatten_arc, flatten_cubic, stroke_outline};
pub use primitives::{draw_line_aa, fill_polygons, Paint};
