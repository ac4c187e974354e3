//! Render configuration shared by all chart renderers.
//!
//! Callers override only what they need; every field has a default. The
//! per-chart constructors ([`RenderConfig::bar`], [`RenderConfig::area`], ...)
//! differ only in their default height.

use crate::color::{palette, Rgba};

/// Default logical height of a sparkline.
pub const SPARKLINE_HEIGHT: f64 = 40.0;
/// Default logical height of a bar chart.
pub const BAR_HEIGHT: f64 = 220.0;
/// Default logical height of an area chart.
pub const AREA_HEIGHT: f64 = 260.0;
/// Default logical height of a donut chart.
pub const DONUT_HEIGHT: f64 = 180.0;

/// Options recognized by the renderers.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct RenderConfig {
    /// Logical width; `None` uses the surface's own logical width.
    pub width: Option<f64>,
    /// Logical height.
    pub height: f64,
    /// Stroke/fill color for line, area and sparkline charts.
    pub color: Rgba,
    /// Fill for non-negative bars.
    pub pos_color: Rgba,
    /// Fill for negative bars.
    pub neg_color: Rgba,
    /// Text prepended to numeric axis labels (e.g. `"$"`).
    pub y_prefix: String,
    /// Draw point markers on line charts.
    pub show_markers: bool,
    /// Curved interpolation instead of straight segments.
    pub smoothing: bool,
    /// Overrides the surface's device pixel ratio.
    pub device_pixel_ratio: Option<f64>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: None,
            height: AREA_HEIGHT,
            color: palette::BLUE,
            pos_color: palette::EMERALD,
            neg_color: palette::RED,
            y_prefix: String::new(),
            show_markers: false,
            smoothing: true,
            device_pixel_ratio: None,
        }
    }
}

impl RenderConfig {
    /// Create a configuration with all defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults for a sparkline.
    #[must_use]
    pub fn sparkline() -> Self {
        Self::default().height(SPARKLINE_HEIGHT)
    }

    /// Defaults for a bar chart.
    #[must_use]
    pub fn bar() -> Self {
        Self::default().height(BAR_HEIGHT)
    }

    /// Defaults for an area chart.
    #[must_use]
    pub fn area() -> Self {
        Self::default().height(AREA_HEIGHT)
    }

    /// Defaults for a donut chart.
    #[must_use]
    pub fn donut() -> Self {
        Self::default().height(DONUT_HEIGHT)
    }

    /// Set the logical width.
    #[must_use]
    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the logical height.
    #[must_use]
    pub fn height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }

    /// Set the line/area color.
    #[must_use]
    pub fn color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    /// Set the positive bar color.
    #[must_use]
    pub fn pos_color(mut self, color: Rgba) -> Self {
        self.pos_color = color;
        self
    }

    /// Set the negative bar color.
    #[must_use]
    pub fn neg_color(mut self, color: Rgba) -> Self {
        self.neg_color = color;
        self
    }

    /// Set the axis label prefix.
    #[must_use]
    pub fn y_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.y_prefix = prefix.into();
        self
    }

    /// Enable or disable point markers.
    #[must_use]
    pub fn markers(mut self, show: bool) -> Self {
        self.show_markers = show;
        self
    }

    /// Enable or disable curve smoothing.
    #[must_use]
    pub fn smoothing(mut self, enabled: bool) -> Self {
        self.smoothing = enabled;
        self
    }

    /// Override the device pixel ratio.
    #[must_use]
    pub fn device_pixel_ratio(mut self, dpr: f64) -> Self {
        self.device_pixel_ratio = Some(dpr);
        self
    }
}

impl batuta_common::display::WithDimensions for RenderConfig {
    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = Some(f64::from(width));
        self.height = f64::from(height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use batuta_common::display::WithDimensions;

    #[test]
    fn test_defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.width, None);
        assert_eq!(config.color, palette::BLUE);
        assert!(config.smoothing);
        assert!(!config.show_markers);
        assert!(config.y_prefix.is_empty());
    }

    #[test]
    fn test_per_chart_heights() {
        assert_eq!(RenderConfig::sparkline().height, SPARKLINE_HEIGHT);
        assert_eq!(RenderConfig::bar().height, BAR_HEIGHT);
        assert_eq!(RenderConfig::area().height, AREA_HEIGHT);
        assert_eq!(RenderConfig::donut().height, DONUT_HEIGHT);
    }

    #[test]
    fn test_builder() {
        let config = RenderConfig::bar()
            .width(320.0)
            .y_prefix("$")
            .pos_color(Rgba::WHITE)
            .markers(true)
            .smoothing(false)
            .device_pixel_ratio(2.0);

        assert_eq!(config.width, Some(320.0));
        assert_eq!(config.y_prefix, "$");
        assert_eq!(config.pos_color, Rgba::WHITE);
        assert!(config.show_markers);
        assert!(!config.smoothing);
        assert_eq!(config.device_pixel_ratio, Some(2.0));
    }

    #[test]
    fn test_with_dimensions() {
        let mut config = RenderConfig::default();
        config.set_dimensions(640, 120);
        assert_eq!(config.width, Some(640.0));
        assert_eq!(config.height, 120.0);
    }
}
