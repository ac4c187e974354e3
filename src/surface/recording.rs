//! Display-list surface.
//!
//! Records every call verbatim, in logical coordinates. Useful for asserting
//! on geometry without rasterizing, and for replaying a chart onto another
//! backend.

use super::{Paint, Surface, TextStyle};
use crate::color::Rgba;
use crate::geometry::{Point, Rect};

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum DrawCommand {
    Resize { logical: (f64, f64), pixels: (u32, u32) },
    SetScale(f64),
    Clear,
    BeginPath,
    MoveTo(Point),
    LineTo(Point),
    BezierTo { ctrl1: Point, ctrl2: Point, to: Point },
    Arc { center: Point, radius: f64, start: f64, end: f64, anticlockwise: bool },
    ClosePath,
    Fill(Paint),
    Stroke { color: Rgba, width: f64 },
    FillRect { rect: Rect, color: Rgba },
    FillText { text: String, at: Point, style: TextStyle },
}

impl DrawCommand {
    /// Whether this command puts pixels on the surface.
    #[must_use]
    pub fn is_paint(&self) -> bool {
        matches!(
            self,
            Self::Fill(_) | Self::Stroke { .. } | Self::FillRect { .. } | Self::FillText { .. }
        )
    }
}

/// Surface that records calls instead of drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingSurface {
    logical: (f64, f64),
    dpr: f64,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    /// Create a recorder with the given logical size and a pixel ratio of 1.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            logical: (width, height),
            dpr: 1.0,
            commands: Vec::new(),
        }
    }

    /// Report `dpr` as the device pixel ratio.
    #[must_use]
    pub fn with_device_pixel_ratio(mut self, dpr: f64) -> Self {
        self.dpr = dpr;
        self
    }

    /// Every call recorded so far.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Commands issued since the most recent clear.
    #[must_use]
    pub fn frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| *c == DrawCommand::Clear)
            .map_or(0, |i| i + 1);
        &self.commands[start..]
    }

    /// Whether the current frame contains no paint commands.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        !self.frame().iter().any(DrawCommand::is_paint)
    }

    /// Text runs in the current frame, in draw order.
    #[must_use]
    pub fn texts(&self) -> Vec<(&str, Point)> {
        self.frame()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillText { text, at, .. } => Some((text.as_str(), *at)),
                _ => None,
            })
            .collect()
    }

    /// Forget all recorded commands.
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    /// Replay the current frame onto another surface.
    pub fn replay(&self, target: &mut dyn Surface) {
        for command in self.frame() {
            match command {
                DrawCommand::Resize { logical, pixels } => target.resize(*logical, *pixels),
                DrawCommand::SetScale(s) => target.set_scale(*s),
                DrawCommand::Clear => target.clear(),
                DrawCommand::BeginPath => target.begin_path(),
                DrawCommand::MoveTo(p) => target.move_to(p.x, p.y),
                DrawCommand::LineTo(p) => target.line_to(p.x, p.y),
                DrawCommand::BezierTo { ctrl1, ctrl2, to } => {
                    target.bezier_to(ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y);
                }
                DrawCommand::Arc { center, radius, start, end, anticlockwise } => {
                    target.arc(center.x, center.y, *radius, *start, *end, *anticlockwise);
                }
                DrawCommand::ClosePath => target.close_path(),
                DrawCommand::Fill(paint) => target.fill(paint),
                DrawCommand::Stroke { color, width } => target.stroke(*color, *width),
                DrawCommand::FillRect { rect, color } => target.fill_rect(*rect, *color),
                DrawCommand::FillText { text, at, style } => target.fill_text(text, at.x, at.y, style),
            }
        }
    }
}

impl Surface for RecordingSurface {
    fn logical_size(&self) -> (f64, f64) {
        self.logical
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.dpr
    }

    fn resize(&mut self, logical: (f64, f64), pixels: (u32, u32)) {
        self.logical = logical;
        self.commands.push(DrawCommand::Resize { logical, pixels });
    }

    fn set_scale(&mut self, scale: f64) {
        self.commands.push(DrawCommand::SetScale(scale));
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::MoveTo(Point::new(x, y)));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::LineTo(Point::new(x, y)));
    }

    fn bezier_to(&mut self, c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64) {
        self.commands.push(DrawCommand::BezierTo {
            ctrl1: Point::new(c1x, c1y),
            ctrl2: Point::new(c2x, c2y),
            to: Point::new(x, y),
        });
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64, anticlockwise: bool) {
        self.commands.push(DrawCommand::Arc {
            center: Point::new(cx, cy),
            radius,
            start,
            end,
            anticlockwise,
        });
    }

    fn close_path(&mut self) {
        self.commands.push(DrawCommand::ClosePath);
    }

    fn fill(&mut self, paint: &Paint) {
        self.commands.push(DrawCommand::Fill(*paint));
    }

    fn stroke(&mut self, color: Rgba, width: f64) {
        self.commands.push(DrawCommand::Stroke { color, width });
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            at: Point::new(x, y),
            style: *style,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{TextAlign, TextBaseline};

    #[test]
    fn test_frame_starts_after_last_clear() {
        let mut surface = RecordingSurface::new(10.0, 10.0);
        surface.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Rgba::BLACK);
        surface.clear();
        assert!(surface.is_blank());

        surface.move_to(1.0, 2.0);
        assert!(surface.is_blank());
        surface.stroke(Rgba::BLACK, 1.0);
        assert!(!surface.is_blank());
        assert_eq!(surface.frame().len(), 2);
    }

    #[test]
    fn test_texts() {
        let mut surface = RecordingSurface::new(10.0, 10.0);
        let style = TextStyle::axis(TextAlign::Center, TextBaseline::Top);
        surface.fill_text("Mon", 5.0, 9.0, &style);

        assert_eq!(surface.texts(), vec![("Mon", Point::new(5.0, 9.0))]);
    }

    #[test]
    fn test_replay_reproduces_frame() {
        let mut source = RecordingSurface::new(10.0, 10.0);
        source.clear();
        source.begin_path();
        source.move_to(0.0, 0.0);
        source.bezier_to(1.0, 0.0, 1.0, 1.0, 2.0, 1.0);
        source.arc(5.0, 5.0, 2.0, 0.0, 1.0, false);
        source.close_path();
        source.fill(&Paint::Solid(Rgba::WHITE));

        let mut target = RecordingSurface::new(10.0, 10.0);
        source.replay(&mut target);
        assert_eq!(target.commands(), source.frame());
    }
}
