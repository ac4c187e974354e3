//! SVG surface.
//!
//! Produces resolution-independent markup. Coordinates are written in logical
//! pixels and the backing size becomes the `width`/`height` attributes, so the
//! device pixel ratio is carried by the `viewBox` rather than by the transform.

use super::{Paint, Surface, TextAlign, TextBaseline, TextStyle};
use crate::color::Rgba;
use crate::error::Result;
use crate::geometry::{Point, Rect};
use crate::render::arc_sweep;
use std::f64::consts::PI;
use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Vector surface producing SVG markup.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    logical: (f64, f64),
    pixels: (u32, u32),
    dpr: f64,
    defs: Vec<String>,
    elements: Vec<String>,
    path: String,
    current: Option<Point>,
    subpath_start: Option<Point>,
}

impl SvgSurface {
    /// Create an SVG surface of `width` x `height` logical pixels.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            logical: (width, height),
            pixels: (width.max(0.0).round() as u32, height.max(0.0).round() as u32),
            dpr: 1.0,
            defs: Vec::new(),
            elements: Vec::new(),
            path: String::new(),
            current: None,
            subpath_start: None,
        }
    }

    /// Report `dpr` as the device pixel ratio.
    #[must_use]
    pub fn with_device_pixel_ratio(mut self, dpr: f64) -> Self {
        self.dpr = dpr;
        self
    }

    /// Number of painted elements in the document.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Render to an SVG string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut svg = String::with_capacity(4096);

        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            self.pixels.0,
            self.pixels.1,
            num(self.logical.0),
            num(self.logical.1)
        );

        if !self.defs.is_empty() {
            svg.push_str("  <defs>\n");
            for def in &self.defs {
                let _ = writeln!(svg, "    {def}");
            }
            svg.push_str("  </defs>\n");
        }

        for element in &self.elements {
            let _ = writeln!(svg, "  {element}");
        }

        svg.push_str("</svg>\n");
        svg
    }

    /// Write to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(self.render().as_bytes())?;
        Ok(())
    }

    fn move_or_line(&mut self, p: Point) {
        let op = if self.current.is_some() { 'L' } else { 'M' };
        let _ = write!(self.path, "{op}{} {} ", num(p.x), num(p.y));
        if self.current.is_none() {
            self.subpath_start = Some(p);
        }
        self.current = Some(p);
    }

    fn fill_attr(&mut self, paint: &Paint) -> String {
        match *paint {
            Paint::Solid(color) => color_attrs("fill", "fill-opacity", color),
            Paint::LinearGradient { from, to, start, end } => {
                let id = format!("g{}", self.defs.len());
                self.defs.push(format!(
                    r#"<linearGradient id="{id}" gradientUnits="userSpaceOnUse" x1="{}" y1="{}" x2="{}" y2="{}"><stop offset="0" {}/><stop offset="1" {}/></linearGradient>"#,
                    num(from.x),
                    num(from.y),
                    num(to.x),
                    num(to.y),
                    color_attrs("stop-color", "stop-opacity", start),
                    color_attrs("stop-color", "stop-opacity", end),
                ));
                format!(r#"fill="url(#{id})""#)
            }
        }
    }
}

/// Format a coordinate with at most three decimals.
fn num(v: f64) -> String {
    format!("{}", (v * 1000.0).round() / 1000.0 + 0.0)
}

/// `name="rgb(..)"` plus a separate opacity attribute when translucent.
fn color_attrs(name: &str, opacity: &str, color: Rgba) -> String {
    let rgb = format!("rgb({},{},{})", color.r, color.g, color.b);
    if color.a == 255 {
        format!(r#"{name}="{rgb}""#)
    } else {
        format!(r#"{name}="{rgb}" {opacity}="{:.3}""#, f64::from(color.a) / 255.0)
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl Surface for SvgSurface {
    fn logical_size(&self) -> (f64, f64) {
        self.logical
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.dpr
    }

    fn resize(&mut self, logical: (f64, f64), pixels: (u32, u32)) {
        self.logical = logical;
        self.pixels = pixels;
    }

    fn set_scale(&mut self, _scale: f64) {}

    fn clear(&mut self) {
        self.defs.clear();
        self.elements.clear();
        self.begin_path();
    }

    fn begin_path(&mut self) {
        self.path.clear();
        self.current = None;
        self.subpath_start = None;
    }

    fn move_to(&mut self, x: f64, y: f64) {
        let p = Point::new(x, y);
        let _ = write!(self.path, "M{} {} ", num(x), num(y));
        self.current = Some(p);
        self.subpath_start = Some(p);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.move_or_line(Point::new(x, y));
    }

    fn bezier_to(&mut self, c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64) {
        if self.current.is_none() {
            self.move_to(c1x, c1y);
        }
        let _ = write!(
            self.path,
            "C{} {} {} {} {} {} ",
            num(c1x),
            num(c1y),
            num(c2x),
            num(c2y),
            num(x),
            num(y)
        );
        self.current = Some(Point::new(x, y));
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64, anticlockwise: bool) {
        let at = |angle: f64| Point::new(cx + radius * angle.cos(), cy + radius * angle.sin());
        self.move_or_line(at(start));

        let sweep = arc_sweep(start, end, anticlockwise);
        if radius <= 0.0 || sweep == 0.0 {
            return;
        }

        // Pieces of at most half a turn keep the large-arc flag unambiguous.
        let pieces = (sweep.abs() / PI).ceil().max(1.0) as usize;
        let sweep_flag = u8::from(sweep > 0.0);
        for k in 1..=pieces {
            let p = at(start + sweep * k as f64 / pieces as f64);
            let _ = write!(
                self.path,
                "A{r} {r} 0 0 {sweep_flag} {} {} ",
                num(p.x),
                num(p.y),
                r = num(radius)
            );
            self.current = Some(p);
        }
    }

    fn close_path(&mut self) {
        if self.current.is_some() {
            self.path.push_str("Z ");
            self.current = self.subpath_start;
        }
    }

    fn fill(&mut self, paint: &Paint) {
        if self.path.is_empty() {
            return;
        }
        let fill = self.fill_attr(paint);
        self.elements.push(format!(
            r#"<path d="{}" {fill} fill-rule="nonzero"/>"#,
            self.path.trim_end()
        ));
    }

    fn stroke(&mut self, color: Rgba, width: f64) {
        if self.path.is_empty() {
            return;
        }
        self.elements.push(format!(
            r#"<path d="{}" fill="none" {} stroke-width="{}" stroke-linejoin="round"/>"#,
            self.path.trim_end(),
            color_attrs("stroke", "stroke-opacity", color),
            num(width)
        ));
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.elements.push(format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" {}/>"#,
            num(rect.x),
            num(rect.y),
            num(rect.width),
            num(rect.height),
            color_attrs("fill", "fill-opacity", color)
        ));
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) {
        let anchor = match style.align {
            TextAlign::Left => "start",
            TextAlign::Center => "middle",
            TextAlign::Right => "end",
        };
        let baseline = match style.baseline {
            TextBaseline::Top => "hanging",
            TextBaseline::Middle => "middle",
            TextBaseline::Alphabetic => "alphabetic",
        };
        self.elements.push(format!(
            r#"<text x="{}" y="{}" font-size="{}" {} text-anchor="{anchor}" dominant-baseline="{baseline}" font-family="sans-serif">{}</text>"#,
            num(x),
            num(y),
            num(style.size),
            color_attrs("fill", "fill-opacity", style.color),
            escape(text)
        ));
    }
}
