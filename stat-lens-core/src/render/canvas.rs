use std::fmt::{self, Write as FmtWrite};

const FONT_FAMILY: &str = "DejaVu Sans, sans-serif";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn with_alpha(mut self, a: f64) -> Self {
        self.a = a;
        self
    }

    fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Fill {
    pub color: Color,
    pub stroke: Option<Color>,
    pub stroke_width: f64,
}

impl Fill {
    pub fn solid(color: Color) -> Self {
        Self { color, stroke: None, stroke_width: 0.0 }
    }
    pub fn outlined(color: Color, stroke: Color, stroke_width: f64) -> Self {
        Self { color, stroke: Some(stroke), stroke_width }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
    pub dash: Option<(f64, f64)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    fn as_str(self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

/// Immediate-mode SVG builder. One canvas per chart; nothing is shared
/// between renders.
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    body: String,
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, body: String::new() }
    }

    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: &Fill) {
        let _ = write!(
            self.body,
            r#"<rect x="{x:.2}" y="{y:.2}" width="{:.2}" height="{:.2}" fill="{}" fill-opacity="{:.3}""#,
            w.max(0.0),
            h.max(0.0),
            fill.color,
            fill.color.a,
        );
        if let Some(stroke) = fill.stroke {
            let _ = write!(
                self.body,
                r#" stroke="{stroke}" stroke-opacity="{:.3}" stroke-width="{:.2}""#,
                stroke.a, fill.stroke_width,
            );
        }
        self.body.push_str("/>\n");
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: &Stroke) {
        let _ = write!(
            self.body,
            r#"<line x1="{x1:.2}" y1="{y1:.2}" x2="{x2:.2}" y2="{y2:.2}" stroke="{}" stroke-opacity="{:.3}" stroke-width="{:.2}""#,
            stroke.color,
            stroke.color.a,
            stroke.width,
        );
        if let Some((on, off)) = stroke.dash {
            let _ = write!(self.body, r#" stroke-dasharray="{on:.1},{off:.1}""#);
        }
        self.body.push_str("/>\n");
    }

    pub fn text(&mut self, x: f64, y: f64, content: &str, size: f64, anchor: Anchor) {
        let _ = writeln!(
            self.body,
            r#"<text x="{x:.2}" y="{y:.2}" font-family="{FONT_FAMILY}" font-size="{size:.1}" text-anchor="{}" fill="black">{}</text>"#,
            anchor.as_str(),
            escape(content),
        );
    }

    /// Text rotated -90° around its anchor point (vertical axis labels).
    pub fn text_vertical(&mut self, x: f64, y: f64, content: &str, size: f64) {
        let _ = writeln!(
            self.body,
            r#"<text x="{x:.2}" y="{y:.2}" font-family="{FONT_FAMILY}" font-size="{size:.1}" text-anchor="middle" fill="black" transform="rotate(-90 {x:.2} {y:.2})">{}</text>"#,
            escape(content),
        );
    }

    pub fn finish(self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n<rect width=\"{w}\" height=\"{h}\" fill=\"white\"/>\n{}</svg>\n",
            self.body,
            w = self.width,
            h = self.height,
        )
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(escape("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }

    #[test]
    fn rect_carries_opacity_and_stroke() {
        let mut c = Canvas::new(10.0, 10.0);
        let bar = Fill::outlined(Color::rgb(135, 206, 235).with_alpha(0.7), Color::BLACK, 1.0);
        c.rect(1.0, 2.0, 3.0, 4.0, &bar);
        let svg = c.finish();
        assert!(svg.contains(r##"fill="#87ceeb" fill-opacity="0.700""##));
        assert!(svg.contains(r##"stroke="#000000""##));
        assert!(svg.starts_with("<svg"));
    }

    #[test]
    fn negative_sizes_clamp_to_zero() {
        let mut c = Canvas::new(10.0, 10.0);
        c.rect(0.0, 0.0, -3.0, 2.0, &Fill::solid(Color::WHITE));
        assert!(c.finish().contains(r#"width="0.00""#));
    }

    #[test]
    fn dashed_line() {
        let mut c = Canvas::new(10.0, 10.0);
        let dashed = Stroke { color: Color::rgb(255, 0, 0), width: 2.0, dash: Some((6.0, 4.0)) };
        c.line(0.0, 0.0, 0.0, 5.0, &dashed);
        assert!(c.finish().contains(r#"stroke-dasharray="6.0,4.0""#));
    }
}
