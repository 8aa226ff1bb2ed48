//! Minimal SVG drawing primitives: enough vocabulary for the map layers
//! (polylines, circles, text with halo) serialized as an SVG 1.1 document.

use std::fmt::{self, Display, Write};

use serde::Deserialize;

/// An SVG color: a named keyword, an RGB triple, or an RGBA quadruple.
///
/// Deserializes from the three input shapes: `"red"`, `[r, g, b]`,
/// `[r, g, b, opacity]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Color {
    Named(String),
    Rgb(u8, u8, u8),
    Rgba(u8, u8, u8, f64),
}

impl Color {
    /// The `none` keyword, for shapes without a fill.
    pub fn none() -> Self {
        Color::Named("none".into())
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Named(name) => f.write_str(name),
            Color::Rgb(red, green, blue) => write!(f, "rgb({red},{green},{blue})"),
            Color::Rgba(red, green, blue, opacity) => {
                write!(f, "rgba({red},{green},{blue},{opacity})")
            }
        }
    }
}

/// A point on the canvas, in pixels, y growing downward.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineCap {
    Butt,
    Round,
    Square,
}

impl Display for LineCap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineCap::Butt => f.write_str("butt"),
            LineCap::Round => f.write_str("round"),
            LineCap::Square => f.write_str("square"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineJoin {
    Miter,
    Round,
    Bevel,
}

impl Display for LineJoin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineJoin::Miter => f.write_str("miter"),
            LineJoin::Round => f.write_str("round"),
            LineJoin::Bevel => f.write_str("bevel"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Polyline {
    points: Vec<Point>,
    fill: Option<Color>,
    stroke: Option<Color>,
    stroke_width: Option<f64>,
    line_cap: Option<LineCap>,
    line_join: Option<LineJoin>,
}

impl Polyline {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn point(mut self, point: Point) -> Self {
        self.points.push(point);
        self
    }

    pub fn fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    pub fn stroke(mut self, color: Color) -> Self {
        self.stroke = Some(color);
        self
    }

    pub fn stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = Some(width);
        self
    }

    pub fn line_cap(mut self, cap: LineCap) -> Self {
        self.line_cap = Some(cap);
        self
    }

    pub fn line_join(mut self, join: LineJoin) -> Self {
        self.line_join = Some(join);
        self
    }
}

impl Display for Polyline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<polyline points=\"")?;
        for (i, point) in self.points.iter().enumerate() {
            if i > 0 {
                f.write_char(' ')?;
            }
            write!(f, "{},{}", point.x, point.y)?;
        }
        f.write_char('"')?;
        write_paint_attrs(
            f,
            &self.fill,
            &self.stroke,
            self.stroke_width,
            self.line_cap,
            self.line_join,
        )?;
        f.write_str("/>")
    }
}

#[derive(Debug, Clone, Default)]
pub struct Circle {
    center: Point,
    radius: f64,
    fill: Option<Color>,
}

impl Circle {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn center(mut self, center: Point) -> Self {
        self.center = center;
        self
    }

    pub fn radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }
}

impl Display for Circle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"",
            self.center.x, self.center.y, self.radius
        )?;
        if let Some(fill) = &self.fill {
            write!(f, " fill=\"{fill}\"")?;
        }
        f.write_str("/>")
    }
}

#[derive(Debug, Clone, Default)]
pub struct Text {
    position: Point,
    offset: Point,
    font_size: u32,
    font_family: Option<String>,
    font_weight: Option<String>,
    content: String,
    fill: Option<Color>,
    stroke: Option<Color>,
    stroke_width: Option<f64>,
    line_cap: Option<LineCap>,
    line_join: Option<LineJoin>,
}

impl Text {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    /// Shift of the text anchor relative to `position`, emitted as dx/dy.
    pub fn offset(mut self, dx: f64, dy: f64) -> Self {
        self.offset = Point::new(dx, dy);
        self
    }

    pub fn font_size(mut self, size: u32) -> Self {
        self.font_size = size;
        self
    }

    pub fn font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    pub fn font_weight(mut self, weight: impl Into<String>) -> Self {
        self.font_weight = Some(weight.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    pub fn stroke(mut self, color: Color) -> Self {
        self.stroke = Some(color);
        self
    }

    pub fn stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = Some(width);
        self
    }

    pub fn line_cap(mut self, cap: LineCap) -> Self {
        self.line_cap = Some(cap);
        self
    }

    pub fn line_join(mut self, join: LineJoin) -> Self {
        self.line_join = Some(join);
        self
    }
}

impl Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<text")?;
        write_paint_attrs(
            f,
            &self.fill,
            &self.stroke,
            self.stroke_width,
            self.line_cap,
            self.line_join,
        )?;
        write!(
            f,
            " x=\"{}\" y=\"{}\" dx=\"{}\" dy=\"{}\" font-size=\"{}\"",
            self.position.x, self.position.y, self.offset.x, self.offset.y, self.font_size
        )?;
        if let Some(family) = &self.font_family {
            write!(f, " font-family=\"{family}\"")?;
        }
        if let Some(weight) = &self.font_weight {
            write!(f, " font-weight=\"{weight}\"")?;
        }
        f.write_char('>')?;
        write_escaped(f, &self.content)?;
        f.write_str("</text>")
    }
}

#[derive(Debug, Clone)]
pub enum Element {
    Polyline(Polyline),
    Circle(Circle),
    Text(Text),
}

impl From<Polyline> for Element {
    fn from(value: Polyline) -> Self {
        Element::Polyline(value)
    }
}

impl From<Circle> for Element {
    fn from(value: Circle) -> Self {
        Element::Circle(value)
    }
}

impl From<Text> for Element {
    fn from(value: Text) -> Self {
        Element::Text(value)
    }
}

impl Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Polyline(polyline) => polyline.fmt(f),
            Element::Circle(circle) => circle.fmt(f),
            Element::Text(text) => text.fmt(f),
        }
    }
}

/// An SVG document; elements render in push order, later elements on top.
#[derive(Debug, Clone, Default)]
pub struct Document {
    elements: Vec<Element>,
}

impl Document {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn push(&mut self, element: impl Into<Element>) {
        self.elements.push(element.into());
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" ?>\n");
        out.push_str("<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\">\n");
        for element in &self.elements {
            let _ = writeln!(out, "  {element}");
        }
        out.push_str("</svg>");
        out
    }
}

fn write_paint_attrs(
    f: &mut fmt::Formatter<'_>,
    fill: &Option<Color>,
    stroke: &Option<Color>,
    stroke_width: Option<f64>,
    line_cap: Option<LineCap>,
    line_join: Option<LineJoin>,
) -> fmt::Result {
    if let Some(fill) = fill {
        write!(f, " fill=\"{fill}\"")?;
    }
    if let Some(stroke) = stroke {
        write!(f, " stroke=\"{stroke}\"")?;
    }
    if let Some(width) = stroke_width {
        write!(f, " stroke-width=\"{width}\"")?;
    }
    if let Some(cap) = line_cap {
        write!(f, " stroke-linecap=\"{cap}\"")?;
    }
    if let Some(join) = line_join {
        write!(f, " stroke-linejoin=\"{join}\"")?;
    }
    Ok(())
}

fn write_escaped(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    for ch in text.chars() {
        match ch {
            '&' => f.write_str("&amp;")?,
            '<' => f.write_str("&lt;")?,
            '>' => f.write_str("&gt;")?,
            '"' => f.write_str("&quot;")?,
            '\'' => f.write_str("&apos;")?,
            _ => f.write_char(ch)?,
        }
    }
    Ok(())
}

#[test]
fn text_escaping_test() {
    let text = Text::new().content("Fish & <Chips>");
    assert_eq!(
        text.to_string(),
        "<text x=\"0\" y=\"0\" dx=\"0\" dy=\"0\" font-size=\"0\">Fish &amp; &lt;Chips&gt;</text>"
    );
}

#[test]
fn color_display_test() {
    assert_eq!(Color::Named("white".into()).to_string(), "white");
    assert_eq!(Color::Rgb(255, 160, 0).to_string(), "rgb(255,160,0)");
    assert_eq!(Color::Rgba(255, 160, 0, 0.85).to_string(), "rgba(255,160,0,0.85)");
}
