//! SVG backend for [`Canvas`](super::Canvas).

use std::{f32::consts::PI, io, path::Path};

use log::debug;
use svg::{self, node::element as svg_element};

use linework_core::{
    geometry::{Bounds, Point},
    style::Style,
};

use super::{Canvas, arc_sweep, is_large_arc, point_on_circle};
use crate::error::LineworkError;

/// Space added around the drawn content.
const DEFAULT_MARGIN: f32 = 20.0;

/// Rough advance of one character, as a fraction of the font size.
const CHAR_WIDTH_RATIO: f32 = 0.6;

/// Canvas that collects drawing commands into an SVG document.
///
/// # Examples
///
/// ```
/// use linework::render::{Canvas, SvgCanvas};
/// use linework_core::{geometry::Point, style::Style};
///
/// let mut canvas = SvgCanvas::new();
/// canvas.move_to(Point::new(0.0, 0.0));
/// canvas.line_to(Point::new(100.0, 50.0));
/// canvas.stroke(&Style::edge_default());
///
/// let svg = canvas.to_svg_string();
/// assert!(svg.contains("M 0 0 L 100 50"));
/// ```
pub struct SvgCanvas {
    elements: Vec<Box<dyn svg::Node>>,
    path: Vec<String>,
    start: Option<Point>,
    current: Option<Point>,
    bounds: Option<Bounds>,
    margin: f32,
}

impl Default for SvgCanvas {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
            path: Vec::new(),
            start: None,
            current: None,
            bounds: None,
            margin: DEFAULT_MARGIN,
        }
    }
}

impl SvgCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin.max(0.0);
        self
    }

    /// Area covered by everything drawn so far, without the margin.
    pub fn content_bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Builds the document, sized to the content plus the margin.
    pub fn into_document(self) -> svg::Document {
        let view = self.bounds.unwrap_or_default().expand(self.margin);
        debug!(
            elements = self.elements.len(),
            width = view.width(),
            height = view.height();
            "Building SVG document"
        );

        let mut doc = svg::Document::new()
            .set(
                "viewBox",
                format!(
                    "{} {} {} {}",
                    view.min_x(),
                    view.min_y(),
                    view.width(),
                    view.height()
                ),
            )
            .set("width", view.width())
            .set("height", view.height());

        for element in self.elements {
            doc = doc.add(element);
        }
        doc
    }

    pub fn to_svg_string(self) -> String {
        self.into_document().to_string()
    }

    /// Writes the document to `writer`.
    pub fn write_to(self, writer: impl io::Write) -> Result<(), LineworkError> {
        svg::write(writer, &self.into_document()).map_err(|err| LineworkError::Export(Box::new(err)))
    }

    /// Writes the document to the file at `path`.
    pub fn save(self, path: impl AsRef<Path>) -> Result<(), LineworkError> {
        svg::save(path, &self.into_document()).map_err(|err| LineworkError::Export(Box::new(err)))
    }

    fn include(&mut self, point: Point) {
        let point_bounds = Bounds::from_corners(point, point);
        self.bounds = Some(match self.bounds {
            Some(bounds) => bounds.merge(&point_bounds),
            None => point_bounds,
        });
    }

    fn push_command(&mut self, command: String, end: Point) {
        self.path.push(command);
        self.current = Some(end);
    }

    fn path_data(&self) -> String {
        self.path.join(" ")
    }
}

impl Canvas for SvgCanvas {
    fn begin_path(&mut self) {
        self.path.clear();
        self.start = None;
        self.current = None;
    }

    fn move_to(&mut self, point: Point) {
        self.include(point);
        self.start = Some(point);
        self.push_command(format!("M {} {}", point.x(), point.y()), point);
    }

    fn line_to(&mut self, point: Point) {
        if self.current.is_none() {
            self.move_to(point);
            return;
        }
        self.include(point);
        self.push_command(format!("L {} {}", point.x(), point.y()), point);
    }

    fn quadratic_to(&mut self, control: Point, end: Point) {
        if self.current.is_none() {
            self.move_to(control);
        }
        self.include(control);
        self.include(end);
        self.push_command(
            format!("Q {} {} {} {}", control.x(), control.y(), end.x(), end.y()),
            end,
        );
    }

    fn cubic_to(&mut self, control1: Point, control2: Point, end: Point) {
        if self.current.is_none() {
            self.move_to(control1);
        }
        self.include(control1);
        self.include(control2);
        self.include(end);
        self.push_command(
            format!(
                "C {} {}, {} {}, {} {}",
                control1.x(),
                control1.y(),
                control2.x(),
                control2.y(),
                end.x(),
                end.y()
            ),
            end,
        );
    }

    fn arc(&mut self, center: Point, radius: f32, start_angle: f32, end_angle: f32) {
        let sweep = arc_sweep(start_angle, end_angle);
        if sweep == 0.0 || radius <= 0.0 {
            return;
        }

        let start = point_on_circle(center, radius, start_angle);
        if self.current.is_some() {
            self.line_to(start);
        } else {
            self.move_to(start);
        }
        self.include(Point::new(center.x() - radius, center.y() - radius));
        self.include(Point::new(center.x() + radius, center.y() + radius));

        // A single SVG arc cannot describe a full turn.
        let mut angle = start_angle;
        let mut remaining = sweep;
        while remaining > 0.0 {
            let step = remaining.min(PI);
            angle += step;
            remaining -= step;
            let end = point_on_circle(center, radius, angle);
            let large = u8::from(is_large_arc(step));
            self.push_command(
                format!("A {radius} {radius} 0 {large} 1 {} {}", end.x(), end.y()),
                end,
            );
        }
    }

    fn close_path(&mut self) {
        if self.path.is_empty() {
            return;
        }
        self.path.push("Z".to_string());
        self.current = self.start;
    }

    fn stroke(&mut self, style: &Style) {
        if self.path.is_empty() {
            return;
        }
        let path = svg_element::Path::new()
            .set("d", self.path_data())
            .set("fill", "none");
        self.elements.push(Box::new(apply_stroke(path, style)));
    }

    fn fill(&mut self, style: &Style) {
        let Some(fill) = style.fill() else {
            return;
        };
        if self.path.is_empty() {
            return;
        }
        let path = svg_element::Path::new()
            .set("d", self.path_data())
            .set("fill", fill.to_string())
            .set("fill-opacity", fill.alpha() * style.opacity())
            .set("stroke", "none");
        self.elements.push(Box::new(path));
    }

    fn text(&mut self, position: Point, text: &str, style: &Style) {
        let half_width = text.chars().count() as f32 * style.font_size() * CHAR_WIDTH_RATIO / 2.0;
        let half_height = style.font_size() / 2.0;
        self.include(Point::new(position.x() - half_width, position.y() - half_height));
        self.include(Point::new(position.x() + half_width, position.y() + half_height));

        let element = svg_element::Text::new(text)
            .set("x", position.x())
            .set("y", position.y())
            .set("text-anchor", "middle")
            .set("dominant-baseline", "middle")
            .set("font-family", "sans-serif")
            .set("font-size", style.font_size())
            .set("fill", style.font_color().to_string())
            .set("fill-opacity", style.font_color().alpha() * style.opacity());
        self.elements.push(Box::new(element));
    }
}

fn apply_stroke(path: svg_element::Path, style: &Style) -> svg_element::Path {
    let path = path
        .set("stroke", style.stroke().to_string())
        .set("stroke-opacity", style.stroke().alpha() * style.opacity())
        .set("stroke-width", style.stroke_width())
        .set("stroke-linecap", "round")
        .set("stroke-linejoin", "round");

    match style.stroke_style().dash_array() {
        Some(dash_array) => path.set("stroke-dasharray", dash_array),
        None => path,
    }
}
