//! Rendering backend interface.
//!
//! The engine never draws pixels itself. [`draw_node`] and [`draw_edge`]
//! describe each entity as path commands on a [`Canvas`], in model-space
//! coordinates; the backend decides how those commands end up on screen.
//! [`SvgCanvas`] is the backend used by the command line preview.

mod svg;

pub use self::svg::SvgCanvas;

use std::f32::consts::{PI, TAU};

use linework_core::{
    geometry::{self, Bounds, Point},
    style::Style,
};

use crate::{
    edge::{ArrowType, Edge, EdgeStatus},
    node::{Node, NodeShape},
    optimizer::EdgeRenderOptimizer,
    selection::Selectable,
};

/// Corner radius of rounded rectangles, before clamping to the node size.
const CORNER_RADIUS: f32 = 8.0;

/// Length of arrow heads along the edge direction.
const ARROW_SIZE: f32 = 10.0;

/// Control point distance for a quarter ellipse drawn with one cubic curve.
const KAPPA: f32 = 0.552_284_8;

/// Opacity applied to disabled edges.
const DISABLED_OPACITY: f32 = 0.4;

/// A 2D drawing surface.
///
/// Path commands build up a current path; [`Canvas::stroke`] and
/// [`Canvas::fill`] paint it without clearing it, so a shape can be filled
/// and then outlined. [`Canvas::begin_path`] discards the current path.
pub trait Canvas {
    fn begin_path(&mut self);

    fn move_to(&mut self, point: Point);

    fn line_to(&mut self, point: Point);

    fn quadratic_to(&mut self, control: Point, end: Point);

    fn cubic_to(&mut self, control1: Point, control2: Point, end: Point);

    /// Circular arc around `center`, clockwise from `start_angle` to
    /// `end_angle` (radians, y axis pointing down). Draws a line to the
    /// arc start first when a path is in progress.
    fn arc(&mut self, center: Point, radius: f32, start_angle: f32, end_angle: f32);

    fn close_path(&mut self);

    /// Outlines the current path with the stroke of `style`.
    fn stroke(&mut self, style: &Style);

    /// Fills the current path with the fill of `style`. Does nothing for a style without fill.
    fn fill(&mut self, style: &Style);

    /// Draws `text` centered on `position`.
    fn text(&mut self, position: Point, text: &str, style: &Style);
}

/// Draws a node's shape and label. Hidden nodes draw nothing.
pub fn draw_node(canvas: &mut impl Canvas, node: &Node) {
    if !node.is_visible() {
        return;
    }

    let style = if node.is_selected() {
        node.style().highlighted()
    } else {
        node.style().clone()
    };

    canvas.begin_path();
    trace_shape(canvas, node.shape(), node.bounds());
    canvas.fill(&style);
    canvas.stroke(&style);

    if !node.label().is_empty() {
        canvas.text(node.center(), node.label(), &style);
    }
}

/// Draws an edge's path, arrow heads and labels.
///
/// Labels sit on the anchor `optimizer` picks for their position along the
/// path, shifted by their own offset. Returns false without drawing when the
/// edge has no computed path.
pub fn draw_edge(canvas: &mut impl Canvas, edge: &Edge, optimizer: &EdgeRenderOptimizer) -> bool {
    let Some(path) = edge.path() else {
        return false;
    };

    let style = edge_style(edge);
    let points = path.points();

    canvas.begin_path();
    canvas.move_to(points[0]);
    for point in &points[1..] {
        canvas.line_to(*point);
    }
    canvas.stroke(&style);

    let end_direction = path.tangent_at(1.0);
    draw_arrow(canvas, edge.end_arrow(), path.target(), end_direction, &style);
    let start_direction = path.tangent_at(0.0).scale(-1.0);
    draw_arrow(canvas, edge.start_arrow(), path.source(), start_direction, &style);

    for label in edge.labels() {
        if let Some(anchor) = optimizer.label_anchor(points, label.position()) {
            canvas.text(anchor.add_point(label.offset()), label.text(), &style);
        }
    }
    true
}

fn edge_style(edge: &Edge) -> Style {
    match edge.status() {
        EdgeStatus::Disabled => edge.style().clone().with_opacity(DISABLED_OPACITY),
        _ if edge.is_selected() => edge.style().highlighted(),
        EdgeStatus::Hover | EdgeStatus::Active => edge.style().highlighted(),
        EdgeStatus::Normal => edge.style().clone(),
    }
}

fn trace_shape(canvas: &mut impl Canvas, shape: NodeShape, bounds: Bounds) {
    match shape {
        NodeShape::Rectangle => trace_polygon(
            canvas,
            &[
                bounds.min_point(),
                Point::new(bounds.max_x(), bounds.min_y()),
                bounds.max_point(),
                Point::new(bounds.min_x(), bounds.max_y()),
            ],
        ),
        NodeShape::RoundedRectangle => trace_rounded_rectangle(canvas, bounds),
        NodeShape::Ellipse => trace_ellipse(canvas, bounds),
        NodeShape::Circle => {
            let half = bounds.half_extents();
            canvas.arc(bounds.center(), half.width().min(half.height()), 0.0, TAU);
            canvas.close_path();
        }
        NodeShape::Diamond => trace_polygon(canvas, &NodeShape::diamond_vertices(bounds)),
    }
}

fn trace_polygon(canvas: &mut impl Canvas, vertices: &[Point]) {
    let Some((first, rest)) = vertices.split_first() else {
        return;
    };
    canvas.move_to(*first);
    for vertex in rest {
        canvas.line_to(*vertex);
    }
    canvas.close_path();
}

fn trace_rounded_rectangle(canvas: &mut impl Canvas, bounds: Bounds) {
    let half = bounds.half_extents();
    let r = CORNER_RADIUS.min(half.width()).min(half.height());
    let (left, top, right, bottom) = (bounds.min_x(), bounds.min_y(), bounds.max_x(), bounds.max_y());

    canvas.move_to(Point::new(left + r, top));
    canvas.line_to(Point::new(right - r, top));
    canvas.quadratic_to(Point::new(right, top), Point::new(right, top + r));
    canvas.line_to(Point::new(right, bottom - r));
    canvas.quadratic_to(Point::new(right, bottom), Point::new(right - r, bottom));
    canvas.line_to(Point::new(left + r, bottom));
    canvas.quadratic_to(Point::new(left, bottom), Point::new(left, bottom - r));
    canvas.line_to(Point::new(left, top + r));
    canvas.quadratic_to(Point::new(left, top), Point::new(left + r, top));
    canvas.close_path();
}

fn trace_ellipse(canvas: &mut impl Canvas, bounds: Bounds) {
    let center = bounds.center();
    let half = bounds.half_extents();
    let (rx, ry) = (half.width(), half.height());
    let (kx, ky) = (rx * KAPPA, ry * KAPPA);
    let (cx, cy) = (center.x(), center.y());

    canvas.move_to(Point::new(cx + rx, cy));
    canvas.cubic_to(
        Point::new(cx + rx, cy + ky),
        Point::new(cx + kx, cy + ry),
        Point::new(cx, cy + ry),
    );
    canvas.cubic_to(
        Point::new(cx - kx, cy + ry),
        Point::new(cx - rx, cy + ky),
        Point::new(cx - rx, cy),
    );
    canvas.cubic_to(
        Point::new(cx - rx, cy - ky),
        Point::new(cx - kx, cy - ry),
        Point::new(cx, cy - ry),
    );
    canvas.cubic_to(
        Point::new(cx + kx, cy - ry),
        Point::new(cx + rx, cy - ky),
        Point::new(cx + rx, cy),
    );
    canvas.close_path();
}

/// Draws an arrow head whose tip is at `tip`, pointing along `direction`.
fn draw_arrow(
    canvas: &mut impl Canvas,
    arrow: ArrowType,
    tip: Point,
    direction: Point,
    style: &Style,
) {
    if arrow == ArrowType::None {
        return;
    }

    let direction = geometry::normalize_vector(direction);
    let normal = direction.perpendicular();
    let back = tip.sub_point(direction.scale(ARROW_SIZE));

    canvas.begin_path();
    match arrow {
        ArrowType::None => {}
        ArrowType::Arrow | ArrowType::FilledArrow => {
            let left = back.add_point(normal.scale(ARROW_SIZE / 2.0));
            let right = back.sub_point(normal.scale(ARROW_SIZE / 2.0));
            canvas.move_to(left);
            canvas.line_to(tip);
            canvas.line_to(right);
            if arrow.is_filled() {
                canvas.close_path();
            }
        }
        ArrowType::Circle | ArrowType::FilledCircle => {
            let center = tip.sub_point(direction.scale(ARROW_SIZE / 2.0));
            canvas.arc(center, ARROW_SIZE / 2.0, 0.0, TAU);
            canvas.close_path();
        }
        ArrowType::Diamond | ArrowType::FilledDiamond => {
            let middle = tip.sub_point(direction.scale(ARROW_SIZE / 2.0));
            trace_polygon(
                canvas,
                &[
                    tip,
                    middle.add_point(normal.scale(ARROW_SIZE / 3.0)),
                    back,
                    middle.sub_point(normal.scale(ARROW_SIZE / 3.0)),
                ],
            );
        }
    }

    if arrow.is_filled() {
        canvas.fill(&style.clone().with_fill(style.stroke()));
    }
    canvas.stroke(style);
}

/// Normalizes `angle` into `[0, 2π)`.
fn normalize_angle(angle: f32) -> f32 {
    let angle = angle % TAU;
    if angle < 0.0 { angle + TAU } else { angle }
}

/// Sweep of a clockwise arc, in `(0, 2π]` for a non-zero request.
fn arc_sweep(start_angle: f32, end_angle: f32) -> f32 {
    let delta = end_angle - start_angle;
    if delta.abs() >= TAU {
        return TAU;
    }
    let sweep = normalize_angle(delta);
    if sweep == 0.0 && delta != 0.0 { TAU } else { sweep }
}

fn point_on_circle(center: Point, radius: f32, angle: f32) -> Point {
    Point::new(
        center.x() + radius * angle.cos(),
        center.y() + radius * angle.sin(),
    )
}

/// Whether an arc of `sweep` radians needs the SVG large-arc flag.
fn is_large_arc(sweep: f32) -> bool {
    sweep > PI
}
