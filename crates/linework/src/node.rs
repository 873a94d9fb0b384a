//! Node entities and the node type registry.
//!
//! A [`Node`] is the live, mutable counterpart of a
//! [`NodeData`] record. Nodes are built by the
//! [`NodeFactory`], which resolves the node type through its registry of
//! [`NodeConstructor`]s.

mod factory;
mod registry;

pub use factory::{NodeFactory, ValidationResult};
pub use registry::{BuiltinNodeType, NodeConstructor, NodeDefaults, NodeTypeInfo};

use serde::{Deserialize, Serialize};

use linework_core::{
    geometry::{self, Bounds, Point, Size},
    identifier::Id,
    model::{NodeData, Properties},
    style::Style,
};

use crate::selection::{EntityKind, Selectable};

/// Outline of a node, used for hit testing and drawing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeShape {
    #[default]
    Rectangle,
    RoundedRectangle,
    Ellipse,
    Circle,
    Diamond,
}

impl NodeShape {
    /// Returns true if `point` is within `tolerance` of the shape inscribed in `bounds`.
    pub fn contains(self, bounds: Bounds, point: Point, tolerance: f32) -> bool {
        let center = bounds.center();
        let half = bounds.half_extents();
        match self {
            Self::Rectangle | Self::RoundedRectangle => {
                geometry::point_in_rectangle(point, bounds.expand(tolerance))
            }
            Self::Ellipse => geometry::point_in_ellipse(
                point,
                center,
                half.width() + tolerance,
                half.height() + tolerance,
            ),
            Self::Circle => {
                let radius = half.width().min(half.height());
                geometry::point_in_circle(point, center, radius + tolerance)
            }
            Self::Diamond => {
                let grown = bounds.expand(tolerance);
                geometry::point_in_polygon(point, &Self::diamond_vertices(grown))
            }
        }
    }

    /// Vertices of the diamond inscribed in `bounds`, clockwise from the top.
    pub fn diamond_vertices(bounds: Bounds) -> [Point; 4] {
        let center = bounds.center();
        [
            Point::new(center.x(), bounds.min_y()),
            Point::new(bounds.max_x(), center.y()),
            Point::new(center.x(), bounds.max_y()),
            Point::new(bounds.min_x(), center.y()),
        ]
    }
}

/// A node on the canvas.
///
/// The node owns its [`NodeData`]; position is the top-left corner of its
/// rectangle. Hidden nodes never hit-test, and locked nodes ignore moves and
/// resizes.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    data: NodeData,
    shape: NodeShape,
    selected: bool,
    visible: bool,
    locked: bool,
}

impl Node {
    pub fn new(data: NodeData, shape: NodeShape) -> Self {
        Self {
            data,
            shape,
            selected: false,
            visible: true,
            locked: false,
        }
    }

    pub fn id(&self) -> Id {
        self.data.id
    }

    pub fn node_type(&self) -> Id {
        self.data.node_type
    }

    pub fn data(&self) -> &NodeData {
        &self.data
    }

    pub fn into_data(self) -> NodeData {
        self.data
    }

    pub fn shape(&self) -> NodeShape {
        self.shape
    }

    pub fn label(&self) -> &str {
        &self.data.label
    }

    pub fn style(&self) -> &Style {
        &self.data.style
    }

    pub fn properties(&self) -> &Properties {
        &self.data.properties
    }

    pub fn properties_mut(&mut self) -> &mut Properties {
        &mut self.data.properties
    }

    pub fn position(&self) -> Point {
        self.data.position
    }

    pub fn size(&self) -> Size {
        self.data.size
    }

    pub fn bounds(&self) -> Bounds {
        self.data.bounds()
    }

    pub fn center(&self) -> Point {
        self.data.center()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    /// Moves the top-left corner to `position`. Returns false if the node is locked.
    pub fn move_to(&mut self, position: Point) -> bool {
        if self.locked {
            return false;
        }
        self.data.position = position;
        true
    }

    /// Moves the node by `offset`. Returns false if the node is locked.
    pub fn move_by(&mut self, offset: Point) -> bool {
        self.move_to(self.data.position.add_point(offset))
    }

    /// Sets a new size, clamping negative dimensions to zero. Returns false
    /// if the node is locked.
    pub fn resize(&mut self, size: Size) -> bool {
        if self.locked {
            return false;
        }
        self.data.size = Size::new(size.width().max(0.0), size.height().max(0.0));
        true
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.data.label = label.into();
    }

    pub fn set_style(&mut self, style: Style) {
        self.data.style = style;
    }
}

impl Selectable for Node {
    fn kind(&self) -> EntityKind {
        EntityKind::Node
    }

    fn id(&self) -> Id {
        self.data.id
    }

    fn select(&mut self) {
        self.selected = true;
    }

    fn deselect(&mut self) {
        self.selected = false;
    }

    fn is_selected(&self) -> bool {
        self.selected
    }

    fn hit_test(&self, point: Point, tolerance: f32) -> bool {
        self.visible && self.shape.contains(self.bounds(), point, tolerance)
    }

    fn bounds(&self) -> Option<Bounds> {
        Some(self.data.bounds())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(shape: NodeShape) -> Node {
        Node::new(
            NodeData {
                id: Id::new("n"),
                node_type: Id::new("process"),
                position: Point::new(0.0, 0.0),
                size: Size::new(100.0, 50.0),
                label: "Node".to_string(),
                style: Style::default(),
                properties: Properties::new(),
            },
            shape,
        )
    }

    #[test]
    fn test_rectangle_hit_test_uses_tolerance() {
        let node = node(NodeShape::Rectangle);

        assert!(node.hit_test(Point::new(100.0, 50.0), 0.0));
        assert!(node.hit_test(Point::new(103.0, 25.0), 5.0));
        assert!(!node.hit_test(Point::new(106.0, 25.0), 5.0));
    }

    #[test]
    fn test_ellipse_excludes_corners() {
        let node = node(NodeShape::Ellipse);

        assert!(node.hit_test(Point::new(50.0, 25.0), 0.0));
        assert!(!node.hit_test(Point::new(2.0, 2.0), 0.0));
    }

    #[test]
    fn test_circle_uses_smaller_dimension() {
        let node = node(NodeShape::Circle);

        assert!(node.hit_test(Point::new(50.0, 1.0), 0.0));
        assert!(!node.hit_test(Point::new(80.0, 25.0), 0.0));
    }

    #[test]
    fn test_diamond_excludes_corners() {
        let node = node(NodeShape::Diamond);

        assert!(node.hit_test(Point::new(50.0, 25.0), 0.0));
        assert!(node.hit_test(Point::new(90.0, 25.0), 0.0));
        assert!(!node.hit_test(Point::new(5.0, 5.0), 0.0));
    }

    #[test]
    fn test_hidden_node_never_hits() {
        let mut node = node(NodeShape::Rectangle);
        node.set_visible(false);
        assert!(!node.hit_test(Point::new(50.0, 25.0), 5.0));
    }

    #[test]
    fn test_locked_node_ignores_moves() {
        let mut node = node(NodeShape::Rectangle);

        assert!(node.move_by(Point::new(10.0, 5.0)));
        assert_eq!(node.position(), Point::new(10.0, 5.0));
        assert_eq!(node.center(), Point::new(60.0, 30.0));

        node.set_locked(true);
        assert!(!node.move_to(Point::new(0.0, 0.0)));
        assert!(!node.resize(Size::new(1.0, 1.0)));
        assert_eq!(node.position(), Point::new(10.0, 5.0));
        assert_eq!(node.size(), Size::new(100.0, 50.0));
    }

    #[test]
    fn test_resize_clamps_negative() {
        let mut node = node(NodeShape::Rectangle);
        node.resize(Size::new(-10.0, 30.0));
        assert_eq!(node.size(), Size::new(0.0, 30.0));
    }

    #[test]
    fn test_select_flag() {
        let mut node = node(NodeShape::Rectangle);
        assert!(!node.is_selected());
        node.select();
        assert!(node.is_selected());
        node.deselect();
        assert!(!node.is_selected());
    }
}
