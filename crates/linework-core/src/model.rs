//! Diagram data model exchanged with the editor shell.
//!
//! These are plain records: the shell's data source produces them (or the
//! node factory fills them in), and the live entities in the `linework`
//! crate are built from them.
//!
//! - [`NodeData`] - a complete node record
//! - [`NodeDraft`] - a possibly incomplete node record, as submitted to the
//!   factory or to validation
//! - [`EdgeData`] - a connector record
//! - [`PropertyValue`] / [`Properties`] - free-form user properties

use std::{fmt, str::FromStr};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    geometry::{Bounds, Point, Size},
    identifier::Id,
    style::Style,
};

/// A free-form property value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Ordered property map; iteration follows insertion order.
pub type Properties = IndexMap<String, PropertyValue>;

/// A complete node record.
///
/// `position` is the **top-left** corner of the node's rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    pub id: Id,
    #[serde(rename = "type")]
    pub node_type: Id,
    pub position: Point,
    pub size: Size,
    pub label: String,
    #[serde(default)]
    pub style: Style,
    #[serde(default)]
    pub properties: Properties,
}

impl NodeData {
    /// The node's rectangle
    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_top_left(self.position, self.size)
    }

    /// Center of the node's rectangle
    pub fn center(&self) -> Point {
        self.bounds().center()
    }
}

/// A node record whose fields may be missing.
///
/// The factory fills missing fields from the node type defaults;
/// validation reports which required fields are absent.
///
/// # Examples
///
/// ```
/// use linework_core::{geometry::Point, model::NodeDraft};
///
/// let draft = NodeDraft::new()
///     .with_type("process")
///     .with_position(Point::new(10.0, 20.0))
///     .with_label("Review");
/// assert_eq!(draft.label.as_deref(), Some("Review"));
/// assert!(draft.id.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeDraft {
    pub id: Option<Id>,
    #[serde(rename = "type")]
    pub node_type: Option<Id>,
    pub position: Option<Point>,
    pub size: Option<Size>,
    pub label: Option<String>,
    pub style: Option<Style>,
    pub properties: Properties,
}

impl NodeDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<Id>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_type(mut self, node_type: impl Into<Id>) -> Self {
        self.node_type = Some(node_type.into());
        self
    }

    pub fn with_position(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

impl From<NodeData> for NodeDraft {
    fn from(data: NodeData) -> Self {
        Self {
            id: Some(data.id),
            node_type: Some(data.node_type),
            position: Some(data.position),
            size: Some(data.size),
            label: Some(data.label),
            style: Some(data.style),
            properties: data.properties,
        }
    }
}

/// Routing flavour of a connector when it has no explicit waypoints.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeType {
    Straight,
    #[default]
    Orthogonal,
    Bezier,
}

impl FromStr for EdgeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "straight" => Ok(Self::Straight),
            "orthogonal" => Ok(Self::Orthogonal),
            "bezier" => Ok(Self::Bezier),
            _ => Err(format!("invalid edge type `{s}`")),
        }
    }
}

impl fmt::Display for EdgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Straight => "straight",
            Self::Orthogonal => "orthogonal",
            Self::Bezier => "bezier",
        })
    }
}

/// A connector record.
///
/// `source` and `target` are node ids; the data source guarantees they
/// exist before an edge entity is built from this record. Without an
/// `edge_type` the diagram's routing strategy shapes the edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeData {
    pub id: Id,
    #[serde(rename = "type", default)]
    pub edge_type: Option<EdgeType>,
    pub source: Id,
    pub target: Id,
    #[serde(default)]
    pub source_port: Option<Id>,
    #[serde(default)]
    pub target_port: Option<Id>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default = "Style::edge_default")]
    pub style: Style,
    #[serde(default)]
    pub properties: Properties,
    #[serde(default)]
    pub waypoints: Vec<Point>,
}

impl EdgeData {
    /// Creates an untyped edge record with default style and no waypoints.
    pub fn new(id: impl Into<Id>, source: impl Into<Id>, target: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            edge_type: None,
            source: source.into(),
            target: target.into(),
            source_port: None,
            target_port: None,
            label: None,
            style: Style::edge_default(),
            properties: Properties::new(),
            waypoints: Vec::new(),
        }
    }

    pub fn with_type(mut self, edge_type: EdgeType) -> Self {
        self.edge_type = Some(edge_type);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_waypoints(mut self, waypoints: Vec<Point>) -> Self {
        self.waypoints = waypoints;
        self
    }
}
