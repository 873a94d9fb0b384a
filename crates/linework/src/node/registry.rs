//! Node type registry entries.
//!
//! Every node type is described by a [`NodeConstructor`]: it supplies the
//! defaults used to complete partial node data, the palette metadata shown by
//! the editor, and the construction of the live [`Node`]. The built-in types
//! are listed in [`BuiltinNodeType::ALL`].

use serde::Serialize;

use linework_core::{color::Color, geometry::Size, model::NodeData, style::Style};

use super::{Node, NodeShape};

/// Visual and size defaults of a node type.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeDefaults {
    size: Size,
    label: String,
    style: Style,
    shape: NodeShape,
}

impl NodeDefaults {
    pub fn new(size: Size, label: impl Into<String>, style: Style, shape: NodeShape) -> Self {
        Self {
            size,
            label: label.into(),
            style,
            shape,
        }
    }

    /// Defaults used for node types that have no registry entry.
    pub fn generic() -> Self {
        Self::new(
            Size::new(120.0, 60.0),
            "Node",
            Style::default(),
            NodeShape::Rectangle,
        )
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn shape(&self) -> NodeShape {
        self.shape
    }
}

/// Palette metadata of a node type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeTypeInfo {
    name: String,
    description: String,
    category: String,
    icon: String,
}

impl NodeTypeInfo {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            category: category.into(),
            icon: icon.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }
}

/// Registry entry for one node type.
pub trait NodeConstructor {
    /// Defaults used to complete partial node data of this type.
    fn defaults(&self) -> NodeDefaults;

    /// Palette metadata for the editor.
    fn info(&self) -> NodeTypeInfo;

    /// Builds the live node from complete data.
    fn construct(&self, data: NodeData) -> Node {
        Node::new(data, self.defaults().shape())
    }
}

/// A node type shipped with the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuiltinNodeType {
    key: &'static str,
    name: &'static str,
    description: &'static str,
    category: &'static str,
    icon: &'static str,
    width: f32,
    height: f32,
    label: &'static str,
    fill: &'static str,
    stroke: &'static str,
    shape: NodeShape,
}

impl BuiltinNodeType {
    /// Every built-in type, in palette order.
    pub const ALL: &'static [BuiltinNodeType] = &[
        Self {
            key: "start",
            name: "Start",
            description: "Entry point of the flow",
            category: "event",
            icon: "play",
            width: 60.0,
            height: 60.0,
            label: "Start",
            fill: "#ebfaeb",
            stroke: "#52c41a",
            shape: NodeShape::Circle,
        },
        Self {
            key: "end",
            name: "End",
            description: "Terminates the flow",
            category: "event",
            icon: "square",
            width: 60.0,
            height: 60.0,
            label: "End",
            fill: "#fde8e8",
            stroke: "#e54848",
            shape: NodeShape::Circle,
        },
        Self {
            key: "process",
            name: "Process",
            description: "A generic processing step",
            category: "task",
            icon: "settings",
            width: 120.0,
            height: 60.0,
            label: "Process",
            fill: "#f4f0ff",
            stroke: "#722ed1",
            shape: NodeShape::RoundedRectangle,
        },
        Self {
            key: "decision",
            name: "Decision",
            description: "Branches the flow on a yes/no question",
            category: "gateway",
            icon: "git-branch",
            width: 120.0,
            height: 80.0,
            label: "Decision",
            fill: "#fff9e6",
            stroke: "#faad14",
            shape: NodeShape::Diamond,
        },
        Self {
            key: "approval",
            name: "Approval",
            description: "Waits for an approver's decision",
            category: "task",
            icon: "check-square",
            width: 120.0,
            height: 60.0,
            label: "Approval",
            fill: "#e6f7ff",
            stroke: "#1890ff",
            shape: NodeShape::RoundedRectangle,
        },
        Self {
            key: "condition",
            name: "Condition",
            description: "Routes the flow by evaluating an expression",
            category: "gateway",
            icon: "help-circle",
            width: 120.0,
            height: 80.0,
            label: "Condition",
            fill: "#fff9e6",
            stroke: "#faad14",
            shape: NodeShape::Diamond,
        },
        Self {
            key: "user-task",
            name: "User Task",
            description: "Work performed by a person",
            category: "task",
            icon: "user",
            width: 120.0,
            height: 60.0,
            label: "User Task",
            fill: "#e6fffe",
            stroke: "#13c2c2",
            shape: NodeShape::RoundedRectangle,
        },
        Self {
            key: "service-task",
            name: "Service Task",
            description: "Work performed by an automated service",
            category: "task",
            icon: "cog",
            width: 120.0,
            height: 60.0,
            label: "Service Task",
            fill: "#fff0f8",
            stroke: "#eb2f96",
            shape: NodeShape::RoundedRectangle,
        },
        Self {
            key: "parallel-gateway",
            name: "Parallel Gateway",
            description: "Splits or joins parallel branches",
            category: "gateway",
            icon: "plus",
            width: 50.0,
            height: 50.0,
            label: "",
            fill: "#e6f7ff",
            stroke: "#1890ff",
            shape: NodeShape::Diamond,
        },
        Self {
            key: "exclusive-gateway",
            name: "Exclusive Gateway",
            description: "Takes exactly one of several branches",
            category: "gateway",
            icon: "x",
            width: 50.0,
            height: 50.0,
            label: "",
            fill: "#fde8e8",
            stroke: "#f5222d",
            shape: NodeShape::Diamond,
        },
    ];

    /// The registry key of this type.
    pub fn key(&self) -> &'static str {
        self.key
    }
}

impl NodeConstructor for BuiltinNodeType {
    fn defaults(&self) -> NodeDefaults {
        let style = Style::default()
            .with_fill(Color::constant(self.fill))
            .with_stroke(Color::constant(self.stroke));
        NodeDefaults::new(
            Size::new(self.width, self.height),
            self.label,
            style,
            self.shape,
        )
    }

    fn info(&self) -> NodeTypeInfo {
        NodeTypeInfo::new(self.name, self.description, self.category, self.icon)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_builtin_keys_are_unique() {
        let keys: HashSet<&str> = BuiltinNodeType::ALL.iter().map(|t| t.key()).collect();
        assert_eq!(keys.len(), BuiltinNodeType::ALL.len());
        assert_eq!(keys.len(), 10);
    }

    #[test]
    fn test_builtin_colors_parse() {
        for node_type in BuiltinNodeType::ALL {
            assert!(Color::new(node_type.fill).is_ok(), "{}", node_type.key);
            assert!(Color::new(node_type.stroke).is_ok(), "{}", node_type.key);
        }
    }

    #[test]
    fn test_process_defaults() {
        let process = BuiltinNodeType::ALL
            .iter()
            .find(|t| t.key() == "process")
            .unwrap();

        let defaults = process.defaults();
        assert_eq!(defaults.size(), Size::new(120.0, 60.0));
        assert_eq!(defaults.label(), "Process");
        assert_eq!(defaults.shape(), NodeShape::RoundedRectangle);
        assert_eq!(defaults.style().stroke(), Color::new("#722ed1").unwrap());
        assert_eq!(process.info().category(), "task");
    }
}
