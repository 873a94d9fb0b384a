//! Scene files: the nodes and edges the preview renders.
//!
//! A scene is TOML with `[[nodes]]` and `[[edges]]` tables:
//!
//! ```toml
//! [[nodes]]
//! id = "start"
//! type = "start"
//! label = "Start"
//! position = { x = 0, y = 0 }
//!
//! [[edges]]
//! id = "e1"
//! source = "start"
//! target = "review"
//! end_arrow = "filled-arrow"
//! ```

use std::io;

use serde::Deserialize;
use thiserror::Error;

use linework::{
    Diagram, LineworkError,
    edge::ArrowType,
    model::{EdgeData, NodeDraft},
};

/// Scene-related errors for CLI
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("Failed to parse scene: {0}")]
    Parse(String),
}

impl From<SceneError> for LineworkError {
    fn from(err: SceneError) -> Self {
        LineworkError::Io(io::Error::new(io::ErrorKind::InvalidData, err.to_string()))
    }
}

/// An edge record plus its end markers.
#[derive(Debug, Clone, Deserialize)]
pub struct SceneEdge {
    #[serde(flatten)]
    pub data: EdgeData,
    #[serde(default)]
    pub start_arrow: Option<ArrowType>,
    #[serde(default)]
    pub end_arrow: Option<ArrowType>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Scene {
    pub nodes: Vec<NodeDraft>,
    pub edges: Vec<SceneEdge>,
}

impl Scene {
    /// Parses a scene from TOML source.
    pub fn parse(source: &str) -> Result<Self, SceneError> {
        toml::from_str(source).map_err(|e| SceneError::Parse(e.to_string()))
    }

    /// Splits the scene into node drafts and edge records for the builder.
    pub fn records(&self) -> (Vec<NodeDraft>, Vec<EdgeData>) {
        let edges = self.edges.iter().map(|edge| edge.data.clone()).collect();
        (self.nodes.clone(), edges)
    }

    /// Applies the scene's arrow settings to the built edges.
    pub fn apply_arrows(&self, diagram: &Diagram) {
        for scene_edge in &self.edges {
            let Some(edge) = diagram.edge(scene_edge.data.id) else {
                continue;
            };
            let mut edge = edge.borrow_mut();
            if let Some(arrow) = scene_edge.start_arrow {
                edge.set_start_arrow(arrow);
            }
            if let Some(arrow) = scene_edge.end_arrow {
                edge.set_end_arrow(arrow);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use linework::{geometry::Point, model::EdgeType};

    use super::*;

    const SCENE: &str = r##"
        [[nodes]]
        id = "start"
        type = "start"
        label = "Start"
        position = { x = 0, y = 0 }

        [[nodes]]
        id = "review"
        type = "process"
        label = "Review"
        position = { x = 200, y = 0 }
        style = { fill = "#ffeeee" }

        [[edges]]
        id = "e1"
        type = "bezier"
        source = "start"
        target = "review"
        label = "go"
        start_arrow = "circle"
        waypoints = [{ x = 100, y = 40 }]
    "##;

    #[test]
    fn test_parse_scene() {
        let scene = Scene::parse(SCENE).unwrap();

        assert_eq!(scene.nodes.len(), 2);
        assert_eq!(scene.nodes[1].position, Some(Point::new(200.0, 0.0)));
        assert!(scene.nodes[1].style.is_some());
        assert!(scene.nodes[0].style.is_none());

        let edge = &scene.edges[0];
        assert_eq!(edge.data.edge_type, Some(EdgeType::Bezier));
        assert_eq!(edge.data.label.as_deref(), Some("go"));
        assert_eq!(edge.data.waypoints, vec![Point::new(100.0, 40.0)]);
        assert_eq!(edge.start_arrow, Some(ArrowType::Circle));
        assert_eq!(edge.end_arrow, None);
    }

    #[test]
    fn test_empty_scene() {
        let scene = Scene::parse("").unwrap();
        assert!(scene.nodes.is_empty());
        assert!(scene.edges.is_empty());
    }

    #[test]
    fn test_edge_without_endpoints_is_rejected() {
        let err = Scene::parse("[[edges]]\nid = \"e1\"\n").unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse scene"));
    }
}
