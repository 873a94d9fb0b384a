//! Assembled diagrams: nodes and edges built from shell data.

use std::{cell::RefCell, path::Path, rc::Rc};

use log::{debug, info, warn};

use linework_core::{
    geometry::Bounds,
    identifier::Id,
    model::{EdgeData, NodeDraft},
};

use crate::{
    config::{AppConfig, InteractionConfig},
    edge::Edge,
    error::LineworkError,
    node::{Node, NodeFactory},
    optimizer::EdgeRenderOptimizer,
    render::{self, SvgCanvas},
    selection::SelectionManager,
};

/// Nodes and edges shared with the shell.
///
/// Entities are reference counted so the same collections can be handed to
/// a [`SelectionManager`].
#[derive(Debug, Default)]
pub struct Diagram {
    nodes: Vec<Rc<RefCell<Node>>>,
    edges: Vec<Rc<RefCell<Edge>>>,
}

impl Diagram {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self {
            nodes: nodes.into_iter().map(|n| Rc::new(RefCell::new(n))).collect(),
            edges: edges.into_iter().map(|e| Rc::new(RefCell::new(e))).collect(),
        }
    }

    pub fn nodes(&self) -> &[Rc<RefCell<Node>>] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Rc<RefCell<Edge>>] {
        &self.edges
    }

    pub fn node(&self, id: impl Into<Id>) -> Option<Rc<RefCell<Node>>> {
        let id = id.into();
        self.nodes.iter().find(|n| n.borrow().id() == id).cloned()
    }

    pub fn edge(&self, id: impl Into<Id>) -> Option<Rc<RefCell<Edge>>> {
        let id = id.into();
        self.edges.iter().find(|e| e.borrow().id() == id).cloned()
    }

    /// Creates a selection manager over this diagram's nodes and edges.
    pub fn selection_manager(&self, config: &InteractionConfig) -> SelectionManager {
        let mut manager = SelectionManager::with_config(config);
        manager.set_selectable_nodes(self.nodes.clone());
        manager.set_selectable_edges(self.edges.clone());
        manager
    }

    /// Computes the path of every edge between its nodes' perimeters.
    ///
    /// Waypoints take precedence, then an explicit edge type; an edge with
    /// neither follows the optimizer's routing strategy. Each end attaches
    /// where the line toward the other node (or the nearest waypoint) leaves
    /// the node rectangle. Edges whose nodes are missing are skipped.
    /// Returns the number of routed edges.
    pub fn route_edges(&self, optimizer: &EdgeRenderOptimizer) -> usize {
        let mut routed = 0;
        for edge in &self.edges {
            let mut edge = edge.borrow_mut();
            let (Some(source), Some(target)) = (self.node(edge.source()), self.node(edge.target()))
            else {
                warn!(
                    edge_id:% = edge.id(),
                    source:% = edge.source(),
                    target:% = edge.target();
                    "Skipping edge with unknown endpoint"
                );
                continue;
            };

            let source_bounds = source.borrow().bounds();
            let target_bounds = target.borrow().bounds();
            if edge.waypoints().is_empty() && edge.edge_type().is_none() {
                let points = optimizer.compute_path(source_bounds, target_bounds);
                if edge.set_routed_path(points).is_some() {
                    routed += 1;
                }
                continue;
            }

            let source_toward = edge
                .waypoints()
                .first()
                .copied()
                .unwrap_or(target_bounds.center());
            let target_toward = edge
                .waypoints()
                .last()
                .copied()
                .unwrap_or(source_bounds.center());

            let start = optimizer.connection_point(source_bounds, source_toward);
            let end = optimizer.connection_point(target_bounds, target_toward);
            edge.calculate_path(start, end);
            routed += 1;
        }
        debug!(routed, total = self.edges.len(); "Edges routed");
        routed
    }

    /// Area covered by all visible nodes and routed edges.
    pub fn bounds(&self) -> Option<Bounds> {
        let nodes = self
            .nodes
            .iter()
            .map(|n| n.borrow())
            .filter(|n| n.is_visible())
            .map(|n| n.bounds());
        let edges = self
            .edges
            .iter()
            .filter_map(|e| e.borrow().path().map(|path| path.bounds()));
        nodes.chain(edges).reduce(|acc, b| acc.merge(&b))
    }

    /// Draws every node, then every routed edge, on `canvas`.
    pub fn draw(&self, canvas: &mut impl render::Canvas, optimizer: &EdgeRenderOptimizer) {
        for node in &self.nodes {
            render::draw_node(canvas, &node.borrow());
        }
        for edge in &self.edges {
            render::draw_edge(canvas, &edge.borrow(), optimizer);
        }
    }
}

/// Builds and renders diagrams from node drafts and edge records.
///
/// # Examples
///
/// ```
/// use linework::{DiagramBuilder, config::AppConfig};
/// use linework_core::{geometry::Point, model::{EdgeData, NodeDraft}};
///
/// let mut builder = DiagramBuilder::new(AppConfig::default());
/// let nodes = vec![
///     NodeDraft::new()
///         .with_id("a")
///         .with_type("start")
///         .with_position(Point::new(0.0, 0.0))
///         .with_label("Start"),
///     NodeDraft::new()
///         .with_id("b")
///         .with_type("end")
///         .with_position(Point::new(300.0, 0.0))
///         .with_label("End"),
/// ];
/// let edges = vec![EdgeData::new("e1", "a", "b")];
///
/// let diagram = builder.build(nodes, edges).unwrap();
/// assert!(diagram.edges()[0].borrow().path().is_some());
///
/// let svg = builder.render_svg(&diagram);
/// assert!(svg.starts_with("<svg"));
/// ```
#[derive(Default)]
pub struct DiagramBuilder {
    config: AppConfig,
    factory: NodeFactory,
}

impl DiagramBuilder {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            factory: NodeFactory::new(),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The factory used to create nodes, for registering custom node types.
    pub fn factory_mut(&mut self) -> &mut NodeFactory {
        &mut self.factory
    }

    /// Creates the nodes and edges and routes every edge.
    ///
    /// Node positions are snapped to the grid when the interaction settings
    /// enable snapping. Malformed node drafts are skipped by the factory;
    /// edges referring to skipped nodes stay unrouted.
    ///
    /// # Errors
    ///
    /// Returns [`LineworkError::Config`] if the configuration is invalid.
    pub fn build(
        &mut self,
        nodes: impl IntoIterator<Item = NodeDraft>,
        edges: impl IntoIterator<Item = EdgeData>,
    ) -> Result<Diagram, LineworkError> {
        self.config.validate()?;

        let interaction = self.config.interaction();
        let nodes = self.factory.create_nodes(nodes.into_iter().map(|mut draft| {
            draft.position = draft.position.map(|p| interaction.snap_point(p));
            draft
        }));
        let routing = self.config.routing();
        let edges = edges
            .into_iter()
            .map(|data| Edge::with_routing(data, routing))
            .collect();
        let diagram = Diagram::new(nodes, edges);

        let routed = diagram.route_edges(&self.optimizer());
        info!(
            nodes = diagram.nodes().len(),
            edges = diagram.edges().len(),
            routed;
            "Diagram built"
        );
        Ok(diagram)
    }

    /// Render optimizer configured from the routing settings.
    pub fn optimizer(&self) -> EdgeRenderOptimizer {
        EdgeRenderOptimizer::from_config(self.config.routing())
    }

    /// Renders the diagram to an SVG string.
    pub fn render_svg(&self, diagram: &Diagram) -> String {
        let mut canvas = SvgCanvas::new();
        diagram.draw(&mut canvas, &self.optimizer());
        canvas.to_svg_string()
    }

    /// Renders the diagram to an SVG file at `path`.
    pub fn write_svg(&self, diagram: &Diagram, path: impl AsRef<Path>) -> Result<(), LineworkError> {
        let mut canvas = SvgCanvas::new();
        diagram.draw(&mut canvas, &self.optimizer());
        info!(path:? = path.as_ref(); "Writing SVG");
        canvas.save(path)
    }
}

#[cfg(test)]
mod tests {
    use linework_core::{geometry::Point, model::EdgeType};

    use super::*;
    use crate::{config::RoutingConfig, optimizer::RoutingStrategy};

    fn draft(id: &str, node_type: &str, x: f32, y: f32) -> NodeDraft {
        NodeDraft::new()
            .with_id(id)
            .with_type(node_type)
            .with_position(Point::new(x, y))
            .with_label(id)
    }

    #[test]
    fn test_build_routes_between_perimeters() {
        let mut builder = DiagramBuilder::default();
        let diagram = builder
            .build(
                [draft("a", "process", 0.0, 0.0), draft("b", "process", 300.0, 0.0)],
                [EdgeData::new("e1", "a", "b").with_type(EdgeType::Straight)],
            )
            .unwrap();

        let edge = diagram.edge("e1").unwrap();
        let edge = edge.borrow();
        let path = edge.path().unwrap();
        assert_eq!(path.source(), Point::new(120.0, 30.0));
        assert_eq!(path.target(), Point::new(300.0, 30.0));
    }

    fn routed_points(strategy: RoutingStrategy, edge: EdgeData) -> Vec<Point> {
        let config = AppConfig::new(
            RoutingConfig::default().with_strategy(strategy),
            InteractionConfig::default(),
        );
        let mut builder = DiagramBuilder::new(config);
        let diagram = builder
            .build(
                [draft("a", "process", 0.0, 0.0), draft("b", "process", 300.0, 240.0)],
                [edge],
            )
            .unwrap();

        let edge = diagram.edges()[0].borrow();
        edge.path().unwrap().points().to_vec()
    }

    #[test]
    fn test_untyped_edges_follow_configured_strategy() {
        let untyped = EdgeData::new("e1", "a", "b");

        let straight = routed_points(RoutingStrategy::Straight, untyped.clone());
        let curved = routed_points(RoutingStrategy::Curved, untyped.clone());
        let orthogonal = routed_points(RoutingStrategy::Orthogonal, untyped);

        assert_eq!(straight.len(), 2);
        assert_eq!(curved.len(), 4);
        assert_ne!(straight, curved);
        assert_ne!(curved, orthogonal);
        assert_eq!(straight.first(), curved.first());
        assert_eq!(straight.last(), curved.last());
    }

    #[test]
    fn test_explicit_edge_type_wins_over_strategy() {
        let typed = EdgeData::new("e1", "a", "b").with_type(EdgeType::Straight);
        assert_eq!(routed_points(RoutingStrategy::Curved, typed).len(), 2);

        let waypoints = EdgeData::new("e1", "a", "b").with_waypoints(vec![Point::new(200.0, 30.0)]);
        let points = routed_points(RoutingStrategy::Curved, waypoints);
        assert_eq!(points.len(), 3);
        assert_eq!(points[1], Point::new(200.0, 30.0));
    }

    #[test]
    fn test_unknown_endpoint_stays_dirty() {
        let mut builder = DiagramBuilder::default();
        let diagram = builder
            .build(
                [draft("a", "process", 0.0, 0.0)],
                [EdgeData::new("e1", "a", "missing")],
            )
            .unwrap();

        assert!(diagram.edge("e1").unwrap().borrow().is_dirty());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = AppConfig::new(
            RoutingConfig::default().with_min_distance(-1.0),
            InteractionConfig::default(),
        );
        let mut builder = DiagramBuilder::new(config);
        let result = builder.build(Vec::<NodeDraft>::new(), Vec::<EdgeData>::new());
        assert!(matches!(result, Err(LineworkError::Config(_))));
    }

    #[test]
    fn test_bounds_and_selection_manager() {
        let mut builder = DiagramBuilder::default();
        let diagram = builder
            .build(
                [draft("a", "process", 0.0, 0.0), draft("b", "process", 300.0, 100.0)],
                Vec::<EdgeData>::new(),
            )
            .unwrap();

        let bounds = diagram.bounds().unwrap();
        assert_eq!(bounds.max_point(), Point::new(420.0, 160.0));

        let mut selection = diagram.selection_manager(builder.config().interaction());
        selection.select_all();
        assert_eq!(selection.len(), 2);
    }

    #[test]
    fn test_build_snaps_positions() {
        let config = AppConfig::new(
            RoutingConfig::default(),
            InteractionConfig::default().with_snap_to_grid(true, 10.0),
        );
        let mut builder = DiagramBuilder::new(config);
        let diagram = builder
            .build([draft("a", "process", 12.0, 17.0)], Vec::<EdgeData>::new())
            .unwrap();

        let node = diagram.node("a").unwrap();
        assert_eq!(node.borrow().position(), Point::new(10.0, 20.0));
    }
}
