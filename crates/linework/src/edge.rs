//! Edge entities and the edge path engine.
//!
//! An [`Edge`] connects two nodes. Its geometry is an [`EdgePath`] cached in
//! an explicit [`PathState`]: every mutation of waypoints, endpoints or
//! routing parameters marks the path dirty, and only
//! [`Edge::calculate_path`] or [`Edge::set_routed_path`] makes it clean
//! again. Geometry queries on a
//! dirty edge answer "nothing" rather than using stale points.

mod path;
pub mod routing;

pub use path::{EdgePath, SegmentInfo};

use std::{fmt, str::FromStr};

use log::trace;
use serde::{Deserialize, Serialize};

use linework_core::{
    geometry::{self, Bounds, Point},
    identifier::{Id, IdGenerator},
    model::{EdgeData, EdgeType, Properties},
    style::Style,
};

use crate::{
    config::RoutingConfig,
    selection::{EntityKind, Selectable},
};

/// Prefix of generated edge ids.
const EDGE_ID_PREFIX: &str = "edge";

/// Default perpendicular offset above which orthogonal routes get corners.
const DEFAULT_MIN_SEGMENT_LENGTH: f32 = 20.0;

/// Marker drawn at an end of an edge.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArrowType {
    #[default]
    None,
    Arrow,
    FilledArrow,
    Circle,
    FilledCircle,
    Diamond,
    FilledDiamond,
}

impl ArrowType {
    /// Returns true if the marker is drawn solid.
    pub fn is_filled(self) -> bool {
        matches!(
            self,
            Self::FilledArrow | Self::FilledCircle | Self::FilledDiamond
        )
    }
}

impl FromStr for ArrowType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "arrow" => Ok(Self::Arrow),
            "filled-arrow" => Ok(Self::FilledArrow),
            "circle" => Ok(Self::Circle),
            "filled-circle" => Ok(Self::FilledCircle),
            "diamond" => Ok(Self::Diamond),
            "filled-diamond" => Ok(Self::FilledDiamond),
            _ => Err(format!("invalid arrow type `{s}`")),
        }
    }
}

impl fmt::Display for ArrowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::Arrow => "arrow",
            Self::FilledArrow => "filled-arrow",
            Self::Circle => "circle",
            Self::FilledCircle => "filled-circle",
            Self::Diamond => "diamond",
            Self::FilledDiamond => "filled-diamond",
        })
    }
}

/// Interaction state of an edge.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeStatus {
    #[default]
    Normal,
    Hover,
    Active,
    Disabled,
}

/// Text attached to an edge.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeLabel {
    text: String,
    position: f32,
    offset: Point,
}

impl EdgeLabel {
    /// Creates a label at `position` along the path, clamped to `[0, 1]`.
    pub fn new(text: impl Into<String>, position: f32) -> Self {
        Self {
            text: text.into(),
            position: position.clamp(0.0, 1.0),
            offset: Point::default(),
        }
    }

    /// Moves the label away from its anchor on the path.
    pub fn with_offset(mut self, offset: Point) -> Self {
        self.offset = offset;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Position along the path as a fraction of its length.
    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn offset(&self) -> Point {
        self.offset
    }
}

/// State of an edge's cached geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathState<'a> {
    /// Waypoints, endpoints or routing parameters changed since the last computation.
    Dirty,
    /// The path matches the edge's current parameters.
    Clean(&'a EdgePath),
}

/// Partial update applied by [`Edge::update`]; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct EdgeUpdate {
    pub edge_type: Option<EdgeType>,
    pub source: Option<Id>,
    pub target: Option<Id>,
    pub source_port: Option<Id>,
    pub target_port: Option<Id>,
    pub style: Option<Style>,
    pub properties: Option<Properties>,
}

/// A connector between two nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    id: Id,
    edge_type: Option<EdgeType>,
    source: Id,
    target: Id,
    source_port: Option<Id>,
    target_port: Option<Id>,
    style: Style,
    properties: Properties,
    waypoints: Vec<Point>,
    labels: Vec<EdgeLabel>,
    start_arrow: ArrowType,
    end_arrow: ArrowType,
    status: EdgeStatus,
    min_segment_length: f32,
    selected: bool,
    /// `None` while dirty.
    path: Option<EdgePath>,
}

impl Edge {
    /// Builds an edge from its record. A record label becomes the first
    /// label, centered on the path.
    pub fn new(data: EdgeData) -> Self {
        let labels = data
            .label
            .map(|text| vec![EdgeLabel::new(text, 0.5)])
            .unwrap_or_default();
        Self {
            id: data.id,
            edge_type: data.edge_type,
            source: data.source,
            target: data.target,
            source_port: data.source_port,
            target_port: data.target_port,
            style: data.style,
            properties: data.properties,
            waypoints: data.waypoints,
            labels,
            start_arrow: ArrowType::None,
            end_arrow: ArrowType::Arrow,
            status: EdgeStatus::Normal,
            min_segment_length: DEFAULT_MIN_SEGMENT_LENGTH,
            selected: false,
            path: None,
        }
    }

    /// Builds an edge that takes its routing parameters from `config`.
    pub fn with_routing(data: EdgeData, config: &RoutingConfig) -> Self {
        let mut edge = Self::new(data);
        edge.min_segment_length = config.min_segment_length().max(0.0);
        edge
    }

    pub fn id(&self) -> Id {
        self.id
    }

    /// The explicit routing flavour, if the record named one.
    pub fn edge_type(&self) -> Option<EdgeType> {
        self.edge_type
    }

    pub fn source(&self) -> Id {
        self.source
    }

    pub fn target(&self) -> Id {
        self.target
    }

    pub fn source_port(&self) -> Option<Id> {
        self.source_port
    }

    pub fn target_port(&self) -> Option<Id> {
        self.target_port
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn waypoints(&self) -> &[Point] {
        &self.waypoints
    }

    pub fn labels(&self) -> &[EdgeLabel] {
        &self.labels
    }

    pub fn start_arrow(&self) -> ArrowType {
        self.start_arrow
    }

    pub fn end_arrow(&self) -> ArrowType {
        self.end_arrow
    }

    pub fn status(&self) -> EdgeStatus {
        self.status
    }

    pub fn min_segment_length(&self) -> f32 {
        self.min_segment_length
    }

    /// The record this edge was built from, reflecting current state.
    pub fn data(&self) -> EdgeData {
        EdgeData {
            id: self.id,
            edge_type: self.edge_type,
            source: self.source,
            target: self.target,
            source_port: self.source_port,
            target_port: self.target_port,
            label: self.labels.first().map(|label| label.text.clone()),
            style: self.style.clone(),
            properties: self.properties.clone(),
            waypoints: self.waypoints.clone(),
        }
    }

    pub fn path_state(&self) -> PathState<'_> {
        match &self.path {
            Some(path) => PathState::Clean(path),
            None => PathState::Dirty,
        }
    }

    /// The computed path, or `None` while dirty.
    pub fn path(&self) -> Option<&EdgePath> {
        self.path.as_ref()
    }

    pub fn is_dirty(&self) -> bool {
        self.path.is_none()
    }

    /// Routes the edge between `source` and `target` and caches the result.
    ///
    /// With waypoints the path is `[source, waypoints.., target]`; without
    /// them the edge type picks the router, orthogonal for untyped edges. A
    /// clean path with the same endpoints is returned as is.
    pub fn calculate_path(&mut self, source: Point, target: Point) -> &EdgePath {
        let path = match self.path.take() {
            Some(path) if path.source() == source && path.target() == target => path,
            _ => {
                let intermediate = if self.waypoints.is_empty() {
                    match self.edge_type.unwrap_or_default() {
                        EdgeType::Straight => routing::straight(),
                        EdgeType::Orthogonal => {
                            routing::orthogonal(source, target, self.min_segment_length)
                        }
                        EdgeType::Bezier => routing::bezier(source, target),
                    }
                } else {
                    self.waypoints.clone()
                };
                self.recomputed(EdgePath::new(source, intermediate, target))
            }
        };
        self.path.insert(path)
    }

    /// Caches a path produced by an external router, such as the render
    /// optimizer. The first and last points become the endpoints.
    ///
    /// Returns `None` and leaves the edge untouched for fewer than two points.
    pub fn set_routed_path(&mut self, points: Vec<Point>) -> Option<&EdgePath> {
        let (&source, rest) = points.split_first()?;
        let (&target, intermediate) = rest.split_last()?;

        let path = self.recomputed(EdgePath::new(source, intermediate.iter().copied(), target));
        Some(self.path.insert(path))
    }

    fn recomputed(&self, path: EdgePath) -> EdgePath {
        trace!(
            edge_id:% = self.id,
            points = path.points().len(),
            length = path.length();
            "Recomputed edge path"
        );
        path
    }

    /// Marks the cached path as stale.
    pub fn invalidate(&mut self) {
        self.path = None;
    }

    /// Path length, or `None` while dirty.
    pub fn length(&self) -> Option<f32> {
        self.path().map(EdgePath::length)
    }

    /// Nearest segment within `tolerance` of `point`, used to place a new waypoint.
    pub fn closest_segment_info(&self, point: Point, tolerance: f32) -> Option<SegmentInfo> {
        self.path()?.closest_segment(point, tolerance)
    }

    /// Point at `position` (fraction of the length, clamped) along the path.
    pub fn point_at(&self, position: f32) -> Option<Point> {
        self.path().map(|path| path.point_at(position))
    }

    /// Unit direction of the path at `position`.
    pub fn tangent_at(&self, position: f32) -> Option<Point> {
        self.path().map(|path| path.tangent_at(position))
    }

    /// The path vertex nearest to `point`.
    pub fn closest_point(&self, point: Point) -> Option<Point> {
        self.path().map(|path| path.closest_point(point))
    }

    /// Index of the first waypoint within `tolerance` of `point`.
    pub fn hit_test_waypoint(&self, point: Point, tolerance: f32) -> Option<usize> {
        self.waypoints
            .iter()
            .position(|waypoint| geometry::distance(*waypoint, point) <= tolerance)
    }

    pub fn set_waypoints(&mut self, waypoints: Vec<Point>) {
        self.waypoints = waypoints;
        self.invalidate();
    }

    /// Inserts a waypoint at `index` (clamped to the waypoint count), or appends it.
    pub fn add_waypoint(&mut self, point: Point, index: Option<usize>) {
        let index = index
            .unwrap_or(self.waypoints.len())
            .min(self.waypoints.len());
        self.waypoints.insert(index, point);
        self.invalidate();
    }

    /// Inserts a waypoint on the path segment nearest to `point`.
    ///
    /// Returns the index of the new waypoint, or `None` if no segment lies
    /// within `tolerance` or the path is dirty.
    pub fn insert_waypoint_near(&mut self, point: Point, tolerance: f32) -> Option<usize> {
        let info = self.closest_segment_info(point, tolerance)?;
        let index = info.index.min(self.waypoints.len());
        self.add_waypoint(info.point, Some(index));
        Some(index)
    }

    /// Removes the waypoint at `index`, if any.
    pub fn remove_waypoint(&mut self, index: usize) -> Option<Point> {
        if index >= self.waypoints.len() {
            return None;
        }
        let removed = self.waypoints.remove(index);
        self.invalidate();
        Some(removed)
    }

    pub fn clear_waypoints(&mut self) {
        self.waypoints.clear();
        self.invalidate();
    }

    /// Sets the orthogonal corner threshold; negative values are treated as zero.
    pub fn set_min_segment_length(&mut self, length: f32) {
        self.min_segment_length = length.max(0.0);
        self.invalidate();
    }

    pub fn add_label(&mut self, label: EdgeLabel) {
        self.labels.push(label);
    }

    pub fn remove_label(&mut self, index: usize) -> Option<EdgeLabel> {
        (index < self.labels.len()).then(|| self.labels.remove(index))
    }

    /// Replaces the label at `index`. Returns false if there is no such label.
    pub fn update_label(&mut self, index: usize, label: EdgeLabel) -> bool {
        match self.labels.get_mut(index) {
            Some(slot) => {
                *slot = label;
                true
            }
            None => false,
        }
    }

    pub fn set_start_arrow(&mut self, arrow: ArrowType) {
        self.start_arrow = arrow;
    }

    pub fn set_end_arrow(&mut self, arrow: ArrowType) {
        self.end_arrow = arrow;
    }

    pub fn set_status(&mut self, status: EdgeStatus) {
        self.status = status;
    }

    /// Applies a partial update and marks the path dirty.
    pub fn update(&mut self, update: EdgeUpdate) {
        if let Some(edge_type) = update.edge_type {
            self.edge_type = Some(edge_type);
        }
        if let Some(source) = update.source {
            self.source = source;
        }
        if let Some(target) = update.target {
            self.target = target;
        }
        if let Some(port) = update.source_port {
            self.source_port = Some(port);
        }
        if let Some(port) = update.target_port {
            self.target_port = Some(port);
        }
        if let Some(style) = update.style {
            self.style = style;
        }
        if let Some(properties) = update.properties {
            self.properties = properties;
        }
        self.invalidate();
    }

    /// Copies the edge under a fresh id from `ids`. The copy keeps the
    /// waypoints, routing parameters and cached path, and starts deselected.
    pub fn duplicate(&self, ids: &mut impl IdGenerator) -> Self {
        Self {
            id: ids.next_id(EDGE_ID_PREFIX),
            selected: false,
            ..self.clone()
        }
    }
}

impl Selectable for Edge {
    fn kind(&self) -> EntityKind {
        EntityKind::Edge
    }

    fn id(&self) -> Id {
        self.id
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
        self.path()
            .is_some_and(|path| path.hit_test(point, tolerance))
    }

    fn bounds(&self) -> Option<Bounds> {
        self.path().map(EdgePath::bounds)
    }
}

#[cfg(test)]
mod tests {
    use linework_core::identifier::SequentialIds;

    use super::*;

    fn edge() -> Edge {
        Edge::new(EdgeData::new("e1", "a", "b"))
    }

    #[test]
    fn test_new_edge_is_dirty() {
        let edge = edge();

        assert!(edge.is_dirty());
        assert!(edge.path().is_none());
        assert!(edge.bounds().is_none());
        assert!(!edge.hit_test(Point::new(0.0, 0.0), 100.0));
        assert_eq!(edge.start_arrow(), ArrowType::None);
        assert_eq!(edge.end_arrow(), ArrowType::Arrow);
    }

    #[test]
    fn test_horizontal_primary_small_offset_is_direct() {
        let mut edge = edge();
        let path = edge.calculate_path(Point::new(0.0, 0.0), Point::new(200.0, 20.0));
        assert_eq!(path.points().len(), 2);
    }

    #[test]
    fn test_horizontal_primary_large_offset_has_corners() {
        let mut edge = edge();
        let path = edge.calculate_path(Point::new(0.0, 0.0), Point::new(200.0, 60.0));

        assert_eq!(
            path.points(),
            [
                Point::new(0.0, 0.0),
                Point::new(100.0, 0.0),
                Point::new(100.0, 60.0),
                Point::new(200.0, 60.0),
            ]
        );
        assert_eq!(path.length(), 260.0);
    }

    #[test]
    fn test_waypoints_are_followed_in_order() {
        let mut edge = edge();
        edge.set_waypoints(vec![Point::new(10.0, 50.0), Point::new(90.0, 50.0)]);

        let path = edge.calculate_path(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        assert_eq!(
            path.points(),
            [
                Point::new(0.0, 0.0),
                Point::new(10.0, 50.0),
                Point::new(90.0, 50.0),
                Point::new(100.0, 0.0),
            ]
        );
    }

    #[test]
    fn test_mutators_mark_dirty() {
        let source = Point::new(0.0, 0.0);
        let target = Point::new(100.0, 0.0);
        let mut edge = edge();

        let mutations: [fn(&mut Edge); 6] = [
            |e: &mut Edge| e.set_waypoints(vec![Point::new(50.0, 50.0)]),
            |e: &mut Edge| e.add_waypoint(Point::new(1.0, 1.0), None),
            |e: &mut Edge| {
                e.remove_waypoint(0);
            },
            |e: &mut Edge| e.clear_waypoints(),
            |e: &mut Edge| e.set_min_segment_length(5.0),
            |e: &mut Edge| e.update(EdgeUpdate::default()),
        ];
        for mutate in mutations {
            edge.calculate_path(source, target);
            assert!(!edge.is_dirty());
            mutate(&mut edge);
            assert!(edge.is_dirty());
        }
    }

    #[test]
    fn test_remove_waypoint_out_of_range_keeps_cache() {
        let mut edge = edge();
        edge.calculate_path(Point::new(0.0, 0.0), Point::new(100.0, 0.0));

        assert_eq!(edge.remove_waypoint(3), None);
        assert!(!edge.is_dirty());
    }

    #[test]
    fn test_new_endpoints_recompute() {
        let mut edge = Edge::new(EdgeData::new("e1", "a", "b").with_type(EdgeType::Straight));
        edge.calculate_path(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        let moved = edge.calculate_path(Point::new(0.0, 0.0), Point::new(0.0, 100.0));
        assert_eq!(moved.target(), Point::new(0.0, 100.0));
    }

    #[test]
    fn test_same_endpoints_reuse_path() {
        let mut edge = edge();
        let source = Point::new(0.0, 0.0);
        let target = Point::new(200.0, 60.0);

        let first = edge.calculate_path(source, target).clone();
        assert_eq!(edge.path_state(), PathState::Clean(&first));
        assert_eq!(edge.calculate_path(source, target), &first);
    }

    #[test]
    fn test_set_routed_path() {
        let mut edge = edge();
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(50.0, 30.0),
            Point::new(100.0, 0.0),
        ];

        let path = edge.set_routed_path(points.clone()).unwrap();
        assert_eq!(path.points(), points);
        assert!(!edge.is_dirty());

        edge.invalidate();
        assert!(edge.set_routed_path(vec![Point::new(1.0, 1.0)]).is_none());
        assert_eq!(edge.path_state(), PathState::Dirty);
    }

    #[test]
    fn test_add_waypoint_index_is_clamped() {
        let mut edge = edge();
        edge.add_waypoint(Point::new(1.0, 1.0), None);
        edge.add_waypoint(Point::new(2.0, 2.0), Some(0));
        edge.add_waypoint(Point::new(3.0, 3.0), Some(99));

        assert_eq!(
            edge.waypoints(),
            [Point::new(2.0, 2.0), Point::new(1.0, 1.0), Point::new(3.0, 3.0)]
        );
    }

    #[test]
    fn test_insert_waypoint_near_segment() {
        let mut edge = edge();
        edge.set_waypoints(vec![Point::new(100.0, 0.0)]);
        edge.calculate_path(Point::new(0.0, 0.0), Point::new(100.0, 100.0));

        let index = edge.insert_waypoint_near(Point::new(103.0, 50.0), 5.0);
        assert_eq!(index, Some(1));
        assert_eq!(edge.waypoints(), [Point::new(100.0, 0.0), Point::new(100.0, 50.0)]);
        assert!(edge.is_dirty());
    }

    #[test]
    fn test_hit_test_waypoint() {
        let mut edge = edge();
        edge.set_waypoints(vec![Point::new(10.0, 10.0), Point::new(50.0, 50.0)]);

        assert_eq!(edge.hit_test_waypoint(Point::new(52.0, 49.0), 8.0), Some(1));
        assert_eq!(edge.hit_test_waypoint(Point::new(30.0, 30.0), 8.0), None);
    }

    #[test]
    fn test_labels() {
        let mut edge = Edge::new(EdgeData::new("e1", "a", "b").with_label("yes"));
        assert_eq!(edge.labels()[0].text(), "yes");
        assert_eq!(edge.labels()[0].position(), 0.5);

        edge.add_label(EdgeLabel::new("late", 1.5));
        assert_eq!(edge.labels()[1].position(), 1.0);

        assert!(edge.update_label(0, EdgeLabel::new("no", 0.25)));
        assert!(!edge.update_label(5, EdgeLabel::new("missing", 0.5)));
        assert_eq!(edge.data().label.as_deref(), Some("no"));

        assert_eq!(edge.remove_label(1).map(|l| l.text().to_string()), Some("late".into()));
        assert!(edge.remove_label(1).is_none());
    }

    #[test]
    fn test_update_changes_fields() {
        let mut edge = edge();
        edge.update(EdgeUpdate {
            target: Some(Id::new("c")),
            source_port: Some(Id::new("right")),
            edge_type: Some(EdgeType::Bezier),
            ..EdgeUpdate::default()
        });

        assert_eq!(edge.target(), "c");
        assert_eq!(edge.source_port(), Some(Id::new("right")));
        assert_eq!(edge.edge_type(), Some(EdgeType::Bezier));
    }

    #[test]
    fn test_duplicate_gets_fresh_id() {
        let mut ids = SequentialIds::default();
        let mut edge = edge();
        edge.set_waypoints(vec![Point::new(5.0, 5.0)]);
        edge.set_min_segment_length(42.0);
        edge.select();

        let copy = edge.duplicate(&mut ids);
        assert_eq!(copy.id(), "edge_1");
        assert_eq!(copy.waypoints(), edge.waypoints());
        assert_eq!(copy.min_segment_length(), 42.0);
        assert!(!copy.is_selected());
    }

    #[test]
    fn test_arrow_type_parse() {
        assert_eq!("filled-diamond".parse::<ArrowType>(), Ok(ArrowType::FilledDiamond));
        assert!(ArrowType::FilledCircle.is_filled());
        assert!(!ArrowType::Arrow.is_filled());
        assert!("spear".parse::<ArrowType>().is_err());
    }
}
