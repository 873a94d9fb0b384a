//! Routing strategy selection for rendered edges.
//!
//! The [`EdgeRenderOptimizer`] is stateless: it is not tied to an edge and
//! works on node rectangles and points only. It chooses between straight,
//! orthogonal and curved paths, finds where a connector meets a node's
//! perimeter, and places labels.

use std::{fmt, str::FromStr};

use log::{debug, trace};
use serde::Deserialize;

use linework_core::geometry::{self, Bounds, Point};

use crate::config::RoutingConfig;

/// Inset applied to node rectangles before collision tests, so a path that
/// starts on a perimeter does not collide with its own node.
const COLLISION_INSET: f32 = 1.0;

/// How the optimizer draws a connector.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutingStrategy {
    Straight,
    Orthogonal,
    Curved,
    /// Pick one of the others from the endpoint geometry.
    #[default]
    Auto,
}

impl FromStr for RoutingStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "straight" => Ok(Self::Straight),
            "orthogonal" => Ok(Self::Orthogonal),
            "curved" => Ok(Self::Curved),
            "auto" => Ok(Self::Auto),
            _ => Err(format!("invalid routing strategy `{s}`")),
        }
    }
}

impl fmt::Display for RoutingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Straight => "straight",
            Self::Orthogonal => "orthogonal",
            Self::Curved => "curved",
            Self::Auto => "auto",
        })
    }
}

/// Stateless routing strategy selector.
///
/// # Examples
///
/// ```
/// use linework::optimizer::{EdgeRenderOptimizer, RoutingStrategy};
/// use linework_core::geometry::Point;
///
/// let optimizer = EdgeRenderOptimizer::default();
/// let strategy = optimizer.select_strategy(Point::new(0.0, 0.0), Point::new(300.0, 40.0));
/// assert_eq!(strategy, RoutingStrategy::Orthogonal);
/// ```
#[derive(Debug, Clone)]
pub struct EdgeRenderOptimizer {
    strategy: RoutingStrategy,
    min_distance: f32,
    smoothness: f32,
    straight_threshold: f32,
    dominance_ratio: f32,
    label_offset: f32,
}

impl Default for EdgeRenderOptimizer {
    fn default() -> Self {
        Self::from_config(&RoutingConfig::default())
    }
}

impl EdgeRenderOptimizer {
    pub fn from_config(config: &RoutingConfig) -> Self {
        Self {
            strategy: config.strategy(),
            min_distance: config.min_distance(),
            smoothness: config.smoothness(),
            straight_threshold: config.straight_threshold(),
            dominance_ratio: config.dominance_ratio(),
            label_offset: config.label_offset(),
        }
    }

    /// The configured strategy, possibly [`RoutingStrategy::Auto`].
    pub fn strategy(&self) -> RoutingStrategy {
        self.strategy
    }

    /// Point where the ray from the center of `node` toward `toward` leaves
    /// the rectangle.
    ///
    /// The ray is scaled to whichever half-extent it reaches first, so the
    /// result lies on a side, not necessarily at a corner. A target at the
    /// center yields the center, and so does any ray across a rectangle
    /// collapsed to zero extent along the ray's axis.
    pub fn connection_point(&self, node: Bounds, toward: Point) -> Point {
        let center = node.center();
        let direction = toward.sub_point(center);
        if direction.is_zero() {
            return center;
        }

        let half = node.half_extents();
        let reach = |extent: f32, component: f32| {
            if component > 0.0 {
                extent / component
            } else {
                f32::INFINITY
            }
        };
        let scale = reach(half.width(), direction.x().abs())
            .min(reach(half.height(), direction.y().abs()));
        center.add_point(direction.scale(scale))
    }

    /// Distance/axis heuristic behind [`RoutingStrategy::Auto`].
    ///
    /// Both deltas below the straight threshold give a straight line; one
    /// delta larger than the other by more than the dominance ratio gives an
    /// orthogonal path; anything else is curved.
    pub fn select_strategy(&self, source: Point, target: Point) -> RoutingStrategy {
        let delta = target.sub_point(source).abs();
        let (dx, dy) = (delta.x(), delta.y());

        if dx < self.straight_threshold && dy < self.straight_threshold {
            RoutingStrategy::Straight
        } else if dx.max(dy) > self.dominance_ratio * dx.min(dy) {
            RoutingStrategy::Orthogonal
        } else {
            RoutingStrategy::Curved
        }
    }

    /// The configured strategy, with `Auto` resolved for these endpoints.
    pub fn resolve_strategy(&self, source: Point, target: Point) -> RoutingStrategy {
        match self.strategy {
            RoutingStrategy::Auto => self.select_strategy(source, target),
            strategy => strategy,
        }
    }

    /// Full path between two nodes using the configured strategy.
    ///
    /// Endpoints are the perimeter connection points facing the other node.
    pub fn compute_path(&self, source: Bounds, target: Bounds) -> Vec<Point> {
        self.compute_path_with(self.strategy, source, target)
    }

    /// Full path between two nodes using `strategy`.
    pub fn compute_path_with(
        &self,
        strategy: RoutingStrategy,
        source: Bounds,
        target: Bounds,
    ) -> Vec<Point> {
        let start = self.connection_point(source, target.center());
        let end = self.connection_point(target, source.center());

        let resolved = match strategy {
            RoutingStrategy::Auto => self.select_strategy(source.center(), target.center()),
            strategy => strategy,
        };
        debug!(strategy:% = resolved; "Routing edge");

        match resolved {
            RoutingStrategy::Straight | RoutingStrategy::Auto => self.straight_path(start, end),
            RoutingStrategy::Orthogonal => self.orthogonal_path(start, end, source, target),
            RoutingStrategy::Curved => self.curved_path(start, end),
        }
    }

    pub fn straight_path(&self, start: Point, end: Point) -> Vec<Point> {
        vec![start, end]
    }

    /// L-shaped path through the midpoint of the primary axis, or a detour
    /// around both nodes when that path is blocked.
    pub fn orthogonal_path(
        &self,
        start: Point,
        end: Point,
        source: Bounds,
        target: Bounds,
    ) -> Vec<Point> {
        let delta = end.sub_point(start);
        let horizontal = delta.x().abs() > delta.y().abs();

        if !self.is_path_blocked(start, end, source, target) {
            let mid = start.midpoint(end);
            return if horizontal {
                vec![
                    start,
                    Point::new(mid.x(), start.y()),
                    Point::new(mid.x(), end.y()),
                    end,
                ]
            } else {
                vec![
                    start,
                    Point::new(start.x(), mid.y()),
                    Point::new(end.x(), mid.y()),
                    end,
                ]
            };
        }

        trace!(start:?, end:?; "Direct orthogonal path blocked, detouring");
        if horizontal {
            let step = self.min_distance.copysign(delta.x());
            let detour_y = source.min_y().min(target.min_y()) - self.min_distance;
            let exit_x = start.x() + step;
            vec![
                start,
                Point::new(exit_x, start.y()),
                Point::new(exit_x, detour_y),
                Point::new(end.x(), detour_y),
                end,
            ]
        } else {
            let step = self.min_distance.copysign(delta.y());
            let detour_x = source.min_x().min(target.min_x()) - self.min_distance;
            let exit_y = start.y() + step;
            vec![
                start,
                Point::new(start.x(), exit_y),
                Point::new(detour_x, exit_y),
                Point::new(detour_x, end.y()),
                end,
            ]
        }
    }

    /// Four-point cubic approximation: two control points at a third and two
    /// thirds of the chord, pushed sideways by `chord length * smoothness`.
    pub fn curved_path(&self, start: Point, end: Point) -> Vec<Point> {
        let chord = end.sub_point(start);
        let length = geometry::vector_length(chord);
        let normal = geometry::normalize_vector(chord.perpendicular());
        let offset = normal.scale(length * self.smoothness);

        vec![
            start,
            start.lerp(end, 1.0 / 3.0).add_point(offset),
            start.lerp(end, 2.0 / 3.0).add_point(offset),
            end,
        ]
    }

    /// Returns true if the bounding box of the segment `start`-`end`
    /// overlaps the interior of either endpoint node.
    pub fn is_path_blocked(&self, start: Point, end: Point, source: Bounds, target: Bounds) -> bool {
        let segment = Bounds::from_corners(start, end);
        [source, target]
            .into_iter()
            .any(|node| segment.intersects(node.expand(-COLLISION_INSET)))
    }

    /// Label anchor at half the path length, lifted `label_offset` units up.
    ///
    /// Returns `None` for an empty path.
    pub fn label_position(&self, points: &[Point]) -> Option<Point> {
        self.label_anchor(points, 0.5)
    }

    /// Label anchor at `position` (fraction of the path length, clamped to
    /// `[0, 1]`), lifted `label_offset` units up.
    ///
    /// The lift is always toward negative y, whatever the direction of the
    /// segment under the anchor. Returns `None` for an empty path.
    pub fn label_anchor(&self, points: &[Point], position: f32) -> Option<Point> {
        let last = *points.last()?;
        let wanted = geometry::polyline_length(points) * position.clamp(0.0, 1.0);

        let mut walked = 0.0;
        let mut anchor = last;
        for pair in points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let segment = geometry::distance(a, b);
            if segment > 0.0 && walked + segment >= wanted {
                anchor = a.lerp(b, (wanted - walked) / segment);
                break;
            }
            walked += segment;
        }

        Some(anchor.with_y(anchor.y() - self.label_offset))
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use linework_core::geometry::Size;

    use super::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Bounds {
        Bounds::new_from_top_left(Point::new(x, y), Size::new(w, h))
    }

    #[test]
    fn test_routing_strategy_from_str() {
        assert_eq!("curved".parse::<RoutingStrategy>(), Ok(RoutingStrategy::Curved));
        assert_eq!(RoutingStrategy::Auto.to_string(), "auto");
        assert!("wiggly".parse::<RoutingStrategy>().is_err());
    }

    #[test]
    fn test_connection_point_sides() {
        let optimizer = EdgeRenderOptimizer::default();
        let node = rect(0.0, 0.0, 100.0, 50.0);

        let right = optimizer.connection_point(node, Point::new(500.0, 25.0));
        assert!(approx_eq!(f32, right.x(), 100.0, epsilon = 1e-4));
        assert!(approx_eq!(f32, right.y(), 25.0, epsilon = 1e-4));

        let top = optimizer.connection_point(node, Point::new(50.0, -300.0));
        assert!(approx_eq!(f32, top.x(), 50.0, epsilon = 1e-4));
        assert!(approx_eq!(f32, top.y(), 0.0, epsilon = 1e-4));

        let side = optimizer.connection_point(node, Point::new(150.0, 50.0));
        assert!(approx_eq!(f32, side.x(), 100.0));
        assert!(approx_eq!(f32, side.y(), 37.5));

        assert_eq!(optimizer.connection_point(node, node.center()), node.center());
    }

    #[test]
    fn test_select_strategy() {
        let optimizer = EdgeRenderOptimizer::default();
        let origin = Point::new(0.0, 0.0);

        assert_eq!(optimizer.select_strategy(origin, Point::new(30.0, 40.0)), RoutingStrategy::Straight);
        assert_eq!(optimizer.select_strategy(origin, Point::new(300.0, 100.0)), RoutingStrategy::Orthogonal);
        assert_eq!(optimizer.select_strategy(origin, Point::new(0.0, 80.0)), RoutingStrategy::Orthogonal);
        assert_eq!(optimizer.select_strategy(origin, Point::new(200.0, 150.0)), RoutingStrategy::Curved);
    }

    #[test]
    fn test_resolve_strategy_honours_configuration() {
        let config = RoutingConfig::default().with_strategy(RoutingStrategy::Curved);
        let optimizer = EdgeRenderOptimizer::from_config(&config);

        let strategy = optimizer.resolve_strategy(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        assert_eq!(strategy, RoutingStrategy::Curved);
    }

    #[test]
    fn test_orthogonal_path_unblocked() {
        let optimizer = EdgeRenderOptimizer::default();
        let source = rect(0.0, 0.0, 100.0, 100.0);
        let target = rect(300.0, 100.0, 100.0, 100.0);

        let path = optimizer.orthogonal_path(Point::new(100.0, 50.0), Point::new(300.0, 150.0), source, target);
        assert_eq!(
            path,
            [
                Point::new(100.0, 50.0),
                Point::new(200.0, 50.0),
                Point::new(200.0, 150.0),
                Point::new(300.0, 150.0),
            ]
        );
    }

    #[test]
    fn test_is_path_blocked() {
        let optimizer = EdgeRenderOptimizer::default();
        let source = rect(0.0, 0.0, 100.0, 100.0);
        let target = rect(200.0, 0.0, 100.0, 100.0);

        assert!(!optimizer.is_path_blocked(Point::new(100.0, 50.0), Point::new(200.0, 50.0), source, target));
        assert!(optimizer.is_path_blocked(Point::new(0.0, 50.0), Point::new(200.0, 50.0), source, target));
    }

    #[test]
    fn test_orthogonal_path_detours_above_nodes() {
        let optimizer = EdgeRenderOptimizer::default();
        let source = rect(0.0, 0.0, 100.0, 100.0);
        let target = rect(200.0, 20.0, 100.0, 100.0);

        let path = optimizer.orthogonal_path(Point::new(0.0, 50.0), Point::new(200.0, 70.0), source, target);
        assert_eq!(
            path,
            [
                Point::new(0.0, 50.0),
                Point::new(20.0, 50.0),
                Point::new(20.0, -20.0),
                Point::new(200.0, -20.0),
                Point::new(200.0, 70.0),
            ]
        );
    }

    #[test]
    fn test_curved_path_offsets_control_points() {
        let optimizer = EdgeRenderOptimizer::default();
        let path = optimizer.curved_path(Point::new(0.0, 0.0), Point::new(300.0, 0.0));

        assert_eq!(path.len(), 4);
        // Perpendicular of (1, 0) is (0, 1); offset = 300 * 0.25.
        assert!(approx_eq!(f32, path[1].x(), 100.0, epsilon = 1e-3));
        assert!(approx_eq!(f32, path[1].y(), 75.0, epsilon = 1e-3));
        assert!(approx_eq!(f32, path[2].x(), 200.0, epsilon = 1e-3));
        assert!(approx_eq!(f32, path[2].y(), 75.0, epsilon = 1e-3));
    }

    #[test]
    fn test_compute_path_auto() {
        let optimizer = EdgeRenderOptimizer::default();
        let source = rect(0.0, 0.0, 100.0, 60.0);
        let target = rect(400.0, 0.0, 100.0, 60.0);

        let path = optimizer.compute_path(source, target);
        assert_eq!(path.first(), Some(&Point::new(100.0, 30.0)));
        assert_eq!(path.last(), Some(&Point::new(400.0, 30.0)));
        assert_eq!(path.len(), 4);
    }

    #[test]
    fn test_label_position() {
        let optimizer = EdgeRenderOptimizer::default();

        let horizontal = [Point::new(0.0, 0.0), Point::new(100.0, 0.0)];
        assert_eq!(optimizer.label_position(&horizontal), Some(Point::new(50.0, -10.0)));

        let l_shape = [Point::new(0.0, 0.0), Point::new(0.0, 40.0), Point::new(200.0, 40.0)];
        assert_eq!(optimizer.label_position(&l_shape), Some(Point::new(80.0, 30.0)));

        let vertical = [Point::new(0.0, 0.0), Point::new(0.0, 100.0)];
        assert_eq!(optimizer.label_position(&vertical), Some(Point::new(0.0, 40.0)));

        assert_eq!(optimizer.label_position(&[]), None);
    }

    #[test]
    fn test_label_anchor_positions() {
        let optimizer = EdgeRenderOptimizer::default();
        let path = [Point::new(0.0, 0.0), Point::new(100.0, 0.0), Point::new(100.0, 100.0)];

        assert_eq!(optimizer.label_anchor(&path, 0.0), Some(Point::new(0.0, -10.0)));
        assert_eq!(optimizer.label_anchor(&path, 0.25), Some(Point::new(50.0, -10.0)));
        assert_eq!(optimizer.label_anchor(&path, 1.0), Some(Point::new(100.0, 90.0)));
        assert_eq!(optimizer.label_anchor(&path, 7.0), Some(Point::new(100.0, 90.0)));

        let single = [Point::new(5.0, 5.0)];
        assert_eq!(optimizer.label_anchor(&single, 0.5), Some(Point::new(5.0, -5.0)));
    }

    #[test]
    fn test_connection_point_on_collapsed_rectangle() {
        let optimizer = EdgeRenderOptimizer::default();

        let flat = rect(0.0, 0.0, 120.0, 0.0);
        let right = optimizer.connection_point(flat, Point::new(500.0, 0.0));
        assert!(approx_eq!(f32, right.x(), 120.0, epsilon = 1e-4));
        assert_eq!(right.y(), 0.0);
        assert_eq!(optimizer.connection_point(flat, Point::new(60.0, 300.0)), Point::new(60.0, 0.0));
        assert_eq!(optimizer.connection_point(flat, Point::new(300.0, 100.0)), Point::new(60.0, 0.0));

        let thin = rect(0.0, 0.0, 0.0, 80.0);
        let bottom = optimizer.connection_point(thin, Point::new(0.0, 500.0));
        assert_eq!(bottom.x(), 0.0);
        assert!(approx_eq!(f32, bottom.y(), 80.0, epsilon = 1e-4));
        assert_eq!(optimizer.connection_point(thin, Point::new(-200.0, 40.0)), Point::new(0.0, 40.0));

        let point = rect(10.0, 10.0, 0.0, 0.0);
        let result = optimizer.connection_point(point, Point::new(90.0, -40.0));
        assert_eq!(result, Point::new(10.0, 10.0));
        assert!(result.x().is_finite() && result.y().is_finite());
    }
}
