//! Automatic routes used when an edge has no waypoints.
//!
//! Each router returns only the intermediate points; the path adds the
//! endpoints itself.

use linework_core::geometry::{self, Point};

/// Number of segments a bezier route is flattened into.
const BEZIER_SEGMENTS: usize = 16;

/// Direct line; no intermediate points.
pub fn straight() -> Vec<Point> {
    Vec::new()
}

/// Orthogonal route bisecting the dominant axis.
///
/// The larger of `|dx|` and `|dy|` is the primary axis. When the offset
/// along the other axis exceeds `min_segment_length`, two corners at the
/// primary-axis midpoint give an S/Z-shaped path; otherwise the route is
/// the direct line.
///
/// # Examples
///
/// ```
/// # use linework::edge::routing;
/// # use linework_core::geometry::Point;
/// let corners = routing::orthogonal(Point::new(0.0, 0.0), Point::new(200.0, 100.0), 20.0);
/// assert_eq!(corners, vec![Point::new(100.0, 0.0), Point::new(100.0, 100.0)]);
///
/// let direct = routing::orthogonal(Point::new(0.0, 0.0), Point::new(200.0, 10.0), 20.0);
/// assert!(direct.is_empty());
/// ```
pub fn orthogonal(source: Point, target: Point, min_segment_length: f32) -> Vec<Point> {
    let delta = target.sub_point(source);
    let mid = source.midpoint(target);

    if delta.x().abs() > delta.y().abs() {
        if delta.y().abs() > min_segment_length {
            vec![Point::new(mid.x(), source.y()), Point::new(mid.x(), target.y())]
        } else {
            Vec::new()
        }
    } else if delta.x().abs() > min_segment_length {
        vec![Point::new(source.x(), mid.y()), Point::new(target.x(), mid.y())]
    } else {
        Vec::new()
    }
}

/// Cubic curve flattened into a polyline.
///
/// The control points leave the source and enter the target along the
/// dominant axis, each offset by half of the primary delta.
pub fn bezier(source: Point, target: Point) -> Vec<Point> {
    let delta = target.sub_point(source);
    let (c1, c2) = if delta.x().abs() >= delta.y().abs() {
        let half = delta.x() / 2.0;
        (
            Point::new(source.x() + half, source.y()),
            Point::new(target.x() - half, target.y()),
        )
    } else {
        let half = delta.y() / 2.0;
        (
            Point::new(source.x(), source.y() + half),
            Point::new(target.x(), target.y() - half),
        )
    };

    let mut points = geometry::flatten_cubic_bezier(source, c1, c2, target, BEZIER_SEGMENTS);
    // Endpoints are added by the path.
    points.pop();
    if !points.is_empty() {
        points.remove(0);
    }
    points
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::*;

    #[test]
    fn test_orthogonal_vertical_primary() {
        let corners = orthogonal(Point::new(0.0, 0.0), Point::new(50.0, 300.0), 20.0);
        assert_eq!(corners, vec![Point::new(0.0, 150.0), Point::new(50.0, 150.0)]);

        let direct = orthogonal(Point::new(0.0, 0.0), Point::new(20.0, 300.0), 20.0);
        assert!(direct.is_empty());
    }

    #[test]
    fn test_orthogonal_threshold_is_exclusive() {
        assert!(orthogonal(Point::new(0.0, 0.0), Point::new(100.0, 20.0), 20.0).is_empty());
        assert_eq!(orthogonal(Point::new(0.0, 0.0), Point::new(100.0, 21.0), 20.0).len(), 2);
    }

    #[test]
    fn test_bezier_passes_through_midpoint() {
        let source = Point::new(0.0, 0.0);
        let target = Point::new(100.0, 100.0);
        let points = bezier(source, target);

        assert_eq!(points.len(), BEZIER_SEGMENTS - 1);
        let middle = points[BEZIER_SEGMENTS / 2 - 1];
        assert!(approx_eq!(f32, middle.x(), 50.0, epsilon = 1e-3));
        assert!(approx_eq!(f32, middle.y(), 50.0, epsilon = 1e-3));
    }
}
