//! Distances, angles and polyline measurements.

use super::{Bounds, Point};

/// Euclidean distance between two points.
///
/// # Examples
///
/// ```
/// # use linework_core::geometry::{Point, distance};
/// assert_eq!(distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0)), 5.0);
/// ```
pub fn distance(a: Point, b: Point) -> f32 {
    b.sub_point(a).hypot()
}

/// Angle in radians of the direction from `from` to `to`, in `(-PI, PI]`.
///
/// Coincident points yield `0.0`.
pub fn angle(from: Point, to: Point) -> f32 {
    let delta = to.sub_point(from);
    delta.y().atan2(delta.x())
}

pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees.to_radians()
}

pub fn radians_to_degrees(radians: f32) -> f32 {
    radians.to_degrees()
}

/// Projects `point` onto the segment `a`-`b`, clamping to the segment ends.
///
/// A zero-length segment projects every point onto `a`.
pub fn closest_point_on_segment(point: Point, a: Point, b: Point) -> Point {
    let segment = b.sub_point(a);
    let length_sq = segment.x() * segment.x() + segment.y() * segment.y();
    if length_sq < super::EPSILON {
        return a;
    }

    let offset = point.sub_point(a);
    let t = ((offset.x() * segment.x() + offset.y() * segment.y()) / length_sq).clamp(0.0, 1.0);
    a.lerp(b, t)
}

/// Shortest distance from `point` to the segment `a`-`b`.
///
/// # Examples
///
/// ```
/// # use linework_core::geometry::{Point, point_to_line_distance};
/// let a = Point::new(0.0, 0.0);
/// let b = Point::new(100.0, 0.0);
///
/// assert_eq!(point_to_line_distance(Point::new(50.0, 3.0), a, b), 3.0);
/// // Beyond the end the distance is measured to the endpoint.
/// assert_eq!(point_to_line_distance(Point::new(103.0, 4.0), a, b), 5.0);
/// ```
pub fn point_to_line_distance(point: Point, a: Point, b: Point) -> f32 {
    distance(point, closest_point_on_segment(point, a, b))
}

/// Sum of the lengths of consecutive segments.
pub fn polyline_length(points: &[Point]) -> f32 {
    points.windows(2).map(|w| distance(w[0], w[1])).sum()
}

/// Axis-aligned bounds of all points, or `None` when there are none.
pub fn polyline_bounds(points: &[Point]) -> Option<Bounds> {
    Bounds::from_points(points.iter().copied())
}

/// Rounds both coordinates to the nearest multiple of `grid_size`.
///
/// A non-positive grid size leaves the point unchanged.
pub fn snap_to_grid(point: Point, grid_size: f32) -> Point {
    if grid_size <= 0.0 {
        return point;
    }
    Point::new(
        (point.x() / grid_size).round() * grid_size,
        (point.y() / grid_size).round() * grid_size,
    )
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_2, PI};

    use float_cmp::approx_eq;

    use super::*;

    #[test]
    fn test_distance_to_self_is_zero() {
        let p = Point::new(12.5, -3.0);
        assert_eq!(distance(p, p), 0.0);
    }

    #[test]
    fn test_angle() {
        let origin = Point::new(0.0, 0.0);

        assert_eq!(angle(origin, Point::new(1.0, 0.0)), 0.0);
        assert!(approx_eq!(f32, angle(origin, Point::new(0.0, 1.0)), FRAC_PI_2));
        assert!(approx_eq!(f32, angle(origin, Point::new(-1.0, 0.0)), PI));
        assert_eq!(angle(origin, origin), 0.0);
    }

    #[test]
    fn test_degree_conversion() {
        assert!(approx_eq!(f32, degrees_to_radians(180.0), PI));
        assert!(approx_eq!(f32, radians_to_degrees(FRAC_PI_2), 90.0));
    }

    #[test]
    fn test_closest_point_is_clamped() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);

        assert_eq!(closest_point_on_segment(Point::new(5.0, 7.0), a, b), Point::new(5.0, 0.0));
        assert_eq!(closest_point_on_segment(Point::new(-5.0, 1.0), a, b), a);
        assert_eq!(closest_point_on_segment(Point::new(15.0, 1.0), a, b), b);
    }

    #[test]
    fn test_point_to_zero_length_segment() {
        let a = Point::new(1.0, 1.0);
        assert_eq!(point_to_line_distance(Point::new(4.0, 5.0), a, a), 5.0);
    }

    #[test]
    fn test_polyline_length_and_bounds() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(30.0, 0.0),
            Point::new(30.0, 40.0),
        ];

        assert_eq!(polyline_length(&points), 70.0);
        assert_eq!(polyline_length(&points[..1]), 0.0);

        let bounds = polyline_bounds(&points).unwrap();
        assert_eq!(bounds.width(), 30.0);
        assert_eq!(bounds.height(), 40.0);
        assert!(polyline_bounds(&[]).is_none());
    }

    #[test]
    fn test_snap_to_grid() {
        assert_eq!(snap_to_grid(Point::new(14.0, 16.0), 10.0), Point::new(10.0, 20.0));
        assert_eq!(snap_to_grid(Point::new(14.0, 16.0), 0.0), Point::new(14.0, 16.0));
        assert_eq!(snap_to_grid(Point::new(-14.0, 5.0), 10.0), Point::new(-10.0, 10.0));
    }
}
