//! Point-in-shape tests and rectangle overlap.

use super::{Bounds, Point};

/// Returns true if the point lies inside or on the border of the rectangle.
///
/// # Examples
///
/// ```
/// # use linework_core::geometry::{Bounds, Point, Size, point_in_rectangle};
/// let rect = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(10.0, 10.0));
/// assert!(point_in_rectangle(Point::new(10.0, 0.0), rect));
/// assert!(!point_in_rectangle(Point::new(10.01, 0.0), rect));
/// ```
pub fn point_in_rectangle(point: Point, rect: Bounds) -> bool {
    rect.contains_point(point)
}

/// Returns true if the point lies inside or on the circle.
pub fn point_in_circle(point: Point, center: Point, radius: f32) -> bool {
    super::distance(point, center) <= radius
}

/// Returns true if the point lies inside or on the axis-aligned ellipse.
///
/// An ellipse with a non-positive radius contains nothing.
pub fn point_in_ellipse(point: Point, center: Point, radius_x: f32, radius_y: f32) -> bool {
    if radius_x <= 0.0 || radius_y <= 0.0 {
        return false;
    }
    let dx = (point.x() - center.x()) / radius_x;
    let dy = (point.y() - center.y()) / radius_y;
    dx * dx + dy * dy <= 1.0
}

/// Ray-casting point-in-polygon test.
///
/// Polygons with fewer than three vertices contain nothing. Points exactly on
/// an edge may fall on either side.
pub fn point_in_polygon(point: Point, polygon: &[Point]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (pi, pj) = (polygon[i], polygon[j]);
        if (pi.y() > point.y()) != (pj.y() > point.y()) {
            let crossing_x = (pj.x() - pi.x()) * (point.y() - pi.y()) / (pj.y() - pi.y()) + pi.x();
            if point.x() < crossing_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Returns true if the interiors of the two rectangles overlap
pub fn rectangles_intersect(a: Bounds, b: Bounds) -> bool {
    a.intersects(b)
}

/// The overlapping region of two rectangles, or `None` if they don't overlap
pub fn rectangle_intersection(a: Bounds, b: Bounds) -> Option<Bounds> {
    a.intersection(b)
}

/// Moves the point to the nearest position inside the rectangle.
pub fn clamp_point_to_rectangle(point: Point, rect: Bounds) -> Point {
    Point::new(
        point.x().clamp(rect.min_x(), rect.max_x().max(rect.min_x())),
        point.y().clamp(rect.min_y(), rect.max_y().max(rect.min_y())),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;

    fn square() -> Bounds {
        Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(100.0, 100.0))
    }

    #[test]
    fn test_point_in_rectangle_corners_and_center() {
        let rect = square();

        for corner in [
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(0.0, 100.0),
            Point::new(100.0, 100.0),
        ] {
            assert!(point_in_rectangle(corner, rect), "corner {corner:?}");
        }
        assert!(point_in_rectangle(rect.center(), rect));
        assert!(!point_in_rectangle(Point::new(-0.01, 50.0), rect));
        assert!(!point_in_rectangle(Point::new(50.0, 100.01), rect));
    }

    #[test]
    fn test_point_in_circle() {
        let center = Point::new(10.0, 10.0);

        assert!(point_in_circle(Point::new(13.0, 14.0), center, 5.0));
        assert!(!point_in_circle(Point::new(13.0, 14.1), center, 5.0));
    }

    #[test]
    fn test_point_in_ellipse() {
        let center = Point::new(0.0, 0.0);

        assert!(point_in_ellipse(Point::new(20.0, 0.0), center, 20.0, 10.0));
        assert!(point_in_ellipse(Point::new(0.0, -10.0), center, 20.0, 10.0));
        assert!(!point_in_ellipse(Point::new(15.0, 8.0), center, 20.0, 10.0));
        assert!(!point_in_ellipse(center, center, 0.0, 10.0));
    }

    #[test]
    fn test_point_in_polygon_diamond() {
        let diamond = [
            Point::new(50.0, 0.0),
            Point::new(100.0, 50.0),
            Point::new(50.0, 100.0),
            Point::new(0.0, 50.0),
        ];

        assert!(point_in_polygon(Point::new(50.0, 50.0), &diamond));
        assert!(point_in_polygon(Point::new(70.0, 50.0), &diamond));
        assert!(!point_in_polygon(Point::new(5.0, 5.0), &diamond));
        assert!(!point_in_polygon(Point::new(95.0, 95.0), &diamond));
    }

    #[test]
    fn test_point_in_degenerate_polygon() {
        let segment = [Point::new(0.0, 0.0), Point::new(10.0, 10.0)];
        assert!(!point_in_polygon(Point::new(5.0, 5.0), &segment));
        assert!(!point_in_polygon(Point::new(0.0, 0.0), &[]));
    }

    #[test]
    fn test_rectangle_overlap() {
        let a = square();
        let b = Bounds::new_from_top_left(Point::new(50.0, 50.0), Size::new(100.0, 100.0));
        let far = Bounds::new_from_top_left(Point::new(500.0, 500.0), Size::new(1.0, 1.0));

        assert!(rectangles_intersect(a, b));
        assert!(!rectangles_intersect(a, far));

        let overlap = rectangle_intersection(a, b).unwrap();
        assert_eq!(overlap.min_point(), Point::new(50.0, 50.0));
        assert_eq!(overlap.to_size(), Size::new(50.0, 50.0));
        assert!(rectangle_intersection(a, far).is_none());
    }

    #[test]
    fn test_clamp_point_to_rectangle() {
        let rect = square();

        assert_eq!(clamp_point_to_rectangle(Point::new(-5.0, 50.0), rect), Point::new(0.0, 50.0));
        assert_eq!(clamp_point_to_rectangle(Point::new(150.0, 150.0), rect), Point::new(100.0, 100.0));
        assert_eq!(clamp_point_to_rectangle(Point::new(20.0, 30.0), rect), Point::new(20.0, 30.0));
    }
}
