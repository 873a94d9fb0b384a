//! Bezier curve evaluation.

use super::Point;

/// Point on a cubic bezier at parameter `t`, clamped to `[0, 1]`.
///
/// # Examples
///
/// ```
/// # use linework_core::geometry::{Point, cubic_bezier_point};
/// let p0 = Point::new(0.0, 0.0);
/// let p3 = Point::new(30.0, 0.0);
/// let mid = cubic_bezier_point(p0, Point::new(10.0, 30.0), Point::new(20.0, 30.0), p3, 0.5);
/// assert_eq!(mid, Point::new(15.0, 22.5));
/// ```
pub fn cubic_bezier_point(p0: Point, p1: Point, p2: Point, p3: Point, t: f32) -> Point {
    let t = t.clamp(0.0, 1.0);
    let u = 1.0 - t;
    let (b0, b1, b2, b3) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
    Point::new(
        b0 * p0.x() + b1 * p1.x() + b2 * p2.x() + b3 * p3.x(),
        b0 * p0.y() + b1 * p1.y() + b2 * p2.y() + b3 * p3.y(),
    )
}

/// Point on a quadratic bezier at parameter `t`, clamped to `[0, 1]`.
pub fn quadratic_bezier_point(p0: Point, p1: Point, p2: Point, t: f32) -> Point {
    let t = t.clamp(0.0, 1.0);
    let u = 1.0 - t;
    let (b0, b1, b2) = (u * u, 2.0 * u * t, t * t);
    Point::new(
        b0 * p0.x() + b1 * p1.x() + b2 * p2.x(),
        b0 * p0.y() + b1 * p1.y() + b2 * p2.y(),
    )
}

/// Samples a cubic bezier into `segments + 1` points, endpoints included.
///
/// Zero segments is treated as one.
pub fn flatten_cubic_bezier(
    p0: Point,
    p1: Point,
    p2: Point,
    p3: Point,
    segments: usize,
) -> Vec<Point> {
    let segments = segments.max(1);
    (0..=segments)
        .map(|i| cubic_bezier_point(p0, p1, p2, p3, i as f32 / segments as f32))
        .collect()
}
