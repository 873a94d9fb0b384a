//! Vector algebra on [`Point`] values.

use super::{EPSILON, Point};

/// Euclidean length of a vector
pub fn vector_length(v: Point) -> f32 {
    v.hypot()
}

/// Unit vector in the direction of `v`.
///
/// A zero-length vector normalizes to `(0, 0)`.
///
/// # Examples
///
/// ```
/// # use linework_core::geometry::{Point, normalize_vector};
/// assert_eq!(normalize_vector(Point::new(3.0, 4.0)), Point::new(0.6, 0.8));
/// assert_eq!(normalize_vector(Point::new(0.0, 0.0)), Point::new(0.0, 0.0));
/// ```
pub fn normalize_vector(v: Point) -> Point {
    let length = vector_length(v);
    if length < EPSILON {
        return Point::default();
    }
    Point::new(v.x() / length, v.y() / length)
}

pub fn dot_product(a: Point, b: Point) -> f32 {
    a.x() * b.x() + a.y() * b.y()
}

/// Z component of the 3D cross product of two planar vectors
pub fn cross_product(a: Point, b: Point) -> f32 {
    a.x() * b.y() - a.y() * b.x()
}

/// Rotates `point` around `center` by `angle` radians.
///
/// With y pointing down, a positive angle turns clockwise on screen.
pub fn rotate_point(point: Point, center: Point, angle: f32) -> Point {
    let (sin, cos) = angle.sin_cos();
    let offset = point.sub_point(center);
    Point::new(
        center.x() + offset.x() * cos - offset.y() * sin,
        center.y() + offset.x() * sin + offset.y() * cos,
    )
}
