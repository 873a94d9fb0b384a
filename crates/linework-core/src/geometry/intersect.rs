//! Segment and circle intersections.

use super::{EPSILON, Point};

/// Relative tolerance used to classify two circles as tangent.
const TANGENT_TOLERANCE: f32 = 1e-5;

/// Intersection point of segments `a1`-`a2` and `b1`-`b2`.
///
/// Returns `None` when the segments are parallel (including collinear and
/// zero-length segments) or when the lines cross outside either segment.
///
/// # Examples
///
/// ```
/// # use linework_core::geometry::{Point, line_intersection};
/// let hit = line_intersection(
///     Point::new(0.0, 0.0),
///     Point::new(10.0, 10.0),
///     Point::new(0.0, 10.0),
///     Point::new(10.0, 0.0),
/// );
/// assert_eq!(hit, Some(Point::new(5.0, 5.0)));
/// ```
pub fn line_intersection(a1: Point, a2: Point, b1: Point, b2: Point) -> Option<Point> {
    let da = a2.sub_point(a1);
    let db = b2.sub_point(b1);
    let denominator = da.x() * db.y() - da.y() * db.x();
    if denominator.abs() < EPSILON {
        return None;
    }

    let offset = b1.sub_point(a1);
    let t = (offset.x() * db.y() - offset.y() * db.x()) / denominator;
    let u = (offset.x() * da.y() - offset.y() * da.x()) / denominator;
    if !(0.0..=1.0).contains(&t) || !(0.0..=1.0).contains(&u) {
        return None;
    }

    Some(a1.lerp(a2, t))
}

/// Intersection points of two circles.
///
/// Returns two points for crossing circles, a single point for tangent ones
/// (internally or externally), and an empty vector when the circles are
/// apart, one contains the other, or the centers coincide.
///
/// # Examples
///
/// ```
/// # use linework_core::geometry::{Point, circle_intersection};
/// let tangent = circle_intersection(Point::new(0.0, 0.0), 5.0, Point::new(10.0, 0.0), 5.0);
/// assert_eq!(tangent, vec![Point::new(5.0, 0.0)]);
///
/// let apart = circle_intersection(Point::new(0.0, 0.0), 5.0, Point::new(20.0, 0.0), 5.0);
/// assert!(apart.is_empty());
/// ```
pub fn circle_intersection(c1: Point, r1: f32, c2: Point, r2: f32) -> Vec<Point> {
    let d = super::distance(c1, c2);
    if d < EPSILON {
        return Vec::new();
    }

    let sum = r1 + r2;
    let diff = (r1 - r2).abs();
    let tolerance = TANGENT_TOLERANCE * sum.max(1.0);
    if d > sum + tolerance || d < diff - tolerance {
        return Vec::new();
    }

    // Distance from c1 along the center line to the chord joining the intersections.
    let a = (r1 * r1 - r2 * r2 + d * d) / (2.0 * d);
    let direction = c2.sub_point(c1).scale(1.0 / d);
    let base = c1.add_point(direction.scale(a));

    if (d - sum).abs() <= tolerance || (d - diff).abs() <= tolerance {
        return vec![base];
    }

    let h = (r1 * r1 - a * a).max(0.0).sqrt();
    let offset = direction.perpendicular().scale(h);
    vec![base.add_point(offset), base.sub_point(offset)]
}
