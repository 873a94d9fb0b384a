//! Computed edge geometry.

use linework_core::geometry::{self, Bounds, Point};

/// Nearest segment of a path to a probe point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentInfo {
    /// Index of the segment; segment `i` joins path points `i` and `i + 1`.
    pub index: usize,
    /// Closest point on that segment.
    pub point: Point,
    /// Distance from the probe to `point`.
    pub distance: f32,
}

/// A routed polyline with its length and bounds.
///
/// Always holds at least two points.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgePath {
    points: Vec<Point>,
    length: f32,
    bounds: Bounds,
}

impl EdgePath {
    /// Builds a path from `source`, the intermediate `points`, and `target`.
    pub fn new(source: Point, points: impl IntoIterator<Item = Point>, target: Point) -> Self {
        let mut all = vec![source];
        all.extend(points);
        all.push(target);

        let length = geometry::polyline_length(&all);
        let bounds = geometry::polyline_bounds(&all).unwrap_or_default();
        Self {
            points: all,
            length,
            bounds,
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Sum of the segment lengths.
    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn source(&self) -> Point {
        self.points[0]
    }

    pub fn target(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    /// Consecutive point pairs.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    /// Returns true if `point` lies within `tolerance` of any segment.
    pub fn hit_test(&self, point: Point, tolerance: f32) -> bool {
        self.segments()
            .any(|(a, b)| geometry::point_to_line_distance(point, a, b) <= tolerance)
    }

    /// The nearest segment within `tolerance` of `point`.
    pub fn closest_segment(&self, point: Point, tolerance: f32) -> Option<SegmentInfo> {
        self.segments()
            .enumerate()
            .map(|(index, (a, b))| {
                let closest = geometry::closest_point_on_segment(point, a, b);
                SegmentInfo {
                    index,
                    point: closest,
                    distance: geometry::distance(point, closest),
                }
            })
            .filter(|info| info.distance <= tolerance)
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    /// Point at `position` along the path, measured as a fraction of the
    /// total length. `position` is clamped to `[0, 1]`.
    pub fn point_at(&self, position: f32) -> Point {
        let (index, t) = self.locate(position);
        let (a, b) = (self.points[index], self.points[index + 1]);
        a.lerp(b, t)
    }

    /// Unit direction of the segment at `position`; `(1, 0)` for a path of zero length.
    pub fn tangent_at(&self, position: f32) -> Point {
        let (index, _) = self.locate(position);
        let direction = self.points[index + 1].sub_point(self.points[index]);
        if direction.is_zero() {
            Point::new(1.0, 0.0)
        } else {
            geometry::normalize_vector(direction)
        }
    }

    /// The path vertex nearest to `point`.
    pub fn closest_point(&self, point: Point) -> Point {
        self.points
            .iter()
            .copied()
            .min_by(|a, b| {
                geometry::distance(point, *a).total_cmp(&geometry::distance(point, *b))
            })
            .unwrap_or(point)
    }

    /// Segment index and parameter within that segment for an arc-length fraction.
    fn locate(&self, position: f32) -> (usize, f32) {
        let last = self.points.len() - 2;
        if self.length <= 0.0 {
            return (0, 0.0);
        }

        let target = self.length * position.clamp(0.0, 1.0);
        let mut walked = 0.0;
        for (index, (a, b)) in self.segments().enumerate() {
            let segment = geometry::distance(a, b);
            if segment > 0.0 && walked + segment >= target {
                return (index, ((target - walked) / segment).clamp(0.0, 1.0));
            }
            walked += segment;
        }
        (last, 1.0)
    }
}
