use super::{Point2d, Vector2d};
use cgmath::prelude::*;

/// Determinants smaller than this are treated as parallel lines.
pub const PARALLEL_EPSILON: f64 = 1e-6;

/// Rotates a vector 90 degrees counter-clockwise.
pub fn rot90(vec: Vector2d) -> Vector2d {
    Vector2d::new(-vec.y, vec.x)
}

/// Finds the intersection of the line through `p1` and `p2`
/// with the line through `p3` and `p4`.
///
/// The lines are treated as infinite, so the intersection may lie outside of either segment.
/// Returns `None` if the lines are parallel, either of them is degenerate,
/// or any coordinate is not finite.
pub fn intersect_lines(p1: Point2d, p2: Point2d, p3: Point2d, p4: Point2d) -> Option<Point2d> {
    let d = (p1.x - p2.x) * (p3.y - p4.y) - (p1.y - p2.y) * (p3.x - p4.x);
    // Also rejects a NaN determinant.
    if !(d.abs() >= PARALLEL_EPSILON) {
        return None;
    }
    let t = ((p1.x - p3.x) * (p3.y - p4.y) - (p1.y - p3.y) * (p3.x - p4.x)) / d;
    let p = p1 + (p2 - p1) * t;
    (p.x.is_finite() && p.y.is_finite()).then_some(p)
}

/// Computes the perpendicular distance from `point` to the infinite line through `a` and `b`.
///
/// If `a` and `b` coincide, the distance to `a` is returned instead.
pub fn distance_to_line(point: Point2d, a: Point2d, b: Point2d) -> f64 {
    let dir = b - a;
    let len = dir.magnitude();
    if len < f64::EPSILON {
        return point.distance(a);
    }
    rot90(dir).dot(point - a).abs() / len
}

/// Computes the length of the diagonal of the axis-aligned box bounding the points.
pub fn bounding_diagonal(points: &[Point2d]) -> f64 {
    let mut iter = points.iter();
    let Some(first) = iter.next() else {
        return 0.0;
    };
    let (min, max) = iter.fold((*first, *first), |(min, max), p| {
        (
            Point2d::new(min.x.min(p.x), min.y.min(p.y)),
            Point2d::new(max.x.max(p.x), max.y.max(p.y)),
        )
    });
    (max - min).magnitude()
}
