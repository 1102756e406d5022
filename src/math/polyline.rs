use super::{distance_to_line, Point2d};
use crate::util::Interval;
use cgmath::prelude::*;
use itertools::Itertools;

/// A resampled point closer than this fraction of a step to the end of the polyline
/// is dropped in favour of the exact end point.
const END_TOLERANCE: f64 = 1e-3;

/// Computes the total length of a polyline.
pub fn polyline_length(points: &[Point2d]) -> f64 {
    points
        .iter()
        .tuple_windows()
        .map(|(a, b)| a.distance(*b))
        .sum()
}

/// Simplifies a polyline with the Ramer-Douglas-Peucker algorithm.
///
/// Interior points closer than `epsilon` to the chord of the run they belong to are removed.
/// The first and last points are always kept, and polylines of two points or fewer
/// are returned unchanged.
pub fn simplify_polyline(points: &[Point2d], epsilon: f64) -> Vec<Point2d> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[points.len() - 1] = true;
    mark_farthest(points, epsilon, 0, points.len() - 1, &mut keep);

    points
        .iter()
        .zip(keep)
        .filter_map(|(point, keep)| keep.then_some(*point))
        .collect()
}

fn mark_farthest(points: &[Point2d], epsilon: f64, start: usize, end: usize, keep: &mut [bool]) {
    if end <= start + 1 {
        return;
    }

    let (a, b) = (points[start], points[end]);
    let (idx, dist) = (start + 1..end)
        .map(|i| (i, distance_to_line(points[i], a, b)))
        .fold((start, -1.0), |best, cur| if cur.1 > best.1 { cur } else { best });

    if dist > epsilon {
        keep[idx] = true;
        mark_farthest(points, epsilon, start, idx, keep);
        mark_farthest(points, epsilon, idx, end, keep);
    }
}

/// Resamples a polyline so that its points are `step` units apart along its length.
///
/// The first and last points of the polyline are preserved exactly;
/// the final interval may be shorter than `step`.
pub fn resample_polyline(points: &[Point2d], step: f64) -> Vec<Point2d> {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return vec![];
    };
    if points.len() < 2 || step <= 0.0 || step.is_nan() {
        return points.to_vec();
    }

    let end = polyline_length(points) - END_TOLERANCE * step;
    let mut resampled = vec![*first];
    let mut count = 1;
    let mut walked = 0.0;

    for (a, b) in points.iter().tuple_windows() {
        let span = Interval::new(walked, walked + a.distance(*b));
        loop {
            let target = count as f64 * step;
            if target >= span.max || target >= end {
                break;
            }
            resampled.push(*a + (*b - *a) * span.inv_lerp(target));
            count += 1;
        }
        walked = span.max;
    }

    resampled.push(*last);
    resampled
}
