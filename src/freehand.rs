//! Preparation of hand-drawn guide curves.
//!
//! Pointer-drag paths are dense and noisy. They are simplified and then resampled
//! at a fixed spacing, so that the mechanism can treat them exactly like a generated curve.

use crate::math::{bounding_diagonal, resample_polyline, simplify_polyline, Point2d};
use cgmath::prelude::*;

/// The smallest simplification tolerance, in mechanism units.
const MIN_EPSILON: f64 = 0.8;

/// The simplification tolerance as a fraction of the stroke's bounding diagonal.
const EPSILON_FRACTION: f64 = 0.01;

/// The spacing of the resampled curve, in mechanism units.
pub const RESAMPLE_STEP: f64 = 2.0;

/// The minimum distance between consecutive captured pointer samples.
const MIN_SAMPLE_DISTANCE: f64 = 2.0;

/// Turns a raw stroke into a clean guide curve.
///
/// Returns `None` if fewer than two points were captured,
/// in which case the caller should fall back to a generated curve.
pub fn prepare_free_curve(raw: &[Point2d]) -> Option<Vec<Point2d>> {
    if raw.len() < 2 {
        return None;
    }
    let epsilon = f64::max(MIN_EPSILON, bounding_diagonal(raw) * EPSILON_FRACTION);
    let simplified = simplify_polyline(raw, epsilon);
    log::trace!(
        "simplified stroke from {} to {} points (epsilon {:.3})",
        raw.len(),
        simplified.len(),
        epsilon
    );
    Some(resample_polyline(&simplified, RESAMPLE_STEP))
}

/// Captures the points of a stroke as the pointer is dragged.
#[derive(Clone, Debug, Default)]
pub struct StrokeRecorder {
    points: Vec<Point2d>,
}

impl StrokeRecorder {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Discards any captured points and starts a new stroke at `point`.
    pub fn begin(&mut self, point: Point2d) {
        self.points.clear();
        self.points.push(point);
    }

    /// Adds a pointer sample, unless it is too close to the previous one.
    ///
    /// Returns true if the sample was captured.
    pub fn extend(&mut self, point: Point2d) -> bool {
        match self.points.last() {
            Some(last) if last.distance(point) <= MIN_SAMPLE_DISTANCE => false,
            _ => {
                self.points.push(point);
                true
            }
        }
    }

    /// The points captured so far.
    pub fn points(&self) -> &[Point2d] {
        &self.points
    }

    /// Ends the stroke and prepares it as a guide curve.
    pub fn finish(&mut self) -> Option<Vec<Point2d>> {
        let raw = std::mem::take(&mut self.points);
        prepare_free_curve(&raw)
    }
}
