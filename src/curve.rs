//! Generated guide curves.

use crate::math::{ParametricCurve2d, Point2d};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// The number of intervals sampled along an arc.
const ARC_INTERVALS: usize = 200;

/// The number of intervals sampled along a sine wave.
const SINE_INTERVALS: usize = 400;

/// The family of curve a mechanism follows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CurveType {
    /// A half-period bulge whose height is scaled by the curvature.
    #[default]
    Arc,
    /// One full period of a sine wave whose amplitude is scaled by the curvature.
    Sine,
    /// A curve drawn by hand. Falls back to [CurveType::Arc] when none has been drawn.
    Free,
}

/// A half-circle-like profile.
///
/// The horizontal span is driven by the nominal length,
/// and the vertical bulge is scaled by the curvature.
#[derive(Clone, Copy, Debug)]
pub struct ArcCurve {
    radius: f64,
    curvature: f64,
}

impl ArcCurve {
    pub fn new(length: f64, curvature: f64) -> Self {
        Self {
            radius: f64::max(1.0, length / PI),
            curvature,
        }
    }
}

impl ParametricCurve2d for ArcCurve {
    fn sample(&self, t: f64) -> Point2d {
        let theta = PI * t;
        Point2d::new(
            (theta - 0.5 * PI) * 2.0 * self.radius,
            -theta.sin() * self.radius * self.curvature,
        )
    }
}

/// One period of a sine wave centred on the origin.
#[derive(Clone, Copy, Debug)]
pub struct SineCurve {
    length: f64,
    amplitude: f64,
}

impl SineCurve {
    pub fn new(length: f64, amplitude: f64) -> Self {
        Self {
            length,
            amplitude: (length / 6.0) * amplitude * 0.5,
        }
    }
}

impl ParametricCurve2d for SineCurve {
    fn sample(&self, t: f64) -> Point2d {
        Point2d::new(
            (t - 0.5) * self.length,
            -(2.0 * PI * t).sin() * self.amplitude,
        )
    }
}

/// Samples a generated curve of the given family.
///
/// [CurveType::Free] has no generator of its own and produces an arc.
pub fn generate(curve_type: CurveType, length: f64, curvature: f64) -> Vec<Point2d> {
    match curve_type {
        CurveType::Sine => SineCurve::new(length, curvature).sample_uniform(SINE_INTERVALS),
        CurveType::Arc | CurveType::Free => {
            ArcCurve::new(length, curvature).sample_uniform(ARC_INTERVALS)
        }
    }
}
