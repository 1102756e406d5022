use crate::curve::CurveType;
use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The parameters that, together with the guide curve and centre, determine a mechanism's geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MechanismParams {
    /// The number of crossing segments, at least 1.
    pub segments: usize,
    /// The distance between the left and right joint of each level.
    pub link_length: f64,
    /// Scales the bulge of an arc, or the amplitude of a sine wave.
    pub curvature: f64,
    /// The nominal length of a generated curve.
    pub curve_length: f64,
    /// The family of guide curve.
    pub curve_type: CurveType,
}

impl Default for MechanismParams {
    fn default() -> Self {
        Self {
            segments: 4,
            link_length: 60.0,
            curvature: 1.0,
            curve_length: 300.0,
            curve_type: CurveType::Arc,
        }
    }
}

impl MechanismParams {
    /// Picks a random but well-behaved set of parameters.
    pub fn random(rng: &mut impl Rng) -> Self {
        let curve_type = if rng.gen_bool(0.5) {
            CurveType::Arc
        } else {
            CurveType::Sine
        };
        Self {
            segments: rng.gen_range(3..=10),
            link_length: rng.gen_range(40..100) as f64,
            curvature: rng.gen_range(0.5..3.0),
            curve_length: rng.gen_range(200..450) as f64,
            curve_type,
        }
    }

    /// Applies a partial update, coercing values to their valid ranges.
    pub fn apply(&mut self, update: &ParamsUpdate) {
        if let Some(segments) = update.segments {
            self.segments = segments;
        }
        if let Some(link_length) = update.link_length {
            self.link_length = link_length;
        }
        if let Some(curvature) = update.curvature {
            self.curvature = curvature;
        }
        if let Some(curve_length) = update.curve_length {
            self.curve_length = curve_length;
        }
        if let Some(curve_type) = update.curve_type {
            self.curve_type = curve_type;
        }
        *self = self.coerced();
    }

    /// Clamps the parameters to safe minimums.
    ///
    /// Lengths become non-negative, non-finite numbers are replaced with zero,
    /// and there is always at least one segment.
    pub fn coerced(&self) -> Self {
        let finite = |x: f64| if x.is_finite() { x } else { 0.0 };
        Self {
            segments: self.segments.max(1),
            link_length: finite(self.link_length).max(0.0),
            curvature: finite(self.curvature),
            curve_length: finite(self.curve_length).max(0.0),
            curve_type: self.curve_type,
        }
    }
}

/// A partial update to [MechanismParams]. Fields left as `None` are unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParamsUpdate {
    pub segments: Option<usize>,
    pub link_length: Option<f64>,
    pub curvature: Option<f64>,
    pub curve_length: Option<f64>,
    pub curve_type: Option<CurveType>,
}
