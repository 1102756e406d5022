//! Time-driven parameter animation.
//!
//! An [AnimationConfig] maps the time since the animation started onto a [ParamsUpdate],
//! which the caller feeds to [Mechanism::set_params](crate::Mechanism::set_params) each frame.

use crate::params::ParamsUpdate;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// A sine oscillation around a base value.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Wave {
    pub base: f64,
    pub amplitude: f64,
    /// Oscillations per second.
    pub frequency: f64,
}

impl Wave {
    pub fn new(base: f64, amplitude: f64, frequency: f64) -> Self {
        Self {
            base,
            amplitude,
            frequency,
        }
    }

    /// The phase of the oscillation, in `[-1, 1]`, after `elapsed` seconds.
    fn phase(frequency: f64, elapsed: f64) -> f64 {
        (elapsed * frequency * TAU).sin()
    }

    pub fn value_at(&self, elapsed: f64) -> f64 {
        self.base + Self::phase(self.frequency, elapsed) * self.amplitude
    }
}

/// Sweeps the segment count back and forth between `min` and `max`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SegmentSweep {
    pub min: usize,
    pub max: usize,
    /// Sweeps per second.
    pub frequency: f64,
}

impl SegmentSweep {
    pub fn new(min: usize, max: usize, frequency: f64) -> Self {
        Self {
            min,
            max,
            frequency,
        }
    }

    /// The segment count after `elapsed` seconds, rounded to the nearest whole segment.
    pub fn value_at(&self, elapsed: f64) -> usize {
        let s = 0.5 * (Wave::phase(self.frequency, elapsed) + 1.0);
        let (min, max) = (self.min as f64, self.max as f64);
        (min + s * (max - min)).round().max(1.0) as usize
    }
}

/// Which parameters are animated, and how. Disabled animations are `None`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AnimationConfig {
    pub curvature_wave: Option<Wave>,
    pub length_pulse: Option<Wave>,
    pub segment_sweep: Option<SegmentSweep>,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            curvature_wave: Some(Wave::new(1.0, 0.8, 0.3)),
            length_pulse: None,
            segment_sweep: None,
        }
    }
}

impl AnimationConfig {
    /// A slow, shallow curvature wave.
    pub fn gentle() -> Self {
        Self {
            curvature_wave: Some(Wave::new(1.0, 0.3, 0.2)),
            length_pulse: None,
            segment_sweep: None,
        }
    }

    pub fn dynamic() -> Self {
        Self {
            curvature_wave: Some(Wave::new(1.2, 0.8, 0.5)),
            length_pulse: Some(Wave::new(320.0, 60.0, 0.3)),
            segment_sweep: Some(SegmentSweep::new(4, 7, 0.08)),
        }
    }

    pub fn crazy() -> Self {
        Self {
            curvature_wave: Some(Wave::new(1.5, 1.2, 0.8)),
            length_pulse: Some(Wave::new(350.0, 100.0, 0.6)),
            segment_sweep: Some(SegmentSweep::new(3, 10, 0.12)),
        }
    }

    /// Curvature and length rising and falling together.
    pub fn breathing() -> Self {
        Self {
            curvature_wave: Some(Wave::new(1.0, 0.4, 0.1)),
            length_pulse: Some(Wave::new(300.0, 30.0, 0.1)),
            segment_sweep: None,
        }
    }

    /// Computes the animated parameters `elapsed` seconds after the animation started.
    ///
    /// Parameters that are not animated are left as `None`.
    pub fn params_at(&self, elapsed: f64) -> ParamsUpdate {
        ParamsUpdate {
            curvature: self.curvature_wave.map(|wave| wave.value_at(elapsed)),
            curve_length: self.length_pulse.map(|wave| wave.value_at(elapsed)),
            segments: self.segment_sweep.map(|sweep| sweep.value_at(elapsed)),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn default_animates_curvature_only() {
        let config = AnimationConfig::default();
        let start = config.params_at(0.0);
        assert_approx_eq!(start.curvature.unwrap(), 1.0);
        assert!(start.curve_length.is_none());
        assert!(start.segments.is_none());
        assert!(start.link_length.is_none());
        assert!(start.curve_type.is_none());

        // A quarter period at 0.3 Hz is the crest of the wave.
        let crest = config.params_at(1.0 / 1.2);
        assert_approx_eq!(crest.curvature.unwrap(), 1.8);
        let trough = config.params_at(3.0 / 1.2);
        assert_approx_eq!(trough.curvature.unwrap(), 0.2);
    }

    #[test]
    fn length_pulse() {
        let pulse = Wave::new(320.0, 60.0, 0.3);
        assert_approx_eq!(pulse.value_at(0.0), 320.0);
        assert_approx_eq!(pulse.value_at(1.0 / 1.2), 380.0);
        assert_approx_eq!(pulse.value_at(1.0 / 0.3), 320.0, 1e-9);
    }

    #[test]
    fn segment_sweep_rounds_within_range() {
        let sweep = SegmentSweep::new(3, 8, 0.1);
        // Halfway between 3 and 8 rounds up.
        assert_eq!(sweep.value_at(0.0), 6);
        assert_eq!(sweep.value_at(2.5), 8);
        assert_eq!(sweep.value_at(7.5), 3);
        for i in 0..200 {
            let segments = sweep.value_at(i as f64 * 0.137);
            assert!((3..=8).contains(&segments));
        }
    }

    #[test]
    fn presets_stay_in_valid_ranges() {
        for config in [
            AnimationConfig::gentle(),
            AnimationConfig::dynamic(),
            AnimationConfig::crazy(),
            AnimationConfig::breathing(),
        ] {
            for i in 0..100 {
                let update = config.params_at(i as f64 * 0.31);
                assert!(update.curvature.unwrap() > 0.0);
                if let Some(length) = update.curve_length {
                    assert!(length > 0.0);
                }
                if let Some(segments) = update.segments {
                    assert!(segments >= 3);
                }
            }
        }
    }
}
