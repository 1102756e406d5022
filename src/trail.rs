use crate::math::{Point2d, Vector2d};
use crate::node::Joint;
use cgmath::prelude::*;
use smallvec::SmallVec;
use std::collections::VecDeque;

/// The maximum number of samples kept in a trail.
pub const TRAIL_CAPACITY: usize = 180;

/// A sampled position of the mechanism's tip.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailPoint {
    pub pos: Point2d,
    /// The time of the sample, in seconds since the mechanism was created.
    pub t: f64,
}

/// A bounded history of the mechanism's tip, the midpoint of its two top-level joints.
#[derive(Clone, Debug, Default)]
pub struct Trail {
    points: VecDeque<TrailPoint>,
}

impl Trail {
    pub fn new() -> Self {
        Default::default()
    }

    /// Appends the current tip position, evicting the oldest sample once full.
    ///
    /// Does nothing if the mechanism has fewer than two joints at level `segments`.
    pub fn record(&mut self, joints: &[Joint], segments: usize, t: f64) {
        let tops = joints
            .iter()
            .filter(|j| j.level() == segments)
            .map(|j| j.pos)
            .collect::<SmallVec<[Point2d; 2]>>();
        let [a, b, ..] = tops.as_slice() else {
            return;
        };
        self.points.push_back(TrailPoint {
            pos: a.midpoint(*b),
            t,
        });
        while self.points.len() > TRAIL_CAPACITY {
            self.points.pop_front();
        }
    }

    /// Translates every sample by `delta`.
    pub fn translate(&mut self, delta: Vector2d) {
        for point in &mut self.points {
            point.pos += delta;
        }
    }

    /// Discards every sample.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterates over the samples from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &TrailPoint> + '_ {
        self.points.iter()
    }

    /// The most recent sample.
    pub fn last(&self) -> Option<&TrailPoint> {
        self.points.back()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::node::JointId;
    use assert_approx_eq::assert_approx_eq;

    fn top(level: usize, y: f64) -> [Joint; 2] {
        [
            Joint {
                id: JointId::left(level),
                pos: Point2d::new(-10.0, y),
            },
            Joint {
                id: JointId::right(level),
                pos: Point2d::new(20.0, y),
            },
        ]
    }

    #[test]
    fn records_the_tip() {
        let mut trail = Trail::new();
        let mut joints = top(0, 0.0).to_vec();
        joints.extend(top(1, 7.0));
        trail.record(&joints, 1, 0.5);

        let point = trail.last().unwrap();
        assert_approx_eq!(point.pos.x, 5.0);
        assert_approx_eq!(point.pos.y, 7.0);
        assert_eq!(point.t, 0.5);
    }

    #[test]
    fn ignores_incomplete_mechanisms() {
        let mut trail = Trail::new();
        trail.record(&[], 4, 0.0);
        trail.record(&top(1, 0.0)[..1], 1, 0.0);
        assert!(trail.is_empty());
    }

    #[test]
    fn evicts_oldest_samples() {
        let mut trail = Trail::new();
        for i in 0..TRAIL_CAPACITY + 20 {
            trail.record(&top(2, i as f64), 2, i as f64);
        }
        assert_eq!(trail.len(), TRAIL_CAPACITY);
        assert_eq!(trail.iter().next().unwrap().t, 20.0);
        assert_eq!(trail.last().unwrap().t, (TRAIL_CAPACITY + 19) as f64);
    }

    #[test]
    fn translation() {
        let mut trail = Trail::new();
        trail.record(&top(0, 1.0), 0, 0.0);
        trail.translate(Vector2d::new(3.0, -4.0));
        let point = trail.last().unwrap();
        assert_approx_eq!(point.pos.x, 8.0);
        assert_approx_eq!(point.pos.y, -3.0);
        trail.clear();
        assert!(trail.is_empty());
    }
}
