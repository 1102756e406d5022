use crate::util::Interval;
use super::Point2d;

/// A parametric curve in 2D space.
pub trait ParametricCurve2d {
    /// Samples the parametric curve.
    fn sample(&self, t: f64) -> Point2d;

    /// Returns the minimum and maximum t-values that define the bounds of the curve.
    fn bounds(&self) -> Interval<f64> {
        Interval::new(0.0, 1.0)
    }

    /// Samples the curve at `count + 1` values of `t` spaced evenly across its bounds,
    /// including both ends.
    fn sample_uniform(&self, count: usize) -> Vec<Point2d> {
        let bounds = self.bounds();
        let count = count.max(1);
        (0..=count)
            .map(|i| bounds.lerp(i as f64 / count as f64))
            .map(|t| self.sample(t))
            .collect()
    }
}

impl<T: ParametricCurve2d + ?Sized> ParametricCurve2d for &T {
    fn sample(&self, t: f64) -> Point2d {
        (**self).sample(t)
    }

    fn bounds(&self) -> Interval<f64> {
        (**self).bounds()
    }
}
