//! Mathematical structs and functions.

use cgmath::{Point2, Vector2};
pub use curve::ParametricCurve2d;
pub use polyline::{polyline_length, resample_polyline, simplify_polyline};
pub use util::*;

mod curve;
mod polyline;
mod util;

/// A 2D point
pub type Point2d = Point2<f64>;

/// A 2D vector
pub type Vector2d = Vector2<f64>;
