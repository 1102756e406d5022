pub use anchor::Anchor;
pub use animation::{AnimationConfig, SegmentSweep, Wave};
pub use cgmath;
pub use curve::{ArcCurve, CurveType, SineCurve};
#[cfg(feature = "svg-io")]
pub use export::{ExportConfig, ExportError, PlacedLink, SheetLayout};
pub use freehand::{prepare_free_curve, StrokeRecorder};
pub use mechanism::{build, Geometry, Integrity, IntegrityLevel, Mechanism};
pub use node::{Joint, JointId, Link, LinkKind, NodeId, ParseNodeIdError, Pivot, Side};
pub use params::{MechanismParams, ParamsUpdate};
pub use physics::{PhysicsGraph, PhysicsJoint, Rod};
pub use trail::{Trail, TrailPoint, TRAIL_CAPACITY};
pub use util::Interval;

mod anchor;
pub mod animation;
pub mod curve;
mod debug;
#[cfg(feature = "svg-io")]
pub mod export;
pub mod freehand;
pub mod math;
mod mechanism;
mod node;
mod params;
mod physics;
mod trail;
mod util;
