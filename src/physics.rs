//! The hand-off format for an external constraint solver.
//!
//! The solver treats joints as bodies and links as fixed-length distance constraints,
//! then writes the simulated joint positions back with
//! [Mechanism::apply_physics_positions](crate::Mechanism::apply_physics_positions).

use crate::node::{Joint, Link};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A joint as seen by the solver.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PhysicsJoint {
    pub id: String,
    pub x: f64,
    pub y: f64,
}

/// A fixed-length constraint between the joints with ids `a` and `b`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rod {
    pub a: String,
    pub b: String,
}

/// The joints and rods of a mechanism.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PhysicsGraph {
    pub joints: Vec<PhysicsJoint>,
    pub rods: Vec<Rod>,
}

impl PhysicsGraph {
    pub(crate) fn new(joints: &[Joint], links: &[Link]) -> Self {
        let joints = joints
            .iter()
            .map(|j| PhysicsJoint {
                id: j.id.to_string(),
                x: j.pos.x,
                y: j.pos.y,
            })
            .collect();
        let rods = links
            .iter()
            .map(|link| Rod {
                a: link.start.to_string(),
                b: link.end.to_string(),
            })
            .collect();
        Self { joints, rods }
    }
}
