use crate::math::{Point2d, Vector2d};
use crate::node::{Joint, NodeId, Pivot};
use cgmath::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Corrections shorter than this are not applied.
const ANCHOR_EPSILON: f64 = 1e-9;

/// Pins a node of the mechanism to a fixed position.
///
/// The mechanism is translated as a rigid body after every rebuild
/// so that the node lands on `target`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Anchor {
    /// The anchored joint or pivot.
    pub node: NodeId,
    /// Where the node should be, in world space.
    pub target: Point2d,
}

impl Anchor {
    pub fn new(node: impl Into<NodeId>, target: Point2d) -> Self {
        Self {
            node: node.into(),
            target,
        }
    }

    /// Computes the translation that moves the anchored node onto the target.
    ///
    /// Returns `None` if the node no longer exists,
    /// or if it is already close enough to the target.
    pub fn correction(&self, joints: &[Joint], pivots: &[Pivot]) -> Option<Vector2d> {
        let Some(current) = resolve(self.node, joints, pivots) else {
            log::debug!("anchored node {} not found, skipping correction", self.node);
            return None;
        };
        let delta = self.target - current;
        (delta.magnitude() > ANCHOR_EPSILON).then_some(delta)
    }
}

/// Looks up the position of a node, searching the joints before the pivots.
pub fn resolve(node: NodeId, joints: &[Joint], pivots: &[Pivot]) -> Option<Point2d> {
    match node {
        NodeId::Joint(id) => joints.iter().find(|j| j.id == id).map(|j| j.pos),
        NodeId::Pivot(segment) => pivots.iter().find(|p| p.segment == segment).map(|p| p.pos),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::node::{JointId, Link, LinkKind};
    use assert_approx_eq::assert_approx_eq;

    fn joints() -> Vec<Joint> {
        vec![
            Joint {
                id: JointId::left(0),
                pos: Point2d::new(0.0, 0.0),
            },
            Joint {
                id: JointId::right(0),
                pos: Point2d::new(10.0, 0.0),
            },
        ]
    }

    fn pivots() -> Vec<Pivot> {
        vec![Pivot {
            segment: 3,
            pos: Point2d::new(5.0, 5.0),
            links: [Link::crossing(3, LinkKind::A), Link::crossing(3, LinkKind::B)],
        }]
    }

    #[test]
    fn correction_towards_target() {
        let anchor = Anchor::new(JointId::right(0), Point2d::new(12.0, -1.0));
        let delta = anchor.correction(&joints(), &pivots()).unwrap();
        assert_approx_eq!(delta.x, 2.0);
        assert_approx_eq!(delta.y, -1.0);
    }

    #[test]
    fn pivot_anchor() {
        let anchor = Anchor::new(NodeId::Pivot(3), Point2d::new(5.0, 8.0));
        let delta = anchor.correction(&joints(), &pivots()).unwrap();
        assert_approx_eq!(delta.x, 0.0);
        assert_approx_eq!(delta.y, 3.0);
    }

    #[test]
    fn no_correction_when_in_place() {
        let anchor = Anchor::new(JointId::left(0), Point2d::new(0.0, 0.0));
        assert!(anchor.correction(&joints(), &pivots()).is_none());
    }

    #[test]
    fn missing_node_lapses() {
        let anchor = Anchor::new(NodeId::Pivot(0), Point2d::new(0.0, 0.0));
        assert!(anchor.correction(&joints(), &pivots()).is_none());
        assert!(resolve(JointId::left(5).into(), &joints(), &pivots()).is_none());
    }
}
