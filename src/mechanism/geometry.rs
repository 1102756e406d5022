use crate::debug::debug_crossing;
use crate::math::{intersect_lines, rot90, Point2d, Vector2d};
use crate::node::{Joint, JointId, Link, LinkKind, Pivot};
use crate::params::MechanismParams;
use cgmath::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The joints, links and pivots derived from a guide curve.
#[derive(Clone, Debug, Default)]
pub struct Geometry {
    /// Two joints per level, ordered `L0, R0, L1, R1, ...`.
    pub joints: Vec<Joint>,
    /// Two links per resolved segment.
    pub links: Vec<Link>,
    /// At most one pivot per segment.
    pub pivots: Vec<Pivot>,
}

/// Builds the joints, links and pivots of a mechanism following `curve`.
///
/// # Parameters
/// * `params` - The mechanism parameters; should already be coerced
/// * `center` - The world space position of the curve's origin
/// * `curve` - The guide curve in mechanism-local space
///
/// An empty curve produces an empty mechanism.
pub fn build(params: &MechanismParams, center: Point2d, curve: &[Point2d]) -> Geometry {
    if curve.is_empty() {
        return Geometry::default();
    }
    let segments = params.segments.max(1);
    let joints = place_joints(curve, center, segments, params.link_length);
    let (links, pivots) = derive_crossings(&joints, segments);
    Geometry {
        joints,
        links,
        pivots,
    }
}

/// Places the left and right joints of every level along the curve.
fn place_joints(curve: &[Point2d], center: Point2d, segments: usize, link_length: f64) -> Vec<Joint> {
    let half = 0.5 * link_length;
    let last = curve.len() - 1;
    (0..=segments)
        .flat_map(|level| {
            let t = level as f64 / segments as f64;
            let idx = usize::min((t * last as f64).floor() as usize, last);
            let origin = center + curve[idx].to_vec();
            let normal = normal_at(curve, idx);
            [
                Joint {
                    id: JointId::left(level),
                    pos: origin - normal * half,
                },
                Joint {
                    id: JointId::right(level),
                    pos: origin + normal * half,
                },
            ]
        })
        .collect()
}

/// Estimates the unit normal of a sampled curve with a central difference.
///
/// The stencil is clamped at the ends of the curve.
/// A zero tangent yields a zero normal.
fn normal_at(curve: &[Point2d], idx: usize) -> Vector2d {
    let a = curve[idx.saturating_sub(1)];
    let b = curve[usize::min(idx + 1, curve.len() - 1)];
    let tangent = b - a;
    let len = tangent.magnitude();
    rot90(tangent) / if len > 0.0 { len } else { 1.0 }
}

/// Finds the crossing point of the two rods of every segment.
///
/// `joints` must be in the order produced by [build].
/// Segments whose rods are parallel, or whose joints are missing, produce no pivot and no links.
pub fn derive_crossings(joints: &[Joint], segments: usize) -> (Vec<Link>, Vec<Pivot>) {
    let mut links = Vec::with_capacity(2 * segments);
    let mut pivots = Vec::with_capacity(segments);
    let pos = |id: JointId| joints.get(id.index()).filter(|j| j.id == id).map(|j| j.pos);

    for segment in 0..segments {
        let quad = [
            pos(JointId::left(segment)),
            pos(JointId::right(segment)),
            pos(JointId::left(segment + 1)),
            pos(JointId::right(segment + 1)),
        ];
        let [Some(lb), Some(rb), Some(lt), Some(rt)] = quad else {
            continue;
        };

        let Some(pivot) = intersect_lines(lb, rt, rb, lt) else {
            log::trace!("segment {} has parallel rods, skipping", segment);
            debug_crossing(segment, [lb, rb, lt, rt]);
            continue;
        };

        let crossing = [
            Link::crossing(segment, LinkKind::A),
            Link::crossing(segment, LinkKind::B),
        ];
        links.extend(crossing);
        pivots.push(Pivot {
            segment,
            pos: pivot,
            links: crossing,
        });
    }

    (links, pivots)
}

/// A coarse classification of how completely a mechanism resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum IntegrityLevel {
    /// Every segment has a pivot.
    Good,
    /// Some, but not all, segments have a pivot.
    Warning,
    /// No segment has a pivot.
    Error,
}

/// The integrity of a mechanism, with a short description for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Integrity {
    pub level: IntegrityLevel,
    pub text: &'static str,
}

impl Integrity {
    /// Classifies a mechanism by how many of its segments resolved a pivot.
    pub fn classify(pivots: usize, segments: usize) -> Self {
        let (level, text) = if pivots == 0 {
            (IntegrityLevel::Error, "No pivot")
        } else if pivots < segments {
            (IntegrityLevel::Warning, "Partial")
        } else {
            (IntegrityLevel::Good, "OK")
        };
        Self { level, text }
    }
}
