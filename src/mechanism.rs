use crate::anchor::{self, Anchor};
use crate::curve::{self, CurveType};
#[cfg(feature = "debug")]
use crate::debug::take_debug_frame;
use crate::debug::debug_anchor;
#[cfg(feature = "svg-io")]
use crate::export::{self, ExportConfig, ExportError};
use crate::freehand::prepare_free_curve;
use crate::math::{polyline_length, Point2d, Vector2d};
use crate::node::{Joint, JointId, Link, NodeId, Pivot};
use crate::params::{MechanismParams, ParamsUpdate};
use crate::physics::PhysicsGraph;
use crate::trail::Trail;
use geometry::derive_crossings;
pub use geometry::{build, Geometry, Integrity, IntegrityLevel};
use rand::Rng;
use std::collections::HashMap;
use std::time::Instant;

mod geometry;

/// A scissor linkage following a guide curve.
///
/// Setters only mark the mechanism as dirty; the geometry is rebuilt
/// from scratch by the next call to [update](Self::update).
#[derive(Clone, Debug)]
pub struct Mechanism {
    /// The parameters that shape the mechanism.
    params: MechanismParams,
    /// The world space position of the guide curve's origin.
    center: Point2d,
    /// The prepared hand-drawn curve, used when the curve type is [CurveType::Free].
    free_curve: Option<Vec<Point2d>>,
    /// The guide curve used for the last rebuild, in mechanism-local space.
    base_curve: Vec<Point2d>,
    /// The joints, ordered `L0, R0, L1, R1, ...`.
    joints: Vec<Joint>,
    /// The crossing rods.
    links: Vec<Link>,
    /// The crossing points of the rods.
    pivots: Vec<Pivot>,
    /// The history of the mechanism's tip.
    trail: Trail,
    /// Whether a trail sample is recorded on each update.
    trail_enabled: bool,
    /// The node held in place, if any.
    anchor: Option<Anchor>,
    /// Whether the geometry must be rebuilt.
    dirty: bool,
    /// The reference point for trail timestamps.
    epoch: Instant,
    /// Debugging information from the previous update.
    #[cfg(feature = "debug")]
    debug: serde_json::Value,
}

impl Default for Mechanism {
    fn default() -> Self {
        Self::with_params(Default::default())
    }
}

impl Mechanism {
    /// Creates a mechanism with the default parameters, centred on the origin.
    pub fn new() -> Self {
        Default::default()
    }

    /// Creates a mechanism with the given parameters, centred on the origin.
    pub fn with_params(params: MechanismParams) -> Self {
        Self {
            params: params.coerced(),
            center: Point2d::new(0.0, 0.0),
            free_curve: None,
            base_curve: vec![],
            joints: vec![],
            links: vec![],
            pivots: vec![],
            trail: Trail::new(),
            trail_enabled: false,
            anchor: None,
            dirty: true,
            epoch: Instant::now(),
            #[cfg(feature = "debug")]
            debug: Default::default(),
        }
    }

    /// Gets the current parameters.
    pub fn params(&self) -> &MechanismParams {
        &self.params
    }

    /// Changes some or all of the parameters.
    pub fn set_params(&mut self, update: &ParamsUpdate) {
        self.params.apply(update);
        self.dirty = true;
    }

    /// Gets the world space position of the guide curve's origin.
    pub fn center(&self) -> Point2d {
        self.center
    }

    /// Moves the guide curve's origin.
    pub fn set_center(&mut self, center: Point2d) {
        self.center = center;
        self.dirty = true;
    }

    /// Sets an already prepared hand-drawn curve, in mechanism-local space.
    ///
    /// A curve of fewer than two points is discarded, and an arc will be used instead.
    pub fn set_free_curve(&mut self, curve: Vec<Point2d>) {
        self.free_curve = (curve.len() >= 2).then_some(curve);
        self.dirty = true;
    }

    /// Prepares a raw pointer stroke and uses it as the hand-drawn curve.
    ///
    /// Returns false, leaving the current curve in place, if the stroke has fewer than two points.
    pub fn set_free_stroke(&mut self, raw: &[Point2d]) -> bool {
        match prepare_free_curve(raw) {
            Some(curve) => {
                self.set_free_curve(curve);
                true
            }
            None => false,
        }
    }

    /// Discards the hand-drawn curve.
    pub fn clear_free_curve(&mut self) {
        self.free_curve = None;
        self.dirty = true;
    }

    /// Gets the hand-drawn curve, if one has been set.
    pub fn free_curve(&self) -> Option<&[Point2d]> {
        self.free_curve.as_deref()
    }

    /// Pins a joint or pivot to `target`, replacing any existing anchor.
    pub fn set_anchor(&mut self, node: impl Into<NodeId>, target: Point2d) {
        self.anchor = Some(Anchor::new(node, target));
        self.dirty = true;
    }

    /// Releases the anchored node.
    pub fn clear_anchor(&mut self) {
        self.anchor = None;
        self.dirty = true;
    }

    /// Gets the current anchor.
    pub fn anchor(&self) -> Option<&Anchor> {
        self.anchor.as_ref()
    }

    /// Enables or disables trail recording. Disabling it discards the trail.
    pub fn set_trail_enabled(&mut self, enabled: bool) {
        self.trail_enabled = enabled;
        if !enabled {
            self.trail.clear();
        }
    }

    pub fn trail_enabled(&self) -> bool {
        self.trail_enabled
    }

    /// Discards the trail without disabling it.
    pub fn clear_trail(&mut self) {
        self.trail.clear();
    }

    /// Restores the default parameters and discards the trail.
    pub fn reset(&mut self) {
        self.params = Default::default();
        self.trail.clear();
        self.dirty = true;
    }

    /// Picks random parameters and discards the trail.
    pub fn randomize(&mut self, rng: &mut impl Rng) {
        self.params = MechanismParams::random(rng);
        self.trail.clear();
        self.dirty = true;
    }

    /// Returns true if the geometry will be rebuilt by the next update.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Brings the mechanism up to date.
    ///
    /// Rebuilds the geometry if anything changed since the last update,
    /// moves the anchored node back onto its target,
    /// then records a trail sample if the trail is enabled.
    pub fn update(&mut self) {
        if self.dirty {
            self.rebuild();
        }
        self.apply_anchor();
        self.record_trail();

        #[cfg(feature = "debug")]
        {
            self.debug = take_debug_frame();
        }
    }

    /// Moves a single joint by hand, then re-intersects the rods and records a trail sample.
    ///
    /// Returns false, changing nothing, if the node is the anchored node, is a pivot,
    /// or does not exist. Pivots sit where their rods cross and follow the joints.
    /// The edit lasts until the next rebuild.
    pub fn drag_node(&mut self, node: impl Into<NodeId>, pos: Point2d) -> bool {
        let node = node.into();
        if self.anchor.map_or(false, |anchor| anchor.node == node) {
            log::debug!("refusing to drag anchored node {}", node);
            return false;
        }
        let NodeId::Joint(id) = node else {
            return false;
        };
        let Some(joint) = self.joints.iter_mut().find(|j| j.id == id) else {
            return false;
        };
        joint.pos = pos;
        (self.links, self.pivots) = derive_crossings(&self.joints, self.params.segments);
        self.record_trail();
        true
    }

    /// Iterates over the nodes that [drag_node](Self::drag_node) will accept.
    pub fn draggable_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        let anchored = self.anchor.map(|anchor| anchor.node);
        self.joints
            .iter()
            .map(|j| NodeId::Joint(j.id))
            .filter(move |&node| Some(node) != anchored)
    }

    /// Translates the whole mechanism, including its trail and centre, by `delta`.
    pub fn translate_all(&mut self, delta: Vector2d) {
        for joint in &mut self.joints {
            joint.pos += delta;
        }
        for pivot in &mut self.pivots {
            pivot.pos += delta;
        }
        self.trail.translate(delta);
        self.center += delta;
    }

    /// Returns the joints, ordered `L0, R0, L1, R1, ...`.
    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    /// Returns the crossing rods, two per resolved segment.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Returns the pivots, at most one per segment.
    pub fn pivots(&self) -> &[Pivot] {
        &self.pivots
    }

    /// Returns the guide curve in mechanism-local space.
    pub fn base_curve(&self) -> &[Point2d] {
        &self.base_curve
    }

    /// Returns the trail of the mechanism's tip.
    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    /// Gets the joint with the given ID.
    pub fn joint(&self, id: JointId) -> Option<&Joint> {
        self.joints.get(id.index()).filter(|j| j.id == id)
    }

    /// Gets the position of a joint or pivot.
    pub fn node_position(&self, node: impl Into<NodeId>) -> Option<Point2d> {
        anchor::resolve(node.into(), &self.joints, &self.pivots)
    }

    /// Gets the positions of both ends of a link.
    pub fn link_segment(&self, link: &Link) -> Option<[Point2d; 2]> {
        let start = self.joint(link.start)?;
        let end = self.joint(link.end)?;
        Some([start.pos, end.pos])
    }

    /// Returns an iterator over the end points of every link.
    pub fn iter_link_segments(&self) -> impl Iterator<Item = [Point2d; 2]> + '_ {
        self.links.iter().filter_map(|link| self.link_segment(link))
    }

    /// Renders the links as a laser-cutting sheet.
    #[cfg(feature = "svg-io")]
    pub fn export_svg(&self, config: &ExportConfig) -> Result<String, ExportError> {
        export::export_svg(self.iter_link_segments(), config)
    }

    /// Gets the length of the guide curve.
    pub fn arc_length(&self) -> f64 {
        polyline_length(&self.base_curve)
    }

    /// Classifies how completely the mechanism resolved.
    pub fn integrity(&self) -> Integrity {
        Integrity::classify(self.pivots.len(), self.params.segments)
    }

    /// Exports the joints and rods for an external constraint solver.
    pub fn to_physics_graph(&self) -> PhysicsGraph {
        PhysicsGraph::new(&self.joints, &self.links)
    }

    /// Overwrites joint positions with those computed by an external solver,
    /// then re-derives the links and pivots.
    ///
    /// Joints missing from `positions` keep their position, and unknown IDs are ignored.
    /// The guide curve is left untouched.
    pub fn apply_physics_positions(&mut self, positions: &HashMap<String, Point2d>) {
        for joint in &mut self.joints {
            if let Some(pos) = positions.get(&joint.id.to_string()) {
                joint.pos = *pos;
            }
        }
        (self.links, self.pivots) = derive_crossings(&self.joints, self.params.segments);
    }

    /// Gets the debugging information for the previous update as a JSON array.
    #[cfg(feature = "debug")]
    pub fn debug(&self) -> serde_json::Value {
        self.debug.clone()
    }

    /// Discards and rebuilds the guide curve, joints, links and pivots.
    fn rebuild(&mut self) {
        let params = &self.params;
        self.base_curve = match (params.curve_type, &self.free_curve) {
            (CurveType::Free, Some(free_curve)) => free_curve.clone(),
            (curve_type, _) => curve::generate(curve_type, params.curve_length, params.curvature),
        };

        let Geometry {
            joints,
            links,
            pivots,
        } = build(params, self.center, &self.base_curve);
        self.joints = joints;
        self.links = links;
        self.pivots = pivots;
        self.dirty = false;

        log::debug!(
            "rebuilt mechanism: {} joints, {} links, {}/{} pivots",
            self.joints.len(),
            self.links.len(),
            self.pivots.len(),
            self.params.segments
        );
    }

    fn record_trail(&mut self) {
        if self.trail_enabled {
            let t = self.epoch.elapsed().as_secs_f64();
            self.trail.record(&self.joints, self.params.segments, t);
        }
    }

    /// Translates the mechanism so that the anchored node sits on its target.
    fn apply_anchor(&mut self) {
        let Some(anchor) = self.anchor else {
            return;
        };
        if let Some(delta) = anchor.correction(&self.joints, &self.pivots) {
            log::trace!("anchor {} corrected by {:?}", anchor.node, delta);
            debug_anchor(&anchor.node.to_string(), anchor.target - delta, anchor.target);
            self.translate_all(delta);
        }
    }
}
