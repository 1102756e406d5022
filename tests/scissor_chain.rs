//! Tests that drive a whole mechanism through its public interface.

use assert_approx_eq::assert_approx_eq;
use scissor_linkage::{
    math::Point2d, prepare_free_curve, CurveType, IntegrityLevel, JointId, Mechanism,
    MechanismParams, NodeId, ParamsUpdate,
};

fn arc_mechanism() -> Mechanism {
    let mut mech = Mechanism::with_params(MechanismParams {
        segments: 4,
        link_length: 60.0,
        curvature: 1.0,
        curve_length: 300.0,
        curve_type: CurveType::Arc,
    });
    mech.update();
    mech
}

fn diagonal_stroke() -> Vec<Point2d> {
    let step = 100.0 / 49.0 / std::f64::consts::SQRT_2;
    (0..50)
        .map(|i| Point2d::new(i as f64 * step, i as f64 * step))
        .collect()
}

/// Test that the default arc resolves into a complete mechanism.
#[test]
fn arc_mechanism_is_complete() {
    let mech = arc_mechanism();
    assert_eq!(mech.joints().len(), 10);
    assert_eq!(mech.links().len(), 8);
    assert_eq!(mech.pivots().len(), 4);
    let integrity = mech.integrity();
    assert_eq!(integrity.level, IntegrityLevel::Good);
    assert_eq!(integrity.text, "OK");
}

/// Test that rods lying on one line produce no pivot.
#[test]
fn collinear_rods_are_reported() {
    let mut mech = Mechanism::with_params(MechanismParams {
        segments: 1,
        link_length: 60.0,
        curve_type: CurveType::Free,
        ..Default::default()
    });
    mech.set_free_curve(vec![
        Point2d::new(0.0, 0.0),
        Point2d::new(1.0, 0.0),
        Point2d::new(-1.0, 5.0),
        Point2d::new(0.0, 5.0),
    ]);
    mech.update();

    assert_eq!(mech.joints().len(), 4);
    assert!(mech.pivots().is_empty());
    assert!(mech.links().is_empty());
    let integrity = mech.integrity();
    assert_eq!(integrity.level, IntegrityLevel::Error);
    assert_eq!(integrity.text, "No pivot");
}

/// Test that a hand-drawn diagonal is simplified and evenly resampled.
#[test]
fn free_hand_diagonal() {
    let stroke = diagonal_stroke();
    let curve = prepare_free_curve(&stroke).unwrap();
    assert_eq!(curve.len(), 51);
    assert_approx_eq!(curve[0].x, 0.0);
    assert_approx_eq!(curve[0].y, 0.0);
    assert_approx_eq!(curve[50].x, stroke[49].x);
    assert_approx_eq!(curve[50].y, stroke[49].y);

    let mut mech = Mechanism::with_params(MechanismParams {
        curve_type: CurveType::Free,
        ..Default::default()
    });
    assert!(mech.set_free_stroke(&stroke));
    mech.update();
    assert_approx_eq!(mech.arc_length(), 100.0);
    assert_eq!(mech.integrity().level, IntegrityLevel::Good);
}

/// Test that an anchored pivot stays put while the curvature changes.
#[test]
fn anchored_pivot_survives_reshaping() {
    let mut mech = arc_mechanism();
    let target = mech.node_position(NodeId::Pivot(2)).unwrap();
    mech.set_anchor(NodeId::Pivot(2), target);

    for curvature in [2.0, 0.5, 1.5] {
        mech.set_params(&ParamsUpdate {
            curvature: Some(curvature),
            ..Default::default()
        });
        mech.update();
        let pos = mech.node_position(NodeId::Pivot(2)).unwrap();
        assert_approx_eq!(pos.x, target.x, 1e-6);
        assert_approx_eq!(pos.y, target.y, 1e-6);
    }
}

/// Test that an anchored joint is moved exactly onto an arbitrary target.
#[test]
fn anchored_joint_lands_on_target() {
    let mut mech = arc_mechanism();
    let target = Point2d::new(512.0, -37.5);
    mech.set_anchor(JointId::right(4), target);
    mech.update();

    let pos = mech.node_position(JointId::right(4)).unwrap();
    assert_approx_eq!(pos.x, target.x, 1e-9);
    assert_approx_eq!(pos.y, target.y, 1e-9);
    assert!(mech.anchor().is_some());
}

/// Test that rebuilding with unchanged inputs gives identical geometry.
#[test]
fn rebuild_is_deterministic() {
    let mut mech = arc_mechanism();
    let joints = mech.joints().to_vec();
    let pivots = mech.pivots().to_vec();

    mech.set_params(&ParamsUpdate::default());
    assert!(mech.is_dirty());
    mech.update();

    assert_eq!(mech.joints(), &joints[..]);
    assert_eq!(mech.pivots(), &pivots[..]);
}

/// Test that updating twice in a row without changes leaves the geometry untouched.
#[test]
fn repeated_updates_are_idempotent() {
    let mut mech = arc_mechanism();
    mech.set_anchor(NodeId::Pivot(1), Point2d::new(-40.0, 25.0));
    mech.set_trail_enabled(true);
    mech.update();
    let joints = mech.joints().to_vec();
    let pivots = mech.pivots().to_vec();

    mech.update();
    assert!(!mech.is_dirty());
    assert_eq!(mech.joints(), &joints[..]);
    assert_eq!(mech.pivots(), &pivots[..]);
}

/// Test that the exported sheet holds one part per link.
#[cfg(feature = "svg-io")]
#[test]
fn export_every_link() {
    let mech = arc_mechanism();
    let svg = mech.export_svg(&Default::default()).unwrap();
    assert_eq!(svg.matches("<path").count(), 8);
    assert_eq!(svg.matches("<circle").count(), 16);
}
