use crate::math::Point2d;
#[cfg(feature = "debug")]
use serde_json::json;

#[cfg(feature = "debug")]
thread_local!(
    static DEBUG_FRAME: std::cell::RefCell<Vec<serde_json::Value>> = Default::default();
);

/// Records a segment whose rods could not be intersected.
#[allow(unused)]
pub fn debug_crossing(segment: usize, quad: [Point2d; 4]) {
    #[cfg(feature = "debug")]
    DEBUG_FRAME.with(|frame| {
        frame.borrow_mut().push(json!({
            "type": "degenerate_crossing",
            "segment": segment,
            "joints": quad.map(|p| [p.x, p.y]),
        }))
    })
}

/// Records a rigid correction applied to keep an anchored node in place.
#[allow(unused)]
pub fn debug_anchor(node: &str, from: Point2d, to: Point2d) {
    #[cfg(feature = "debug")]
    DEBUG_FRAME.with(|frame| {
        frame.borrow_mut().push(json!({
            "type": "anchor",
            "node": node,
            "from": [from.x, from.y],
            "to": [to.x, to.y],
        }))
    })
}

#[cfg(feature = "debug")]
pub fn take_debug_frame() -> serde_json::Value {
    json!(DEBUG_FRAME.with(|frame| frame.take()))
}
