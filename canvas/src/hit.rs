#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::coords::Point;
use crate::doc::{BoxKey, EntityStore};

/// Return the topmost box whose bounds contain `local_pt`.
///
/// `local_pt` is canvas-local. Ties in stacking order resolve to the box
/// drawn last (higher key).
#[must_use]
pub fn hit_test(local_pt: Point, doc: &EntityStore) -> Option<BoxKey> {
    if local_pt.is_outside_canvas() {
        return None;
    }
    doc.sorted_boxes()
        .into_iter()
        .rev()
        .find(|b| b.contains(local_pt))
        .map(|b| b.key)
}
