//! Coordinate translation between screen space and canvas-local space.
//!
//! Pointer events arrive in screen (client) coordinates. Box positions are
//! always stored relative to the canvas's top-left corner. The canvas
//! rectangle is re-queried through [`CanvasBounds`] on every call since
//! scrolling or resizing can move it between events.

#[cfg(test)]
#[path = "coords_test.rs"]
mod coords_test;

use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::consts::OUT_OF_BOUNDS;

/// A point in either screen or canvas-local space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The sentinel returned for an unmeasurable canvas.
    #[must_use]
    pub fn out_of_bounds() -> Self {
        Self { x: OUT_OF_BOUNDS, y: OUT_OF_BOUNDS }
    }

    /// Whether either coordinate is negative, i.e. the point lies outside the
    /// canvas when interpreted as canvas-local.
    #[must_use]
    pub fn is_outside_canvas(self) -> bool {
        self.x < 0.0 || self.y < 0.0
    }
}

/// Screen-space origin of the canvas element.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CanvasRect {
    /// Left edge in screen pixels.
    pub left: f64,
    /// Top edge in screen pixels.
    pub top: f64,
}

impl CanvasRect {
    #[must_use]
    pub fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }
}

/// Anything that can report the canvas's current bounding rectangle.
///
/// Returns `None` while the canvas is not mounted or not measurable.
pub trait CanvasBounds {
    fn bounding_rect(&self) -> Option<CanvasRect>;
}

impl CanvasBounds for Option<CanvasRect> {
    fn bounding_rect(&self) -> Option<CanvasRect> {
        *self
    }
}

impl CanvasBounds for CanvasRect {
    fn bounding_rect(&self) -> Option<CanvasRect> {
        Some(*self)
    }
}

/// Shared, host-updatable rectangle. The host writes a new value when the
/// canvas scrolls or resizes; the engine reads it on each event.
impl CanvasBounds for Rc<Cell<Option<CanvasRect>>> {
    fn bounding_rect(&self) -> Option<CanvasRect> {
        self.get()
    }
}

/// Convert a screen-space point into canvas-local coordinates.
///
/// When `rect` is `None` the out-of-bounds sentinel is returned instead of an
/// error, so callers' bounds checks resolve to "outside".
#[must_use]
pub fn to_canvas_local(rect: Option<CanvasRect>, screen: Point) -> Point {
    match rect {
        Some(rect) => Point { x: screen.x - rect.left, y: screen.y - rect.top },
        None => Point::out_of_bounds(),
    }
}
