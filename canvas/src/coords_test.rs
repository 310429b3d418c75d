#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// Point
// =============================================================

#[test]
fn point_new_sets_fields() {
    let p = Point::new(3.0, -4.5);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, -4.5);
}

#[test]
fn out_of_bounds_sentinel_is_negative_on_both_axes() {
    let p = Point::out_of_bounds();
    assert!(p.x < 0.0);
    assert!(p.y < 0.0);
    assert!(p.is_outside_canvas());
}

#[test]
fn origin_is_inside_canvas() {
    assert!(!Point::new(0.0, 0.0).is_outside_canvas());
}

#[test]
fn single_negative_axis_is_outside() {
    assert!(Point::new(10.0, -0.5).is_outside_canvas());
    assert!(Point::new(-0.5, 10.0).is_outside_canvas());
}

// =============================================================
// to_canvas_local
// =============================================================

#[test]
fn subtracts_rect_origin() {
    let local = to_canvas_local(Some(CanvasRect::new(20.0, 20.0)), Point::new(100.0, 100.0));
    assert_eq!(local, Point::new(80.0, 80.0));
}

#[test]
fn identity_when_rect_at_origin() {
    let local = to_canvas_local(Some(CanvasRect::default()), Point::new(7.0, 9.0));
    assert_eq!(local, Point::new(7.0, 9.0));
}

#[test]
fn point_left_of_canvas_goes_negative() {
    let local = to_canvas_local(Some(CanvasRect::new(20.0, 20.0)), Point::new(10.0, 10.0));
    assert_eq!(local, Point::new(-10.0, -10.0));
    assert!(local.is_outside_canvas());
}

#[test]
fn unmeasurable_canvas_yields_sentinel() {
    let local = to_canvas_local(None, Point::new(500.0, 500.0));
    assert_eq!(local, Point::out_of_bounds());
}

// =============================================================
// CanvasBounds impls
// =============================================================

#[test]
fn option_bounds_passes_through() {
    let none: Option<CanvasRect> = None;
    assert!(none.bounding_rect().is_none());
    let some = Some(CanvasRect::new(1.0, 2.0));
    assert_eq!(some.bounding_rect(), Some(CanvasRect::new(1.0, 2.0)));
}

#[test]
fn shared_bounds_reflect_host_updates() {
    let shared = Rc::new(Cell::new(Some(CanvasRect::new(0.0, 0.0))));
    let bounds: Box<dyn CanvasBounds> = Box::new(Rc::clone(&shared));
    assert_eq!(bounds.bounding_rect(), Some(CanvasRect::new(0.0, 0.0)));

    shared.set(Some(CanvasRect::new(0.0, -300.0)));
    assert_eq!(bounds.bounding_rect(), Some(CanvasRect::new(0.0, -300.0)));

    shared.set(None);
    assert!(bounds.bounding_rect().is_none());
}
