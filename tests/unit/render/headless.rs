use super::*;

use crate::foundation::core::Point;

#[test]
fn draw_records_in_order_with_fresh_ids() {
    let mut surface = HeadlessSurface::new();
    let a = surface.draw(
        ShapeSpec::Dot { at: Point::ZERO },
        ShapeStyle::default(),
    );
    let b = surface.draw(
        ShapeSpec::Dot {
            at: Point::new(1.0, 1.0),
        },
        ShapeStyle::colored("red"),
    );
    assert_ne!(a, b);
    assert_eq!(surface.visible().len(), 2);
    assert_eq!(surface.visible()[1].style.color.as_deref(), Some("red"));
}

#[test]
fn progress_defaults_to_complete_and_clamps() {
    let mut surface = HeadlessSurface::new();
    let id = surface.draw(ShapeSpec::Dot { at: Point::ZERO }, ShapeStyle::default());
    assert_eq!(surface.record(id).unwrap().progress, 1.0);
    surface.set_progress(id, 0.25);
    assert_eq!(surface.record(id).unwrap().progress, 0.25);
    surface.set_progress(id, 7.0);
    assert_eq!(surface.record(id).unwrap().progress, 1.0);
    // Unknown ids are ignored.
    surface.set_progress(ShapeId(999), 0.5);
}

#[test]
fn remove_and_clear() {
    let mut surface = HeadlessSurface::new();
    let a = surface.draw(ShapeSpec::Dot { at: Point::ZERO }, ShapeStyle::default());
    let b = surface.draw(ShapeSpec::Dot { at: Point::ZERO }, ShapeStyle::default());
    surface.remove(a);
    assert!(!surface.contains(a));
    assert!(surface.contains(b));
    surface.remove(a);
    surface.clear();
    assert!(surface.visible().is_empty());
}

#[test]
fn annotations_share_the_surface() {
    let mut surface = HeadlessSurface::new();
    let id = surface.annotate("v", Point::new(3.0, 4.0));
    assert!(surface.contains(id));
    match &surface.record(id).unwrap().spec {
        ShapeSpec::Label { text, at } => {
            assert_eq!(text, "v");
            assert_eq!(*at, Point::new(3.0, 4.0));
        }
        other => panic!("unexpected spec: {other:?}"),
    }
    surface.remove_annotation(id);
    assert!(!surface.contains(id));
}
