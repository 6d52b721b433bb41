use super::*;

fn typeset(markup: &str) -> Box<dyn RenderedComponent> {
    MonospaceTypeset::default()
        .typeset(markup, Point::new(100.0, 50.0))
        .unwrap()
}

#[test]
fn control_words_are_single_glyphs() {
    let comp = typeset("\\tan(\\theta)");
    // \tan ( \theta )
    assert_eq!(comp.fragments().len(), 4);
}

#[test]
fn whitespace_and_braces_take_no_space() {
    let plain = typeset("\\frac{a}{b}");
    let spaced = typeset("\\frac {a} {b}");
    assert_eq!(plain.fragments().len(), 3);
    assert_eq!(spaced.fragments().len(), 3);
    for id in plain.fragments() {
        assert_eq!(plain.fragment_bounds(&id), spaced.fragment_bounds(&id));
    }
}

#[test]
fn glyphs_advance_on_a_fixed_grid() {
    let comp = typeset("ab");
    let a = comp.fragment_bounds("g0").unwrap();
    let b = comp.fragment_bounds("g1").unwrap();
    assert_eq!(a.x0, 100.0);
    assert_eq!(a.x1, 110.0);
    assert_eq!(b.x0, 110.0);
    assert_eq!(a.y1 - a.y0, 12.0);
}

#[test]
fn markers_are_zero_footprint() {
    let plain = typeset("\\tan(\\theta)");
    let marked = typeset("\\tan(\\bbox[0px]{\\theta})");
    assert_eq!(plain.fragments().len(), marked.fragments().len());
    for id in plain.fragments() {
        assert_eq!(plain.fragment_bounds(&id), marked.fragment_bounds(&id));
    }
}

#[test]
fn marker_bounds_cover_their_content_glyphs() {
    let comp = typeset("a\\bbox[0px]{bc}d");
    let marker = comp.marker_bounds(0).unwrap();
    let b = comp.fragment_bounds("g1").unwrap();
    let c = comp.fragment_bounds("g2").unwrap();
    assert_eq!(marker, b.union(c));
    assert!(comp.marker_bounds(1).is_none());
}

#[test]
fn empty_marker_claims_nothing() {
    let comp = typeset("\\bbox[0px]{}ab");
    let marker = comp.marker_bounds(0).unwrap();
    assert_eq!(marker.width(), 0.0);
}

#[test]
fn content_and_position_round_trip() {
    let comp = typeset("a+b");
    assert_eq!(comp.content(), "a+b");
    assert_eq!(comp.position(), Point::new(100.0, 50.0));
}

#[test]
fn destroy_is_flagged() {
    let mut engine = MonospaceTypeset::default();
    let mut comp = engine.typeset("a", Point::ZERO).unwrap();
    comp.destroy();
    // The trait object is still queryable; destruction only releases the
    // render.
    assert_eq!(comp.fragments().len(), 1);
}
