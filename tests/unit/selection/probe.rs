use super::*;

use crate::render::monospace::MonospaceTypeset;

const TAN_IDENTITY: &str = "\\tan(\\theta)=\\frac{\\sin(\\theta)}{\\cos(\\theta)}";

fn target(markup: &str) -> (MonospaceTypeset, Box<dyn RenderedComponent>) {
    let mut engine = MonospaceTypeset::default();
    let component = engine.typeset(markup, Point::new(40.0, 8.0)).unwrap();
    (engine, component)
}

fn patterns(ps: &[&str]) -> Vec<String> {
    ps.iter().map(|s| s.to_string()).collect()
}

#[test]
fn each_occurrence_gets_its_own_unit_in_document_order() {
    let (mut engine, comp) = target(TAN_IDENTITY);
    let matched = resolve_matches(&mut engine, comp.as_ref(), &patterns(&["\\theta"])).unwrap();
    assert_eq!(matched.len(), 3);
    for m in &matched {
        assert_eq!(m.unit.len(), 1);
    }
    // Document order: marker rectangles advance left to right.
    assert!(matched.windows(2).all(|w| w[0].bounds.x0 < w[1].bounds.x0));
    // Pairwise disjoint.
    assert!(matched[0].unit.is_disjoint(&matched[1].unit));
    assert!(matched[1].unit.is_disjoint(&matched[2].unit));
}

#[test]
fn claimed_fragments_match_the_target_glyphs() {
    let (mut engine, comp) = target("a+b");
    let matched = resolve_matches(&mut engine, comp.as_ref(), &patterns(&["b"])).unwrap();
    assert_eq!(matched.len(), 1);
    assert!(matched[0].unit.contains("g2"));
    assert_eq!(matched[0].unit.len(), 1);
}

#[test]
fn multi_glyph_pattern_claims_the_whole_run() {
    let (mut engine, comp) = target(TAN_IDENTITY);
    let matched =
        resolve_matches(&mut engine, comp.as_ref(), &patterns(&["\\sin(\\theta)"])).unwrap();
    assert_eq!(matched.len(), 1);
    // \sin ( \theta )
    assert_eq!(matched[0].unit.len(), 4);
}

#[test]
fn zero_matches_is_an_empty_result() {
    let (mut engine, comp) = target("a+b");
    let matched = resolve_matches(&mut engine, comp.as_ref(), &patterns(&["z"])).unwrap();
    assert!(matched.is_empty());
    let complement = resolve_complement(&mut engine, comp.as_ref(), &patterns(&["z"])).unwrap();
    assert_eq!(complement.len(), comp.fragments().len());
}

#[test]
fn only_and_without_partition_all_fragments() {
    let (mut engine, comp) = target(TAN_IDENTITY);
    let pats = patterns(&["\\theta"]);
    let matched = resolve_matches(&mut engine, comp.as_ref(), &pats).unwrap();
    let complement = resolve_complement(&mut engine, comp.as_ref(), &pats).unwrap();

    let claimed = matched
        .iter()
        .fold(SelectionUnit::new(), |acc, m| acc.union(&m.unit));
    assert!(claimed.is_disjoint(&complement));
    let all: SelectionUnit = comp.fragments().into_iter().collect();
    assert_eq!(claimed.union(&complement), all);
}

#[test]
fn whitespace_differences_between_pattern_and_source_still_match() {
    let (mut engine, comp) = target("a + b = c");
    let matched = resolve_matches(&mut engine, comp.as_ref(), &patterns(&["=c"])).unwrap();
    assert_eq!(matched.len(), 1);
    // = and c
    assert_eq!(matched[0].unit.len(), 2);
}

#[test]
fn probe_is_destroyed_on_every_exit_path() {
    let mut engine = MonospaceTypeset::default();
    let probe = ShadowProbe::render(&mut engine, "\\bbox[0px]{a}", Point::ZERO).unwrap();
    assert_eq!(probe.marker_count(), 1);
    drop(probe);
    // Measuring past the marker count is a selection error, and the probe is
    // still torn down by drop.
    let probe = ShadowProbe::render(&mut engine, "a", Point::ZERO).unwrap();
    assert!(probe.measure().unwrap().is_empty());
}
