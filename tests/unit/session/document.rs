use super::*;

use crate::foundation::core::{Point, PositionedVector};
use crate::render::component::TypesetEngine;
use crate::render::monospace::MonospaceTypeset;

fn typeset_into(session: &mut DocumentSession, markup: &str) -> ComponentId {
    let component = MonospaceTypeset::default()
        .typeset(markup, Point::ZERO)
        .unwrap();
    session.insert_component(component)
}

#[test]
fn component_ids_are_never_reused() {
    let mut session = DocumentSession::new();
    let a = typeset_into(&mut session, "a");
    let b = typeset_into(&mut session, "b");
    assert_ne!(a, b);
    session.remove_component(a);
    let c = typeset_into(&mut session, "c");
    assert_ne!(a, c);
    assert!(session.component(a).is_none());
    assert_eq!(session.component(c).unwrap().content(), "c");
}

#[test]
fn variables_snapshot_resolved_values() {
    let mut session = DocumentSession::new();
    let v = Resolved::Vector(PositionedVector::new((0.0, 0.0), (1.0, 0.0)));
    session.define("a", v.clone());
    assert_eq!(session.variable("a"), Some(&v));
    assert!(session.variable("b").is_none());
    // Rebinding replaces the snapshot.
    session.define("a", Resolved::Scalars(vec![1.0]));
    assert_eq!(session.variable("a"), Some(&Resolved::Scalars(vec![1.0])));
}

#[test]
fn registry_lookup_by_name() {
    let mut session = DocumentSession::new();
    let id = typeset_into(&mut session, "a+b");
    session.register("m", RegisteredObject::Component(id));
    assert!(matches!(
        session.lookup("m"),
        Some(RegisteredObject::Component(found)) if *found == id
    ));
    assert!(session.lookup("nope").is_none());
}

#[test]
fn reset_clears_everything_at_once() {
    let mut session = DocumentSession::new();
    let id = typeset_into(&mut session, "a");
    session.register("m", RegisteredObject::Component(id));
    session.define("x", Resolved::Scalars(vec![1.0]));
    assert!(!session.is_empty());
    assert_eq!(session.component_count(), 1);

    session.reset();
    assert!(session.is_empty());
    assert!(session.component(id).is_none());
    assert!(session.lookup("m").is_none());
    assert!(session.variable("x").is_none());

    // A reset session starts a fresh document.
    let fresh = typeset_into(&mut session, "b");
    assert!(session.component(fresh).is_some());
}
