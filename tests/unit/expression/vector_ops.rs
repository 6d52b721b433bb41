use super::*;

use crate::render::monospace::MonospaceTypeset;
use crate::session::document::DocumentSession;

fn resolve_expr(mut expr: Expression) -> Expression {
    let mut session = DocumentSession::new();
    let mut engine = MonospaceTypeset::default();
    let mut ctx = crate::expression::node::ResolveContext {
        session: &mut session,
        engine: &mut engine,
        graph: None,
    };
    expr.resolve(&mut ctx).unwrap();
    expr
}

fn coords(name: &str, values: [f64; 4]) -> Expression {
    Expression::coordinates(name, values.to_vec())
}

fn resolved_vector(expr: &Expression) -> PositionedVector {
    match expr.resolved() {
        Some(Resolved::Vector(v)) => *v,
        other => panic!("expected a vector, got {other:?}"),
    }
}

#[test]
fn add_defaults_to_the_first_operand_start() {
    let expr = resolve_expr(Expression::new(
        "sum",
        ExprKind::Add,
        vec![
            coords("a", [1.0, 1.0, 2.0, 1.0]),
            coords("b", [0.0, 0.0, 0.0, 3.0]),
        ],
    ));
    let v = resolved_vector(&expr);
    assert_eq!(v.start, Point::new(1.0, 1.0));
    assert_eq!(v.end, Point::new(2.0, 4.0));
}

#[test]
fn sub_accepts_an_explicit_result_start() {
    let expr = resolve_expr(Expression::new(
        "diff",
        ExprKind::Sub,
        vec![
            coords("a", [0.0, 0.0, 3.0, 0.0]),
            coords("b", [0.0, 0.0, 1.0, 0.0]),
            Expression::new("at", ExprKind::PointAt(5.0, 5.0), vec![]),
        ],
    ));
    let v = resolved_vector(&expr);
    assert_eq!(v.start, Point::new(5.0, 5.0));
    assert_eq!(v.end, Point::new(7.0, 5.0));
}

#[test]
fn project_is_anchored_at_the_reference() {
    let expr = resolve_expr(Expression::new(
        "proj",
        ExprKind::Project,
        vec![
            coords("a", [0.0, 0.0, 3.0, 3.0]),
            coords("b", [10.0, 0.0, 16.0, 0.0]),
        ],
    ));
    let v = resolved_vector(&expr);
    assert_eq!(v.start, Point::new(10.0, 0.0));
    assert!((v.end.x - 13.0).abs() < 1e-9);
    assert_eq!(v.end.y, 0.0);
}

#[test]
fn decompose_resolves_to_a_chained_pair() {
    let expr = resolve_expr(Expression::new(
        "split",
        ExprKind::Decompose,
        vec![
            coords("a", [0.0, 0.0, 2.0, 3.0]),
            coords("b", [0.0, 0.0, 4.0, 0.0]),
        ],
    ));
    let Some(Resolved::Decomposition(d)) = expr.resolved() else {
        panic!("expected a decomposition");
    };
    assert_eq!(d.perpendicular.start, d.parallel.end);
    // Flattened atomic values expose both components, parallel first.
    assert_eq!(expr.atomic_values().unwrap().len(), 8);
}

#[test]
fn scale_reverse_shift_and_copy() {
    let base = [0.0, 0.0, 2.0, 0.0];

    let scaled = resolve_expr(Expression::new(
        "scaled",
        ExprKind::Scale(2.5),
        vec![coords("v", base)],
    ));
    assert_eq!(resolved_vector(&scaled).end, Point::new(5.0, 0.0));

    let reversed = resolve_expr(Expression::new(
        "reversed",
        ExprKind::Reverse,
        vec![coords("v", base)],
    ));
    assert_eq!(resolved_vector(&reversed).end, Point::new(-2.0, 0.0));

    let shifted = resolve_expr(Expression::new(
        "shifted",
        ExprKind::ShiftAlong(1.0),
        vec![coords("v", base)],
    ));
    assert_eq!(resolved_vector(&shifted).start, Point::new(1.0, 0.0));

    let perp = resolve_expr(Expression::new(
        "perp",
        ExprKind::ShiftPerp(2.0),
        vec![coords("v", base)],
    ));
    assert_eq!(resolved_vector(&perp).start, Point::new(0.0, 2.0));

    let copied = resolve_expr(Expression::new(
        "copied",
        ExprKind::CopyTo,
        vec![
            coords("v", base),
            Expression::new("to", ExprKind::PointAt(7.0, 7.0), vec![]),
        ],
    ));
    assert_eq!(resolved_vector(&copied).start, Point::new(7.0, 7.0));
    assert_eq!(resolved_vector(&copied).end, Point::new(9.0, 7.0));
}

#[test]
fn arity_errors_carry_the_expression_identity() {
    let mut session = DocumentSession::new();
    let mut engine = MonospaceTypeset::default();
    let mut ctx = crate::expression::node::ResolveContext {
        session: &mut session,
        engine: &mut engine,
        graph: None,
    };
    let mut lonely = Expression::new(
        "lonely",
        ExprKind::Add,
        vec![coords("a", [0.0, 0.0, 1.0, 1.0])],
    );
    let err = lonely.resolve(&mut ctx).unwrap_err().to_string();
    assert!(err.contains("script error in `lonely`"), "{err}");
    assert!(err.contains("expected 2 vector arguments"), "{err}");

    let mut missing_point = Expression::new(
        "missing_point",
        ExprKind::CopyTo,
        vec![coords("v", [0.0, 0.0, 1.0, 1.0])],
    );
    assert!(missing_point.resolve(&mut ctx).is_err());
}
