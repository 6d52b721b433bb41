//! Resolution of the vector-algebra expression kinds.
//!
//! Each kind extracts its operands through the dual-path lookup (dedicated
//! `(start, end)` accessor first, flat atomic-value fallback), normalizes
//! once, calls exactly one geometry operation, and yields the resulting pair
//! as its own coordinates.

use crate::expression::node::{ExprKind, Expression, Resolved};
use crate::foundation::core::{Point, PositionedVector};
use crate::foundation::error::{ChalkError, ChalkResult};
use crate::geometry::vector;

pub(crate) fn resolve(
    kind: &ExprKind,
    origin: &str,
    args: &[Expression],
) -> ChalkResult<Resolved> {
    match kind {
        ExprKind::Add => {
            let (a, b) = binary(origin, args)?;
            Ok(Resolved::Vector(vector::add(a, b, result_start(origin, args, 2)?)))
        }
        ExprKind::Sub => {
            let (a, b) = binary(origin, args)?;
            Ok(Resolved::Vector(vector::sub(a, b, result_start(origin, args, 2)?)))
        }
        ExprKind::Project => {
            let (a, b) = binary(origin, args)?;
            Ok(Resolved::Vector(vector::project_onto(a, b)))
        }
        ExprKind::Decompose => {
            let (a, b) = binary(origin, args)?;
            Ok(Resolved::Decomposition(vector::decompose(a, b)))
        }
        ExprKind::Scale(factor) => {
            let v = unary(origin, args)?;
            Ok(Resolved::Vector(vector::scale(
                v,
                *factor,
                result_start(origin, args, 1)?,
            )))
        }
        ExprKind::Reverse => {
            let v = unary(origin, args)?;
            Ok(Resolved::Vector(vector::reverse_at(v, v.start)))
        }
        ExprKind::ShiftAlong(distance) => {
            let v = unary(origin, args)?;
            Ok(Resolved::Vector(vector::shift_forward(v, *distance)))
        }
        ExprKind::ShiftPerp(distance) => {
            let v = unary(origin, args)?;
            Ok(Resolved::Vector(vector::shift_perpendicular(v, *distance)))
        }
        ExprKind::CopyTo => {
            let v = unary(origin, args)?;
            let new_start = point_arg(origin, args, 1)?;
            Ok(Resolved::Vector(vector::copy_at(v, new_start)))
        }
        other => Err(ChalkError::script(
            origin,
            format!("{other:?} is not a vector operation"),
        )),
    }
}

fn unary(origin: &str, args: &[Expression]) -> ChalkResult<PositionedVector> {
    let first = args.first().ok_or_else(|| {
        ChalkError::script(origin, "expected a vector argument, got none")
    })?;
    Ok(first.operand()?.into_positioned())
}

fn binary(
    origin: &str,
    args: &[Expression],
) -> ChalkResult<(PositionedVector, PositionedVector)> {
    match args {
        [a, b, ..] => Ok((a.operand()?.into_positioned(), b.operand()?.into_positioned())),
        _ => Err(ChalkError::script(
            origin,
            format!("expected 2 vector arguments, got {}", args.len()),
        )),
    }
}

/// Optional result-relocation point at `index`. Absent means the geometry
/// default (the first operand's start).
fn result_start(
    origin: &str,
    args: &[Expression],
    index: usize,
) -> ChalkResult<Option<Point>> {
    args.get(index).map(|arg| arg.point(origin)).transpose()
}

fn point_arg(origin: &str, args: &[Expression], index: usize) -> ChalkResult<Point> {
    let arg = args.get(index).ok_or_else(|| {
        ChalkError::script(origin, format!("expected a point argument at position {index}"))
    })?;
    arg.point(origin)
}

#[cfg(test)]
#[path = "../../tests/unit/expression/vector_ops.rs"]
mod tests;
