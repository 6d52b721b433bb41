//! Pure vector algebra over positioned `(start, end)` vectors.
//!
//! Every function is stateless and side-effect-free so expressions can call
//! them repeatedly during incremental re-resolution. Degenerate inputs
//! (zero-length vectors) never divide by zero; they yield deterministic zero
//! results instead.

use crate::foundation::core::{Point, PositionedVector, Vec2};

/// Magnitudes below this are treated as a zero direction.
const DIRECTION_EPS: f64 = 1e-10;
/// Squared-magnitude guard for projection denominators.
const PROJECTION_EPS_SQ: f64 = 1e-20;
/// Default tolerance for parallel/perpendicular checks.
pub const ALIGNMENT_TOLERANCE: f64 = 1e-8;

/// A vector split into parallel and perpendicular components relative to a
/// reference vector. The components chain tip-to-tail: `perpendicular` starts
/// where `parallel` ends, so stacking them visually reconstructs the input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decomposition {
    /// Component along the reference vector, anchored at its start.
    pub parallel: PositionedVector,
    /// Remainder, anchored at the parallel component's tip.
    pub perpendicular: PositionedVector,
}

/// Free direction `end - start`.
pub fn direction(v: PositionedVector) -> Vec2 {
    v.end - v.start
}

/// Euclidean length of the vector.
pub fn magnitude(v: PositionedVector) -> f64 {
    direction(v).hypot()
}

/// Unit direction, or the zero vector when the input is (near) zero-length.
pub fn unit_direction(v: PositionedVector) -> Vec2 {
    let d = direction(v);
    let mag = d.hypot();
    if mag < DIRECTION_EPS {
        Vec2::ZERO
    } else {
        d / mag
    }
}

/// Projection of `a` onto `b`, anchored at `b.start`.
///
/// Returns a zero-length vector at `b.start` when `b` is degenerate.
pub fn project_onto(a: PositionedVector, b: PositionedVector) -> PositionedVector {
    let da = direction(a);
    let db = direction(b);
    let mag_sq = db.dot(db);
    if mag_sq < PROJECTION_EPS_SQ {
        return PositionedVector::new(b.start, b.start);
    }
    let scalar = da.dot(db) / mag_sq;
    PositionedVector::new(b.start, b.start + db * scalar)
}

/// Decompose `a` into components parallel and perpendicular to `b`.
///
/// With a degenerate reference, the parallel part collapses to a zero-length
/// vector at `b.start` and the whole of `a` becomes the perpendicular part.
pub fn decompose(a: PositionedVector, b: PositionedVector) -> Decomposition {
    let parallel = project_onto(a, b);
    let da = direction(a);
    let dpar = direction(parallel);
    let perp = da - dpar;
    Decomposition {
        parallel,
        perpendicular: PositionedVector::new(parallel.end, parallel.end + perp),
    }
}

/// Translate both endpoints along the vector's own direction by `distance`.
pub fn shift_forward(v: PositionedVector, distance: f64) -> PositionedVector {
    let offset = unit_direction(v) * distance;
    PositionedVector::new(v.start + offset, v.end + offset)
}

/// Translate both endpoints against the vector's direction by `distance`.
pub fn shift_backward(v: PositionedVector, distance: f64) -> PositionedVector {
    shift_forward(v, -distance)
}

/// Translate both endpoints perpendicular to the vector's direction.
///
/// Positive distance shifts counter-clockwise (to the left when looking from
/// start to end). Diagrams rely on this exact sign convention for left/right
/// placement.
pub fn shift_perpendicular(v: PositionedVector, distance: f64) -> PositionedVector {
    let u = unit_direction(v);
    let offset = Vec2::new(-u.y, u.x) * distance;
    PositionedVector::new(v.start + offset, v.end + offset)
}

/// Relocate the vector to `new_start`, preserving direction and length.
pub fn copy_at(v: PositionedVector, new_start: Point) -> PositionedVector {
    PositionedVector::new(new_start, new_start + direction(v))
}

/// Relocate to `new_start` with the direction negated.
pub fn reverse_at(v: PositionedVector, new_start: Point) -> PositionedVector {
    PositionedVector::new(new_start, new_start - direction(v))
}

/// Reposition `b` so its tail sits at `a`'s tip.
pub fn tail_at_tip(a: PositionedVector, b: PositionedVector) -> PositionedVector {
    copy_at(b, a.end)
}

/// Sum of the two directions, anchored at `result_start` (default `a.start`).
pub fn add(
    a: PositionedVector,
    b: PositionedVector,
    result_start: Option<Point>,
) -> PositionedVector {
    let start = result_start.unwrap_or(a.start);
    PositionedVector::new(start, start + direction(a) + direction(b))
}

/// `a - b` as directions, anchored at `result_start` (default `a.start`).
pub fn sub(
    a: PositionedVector,
    b: PositionedVector,
    result_start: Option<Point>,
) -> PositionedVector {
    let start = result_start.unwrap_or(a.start);
    PositionedVector::new(start, start + direction(a) - direction(b))
}

/// Scale the direction by `factor`, anchored at `result_start` (default
/// `v.start`).
pub fn scale(v: PositionedVector, factor: f64, result_start: Option<Point>) -> PositionedVector {
    let start = result_start.unwrap_or(v.start);
    PositionedVector::new(start, start + direction(v) * factor)
}

/// Dot product of the two directions.
pub fn dot(a: PositionedVector, b: PositionedVector) -> f64 {
    direction(a).dot(direction(b))
}

/// 2D cross product (z-component of the 3D cross). Positive means `b` lies
/// counter-clockwise of `a`.
pub fn cross(a: PositionedVector, b: PositionedVector) -> f64 {
    direction(a).cross(direction(b))
}

/// Unsigned angle between the two directions in `[0, π]`. The cosine is
/// clamped to guard floating error; a degenerate input yields 0.
pub fn angle_between(a: PositionedVector, b: PositionedVector) -> f64 {
    let da = direction(a);
    let db = direction(b);
    let ma = da.hypot();
    let mb = db.hypot();
    if ma < DIRECTION_EPS || mb < DIRECTION_EPS {
        return 0.0;
    }
    (da.dot(db) / (ma * mb)).clamp(-1.0, 1.0).acos()
}

/// Signed angle from `a` to `b` in `[-π, π]`, positive counter-clockwise.
pub fn signed_angle_between(a: PositionedVector, b: PositionedVector) -> f64 {
    cross(a, b).atan2(dot(a, b))
}

/// Whether the two directions are parallel within `tolerance` on the cross
/// product.
pub fn are_parallel(a: PositionedVector, b: PositionedVector, tolerance: f64) -> bool {
    cross(a, b).abs() < tolerance
}

/// Whether the two directions are perpendicular within `tolerance` on the dot
/// product.
pub fn are_perpendicular(a: PositionedVector, b: PositionedVector, tolerance: f64) -> bool {
    dot(a, b).abs() < tolerance
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/vector.rs"]
mod tests;
