use crate::foundation::error::{ChalkError, ChalkResult};

pub use kurbo::{Point, Rect, Vec2};

/// Handle to a shape created on a drawing surface.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ShapeId(pub u64);

/// Handle to a rendered typeset component owned by a document session.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ComponentId(pub u64);

/// Opaque handle to a coordinate rendering surface ("graph"). Expressions
/// tagged as graph references carry one; commands pass it through unmodified.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct GraphHandle(pub u64);

/// A positioned vector: always a `(start, end)` point pair, never a free
/// direction alone. All vector algebra operates on this representation.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PositionedVector {
    /// Tail of the vector.
    pub start: Point,
    /// Tip of the vector.
    pub end: Point,
}

impl PositionedVector {
    /// Build a positioned vector from two points.
    pub fn new(start: impl Into<Point>, end: impl Into<Point>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Flatten to `[start.x, start.y, end.x, end.y]`.
    pub fn to_flat(self) -> [f64; 4] {
        [self.start.x, self.start.y, self.end.x, self.end.y]
    }
}

/// How a resolved expression exposes a vector operand.
///
/// Literal coordinate lists expose a flat 4-value array while named vector
/// variables expose a dedicated `(start, end)` pair. Operand extraction tries
/// the dedicated accessor first and falls back to slicing atomic values; both
/// paths normalize here, once, before any geometry call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VectorOperand {
    /// A ready `(start, end)` pair.
    Positioned(PositionedVector),
    /// A flat `[sx, sy, ex, ey]` coordinate slice.
    Flat([f64; 4]),
}

impl VectorOperand {
    /// Normalize into the canonical `(start, end)` shape.
    pub fn into_positioned(self) -> PositionedVector {
        match self {
            Self::Positioned(v) => v,
            Self::Flat([sx, sy, ex, ey]) => {
                PositionedVector::new(Point::new(sx, sy), Point::new(ex, ey))
            }
        }
    }

    /// Build an operand from a flat atomic-value slice. Errors unless the
    /// slice holds exactly two 2-tuples.
    pub fn from_atomic_values(origin: &str, values: &[f64]) -> ChalkResult<Self> {
        match values {
            [sx, sy, ex, ey] => Ok(Self::Flat([*sx, *sy, *ex, *ey])),
            _ => Err(ChalkError::script(
                origin,
                format!(
                    "expected 4 coordinates (start x/y, end x/y), got {}",
                    values.len()
                ),
            )),
        }
    }
}

/// Strict rectangle overlap: touching edges do not count, and a zero-area
/// rectangle overlaps nothing. Selection correlation relies on both so
/// abutting glyph boxes are never claimed by a neighboring marker rectangle
/// and an empty marker claims no fragments.
pub fn rects_overlap(a: Rect, b: Rect) -> bool {
    !a.is_zero_area()
        && !b.is_zero_area()
        && a.x0 < b.x1
        && b.x0 < a.x1
        && a.y0 < b.y1
        && b.y0 < a.y1
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
