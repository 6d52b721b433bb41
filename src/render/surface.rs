//! Drawing-surface seam.
//!
//! Commands never talk to a concrete scene graph; they emit shapes through
//! [`DrawSurface`] and receive opaque ids back. The surface owns
//! coordinate-to-pixel mapping and retained-scene bookkeeping.

use serde::{Deserialize, Serialize};

use crate::foundation::core::{ComponentId, Point, PositionedVector, ShapeId};
use crate::selection::unit::FragmentId;

/// What to draw. Geometry is in graph coordinates; the surface maps it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ShapeSpec {
    /// A single marked point.
    Dot { at: Point },
    /// A straight segment between two points.
    Segment { from: Point, to: Point },
    /// An open polyline through the given points.
    Polyline { points: Vec<Point> },
    /// A directed arrow with an arrowhead at the tip.
    Arrow { vector: PositionedVector },
    /// A short text label anchored at a point.
    Label { text: String, at: Point },
    /// Text written into a table cell addressed by row and column.
    CellText { row: usize, col: usize, text: String },
    /// Reveal a subset of an already-typeset component's fragments.
    Reveal {
        component: ComponentId,
        fragments: Vec<FragmentId>,
    },
    /// A detached copy of some fragments, relocated to a new anchor.
    MovedCopy {
        component: ComponentId,
        fragments: Vec<FragmentId>,
        to: Point,
    },
}

/// Styling shared by every shape kind. Fields a surface does not support are
/// ignored, not errors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// CSS-style color string, or `None` for the surface default.
    pub color: Option<String>,
    pub stroke_width: f64,
    pub dashed: bool,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            color: None,
            stroke_width: 1.0,
            dashed: false,
        }
    }
}

impl ShapeStyle {
    pub fn colored(color: impl Into<String>) -> Self {
        Self {
            color: Some(color.into()),
            ..Self::default()
        }
    }
}

/// Retained drawing surface. Ids are surface-scoped and never reused within
/// one surface's lifetime.
pub trait DrawSurface {
    /// Draw a shape, fully revealed, and return its id.
    fn draw(&mut self, spec: ShapeSpec, style: ShapeStyle) -> ShapeId;

    /// Set how much of a shape is revealed, in `[0, 1]`. Tweens animate this;
    /// the instant path jumps it straight to `1.0`. Unknown ids are a no-op.
    fn set_progress(&mut self, id: ShapeId, progress: f64);

    /// Remove a previously drawn shape. Removing an unknown id is a no-op.
    fn remove(&mut self, id: ShapeId);

    /// Remove everything drawn on this surface.
    fn clear(&mut self);
}

/// Overlay for ephemeral callouts (labels, highlights) that sit above the
/// diagram proper. Optional collaborator: commands that annotate must
/// tolerate its absence.
pub trait AnnotationLayer {
    /// Place an annotation and return its id.
    fn annotate(&mut self, text: &str, at: Point) -> ShapeId;

    /// Remove an annotation. Unknown ids are a no-op.
    fn remove_annotation(&mut self, id: ShapeId);
}
