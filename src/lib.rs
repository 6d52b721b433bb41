//! Chalkline is an expression-resolution-and-command engine for scripted
//! math-diagram animations.
//!
//! An authored script is a forest of named [`Expression`] nodes. Resolving a
//! node evaluates symbolic and geometric references into concrete values:
//! positioned vectors through the vector-algebra library, typeset components
//! through the [`TypesetEngine`] capability, and glyph-level selections
//! through the shadow-probe pipeline. A resolved expression compiles to a
//! [`Command`], a staged visual effect with an explicit
//! init → play / direct-play → clear lifecycle over a [`DrawSurface`].
//!
//! # Pipeline overview
//!
//! 1. **Resolve**: `Expression + ResolveContext -> Resolved` (post-order,
//!    fail-fast on script errors)
//! 2. **Compile**: `Resolved + CommandOptions -> Command`
//! 3. **Stage**: `Command::init` creates the effect on the surface
//! 4. **Play**: animated via the [`TweenQueue`], or instant via
//!    `direct_play`; both reach the same end state
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Single-threaded, cooperative**: selection resolution is synchronous
//!   end-to-end; playback completes through pumped completion callbacks.
//! - **Explicit ownership**: components, shapes and variables live in one
//!   [`DocumentSession`]; every visual resource is released by its owner.
#![forbid(unsafe_code)]

mod command;
mod expression;
mod foundation;
mod geometry;
mod markup;
mod render;
mod selection;
mod session;

pub use command::draw::{ArrowCommand, ShapeCommand, TableCellCommand, VectorSource};
pub use command::lifecycle::{Command, CommandContext, CommandOptions, CommandState};
pub use command::queue::{Completion, OwnerId, TweenQueue};
pub use command::text::{
    ItemSource, MoveTextItemCommand, SelectionSource, SelectionWriteCommand,
};
pub use expression::node::{ExprKind, Expression, Resolved, ResolveContext};
pub use foundation::core::{
    ComponentId, GraphHandle, Point, PositionedVector, Rect, ShapeId, Vec2, VectorOperand,
    rects_overlap,
};
pub use foundation::error::{ChalkError, ChalkResult};
pub use geometry::vector::{
    ALIGNMENT_TOLERANCE, Decomposition, add, angle_between, are_parallel, are_perpendicular,
    copy_at, cross, decompose, direction, dot, magnitude, project_onto, reverse_at, scale,
    shift_backward, shift_forward, shift_perpendicular, signed_angle_between, sub, tail_at_tip,
    unit_direction,
};
pub use markup::pattern::{
    MARKER_OPEN, MarkerSpan, marker_count, marker_spans, strip_markers, wrap_pattern,
    wrap_patterns,
};
pub use render::component::{RenderedComponent, TypesetEngine};
pub use render::headless::{DrawRecord, HeadlessSurface};
pub use render::monospace::{MonoComponent, MonospaceTypeset};
pub use render::surface::{AnnotationLayer, DrawSurface, ShapeSpec, ShapeStyle};
pub use selection::probe::{MatchedUnit, ShadowProbe, resolve_complement, resolve_matches};
pub use selection::unit::{FragmentId, SelectionUnit, TextItem, TextItemCollection};
pub use session::document::{DocumentSession, RegisteredObject};
