//! Expression nodes.
//!
//! An authored script is a forest of named expression nodes. `resolve`
//! evaluates a node post-order (children first), validates the children's
//! resolved shapes, and stores the node's own output; `to_command` then
//! compiles a resolved node into a playable command. Resolution failures are
//! script errors tagged with the originating node's name.

use crate::command::draw::{ArrowCommand, ShapeCommand, VectorSource};
use crate::command::lifecycle::{Command, CommandOptions};
use crate::command::text::{SelectionSource, SelectionWriteCommand};
use crate::expression::{select, vector_ops};
use crate::foundation::core::{GraphHandle, Point, PositionedVector, VectorOperand};
use crate::foundation::error::{ChalkError, ChalkResult};
use crate::geometry::vector::Decomposition;
use crate::render::component::TypesetEngine;
use crate::render::surface::ShapeSpec;
use crate::selection::unit::TextItemCollection;
use crate::session::document::DocumentSession;

/// Closed set of expression kinds. Dynamic type checks over these are
/// exhaustive matches, never name-string comparisons.
#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    /// A numeric literal.
    Number(f64),
    /// A flat list of numeric coordinates.
    Coordinates(Vec<f64>),
    /// A quoted string argument (pattern, label, color).
    QuotedString(String),
    /// A reference to a previously resolved variable.
    Var(String),
    /// The coordinate rendering surface available to this document.
    Graph,
    /// A single point.
    PointAt(f64, f64),
    /// A positioned vector built from its arguments' coordinates.
    VectorLiteral,
    /// A typeset math component; the payload is its markup.
    MathText(String),

    /// `a + b`, optional third argument relocating the result start.
    Add,
    /// `a - b`, optional third argument relocating the result start.
    Sub,
    /// Projection of the first operand onto the second.
    Project,
    /// Parallel/perpendicular split of the first operand along the second.
    Decompose,
    /// Scalar multiple, optional second argument relocating the result start.
    Scale(f64),
    /// Direction reversal in place.
    Reverse,
    /// Translation along the operand's own direction (negative = backward).
    ShiftAlong(f64),
    /// Perpendicular translation; positive distance is counter-clockwise.
    ShiftPerp(f64),
    /// Relocation of the operand's start to the point argument.
    CopyTo,

    /// Select the fragments matching the pattern arguments.
    SelectOnly,
    /// Select every fragment the pattern arguments do not match.
    SelectWithout,
    /// The i-th item of a selection collection.
    Item(usize),
    /// Compile a selection into a write effect.
    Write,
}

/// Resolved output of an expression node.
#[derive(Clone, Debug, PartialEq)]
pub enum Resolved {
    /// Flat numeric values.
    Scalars(Vec<f64>),
    /// A positioned vector.
    Vector(PositionedVector),
    /// A tip-to-tail vector decomposition.
    Decomposition(Decomposition),
    /// A plain string.
    Text(String),
    /// A coordinate rendering surface handle.
    Graph(GraphHandle),
    /// A typeset component owned by the session.
    Component(crate::foundation::core::ComponentId),
    /// A resolved selection.
    Selection(TextItemCollection),
}

/// Everything a `resolve` call may touch: the owning session (component
/// arena, variable registry), the typeset capability, and the document's
/// graph handle if one exists. Passed by reference, never global.
pub struct ResolveContext<'a> {
    pub session: &'a mut DocumentSession,
    pub engine: &'a mut dyn TypesetEngine,
    pub graph: Option<GraphHandle>,
}

/// One node of the expression tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Expression {
    name: String,
    kind: ExprKind,
    args: Vec<Expression>,
    resolved: Option<Resolved>,
}

impl Expression {
    pub fn new(name: impl Into<String>, kind: ExprKind, args: Vec<Expression>) -> Self {
        Self {
            name: name.into(),
            kind,
            args,
            resolved: None,
        }
    }

    pub fn number(name: impl Into<String>, value: f64) -> Self {
        Self::new(name, ExprKind::Number(value), vec![])
    }

    pub fn coordinates(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self::new(name, ExprKind::Coordinates(values), vec![])
    }

    pub fn quoted(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(name, ExprKind::QuotedString(text.into()), vec![])
    }

    pub fn var(name: impl Into<String>, referenced: impl Into<String>) -> Self {
        Self::new(name, ExprKind::Var(referenced.into()), vec![])
    }

    pub fn math_text(name: impl Into<String>, markup: impl Into<String>) -> Self {
        Self::new(name, ExprKind::MathText(markup.into()), vec![])
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &ExprKind {
        &self.kind
    }

    pub fn args(&self) -> &[Expression] {
        &self.args
    }

    /// Resolved output, if `resolve` has run.
    pub fn resolved(&self) -> Option<&Resolved> {
        self.resolved.as_ref()
    }

    /// Resolve this node: children first, then arity/type validation, then
    /// this node's own output. Re-invoking with the same context recomputes
    /// the same output.
    #[tracing::instrument(skip(self, ctx), fields(expr = %self.name))]
    pub fn resolve(&mut self, ctx: &mut ResolveContext<'_>) -> ChalkResult<()> {
        for arg in &mut self.args {
            arg.resolve(ctx)?;
        }
        let out = match &self.kind {
            ExprKind::Number(n) => Resolved::Scalars(vec![*n]),
            ExprKind::Coordinates(values) => Resolved::Scalars(values.clone()),
            ExprKind::QuotedString(text) => Resolved::Text(text.clone()),
            ExprKind::PointAt(x, y) => Resolved::Scalars(vec![*x, *y]),
            ExprKind::Var(referenced) => match ctx.session.variable(referenced) {
                Some(value) => value.clone(),
                None => {
                    return Err(ChalkError::script(
                        &self.name,
                        format!("unknown variable `{referenced}`"),
                    ));
                }
            },
            ExprKind::Graph => match ctx.graph {
                Some(handle) => Resolved::Graph(handle),
                None => {
                    return Err(ChalkError::script(
                        &self.name,
                        "no graph is available in this document",
                    ));
                }
            },
            ExprKind::VectorLiteral => {
                let values = flatten_args(&self.name, &self.args)?;
                let operand = VectorOperand::from_atomic_values(&self.name, &values)?;
                Resolved::Vector(operand.into_positioned())
            }
            ExprKind::MathText(markup) => {
                let position = match self.args.first() {
                    Some(arg) => arg.point(&self.name)?,
                    None => Point::ZERO,
                };
                let component = ctx.engine.typeset(markup, position)?;
                Resolved::Component(ctx.session.insert_component(component))
            }
            ExprKind::Add
            | ExprKind::Sub
            | ExprKind::Project
            | ExprKind::Decompose
            | ExprKind::Scale(_)
            | ExprKind::Reverse
            | ExprKind::ShiftAlong(_)
            | ExprKind::ShiftPerp(_)
            | ExprKind::CopyTo => vector_ops::resolve(&self.kind, &self.name, &self.args)?,
            ExprKind::SelectOnly
            | ExprKind::SelectWithout
            | ExprKind::Item(_)
            | ExprKind::Write => select::resolve(&self.kind, &self.name, &self.args, ctx)?,
        };
        self.resolved = Some(out);
        Ok(())
    }

    /// Flat numeric view of the resolved output.
    pub fn atomic_values(&self) -> ChalkResult<Vec<f64>> {
        match self.require_resolved()? {
            Resolved::Scalars(values) => Ok(values.clone()),
            Resolved::Vector(v) => Ok(v.to_flat().to_vec()),
            Resolved::Decomposition(d) => {
                let mut out = d.parallel.to_flat().to_vec();
                out.extend_from_slice(&d.perpendicular.to_flat());
                Ok(out)
            }
            other => Err(ChalkError::script(
                &self.name,
                format!("{} has no numeric value", resolved_label(other)),
            )),
        }
    }

    /// Extract this node as a vector operand: the dedicated `(start, end)`
    /// accessor when the node resolved to a vector, otherwise the flat
    /// atomic-value fallback. Both paths normalize to one canonical shape.
    pub fn operand(&self) -> ChalkResult<VectorOperand> {
        match self.require_resolved()? {
            Resolved::Vector(v) => Ok(VectorOperand::Positioned(*v)),
            _ => {
                let values = self.atomic_values()?;
                VectorOperand::from_atomic_values(&self.name, &values)
            }
        }
    }

    /// Extract this node as a single point.
    pub fn point(&self, origin: &str) -> ChalkResult<Point> {
        let values = self.atomic_values().map_err(|_| {
            ChalkError::script(origin, format!("`{}` is not a point", self.name))
        })?;
        match values.as_slice() {
            [x, y] => Ok(Point::new(*x, *y)),
            _ => Err(ChalkError::script(
                origin,
                format!("expected 2 coordinates for a point, got {}", values.len()),
            )),
        }
    }

    /// Whether compiling this node into a command yields a playable effect.
    pub fn can_play(&self) -> bool {
        match &self.kind {
            ExprKind::Number(_) | ExprKind::QuotedString(_) | ExprKind::Graph => false,
            ExprKind::Var(_) => matches!(
                self.resolved,
                Some(Resolved::Vector(_) | Resolved::Selection(_) | Resolved::Component(_))
            ),
            _ => true,
        }
    }

    /// Compile the resolved output into a command. Must not be called before
    /// `resolve`; the ordering is part of the contract and checked here.
    pub fn to_command(&self, options: CommandOptions) -> ChalkResult<Box<dyn Command>> {
        let resolved = self.require_resolved()?;
        match resolved {
            Resolved::Vector(v) => Ok(Box::new(ArrowCommand::new(
                VectorSource::Inline(vec![*v]),
                options,
            ))),
            Resolved::Decomposition(d) => Ok(Box::new(ArrowCommand::new(
                VectorSource::Inline(vec![d.parallel, d.perpendicular]),
                options,
            ))),
            Resolved::Scalars(values) => match values.as_slice() {
                [x, y] => Ok(Box::new(ShapeCommand::new(
                    ShapeSpec::Dot {
                        at: Point::new(*x, *y),
                    },
                    options,
                ))),
                _ => Err(ChalkError::script(
                    &self.name,
                    "only a 2-coordinate point compiles to a shape",
                )),
            },
            Resolved::Selection(collection) => Ok(Box::new(SelectionWriteCommand::new(
                SelectionSource::Collection(collection.clone()),
                options,
            ))),
            Resolved::Component(id) => Ok(Box::new(SelectionWriteCommand::new(
                SelectionSource::WholeComponent(*id),
                options,
            ))),
            Resolved::Text(_) | Resolved::Graph(_) => Err(ChalkError::script(
                &self.name,
                format!("{} cannot be compiled to a command", resolved_label(resolved)),
            )),
        }
    }

    fn require_resolved(&self) -> ChalkResult<&Resolved> {
        self.resolved.as_ref().ok_or_else(|| {
            ChalkError::script(&self.name, "used before resolve() was called")
        })
    }
}

/// Concatenated atomic values of a slice of resolved arguments.
pub(crate) fn flatten_args(origin: &str, args: &[Expression]) -> ChalkResult<Vec<f64>> {
    if args.is_empty() {
        return Err(ChalkError::script(origin, "expected at least one argument"));
    }
    let mut out = Vec::new();
    for arg in args {
        out.extend(arg.atomic_values()?);
    }
    Ok(out)
}

fn resolved_label(resolved: &Resolved) -> &'static str {
    match resolved {
        Resolved::Scalars(_) => "a numeric value",
        Resolved::Vector(_) => "a vector",
        Resolved::Decomposition(_) => "a decomposition",
        Resolved::Text(_) => "a string",
        Resolved::Graph(_) => "a graph reference",
        Resolved::Component(_) => "a typeset component",
        Resolved::Selection(_) => "a selection",
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/node.rs"]
mod tests;
