//! Geometric drawing commands.

use crate::command::lifecycle::{Command, CommandContext, CommandOptions, CommandState};
use crate::foundation::core::{Point, PositionedVector};
use crate::foundation::error::{ChalkError, ChalkResult};
use crate::render::surface::{ShapeSpec, ShapeStyle};
use crate::session::document::RegisteredObject;

fn style_from(options: &CommandOptions) -> ShapeStyle {
    ShapeStyle {
        color: options.color.clone(),
        ..ShapeStyle::default()
    }
}

/// Where an arrow command gets its vectors.
#[derive(Clone, Debug, PartialEq)]
pub enum VectorSource {
    /// Already-resolved vectors, straight from a compiled expression.
    Inline(Vec<PositionedVector>),
    /// A registry lookup by name. A missing or mistyped entry is handled
    /// leniently: warn and leave the command without a result.
    Named(String),
}

/// Draws one static shape; the end state is reached during `init`.
pub struct ShapeCommand {
    state: CommandState,
    spec: ShapeSpec,
}

impl ShapeCommand {
    pub fn new(spec: ShapeSpec, options: CommandOptions) -> Self {
        Self {
            state: CommandState::with_options(options),
            spec,
        }
    }
}

fn spec_anchor(spec: &ShapeSpec) -> Option<Point> {
    match spec {
        ShapeSpec::Dot { at } | ShapeSpec::Label { at, .. } => Some(*at),
        ShapeSpec::Segment { to, .. } => Some(*to),
        ShapeSpec::Polyline { points } => points.last().copied(),
        ShapeSpec::Arrow { vector } => Some(vector.end),
        ShapeSpec::CellText { .. } | ShapeSpec::Reveal { .. } | ShapeSpec::MovedCopy { .. } => {
            None
        }
    }
}

impl Command for ShapeCommand {
    fn state(&self) -> &CommandState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut CommandState {
        &mut self.state
    }

    fn do_init(&mut self, ctx: &mut CommandContext<'_>) -> ChalkResult<()> {
        let style = style_from(&self.state.options);
        let id = ctx.surface.draw(self.spec.clone(), style);
        self.state.result.push(id);
        self.state.label_anchor = spec_anchor(&self.spec);
        if let Some(name) = self.state.options.register_as.clone() {
            ctx.session.register(name, RegisteredObject::Shape(id));
        }
        Ok(())
    }
}

/// Draws one or more vector arrows that grow from tail to tip when played.
///
/// `init` stages the arrows at zero reveal; `play` hands the growth to the
/// tween queue; `direct_play` jumps straight to the end state. Playing again
/// re-triggers the growth from zero.
pub struct ArrowCommand {
    state: CommandState,
    source: VectorSource,
    vectors: Vec<PositionedVector>,
}

impl ArrowCommand {
    pub fn new(source: VectorSource, options: CommandOptions) -> Self {
        Self {
            state: CommandState::with_options(options),
            source,
            vectors: Vec::new(),
        }
    }
}

impl Command for ArrowCommand {
    fn state(&self) -> &CommandState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut CommandState {
        &mut self.state
    }

    fn do_init(&mut self, ctx: &mut CommandContext<'_>) -> ChalkResult<()> {
        self.vectors = match &self.source {
            VectorSource::Inline(vectors) => vectors.clone(),
            VectorSource::Named(name) => match ctx.session.lookup(name) {
                Some(RegisteredObject::Vector(v)) => vec![*v],
                Some(_) => {
                    tracing::warn!(name, "registry entry is not a vector; skipping arrow");
                    return Ok(());
                }
                None => {
                    tracing::warn!(name, "no registry entry; skipping arrow");
                    return Ok(());
                }
            },
        };
        let style = style_from(&self.state.options);
        for vector in &self.vectors {
            let id = ctx
                .surface
                .draw(ShapeSpec::Arrow { vector: *vector }, style.clone());
            ctx.surface.set_progress(id, 0.0);
            self.state.result.push(id);
        }
        self.state.label_anchor = self.vectors.last().map(|v| v.end);
        if let (Some(name), Some(first)) = (
            self.state.options.register_as.clone(),
            self.vectors.first().copied(),
        ) {
            ctx.session.register(name, RegisteredObject::Vector(first));
        }
        Ok(())
    }

    fn do_play(&mut self, ctx: &mut CommandContext<'_>) -> ChalkResult<()> {
        if self.state.result.is_empty() {
            return Ok(());
        }
        let owner = *self
            .state
            .owner
            .get_or_insert_with(|| ctx.queue.register_owner());
        let ids = self.state.result.clone();
        for id in &ids {
            ctx.surface.set_progress(*id, 0.0);
        }
        ctx.queue.schedule(
            owner,
            Box::new(move |_queue, surface| {
                for id in ids {
                    surface.set_progress(id, 1.0);
                }
            }),
        );
        Ok(())
    }

    fn do_direct_play(&mut self, ctx: &mut CommandContext<'_>) -> ChalkResult<()> {
        for id in &self.state.result {
            ctx.surface.set_progress(*id, 1.0);
        }
        Ok(())
    }
}

/// Writes text into a table cell; instant, no animated path.
pub struct TableCellCommand {
    state: CommandState,
    row: usize,
    col: usize,
    text: String,
}

impl TableCellCommand {
    pub fn new(row: usize, col: usize, text: impl Into<String>, options: CommandOptions) -> Self {
        Self {
            state: CommandState::with_options(options),
            row,
            col,
            text: text.into(),
        }
    }

    /// Build from options whose `params` carry `{ "row", "col", "text" }`.
    pub fn from_options(options: CommandOptions) -> ChalkResult<Self> {
        #[derive(serde::Deserialize)]
        struct Params {
            row: usize,
            col: usize,
            text: String,
        }
        let params: Params = serde_json::from_value(options.params.clone())
            .map_err(|e| ChalkError::command(format!("bad table-cell params: {e}")))?;
        Ok(Self::new(params.row, params.col, params.text, options))
    }
}

impl Command for TableCellCommand {
    fn state(&self) -> &CommandState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut CommandState {
        &mut self.state
    }

    fn do_init(&mut self, ctx: &mut CommandContext<'_>) -> ChalkResult<()> {
        let style = style_from(&self.state.options);
        let id = ctx.surface.draw(
            ShapeSpec::CellText {
                row: self.row,
                col: self.col,
                text: self.text.clone(),
            },
            style,
        );
        self.state.result.push(id);
        if let Some(name) = self.state.options.register_as.clone() {
            ctx.session.register(name, RegisteredObject::Shape(id));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/command/draw.rs"]
mod tests;
