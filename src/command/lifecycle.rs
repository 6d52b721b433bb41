//! Command lifecycle skeleton.
//!
//! States: uninitialized → initialized → played or direct-played. `init`
//! builds the underlying effect through the `pre/do/post` hooks, `play` is
//! the animated path, `direct_play` the instant one; both must leave the
//! surface in the same final visual state. `clear` is explicit teardown back
//! to the pre-init state: visual resources are released by their one owner,
//! never left to collection.

use serde::{Deserialize, Serialize};

use crate::command::queue::{OwnerId, TweenQueue};
use crate::foundation::core::{Point, ShapeId, Vec2};
use crate::foundation::error::{ChalkError, ChalkResult};
use crate::render::component::TypesetEngine;
use crate::render::surface::{AnnotationLayer, DrawSurface};
use crate::session::document::DocumentSession;

/// Collaborator handles passed into every lifecycle call. A flat bag:
/// commands read only the fields they need and tolerate the absent optional
/// ones.
pub struct CommandContext<'a> {
    pub session: &'a mut DocumentSession,
    pub surface: &'a mut dyn DrawSurface,
    pub engine: &'a mut dyn TypesetEngine,
    pub queue: &'a mut TweenQueue,
    /// Overlay for labels and callouts; `None` for surfaces without one.
    pub annotations: Option<&'a mut dyn AnnotationLayer>,
}

/// Styling and bookkeeping options shared by every command.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandOptions {
    /// CSS-style color string, surface default when `None`.
    pub color: Option<String>,
    /// Label text shown after playback.
    pub label: Option<String>,
    pub show_label: bool,
    /// Offset of the label from the effect's anchor point.
    pub label_offset: Vec2,
    /// Registry name the created object is published under.
    pub register_as: Option<String>,
    /// Command-specific knobs, passed through opaquely from the script.
    pub params: serde_json::Value,
}

impl Default for CommandOptions {
    fn default() -> Self {
        Self {
            color: None,
            label: None,
            show_label: true,
            label_offset: Vec2::ZERO,
            register_as: None,
            params: serde_json::Value::Null,
        }
    }
}

impl CommandOptions {
    /// Parse options from a script-supplied JSON object.
    pub fn from_json(value: serde_json::Value) -> ChalkResult<Self> {
        serde_json::from_value(value)
            .map_err(|e| ChalkError::command(format!("bad command options: {e}")))
    }
}

/// State every command carries through its lifecycle.
#[derive(Debug, Default)]
pub struct CommandState {
    pub options: CommandOptions,
    /// Shapes this command created on the surface.
    pub result: Vec<ShapeId>,
    /// Where the label attaches; set by `do_init` when the effect has one.
    pub label_anchor: Option<Point>,
    pub label_id: Option<ShapeId>,
    pub owner: Option<OwnerId>,
    pub initialized: bool,
}

impl CommandState {
    pub fn with_options(options: CommandOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Whether `do_init` produced anything. `false` after a missing-reference
    /// no-op init.
    pub fn has_result(&self) -> bool {
        !self.result.is_empty()
    }
}

/// A staged, playable visual effect.
///
/// Implementors override the `do_*` hooks; the provided `init`, `play`,
/// `direct_play` and `clear` methods are the state machine itself.
pub trait Command {
    fn state(&self) -> &CommandState;
    fn state_mut(&mut self) -> &mut CommandState;

    fn pre_init(&mut self, _ctx: &mut CommandContext<'_>) -> ChalkResult<()> {
        Ok(())
    }

    /// Create the underlying effect and record it in the state. A missing
    /// registry reference is not an error here: warn, leave the result
    /// empty, and later playback calls become no-ops.
    fn do_init(&mut self, ctx: &mut CommandContext<'_>) -> ChalkResult<()>;

    fn post_init(&mut self, _ctx: &mut CommandContext<'_>) -> ChalkResult<()> {
        Ok(())
    }

    fn init(&mut self, ctx: &mut CommandContext<'_>) -> ChalkResult<()> {
        if self.state().initialized {
            return Err(ChalkError::command("init() called on an initialized command"));
        }
        self.pre_init(ctx)?;
        self.do_init(ctx)?;
        self.post_init(ctx)?;
        self.state_mut().initialized = true;
        Ok(())
    }

    fn pre_play(&mut self, _ctx: &mut CommandContext<'_>) -> ChalkResult<()> {
        Ok(())
    }

    /// Animated playback. Default is a no-op: many effects already reach
    /// their end state during `do_init`.
    fn do_play(&mut self, _ctx: &mut CommandContext<'_>) -> ChalkResult<()> {
        Ok(())
    }

    fn post_play(&mut self, ctx: &mut CommandContext<'_>) -> ChalkResult<()> {
        self.show_label(ctx);
        Ok(())
    }

    fn play(&mut self, ctx: &mut CommandContext<'_>) -> ChalkResult<()> {
        if !self.state().initialized {
            return Err(ChalkError::command("play() called before init()"));
        }
        self.pre_play(ctx)?;
        self.do_play(ctx)?;
        self.post_play(ctx)
    }

    /// Instant playback. Default renders nothing extra beyond `do_init`.
    fn do_direct_play(&mut self, _ctx: &mut CommandContext<'_>) -> ChalkResult<()> {
        Ok(())
    }

    fn direct_play(&mut self, ctx: &mut CommandContext<'_>) -> ChalkResult<()> {
        if !self.state().initialized {
            self.init(ctx)?;
        }
        self.do_direct_play(ctx)?;
        self.show_label(ctx);
        Ok(())
    }

    /// Place the label on the annotation layer, once, if one is configured
    /// and the effect produced an anchor.
    fn show_label(&mut self, ctx: &mut CommandContext<'_>) {
        let state = self.state();
        if state.label_id.is_some() || !state.options.show_label {
            return;
        }
        let Some(label) = state.options.label.clone().filter(|l| !l.is_empty()) else {
            return;
        };
        let Some(anchor) = state.label_anchor else {
            return;
        };
        let at = anchor + state.options.label_offset;
        if let Some(layer) = ctx.annotations.as_deref_mut() {
            let id = layer.annotate(&label, at);
            self.state_mut().label_id = Some(id);
        }
    }

    /// Teardown back to the pre-init state: cancel pending completions,
    /// release every created shape, drop the label.
    fn clear(&mut self, ctx: &mut CommandContext<'_>) {
        let state = self.state_mut();
        if let Some(owner) = state.owner.take() {
            ctx.queue.cancel(owner);
        }
        for id in state.result.drain(..) {
            ctx.surface.remove(id);
        }
        if let Some(label_id) = state.label_id.take() {
            if let Some(layer) = ctx.annotations.as_deref_mut() {
                layer.remove_annotation(label_id);
            }
        }
        state.label_anchor = None;
        state.initialized = false;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/command/lifecycle.rs"]
mod tests;
