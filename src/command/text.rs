//! Math-text commands: revealing and moving selected fragments.

use std::collections::VecDeque;

use crate::command::lifecycle::{Command, CommandContext, CommandOptions, CommandState};
use crate::command::queue::{OwnerId, TweenQueue};
use crate::foundation::core::{ComponentId, Point, ShapeId};
use crate::foundation::error::ChalkResult;
use crate::render::surface::{ShapeSpec, ShapeStyle};
use crate::selection::unit::{SelectionUnit, TextItem, TextItemCollection};
use crate::session::document::RegisteredObject;

fn fragment_list(unit: &SelectionUnit) -> Vec<String> {
    unit.iter().cloned().collect()
}

/// Where a write command gets its selection.
#[derive(Clone, Debug, PartialEq)]
pub enum SelectionSource {
    /// An already-resolved collection from a compiled expression.
    Collection(TextItemCollection),
    /// Every fragment of one typeset component.
    WholeComponent(ComponentId),
    /// A registry lookup by name; missing entries warn and no-op.
    Named(String),
}

/// Reveals the items of a selection, one after another.
///
/// The animated path chains the reveals through the tween queue: each item's
/// reveal is scheduled only from the previous item's completion, so playback
/// order is strict even though completion delivery is cooperative.
pub struct SelectionWriteCommand {
    state: CommandState,
    source: SelectionSource,
}

impl SelectionWriteCommand {
    pub fn new(source: SelectionSource, options: CommandOptions) -> Self {
        Self {
            state: CommandState::with_options(options),
            source,
        }
    }

    fn resolve_items(&self, ctx: &CommandContext<'_>) -> Option<TextItemCollection> {
        match &self.source {
            SelectionSource::Collection(collection) => Some(collection.clone()),
            SelectionSource::WholeComponent(id) => {
                let Some(component) = ctx.session.component(*id) else {
                    tracing::warn!(component = id.0, "component is gone; skipping write");
                    return None;
                };
                let unit: SelectionUnit = component.fragments().into_iter().collect();
                Some(TextItemCollection::new(vec![TextItem::new(*id, unit, None)]))
            }
            SelectionSource::Named(name) => match ctx.session.lookup(name) {
                Some(RegisteredObject::Collection(collection)) => Some(collection.clone()),
                Some(RegisteredObject::Component(id)) => {
                    let component = ctx.session.component(*id)?;
                    let unit: SelectionUnit = component.fragments().into_iter().collect();
                    Some(TextItemCollection::new(vec![TextItem::new(*id, unit, None)]))
                }
                Some(_) => {
                    tracing::warn!(name, "registry entry is not writable; skipping write");
                    None
                }
                None => {
                    tracing::warn!(name, "no registry entry; skipping write");
                    None
                }
            },
        }
    }
}

/// Schedule the reveal of the front shape; its completion schedules the next.
fn chain_reveals(queue: &mut TweenQueue, owner: OwnerId, mut ids: VecDeque<ShapeId>) {
    if let Some(id) = ids.pop_front() {
        queue.schedule(
            owner,
            Box::new(move |queue, surface| {
                surface.set_progress(id, 1.0);
                chain_reveals(queue, owner, ids);
            }),
        );
    }
}

impl Command for SelectionWriteCommand {
    fn state(&self) -> &CommandState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut CommandState {
        &mut self.state
    }

    fn do_init(&mut self, ctx: &mut CommandContext<'_>) -> ChalkResult<()> {
        let Some(collection) = self.resolve_items(ctx) else {
            return Ok(());
        };
        let style = ShapeStyle {
            color: self.state.options.color.clone(),
            ..ShapeStyle::default()
        };
        for item in collection.iter() {
            let id = ctx.surface.draw(
                ShapeSpec::Reveal {
                    component: item.component,
                    fragments: fragment_list(&item.unit),
                },
                style.clone(),
            );
            ctx.surface.set_progress(id, 0.0);
            self.state.result.push(id);
        }
        self.state.label_anchor = collection
            .iter()
            .find_map(|item| item.bounds)
            .map(|b| b.origin());
        if let Some(name) = self.state.options.register_as.clone() {
            ctx.session
                .register(name, RegisteredObject::Collection(collection));
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
        chain_reveals(ctx.queue, owner, self.state.result.iter().copied().collect());
        Ok(())
    }

    fn do_direct_play(&mut self, ctx: &mut CommandContext<'_>) -> ChalkResult<()> {
        for id in &self.state.result {
            ctx.surface.set_progress(*id, 1.0);
        }
        Ok(())
    }
}

/// Where a move command gets the item to clone.
#[derive(Clone, Debug, PartialEq)]
pub enum ItemSource {
    Inline(TextItem),
    /// Item `index` of a registered collection; lookup failures warn and
    /// no-op.
    Named { name: String, index: usize },
}

/// Clones a text item's fragments and moves the copy to a target point. The
/// source component keeps its own fragments untouched.
pub struct MoveTextItemCommand {
    state: CommandState,
    source: ItemSource,
    to: Point,
}

impl MoveTextItemCommand {
    pub fn new(source: ItemSource, to: Point, options: CommandOptions) -> Self {
        Self {
            state: CommandState::with_options(options),
            source,
            to,
        }
    }

    fn resolve_item(&self, ctx: &CommandContext<'_>) -> Option<TextItem> {
        match &self.source {
            ItemSource::Inline(item) => Some(item.clone()),
            ItemSource::Named { name, index } => match ctx.session.lookup(name) {
                Some(RegisteredObject::Collection(collection)) => {
                    match collection.get(*index) {
                        Some(item) => Some(item.clone()),
                        None => {
                            tracing::warn!(
                                name,
                                index,
                                "item index out of range; skipping move"
                            );
                            None
                        }
                    }
                }
                Some(_) => {
                    tracing::warn!(name, "registry entry is not a selection; skipping move");
                    None
                }
                None => {
                    tracing::warn!(name, "no registry entry; skipping move");
                    None
                }
            },
        }
    }
}

impl Command for MoveTextItemCommand {
    fn state(&self) -> &CommandState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut CommandState {
        &mut self.state
    }

    fn do_init(&mut self, ctx: &mut CommandContext<'_>) -> ChalkResult<()> {
        let Some(item) = self.resolve_item(ctx) else {
            return Ok(());
        };
        let id = ctx.surface.draw(
            ShapeSpec::MovedCopy {
                component: item.component,
                fragments: fragment_list(&item.unit),
                to: self.to,
            },
            ShapeStyle {
                color: self.state.options.color.clone(),
                ..ShapeStyle::default()
            },
        );
        ctx.surface.set_progress(id, 0.0);
        self.state.result.push(id);
        self.state.label_anchor = Some(self.to);
        if let Some(name) = self.state.options.register_as.clone() {
            ctx.session.register(name, RegisteredObject::Shape(id));
        }
        Ok(())
    }

    fn do_play(&mut self, ctx: &mut CommandContext<'_>) -> ChalkResult<()> {
        let Some(&id) = self.state.result.first() else {
            return Ok(());
        };
        let owner = *self
            .state
            .owner
            .get_or_insert_with(|| ctx.queue.register_owner());
        ctx.queue.schedule(
            owner,
            Box::new(move |_queue, surface| {
                surface.set_progress(id, 1.0);
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

#[cfg(test)]
#[path = "../../tests/unit/command/text.rs"]
mod tests;
