//! Document session: the one owner of cross-expression state.
//!
//! Everything the original design kept in process-wide globals lives here as
//! explicit maps: the arena of typeset components, the variable registry of
//! resolved expression snapshots, and the shape registry commands publish
//! created objects into. A session is passed by reference into every resolve
//! and lifecycle call; `reset` clears it wholesale between documents, never
//! partially.

use std::collections::BTreeMap;

use crate::expression::node::Resolved;
use crate::foundation::core::{ComponentId, PositionedVector, ShapeId};
use crate::render::component::RenderedComponent;
use crate::selection::unit::TextItemCollection;

/// A created object published under a script-visible name.
#[derive(Clone, Debug, PartialEq)]
pub enum RegisteredObject {
    Shape(ShapeId),
    Vector(PositionedVector),
    Component(ComponentId),
    Collection(TextItemCollection),
}

#[derive(Default)]
pub struct DocumentSession {
    next_component: u64,
    components: BTreeMap<ComponentId, Box<dyn RenderedComponent>>,
    variables: BTreeMap<String, Resolved>,
    registry: BTreeMap<String, RegisteredObject>,
}

impl DocumentSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a typeset component and hand back its id.
    pub fn insert_component(&mut self, component: Box<dyn RenderedComponent>) -> ComponentId {
        let id = ComponentId(self.next_component);
        self.next_component += 1;
        self.components.insert(id, component);
        id
    }

    pub fn component(&self, id: ComponentId) -> Option<&dyn RenderedComponent> {
        self.components.get(&id).map(|c| c.as_ref())
    }

    /// Destroy and drop one component.
    pub fn remove_component(&mut self, id: ComponentId) {
        if let Some(mut component) = self.components.remove(&id) {
            component.destroy();
        }
    }

    /// Snapshot a resolved expression under a variable name. Each variable
    /// is meant to be written once; a rebind replaces the old snapshot with
    /// a warning.
    pub fn define(&mut self, name: impl Into<String>, value: Resolved) {
        let name = name.into();
        if self.variables.insert(name.clone(), value).is_some() {
            tracing::warn!(name, "variable rebound");
        }
    }

    pub fn variable(&self, name: &str) -> Option<&Resolved> {
        self.variables.get(name)
    }

    /// Publish a created object into the shape registry.
    pub fn register(&mut self, name: impl Into<String>, object: RegisteredObject) {
        let name = name.into();
        if self.registry.insert(name.clone(), object).is_some() {
            tracing::warn!(name, "registry entry rebound");
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&RegisteredObject> {
        self.registry.get(name)
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty() && self.variables.is_empty() && self.registry.is_empty()
    }

    /// Clear the whole session: destroy every component, drop every variable
    /// and registry entry.
    pub fn reset(&mut self) {
        for component in self.components.values_mut() {
            component.destroy();
        }
        self.components.clear();
        self.variables.clear();
        self.registry.clear();
    }
}

impl std::fmt::Debug for DocumentSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentSession")
            .field("components", &self.components.len())
            .field("variables", &self.variables.len())
            .field("registry", &self.registry.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/document.rs"]
mod tests;
