//! Selection data model: fragment sets and reusable text-item handles.

use std::collections::BTreeSet;

use crate::foundation::core::{ComponentId, Rect};

/// Identifier of the smallest addressable rendered glyph unit of a typeset
/// component. Only meaningful relative to the component that produced it.
pub type FragmentId = String;

/// An unordered set of fragment identifiers representing one semantic
/// sub-expression match within a single rendered component.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SelectionUnit {
    fragments: BTreeSet<FragmentId>,
}

impl SelectionUnit {
    /// Empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from any iterator of fragment ids.
    pub fn from_fragments(fragments: impl IntoIterator<Item = FragmentId>) -> Self {
        Self {
            fragments: fragments.into_iter().collect(),
        }
    }

    /// Add one fragment.
    pub fn insert(&mut self, fragment: FragmentId) {
        self.fragments.insert(fragment);
    }

    /// Whether the unit contains `fragment`.
    pub fn contains(&self, fragment: &str) -> bool {
        self.fragments.contains(fragment)
    }

    /// Number of fragments selected.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Whether no fragments are selected.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Iterate fragments in stable order.
    pub fn iter(&self) -> impl Iterator<Item = &FragmentId> {
        self.fragments.iter()
    }

    /// Set union.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            fragments: self.fragments.union(&other.fragments).cloned().collect(),
        }
    }

    /// Fragments of `self` not present in `other`.
    pub fn difference(&self, other: &Self) -> Self {
        Self {
            fragments: self
                .fragments
                .difference(&other.fragments)
                .cloned()
                .collect(),
        }
    }

    /// Whether the two units share no fragment.
    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.fragments.is_disjoint(&other.fragments)
    }
}

impl FromIterator<FragmentId> for SelectionUnit {
    fn from_iter<I: IntoIterator<Item = FragmentId>>(iter: I) -> Self {
        Self::from_fragments(iter)
    }
}

/// A reusable handle to a subset of a rendered component's fragments.
///
/// Created once by a selection operation and consumed many times by later
/// animation commands. `bounds` is `None` for complement selections, which
/// generally have no single enclosing rectangle.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextItem {
    /// The rendered component the fragments belong to.
    pub component: ComponentId,
    /// The selected fragment set.
    pub unit: SelectionUnit,
    /// Cached bounding box in the component's own coordinate frame, if the
    /// selection has one.
    pub bounds: Option<Rect>,
}

impl TextItem {
    /// Build a text item.
    pub fn new(component: ComponentId, unit: SelectionUnit, bounds: Option<Rect>) -> Self {
        Self {
            component,
            unit,
            bounds,
        }
    }
}

/// Ordered list of text items sharing one parent component, with indexed
/// lookup for "animate the i-th selected piece".
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextItemCollection {
    items: Vec<TextItem>,
}

impl TextItemCollection {
    /// Build from items in document order.
    pub fn new(items: Vec<TextItem>) -> Self {
        Self { items }
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the collection holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&TextItem> {
        self.items.get(index)
    }

    /// Iterate items in document order.
    pub fn iter(&self) -> impl Iterator<Item = &TextItem> {
        self.items.iter()
    }

    /// Union of all item fragment sets.
    pub fn all_fragments(&self) -> SelectionUnit {
        self.items
            .iter()
            .fold(SelectionUnit::new(), |acc, item| acc.union(&item.unit))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/selection/unit.rs"]
mod tests;
