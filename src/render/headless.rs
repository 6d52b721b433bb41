//! In-memory drawing surface.
//!
//! Records every draw call instead of rasterizing, so tests and scripted
//! dry-runs can assert on the exact shapes a command sequence produced and
//! on end-state parity between the animated and instant playback paths.

use crate::foundation::core::{Point, ShapeId};
use crate::render::surface::{AnnotationLayer, DrawSurface, ShapeSpec, ShapeStyle};

/// One recorded draw call.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawRecord {
    pub id: ShapeId,
    pub spec: ShapeSpec,
    pub style: ShapeStyle,
    /// Reveal progress in `[0, 1]`; `1.0` is the fully drawn end state.
    pub progress: f64,
}

/// A [`DrawSurface`] and [`AnnotationLayer`] that keeps everything in memory.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    next_id: u64,
    shapes: Vec<DrawRecord>,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc(&mut self) -> ShapeId {
        let id = ShapeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Shapes currently on the surface, in draw order.
    pub fn visible(&self) -> &[DrawRecord] {
        &self.shapes
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.shapes.iter().any(|r| r.id == id)
    }

    pub fn record(&self, id: ShapeId) -> Option<&DrawRecord> {
        self.shapes.iter().find(|r| r.id == id)
    }
}

impl DrawSurface for HeadlessSurface {
    fn draw(&mut self, spec: ShapeSpec, style: ShapeStyle) -> ShapeId {
        let id = self.alloc();
        self.shapes.push(DrawRecord {
            id,
            spec,
            style,
            progress: 1.0,
        });
        id
    }

    fn set_progress(&mut self, id: ShapeId, progress: f64) {
        if let Some(record) = self.shapes.iter_mut().find(|r| r.id == id) {
            record.progress = progress.clamp(0.0, 1.0);
        }
    }

    fn remove(&mut self, id: ShapeId) {
        self.shapes.retain(|r| r.id != id);
    }

    fn clear(&mut self) {
        self.shapes.clear();
    }
}

impl AnnotationLayer for HeadlessSurface {
    fn annotate(&mut self, text: &str, at: Point) -> ShapeId {
        self.draw(
            ShapeSpec::Label {
                text: text.to_owned(),
                at,
            },
            ShapeStyle::default(),
        )
    }

    fn remove_annotation(&mut self, id: ShapeId) {
        self.remove(id);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/headless.rs"]
mod tests;
