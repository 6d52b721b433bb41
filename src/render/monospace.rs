//! Deterministic headless typesetting.
//!
//! `MonospaceTypeset` implements the rendered-component capability without a
//! real math engine: every visible token (a control word like `\theta`, or a
//! single character) becomes one fixed-advance glyph fragment; whitespace,
//! grouping braces, and the zero-footprint marker syntax consume no space.
//! The same markup therefore lays out identically with and without markers,
//! which is exactly the property the shadow-probe correlation relies on.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::foundation::core::{Point, Rect};
use crate::foundation::error::ChalkResult;
use crate::markup::pattern::MARKER_OPEN;
use crate::render::component::{RenderedComponent, TypesetEngine};
use crate::selection::unit::FragmentId;

static CONTROL_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\\[a-zA-Z]+").unwrap());

/// Fixed-advance headless typeset engine.
#[derive(Clone, Copy, Debug)]
pub struct MonospaceTypeset {
    /// Horizontal advance per glyph.
    pub advance: f64,
    /// Glyph box height.
    pub line_height: f64,
}

impl Default for MonospaceTypeset {
    fn default() -> Self {
        Self {
            advance: 10.0,
            line_height: 12.0,
        }
    }
}

impl TypesetEngine for MonospaceTypeset {
    fn typeset(
        &mut self,
        markup: &str,
        position: Point,
    ) -> ChalkResult<Box<dyn RenderedComponent>> {
        Ok(Box::new(MonoComponent::layout(
            markup,
            position,
            self.advance,
            self.line_height,
        )))
    }
}

#[derive(Clone, Debug)]
struct MonoGlyph {
    id: FragmentId,
    rect: Rect,
}

/// A monospace-rendered component.
#[derive(Clone, Debug)]
pub struct MonoComponent {
    markup: String,
    position: Point,
    glyphs: Vec<MonoGlyph>,
    markers: Vec<Rect>,
    destroyed: bool,
}

impl MonoComponent {
    fn layout(markup: &str, position: Point, advance: f64, line_height: f64) -> Self {
        let mut glyphs: Vec<MonoGlyph> = Vec::new();
        let mut markers: Vec<Rect> = Vec::new();
        // (marker index, brace depth, first glyph index)
        let mut active: Option<(usize, usize, usize)> = None;

        let glyph_rect = |index: usize| {
            let x0 = position.x + index as f64 * advance;
            Rect::new(x0, position.y, x0 + advance, position.y + line_height)
        };

        let mut i = 0usize;
        while i < markup.len() {
            let rest = &markup[i..];
            if active.is_none() && rest.starts_with(MARKER_OPEN) {
                markers.push(Rect::ZERO);
                active = Some((markers.len() - 1, 1, glyphs.len()));
                i += MARKER_OPEN.len();
                continue;
            }

            let ch = rest.chars().next().expect("in-bounds byte offset");
            match ch {
                '{' => {
                    if let Some((_, depth, _)) = active.as_mut() {
                        *depth += 1;
                    }
                    i += 1;
                }
                '}' => {
                    let mut closed = None;
                    if let Some((marker, depth, first)) = active.as_mut() {
                        *depth -= 1;
                        if *depth == 0 {
                            closed = Some((*marker, *first));
                        }
                    }
                    if let Some((marker, first)) = closed {
                        markers[marker] = union_rect(&glyphs[first..], glyph_rect(first));
                        active = None;
                    }
                    i += 1;
                }
                '\\' => {
                    let token_len = CONTROL_WORD
                        .find(rest)
                        .map(|m| m.end())
                        // A lone backslash escapes the next character.
                        .unwrap_or_else(|| {
                            1 + rest[1..].chars().next().map_or(0, char::len_utf8)
                        });
                    glyphs.push(MonoGlyph {
                        id: format!("g{}", glyphs.len()),
                        rect: glyph_rect(glyphs.len()),
                    });
                    i += token_len;
                }
                c if c.is_whitespace() => i += ch.len_utf8(),
                _ => {
                    glyphs.push(MonoGlyph {
                        id: format!("g{}", glyphs.len()),
                        rect: glyph_rect(glyphs.len()),
                    });
                    i += ch.len_utf8();
                }
            }
        }

        Self {
            markup: markup.to_string(),
            position,
            glyphs,
            markers,
            destroyed: false,
        }
    }

    /// Whether `destroy` has been called.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

/// Union of glyph boxes; an empty marker degenerates to a zero-width rect at
/// the pen position so it claims no fragments.
fn union_rect(glyphs: &[MonoGlyph], pen: Rect) -> Rect {
    let mut iter = glyphs.iter();
    let Some(first) = iter.next() else {
        return Rect::new(pen.x0, pen.y0, pen.x0, pen.y1);
    };
    iter.fold(first.rect, |acc, g| acc.union(g.rect))
}

impl RenderedComponent for MonoComponent {
    fn content(&self) -> &str {
        &self.markup
    }

    fn position(&self) -> Point {
        self.position
    }

    fn fragments(&self) -> Vec<FragmentId> {
        self.glyphs.iter().map(|g| g.id.clone()).collect()
    }

    fn fragment_bounds(&self, fragment: &str) -> Option<Rect> {
        self.glyphs
            .iter()
            .find(|g| g.id == fragment)
            .map(|g| g.rect)
    }

    fn marker_bounds(&self, index: usize) -> Option<Rect> {
        self.markers.get(index).copied()
    }

    fn destroy(&mut self) {
        self.destroyed = true;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/monospace.rs"]
mod tests;
