//! Shadow-probe selection resolution.
//!
//! Given an already-rendered component and one or more textual patterns, this
//! pipeline finds the exact rendered fragments the patterns correspond to:
//! wrap the matches in zero-footprint markers, typeset a throwaway copy at
//! the identical position, measure where each marker landed, and claim the
//! target's fragments whose geometry falls inside each measured rectangle.
//! The shadow copy is scoped to the call and destroyed on every exit path.

use crate::foundation::core::{Point, Rect, rects_overlap};
use crate::foundation::error::{ChalkError, ChalkResult};
use crate::markup::pattern;
use crate::render::component::{RenderedComponent, TypesetEngine};
use crate::selection::unit::SelectionUnit;

/// A throwaway, identically-positioned render of marker-wrapped markup, used
/// only to measure marker rectangles. Destroyed on drop; never enters the
/// scene or any retained list.
pub struct ShadowProbe {
    component: Box<dyn RenderedComponent>,
    marker_count: usize,
}

impl ShadowProbe {
    /// Render the wrapped markup at `position`.
    pub fn render(
        engine: &mut dyn TypesetEngine,
        wrapped: &str,
        position: Point,
    ) -> ChalkResult<Self> {
        let component = engine.typeset(wrapped, position)?;
        Ok(Self {
            component,
            marker_count: pattern::marker_count(wrapped),
        })
    }

    /// Number of marker regions in the probed markup.
    pub fn marker_count(&self) -> usize {
        self.marker_count
    }

    /// Measured rectangles of every marker, in document order.
    pub fn measure(&self) -> ChalkResult<Vec<Rect>> {
        (0..self.marker_count)
            .map(|i| {
                self.component.marker_bounds(i).ok_or_else(|| {
                    ChalkError::selection(format!("shadow render exposes no marker {i}"))
                })
            })
            .collect()
    }
}

impl Drop for ShadowProbe {
    fn drop(&mut self) {
        self.component.destroy();
    }
}

/// A matched selection: the claimed fragment set plus the measured rectangle
/// it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchedUnit {
    /// Fragments of the target claimed by the marker rectangle.
    pub unit: SelectionUnit,
    /// The marker rectangle, in the component's coordinate frame.
    pub bounds: Rect,
}

/// Fragments of `target` whose geometry strictly overlaps `rect`.
fn claim_fragments(target: &dyn RenderedComponent, rect: Rect) -> SelectionUnit {
    target
        .fragments()
        .into_iter()
        .filter(|id| {
            target
                .fragment_bounds(id)
                .is_some_and(|b| rects_overlap(b, rect))
        })
        .collect()
}

/// Resolve `patterns` against `target` into one matched unit per marker, in
/// document order. Zero matches yield an empty list, not an error.
#[tracing::instrument(skip(engine, target, patterns))]
pub fn resolve_matches(
    engine: &mut dyn TypesetEngine,
    target: &dyn RenderedComponent,
    patterns: &[String],
) -> ChalkResult<Vec<MatchedUnit>> {
    let wrapped = pattern::wrap_patterns(target.content(), patterns)?;
    let probe = ShadowProbe::render(engine, &wrapped, target.position())?;
    let rects = probe.measure()?;
    Ok(rects
        .into_iter()
        .map(|bounds| MatchedUnit {
            unit: claim_fragments(target, bounds),
            bounds,
        })
        .collect())
}

/// Resolve the complement of `patterns` against `target`: every fragment not
/// claimed by any match, packaged as one synthetic unit (no single bounding
/// rectangle exists for it).
pub fn resolve_complement(
    engine: &mut dyn TypesetEngine,
    target: &dyn RenderedComponent,
    patterns: &[String],
) -> ChalkResult<SelectionUnit> {
    let matched = resolve_matches(engine, target, patterns)?;
    let claimed = matched
        .iter()
        .fold(SelectionUnit::new(), |acc, m| acc.union(&m.unit));
    let all: SelectionUnit = target.fragments().into_iter().collect();
    Ok(all.difference(&claimed))
}

#[cfg(test)]
#[path = "../../tests/unit/selection/probe.rs"]
mod tests;
