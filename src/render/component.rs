//! External rendered-component capability.
//!
//! The typesetting engine itself is an external collaborator; chalkline only
//! consumes it through these narrow traits: typeset a markup string at a
//! position, enumerate the rendered glyph fragments and their geometry, read
//! the bounds of zero-footprint marker groups, and destroy the render.

use crate::foundation::core::{Point, Rect};
use crate::foundation::error::ChalkResult;
use crate::selection::unit::FragmentId;

/// One rendered typeset component.
///
/// Fragment identifiers are stable within the component that produced them
/// and meaningless outside it. All rectangles are in the component's own
/// coordinate frame.
pub trait RenderedComponent {
    /// The markup string this component was typeset from.
    fn content(&self) -> &str;

    /// Where the component was placed.
    fn position(&self) -> Point;

    /// All glyph fragments in document order.
    fn fragments(&self) -> Vec<FragmentId>;

    /// Geometry of one fragment, if it exists.
    fn fragment_bounds(&self, fragment: &str) -> Option<Rect>;

    /// Rendered rectangle of the `index`-th marker group (document order), if
    /// the markup carried markers and `index` is in range.
    fn marker_bounds(&self, index: usize) -> Option<Rect>;

    /// Release the rendered resources. Idempotent.
    fn destroy(&mut self);
}

/// The typesetting capability: markup in, rendered component out.
pub trait TypesetEngine {
    /// Typeset `markup` at `position`.
    fn typeset(&mut self, markup: &str, position: Point) -> ChalkResult<Box<dyn RenderedComponent>>;
}
