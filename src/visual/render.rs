//! The contract with the highlight renderer.

use tracing::debug;

use super::VisualState;
use crate::geometry::{Rect, RegionId};
use crate::region::Highlight;

/// What the rendering widget exposes to the engine.
///
/// One highlight may be drawn as several disjoint parts (one per line of a
/// multi-line selection).
pub trait HighlightRenderer {
    /// Number of parts currently drawn for a highlight.
    fn part_count(&self, id: &RegionId) -> usize;

    /// Styles one part.
    fn set_part_style(&mut self, id: &RegionId, part: usize, color: &str, visible: bool);

    /// Bounding box of the drawn highlight in viewport coordinates, if drawn.
    fn rendered_bounds(&self, id: &RegionId) -> Option<Rect>;

    /// The visible area in viewport coordinates.
    fn viewport(&self) -> Rect;

    /// Scrolls so that the highlight is visible.
    fn scroll_into_view(&mut self, id: &RegionId);

    /// Replaces the set of painted highlights.
    fn redraw(&mut self, highlights: &[Highlight]);
}

/// Pushes one state to every part of a highlight.
pub fn apply_visual_state(renderer: &mut dyn HighlightRenderer, id: &RegionId, state: &VisualState) {
    let parts = renderer.part_count(id);
    for part in 0..parts {
        renderer.set_part_style(id, part, &state.color, state.visible);
    }
}

/// Scrolls to a highlight unless it already lies fully in the viewport.
///
/// Highlights that are not drawn yet, or report unusable bounds, are always
/// scrolled to. Returns whether a scroll was requested.
pub fn ensure_visible(renderer: &mut dyn HighlightRenderer, id: &RegionId) -> bool {
    let viewport = renderer.viewport();
    if let Some(bounds) = renderer.rendered_bounds(id).filter(Rect::is_valid) {
        if viewport.contains_rect(&bounds) {
            return false;
        }
    }

    debug!(region = %id, "scrolling highlight into view");
    renderer.scroll_into_view(id);
    true
}
