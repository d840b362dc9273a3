//! Document-level display state: colors, highlight lists, selection.

use super::Document;
use crate::annotation::{AnnotationStore, LabelControl};
use crate::geometry::RegionId;
use crate::region::Highlight;
use crate::visual::{
    apply_visual_state, ensure_visible, visual_state, HighlightRenderer, ResultSelection,
    VisualState, DEFAULT_HIGHLIGHT_COLOR,
};

impl Document {
    /// Background color for a label.
    ///
    /// Looks at this document's label controls first, then the
    /// `highlightcolor` attribute, then the default.
    pub fn label_background(&self, label: Option<&str>, controls: &[&dyn LabelControl]) -> String {
        label
            .and_then(|label| {
                controls
                    .iter()
                    .filter(|control| control.to_name() == self.config.name)
                    .find_map(|control| control.background(label))
                    .map(str::to_string)
            })
            .or_else(|| self.config.highlight_color.clone())
            .unwrap_or_else(|| DEFAULT_HIGHLIGHT_COLOR.to_string())
    }

    /// Selection state of the result backing a region.
    pub fn result_selection(&self, id: &RegionId, store: &dyn AnnotationStore) -> ResultSelection {
        if store.result(id).is_none() {
            ResultSelection::Missing
        } else if store.selected() == Some(id) {
            ResultSelection::Selected
        } else {
            ResultSelection::Unselected
        }
    }

    /// Display state of one region, or `None` for unknown ids.
    pub fn visual_state_for(
        &self,
        id: &RegionId,
        store: &dyn AnnotationStore,
        controls: &[&dyn LabelControl],
    ) -> Option<VisualState> {
        let region = self.regions.get(id)?;
        let background = self.label_background(region.label.as_deref(), controls);
        Some(visual_state(
            region.hidden,
            self.result_selection(id, store),
            &background,
        ))
    }

    /// Highlights to paint, in region order.
    ///
    /// Regions whose result is gone are left out until the next rebuild
    /// prunes them.
    pub fn highlights(&self, store: &dyn AnnotationStore) -> Vec<Highlight> {
        self.regions
            .iter()
            .filter(|region| store.result(&region.id).is_some())
            .map(|region| Highlight {
                id: region.id.clone(),
                position: region.position.clone(),
                label: region.label.clone(),
                show_label: self.config.show_labels && region.label.is_some(),
                selected: store.selected() == Some(&region.id),
                hidden: region.hidden,
            })
            .collect()
    }

    /// Redraws the highlight set and restyles every region.
    pub fn render(
        &self,
        store: &dyn AnnotationStore,
        controls: &[&dyn LabelControl],
        renderer: &mut dyn HighlightRenderer,
    ) {
        renderer.redraw(&self.highlights(store));
        self.restyle(store, controls, renderer);
    }

    /// Pushes the current display state of every region to the renderer.
    pub fn restyle(
        &self,
        store: &dyn AnnotationStore,
        controls: &[&dyn LabelControl],
        renderer: &mut dyn HighlightRenderer,
    ) {
        for region in self.regions.iter() {
            if let Some(state) = self.visual_state_for(&region.id, store, controls) {
                apply_visual_state(renderer, &region.id, &state);
            }
        }
    }

    /// Click callback for a highlight: selects its result in the store,
    /// restyles, and scrolls to it if it is not fully visible.
    ///
    /// Returns false when the region or its result does not exist.
    pub fn on_highlight_click(
        &self,
        id: &RegionId,
        store: &mut dyn AnnotationStore,
        controls: &[&dyn LabelControl],
        renderer: &mut dyn HighlightRenderer,
    ) -> bool {
        if !self.regions.contains(id) || !store.select(id) {
            return false;
        }

        self.restyle(store, controls, renderer);
        ensure_visible(renderer, id);
        true
    }

    /// Flips a region's hidden flag and returns the new value.
    pub fn toggle_hidden(&mut self, id: &RegionId) -> Option<bool> {
        let hidden = !self.regions.get(id)?.hidden;
        self.regions.set_hidden(id, hidden);
        Some(hidden)
    }
}
