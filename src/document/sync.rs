//! Keeping the region list in step with the annotation store.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use super::Document;
use crate::annotation::{
    AnnotationResult, AnnotationStore, LabelControl, Origin, ResultRequest, ResultTeardown,
};
use crate::geometry::{Position, RegionId};
use crate::region::Region;

/// A finished user selection, as reported by the renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct Selection {
    pub position: Position,
    pub text: String,
}

impl Selection {
    pub fn new(position: impl Into<Position>, text: impl Into<String>) -> Self {
        Self {
            position: position.into(),
            text: text.into(),
        }
    }
}

/// Outcome of a rebuild.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Resync {
    /// Regions now in the document.
    pub regions: usize,
    /// Store entries that could not be turned into regions.
    pub skipped: usize,
}

impl Document {
    /// Creates a result and a region for a user selection.
    ///
    /// The first control with a selected label names the region. Nothing
    /// is created when the document is not ready, selection is disabled, no
    /// label is selected, or the store refuses the result; each case logs a
    /// warning and returns `None`.
    pub fn add_region(
        &mut self,
        selection: Selection,
        controls: &[&dyn LabelControl],
        store: &mut dyn AnnotationStore,
    ) -> Option<AnnotationResult> {
        if !self.ready {
            warn!(document = %self.config.name, "document is not ready; selection ignored");
            return None;
        }
        if !self.config.selection_enabled {
            warn!(document = %self.config.name, "selection is disabled; selection ignored");
            return None;
        }

        let Some(control) = self.active_label_states(controls).into_iter().next() else {
            warn!(document = %self.config.name, "no label selected; region not created");
            return None;
        };
        let labels = control.selected_values();

        let Some(id) = self.next_id() else {
            warn!(document = %self.config.name, "no fresh region id available; region not created");
            return None;
        };
        let text = Some(selection.text).filter(|text| !text.is_empty());
        let request = ResultRequest {
            id: id.clone(),
            position: selection.position.clone(),
            text: text.clone().filter(|_| self.config.save_text_result),
            value_type: control.value_type().to_string(),
            labels: labels.clone(),
            from_name: control.name().to_string(),
            to_name: self.config.name.clone(),
            origin: Origin::Manual,
        };

        let Some(result) = store.create_result(request) else {
            warn!(document = %self.config.name, region = %id, "annotation store refused the result");
            return None;
        };

        self.regions.append(Region {
            id: id.clone(),
            position: selection.position,
            text,
            label: labels.into_iter().next(),
            hidden: false,
        });
        debug!(document = %self.config.name, region = %id, "region added");

        Some(result)
    }

    /// Selection-completion callback for the renderer.
    ///
    /// Returns true when a region was created and the renderer should clear
    /// its selection.
    pub fn on_selection_finished(
        &mut self,
        selection: Selection,
        controls: &[&dyn LabelControl],
        store: &mut dyn AnnotationStore,
    ) -> bool {
        self.add_region(selection, controls, store).is_some()
    }

    /// Rebuilds every region from the store's region list.
    ///
    /// Entries that fail to derive, and repeated ids, are logged and
    /// skipped. Hidden flags carry over by id, and so does text the store
    /// does not hold.
    pub fn needs_update(&mut self, store: &dyn AnnotationStore) -> Resync {
        let previous: HashMap<RegionId, (bool, Option<String>)> = self
            .regions
            .iter()
            .map(|region| (region.id.clone(), (region.hidden, region.text.clone())))
            .collect();

        let mut seen = HashSet::new();
        let mut regions = Vec::new();
        let mut skipped = 0;

        for external in store.regs(&self.config.name) {
            let mut region = match Region::derive(&external) {
                Ok(region) => region,
                Err(err) => {
                    warn!(
                        document = %self.config.name,
                        region = %external.id,
                        error = %err,
                        "skipping region that failed to derive"
                    );
                    skipped += 1;
                    continue;
                }
            };

            if !seen.insert(region.id.clone()) {
                warn!(document = %self.config.name, region = %region.id, "skipping repeated region id");
                skipped += 1;
                continue;
            }

            if let Some((hidden, text)) = previous.get(&region.id) {
                region.hidden = *hidden;
                if region.text.is_none() {
                    region.text = text.clone();
                }
            }
            self.issued.insert(region.id.clone());
            regions.push(region);
        }

        let resync = Resync {
            regions: regions.len(),
            skipped,
        };
        self.regions.rebuild_from(regions);
        debug!(
            document = %self.config.name,
            regions = resync.regions,
            skipped = resync.skipped,
            "regions rebuilt"
        );

        resync
    }

    /// Removes one region. Unknown ids are ignored.
    ///
    /// The backing result is left alone; the store destroys results and
    /// reports back through [`ResultTeardown`].
    pub fn delete_region(&mut self, id: &RegionId) -> bool {
        let removed = self.regions.remove(id).is_some();
        if removed {
            debug!(document = %self.config.name, region = %id, "region deleted");
        }
        removed
    }
}

impl ResultTeardown for Document {
    fn result_destroyed(&mut self, id: &RegionId) {
        self.delete_region(id);
    }
}
