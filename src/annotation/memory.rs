//! An in-memory annotation store with selection and undo.

use std::collections::BTreeMap;

use tracing::debug;

use super::model::{AnnotationResult, ExternalRegion, ResultRequest};
use super::{AnnotationStore, ResultTeardown};
use crate::geometry::{Position, RegionId};

/// Annotation store backed by a vector of results.
///
/// Every mutation records the previous result list so [`undo`](Self::undo)
/// can restore it. Selection is not part of the history.
#[derive(Clone, Debug, Default)]
pub struct InMemoryAnnotationStore {
    results: Vec<AnnotationResult>,
    selected: Option<RegionId>,
    read_only: bool,
    history: Vec<Vec<AnnotationResult>>,
}

impl InMemoryAnnotationStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given results, e.g. from a task file.
    pub fn with_results(results: Vec<AnnotationResult>) -> Self {
        Self {
            results,
            ..Default::default()
        }
    }

    /// Read-only stores refuse to create results.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// All results, in store order.
    pub fn results(&self) -> &[AnnotationResult] {
        &self.results
    }

    /// Consumes the store and returns its results.
    pub fn into_results(self) -> Vec<AnnotationResult> {
        self.results
    }

    /// Destroys every result of an area and notifies `teardown`.
    ///
    /// Returns false if the area did not exist.
    pub fn destroy_result(&mut self, id: &RegionId, teardown: &mut dyn ResultTeardown) -> bool {
        if !self.results.iter().any(|result| &result.id == id) {
            return false;
        }

        self.checkpoint();
        self.results.retain(|result| &result.id != id);
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        debug!(region = %id, "result destroyed");

        teardown.result_destroyed(id);
        true
    }

    /// Replaces the labels of an area's labeling result.
    ///
    /// Returns false if the area has no labeling result.
    pub fn update_labels(&mut self, id: &RegionId, labels: Vec<String>) -> bool {
        let Some(index) = self
            .results
            .iter()
            .position(|result| &result.id == id && result.is_labeling())
        else {
            return false;
        };

        self.checkpoint();
        let result = &mut self.results[index];
        result
            .value
            .labels
            .insert(result.result_type.clone(), labels);
        true
    }

    /// Restores the result list from before the last mutation.
    ///
    /// Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.history.pop() else {
            return false;
        };

        self.results = previous;
        if let Some(selected) = &self.selected {
            if !self.results.iter().any(|result| &result.id == selected) {
                self.selected = None;
            }
        }
        true
    }

    /// Number of mutations that can be undone.
    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    fn checkpoint(&mut self) {
        self.history.push(self.results.clone());
    }
}

impl AnnotationStore for InMemoryAnnotationStore {
    fn create_result(&mut self, request: ResultRequest) -> Option<AnnotationResult> {
        if self.read_only {
            debug!(region = %request.id, "store is read-only; result not created");
            return None;
        }
        if request.id.is_empty() || !request.position.is_well_formed() {
            debug!(region = %request.id, "invalid result request");
            return None;
        }
        if self.results.iter().any(|result| result.id == request.id) {
            debug!(region = %request.id, "area id already in use");
            return None;
        }

        let result = request.into_result();
        self.checkpoint();
        self.results.push(result.clone());
        Some(result)
    }

    fn regs(&self, to_name: &str) -> Vec<ExternalRegion> {
        let mut order: Vec<RegionId> = Vec::new();
        let mut grouped: BTreeMap<RegionId, Vec<AnnotationResult>> = BTreeMap::new();

        for result in self.results.iter().filter(|result| result.to_name == to_name) {
            let group = grouped.entry(result.id.clone()).or_insert_with(|| {
                order.push(result.id.clone());
                Vec::new()
            });
            group.push(result.clone());
        }

        order
            .into_iter()
            .filter_map(|id| {
                let results = grouped.remove(&id)?;
                let position = area_position(&results)?;
                let labels = results
                    .iter()
                    .filter(|result| result.is_labeling())
                    .map(AnnotationResult::labels)
                    .find(|labels| !labels.is_empty())
                    .map(<[String]>::to_vec)
                    .unwrap_or_default();

                Some(ExternalRegion {
                    id,
                    position,
                    labels,
                    text: None,
                    results,
                })
            })
            .collect()
    }

    fn result(&self, id: &RegionId) -> Option<&AnnotationResult> {
        self.results.iter().find(|result| &result.id == id)
    }

    fn selected(&self) -> Option<&RegionId> {
        self.selected.as_ref()
    }

    fn select(&mut self, id: &RegionId) -> bool {
        if self.result(id).is_none() {
            return false;
        }
        self.selected = Some(id.clone());
        true
    }

    fn unselect(&mut self) {
        self.selected = None;
    }
}

/// The area's position: the first well-formed one, labeling results first.
///
/// Falls back to the first result's position so a fully malformed area
/// still reaches the document and is reported there.
fn area_position(results: &[AnnotationResult]) -> Option<Position> {
    let well_formed = |result: &&AnnotationResult| result.value.position.is_well_formed();
    results
        .iter()
        .filter(|result| result.is_labeling())
        .find(well_formed)
        .or_else(|| results.iter().find(well_formed))
        .or_else(|| results.first())
        .map(|result| result.value.position.clone())
}
