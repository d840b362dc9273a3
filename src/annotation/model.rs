//! Result records owned by the external annotation store.
//!
//! A result is the canonical labeled record; regions are projections over
//! results. Several results may share one area id (for example a label
//! result and a per-region text answer), and the store groups them into an
//! [`ExternalRegion`] when asked for its region list.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::geometry::{Position, RegionId};

/// Where a result came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Origin {
    /// Drawn by a user in this session or a previous one.
    #[default]
    Manual,
    /// Produced by a model and not yet touched.
    Prediction,
    /// Produced by a model and later edited by a user.
    PredictionChanged,
}

/// The value payload of a result.
///
/// Label lists are stored under the key named by the result's `type`
/// (e.g. `"labels": ["Person"]`), so they are kept in a flattened map.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultValue {
    #[serde(default)]
    pub position: Position,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(flatten)]
    pub labels: BTreeMap<String, Vec<String>>,
}

/// A labeled result as held by the annotation store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnnotationResult {
    /// Area id; equals the id of the region projected from this result.
    pub id: RegionId,

    /// The label control's value type (e.g. "labels").
    #[serde(rename = "type")]
    pub result_type: String,

    /// Name of the label control that produced the result.
    pub from_name: String,

    /// Name of the document the result annotates.
    pub to_name: String,

    #[serde(default)]
    pub origin: Origin,

    pub value: ResultValue,
}

impl AnnotationResult {
    /// True for results produced by a label control (`labels`,
    /// `rectanglelabels`, `pdflabels`, ...).
    pub fn is_labeling(&self) -> bool {
        self.result_type.ends_with("labels")
    }

    /// Returns the labels recorded under this result's value type.
    pub fn labels(&self) -> &[String] {
        self.value
            .labels
            .get(&self.result_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns the first recorded label, if any.
    pub fn first_label(&self) -> Option<&str> {
        self.labels().first().map(String::as_str)
    }
}

/// Everything the store needs to create a result for a new selection.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultRequest {
    pub id: RegionId,
    pub position: Position,
    pub text: Option<String>,
    pub value_type: String,
    pub labels: Vec<String>,
    pub from_name: String,
    pub to_name: String,
    pub origin: Origin,
}

impl ResultRequest {
    /// Builds the result record this request describes.
    pub fn into_result(self) -> AnnotationResult {
        let mut labels = BTreeMap::new();
        labels.insert(self.value_type.clone(), self.labels);

        AnnotationResult {
            id: self.id,
            result_type: self.value_type,
            from_name: self.from_name,
            to_name: self.to_name,
            origin: self.origin,
            value: ResultValue {
                position: self.position,
                text: self.text,
                labels,
            },
        }
    }
}

/// One entry of the store's authoritative region list.
#[derive(Clone, Debug, PartialEq)]
pub struct ExternalRegion {
    pub id: RegionId,
    pub position: Position,
    pub labels: Vec<String>,
    /// Text already known for the area, if the store caches it.
    pub text: Option<String>,
    /// Results attached to the area, in store order.
    pub results: Vec<AnnotationResult>,
}
