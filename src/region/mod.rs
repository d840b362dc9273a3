//! Regions: labeled highlights projected from annotation results.
//!
//! A region holds only what the renderer and serializer need. It has no
//! pointer back to its document; the document's [`RegionStore`] is the
//! registry that resolves ids to regions.

pub mod store;

pub use store::{RegionStore, StoreChange, SubscriptionId};

use serde::Serialize;

use crate::annotation::ExternalRegion;
use crate::error::RegionError;
use crate::geometry::{Position, RegionId};

/// One labeled highlight.
#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    /// Equal to the backing result's area id.
    pub id: RegionId,
    /// Set at creation and never edited.
    pub position: Position,
    pub text: Option<String>,
    pub label: Option<String>,
    pub hidden: bool,
}

impl Region {
    /// Creates a visible region.
    pub fn new(id: RegionId, position: Position) -> Self {
        Self {
            id,
            position,
            text: None,
            label: None,
            hidden: false,
        }
    }

    /// Sets the extracted text; empty strings are treated as no text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.text = (!text.is_empty()).then_some(text);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Builds a region from an entry of the store's region list.
    ///
    /// Takes the entry's id, position and first label. Text comes from the
    /// entry's cache, falling back to the first attached result's value.
    pub fn derive(external: &ExternalRegion) -> Result<Region, RegionError> {
        if external.id.is_empty() {
            return Err(RegionError::EmptyRegionId);
        }
        if !external.position.is_well_formed() {
            return Err(RegionError::MalformedPosition {
                id: external.id.clone(),
            });
        }

        let text = external.text.clone().or_else(|| {
            external
                .results
                .first()
                .and_then(|result| result.value.text.clone())
        });

        Ok(Region {
            id: external.id.clone(),
            position: external.position.clone(),
            text: text.filter(|text| !text.is_empty()),
            label: external.labels.first().cloned(),
            hidden: false,
        })
    }
}

/// What the renderer paints for one region.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Highlight {
    pub id: RegionId,
    pub position: Position,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Whether the label text is drawn next to the highlight.
    pub show_label: bool,
    pub selected: bool,
    pub hidden: bool,
}
