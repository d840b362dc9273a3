//! Persisted region values.
//!
//! A region persists as `{"value": {"position": ..., "text"?, "label"?, "id"?}}`.
//! Text is written only when the document saves text and the region has
//! some. Reading a persisted value back produces the same
//! [`ExternalRegion`] shape the store hands to the rebuild path, so a
//! persisted region re-derives into an equivalent [`Region`].

pub mod task;

use serde::{Deserialize, Serialize};

use crate::annotation::ExternalRegion;
use crate::error::RegionError;
use crate::geometry::{Position, RegionId};
use crate::region::Region;

/// The persisted form of one region.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PersistedRegion {
    pub value: PersistedValue,
}

/// The value object inside a [`PersistedRegion`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PersistedValue {
    pub position: Position,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RegionId>,
}

/// Serializes a region.
pub fn serialize_region(region: &Region, save_text: bool) -> PersistedRegion {
    let text = region
        .text
        .as_ref()
        .filter(|text| save_text && !text.is_empty())
        .cloned();
    let id = (!region.id.is_empty()).then(|| region.id.clone());

    PersistedRegion {
        value: PersistedValue {
            position: region.position.clone(),
            text,
            label: region.label.clone(),
            id,
        },
    }
}

/// Turns a persisted value back into a store region entry.
///
/// The entry carries the persisted text as cached text and no results.
pub fn deserialize_region(persisted: &PersistedRegion) -> Result<ExternalRegion, RegionError> {
    let value = &persisted.value;
    let id = value.id.clone().ok_or(RegionError::MissingRegionId)?;

    Ok(ExternalRegion {
        id,
        position: value.position.clone(),
        labels: value.label.iter().cloned().collect(),
        text: value.text.clone(),
        results: vec![],
    })
}

/// Parses a persisted region from JSON text.
pub fn from_persisted_str(json: &str) -> Result<PersistedRegion, RegionError> {
    serde_json::from_str(json).map_err(|source| RegionError::TaskJsonParse {
        path: "<string>".into(),
        source,
    })
}

/// Parses a persisted region from bytes.
pub fn from_persisted_slice(bytes: &[u8]) -> Result<PersistedRegion, RegionError> {
    serde_json::from_slice(bytes).map_err(|source| RegionError::TaskJsonParse {
        path: "<bytes>".into(),
        source,
    })
}
