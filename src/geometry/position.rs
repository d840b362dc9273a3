//! Opaque geometry values produced by the document renderer.
//!
//! A [`Position`] is stored and persisted verbatim. The core never looks
//! inside it beyond checking that it is a JSON object or array; the
//! renderer owns its meaning. [`PagePosition`] is the shape the bundled
//! renderer adapters and tests produce.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::rect::Rect;

/// A renderer-defined description of a spatial selection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Position(Value);

impl Position {
    /// Wraps a raw geometry value.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Returns the raw geometry value.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consumes the position and returns the raw value.
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Returns true if the value could describe a selection at all.
    pub fn is_well_formed(&self) -> bool {
        match &self.0 {
            Value::Object(map) => !map.is_empty(),
            Value::Array(items) => !items.is_empty(),
            _ => false,
        }
    }

    /// Reads the value back as a [`PagePosition`], if it has that shape.
    pub fn page_position(&self) -> Option<PagePosition> {
        serde_json::from_value(self.0.clone()).ok()
    }
}

/// A selection on one page: its bounding box plus one rect per line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagePosition {
    pub page_index: u32,
    pub bounding_rect: Rect,
    #[serde(default)]
    pub rects: Vec<Rect>,
}

impl PagePosition {
    /// A single-rect selection.
    pub fn single(page_index: u32, rect: Rect) -> Self {
        Self {
            page_index,
            bounding_rect: rect,
            rects: vec![rect],
        }
    }

    /// A multi-line selection; the bounding rect is the union of the parts.
    ///
    /// Returns `None` when `rects` is empty.
    pub fn from_rects(page_index: u32, rects: Vec<Rect>) -> Option<Self> {
        let (first, rest) = rects.split_first()?;
        let bounding_rect = rest.iter().fold(*first, |acc, rect| acc.union(rect));
        Some(Self {
            page_index,
            bounding_rect,
            rects,
        })
    }
}

impl Default for Position {
    fn default() -> Self {
        Position(Value::Null)
    }
}

impl From<&PagePosition> for Position {
    fn from(page: &PagePosition) -> Self {
        let rect = |r: &Rect| json!({"x": r.x, "y": r.y, "width": r.width, "height": r.height});
        Position(json!({
            "pageIndex": page.page_index,
            "boundingRect": rect(&page.bounding_rect),
            "rects": page.rects.iter().map(rect).collect::<Vec<_>>(),
        }))
    }
}

impl From<PagePosition> for Position {
    fn from(page: PagePosition) -> Self {
        Position::from(&page)
    }
}
