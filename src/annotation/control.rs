//! Label controls: the user-facing label pickers that name new regions.

use serde::{Deserialize, Serialize};

/// A label picker attached to a document.
///
/// Only `selected_values` and `value_type` take part in region creation;
/// `background` feeds highlight colors.
pub trait LabelControl {
    /// Name of the control (becomes `from_name` on results).
    fn name(&self) -> &str;

    /// Name of the document this control labels.
    fn to_name(&self) -> &str;

    /// Key under which selected values are recorded on a result.
    fn value_type(&self) -> &str;

    /// Currently chosen label values, in control order.
    fn selected_values(&self) -> Vec<String>;

    /// Configured background color for a label value.
    fn background(&self, value: &str) -> Option<&str>;
}

/// One selectable label.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LabelDef {
    pub value: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,

    #[serde(skip)]
    selected: bool,
}

impl LabelDef {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            background: None,
            selected: false,
        }
    }

    pub fn with_background(mut self, background: impl Into<String>) -> Self {
        self.background = Some(background.into());
        self
    }
}

/// A label control with a fixed label set, driven programmatically.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StaticLabelControl {
    pub name: String,

    #[serde(rename = "toName")]
    pub to_name: String,

    #[serde(rename = "type", default = "default_value_type")]
    pub value_type: String,

    pub labels: Vec<LabelDef>,
}

fn default_value_type() -> String {
    "labels".to_string()
}

impl StaticLabelControl {
    /// Creates a `labels` control for the given document.
    pub fn new(name: impl Into<String>, to_name: impl Into<String>, labels: Vec<LabelDef>) -> Self {
        Self {
            name: name.into(),
            to_name: to_name.into(),
            value_type: default_value_type(),
            labels,
        }
    }

    /// Overrides the value type.
    pub fn with_value_type(mut self, value_type: impl Into<String>) -> Self {
        self.value_type = value_type.into();
        self
    }

    /// Marks a label as selected. Returns false for unknown values.
    pub fn select(&mut self, value: &str) -> bool {
        self.set_selected(value, true)
    }

    /// Clears the selection of one label. Returns false for unknown values.
    pub fn unselect(&mut self, value: &str) -> bool {
        self.set_selected(value, false)
    }

    /// Clears every selection.
    pub fn clear_selection(&mut self) {
        for label in &mut self.labels {
            label.selected = false;
        }
    }

    fn set_selected(&mut self, value: &str, selected: bool) -> bool {
        match self.labels.iter_mut().find(|label| label.value == value) {
            Some(label) => {
                label.selected = selected;
                true
            }
            None => false,
        }
    }
}

impl LabelControl for StaticLabelControl {
    fn name(&self) -> &str {
        &self.name
    }

    fn to_name(&self) -> &str {
        &self.to_name
    }

    fn value_type(&self) -> &str {
        &self.value_type
    }

    fn selected_values(&self) -> Vec<String> {
        self.labels
            .iter()
            .filter(|label| label.selected)
            .map(|label| label.value.clone())
            .collect()
    }

    fn background(&self, value: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|label| label.value == value)
            .and_then(|label| label.background.as_deref())
    }
}
