//! Document tag configuration.

use serde::{Deserialize, Serialize};

use crate::error::RegionError;

/// Attributes of the document tag.
///
/// Field names on the wire match the tag attributes (`selectionenabled`,
/// `highlightcolor`, ...). Missing attributes take their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Tag name; results reference it as `to_name`.
    pub name: String,

    /// Source URL of the document.
    pub value: String,

    /// Whether new selections are accepted.
    #[serde(rename = "selectionenabled")]
    pub selection_enabled: bool,

    /// Fallback highlight color for labels without a background.
    #[serde(rename = "highlightcolor", skip_serializing_if = "Option::is_none")]
    pub highlight_color: Option<String>,

    /// Whether highlights draw their label text.
    #[serde(rename = "showlabels")]
    pub show_labels: bool,

    /// Whether extracted text is persisted with results and regions.
    #[serde(rename = "savetextresult")]
    pub save_text_result: bool,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            name: "pdf".to_string(),
            value: String::new(),
            selection_enabled: true,
            highlight_color: None,
            show_labels: false,
            save_text_result: true,
        }
    }
}

impl DocumentConfig {
    /// Creates a config with defaults for the named document.
    pub fn new(name: impl Into<String>, source_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: source_url.into(),
            ..Default::default()
        }
    }

    /// Parses a config from a JSON object of tag attributes.
    pub fn from_json_str(json: &str) -> Result<Self, RegionError> {
        serde_json::from_str(json).map_err(RegionError::ConfigParse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_accept_selections_and_save_text() {
        let config = DocumentConfig::default();
        assert!(config.selection_enabled);
        assert!(config.save_text_result);
        assert!(!config.show_labels);
        assert_eq!(config.name, "pdf");
    }

    #[test]
    fn parses_tag_attribute_names() {
        let config = DocumentConfig::from_json_str(
            r##"{"name": "doc", "value": "$pdf", "selectionenabled": false, "highlightcolor": "#00FF00", "savetextresult": false}"##,
        )
        .expect("parse config");

        assert_eq!(config.name, "doc");
        assert_eq!(config.value, "$pdf");
        assert!(!config.selection_enabled);
        assert_eq!(config.highlight_color.as_deref(), Some("#00FF00"));
        assert!(!config.save_text_result);
        assert!(!config.show_labels);
    }

    #[test]
    fn rejects_wrongly_typed_attributes() {
        let err = DocumentConfig::from_json_str(r#"{"selectionenabled": "maybe"}"#)
            .expect_err("string is not a bool");
        assert!(matches!(err, RegionError::ConfigParse(_)));
    }
}
