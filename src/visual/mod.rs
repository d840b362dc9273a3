//! Display state for highlights.
//!
//! [`visual_state`] is a pure function of a region's hidden flag, the
//! selection state of its backing result and the label background. The
//! renderer side effects live in [`render`].

pub mod render;

pub use render::{apply_visual_state, ensure_visible, HighlightRenderer};

use tracing::warn;

use crate::error::RegionError;

/// Alpha suffix appended to a `#RRGGBB` color for unselected highlights
/// (0x26 / 0xFF, about 15% opacity).
pub const UNSELECTED_ALPHA: &str = "26";

/// Color used for hidden highlights.
pub const TRANSPARENT: &str = "transparent";

/// Highlight color when neither the label nor the document configures one.
pub const DEFAULT_HIGHLIGHT_COLOR: &str = "#FFFF00";

/// Selection state of a region's backing result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResultSelection {
    /// The result could not be resolved (not yet pruned).
    Missing,
    Unselected,
    Selected,
}

/// Color and visibility shared by every rendered part of one highlight.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisualState {
    pub color: String,
    pub visible: bool,
}

impl VisualState {
    fn invisible() -> Self {
        Self {
            color: TRANSPARENT.to_string(),
            visible: false,
        }
    }
}

/// Computes how a highlight should look.
///
/// Hidden regions and regions without a backing result are transparent and
/// invisible. Otherwise the selected highlight gets the full background and
/// every other one the dimmed background. A background that cannot be
/// dimmed is used as-is.
pub fn visual_state(hidden: bool, selection: ResultSelection, background: &str) -> VisualState {
    match (hidden, selection) {
        (true, _) | (_, ResultSelection::Missing) => VisualState::invisible(),
        (false, ResultSelection::Selected) => VisualState {
            color: background.to_string(),
            visible: true,
        },
        (false, ResultSelection::Unselected) => {
            let color = dim_color(background).unwrap_or_else(|err| {
                warn!(color = background, error = %err, "cannot dim highlight color");
                background.to_string()
            });
            VisualState {
                color,
                visible: true,
            }
        }
    }
}

/// Appends the unselected alpha to a `#RRGGBB` color.
pub fn dim_color(color: &str) -> Result<String, RegionError> {
    if !is_hex_rgb(color) {
        return Err(RegionError::InvalidColor(color.to_string()));
    }
    Ok(format!("{color}{UNSELECTED_ALPHA}"))
}

fn is_hex_rgb(color: &str) -> bool {
    match color.strip_prefix('#') {
        Some(hex) => hex.len() == 6 && hex.bytes().all(|b| b.is_ascii_hexdigit()),
        None => false,
    }
}
