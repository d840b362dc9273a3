//! Geometry values and identifiers shared by every other module.
//!
//! Positions arrive from the renderer and are treated as opaque values;
//! rectangles are only interpreted for viewport checks.

mod ids;
mod position;
mod rect;

pub use ids::{IdGenerator, RandomIdGenerator, RegionId, GENERATED_ID_LEN};
pub use position::{PagePosition, Position};
pub use rect::Rect;
