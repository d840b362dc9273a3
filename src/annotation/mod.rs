//! The external annotation store, seen from the region engine.
//!
//! The engine never owns results. It asks the store to create them, reads
//! the store's authoritative region list when resynchronizing, and is told
//! through [`ResultTeardown`] when a result goes away.
//!
//! [`InMemoryAnnotationStore`] is a complete store used by the CLI and the
//! tests; embedders with their own store implement [`AnnotationStore`].

mod control;
mod memory;
mod model;

pub use control::{LabelControl, LabelDef, StaticLabelControl};
pub use memory::InMemoryAnnotationStore;
pub use model::{AnnotationResult, ExternalRegion, Origin, ResultRequest, ResultValue};

use crate::geometry::RegionId;

/// Operations the region engine needs from an annotation store.
pub trait AnnotationStore {
    /// Creates a result for a new selection.
    ///
    /// Returns `None` when the store refuses; in that case it must not have
    /// retained anything.
    fn create_result(&mut self, request: ResultRequest) -> Option<AnnotationResult>;

    /// The store's current regions for the named document, in store order.
    fn regs(&self, to_name: &str) -> Vec<ExternalRegion>;

    /// Looks up the first result backing an area.
    fn result(&self, id: &RegionId) -> Option<&AnnotationResult>;

    /// The area currently selected by the user, if any.
    fn selected(&self) -> Option<&RegionId>;

    /// Selects an area. Returns false if no result backs it.
    fn select(&mut self, id: &RegionId) -> bool;

    /// Clears the selection.
    fn unselect(&mut self);
}

/// Callback invoked by a store when a result is destroyed.
///
/// This is the only mutation path the store may start on its own.
pub trait ResultTeardown {
    fn result_destroyed(&mut self, id: &RegionId);
}
