//! A rendered document and the regions drawn on it.
//!
//! The [`Document`] is the sole owner of its regions. They change only
//! through three operations:
//!
//! - [`Document::add_region`] turns a user selection into a result and a region,
//! - [`Document::needs_update`] rebuilds every region from the store,
//! - [`Document::delete_region`] drops one region, normally from the
//!   store's [`ResultTeardown`](crate::annotation::ResultTeardown) callback.
//!
//! Everything runs synchronously; subscribers registered with
//! [`Document::subscribe`] see each change after it has completed.

mod config;
mod sync;
mod visuals;

pub use config::DocumentConfig;
pub use sync::{Resync, Selection};

use std::collections::HashSet;
use std::fmt;

use tracing::debug;

use crate::annotation::LabelControl;
use crate::geometry::{IdGenerator, RandomIdGenerator, RegionId};
use crate::region::{Region, RegionStore, StoreChange, SubscriptionId};
use crate::serialize::{serialize_region, PersistedRegion};

/// Draws from the id generator before a new region is refused.
pub const MAX_ID_ATTEMPTS: usize = 64;

/// One document instance and its regions.
pub struct Document {
    config: DocumentConfig,
    ready: bool,
    regions: RegionStore,
    issued: HashSet<RegionId>,
    ids: Box<dyn IdGenerator>,
}

impl Document {
    /// Creates a document with random region ids.
    pub fn new(config: DocumentConfig) -> Self {
        Self::with_id_generator(config, RandomIdGenerator::new())
    }

    /// Creates a document with a custom id source.
    pub fn with_id_generator(config: DocumentConfig, ids: impl IdGenerator + 'static) -> Self {
        Self {
            config,
            ready: false,
            regions: RegionStore::new(),
            issued: HashSet::new(),
            ids: Box::new(ids),
        }
    }

    pub fn config(&self) -> &DocumentConfig {
        &self.config
    }

    /// Tag name of the document.
    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn source_url(&self) -> &str {
        &self.config.value
    }

    pub fn selection_enabled(&self) -> bool {
        self.config.selection_enabled
    }

    pub fn set_selection_enabled(&mut self, enabled: bool) {
        self.config.selection_enabled = enabled;
    }

    /// Whether the renderer has finished loading the source.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Called by the renderer once the source is loaded.
    pub fn mark_ready(&mut self) {
        debug!(document = %self.config.name, "document ready");
        self.ready = true;
    }

    /// Regions in creation order.
    pub fn regions(&self) -> &[Region] {
        self.regions.regions()
    }

    pub fn region(&self, id: &RegionId) -> Option<&Region> {
        self.regions.get(id)
    }

    /// Registers a callback run after every region change.
    pub fn subscribe(
        &mut self,
        subscriber: impl FnMut(&StoreChange, &[Region]) + 'static,
    ) -> SubscriptionId {
        self.regions.subscribe(subscriber)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.regions.unsubscribe(id)
    }

    /// True if at least one label control targets this document.
    pub fn has_label_states(&self, controls: &[&dyn LabelControl]) -> bool {
        controls
            .iter()
            .any(|control| control.to_name() == self.config.name)
    }

    /// Controls targeting this document that have a selected label.
    pub fn active_label_states<'c>(
        &self,
        controls: &[&'c dyn LabelControl],
    ) -> Vec<&'c dyn LabelControl> {
        controls
            .iter()
            .copied()
            .filter(|control| control.to_name() == self.config.name)
            .filter(|control| !control.selected_values().is_empty())
            .collect()
    }

    /// Serializes every region in order.
    pub fn serialize(&self) -> Vec<PersistedRegion> {
        self.regions
            .iter()
            .map(|region| serialize_region(region, self.config.save_text_result))
            .collect()
    }

    /// Tears the document down: regions are dropped and new selections are
    /// refused until the renderer reports ready again.
    pub fn destroy(&mut self) {
        debug!(document = %self.config.name, regions = self.regions.len(), "document destroyed");
        self.regions.clear();
        self.ready = false;
    }

    /// Draws ids until one has never been issued by this document.
    ///
    /// Gives up after [`MAX_ID_ATTEMPTS`] draws.
    fn next_id(&mut self) -> Option<RegionId> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = self.ids.next_id();
            if !id.is_empty() && self.issued.insert(id.clone()) {
                return Some(id);
            }
        }
        None
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("config", &self.config)
            .field("ready", &self.ready)
            .field("regions", &self.regions)
            .finish_non_exhaustive()
    }
}
