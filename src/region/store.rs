//! The ordered, observable region list owned by a document.

use std::fmt;

use super::Region;
use crate::geometry::RegionId;

/// A change emitted to subscribers after every mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreChange {
    /// The whole list was replaced.
    Rebuilt,
    Appended(RegionId),
    Removed(RegionId),
    /// A region's display flags changed.
    Updated(RegionId),
    Cleared,
}

/// Handle returned by [`RegionStore::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&StoreChange, &[Region])>;

/// Regions in creation order plus the subscribers watching them.
///
/// Subscribers run synchronously after the mutation has completed, so they
/// always see a consistent list.
#[derive(Default)]
pub struct RegionStore {
    regions: Vec<Region>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl RegionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Regions in order.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }

    pub fn get(&self, id: &RegionId) -> Option<&Region> {
        self.regions.iter().find(|region| &region.id == id)
    }

    pub fn contains(&self, id: &RegionId) -> bool {
        self.get(id).is_some()
    }

    /// Replaces every region at once.
    pub fn rebuild_from(&mut self, regions: Vec<Region>) {
        self.regions = regions;
        self.notify(StoreChange::Rebuilt);
    }

    /// Adds a region after all existing ones.
    pub fn append(&mut self, region: Region) {
        let id = region.id.clone();
        self.regions.push(region);
        self.notify(StoreChange::Appended(id));
    }

    /// Removes the region with `id`. Missing ids are a no-op.
    pub fn remove(&mut self, id: &RegionId) -> Option<Region> {
        let index = self.regions.iter().position(|region| &region.id == id)?;
        let removed = self.regions.remove(index);
        self.notify(StoreChange::Removed(id.clone()));
        Some(removed)
    }

    /// Sets the hidden flag. Returns false if the region does not exist.
    pub fn set_hidden(&mut self, id: &RegionId, hidden: bool) -> bool {
        let Some(region) = self.regions.iter_mut().find(|region| &region.id == id) else {
            return false;
        };
        if region.hidden != hidden {
            region.hidden = hidden;
            self.notify(StoreChange::Updated(id.clone()));
        }
        true
    }

    /// Drops every region.
    pub fn clear(&mut self) {
        if self.regions.is_empty() {
            return;
        }
        self.regions.clear();
        self.notify(StoreChange::Cleared);
    }

    /// Registers a callback run after each mutation.
    pub fn subscribe(
        &mut self,
        subscriber: impl FnMut(&StoreChange, &[Region]) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Removes a subscriber. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    fn notify(&mut self, change: StoreChange) {
        for (_, subscriber) in &mut self.subscribers {
            subscriber(&change, &self.regions);
        }
    }
}

impl fmt::Debug for RegionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegionStore")
            .field("regions", &self.regions)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
