#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Live spot state reconciliation.
//!
//! [`SpotCache`] holds the authoritative local view of the collection and
//! diffs each incoming full-collection snapshot against the previous one,
//! reporting only genuine per-spot status transitions. [`Reconciler`] wires
//! a cache to a [`SpotStore`] subscription under a single mutex, so a
//! snapshot replacement and its diff are atomic from any caller's
//! perspective.
//!
//! There is deliberately no conflict detection here: concurrent writers
//! racing on the same spot silently overwrite one another, and the only
//! contract is "reflect the most recently observed snapshot, and say what
//! changed since last time".

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;
use where2park_spot_models::{ParkingSpot, SpotId, SpotStats, SpotStatus};
use where2park_store::{SpotStore, StoreError, Subscription};

/// Errors returned by reconciliation operations.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// A status update referenced a spot absent from the current snapshot.
    #[error("spot not found: {0}")]
    NotFound(SpotId),

    /// The underlying store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A detected status change of one spot between two consecutive snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTransition {
    /// The spot that changed.
    pub id: SpotId,
    /// Display name at the time of the change.
    pub name: String,
    /// Status in the previous snapshot.
    pub from: SpotStatus,
    /// Status in the new snapshot.
    pub to: SpotStatus,
}

impl std::fmt::Display for StatusTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} -> {}", self.name, self.from, self.to)
    }
}

/// The most recent accepted view of the spot collection.
///
/// Owns its data outright; no globals, no I/O. Snapshot order is preserved
/// so transition events and listings stay deterministic.
#[derive(Debug, Default)]
pub struct SpotCache {
    current: Vec<ParkingSpot>,
}

impl SpotCache {
    /// Creates an empty cache. The first applied snapshot is adopted
    /// without emitting transitions.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: Vec::new(),
        }
    }

    /// Returns the current snapshot.
    #[must_use]
    pub fn spots(&self) -> &[ParkingSpot] {
        &self.current
    }

    /// Looks up a spot by ID.
    #[must_use]
    pub fn get(&self, id: &SpotId) -> Option<&ParkingSpot> {
        self.current.iter().find(|spot| &spot.id == id)
    }

    /// Status breakdown of the current snapshot.
    #[must_use]
    pub fn stats(&self) -> SpotStats {
        SpotStats::from_spots(&self.current)
    }

    /// Replaces the snapshot and reports status transitions.
    ///
    /// The incoming collection is a full replacement, never a delta. On
    /// first load (empty cache) the snapshot is adopted silently to avoid a
    /// notification storm on initial sync. Otherwise, every spot present in
    /// both snapshots by ID with a differing status yields one
    /// [`StatusTransition`], in the iteration order of the new snapshot.
    /// Spots only added or only removed emit nothing.
    pub fn apply_snapshot(&mut self, new: Vec<ParkingSpot>) -> Vec<StatusTransition> {
        if self.current.is_empty() {
            self.current = new;
            return Vec::new();
        }

        let previous: HashMap<&SpotId, SpotStatus> = self
            .current
            .iter()
            .map(|spot| (&spot.id, spot.status))
            .collect();

        let transitions: Vec<StatusTransition> = new
            .iter()
            .filter_map(|spot| {
                let from = *previous.get(&spot.id)?;
                (from != spot.status).then(|| StatusTransition {
                    id: spot.id.clone(),
                    name: spot.name.clone(),
                    from,
                    to: spot.status,
                })
            })
            .collect();

        self.current = new;
        transitions
    }

    /// Local optimistic status overwrite, used when no remote writer is
    /// reachable. No compare-and-set: last write wins.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::NotFound`] if no spot has the given ID.
    pub fn update_status(
        &mut self,
        id: &SpotId,
        status: SpotStatus,
    ) -> Result<&ParkingSpot, ReconcileError> {
        let spot = self
            .current
            .iter_mut()
            .find(|spot| &spot.id == id)
            .ok_or_else(|| ReconcileError::NotFound(id.clone()))?;
        spot.status = status;
        Ok(spot)
    }
}

/// Callback invoked with each non-empty batch of detected transitions.
pub type TransitionListener = Arc<dyn Fn(&[StatusTransition]) + Send + Sync>;

/// Connects a [`SpotCache`] to a store's snapshot feed.
///
/// Each pushed snapshot is applied under one mutex, so the replace-and-diff
/// is atomic; transition batches are forwarded to the listener. Dropping
/// the reconciler (or calling [`Reconciler::stop`]) tears the subscription
/// down, after which no further events fire.
pub struct Reconciler {
    cache: Arc<Mutex<SpotCache>>,
    subscription: Subscription,
}

impl Reconciler {
    /// Subscribes to `store` and starts reconciling.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::Store`] if the subscription cannot be
    /// established; the cache then stays empty and the caller may retry.
    pub async fn start(
        store: &dyn SpotStore,
        on_transitions: TransitionListener,
    ) -> Result<Self, ReconcileError> {
        let cache = Arc::new(Mutex::new(SpotCache::new()));
        let shared = Arc::clone(&cache);

        let subscription = store
            .subscribe(Arc::new(move |snapshot| {
                let transitions = shared
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .apply_snapshot(snapshot);
                if !transitions.is_empty() {
                    log::debug!("detected {} status transitions", transitions.len());
                    on_transitions(&transitions);
                }
            }))
            .await?;

        Ok(Self {
            cache,
            subscription,
        })
    }

    /// Clones the current snapshot out of the cache.
    #[must_use]
    pub fn snapshot(&self) -> Vec<ParkingSpot> {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .spots()
            .to_vec()
    }

    /// Looks up a spot by ID in the current snapshot.
    #[must_use]
    pub fn get(&self, id: &SpotId) -> Option<ParkingSpot> {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// Status breakdown of the current snapshot.
    #[must_use]
    pub fn stats(&self) -> SpotStats {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .stats()
    }

    /// Local optimistic status overwrite on the cached snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::NotFound`] if no spot has the given ID.
    pub fn update_status(
        &self,
        id: &SpotId,
        status: SpotStatus,
    ) -> Result<ParkingSpot, ReconcileError> {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        cache.update_status(id, status).map(Clone::clone)
    }

    /// Explicit teardown. Equivalent to dropping the reconciler.
    pub fn stop(self) {
        self.subscription.unsubscribe();
    }
}
