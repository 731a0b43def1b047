#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Spot collection store abstraction.
//!
//! The remote document store is an external collaborator; the core only
//! depends on the four operations of [`SpotStore`] and is agnostic to the
//! actual protocol behind them. [`MemoryStore`] implements the trait
//! in-process and doubles as the fallback when no remote backend is
//! configured.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;
use where2park_spot_models::{NewSpot, ParkingSpot, SpotId, SpotStatus};

/// Errors returned by store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No spot with the given ID exists in the collection.
    #[error("spot not found: {0}")]
    NotFound(SpotId),

    /// The backing store cannot be reached. Callers keep their previous
    /// snapshot authoritative; re-subscription is caller-driven.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Callback receiving a full replacement snapshot on every collection
/// change. Never a delta: the store always pushes complete current state.
pub type SnapshotListener = Arc<dyn Fn(Vec<ParkingSpot>) + Send + Sync>;

/// Handle to an active snapshot subscription.
///
/// Unsubscribes when dropped or via [`Subscription::unsubscribe`]. After
/// teardown no further snapshots are delivered to the listener.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Wraps a teardown closure invoked exactly once.
    #[must_use]
    pub fn new(cancel: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Explicitly tears the subscription down.
    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// The four operations the core needs from a spot collection store.
#[async_trait]
pub trait SpotStore: Send + Sync {
    /// Returns the complete current collection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the store cannot be reached.
    async fn get_all(&self) -> Result<Vec<ParkingSpot>, StoreError>;

    /// Registers a listener for full-collection snapshots.
    ///
    /// The current snapshot is pushed immediately on registration, then
    /// again after every collection change, until the returned
    /// [`Subscription`] is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the store cannot be reached.
    async fn subscribe(&self, listener: SnapshotListener) -> Result<Subscription, StoreError>;

    /// Adds a spot and returns the store-assigned ID. The spot enters the
    /// collection as `available`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the store cannot be reached.
    async fn add(&self, spot: NewSpot) -> Result<SpotId, StoreError>;

    /// Overwrites the status of an existing spot (last-write-wins, no
    /// compare-and-set) and stamps its update time.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown ID, or
    /// [`StoreError::Unavailable`] if the store cannot be reached.
    async fn update_status(&self, id: &SpotId, status: SpotStatus) -> Result<(), StoreError>;
}

struct MemoryStoreInner {
    spots: Mutex<Vec<ParkingSpot>>,
    listeners: Mutex<HashMap<u64, SnapshotListener>>,
    next_listener_id: AtomicU64,
}

/// In-process [`SpotStore`] backed by a mutex-guarded `Vec`.
///
/// Every mutation pushes the full new snapshot to all live listeners, in
/// registration order. Cheap to clone; clones share the same collection.
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<MemoryStoreInner>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MemoryStoreInner {
                spots: Mutex::new(Vec::new()),
                listeners: Mutex::new(HashMap::new()),
                next_listener_id: AtomicU64::new(0),
            }),
        }
    }

    /// Creates a store pre-populated with seed spots.
    #[must_use]
    pub fn with_spots(spots: Vec<ParkingSpot>) -> Self {
        let store = Self::new();
        *store.inner.spots.lock().unwrap_or_else(PoisonError::into_inner) = spots;
        store
    }

    /// Snapshots the collection and pushes it to every live listener.
    ///
    /// Listeners run outside the spots lock so they may call back into the
    /// store without deadlocking.
    fn notify(&self) {
        let snapshot = self.snapshot();
        let listeners: Vec<SnapshotListener> = {
            let registry = self
                .inner
                .listeners
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            registry.values().cloned().collect()
        };
        for listener in listeners {
            listener(snapshot.clone());
        }
    }

    fn snapshot(&self) -> Vec<ParkingSpot> {
        self.inner
            .spots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl SpotStore for MemoryStore {
    async fn get_all(&self) -> Result<Vec<ParkingSpot>, StoreError> {
        Ok(self.snapshot())
    }

    async fn subscribe(&self, listener: SnapshotListener) -> Result<Subscription, StoreError> {
        let id = self.inner.next_listener_id.fetch_add(1, Ordering::Relaxed);
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, Arc::clone(&listener));
        log::debug!("listener {id} subscribed");

        // Firestore-style: the listener sees current state right away.
        listener(self.snapshot());

        let inner = Arc::clone(&self.inner);
        Ok(Subscription::new(move || {
            inner
                .listeners
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(&id);
            log::debug!("listener {id} unsubscribed");
        }))
    }

    async fn add(&self, spot: NewSpot) -> Result<SpotId, StoreError> {
        let id = SpotId::new(Uuid::new_v4().to_string());
        let record = spot.into_spot(id.clone(), Utc::now());
        self.inner
            .spots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record);
        log::info!("added spot {id}");
        self.notify();
        Ok(id)
    }

    async fn update_status(&self, id: &SpotId, status: SpotStatus) -> Result<(), StoreError> {
        {
            let mut spots = self
                .inner
                .spots
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            let spot = spots
                .iter_mut()
                .find(|spot| &spot.id == id)
                .ok_or_else(|| StoreError::NotFound(id.clone()))?;
            spot.status = status;
            spot.updated_at = Some(Utc::now());
        }
        log::info!("spot {id} status set to {status}");
        self.notify();
        Ok(())
    }
}
