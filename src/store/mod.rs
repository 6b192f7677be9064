//! Record Store
//!
//! The single in-memory collection of [`Cafe`] records, backed by one
//! serialized blob in a persistent slot. There is exactly one copy and one
//! writer context, so no locking is needed; every mutation re-serializes the
//! whole collection and flushes it.
//!
//! Lifecycle: the store starts `Uninitialized` and becomes `Ready` exactly
//! once, after [`CafeStore::load`] resolves. Flushes before `Ready` are
//! ignored so a slow load can never be clobbered by an empty collection.

use tracing::{debug, trace, warn};

use crate::errors::StoreError;
use crate::models::seed::seed_cafes;
use crate::models::Cafe;

pub mod slot;

pub use slot::{FileSlot, MemorySlot, StorageSlot};

/// Two-state store lifecycle; flush is only honored in `Ready`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreLifecycle {
    Uninitialized,
    Ready,
}

/// Durable ordered collection of [`Cafe`] records.
///
/// Collection order is insertion order (newest prepended); the sidebar view
/// re-sorts independently by `created_at` descending.
pub struct CafeStore {
    slot: Box<dyn StorageSlot>,
    cafes: Vec<Cafe>,
    selected: Option<String>,
    lifecycle: StoreLifecycle,
}

impl CafeStore {
    pub fn new(slot: Box<dyn StorageSlot>) -> Self {
        Self {
            slot,
            cafes: Vec::new(),
            selected: None,
            lifecycle: StoreLifecycle::Uninitialized,
        }
    }

    pub fn lifecycle(&self) -> StoreLifecycle {
        self.lifecycle
    }

    /// Load the persisted collection and mark the store `Ready`.
    ///
    /// Fail-soft on every path: an absent slot seeds the sample set, an
    /// unreadable or unparseable payload logs and seeds the sample set.
    /// Never returns an error and never runs twice.
    pub async fn load(&mut self, now_ms: i64) {
        if self.lifecycle == StoreLifecycle::Ready {
            debug!("load called on a ready store, ignoring");
            return;
        }

        self.cafes = match self.slot.read().await {
            Ok(Some(payload)) => match serde_json::from_str::<Vec<Cafe>>(&payload) {
                Ok(cafes) => {
                    debug!(count = cafes.len(), "loaded records from slot");
                    cafes
                }
                Err(e) => {
                    warn!(error = %e, "slot payload unparseable, seeding sample set");
                    seed_cafes(now_ms)
                }
            },
            Ok(None) => {
                debug!("slot empty, seeding sample set");
                seed_cafes(now_ms)
            }
            Err(e) => {
                warn!(error = %e, "slot unreadable, seeding sample set");
                seed_cafes(now_ms)
            }
        };
        self.lifecycle = StoreLifecycle::Ready;
    }

    /// Serialize the full collection and write it to the slot.
    ///
    /// Ignored before `Ready`. On failure the in-memory collection is NOT
    /// rolled back; the error is returned so the caller can ask the user to
    /// free space.
    pub async fn flush(&self) -> Result<(), StoreError> {
        if self.lifecycle != StoreLifecycle::Ready {
            trace!("flush before load completed, ignoring");
            return Ok(());
        }
        let payload = serde_json::to_string(&self.cafes)?;
        self.slot.write(&payload).await
    }

    /// Prepend a new record and flush.
    pub async fn insert(&mut self, cafe: Cafe) -> Result<(), StoreError> {
        self.cafes.insert(0, cafe);
        self.flush().await
    }

    /// Replace the record with a matching id and flush; no-op if absent.
    pub async fn update(&mut self, cafe: Cafe) -> Result<(), StoreError> {
        match self.cafes.iter_mut().find(|c| c.id == cafe.id) {
            Some(existing) => {
                *existing = cafe;
                self.flush().await
            }
            None => {
                debug!(id = %cafe.id, "update for unknown id, ignoring");
                Ok(())
            }
        }
    }

    /// Remove the record with a matching id and flush; clears the active
    /// selection if it pointed at the deleted record. No-op if absent.
    pub async fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        let before = self.cafes.len();
        self.cafes.retain(|c| c.id != id);
        if self.cafes.len() == before {
            debug!(id, "delete for unknown id, ignoring");
            return Ok(());
        }
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        self.flush().await
    }

    /// Records in collection (insertion) order.
    pub fn cafes(&self) -> &[Cafe] {
        &self.cafes
    }

    pub fn get(&self, id: &str) -> Option<&Cafe> {
        self.cafes.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.cafes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cafes.is_empty()
    }

    /// Mark a record as the active selection; ignored for unknown ids.
    pub fn select(&mut self, id: &str) {
        if self.get(id).is_some() {
            self.selected = Some(id.to_string());
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&Cafe> {
        self.selected.as_deref().and_then(|id| self.get(id))
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Sidebar view: case-insensitive substring filter over name and
    /// address, sorted by `created_at` descending (newest first).
    pub fn sidebar(&self, filter: &str) -> Vec<&Cafe> {
        let needle = filter.trim().to_lowercase();
        let mut view: Vec<&Cafe> = self
            .cafes
            .iter()
            .filter(|c| {
                needle.is_empty()
                    || c.name.to_lowercase().contains(&needle)
                    || c.address.to_lowercase().contains(&needle)
            })
            .collect();
        view.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        view
    }
}
