//! Session glue
//!
//! One [`Session`] per running UI: it owns the record store, the photo
//! normalizer, the debounced search, the share cascade and the map port, and
//! exposes the handful of flows the surrounding UI drives. Single-threaded,
//! event-driven: there is exactly one writer context and no concurrent
//! mutation source.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{info, warn};

use crate::config::Config;
use crate::errors::{AppResult, ShareError, StoreError};
use crate::images::PhotoNormalizer;
use crate::map::{MapPort, MarkerReconciler};
use crate::models::{Cafe, PlaceCandidate};
use crate::search::{DebouncedSearch, NominatimClient, PlaceSearch};
use crate::share::{ConsoleOutlet, ShareCascade, ShareOutcome};
use crate::store::{CafeStore, FileSlot};

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

pub struct Session {
    store: CafeStore,
    normalizer: PhotoNormalizer,
    search: DebouncedSearch,
    share: ShareCascade,
    markers: MarkerReconciler,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

impl Session {
    /// Assemble a session from configuration with a file-backed slot and a
    /// console share outlet.
    pub fn from_config(config: &Config, port: Box<dyn MapPort>) -> AppResult<Self> {
        let slot = FileSlot::new(config.slot_path(), config.storage.quota_bytes);
        let client: Arc<dyn PlaceSearch> = Arc::new(NominatimClient::new(&config.search)?);
        Ok(Self::new(
            CafeStore::new(Box::new(slot)),
            PhotoNormalizer::new(config.photos.max_dimension, config.photos.jpeg_quality),
            DebouncedSearch::new(
                client,
                Duration::from_millis(config.search.debounce_ms),
                config.search.min_query_chars,
            ),
            ShareCascade::new().with_outlet(Box::new(ConsoleOutlet)),
            port,
        ))
    }

    pub fn new(
        store: CafeStore,
        normalizer: PhotoNormalizer,
        search: DebouncedSearch,
        share: ShareCascade,
        port: Box<dyn MapPort>,
    ) -> Self {
        Self {
            store,
            normalizer,
            search,
            share,
            markers: MarkerReconciler::new(port),
        }
    }

    /// Load the store (seeding if needed) and place the initial markers.
    pub async fn init(&mut self) {
        self.store.load(now_ms()).await;
        info!(records = self.store.len(), "session ready");
        self.refresh_markers();
    }

    pub fn store(&self) -> &CafeStore {
        &self.store
    }

    /// Blank draft for a hand-drawn pin (map long-press).
    pub fn draft_custom(&self, lat: f64, lng: f64) -> Cafe {
        Cafe::new_custom(lat, lng, now_ms())
    }

    /// Draft pre-filled from a search hit.
    pub fn draft_from_place(&self, candidate: &PlaceCandidate) -> Cafe {
        Cafe::from_place(candidate, now_ms())
    }

    /// Persist a draft: insert when new, replace otherwise. The selection is
    /// closed either way. A flush failure keeps the in-memory record and is
    /// returned for the caller to surface as a "free some space" message.
    pub async fn save(&mut self, cafe: Cafe, is_new: bool) -> Result<(), StoreError> {
        let cafe = Cafe {
            flavor: cafe.flavor.snapped(),
            ..cafe
        };
        let result = if is_new {
            self.store.insert(cafe).await
        } else {
            self.store.update(cafe).await
        };
        self.store.clear_selection();
        self.refresh_markers();
        result
    }

    /// Delete after the UI's confirmation step; clears a matching selection.
    pub async fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        let result = self.store.delete(id).await;
        self.refresh_markers();
        result
    }

    pub fn select(&mut self, id: &str) {
        self.store.select(id);
        self.refresh_markers();
    }

    pub fn clear_selection(&mut self) {
        self.store.clear_selection();
        self.refresh_markers();
    }

    /// Normalize a photo file onto a draft.
    ///
    /// Returns whether a photo was attached; on any failure the draft's
    /// photo field is left exactly as it was. Overlapping calls are
    /// last-write-wins on the field, with no cancellation of the older call.
    pub async fn attach_photo(&self, draft: &mut Cafe, path: &Path) -> bool {
        match self.normalizer.normalize_file(path).await {
            Ok(data_url) => {
                draft.photo_url = Some(data_url);
                true
            }
            Err(e) => {
                warn!(error = %e, "photo not attached");
                false
            }
        }
    }

    /// Pure field-clear; nothing to reverse.
    pub fn remove_photo(&self, draft: &mut Cafe) {
        draft.photo_url = None;
    }

    /// Debounced place search. `None` means this query was superseded and
    /// the caller keeps its current candidate list; an endpoint failure
    /// degrades to an empty list.
    pub async fn search_places(&self, query: &str) -> Option<Vec<PlaceCandidate>> {
        match self.search.submit(query).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = %e, "place search failed, showing no candidates");
                Some(Vec::new())
            }
        }
    }

    /// Share a stored record through the cascade.
    pub async fn share(&self, id: &str) -> AppResult<ShareOutcome> {
        let cafe = self
            .store
            .get(id)
            .ok_or_else(|| ShareError::outlet("store", format!("no record with id {id}")))?;
        Ok(self.share.share(cafe).await?)
    }

    fn refresh_markers(&mut self) {
        self.markers
            .sync(self.store.cafes(), self.store.selected_id());
    }
}
