//! Map port
//!
//! The core never depends on a concrete map widget. It sees only the narrow
//! [`MapPort`] surface, and [`MarkerReconciler`] keeps that surface in sync
//! with the record collection: one marker per record, styled on selection,
//! stale markers removed, view panned to the selected record.

use std::collections::HashSet;

use tracing::trace;

use crate::models::Cafe;

/// Zoom level applied when panning to a selected record.
pub const SELECTED_ZOOM: u8 = 16;

/// Visual marker style keyed on selection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerStyle {
    Normal,
    Selected,
}

/// The only map surface the core depends on.
pub trait MapPort: Send {
    /// Create the marker if unknown, otherwise move/restyle it in place.
    fn add_or_update_marker(&mut self, id: &str, lat: f64, lng: f64, style: MarkerStyle);
    fn remove_marker(&mut self, id: &str);
    fn pan_to(&mut self, lat: f64, lng: f64, zoom: u8);
}

/// Reconciles the record collection onto a [`MapPort`].
pub struct MarkerReconciler {
    port: Box<dyn MapPort>,
    placed: HashSet<String>,
}

impl MarkerReconciler {
    pub fn new(port: Box<dyn MapPort>) -> Self {
        Self {
            port,
            placed: HashSet::new(),
        }
    }

    /// Bring the map in line with the collection and selection.
    pub fn sync(&mut self, cafes: &[Cafe], selected_id: Option<&str>) {
        // Drop markers whose record is gone
        let live: HashSet<&str> = cafes.iter().map(|c| c.id.as_str()).collect();
        let stale: Vec<String> = self
            .placed
            .iter()
            .filter(|id| !live.contains(id.as_str()))
            .cloned()
            .collect();
        for id in stale {
            trace!(id = %id, "removing stale marker");
            self.port.remove_marker(&id);
            self.placed.remove(&id);
        }

        for cafe in cafes {
            let style = if selected_id == Some(cafe.id.as_str()) {
                MarkerStyle::Selected
            } else {
                MarkerStyle::Normal
            };
            self.port
                .add_or_update_marker(&cafe.id, cafe.lat, cafe.lng, style);
            self.placed.insert(cafe.id.clone());
        }

        if let Some(selected) = selected_id.and_then(|id| cafes.iter().find(|c| c.id == id)) {
            self.port.pan_to(selected.lat, selected.lng, SELECTED_ZOOM);
        }
    }
}

/// Port that records every call, for tests and dry runs.
#[derive(Debug, Default)]
pub struct RecordingPort {
    state: std::sync::Arc<std::sync::Mutex<RecordedCalls>>,
}

/// Call log captured by a [`RecordingPort`].
#[derive(Debug, Default, Clone)]
pub struct RecordedCalls {
    pub markers: Vec<(String, MarkerStyle)>,
    pub removed: Vec<String>,
    pub pans: Vec<(f64, f64, u8)>,
}

impl RecordingPort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle to the call log; survives moving the port into a
    /// [`MarkerReconciler`].
    pub fn calls(&self) -> std::sync::Arc<std::sync::Mutex<RecordedCalls>> {
        self.state.clone()
    }
}

impl MapPort for RecordingPort {
    fn add_or_update_marker(&mut self, id: &str, _lat: f64, _lng: f64, style: MarkerStyle) {
        self.state
            .lock()
            .expect("port mutex poisoned")
            .markers
            .push((id.to_string(), style));
    }

    fn remove_marker(&mut self, id: &str) {
        self.state
            .lock()
            .expect("port mutex poisoned")
            .removed
            .push(id.to_string());
    }

    fn pan_to(&mut self, lat: f64, lng: f64, zoom: u8) {
        self.state
            .lock()
            .expect("port mutex poisoned")
            .pans
            .push((lat, lng, zoom));
    }
}
