//! Core data model for CafeVibe
//!
//! The wire shape (camelCase field names, optional fields omitted when
//! absent) is the exact shape of the persisted slot blob, so records written
//! by any earlier build of the catalogue reload without migration.

use serde::{Deserialize, Serialize};

pub mod seed;

/// The four subjective tasting axes, each in the closed range [1, 5]
/// in steps of 0.5.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlavorProfile {
    pub acidity: f32,
    pub bitterness: f32,
    pub roast: f32,
    pub sweetness: f32,
}

impl Default for FlavorProfile {
    /// Mid-range on every axis; a record is never created with a partial
    /// profile.
    fn default() -> Self {
        Self {
            acidity: 3.0,
            bitterness: 3.0,
            roast: 3.0,
            sweetness: 3.0,
        }
    }
}

impl FlavorProfile {
    /// Snap one axis value onto the [1, 5] scale in 0.5 steps.
    ///
    /// Form sliders already emit conforming values; this guards records
    /// arriving from other sources (imports, hand-edited slots).
    pub fn snap(value: f32) -> f32 {
        ((value * 2.0).round() / 2.0).clamp(1.0, 5.0)
    }

    /// Return a copy with every axis snapped onto the valid scale.
    pub fn snapped(&self) -> Self {
        Self {
            acidity: Self::snap(self.acidity),
            bitterness: Self::snap(self.bitterness),
            roast: Self::snap(self.roast),
            sweetness: Self::snap(self.sweetness),
        }
    }
}

/// The five independent space-feature flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceFeatures {
    pub has_socket: bool,
    pub unlimited_time: bool,
    pub work_friendly: bool,
    pub has_cat: bool,
    pub industrial_style: bool,
}

/// One user-authored entry for a physical location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cafe {
    /// Unique within the store for the lifetime of the store.
    pub id: String,
    /// External place identifier when the record was seeded from a search
    /// hit; absent for hand-drawn pins.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_place_id: Option<String>,
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    /// Free-text record of items and prices tried.
    pub item_note: String,
    pub flavor: FlavorProfile,
    pub features: SpaceFeatures,
    /// Normalized embeddable photo (`data:image/jpeg;base64,...`); absent
    /// means no photo.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    /// Optional overall rating, 1-5.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    /// Creation timestamp in epoch milliseconds; the sidebar sort key
    /// (newest first).
    pub created_at: i64,
    /// Distinguishes hand-drawn pins from pins seeded by a place search.
    pub is_custom: bool,
}

impl Cafe {
    /// New blank record for a hand-drawn pin at the given coordinates.
    pub fn new_custom(lat: f64, lng: f64, now_ms: i64) -> Self {
        Self {
            id: format!("custom-{now_ms}"),
            google_place_id: None,
            name: String::new(),
            address: String::new(),
            lat,
            lng,
            item_note: String::new(),
            flavor: FlavorProfile::default(),
            features: SpaceFeatures::default(),
            photo_url: None,
            rating: None,
            created_at: now_ms,
            is_custom: true,
        }
    }

    /// New record pre-filled from a place-search hit.
    pub fn from_place(candidate: &PlaceCandidate, now_ms: i64) -> Self {
        Self {
            id: format!("place-{}", candidate.external_id),
            google_place_id: Some(candidate.external_id.clone()),
            name: candidate.name.clone(),
            address: candidate.address.clone(),
            lat: candidate.lat,
            lng: candidate.lng,
            item_note: String::new(),
            flavor: FlavorProfile::default(),
            features: SpaceFeatures::default(),
            photo_url: None,
            rating: None,
            created_at: now_ms,
            is_custom: false,
        }
    }
}

/// One ranked hit from the place-search collaborator.
///
/// Opaque candidate data: the core only ever uses it to pre-fill a new
/// [`Cafe`] record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceCandidate {
    pub external_id: String,
    /// Display name, typically the first segment of the formatted address.
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flavor_snap_clamps_and_steps() {
        assert_eq!(FlavorProfile::snap(0.2), 1.0);
        assert_eq!(FlavorProfile::snap(5.9), 5.0);
        assert_eq!(FlavorProfile::snap(3.26), 3.5);
        assert_eq!(FlavorProfile::snap(3.24), 3.0);
        assert_eq!(FlavorProfile::snap(4.5), 4.5);
    }

    #[test]
    fn cafe_wire_shape_is_camel_case_with_optionals_omitted() {
        let cafe = Cafe::new_custom(25.0, 121.5, 1_700_000_000_000);
        let json = serde_json::to_value(&cafe).unwrap();

        assert_eq!(cafe.id, "custom-1700000000000");
        assert!(json.get("itemNote").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("isCustom").is_some());
        assert!(json["features"].get("hasSocket").is_some());
        // Absent optionals must be omitted, not null
        assert!(json.get("photoUrl").is_none());
        assert!(json.get("googlePlaceId").is_none());
        assert!(json.get("rating").is_none());
    }

    #[test]
    fn place_draft_carries_external_id() {
        let candidate = PlaceCandidate {
            external_id: "12345".to_string(),
            name: "Fika Fika Cafe".to_string(),
            address: "Fika Fika Cafe, 伊通街, 台北市".to_string(),
            lat: 25.0513,
            lng: 121.5345,
        };
        let cafe = Cafe::from_place(&candidate, 1);
        assert_eq!(cafe.id, "place-12345");
        assert_eq!(cafe.google_place_id.as_deref(), Some("12345"));
        assert_eq!(cafe.flavor, FlavorProfile::default());
        assert!(!cafe.is_custom);
    }
}
