//! Application configuration
//!
//! TOML-backed configuration with serde defaults for every field, so an
//! empty or missing file yields a fully working setup. A missing file is
//! created with the defaults on first load.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::images::{DEFAULT_JPEG_QUALITY, DEFAULT_MAX_DIMENSION};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub photos: PhotoConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub map: MapConfig,
}

/// Persistent slot location and quota.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the slot file.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Slot file name; the single key the collection is persisted under.
    #[serde(default = "default_slot_file")]
    pub slot_file: String,
    /// Byte quota for the serialized collection, mirroring the storage
    /// quota of the environment the slot models. `None` disables the check.
    #[serde(default = "default_quota_bytes")]
    pub quota_bytes: Option<usize>,
}

/// Photo normalization bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoConfig {
    #[serde(default = "default_max_dimension")]
    pub max_dimension: u32,
    /// JPEG quality on the encoder's 1-100 scale.
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
}

/// Place-search endpoint and debounce behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_search_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_search_limit")]
    pub limit: u32,
    /// Quiet period before a query is issued.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Queries shorter than this clear the candidate list instead of
    /// hitting the endpoint.
    #[serde(default = "default_min_query_chars")]
    pub min_query_chars: usize,
    /// Appended to queries that don't already carry it.
    #[serde(default = "default_region_hint")]
    pub region_hint: Option<String>,
}

/// Initial map view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_center_lat")]
    pub center_lat: f64,
    #[serde(default = "default_center_lng")]
    pub center_lng: f64,
    #[serde(default = "default_zoom")]
    pub zoom: u8,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}
fn default_slot_file() -> String {
    "cafe_vibe_records.json".to_string()
}
fn default_quota_bytes() -> Option<usize> {
    // Roughly a browser localStorage quota
    Some(5 * 1024 * 1024)
}
fn default_max_dimension() -> u32 {
    DEFAULT_MAX_DIMENSION
}
fn default_jpeg_quality() -> u8 {
    DEFAULT_JPEG_QUALITY
}
fn default_search_endpoint() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}
fn default_search_limit() -> u32 {
    5
}
fn default_debounce_ms() -> u64 {
    600
}
fn default_min_query_chars() -> usize {
    2
}
fn default_region_hint() -> Option<String> {
    Some("台灣".to_string())
}
fn default_center_lat() -> f64 {
    25.042
}
fn default_center_lng() -> f64 {
    121.530
}
fn default_zoom() -> u8 {
    14
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            slot_file: default_slot_file(),
            quota_bytes: default_quota_bytes(),
        }
    }
}

impl Default for PhotoConfig {
    fn default() -> Self {
        Self {
            max_dimension: default_max_dimension(),
            jpeg_quality: default_jpeg_quality(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: default_search_endpoint(),
            limit: default_search_limit(),
            debounce_ms: default_debounce_ms(),
            min_query_chars: default_min_query_chars(),
            region_hint: default_region_hint(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center_lat: default_center_lat(),
            center_lng: default_center_lng(),
            zoom: default_zoom(),
        }
    }
}

impl Config {
    pub fn load_from_file(config_file: &str) -> Result<Self> {
        if std::path::Path::new(&config_file).exists() {
            let contents = std::fs::read_to_string(config_file)?;
            Ok(toml::from_str(&contents)?)
        } else {
            let default_config = Self::default();
            let contents = toml::to_string_pretty(&default_config)?;
            std::fs::write(config_file, contents)?;
            info!("Created default config file: {}", config_file);
            Ok(default_config)
        }
    }

    /// Full path of the slot file.
    pub fn slot_path(&self) -> PathBuf {
        self.storage.data_dir.join(&self.storage.slot_file)
    }
}
