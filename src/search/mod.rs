//! Place search
//!
//! Free-text queries against an OpenStreetMap Nominatim endpoint, producing
//! opaque [`PlaceCandidate`] rows that only ever pre-fill new records. The
//! [`debounce`] layer sits between keystrokes and the client so only the
//! most recent query after a quiet period is issued.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::config::SearchConfig;
use crate::errors::SearchError;
use crate::models::PlaceCandidate;

pub mod debounce;

pub use debounce::DebouncedSearch;

/// Seam over the place-search collaborator.
#[async_trait]
pub trait PlaceSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<PlaceCandidate>, SearchError>;
}

/// One raw row from the Nominatim search endpoint.
///
/// Coordinates arrive as strings and are parsed on conversion.
#[derive(Debug, Deserialize)]
struct NominatimRow {
    place_id: u64,
    display_name: String,
    lat: String,
    lon: String,
}

/// Nominatim-backed [`PlaceSearch`] implementation.
pub struct NominatimClient {
    http: reqwest::Client,
    endpoint: Url,
    limit: u32,
    region_hint: Option<String>,
}

impl NominatimClient {
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("cafevibe/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            endpoint: Url::parse(&config.endpoint)?,
            limit: config.limit,
            region_hint: config.region_hint.clone(),
        })
    }

    /// Append the region hint unless the query already carries it.
    fn contextualize(&self, query: &str) -> String {
        match &self.region_hint {
            Some(hint) if !query.contains(hint.as_str()) => format!("{query} {hint}"),
            _ => query.to_string(),
        }
    }
}

#[async_trait]
impl PlaceSearch for NominatimClient {
    async fn search(&self, query: &str) -> Result<Vec<PlaceCandidate>, SearchError> {
        let mut url = self.endpoint.join("search")?;
        url.query_pairs_mut()
            .append_pair("format", "json")
            .append_pair("q", &self.contextualize(query))
            .append_pair("limit", &self.limit.to_string())
            .append_pair("addressdetails", "1");

        let rows: Vec<NominatimRow> = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!(query, hits = rows.len(), "place search resolved");
        rows.into_iter().map(candidate_from_row).collect()
    }
}

fn candidate_from_row(row: NominatimRow) -> Result<PlaceCandidate, SearchError> {
    let parse = |field: &str, value: &str| -> Result<f64, SearchError> {
        value
            .parse::<f64>()
            .map_err(|_| SearchError::MalformedResult {
                message: format!("{field} is not a number: {value:?}"),
            })
    };
    let name = row
        .display_name
        .split(',')
        .next()
        .unwrap_or(&row.display_name)
        .trim()
        .to_string();
    Ok(PlaceCandidate {
        external_id: row.place_id.to_string(),
        name,
        address: row.display_name.clone(),
        lat: parse("lat", &row.lat)?,
        lng: parse("lon", &row.lon)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_conversion_takes_first_display_name_segment() {
        let row = NominatimRow {
            place_id: 4242,
            display_name: "Ruins Coffee Roasters, 木柵路三段, 文山區, 台北市".to_string(),
            lat: "24.9926".to_string(),
            lon: "121.5714".to_string(),
        };
        let candidate = candidate_from_row(row).unwrap();
        assert_eq!(candidate.external_id, "4242");
        assert_eq!(candidate.name, "Ruins Coffee Roasters");
        assert!(candidate.address.starts_with("Ruins Coffee Roasters,"));
        assert!((candidate.lat - 24.9926).abs() < 1e-9);
    }

    #[test]
    fn row_conversion_rejects_non_numeric_coordinates() {
        let row = NominatimRow {
            place_id: 1,
            display_name: "somewhere".to_string(),
            lat: "north-ish".to_string(),
            lon: "121.5".to_string(),
        };
        assert!(matches!(
            candidate_from_row(row),
            Err(SearchError::MalformedResult { .. })
        ));
    }

    #[test]
    fn region_hint_is_appended_once() {
        let config = SearchConfig::default();
        let client = NominatimClient::new(&config).unwrap();
        assert_eq!(client.contextualize("咖啡廳"), "咖啡廳 台灣");
        assert_eq!(client.contextualize("台灣 咖啡廳"), "台灣 咖啡廳");
    }
}
