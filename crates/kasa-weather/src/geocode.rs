//! Reverse geocoding: convert coordinates to a display label.
//! Uses Nominatim (OpenStreetMap) - free, no API key required.

use crate::types::Location;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/reverse";
const REQUEST_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = "Kasa/0.1.0 (weather calendar)";

#[derive(Debug, Deserialize)]
struct NominatimResponse {
    address: Option<NominatimAddress>,
}

#[derive(Debug, Deserialize)]
struct NominatimAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    municipality: Option<String>,
    state: Option<String>,
    county: Option<String>,
    country: Option<String>,
}

/// Reverse geocode coordinates to a place label for the forecast screen.
/// Prefers Japanese names. Returns `None` on any failure; the caller falls
/// back to raw coordinates.
pub async fn reverse_geocode(location: &Location) -> Option<String> {
    if let Some(name) = location.city_name.as_ref().filter(|n| !n.is_empty()) {
        return Some(name.clone());
    }

    let client = match Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to create geocoding client: {}", e);
            return None;
        }
    };

    let response = match client
        .get(NOMINATIM_URL)
        .query(&[
            ("lat", location.latitude.to_string()),
            ("lon", location.longitude.to_string()),
            ("format", "json".to_string()),
            ("addressdetails", "1".to_string()),
            ("accept-language", "ja,en".to_string()),
            ("zoom", "10".to_string()),
        ])
        .send()
        .await
    {
        Ok(r) => r,
        Err(e) => {
            tracing::debug!("Reverse geocode request failed: {}", e);
            return None;
        }
    };

    if !response.status().is_success() {
        tracing::debug!("Reverse geocode returned status {}", response.status());
        return None;
    }

    let body: NominatimResponse = match response.json().await {
        Ok(b) => b,
        Err(e) => {
            tracing::debug!("Reverse geocode parse error: {}", e);
            return None;
        }
    };

    let addr = body.address?;

    // Most-specific place wins: city > town > village > municipality > county > state > country
    let place = addr
        .city
        .or(addr.town)
        .or(addr.village)
        .or(addr.municipality)
        .or(addr.county)
        .or(addr.state)
        .or(addr.country)?;

    tracing::info!("Reverse geocoded to: {}", place);
    Some(place)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[tokio::test]
    async fn preserves_existing_city_name() {
        let loc = Location {
            latitude: 35.6895,
            longitude: 139.6917,
            accuracy_meters: None,
            city_name: Some("東京都".to_string()),
        };
        let name = reverse_geocode(&loc).await;
        assert_eq!(name.as_deref(), Some("東京都"));
    }

    #[tokio::test]
    #[ignore] // Run with: cargo test -p kasa-weather -- --ignored
    async fn resolves_tokyo() {
        let loc = Location {
            latitude: 35.6895,
            longitude: 139.6917,
            accuracy_meters: None,
            city_name: None,
        };
        let name = reverse_geocode(&loc).await;
        assert!(name.is_some());
    }
}
