//! Location resolution.
//!
//! There is no platform location service here; the user either pins
//! coordinates in the config or names a city that is resolved through the
//! Open-Meteo geocoding API. Pinned coordinates win.

use crate::types::{Location, LocationError};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const GEOCODING_API_BASE: &str = "https://geocoding-api.open-meteo.com";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Where to look for the user. Mirrors the `[location]` config section.
#[derive(Debug, Clone, Default)]
pub struct LocationHint {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub city: Option<String>,
}

impl LocationHint {
    pub fn pinned(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
            city: None,
        }
    }

    pub fn city(name: impl Into<String>) -> Self {
        Self {
            latitude: None,
            longitude: None,
            city: Some(name.into()),
        }
    }
}

/// True when the hint can possibly yield a location.
pub fn is_available(hint: &LocationHint) -> bool {
    (hint.latitude.is_some() && hint.longitude.is_some())
        || hint.city.as_ref().is_some_and(|c| !c.is_empty())
}

/// Resolve the current location from a hint.
pub async fn current_location(hint: &LocationHint) -> Result<Location, LocationError> {
    current_location_with_base(hint, GEOCODING_API_BASE).await
}

/// Resolve against a non-default geocoding endpoint (tests).
pub async fn current_location_with_base(
    hint: &LocationHint,
    base_url: &str,
) -> Result<Location, LocationError> {
    if let (Some(latitude), Some(longitude)) = (hint.latitude, hint.longitude) {
        return Ok(Location {
            latitude,
            longitude,
            accuracy_meters: None,
            city_name: hint.city.clone(),
        });
    }

    let Some(city) = hint.city.as_ref().filter(|c| !c.is_empty()) else {
        return Err(LocationError::ServiceUnavailable);
    };

    geocode_city(city, base_url).await
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Vec<GeocodingResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    latitude: f64,
    longitude: f64,
    name: String,
}

async fn geocode_city(city: &str, base_url: &str) -> Result<Location, LocationError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .map_err(|e| LocationError::Other(e.to_string()))?;

    let url = format!("{}/v1/search", base_url.trim_end_matches('/'));

    let response = client
        .get(&url)
        .query(&[
            ("name", city),
            ("count", "1"),
            ("language", "ja"),
            ("format", "json"),
        ])
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                LocationError::Timeout
            } else {
                LocationError::Other(e.to_string())
            }
        })?;

    if !response.status().is_success() {
        return Err(LocationError::Other(format!(
            "geocoding returned status {}",
            response.status()
        )));
    }

    let body: GeocodingResponse = response
        .json()
        .await
        .map_err(|e| LocationError::Other(e.to_string()))?;

    let Some(first) = body.results.into_iter().next() else {
        return Err(LocationError::Other(format!("no match for city {:?}", city)));
    };

    tracing::info!(
        "Geocoded {:?} to {} ({}, {})",
        city,
        first.name,
        first.latitude,
        first.longitude
    );

    Ok(Location {
        latitude: first.latitude,
        longitude: first.longitude,
        accuracy_meters: None,
        city_name: Some(first.name),
    })
}
