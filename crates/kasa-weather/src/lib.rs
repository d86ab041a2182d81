//! Weather collaborators for Kasa
//!
//! Provides weather data via the Open-Meteo forecast API, location
//! resolution from pinned coordinates or a geocoded city name, reverse
//! geocoding for display labels, and the widget timeline provider.

pub mod geocode;
pub mod location;
pub mod provider;
pub mod types;
pub mod widget;

pub use geocode::reverse_geocode;
pub use location::{current_location, LocationHint};
pub use provider::WeatherProvider;
pub use types::*;
