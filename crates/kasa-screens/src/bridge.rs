//! Bridges the core configuration to the collaborator crates.

use std::sync::Arc;

use kasa_core::Config;
use kasa_notify::{NotificationScheduler, RainAlertPlanner};
use kasa_weather::{LocationHint, TemperatureUnit, WeatherError, WeatherProvider};

/// Map the configured temperature unit onto the provider's.
pub fn temperature_unit(config: &Config) -> TemperatureUnit {
    match config.weather.temperature_unit {
        kasa_core::TemperatureUnit::Auto => TemperatureUnit::Auto,
        kasa_core::TemperatureUnit::Celsius => TemperatureUnit::Celsius,
        kasa_core::TemperatureUnit::Fahrenheit => TemperatureUnit::Fahrenheit,
    }
}

/// Build the location hint from the `[location]` config section.
pub fn location_hint(config: &Config) -> LocationHint {
    LocationHint {
        latitude: config.location.latitude,
        longitude: config.location.longitude,
        city: config.location.city.clone(),
    }
}

/// Build the weather provider against the configured endpoint.
pub fn weather_provider(config: &Config) -> Result<WeatherProvider, WeatherError> {
    WeatherProvider::with_base_url(temperature_unit(config), config.weather.api_base.clone())
}

/// Build the rain-alert planner with the configured window.
pub fn rain_alert_planner(
    config: &Config,
    scheduler: Arc<dyn NotificationScheduler>,
) -> RainAlertPlanner {
    RainAlertPlanner::new(scheduler)
        .with_rain_window_hours(config.notifications.rain_window_hours)
}
