//! Forecast screen: current conditions plus hourly and daily summaries.

use kasa_weather::{
    current_location, reverse_geocode, CurrentWeather, DayForecast, HourlyForecast, LocationHint,
    WeatherData, WeatherProvider,
};

/// Shown under the forecast, per the data source's terms.
pub const ATTRIBUTION: &str = "Weather data by Open-Meteo.com";

/// Placeholder shown for any section that failed to load.
const ERROR_TEXT: &str = "error";

const HOURLY_LINES: usize = 6;

/// View state for the forecast screen. `refresh` resolves the location,
/// fetches weather and fills the display strings; on failure the affected
/// strings become a placeholder and the screen stays usable.
pub struct ForecastScreen {
    provider: WeatherProvider,
    hint: LocationHint,
    pub place_label: String,
    pub current_text: String,
    pub hourly_text: String,
    pub daily_text: String,
}

impl ForecastScreen {
    pub fn new(provider: WeatherProvider, hint: LocationHint) -> Self {
        Self {
            provider,
            hint,
            place_label: String::new(),
            current_text: String::new(),
            hourly_text: String::new(),
            daily_text: String::new(),
        }
    }

    /// Fetch and format. Returns the fetched data so sibling screens can
    /// reuse it without a second request.
    pub async fn refresh(&mut self) -> Option<WeatherData> {
        let location = match current_location(&self.hint).await {
            Ok(loc) => loc,
            Err(e) => {
                tracing::warn!("Forecast location unavailable: {}", e);
                self.set_all(ERROR_TEXT);
                return None;
            }
        };

        self.place_label = match reverse_geocode(&location).await {
            Some(name) => name,
            None => format!("{:.2}, {:.2}", location.latitude, location.longitude),
        };

        match self.provider.fetch(&location).await {
            Ok(data) => {
                self.current_text = format_current(&data.current);
                self.hourly_text = format_hourly(&data.hourly);
                self.daily_text = format_daily(&data.daily);
                Some(data)
            }
            Err(e) => {
                tracing::error!("Forecast fetch failed: {}", e);
                self.set_all(ERROR_TEXT);
                None
            }
        }
    }

    fn set_all(&mut self, text: &str) {
        self.current_text = text.to_string();
        self.hourly_text = text.to_string();
        self.daily_text = text.to_string();
    }
}

/// "現在: 雨 21.4°C (体感 22.0°C)"
pub fn format_current(current: &CurrentWeather) -> String {
    format!(
        "現在: {} {:.1}°C (体感 {:.1}°C)",
        current.condition.description_ja(),
        current.temperature,
        current.feels_like
    )
}

/// One line per upcoming hour: "08:00 雨 21.4°C 80%"
pub fn format_hourly(hourly: &[HourlyForecast]) -> String {
    if hourly.is_empty() {
        return ERROR_TEXT.to_string();
    }
    hourly
        .iter()
        .take(HOURLY_LINES)
        .map(|h| {
            format!(
                "{} {} {:.1}°C {}%",
                h.time.format("%H:%M"),
                h.condition.description_ja(),
                h.temperature,
                h.precipitation_chance
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line per day: "06/01 雨 18.0°C〜24.0°C"
pub fn format_daily(daily: &[DayForecast]) -> String {
    if daily.is_empty() {
        return ERROR_TEXT.to_string();
    }
    daily
        .iter()
        .map(|d| {
            format!(
                "{} {} {:.1}°C〜{:.1}°C",
                d.date.format("%m/%d"),
                d.condition.description_ja(),
                d.low,
                d.high
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
