//! Open-Meteo forecast client.
//!
//! One request fetches current conditions plus the hourly and daily
//! forecast; WMO weather codes are mapped to [`WeatherCondition`].

use crate::types::{
    CurrentWeather, DayForecast, HourlyForecast, Location, TemperatureUnit, WeatherCondition,
    WeatherData, WeatherError,
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_API_BASE: &str = "https://api.open-meteo.com";
const REQUEST_TIMEOUT_SECS: u64 = 10;
const FORECAST_DAYS: u8 = 7;

// Open-Meteo returns ISO times without seconds or offset when asked for UTC.
const API_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    unit: TemperatureUnit,
    base_url: String,
}

impl WeatherProvider {
    pub fn new(unit: TemperatureUnit) -> Result<Self, WeatherError> {
        Self::with_base_url(unit, DEFAULT_API_BASE)
    }

    /// Build a provider against a non-default endpoint (config override,
    /// wiremock in tests).
    pub fn with_base_url(
        unit: TemperatureUnit,
        base_url: impl Into<String>,
    ) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            unit,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the full weather bundle for a location.
    pub async fn fetch(&self, location: &Location) -> Result<WeatherData, WeatherError> {
        let url = format!(
            "{}/v1/forecast?latitude={}&longitude={}\
             &current=temperature_2m,relative_humidity_2m,apparent_temperature,weather_code,wind_speed_10m\
             &hourly=temperature_2m,precipitation_probability,weather_code\
             &daily=weather_code,temperature_2m_max,temperature_2m_min,sunrise,sunset,precipitation_probability_max\
             &temperature_unit={}&timezone=UTC&forecast_days={}",
            self.base_url,
            location.latitude,
            location.longitude,
            self.unit.api_value(),
            FORECAST_DAYS,
        );

        tracing::debug!("Fetching forecast for {}, {}", location.latitude, location.longitude);

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let body: ForecastResponse = response.json().await?;

        let data = body.into_weather_data(location.clone())?;
        tracing::info!(
            "Fetched forecast: {} hourly / {} daily entries, currently {}",
            data.hourly.len(),
            data.daily.len(),
            data.current.condition.description()
        );
        Ok(data)
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: CurrentBlock,
    hourly: HourlyBlock,
    daily: DailyBlock,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    time: String,
    temperature_2m: f64,
    relative_humidity_2m: f64,
    apparent_temperature: f64,
    weather_code: i32,
    wind_speed_10m: f64,
}

#[derive(Debug, Deserialize)]
struct HourlyBlock {
    time: Vec<String>,
    temperature_2m: Vec<f64>,
    #[serde(default)]
    precipitation_probability: Vec<Option<f64>>,
    weather_code: Vec<i32>,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    time: Vec<String>,
    weather_code: Vec<i32>,
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
    sunrise: Vec<String>,
    sunset: Vec<String>,
    #[serde(default)]
    precipitation_probability_max: Vec<Option<f64>>,
}

impl ForecastResponse {
    fn into_weather_data(self, location: Location) -> Result<WeatherData, WeatherError> {
        let current = CurrentWeather {
            temperature: self.current.temperature_2m,
            feels_like: self.current.apparent_temperature,
            humidity: clamp_percent(Some(self.current.relative_humidity_2m)),
            wind_speed: self.current.wind_speed_10m,
            condition: WeatherCondition::from_wmo_code(self.current.weather_code),
            updated_at: parse_api_time(&self.current.time)?,
        };

        if self.hourly.time.len() != self.hourly.weather_code.len()
            || self.hourly.time.len() != self.hourly.temperature_2m.len()
        {
            return Err(WeatherError::Parse(
                "hourly series lengths do not match".to_string(),
            ));
        }

        let mut hourly = Vec::with_capacity(self.hourly.time.len());
        for (i, raw_time) in self.hourly.time.iter().enumerate() {
            hourly.push(HourlyForecast {
                time: parse_api_time(raw_time)?,
                temperature: self.hourly.temperature_2m[i],
                condition: WeatherCondition::from_wmo_code(self.hourly.weather_code[i]),
                precipitation_chance: clamp_percent(
                    self.hourly.precipitation_probability.get(i).copied().flatten(),
                ),
            });
        }

        if self.daily.time.len() != self.daily.weather_code.len()
            || self.daily.time.len() != self.daily.temperature_2m_max.len()
            || self.daily.time.len() != self.daily.temperature_2m_min.len()
        {
            return Err(WeatherError::Parse(
                "daily series lengths do not match".to_string(),
            ));
        }

        let mut daily = Vec::with_capacity(self.daily.time.len());
        for (i, raw_date) in self.daily.time.iter().enumerate() {
            daily.push(DayForecast {
                date: parse_api_date(raw_date)?,
                high: self.daily.temperature_2m_max[i],
                low: self.daily.temperature_2m_min[i],
                condition: WeatherCondition::from_wmo_code(self.daily.weather_code[i]),
                precipitation_chance: clamp_percent(
                    self.daily
                        .precipitation_probability_max
                        .get(i)
                        .copied()
                        .flatten(),
                ),
                sunrise: parse_api_time_of_day(self.daily.sunrise.get(i))?,
                sunset: parse_api_time_of_day(self.daily.sunset.get(i))?,
            });
        }

        Ok(WeatherData {
            current,
            hourly,
            daily,
            location,
            fetched_at: Utc::now(),
        })
    }
}

fn parse_api_time(raw: &str) -> Result<chrono::DateTime<Utc>, WeatherError> {
    NaiveDateTime::parse_from_str(raw, API_TIME_FORMAT)
        .map(|dt| dt.and_utc())
        .map_err(|e| WeatherError::Parse(format!("bad timestamp {:?}: {}", raw, e)))
}

fn parse_api_date(raw: &str) -> Result<NaiveDate, WeatherError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| WeatherError::Parse(format!("bad date {:?}: {}", raw, e)))
}

fn parse_api_time_of_day(raw: Option<&String>) -> Result<NaiveTime, WeatherError> {
    let raw = raw.ok_or_else(|| WeatherError::Parse("missing sunrise/sunset".to_string()))?;
    parse_api_time(raw).map(|dt| dt.time())
}

fn clamp_percent(value: Option<f64>) -> u8 {
    match value {
        Some(v) if v.is_finite() => v.clamp(0.0, 100.0).round() as u8,
        _ => 0,
    }
}
