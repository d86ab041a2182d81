use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Temperature unit preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Auto,
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    /// API query value. Auto resolves to celsius.
    pub fn api_value(self) -> &'static str {
        match self {
            Self::Auto | Self::Celsius => "celsius",
            Self::Fahrenheit => "fahrenheit",
        }
    }
}

/// Weather condition categories mapped from WMO codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    #[default]
    Clear,
    PartlyCloudy,
    Cloudy,
    Fog,
    Drizzle,
    Rain,
    HeavyRain,
    Snow,
    Sleet,
    Thunderstorm,
    Unknown,
}

impl WeatherCondition {
    /// Convert WMO weather code to WeatherCondition
    /// See: https://open-meteo.com/en/docs#weathervariables
    pub fn from_wmo_code(code: i32) -> Self {
        match code {
            0 => Self::Clear,
            1..=2 => Self::PartlyCloudy,
            3 => Self::Cloudy,
            45 | 48 => Self::Fog,
            51 | 53 | 55 => Self::Drizzle,
            56 | 57 => Self::Sleet, // Freezing drizzle
            61 | 63 | 80 => Self::Rain,
            65 | 81 | 82 => Self::HeavyRain,
            66 | 67 => Self::Sleet, // Freezing rain
            71 | 73 | 75 | 77 | 85 | 86 => Self::Snow,
            95 | 96 | 99 => Self::Thunderstorm,
            _ => Self::Unknown,
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::PartlyCloudy => "Partly Cloudy",
            Self::Cloudy => "Cloudy",
            Self::Fog => "Fog",
            Self::Drizzle => "Drizzle",
            Self::Rain => "Rain",
            Self::HeavyRain => "Heavy Rain",
            Self::Snow => "Snow",
            Self::Sleet => "Sleet",
            Self::Thunderstorm => "Thunderstorm",
            Self::Unknown => "Unknown",
        }
    }

    /// Japanese description shown on the widget and the forecast screen
    pub fn description_ja(&self) -> &'static str {
        match self {
            Self::Clear => "晴れ",
            Self::PartlyCloudy => "晴れ時々曇り",
            Self::Cloudy => "曇り",
            Self::Fog => "靄",
            Self::Drizzle => "小雨",
            Self::Rain => "雨",
            Self::HeavyRain => "大雨",
            Self::Snow => "雪",
            Self::Sleet => "みぞれ",
            Self::Thunderstorm => "雷雨",
            Self::Unknown => "不明な天気",
        }
    }

    /// True for the conditions that count as rain for umbrella alerts
    pub fn is_rainy(&self) -> bool {
        matches!(self, Self::Rain | Self::HeavyRain | Self::Thunderstorm)
    }

    /// Get icon name
    pub fn icon_name(&self) -> &'static str {
        match self {
            Self::Clear => "sun",
            Self::PartlyCloudy => "cloud_sun",
            Self::Cloudy => "cloud",
            Self::Fog => "cloud_fog",
            Self::Drizzle => "cloud_rain",
            Self::Rain => "cloud_rain",
            Self::HeavyRain => "cloud_rain",
            Self::Snow => "cloud_snow",
            Self::Sleet => "cloud_snow",
            Self::Thunderstorm => "cloud_lightning",
            Self::Unknown => "question",
        }
    }
}

/// Geographic location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy_meters: Option<f64>,
    pub city_name: Option<String>,
}

/// Current weather conditions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub wind_speed: f64,
    pub condition: WeatherCondition,
    pub updated_at: DateTime<Utc>,
}

/// Hourly forecast entry. Carries a full timestamp so reserved times can
/// be checked against a rain window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourlyForecast {
    pub time: DateTime<Utc>,
    pub temperature: f64,
    pub condition: WeatherCondition,
    pub precipitation_chance: u8,
}

/// Daily forecast entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayForecast {
    pub date: NaiveDate,
    pub high: f64,
    pub low: f64,
    pub condition: WeatherCondition,
    pub precipitation_chance: u8,
    pub sunrise: NaiveTime,
    pub sunset: NaiveTime,
}

/// Complete weather data bundle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherData {
    pub current: CurrentWeather,
    pub hourly: Vec<HourlyForecast>,
    pub daily: Vec<DayForecast>,
    pub location: Location,
    pub fetched_at: DateTime<Utc>,
}

impl WeatherData {
    /// True when any hourly entry in the inclusive window `[from, to]`
    /// has a rainy condition.
    pub fn rain_expected_between(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> bool {
        self.hourly
            .iter()
            .filter(|h| h.time >= from && h.time <= to)
            .any(|h| h.condition.is_rainy())
    }
}

/// Location service errors
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location service unavailable")]
    ServiceUnavailable,
    #[error("Location request timed out")]
    Timeout,
    #[error("Location error: {0}")]
    Other(String),
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Location error: {0}")]
    Location(#[from] LocationError),
    #[error("Parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_wmo_code_clear() {
        assert_eq!(WeatherCondition::from_wmo_code(0), WeatherCondition::Clear);
    }

    #[test]
    fn test_wmo_code_partly_cloudy() {
        assert_eq!(
            WeatherCondition::from_wmo_code(1),
            WeatherCondition::PartlyCloudy
        );
        assert_eq!(
            WeatherCondition::from_wmo_code(2),
            WeatherCondition::PartlyCloudy
        );
    }

    #[test]
    fn test_wmo_code_fog() {
        assert_eq!(WeatherCondition::from_wmo_code(45), WeatherCondition::Fog);
        assert_eq!(WeatherCondition::from_wmo_code(48), WeatherCondition::Fog);
    }

    #[test]
    fn test_wmo_code_rain_tiers() {
        assert_eq!(WeatherCondition::from_wmo_code(61), WeatherCondition::Rain);
        assert_eq!(WeatherCondition::from_wmo_code(63), WeatherCondition::Rain);
        assert_eq!(WeatherCondition::from_wmo_code(80), WeatherCondition::Rain);
        assert_eq!(
            WeatherCondition::from_wmo_code(65),
            WeatherCondition::HeavyRain
        );
        assert_eq!(
            WeatherCondition::from_wmo_code(82),
            WeatherCondition::HeavyRain
        );
    }

    #[test]
    fn test_wmo_code_snow_and_sleet() {
        for code in [71, 73, 75, 77, 85, 86] {
            assert_eq!(
                WeatherCondition::from_wmo_code(code),
                WeatherCondition::Snow
            );
        }
        for code in [56, 57, 66, 67] {
            assert_eq!(
                WeatherCondition::from_wmo_code(code),
                WeatherCondition::Sleet
            );
        }
    }

    #[test]
    fn test_wmo_code_thunderstorm() {
        assert_eq!(
            WeatherCondition::from_wmo_code(95),
            WeatherCondition::Thunderstorm
        );
        assert_eq!(
            WeatherCondition::from_wmo_code(99),
            WeatherCondition::Thunderstorm
        );
    }

    #[test]
    fn test_wmo_code_unrecognized() {
        assert_eq!(
            WeatherCondition::from_wmo_code(999),
            WeatherCondition::Unknown
        );
        assert_eq!(
            WeatherCondition::from_wmo_code(-1),
            WeatherCondition::Unknown
        );
    }

    #[test]
    fn test_japanese_descriptions() {
        assert_eq!(WeatherCondition::Clear.description_ja(), "晴れ");
        assert_eq!(WeatherCondition::Cloudy.description_ja(), "曇り");
        assert_eq!(WeatherCondition::Rain.description_ja(), "雨");
        assert_eq!(WeatherCondition::Snow.description_ja(), "雪");
        assert_eq!(WeatherCondition::Thunderstorm.description_ja(), "雷雨");
        assert_eq!(WeatherCondition::Fog.description_ja(), "靄");
        assert_eq!(WeatherCondition::Unknown.description_ja(), "不明な天気");
    }

    #[test]
    fn test_rainy_classification() {
        assert!(WeatherCondition::Rain.is_rainy());
        assert!(WeatherCondition::HeavyRain.is_rainy());
        assert!(WeatherCondition::Thunderstorm.is_rainy());
        assert!(!WeatherCondition::Drizzle.is_rainy());
        assert!(!WeatherCondition::Snow.is_rainy());
        assert!(!WeatherCondition::Clear.is_rainy());
    }

    #[test]
    fn test_unit_api_value() {
        assert_eq!(TemperatureUnit::Auto.api_value(), "celsius");
        assert_eq!(TemperatureUnit::Fahrenheit.api_value(), "fahrenheit");
    }

    fn hourly_at(hour: u32, condition: WeatherCondition) -> HourlyForecast {
        HourlyForecast {
            time: Utc.with_ymd_and_hms(2024, 6, 1, hour, 0, 0).unwrap(),
            temperature: 20.0,
            condition,
            precipitation_chance: 0,
        }
    }

    fn data_with_hourly(hourly: Vec<HourlyForecast>) -> WeatherData {
        WeatherData {
            current: CurrentWeather {
                temperature: 20.0,
                feels_like: 20.0,
                humidity: 50,
                wind_speed: 1.0,
                condition: WeatherCondition::Clear,
                updated_at: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
            },
            hourly,
            daily: vec![],
            location: Location {
                latitude: 35.0,
                longitude: 139.0,
                accuracy_meters: None,
                city_name: None,
            },
            fetched_at: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_rain_window_hit() {
        let data = data_with_hourly(vec![
            hourly_at(8, WeatherCondition::Clear),
            hourly_at(11, WeatherCondition::Rain),
        ]);
        let from = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 6, 1, 13, 0, 0).unwrap();
        assert!(data.rain_expected_between(from, to));
    }

    #[test]
    fn test_rain_window_miss_outside() {
        let data = data_with_hourly(vec![
            hourly_at(8, WeatherCondition::Clear),
            hourly_at(14, WeatherCondition::Rain),
        ]);
        let from = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 6, 1, 13, 0, 0).unwrap();
        assert!(!data.rain_expected_between(from, to));
    }

    #[test]
    fn test_rain_window_boundary_inclusive() {
        let data = data_with_hourly(vec![hourly_at(13, WeatherCondition::Thunderstorm)]);
        let from = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 6, 1, 13, 0, 0).unwrap();
        assert!(data.rain_expected_between(from, to));
    }

    #[test]
    fn test_drizzle_does_not_trigger_window() {
        let data = data_with_hourly(vec![hourly_at(10, WeatherCondition::Drizzle)]);
        let from = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 6, 1, 13, 0, 0).unwrap();
        assert!(!data.rain_expected_between(from, to));
    }
}
