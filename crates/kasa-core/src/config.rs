use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory
    pub config_dir: PathBuf,

    /// Weather settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Location settings (pinned coordinates or a city name)
    #[serde(default)]
    pub location: LocationConfig,

    /// Notification settings
    #[serde(default)]
    pub notifications: NotificationConfig,

    /// UI preferences
    #[serde(default)]
    pub ui: UiConfig,
}

/// Temperature unit preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Auto,
    Celsius,
    Fahrenheit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Temperature unit preference
    pub temperature_unit: TemperatureUnit,

    /// Refresh interval in minutes
    pub refresh_minutes: u32,

    /// Forecast API base URL (override for testing / self-hosted mirrors)
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

fn default_api_base() -> String {
    "https://api.open-meteo.com".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            temperature_unit: TemperatureUnit::Auto,
            refresh_minutes: 15,
            api_base: default_api_base(),
        }
    }
}

/// Where the user is. Pinned coordinates win over the city name;
/// with neither set the location collaborator reports unavailable.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LocationConfig {
    /// Pinned latitude in decimal degrees
    pub latitude: Option<f64>,

    /// Pinned longitude in decimal degrees
    pub longitude: Option<f64>,

    /// City name resolved through geocoding when no coordinates are pinned
    pub city: Option<String>,
}

impl LocationConfig {
    /// True when either a coordinate pair or a city name is configured.
    pub fn is_configured(&self) -> bool {
        (self.latitude.is_some() && self.longitude.is_some())
            || self.city.as_ref().is_some_and(|c| !c.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Hours after a reserved time scanned for expected rain
    #[serde(default = "default_rain_window_hours")]
    pub rain_window_hours: u32,
}

fn default_rain_window_hours() -> u32 {
    5
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            rain_window_hours: default_rain_window_hours(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Accent color as "#RRGGBB" (the user-picked bar color)
    pub accent_color: String,

    /// Dark mode enabled
    pub dark_mode: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            accent_color: "#73CBF9".to_string(),
            dark_mode: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("kasa");

        Self {
            config_dir,
            weather: WeatherConfig::default(),
            location: LocationConfig::default(),
            notifications: NotificationConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit path, creating default if missing
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            let config = Self::default();
            config.save_to(config_path)?;
            return Ok(config);
        }

        let contents =
            std::fs::read_to_string(config_path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        if !validation.warnings.is_empty() {
            for warning in &validation.warnings {
                tracing::warn!("Config warning: {}", warning);
            }
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    ///
    /// Returns a ValidationResult containing any errors or warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        // Validate forecast API base URL
        self.validate_url(&self.weather.api_base, "weather.api_base", &mut result);

        // Validate weather refresh interval
        if self.weather.refresh_minutes == 0 {
            result.add_warning(
                "weather.refresh_minutes",
                "Weather refresh disabled (0 minutes)",
            );
        } else if self.weather.refresh_minutes > 1440 {
            result.add_warning(
                "weather.refresh_minutes",
                "Weather refresh interval is more than 24 hours",
            );
        }

        // Validate pinned coordinates
        match (self.location.latitude, self.location.longitude) {
            (Some(lat), _) if !(-90.0..=90.0).contains(&lat) => {
                result.add_error(
                    "location.latitude",
                    format!("Latitude out of range [-90, 90]: {}", lat),
                );
            }
            (Some(_), None) => {
                result.add_error("location.longitude", "Latitude set without longitude");
            }
            _ => {}
        }
        match (self.location.longitude, self.location.latitude) {
            (Some(lon), _) if !(-180.0..=180.0).contains(&lon) => {
                result.add_error(
                    "location.longitude",
                    format!("Longitude out of range [-180, 180]: {}", lon),
                );
            }
            (Some(_), None) => {
                result.add_error("location.latitude", "Longitude set without latitude");
            }
            _ => {}
        }

        if !self.location.is_configured() {
            result.add_warning(
                "location",
                "No location configured - weather features will be unavailable",
            );
        }

        // Validate rain window
        if self.notifications.rain_window_hours == 0 {
            result.add_warning(
                "notifications.rain_window_hours",
                "Rain window is 0 hours - only the reserved hour is checked",
            );
        } else if self.notifications.rain_window_hours > 24 {
            result.add_warning(
                "notifications.rain_window_hours",
                "Rain window is more than 24 hours",
            );
        }

        // Validate accent color
        if !is_hex_color(&self.ui.accent_color) {
            result.add_error(
                "ui.accent_color",
                format!("Not a #RRGGBB color: {}", self.ui.accent_color),
            );
        }

        result
    }

    /// Validate a URL field
    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                // Check scheme
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                // Check host
                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Ensure config directory exists
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("kasa");

        Ok(config_dir.join("config.toml"))
    }
}

fn is_hex_color(s: &str) -> bool {
    s.len() == 7
        && s.starts_with('#')
        && s[1..].chars().all(|c| c.is_ascii_hexdigit())
}
