//! Widget timeline provider.
//!
//! Produces the one-line Japanese weather description the home-screen
//! widget shows. Placeholder and snapshot entries exist so a host can
//! render something before the first fetch completes.

use crate::location::{current_location, LocationHint};
use crate::provider::WeatherProvider;
use chrono::{DateTime, Utc};

/// A single widget entry: a timestamp and the text to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetEntry {
    pub at: DateTime<Utc>,
    pub description: String,
}

/// When the host should ask for a new timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshPolicy {
    /// Refresh after the last entry has been shown
    AtEnd,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline {
    pub entries: Vec<WidgetEntry>,
    pub policy: RefreshPolicy,
}

/// Static entry for widget gallery previews.
pub fn placeholder() -> WidgetEntry {
    WidgetEntry {
        at: Utc::now(),
        description: "N/A".to_string(),
    }
}

/// Entry shown while the first real timeline is loading.
pub fn snapshot() -> WidgetEntry {
    WidgetEntry {
        at: Utc::now(),
        description: "Loading...".to_string(),
    }
}

/// Build the widget timeline: resolve the location, fetch the weather and
/// describe the current condition in Japanese. Failures become static
/// placeholder entries; the widget has no error UI.
pub async fn timeline(hint: &LocationHint, provider: &WeatherProvider) -> Timeline {
    let entry = match current_location(hint).await {
        Ok(location) => match provider.fetch(&location).await {
            Ok(data) => WidgetEntry {
                at: Utc::now(),
                description: data.current.condition.description_ja().to_string(),
            },
            Err(e) => {
                tracing::warn!("Widget weather fetch failed: {}", e);
                WidgetEntry {
                    at: Utc::now(),
                    description: "Error".to_string(),
                }
            }
        },
        Err(e) => {
            tracing::warn!("Widget location unavailable: {}", e);
            WidgetEntry {
                at: Utc::now(),
                description: "Location not available".to_string(),
            }
        }
    };

    Timeline {
        entries: vec![entry],
        policy: RefreshPolicy::AtEnd,
    }
}
