//! Dispatch glue between a reservation and the notification collaborator.
//!
//! Given a reserved date+time and fetched weather data, scan the hourly
//! forecast for rain in the window after the reserved time, pick the
//! matching message and hand a request to the scheduler under the
//! date-derived identifier. Cancelling uses the same identifier, so
//! removing a reservation removes exactly its pending request.

use crate::message::{notification_identifier, rain_message, NOTIFICATION_TITLE};
use crate::scheduler::{NotificationRequest, NotificationScheduler, NotifyError};
use chrono::{Duration, NaiveDateTime};
use kasa_weather::WeatherData;
use std::sync::Arc;

const DEFAULT_RAIN_WINDOW_HOURS: i64 = 5;

/// Plans and cancels rain alerts for reserved times.
#[derive(Clone)]
pub struct RainAlertPlanner {
    scheduler: Arc<dyn NotificationScheduler>,
    rain_window: Duration,
}

impl RainAlertPlanner {
    pub fn new(scheduler: Arc<dyn NotificationScheduler>) -> Self {
        Self {
            scheduler,
            rain_window: Duration::hours(DEFAULT_RAIN_WINDOW_HOURS),
        }
    }

    /// Override the hours after the reserved time scanned for rain.
    pub fn with_rain_window_hours(mut self, hours: u32) -> Self {
        self.rain_window = Duration::hours(i64::from(hours));
        self
    }

    /// Schedule the alert for a reserved time.
    ///
    /// Returns whether rain is expected in the window. A second call for
    /// the same minute replaces the earlier pending request.
    pub async fn schedule_alert(
        &self,
        weather: &WeatherData,
        at: NaiveDateTime,
    ) -> Result<bool, NotifyError> {
        let from = at.and_utc();
        let to = from + self.rain_window;
        let rain_expected = weather.rain_expected_between(from, to);

        let request = NotificationRequest {
            identifier: notification_identifier(at),
            title: NOTIFICATION_TITLE.to_string(),
            body: rain_message(rain_expected).to_string(),
            trigger_at: at,
            repeats: false,
        };

        tracing::info!(
            "Rain alert for {}: rain expected = {}",
            at,
            rain_expected
        );
        self.scheduler.schedule(request).await?;
        Ok(rain_expected)
    }

    /// Cancel the alert for a reserved time. Nothing pending is fine.
    pub async fn cancel_alert(&self, at: NaiveDateTime) {
        self.scheduler.cancel(&notification_identifier(at)).await;
    }

    /// Cancel every pending alert.
    pub async fn cancel_all(&self) {
        self.scheduler.cancel_all().await;
    }
}
