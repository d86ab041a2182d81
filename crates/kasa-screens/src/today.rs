//! Today screen: a list of reserved notification times for the current
//! day, each with an on/off switch, backed by the rain-alert planner.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use kasa_notify::RainAlertPlanner;
use kasa_weather::WeatherData;

/// One row in the reservation table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRow {
    pub time: NaiveTime,
    pub rain_expected: bool,
    pub enabled: bool,
}

impl NotificationRow {
    /// Cell label, e.g. "08:30".
    pub fn label(&self) -> String {
        self.time.format("%H:%M").to_string()
    }
}

pub struct TodayScreen {
    date: NaiveDate,
    rows: Vec<NotificationRow>,
    planner: RainAlertPlanner,
}

impl TodayScreen {
    pub fn new(planner: RainAlertPlanner, date: NaiveDate) -> Self {
        Self {
            date,
            rows: Vec::new(),
            planner,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn rows(&self) -> &[NotificationRow] {
        &self.rows
    }

    fn trigger_at(&self, time: NaiveTime) -> NaiveDateTime {
        self.date.and_time(time)
    }

    /// Confirm a picked time: append an enabled row and schedule its alert.
    pub async fn add_reservation(&mut self, time: NaiveTime, weather: &WeatherData) {
        let rain_expected = match self.planner.schedule_alert(weather, self.trigger_at(time)).await
        {
            Ok(rained) => rained,
            Err(e) => {
                tracing::error!("Failed to schedule alert for {}: {}", time, e);
                false
            }
        };
        self.rows.push(NotificationRow {
            time,
            rain_expected,
            enabled: true,
        });
    }

    /// Flip a row's switch: on re-schedules, off cancels.
    pub async fn set_enabled(&mut self, index: usize, enabled: bool, weather: &WeatherData) {
        let Some(row) = self.rows.get(index).cloned() else {
            return;
        };

        if enabled {
            match self
                .planner
                .schedule_alert(weather, self.trigger_at(row.time))
                .await
            {
                Ok(rain_expected) => {
                    self.rows[index].rain_expected = rain_expected;
                    self.rows[index].enabled = true;
                }
                Err(e) => {
                    tracing::error!("Failed to re-enable alert for {}: {}", row.time, e);
                }
            }
        } else {
            self.planner.cancel_alert(self.trigger_at(row.time)).await;
            self.rows[index].enabled = false;
        }
    }

    /// Delete a row, cancelling its alert first.
    pub async fn remove(&mut self, index: usize) {
        if index >= self.rows.len() {
            return;
        }
        let row = self.rows.remove(index);
        self.planner.cancel_alert(self.trigger_at(row.time)).await;
    }
}
