//! Month screen: the calendar grid with per-date and per-weekday
//! notification reservations.

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use kasa_calendar::{DayTone, MonthGrid, ReservationBook, WEEKDAY_LABELS};
use kasa_notify::RainAlertPlanner;
use kasa_weather::WeatherData;

/// What a calendar cell renders: the day number, its weekday tone and
/// whether the date carries a reservation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellModel {
    pub text: String,
    pub tone: DayTone,
    pub reserved: bool,
}

pub struct MonthScreen {
    grid: MonthGrid,
    book: ReservationBook,
    planner: RainAlertPlanner,
}

impl MonthScreen {
    pub fn new(planner: RainAlertPlanner, cursor: NaiveDate) -> Self {
        Self {
            grid: MonthGrid::for_month(cursor),
            book: ReservationBook::new(),
            planner,
        }
    }

    /// Navigation title, e.g. "2024/06".
    pub fn title(&self) -> String {
        self.grid.month_string()
    }

    pub fn weekday_labels(&self) -> [&'static str; 7] {
        WEEKDAY_LABELS
    }

    pub fn grid(&self) -> &MonthGrid {
        &self.grid
    }

    pub fn is_reserved(&self, date: NaiveDate) -> bool {
        self.book.is_reserved(date)
    }

    pub fn time_for(&self, date: NaiveDate) -> Option<NaiveTime> {
        self.book.time_for(date)
    }

    /// Cell models for the displayed sequence, in grid order.
    pub fn cell_models(&self) -> Vec<CellModel> {
        self.grid
            .days()
            .iter()
            .map(|&date| CellModel {
                text: date.format("%-d").to_string(),
                tone: DayTone::for_date(date),
                reserved: self.book.is_reserved(date),
            })
            .collect()
    }

    /// Tap a cell: toggle its reservation. Toggling off cancels any alert
    /// scheduled for the date's reserved time. Returns the new state.
    pub async fn tap(&mut self, date: NaiveDate) -> bool {
        let reserved = self.book.toggle(date);
        if !reserved {
            if let Some(time) = self.book.time_for(date) {
                self.planner.cancel_alert(date.and_time(time)).await;
            }
        }
        reserved
    }

    /// Pick a time for a date: mark it reserved, store the time and
    /// schedule the alert.
    pub async fn pick_time(&mut self, date: NaiveDate, time: NaiveTime, weather: &WeatherData) {
        self.book.set_reserved(date, true);
        self.book.set_time(date, time);
        if let Err(e) = self.planner.schedule_alert(weather, date.and_time(time)).await {
            tracing::error!("Failed to schedule alert for {}: {}", date, e);
        }
    }

    /// Apply a weekday template: every matching date in the current grid
    /// gets the time, a reservation and a scheduled alert. Dates outside
    /// the current grid are untouched.
    pub async fn set_weekday_time(
        &mut self,
        weekday: Weekday,
        time: NaiveTime,
        weather: &WeatherData,
    ) {
        let days = self.grid.days().to_vec();
        self.book.set_weekday_time(weekday, time, &days);

        for date in days.into_iter().filter(|d| d.weekday() == weekday) {
            self.book.set_reserved(date, true);
            if let Err(e) = self.planner.schedule_alert(weather, date.and_time(time)).await {
                tracing::error!("Failed to schedule weekday alert for {}: {}", date, e);
            }
        }
    }

    pub fn weekday_time(&self, weekday: Weekday) -> Option<NaiveTime> {
        self.book.weekday_time(weekday)
    }

    /// Page forward; reservations are keyed by absolute date and survive.
    pub fn next_month(&mut self) {
        self.grid.next_month();
    }

    /// Page back; reservations are keyed by absolute date and survive.
    pub fn prev_month(&mut self) {
        self.grid.prev_month();
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use chrono::{TimeZone, Utc};
    use kasa_notify::PendingNotifications;
    use kasa_weather::{CurrentWeather, HourlyForecast, Location, WeatherCondition};
    use std::sync::Arc;

    fn dry_weather() -> WeatherData {
        WeatherData {
            current: CurrentWeather {
                temperature: 20.0,
                feels_like: 20.0,
                humidity: 50,
                wind_speed: 1.0,
                condition: WeatherCondition::Clear,
                updated_at: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
            },
            hourly: vec![HourlyForecast {
                time: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
                temperature: 20.0,
                condition: WeatherCondition::Clear,
                precipitation_chance: 0,
            }],
            daily: vec![],
            location: Location {
                latitude: 35.6895,
                longitude: 139.6917,
                accuracy_meters: None,
                city_name: None,
            },
            fetched_at: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn screen(center: &Arc<PendingNotifications>) -> MonthScreen {
        MonthScreen::new(RainAlertPlanner::new(center.clone()), date(2024, 6, 1))
    }

    #[tokio::test]
    async fn title_and_labels() {
        let center = Arc::new(PendingNotifications::new());
        let screen = screen(&center);
        assert_eq!(screen.title(), "2024/06");
        assert_eq!(screen.weekday_labels()[0], "日");
        assert_eq!(screen.weekday_labels()[6], "土");
    }

    #[tokio::test]
    async fn cell_models_match_grid() {
        let center = Arc::new(PendingNotifications::new());
        let screen = screen(&center);
        let cells = screen.cell_models();
        assert_eq!(cells.len(), 42);
        // First cell is 2024-05-26, a Sunday
        assert_eq!(cells[0].text, "26");
        assert_eq!(cells[0].tone, DayTone::Sunday);
        // 2024-06-01 is a Saturday at index 6
        assert_eq!(cells[6].text, "1");
        assert_eq!(cells[6].tone, DayTone::Saturday);
    }

    #[tokio::test]
    async fn tap_toggles_and_cancels_alert() {
        let center = Arc::new(PendingNotifications::new());
        let mut screen = screen(&center);
        let weather = dry_weather();
        let d = date(2024, 6, 10);

        screen.pick_time(d, t(8, 0), &weather).await;
        assert!(screen.is_reserved(d));
        assert!(center.is_pending("2024-06-10-08-00"));

        // Tap off: reservation and alert gone
        assert!(!screen.tap(d).await);
        assert!(!screen.is_reserved(d));
        assert!(!center.is_pending("2024-06-10-08-00"));

        // Tap on again: reserved, but nothing scheduled until a time is picked
        assert!(screen.tap(d).await);
        assert_eq!(center.pending_count(), 0);
    }

    #[tokio::test]
    async fn cancelling_one_date_leaves_other_alerts() {
        let center = Arc::new(PendingNotifications::new());
        let mut screen = screen(&center);
        let weather = dry_weather();

        screen.pick_time(date(2024, 6, 10), t(8, 0), &weather).await;
        screen.pick_time(date(2024, 6, 11), t(8, 0), &weather).await;

        screen.tap(date(2024, 6, 10)).await;
        assert!(!center.is_pending("2024-06-10-08-00"));
        assert!(center.is_pending("2024-06-11-08-00"));
    }

    #[tokio::test]
    async fn weekday_template_reserves_matching_grid_dates() {
        let center = Arc::new(PendingNotifications::new());
        let mut screen = screen(&center);
        let weather = dry_weather();

        screen.set_weekday_time(Weekday::Mon, t(7, 30), &weather).await;

        // June 2024 grid Mondays: 05-27, 06-03, 06-10, 06-17, 06-24, 07-01
        for d in [
            date(2024, 5, 27),
            date(2024, 6, 3),
            date(2024, 6, 10),
            date(2024, 6, 17),
            date(2024, 6, 24),
            date(2024, 7, 1),
        ] {
            assert!(screen.is_reserved(d), "{} should be reserved", d);
            assert_eq!(screen.time_for(d), Some(t(7, 30)));
        }
        assert_eq!(center.pending_count(), 6);
        assert!(center.is_pending("2024-06-03-07-30"));

        // Non-Mondays untouched
        assert!(!screen.is_reserved(date(2024, 6, 4)));
    }

    #[tokio::test]
    async fn weekday_template_is_not_reapplied_after_paging() {
        let center = Arc::new(PendingNotifications::new());
        let mut screen = screen(&center);
        let weather = dry_weather();

        screen.set_weekday_time(Weekday::Mon, t(7, 30), &weather).await;
        screen.next_month();

        // A Monday only visible in July's grid did not pick up the template
        let d = date(2024, 7, 15);
        assert!(screen.grid().days().contains(&d));
        assert!(!screen.is_reserved(d));
        assert_eq!(screen.time_for(d), None);
        // The template itself is still recorded
        assert_eq!(screen.weekday_time(Weekday::Mon), Some(t(7, 30)));
    }

    #[tokio::test]
    async fn paging_preserves_reservations() {
        let center = Arc::new(PendingNotifications::new());
        let mut screen = screen(&center);
        let weather = dry_weather();
        let d = date(2024, 6, 10);

        screen.pick_time(d, t(8, 0), &weather).await;
        screen.next_month();
        assert_eq!(screen.title(), "2024/07");
        screen.prev_month();
        assert!(screen.is_reserved(d));
        assert_eq!(screen.time_for(d), Some(t(8, 0)));
    }
}
