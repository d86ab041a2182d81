use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use std::collections::HashMap;

/// In-memory reservation state for the month view.
///
/// Two maps keyed by absolute date (reserved flag, reserved time) plus a
/// weekday template map. Absent keys read as not-reserved / no time; no
/// operation fails. The store is only touched from the UI's single control
/// thread and is not persisted.
#[derive(Debug, Default)]
pub struct ReservationBook {
    reserved: HashMap<NaiveDate, bool>,
    times: HashMap<NaiveDate, NaiveTime>,
    weekday_times: HashMap<Weekday, NaiveTime>,
}

impl ReservationBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip a date's reserved flag, returning the new state.
    pub fn toggle(&mut self, date: NaiveDate) -> bool {
        let state = !self.is_reserved(date);
        self.reserved.insert(date, state);
        state
    }

    pub fn is_reserved(&self, date: NaiveDate) -> bool {
        self.reserved.get(&date).copied().unwrap_or(false)
    }

    pub fn set_reserved(&mut self, date: NaiveDate, reserved: bool) {
        self.reserved.insert(date, reserved);
    }

    pub fn set_time(&mut self, date: NaiveDate, time: NaiveTime) {
        self.times.insert(date, time);
    }

    pub fn time_for(&self, date: NaiveDate) -> Option<NaiveTime> {
        self.times.get(&date).copied()
    }

    /// Record a weekday template time and apply it to every matching date
    /// in the supplied grid.
    ///
    /// The template is applied to the dates in view at call time only;
    /// paging to another month does not re-apply it to that month's
    /// instances of the weekday.
    pub fn set_weekday_time(&mut self, weekday: Weekday, time: NaiveTime, grid_days: &[NaiveDate]) {
        self.weekday_times.insert(weekday, time);
        for &date in grid_days.iter().filter(|d| d.weekday() == weekday) {
            self.set_time(date, time);
        }
    }

    pub fn weekday_time(&self, weekday: Weekday) -> Option<NaiveTime> {
        self.weekday_times.get(&weekday).copied()
    }

    /// Dates in the given grid that currently carry a reservation.
    pub fn reserved_dates<'a>(
        &'a self,
        grid_days: &'a [NaiveDate],
    ) -> impl Iterator<Item = NaiveDate> + 'a {
        grid_days.iter().copied().filter(|&d| self.is_reserved(d))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::grid::MonthGrid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn untouched_dates_are_not_reserved() {
        let book = ReservationBook::new();
        assert!(!book.is_reserved(date(2024, 6, 1)));
        assert_eq!(book.time_for(date(2024, 6, 1)), None);
    }

    #[test]
    fn double_toggle_restores_state() {
        let mut book = ReservationBook::new();
        let d = date(2024, 6, 10);
        assert!(book.toggle(d));
        assert!(book.is_reserved(d));
        assert!(!book.toggle(d));
        assert!(!book.is_reserved(d));
    }

    #[test]
    fn toggling_one_date_leaves_others_alone() {
        let mut book = ReservationBook::new();
        book.toggle(date(2024, 6, 10));
        assert!(!book.is_reserved(date(2024, 6, 11)));
    }

    #[test]
    fn reservations_survive_month_paging() {
        let mut book = ReservationBook::new();
        let mut grid = MonthGrid::for_month(date(2024, 6, 1));
        let d = date(2024, 6, 10);
        book.toggle(d);
        grid.next_month();
        grid.prev_month();
        assert!(book.is_reserved(d));
    }

    #[test]
    fn time_roundtrip() {
        let mut book = ReservationBook::new();
        let d = date(2024, 6, 10);
        book.set_time(d, time(8, 30));
        assert_eq!(book.time_for(d), Some(time(8, 30)));
    }

    #[test]
    fn weekday_time_applies_to_matching_grid_dates_only() {
        let mut book = ReservationBook::new();
        let grid = MonthGrid::for_month(date(2024, 6, 1));

        book.set_weekday_time(Weekday::Mon, time(7, 45), grid.days());

        // Every displayed Monday got the time
        for &d in grid.days() {
            if d.weekday() == Weekday::Mon {
                assert_eq!(book.time_for(d), Some(time(7, 45)));
            } else {
                assert_eq!(book.time_for(d), None);
            }
        }
        assert_eq!(book.weekday_time(Weekday::Mon), Some(time(7, 45)));
        assert_eq!(book.weekday_time(Weekday::Tue), None);
    }

    #[test]
    fn weekday_time_is_not_retroactive_across_months() {
        let mut book = ReservationBook::new();
        let mut grid = MonthGrid::for_month(date(2024, 6, 1));

        book.set_weekday_time(Weekday::Fri, time(18, 0), grid.days());
        grid.next_month();

        // A Friday that only appears in July's grid is untouched
        let late_july_friday = date(2024, 7, 26);
        assert!(grid.days().contains(&late_july_friday));
        assert_eq!(book.time_for(late_july_friday), None);
        // The template itself is still recorded
        assert_eq!(book.weekday_time(Weekday::Fri), Some(time(18, 0)));
    }

    #[test]
    fn reserved_dates_filters_grid() {
        let mut book = ReservationBook::new();
        let grid = MonthGrid::for_month(date(2024, 6, 1));
        book.toggle(date(2024, 6, 10));
        book.toggle(date(2024, 6, 20));
        book.toggle(date(2024, 9, 1)); // off-grid

        let reserved: Vec<_> = book.reserved_dates(grid.days()).collect();
        assert_eq!(reserved, vec![date(2024, 6, 10), date(2024, 6, 20)]);
    }
}
