use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

/// Sunday-first weekday header labels for the month view.
pub const WEEKDAY_LABELS: [&str; 7] = ["日", "月", "火", "水", "木", "金", "土"];

/// Display classification for a calendar cell's day number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayTone {
    Sunday,
    Saturday,
    Weekday,
}

impl DayTone {
    pub fn for_date(date: NaiveDate) -> Self {
        match date.weekday() {
            Weekday::Sun => Self::Sunday,
            Weekday::Sat => Self::Saturday,
            _ => Self::Weekday,
        }
    }
}

/// The dates a month view displays.
///
/// The sequence starts on the Sunday at or before the 1st and its length is
/// always a whole number of weeks covering the month, so 35 or 42 cells.
/// Paging regenerates the sequence via calendar month arithmetic; year
/// boundaries need no special handling.
#[derive(Debug, Clone)]
pub struct MonthGrid {
    first_of_month: NaiveDate,
    days: Vec<NaiveDate>,
}

impl MonthGrid {
    /// Grid for the month containing `date`.
    pub fn for_month(date: NaiveDate) -> Self {
        let first_of_month = first_of_month(date);
        Self {
            first_of_month,
            days: build_days(first_of_month),
        }
    }

    /// The displayed date sequence, leading/trailing cells included.
    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    pub fn first_of_month(&self) -> NaiveDate {
        self.first_of_month
    }

    /// Month title, e.g. "2024/06".
    pub fn month_string(&self) -> String {
        self.first_of_month.format("%Y/%m").to_string()
    }

    /// Position of a date in the displayed sequence.
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        self.days.iter().position(|&d| d == date)
    }

    /// Page forward one month, regenerating the sequence.
    pub fn next_month(&mut self) {
        if let Some(next) = self.first_of_month.checked_add_months(Months::new(1)) {
            self.first_of_month = next;
            self.days = build_days(next);
        }
    }

    /// Page back one month, regenerating the sequence.
    pub fn prev_month(&mut self) {
        if let Some(prev) = self.first_of_month.checked_sub_months(Months::new(1)) {
            self.first_of_month = prev;
            self.days = build_days(prev);
        }
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn build_days(first: NaiveDate) -> Vec<NaiveDate> {
    let leading = first.weekday().num_days_from_sunday() as usize;
    let month_len = days_in_month(first);
    let weeks = (leading + month_len).div_ceil(7);

    let Some(start) = first.checked_sub_days(Days::new(leading as u64)) else {
        return vec![first];
    };

    (0..weeks * 7)
        .filter_map(|i| start.checked_add_days(Days::new(i as u64)))
        .collect()
}

fn days_in_month(first: NaiveDate) -> usize {
    let next = first
        .checked_add_months(Months::new(1))
        .unwrap_or(first);
    next.signed_duration_since(first).num_days().max(1) as usize
}
