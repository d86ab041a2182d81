use chrono::NaiveDateTime;

/// Title shared by every weather notification.
pub const NOTIFICATION_TITLE: &str = "天気の通知";

const RAIN_BODY: &str = "雨が降る予定です。傘を持って行きましょう！";
const NO_RAIN_BODY: &str = "雨が降る予定はありません。傘は不要です！";

/// Fixed condition-to-message table: the umbrella reminder when rain is
/// expected, the all-clear otherwise.
pub fn rain_message(rain_expected: bool) -> &'static str {
    if rain_expected {
        RAIN_BODY
    } else {
        NO_RAIN_BODY
    }
}

/// Identifier for the notification triggered at `at`, derived from the
/// trigger time so cancelling a reservation can name the same identifier
/// it was scheduled under.
pub fn notification_identifier(at: NaiveDateTime) -> String {
    at.format("%Y-%m-%d-%H-%M").to_string()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn message_table() {
        assert_eq!(rain_message(true), "雨が降る予定です。傘を持って行きましょう！");
        assert_eq!(rain_message(false), "雨が降る予定はありません。傘は不要です！");
    }

    #[test]
    fn identifier_is_date_derived() {
        let at = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(8, 5, 0).unwrap());
        assert_eq!(notification_identifier(at), "2024-06-01-08-05");
    }

    #[test]
    fn identifiers_differ_by_minute() {
        let d = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let a = notification_identifier(d.and_time(NaiveTime::from_hms_opt(8, 5, 0).unwrap()));
        let b = notification_identifier(d.and_time(NaiveTime::from_hms_opt(8, 6, 0).unwrap()));
        assert_ne!(a, b);
    }
}
