// Date utility functions
// Calendar primitives shared by the recurrence, rotation and reset services

use chrono::{
    DateTime, Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat,
    TimeZone, Weekday,
};
use thiserror::Error;

/// Errors produced when parsing stored date strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("unparseable timestamp: {0:?}")]
    Unparseable(String),
    #[error("invalid date key {0:?}, expected YYYY-MM-DD")]
    InvalidDateKey(String),
}

pub fn is_same_day(date1: DateTime<Local>, date2: DateTime<Local>) -> bool {
    date1.date_naive() == date2.date_naive()
}

/// Local midnight for a calendar day.
///
/// When midnight falls into a DST gap the day starts at the first valid
/// instant, which is treated as the UTC reading of the same wall time.
pub fn local_midnight(date: NaiveDate) -> DateTime<Local> {
    let naive = date.and_time(NaiveTime::MIN);
    Local
        .from_local_datetime(&naive)
        .earliest()
        .unwrap_or_else(|| Local.from_utc_datetime(&naive))
}

pub fn start_of_day(date: DateTime<Local>) -> DateTime<Local> {
    local_midnight(date.date_naive())
}

pub fn end_of_day(date: DateTime<Local>) -> DateTime<Local> {
    let naive = date
        .date_naive()
        .and_time(NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN));
    Local
        .from_local_datetime(&naive)
        .latest()
        .unwrap_or_else(|| Local.from_utc_datetime(&naive))
}

/// Shift a calendar day by a signed number of days, saturating at the
/// representable range.
pub fn add_days(date: NaiveDate, amount: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(amount))
        .unwrap_or(if amount < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
}

/// Signed whole days from `from` to `to`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

pub fn start_of_week(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    let offset = (7 + date.weekday().num_days_from_monday() as i64
        - week_start.num_days_from_monday() as i64)
        % 7;
    add_days(date, -offset)
}

pub fn end_of_week(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    add_days(start_of_week(date, week_start), 6)
}

pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    let last = days_in_month(date.year(), date.month());
    date.with_day(last).unwrap_or(date)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}

/// Move `date` by `months` calendar months, landing on `anchor_day` (or the
/// date's own day) clamped to the length of the target month.
///
/// Jan 31 + 1 month is Feb 28 (Feb 29 in leap years).
pub fn add_months_preserving_day(date: NaiveDate, months: i32, anchor_day: Option<u32>) -> NaiveDate {
    let target_day = anchor_day.unwrap_or_else(|| date.day());
    let month_index = date.year() as i64 * 12 + date.month0() as i64 + months as i64;
    let year = month_index.div_euclid(12) as i32;
    let month = month_index.rem_euclid(12) as u32 + 1;
    let day = target_day.clamp(1, days_in_month(year, month));

    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(date)
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// `YYYY-MM-DD` key used to group occurrences by day.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_date_key(value: &str) -> Result<NaiveDate, DateError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| DateError::InvalidDateKey(value.to_string()))
}

/// Parse a stored timestamp.
///
/// Accepts RFC 3339 (`2024-06-03T10:00:00.000Z`), a naive local date-time
/// (`2024-06-03T10:00`, `2024-06-03 10:00:00`) or a bare date, which is read
/// as local midnight.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Local>, DateError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DateError::Unparseable(value.to_string()));
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Local));
    }

    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Local
                .from_local_datetime(&naive)
                .earliest()
                .ok_or_else(|| DateError::Unparseable(value.to_string()));
        }
    }

    parse_date_key(trimmed)
        .map(local_midnight)
        .map_err(|_| DateError::Unparseable(value.to_string()))
}

/// RFC 3339 string with millisecond precision, the format snapshots store.
pub fn format_timestamp(value: DateTime<Local>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, false)
}

pub fn to_start_of_day_string(value: DateTime<Local>) -> String {
    format_timestamp(start_of_day(value))
}

/// Every day from `start` to `end`, both inclusive. Empty when `end < start`.
pub fn date_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|day| *day <= end).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use test_case::test_case;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn start_of_day_clears_time() {
        let value = Local.with_ymd_and_hms(2024, 6, 3, 17, 45, 12).unwrap();
        let start = start_of_day(value);
        assert_eq!(start.date_naive(), ymd(2024, 6, 3));
        assert_eq!((start.hour(), start.minute(), start.second()), (0, 0, 0));
    }

    #[test]
    fn end_of_day_is_last_millisecond() {
        let value = Local.with_ymd_and_hms(2024, 6, 3, 8, 0, 0).unwrap();
        let end = end_of_day(value);
        assert_eq!(end.date_naive(), ymd(2024, 6, 3));
        assert_eq!((end.hour(), end.minute(), end.second()), (23, 59, 59));
        assert_eq!(end.timestamp_subsec_millis(), 999);
    }

    #[test]
    fn week_bounds_follow_week_start() {
        // 2024-06-05 is a Wednesday
        let wednesday = ymd(2024, 6, 5);
        assert_eq!(start_of_week(wednesday, Weekday::Sun), ymd(2024, 6, 2));
        assert_eq!(end_of_week(wednesday, Weekday::Sun), ymd(2024, 6, 8));
        assert_eq!(start_of_week(wednesday, Weekday::Mon), ymd(2024, 6, 3));
        assert_eq!(start_of_week(ymd(2024, 6, 2), Weekday::Sun), ymd(2024, 6, 2));
    }

    #[test]
    fn month_bounds() {
        assert_eq!(start_of_month(ymd(2024, 2, 17)), ymd(2024, 2, 1));
        assert_eq!(end_of_month(ymd(2024, 2, 17)), ymd(2024, 2, 29));
        assert_eq!(end_of_month(ymd(2023, 2, 1)), ymd(2023, 2, 28));
        assert_eq!(end_of_month(ymd(2024, 12, 5)), ymd(2024, 12, 31));
    }

    #[test_case(ymd(2024, 1, 31), 1, ymd(2024, 2, 29); "leap february clamps")]
    #[test_case(ymd(2023, 1, 31), 1, ymd(2023, 2, 28); "common february clamps")]
    #[test_case(ymd(2024, 1, 31), 2, ymd(2024, 3, 31); "march keeps day 31")]
    #[test_case(ymd(2024, 11, 15), 3, ymd(2025, 2, 15); "crosses year boundary")]
    #[test_case(ymd(2024, 3, 31), -1, ymd(2024, 2, 29); "negative months clamp")]
    #[test_case(ymd(2024, 1, 10), -13, ymd(2022, 12, 10); "negative across years")]
    fn add_months_clamps_day(start: NaiveDate, months: i32, expected: NaiveDate) {
        assert_eq!(add_months_preserving_day(start, months, None), expected);
    }

    #[test]
    fn add_months_uses_anchor_day_over_current_day() {
        // cursor sits on a clamped Feb 29, the anchor day restores the 31st
        assert_eq!(
            add_months_preserving_day(ymd(2024, 2, 29), 1, Some(31)),
            ymd(2024, 3, 31)
        );
    }

    #[test]
    fn weekend_detection() {
        assert!(is_weekend(ymd(2024, 6, 1)));
        assert!(is_weekend(ymd(2024, 6, 2)));
        assert!(!is_weekend(ymd(2024, 6, 3)));
        assert!(!is_weekend(ymd(2024, 6, 7)));
    }

    #[test]
    fn date_key_round_trips_through_parser() {
        assert_eq!(date_key(ymd(2024, 6, 3)), "2024-06-03");
        assert_eq!(parse_date_key("2024-06-03").unwrap(), ymd(2024, 6, 3));
        assert_eq!(
            parse_date_key("2024-13-03"),
            Err(DateError::InvalidDateKey("2024-13-03".to_string()))
        );
    }

    #[test]
    fn parse_timestamp_accepts_stored_formats() {
        let rfc = parse_timestamp("2024-06-03T10:00:00+00:00").unwrap();
        assert_eq!(rfc.timestamp(), 1_717_408_800);

        let naive = parse_timestamp("2024-06-03T10:00").unwrap();
        assert_eq!(naive, Local.with_ymd_and_hms(2024, 6, 3, 10, 0, 0).unwrap());

        let bare = parse_timestamp("2024-06-03").unwrap();
        assert_eq!(bare, local_midnight(ymd(2024, 6, 3)));
    }

    #[test]
    fn parse_timestamp_rejects_garbage() {
        assert!(matches!(parse_timestamp("not a date"), Err(DateError::Unparseable(_))));
        assert!(matches!(parse_timestamp("   "), Err(DateError::Unparseable(_))));
    }

    #[test]
    fn date_range_is_inclusive() {
        let days = date_range(ymd(2024, 6, 1), ymd(2024, 6, 3));
        assert_eq!(days, vec![ymd(2024, 6, 1), ymd(2024, 6, 2), ymd(2024, 6, 3)]);
        assert!(date_range(ymd(2024, 6, 3), ymd(2024, 6, 1)).is_empty());
    }
}
