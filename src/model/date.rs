// Day-of-year arithmetic on `DD-MM-YYYY` strings.
//
// Listing filters compare events by day-of-year (1 = January 1st) rather than
// by full dates. The year component is parsed and used to resolve leap years,
// but comparisons between two day-of-year values ignore it.
use crate::error::{EventError, EventResult};
use chrono::{Datelike, Duration, NaiveDate};

/// Day-of-year assigned to an event with no date. Below every real day (1..=366).
pub const MISSING_DAY: i32 = -1;

/// Parses a `DD-MM-YYYY` string. Day and month may omit the leading zero.
pub fn parse_event_date(value: &str) -> EventResult<NaiveDate> {
    let invalid = || EventError::InvalidDateFormat(value.to_string());

    let mut parts = value.trim().split('-');
    let (Some(d), Some(m), Some(y), None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };

    let day: u32 = d.parse().map_err(|_| invalid())?;
    let month: u32 = m.parse().map_err(|_| invalid())?;
    let year: i32 = y.parse().map_err(|_| invalid())?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

/// Converts a `DD-MM-YYYY` string to its day-of-year.
pub fn day_of_year(value: &str) -> EventResult<u32> {
    parse_event_date(value).map(|d| d.ordinal())
}

/// Day-of-year of an optional event date, or `MISSING_DAY` when absent or malformed.
pub fn day_of_year_or_missing(value: Option<&str>) -> i32 {
    match value {
        None => MISSING_DAY,
        Some(v) => match day_of_year(v) {
            Ok(d) => d as i32,
            Err(e) => {
                log::debug!("Treating unparseable event date as missing: {}", e);
                MISSING_DAY
            }
        },
    }
}

pub fn format_event_date(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}

/// Converts the `YYYY-MM-DD` value produced by a date input into `DD-MM-YYYY`.
pub fn form_date_to_event_date(value: &str) -> EventResult<String> {
    let date = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| EventError::InvalidDateFormat(value.to_string()))?;
    Ok(format_event_date(date))
}

/// Day-of-year of `today + offset_days`.
///
/// Crossing into the next year yields that year's (small) day-of-year.
pub fn day_of_year_in(today: NaiveDate, offset_days: i64) -> u32 {
    (today + Duration::days(offset_days)).ordinal()
}

/// Start and end day-of-year of the next Monday-to-Sunday week.
///
/// `days_until_next_monday = (8 - weekday) % 7` with Sunday = 0, so on a Monday
/// the "next week" starts today. The end is `start + 6` and is not wrapped at
/// the year boundary.
pub fn next_week_bounds(today: NaiveDate) -> (u32, u32) {
    let weekday = today.weekday().num_days_from_sunday();
    let days_until_next_monday = (8 - weekday) % 7;
    let start = today.ordinal() + days_until_next_monday;
    (start, start + 6)
}
